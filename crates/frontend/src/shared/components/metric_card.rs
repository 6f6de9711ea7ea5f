use crate::shared::icons::icon;
use leptos::prelude::*;

/// Count tile of the metrics row.
#[component]
pub fn MetricCard(
    /// Label displayed above the value
    #[prop(into)]
    title: String,
    /// Icon name from the icon() helper
    icon_name: &'static str,
    /// `None` while the metrics are loading
    #[prop(into)]
    value: Signal<Option<i64>>,
) -> impl IntoView {
    let formatted = move || match value.get() {
        Some(v) => v.to_string(),
        None => "…".to_string(),
    };

    view! {
        <div class="stat-card">
            <div class="stat-card__icon">{icon(icon_name)}</div>
            <div class="stat-card__body">
                <div class="stat-card__label">{title}</div>
                <div class="stat-card__value">{formatted}</div>
            </div>
        </div>
    }
}
