use crate::shared::config::config;
use crate::shared::icons::icon;
use crate::shared::pagination::{use_pagination, PaginationDescriptor};
use leptos::prelude::*;

/// What the bar shows for one descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationBarModel {
    pub summary: String,
    pub previous_enabled: bool,
    pub next_enabled: bool,
    pub per_page: usize,
    /// `(size, label, selected)`
    pub options: Vec<(usize, String, bool)>,
}

impl PaginationBarModel {
    /// `None` while everything fits on one page: the bar is not rendered at all.
    pub fn build(d: &PaginationDescriptor, sizes: &[usize]) -> Option<Self> {
        if !d.is_visible() {
            return None;
        }
        Some(Self {
            summary: d.summary(),
            previous_enabled: d.has_previous(),
            next_enabled: d.has_next(),
            per_page: d.per_page,
            options: sizes
                .iter()
                .map(|&size| (size, format!("{} per page", size), size == d.per_page))
                .collect(),
        })
    }
}

/// Global pagination bar. Reads the shared slot and renders nothing while the
/// active table fits on one page.
#[component]
pub fn PaginationBar() -> impl IntoView {
    let ctx = use_pagination();
    let sizes = config().table.per_page_options.clone();

    move || {
        let d = ctx.get();
        let Some(model) = PaginationBarModel::build(&d, &sizes) else {
            return ().into_any();
        };

        let prev = d.clone();
        let next = d.clone();
        let resize = d;

        view! {
            <div class="pagination-controls">
                <button
                    class="pagination-btn"
                    on:click=move |_| prev.go_previous()
                    disabled=!model.previous_enabled
                    title="Previous page"
                >
                    {icon("chevron-left")}
                    "Previous"
                </button>
                <span class="pagination-info">{model.summary}</span>
                <button
                    class="pagination-btn"
                    on:click=move |_| next.go_next()
                    disabled=!model.next_enabled
                    title="Next page"
                >
                    "Next"
                    {icon("chevron-right")}
                </button>
                <select
                    class="page-size-select"
                    on:change=move |ev| {
                        if let Ok(val) = event_target_value(&ev).parse::<usize>() {
                            resize.change_per_page(val);
                        }
                    }
                    prop:value=model.per_page.to_string()
                >
                    {model.options.into_iter().map(|(size, label, selected)| {
                        view! {
                            <option value=size.to_string() selected=selected>
                                {label}
                            </option>
                        }
                    }).collect_view()}
                </select>
            </div>
        }
        .into_any()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::pagination::PaginationContext;

    const SIZES: [usize; 4] = [10, 25, 50, 100];

    #[test]
    fn test_single_page_renders_nothing() {
        let ctx = PaginationContext::new();
        assert_eq!(PaginationBarModel::build(&ctx.get_untracked(), &SIZES), None);

        ctx.set(PaginationDescriptor::new(1, 1, 7, 10));
        assert_eq!(PaginationBarModel::build(&ctx.get_untracked(), &SIZES), None);
    }

    #[test]
    fn test_two_pages_render_controls() {
        let ctx = PaginationContext::new();
        ctx.set(PaginationDescriptor::new(1, 2, 11, 10));

        let model = PaginationBarModel::build(&ctx.get_untracked(), &SIZES).unwrap();
        assert_eq!(model.summary, "Page 1 of 2 (11 items)");
        assert!(!model.previous_enabled);
        assert!(model.next_enabled);
        assert_eq!(model.options.len(), 4);
        assert_eq!(model.options[0], (10, "10 per page".to_string(), true));
        assert!(model.options[1..].iter().all(|(_, _, selected)| !selected));
    }

    #[test]
    fn test_last_page_disables_next() {
        let model = PaginationBarModel::build(&PaginationDescriptor::new(4, 4, 40, 25), &SIZES).unwrap();
        assert!(model.previous_enabled);
        assert!(!model.next_enabled);
        assert_eq!(model.per_page, 25);
    }

    #[test]
    fn test_reset_hides_bar_again() {
        let ctx = PaginationContext::new();
        ctx.set(PaginationDescriptor::new(2, 3, 30, 10));
        assert!(PaginationBarModel::build(&ctx.get_untracked(), &SIZES).is_some());
        ctx.reset();
        assert!(PaginationBarModel::build(&ctx.get_untracked(), &SIZES).is_none());
    }
}
