//! PageFrame: root wrapper of every routed page.
//!
//! Sets `id="{entity}--list"` on the root element so a page can be found from
//! the DOM inspector, e.g. `"a002_rdap--list"`.

use leptos::prelude::*;

#[component]
pub fn PageFrame(
    /// HTML id in format `{entity}--{category}`
    page_id: &'static str,
    /// Page title rendered in the header
    #[prop(into)]
    title: String,
    /// Buttons and filters rendered on the right side of the header
    #[prop(optional)]
    actions: Option<ChildrenFn>,
    children: Children,
) -> impl IntoView {
    view! {
        <div id=page_id class="page">
            <div class="page__header">
                <h1 class="page__title">{title}</h1>
                <div class="page__actions">
                    {move || actions.as_ref().map(|actions| actions())}
                </div>
            </div>
            <div class="page__content">
                {children()}
            </div>
        </div>
    }
}
