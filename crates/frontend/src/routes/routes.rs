use crate::layout::global_context::AppGlobalContext;
use crate::layout::Shell;
use leptos::prelude::*;

/// Navigation is a single active-page key mirrored into `?active=`.
#[component]
pub fn AppRoutes() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    // Runs once when the component is created.
    ctx.init_router_integration();

    view! { <Shell /> }
}
