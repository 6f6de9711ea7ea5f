use crate::domain::a001_program::ui::list::ProgramsList;
use crate::domain::a002_rdap::ui::list::RdapList;
use crate::layout::global_context::{AppGlobalContext, Page};
use leptos::prelude::*;

/// Mounts the active page. Switching pages unmounts the previous one, which
/// also clears its pagination descriptor.
#[component]
pub fn Center() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    view! {
        <main data-zone="center" class="app-main">
            {move || match ctx.active.get() {
                Page::Rdap => view! { <RdapList /> }.into_any(),
                Page::Programs => view! { <ProgramsList /> }.into_any(),
            }}
        </main>
    }
}
