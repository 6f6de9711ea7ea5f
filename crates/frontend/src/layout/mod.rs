pub mod center;
pub mod footer;
pub mod global_context;
pub mod left;
pub mod top_header;

use crate::shared::notifications::ToastHost;
use leptos::prelude::*;
use top_header::TopHeader;

/// Main application shell.
///
/// ```text
/// +------------------------------------------+
/// |              TopHeader                   |
/// +------------------------------------------+
/// |  Sidebar  |          Content             |
/// +------------------------------------------+
/// |      Pagination bar  |  Server status    |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell() -> impl IntoView {
    view! {
        <div class="app-layout">
            <TopHeader />
            <div class="app-body">
                <left::Sidebar />
                <center::Center />
            </div>
            <footer::Footer />
            <ToastHost />
        </div>
    }
}
