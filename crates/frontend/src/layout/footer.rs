use crate::shared::api_utils::api_url;
use crate::shared::components::pagination_controls::PaginationBar;
use crate::shared::http::get_json;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Copy, Debug, PartialEq)]
enum ServerStatus {
    Online,
    Offline,
    Checking,
}

impl ServerStatus {
    fn display_text(&self) -> &'static str {
        match self {
            ServerStatus::Online => "Server: Online",
            ServerStatus::Offline => "Server: Offline",
            ServerStatus::Checking => "Server: Checking...",
        }
    }

    fn css_class(&self) -> &'static str {
        match self {
            ServerStatus::Online => "status-online",
            ServerStatus::Offline => "status-offline",
            ServerStatus::Checking => "status-checking",
        }
    }
}

/// Footer: global pagination bar and the database status indicator.
#[component]
pub fn Footer() -> impl IntoView {
    let status = RwSignal::new(ServerStatus::Checking);

    let check_server = move || {
        status.set(ServerStatus::Checking);
        spawn_local(async move {
            let online = get_json(&api_url("/api/db-health")).await.is_ok();
            status.set(if online {
                ServerStatus::Online
            } else {
                ServerStatus::Offline
            });
        });
    };

    // Проверка при монтировании
    check_server();

    view! {
        <footer data-zone="footer" class="status-bar">
            <PaginationBar />
            <button
                class=move || format!("status-bar__server {}", status.get().css_class())
                title="Check again"
                on:click=move |_| check_server()
            >
                {move || status.get().display_text()}
            </button>
        </footer>
    }
}
