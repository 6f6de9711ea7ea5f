use crate::shared::config::config;
use crate::shared::icons::icon;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    fn css_class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast--success",
            ToastKind::Error => "toast toast--error",
            ToastKind::Info => "toast toast--info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Transient notifications shown in the corner of the screen.
#[derive(Clone, Copy)]
pub struct ToastService {
    toasts: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
}

impl Default for ToastService {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastService {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(1),
        }
    }

    pub fn toasts(&self) -> Signal<Vec<Toast>> {
        self.toasts.into()
    }

    /// Adds a toast without scheduling its removal.
    pub fn push(&self, kind: ToastKind, message: impl Into<String>) -> u64 {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.toasts.update(|list| {
            list.push(Toast {
                id,
                kind,
                message: message.into(),
            })
        });
        id
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|list| list.retain(|t| t.id != id));
    }

    /// Shows a toast and removes it after the configured timeout.
    pub fn notify(&self, kind: ToastKind, message: impl Into<String>) {
        let id = self.push(kind, message);
        let service = *self;
        let timeout = config().notifications.timeout_ms;
        spawn_local(async move {
            TimeoutFuture::new(timeout).await;
            service.dismiss(id);
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(ToastKind::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(ToastKind::Error, message);
    }
}

pub fn use_toasts() -> ToastService {
    use_context::<ToastService>().expect("ToastService not found")
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let service = use_toasts();

    view! {
        <div class="toast-host">
            <For
                each=move || service.toasts().get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.kind.css_class() role="status">
                            <span class="toast__message">{toast.message}</span>
                            <button
                                class="button button--icon toast__close"
                                on:click=move |_| service.dismiss(id)
                                title="Dismiss"
                            >
                                {icon("x")}
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let service = ToastService::new();
        let a = service.push(ToastKind::Success, "Item added successfully");
        let b = service.push(ToastKind::Error, "HTTP error! Status: 500");
        assert_ne!(a, b);
        assert_eq!(service.toasts().get_untracked().len(), 2);

        service.dismiss(a);
        let left = service.toasts().get_untracked();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].kind, ToastKind::Error);

        service.dismiss(999);
        assert_eq!(service.toasts().get_untracked().len(), 1);
    }
}
