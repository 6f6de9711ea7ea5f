use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use crate::shared::notifications::ToastService;
use crate::shared::pagination::PaginationContext;
use crate::shared::per_page::{GlobalPerPage, PerPagePreference};
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppGlobalContext::new());

    // Общие для всех страниц: панель пагинации, размер страницы, уведомления
    provide_context(PaginationContext::new());
    provide_context(GlobalPerPage::new(PerPagePreference::browser()));
    provide_context(ToastService::new());

    view! {
        <AppRoutes />
    }
}
