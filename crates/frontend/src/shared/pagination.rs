//! Single app-wide pagination slot.
//!
//! The page that is currently mounted publishes a [`PaginationDescriptor`];
//! the global pagination bar (rendered by the shell, outside the page) reads
//! it. Only one descriptor is active at a time.

use crate::shared::config::config;
use leptos::prelude::*;
use std::fmt;
use std::sync::Arc;

/// Page-change callback; receives a 1-based page number or a per-page value.
pub type PageHandler = Arc<dyn Fn(usize) + Send + Sync>;

fn noop_handler() -> PageHandler {
    Arc::new(|_| {})
}

#[derive(Clone)]
pub struct PaginationDescriptor {
    /// 1-based
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub per_page: usize,
    pub on_page_change: PageHandler,
    pub on_per_page_change: PageHandler,
}

impl Default for PaginationDescriptor {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            total_items: 0,
            per_page: config().table.default_per_page,
            on_page_change: noop_handler(),
            on_per_page_change: noop_handler(),
        }
    }
}

impl fmt::Debug for PaginationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaginationDescriptor")
            .field("current_page", &self.current_page)
            .field("total_pages", &self.total_pages)
            .field("total_items", &self.total_items)
            .field("per_page", &self.per_page)
            .finish_non_exhaustive()
    }
}

impl PaginationDescriptor {
    pub fn new(current_page: usize, total_pages: usize, total_items: usize, per_page: usize) -> Self {
        Self {
            current_page,
            total_pages,
            total_items,
            per_page,
            ..Default::default()
        }
    }

    pub fn with_handlers(
        mut self,
        on_page_change: impl Fn(usize) + Send + Sync + 'static,
        on_per_page_change: impl Fn(usize) + Send + Sync + 'static,
    ) -> Self {
        self.on_page_change = Arc::new(on_page_change);
        self.on_per_page_change = Arc::new(on_per_page_change);
        self
    }

    /// The bar is hidden when everything fits on one page.
    pub fn is_visible(&self) -> bool {
        self.total_pages > 1
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn go_previous(&self) {
        if self.has_previous() {
            (self.on_page_change)(self.current_page - 1);
        }
    }

    pub fn go_next(&self) {
        if self.has_next() {
            (self.on_page_change)(self.current_page + 1);
        }
    }

    pub fn change_per_page(&self, per_page: usize) {
        if per_page > 0 && per_page != self.per_page {
            (self.on_per_page_change)(per_page);
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Page {} of {} ({} items)",
            self.current_page, self.total_pages, self.total_items
        )
    }
}

/// Shared holder of the active descriptor.
#[derive(Clone, Copy)]
pub struct PaginationContext {
    state: RwSignal<PaginationDescriptor>,
}

impl Default for PaginationContext {
    fn default() -> Self {
        Self::new()
    }
}

impl PaginationContext {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(PaginationDescriptor::default()),
        }
    }

    /// Tracked read
    pub fn get(&self) -> PaginationDescriptor {
        self.state.get()
    }

    pub fn get_untracked(&self) -> PaginationDescriptor {
        self.state.get_untracked()
    }

    /// Replaces the descriptor wholesale.
    pub fn set(&self, descriptor: PaginationDescriptor) {
        self.state.set(descriptor);
    }

    pub fn reset(&self) {
        self.state.set(PaginationDescriptor::default());
    }
}

pub fn use_pagination() -> PaginationContext {
    use_context::<PaginationContext>().expect("PaginationContext not found")
}

/// Keeps the shared slot in sync with `build` while the calling component is
/// mounted, and clears it on unmount.
pub fn publish_pagination(
    ctx: PaginationContext,
    build: impl Fn() -> PaginationDescriptor + Send + Sync + 'static,
) {
    Effect::new(move |_| {
        ctx.set(build());
    });
    on_cleanup(move || ctx.reset());
}
