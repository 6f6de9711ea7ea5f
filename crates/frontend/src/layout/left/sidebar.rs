//! Sidebar with the page groups of the dashboard

use crate::layout::global_context::{AppGlobalContext, Page};
use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    items: Vec<Page>,
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "deeper",
            label: "Deeper",
            items: vec![Page::Rdap],
        },
        MenuGroup {
            id: "shared",
            label: "Shared",
            items: vec![Page::Programs],
        },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    view! {
        <nav data-zone="left" class="app-sidebar" class:hidden=move || !ctx.left_open.get()>
            <div class="app-sidebar__content">
                {get_menu_groups().into_iter().map(|group| view! {
                    <div class="app-sidebar__group" data-group=group.id>
                        <div class="app-sidebar__group-label">{group.label}</div>
                        {group.items.into_iter().map(|page| view! {
                            <div
                                class="app-sidebar__item"
                                class:app-sidebar__item--active=move || ctx.active.get() == page
                                on:click=move |_| ctx.open(page)
                            >
                                <div class="app-sidebar__item-content">
                                    {icon(page.icon())}
                                    <span>{page.title()}</span>
                                </div>
                            </div>
                        }).collect_view()}
                    </div>
                }).collect_view()}
            </div>
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_page_in_menu() {
        let listed: Vec<Page> = get_menu_groups().into_iter().flat_map(|g| g.items).collect();
        for page in Page::ALL {
            assert!(listed.contains(&page));
        }
    }
}
