use super::model::{group_related, group_title, ExpandedRows, RelatedState};
use crate::shared::data_table::cells::{badge, datetime, display_value, text, truncate};
use crate::shared::data_table::{CellContext, ColumnSpec, ExpandedRenderer};
use crate::shared::icons::icon;
use contracts::domain::a002_rdap::aggregate::RdapKind;
use contracts::shared::Record;
use leptos::prelude::*;
use std::sync::Arc;

/// Callbacks and state the RDAP cells need from the page.
#[derive(Clone, Copy)]
pub struct RdapHandlers {
    pub expanded: RwSignal<ExpandedRows>,
    pub on_toggle: Callback<Record>,
    pub on_edit: Callback<Record>,
    pub on_delete: Callback<Record>,
    pub on_copy: Callback<String>,
}

fn is_org(record: &Record) -> bool {
    record.get_str("type") == Some(RdapKind::Orgs.as_str())
}

fn expander_cell(ctx: CellContext<'_, RdapHandlers>) -> AnyView {
    let (Some(id), true) = (ctx.record.id(), is_org(ctx.record)) else {
        return ().into_any();
    };
    let open = ctx.handlers.expanded.with(|e| e.is_open(&id));
    let on_toggle = ctx.handlers.on_toggle;
    let record = ctx.record.clone();
    let title = if open { "Hide related items" } else { "Show related items" };
    view! {
        <button
            class="button button--icon"
            title=title
            aria-expanded=open.to_string()
            on:click=move |_| on_toggle.run(record.clone())
        >
            {icon(if open { "chevron-down" } else { "chevron-right" })}
        </button>
    }
    .into_any()
}

fn type_cell(ctx: CellContext<'_, RdapHandlers>) -> AnyView {
    match ctx.value.and_then(|v| v.as_str()).and_then(RdapKind::parse) {
        Some(kind) => badge(kind.singular(), if kind == RdapKind::Orgs { "primary" } else { "neutral" }),
        None => text(ctx),
    }
}

fn value_cell(ctx: CellContext<'_, RdapHandlers>) -> AnyView {
    let full = display_value(ctx.value);
    let short = truncate(&full, 60);
    let on_copy = ctx.handlers.on_copy;
    let copied = full.clone();
    view! {
        <div class="copy-cell">
            <span title=full>{short}</span>
            <button class="button button--icon copy-btn" title="Copy value" on:click=move |_| on_copy.run(copied.clone())>
                {icon("copy")}
            </button>
        </div>
    }
    .into_any()
}

fn actions_cell(ctx: CellContext<'_, RdapHandlers>) -> AnyView {
    let on_edit = ctx.handlers.on_edit;
    let on_delete = ctx.handlers.on_delete;
    let for_edit = ctx.record.clone();
    let for_delete = ctx.record.clone();
    view! {
        <div class="actions-cell">
            <button class="button button--icon" title="Edit item" on:click=move |_| on_edit.run(for_edit.clone())>
                {icon("edit")}
            </button>
            <button class="button button--icon button--danger" title="Delete item" on:click=move |_| on_delete.run(for_delete.clone())>
                {icon("trash")}
            </button>
        </div>
    }
    .into_any()
}

pub fn rdap_columns() -> Vec<ColumnSpec<RdapHandlers>> {
    vec![
        ColumnSpec::new("", "expander").width("40px").unsortable().render(expander_cell),
        ColumnSpec::new("Program", "program_name"),
        ColumnSpec::new("Type", "type").width("140px").render(type_cell),
        ColumnSpec::new("Value", "value").render(value_cell),
        ColumnSpec::new("Created", "created_at").width("180px").render(datetime),
        ColumnSpec::new("Actions", "actions").width("100px").unsortable().render(actions_cell),
    ]
}

fn drawer(state: RelatedState) -> AnyView {
    match state {
        RelatedState::Loading => view! {
            <div class="related related--loading">"Loading related data..."</div>
        }
        .into_any(),
        RelatedState::Failed(message) => view! {
            <div class="related related--error">{format!("Could not load related data: {}", message)}</div>
        }
        .into_any(),
        RelatedState::Loaded(rows) if rows.is_empty() => view! {
            <div class="related related--empty">"No related data found"</div>
        }
        .into_any(),
        RelatedState::Loaded(rows) => {
            let groups = group_related(&rows)
                .into_iter()
                .map(|(kind, values)| {
                    view! {
                        <div class="related__group">
                            <h4 class="related__title">{group_title(&kind)}</h4>
                            <ul class="related__list">
                                {values.into_iter().map(|v| view! { <li>{v}</li> }).collect_view()}
                            </ul>
                        </div>
                    }
                })
                .collect_view();
            view! { <div class="related">{groups}</div> }.into_any()
        }
    }
}

/// Drawer under an expanded organization row.
pub fn related_drawer() -> ExpandedRenderer<RdapHandlers> {
    Arc::new(|record: &Record, handlers: &RdapHandlers| {
        let id = record.id()?;
        let state = handlers.expanded.with(|e| e.state(&id).cloned())?;
        Some(drawer(state))
    })
}
