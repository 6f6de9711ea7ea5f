use crate::shared::data_table::cells::{display_value, status_badge, truncated};
use crate::shared::data_table::{CellContext, ColumnSpec};
use crate::shared::icons::icon;
use contracts::shared::Record;
use leptos::prelude::*;

/// Callbacks of the programs tab.
#[derive(Clone, Copy)]
pub struct ProgramHandlers {
    pub on_edit: Callback<Record>,
    pub on_delete: Callback<Record>,
}

/// Callbacks of the apex domains tab.
#[derive(Clone, Copy)]
pub struct ApexHandlers {
    pub on_delete: Callback<Record>,
    pub on_copy: Callback<String>,
}

fn program_cell(ctx: CellContext<'_, ProgramHandlers>) -> AnyView {
    let name = display_value(ctx.value);
    let platform = ctx
        .record
        .get_str("platform_name")
        .filter(|p| !p.is_empty())
        .unwrap_or("manual")
        .to_string();
    view! {
        <div class="program-cell">
            <span class="program-cell__name">{name}</span>
            <span class="program-cell__platform">{platform}</span>
        </div>
    }
    .into_any()
}

fn active_cell<H>(ctx: CellContext<'_, H>) -> AnyView {
    status_badge(ctx.record.get_flag("is_active"))
}

fn domains_cell(ctx: CellContext<'_, ProgramHandlers>) -> AnyView {
    ctx.record.get_i64("domains").unwrap_or(0).to_string().into_any()
}

fn program_actions(ctx: CellContext<'_, ProgramHandlers>) -> AnyView {
    let on_edit = ctx.handlers.on_edit;
    let on_delete = ctx.handlers.on_delete;
    let for_edit = ctx.record.clone();
    let for_delete = ctx.record.clone();
    view! {
        <div class="actions-cell">
            <button class="button button--icon" title="Edit program" on:click=move |_| on_edit.run(for_edit.clone())>
                {icon("edit")}
            </button>
            <button class="button button--icon button--danger" title="Delete program" on:click=move |_| on_delete.run(for_delete.clone())>
                {icon("trash")}
            </button>
        </div>
    }
    .into_any()
}

pub fn program_columns() -> Vec<ColumnSpec<ProgramHandlers>> {
    vec![
        ColumnSpec::new("Program", "program").render(program_cell),
        ColumnSpec::new("Status", "is_active").width("120px").render(active_cell),
        ColumnSpec::new("Domains", "domains").width("100px").render(domains_cell),
        ColumnSpec::new("Actions", "actions").width("100px").unsortable().render(program_actions),
    ]
}

fn copy_cell(ctx: CellContext<'_, ApexHandlers>, title: &'static str) -> AnyView {
    let value = display_value(ctx.value);
    let on_copy = ctx.handlers.on_copy;
    let copied = value.clone();
    view! {
        <div class="copy-cell">
            <span>{value}</span>
            <button class="button button--icon copy-btn" title=title on:click=move |_| on_copy.run(copied.clone())>
                {icon("copy")}
            </button>
        </div>
    }
    .into_any()
}

fn apex_actions(ctx: CellContext<'_, ApexHandlers>) -> AnyView {
    let on_delete = ctx.handlers.on_delete;
    let record = ctx.record.clone();
    view! {
        <div class="actions-cell">
            <button class="button button--icon button--danger" title="Delete apex domain" on:click=move |_| on_delete.run(record.clone())>
                {icon("trash")}
            </button>
        </div>
    }
    .into_any()
}

pub fn apex_columns() -> Vec<ColumnSpec<ApexHandlers>> {
    vec![
        ColumnSpec::new("Program", "program_name").render(|ctx| truncated(ctx, 40)),
        ColumnSpec::new("ID", "id").width("120px").render(|ctx| copy_cell(ctx, "Copy domain id")),
        ColumnSpec::new("Apex Domain", "apex_domain").render(|ctx| copy_cell(ctx, "Copy apex domain")),
        ColumnSpec::new("Status", "is_active").width("120px").render(active_cell),
        ColumnSpec::new("Actions", "apex_actions").width("80px").unsortable().render(apex_actions),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_columns_layout() {
        let columns = program_columns();
        let accessors: Vec<_> = columns.iter().map(|c| c.accessor.as_str()).collect();
        assert_eq!(accessors, ["program", "is_active", "domains", "actions"]);
        assert!(!columns[3].sortable);
    }

    #[test]
    fn test_apex_columns_layout() {
        let columns = apex_columns();
        assert_eq!(columns.len(), 5);
        assert_eq!(columns[2].header, "Apex Domain");
        assert!(columns.iter().all(|c| c.render.is_some()));
    }
}
