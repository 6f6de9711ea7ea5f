use super::cells::display_value;
use super::column::{CellContext, ColumnSpec, ExpandedRenderer};
use super::sort::{sort_records, SortState};
use super::{body_state, range_caption, BodyState};
use crate::shared::list_utils::{get_sort_class, get_sort_indicator};
use contracts::shared::Record;
use leptos::prelude::*;
use std::sync::Arc;
use thaw::*;

fn message_row(colspan: usize, text: String, class: &'static str) -> AnyView {
    view! {
        <TableRow>
            <TableCell attr:colspan=colspan.to_string()>
                <TableCellLayout>
                    <span class=class>{text}</span>
                </TableCellLayout>
            </TableCell>
        </TableRow>
    }
    .into_any()
}

fn render_row<H>(
    record: Record,
    columns: &[ColumnSpec<H>],
    handlers: &H,
    expanded: Option<&ExpandedRenderer<H>>,
) -> AnyView {
    let cells = columns
        .iter()
        .map(|col| {
            let value = record.get(&col.accessor);
            let content = match &col.render {
                Some(render) => render(CellContext {
                    value,
                    record: &record,
                    handlers,
                }),
                None => display_value(value).into_any(),
            };
            view! {
                <TableCell>
                    <TableCellLayout>{content}</TableCellLayout>
                </TableCell>
            }
        })
        .collect_view();

    let colspan = columns.len().to_string();
    let drawer = expanded
        .and_then(|render| render(&record, handlers))
        .map(|content| {
            view! {
                <TableRow attr:class="expanded-row">
                    <TableCell attr:colspan=colspan>
                        <div class="expanded-content">{content}</div>
                    </TableCell>
                </TableRow>
            }
        });

    view! {
        <TableRow>{cells}</TableRow>
        {drawer}
    }
    .into_any()
}

/// Generic table over JSON records.
///
/// Clicking a sortable header cycles ascending/descending on the loaded rows.
/// Pagination props are display-only; page changes go through the shared
/// pagination bar.
#[component]
pub fn DataTable<H>(
    columns: Vec<ColumnSpec<H>>,
    #[prop(into)] data: Signal<Vec<Record>>,
    #[prop(into)] loading: Signal<bool>,
    /// Page-supplied bundle passed through to every cell renderer
    handlers: H,
    #[prop(optional, into)] current_page: MaybeProp<usize>,
    #[prop(optional, into)] total_pages: MaybeProp<usize>,
    #[prop(optional, into)] total_items: MaybeProp<usize>,
    #[prop(optional, into)] per_page: MaybeProp<usize>,
    #[prop(into, default = "No data available".to_string())] no_data_text: String,
    #[prop(into, default = "Loading...".to_string())] loading_text: String,
    #[prop(optional)] expanded: Option<ExpandedRenderer<H>>,
) -> impl IntoView
where
    H: Send + Sync + 'static,
{
    let sort = RwSignal::new(SortState::default());
    let columns = Arc::new(columns);
    let handlers = Arc::new(handlers);

    let header_cells = columns
        .iter()
        .map(|col| {
            let header = col.header.clone();
            let style = col.header_style();
            if !col.sortable {
                return view! {
                    <TableHeaderCell attr:style=style>{header}</TableHeaderCell>
                }
                .into_any();
            }

            let for_aria = col.accessor.clone();
            let for_click = col.accessor.clone();
            let for_class = col.accessor.clone();
            let for_indicator = col.accessor.clone();
            view! {
                <TableHeaderCell
                    attr:style=style
                    attr:aria-sort=move || sort.with(|s| s.aria_sort(&for_aria))
                >
                    <div
                        class="table__sortable-header"
                        style="cursor: pointer;"
                        on:click=move |_| sort.update(|s| s.toggle(&for_click))
                    >
                        {header}
                        <span class=move || {
                            sort.with(|s| get_sort_class(s.column.as_deref().unwrap_or(""), &for_class))
                        }>
                            {move || {
                                sort.with(|s| {
                                    get_sort_indicator(
                                        s.column.as_deref().unwrap_or(""),
                                        &for_indicator,
                                        s.direction == super::SortDirection::Ascending,
                                    )
                                })
                            }}
                        </span>
                    </div>
                </TableHeaderCell>
            }
            .into_any()
        })
        .collect_view();

    let body_columns = columns.clone();
    let body_handlers = handlers.clone();
    let body = move || {
        let records = sort.with(|state| data.with(|rows| sort_records(rows, state)));
        let colspan = body_columns.len();
        match body_state(loading.get(), records.len()) {
            BodyState::Loading => message_row(colspan, loading_text.clone(), "table__loading"),
            BodyState::Empty => message_row(colspan, no_data_text.clone(), "text-muted"),
            BodyState::Rows => records
                .into_iter()
                .map(|record| {
                    render_row(record, &body_columns, &body_handlers, expanded.as_ref())
                })
                .collect_view()
                .into_any(),
        }
    };

    let caption = move || {
        let rows = data.with(|rows| rows.len());
        range_caption(
            current_page.get().unwrap_or(1),
            per_page.get().unwrap_or(rows),
            total_items.get().unwrap_or(rows),
            rows,
        )
        .map(|text| {
            let pages = total_pages.get().unwrap_or(1);
            view! {
                <div class="table__caption" title=format!("{} pages", pages)>{text}</div>
            }
        })
    };

    view! {
        <div class="table-wrapper">
            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>{header_cells}</TableRow>
                </TableHeader>
                <TableBody>{body}</TableBody>
            </Table>
            {caption}
        </div>
    }
}
