pub mod columns;
pub mod dialogs;

use self::columns::{apex_columns, program_columns, ApexHandlers, ProgramHandlers};
use self::dialogs::{ConfirmDeleteDialog, ImportCsvDialog, ProgramDialog};
use crate::domain::a001_program::api::{self, ApexDomainEndpoints, ProgramEndpoints};
use crate::shared::clipboard::copy_to_clipboard;
use crate::shared::data_table::DataTable;
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use crate::shared::notifications::use_toasts;
use crate::shared::optimistic::{Counters, MutationError, OptimisticController, RecordEndpoints};
use crate::shared::page_frame::PageFrame;
use crate::shared::pagination::{publish_pagination, use_pagination, PaginationDescriptor};
use crate::shared::per_page::use_global_per_page;
use crate::shared::table_data::{use_table_data, TableData, TableQuery};
use contracts::domain::a001_program::aggregate::{ProgramCsvRow, ProgramDto};
use contracts::shared::{Record, RecordId};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramsTab {
    Programs,
    ApexDomains,
}

/// Page, search and refresh of one tab.
#[derive(Clone, Copy)]
struct TabQuery {
    page: RwSignal<usize>,
    search: RwSignal<String>,
    refresh: RwSignal<u64>,
}

impl TabQuery {
    fn new() -> Self {
        Self {
            page: RwSignal::new(1),
            search: RwSignal::new(String::new()),
            refresh: RwSignal::new(0),
        }
    }

    fn signal(self, per_page: Signal<usize>) -> Signal<TableQuery> {
        Signal::derive(move || TableQuery {
            page: self.page.get(),
            per_page: per_page.get(),
            search: self.search.get(),
            refresh: self.refresh.get(),
        })
    }

    fn search_changed(self, value: String) {
        self.search.set(value);
        self.page.set(1);
    }

    fn reload(self) {
        self.refresh.update(|r| *r += 1);
    }
}

fn descriptor(
    table: TableData,
    query: TabQuery,
    per_page: usize,
    set_per_page: Callback<usize>,
) -> PaginationDescriptor {
    PaginationDescriptor::new(
        table.current_page.get(),
        table.total_pages.get(),
        table.total_items.get(),
        per_page,
    )
    .with_handlers(
        move |p| query.page.set(p),
        move |n| {
            set_per_page.run(n);
            query.page.set(1);
        },
    )
}

/// Controller over one tab's rows. После подтверждения сервером вкладка перечитывает текущую страницу.
fn tab_controller<E: RecordEndpoints>(table: TableData, query: TabQuery, endpoints: E) -> OptimisticController<E> {
    OptimisticController::new(table.records, RwSignal::new(Counters::default()), endpoints)
        .on_settled(move || query.reload())
}

#[component]
pub fn ProgramsList() -> impl IntoView {
    let toasts = use_toasts();
    let pagination = use_pagination();
    let (per_page, set_per_page) = use_global_per_page();
    let tab = RwSignal::new(ProgramsTab::Programs);

    let programs_query = TabQuery::new();
    let apex_query = TabQuery::new();
    let programs = use_table_data(api::fetch_page, programs_query.signal(per_page));
    let apex = use_table_data(api::fetch_apex_page, apex_query.signal(per_page));

    Effect::new(move |_| {
        if let Some(e) = programs.last_error.get() {
            toasts.error(format!("Error loading programs: {}", e));
        }
    });
    Effect::new(move |_| {
        if let Some(e) = apex.last_error.get() {
            toasts.error(format!("Error loading apex domains: {}", e));
        }
    });

    // Одна панель пагинации на странице: публикуем активную вкладку
    publish_pagination(pagination, move || match tab.get() {
        ProgramsTab::Programs => descriptor(programs, programs_query, per_page.get(), set_per_page),
        ProgramsTab::ApexDomains => descriptor(apex, apex_query, per_page.get(), set_per_page),
    });

    let report = move |e: &MutationError| toasts.error(format!("Error: {}", e));
    let program_ctl = StoredValue::new(tab_controller(programs, programs_query, ProgramEndpoints).on_error(report));
    let apex_ctl = StoredValue::new(tab_controller(apex, apex_query, ApexDomainEndpoints).on_error(report));

    // Диалоги
    let editing = RwSignal::new(None::<ProgramDto>);
    let deleting = RwSignal::new(None::<Record>);
    let deleting_apex = RwSignal::new(None::<Record>);
    let show_import = RwSignal::new(false);
    let importing = RwSignal::new(false);

    let on_save = Callback::new(move |dto: ProgramDto| {
        if dto.program.trim().is_empty() {
            toasts.error("Program name is required");
            return;
        }
        let ctl = program_ctl.get_value();
        let record = dto.to_record();
        spawn_local(async move {
            let saved = match dto.id.as_deref() {
                Some(id) => ctl.edit(&RecordId::from(id), &record).await.map(|_| "Program updated successfully"),
                None => ctl.add(record, None).await.map(|_| "Program added successfully"),
            };
            if let Ok(message) = saved {
                toasts.success(message);
                editing.set(None);
            }
        });
    });

    let on_delete = Callback::new(move |_: ()| {
        let Some(id) = deleting.with_untracked(|r| r.as_ref().and_then(Record::id)) else {
            return;
        };
        let ctl = program_ctl.get_value();
        spawn_local(async move {
            if ctl.delete(&id, None).await.is_ok() {
                toasts.success("Program deleted successfully");
                deleting.set(None);
            }
        });
    });

    let on_delete_apex = Callback::new(move |_: ()| {
        let Some(id) = deleting_apex.with_untracked(|r| r.as_ref().and_then(Record::id)) else {
            return;
        };
        let ctl = apex_ctl.get_value();
        spawn_local(async move {
            if ctl.delete(&id, None).await.is_ok() {
                toasts.success("Apex domain deleted successfully");
                deleting_apex.set(None);
            }
        });
    });

    let on_import = Callback::new(move |rows: Vec<ProgramCsvRow>| {
        importing.set(true);
        spawn_local(async move {
            match api::import_csv(rows).await {
                Ok(_) => {
                    toasts.success("CSV import successful");
                    show_import.set(false);
                    programs_query.reload();
                    apex_query.reload();
                }
                Err(e) => toasts.error(format!("CSV import error: {}", e)),
            }
            importing.set(false);
        });
    });

    let program_handlers = ProgramHandlers {
        on_edit: Callback::new(move |record: Record| editing.set(Some(ProgramDto::from_record(&record)))),
        on_delete: Callback::new(move |record: Record| deleting.set(Some(record))),
    };
    let apex_handlers = ApexHandlers {
        on_delete: Callback::new(move |record: Record| deleting_apex.set(Some(record))),
        on_copy: Callback::new(move |text: String| {
            copy_to_clipboard(&text, move |ok| {
                if ok {
                    toasts.success("Copied to clipboard");
                }
            });
        }),
    };

    let tab_button = move |target: ProgramsTab, label: &'static str| {
        view! {
            <button
                class="tabs__item"
                class:tabs__item--active=move || tab.get() == target
                on:click=move |_| tab.set(target)
            >
                {label}
            </button>
        }
    };

    view! {
        <PageFrame page_id="a001_program--list" title="Programs">
            <div class="tabs">
                {tab_button(ProgramsTab::Programs, "Programs")}
                {tab_button(ProgramsTab::ApexDomains, "Apex Domains")}
            </div>

            <Show when=move || tab.get() == ProgramsTab::Programs>
                <div class="page-search">
                    <SearchInput
                        value=programs_query.search
                        on_change=Callback::new(move |v: String| programs_query.search_changed(v))
                        placeholder="Search programs..."
                    />
                    <button class="button button--secondary" on:click=move |_| show_import.set(true)>
                        {icon("upload")}
                        "Import CSV"
                    </button>
                    <button class="button button--primary" on:click=move |_| editing.set(Some(ProgramDto::default()))>
                        {icon("plus")}
                        "Add Program"
                    </button>
                </div>
                <DataTable
                    columns=program_columns()
                    data=programs.records
                    loading=programs.loading
                    handlers=program_handlers
                    current_page=programs.current_page
                    total_pages=programs.total_pages
                    total_items=programs.total_items
                    per_page=per_page
                    no_data_text="No programs found"
                    loading_text="Loading programs..."
                />
            </Show>

            <Show when=move || tab.get() == ProgramsTab::ApexDomains>
                <div class="page-search">
                    <SearchInput
                        value=apex_query.search
                        on_change=Callback::new(move |v: String| apex_query.search_changed(v))
                        placeholder="Search apex domains..."
                    />
                </div>
                <DataTable
                    columns=apex_columns()
                    data=apex.records
                    loading=apex.loading
                    handlers=apex_handlers
                    current_page=apex.current_page
                    total_pages=apex.total_pages
                    total_items=apex.total_items
                    per_page=per_page
                    no_data_text="No apex domains found"
                    loading_text="Loading apex domains..."
                />
            </Show>

            {move || editing.get().map(|dto| view! {
                <ProgramDialog
                    initial=dto
                    on_submit=on_save
                    on_close=Callback::new(move |_| editing.set(None))
                />
            })}

            {move || deleting.get().map(|record| view! {
                <ConfirmDeleteDialog
                    what="program"
                    record=record
                    label_field="program"
                    on_confirm=on_delete
                    on_close=Callback::new(move |_| deleting.set(None))
                />
            })}

            {move || deleting_apex.get().map(|record| view! {
                <ConfirmDeleteDialog
                    what="apex domain"
                    record=record
                    label_field="apex_domain"
                    on_confirm=on_delete_apex
                    on_close=Callback::new(move |_| deleting_apex.set(None))
                />
            })}

            <Show when=move || show_import.get()>
                <ImportCsvDialog
                    on_import=on_import
                    importing=importing
                    on_close=Callback::new(move |_| show_import.set(false))
                />
            </Show>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::http::FetchError;
    use contracts::shared::MutationResponse;
    use futures::executor::block_on;
    use serde_json::json;

    struct AcceptAll;

    impl RecordEndpoints for AcceptAll {
        async fn create(&self, _draft: &Record) -> Result<MutationResponse, FetchError> {
            Ok(MutationResponse::from_json(json!({"success": true, "id": 99})))
        }

        async fn update(&self, _id: &RecordId, _record: &Record) -> Result<MutationResponse, FetchError> {
            Ok(MutationResponse::from_json(json!({"success": true})))
        }

        async fn delete(&self, _id: &RecordId, _record: &Record) -> Result<MutationResponse, FetchError> {
            Ok(MutationResponse::from_json(json!({"success": true})))
        }
    }

    struct RejectAll;

    impl RecordEndpoints for RejectAll {
        async fn create(&self, _draft: &Record) -> Result<MutationResponse, FetchError> {
            Ok(MutationResponse::from_json(json!({"success": false})))
        }

        async fn update(&self, _id: &RecordId, _record: &Record) -> Result<MutationResponse, FetchError> {
            Ok(MutationResponse::from_json(json!({"success": false})))
        }

        async fn delete(&self, _id: &RecordId, _record: &Record) -> Result<MutationResponse, FetchError> {
            Ok(MutationResponse::from_json(json!({"success": false})))
        }
    }

    fn rows() -> Vec<Record> {
        vec![
            Record::from_value(json!({"id": 1, "program": "Acme"})).unwrap(),
            Record::from_value(json!({"id": 2, "program": "Globex"})).unwrap(),
        ]
    }

    #[test]
    fn test_settled_mutations_reload_tab() {
        let table = TableData::new();
        table.records.set(rows());
        let query = TabQuery::new();
        query.page.set(2);
        let current = query.signal(Signal::derive(|| 10));
        let before = current.get_untracked();

        let ctl = tab_controller(table, query, AcceptAll);
        block_on(ctl.delete(&RecordId::from(1), None)).unwrap();
        let after_delete = current.get_untracked();
        assert_eq!(after_delete.refresh, before.refresh + 1);
        assert_eq!(after_delete.page, 2);
        assert_eq!(after_delete.search, before.search);

        block_on(ctl.add(Record::from_value(json!({"program": "Initech"})).unwrap(), None)).unwrap();
        block_on(ctl.edit(&RecordId::from(2), &Record::from_value(json!({"program": "G"})).unwrap())).unwrap();
        assert_eq!(current.get_untracked().refresh, before.refresh + 3);
    }

    #[test]
    fn test_failed_mutation_does_not_reload() {
        let table = TableData::new();
        table.records.set(rows());
        let query = TabQuery::new();
        let current = query.signal(Signal::derive(|| 10));

        let ctl = tab_controller(table, query, RejectAll);
        assert!(block_on(ctl.delete(&RecordId::from(1), None)).is_err());

        assert_eq!(current.get_untracked().refresh, 0);
        assert_eq!(table.records.get_untracked(), rows());
    }

    #[test]
    fn test_search_resets_page() {
        let query = TabQuery::new();
        query.page.set(3);
        query.search_changed("acme".into());
        let current = query.signal(Signal::derive(|| 25)).get_untracked();
        assert_eq!((current.page, current.search.as_str(), current.per_page), (1, "acme", 25));
    }
}
