pub mod columns;
pub mod dialogs;
pub mod model;

use self::columns::{rdap_columns, related_drawer, RdapHandlers};
use self::dialogs::{AddRdapDialog, DeleteRdapDialog, EditRdapDialog};
use self::model::{ExpandedRows, RelatedState};
use crate::domain::a001_program::api::fetch_program_options;
use crate::domain::a002_rdap::api::{self, RdapEndpoints};
use crate::shared::clipboard::copy_to_clipboard;
use crate::shared::components::metric_card::MetricCard;
use crate::shared::data_table::DataTable;
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use crate::shared::notifications::use_toasts;
use crate::shared::optimistic::{Counters, OptimisticController};
use crate::shared::page_frame::PageFrame;
use crate::shared::pagination::{publish_pagination, use_pagination, PaginationDescriptor};
use crate::shared::per_page::use_global_per_page;
use crate::shared::table_data::{use_table_data, TableQuery};
use contracts::domain::a002_rdap::aggregate::{RdapItemDraft, RdapKind};
use contracts::shared::{Record, RecordId};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn RdapList() -> impl IntoView {
    let toasts = use_toasts();
    let pagination = use_pagination();
    let (per_page, set_per_page) = use_global_per_page();

    let page = RwSignal::new(1usize);
    let search = RwSignal::new(String::new());
    let refresh = RwSignal::new(0u64);
    let query = Signal::derive(move || TableQuery {
        page: page.get(),
        per_page: per_page.get(),
        search: search.get(),
        refresh: refresh.get(),
    });
    let table = use_table_data(api::fetch_page, query);

    Effect::new(move |_| {
        if let Some(e) = table.last_error.get() {
            toasts.error(format!("Error loading RDAP data: {}", e));
        }
    });

    publish_pagination(pagination, move || {
        PaginationDescriptor::new(
            table.current_page.get(),
            table.total_pages.get(),
            table.total_items.get(),
            per_page.get(),
        )
        .with_handlers(
            move |p| page.set(p),
            move |n| {
                set_per_page.run(n);
                page.set(1);
            },
        )
    });

    // Метрики: загружаются при открытии и после каждой успешной мутации (вместе со страницей)
    let counters = RwSignal::new(Counters::default());
    let metrics_loaded = RwSignal::new(false);
    let load_metrics = move || {
        spawn_local(async move {
            match api::fetch_metrics().await {
                Ok(map) => {
                    counters.set(Counters::from_map(map));
                    metrics_loaded.set(true);
                }
                Err(e) => log::warn!("RDAP metrics unavailable: {}", e),
            }
        });
    };
    load_metrics();

    let controller = StoredValue::new(
        OptimisticController::new(table.records, counters, RdapEndpoints)
            .on_error(move |e| toasts.error(format!("Error: {}", e)))
            .on_settled(move || {
                load_metrics();
                refresh.update(|r| *r += 1);
            }),
    );

    // Раскрытые строки организаций
    let expanded = RwSignal::new(ExpandedRows::default());
    let on_toggle = Callback::new(move |record: Record| {
        let Some(id) = record.id() else { return };
        let opening = expanded.try_update(|e| e.toggle(&id)).unwrap_or(false);
        if !opening {
            return;
        }
        let program_id = record
            .get("fk_programs_id")
            .and_then(RecordId::from_value)
            .map(|p| p.to_string());
        spawn_local(async move {
            let state = match api::fetch_related(&id, program_id).await {
                Ok(rows) => RelatedState::Loaded(rows),
                Err(e) => {
                    toasts.error(format!("Error fetching related items: {}", e));
                    RelatedState::Failed(e.to_string())
                }
            };
            expanded.update(|e| e.resolve(&id, state));
        });
    });

    // Диалоги
    let show_add = RwSignal::new(false);
    let editing = RwSignal::new(None::<Record>);
    let deleting = RwSignal::new(None::<Record>);
    let programs = RwSignal::new(Vec::<Record>::new());
    let organizations = RwSignal::new(Vec::<Record>::new());

    let open_add = move |_| {
        show_add.set(true);
        spawn_local(async move {
            match fetch_program_options().await {
                Ok(list) => programs.set(list),
                Err(_) => toasts.error("Failed to load programs"),
            }
        });
        spawn_local(async move {
            match api::fetch_organizations().await {
                Ok(list) => organizations.set(list),
                Err(_) => toasts.error("Failed to load organizations"),
            }
        });
    };

    let program_name = move |program_id: &str| {
        programs.with_untracked(|list| {
            list.iter()
                .find(|p| p.id().is_some_and(|id| id.as_str() == program_id))
                .and_then(|p| p.get_str("program").map(String::from))
        })
    };

    let on_add = Callback::new(move |draft: RdapItemDraft| {
        let kind = match draft.validate() {
            Ok(kind) => kind,
            Err(message) => {
                toasts.error(message);
                return;
            }
        };
        let mut record = draft.to_record();
        if let Some(name) = program_name(&draft.fk_programs_id) {
            record.insert("program_name", name);
        }
        let ctl = controller.get_value();
        spawn_local(async move {
            if ctl.add(record, Some(kind.as_str())).await.is_ok() {
                toasts.success("RDAP item added successfully");
                show_add.set(false);
            }
        });
    });

    let on_edit = Callback::new(move |value: String| {
        let Some(id) = editing.with_untracked(|r| r.as_ref().and_then(Record::id)) else {
            return;
        };
        let mut patch = Record::new();
        patch.insert("value", value.trim().to_string());
        let ctl = controller.get_value();
        spawn_local(async move {
            if ctl.edit(&id, &patch).await.is_ok() {
                toasts.success("RDAP item updated successfully");
                editing.set(None);
            }
        });
    });

    let on_delete = Callback::new(move |_: ()| {
        let Some(record) = deleting.get_untracked() else { return };
        let Some(id) = record.id() else { return };
        let counter_key = record.get_str("type").map(String::from);
        let ctl = controller.get_value();
        spawn_local(async move {
            if ctl.delete(&id, counter_key.as_deref()).await.is_ok() {
                toasts.success("RDAP item deleted successfully");
                deleting.set(None);
            }
        });
    });

    let handlers = RdapHandlers {
        expanded,
        on_toggle,
        on_edit: Callback::new(move |record: Record| editing.set(Some(record))),
        on_delete: Callback::new(move |record: Record| deleting.set(Some(record))),
        on_copy: Callback::new(move |text: String| {
            copy_to_clipboard(&text, move |ok| {
                if ok {
                    toasts.success("Copied to clipboard");
                }
            });
        }),
    };

    let metric = move |kind: RdapKind| {
        Signal::derive(move || metrics_loaded.get().then(|| counters.with(|c| c.get(kind.as_str()))))
    };

    view! {
        <PageFrame page_id="a002_rdap--list" title="RDAP Management">
            <div class="metrics-row">
                {RdapKind::SELECTABLE
                    .iter()
                    .map(|kind| view! {
                        <MetricCard title=kind.metric_title() icon_name=metric_icon(*kind) value=metric(*kind) />
                    })
                    .collect_view()}
            </div>

            <div class="page-search">
                <SearchInput
                    value=search
                    on_change=Callback::new(move |v: String| {
                        search.set(v);
                        page.set(1);
                    })
                    placeholder="Search RDAP data..."
                />
                <button class="button button--secondary" on:click=move |_| refresh.update(|r| *r += 1)>
                    {icon("refresh")}
                    "Refresh"
                </button>
                <button class="button button--primary" on:click=open_add>
                    {icon("plus")}
                    "Add RDAP"
                </button>
            </div>

            <DataTable
                columns=rdap_columns()
                data=table.records
                loading=table.loading
                handlers=handlers
                current_page=table.current_page
                total_pages=table.total_pages
                total_items=table.total_items
                per_page=per_page
                no_data_text="No RDAP data available"
                loading_text="Loading RDAP data..."
                expanded=related_drawer()
            />

            <Show when=move || show_add.get()>
                <AddRdapDialog
                    programs=programs
                    organizations=organizations
                    on_submit=on_add
                    on_close=Callback::new(move |_| show_add.set(false))
                />
            </Show>

            {move || editing.get().map(|record| view! {
                <EditRdapDialog
                    record=record
                    on_submit=on_edit
                    on_close=Callback::new(move |_| editing.set(None))
                />
            })}

            {move || deleting.get().map(|record| view! {
                <DeleteRdapDialog
                    record=record
                    on_confirm=on_delete
                    on_close=Callback::new(move |_| deleting.set(None))
                />
            })}
        </PageFrame>
    }
}

fn metric_icon(kind: RdapKind) -> &'static str {
    match kind {
        RdapKind::Orgs | RdapKind::Groups => "users",
        RdapKind::Names => "target",
        RdapKind::Emails => "mail",
        RdapKind::Addresses => "map-pin",
        RdapKind::Nameservers => "server",
        RdapKind::Phones => "phone",
    }
}
