//! Server-paginated list loading.
//!
//! [`TableDataController`] is the bookkeeping (which request is current, what
//! the last response said); [`use_table_data`] wires it to signals and
//! re-fetches whenever the query changes.

use crate::shared::http::FetchError;
use contracts::shared::{ListQuery, PaginationMeta, Record};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;

/// Inputs of a list request. `refresh` carries no meaning beyond forcing a
/// re-fetch with otherwise unchanged parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    /// 1-based
    pub page: usize,
    pub per_page: usize,
    pub search: String,
    pub refresh: u64,
}

impl TableQuery {
    pub fn new(page: usize, per_page: usize, search: impl Into<String>) -> Self {
        Self {
            page,
            per_page,
            search: search.into(),
            refresh: 0,
        }
    }

    pub fn to_list_query(&self) -> ListQuery {
        ListQuery::new(self.page, self.per_page, &self.search)
    }
}

/// Normalized list response.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPayload {
    pub records: Vec<Record>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl Default for ListPayload {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            current_page: 1,
            total_pages: 1,
            total_items: 0,
        }
    }
}

impl ListPayload {
    /// Reads `{data: [...], pagination: {...}}`. Anything else degrades to an
    /// empty first page instead of an error.
    pub fn from_json(value: Value) -> Self {
        let Value::Object(mut body) = value else {
            return Self::default();
        };

        let records = match body.remove("data") {
            Some(Value::Array(items)) => items.into_iter().filter_map(Record::from_value).collect(),
            _ => Vec::new(),
        };
        let meta: PaginationMeta = body
            .remove("pagination")
            .and_then(|p| serde_json::from_value(p).ok())
            .unwrap_or_default();

        Self {
            records,
            current_page: meta.current_page.map_or(1, |p| clamp_count(p.max(1))),
            total_pages: meta.total_pages.map_or(1, |p| clamp_count(p.max(1))),
            total_items: meta.total.map_or(0, clamp_count),
        }
    }
}

/// `u64` from the wire into `usize`; saturates on 32-bit targets.
fn clamp_count(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    pub id: u64,
    pub query: TableQuery,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Committed(ListPayload),
    Failed(FetchError),
    /// A newer request was issued meanwhile; the response is dropped.
    Stale,
}

#[derive(Debug, Default)]
pub struct TableDataController {
    last_query: Option<TableQuery>,
    latest_id: u64,
    loading: bool,
}

impl TableDataController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Issues a ticket when `query` differs from the last one requested.
    pub fn request(&mut self, query: TableQuery) -> Option<RequestTicket> {
        if self.last_query.as_ref() == Some(&query) {
            return None;
        }
        self.latest_id += 1;
        self.loading = true;
        self.last_query = Some(query.clone());
        Some(RequestTicket {
            id: self.latest_id,
            query,
        })
    }

    pub fn resolve(
        &mut self,
        ticket: &RequestTicket,
        result: Result<Value, FetchError>,
    ) -> Resolution {
        if ticket.id != self.latest_id {
            return Resolution::Stale;
        }
        self.loading = false;
        match result {
            Ok(body) => Resolution::Committed(ListPayload::from_json(body)),
            Err(e) => Resolution::Failed(e),
        }
    }
}

/// Reactive view of one server-paginated list.
///
/// `records` is the in-memory list; optimistic mutations edit it directly.
#[derive(Clone, Copy)]
pub struct TableData {
    pub records: RwSignal<Vec<Record>>,
    pub loading: RwSignal<bool>,
    pub current_page: RwSignal<usize>,
    pub total_pages: RwSignal<usize>,
    pub total_items: RwSignal<usize>,
    pub last_error: RwSignal<Option<FetchError>>,
}

impl TableData {
    pub fn new() -> Self {
        Self {
            records: RwSignal::new(Vec::new()),
            loading: RwSignal::new(false),
            current_page: RwSignal::new(1),
            total_pages: RwSignal::new(1),
            total_items: RwSignal::new(0),
            last_error: RwSignal::new(None),
        }
    }

    /// Writes a resolution into the signals. Stale results are ignored.
    pub fn apply(&self, resolution: Resolution) {
        match resolution {
            Resolution::Committed(payload) => {
                self.records.set(payload.records);
                self.current_page.set(payload.current_page);
                self.total_pages.set(payload.total_pages);
                self.total_items.set(payload.total_items);
                self.last_error.set(None);
                self.loading.set(false);
            }
            Resolution::Failed(e) => {
                let empty = ListPayload::default();
                self.records.set(empty.records);
                self.current_page.set(empty.current_page);
                self.total_pages.set(empty.total_pages);
                self.total_items.set(empty.total_items);
                self.last_error.set(Some(e));
                self.loading.set(false);
            }
            Resolution::Stale => {}
        }
    }
}

impl Default for TableData {
    fn default() -> Self {
        Self::new()
    }
}

/// Loads the list described by `query` and reloads it whenever `query` changes.
pub fn use_table_data<F, Fut>(fetch: F, query: Signal<TableQuery>) -> TableData
where
    F: Fn(TableQuery) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, FetchError>> + 'static,
{
    let data = TableData::new();
    let controller = StoredValue::new(TableDataController::new());
    let fetch = Arc::new(fetch);

    Effect::new(move |_| {
        let q = query.get();
        let Some(ticket) = controller.try_update_value(|c| c.request(q)).flatten() else {
            return;
        };
        data.loading.set(true);
        let pending = fetch(ticket.query.clone());
        spawn_local(async move {
            let result = pending.await;
            let resolution = controller
                .try_update_value(|c| c.resolve(&ticket, result))
                .unwrap_or(Resolution::Stale);
            if resolution == Resolution::Stale {
                log::debug!("dropping stale list response #{}", ticket.id);
            }
            data.apply(resolution);
        });
    });

    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_reads_envelope() {
        let payload = ListPayload::from_json(json!({
            "success": true,
            "data": [{"id": 1}, {"id": 2}],
            "pagination": {"current_page": 2, "total_pages": 5, "total": 47, "per_page": 10}
        }));
        assert_eq!(payload.records.len(), 2);
        assert_eq!(
            (payload.current_page, payload.total_pages, payload.total_items),
            (2, 5, 47)
        );
    }

    #[test]
    fn test_payload_tolerates_unexpected_shapes() {
        assert_eq!(ListPayload::from_json(json!([{"id": 1}])), ListPayload::default());
        assert_eq!(ListPayload::from_json(json!("oops")), ListPayload::default());

        let payload = ListPayload::from_json(json!({"data": "nope"}));
        assert!(payload.records.is_empty());
        assert_eq!((payload.current_page, payload.total_pages, payload.total_items), (1, 1, 0));

        let payload = ListPayload::from_json(json!({
            "data": [], "pagination": {"total_pages": 0, "total": 0}
        }));
        assert_eq!(payload.total_pages, 1);
    }

    #[test]
    fn test_payload_saturates_huge_counts() {
        assert_eq!(clamp_count(7), 7);
        let payload = ListPayload::from_json(json!({
            "data": [], "pagination": {"current_page": u64::MAX, "total_pages": u64::MAX, "total": u64::MAX}
        }));
        assert_eq!(payload.total_items, usize::try_from(u64::MAX).unwrap_or(usize::MAX));
        assert!(payload.current_page >= 1);
    }

    #[test]
    fn test_each_changed_parameter_triggers_one_request() {
        let mut c = TableDataController::new();
        let base = TableQuery::new(1, 10, "");
        assert!(c.request(base.clone()).is_some());
        assert!(c.request(base.clone()).is_none());

        let changes = [
            TableQuery { page: 2, ..base.clone() },
            TableQuery { page: 2, per_page: 25, ..base.clone() },
            TableQuery { page: 2, per_page: 25, search: "acme".into(), ..base.clone() },
            TableQuery { page: 2, per_page: 25, search: "acme".into(), refresh: 1 },
        ];
        for q in changes {
            let ticket = c.request(q.clone()).expect("changed query must fetch");
            assert_eq!(ticket.query, q);
            assert!(c.request(q).is_none());
        }
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut c = TableDataController::new();
        let first = c.request(TableQuery::new(1, 10, "")).unwrap();
        let second = c.request(TableQuery::new(2, 10, "")).unwrap();

        let fresh = c.resolve(&second, Ok(json!({"data": [{"id": 2}]})));
        assert!(matches!(fresh, Resolution::Committed(ref p) if p.records.len() == 1));
        assert!(!c.is_loading());

        let late = c.resolve(&first, Ok(json!({"data": [{"id": 1}]})));
        assert_eq!(late, Resolution::Stale);
    }

    #[test]
    fn test_failure_empties_records() {
        let data = TableData::new();
        data.records.set(vec![Record::new()]);
        data.current_page.set(3);
        data.total_pages.set(8);
        data.total_items.set(75);
        data.loading.set(true);

        let mut c = TableDataController::new();
        let ticket = c.request(TableQuery::new(1, 10, "")).unwrap();
        let resolution = c.resolve(&ticket, Err(FetchError::Http { status: 500 }));
        data.apply(resolution);

        assert!(data.records.get_untracked().is_empty());
        assert!(!data.loading.get_untracked());
        assert_eq!(
            (data.current_page.get_untracked(), data.total_pages.get_untracked(), data.total_items.get_untracked()),
            (1, 1, 0)
        );
        assert_eq!(
            data.last_error.get_untracked(),
            Some(FetchError::Http { status: 500 })
        );
    }

    #[test]
    fn test_to_list_query() {
        let q = TableQuery::new(3, 25, " acme ").to_list_query();
        assert_eq!(q.page, 3);
        assert_eq!(q.limit, 25);
        assert_eq!(q.search.as_deref(), Some("acme"));
    }

    mod hook {
        use super::*;
        use any_spawner::Executor;
        use futures::channel::oneshot;
        use futures::future::BoxFuture;
        use leptos::reactive::owner::Owner;
        use std::sync::Mutex;

        type Reply = oneshot::Sender<Result<Value, FetchError>>;

        /// Records every call and holds its reply until the test sends one.
        #[derive(Clone, Default)]
        struct FakeServer {
            calls: Arc<Mutex<Vec<TableQuery>>>,
            replies: Arc<Mutex<Vec<Reply>>>,
        }

        impl FakeServer {
            fn fetch(&self) -> impl Fn(TableQuery) -> BoxFuture<'static, Result<Value, FetchError>> + Send + Sync + 'static {
                let server = self.clone();
                move |q: TableQuery| -> BoxFuture<'static, Result<Value, FetchError>> {
                    let (tx, rx) = oneshot::channel();
                    server.calls.lock().unwrap().push(q);
                    server.replies.lock().unwrap().push(tx);
                    Box::pin(async move {
                        rx.await
                            .unwrap_or_else(|_| Err(FetchError::Network("dropped".into())))
                    })
                }
            }

            fn calls(&self) -> Vec<TableQuery> {
                self.calls.lock().unwrap().clone()
            }

            fn reply(&self, call: usize, body: Value) {
                let tx = std::mem::replace(&mut self.replies.lock().unwrap()[call], oneshot::channel().0);
                let _ = tx.send(Ok(body));
            }
        }

        fn start() -> Owner {
            let _ = Executor::init_futures_executor();
            let owner = Owner::new();
            owner.set();
            owner
        }

        fn ids(data: &TableData) -> Vec<i64> {
            data.records
                .get_untracked()
                .iter()
                .filter_map(|r| r.get_i64("id"))
                .collect()
        }

        #[test]
        fn test_each_query_change_calls_fetch_once() {
            let _owner = start();
            let server = FakeServer::default();
            let query = RwSignal::new(TableQuery::new(1, 10, ""));
            let data = use_table_data(server.fetch(), Signal::derive(move || query.get()));

            Executor::poll_local();
            assert_eq!(server.calls(), vec![TableQuery::new(1, 10, "")]);
            assert!(data.loading.get_untracked());

            server.reply(0, json!({"data": [{"id": 1}], "pagination": {"current_page": 1, "total_pages": 3, "total": 25}}));
            Executor::poll_local();
            assert_eq!(ids(&data), vec![1]);
            assert_eq!(data.total_pages.get_untracked(), 3);
            assert!(!data.loading.get_untracked());

            let changes = [
                TableQuery { page: 2, ..TableQuery::new(1, 10, "") },
                TableQuery { page: 2, per_page: 25, ..TableQuery::new(1, 10, "") },
                TableQuery { page: 2, per_page: 25, search: "acme".into(), refresh: 0 },
                TableQuery { page: 2, per_page: 25, search: "acme".into(), refresh: 1 },
            ];
            for (n, q) in changes.into_iter().enumerate() {
                query.set(q.clone());
                Executor::poll_local();
                let calls = server.calls();
                assert_eq!(calls.len(), n + 2);
                assert_eq!(calls.last(), Some(&q));
            }

            // то же значение повторно: без нового запроса
            query.set(query.get_untracked());
            Executor::poll_local();
            assert_eq!(server.calls().len(), 5);
        }

        #[test]
        fn test_late_response_does_not_overwrite_newer_one() {
            let _owner = start();
            let server = FakeServer::default();
            let query = RwSignal::new(TableQuery::new(1, 10, ""));
            let data = use_table_data(server.fetch(), Signal::derive(move || query.get()));
            Executor::poll_local();

            query.set(TableQuery::new(2, 10, ""));
            Executor::poll_local();
            assert_eq!(server.calls().len(), 2);

            server.reply(1, json!({"data": [{"id": 2}], "pagination": {"current_page": 2, "total_pages": 2, "total": 12}}));
            Executor::poll_local();
            assert_eq!(ids(&data), vec![2]);

            server.reply(0, json!({"data": [{"id": 1}], "pagination": {"current_page": 1, "total_pages": 2, "total": 12}}));
            Executor::poll_local();
            assert_eq!(ids(&data), vec![2]);
            assert_eq!(data.current_page.get_untracked(), 2);
            assert!(!data.loading.get_untracked());
        }
    }
}
