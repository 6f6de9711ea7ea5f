//! Optimistic add/edit/delete.
//!
//! Each mutation is applied to the in-memory list first, then sent to the
//! server. A failure restores the exact pre-mutation state before the error is
//! reported, so no later read of the list can observe a failed mutation.

use crate::shared::http::FetchError;
use contracts::shared::record::ID_FIELD;
use contracts::shared::{MutationResponse, Record, RecordId};
use leptos::prelude::*;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MutationError {
    /// `success: false` from the server
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Transport(#[from] FetchError),
    #[error("Record {0} is no longer in the list")]
    Missing(RecordId),
    #[error("The table is no longer mounted")]
    Detached,
}

/// Turns a gateway result into a confirmed response or a mutation error.
pub fn confirm(result: Result<MutationResponse, FetchError>) -> Result<MutationResponse, MutationError> {
    let response = result?;
    if response.success {
        Ok(response)
    } else {
        Err(MutationError::Rejected(response.error_message()))
    }
}

// ============================================================================
// Counters
// ============================================================================

/// Locally held aggregate counts (metrics cards), keyed by category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counters(BTreeMap<String, i64>);

impl Counters {
    pub fn from_map(map: BTreeMap<String, i64>) -> Self {
        Self(map)
    }

    pub fn get(&self, key: &str) -> i64 {
        self.0.get(key).copied().unwrap_or(0)
    }

    pub fn bump(&mut self, key: &str, delta: i64) {
        *self.0.entry(key.to_string()).or_insert(0) += delta;
    }

    pub fn as_map(&self) -> &BTreeMap<String, i64> {
        &self.0
    }
}

// ============================================================================
// Pending mutations (command + undo)
// ============================================================================

/// A temporary row waiting for the server to confirm its creation.
#[derive(Debug, Clone)]
pub struct PendingAdd {
    temp_id: RecordId,
    counter_key: Option<String>,
}

impl PendingAdd {
    /// Prepends `draft` under a fresh temporary id and bumps the counter.
    pub fn begin(
        list: &mut Vec<Record>,
        counters: &mut Counters,
        draft: Record,
        counter_key: Option<&str>,
    ) -> Self {
        let temp_id = RecordId::temporary();
        list.insert(0, draft.with_id(&temp_id));
        if let Some(key) = counter_key {
            counters.bump(key, 1);
        }
        Self {
            temp_id,
            counter_key: counter_key.map(String::from),
        }
    }

    pub fn temp_id(&self) -> &RecordId {
        &self.temp_id
    }

    /// Replaces the temporary row in place with the server's version.
    ///
    /// When the server answered with an id only, that id is written onto the
    /// temporary row. Returns the id the row now carries.
    pub fn commit(&self, list: &mut [Record], response: &MutationResponse) -> RecordId {
        let Some(row) = list.iter_mut().find(|r| r.has_id(&self.temp_id)) else {
            return self.temp_id.clone();
        };
        if let Some(confirmed) = response.record().filter(|r| r.id().is_some()) {
            *row = confirmed;
        } else if let Some(id) = response.id.as_ref().and_then(RecordId::from_value) {
            row.set_id(&id);
        }
        row.id().unwrap_or_else(|| self.temp_id.clone())
    }

    pub fn rollback(self, list: &mut Vec<Record>, counters: &mut Counters) {
        list.retain(|r| !r.has_id(&self.temp_id));
        if let Some(key) = &self.counter_key {
            counters.bump(key, -1);
        }
    }
}

/// Snapshot of a row taken before its fields were overwritten.
#[derive(Debug, Clone)]
pub struct PendingEdit {
    id: RecordId,
    index: usize,
    snapshot: Record,
    updated: Record,
}

impl PendingEdit {
    /// Merges `patch` into the row with `id`. `None` when the row is gone.
    ///
    /// The row keeps its own `id` value, whatever the patch carries.
    pub fn begin(list: &mut [Record], id: &RecordId, patch: &Record) -> Option<Self> {
        let index = list.iter().position(|r| r.has_id(id))?;
        let snapshot = list[index].clone();
        let mut updated = snapshot.clone();
        updated.merge(patch);
        if let Some(original) = snapshot.get(ID_FIELD) {
            updated.insert(ID_FIELD, original.clone());
        }
        list[index] = updated.clone();
        Some(Self {
            id: id.clone(),
            index,
            snapshot,
            updated,
        })
    }

    /// Row as sent to the server.
    pub fn updated(&self) -> &Record {
        &self.updated
    }

    /// Takes over fields echoed back by the server, if any.
    pub fn commit(&self, list: &mut [Record], response: &MutationResponse) {
        if let Some(confirmed) = response.record() {
            if let Some(row) = list.iter_mut().find(|r| r.has_id(&self.id)) {
                row.merge(&confirmed);
            }
        }
    }

    pub fn rollback(self, list: &mut Vec<Record>) {
        match list.iter_mut().find(|r| r.has_id(&self.id)) {
            Some(row) => *row = self.snapshot,
            None => {
                let at = self.index.min(list.len());
                list.insert(at, self.snapshot);
            }
        }
    }
}

/// A removed row kept for re-insertion.
#[derive(Debug, Clone)]
pub struct PendingDelete {
    index: usize,
    snapshot: Record,
    counter_key: Option<String>,
}

impl PendingDelete {
    pub fn begin(
        list: &mut Vec<Record>,
        counters: &mut Counters,
        id: &RecordId,
        counter_key: Option<&str>,
    ) -> Option<Self> {
        let index = list.iter().position(|r| r.has_id(id))?;
        let snapshot = list.remove(index);
        if let Some(key) = counter_key {
            counters.bump(key, -1);
        }
        Some(Self {
            index,
            snapshot,
            counter_key: counter_key.map(String::from),
        })
    }

    pub fn snapshot(&self) -> &Record {
        &self.snapshot
    }

    /// Puts the row back at its old position, or at the end if the list shrank.
    pub fn rollback(self, list: &mut Vec<Record>, counters: &mut Counters) {
        if self.index <= list.len() {
            list.insert(self.index, self.snapshot);
        } else {
            list.push(self.snapshot);
        }
        if let Some(key) = &self.counter_key {
            counters.bump(key, 1);
        }
    }
}

// ============================================================================
// Endpoints
// ============================================================================

/// REST calls behind one table. Implementations build the URLs; the
/// controller only interprets the responses.
#[allow(async_fn_in_trait)]
pub trait RecordEndpoints {
    async fn create(&self, draft: &Record) -> Result<MutationResponse, FetchError>;
    async fn update(&self, id: &RecordId, record: &Record) -> Result<MutationResponse, FetchError>;
    /// `record` is the removed row; some endpoints need more than its id.
    async fn delete(&self, id: &RecordId, record: &Record) -> Result<MutationResponse, FetchError>;
}

// ============================================================================
// Controller
// ============================================================================

pub type ErrorReporter = Arc<dyn Fn(&MutationError) + Send + Sync>;
pub type SettledHook = Arc<dyn Fn() + Send + Sync>;

pub struct OptimisticController<E> {
    records: RwSignal<Vec<Record>>,
    counters: RwSignal<Counters>,
    endpoints: Arc<E>,
    on_error: Option<ErrorReporter>,
    on_settled: Option<SettledHook>,
}

impl<E> Clone for OptimisticController<E> {
    fn clone(&self) -> Self {
        Self {
            records: self.records,
            counters: self.counters,
            endpoints: self.endpoints.clone(),
            on_error: self.on_error.clone(),
            on_settled: self.on_settled.clone(),
        }
    }
}

impl<E: RecordEndpoints> OptimisticController<E> {
    pub fn new(records: RwSignal<Vec<Record>>, counters: RwSignal<Counters>, endpoints: E) -> Self {
        Self {
            records,
            counters,
            endpoints: Arc::new(endpoints),
            on_error: None,
            on_settled: None,
        }
    }

    /// Called once per failed mutation, after the rollback.
    pub fn on_error(mut self, report: impl Fn(&MutationError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(report));
        self
    }

    /// Called after every successful mutation (metrics refresh, re-fetch).
    pub fn on_settled(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_settled = Some(Arc::new(hook));
        self
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut Vec<Record>, &mut Counters) -> T) -> Option<T> {
        let mut counters = self.counters.get_untracked();
        let out = self.records.try_update(|list| f(list, &mut counters))?;
        self.counters.set(counters);
        Some(out)
    }

    fn fail<T>(&self, error: MutationError) -> Result<T, MutationError> {
        log::warn!("mutation failed: {}", error);
        if let Some(report) = &self.on_error {
            report(&error);
        }
        Err(error)
    }

    fn settled(&self) {
        if let Some(hook) = &self.on_settled {
            hook();
        }
    }

    /// Adds `draft` at the top of the list and confirms it with the server.
    pub async fn add(&self, draft: Record, counter_key: Option<&str>) -> Result<RecordId, MutationError> {
        let request = draft.clone();
        let Some(pending) = self.with_state(|list, counters| PendingAdd::begin(list, counters, draft, counter_key)) else {
            return Err(MutationError::Detached);
        };

        match confirm(self.endpoints.create(&request).await) {
            Ok(response) => {
                let id = self
                    .records
                    .try_update(|list| pending.commit(list, &response))
                    .unwrap_or_else(|| pending.temp_id().clone());
                self.settled();
                Ok(id)
            }
            Err(e) => {
                self.with_state(|list, counters| pending.rollback(list, counters));
                self.fail(e)
            }
        }
    }

    /// Applies `patch` to the row with `id` and confirms it with the server.
    pub async fn edit(&self, id: &RecordId, patch: &Record) -> Result<(), MutationError> {
        let Some(pending) = self
            .records
            .try_update(|list| PendingEdit::begin(list, id, patch))
            .flatten()
        else {
            return self.fail(MutationError::Missing(id.clone()));
        };

        match confirm(self.endpoints.update(id, pending.updated()).await) {
            Ok(response) => {
                self.records.update(|list| pending.commit(list, &response));
                self.settled();
                Ok(())
            }
            Err(e) => {
                self.records.update(|list| pending.rollback(list));
                self.fail(e)
            }
        }
    }

    /// Removes the row with `id` and confirms the deletion with the server.
    pub async fn delete(&self, id: &RecordId, counter_key: Option<&str>) -> Result<(), MutationError> {
        let Some(pending) = self
            .with_state(|list, counters| PendingDelete::begin(list, counters, id, counter_key))
            .flatten()
        else {
            return self.fail(MutationError::Missing(id.clone()));
        };

        match confirm(self.endpoints.delete(id, pending.snapshot()).await) {
            Ok(_) => {
                self.settled();
                Ok(())
            }
            Err(e) => {
                self.with_state(|list, counters| pending.rollback(list, counters));
                self.fail(e)
            }
        }
    }
}
