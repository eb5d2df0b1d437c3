//! Reserve Store
//!
//! Local mirror of the reserves catalog plus the transient UI flags the
//! catalog screens need (loading, last error, modal visibility, selection).
//!
//! The store is never the source of truth. Every mutating action calls the
//! server first and reconciles `items` only after the server answered.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Datelike, Local, TimeZone};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::core::graphql::{Error, ErrorKind, GraphQLExecutor, HttpExecutor, Result};
use crate::core::reserves::client::{ListQuery, ReserveClient};
use crate::core::reserves::models::{Reserve, ReserveInput, ReserveType, ReserveUpdate};

// ============================================================================
// Errors
// ============================================================================

/// Store action that produced a [`StoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreAction {
    Load,
    Create,
    Update,
    Delete,
    Import,
}

impl StoreAction {
    fn describe(self) -> &'static str {
        match self {
            Self::Load => "load reserves",
            Self::Create => "create reserve",
            Self::Update => "update reserve",
            Self::Delete => "delete reserve",
            Self::Import => "import reserves",
        }
    }
}

/// Last failure recorded by the store.
///
/// Keeps the error kind so callers can tell transport failures from
/// server-side rejections without parsing `message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreError {
    pub action: StoreAction,
    pub kind: ErrorKind,
    pub status: Option<u16>,
    pub message: String,
}

impl StoreError {
    pub fn new(action: StoreAction, err: &Error) -> Self {
        Self {
            action,
            kind: err.kind(),
            status: err.status(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to {}: {}", self.action.describe(), self.message)
    }
}

// ============================================================================
// State
// ============================================================================

/// Counts derived from the cached items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReserveStats {
    pub total: usize,
    pub bonus: usize,
    pub resource: usize,
    pub mech: usize,
    pub tactical: usize,
    pub this_month: usize,
}

/// Plain store state. Derived counts are computed on every call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    /// Last fetched reserves, in server order.
    pub items: Vec<Reserve>,
    pub is_loading: bool,
    pub error: Option<StoreError>,
    pub show_add_modal: bool,
    pub show_edit_modal: bool,
    pub show_delete_confirm_modal: bool,
    /// Reserve targeted by the open edit or delete modal.
    pub selected: Option<Reserve>,
}

impl StoreState {
    pub fn total_reserves(&self) -> usize {
        self.items.len()
    }

    pub fn count_of(&self, reserve_type: ReserveType) -> usize {
        self.items.iter().filter(|r| r.is_type(reserve_type)).count()
    }

    pub fn bonus_reserves(&self) -> usize {
        self.count_of(ReserveType::Bonus)
    }

    pub fn resource_reserves(&self) -> usize {
        self.count_of(ReserveType::Resource)
    }

    pub fn mech_reserves(&self) -> usize {
        self.count_of(ReserveType::Mech)
    }

    pub fn tactical_reserves(&self) -> usize {
        self.count_of(ReserveType::Tactical)
    }

    /// Items created in the calendar month of `now`, in `now`'s time zone.
    pub fn monthly_reserves_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> usize {
        let tz = now.timezone();
        self.items
            .iter()
            .filter(|r| {
                let created = r.created_at.with_timezone(&tz);
                created.year() == now.year() && created.month() == now.month()
            })
            .count()
    }

    pub fn stats_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> ReserveStats {
        ReserveStats {
            total: self.total_reserves(),
            bonus: self.bonus_reserves(),
            resource: self.resource_reserves(),
            mech: self.mech_reserves(),
            tactical: self.tactical_reserves(),
            this_month: self.monthly_reserves_at(now),
        }
    }

    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|r| r.id == id)
    }

    /// Replace the cached list wholesale.
    pub fn apply_loaded(&mut self, items: Vec<Reserve>) {
        self.items = items;
    }

    /// Append a server-created record. A record whose id is already cached
    /// replaces that entry instead, keeping ids unique.
    pub fn apply_created(&mut self, reserve: Reserve) {
        match self.position_of(&reserve.id) {
            Some(idx) => self.items[idx] = reserve,
            None => self.items.push(reserve),
        }
    }

    /// Replace the entry with `id` in place. Returns false if it is not cached.
    pub fn apply_updated(&mut self, id: &str, reserve: Reserve) -> bool {
        match self.position_of(id) {
            Some(idx) => {
                self.items[idx] = reserve;
                true
            }
            None => false,
        }
    }

    /// Drop the entry with `id`. Returns false if it is not cached.
    pub fn apply_removed(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|r| r.id != id);
        self.items.len() != before
    }
}

// ============================================================================
// Store
// ============================================================================

/// Resets `is_loading` when a load ends without settling, as long as no
/// newer load has been issued since.
struct LoadingGuard<'a> {
    state: &'a RwLock<StoreState>,
    load_seq: &'a AtomicU64,
    seq: u64,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if self.seq == self.load_seq.load(Ordering::SeqCst) {
            self.state
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .is_loading = false;
        }
    }
}

/// Result of [`ReserveStore::load`]. Load failures are recorded in the
/// store rather than returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Items replaced with this many records.
    Loaded(usize),
    /// Request failed; see [`ReserveStore::error`].
    Failed,
    /// A newer load was issued while this one was in flight; result dropped.
    Stale,
}

/// Reserves state container.
///
/// Actions take `&self` and never hold the state lock across a request, so
/// several may be in flight at once. Overlapping loads are sequenced: only
/// the most recently issued load may touch the state when it completes.
pub struct ReserveStore<E = HttpExecutor> {
    client: ReserveClient<E>,
    state: RwLock<StoreState>,
    load_seq: AtomicU64,
    list_query: ListQuery,
}

impl<E: GraphQLExecutor> ReserveStore<E> {
    pub fn new(client: ReserveClient<E>) -> Self {
        Self {
            client,
            state: RwLock::new(StoreState::default()),
            load_seq: AtomicU64::new(0),
            list_query: ListQuery::default(),
        }
    }

    /// Override the filter/pagination used by [`load`](Self::load).
    #[must_use]
    pub fn with_list_query(mut self, list_query: ListQuery) -> Self {
        self.list_query = list_query;
        self
    }

    pub fn client(&self) -> &ReserveClient<E> {
        &self.client
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// Copy of the whole state.
    pub fn snapshot(&self) -> StoreState {
        self.read().clone()
    }

    pub fn items(&self) -> Vec<Reserve> {
        self.read().items.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.read().is_loading
    }

    pub fn error(&self) -> Option<StoreError> {
        self.read().error.clone()
    }

    pub fn selected(&self) -> Option<Reserve> {
        self.read().selected.clone()
    }

    pub fn show_add_modal(&self) -> bool {
        self.read().show_add_modal
    }

    pub fn show_edit_modal(&self) -> bool {
        self.read().show_edit_modal
    }

    pub fn show_delete_confirm_modal(&self) -> bool {
        self.read().show_delete_confirm_modal
    }

    pub fn total_reserves(&self) -> usize {
        self.read().total_reserves()
    }

    pub fn bonus_reserves(&self) -> usize {
        self.read().bonus_reserves()
    }

    pub fn resource_reserves(&self) -> usize {
        self.read().resource_reserves()
    }

    pub fn mech_reserves(&self) -> usize {
        self.read().mech_reserves()
    }

    pub fn tactical_reserves(&self) -> usize {
        self.read().tactical_reserves()
    }

    /// Reserves created this calendar month, local wall clock.
    pub fn monthly_reserves(&self) -> usize {
        self.read().monthly_reserves_at(&Local::now())
    }

    pub fn stats(&self) -> ReserveStats {
        self.read().stats_at(&Local::now())
    }

    // ------------------------------------------------------------------------
    // Server-backed actions
    // ------------------------------------------------------------------------

    /// Refresh `items` from the server.
    ///
    /// On failure the previous items are kept and the error is recorded.
    pub async fn load(&self) -> LoadOutcome {
        let seq = self.load_seq.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.write();
            state.is_loading = true;
            state.error = None;
        }
        // Clears the flag if this future is dropped before the list settles.
        let _loading = LoadingGuard {
            state: &self.state,
            load_seq: &self.load_seq,
            seq,
        };

        let result = self.client.list(self.list_query).await;

        let mut state = self.write();
        if seq != self.load_seq.load(Ordering::SeqCst) {
            debug!(seq, "Discarding stale reserves load");
            return LoadOutcome::Stale;
        }
        state.is_loading = false;

        match result {
            Ok(items) => {
                let count = items.len();
                state.apply_loaded(items);
                info!(count, "Loaded reserves");
                LoadOutcome::Loaded(count)
            }
            Err(e) => {
                let store_err = StoreError::new(StoreAction::Load, &e);
                error!(error = %store_err, "Error loading reserves");
                state.error = Some(store_err);
                LoadOutcome::Failed
            }
        }
    }

    /// Create a reserve and append it. Closes the add modal on success.
    pub async fn create(&self, input: &ReserveInput) -> Result<Reserve> {
        let reserve = match self.client.create(input).await {
            Ok(reserve) => reserve,
            Err(e) => return Err(self.record_failure(StoreAction::Create, e)),
        };

        let mut state = self.write();
        state.apply_created(reserve.clone());
        state.show_add_modal = false;
        info!(id = %reserve.id, "Created reserve");
        Ok(reserve)
    }

    /// Update a reserve and replace the cached entry in place.
    ///
    /// If `id` is not cached the list is left alone even though the server
    /// already applied the change. Closes the edit modal on success.
    pub async fn update(&self, id: &str, input: &ReserveUpdate) -> Result<Reserve> {
        let reserve = match self.client.update(id, input).await {
            Ok(reserve) => reserve,
            Err(e) => return Err(self.record_failure(StoreAction::Update, e)),
        };

        let mut state = self.write();
        if !state.apply_updated(id, reserve.clone()) {
            warn!(id, "Updated reserve is not cached; local list left unchanged");
        }
        state.show_edit_modal = false;
        state.selected = None;
        info!(id, "Updated reserve");
        Ok(reserve)
    }

    /// Delete a reserve and drop it from the cache once the server confirms.
    ///
    /// Returns `Ok(false)` if the server declined; nothing changes locally.
    pub async fn remove(&self, id: &str) -> Result<bool> {
        let confirmed = match self.client.delete(id).await {
            Ok(confirmed) => confirmed,
            Err(e) => return Err(self.record_failure(StoreAction::Delete, e)),
        };

        if !confirmed {
            warn!(id, "Server did not confirm reserve deletion");
            return Ok(false);
        }

        let mut state = self.write();
        state.apply_removed(id);
        state.show_delete_confirm_modal = false;
        state.selected = None;
        info!(id, "Deleted reserve");
        Ok(true)
    }

    /// Bulk create; the records the server created are appended.
    pub async fn import(&self, inputs: &[ReserveInput]) -> Result<Vec<Reserve>> {
        let created = match self.client.import(inputs).await {
            Ok(created) => created,
            Err(e) => return Err(self.record_failure(StoreAction::Import, e)),
        };

        let mut state = self.write();
        for reserve in &created {
            state.apply_created(reserve.clone());
        }
        info!(
            requested = inputs.len(),
            created = created.len(),
            "Imported reserves"
        );
        Ok(created)
    }

    fn record_failure(&self, action: StoreAction, err: Error) -> Error {
        let store_err = StoreError::new(action, &err);
        error!(error = %store_err, kind = ?store_err.kind, "Reserve store action failed");
        self.write().error = Some(store_err);
        err
    }

    // ------------------------------------------------------------------------
    // Local UI actions
    // ------------------------------------------------------------------------

    pub fn open_add_modal(&self) {
        self.write().show_add_modal = true;
    }

    pub fn close_add_modal(&self) {
        self.write().show_add_modal = false;
    }

    pub fn open_edit_modal(&self, reserve: Reserve) {
        let mut state = self.write();
        state.selected = Some(reserve);
        state.show_edit_modal = true;
    }

    pub fn close_edit_modal(&self) {
        let mut state = self.write();
        state.show_edit_modal = false;
        state.selected = None;
    }

    pub fn open_delete_confirm_modal(&self, reserve: Reserve) {
        let mut state = self.write();
        state.selected = Some(reserve);
        state.show_delete_confirm_modal = true;
    }

    pub fn close_delete_confirm_modal(&self) {
        let mut state = self.write();
        state.show_delete_confirm_modal = false;
        state.selected = None;
    }

    pub fn clear_error(&self) {
        self.write().error = None;
    }
}
