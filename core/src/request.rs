//! Async request state for a single slice.
//!
//! An [`AsyncState`] mirrors the lifecycle of the requests issued for one
//! category of remote data. Each trigger is tagged with a [`RequestId`];
//! only the most recently issued one is allowed to settle the state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Correlation token for one request issued by a slice.
///
/// Ids are handed out by [`AsyncState::begin`] from a counter that only grows,
/// so a settled or abandoned request can never collide with a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(u64);

impl RequestId {
    /// Create from a raw sequence number.
    #[must_use]
    pub const fn new(seq: u64) -> Self {
        Self(seq)
    }

    /// The raw sequence number.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

/// Lifecycle status of a slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Nothing requested yet, or reset
    #[default]
    Idle,
    /// A request is outstanding
    Pending,
    /// The latest request succeeded
    Succeeded,
    /// The latest request failed
    Failed,
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// State of one slice: status, last good payload, last error.
///
/// Invariants:
/// - `status == Pending` exactly when a latest request is outstanding
/// - `status == Failed` implies `error` is set; `data` keeps its previous value
/// - only the latest issued request may settle the state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsyncState<T> {
    status: RequestStatus,
    data: Option<T>,
    error: Option<String>,
    latest: Option<RequestId>,
    issued: u64,
    fetched_at: Option<DateTime<Utc>>,
}

impl<T> Default for AsyncState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AsyncState<T> {
    /// Fresh idle state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            status: RequestStatus::Idle,
            data: None,
            error: None,
            latest: None,
            issued: 0,
            fetched_at: None,
        }
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> RequestStatus {
        self.status
    }

    /// Last successfully fetched payload, possibly stale.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Last failure message.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Id of the outstanding request that will be honored, if any.
    #[must_use]
    pub const fn latest_request(&self) -> Option<RequestId> {
        self.latest
    }

    /// When `data` was last replaced by a successful response.
    #[must_use]
    pub const fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    /// True before the first trigger and after a reset.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.status == RequestStatus::Idle
    }

    /// True while a request is outstanding.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    /// True when the latest request succeeded.
    #[must_use]
    pub fn is_succeeded(&self) -> bool {
        self.status == RequestStatus::Succeeded
    }

    /// True when the latest request failed.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.status == RequestStatus::Failed
    }

    /// Start a new request and make it the latest.
    ///
    /// Any request already outstanding becomes stale. Cached data is kept.
    pub fn begin(&mut self) -> RequestId {
        self.issued += 1;
        let id = RequestId(self.issued);
        self.latest = Some(id);
        self.status = RequestStatus::Pending;
        self.error = None;
        id
    }

    /// Whether `id` is the request currently allowed to settle the state.
    #[must_use]
    pub fn is_latest(&self, id: RequestId) -> bool {
        self.latest == Some(id)
    }

    /// Apply a successful response. Returns `false` (and changes nothing) when
    /// `id` is stale.
    pub fn succeed(&mut self, id: RequestId, payload: T, at: DateTime<Utc>) -> bool {
        if !self.is_latest(id) {
            return false;
        }
        self.latest = None;
        self.status = RequestStatus::Succeeded;
        self.data = Some(payload);
        self.error = None;
        self.fetched_at = Some(at);
        true
    }

    /// Apply a failure. Returns `false` (and changes nothing) when `id` is
    /// stale. Cached data survives.
    pub fn fail(&mut self, id: RequestId, message: impl Into<String>) -> bool {
        if !self.is_latest(id) {
            return false;
        }
        self.latest = None;
        self.status = RequestStatus::Failed;
        self.error = Some(message.into());
        true
    }

    /// Back to idle with no data and no error.
    ///
    /// The id counter is kept, so responses to requests issued before the
    /// reset are dropped when they arrive.
    pub fn reset(&mut self) {
        self.status = RequestStatus::Idle;
        self.data = None;
        self.error = None;
        self.latest = None;
        self.fetched_at = None;
    }
}
