//! Subscription state shared by polling and streaming sources.
//!
//! DESIGN
//! ======
//! A source owns exactly one transport and exposes the last-known-good
//! payload plus an error indicator. Payloads are replaced wholesale and
//! survive failed cycles, so views can always show stale-but-available data.
//!
//! Polling responses may overlap; each request takes a sequence number when
//! it is issued and a response is applied only if its number is higher than
//! every response resolved before it. Once a source is stopped nothing is
//! applied at all.

#[cfg(test)]
#[path = "source_test.rs"]
mod source_test;

use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::future::AbortHandle;
use leptos::prelude::{RwSignal, Update};

use crate::net::error::SourceError;

/// Lifecycle of one subscription instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SourceStatus {
    /// Created but not yet activated.
    #[default]
    Idle,
    /// Transport open (timer running or channel connected).
    Active,
    /// Stream channel dropped; waiting before reconnect attempt `attempt`.
    Reconnecting { attempt: u32 },
    /// Deactivated by the consumer. Terminal.
    Stopped,
    /// Stream reconnect budget exhausted. Terminal.
    GaveUp,
}

impl SourceStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Stopped | Self::GaveUp)
    }
}

/// Sequence number handed out when a polling request is issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    #[must_use]
    pub fn seq(self) -> u64 {
        self.0
    }
}

/// What happened to a result handed to the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    /// A newer request already resolved; the result was discarded.
    Superseded,
    /// The source is not active; the result was discarded.
    Inactive,
}

/// Cached payload and error of one subscription.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceState<T> {
    pub status: SourceStatus,
    /// Last successfully decoded payload.
    pub payload: Option<T>,
    /// Text of the most recent failure, cleared by the next success.
    pub error: Option<String>,
    /// Failures since the last success; drives polling backoff.
    pub consecutive_failures: u32,
    /// Number of payloads applied so far.
    pub applied: u64,
    issued_seq: u64,
    resolved_seq: u64,
}

impl<T> Default for SourceState<T> {
    fn default() -> Self {
        Self {
            status: SourceStatus::Idle,
            payload: None,
            error: None,
            consecutive_failures: 0,
            applied: 0,
            issued_seq: 0,
            resolved_seq: 0,
        }
    }
}

/// Render-facing projection of a source.
#[derive(Debug, PartialEq)]
pub enum SourceView<'a, T> {
    /// Nothing has arrived yet and nothing has failed.
    Loading,
    /// Data is available; `error` is set when the latest cycle failed.
    Ready { payload: &'a T, error: Option<&'a str> },
    /// Nothing has ever arrived and the latest cycle failed.
    Failed(&'a str),
}

impl<T> SourceState<T> {
    /// `Idle -> Active`. Returns `false` for any other starting state.
    pub fn activate(&mut self) -> bool {
        if self.status != SourceStatus::Idle {
            return false;
        }
        self.status = SourceStatus::Active;
        true
    }

    /// Allocate the next request sequence number.
    pub fn issue(&mut self) -> Option<Ticket> {
        if self.status != SourceStatus::Active {
            return None;
        }
        self.issued_seq += 1;
        Some(Ticket(self.issued_seq))
    }

    /// Apply a polling response if it is the newest one seen so far.
    pub fn resolve(&mut self, ticket: Ticket, result: Result<T, SourceError>) -> Resolution {
        if self.status != SourceStatus::Active {
            return Resolution::Inactive;
        }
        if ticket.0 <= self.resolved_seq {
            return Resolution::Superseded;
        }
        self.resolved_seq = ticket.0;
        self.record(result);
        Resolution::Applied
    }

    /// Apply one stream message in arrival order.
    pub fn apply_message(&mut self, result: Result<T, SourceError>) -> Resolution {
        if self.status != SourceStatus::Active {
            return Resolution::Inactive;
        }
        self.record(result);
        Resolution::Applied
    }

    /// Record a dropped channel. `retry` is the next reconnect attempt, or
    /// `None` when the budget is exhausted.
    pub fn fail_transport(&mut self, err: &SourceError, retry: Option<u32>) {
        if self.status.is_terminal() {
            return;
        }
        self.error = Some(err.to_string());
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        self.status = match retry {
            Some(attempt) => SourceStatus::Reconnecting { attempt },
            None => SourceStatus::GaveUp,
        };
    }

    /// Channel reopened after a reconnect wait.
    pub fn reopened(&mut self) {
        if matches!(self.status, SourceStatus::Reconnecting { .. }) {
            self.status = SourceStatus::Active;
        }
    }

    /// Consumer stopped observing. Terminal.
    pub fn deactivate(&mut self) {
        if self.status != SourceStatus::GaveUp {
            self.status = SourceStatus::Stopped;
        }
    }

    #[must_use]
    pub fn view(&self) -> SourceView<'_, T> {
        match (&self.payload, self.error.as_deref()) {
            (Some(payload), error) => SourceView::Ready { payload, error },
            (None, Some(error)) => SourceView::Failed(error),
            (None, None) => SourceView::Loading,
        }
    }

    fn record(&mut self, result: Result<T, SourceError>) {
        match result {
            Ok(payload) => {
                self.payload = Some(payload);
                self.error = None;
                self.consecutive_failures = 0;
                self.applied += 1;
            }
            Err(err) => {
                self.error = Some(err.to_string());
                self.consecutive_failures = self.consecutive_failures.saturating_add(1);
            }
        }
    }
}

/// Shared, mutable home of a [`SourceState`].
///
/// Browser code stores the state in a signal so views re-render on change;
/// tests use a plain `Rc<RefCell<_>>`.
pub trait SourceStore<T>: Clone + 'static {
    /// Run `f` against the state. `None` if the store is gone.
    fn with_state<R>(&self, f: impl FnOnce(&mut SourceState<T>) -> R) -> Option<R>;
}

impl<T: Send + Sync + 'static> SourceStore<T> for RwSignal<SourceState<T>> {
    fn with_state<R>(&self, f: impl FnOnce(&mut SourceState<T>) -> R) -> Option<R> {
        self.try_update(f)
    }
}

impl<T: 'static> SourceStore<T> for Rc<RefCell<SourceState<T>>> {
    fn with_state<R>(&self, f: impl FnOnce(&mut SourceState<T>) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

/// Scoped ownership of a running source.
///
/// Stopping clears the liveness flag checked before every apply, aborts the
/// driver task (dropping its timer or channel), and marks the state stopped.
/// Dropping the handle stops the source.
pub struct SourceHandle<T, S: SourceStore<T>> {
    alive: Arc<AtomicBool>,
    abort: AbortHandle,
    store: S,
    _payload: PhantomData<fn() -> T>,
}

impl<T, S: SourceStore<T>> SourceHandle<T, S> {
    #[must_use]
    pub fn new(store: S, alive: Arc<AtomicBool>, abort: AbortHandle) -> Self {
        Self { alive, abort, store, _payload: PhantomData }
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    pub fn stop(&self) {
        self.alive.store(false, Ordering::Release);
        self.abort.abort();
        let _ = self.store.with_state(SourceState::deactivate);
    }
}

impl<T, S: SourceStore<T>> Drop for SourceHandle<T, S> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Fresh liveness flag for a new source.
#[must_use]
pub fn liveness() -> Arc<AtomicBool> {
    Arc::new(AtomicBool::new(true))
}

/// True while the owning handle has not been stopped.
#[must_use]
pub fn is_alive(alive: &AtomicBool) -> bool {
    alive.load(Ordering::Acquire)
}
