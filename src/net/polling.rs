//! Fixed-interval refresh of one resource.
//!
//! The driver issues a request as soon as it starts and one more on every
//! tick until its liveness flag is cleared. Ticks never wait for responses:
//! all in-flight requests live in one `FuturesUnordered` inside the same
//! task, so a slow response overlaps the next request instead of delaying
//! it. Overlapping responses go through the state's sequence guard, so the
//! most recently issued request wins no matter which response lands last.
//!
//! The driver is runtime-agnostic (fetch and sleep are injected); the
//! browser entry point wires it to `gloo-net` and `gloo-timers`.

#[cfg(test)]
#[path = "polling_test.rs"]
mod polling_test;

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use futures::StreamExt;
use futures::future::{Either, select};
use futures::stream::FuturesUnordered;

use super::error::SourceError;
use crate::config::PollPolicy;
use crate::state::source::{Resolution, SourceState, SourceStore, is_alive};

/// Run a polling source until `alive` is cleared or the state leaves `Active`.
pub async fn drive_polling<T, S, F, Fut, Z, ZFut>(
    store: S,
    policy: PollPolicy,
    alive: Arc<AtomicBool>,
    mut fetch: F,
    mut sleep: Z,
) where
    S: SourceStore<T>,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SourceError>>,
    Z: FnMut(Duration) -> ZFut,
    ZFut: Future<Output = ()>,
{
    if store.with_state(SourceState::activate) != Some(true) {
        return;
    }

    let mut in_flight = FuturesUnordered::new();

    while is_alive(&alive) {
        let Some(Some(ticket)) = store.with_state(SourceState::issue) else {
            break;
        };
        let request = fetch();
        in_flight.push(async move { (ticket, request.await) });

        let failures = store.with_state(|s| s.consecutive_failures).unwrap_or(0);
        let tick = sleep(policy.delay(failures));
        futures::pin_mut!(tick);

        // Apply whatever lands before the next tick.
        loop {
            if in_flight.is_empty() {
                tick.as_mut().await;
                break;
            }
            match select(tick.as_mut(), in_flight.next()).await {
                Either::Left(((), _)) => break,
                Either::Right((Some((ticket, result)), _)) => {
                    if !is_alive(&alive) {
                        return;
                    }
                    if store.with_state(|s| s.resolve(ticket, result)) == Some(Resolution::Superseded) {
                        leptos::logging::debug_warn!("poll response #{} superseded", ticket.seq());
                    }
                }
                Either::Right((None, _)) => {}
            }
        }
    }
}

/// Start polling `path` into `store` on the browser event loop.
///
/// The returned handle stops the source when dropped or stopped.
#[cfg(feature = "hydrate")]
pub fn start_polling_source<T, S, B>(
    store: S,
    backend: B,
    path: String,
    policy: PollPolicy,
    decode: fn(serde_json::Value) -> Result<T, SourceError>,
) -> crate::state::source::SourceHandle<T, S>
where
    T: 'static,
    S: SourceStore<T>,
    B: super::api::Backend + 'static,
{
    use crate::state::source::{SourceHandle, liveness};

    let alive = liveness();
    let fetch = move || {
        let request = backend.get_json(&path);
        let path = path.clone();
        async move {
            let result = request.await.and_then(decode);
            if let Err(err) = &result {
                leptos::logging::warn!("poll {path} failed: {err}");
            }
            result
        }
    };
    let (task, abort) = futures::future::abortable(drive_polling(
        store.clone(),
        policy,
        alive.clone(),
        fetch,
        gloo_timers::future::sleep,
    ));
    leptos::task::spawn_local(async move {
        let _ = task.await;
    });
    SourceHandle::new(store, alive, abort)
}
