//! Push-based refresh over one server-sent-events channel.
//!
//! Each text event is decoded as a self-contained payload and replaces the
//! cached payload wholesale; nothing is merged. A message that fails to
//! decode sets the error but leaves the channel open and the payload intact;
//! so does a decode-domain error reported by the channel itself.
//!
//! When the channel drops, the [`ReconnectPolicy`] decides between a delayed
//! reconnect and giving up; giving up is surfaced through the state so the
//! view can show that the stream is dead instead of silently going stale.
//! The channel is dropped (closed) on every exit path.

#[cfg(test)]
#[path = "stream_test.rs"]
mod stream_test;

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use futures::{Stream, StreamExt};

use super::error::SourceError;
use crate::config::ReconnectPolicy;
use crate::state::source::{SourceState, SourceStore, is_alive};

/// Run a stream source until `alive` is cleared or reconnects are exhausted.
///
/// `connect` opens a fresh channel; at most one channel is open at a time.
pub async fn drive_stream<T, S, C, St, Z, ZFut>(
    store: S,
    policy: ReconnectPolicy,
    alive: Arc<AtomicBool>,
    decode: fn(&str) -> Result<T, SourceError>,
    mut connect: C,
    mut sleep: Z,
) where
    S: SourceStore<T>,
    C: FnMut() -> Result<St, SourceError>,
    St: Stream<Item = Result<String, SourceError>> + Unpin,
    Z: FnMut(Duration) -> ZFut,
    ZFut: Future<Output = ()>,
{
    if store.with_state(SourceState::activate) != Some(true) {
        return;
    }

    let mut attempt: u32 = 0;
    while is_alive(&alive) {
        let err = match connect() {
            Ok(mut channel) => {
                let _ = store.with_state(SourceState::reopened);
                loop {
                    let next = channel.next().await;
                    if !is_alive(&alive) {
                        return;
                    }
                    match next {
                        Some(Ok(text)) => {
                            let result = decode(&text);
                            if let Err(err) = &result {
                                leptos::logging::warn!("stream message rejected: {err}");
                            } else {
                                attempt = 0;
                            }
                            let _ = store.with_state(|s| s.apply_message(result));
                        }
                        Some(Err(err)) if !err.is_transport() => {
                            leptos::logging::warn!("stream message rejected: {err}");
                            let _ = store.with_state(|s| s.apply_message(Err(err)));
                        }
                        Some(Err(err)) => break err,
                        None => break SourceError::Transport("stream closed by peer".to_owned()),
                    }
                }
            }
            Err(err) => err,
        };

        attempt = attempt.saturating_add(1);
        let delay = policy.next_delay(attempt);
        let _ = store.with_state(|s| s.fail_transport(&err, delay.map(|_| attempt)));
        let Some(delay) = delay else {
            leptos::logging::warn!("stream dropped: {err}; giving up");
            return;
        };
        leptos::logging::warn!("stream dropped: {err}; reconnect #{attempt} in {}ms", delay.as_millis());
        sleep(delay).await;
    }
}

/// Browser SSE channel yielding the text of each `message` event.
///
/// Dropping the channel closes the underlying `EventSource`.
#[cfg(feature = "hydrate")]
pub struct SseChannel {
    _source: gloo_net::eventsource::futures::EventSource,
    messages: gloo_net::eventsource::futures::EventSourceSubscription,
}

#[cfg(feature = "hydrate")]
impl SseChannel {
    /// # Errors
    ///
    /// Returns [`SourceError::Transport`] if the browser refuses to open the channel.
    pub fn open(url: &str) -> Result<Self, SourceError> {
        let mut source = gloo_net::eventsource::futures::EventSource::new(url)
            .map_err(|e| SourceError::Transport(e.to_string()))?;
        let messages = source
            .subscribe("message")
            .map_err(|e| SourceError::Transport(e.to_string()))?;
        Ok(Self { _source: source, messages })
    }
}

#[cfg(feature = "hydrate")]
impl Stream for SseChannel {
    type Item = Result<String, SourceError>;

    fn poll_next(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Option<Self::Item>> {
        self.messages.poll_next_unpin(cx).map(|item| {
            item.map(|message| match message {
                Ok((_, event)) => event
                    .data()
                    .as_string()
                    .ok_or_else(|| SourceError::Decode("non-text event".to_owned())),
                Err(err) => Err(SourceError::Transport(err.to_string())),
            })
        })
    }
}

/// Start streaming `url` into `store` on the browser event loop.
#[cfg(feature = "hydrate")]
pub fn start_stream_source<T, S>(
    store: S,
    url: String,
    policy: ReconnectPolicy,
    decode: fn(&str) -> Result<T, SourceError>,
) -> crate::state::source::SourceHandle<T, S>
where
    T: 'static,
    S: SourceStore<T>,
{
    use crate::state::source::{SourceHandle, liveness};

    let alive = liveness();
    let connect = move || SseChannel::open(&url);
    let (task, abort) = futures::future::abortable(drive_stream(
        store.clone(),
        policy,
        alive.clone(),
        decode,
        connect,
        gloo_timers::future::sleep,
    ));
    leptos::task::spawn_local(async move {
        let _ = task.await;
    });
    SourceHandle::new(store, alive, abort)
}
