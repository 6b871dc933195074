//! Outbound commands: open-market-window and create-route.
//!
//! Commands are fire-and-forget from the view's point of view. Each call
//! issues exactly one request; nothing is queued, retried, or written back
//! into view state. The outcome is logged with a request id for correlation
//! and handed to an optional observer.

#[cfg(test)]
#[path = "dispatch_test.rs"]
mod dispatch_test;

use std::sync::Arc;

use uuid::Uuid;

use super::api::{Backend, CREATE_ROUTE_PATH, HttpBackend, open_market_window_path};
use super::error::SourceError;
use super::types::TargetId;

/// Status text shown when route creation fails for any reason.
pub const CREATE_ROUTE_FAILED: &str = "Error creating route";

/// Result of one dispatched command.
#[derive(Clone, Debug, PartialEq)]
pub struct DispatchOutcome {
    pub request_id: Uuid,
    pub target: TargetId,
    pub result: Result<(), SourceError>,
}

type Observer = Arc<dyn Fn(&DispatchOutcome) + Send + Sync>;

/// Sends user commands to the backend.
#[derive(Clone)]
pub struct ActionDispatcher {
    backend: Arc<dyn Backend + Send + Sync>,
    observer: Option<Observer>,
}

impl ActionDispatcher {
    pub fn new(backend: impl Backend + Send + Sync + 'static) -> Self {
        Self { backend: Arc::new(backend), observer: None }
    }

    /// Dispatcher talking to the real backend under `base`.
    #[must_use]
    pub fn http(base: &str) -> Self {
        Self::new(HttpBackend::new(base))
    }

    /// Subscribe to every outcome. Replaces any previous observer.
    #[must_use]
    pub fn with_observer(mut self, observer: impl Fn(&DispatchOutcome) + Send + Sync + 'static) -> Self {
        self.observer = Some(Arc::new(observer));
        self
    }

    /// `POST /open_market_window/{target}` once and report the outcome.
    pub async fn open_market_window(&self, target: &TargetId) -> DispatchOutcome {
        let request_id = Uuid::new_v4();
        let result = self.backend.post(&open_market_window_path(target)).await.map(|_| ());
        match &result {
            Ok(()) => leptos::logging::log!("[{request_id}] opened market window for {target}"),
            Err(err) => leptos::logging::warn!("[{request_id}] open market window for {target} failed: {err}"),
        }
        let outcome = DispatchOutcome { request_id, target: target.clone(), result };
        if let Some(observer) = &self.observer {
            observer(&outcome);
        }
        outcome
    }

    /// Fire [`Self::open_market_window`] without waiting for it.
    pub fn fire(&self, target: TargetId) {
        #[cfg(feature = "hydrate")]
        {
            let dispatcher = self.clone();
            leptos::task::spawn_local(async move {
                let _ = dispatcher.open_market_window(&target).await;
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            leptos::logging::debug_warn!("dispatch of {target} ignored outside the browser");
        }
    }

    /// Ask the backend to compute a new route; see [`create_route`].
    pub async fn create_route(&self) -> String {
        create_route(self.backend.as_ref()).await
    }
}

/// `POST /create_route` and turn the answer into a status message.
///
/// A JSON body is shown as its compact text; any failure yields
/// [`CREATE_ROUTE_FAILED`].
pub async fn create_route(backend: &(dyn Backend + Send + Sync)) -> String {
    let body = match backend.post(CREATE_ROUTE_PATH).await {
        Ok(body) => body,
        Err(err) => {
            leptos::logging::warn!("create route failed: {err}");
            return CREATE_ROUTE_FAILED.to_owned();
        }
    };
    match serde_json::from_str::<serde_json::Value>(&body) {
        Ok(value) => value.to_string(),
        Err(err) => {
            leptos::logging::warn!("create route returned unreadable body: {err}");
            CREATE_ROUTE_FAILED.to_owned()
        }
    }
}
