//! HTTP access to the route backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR) and native test builds: every call resolves to
//! [`SourceError::Unavailable`], since these endpoints are only meaningful
//! in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Connection failures map to `Transport`, non-2xx answers to `Status`, and
//! unreadable bodies to `Decode`, so sources can render each failure inline
//! without crashing hydration.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use futures::FutureExt;
use futures::future::LocalBoxFuture;

use super::error::SourceError;
use super::types::TargetId;
use crate::config::join_url;

/// Path of the route-creation command.
pub const CREATE_ROUTE_PATH: &str = "/create_route";

/// Path of the open-market-window command for `target`.
#[must_use]
pub fn open_market_window_path(target: &TargetId) -> String {
    format!("/open_market_window/{target}")
}

/// Requests the client issues against the backend.
///
/// Browser code uses [`HttpBackend`]; tests substitute recording fakes.
pub trait Backend {
    /// `GET path` and parse the body as JSON.
    fn get_json(&self, path: &str) -> LocalBoxFuture<'static, Result<serde_json::Value, SourceError>>;

    /// `POST path` with an empty body and return the raw response text.
    fn post(&self, path: &str) -> LocalBoxFuture<'static, Result<String, SourceError>>;
}

/// `gloo-net` backed implementation rooted at `base`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpBackend {
    base: String,
}

impl HttpBackend {
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        join_url(&self.base, path)
    }
}

impl Backend for HttpBackend {
    fn get_json(&self, path: &str) -> LocalBoxFuture<'static, Result<serde_json::Value, SourceError>> {
        let url = self.url(path);
        async move {
            #[cfg(feature = "hydrate")]
            {
                let resp = gloo_net::http::Request::get(&url)
                    .send()
                    .await
                    .map_err(|e| SourceError::Transport(e.to_string()))?;
                if !resp.ok() {
                    return Err(SourceError::Status(resp.status()));
                }
                resp.json::<serde_json::Value>()
                    .await
                    .map_err(|e| SourceError::Decode(e.to_string()))
            }
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = url;
                Err(SourceError::Unavailable)
            }
        }
        .boxed_local()
    }

    fn post(&self, path: &str) -> LocalBoxFuture<'static, Result<String, SourceError>> {
        let url = self.url(path);
        async move {
            #[cfg(feature = "hydrate")]
            {
                let resp = gloo_net::http::Request::post(&url)
                    .send()
                    .await
                    .map_err(|e| SourceError::Transport(e.to_string()))?;
                if !resp.ok() {
                    return Err(SourceError::Status(resp.status()));
                }
                resp.text().await.map_err(|e| SourceError::Decode(e.to_string()))
            }
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = url;
                Err(SourceError::Unavailable)
            }
        }
        .boxed_local()
    }
}
