//! Client configuration: endpoints, refresh cadence, and reconnect policy.
//!
//! SYSTEM CONTEXT
//! ==============
//! Targets and intervals are supplied by the caller when a source is
//! created. The defaults below describe the standard route page; a hosting
//! page may override them with `<meta name="tradeview:...">` tags, read once
//! at startup. Nothing is read from the environment or persisted.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

/// Default refresh interval for polled resources.
pub const DEFAULT_POLL_MS: u64 = 2_000;
/// First reconnect delay after a stream drop.
pub const DEFAULT_RECONNECT_INITIAL_MS: u64 = 1_000;
/// Upper bound for reconnect and polling backoff delays.
pub const DEFAULT_BACKOFF_MAX_MS: u64 = 10_000;
/// Reconnect attempts before a stream gives up.
pub const DEFAULT_STREAM_RETRIES: u32 = 5;

const META_API_BASE: &str = "tradeview:api-base";
const META_POLL_MS: &str = "tradeview:poll-ms";
const META_STREAM_RETRIES: &str = "tradeview:stream-retries";

/// Invalid configuration values.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("poll interval must be greater than zero")]
    ZeroInterval,
}

/// Doubling delay capped at `max`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Backoff {
    pub initial: Duration,
    pub max: Duration,
}

impl Backoff {
    /// Delay before attempt `step` (0-based): `initial * 2^step`, capped.
    #[must_use]
    pub fn delay(&self, step: u32) -> Duration {
        let factor = 1u32.checked_shl(step.min(31)).unwrap_or(u32::MAX);
        self.initial.saturating_mul(factor).min(self.max)
    }
}

/// Cadence of one polling source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    /// Stretch the tick delay after consecutive failures. `None` keeps a
    /// fixed cadence regardless of failures.
    pub backoff_max: Option<Duration>,
}

impl PollPolicy {
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroInterval`] if `interval` is zero.
    pub fn new(interval: Duration) -> Result<Self, ConfigError> {
        if interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(Self { interval, backoff_max: None })
    }

    #[must_use]
    pub fn with_backoff(mut self, max: Duration) -> Self {
        self.backoff_max = Some(max.max(self.interval));
        self
    }

    /// Delay until the next tick given the failures since the last success.
    #[must_use]
    pub fn delay(&self, consecutive_failures: u32) -> Duration {
        match self.backoff_max {
            Some(max) if consecutive_failures > 0 => Backoff { initial: self.interval, max }.delay(consecutive_failures),
            _ => self.interval,
        }
    }
}

/// Reconnect behaviour of a stream source after its channel drops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReconnectPolicy {
    pub max_retries: u32,
    pub backoff: Backoff,
}

impl ReconnectPolicy {
    /// Give up on the first drop.
    #[must_use]
    pub fn never() -> Self {
        Self { max_retries: 0, ..Self::default() }
    }

    /// Delay before reconnect attempt `attempt` (1-based), or `None` once the
    /// retry budget is spent.
    #[must_use]
    pub fn next_delay(&self, attempt: u32) -> Option<Duration> {
        if attempt == 0 || attempt > self.max_retries {
            return None;
        }
        Some(self.backoff.delay(attempt - 1))
    }
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_STREAM_RETRIES,
            backoff: Backoff {
                initial: Duration::from_millis(DEFAULT_RECONNECT_INITIAL_MS),
                max: Duration::from_millis(DEFAULT_BACKOFF_MAX_MS),
            },
        }
    }
}

/// Endpoints and policies for the route page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix joined onto every path; empty means same origin.
    pub api_base: String,
    pub route_path: String,
    pub route_info_path: String,
    pub stream_path: String,
    pub route_poll: PollPolicy,
    pub route_info_poll: PollPolicy,
    pub reconnect: ReconnectPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let poll = PollPolicy {
            interval: Duration::from_millis(DEFAULT_POLL_MS),
            backoff_max: Some(Duration::from_millis(DEFAULT_BACKOFF_MAX_MS)),
        };
        Self {
            api_base: String::new(),
            route_path: "/route".to_owned(),
            route_info_path: "/route_info".to_owned(),
            stream_path: "/data_stream".to_owned(),
            route_poll: poll,
            route_info_poll: poll,
            reconnect: ReconnectPolicy::default(),
        }
    }
}

impl ClientConfig {
    /// Full URL for `path` under the configured base.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        join_url(&self.api_base, path)
    }

    /// Apply host-provided overrides; `lookup` returns the raw value of a
    /// named setting. Unparseable values keep the default.
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(base) = lookup(META_API_BASE) {
            self.api_base = base.trim().trim_end_matches('/').to_owned();
        }
        if let Some(ms) = lookup(META_POLL_MS).and_then(|raw| raw.trim().parse::<u64>().ok())
            && let Ok(policy) = PollPolicy::new(Duration::from_millis(ms))
        {
            let backoff = Duration::from_millis(DEFAULT_BACKOFF_MAX_MS);
            self.route_poll = policy.with_backoff(backoff);
            self.route_info_poll = policy.with_backoff(backoff);
        }
        if let Some(retries) = lookup(META_STREAM_RETRIES).and_then(|raw| raw.trim().parse::<u32>().ok()) {
            self.reconnect.max_retries = retries;
        }
        self
    }

    /// Defaults overridden by `<meta name="tradeview:*" content="...">` tags.
    #[cfg(feature = "hydrate")]
    #[must_use]
    pub fn from_document() -> Self {
        let document = web_sys::window().and_then(|w| w.document());
        Self::default().with_overrides(|name| {
            let selector = format!("meta[name=\"{name}\"]");
            document
                .as_ref()?
                .query_selector(&selector)
                .ok()
                .flatten()?
                .get_attribute("content")
        })
    }
}

/// Join `path` onto `base`, tolerating a trailing slash on the base.
#[must_use]
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}
