//! Shared degraded-state banner for data sources.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every view shows the same three degraded states: nothing has arrived
//! yet, the latest cycle failed (last good data stays visible), or the
//! stream gave up reconnecting.

#[cfg(test)]
#[path = "source_banner_test.rs"]
mod source_banner_test;

use leptos::prelude::*;

use crate::state::source::{SourceState, SourceStatus, SourceView};

/// What the banner shows for one source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Banner {
    Loading,
    Error(String),
    GaveUp(String),
}

impl Banner {
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Loading => "Loading…".to_owned(),
            Self::Error(err) => err.clone(),
            Self::GaveUp(err) => format!("Live updates stopped: {err}"),
        }
    }

    fn class(&self) -> &'static str {
        match self {
            Self::Loading => "source-banner source-banner--loading",
            Self::Error(_) => "source-banner source-banner--error",
            Self::GaveUp(_) => "source-banner source-banner--stopped",
        }
    }
}

/// Banner for `state`, or `None` when the data is current.
#[must_use]
pub fn banner_for<T>(state: &SourceState<T>) -> Option<Banner> {
    if state.status == SourceStatus::GaveUp {
        return Some(Banner::GaveUp(state.error.clone().unwrap_or_default()));
    }
    match state.view() {
        SourceView::Loading if state.status == SourceStatus::Stopped => None,
        SourceView::Loading => Some(Banner::Loading),
        SourceView::Ready { error, .. } => error.map(|e| Banner::Error(e.to_owned())),
        SourceView::Failed(error) => Some(Banner::Error(error.to_owned())),
    }
}

#[component]
pub fn SourceBanner(#[prop(into)] banner: Signal<Option<Banner>>) -> impl IntoView {
    move || {
        banner.get().map(|b| {
            view! { <div class=b.class() role="status">{b.text()}</div> }
        })
    }
}
