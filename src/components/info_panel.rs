//! Route summary panel.
//!
//! SYSTEM CONTEXT
//! ==============
//! Shows the aggregate figures of the current route snapshot. All
//! arithmetic lives in [`InfoFigures::derive`] so it can be checked
//! without a browser.

#[cfg(test)]
#[path = "info_panel_test.rs"]
mod info_panel_test;

use leptos::prelude::*;

use crate::net::types::RouteInfo;
use crate::util::format::{format_duration, format_grouped, format_percent};

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Display strings derived from one [`RouteInfo`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InfoFigures {
    pub profit_per_hour: String,
    pub risk_percent: String,
    pub risk_cost: String,
    pub capital: String,
    pub transport_time: String,
    pub gross_profit: String,
    pub net_profit: String,
}

impl InfoFigures {
    #[must_use]
    pub fn derive(info: &RouteInfo) -> Self {
        Self {
            profit_per_hour: format_grouped(info.profit_rate * SECONDS_PER_HOUR),
            risk_percent: format_percent(info.risk),
            risk_cost: format_grouped(info.risk * info.capital),
            capital: format_grouped(info.capital),
            transport_time: format_duration(info.transport_time),
            gross_profit: format_grouped(info.gross_profit),
            net_profit: format_grouped(info.net_profit),
        }
    }

    /// Panel lines in display order.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("Profit rate: {} ISK/h", self.profit_per_hour),
            format!("Risk: {} ({} ISK)", self.risk_percent, self.risk_cost),
            format!("Capital: {} ISK", self.capital),
            format!("Transport time: {}", self.transport_time),
            format!("Gross profit: {} ISK", self.gross_profit),
            format!("Net profit: {} ISK", self.net_profit),
        ]
    }
}

/// Summary of the route snapshot, or a placeholder before one exists.
#[component]
pub fn InfoPanel(#[prop(into)] info: Signal<Option<RouteInfo>>) -> impl IntoView {
    let lines = move || info.get().map(|i| InfoFigures::derive(&i).lines());

    view! {
        <div class="info-panel">
            {move || match lines() {
                Some(lines) => lines
                    .into_iter()
                    .map(|line| view! { <p class="info-panel__line">{line}</p> })
                    .collect_view()
                    .into_any(),
                None => view! { <p class="info-panel__empty">"No route"</p> }.into_any(),
            }}
        </div>
    }
}
