//! Activity log panel fed by the data stream.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each stream message carries the whole log, so the panel re-renders the
//! tail it is given and pins the scroll position to the newest line after
//! every update.

#[cfg(test)]
#[path = "log_panel_test.rs"]
mod log_panel_test;

use std::collections::HashMap;

use leptos::prelude::*;

use crate::net::types::LogLine;

/// Maximum number of lines rendered at once; older lines are summarized.
pub const LOG_RENDER_CAP: usize = 500;

/// Renderable tail of a log.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LogWindow {
    /// Lines dropped from the front to respect [`LOG_RENDER_CAP`].
    pub hidden: usize,
    /// `(render key, text)` in caller order. Position keys shift when the
    /// backend trims its log, so rows are keyed by both parts. A backend id
    /// repeated within one log gets a `#n` suffix to keep keys unique.
    pub rows: Vec<(String, String)>,
}

impl LogWindow {
    #[must_use]
    pub fn of(lines: &[LogLine], cap: usize) -> Self {
        let hidden = lines.len().saturating_sub(cap);
        let mut repeats: HashMap<String, usize> = HashMap::new();
        let rows = lines
            .iter()
            .enumerate()
            .skip(hidden)
            .map(|(pos, line)| {
                let key = line.render_key(pos);
                let seen = repeats.entry(key.clone()).or_insert(0);
                *seen += 1;
                let key = if *seen == 1 { key } else { format!("{key}#{seen}") };
                (key, line.text().to_owned())
            })
            .collect();
        Self { hidden, rows }
    }
}

#[component]
pub fn LogPanel(#[prop(into)] lines: Signal<Vec<LogLine>>) -> impl IntoView {
    let window = Memo::new(move |_| lines.with(|l| LogWindow::of(l, LOG_RENDER_CAP)));
    let list_ref = NodeRef::<leptos::html::Div>::new();

    Effect::new(move || {
        let _ = window.with(|w| w.rows.len());

        #[cfg(feature = "hydrate")]
        {
            if let Some(el) = list_ref.get() {
                let scroll_height = el.scroll_height();
                el.set_scroll_top(scroll_height);
            }
        }
    });

    view! {
        <div class="log-panel" node_ref=list_ref>
            <Show when=move || window.with(|w| w.hidden > 0)>
                <div class="log-panel__hidden">
                    {move || format!("{} earlier lines not shown", window.with(|w| w.hidden))}
                </div>
            </Show>
            <For
                each=move || window.get().rows
                key=|row| row.clone()
                children=move |(_, text)| view! { <div class="log-panel__line">{text}</div> }
            />
        </div>
    }
}
