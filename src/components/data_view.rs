//! Route list with keyed enter/exit transitions.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every route snapshot is reconciled into a [`TransitionList`]; rows are
//! keyed by their render instance so reordering moves existing rows and
//! value changes update them in place. Clicking an action's item label
//! asks the backend to open its market window.

#[cfg(test)]
#[path = "data_view_test.rs"]
mod data_view_test;

use leptos::prelude::*;

use crate::net::dispatch::ActionDispatcher;
use crate::net::types::{Action, ActionKind, Location, LocationId, TargetId};
use crate::state::transitions::{Phase, TransitionList};
use crate::util::format::{format_price, format_quantity};

type Rows = RwSignal<TransitionList<LocationId, Location>>;

#[component]
pub fn DataView(#[prop(into)] locations: Signal<Vec<Location>>) -> impl IntoView {
    let rows: Rows = RwSignal::new(TransitionList::default());
    let settling = StoredValue::new(false);

    Effect::new(move || {
        let snapshot = locations.get();
        let now = now_ms();
        rows.update(|list| list.reconcile(snapshot, |loc| loc.id.clone(), now));
        schedule_settle(rows, settling);
    });

    let instances = move || rows.with(|list| list.entries().iter().map(|e| e.instance).collect::<Vec<_>>());

    view! {
        <div class="data-view">
            <For each=instances key=|instance| *instance let:instance>
                <LocationRow rows=rows instance=instance />
            </For>
        </div>
    }
}

#[component]
fn LocationRow(rows: Rows, instance: u64) -> impl IntoView {
    let dispatcher = expect_context::<ActionDispatcher>();

    // Separate memos so a phase change restyles the row without rebuilding
    // its buttons, and an unchanged poll rebuilds nothing.
    let location = Memo::new(move |_| rows.with(|list| list.by_instance(instance).map(|e| e.item.clone())));
    let presence =
        Memo::new(move |_| rows.with(|list| list.by_instance(instance).map(|e| (e.phase, list.is_primary(e)))));
    let class = move || match presence.get() {
        Some((phase, primary)) => row_class(phase, primary),
        None => row_class(Phase::Exiting, false),
    };

    view! {
        <div class=class>
            {move || {
                location.get().map(|location| {
                    let dispatcher = dispatcher.clone();
                    view! {
                        <div class="data-view__header">
                            <span class="data-view__kind">{location.kind.label()}</span>
                            <span class="data-view__label">{location.label.clone()}</span>
                        </div>
                        <ul class="data-view__actions">
                            {action_rows(&location)
                                .into_iter()
                                .map(|row| action_row(row, dispatcher.clone()))
                                .collect_view()}
                        </ul>
                    }
                })
            }}
        </div>
    }
}

/// Display fields of one action plus the target its item label dispatches.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionRow {
    pub kind: ActionKind,
    pub item: String,
    pub quantity: String,
    pub price: String,
    pub target: TargetId,
}

impl ActionRow {
    #[must_use]
    pub fn of(action: &Action) -> Self {
        Self {
            kind: action.kind,
            item: action.item.clone(),
            quantity: format_quantity(action.quantity),
            price: format_price(action.price),
            target: action.target.clone(),
        }
    }
}

/// Action rows of `location` in payload order.
#[must_use]
pub fn action_rows(location: &Location) -> Vec<ActionRow> {
    location.actions.iter().map(ActionRow::of).collect()
}

fn action_row(row: ActionRow, dispatcher: ActionDispatcher) -> impl IntoView {
    let ActionRow { kind, item, quantity, price, target } = row;
    let on_click = move |_| dispatcher.fire(target.clone());

    view! {
        <li class=format!("data-view__action data-view__action--{}", kind.label())>
            <span class="data-view__icon">{kind.icon()}</span>
            <button class="data-view__item" on:click=on_click>{item}</button>
            <span class="data-view__quantity">{quantity}</span>
            <span class="data-view__price">{price}</span>
        </li>
    }
}

fn row_class(phase: Phase, primary: bool) -> String {
    let mut class = format!("data-view__row data-view__row--{}", phase.class());
    if primary {
        class.push_str(" data-view__row--primary");
    }
    class
}

fn now_ms() -> f64 {
    #[cfg(feature = "hydrate")]
    {
        js_sys::Date::now()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        0.0
    }
}

/// Keep one timer running while any row is mid-transition.
fn schedule_settle(rows: Rows, settling: StoredValue<bool>) {
    #[cfg(feature = "hydrate")]
    {
        if settling.try_get_value().unwrap_or(true) {
            return;
        }
        settling.set_value(true);
        leptos::task::spawn_local(async move {
            loop {
                let Some(Some(deadline)) = rows.try_with_untracked(TransitionList::next_deadline) else {
                    break;
                };
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let wait_ms = (deadline - now_ms()).max(0.0).ceil() as u64;
                gloo_timers::future::sleep(std::time::Duration::from_millis(wait_ms)).await;
                if rows.try_update(|list| list.settle(now_ms())).is_none() {
                    return;
                }
            }
            let _ = settling.try_set_value(false);
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (rows, settling);
    }
}
