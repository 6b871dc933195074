//! Keyed transition list behind the route view.
//!
//! DESIGN
//! ======
//! Each snapshot is reconciled against the previous one by key. A key that
//! survives keeps its render instance, so reordering moves rows instead of
//! recreating them. New keys enter, missing keys exit; exiting rows stay in
//! the list (anchored after the row that preceded them) until their
//! transition finishes. Data is applied immediately; only presence is
//! animated.

#[cfg(test)]
#[path = "transitions_test.rs"]
mod transitions_test;

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Length of enter and exit transitions.
pub const TRANSITION_MS: f64 = 500.0;

/// Presence phase of one rendered row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Entering,
    Visible,
    Exiting,
}

impl Phase {
    /// CSS modifier for the row.
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Entering => "entering",
            Self::Visible => "visible",
            Self::Exiting => "exiting",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TransitionEntry<K, T> {
    pub key: K,
    /// Render identity; stable for as long as the key stays in the list.
    pub instance: u64,
    /// Latest value seen for the key.
    pub item: T,
    pub phase: Phase,
    /// Time the current phase started, in milliseconds.
    pub since_ms: f64,
}

/// Rows currently on screen, including ones still exiting.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionList<K, T> {
    entries: Vec<TransitionEntry<K, T>>,
    primary: Option<K>,
    next_instance: u64,
    duration_ms: f64,
}

impl<K, T> Default for TransitionList<K, T> {
    fn default() -> Self {
        Self::with_duration(TRANSITION_MS)
    }
}

impl<K, T> TransitionList<K, T> {
    #[must_use]
    pub fn with_duration(duration_ms: f64) -> Self {
        Self { entries: Vec::new(), primary: None, next_instance: 1, duration_ms }
    }

    #[must_use]
    pub fn entries(&self) -> &[TransitionEntry<K, T>] {
        &self.entries
    }

    #[must_use]
    pub fn by_instance(&self, instance: u64) -> Option<&TransitionEntry<K, T>> {
        self.entries.iter().find(|e| e.instance == instance)
    }

    /// Earliest time a phase change is due, if any row is mid-transition.
    #[must_use]
    pub fn next_deadline(&self) -> Option<f64> {
        self.entries
            .iter()
            .filter(|e| e.phase != Phase::Visible)
            .map(|e| e.since_ms + self.duration_ms)
            .min_by(f64::total_cmp)
    }

    /// Finish transitions that are due at `now_ms`. Returns true if anything
    /// changed.
    pub fn settle(&mut self, now_ms: f64) -> bool {
        let duration = self.duration_ms;
        let before = self.entries.len();
        self.entries
            .retain(|e| !(e.phase == Phase::Exiting && now_ms - e.since_ms >= duration));
        let mut changed = self.entries.len() != before;
        for entry in &mut self.entries {
            if entry.phase == Phase::Entering && now_ms - entry.since_ms >= duration {
                entry.phase = Phase::Visible;
                entry.since_ms = now_ms;
                changed = true;
            }
        }
        changed
    }
}

impl<K: Clone + Eq + Hash + std::fmt::Debug, T> TransitionList<K, T> {
    /// True if `entry` is the first row of the current snapshot.
    #[must_use]
    pub fn is_primary(&self, entry: &TransitionEntry<K, T>) -> bool {
        entry.phase != Phase::Exiting && self.primary.as_ref() == Some(&entry.key)
    }

    /// Reconcile against a new snapshot taken at `now_ms`.
    ///
    /// Only the first occurrence of a duplicated key is kept.
    pub fn reconcile(&mut self, items: impl IntoIterator<Item = T>, key_of: impl Fn(&T) -> K, now_ms: f64) {
        let mut incoming: Vec<(K, T)> = Vec::new();
        let mut seen = HashSet::new();
        for item in items {
            let key = key_of(&item);
            if seen.insert(key.clone()) {
                incoming.push((key, item));
            } else {
                leptos::logging::warn!("duplicate row key {key:?} dropped");
            }
        }

        let mut previous: HashMap<K, TransitionEntry<K, T>> = HashMap::new();
        // Exiting rows grouped by the surviving key they follow; `None` leads.
        let mut trailing: HashMap<Option<K>, Vec<TransitionEntry<K, T>>> = HashMap::new();
        let mut anchor: Option<K> = None;
        for entry in std::mem::take(&mut self.entries) {
            if seen.contains(&entry.key) {
                anchor = Some(entry.key.clone());
                previous.insert(entry.key.clone(), entry);
            } else {
                let entry = match entry.phase {
                    Phase::Exiting => entry,
                    _ => TransitionEntry { phase: Phase::Exiting, since_ms: now_ms, ..entry },
                };
                trailing.entry(anchor.clone()).or_default().push(entry);
            }
        }

        self.primary = incoming.first().map(|(key, _)| key.clone());
        let mut entries = trailing.remove(&None).unwrap_or_default();
        for (key, item) in incoming {
            let entry = match previous.remove(&key) {
                Some(old) if old.phase == Phase::Exiting => {
                    TransitionEntry { key: key.clone(), instance: old.instance, item, phase: Phase::Entering, since_ms: now_ms }
                }
                Some(old) => TransitionEntry { key: key.clone(), item, ..old },
                None => {
                    let instance = self.next_instance;
                    self.next_instance += 1;
                    TransitionEntry { key: key.clone(), instance, item, phase: Phase::Entering, since_ms: now_ms }
                }
            };
            entries.push(entry);
            if let Some(group) = trailing.remove(&Some(key)) {
                entries.extend(group);
            }
        }
        self.entries = entries;
    }
}
