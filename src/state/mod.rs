//! Client-side state.
//!
//! SYSTEM CONTEXT
//! ==============
//! `source` holds the subscription state machine shared by every data
//! source; `transitions` tracks keyed rows for animated list rendering.

pub mod source;
pub mod transitions;
