//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pure formatting kept apart from components so it can be tested natively.

pub mod format;
