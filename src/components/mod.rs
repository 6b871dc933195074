//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render one source each and take their data as signals, so the
//! page decides which source feeds which view.

pub mod data_view;
pub mod info_panel;
pub mod log_panel;
pub mod source_banner;
