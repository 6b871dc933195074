//! Network layer for the route client.
//!
//! SYSTEM CONTEXT
//! ==============
//! `polling` and `stream` keep sources fresh, `dispatch` sends user
//! commands, and `api` is the single seam over HTTP so every driver can be
//! exercised natively with fakes.

pub mod api;
pub mod dispatch;
pub mod error;
pub mod polling;
pub mod stream;
pub mod types;
