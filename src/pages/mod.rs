//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (starting and stopping sources)
//! and delegates rendering details to `components`.

pub mod route;
