//! Core infrastructure
//!
//! Logging macros and the lock-scoped shared state used by every WiFly link
//! component.

pub mod logging;
pub mod traits;
