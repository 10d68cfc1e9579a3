//! Core traits shared by the link components.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  ┌──────────────┐  ┌──────────────┐
//! │ Pump task    │  │ Driver task  │  │ Client tasks │
//! └──────┬───────┘  └──────┬───────┘  └──────┬───────┘
//!        │  with_mut(..)   │  with_mut(..)   │  with_mut(..)
//!        ▼                 ▼                 ▼
//! ┌──────────────────────────────────────────────────┐
//! │ SharedState<LinkBuffer>  (BlockingState<M, _>)   │
//! └──────────────────────────────────────────────────┘
//! ```

pub mod sync;

pub use sync::{BlockingState, SharedState};
