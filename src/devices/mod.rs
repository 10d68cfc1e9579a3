//! Device drivers
//!
//! Drivers written against the platform abstraction traits, so they run
//! unchanged on target and against the mock platform.
//!
//! ## Modules
//!
//! - `wifly`: WiFly RN-XV radio bring-up and UART relay

pub mod wifly;
