//! Platform abstraction traits
//!
//! This module defines the traits that platform implementations must provide.
//! The reset line and delays use the `embedded-hal` / `embedded-hal-async`
//! traits directly (`OutputPin`, `DelayNs`).

pub mod uart;

// Re-export trait interfaces
pub use uart::ByteTransport;
