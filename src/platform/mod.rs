//! Platform abstraction layer
//!
//! This module provides the byte transport abstraction the WiFly link runs
//! on, an adapter for `embedded-hal-nb` serial ports, and mock
//! implementations for host testing.

pub mod error;
pub mod nb_serial;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::TransportError;
pub use nb_serial::NbSerial;
pub use traits::ByteTransport;
