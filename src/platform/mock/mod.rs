//! Mock platform implementation for testing
//!
//! This module provides mock implementations of the platform traits that can
//! be used for unit testing without requiring actual hardware.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled
//!
//! # Example
//!
//! ```ignore
//! use wifly_link::platform::mock::MockUart;
//! use wifly_link::platform::traits::ByteTransport;
//!
//! let mut uart = MockUart::new();
//! uart.write_all(b"test").unwrap();
//! assert_eq!(uart.tx_buffer(), b"test");
//! ```

#![cfg(any(test, feature = "mock"))]

mod gpio;
mod timer;
mod uart;
mod wifly;

pub use gpio::MockResetPin;
pub use timer::MockDelay;
pub use uart::MockUart;
pub use wifly::MockWiflyModule;
