//! `embedded-hal-nb` serial adapter
//!
//! Wraps any HAL serial port implementing `embedded_hal_nb::serial::{Read, Write}`
//! so it can be used as a [`ByteTransport`]. This is how a concrete board UART
//! (e.g. an embassy-rp or rp2040-hal blocking UART) is handed to the pump.
//!
//! # Example
//!
//! ```ignore
//! use wifly_link::platform::NbSerial;
//!
//! let uart = hal::uart::UartPeripheral::new(/* ... */);
//! let mut module_port = NbSerial::new(uart);
//! ```

use crate::platform::{traits::ByteTransport, TransportError};
use embedded_hal_nb::serial::{Read, Write};

/// Upper bound on bytes dropped by a single `discard_input` call
///
/// Keeps the call bounded when the peer keeps transmitting.
const DISCARD_LIMIT: usize = 256;

/// Adapter from an `embedded-hal-nb` serial port to [`ByteTransport`]
#[derive(Debug)]
pub struct NbSerial<T> {
    inner: T,
}

impl<T> NbSerial<T> {
    /// Wrap a HAL serial port
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Give back the wrapped serial port
    pub fn release(self) -> T {
        self.inner
    }
}

fn map_err<E: embedded_hal_nb::serial::Error>(err: nb::Error<E>) -> nb::Error<TransportError> {
    match err {
        nb::Error::WouldBlock => nb::Error::WouldBlock,
        nb::Error::Other(e) => nb::Error::Other(TransportError::from(e.kind())),
    }
}

impl<T> ByteTransport for NbSerial<T>
where
    T: Read<u8> + Write<u8>,
{
    fn read_byte(&mut self) -> nb::Result<u8, TransportError> {
        self.inner.read().map_err(map_err)
    }

    fn write_byte(&mut self, byte: u8) -> nb::Result<(), TransportError> {
        self.inner.write(byte).map_err(map_err)
    }

    fn discard_input(&mut self) {
        for _ in 0..DISCARD_LIMIT {
            match self.inner.read() {
                Ok(_) => continue,
                // Faults while draining are ignored
                Err(nb::Error::Other(_)) => continue,
                Err(nb::Error::WouldBlock) => break,
            }
        }
    }
}
