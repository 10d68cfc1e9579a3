//! Byte transport trait
//!
//! This module defines the single-byte serial interface that platform
//! implementations must provide. One value of this trait is one port: the
//! WiFly module link and the debug console are two independent transports.

use crate::platform::TransportError;

/// Byte-level serial transport
///
/// Platform implementations must provide non-blocking single-byte reads and
/// writes plus an input discard. Blocking and bulk operations are provided on
/// top of them.
///
/// # Safety Invariants
///
/// - UART peripheral must be initialized before use
/// - Only one owner per UART peripheral instance
/// - Each single-byte call is atomic at the byte level
pub trait ByteTransport {
    /// Read one byte without blocking
    ///
    /// Returns `nb::Error::WouldBlock` when no byte is available.
    fn read_byte(&mut self) -> nb::Result<u8, TransportError>;

    /// Write one byte without blocking
    ///
    /// Returns `nb::Error::WouldBlock` when the transmitter is busy.
    fn write_byte(&mut self, byte: u8) -> nb::Result<(), TransportError>;

    /// Discard any buffered, unread input
    fn discard_input(&mut self);

    /// Write one byte, spinning until the transmitter accepts it
    fn write_byte_blocking(&mut self, byte: u8) -> Result<(), TransportError> {
        nb::block!(self.write_byte(byte))
    }

    /// Write every byte of `data`, blocking per byte
    fn write_all(&mut self, data: &[u8]) -> Result<(), TransportError> {
        for &byte in data {
            self.write_byte_blocking(byte)?;
        }
        Ok(())
    }

    /// Read whatever is available into `buffer` without blocking
    ///
    /// Returns the number of bytes read, possibly zero.
    fn read_available(&mut self, buffer: &mut [u8]) -> Result<usize, TransportError> {
        let mut count = 0;
        while count < buffer.len() {
            match self.read_byte() {
                Ok(byte) => {
                    buffer[count] = byte;
                    count += 1;
                }
                Err(nb::Error::WouldBlock) => break,
                Err(nb::Error::Other(e)) => return Err(e),
            }
        }
        Ok(count)
    }
}

impl<T: ByteTransport + ?Sized> ByteTransport for &mut T {
    fn read_byte(&mut self) -> nb::Result<u8, TransportError> {
        (**self).read_byte()
    }

    fn write_byte(&mut self, byte: u8) -> nb::Result<(), TransportError> {
        (**self).write_byte(byte)
    }

    fn discard_input(&mut self) {
        (**self).discard_input()
    }
}
