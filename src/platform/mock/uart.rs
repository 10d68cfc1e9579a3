//! Mock UART implementation for testing

use crate::platform::{traits::ByteTransport, TransportError};
use std::collections::VecDeque;
use std::vec::Vec;

/// Mock UART implementation
///
/// Provides in-memory queues for transmit and receive data, allowing unit
/// tests to verify byte transport operations without hardware.
///
/// # Example
///
/// ```ignore
/// use wifly_link::platform::mock::MockUart;
/// use wifly_link::platform::traits::ByteTransport;
///
/// let mut uart = MockUart::new();
///
/// // Write data
/// uart.write_all(b"Hello").unwrap();
///
/// // Verify transmitted data
/// assert_eq!(uart.tx_buffer(), b"Hello");
///
/// // Inject received data for testing
/// uart.inject_rx_data(b"W");
/// assert_eq!(uart.read_byte(), Ok(b'W'));
/// ```
#[derive(Debug, Default)]
pub struct MockUart {
    rx_queue: VecDeque<u8>,
    tx_buffer: Vec<u8>,
    tx_busy: bool,
    rx_fault: Option<TransportError>,
    tx_fault: Option<TransportError>,
    discard_count: usize,
}

impl MockUart {
    /// Create a new mock UART
    pub fn new() -> Self {
        Self::default()
    }

    /// Get transmitted data (for test verification)
    pub fn tx_buffer(&self) -> &[u8] {
        &self.tx_buffer
    }

    /// Clear transmit buffer
    pub fn clear_tx_buffer(&mut self) {
        self.tx_buffer.clear();
    }

    /// Inject receive data (for test setup)
    pub fn inject_rx_data(&mut self, data: &[u8]) {
        self.rx_queue.extend(data.iter().copied());
    }

    /// Make the next read fail with `error`
    pub fn inject_rx_fault(&mut self, error: TransportError) {
        self.rx_fault = Some(error);
    }

    /// Make the next write fail with `error`
    pub fn inject_tx_fault(&mut self, error: TransportError) {
        self.tx_fault = Some(error);
    }

    /// Simulate a transmitter that never becomes ready
    pub fn set_tx_busy(&mut self, busy: bool) {
        self.tx_busy = busy;
    }

    /// Number of bytes waiting to be read
    pub fn pending_rx(&self) -> usize {
        self.rx_queue.len()
    }

    /// Number of `discard_input` calls so far
    pub fn discard_count(&self) -> usize {
        self.discard_count
    }
}

impl ByteTransport for MockUart {
    fn read_byte(&mut self) -> nb::Result<u8, TransportError> {
        if let Some(fault) = self.rx_fault.take() {
            return Err(nb::Error::Other(fault));
        }
        self.rx_queue.pop_front().ok_or(nb::Error::WouldBlock)
    }

    fn write_byte(&mut self, byte: u8) -> nb::Result<(), TransportError> {
        if self.tx_busy {
            return Err(nb::Error::WouldBlock);
        }
        if let Some(fault) = self.tx_fault.take() {
            return Err(nb::Error::Other(fault));
        }
        self.tx_buffer.push(byte);
        Ok(())
    }

    fn discard_input(&mut self) {
        self.rx_queue.clear();
        self.discard_count += 1;
    }
}
