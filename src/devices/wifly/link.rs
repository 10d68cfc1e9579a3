//! Shared transmit/receive buffers
//!
//! The [`LinkBuffer`] sits between the transport pump and the driver/client
//! side. Every method is meant to be called inside a single
//! [`SharedState::with_mut`](crate::core::traits::SharedState::with_mut)
//! closure, so each call is one bounded critical section.
//!
//! # Cursors
//!
//! ```text
//! tx: [ sent .......... | pending ....... ]        tx_cursor <= tx_len <= TX_CAPACITY
//!                       ^ tx_cursor       ^ tx_len
//!
//! rx: [ received ...... | free ........... ]       rx_cursor <= RX_CAPACITY
//!                       ^ rx_cursor       ^ rx_len (bytes wanted)
//! ```

use super::{RX_CAPACITY, TX_CAPACITY};
use heapless::Vec;

/// Snapshot of the buffer cursors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStatus {
    /// Client traffic allowed
    pub enabled: bool,
    pub tx_len: usize,
    pub tx_cursor: usize,
    /// Bytes the pump is allowed to receive
    pub rx_len: usize,
    pub rx_cursor: usize,
    /// A transport flush is waiting for the pump
    pub flush_pending: bool,
}

/// Transmit and receive buffers shared with the transport pump
#[derive(Debug)]
pub struct LinkBuffer {
    tx_buf: Vec<u8, TX_CAPACITY>,
    tx_cursor: usize,
    rx_buf: Vec<u8, RX_CAPACITY>,
    rx_len: usize,
    enabled: bool,
    flush_requested: bool,
}

impl LinkBuffer {
    /// Empty buffers, link disabled
    pub const fn new() -> Self {
        Self {
            tx_buf: Vec::new(),
            tx_cursor: 0,
            rx_buf: Vec::new(),
            rx_len: 0,
            enabled: false,
            flush_requested: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn status(&self) -> LinkStatus {
        LinkStatus {
            enabled: self.enabled,
            tx_len: self.tx_buf.len(),
            tx_cursor: self.tx_cursor,
            rx_len: self.rx_len,
            rx_cursor: self.rx_buf.len(),
            flush_pending: self.flush_requested,
        }
    }

    /// Close the link to client traffic and stop receiving
    pub fn disable(&mut self) {
        self.enabled = false;
        self.rx_len = 0;
    }

    /// Open the link and restart the receive side
    ///
    /// Drops received bytes, lets the receive side free-run and requests a
    /// transport flush every time. Returns `true` if the link was closed.
    pub fn enable(&mut self) -> bool {
        let opened = !self.enabled;
        self.enabled = true;
        self.rx_buf.clear();
        self.rx_len = RX_CAPACITY;
        self.flush_requested = true;
        opened
    }

    /// Drop received bytes, stop receiving and request a transport flush
    pub fn flush_rx(&mut self) {
        self.rx_buf.clear();
        self.rx_len = 0;
        self.flush_requested = true;
    }

    /// Drop received bytes but keep receiving
    pub fn discard_received(&mut self) {
        self.rx_buf.clear();
        self.flush_requested = true;
    }

    /// Queue one command/response exchange
    ///
    /// Requests a transport flush, replaces the transmit buffer with
    /// `command` and arms the receive side for `expect_len` bytes.
    pub fn load_exchange(&mut self, command: &[u8], expect_len: usize) {
        self.flush_requested = true;
        self.replace_tx(command);
        self.rx_buf.clear();
        self.rx_len = expect_len.min(RX_CAPACITY);
    }

    /// Replace any pending transmit data
    ///
    /// At most [`TX_CAPACITY`] bytes are taken; returns the accepted count.
    pub fn queue_transmit(&mut self, data: &[u8]) -> usize {
        self.replace_tx(data)
    }

    fn replace_tx(&mut self, data: &[u8]) -> usize {
        let accepted = data.len().min(TX_CAPACITY);
        self.tx_buf.clear();
        // Cannot fail: `accepted` is within capacity
        let _ = self.tx_buf.extend_from_slice(&data[..accepted]);
        self.tx_cursor = 0;
        accepted
    }

    /// Bytes received so far
    pub fn received(&self) -> &[u8] {
        &self.rx_buf
    }

    /// Whether exactly `expect` has been received
    pub fn response_matches(&self, expect: &[u8]) -> bool {
        self.rx_buf.len() == self.rx_len && self.received() == expect
    }

    /// Move the first `out.len()` received bytes into `out`
    ///
    /// Remaining bytes are shifted to the front in arrival order. Returns
    /// `false` and leaves the buffer untouched if fewer bytes are buffered.
    pub fn consume(&mut self, out: &mut [u8]) -> bool {
        let n = out.len();
        let available = self.rx_buf.len();
        if available < n {
            return false;
        }
        out.copy_from_slice(&self.rx_buf[..n]);
        self.rx_buf.copy_within(n.., 0);
        self.rx_buf.truncate(available - n);
        true
    }

    /// Whether the pump should read another byte
    pub(super) fn wants_rx(&self) -> bool {
        self.rx_buf.len() < self.rx_len
    }

    pub(super) fn store_rx(&mut self, byte: u8) {
        if self.wants_rx() {
            // Cannot fail: rx_len never exceeds capacity
            let _ = self.rx_buf.push(byte);
        }
    }

    /// Next byte waiting for the transmitter
    pub(super) fn pending_tx(&self) -> Option<u8> {
        self.tx_buf.get(self.tx_cursor).copied()
    }

    pub(super) fn advance_tx(&mut self) {
        if self.tx_cursor < self.tx_buf.len() {
            self.tx_cursor += 1;
        }
    }

    pub(super) fn take_flush_request(&mut self) -> bool {
        core::mem::replace(&mut self.flush_requested, false)
    }
}

impl Default for LinkBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled_with(data: &[u8]) -> LinkBuffer {
        let mut link = LinkBuffer::new();
        link.enable();
        for &byte in data {
            link.store_rx(byte);
        }
        link
    }

    #[test]
    fn test_new_is_disabled_and_empty() {
        let link = LinkBuffer::new();
        assert_eq!(
            link.status(),
            LinkStatus {
                enabled: false,
                tx_len: 0,
                tx_cursor: 0,
                rx_len: 0,
                rx_cursor: 0,
                flush_pending: false,
            }
        );
    }

    #[test]
    fn test_enable_free_runs_receive() {
        let mut link = LinkBuffer::new();
        assert!(link.enable());

        let status = link.status();
        assert!(status.enabled);
        assert_eq!(status.rx_len, RX_CAPACITY);
        assert!(status.flush_pending);
    }

    #[test]
    fn test_enable_again_restarts_receive() {
        let mut link = enabled_with(b"stale");
        link.take_flush_request();

        assert!(!link.enable());
        assert!(link.is_enabled());
        assert!(link.received().is_empty());
        let status = link.status();
        assert_eq!(status.rx_cursor, 0);
        assert_eq!(status.rx_len, RX_CAPACITY);
        assert!(status.flush_pending);
    }

    #[test]
    fn test_disable_stops_receive() {
        let mut link = enabled_with(b"ab");
        link.disable();

        assert!(!link.is_enabled());
        assert_eq!(link.status().rx_len, 0);
        assert!(!link.wants_rx());
    }

    #[test]
    fn test_consume_compacts_in_order() {
        let mut link = enabled_with(b"ABCDE");
        let mut out = [0u8; 2];

        assert!(link.consume(&mut out));
        assert_eq!(&out, b"AB");
        assert_eq!(link.received(), b"CDE");
        assert_eq!(link.status().rx_cursor, 3);
    }

    #[test]
    fn test_consume_short_buffer_is_untouched() {
        let mut link = enabled_with(b"AB");
        let mut out = [0u8; 3];

        assert!(!link.consume(&mut out));
        assert_eq!(link.received(), b"AB");
    }

    #[test]
    fn test_load_exchange() {
        let mut link = enabled_with(b"stale");
        link.take_flush_request();
        link.load_exchange(b"$$$", 5);

        let status = link.status();
        assert_eq!(status.tx_len, 3);
        assert_eq!(status.tx_cursor, 0);
        assert_eq!(status.rx_len, 5);
        assert_eq!(status.rx_cursor, 0);
        assert!(status.flush_pending);
        assert_eq!(link.pending_tx(), Some(b'$'));
    }

    #[test]
    fn test_response_matches_requires_exact_length() {
        let mut link = LinkBuffer::new();
        link.load_exchange(b"exit\r", 6);
        for &byte in b"EXIT\r" {
            link.store_rx(byte);
        }
        assert!(!link.response_matches(b"EXIT\r\n"));

        link.store_rx(b'\n');
        assert!(link.response_matches(b"EXIT\r\n"));
        assert!(!link.response_matches(b"AOK\r\n\0"));
    }

    #[test]
    fn test_empty_expectation_matches() {
        let mut link = LinkBuffer::new();
        link.load_exchange(b"", 0);
        assert!(link.response_matches(b""));
    }

    #[test]
    fn test_receive_stops_at_rx_len() {
        let mut link = LinkBuffer::new();
        link.load_exchange(b"", 2);
        for &byte in b"xyz" {
            link.store_rx(byte);
        }
        assert_eq!(link.received(), b"xy");
    }

    #[test]
    fn test_queue_transmit_truncates_to_capacity() {
        let mut link = LinkBuffer::new();
        let data = [0x55u8; TX_CAPACITY + 10];

        assert_eq!(link.queue_transmit(&data), TX_CAPACITY);
        assert_eq!(link.status().tx_len, TX_CAPACITY);
    }

    #[test]
    fn test_transmit_cursor_advances_to_len() {
        let mut link = LinkBuffer::new();
        link.queue_transmit(b"hi");

        assert_eq!(link.pending_tx(), Some(b'h'));
        link.advance_tx();
        assert_eq!(link.pending_tx(), Some(b'i'));
        link.advance_tx();
        assert_eq!(link.pending_tx(), None);
        link.advance_tx();
        assert_eq!(link.status().tx_cursor, 2);
    }

    #[test]
    fn test_flush_rx() {
        let mut link = enabled_with(b"junk");
        link.take_flush_request();
        link.flush_rx();

        assert!(link.received().is_empty());
        assert_eq!(link.status().rx_len, 0);
        assert!(link.take_flush_request());
        assert!(!link.take_flush_request());
    }

    #[test]
    fn test_discard_received_keeps_receiving() {
        let mut link = enabled_with(b"junk");
        link.discard_received();

        assert!(link.received().is_empty());
        assert!(link.wants_rx());
        assert!(link.status().flush_pending);
    }
}
