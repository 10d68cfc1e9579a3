//! Transport pump
//!
//! Moves at most one byte in each direction between the module transport and
//! the [`LinkBuffer`](super::LinkBuffer). A step never blocks; transport
//! faults and busy/empty conditions are absorbed and retried on the next
//! step.

use super::WiflyContext;
use crate::core::traits::SharedState;
use crate::platform::traits::ByteTransport;
use embassy_sync::blocking_mutex::raw::RawMutex;

/// What a single pump step did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PumpActivity {
    /// A pending flush discarded transport input
    pub flushed: bool,
    /// One byte moved from the transport into the receive buffer
    pub received: bool,
    /// One byte moved from the transmit buffer to the transport
    pub transmitted: bool,
}

impl PumpActivity {
    /// Nothing moved
    pub fn is_idle(&self) -> bool {
        !(self.flushed || self.received || self.transmitted)
    }
}

impl<M: RawMutex> WiflyContext<M> {
    /// Run one pump step against the module transport
    pub fn pump_step<T: ByteTransport>(&self, transport: &mut T) -> PumpActivity {
        self.link().with_mut(|link| {
            let mut activity = PumpActivity::default();

            if link.take_flush_request() {
                transport.discard_input();
                activity.flushed = true;
            }

            if link.wants_rx() {
                match transport.read_byte() {
                    Ok(byte) => {
                        link.store_rx(byte);
                        activity.received = true;
                    }
                    Err(nb::Error::WouldBlock) => {}
                    Err(nb::Error::Other(e)) => {
                        crate::log_trace!("wifly - rx fault: {}", e);
                    }
                }
            }

            if let Some(byte) = link.pending_tx() {
                match transport.write_byte(byte) {
                    Ok(()) => {
                        link.advance_tx();
                        activity.transmitted = true;
                    }
                    Err(nb::Error::WouldBlock) => {}
                    Err(nb::Error::Other(e)) => {
                        crate::log_trace!("wifly - tx fault: {}", e);
                    }
                }
            }

            activity
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockUart;
    use crate::platform::TransportError;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    type Context = WiflyContext<NoopRawMutex>;

    #[test]
    fn test_pump_moves_one_byte_each_way() {
        let ctx = Context::new();
        ctx.link().with_mut(|link| {
            link.enable();
            link.take_flush_request();
            link.queue_transmit(b"hi");
        });
        let mut uart = MockUart::new();
        uart.inject_rx_data(b"AB");

        let activity = ctx.pump_step(&mut uart);
        assert!(activity.received && activity.transmitted && !activity.flushed);
        assert_eq!(uart.tx_buffer(), b"h");
        assert_eq!(uart.pending_rx(), 1);
        ctx.link().with(|link| assert_eq!(link.received(), b"A"));
    }

    #[test]
    fn test_pump_with_busy_empty_transport_changes_nothing() {
        let ctx = Context::new();
        ctx.link().with_mut(|link| {
            link.load_exchange(b"$$$", 5);
            link.take_flush_request();
        });
        let before = ctx.status();

        let mut uart = MockUart::new();
        uart.set_tx_busy(true);
        for _ in 0..10 {
            assert!(ctx.pump_step(&mut uart).is_idle());
        }

        assert_eq!(ctx.status(), before);
        assert!(uart.tx_buffer().is_empty());
    }

    #[test]
    fn test_pump_runs_pending_flush_first() {
        let ctx = Context::new();
        ctx.link().with_mut(|link| link.load_exchange(b"$$$", 5));
        let mut uart = MockUart::new();
        uart.inject_rx_data(b"stale");

        let activity = ctx.pump_step(&mut uart);
        assert!(activity.flushed);
        assert!(!activity.received);
        assert_eq!(uart.discard_count(), 1);
        assert_eq!(uart.pending_rx(), 0);
        ctx.link().with(|link| assert!(link.received().is_empty()));

        // Flush request is one-shot
        assert!(!ctx.pump_step(&mut uart).flushed);
    }

    #[test]
    fn test_pump_absorbs_transport_fault() {
        let ctx = Context::new();
        ctx.link().with_mut(|link| {
            link.load_exchange(b"", 3);
            link.take_flush_request();
        });
        let mut uart = MockUart::new();
        uart.inject_rx_data(b"CMD");
        uart.inject_rx_fault(TransportError::Overrun);

        assert!(!ctx.pump_step(&mut uart).received);
        for _ in 0..3 {
            assert!(ctx.pump_step(&mut uart).received);
        }
        ctx.link().with(|link| assert_eq!(link.received(), b"CMD"));
    }

    #[test]
    fn test_pump_does_not_read_past_rx_len() {
        let ctx = Context::new();
        ctx.link().with_mut(|link| {
            link.load_exchange(b"", 2);
            link.take_flush_request();
        });
        let mut uart = MockUart::new();
        uart.inject_rx_data(b"xyz");

        for _ in 0..5 {
            ctx.pump_step(&mut uart);
        }
        assert_eq!(uart.pending_rx(), 1);
        let status = ctx.status();
        assert!(status.rx_cursor <= status.rx_len);
    }
}
