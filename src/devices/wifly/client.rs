//! Client API for upper-layer traffic
//!
//! Available once the driver reaches the idle state and opens the link.
//! Until then every call fails with [`WiflyError::LinkNotReady`], which
//! callers are expected to retry.

use super::link::LinkStatus;
use super::{WiflyContext, RX_CAPACITY};
use crate::core::traits::SharedState;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;

/// Client API errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WiflyError {
    /// Provisioning has not finished, or the link was closed for a restart
    LinkNotReady,
    /// More bytes requested than the receive buffer can ever hold
    RequestTooLarge,
}

impl core::fmt::Display for WiflyError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            WiflyError::LinkNotReady => write!(f, "link not ready"),
            WiflyError::RequestTooLarge => {
                write!(f, "request exceeds {} byte receive buffer", RX_CAPACITY)
            }
        }
    }
}

impl<M: RawMutex> WiflyContext<M> {
    /// Whether client traffic is currently allowed
    pub fn is_ready(&self) -> bool {
        self.link().with(|link| link.is_enabled())
    }

    /// Cursor snapshot for diagnostics
    pub fn status(&self) -> LinkStatus {
        self.link().with(|link| link.status())
    }

    /// Queue `data` for transmission
    ///
    /// Replaces anything the pump has not sent yet and returns immediately.
    /// At most [`TX_CAPACITY`](super::TX_CAPACITY) bytes are accepted; the
    /// accepted count is returned.
    pub fn transmit(&self, data: &[u8]) -> Result<usize, WiflyError> {
        self.link().with_mut(|link| {
            if !link.is_enabled() {
                return Err(WiflyError::LinkNotReady);
            }
            Ok(link.queue_transmit(data))
        })
    }

    /// Fill `buf` with the next received bytes
    ///
    /// Sleeps and rechecks until `buf.len()` bytes are buffered. There is no
    /// timeout. If the link is closed (before or during the wait) this sleeps
    /// one backoff interval and fails with [`WiflyError::LinkNotReady`].
    pub async fn receive<D: DelayNs>(
        &self,
        buf: &mut [u8],
        delay: &mut D,
    ) -> Result<usize, WiflyError> {
        if buf.len() > RX_CAPACITY {
            return Err(WiflyError::RequestTooLarge);
        }

        loop {
            let done = self.link().with_mut(|link| {
                if !link.is_enabled() {
                    return Err(WiflyError::LinkNotReady);
                }
                Ok(link.consume(buf))
            });

            match done {
                Ok(true) => return Ok(buf.len()),
                Ok(false) => delay.delay_ms(self.receive_backoff_ms()).await,
                Err(e) => {
                    delay.delay_ms(self.receive_backoff_ms()).await;
                    return Err(e);
                }
            }
        }
    }

    /// Discard everything received so far
    pub fn flush_received(&self) -> Result<(), WiflyError> {
        self.link().with_mut(|link| {
            if !link.is_enabled() {
                return Err(WiflyError::LinkNotReady);
            }
            link.discard_received();
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::{MockDelay, MockUart};
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    type Context = WiflyContext<NoopRawMutex>;

    fn open(ctx: &Context, received: &[u8]) {
        ctx.link().with_mut(|link| {
            link.enable();
            for &byte in received {
                link.store_rx(byte);
            }
        });
    }

    #[test]
    fn test_transmit_requires_link() {
        let ctx = Context::new();
        assert_eq!(ctx.transmit(b"hello"), Err(WiflyError::LinkNotReady));
        assert_eq!(ctx.status().tx_len, 0);
    }

    #[test]
    fn test_transmit_replaces_pending_data() {
        let ctx = Context::new();
        open(&ctx, b"");

        assert_eq!(ctx.transmit(b"first"), Ok(5));
        assert_eq!(ctx.transmit(b"second!"), Ok(7));
        let status = ctx.status();
        assert_eq!(status.tx_len, 7);
        assert_eq!(status.tx_cursor, 0);
    }

    #[test]
    fn test_transmit_drains_through_pump() {
        let ctx = Context::new();
        open(&ctx, b"");
        let mut uart = MockUart::new();

        ctx.transmit(b"ping").unwrap();
        for _ in 0..4 {
            ctx.pump_step(&mut uart);
        }
        assert_eq!(uart.tx_buffer(), b"ping");
        let status = ctx.status();
        assert_eq!(status.tx_cursor, status.tx_len);
    }

    #[tokio::test]
    async fn test_receive_not_ready_backs_off() {
        let ctx = Context::new();
        let mut delay = MockDelay::new();
        let mut buf = [0u8; 4];

        assert_eq!(
            ctx.receive(&mut buf, &mut delay).await,
            Err(WiflyError::LinkNotReady)
        );
        assert_eq!(delay.sleeps_ms(), &[100]);
    }

    #[tokio::test]
    async fn test_receive_compacts_buffer() {
        let ctx = Context::new();
        open(&ctx, b"ABCDE");
        let mut delay = MockDelay::new();
        let mut buf = [0u8; 2];

        assert_eq!(ctx.receive(&mut buf, &mut delay).await, Ok(2));
        assert_eq!(&buf, b"AB");
        ctx.link().with(|link| assert_eq!(link.received(), b"CDE"));
        assert_eq!(ctx.status().rx_cursor, 3);
        assert!(delay.sleeps_ms().is_empty());
    }

    #[tokio::test]
    async fn test_receive_waits_for_bytes() {
        let ctx = Context::new();
        open(&ctx, b"");
        ctx.link().with_mut(|link| link.take_flush_request());

        let mut uart = MockUart::new();
        uart.inject_rx_data(b"xyz");
        let mut delay = MockDelay::with_hook(|_now_ms: u64| {
            ctx.pump_step(&mut uart);
        });
        let mut buf = [0u8; 3];

        assert_eq!(ctx.receive(&mut buf, &mut delay).await, Ok(3));
        assert_eq!(&buf, b"xyz");
        assert_eq!(delay.sleeps_ms(), &[100]);
    }

    #[tokio::test]
    async fn test_receive_request_too_large() {
        let ctx = Context::new();
        open(&ctx, b"");
        let mut delay = MockDelay::new();
        let mut buf = [0u8; RX_CAPACITY + 1];

        assert_eq!(
            ctx.receive(&mut buf, &mut delay).await,
            Err(WiflyError::RequestTooLarge)
        );
        assert!(delay.sleeps_ms().is_empty());
    }

    #[tokio::test]
    async fn test_receive_fails_when_link_closes_mid_wait() {
        let ctx = Context::new();
        open(&ctx, b"A");
        let mut delay = MockDelay::with_hook(|_now_ms: u64| {
            ctx.link().with_mut(|link| link.disable());
        });
        let mut buf = [0u8; 2];

        assert_eq!(
            ctx.receive(&mut buf, &mut delay).await,
            Err(WiflyError::LinkNotReady)
        );
    }

    #[test]
    fn test_flush_received() {
        let ctx = Context::new();
        assert_eq!(ctx.flush_received(), Err(WiflyError::LinkNotReady));

        open(&ctx, b"junk");
        assert_eq!(ctx.flush_received(), Ok(()));
        let status = ctx.status();
        assert_eq!(status.rx_cursor, 0);
        assert!(status.flush_pending);
        assert!(ctx.is_ready());
    }
}
