//! Mock delay implementation for testing

use embassy_futures::yield_now;
use embedded_hal_async::delay::DelayNs;
use std::vec::Vec;

fn no_hook(_now_ms: u64) {}

/// Mock async delay on a virtual clock
///
/// Every delay advances the virtual clock instead of waiting, then yields
/// once so other futures polled alongside get a turn. An optional hook is
/// called once for every whole millisecond that elapses, which lets a test
/// run the transport pump "while" the code under test sleeps.
pub struct MockDelay<F = fn(u64)> {
    now_ns: u64,
    sleeps_ms: Vec<u32>,
    hook: F,
}

impl MockDelay {
    /// Create a new mock delay with no hook
    pub fn new() -> Self {
        Self::with_hook(no_hook)
    }
}

impl Default for MockDelay {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FnMut(u64)> MockDelay<F> {
    /// Create a mock delay calling `hook(now_ms)` for every elapsed millisecond
    pub fn with_hook(hook: F) -> Self {
        Self {
            now_ns: 0,
            sleeps_ms: Vec::new(),
            hook,
        }
    }

    /// Virtual time in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.now_ns / 1_000_000
    }

    /// Every `delay_ms` request so far, in order
    pub fn sleeps_ms(&self) -> &[u32] {
        &self.sleeps_ms
    }

    fn advance_ns(&mut self, ns: u64) {
        let before_ms = self.now_ms();
        self.now_ns += ns;
        for ms in before_ms + 1..=self.now_ms() {
            (self.hook)(ms);
        }
    }
}

impl<F: FnMut(u64)> DelayNs for MockDelay<F> {
    async fn delay_ns(&mut self, ns: u32) {
        self.advance_ns(u64::from(ns));
        yield_now().await;
    }

    async fn delay_us(&mut self, us: u32) {
        self.advance_ns(u64::from(us) * 1_000);
        yield_now().await;
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.sleeps_ms.push(ms);
        self.advance_ns(u64::from(ms) * 1_000_000);
        yield_now().await;
    }
}
