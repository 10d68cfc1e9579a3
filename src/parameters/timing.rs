//! Fixed bring-up delays
//!
//! Per-state transmit/receive delays live in the state table; these are the
//! delays of the special functions and of the client receive loop.

/// Fixed delays in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WiflyTimings {
    /// Reset line held low
    pub reset_hold_ms: u32,
    /// Wait after releasing reset before the module accepts commands
    pub boot_settle_ms: u32,
    /// Wait before discarding input in the flush step
    pub flush_settle_ms: u32,
    /// Sleep per idle step
    pub idle_interval_ms: u32,
    /// Client receive recheck interval, and the backoff before reporting
    /// a disabled link
    pub receive_backoff_ms: u32,
}

impl WiflyTimings {
    pub const fn new() -> Self {
        Self {
            reset_hold_ms: 100,
            boot_settle_ms: 300,
            flush_settle_ms: 1000,
            idle_interval_ms: 30_000,
            receive_backoff_ms: 100,
        }
    }
}

impl Default for WiflyTimings {
    fn default() -> Self {
        Self::new()
    }
}
