//! WiFly RN-XV radio link
//!
//! Brings up a Roving Networks WiFly module over a UART command interface
//! and then relays upper-layer bytes through it.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ WiflyDriver  │   │ Client API   │   │ pump_step    │◀──▶ module UART
//! │ (bring-up)   │   │ transmit /   │   │ (1 byte each │
//! │              │   │ receive      │   │  direction)  │
//! └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!        └──────────────────┼──────────────────┘
//!                           ▼
//!              WiflyContext ─ LinkBuffer (locked)
//! ```
//!
//! The driver walks the [`StateTable`] one transition per
//! [`WiflyDriver::step`]. On any unexpected reply it goes back to command
//! mode, which resets the module. Once provisioning finishes it opens the
//! link and idles; from then on [`WiflyContext::transmit`] and
//! [`WiflyContext::receive`] work.
//!
//! # Example
//!
//! ```ignore
//! static WIFLY: WiflyContext<CriticalSectionRawMutex> = WiflyContext::new();
//!
//! #[embassy_executor::task]
//! async fn pump_task(uart: ModuleUart) {
//!     pump_loop(&WIFLY, NbSerial::new(uart)).await
//! }
//!
//! #[embassy_executor::task]
//! async fn wifly_task(reset: Output<'static>) {
//!     let table = StateTable::new(&WifiCredentials::from_build_env()).unwrap();
//!     let driver = WiflyDriver::new(&WIFLY, table, reset, Delay, WiflyTimings::default());
//!     provisioning_loop(driver).await
//! }
//! ```

mod bridge;
mod client;
mod driver;
mod link;
mod pump;
mod state;
mod table;
mod task;

pub use bridge::{bridge_loop, BridgeActivity, SerialBridge};
pub use client::WiflyError;
pub use driver::{StepOutcome, WiflyDriver};
pub use link::{LinkBuffer, LinkStatus};
pub use pump::PumpActivity;
pub use state::{Command, SpecialFunctions, StateDescriptor, WiflyState, STATE_COUNT};
pub use table::StateTable;
#[cfg(feature = "embassy")]
pub use task::{provisioning_loop_embassy, receive_echo_loop_embassy};
pub use task::{provisioning_loop, pump_loop, receive_echo_loop};

use crate::core::traits::BlockingState;
use crate::parameters::WiflyTimings;
use embassy_sync::blocking_mutex::raw::RawMutex;

/// Transmit buffer size in bytes
pub const TX_CAPACITY: usize = 128;

/// Receive buffer size in bytes
pub const RX_CAPACITY: usize = 128;

/// Shared state of one radio link
///
/// Holds the [`LinkBuffer`] behind a lock. Construct once, typically as a
/// `static`, and hand references to the pump, the driver and clients.
pub struct WiflyContext<M: RawMutex> {
    link: BlockingState<M, LinkBuffer>,
    receive_backoff_ms: u32,
}

impl<M: RawMutex> WiflyContext<M> {
    /// Link disabled, buffers empty
    pub const fn new() -> Self {
        Self::with_receive_backoff(WiflyTimings::new().receive_backoff_ms)
    }

    /// Use a custom client receive recheck interval
    pub const fn with_receive_backoff(receive_backoff_ms: u32) -> Self {
        Self {
            link: BlockingState::new(LinkBuffer::new()),
            receive_backoff_ms,
        }
    }

    /// The locked link buffer
    pub fn link(&self) -> &BlockingState<M, LinkBuffer> {
        &self.link
    }

    pub fn receive_backoff_ms(&self) -> u32 {
        self.receive_backoff_ms
    }
}

impl<M: RawMutex> Default for WiflyContext<M> {
    fn default() -> Self {
        Self::new()
    }
}
