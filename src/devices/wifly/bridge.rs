//! Console to module passthrough
//!
//! For configuring a module by hand: whatever is typed on the console goes
//! to the module and is echoed back, whatever the module sends appears on
//! the console. Does not use the link buffer or the driver.

use crate::log_trace;
use crate::platform::traits::ByteTransport;
use embassy_futures::yield_now;

/// What a single bridge step moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BridgeActivity {
    /// Console byte forwarded to the module
    pub to_module: Option<u8>,
    /// Module byte forwarded to the console
    pub to_console: Option<u8>,
}

/// Transparent serial bridge between two ports
pub struct SerialBridge<C, W> {
    console: C,
    module: W,
}

impl<C: ByteTransport, W: ByteTransport> SerialBridge<C, W> {
    pub fn new(console: C, module: W) -> Self {
        Self { console, module }
    }

    /// Move at most one byte in each direction
    ///
    /// Reads never block; writes block until the transmitter takes the byte.
    pub fn step(&mut self) -> BridgeActivity {
        let mut activity = BridgeActivity::default();

        if let Ok(byte) = self.console.read_byte() {
            if let Err(e) = self.module.write_byte_blocking(byte) {
                log_trace!("bridge - module write fault: {}", e);
            }
            if let Err(e) = self.console.write_byte_blocking(byte) {
                log_trace!("bridge - echo fault: {}", e);
            }
            activity.to_module = Some(byte);
        }

        if let Ok(byte) = self.module.read_byte() {
            if let Err(e) = self.console.write_byte_blocking(byte) {
                log_trace!("bridge - console write fault: {}", e);
            }
            activity.to_console = Some(byte);
        }

        activity
    }

    /// Give back both ports
    pub fn release(self) -> (C, W) {
        (self.console, self.module)
    }
}

/// Run the bridge forever, yielding after every step
pub async fn bridge_loop<C: ByteTransport, W: ByteTransport>(
    mut bridge: SerialBridge<C, W>,
) -> ! {
    loop {
        bridge.step();
        yield_now().await;
    }
}
