//! WiFly bring-up driver
//!
//! Walks the [`StateTable`], one transition per [`WiflyDriver::step`]. Each
//! step applies the state's special functions, queues its command, sleeps
//! for the reply and compares what arrived with what was expected.
//!
//! The link lock is only taken for the short load and compare sections;
//! the pump keeps moving bytes while the driver sleeps.

use super::state::{SpecialFunctions, WiflyState};
use super::table::StateTable;
use super::WiflyContext;
use crate::core::traits::SharedState;
use crate::parameters::WiflyTimings;
use crate::{log_debug, log_error, log_info, log_warn};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal::digital::{Error as _, OutputPin};
use embedded_hal_async::delay::DelayNs;

/// Result of one driver step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepOutcome {
    /// Reply matched, moved to the next state
    Advanced { from: WiflyState, to: WiflyState },
    /// Reply missing or wrong, moved to the recovery state
    Recovered { from: WiflyState, to: WiflyState },
    /// Idle interval elapsed, state unchanged
    Idle,
    /// No descriptor for the current state id, nothing done
    UnknownState(u8),
}

/// Provisioning state machine for one module
pub struct WiflyDriver<'a, M: RawMutex, P: OutputPin, D: DelayNs> {
    ctx: &'a WiflyContext<M>,
    table: StateTable,
    reset: P,
    delay: D,
    timings: WiflyTimings,
    state: WiflyState,
}

impl<'a, M: RawMutex, P: OutputPin, D: DelayNs> WiflyDriver<'a, M, P, D> {
    /// Driver starting in [`WiflyState::INITIAL`]
    pub fn new(
        ctx: &'a WiflyContext<M>,
        table: StateTable,
        reset: P,
        delay: D,
        timings: WiflyTimings,
    ) -> Self {
        Self {
            ctx,
            table,
            reset,
            delay,
            timings,
            state: WiflyState::INITIAL,
        }
    }

    /// Current provisioning state
    pub fn state(&self) -> WiflyState {
        self.state
    }

    pub fn table(&self) -> &StateTable {
        &self.table
    }

    pub fn reset_pin(&self) -> &P {
        &self.reset
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Give back the reset pin and the delay
    pub fn release(self) -> (P, D) {
        (self.reset, self.delay)
    }

    /// Perform at most one state transition
    pub async fn step(&mut self) -> StepOutcome {
        let from = self.state;
        let Some(descriptor) = self.table.lookup(from).cloned() else {
            log_error!("wifly - State not found: {}", from.id());
            return StepOutcome::UnknownState(from.id());
        };

        if self.apply_special_functions(descriptor.special()).await {
            return StepOutcome::Idle;
        }

        log_info!("wifly - {}", from.description());

        if descriptor.tx_delay_ms() > 0 {
            self.delay.delay_ms(descriptor.tx_delay_ms()).await;
        }

        self.ctx.link().with_mut(|link| {
            link.load_exchange(descriptor.tx_command(), descriptor.rx_expect().len())
        });

        if descriptor.rx_delay_ms() > 0 {
            self.delay.delay_ms(descriptor.rx_delay_ms()).await;
        }

        let matched = self
            .ctx
            .link()
            .with(|link| link.response_matches(descriptor.rx_expect()));

        if matched {
            self.state = descriptor.next();
            StepOutcome::Advanced {
                from,
                to: self.state,
            }
        } else {
            self.state = descriptor.recovery();
            log_warn!(
                "wifly - Unexpected reply in state {}, recovering to {}",
                from.id(),
                self.state.id()
            );
            StepOutcome::Recovered {
                from,
                to: self.state,
            }
        }
    }

    /// Returns `true` when the step should end here (idle)
    async fn apply_special_functions(&mut self, special: SpecialFunctions) -> bool {
        if special.contains(SpecialFunctions::DISABLE_LINK) {
            self.ctx.link().with_mut(|link| link.disable());
        }

        if special.contains(SpecialFunctions::ENABLE_LINK)
            && self.ctx.link().with_mut(|link| link.enable())
        {
            log_debug!("wifly - Link enabled");
        }

        if special.contains(SpecialFunctions::IDLE) {
            log_info!("wifly - {}", WiflyState::Idle.description());
            self.delay.delay_ms(self.timings.idle_interval_ms).await;
            return true;
        }

        if special.contains(SpecialFunctions::RESET) {
            self.pulse_reset().await;
        }

        if special.contains(SpecialFunctions::FLUSH_RX) {
            self.delay.delay_ms(self.timings.flush_settle_ms).await;
            self.ctx.link().with_mut(|link| link.flush_rx());
        }

        false
    }

    async fn pulse_reset(&mut self) {
        if let Err(e) = self.reset.set_low() {
            log_warn!("wifly - Reset line fault: {:?}", e.kind());
        }
        self.delay.delay_ms(self.timings.reset_hold_ms).await;

        if let Err(e) = self.reset.set_high() {
            log_warn!("wifly - Reset line fault: {:?}", e.kind());
        }
        self.delay.delay_ms(self.timings.boot_settle_ms).await;
    }
}
