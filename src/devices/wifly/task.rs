//! WiFly task loops
//!
//! Long-running async loops for the three WiFly tasks. Embassy tasks cannot
//! be generic, so the application wraps each loop in a `#[embassy_executor::task]`
//! with its concrete UART, pin and delay types.
//!
//! # Usage
//!
//! ```ignore
//! #[embassy_executor::task]
//! async fn wifly_pump(uart: ModuleUart) {
//!     pump_loop(&WIFLY, NbSerial::new(uart)).await
//! }
//!
//! #[embassy_executor::task]
//! async fn wifly_echo(console: ConsoleUart) {
//!     receive_echo_loop_embassy::<_, _, 4>(&WIFLY, NbSerial::new(console)).await
//! }
//! ```
//!
//! The pump task should run at the lowest priority: it never sleeps, only
//! yields.

use super::client::WiflyError;
use super::driver::{StepOutcome, WiflyDriver};
use super::WiflyContext;
use crate::platform::traits::ByteTransport;
use crate::{log_error, log_info, log_trace};
use embassy_futures::yield_now;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;

/// Relay bytes between `transport` and the link buffer forever
pub async fn pump_loop<M: RawMutex, T: ByteTransport>(
    ctx: &WiflyContext<M>,
    mut transport: T,
) -> ! {
    loop {
        ctx.pump_step(&mut transport);
        yield_now().await;
    }
}

/// Step the bring-up driver forever
///
/// Sleeps happen inside each step; an unknown state only yields so the
/// loop cannot starve other tasks.
pub async fn provisioning_loop<M, P, D>(mut driver: WiflyDriver<'_, M, P, D>) -> !
where
    M: RawMutex,
    P: OutputPin,
    D: DelayNs,
{
    log_info!("wifly - Provisioning started");
    loop {
        if let StepOutcome::UnknownState(_) = driver.step().await {
            yield_now().await;
        }
    }
}

/// Copy received link data to `console` in chunks of `N` bytes forever
pub async fn receive_echo_loop<M, C, D, const N: usize>(
    ctx: &WiflyContext<M>,
    mut console: C,
    mut delay: D,
) -> !
where
    M: RawMutex,
    C: ByteTransport,
    D: DelayNs,
{
    let mut chunk = [0u8; N];
    loop {
        match ctx.receive(&mut chunk, &mut delay).await {
            Ok(n) => {
                if let Err(e) = console.write_all(&chunk[..n]) {
                    log_trace!("wifly - Echo console fault: {}", e);
                }
            }
            // Receive already backed off
            Err(WiflyError::LinkNotReady) => {}
            Err(e) => {
                log_error!("wifly - Echo chunk of {} bytes rejected: {}", N, e);
                delay.delay_ms(ctx.receive_backoff_ms()).await;
            }
        }
    }
}

/// [`provisioning_loop`] built from parts, clocked by `embassy_time`
#[cfg(feature = "embassy")]
pub async fn provisioning_loop_embassy<M, P>(
    ctx: &WiflyContext<M>,
    table: super::StateTable,
    reset: P,
    timings: crate::parameters::WiflyTimings,
) -> !
where
    M: RawMutex,
    P: OutputPin,
{
    provisioning_loop(WiflyDriver::new(
        ctx,
        table,
        reset,
        embassy_time::Delay,
        timings,
    ))
    .await
}

/// [`receive_echo_loop`] clocked by `embassy_time`
#[cfg(feature = "embassy")]
pub async fn receive_echo_loop_embassy<M, C, const N: usize>(
    ctx: &WiflyContext<M>,
    console: C,
) -> !
where
    M: RawMutex,
    C: ByteTransport,
{
    receive_echo_loop::<M, C, embassy_time::Delay, N>(ctx, console, embassy_time::Delay).await
}
