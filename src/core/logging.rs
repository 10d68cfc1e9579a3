//! Logging abstraction
//!
//! Provides unified logging macros that work across different targets:
//! - `console` feature: lines are queued and written to the console UART
//! - `defmt` feature: uses defmt
//! - Host tests: uses println!
//! - Otherwise: no-op
//!
//! ## Console Logging
//!
//! When the `console` feature is enabled, log lines are sent to a bounded
//! channel instead of defmt. Lines are dropped when the channel is full, so
//! logging never blocks the caller. You need to:
//! 1. Hand the console port to a task running [`console_loop`]
//! 2. Use the log macros as usual: `log_info!("message")`

#[cfg(feature = "console")]
use crate::platform::traits::ByteTransport;
#[cfg(feature = "console")]
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
#[cfg(feature = "console")]
use embassy_sync::channel::Channel;

/// Log message buffer size
#[cfg(feature = "console")]
const LOG_MSG_SIZE: usize = 96;

/// Log channel capacity
#[cfg(feature = "console")]
const LOG_CHANNEL_SIZE: usize = 16;

/// Log message type
#[cfg(feature = "console")]
pub struct LogMessage {
    pub level: LogLevel,
    pub message: heapless::String<LOG_MSG_SIZE>,
}

/// Log level
#[cfg(feature = "console")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
    Debug,
    Trace,
}

#[cfg(feature = "console")]
impl LogLevel {
    fn prefix(self) -> &'static str {
        match self {
            LogLevel::Info => "[INFO] ",
            LogLevel::Warn => "[WARN] ",
            LogLevel::Error => "[ERROR]",
            LogLevel::Debug => "[DEBUG]",
            LogLevel::Trace => "[TRACE]",
        }
    }
}

/// Global log channel
#[cfg(feature = "console")]
static LOG_CHANNEL: Channel<CriticalSectionRawMutex, LogMessage, LOG_CHANNEL_SIZE> =
    Channel::new();

/// Send log message to channel
///
/// Messages longer than the line buffer are truncated.
#[cfg(feature = "console")]
pub fn send_log(level: LogLevel, args: core::fmt::Arguments<'_>) {
    let mut message = heapless::String::new();
    let _ = core::fmt::write(&mut message, args);

    // Drop if channel is full (non-blocking)
    let _ = LOG_CHANNEL.try_send(LogMessage { level, message });
}

#[cfg(feature = "console")]
fn format_line(log_msg: &LogMessage) -> heapless::String<{ LOG_MSG_SIZE + 16 }> {
    let mut line = heapless::String::new();
    let _ = core::fmt::write(
        &mut line,
        format_args!("{} {}\r\n", log_msg.level.prefix(), log_msg.message),
    );
    line
}

/// Console logger loop
///
/// Waits for log lines and writes them to the console port. Yields while the
/// transmitter is busy so other tasks keep running.
///
/// # Example
///
/// ```ignore
/// #[embassy_executor::task]
/// async fn console_task(uart: ConsoleUart) {
///     wifly_link::core::logging::console_loop(NbSerial::new(uart)).await
/// }
/// ```
#[cfg(feature = "console")]
pub async fn console_loop<T: ByteTransport>(mut console: T) -> ! {
    loop {
        let log_msg = LOG_CHANNEL.receive().await;

        for &byte in format_line(&log_msg).as_bytes() {
            loop {
                match console.write_byte(byte) {
                    Ok(()) => break,
                    Err(nb::Error::WouldBlock) => embassy_futures::yield_now().await,
                    // Drop the rest of the line on a hard fault
                    Err(nb::Error::Other(_)) => break,
                }
            }
        }
    }
}

/// Log informational message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "console")]
        $crate::core::logging::send_log(
            $crate::core::logging::LogLevel::Info,
            format_args!($($arg)*),
        );

        #[cfg(all(feature = "defmt", not(feature = "console")))]
        ::defmt::info!($($arg)*);

        #[cfg(all(not(feature = "defmt"), not(feature = "console"), test))]
        println!("[INFO] {}", format!($($arg)*));

        #[cfg(all(not(feature = "defmt"), not(feature = "console"), not(test)))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

/// Log warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "console")]
        $crate::core::logging::send_log(
            $crate::core::logging::LogLevel::Warn,
            format_args!($($arg)*),
        );

        #[cfg(all(feature = "defmt", not(feature = "console")))]
        ::defmt::warn!($($arg)*);

        #[cfg(all(not(feature = "defmt"), not(feature = "console"), test))]
        println!("[WARN] {}", format!($($arg)*));

        #[cfg(all(not(feature = "defmt"), not(feature = "console"), not(test)))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

/// Log error message
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        #[cfg(feature = "console")]
        $crate::core::logging::send_log(
            $crate::core::logging::LogLevel::Error,
            format_args!($($arg)*),
        );

        #[cfg(all(feature = "defmt", not(feature = "console")))]
        ::defmt::error!($($arg)*);

        #[cfg(all(not(feature = "defmt"), not(feature = "console"), test))]
        eprintln!("[ERROR] {}", format!($($arg)*));

        #[cfg(all(not(feature = "defmt"), not(feature = "console"), not(test)))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

/// Log debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "console")]
        $crate::core::logging::send_log(
            $crate::core::logging::LogLevel::Debug,
            format_args!($($arg)*),
        );

        #[cfg(all(feature = "defmt", not(feature = "console")))]
        ::defmt::debug!($($arg)*);

        #[cfg(all(not(feature = "defmt"), not(feature = "console"), test))]
        println!("[DEBUG] {}", format!($($arg)*));

        #[cfg(all(not(feature = "defmt"), not(feature = "console"), not(test)))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

/// Log trace message
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "console")]
        $crate::core::logging::send_log(
            $crate::core::logging::LogLevel::Trace,
            format_args!($($arg)*),
        );

        #[cfg(all(feature = "defmt", not(feature = "console")))]
        ::defmt::trace!($($arg)*);

        #[cfg(all(not(feature = "defmt"), not(feature = "console"), test))]
        println!("[TRACE] {}", format!($($arg)*));

        #[cfg(all(not(feature = "defmt"), not(feature = "console"), not(test)))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

#[cfg(all(test, feature = "console"))]
mod tests {
    use super::*;

    fn message(level: LogLevel, args: core::fmt::Arguments<'_>) -> LogMessage {
        let mut message = heapless::String::new();
        let _ = core::fmt::write(&mut message, args);
        LogMessage { level, message }
    }

    #[test]
    fn test_console_lines_are_prefixed() {
        let line = format_line(&message(LogLevel::Warn, format_args!("state {}", 3)));
        assert_eq!(line.as_str(), "[WARN]  state 3\r\n");

        let line = format_line(&message(LogLevel::Error, format_args!("boom")));
        assert_eq!(line.as_str(), "[ERROR] boom\r\n");
    }
}
