//! Mock reset line implementation for testing

use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};
use std::vec::Vec;

/// Mock output pin for the module reset line
///
/// Tracks the pin level and every level change for test verification.
/// The line idles high (module running), matching the board wiring.
#[derive(Debug)]
pub struct MockResetPin {
    high: bool,
    history: Vec<bool>,
    fail: bool,
}

impl MockResetPin {
    /// Create a new mock pin driven high
    pub fn new() -> Self {
        Self {
            high: true,
            history: Vec::new(),
            fail: false,
        }
    }

    /// Current pin level
    pub fn is_high(&self) -> bool {
        self.high
    }

    /// Levels written so far, in order (`true` = high)
    pub fn history(&self) -> &[bool] {
        &self.history
    }

    /// Number of completed low-then-high reset pulses
    pub fn pulse_count(&self) -> usize {
        self.history
            .windows(2)
            .filter(|pair| !pair[0] && pair[1])
            .count()
    }

    /// Make every subsequent write fail
    pub fn set_failing(&mut self, fail: bool) {
        self.fail = fail;
    }

    fn drive(&mut self, high: bool) -> Result<(), ErrorKind> {
        if self.fail {
            return Err(ErrorKind::Other);
        }
        self.high = high;
        self.history.push(high);
        Ok(())
    }
}

impl Default for MockResetPin {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorType for MockResetPin {
    type Error = ErrorKind;
}

impl OutputPin for MockResetPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_pin_starts_high() {
        let pin = MockResetPin::new();
        assert!(pin.is_high());
        assert!(pin.history().is_empty());
    }

    #[test]
    fn test_mock_pin_pulse_count() {
        let mut pin = MockResetPin::new();
        pin.set_low().unwrap();
        pin.set_high().unwrap();
        pin.set_low().unwrap();
        assert_eq!(pin.pulse_count(), 1);

        pin.set_high().unwrap();
        assert_eq!(pin.pulse_count(), 2);
        assert!(pin.is_high());
    }

    #[test]
    fn test_mock_pin_failing() {
        let mut pin = MockResetPin::new();
        pin.set_failing(true);
        assert_eq!(pin.set_low(), Err(ErrorKind::Other));
        assert!(pin.is_high());
    }
}
