//! Platform error types
//!
//! This module defines error types for byte transport operations.

use core::fmt;

/// Byte transport errors
///
/// "No byte available" and "transmitter busy" are not errors: they are
/// reported as `nb::Error::WouldBlock`. These variants cover line faults the
/// HAL reports while a byte is being moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Receive overrun, at least one byte was lost
    Overrun,
    /// Framing error (bad stop bit)
    Framing,
    /// Parity error
    Parity,
    /// Noise detected on the line
    Noise,
    /// Any other HAL-specific failure
    Other,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Overrun => write!(f, "UART receive overrun"),
            TransportError::Framing => write!(f, "UART framing error"),
            TransportError::Parity => write!(f, "UART parity error"),
            TransportError::Noise => write!(f, "UART noise error"),
            TransportError::Other => write!(f, "UART error"),
        }
    }
}

impl From<embedded_hal_nb::serial::ErrorKind> for TransportError {
    fn from(kind: embedded_hal_nb::serial::ErrorKind) -> Self {
        use embedded_hal_nb::serial::ErrorKind;

        match kind {
            ErrorKind::Overrun => TransportError::Overrun,
            ErrorKind::FrameFormat => TransportError::Framing,
            ErrorKind::Parity => TransportError::Parity,
            ErrorKind::Noise => TransportError::Noise,
            _ => TransportError::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_nb::serial::ErrorKind;

    #[test]
    fn test_error_kind_mapping() {
        assert_eq!(TransportError::from(ErrorKind::Overrun), TransportError::Overrun);
        assert_eq!(
            TransportError::from(ErrorKind::FrameFormat),
            TransportError::Framing
        );
        assert_eq!(TransportError::from(ErrorKind::Parity), TransportError::Parity);
        assert_eq!(TransportError::from(ErrorKind::Noise), TransportError::Noise);
        assert_eq!(TransportError::from(ErrorKind::Other), TransportError::Other);
    }

    #[test]
    fn test_display() {
        assert_eq!(TransportError::Overrun.to_string(), "UART receive overrun");
    }
}
