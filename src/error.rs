use crate::Direction;

/// Errors reported by the driver.
///
/// Everything except [`Error::Bus`] is detected before the bus is touched, so a rejected call
/// never leaves a partial register update behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The pin count passed at construction is above 16.
    #[error("pin count {pin_count} is invalid, must be between 0 and 16")]
    InvalidConfiguration { pin_count: u8 },
    /// The pin index is not below the pin count of the chip.
    #[error("pin {pin} is invalid, must be below {pin_count}")]
    PinOutOfRange { pin: u8, pin_count: u8 },
    /// A level or mode argument is neither 0 nor 1.
    #[error("value is {value}, must be 1 or 0")]
    InvalidArgument { value: u8 },
    /// The pin is not configured for the requested operation.
    #[error("pin {pin} not set to {expected:?}")]
    WrongPinDirection { pin: u8, expected: Direction },
    /// Error from the underlying transport, passed through unchanged.
    #[error("bus error: {0:?}")]
    Bus(E),
}

impl<E: core::fmt::Debug> embedded_hal::digital::Error for Error<E> {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn pin_out_of_range_message() {
        let err: Error<()> = Error::PinOutOfRange {
            pin: 8,
            pin_count: 8,
        };
        assert_eq!(err.to_string(), "pin 8 is invalid, must be below 8");

        let err: Error<()> = Error::PinOutOfRange {
            pin: 0,
            pin_count: 0,
        };
        assert_eq!(err.to_string(), "pin 0 is invalid, must be below 0");
    }
}
