// src/common/error.rs

/// Errors surfaced by the polling client.
///
/// `E` is the error type of the sensor driver collaborator. It is carried
/// through untouched so the caller can still match on it.
#[derive(Debug, thiserror::Error)]
pub enum Error<E = ()>
where
    E: core::fmt::Debug, // Still need Debug for the generic Sensor error
{
    /// The driver collaborator failed (bus error, bad frame, missing module...).
    #[error("Sensor error: {0:?}")]
    Sensor(E),

    /// A bounded retry policy ran out before the module acknowledged the mode change.
    #[error("Acquisition mode change not acknowledged after {attempts} attempts")]
    ModeChangeTimeout { attempts: u32 },

    /// A reading was requested from a handle whose mode was never confirmed.
    #[error("Sensor {index} has not confirmed its acquisition mode")]
    ModeNotConfirmed { index: usize },

    /// The handle is in a mode that cannot serve this kind of poll.
    #[error("Sensor {index} is in the wrong acquisition mode for this poll")]
    WrongMode { index: usize },

    /// No handle at this index.
    #[error("No sensor at index {index}")]
    NoSuchSensor { index: usize },

    /// The configuration was rejected when the client was built.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Writing to the console sink failed.
    #[error("Console output failed")]
    Output,
}

// Allow `?` on fmt::Write calls inside client code
impl<E: core::fmt::Debug> From<core::fmt::Error> for Error<E> {
    fn from(_: core::fmt::Error) -> Self {
        Error::Output
    }
}

/// Mistakes in a [`ClientConfig`](super::config::ClientConfig), reported when it is built.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The module cannot be strapped to this address.
    #[error("I2C address {0:#04x} outside 0x60..=0x7F")]
    AddressOutOfRange(u8),

    /// DIP group outside 1..=8.
    #[error("Invalid DIP address group: {0}")]
    InvalidGroup(u8),

    /// Two sensors on the same bus share an address.
    #[error("Duplicate I2C address {0:#04x} on one bus")]
    DuplicateAddress(u8),

    /// More sensors than the client can hold.
    #[error("Too many sensors: at most {max}")]
    TooManySensors { max: usize },

    /// An I2C transport with no addresses.
    #[error("No sensor addresses configured")]
    NoSensors,

    /// Raw voltage can only be requested from a module in pull mode.
    #[error("Voltage readings need pull mode")]
    VoltageNeedsPull,
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;

    #[test]
    fn test_fmt_error_maps_to_output() {
        let err: Error<u8> = core::fmt::Error.into();
        assert!(matches!(err, Error::Output));
    }

    #[test]
    fn test_config_error_converts() {
        let err: Error<u8> = ConfigError::NoSensors.into();
        assert!(matches!(err, Error::Config(ConfigError::NoSensors)));
    }

    #[test]
    fn test_messages() {
        let mut s: heapless::String<64> = heapless::String::new();
        write!(s, "{}", ConfigError::DuplicateAddress(0x74)).unwrap();
        assert_eq!(s.as_str(), "Duplicate I2C address 0x74 on one bus");

        s.clear();
        write!(s, "{}", Error::<()>::ModeChangeTimeout { attempts: 5 }).unwrap();
        assert_eq!(s.as_str(), "Acquisition mode change not acknowledged after 5 attempts");
    }
}
