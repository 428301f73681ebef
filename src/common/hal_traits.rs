// src/common/hal_traits.rs

use super::types::{AcquireMode, Concentration, GasReading};
use core::fmt::Debug;

/// Operations the client needs from a gas sensor driver.
///
/// Framing, register maps and checksums stay inside the driver; the client
/// only sequences these calls. Every call blocks until the module answers.
pub trait GasSensor {
    /// Associated error type for driver/bus failures.
    type Error: Debug;

    /// Asks the module to switch acquisition mode.
    ///
    /// `Ok(false)` means the module has not acknowledged (yet); the caller
    /// decides whether to retry. `Err` is a real fault.
    fn change_acquire_mode(&mut self, mode: AcquireMode) -> Result<bool, Self::Error>;

    /// Turns on-module temperature compensation on or off.
    fn set_temp_compensation(&mut self, enabled: bool) -> Result<(), Self::Error>;

    /// Push mode: whether the module has buffered a new measurement.
    fn data_is_available(&mut self) -> Result<bool, Self::Error>;

    /// Push mode: the buffered gas type, concentration and temperature.
    fn read_all_data(&mut self) -> Result<GasReading, Self::Error>;

    /// Pull mode: requests one concentration reading.
    fn read_gas_concentration(&mut self) -> Result<Concentration, Self::Error>;

    /// Pull mode: requests the raw probe voltage in volts.
    fn read_voltage_data(&mut self) -> Result<f32, Self::Error>;
}

impl<T: GasSensor + ?Sized> GasSensor for &mut T {
    type Error = T::Error;

    fn change_acquire_mode(&mut self, mode: AcquireMode) -> Result<bool, Self::Error> {
        T::change_acquire_mode(self, mode)
    }
    fn set_temp_compensation(&mut self, enabled: bool) -> Result<(), Self::Error> {
        T::set_temp_compensation(self, enabled)
    }
    fn data_is_available(&mut self) -> Result<bool, Self::Error> {
        T::data_is_available(self)
    }
    fn read_all_data(&mut self) -> Result<GasReading, Self::Error> {
        T::read_all_data(self)
    }
    fn read_gas_concentration(&mut self) -> Result<Concentration, Self::Error> {
        T::read_gas_concentration(self)
    }
    fn read_voltage_data(&mut self) -> Result<f32, Self::Error> {
        T::read_voltage_data(self)
    }
}

/// Addresses that acknowledged a probe, in ascending order.
pub type ScanResult = heapless::Vec<u8, 128>;

/// Lowest and highest address probed by the blanket [`ScanBus`] impl.
/// 0x00..0x08 is reserved (general call, CBUS, HS mode); the module family
/// itself can sit as high as 0x7F, so the top of the range is kept.
pub const SCAN_FIRST: u8 = 0x08;
pub const SCAN_LAST: u8 = 0x7F;

/// A bus that can enumerate the devices attached to it.
pub trait ScanBus {
    type Error: Debug;

    fn scan(&mut self) -> Result<ScanResult, Self::Error>;
}

/// Any embedded-hal I2C bus scans by issuing a one-byte read to every
/// address and keeping the ones that ACK.
///
/// A NACK is indistinguishable from other bus errors through the generic
/// trait, so a bus that fails every probe yields an empty result rather
/// than an error.
impl<I2C> ScanBus for I2C
where
    I2C: embedded_hal::i2c::I2c,
{
    type Error = I2C::Error;

    fn scan(&mut self) -> Result<ScanResult, Self::Error> {
        let mut found = ScanResult::new();
        let mut probe = [0u8; 1];
        for address in SCAN_FIRST..=SCAN_LAST {
            if self.read(address, &mut probe).is_ok() {
                // Capacity is 128 and at most 120 addresses are probed
                let _ = found.push(address);
            }
        }
        Ok(found)
    }
}
