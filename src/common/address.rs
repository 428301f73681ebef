// src/common/address.rs

use super::error::ConfigError;
use core::convert::TryFrom;
use core::fmt;

/// 7-bit I2C address of a gas sensor module.
///
/// The module selects its address with a DIP group plus the A0/A1 switches,
/// so only `0x60..=0x7F` is reachable:
///
/// | group | A0 A1 = 00 | 01   | 10   | 11   |
/// |-------|------------|------|------|------|
/// | 1     | 0x60       | 0x61 | 0x62 | 0x63 |
/// | ...   |            |      |      |      |
/// | 6     | 0x74       | 0x75 | 0x76 | 0x77 |
/// | 8     | 0x7C       | 0x7D | 0x7E | 0x7F |
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cAddr(u8);

impl I2cAddr {
    /// Factory default, group 6 with both switches set.
    pub const DEFAULT_ADDRESS: I2cAddr = I2cAddr(0x77);

    pub const MIN: u8 = 0x60;
    pub const MAX: u8 = 0x7F;

    /// Number of DIP groups, each holding four addresses.
    pub const GROUPS: u8 = 8;

    /// Creates a new `I2cAddr` if the module can actually be strapped to it.
    pub fn new(address: u8) -> Result<Self, ConfigError> {
        if Self::is_valid_address(address) {
            Ok(I2cAddr(address))
        } else {
            Err(ConfigError::AddressOutOfRange(address))
        }
    }

    // Only for constants known to be in range
    pub(crate) const fn from_raw(address: u8) -> Self {
        I2cAddr(address)
    }

    /// Computes the address selected by DIP `group` (1..=8) and the A0/A1 switches.
    pub fn from_switches(group: u8, a0: bool, a1: bool) -> Result<Self, ConfigError> {
        if group == 0 || group > Self::GROUPS {
            return Err(ConfigError::InvalidGroup(group));
        }
        let base = Self::MIN + 4 * (group - 1);
        let offset = ((a0 as u8) << 1) | a1 as u8;
        Ok(I2cAddr(base + offset))
    }

    #[inline]
    pub const fn as_u8(&self) -> u8 {
        self.0
    }

    /// DIP group (1..=8) this address belongs to.
    #[inline]
    pub const fn group(&self) -> u8 {
        (self.0 - Self::MIN) / 4 + 1
    }

    #[inline]
    pub const fn is_valid_address(address: u8) -> bool {
        matches!(address, Self::MIN..=Self::MAX)
    }
}

impl Default for I2cAddr {
    fn default() -> Self {
        Self::DEFAULT_ADDRESS
    }
}

impl TryFrom<u8> for I2cAddr {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<I2cAddr> for u8 {
    fn from(value: I2cAddr) -> Self {
        value.0
    }
}

impl fmt::Display for I2cAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}
