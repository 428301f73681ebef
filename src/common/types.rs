// src/common/types.rs

use core::fmt;

// --- Acquisition modes ---

/// How the module delivers data.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AcquireMode {
    /// "Initiative" reporting: the module measures on its own and buffers the
    /// result; the host polls an availability flag.
    Push,
    /// "Passivity": the module only answers explicit read requests.
    Pull,
}

impl fmt::Display for AcquireMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcquireMode::Push => write!(f, "INITIATIVE"),
            AcquireMode::Pull => write!(f, "PASSIVITY"),
        }
    }
}

/// Mode a handle is known to be in. Starts as `Unknown` on every run since
/// nothing is persisted.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeState {
    #[default]
    Unknown,
    Confirmed(AcquireMode),
}

impl ModeState {
    pub fn is_confirmed(&self, mode: AcquireMode) -> bool {
        *self == ModeState::Confirmed(mode)
    }
}

// --- Gas types ---

/// Gas a sensor module is built for, as reported alongside each reading.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GasType {
    O2,
    CO,
    H2S,
    NO2,
    O3,
    Cl2,
    NH3,
    H2,
    HCl,
    SO2,
    HF,
    PH3,
    /// The driver could not identify the probe.
    Unknown,
}

impl GasType {
    /// Chemical formula, as printed in readings.
    pub const fn formula(&self) -> &'static str {
        match self {
            GasType::O2 => "O2",
            GasType::CO => "CO",
            GasType::H2S => "H2S",
            GasType::NO2 => "NO2",
            GasType::O3 => "O3",
            GasType::Cl2 => "CL2",
            GasType::NH3 => "NH3",
            GasType::H2 => "H2",
            GasType::HCl => "HCL",
            GasType::SO2 => "SO2",
            GasType::HF => "HF",
            GasType::PH3 => "PH3",
            GasType::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for GasType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.formula())
    }
}

// --- Readings ---

/// Buffered data of a module in push mode.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GasReading {
    pub gas_type: GasType,
    /// Concentration in percent.
    pub concentration: f32,
    /// Board temperature in °C.
    pub temperature: f32,
}

/// Answer to a pull-mode concentration request. The gas type travels with
/// the value so it can never be stale.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Concentration {
    pub gas_type: GasType,
    pub value: f32,
}

/// Raw probe voltage.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Voltage {
    pub volts: f32,
}

/// Last reading taken from a handle, whatever the poll variant.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reading {
    Gas(GasReading),
    Concentration(Concentration),
    Voltage(Voltage),
}

impl Reading {
    pub fn gas_type(&self) -> Option<GasType> {
        match self {
            Reading::Gas(r) => Some(r.gas_type),
            Reading::Concentration(c) => Some(c.gas_type),
            Reading::Voltage(_) => None,
        }
    }
}
