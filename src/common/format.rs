// src/common/format.rs

//! Console lines. The exact text is what existing log scrapers and
//! compatibility tests look for, so keep it byte-stable.

use super::hal_traits::ScanResult;
use super::types::{Concentration, GasReading, Voltage};
use core::fmt::{self, Write};

pub const BLOCK_RULE: &str = "========================";
pub const BLOCK_SEPARATOR: &str = "------------------------";

/// Displays a float rounded to `places` decimals without trailing zeros,
/// keeping at least one fractional digit: `6.7` → `6.7`, `3.14159` → `3.142`,
/// `2.0` → `2.0`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rounded {
    pub value: f32,
    pub places: usize,
}

impl Rounded {
    pub const fn new(value: f32, places: usize) -> Self {
        Rounded { value, places }
    }
}

impl fmt::Display for Rounded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Longest f32 in fixed notation is ~40 digits, plus sign and fraction
        let mut buf: heapless::String<64> = heapless::String::new();
        if write!(buf, "{:.*}", self.places, self.value).is_err() {
            return write!(f, "{:.*}", self.places, self.value);
        }

        let text = buf.as_str();
        let Some(dot) = text.find('.') else {
            // inf, NaN, or zero places
            return f.write_str(text);
        };
        let trimmed = text.trim_end_matches('0');
        if trimmed.len() <= dot + 1 {
            // Keep one digit after the point
            f.write_str(&text[..dot + 2])
        } else {
            f.write_str(trimmed)
        }
    }
}

/// Push-mode block, eight lines.
pub fn write_gas_block<W: Write + ?Sized>(out: &mut W, reading: &GasReading) -> fmt::Result {
    writeln!(out, "{}", BLOCK_RULE)?;
    writeln!(out, "gastype:{}", reading.gas_type)?;
    writeln!(out, "{}", BLOCK_SEPARATOR)?;
    writeln!(out, "gasconcentration:{}%", Rounded::new(reading.concentration, 3))?;
    writeln!(out, "{}", BLOCK_SEPARATOR)?;
    writeln!(out, "temp:{} C", Rounded::new(reading.temperature, 3))?;
    writeln!(out, "{}", BLOCK_RULE)
}

/// Pull-mode line, always two decimals.
pub fn write_concentration_line<W: Write + ?Sized>(
    out: &mut W,
    reading: &Concentration,
) -> fmt::Result {
    writeln!(out, "Gas type {} concentration: {:.2}", reading.gas_type, reading.value)
}

pub fn write_voltage_line<W: Write + ?Sized>(out: &mut W, reading: &Voltage) -> fmt::Result {
    writeln!(out, "Ambient oxygen concentration is:{}V", Rounded::new(reading.volts, 3))
}

/// `I2C_BUS Address: ['0x74', '0x76']`
pub fn write_scan_report<W: Write + ?Sized>(
    out: &mut W,
    bus_label: &str,
    heading: &str,
    found: &ScanResult,
) -> fmt::Result {
    write!(out, "{} {}: [", bus_label, heading)?;
    for (i, address) in found.iter().enumerate() {
        if i > 0 {
            out.write_str(", ")?;
        }
        write!(out, "'{:#x}'", address)?;
    }
    out.write_str("]\n")
}

pub fn write_scan_failed<W: Write + ?Sized>(out: &mut W, bus_label: &str) -> fmt::Result {
    writeln!(out, "{} scan failed", bus_label)
}

pub fn write_mode_waiting<W: Write + ?Sized>(out: &mut W, label: Option<&str>) -> fmt::Result {
    match label {
        Some(label) => writeln!(out, "wait acquire mode change for {}", label),
        None => writeln!(out, "wait acquire mode change!"),
    }
}

pub fn write_mode_confirmed<W: Write + ?Sized>(out: &mut W, label: Option<&str>) -> fmt::Result {
    match label {
        Some(label) => writeln!(out, "change acquire mode success for {}", label),
        None => writeln!(out, "change acquire mode success!"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::GasType;
    use heapless::String;

    fn rounded(value: f32, places: usize) -> String<64> {
        let mut s = String::new();
        write!(s, "{}", Rounded::new(value, places)).unwrap();
        s
    }

    #[test]
    fn test_rounded() {
        assert_eq!(rounded(3.14159, 3).as_str(), "3.142");
        assert_eq!(rounded(6.7, 3).as_str(), "6.7");
        assert_eq!(rounded(2.0, 3).as_str(), "2.0");
        assert_eq!(rounded(20.9, 3).as_str(), "20.9");
        assert_eq!(rounded(-1.25, 3).as_str(), "-1.25");
        assert_eq!(rounded(0.0004, 3).as_str(), "0.0");
        assert_eq!(rounded(100.0, 3).as_str(), "100.0");
    }

    #[test]
    fn test_rounded_non_finite() {
        assert_eq!(rounded(f32::INFINITY, 3).as_str(), "inf");
        assert_eq!(rounded(f32::NAN, 3).as_str(), "NaN");
    }

    #[test]
    fn test_gas_block() {
        let mut s: String<256> = String::new();
        let reading = GasReading { gas_type: GasType::O2, concentration: 20.9, temperature: 25.125 };
        write_gas_block(&mut s, &reading).unwrap();
        assert_eq!(
            s.as_str(),
            "========================\n\
             gastype:O2\n\
             ------------------------\n\
             gasconcentration:20.9%\n\
             ------------------------\n\
             temp:25.125 C\n\
             ========================\n"
        );
    }

    #[test]
    fn test_concentration_line_two_decimals() {
        let mut s: String<128> = String::new();
        write_concentration_line(&mut s, &Concentration { gas_type: GasType::NO2, value: 12.345 }).unwrap();
        write_concentration_line(&mut s, &Concentration { gas_type: GasType::CO, value: 6.7 }).unwrap();
        assert_eq!(
            s.as_str(),
            "Gas type NO2 concentration: 12.35\nGas type CO concentration: 6.70\n"
        );
    }

    #[test]
    fn test_voltage_line() {
        let mut s: String<64> = String::new();
        write_voltage_line(&mut s, &Voltage { volts: 3.14159 }).unwrap();
        assert_eq!(s.as_str(), "Ambient oxygen concentration is:3.142V\n");
    }

    #[test]
    fn test_scan_report() {
        let mut s: String<64> = String::new();
        let mut found = ScanResult::new();
        found.push(0x74).unwrap();
        found.push(0x76).unwrap();
        write_scan_report(&mut s, "I2C_BUS", "Address", &found).unwrap();
        assert_eq!(s.as_str(), "I2C_BUS Address: ['0x74', '0x76']\n");

        s.clear();
        write_scan_report(&mut s, "I2C_BUS", "Address", &ScanResult::new()).unwrap();
        assert_eq!(s.as_str(), "I2C_BUS Address: []\n");

        s.clear();
        write_scan_report(&mut s, "I2C_CO_NO2", "Addresses", &found).unwrap();
        assert_eq!(s.as_str(), "I2C_CO_NO2 Addresses: ['0x74', '0x76']\n");
    }

    #[test]
    fn test_mode_messages() {
        let mut s: String<128> = String::new();
        write_mode_waiting(&mut s, Some("NO2")).unwrap();
        write_mode_confirmed(&mut s, Some("NO2")).unwrap();
        write_mode_waiting(&mut s, None).unwrap();
        write_mode_confirmed(&mut s, None).unwrap();
        assert_eq!(
            s.as_str(),
            "wait acquire mode change for NO2\n\
             change acquire mode success for NO2\n\
             wait acquire mode change!\n\
             change acquire mode success!\n"
        );
    }
}
