// src/client/mock.rs

// Scripted collaborators shared by the client unit tests.

use crate::common::{
    hal_traits::GasSensor,
    types::{AcquireMode, Concentration, GasReading, GasType},
};
use embedded_hal::delay::DelayNs;

// --- Mock Sensor Error ---
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum MockError {
    Bus,
}

// --- Mock Sensor ---
#[derive(Debug, Clone)]
pub(crate) struct MockSensor {
    /// Mode-change requests answered with `false` before the first `true`.
    pub nacks_before_ack: u32,
    /// Fail the mode change with a bus error instead.
    pub mode_fault: bool,
    pub mode_requests: u32,
    pub last_mode: Option<AcquireMode>,
    pub compensation_calls: u32,
    /// Compensation calls failing with a bus error before one succeeds.
    pub compensation_faults: u32,
    pub compensation_enabled: bool,
    /// Availability answers, cycled.
    pub availability: heapless::Vec<bool, 16>,
    pub availability_calls: usize,
    pub buffered: GasReading,
    pub buffered_reads: u32,
    pub concentration: Concentration,
    pub concentration_reads: u32,
    pub volts: f32,
    pub voltage_reads: u32,
    pub read_fault: bool,
}

impl MockSensor {
    pub fn new() -> Self {
        MockSensor {
            nacks_before_ack: 0,
            mode_fault: false,
            mode_requests: 0,
            last_mode: None,
            compensation_calls: 0,
            compensation_faults: 0,
            compensation_enabled: false,
            availability: heapless::Vec::new(),
            availability_calls: 0,
            buffered: GasReading { gas_type: GasType::O2, concentration: 20.9, temperature: 25.0 },
            buffered_reads: 0,
            concentration: Concentration { gas_type: GasType::CO, value: 0.0 },
            concentration_reads: 0,
            volts: 0.0,
            voltage_reads: 0,
            read_fault: false,
        }
    }

    pub fn nacking(n: u32) -> Self {
        MockSensor { nacks_before_ack: n, ..Self::new() }
    }

    pub fn with_availability(pattern: &[bool]) -> Self {
        let mut sensor = Self::new();
        sensor.availability.extend_from_slice(pattern).unwrap();
        sensor
    }

    pub fn with_concentration(gas_type: GasType, value: f32) -> Self {
        MockSensor { concentration: Concentration { gas_type, value }, ..Self::new() }
    }

    pub fn with_volts(volts: f32) -> Self {
        MockSensor { volts, ..Self::new() }
    }
}

impl GasSensor for MockSensor {
    type Error = MockError;

    fn change_acquire_mode(&mut self, mode: AcquireMode) -> Result<bool, Self::Error> {
        self.mode_requests += 1;
        if self.mode_fault {
            return Err(MockError::Bus);
        }
        if self.mode_requests <= self.nacks_before_ack {
            return Ok(false);
        }
        self.last_mode = Some(mode);
        Ok(true)
    }

    fn set_temp_compensation(&mut self, enabled: bool) -> Result<(), Self::Error> {
        self.compensation_calls += 1;
        if self.compensation_faults > 0 {
            self.compensation_faults -= 1;
            return Err(MockError::Bus);
        }
        self.compensation_enabled = enabled;
        Ok(())
    }

    fn data_is_available(&mut self) -> Result<bool, Self::Error> {
        if self.read_fault {
            return Err(MockError::Bus);
        }
        let answer = if self.availability.is_empty() {
            false
        } else {
            self.availability[self.availability_calls % self.availability.len()]
        };
        self.availability_calls += 1;
        Ok(answer)
    }

    fn read_all_data(&mut self) -> Result<GasReading, Self::Error> {
        self.buffered_reads += 1;
        Ok(self.buffered)
    }

    fn read_gas_concentration(&mut self) -> Result<Concentration, Self::Error> {
        if self.read_fault {
            return Err(MockError::Bus);
        }
        self.concentration_reads += 1;
        Ok(self.concentration)
    }

    fn read_voltage_data(&mut self) -> Result<f32, Self::Error> {
        if self.read_fault {
            return Err(MockError::Bus);
        }
        self.voltage_reads += 1;
        Ok(self.volts)
    }
}

// --- Mock Delay: records every pause in milliseconds ---
#[derive(Debug, Default)]
pub(crate) struct MockDelay {
    pub calls: heapless::Vec<u32, 64>,
}

impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.calls.push(ns / 1_000_000).unwrap();
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls.push(ms).unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic]
    fn test_mock_delay_refuses_to_drop_pauses() {
        let mut delay = MockDelay::new();
        for _ in 0..=64 {
            delay.delay_ms(1000);
        }
    }

    #[test]
    fn test_mock_delay_records_in_order() {
        let mut delay = MockDelay::new();
        delay.delay_ms(1000);
        delay.delay_ns(2_000_000);
        assert_eq!(delay.calls.as_slice(), &[1000, 2]);
    }
}
