// src/common/config.rs

use super::address::I2cAddr;
use super::error::ConfigError;
use super::timing;
use super::types::AcquireMode;
use arrayvec::ArrayVec;
use core::time::Duration;

/// Most sensors one client drives.
pub const MAX_SENSORS: usize = 8;

/// One sensor on an I2C bus.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorSpec {
    pub address: I2cAddr,
    /// Name used in status lines ("wait acquire mode change for NO2").
    pub label: Option<&'static str>,
}

impl SensorSpec {
    pub const fn new(address: I2cAddr) -> Self {
        SensorSpec { address, label: None }
    }

    pub const fn labelled(address: I2cAddr, label: &'static str) -> Self {
        SensorSpec { address, label: Some(label) }
    }
}

/// Which link the sensors sit on.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum TransportConfig {
    /// One shared I2C bus, one sensor per address.
    I2c { sensors: ArrayVec<SensorSpec, MAX_SENSORS> },
    /// A single sensor on a serial line.
    Uart { baud: u32, label: Option<&'static str> },
}

impl TransportConfig {
    /// Builds an I2C transport, rejecting empty, oversized or duplicate sets.
    pub fn i2c(sensors: &[SensorSpec]) -> Result<Self, ConfigError> {
        let mut list = ArrayVec::new();
        for spec in sensors {
            list.try_push(*spec)
                .map_err(|_| ConfigError::TooManySensors { max: MAX_SENSORS })?;
        }
        let transport = TransportConfig::I2c { sensors: list };
        transport.validate()?;
        Ok(transport)
    }

    pub const fn uart() -> Self {
        TransportConfig::Uart { baud: timing::UART_BAUD, label: None }
    }

    /// Checks the address invariants. Also run by the client on connect, so a
    /// hand-assembled value cannot slip past.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            TransportConfig::I2c { sensors } => {
                if sensors.is_empty() {
                    return Err(ConfigError::NoSensors);
                }
                for (i, spec) in sensors.iter().enumerate() {
                    if sensors[..i].iter().any(|s| s.address == spec.address) {
                        return Err(ConfigError::DuplicateAddress(spec.address.as_u8()));
                    }
                }
                Ok(())
            }
            TransportConfig::Uart { .. } => Ok(()),
        }
    }

    /// Number of handles this transport yields.
    pub fn sensor_count(&self) -> usize {
        match self {
            TransportConfig::I2c { sensors } => sensors.len(),
            TransportConfig::Uart { .. } => 1,
        }
    }
}

/// What a single handle is bound to; passed to the driver factory.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Binding {
    I2c { address: I2cAddr },
    Uart { baud: u32 },
}

/// What the poll loop reads once the mode is confirmed.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadingKind {
    /// Gas concentration (push: buffered block, pull: one line per sensor).
    #[default]
    Gas,
    /// Raw probe voltage, pull mode only.
    Voltage,
}

/// How long the negotiator keeps asking for a mode change.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RetryPolicy {
    /// `None` retries forever.
    max_attempts: Option<u32>,
    delay: Duration,
    max_delay: Duration,
    backoff: bool,
}

impl RetryPolicy {
    /// Retry every second until acknowledged. Blocks startup indefinitely if
    /// the module never answers.
    pub const fn forever() -> Self {
        RetryPolicy {
            max_attempts: None,
            delay: timing::MODE_RETRY_DELAY,
            max_delay: timing::MODE_RETRY_DELAY,
            backoff: false,
        }
    }

    /// Give up after `max_attempts` requests (at least one is always made),
    /// doubling the pause after each failure up to
    /// [`MODE_RETRY_DELAY_MAX`](timing::MODE_RETRY_DELAY_MAX).
    pub const fn bounded(max_attempts: u32) -> Self {
        RetryPolicy {
            max_attempts: Some(if max_attempts == 0 { 1 } else { max_attempts }),
            delay: timing::MODE_RETRY_DELAY,
            max_delay: timing::MODE_RETRY_DELAY_MAX,
            backoff: true,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        if !self.backoff {
            self.max_delay = delay;
        }
        self
    }

    pub const fn max_attempts(&self) -> Option<u32> {
        self.max_attempts
    }

    /// True once `attempts` requests have been made and no more are allowed.
    pub fn is_exhausted(&self, attempts: u32) -> bool {
        matches!(self.max_attempts, Some(max) if attempts >= max)
    }

    /// Pause after the `failures`-th unacknowledged request (1-based).
    pub fn delay_after(&self, failures: u32) -> Duration {
        if !self.backoff {
            return self.delay;
        }
        let shift = failures.saturating_sub(1).min(16);
        self.delay
            .checked_mul(1u32 << shift)
            .map_or(self.max_delay, |d| d.min(self.max_delay))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::forever()
    }
}

/// Everything the client needs to know, fixed in code.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub transport: TransportConfig,
    pub mode: AcquireMode,
    pub reading: ReadingKind,
    /// Enable temperature compensation once the mode is confirmed.
    pub temp_compensation: bool,
    pub retry: RetryPolicy,
    pub poll_interval: Duration,
    /// Pause after a confirmed mode change.
    pub settle_delay: Duration,
    /// Name printed in front of the bus scan result.
    pub bus_label: &'static str,
    /// Word between the bus label and the address list.
    pub scan_heading: &'static str,
}

impl ClientConfig {
    pub fn new(transport: TransportConfig, mode: AcquireMode) -> Self {
        ClientConfig {
            transport,
            mode,
            reading: ReadingKind::Gas,
            temp_compensation: false,
            retry: RetryPolicy::forever(),
            poll_interval: timing::POLL_INTERVAL,
            settle_delay: timing::MODE_SETTLE_DELAY,
            bus_label: "I2C_BUS",
            scan_heading: "Address",
        }
    }

    /// One module at 0x77 reporting on its own.
    pub fn initiative_report() -> Self {
        let sensors = single(SensorSpec::new(I2cAddr::DEFAULT_ADDRESS));
        ClientConfig::new(TransportConfig::I2c { sensors }, AcquireMode::Push)
    }

    /// NO2 at 0x74 and CO at 0x76 on one bus, polled on request with
    /// temperature compensation.
    pub fn gas_concentration() -> Self {
        let mut sensors = ArrayVec::new();
        sensors.push(SensorSpec::labelled(I2cAddr::from_raw(0x74), "NO2"));
        sensors.push(SensorSpec::labelled(I2cAddr::from_raw(0x76), "CO"));
        ClientConfig::new(TransportConfig::I2c { sensors }, AcquireMode::Pull)
            .with_temp_compensation(true)
            .with_bus_label("I2C_CO_NO2")
            .with_scan_heading("Addresses")
    }

    /// One module at 0x77 read as a raw voltage.
    pub fn voltage() -> Self {
        let sensors = single(SensorSpec::new(I2cAddr::DEFAULT_ADDRESS));
        ClientConfig::new(TransportConfig::I2c { sensors }, AcquireMode::Pull)
            .with_reading(ReadingKind::Voltage)
            .with_settle_delay(Duration::ZERO)
    }

    /// One module on the serial line at 9600 baud.
    pub fn uart(mode: AcquireMode) -> Self {
        ClientConfig::new(TransportConfig::uart(), mode)
    }

    pub fn with_reading(mut self, reading: ReadingKind) -> Self {
        self.reading = reading;
        self
    }

    pub fn with_temp_compensation(mut self, enabled: bool) -> Self {
        self.temp_compensation = enabled;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn with_bus_label(mut self, label: &'static str) -> Self {
        self.bus_label = label;
        self
    }

    pub fn with_scan_heading(mut self, heading: &'static str) -> Self {
        self.scan_heading = heading;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reading == ReadingKind::Voltage && self.mode != AcquireMode::Pull {
            return Err(ConfigError::VoltageNeedsPull);
        }
        self.transport.validate()
    }
}

fn single(spec: SensorSpec) -> ArrayVec<SensorSpec, MAX_SENSORS> {
    let mut sensors = ArrayVec::new();
    sensors.push(spec);
    sensors
}
