// src/client/transport.rs

use super::{PollingClient, SensorHandle};
use crate::common::{
    config::{Binding, ClientConfig, TransportConfig, MAX_SENSORS},
    error::Error,
    format,
    hal_traits::{GasSensor, ScanBus},
};
use arrayvec::ArrayVec;
use core::fmt::Write;
use embedded_hal::delay::DelayNs;

impl<S, W, D> PollingClient<S, W, D>
where
    S: GasSensor,
    W: Write,
    D: DelayNs,
{
    /// Builds the client without touching any bus.
    ///
    /// `open` is called once per configured sensor, in configuration order,
    /// with the binding that sensor must use. Sharing one I2C bus between
    /// several drivers is the factory's business (for example through
    /// `embedded-hal-bus`).
    pub fn new<F>(config: ClientConfig, console: W, delay: D, open: F) -> Result<Self, Error<S::Error>>
    where
        F: FnMut(Binding) -> S,
    {
        config.validate()?;
        let handles = build_handles(&config.transport, open);
        debug!("Bound {} sensor(s)", handles.len());

        Ok(PollingClient {
            config,
            handles,
            console,
            delay,
        })
    }

    /// Like [`new`](Self::new), but first scans the I2C bus and prints what
    /// answered. The scan is informational only: a failed or incomplete scan
    /// never stops the client from being built. UART transports skip the scan.
    pub fn connect<B, F>(
        config: ClientConfig,
        bus: &mut B,
        mut console: W,
        delay: D,
        open: F,
    ) -> Result<Self, Error<S::Error>>
    where
        B: ScanBus + ?Sized,
        F: FnMut(Binding) -> S,
    {
        if let TransportConfig::I2c { .. } = config.transport {
            report_scan(bus, &mut console, config.bus_label, config.scan_heading)?;
        }
        Self::new(config, console, delay, open)
    }
}

/// Runs the bus scan and prints the addresses that answered.
pub(crate) fn report_scan<B, W>(
    bus: &mut B,
    console: &mut W,
    bus_label: &str,
    heading: &str,
) -> core::fmt::Result
where
    B: ScanBus + ?Sized,
    W: Write,
{
    match bus.scan() {
        Ok(found) => {
            debug!("Bus scan found {} device(s)", found.len());
            format::write_scan_report(console, bus_label, heading, &found)
        }
        Err(_e) => {
            warn!("Bus scan failed");
            format::write_scan_failed(console, bus_label)
        }
    }
}

/// One handle per configured sensor; UART always yields exactly one.
pub(crate) fn build_handles<S, F>(
    transport: &TransportConfig,
    mut open: F,
) -> ArrayVec<SensorHandle<S>, MAX_SENSORS>
where
    F: FnMut(Binding) -> S,
{
    let mut handles = ArrayVec::new();
    match transport {
        TransportConfig::I2c { sensors } => {
            // Both collections share MAX_SENSORS, so every push fits
            for spec in sensors {
                let binding = Binding::I2c { address: spec.address };
                trace!("Opening sensor at {}", spec.address);
                handles.push(SensorHandle::new(open(binding), binding, spec.label));
            }
        }
        TransportConfig::Uart { baud, label } => {
            let binding = Binding::Uart { baud: *baud };
            trace!("Opening sensor on UART at {} baud", *baud);
            handles.push(SensorHandle::new(open(binding), binding, *label));
        }
    }
    handles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::{MockDelay, MockError, MockSensor};
    use crate::common::{
        address::I2cAddr,
        config::SensorSpec,
        error::ConfigError,
        hal_traits::ScanResult,
        types::{AcquireMode, ModeState},
    };
    use heapless::String;

    struct FixedBus {
        result: Result<&'static [u8], MockError>,
        scans: u32,
    }

    impl ScanBus for FixedBus {
        type Error = MockError;

        fn scan(&mut self) -> Result<ScanResult, Self::Error> {
            self.scans += 1;
            let found = self.result?;
            let mut out = ScanResult::new();
            for a in found {
                out.push(*a).unwrap();
            }
            Ok(out)
        }
    }

    type Client = PollingClient<MockSensor, String<512>, MockDelay>;

    #[test]
    fn test_i2c_handles_follow_config_order() {
        let mut opened: heapless::Vec<Binding, 4> = heapless::Vec::new();
        let client = Client::new(
            ClientConfig::gas_concentration(),
            String::new(),
            MockDelay::new(),
            |b| {
                opened.push(b).unwrap();
                MockSensor::new()
            },
        )
        .unwrap();

        let no2 = I2cAddr::new(0x74).unwrap();
        let co = I2cAddr::new(0x76).unwrap();
        assert_eq!(opened.as_slice(), &[Binding::I2c { address: no2 }, Binding::I2c { address: co }]);
        assert_eq!(client.handles().len(), 2);
        assert_eq!(client.handles()[0].label(), Some("NO2"));
        assert_eq!(client.handles()[1].label(), Some("CO"));
        assert_eq!(client.handles()[1].binding(), Binding::I2c { address: co });
        assert!(client.handles().iter().all(|h| h.mode() == ModeState::Unknown));
    }

    #[test]
    fn test_uart_single_handle_at_9600() {
        let client = Client::new(
            ClientConfig::uart(AcquireMode::Pull),
            String::new(),
            MockDelay::new(),
            |_| MockSensor::new(),
        )
        .unwrap();
        assert_eq!(client.handles().len(), 1);
        assert_eq!(client.handles()[0].binding(), Binding::Uart { baud: 9600 });
    }

    #[test]
    fn test_connect_prints_scan() {
        let mut bus = FixedBus { result: Ok(&[0x74, 0x76]), scans: 0 };
        let client = Client::connect(
            ClientConfig::gas_concentration(),
            &mut bus,
            String::new(),
            MockDelay::new(),
            |_| MockSensor::new(),
        )
        .unwrap();
        assert_eq!(bus.scans, 1);
        assert_eq!(client.console().as_str(), "I2C_CO_NO2 Addresses: ['0x74', '0x76']\n");
    }

    #[test]
    fn test_scan_failure_does_not_gate_startup() {
        let mut bus = FixedBus { result: Err(MockError::Bus), scans: 0 };
        let client = Client::connect(
            ClientConfig::initiative_report(),
            &mut bus,
            String::new(),
            MockDelay::new(),
            |_| MockSensor::new(),
        )
        .unwrap();
        assert_eq!(client.console().as_str(), "I2C_BUS scan failed\n");
        assert_eq!(client.handles().len(), 1);
    }

    #[test]
    fn test_missing_sensor_in_scan_still_builds() {
        // Nothing answered at 0x77; the driver is left to report that later
        let mut bus = FixedBus { result: Ok(&[0x20]), scans: 0 };
        let client = Client::connect(
            ClientConfig::voltage(),
            &mut bus,
            String::new(),
            MockDelay::new(),
            |_| MockSensor::new(),
        )
        .unwrap();
        assert_eq!(client.console().as_str(), "I2C_BUS Address: ['0x20']\n");
        assert_eq!(client.handles().len(), 1);
    }

    #[test]
    fn test_uart_skips_scan() {
        let mut bus = FixedBus { result: Ok(&[0x77]), scans: 0 };
        let client = Client::connect(
            ClientConfig::uart(AcquireMode::Push),
            &mut bus,
            String::new(),
            MockDelay::new(),
            |_| MockSensor::new(),
        )
        .unwrap();
        assert_eq!(bus.scans, 0);
        assert!(client.console().is_empty());
    }

    #[test]
    fn test_duplicate_addresses_rejected() {
        let mut sensors = arrayvec::ArrayVec::new();
        sensors.push(SensorSpec::new(I2cAddr::DEFAULT_ADDRESS));
        sensors.push(SensorSpec::new(I2cAddr::DEFAULT_ADDRESS));
        let config = ClientConfig::new(TransportConfig::I2c { sensors }, AcquireMode::Pull);

        let mut opened = 0;
        let result = Client::new(config, String::new(), MockDelay::new(), |_| {
            opened += 1;
            MockSensor::new()
        });
        assert!(matches!(result, Err(Error::Config(ConfigError::DuplicateAddress(0x77)))));
        assert_eq!(opened, 0);
    }
}
