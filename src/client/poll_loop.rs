// src/client/poll_loop.rs

use super::PollingClient;
use crate::common::{
    config::ReadingKind,
    error::Error,
    format,
    hal_traits::GasSensor,
    timing,
    types::{AcquireMode, Concentration, GasReading, ModeState, Reading, Voltage},
};
use core::convert::Infallible;
use core::fmt::Write;
use embedded_hal::delay::DelayNs;

impl<S, W, D> PollingClient<S, W, D>
where
    S: GasSensor,
    W: Write,
    D: DelayNs,
{
    // --- Single reads ---

    /// Push mode: takes the buffered reading of sensor `index` if the module
    /// flags one as ready, `WouldBlock` otherwise.
    ///
    /// Only an explicit `Ok(true)` from the driver counts as ready.
    pub fn try_read_push(&mut self, index: usize) -> nb::Result<GasReading, Error<S::Error>> {
        self.require_mode(index, AcquireMode::Push)
            .map_err(nb::Error::Other)?;
        let handle = &mut self.handles[index];

        let available = handle
            .sensor
            .data_is_available()
            .map_err(|e| nb::Error::Other(Error::Sensor(e)))?;
        if !available {
            return Err(nb::Error::WouldBlock);
        }

        let reading = handle
            .sensor
            .read_all_data()
            .map_err(|e| nb::Error::Other(Error::Sensor(e)))?;
        handle.last_reading = Some(Reading::Gas(reading));
        Ok(reading)
    }

    /// Pull mode: requests one concentration reading from sensor `index`.
    pub fn read_concentration(&mut self, index: usize) -> Result<Concentration, Error<S::Error>> {
        self.require_mode(index, AcquireMode::Pull)?;
        let handle = &mut self.handles[index];
        let reading = handle.sensor.read_gas_concentration().map_err(Error::Sensor)?;
        handle.last_reading = Some(Reading::Concentration(reading));
        Ok(reading)
    }

    /// Pull mode: requests the raw probe voltage of sensor `index`.
    pub fn read_voltage(&mut self, index: usize) -> Result<Voltage, Error<S::Error>> {
        self.require_mode(index, AcquireMode::Pull)?;
        let handle = &mut self.handles[index];
        let volts = handle.sensor.read_voltage_data().map_err(Error::Sensor)?;
        let reading = Voltage { volts };
        handle.last_reading = Some(Reading::Voltage(reading));
        Ok(reading)
    }

    // --- One poll cycle ---

    /// One push-mode cycle: prints a block for every sensor that has data,
    /// then pauses one poll interval regardless. Returns how many blocks
    /// were printed.
    pub fn poll_push_once(&mut self) -> Result<usize, Error<S::Error>> {
        let mut printed = 0;
        for index in 0..self.handles.len() {
            match self.try_read_push(index) {
                Ok(reading) => {
                    format::write_gas_block(&mut self.console, &reading)?;
                    printed += 1;
                }
                Err(nb::Error::WouldBlock) => trace!("Sensor {} has no new data", index),
                Err(nb::Error::Other(e)) => return Err(e),
            }
        }
        self.pause();
        Ok(printed)
    }

    /// One pull-mode cycle: one concentration line per sensor, in order,
    /// then one poll interval pause.
    pub fn poll_pull_once(&mut self) -> Result<(), Error<S::Error>> {
        for index in 0..self.handles.len() {
            let reading = self.read_concentration(index)?;
            format::write_concentration_line(&mut self.console, &reading)?;
        }
        self.pause();
        Ok(())
    }

    /// One voltage cycle: one voltage line per sensor, then one poll
    /// interval pause.
    pub fn poll_voltage_once(&mut self) -> Result<(), Error<S::Error>> {
        for index in 0..self.handles.len() {
            let reading = self.read_voltage(index)?;
            format::write_voltage_line(&mut self.console, &reading)?;
        }
        self.pause();
        Ok(())
    }

    // --- Forever loops ---
    // None of these return while the sensors and the console keep working.

    pub fn run_push(&mut self) -> Result<Infallible, Error<S::Error>> {
        loop {
            self.poll_push_once()?;
        }
    }

    pub fn run_pull(&mut self) -> Result<Infallible, Error<S::Error>> {
        loop {
            self.poll_pull_once()?;
        }
    }

    pub fn run_voltage(&mut self) -> Result<Infallible, Error<S::Error>> {
        loop {
            self.poll_voltage_once()?;
        }
    }

    /// Negotiates every sensor, then polls forever in the loop matching the
    /// configured mode and reading kind.
    pub fn run(&mut self) -> Result<Infallible, Error<S::Error>> {
        self.negotiate_all()?;
        info!("All sensors confirmed, polling");
        match (self.config.mode, self.config.reading) {
            (AcquireMode::Push, ReadingKind::Gas) => self.run_push(),
            (AcquireMode::Pull, ReadingKind::Gas) => self.run_pull(),
            (AcquireMode::Pull, ReadingKind::Voltage) => self.run_voltage(),
            // Rejected by ClientConfig::validate when the client was built
            (AcquireMode::Push, ReadingKind::Voltage) => Err(Error::WrongMode { index: 0 }),
        }
    }

    // --- Helpers ---

    fn require_mode(&self, index: usize, mode: AcquireMode) -> Result<(), Error<S::Error>> {
        self.check_index(index)?;
        match self.handles[index].mode {
            ModeState::Confirmed(confirmed) if confirmed == mode => Ok(()),
            ModeState::Confirmed(_) => Err(Error::WrongMode { index }),
            ModeState::Unknown => Err(Error::ModeNotConfirmed { index }),
        }
    }

    fn pause(&mut self) {
        self.delay.delay_ms(timing::as_millis_u32(self.config.poll_interval));
    }
}
