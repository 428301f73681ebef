// src/client/mod.rs

// impl blocks of PollingClient are split by concern
mod negotiator;
mod poll_loop;
mod transport;

#[cfg(test)]
pub(crate) mod mock;

use crate::common::{
    config::{Binding, ClientConfig, MAX_SENSORS},
    error::Error,
    hal_traits::GasSensor,
    types::{ModeState, Reading},
};
use arrayvec::ArrayVec;
use core::fmt::Write;
use embedded_hal::delay::DelayNs;

/// One sensor module and everything the client knows about it.
#[derive(Debug)]
pub struct SensorHandle<S> {
    sensor: S,
    binding: Binding,
    label: Option<&'static str>,
    mode: ModeState,
    compensation_applied: bool,
    last_reading: Option<Reading>,
}

impl<S> SensorHandle<S> {
    pub fn new(sensor: S, binding: Binding, label: Option<&'static str>) -> Self {
        SensorHandle {
            sensor,
            binding,
            label,
            mode: ModeState::Unknown,
            compensation_applied: false,
            last_reading: None,
        }
    }

    pub fn binding(&self) -> Binding {
        self.binding
    }

    pub fn label(&self) -> Option<&'static str> {
        self.label
    }

    pub fn mode(&self) -> ModeState {
        self.mode
    }

    /// Most recent reading; earlier ones are not kept.
    pub fn last_reading(&self) -> Option<&Reading> {
        self.last_reading.as_ref()
    }

    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    /// Drops the confirmed mode, e.g. after the module was power cycled.
    /// The next negotiation talks to the module again.
    pub fn forget_mode(&mut self) {
        self.mode = ModeState::Unknown;
        self.compensation_applied = false;
    }

    pub fn into_inner(self) -> S {
        self.sensor
    }
}

/// Drives a fixed set of gas sensor modules: negotiates their acquisition
/// mode, then polls and prints readings at a fixed cadence.
///
/// All sensors are used from this one owner, strictly one after another.
pub struct PollingClient<S, W, D>
where
    S: GasSensor,
    W: Write,
    D: DelayNs,
{
    config: ClientConfig,
    handles: ArrayVec<SensorHandle<S>, MAX_SENSORS>,
    console: W,
    delay: D,
}

impl<S, W, D> PollingClient<S, W, D>
where
    S: GasSensor,
    W: Write,
    D: DelayNs,
{
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn handles(&self) -> &[SensorHandle<S>] {
        &self.handles
    }

    pub fn handle(&self, index: usize) -> Option<&SensorHandle<S>> {
        self.handles.get(index)
    }

    pub fn handle_mut(&mut self, index: usize) -> Option<&mut SensorHandle<S>> {
        self.handles.get_mut(index)
    }

    pub fn console(&self) -> &W {
        &self.console
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Takes the client apart, e.g. to reuse the console after a fault.
    pub fn release(self) -> (ArrayVec<SensorHandle<S>, MAX_SENSORS>, W, D) {
        (self.handles, self.console, self.delay)
    }

    fn check_index(&self, index: usize) -> Result<(), Error<S::Error>> {
        if index < self.handles.len() {
            Ok(())
        } else {
            Err(Error::NoSuchSensor { index })
        }
    }
}
