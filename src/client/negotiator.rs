// src/client/negotiator.rs

use super::{PollingClient, SensorHandle};
use crate::common::{
    config::RetryPolicy,
    error::Error,
    format,
    hal_traits::GasSensor,
    timing,
    types::{AcquireMode, ModeState},
};
use core::fmt::Write;
use embedded_hal::delay::DelayNs;

impl<S, W, D> PollingClient<S, W, D>
where
    S: GasSensor,
    W: Write,
    D: DelayNs,
{
    /// Negotiates the configured acquisition mode on every sensor, in order.
    /// Stops at the first sensor that faults or runs out of retries.
    pub fn negotiate_all(&mut self) -> Result<(), Error<S::Error>> {
        for index in 0..self.handles.len() {
            self.negotiate(index)?;
        }
        Ok(())
    }

    /// Brings sensor `index` into the configured acquisition mode.
    ///
    /// Keeps requesting the mode change until the module acknowledges,
    /// printing a waiting line and pausing after every refusal. Under the
    /// default [`RetryPolicy::forever`](crate::RetryPolicy::forever) this
    /// never gives up; a bounded policy returns
    /// [`Error::ModeChangeTimeout`] instead.
    ///
    /// Once acknowledged, prints a confirmation, enables temperature
    /// compensation if configured, and waits the settle delay.
    ///
    /// A sensor already confirmed in the target mode is left alone: no
    /// request, no output, no second compensation call. If enabling
    /// compensation failed last time, only that step is repeated.
    pub fn negotiate(&mut self, index: usize) -> Result<(), Error<S::Error>> {
        self.check_index(index)?;
        let target = self.config.mode;
        let retry = self.config.retry;
        let compensate = self.config.temp_compensation;
        let handle = &mut self.handles[index];

        let confirmed = handle.mode.is_confirmed(target);
        if confirmed && (!compensate || handle.compensation_applied) {
            trace!("Sensor {} already in {}", index, target);
            return Ok(());
        }

        if !confirmed {
            Self::request_mode(handle, &mut self.console, &mut self.delay, index, target, retry)?;
        }

        if compensate && !handle.compensation_applied {
            handle
                .sensor
                .set_temp_compensation(true)
                .map_err(Error::Sensor)?;
            handle.compensation_applied = true;
            debug!("Temperature compensation on for sensor {}", index);
        }

        if !self.config.settle_delay.is_zero() {
            self.delay.delay_ms(timing::as_millis_u32(self.config.settle_delay));
        }
        Ok(())
    }

    // Repeats the mode-change request until acknowledged or the policy runs out.
    fn request_mode(
        handle: &mut SensorHandle<S>,
        console: &mut W,
        delay: &mut D,
        index: usize,
        target: AcquireMode,
        retry: RetryPolicy,
    ) -> Result<(), Error<S::Error>> {
        info!("Requesting {} mode on sensor {}", target, index);
        let mut attempts: u32 = 0;
        loop {
            attempts = attempts.saturating_add(1);
            let acknowledged = handle
                .sensor
                .change_acquire_mode(target)
                .map_err(Error::Sensor)?;
            if acknowledged {
                break;
            }

            format::write_mode_waiting(console, handle.label)?;
            if retry.is_exhausted(attempts) {
                warn!("Sensor {} never acknowledged {} after {} attempts", index, target, attempts);
                return Err(Error::ModeChangeTimeout { attempts });
            }
            let pause = retry.delay_after(attempts);
            debug!("Mode change not acknowledged (attempt {}), retrying", attempts);
            delay.delay_ms(timing::as_millis_u32(pause));
        }

        handle.mode = ModeState::Confirmed(target);
        format::write_mode_confirmed(console, handle.label)?;
        Ok(())
    }
}
