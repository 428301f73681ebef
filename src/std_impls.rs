// src/std_impls.rs

//! Host-side console and delay, for running the client on a Linux board
//! (e.g. with a `linux-embedded-hal` driver underneath).

use core::fmt;
use embedded_hal::delay::DelayNs;
use std::io::Write as _;
use std::time::Duration;

/// Console that writes straight to stdout.
#[derive(Debug, Default, Copy, Clone)]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub struct StdConsole;

impl fmt::Write for StdConsole {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        std::io::stdout().write_all(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

/// Delay that puts the calling thread to sleep.
#[derive(Debug, Default, Copy, Clone)]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(ns as u64));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(ms as u64));
    }
}
