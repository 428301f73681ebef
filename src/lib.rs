// src/lib.rs

//! Acquisition-mode handshake and polling loop for DFRobot-style multi-gas
//! sensor modules.
//!
//! The sensor driver itself is a collaborator: implement [`GasSensor`] for
//! it (or wrap an existing driver) and hand a factory to [`PollingClient`].
//! The client then
//!
//! 1. scans the bus and builds one handle per configured address,
//! 2. negotiates the acquisition mode on every handle, retrying until the
//!    module acknowledges,
//! 3. polls forever, printing every reading to a [`core::fmt::Write`] sink.
//!
//! ```no_run
//! # #[cfg(feature = "std")] {
//! use multigas_poller::{ClientConfig, PollingClient, StdConsole, StdDelay};
//! # use multigas_poller::{AcquireMode, Binding, Concentration, GasReading, GasSensor};
//! # struct Driver;
//! # impl GasSensor for Driver {
//! #     type Error = ();
//! #     fn change_acquire_mode(&mut self, _: AcquireMode) -> Result<bool, ()> { Ok(true) }
//! #     fn set_temp_compensation(&mut self, _: bool) -> Result<(), ()> { Ok(()) }
//! #     fn data_is_available(&mut self) -> Result<bool, ()> { Ok(false) }
//! #     fn read_all_data(&mut self) -> Result<GasReading, ()> { Err(()) }
//! #     fn read_gas_concentration(&mut self) -> Result<Concentration, ()> { Err(()) }
//! #     fn read_voltage_data(&mut self) -> Result<f32, ()> { Err(()) }
//! # }
//! # fn open_driver(_: Binding) -> Driver { Driver }
//! # struct NoBus;
//! # impl multigas_poller::ScanBus for NoBus {
//! #     type Error = ();
//! #     fn scan(&mut self) -> Result<multigas_poller::ScanResult, ()> { Err(()) }
//! # }
//! # let mut bus = NoBus;
//!
//! let config = ClientConfig::gas_concentration();
//! let mut client =
//!     PollingClient::connect(config, &mut bus, StdConsole, StdDelay, open_driver).unwrap();
//! client.negotiate_all().unwrap();
//! let _ = client.run_pull();
//! # }
//! ```

#![cfg_attr(not(test), no_std)] // no_std outside of unit tests
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(feature = "std", not(test)))]
extern crate std;

#[cfg(all(feature = "defmt", feature = "log"))]
compile_error!("Features \"defmt\" and \"log\" are mutually exclusive and cannot be enabled together");

// Must come first so the logging macros are visible in every module below
#[macro_use]
mod fmt;

pub mod client;
pub mod common;

#[cfg(feature = "std")]
mod std_impls;

// Re-export key types for convenience
pub use client::{PollingClient, SensorHandle};
pub use common::{
    AcquireMode, Binding, ClientConfig, Concentration, ConfigError, Error, GasReading, GasSensor,
    GasType, I2cAddr, ReadingKind, RetryPolicy, ScanBus, ScanResult, TransportConfig, Voltage,
};

#[cfg(feature = "std")]
pub use std_impls::{StdConsole, StdDelay};
