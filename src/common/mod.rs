// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod address;
pub mod config;
pub mod error;
pub mod format;
pub mod hal_traits;
pub mod timing;
pub mod types;

// --- Re-export key types/traits for easier access ---

// From address.rs
pub use address::I2cAddr;

// From config.rs
pub use config::{Binding, ClientConfig, ReadingKind, RetryPolicy, SensorSpec, TransportConfig, MAX_SENSORS};

// From error.rs
pub use error::{ConfigError, Error};

// From hal_traits.rs
pub use hal_traits::{GasSensor, ScanBus, ScanResult};

// From types.rs
pub use types::{AcquireMode, Concentration, GasReading, GasType, ModeState, Reading, Voltage};

// timing and format stay behind their module paths (common::timing::POLL_INTERVAL, ...)
