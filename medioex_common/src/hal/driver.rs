//! I/O driver trait and error types.
//!
//! This module defines:
//! - `IoDriver` trait - Interface for pluggable board drivers
//! - `HalError` enum - Error types for driver operations
//! - `DriverFactory` type alias - Factory function type

use crate::hal::config::ServiceConfig;
use thiserror::Error;

/// Error types for driver operations.
#[derive(Debug, Clone, Error)]
pub enum HalError {
    /// Driver initialization failed
    #[error("Initialization failed: {0}")]
    InitFailed(String),

    /// Hardware communication error
    #[error("Hardware communication error: {0}")]
    CommunicationError(String),

    /// Driver not found
    #[error("Driver not found: {0}")]
    DriverNotFound(String),
}

/// Factory function type for creating driver instances.
pub type DriverFactory = fn() -> Box<dyn IoDriver>;

/// Trait defining the interface for board drivers.
///
/// The I/O core manages drivers through this trait, so the same core runs
/// against real hardware or a simulated board.
///
/// Outputs are write-only: there is no call to read a digital output, relay
/// or analog output back. The core keeps the last commanded value itself.
///
/// # Lifecycle
///
/// 1. `init()` - Called once before the first pin operation
/// 2. read/write calls - One per pin operation, serialized by the core
/// 3. `shutdown()` - Called when the service is stopping
///
/// # Pin numbering
///
/// Pins are already validated by the core. Digital outputs (1..=12) and
/// relays (13..=16) share `write_digital_output`.
pub trait IoDriver: Send {
    /// Returns the driver's unique identifier (e.g., "simulation").
    fn name(&self) -> &'static str;

    /// Returns the driver's semantic version.
    fn version(&self) -> &'static str;

    /// Initialize the driver with the service configuration.
    ///
    /// # Errors
    /// Return `HalError::InitFailed` if initialization cannot complete.
    fn init(&mut self, config: &ServiceConfig) -> Result<(), HalError>;

    /// Sample a digital input, returning 0 or 1.
    fn read_digital_input(&mut self, pin: u8) -> Result<u8, HalError>;

    /// Drive a digital output or relay to 0 or 1.
    fn write_digital_output(&mut self, pin: u8, value: u8) -> Result<(), HalError>;

    /// Sample an analog input, returning a raw count in `[0, 4095]`.
    fn read_analog_input(&mut self, pin: u8) -> Result<u16, HalError>;

    /// Drive an analog output with a raw count in `[0, 4095]`.
    fn write_analog_output(&mut self, pin: u8, raw: u16) -> Result<(), HalError>;

    /// Read a temperature sensor in degrees Celsius.
    fn read_temperature(&mut self, sensor: u8) -> Result<f64, HalError>;

    /// Graceful shutdown of the driver.
    fn shutdown(&mut self) -> Result<(), HalError>;
}
