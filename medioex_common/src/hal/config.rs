//! Service configuration types.
//!
//! This module contains the configuration loaded from `config.toml`:
//! - `ServiceConfig` - Top-level file layout
//! - `BoardConfig` - Driver selection and board options
//! - `SimulationConfig` - Initial state of the simulated board

use crate::config::{ConfigError, SharedConfig};
use crate::consts::{AI_COUNT, DEFAULT_TEMPERATURE_SENSOR, DI_COUNT, RAW_MAX};
use serde::{Deserialize, Serialize};

/// Default function for the driver name
fn default_driver() -> String {
    "simulation".to_string()
}

/// Default function for the temperature sensor
fn default_temperature_sensor() -> u8 {
    DEFAULT_TEMPERATURE_SENSOR
}

/// Default function for the simulated temperature
fn default_temperature() -> f64 {
    25.0
}

/// Main configuration loaded from `config.toml`.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// log_level = "debug"
/// service_name = "medioex-io"
///
/// [board]
/// driver = "simulation"
/// temperature_sensor = 1
/// reset_on_start = true
///
/// [simulation]
/// digital_inputs = [1, 0, 1]
/// analog_inputs = [0, 2048]
/// temperature = 31.5
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Logging and instance name.
    #[serde(default)]
    pub shared: SharedConfig,

    /// Board and driver options.
    #[serde(default)]
    pub board: BoardConfig,

    /// Simulated board state, used by the "simulation" driver only.
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl ServiceConfig {
    /// Validate every section.
    ///
    /// # Errors
    /// Returns `ConfigError::ValidationError` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        self.board.validate()?;
        self.simulation.validate()?;
        Ok(())
    }
}

/// Driver selection and board-level options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoardConfig {
    /// Registered driver name.
    #[serde(default = "default_driver")]
    pub driver: String,

    /// Sensor id passed to `read_temperature`.
    #[serde(default = "default_temperature_sensor")]
    pub temperature_sensor: u8,

    /// Drive every output to 0 at startup so the hardware matches the
    /// zeroed shadow cache.
    #[serde(default)]
    pub reset_on_start: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            driver: default_driver(),
            temperature_sensor: default_temperature_sensor(),
            reset_on_start: false,
        }
    }
}

impl BoardConfig {
    /// Validate the board section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.driver.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "board.driver cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Initial state of the simulated board.
///
/// Entry `i` of each list maps to pin `i + 1`; missing entries read as 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Digital input levels (0 or 1), pins 1..=16.
    #[serde(default)]
    pub digital_inputs: Vec<u8>,

    /// Analog input raw counts (0..=4095), pins 1..=4.
    #[serde(default)]
    pub analog_inputs: Vec<u16>,

    /// Reported board temperature in degrees Celsius.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            digital_inputs: Vec::new(),
            analog_inputs: Vec::new(),
            temperature: default_temperature(),
        }
    }
}

impl SimulationConfig {
    /// Validate the simulation section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.digital_inputs.len() > DI_COUNT {
            return Err(ConfigError::ValidationError(format!(
                "simulation.digital_inputs has {} entries, board has {} inputs",
                self.digital_inputs.len(),
                DI_COUNT
            )));
        }
        if let Some(pos) = self.digital_inputs.iter().position(|&v| v > 1) {
            return Err(ConfigError::ValidationError(format!(
                "simulation.digital_inputs[{pos}] must be 0 or 1"
            )));
        }
        if self.analog_inputs.len() > AI_COUNT {
            return Err(ConfigError::ValidationError(format!(
                "simulation.analog_inputs has {} entries, board has {} inputs",
                self.analog_inputs.len(),
                AI_COUNT
            )));
        }
        if let Some(pos) = self.analog_inputs.iter().position(|&v| v > RAW_MAX) {
            return Err(ConfigError::ValidationError(format!(
                "simulation.analog_inputs[{pos}] exceeds {RAW_MAX}"
            )));
        }
        if !self.temperature.is_finite() {
            return Err(ConfigError::ValidationError(
                "simulation.temperature must be finite".to_string(),
            ));
        }
        Ok(())
    }
}
