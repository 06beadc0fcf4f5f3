//! I/O Core: range-checked pin operations over a driver and the shadow cache.
//!
//! `IoCore` owns the active driver and the output shadow behind one mutex,
//! so a driver write and the matching cache update for a pin form a single
//! critical section. Every single-pin operation follows the same order:
//!
//! 1. validate the pin against its class bounds
//! 2. validate the value (writes only)
//! 3. call the driver
//! 4. update the shadow (outputs only)
//!
//! A rejection in 1 or 2 touches neither driver nor shadow. A driver error
//! in 3 leaves the shadow at its previous value.

use medioex_common::hal::config::ServiceConfig;
use medioex_common::hal::driver::{HalError, IoDriver};
use medioex_common::io::scaling::{raw_to_f64, truncate_raw};
use medioex_common::io::{ChannelClass, IoError, ScaleRange};
use parking_lot::Mutex;
use std::time::Duration;
use tracing::{debug, info, trace, warn};

use crate::driver_registry::DriverRegistry;
use crate::request::{Action, Command, OpResult, OpValue};
use crate::shadow::{OutputShadow, OutputValue};
use crate::status::StatusSnapshot;

/// Driver and shadow, always locked together.
struct Board {
    driver: Box<dyn IoDriver>,
    shadow: OutputShadow,
}

/// Result of an analog output write.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalogCommit {
    /// Scaled value requested by the caller.
    pub value: f64,
    /// Untruncated raw-equivalent, as recorded in the shadow.
    pub raw_equivalent: f64,
    /// Truncated count handed to the driver.
    pub raw: u16,
}

/// I/O Core manages the driver, the output shadow and pin operations.
pub struct IoCore {
    board: Mutex<Board>,
    temperature_sensor: u8,
}

impl IoCore {
    /// Wrap an initialized driver. All outputs start at 0 in the shadow.
    pub fn new(driver: Box<dyn IoDriver>, temperature_sensor: u8) -> Self {
        info!(
            "IoCore created with driver {} v{} (temperature sensor {})",
            driver.name(),
            driver.version(),
            temperature_sensor
        );
        Self {
            board: Mutex::new(Board {
                driver,
                shadow: OutputShadow::new(),
            }),
            temperature_sensor,
        }
    }

    /// Create the named driver from `registry`, initialize it and build the core.
    ///
    /// Applies `board.reset_on_start`.
    ///
    /// # Errors
    /// `HalError::DriverNotFound` for an unknown driver, or any error from the
    /// driver's `init` or the startup reset.
    pub fn from_config(
        config: &ServiceConfig,
        registry: &DriverRegistry,
        driver_name: &str,
    ) -> Result<Self, HalError> {
        info!("Initializing IoCore with driver '{}'...", driver_name);

        let mut driver = registry.create_driver(driver_name)?;
        driver.init(config)?;

        let core = Self::new(driver, config.board.temperature_sensor);

        if config.board.reset_on_start {
            info!("Resetting all outputs on start");
            core.reset_all().map_err(|e| match e {
                IoError::Hardware(hal) => hal,
                other => HalError::InitFailed(other.to_string()),
            })?;
        }

        info!("IoCore initialized successfully");
        Ok(core)
    }

    // ─── Digital inputs ─────────────────────────────────────────────

    /// Sample a digital input. Never cached.
    pub fn read_digital_input(&self, pin: i64) -> Result<u8, IoError> {
        let pin = ChannelClass::DigitalInput.checked_pin(pin)?;
        let mut board = self.board.lock();
        let level = board.driver.read_digital_input(pin)?;
        trace!("DI[{}] = {}", pin, level);
        Ok(level)
    }

    // ─── Digital outputs & relays ───────────────────────────────────

    /// Recorded level of a digital output or relay. Never touches the driver.
    pub fn read_binary_output(&self, class: ChannelClass, pin: i64) -> Result<u8, IoError> {
        Self::require_binary(class, Action::Read)?;
        let pin = class.checked_pin(pin)?;
        self.board.lock().shadow.level(class, pin)
    }

    /// Drive a digital output or relay to `value` (0 or 1).
    pub fn write_binary_output(
        &self,
        class: ChannelClass,
        pin: i64,
        value: i64,
    ) -> Result<u8, IoError> {
        Self::require_binary(class, Action::Write)?;
        let pin = class.checked_pin(pin)?;
        let level = match value {
            0 => 0,
            1 => 1,
            _ => return Err(IoError::ValueDomain { class, value }),
        };
        self.commit_level(class, pin, level)
    }

    /// Drive a digital output or relay to 1.
    pub fn set_binary_output(&self, class: ChannelClass, pin: i64) -> Result<u8, IoError> {
        Self::require_binary(class, Action::Set)?;
        let pin = class.checked_pin(pin)?;
        self.commit_level(class, pin, 1)
    }

    /// Drive a digital output or relay to 0.
    pub fn reset_binary_output(&self, class: ChannelClass, pin: i64) -> Result<u8, IoError> {
        Self::require_binary(class, Action::Reset)?;
        let pin = class.checked_pin(pin)?;
        self.commit_level(class, pin, 0)
    }

    // ─── Analog ─────────────────────────────────────────────────────

    /// Sample an analog input and map it onto `range`. Never cached.
    pub fn read_analog_input(&self, pin: i64, range: ScaleRange) -> Result<f64, IoError> {
        let pin = ChannelClass::AnalogInput.checked_pin(pin)?;
        let raw = self.board.lock().driver.read_analog_input(pin)?;
        trace!("AI[{}] raw = {}", pin, raw);
        Ok(range.to_scaled(raw_to_f64(raw)))
    }

    /// Recorded analog output mapped onto `range`. Never touches the driver.
    pub fn read_analog_output(&self, pin: i64, range: ScaleRange) -> Result<f64, IoError> {
        let pin = ChannelClass::AnalogOutput.checked_pin(pin)?;
        let raw = self.board.lock().shadow.analog(pin)?;
        Ok(range.to_scaled(raw))
    }

    /// Drive an analog output with `value` expressed on `range`.
    ///
    /// The driver receives the raw-equivalent truncated toward zero; the
    /// shadow keeps the untruncated raw-equivalent, which `to_raw` guarantees
    /// is finite for any finite bounds.
    pub fn write_analog_output(
        &self,
        pin: i64,
        value: f64,
        range: ScaleRange,
    ) -> Result<AnalogCommit, IoError> {
        let pin = ChannelClass::AnalogOutput.checked_pin(pin)?;
        range.check(value)?;
        let raw_equivalent = range.to_raw(value)?;
        let raw = truncate_raw(raw_equivalent);

        let mut board = self.board.lock();
        board.driver.write_analog_output(pin, raw)?;
        board.shadow.set(
            ChannelClass::AnalogOutput,
            pin,
            OutputValue::Raw(raw_equivalent),
        )?;
        drop(board);

        debug!(
            "AO[{}] <- {} (raw {:.3} -> {}, scale [{}, {}])",
            pin, value, raw_equivalent, raw, range.start, range.end
        );
        Ok(AnalogCommit {
            value,
            raw_equivalent,
            raw,
        })
    }

    // ─── Board-wide ─────────────────────────────────────────────────

    /// Drive every output to 0: analog outputs, then digital outputs, then
    /// relays, one pin at a time.
    ///
    /// The lock is taken per pin, so concurrent readers may see a partially
    /// reset board. A driver error stops the sweep; pins already swept stay
    /// reset and the rest keep their previous values.
    pub fn reset_all(&self) -> Result<(), IoError> {
        // Reset writes 0 on the default scale.
        let zero = ScaleRange::RAW.to_raw(0.0)?;
        for class in ChannelClass::OUTPUTS {
            for pin in class.range().pins() {
                let mut board = self.board.lock();
                let Board { driver, shadow } = &mut *board;
                let result = if class == ChannelClass::AnalogOutput {
                    driver
                        .write_analog_output(pin, truncate_raw(zero))
                        .map(|()| OutputValue::Raw(zero))
                } else {
                    driver.write_digital_output(pin, 0).map(|()| OutputValue::Level(0))
                };
                match result {
                    Ok(value) => shadow.set(class, pin, value)?,
                    Err(e) => {
                        warn!("Reset-all stopped at {}[{}]: {}", class, pin, e);
                        return Err(e.into());
                    }
                }
            }
        }
        info!("All outputs reset");
        Ok(())
    }

    /// Build a full status snapshot. Inputs are read fresh.
    pub fn status(&self) -> Result<StatusSnapshot, IoError> {
        let mut board = self.board.lock();
        let Board { driver, shadow } = &mut *board;
        StatusSnapshot::collect(driver.as_mut(), shadow, self.temperature_sensor)
    }

    /// Read the configured temperature sensor.
    pub fn read_temperature(&self) -> Result<f64, IoError> {
        let mut board = self.board.lock();
        Ok(board.driver.read_temperature(self.temperature_sensor)?)
    }

    /// Time since the shadow was created.
    pub fn uptime(&self) -> Duration {
        self.board.lock().shadow.uptime()
    }

    /// Run a parsed command.
    ///
    /// Range, value-domain and scale-range violations come back as
    /// `Ok(OpResult { ok: false, .. })`. Every other error is returned as
    /// `Err` and the operation counts as failed.
    pub fn execute(&self, command: &Command) -> Result<OpResult, IoError> {
        match self.dispatch(command) {
            Ok(result) => Ok(result),
            Err(e) if e.is_recoverable() => {
                warn!("Rejected {:?}: {}", command, e);
                Ok(OpResult::rejected(command, &e))
            }
            Err(e) => Err(e),
        }
    }

    /// Shut the driver down.
    pub fn shutdown(&self) -> Result<(), HalError> {
        info!("Shutdown requested");
        self.board.lock().driver.shutdown()
    }

    fn dispatch(&self, command: &Command) -> Result<OpResult, IoError> {
        let result = match *command {
            Command::ReadDigitalInput { pin } => {
                let level = self.read_digital_input(pin)?;
                OpResult::committed(command, Some(OpValue::Level(level)))
            }
            Command::ReadBinaryOutput { class, pin } => {
                let level = self.read_binary_output(class, pin)?;
                OpResult::committed(command, Some(OpValue::Level(level)))
            }
            Command::WriteBinaryOutput { class, pin, value } => {
                let level = self.write_binary_output(class, pin, value)?;
                OpResult::committed(command, Some(OpValue::Level(level)))
            }
            Command::SetBinaryOutput { class, pin } => {
                let level = self.set_binary_output(class, pin)?;
                OpResult::committed(command, Some(OpValue::Level(level)))
            }
            Command::ResetBinaryOutput { class, pin } => {
                let level = self.reset_binary_output(class, pin)?;
                OpResult::committed(command, Some(OpValue::Level(level)))
            }
            Command::ReadAnalogInput { pin, range } => {
                let value = self.read_analog_input(pin, range)?;
                OpResult::committed(command, Some(OpValue::Scalar(value))).with_scale(range)
            }
            Command::ReadAnalogOutput { pin, range } => {
                let value = self.read_analog_output(pin, range)?;
                OpResult::committed(command, Some(OpValue::Scalar(value))).with_scale(range)
            }
            Command::WriteAnalogOutput { pin, value, range } => {
                let commit = self.write_analog_output(pin, value, range)?;
                OpResult::committed(command, Some(OpValue::Scalar(commit.value)))
            }
            Command::ResetAll => {
                self.reset_all()?;
                OpResult::committed(command, None)
            }
            Command::Status => {
                let snapshot = self.status()?;
                OpResult::committed(command, Some(OpValue::Status(Box::new(snapshot))))
            }
            Command::ReadTemperature => {
                let temperature = self.read_temperature()?;
                OpResult::committed(command, Some(OpValue::Scalar(temperature)))
            }
        };
        Ok(result)
    }

    /// Driver write then shadow update, under one lock.
    fn commit_level(&self, class: ChannelClass, pin: u8, level: u8) -> Result<u8, IoError> {
        let mut board = self.board.lock();
        board.driver.write_digital_output(pin, level)?;
        board.shadow.set(class, pin, OutputValue::Level(level))?;
        drop(board);
        debug!("{}[{}] <- {}", class, pin, level);
        Ok(level)
    }

    fn require_binary(class: ChannelClass, action: Action) -> Result<(), IoError> {
        if class.is_binary_output() {
            Ok(())
        } else {
            Err(IoError::UnsupportedAction {
                class,
                action: action.as_str(),
            })
        }
    }
}
