//! Output shadow cache.
//!
//! The board cannot report output levels back, so the last commanded value
//! of every digital output, relay and analog output is kept here. This is
//! the only source of truth for output reads: there is no eviction and no
//! miss. Every legal output pin has an entry from construction on.
//!
//! Analog outputs store the untruncated raw-equivalent (`0.0..=4095.0`) that
//! was computed from the caller's scaled value; the driver received the
//! truncated integer count.

use medioex_common::consts::{AO_COUNT, DO_COUNT, RELAY_COUNT};
use medioex_common::io::{ChannelClass, IoError};
use serde::Serialize;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Value recorded for an output pin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OutputValue {
    /// Digital output or relay level.
    Level(u8),
    /// Analog output raw-equivalent.
    Raw(f64),
}

/// Last commanded state of every output pin, plus the service start time.
#[derive(Debug, Clone)]
pub struct OutputShadow {
    digital: [u8; DO_COUNT],
    relay: [u8; RELAY_COUNT],
    analog: [f64; AO_COUNT],
    started: Instant,
    started_at: SystemTime,
}

impl Default for OutputShadow {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputShadow {
    /// All outputs at 0; start time recorded now.
    pub fn new() -> Self {
        Self {
            digital: [0; DO_COUNT],
            relay: [0; RELAY_COUNT],
            analog: [0.0; AO_COUNT],
            started: Instant::now(),
            started_at: SystemTime::now(),
        }
    }

    /// Level of a digital output or relay.
    ///
    /// # Errors
    /// `IoError::NotInitialized` if `(class, pin)` has no binary entry.
    pub fn level(&self, class: ChannelClass, pin: u8) -> Result<u8, IoError> {
        match self.get(class, pin)? {
            OutputValue::Level(level) => Ok(level),
            OutputValue::Raw(_) => Err(IoError::NotInitialized { class, pin }),
        }
    }

    /// Raw-equivalent of an analog output.
    ///
    /// # Errors
    /// `IoError::NotInitialized` if `pin` is not an analog output.
    pub fn analog(&self, pin: u8) -> Result<f64, IoError> {
        match self.get(ChannelClass::AnalogOutput, pin)? {
            OutputValue::Raw(raw) => Ok(raw),
            OutputValue::Level(_) => Err(IoError::NotInitialized {
                class: ChannelClass::AnalogOutput,
                pin,
            }),
        }
    }

    /// Recorded value for `(class, pin)`.
    ///
    /// # Errors
    /// `IoError::NotInitialized` for input classes and pins outside the range.
    pub fn get(&self, class: ChannelClass, pin: u8) -> Result<OutputValue, IoError> {
        let slot = Self::slot(class, pin)?;
        Ok(match class {
            ChannelClass::DigitalOutput => OutputValue::Level(self.digital[slot]),
            ChannelClass::Relay => OutputValue::Level(self.relay[slot]),
            _ => OutputValue::Raw(self.analog[slot]),
        })
    }

    /// Overwrite the recorded value. Values are not checked here; the pin
    /// must merely have an entry of the matching kind.
    ///
    /// # Errors
    /// `IoError::NotInitialized` if `(class, pin)` has no entry of that kind.
    pub fn set(&mut self, class: ChannelClass, pin: u8, value: OutputValue) -> Result<(), IoError> {
        let slot = Self::slot(class, pin)?;
        match (class, value) {
            (ChannelClass::DigitalOutput, OutputValue::Level(level)) => self.digital[slot] = level,
            (ChannelClass::Relay, OutputValue::Level(level)) => self.relay[slot] = level,
            (ChannelClass::AnalogOutput, OutputValue::Raw(raw)) => self.analog[slot] = raw,
            _ => return Err(IoError::NotInitialized { class, pin }),
        }
        Ok(())
    }

    /// Every entry of `class` in ascending pin order. Empty for inputs.
    pub fn entries(&self, class: ChannelClass) -> Vec<(u8, OutputValue)> {
        if !class.is_output() {
            return Vec::new();
        }
        class
            .range()
            .pins()
            .filter_map(|pin| self.get(class, pin).ok().map(|value| (pin, value)))
            .collect()
    }

    /// Time since the shadow was created.
    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }

    /// Creation time as Unix seconds.
    pub fn start_timestamp(&self) -> f64 {
        self.started_at
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs_f64()
    }

    fn slot(class: ChannelClass, pin: u8) -> Result<usize, IoError> {
        if !class.is_output() {
            return Err(IoError::NotInitialized { class, pin });
        }
        class
            .range()
            .slot(pin)
            .ok_or(IoError::NotInitialized { class, pin })
    }
}
