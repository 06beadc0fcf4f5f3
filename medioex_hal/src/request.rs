//! Typed requests and structured results.
//!
//! Requests use the controller's route grammar:
//!
//! ```text
//! /api/<di|do|ro|ai|ao>/<pin>/<read|write|set|reset>?start=..&end=..&val=..
//! /api/reset
//! /api/status
//! /api/temperature/read
//! ```
//!
//! All parameters are parsed here, before any pin validation runs. A
//! parameter that is present but not a number, or a missing `val` on a
//! write, is a `MalformedInput` rejection.

use medioex_common::io::{ChannelClass, IoError, ScaleRange};
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

use crate::status::StatusSnapshot;

/// Prefix of every route.
pub const ROUTE_PREFIX: &str = "/api";

/// Per-pin action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Read an input or an output's recorded value.
    Read,
    /// Write a caller-supplied value.
    Write,
    /// Force a binary output to 1.
    Set,
    /// Force a binary output to 0 (also used by reset-all).
    Reset,
    /// Full board snapshot.
    Status,
}

impl Action {
    /// Route segment for this action.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Set => "set",
            Self::Reset => "reset",
            Self::Status => "status",
        }
    }
}

/// A fully parsed operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Sample a digital input.
    ReadDigitalInput {
        /// Requested pin, unvalidated.
        pin: i64,
    },
    /// Recorded level of a digital output or relay.
    ReadBinaryOutput {
        /// `DigitalOutput` or `Relay`.
        class: ChannelClass,
        /// Requested pin, unvalidated.
        pin: i64,
    },
    /// Drive a digital output or relay to a caller value.
    WriteBinaryOutput {
        /// `DigitalOutput` or `Relay`.
        class: ChannelClass,
        /// Requested pin, unvalidated.
        pin: i64,
        /// Requested level, unvalidated.
        value: i64,
    },
    /// Drive a digital output or relay to 1.
    SetBinaryOutput {
        /// `DigitalOutput` or `Relay`.
        class: ChannelClass,
        /// Requested pin, unvalidated.
        pin: i64,
    },
    /// Drive a digital output or relay to 0.
    ResetBinaryOutput {
        /// `DigitalOutput` or `Relay`.
        class: ChannelClass,
        /// Requested pin, unvalidated.
        pin: i64,
    },
    /// Sample an analog input on a caller scale.
    ReadAnalogInput {
        /// Requested pin, unvalidated.
        pin: i64,
        /// Caller scale.
        range: ScaleRange,
    },
    /// Recorded analog output on a caller scale.
    ReadAnalogOutput {
        /// Requested pin, unvalidated.
        pin: i64,
        /// Caller scale.
        range: ScaleRange,
    },
    /// Drive an analog output with a value on a caller scale.
    WriteAnalogOutput {
        /// Requested pin, unvalidated.
        pin: i64,
        /// Requested scaled value, unvalidated.
        value: f64,
        /// Caller scale.
        range: ScaleRange,
    },
    /// Drive every output to 0.
    ResetAll,
    /// Full board snapshot.
    Status,
    /// Read the board temperature.
    ReadTemperature,
}

impl Command {
    /// Channel type reported in the result.
    pub fn channel_type(&self) -> Option<&'static str> {
        match self {
            Self::ReadDigitalInput { .. } => Some(ChannelClass::DigitalInput.short_name()),
            Self::ReadBinaryOutput { class, .. }
            | Self::WriteBinaryOutput { class, .. }
            | Self::SetBinaryOutput { class, .. }
            | Self::ResetBinaryOutput { class, .. } => Some(class.short_name()),
            Self::ReadAnalogInput { .. } => Some(ChannelClass::AnalogInput.short_name()),
            Self::ReadAnalogOutput { .. } | Self::WriteAnalogOutput { .. } => {
                Some(ChannelClass::AnalogOutput.short_name())
            }
            Self::ReadTemperature => Some("temperature"),
            Self::ResetAll | Self::Status => None,
        }
    }

    /// Action reported in the result.
    pub fn action(&self) -> Action {
        match self {
            Self::ReadDigitalInput { .. }
            | Self::ReadBinaryOutput { .. }
            | Self::ReadAnalogInput { .. }
            | Self::ReadAnalogOutput { .. }
            | Self::ReadTemperature => Action::Read,
            Self::WriteBinaryOutput { .. } | Self::WriteAnalogOutput { .. } => Action::Write,
            Self::SetBinaryOutput { .. } => Action::Set,
            Self::ResetBinaryOutput { .. } | Self::ResetAll => Action::Reset,
            Self::Status => Action::Status,
        }
    }

    /// Requested pin, if the command addresses one.
    pub fn pin(&self) -> Option<i64> {
        match *self {
            Self::ReadDigitalInput { pin }
            | Self::ReadBinaryOutput { pin, .. }
            | Self::WriteBinaryOutput { pin, .. }
            | Self::SetBinaryOutput { pin, .. }
            | Self::ResetBinaryOutput { pin, .. }
            | Self::ReadAnalogInput { pin, .. }
            | Self::ReadAnalogOutput { pin, .. }
            | Self::WriteAnalogOutput { pin, .. } => Some(pin),
            Self::ResetAll | Self::Status | Self::ReadTemperature => None,
        }
    }

    /// Parse a route line such as `/api/ao/1/write?val=2047&start=0&end=4095`.
    ///
    /// # Errors
    /// `RequestError::UnknownRoute` if the path matches no route,
    /// `RequestError::Input` if a parameter is malformed.
    pub fn parse(route: &str) -> Result<Self, RequestError> {
        let route = route.trim();
        let (path, query) = route.split_once('?').unwrap_or((route, ""));
        let params = QueryParams::parse(query);

        let rest = path
            .strip_prefix(ROUTE_PREFIX)
            .ok_or_else(|| RequestError::UnknownRoute(route.to_string()))?;
        let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            ["reset"] => Ok(Self::ResetAll),
            ["status"] => Ok(Self::Status),
            ["temperature", "read"] => Ok(Self::ReadTemperature),
            [class, pin, action] => {
                let class: ChannelClass = class
                    .parse()
                    .map_err(|_| RequestError::UnknownRoute(route.to_string()))?;
                // Non-integer pin segments never match a route.
                let pin: i64 = pin
                    .parse()
                    .map_err(|_| RequestError::UnknownRoute(route.to_string()))?;
                Self::pin_command(class, pin, action, &params)
                    .ok_or_else(|| RequestError::UnknownRoute(route.to_string()))?
            }
            _ => Err(RequestError::UnknownRoute(route.to_string())),
        }
    }

    fn pin_command(
        class: ChannelClass,
        pin: i64,
        action: &str,
        params: &QueryParams<'_>,
    ) -> Option<Result<Self, RequestError>> {
        use ChannelClass::*;
        let command = match (class, action) {
            (DigitalInput, "read") => Ok(Self::ReadDigitalInput { pin }),
            (DigitalOutput | Relay, "read") => Ok(Self::ReadBinaryOutput { class, pin }),
            (DigitalOutput | Relay, "write") => params
                .binary_value()
                .map(|value| Self::WriteBinaryOutput { class, pin, value }),
            (DigitalOutput | Relay, "set") => Ok(Self::SetBinaryOutput { class, pin }),
            (DigitalOutput | Relay, "reset") => Ok(Self::ResetBinaryOutput { class, pin }),
            (AnalogInput, "read") => params
                .scale()
                .map(|range| Self::ReadAnalogInput { pin, range }),
            (AnalogOutput, "read") => params
                .scale()
                .map(|range| Self::ReadAnalogOutput { pin, range }),
            (AnalogOutput, "write") => params.scale().and_then(|range| {
                params
                    .analog_value()
                    .map(|value| Self::WriteAnalogOutput { pin, value, range })
            }),
            _ => return None,
        };
        Some(command.map_err(RequestError::Input))
    }
}

/// Route parsing failures.
#[derive(Debug, Clone, Error)]
pub enum RequestError {
    /// Path matches no route.
    #[error("Unknown route: {0}")]
    UnknownRoute(String),

    /// A parameter was malformed.
    #[error(transparent)]
    Input(#[from] IoError),
}

impl RequestError {
    /// Stable machine-readable kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownRoute(_) => "unknown_route",
            Self::Input(err) => err.kind(),
        }
    }
}

/// Query string parameters (`start`, `end`, `val`).
#[derive(Debug, Clone, Default)]
pub struct QueryParams<'a> {
    values: HashMap<&'a str, &'a str>,
}

impl<'a> QueryParams<'a> {
    /// Split `a=1&b=2`. Later duplicates win; empty pairs are ignored.
    pub fn parse(query: &'a str) -> Self {
        let values = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
            .collect();
        Self { values }
    }

    /// Raw parameter text.
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.values.get(key).copied()
    }

    /// Scale bounds, defaulting to `(0.0, 4095.0)`.
    ///
    /// # Errors
    /// `IoError::MalformedInput` if `start` or `end` is present but not a number.
    pub fn scale(&self) -> Result<ScaleRange, IoError> {
        let defaults = ScaleRange::default();
        Ok(ScaleRange::new(
            self.float_or("start", defaults.start)?,
            self.float_or("end", defaults.end)?,
        ))
    }

    /// `val` as an integer level.
    ///
    /// # Errors
    /// `IoError::MalformedInput` if `val` is missing or not an integer.
    pub fn binary_value(&self) -> Result<i64, IoError> {
        let raw = self.required("val")?;
        raw.trim()
            .parse()
            .map_err(|_| IoError::malformed("val", format!("{raw:?} is not an integer")))
    }

    /// `val` as a scaled analog value.
    ///
    /// # Errors
    /// `IoError::MalformedInput` if `val` is missing or not a finite number.
    pub fn analog_value(&self) -> Result<f64, IoError> {
        let raw = self.required("val")?;
        parse_float("val", raw)
    }

    fn required(&self, key: &str) -> Result<&'a str, IoError> {
        self.get(key)
            .ok_or_else(|| IoError::malformed(key, "parameter is required"))
    }

    fn float_or(&self, key: &str, default: f64) -> Result<f64, IoError> {
        match self.get(key) {
            Some(raw) => parse_float(key, raw),
            None => Ok(default),
        }
    }
}

fn parse_float(key: &str, raw: &str) -> Result<f64, IoError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(IoError::malformed(key, format!("{raw:?} is not a number"))),
    }
}

/// Value carried by a successful result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OpValue {
    /// Digital level.
    Level(u8),
    /// Scaled analog value or temperature.
    Scalar(f64),
    /// Full board snapshot.
    Status(Box<StatusSnapshot>),
}

/// Structured result of one operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpResult {
    /// Whether the operation committed.
    pub ok: bool,
    /// `di`, `do`, `ro`, `ai`, `ao` or `temperature`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_type: Option<&'static str>,
    /// Action performed; absent when the request never parsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
    /// Addressed pin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin: Option<i64>,
    /// Committed or sampled value. Serialized as `null` when absent.
    pub value: Option<OpValue>,
    /// Scale start for analog reads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,
    /// Scale end for analog reads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
    /// Rejection reason.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Rejection kind (see `IoError::kind`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<&'static str>,
}

impl OpResult {
    /// Successful result for `command`.
    pub fn committed(command: &Command, value: Option<OpValue>) -> Self {
        Self {
            ok: true,
            channel_type: command.channel_type(),
            action: Some(command.action()),
            pin: command.pin(),
            value,
            start: None,
            end: None,
            error_message: None,
            error_kind: None,
        }
    }

    /// Attach the scale used for an analog read.
    pub fn with_scale(mut self, range: ScaleRange) -> Self {
        self.start = Some(range.start);
        self.end = Some(range.end);
        self
    }

    /// Rejected result for `command`.
    pub fn rejected(command: &Command, error: &IoError) -> Self {
        Self {
            ok: false,
            channel_type: command.channel_type(),
            action: Some(command.action()),
            pin: command.pin(),
            value: None,
            start: None,
            end: None,
            error_message: Some(error.to_string()),
            error_kind: Some(error.kind()),
        }
    }

    /// Failure that happened before a command existed (unknown route,
    /// malformed parameters).
    pub fn refused(error: &RequestError) -> Self {
        Self {
            ok: false,
            channel_type: None,
            action: None,
            pin: None,
            value: None,
            start: None,
            end: None,
            error_message: Some(error.to_string()),
            error_kind: Some(error.kind()),
        }
    }
}
