//! Error taxonomy for pin operations.
//!
//! Range, value-domain and scale-range violations are expected and are
//! reported back to the caller as rejected results with nothing touched.
//! Everything else aborts the operation.

use thiserror::Error;

use super::channel::{ChannelClass, PinRange};
use super::scaling::ScaleRange;
use crate::consts::BOARD_NAME;
use crate::hal::driver::HalError;

/// Errors raised by pin operations.
#[derive(Debug, Clone, Error)]
pub enum IoError {
    /// Pin outside the legal bounds of its class.
    #[error("{} for {} must be in {}", .class.pin_label(), BOARD_NAME, .expected)]
    Range {
        /// Channel class addressed.
        class: ChannelClass,
        /// Requested pin.
        pin: i64,
        /// Legal bounds for `class`.
        expected: PinRange,
    },

    /// Digital or relay value other than 0 or 1.
    #[error("{} only accept 0 or 1.", .class.output_label())]
    ValueDomain {
        /// Channel class addressed.
        class: ChannelClass,
        /// Rejected value.
        value: i64,
    },

    /// Analog output value outside the caller's scale bounds.
    #[error("Value should be between {:?} and {:?}.", .range.start, .range.end)]
    OutOfScaleRange {
        /// Rejected value.
        value: f64,
        /// Bounds supplied with the request.
        range: ScaleRange,
    },

    /// Request parameter missing or not a number.
    #[error("Malformed '{field}' parameter: {reason}")]
    MalformedInput {
        /// Parameter name (`start`, `end`, `val`, `pin`).
        field: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Scale with equal or non-finite bounds cannot be inverted.
    #[error("Degenerate scale range [{start:?}, {end:?}]: bounds must differ and be finite")]
    DegenerateRange {
        /// Scale start.
        start: f64,
        /// Scale end.
        end: f64,
    },

    /// Shadow cache has no entry for the pin.
    #[error("No output state recorded for {class} pin {pin}")]
    NotInitialized {
        /// Channel class addressed.
        class: ChannelClass,
        /// Requested pin.
        pin: u8,
    },

    /// Action not defined for the channel class (e.g. writing an input).
    #[error("Action '{action}' is not supported on {class} channels")]
    UnsupportedAction {
        /// Channel class addressed.
        class: ChannelClass,
        /// Requested action.
        action: &'static str,
    },

    /// Driver call failed.
    #[error(transparent)]
    Hardware(#[from] HalError),
}

impl IoError {
    /// Build a `MalformedInput` error.
    pub fn malformed(field: &str, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Expected rejections, reported as structured results with no state change.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Range { .. } | Self::ValueDomain { .. } | Self::OutOfScaleRange { .. }
        )
    }

    /// Stable machine-readable kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Range { .. } => "range",
            Self::ValueDomain { .. } => "value_domain",
            Self::OutOfScaleRange { .. } => "out_of_scale_range",
            Self::MalformedInput { .. } => "malformed_input",
            Self::DegenerateRange { .. } => "degenerate_range",
            Self::NotInitialized { .. } => "not_initialized",
            Self::UnsupportedAction { .. } => "unsupported_action",
            Self::Hardware(_) => "hardware",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_domain_messages() {
        let err = IoError::ValueDomain {
            class: ChannelClass::DigitalOutput,
            value: 2,
        };
        assert_eq!(err.to_string(), "Digital outputs only accept 0 or 1.");

        let err = IoError::ValueDomain {
            class: ChannelClass::Relay,
            value: -1,
        };
        assert_eq!(err.to_string(), "Relay outputs only accept 0 or 1.");
    }

    #[test]
    fn recoverability_policy() {
        let range = IoError::Range {
            class: ChannelClass::Relay,
            pin: 17,
            expected: ChannelClass::Relay.range(),
        };
        assert!(range.is_recoverable());
        assert!(
            IoError::OutOfScaleRange {
                value: 1.0,
                range: ScaleRange::new(2.0, 3.0)
            }
            .is_recoverable()
        );

        assert!(!IoError::malformed("start", "not a number").is_recoverable());
        assert!(!IoError::DegenerateRange { start: 1.0, end: 1.0 }.is_recoverable());
        assert!(
            !IoError::Hardware(HalError::CommunicationError("bus".into())).is_recoverable()
        );
    }

    #[test]
    fn hardware_error_is_transparent() {
        let err: IoError = HalError::CommunicationError("SPI timeout".into()).into();
        assert_eq!(err.to_string(), "Hardware communication error: SPI timeout");
        assert_eq!(err.kind(), "hardware");
    }
}
