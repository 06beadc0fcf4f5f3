//! Channel table and pin range validation.
//!
//! `ChannelClass` names the five I/O banks of the board. Each class owns a
//! closed pin range; classes are separate namespaces, so digital input 13
//! and relay 13 are different pins.

use core::fmt;
use core::ops::RangeInclusive;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use super::error::IoError;
use crate::consts::{
    AI_FIRST, AI_LAST, AO_FIRST, AO_LAST, DI_FIRST, DI_LAST, DO_FIRST, DO_LAST, RELAY_FIRST,
    RELAY_LAST,
};

// ─── PinRange ───────────────────────────────────────────────────────

/// Inclusive pin bounds of a channel class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PinRange {
    /// Lowest legal pin.
    pub first: u8,
    /// Highest legal pin.
    pub last: u8,
}

impl PinRange {
    /// Create a new inclusive range.
    pub const fn new(first: u8, last: u8) -> Self {
        Self { first, last }
    }

    /// Whether `pin` lies inside the range. Total over all integers.
    #[inline]
    pub const fn contains(&self, pin: i64) -> bool {
        self.first as i64 <= pin && pin <= self.last as i64
    }

    /// Number of pins in the range.
    pub const fn len(&self) -> usize {
        (self.last - self.first + 1) as usize
    }

    /// Zero-based slot of `pin` within the range, if it belongs to it.
    #[inline]
    pub fn slot(&self, pin: u8) -> Option<usize> {
        self.contains(pin as i64)
            .then(|| (pin - self.first) as usize)
    }

    /// Iterate all pins in ascending order.
    pub fn pins(&self) -> RangeInclusive<u8> {
        self.first..=self.last
    }
}

impl fmt::Display for PinRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.first, self.last)
    }
}

// ─── ChannelClass ───────────────────────────────────────────────────

/// I/O bank discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChannelClass {
    /// Digital inputs, read through the driver.
    #[serde(rename = "di")]
    DigitalInput,
    /// Digital outputs, write-only on the driver side.
    #[serde(rename = "do")]
    DigitalOutput,
    /// Relay outputs, write-only on the driver side.
    #[serde(rename = "ro")]
    Relay,
    /// Analog inputs, raw `[0, 4095]`.
    #[serde(rename = "ai")]
    AnalogInput,
    /// Analog outputs, raw `[0, 4095]`, no read-back.
    #[serde(rename = "ao")]
    AnalogOutput,
}

impl ChannelClass {
    /// Every class, inputs first.
    pub const ALL: [Self; 5] = [
        Self::DigitalInput,
        Self::AnalogInput,
        Self::DigitalOutput,
        Self::Relay,
        Self::AnalogOutput,
    ];

    /// Cache-backed classes in reset sweep order.
    pub const OUTPUTS: [Self; 3] = [Self::AnalogOutput, Self::DigitalOutput, Self::Relay];

    /// Inclusive pin bounds for this class.
    pub const fn range(self) -> PinRange {
        match self {
            Self::DigitalInput => PinRange::new(DI_FIRST, DI_LAST),
            Self::DigitalOutput => PinRange::new(DO_FIRST, DO_LAST),
            Self::Relay => PinRange::new(RELAY_FIRST, RELAY_LAST),
            Self::AnalogInput => PinRange::new(AI_FIRST, AI_LAST),
            Self::AnalogOutput => PinRange::new(AO_FIRST, AO_LAST),
        }
    }

    /// Number of pins in this class.
    pub const fn cardinality(self) -> usize {
        self.range().len()
    }

    /// Outputs are write-only on the hardware side and live in the shadow cache.
    pub const fn is_output(self) -> bool {
        matches!(self, Self::DigitalOutput | Self::Relay | Self::AnalogOutput)
    }

    /// Digital outputs and relays carry 0/1 values.
    pub const fn is_binary_output(self) -> bool {
        matches!(self, Self::DigitalOutput | Self::Relay)
    }

    /// Short name used on routes and in results (`di`, `do`, `ro`, `ai`, `ao`).
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::DigitalInput => "di",
            Self::DigitalOutput => "do",
            Self::Relay => "ro",
            Self::AnalogInput => "ai",
            Self::AnalogOutput => "ao",
        }
    }

    /// Label used in pin range messages.
    pub const fn pin_label(self) -> &'static str {
        match self {
            Self::DigitalInput => "Digital input pins",
            Self::DigitalOutput => "Digital output pins",
            Self::Relay => "Relay pins",
            Self::AnalogInput => "Analog input pins",
            Self::AnalogOutput => "Analog output pins",
        }
    }

    /// Label used in value domain messages.
    pub const fn output_label(self) -> &'static str {
        match self {
            Self::Relay => "Relay outputs",
            Self::AnalogOutput => "Analog outputs",
            _ => "Digital outputs",
        }
    }

    /// Validate `pin` and narrow it to the driver's pin type.
    ///
    /// # Errors
    /// Returns `IoError::Range` if `pin` is outside this class's bounds.
    pub fn checked_pin(self, pin: i64) -> Result<u8, IoError> {
        validate(self, pin)?;
        // In range, so it fits a u8.
        Ok(pin as u8)
    }
}

impl fmt::Display for ChannelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for ChannelClass {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "di" => Ok(Self::DigitalInput),
            "do" => Ok(Self::DigitalOutput),
            "ro" => Ok(Self::Relay),
            "ai" => Ok(Self::AnalogInput),
            "ao" => Ok(Self::AnalogOutput),
            _ => Err(format!("unknown channel class: {s:?}")),
        }
    }
}

/// Check that `pin` is legal for `class`.
///
/// Pure and total over all integers.
///
/// # Errors
/// Returns `IoError::Range` carrying the class, the pin and the expected range.
pub fn validate(class: ChannelClass, pin: i64) -> Result<(), IoError> {
    let expected = class.range();
    if expected.contains(pin) {
        Ok(())
    } else {
        Err(IoError::Range {
            class,
            pin,
            expected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_table() {
        assert_eq!(ChannelClass::DigitalInput.range(), PinRange::new(1, 16));
        assert_eq!(ChannelClass::DigitalOutput.range(), PinRange::new(1, 12));
        assert_eq!(ChannelClass::Relay.range(), PinRange::new(13, 16));
        assert_eq!(ChannelClass::AnalogInput.range(), PinRange::new(1, 4));
        assert_eq!(ChannelClass::AnalogOutput.range(), PinRange::new(1, 4));
    }

    #[test]
    fn validate_edges() {
        use ChannelClass::*;
        assert!(validate(DigitalInput, 1).is_ok());
        assert!(validate(DigitalInput, 16).is_ok());
        assert!(validate(DigitalInput, 0).is_err());
        assert!(validate(DigitalInput, 17).is_err());

        assert!(validate(Relay, 13).is_ok());
        assert!(validate(Relay, 16).is_ok());
        assert!(validate(Relay, 12).is_err());
        assert!(validate(Relay, 17).is_err());

        assert!(validate(DigitalOutput, 12).is_ok());
        assert!(validate(DigitalOutput, 13).is_err());
        assert!(validate(AnalogOutput, 5).is_err());
        assert!(validate(AnalogInput, i64::MIN).is_err());
        assert!(validate(AnalogInput, i64::MAX).is_err());
    }

    #[test]
    fn range_error_message() {
        let err = validate(ChannelClass::Relay, 17).unwrap_err();
        assert_eq!(err.to_string(), "Relay pins for MedIOEx must be in [13, 16]");

        let err = validate(ChannelClass::DigitalInput, 0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Digital input pins for MedIOEx must be in [1, 16]"
        );
    }

    #[test]
    fn outputs_are_cache_backed() {
        assert!(!ChannelClass::DigitalInput.is_output());
        assert!(!ChannelClass::AnalogInput.is_output());
        for class in ChannelClass::OUTPUTS {
            assert!(class.is_output());
        }
        assert_eq!(ChannelClass::OUTPUTS[0], ChannelClass::AnalogOutput);
    }

    #[test]
    fn short_name_round_trip() {
        for class in ChannelClass::ALL {
            assert_eq!(class.short_name().parse::<ChannelClass>(), Ok(class));
        }
        assert!("xx".parse::<ChannelClass>().is_err());
    }

    #[test]
    fn slot_offsets() {
        let relay = ChannelClass::Relay.range();
        assert_eq!(relay.slot(13), Some(0));
        assert_eq!(relay.slot(16), Some(3));
        assert_eq!(relay.slot(12), None);
        assert_eq!(relay.pins().count(), ChannelClass::Relay.cardinality());
    }

    #[test]
    fn checked_pin_narrows() {
        assert_eq!(ChannelClass::Relay.checked_pin(14).unwrap(), 14u8);
        assert!(matches!(
            ChannelClass::Relay.checked_pin(300),
            Err(IoError::Range { pin: 300, .. })
        ));
    }
}
