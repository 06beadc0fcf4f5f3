//! Status aggregation.
//!
//! A `StatusSnapshot` combines the shadow cache (outputs) with fresh driver
//! reads of every input, one temperature reading and the uptime. Snapshots
//! are built per request and never stored.

use medioex_common::hal::driver::IoDriver;
use medioex_common::io::scaling::raw_to_f64;
use medioex_common::io::{ChannelClass, IoError, ScaleRange};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::shadow::{OutputShadow, OutputValue};

/// Full board state at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusSnapshot {
    /// Digital output levels from the shadow cache.
    #[serde(rename = "do")]
    pub digital_outputs: BTreeMap<u8, u8>,
    /// Relay levels from the shadow cache.
    #[serde(rename = "ro")]
    pub relays: BTreeMap<u8, u8>,
    /// Analog output raw-equivalents from the shadow cache.
    #[serde(rename = "ao")]
    pub analog_outputs: BTreeMap<u8, f64>,
    /// Digital input levels read now.
    #[serde(rename = "di")]
    pub digital_inputs: BTreeMap<u8, u8>,
    /// Analog inputs read now, on the raw `[0, 4095]` scale.
    #[serde(rename = "ai")]
    pub analog_inputs: BTreeMap<u8, f64>,
    /// Board temperature in degrees Celsius.
    pub temperature: f64,
    /// Service start time as Unix seconds.
    pub start_timestamp: f64,
    /// Seconds since service start.
    pub uptime: f64,
}

impl StatusSnapshot {
    /// Build a snapshot.
    ///
    /// Inputs are read in pin order: digital inputs, analog inputs, then the
    /// temperature sensor. The first failing driver call aborts the snapshot.
    pub fn collect(
        driver: &mut dyn IoDriver,
        shadow: &OutputShadow,
        temperature_sensor: u8,
    ) -> Result<Self, IoError> {
        let digital_outputs = levels(shadow, ChannelClass::DigitalOutput);
        let relays = levels(shadow, ChannelClass::Relay);
        let analog_outputs = shadow
            .entries(ChannelClass::AnalogOutput)
            .into_iter()
            .filter_map(|(pin, value)| match value {
                OutputValue::Raw(raw) => Some((pin, raw)),
                OutputValue::Level(_) => None,
            })
            .collect();

        let mut digital_inputs = BTreeMap::new();
        for pin in ChannelClass::DigitalInput.range().pins() {
            digital_inputs.insert(pin, driver.read_digital_input(pin)?);
        }

        // Status always reports analog inputs on the default scale.
        let scale = ScaleRange::RAW;
        let mut analog_inputs = BTreeMap::new();
        for pin in ChannelClass::AnalogInput.range().pins() {
            let raw = driver.read_analog_input(pin)?;
            analog_inputs.insert(pin, scale.to_scaled(raw_to_f64(raw)));
        }

        let temperature = driver.read_temperature(temperature_sensor)?;
        let uptime = shadow.uptime().as_secs_f64();

        debug!("Status snapshot collected (uptime={:.1}s)", uptime);

        Ok(Self {
            digital_outputs,
            relays,
            analog_outputs,
            digital_inputs,
            analog_inputs,
            temperature,
            start_timestamp: shadow.start_timestamp(),
            uptime,
        })
    }
}

fn levels(shadow: &OutputShadow, class: ChannelClass) -> BTreeMap<u8, u8> {
    shadow
        .entries(class)
        .into_iter()
        .filter_map(|(pin, value)| match value {
            OutputValue::Level(level) => Some((pin, level)),
            OutputValue::Raw(_) => None,
        })
        .collect()
}
