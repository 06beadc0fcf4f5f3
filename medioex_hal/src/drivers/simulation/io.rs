//! Board simulator for digital, analog and temperature I/O.
//!
//! The `BoardSimulator` holds:
//! - Digital input levels, seeded from `[simulation] digital_inputs`
//! - Analog input raw counts, seeded from `[simulation] analog_inputs`
//! - One temperature sensor
//!
//! Output writes are checked and traced but not latched: outputs are
//! write-only on the bus. It accepts any pin the physical board has and
//! rejects the rest, the same way the hardware bus would fail.

use medioex_common::consts::{
    AI_COUNT, AO_COUNT, DEFAULT_TEMPERATURE_SENSOR, DI_COUNT, RAW_MAX, RELAY_LAST,
};
use medioex_common::hal::config::SimulationConfig;
use medioex_common::hal::driver::HalError;
use tracing::{debug, trace};

/// Simulated MedIOEx board.
#[derive(Debug, Clone)]
pub struct BoardSimulator {
    /// Digital input levels, index = pin - 1
    di_states: [u8; DI_COUNT],
    /// Analog input raw counts, index = pin - 1
    ai_raw: [u16; AI_COUNT],
    /// Temperature in degrees Celsius
    temperature: f64,
}

impl BoardSimulator {
    /// Create a simulator seeded from the `[simulation]` config section.
    ///
    /// Entries beyond the configured lists start at 0.
    pub fn new(config: &SimulationConfig) -> Self {
        let mut di_states = [0; DI_COUNT];
        for (slot, &level) in di_states.iter_mut().zip(&config.digital_inputs) {
            *slot = level.min(1);
        }

        let mut ai_raw = [0; AI_COUNT];
        for (slot, &raw) in ai_raw.iter_mut().zip(&config.analog_inputs) {
            *slot = raw.min(RAW_MAX);
        }

        debug!(
            "BoardSimulator initialized: {} DI, {} AI seeded, temperature {:.1}",
            config.digital_inputs.len(),
            config.analog_inputs.len(),
            config.temperature
        );

        Self {
            di_states,
            ai_raw,
            temperature: config.temperature,
        }
    }

    /// Level of a digital input.
    pub fn digital_input(&self, pin: u8) -> Result<u8, HalError> {
        slot(pin, DI_COUNT).map(|i| self.di_states[i])
    }

    /// Force a digital input level (tests, scenario scripts).
    pub fn set_digital_input(&mut self, pin: u8, level: bool) -> Result<(), HalError> {
        let i = slot(pin, DI_COUNT)?;
        self.di_states[i] = u8::from(level);
        Ok(())
    }

    /// Raw count of an analog input.
    pub fn analog_input(&self, pin: u8) -> Result<u16, HalError> {
        slot(pin, AI_COUNT).map(|i| self.ai_raw[i])
    }

    /// Force an analog input raw count, clamped to `[0, 4095]`.
    pub fn set_analog_input(&mut self, pin: u8, raw: u16) -> Result<(), HalError> {
        let i = slot(pin, AI_COUNT)?;
        self.ai_raw[i] = raw.min(RAW_MAX);
        Ok(())
    }

    /// Drive a digital output (1..=12) or relay (13..=16).
    pub fn drive_output(&self, pin: u8, level: u8) -> Result<(), HalError> {
        if level > 1 {
            return Err(HalError::CommunicationError(format!(
                "invalid level {level} for output {pin}"
            )));
        }
        slot(pin, usize::from(RELAY_LAST))?;
        trace!("sim out[{}] = {}", pin, level);
        Ok(())
    }

    /// Drive an analog output.
    pub fn drive_analog_output(&self, pin: u8, raw: u16) -> Result<(), HalError> {
        if raw > RAW_MAX {
            return Err(HalError::CommunicationError(format!(
                "raw count {raw} exceeds {RAW_MAX} on analog output {pin}"
            )));
        }
        slot(pin, AO_COUNT)?;
        trace!("sim ao[{}] = {}", pin, raw);
        Ok(())
    }

    /// Temperature of `sensor`. The board carries a single sensor.
    pub fn temperature(&self, sensor: u8) -> Result<f64, HalError> {
        if sensor == DEFAULT_TEMPERATURE_SENSOR {
            Ok(self.temperature)
        } else {
            Err(HalError::CommunicationError(format!(
                "no temperature sensor {sensor}"
            )))
        }
    }

    /// Set the simulated temperature.
    pub fn set_temperature(&mut self, celsius: f64) {
        self.temperature = celsius;
    }
}

/// Zero-based index of a 1-based pin among `count`, or a bus error.
fn slot(pin: u8, count: usize) -> Result<usize, HalError> {
    let index = usize::from(pin).wrapping_sub(1);
    if index < count {
        Ok(index)
    } else {
        Err(HalError::CommunicationError(format!(
            "pin {pin} not present on simulated board"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> BoardSimulator {
        BoardSimulator::new(&SimulationConfig {
            digital_inputs: vec![1, 0, 1],
            analog_inputs: vec![100, 4095],
            temperature: 31.5,
        })
    }

    #[test]
    fn test_board_simulator_new() {
        let sim = seeded();
        assert_eq!(sim.digital_input(1).unwrap(), 1);
        assert_eq!(sim.digital_input(2).unwrap(), 0);
        assert_eq!(sim.digital_input(3).unwrap(), 1);
        assert_eq!(sim.digital_input(16).unwrap(), 0);
        assert_eq!(sim.analog_input(1).unwrap(), 100);
        assert_eq!(sim.analog_input(2).unwrap(), 4095);
        assert_eq!(sim.analog_input(4).unwrap(), 0);
        assert_eq!(sim.temperature(1).unwrap(), 31.5);
    }

    #[test]
    fn test_pins_outside_board_fail() {
        let sim = seeded();
        assert!(sim.digital_input(0).is_err());
        assert!(sim.digital_input(17).is_err());
        assert!(sim.analog_input(5).is_err());
        assert!(sim.drive_output(17, 1).is_err());
        assert!(sim.drive_analog_output(0, 1).is_err());
    }

    #[test]
    fn test_outputs_and_relays_share_bus() {
        let sim = seeded();
        for pin in 1..=16 {
            sim.drive_output(pin, 1).unwrap();
            sim.drive_output(pin, 0).unwrap();
        }
        for pin in 1..=4 {
            sim.drive_analog_output(pin, 4095).unwrap();
        }
        assert!(sim.drive_analog_output(5, 0).is_err());
    }

    #[test]
    fn test_invalid_levels_rejected() {
        let sim = seeded();
        assert!(sim.drive_output(1, 2).is_err());
        assert!(sim.drive_analog_output(1, 4096).is_err());
    }

    #[test]
    fn test_forced_inputs() {
        let mut sim = seeded();
        sim.set_digital_input(16, true).unwrap();
        sim.set_analog_input(4, 9000).unwrap();
        assert_eq!(sim.digital_input(16).unwrap(), 1);
        assert_eq!(sim.analog_input(4).unwrap(), 4095);
    }

    #[test]
    fn test_single_temperature_sensor() {
        let mut sim = seeded();
        sim.set_temperature(-4.0);
        assert_eq!(sim.temperature(1).unwrap(), -4.0);
        assert!(matches!(
            sim.temperature(2),
            Err(HalError::CommunicationError(_))
        ));
    }
}
