//! Simulation driver implementation.
//!
//! The `SimulationDriver` implements the `IoDriver` trait on top of a
//! [`BoardSimulator`], so the whole service runs without a MedIOEx board.

use super::io::BoardSimulator;
use medioex_common::hal::config::ServiceConfig;
use medioex_common::hal::driver::{HalError, IoDriver};
use tracing::{debug, info};

/// Simulation driver implementing the IoDriver trait.
pub struct SimulationDriver {
    /// Driver name
    name: &'static str,
    /// Driver version
    version: &'static str,
    /// Board simulator, present between `init` and `shutdown`
    board: Option<BoardSimulator>,
}

impl SimulationDriver {
    /// Create a new, uninitialized simulation driver instance.
    pub fn new() -> Self {
        Self {
            name: "simulation",
            version: env!("CARGO_PKG_VERSION"),
            board: None,
        }
    }

    /// Simulated board, if initialized. Used to force inputs and temperature.
    pub fn board_mut(&mut self) -> Option<&mut BoardSimulator> {
        self.board.as_mut()
    }

    fn sim(&mut self) -> Result<&mut BoardSimulator, HalError> {
        self.board
            .as_mut()
            .ok_or_else(|| HalError::CommunicationError("simulation driver not initialized".into()))
    }
}

impl Default for SimulationDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl IoDriver for SimulationDriver {
    fn name(&self) -> &'static str {
        self.name
    }

    fn version(&self) -> &'static str {
        self.version
    }

    fn init(&mut self, config: &ServiceConfig) -> Result<(), HalError> {
        config
            .simulation
            .validate()
            .map_err(|e| HalError::InitFailed(e.to_string()))?;

        info!(
            "Initializing simulation driver ({} DI, {} AI seeded)",
            config.simulation.digital_inputs.len(),
            config.simulation.analog_inputs.len()
        );
        self.board = Some(BoardSimulator::new(&config.simulation));
        Ok(())
    }

    fn read_digital_input(&mut self, pin: u8) -> Result<u8, HalError> {
        self.sim()?.digital_input(pin)
    }

    fn write_digital_output(&mut self, pin: u8, value: u8) -> Result<(), HalError> {
        self.sim()?.drive_output(pin, value)
    }

    fn read_analog_input(&mut self, pin: u8) -> Result<u16, HalError> {
        self.sim()?.analog_input(pin)
    }

    fn write_analog_output(&mut self, pin: u8, raw: u16) -> Result<(), HalError> {
        self.sim()?.drive_analog_output(pin, raw)
    }

    fn read_temperature(&mut self, sensor: u8) -> Result<f64, HalError> {
        self.sim()?.temperature(sensor)
    }

    fn shutdown(&mut self) -> Result<(), HalError> {
        info!("Shutting down simulation driver");
        if self.board.take().is_none() {
            debug!("Simulation driver was not initialized");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calls_before_init_fail() {
        let mut driver = SimulationDriver::new();
        assert!(driver.board_mut().is_none());
        assert!(matches!(
            driver.read_digital_input(1),
            Err(HalError::CommunicationError(_))
        ));
        assert!(driver.write_digital_output(1, 1).is_err());
    }

    #[test]
    fn test_init_seeds_board() {
        let mut config = ServiceConfig::default();
        config.simulation.digital_inputs = vec![0, 1];
        config.simulation.analog_inputs = vec![2048];

        let mut driver = SimulationDriver::new();
        driver.init(&config).unwrap();

        assert_eq!(driver.read_digital_input(2).unwrap(), 1);
        assert_eq!(driver.read_analog_input(1).unwrap(), 2048);
        assert_eq!(driver.read_temperature(1).unwrap(), 25.0);
    }

    #[test]
    fn test_init_rejects_invalid_seed() {
        let mut config = ServiceConfig::default();
        config.simulation.digital_inputs = vec![3];

        let mut driver = SimulationDriver::new();
        assert!(matches!(
            driver.init(&config),
            Err(HalError::InitFailed(_))
        ));
    }

    #[test]
    fn test_writes_reach_board() {
        let mut driver = SimulationDriver::new();
        driver.init(&ServiceConfig::default()).unwrap();

        driver.write_digital_output(16, 1).unwrap();
        driver.write_analog_output(3, 1234).unwrap();
        assert!(driver.write_digital_output(17, 1).is_err());
        assert!(driver.write_analog_output(3, 4096).is_err());
    }

    #[test]
    fn test_forced_inputs_are_read_back() {
        let mut driver = SimulationDriver::new();
        driver.init(&ServiceConfig::default()).unwrap();

        let board = driver.board_mut().unwrap();
        board.set_digital_input(5, true).unwrap();
        board.set_analog_input(2, 3000).unwrap();
        board.set_temperature(60.5);

        assert_eq!(driver.read_digital_input(5).unwrap(), 1);
        assert_eq!(driver.read_analog_input(2).unwrap(), 3000);
        assert_eq!(driver.read_temperature(1).unwrap(), 60.5);
    }

    #[test]
    fn test_shutdown_drops_board() {
        let mut driver = SimulationDriver::new();
        driver.init(&ServiceConfig::default()).unwrap();
        driver.shutdown().unwrap();
        assert!(driver.read_temperature(1).is_err());
    }
}
