//! Simulation driver module.
//!
//! Software stand-in for the MedIOEx board, for development and testing
//! without hardware.

mod driver;
mod io;

pub use driver::SimulationDriver;
pub use io::BoardSimulator;

use medioex_common::hal::driver::IoDriver;

/// Factory function to create a simulation driver instance.
pub fn create_driver() -> Box<dyn IoDriver> {
    Box::new(SimulationDriver::new())
}
