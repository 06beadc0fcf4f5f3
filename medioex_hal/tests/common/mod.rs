//! Shared test fixtures: a driver that records every call.

#![allow(dead_code)]

use medioex_common::hal::config::ServiceConfig;
use medioex_common::hal::driver::{HalError, IoDriver};
use medioex_hal::core::IoCore;
use parking_lot::Mutex;
use std::sync::Arc;

/// One driver call, in the order it reached the driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Call {
    ReadDigitalInput(u8),
    WriteDigitalOutput(u8, u8),
    ReadAnalogInput(u8),
    WriteAnalogOutput(u8, u16),
    ReadTemperature(u8),
}

impl Call {
    pub fn is_write(&self) -> bool {
        matches!(self, Self::WriteDigitalOutput(..) | Self::WriteAnalogOutput(..))
    }
}

/// Board state and call log behind the mock.
#[derive(Debug, Default)]
pub struct MockBoard {
    pub calls: Vec<Call>,
    pub digital_inputs: [u8; 16],
    pub analog_inputs: [u16; 4],
    pub temperature: f64,
    /// Every write fails with a communication error while set.
    pub fail_writes: bool,
    /// Every read fails with a communication error while set.
    pub fail_reads: bool,
}

/// Driver that records calls into a shared `MockBoard`.
pub struct RecordingDriver {
    board: Arc<Mutex<MockBoard>>,
}

impl RecordingDriver {
    pub fn new(board: Arc<Mutex<MockBoard>>) -> Self {
        Self { board }
    }

    fn read<T>(&mut self, call: Call, value: impl FnOnce(&MockBoard) -> T) -> Result<T, HalError> {
        let mut board = self.board.lock();
        board.calls.push(call);
        if board.fail_reads {
            return Err(HalError::CommunicationError("injected read failure".into()));
        }
        Ok(value(&*board))
    }

    fn write(&mut self, call: Call) -> Result<(), HalError> {
        let mut board = self.board.lock();
        board.calls.push(call);
        if board.fail_writes {
            return Err(HalError::CommunicationError("injected write failure".into()));
        }
        Ok(())
    }
}

impl IoDriver for RecordingDriver {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn version(&self) -> &'static str {
        "0.0.0"
    }

    fn init(&mut self, _config: &ServiceConfig) -> Result<(), HalError> {
        Ok(())
    }

    fn read_digital_input(&mut self, pin: u8) -> Result<u8, HalError> {
        self.read(Call::ReadDigitalInput(pin), |b| {
            b.digital_inputs[usize::from(pin) - 1]
        })
    }

    fn write_digital_output(&mut self, pin: u8, value: u8) -> Result<(), HalError> {
        self.write(Call::WriteDigitalOutput(pin, value))
    }

    fn read_analog_input(&mut self, pin: u8) -> Result<u16, HalError> {
        self.read(Call::ReadAnalogInput(pin), |b| {
            b.analog_inputs[usize::from(pin) - 1]
        })
    }

    fn write_analog_output(&mut self, pin: u8, raw: u16) -> Result<(), HalError> {
        self.write(Call::WriteAnalogOutput(pin, raw))
    }

    fn read_temperature(&mut self, sensor: u8) -> Result<f64, HalError> {
        self.read(Call::ReadTemperature(sensor), |b| b.temperature)
    }

    fn shutdown(&mut self) -> Result<(), HalError> {
        Ok(())
    }
}

/// Core over a recording driver, plus a handle on the mock board.
pub fn recording_core() -> (IoCore, Arc<Mutex<MockBoard>>) {
    let board = Arc::new(Mutex::new(MockBoard {
        temperature: 25.0,
        ..MockBoard::default()
    }));
    let driver = RecordingDriver::new(Arc::clone(&board));
    (IoCore::new(Box::new(driver), 1), board)
}

/// Drain the call log.
pub fn take_calls(board: &Mutex<MockBoard>) -> Vec<Call> {
    std::mem::take(&mut board.lock().calls)
}
