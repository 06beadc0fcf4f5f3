//! Line console.
//!
//! Reads one route per line (`/api/do/12/write?val=1`), runs it against an
//! [`IoCore`] and writes one JSON result per line. Blank lines and lines
//! starting with `#` are skipped; `quit` or `exit` ends the session.

use std::io::{self, BufRead, Write};
use tracing::{debug, error, info, warn};

use crate::core::IoCore;
use crate::request::{Command, OpResult};

/// What to do with one input line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// Write this result.
    Reply(OpResult),
    /// Nothing to write.
    Skip,
    /// End the session.
    Quit,
}

/// Line-oriented front end over an `IoCore`.
pub struct Console<'a> {
    core: &'a IoCore,
}

impl<'a> Console<'a> {
    /// Console bound to `core`.
    pub fn new(core: &'a IoCore) -> Self {
        Self { core }
    }

    /// Handle a single input line.
    pub fn handle_line(&self, line: &str) -> LineOutcome {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return LineOutcome::Skip;
        }
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            return LineOutcome::Quit;
        }

        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(e) => {
                warn!("Refused '{}': {}", line, e);
                return LineOutcome::Reply(OpResult::refused(&e));
            }
        };
        debug!("Executing {:?}", command);

        match self.core.execute(&command) {
            Ok(result) => LineOutcome::Reply(result),
            Err(e) => {
                error!("Operation '{}' failed: {}", line, e);
                LineOutcome::Reply(OpResult::rejected(&command, &e))
            }
        }
    }

    /// Serve `input` until EOF or `quit`, writing JSON lines to `output`.
    ///
    /// Returns the number of results written.
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut output: W) -> io::Result<usize> {
        let mut replies = 0;
        for line in input.lines() {
            match self.handle_line(&line?) {
                LineOutcome::Reply(result) => {
                    serde_json::to_writer(&mut output, &result)?;
                    output.write_all(b"\n")?;
                    output.flush()?;
                    replies += 1;
                }
                LineOutcome::Skip => {}
                LineOutcome::Quit => {
                    info!("Console session ended by operator");
                    break;
                }
            }
        }
        Ok(replies)
    }
}
