//! Prelude module for common re-exports.
//!
//! ```rust
//! use medioex_common::prelude::*;
//! ```

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, LogLevel, SharedConfig};
pub use crate::hal::config::{BoardConfig, ServiceConfig, SimulationConfig};

// ─── Driver boundary ────────────────────────────────────────────────
pub use crate::hal::driver::{DriverFactory, HalError, IoDriver};

// ─── Channels & scaling ─────────────────────────────────────────────
pub use crate::io::channel::{ChannelClass, PinRange, validate};
pub use crate::io::error::IoError;
pub use crate::io::scaling::{ScaleRange, to_raw, to_scaled, truncate_raw};
