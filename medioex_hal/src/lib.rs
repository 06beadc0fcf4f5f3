//! # MedIOEx I/O Library
//!
//! Range-checked pin operations for the MedIOEx board over a pluggable
//! driver, with an output shadow cache for the write-only outputs.
//!
//! Drivers implement the `IoDriver` trait defined in
//! `medioex_common::hal::driver`.
//!
//! # Module Structure
//!
//! - [`core`] - IoCore: validation, driver calls, shadow updates
//! - [`shadow`] - Last commanded value of every output
//! - [`status`] - Whole-board snapshot
//! - [`request`] - Route parsing and structured results
//! - [`console`] - Line-oriented JSON front end
//! - [`driver_registry`] - Driver factory registration
//! - [`drivers`] - Driver implementations
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                        medioex_hal                               │
//! │  ┌─────────────┐    ┌──────────────┐    ┌─────────────────────┐  │
//! │  │  Console    │───►│  IoCore      │◄───│  Driver Registry    │  │
//! │  │  (routes)   │    │  (Mutex)     │    │                     │  │
//! │  └─────────────┘    └──┬────────┬──┘    └─────────────────────┘  │
//! │                        │        │                                │
//! │                        ▼        ▼                                │
//! │          ┌────────────────┐  ┌──────────────┐                    │
//! │          │  IoDriver      │  │ OutputShadow │                    │
//! │          │  (trait object)│  │              │                    │
//! │          └────────────────┘  └──────────────┘                    │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

#![deny(missing_docs)]

pub mod console;
pub mod core;
pub mod driver_registry;
pub mod drivers;
pub mod request;
pub mod shadow;
pub mod status;

// Re-export key types for convenience
pub use crate::console::Console;
pub use crate::core::{AnalogCommit, IoCore};
pub use crate::driver_registry::DriverRegistry;
pub use crate::request::{Command, OpResult, OpValue, RequestError};
pub use crate::shadow::{OutputShadow, OutputValue};
pub use crate::status::StatusSnapshot;
