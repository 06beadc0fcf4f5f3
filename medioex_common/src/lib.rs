//! MedIOEx Common Library
//!
//! Shared types for every crate that talks to the MedIOEx board.
//!
//! # Module Structure
//!
//! - [`consts`] - Channel table bounds, raw analog domain, default paths
//! - [`io`] - Channel classes, range validation, scaling transform, pin errors
//! - [`hal`] - Driver trait and service configuration
//! - [`config`] - Configuration loading traits and types
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use medioex_common::prelude::*;
//!
//! let range = ScaleRange::new(0.0, 10.0);
//! assert!(validate(ChannelClass::Relay, 13).is_ok());
//! assert_eq!(range.to_scaled(0.0), 0.0);
//! ```

pub mod config;
pub mod consts;
pub mod hal;
pub mod io;
pub mod prelude;
