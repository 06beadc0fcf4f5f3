//! Hardware access boundary.
//!
//! This module contains the driver trait the I/O core talks to and the
//! board configuration handed to drivers at init.

pub mod config;
pub mod driver;
