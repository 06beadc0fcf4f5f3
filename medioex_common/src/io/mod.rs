//! Channel table, range validation, scaling transform and pin errors.

pub mod channel;
pub mod error;
pub mod scaling;

pub use channel::{ChannelClass, PinRange, validate};
pub use error::IoError;
pub use scaling::ScaleRange;
