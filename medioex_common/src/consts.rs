//! Board-wide constants for the MedIOEx workspace.
//!
//! Single source of truth for the channel table bounds, the raw analog
//! domain and default paths. Imported by all crates.

use static_assertions::const_assert;

/// Board name used in operator-facing messages.
pub const BOARD_NAME: &str = "MedIOEx";

/// Canonical service name (used for logging and as config default).
pub const SERVICE_NAME: &str = "medioex-io";

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/medioex/config.toml";

// ─── Channel table ──────────────────────────────────────────────────

/// First digital input pin.
pub const DI_FIRST: u8 = 1;
/// Last digital input pin.
pub const DI_LAST: u8 = 16;

/// First digital output pin.
pub const DO_FIRST: u8 = 1;
/// Last digital output pin.
pub const DO_LAST: u8 = 12;

/// First relay pin.
pub const RELAY_FIRST: u8 = 13;
/// Last relay pin.
pub const RELAY_LAST: u8 = 16;

/// First analog input pin.
pub const AI_FIRST: u8 = 1;
/// Last analog input pin.
pub const AI_LAST: u8 = 4;

/// First analog output pin.
pub const AO_FIRST: u8 = 1;
/// Last analog output pin.
pub const AO_LAST: u8 = 4;

/// Number of digital inputs.
pub const DI_COUNT: usize = (DI_LAST - DI_FIRST + 1) as usize;
/// Number of digital outputs.
pub const DO_COUNT: usize = (DO_LAST - DO_FIRST + 1) as usize;
/// Number of relays.
pub const RELAY_COUNT: usize = (RELAY_LAST - RELAY_FIRST + 1) as usize;
/// Number of analog inputs.
pub const AI_COUNT: usize = (AI_LAST - AI_FIRST + 1) as usize;
/// Number of analog outputs.
pub const AO_COUNT: usize = (AO_LAST - AO_FIRST + 1) as usize;

// Digital outputs and relays share the driver's output pin numbering.
const_assert!(DO_LAST < RELAY_FIRST);
const_assert!(DO_FIRST >= 1);

// ─── Analog domain ──────────────────────────────────────────────────

/// Largest raw count produced or accepted by the 12-bit analog converters.
pub const RAW_MAX: u16 = 4095;

/// `RAW_MAX` as a float, the span of the raw domain `[0, 4095]`.
pub const RAW_SPAN: f64 = RAW_MAX as f64;

/// Default scale start when the caller supplies none.
pub const DEFAULT_SCALE_START: f64 = 0.0;

/// Default scale end when the caller supplies none.
pub const DEFAULT_SCALE_END: f64 = RAW_SPAN;

/// Temperature sensor read for status and temperature requests.
pub const DEFAULT_TEMPERATURE_SENSOR: u8 = 1;
