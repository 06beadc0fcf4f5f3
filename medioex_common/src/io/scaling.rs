//! Affine scaling between the raw converter domain and caller units.
//!
//! The converters work on raw counts `[0, 4095]`. Callers pick any scaled
//! domain `[start, end]`, including inverted ones (`start > end`):
//!
//! ```text
//!   (raw - 0)        (scaled - start)
//!   ---------    =   ----------------
//!   (4095 - 0)        (end - start)
//! ```

use serde::{Deserialize, Serialize};

use super::error::IoError;
use crate::consts::{DEFAULT_SCALE_END, DEFAULT_SCALE_START, RAW_MAX, RAW_SPAN};

/// Scaled domain bounds supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleRange {
    /// Scaled value corresponding to raw 0.
    pub start: f64,
    /// Scaled value corresponding to raw 4095.
    pub end: f64,
}

impl Default for ScaleRange {
    fn default() -> Self {
        Self::RAW
    }
}

impl ScaleRange {
    /// Identity scale `[0, 4095]`.
    pub const RAW: Self = Self::new(DEFAULT_SCALE_START, DEFAULT_SCALE_END);

    /// Create a new scale range.
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Lower bound regardless of orientation.
    pub fn low(&self) -> f64 {
        self.start.min(self.end)
    }

    /// Upper bound regardless of orientation.
    pub fn high(&self) -> f64 {
        self.start.max(self.end)
    }

    /// Whether `value` lies in the closed interval spanned by the bounds.
    pub fn contains(&self, value: f64) -> bool {
        self.low() <= value && value <= self.high()
    }

    /// Map a raw count into this scale.
    #[inline]
    pub fn to_scaled(&self, raw: f64) -> f64 {
        to_scaled(raw, self.start, self.end)
    }

    /// Map a scaled value back to a raw count (untruncated, always finite).
    ///
    /// # Errors
    /// See [`to_raw`].
    #[inline]
    pub fn to_raw(&self, scaled: f64) -> Result<f64, IoError> {
        to_raw(scaled, self.start, self.end)
    }

    /// Check a requested output value against the bounds.
    ///
    /// # Errors
    /// Returns `IoError::OutOfScaleRange` if `value` is outside `[low, high]`.
    pub fn check(&self, value: f64) -> Result<(), IoError> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(IoError::OutOfScaleRange {
                value,
                range: *self,
            })
        }
    }
}

/// `start + raw * (end - start) / 4095`.
///
/// Total for finite bounds: bounds too far apart for `end - start` to be
/// finite are interpolated on halved operands.
#[inline]
pub fn to_scaled(raw: f64, start: f64, end: f64) -> f64 {
    let product = raw * (end - start);
    if product.is_finite() {
        start + product / RAW_SPAN
    } else {
        let (half_start, half_end) = (start / 2.0, end / 2.0);
        2.0 * (half_start + raw / RAW_SPAN * (half_end - half_start))
    }
}

/// `(scaled - start) * 4095 / (end - start)`.
///
/// # Errors
/// Returns `IoError::DegenerateRange` when `start == end` or either bound
/// is not finite, and `IoError::OutOfScaleRange` when `scaled` lies so far
/// outside the bounds that no finite raw-equivalent exists.
#[inline]
pub fn to_raw(scaled: f64, start: f64, end: f64) -> Result<f64, IoError> {
    if start == end || !start.is_finite() || !end.is_finite() {
        return Err(IoError::DegenerateRange { start, end });
    }
    let product = (scaled - start) * RAW_SPAN;
    let span = end - start;
    let raw = if product.is_finite() && span.is_finite() {
        product / span
    } else {
        let (half_start, half_end) = (start / 2.0, end / 2.0);
        (scaled / 2.0 - half_start) / (half_end - half_start) * RAW_SPAN
    };
    if raw.is_finite() {
        Ok(raw)
    } else {
        Err(IoError::OutOfScaleRange {
            value: scaled,
            range: ScaleRange::new(start, end),
        })
    }
}

/// Truncate a raw-equivalent value toward zero into the converter's count.
///
/// Values outside `[0, 4095]` (float noise at the bounds) saturate.
#[inline]
pub fn truncate_raw(raw: f64) -> u16 {
    raw.trunc().clamp(0.0, RAW_SPAN) as u16
}

/// Raw count as a float.
#[inline]
pub fn raw_to_f64(raw: u16) -> f64 {
    f64::from(raw.min(RAW_MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn identity_scale() {
        let r = ScaleRange::RAW;
        assert!((r.to_scaled(2047.0) - 2047.0).abs() < EPS);
        assert!((r.to_raw(2047.0).unwrap() - 2047.0).abs() < EPS);
    }

    #[test]
    fn engineering_scale() {
        // 4-20 mA style range
        let r = ScaleRange::new(4.0, 20.0);
        assert!((r.to_scaled(0.0) - 4.0).abs() < EPS);
        assert!((r.to_scaled(4095.0) - 20.0).abs() < EPS);
        assert!((r.to_raw(12.0).unwrap() - 2047.5).abs() < EPS);
    }

    #[test]
    fn inverted_scale() {
        let r = ScaleRange::new(4095.0, 0.0);
        assert!(r.check(2047.5).is_ok());
        let raw = r.to_raw(2047.5).unwrap();
        assert!((raw - 2047.5).abs() < EPS);
        assert_eq!(truncate_raw(raw), 2047);
        assert!((r.to_scaled(0.0) - 4095.0).abs() < EPS);
    }

    #[test]
    fn guard_accepts_bounds_either_order() {
        let up = ScaleRange::new(0.0, 10.0);
        let down = ScaleRange::new(10.0, 0.0);
        for r in [up, down] {
            assert!(r.check(0.0).is_ok());
            assert!(r.check(10.0).is_ok());
            assert!(r.check(-0.001).is_err());
            assert!(r.check(10.001).is_err());
        }
    }

    #[test]
    fn guard_message() {
        let err = ScaleRange::RAW.check(5000.0).unwrap_err();
        assert_eq!(err.to_string(), "Value should be between 0.0 and 4095.0.");
    }

    #[test]
    fn degenerate_range() {
        let r = ScaleRange::new(5.0, 5.0);
        assert!(matches!(
            r.to_raw(5.0),
            Err(IoError::DegenerateRange { start, end }) if start == 5.0 && end == 5.0
        ));
        // Forward map stays total.
        assert_eq!(r.to_scaled(1234.0), 5.0);
    }

    #[test]
    fn non_finite_bounds_are_degenerate() {
        for r in [
            ScaleRange::new(0.0, f64::INFINITY),
            ScaleRange::new(f64::NAN, 1.0),
        ] {
            assert!(matches!(r.to_raw(0.5), Err(IoError::DegenerateRange { .. })));
        }
    }

    #[test]
    fn widest_finite_bounds() {
        let r = ScaleRange::new(-1e308, 1e308);
        assert!((r.to_raw(0.0).unwrap() - 2047.5).abs() < EPS);
        assert!((r.to_raw(1e308).unwrap() - 4095.0).abs() < EPS);
        assert!(r.to_raw(-1e308).unwrap().abs() < EPS);
        assert_eq!(r.to_scaled(2047.5), 0.0);
        assert_eq!(r.to_scaled(4095.0), 1e308);

        // Finite span, overflowing product.
        let r = ScaleRange::new(0.0, 1e308);
        assert!((r.to_raw(1e308).unwrap() - 4095.0).abs() < EPS);
        assert_eq!(r.to_scaled(4095.0), 1e308);
    }

    #[test]
    fn unreachable_value_has_no_raw() {
        let r = ScaleRange::new(-1e308, 1e308);
        assert!(matches!(
            r.to_raw(f64::MAX),
            Ok(raw) if raw.is_finite()
        ));
        let narrow = ScaleRange::new(0.0, 1e-300);
        assert!(matches!(
            narrow.to_raw(1e300),
            Err(IoError::OutOfScaleRange { .. })
        ));
    }

    #[test]
    fn truncation_toward_zero() {
        assert_eq!(truncate_raw(2047.999), 2047);
        assert_eq!(truncate_raw(0.4), 0);
        assert_eq!(truncate_raw(-1e-12), 0);
        assert_eq!(truncate_raw(4095.0000001), 4095);
    }
}
