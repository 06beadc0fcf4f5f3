//! Property tests for range validation and the scaling transform.

use medioex_common::prelude::*;
use proptest::prelude::*;

fn any_class() -> impl Strategy<Value = ChannelClass> {
    prop::sample::select(ChannelClass::ALL.to_vec())
}

/// Bounds pairs that are not too close together, in either orientation.
fn scale_bounds() -> impl Strategy<Value = (f64, f64)> {
    (-1.0e6f64..1.0e6, -1.0e6f64..1.0e6).prop_filter("distinct bounds", |(s, e)| (s - e).abs() > 1e-3)
}

/// Any finite, well-separated bounds, up to the edges of `f64`.
fn wide_bounds() -> impl Strategy<Value = (f64, f64)> {
    (prop::num::f64::NORMAL, prop::num::f64::NORMAL).prop_filter("separated bounds", |(s, e)| {
        let span = (e / 2.0 - s / 2.0).abs();
        span > 0.5e-6 * s.abs().max(e.abs())
    })
}

proptest! {
    #[test]
    fn validate_matches_bounds_table(class in any_class(), pin in -1000i64..1000) {
        let range = class.range();
        let inside = pin >= range.first as i64 && pin <= range.last as i64;
        prop_assert_eq!(validate(class, pin).is_ok(), inside);
    }

    #[test]
    fn validate_is_idempotent(class in any_class(), pin in any::<i64>()) {
        prop_assert_eq!(validate(class, pin).is_ok(), validate(class, pin).is_ok());
    }

    #[test]
    fn raw_survives_scale_and_back(raw in 0u16..=4095, (start, end) in scale_bounds()) {
        let range = ScaleRange::new(start, end);
        let scaled = range.to_scaled(f64::from(raw));
        let back = range.to_raw(scaled).unwrap();
        let tolerance = 1e-9 * 4095.0 * (1.0 + start.abs().max(end.abs()) / (end - start).abs());
        prop_assert!((back - f64::from(raw)).abs() < tolerance,
            "raw {} -> {} -> {}", raw, scaled, back);
    }

    #[test]
    fn inverted_scale_mirrors_ascending(raw in 0u16..=4095, (start, end) in scale_bounds()) {
        let up = ScaleRange::new(start, end).to_scaled(f64::from(raw));
        let down = ScaleRange::new(end, start).to_scaled(f64::from(4095 - raw));
        let tolerance = 1e-9 * (1.0 + start.abs().max(end.abs()));
        prop_assert!((up - down).abs() < tolerance, "{} vs {}", up, down);
    }

    #[test]
    fn raw_equivalent_is_finite_for_any_bounds(raw in 0u16..=4095, (start, end) in wide_bounds()) {
        let range = ScaleRange::new(start, end);
        let scaled = range.to_scaled(f64::from(raw));
        prop_assert!(scaled.is_finite());
        let back = range.to_raw(scaled).unwrap();
        prop_assert!(back.is_finite());
        prop_assert!((back - f64::from(raw)).abs() < 1e-2, "raw {} -> {} -> {}", raw, scaled, back);
    }
}
