// File: crates/avexport-chart/tests/range_axis.rs
// Purpose: Range axis construction policies and their bounds contract.

use avexport_chart::RangeAxis;
use proptest::prelude::*;

#[test]
fn automatic_from_mixed_values() {
    let axis = RangeAxis::automatic("v", [-3.0, 0.0, 2.0, 2.0, 5.0], 1.0).unwrap();
    assert_eq!(axis.low, -3.0);
    assert!(axis.high > 5.0);
    // padded by a fraction of the span (8.0), not less than min_pad
    assert!((axis.high - 6.0).abs() < 1e-9);
}

#[test]
fn automatic_from_constant_values_has_headroom() {
    for v in [0.0, 4.0, -2.5] {
        let axis = RangeAxis::automatic("v", [v, v, v], 0.0).unwrap();
        assert!(axis.low < axis.high, "constant {v} collapsed: {axis:?}");
    }
}

#[test]
fn fixed_anchor_range() {
    let axis = RangeAxis::fixed("dBTP", 0.0, 4, 3.0);
    assert_eq!((axis.low, axis.high), (-12.0, 12.0));
    assert!(axis.contains(-1.0));
}

proptest! {
    #[test]
    fn automatic_range_contains_every_sample(
        values in prop::collection::vec(-1e6f64..1e6, 1..200),
        pad in 0.0f64..10.0,
    ) {
        let axis = RangeAxis::automatic("v", values.iter().copied(), pad).unwrap();
        prop_assert!(axis.low < axis.high);
        prop_assert!(axis.low <= 0.0);
        for v in values {
            prop_assert!(axis.contains(v));
        }
    }
}
