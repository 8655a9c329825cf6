//! JSON serialization of report types.

#![cfg(feature = "serde")]

use floatlab_core::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn test_epsilon_report_json() {
    let report = probe_epsilon(PrecisionKind::Single);
    let json = serde_json::to_value(report).unwrap();

    assert_eq!(json["precision"], "single");
    assert_eq!(json["mantissa_bits"], 23);
    assert_eq!(json["epsilon"].as_f64().unwrap(), f64::from(f32::EPSILON));

    let back: EpsilonReport = serde_json::from_value(json).unwrap();
    assert_eq!(back, report);
}

#[test]
fn test_comparison_json() {
    let comparison = Scenario::triple_root()
        .compare_at(PrecisionKind::Single, &ComparisonConfig::default())
        .unwrap();
    let json = serde_json::to_value(&comparison).unwrap();

    assert_eq!(json["precision"], "single");
    assert_eq!(json["degree"], 3);
    assert_eq!(json["classical"]["method"], "classical");
    assert_eq!(json["horner"]["operations"]["multiplications"], 3);
}

#[test]
fn test_layout_json() {
    let json = serde_json::to_value(FloatLayout::of(PrecisionKind::Double)).unwrap();
    assert_eq!(json["total_bits"], 64);
    assert_eq!(json["epsilon_exponent"], -52);
}
