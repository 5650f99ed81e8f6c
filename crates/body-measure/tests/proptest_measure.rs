//! Property-based tests for the measurement engine.
//!
//! Run with: cargo test -p body-measure -- proptest

use body_measure::{
    MeasureParams, RawRatioEstimate, UserBiometrics, ellipse::ramanujan_perimeter, measure,
    measure_with_params,
};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_estimate() -> impl Strategy<Value = RawRatioEstimate> {
    (
        0.08..0.35f64,
        0.08..0.35f64,
        0.1..0.4f64,
        0.08..0.35f64,
        0.2..0.45f64,
        0.0..=1.0f64,
    )
        .prop_map(
            |(waist, hip, shoulder, chest, torso, confidence)| RawRatioEstimate {
                waist_ratio: waist,
                hip_ratio: hip,
                shoulder_ratio: shoulder,
                chest_ratio: chest,
                torso_height_ratio: torso,
                confidence,
            },
        )
}

fn arb_biometrics() -> impl Strategy<Value = UserBiometrics> {
    (120.0..220.0f64, 35.0..180.0f64, prop::option::of(0.0..100.0f64)).prop_map(
        |(height, weight, age)| UserBiometrics {
            height_cm: height,
            weight_kg: weight,
            age_years: age,
        },
    )
}

proptest! {
    #[test]
    fn proptest_engine_is_deterministic(raw in arb_estimate(), bio in arb_biometrics()) {
        let a = measure(&raw, &bio).unwrap();
        let b = measure(&raw, &bio).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn proptest_indices_are_finite_and_positive(raw in arb_estimate(), bio in arb_biometrics()) {
        let record = measure(&raw, &bio).unwrap();
        prop_assert!(record.bmi().is_finite() && record.bmi() > 0.0);
        prop_assert!(record.whr().is_finite() && record.whr() > 0.0);
        prop_assert!(record.whtr().is_finite() && record.whtr() > 0.0);
        prop_assert!(record.hip_circumference_cm() > 0);
    }

    #[test]
    fn proptest_deeper_torso_never_shrinks_circumference(
        raw in arb_estimate(),
        bio in arb_biometrics(),
        shallow in 0.5..0.8f64,
        extra in 0.0..0.3f64,
    ) {
        let a = measure_with_params(&raw, &bio, &MeasureParams::default().with_depth_factor(shallow)).unwrap();
        let b = measure_with_params(&raw, &bio, &MeasureParams::default().with_depth_factor(shallow + extra)).unwrap();
        prop_assert!(b.waist_circumference_cm() >= a.waist_circumference_cm());
        prop_assert!(b.hip_circumference_cm() >= a.hip_circumference_cm());
    }

    #[test]
    fn proptest_perimeter_between_bounds(a in 0.1..100.0f64, ratio in 0.05..1.0f64) {
        let b = a * ratio;
        let p = ramanujan_perimeter(a, b);
        // An ellipse is enclosed by its bounding circle and encloses its inscribed one.
        prop_assert!(p <= 2.0 * std::f64::consts::PI * a + 1e-9);
        prop_assert!(p >= 2.0 * std::f64::consts::PI * b - 1e-9);
        // And its perimeter is at least twice the major axis.
        prop_assert!(p >= 4.0 * a - 1e-9);
    }
}
