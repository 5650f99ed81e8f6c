//! End-to-end tests for the measurement engine.
//!
//! These cover the documented numeric contracts: ellipse perimeters, index
//! rounding, classification boundaries, and the age-dependent depth factor.

use body_measure::{
    BmiCategory, DepthModel, ErrorCode, MAX_HEIGHT_CM, MeasureParams, RawRatioEstimate,
    UserBiometrics, WhrRisk, WhtrRisk, ellipse, measure, measure_with_params,
};

fn typical_estimate() -> RawRatioEstimate {
    RawRatioEstimate {
        waist_ratio: 0.165,
        hip_ratio: 0.195,
        shoulder_ratio: 0.245,
        chest_ratio: 0.18,
        torso_height_ratio: 0.3,
        confidence: 0.88,
    }
}

// =============================================================================
// Ellipse perimeter
// =============================================================================

#[test]
fn test_reference_waist_width_80cm() {
    // A waist ratio that yields an 80 cm width at 160 cm height.
    let raw = RawRatioEstimate {
        waist_ratio: 0.5,
        ..typical_estimate()
    };
    let bio = UserBiometrics::new(160.0, 60.0);
    let record = measure_with_params(&raw, &bio, &MeasureParams::simple()).unwrap();

    assert_eq!(record.waist_width_m(), 0.8);
    assert_eq!(
        record.waist_circumference_cm(),
        ellipse::ramanujan_perimeter(40.0, 28.0).round() as u32
    );
    assert_eq!(record.waist_circumference_cm(), 215);
}

#[test]
fn test_unit_depth_factor_is_a_circle() {
    let raw = typical_estimate();
    let bio = UserBiometrics::new(200.0, 80.0);
    let params = MeasureParams::default().with_depth_factor(1.0);
    let record = measure_with_params(&raw, &bio, &params).unwrap();

    // Width 39 cm: circle of radius 19.5 cm.
    let circle = 2.0 * std::f64::consts::PI * 19.5;
    assert_eq!(record.hip_circumference_cm(), circle.round() as u32);
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_engine_is_deterministic() {
    let raw = typical_estimate();
    let bio = UserBiometrics::new(171.3, 66.2).with_age(52.0);
    let first = measure(&raw, &bio).unwrap();
    for _ in 0..10 {
        let again = measure(&raw, &bio).unwrap();
        assert_eq!(again, first);
        assert_eq!(again.bmi().to_bits(), first.bmi().to_bits());
        assert_eq!(again.whr().to_bits(), first.whr().to_bits());
        assert_eq!(again.waist_width_m().to_bits(), first.waist_width_m().to_bits());
    }
}

// =============================================================================
// Index rounding and classification boundaries
// =============================================================================

#[test]
fn test_bmi_lower_normal_boundary() {
    let raw = typical_estimate();

    let record = measure(&raw, &UserBiometrics::new(170.0, 53.5)).unwrap();
    assert_eq!(record.bmi(), 18.5);
    assert_eq!(record.classify().bmi, BmiCategory::Normal);

    // Displays as 18.5; the category follows the unrounded value.
    let record = measure(&raw, &UserBiometrics::new(170.0, 53.4)).unwrap();
    assert_eq!(record.bmi(), 18.5);
    assert!(record.bmi_exact() < 18.5);
    assert_eq!(record.classify().bmi, BmiCategory::Underweight);
}

#[test]
fn test_implausible_height_is_rejected() {
    let raw = RawRatioEstimate {
        waist_ratio: 0.1,
        hip_ratio: 0.3,
        ..typical_estimate()
    };
    let err = measure(&raw, &UserBiometrics::new(1.0e11, 70.0)).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidBiometric);

    let record = measure(&raw, &UserBiometrics::new(MAX_HEIGHT_CM, 70.0)).unwrap();
    assert!(record.whr() < 0.5);
}

#[test]
fn test_bmi_rounds_to_one_decimal() {
    let record = measure(&typical_estimate(), &UserBiometrics::new(180.0, 81.0)).unwrap();
    // 81 / 3.24 = 25.0
    assert_eq!(record.bmi(), 25.0);
    assert_eq!(record.classify().bmi, BmiCategory::Overweight);

    let record = measure(&typical_estimate(), &UserBiometrics::new(165.0, 95.0)).unwrap();
    assert_eq!(record.bmi(), 34.9);
    assert_eq!(record.classify().bmi, BmiCategory::Obese);
}

#[test]
fn test_whr_and_whtr_are_two_decimals() {
    let record = measure(&typical_estimate(), &UserBiometrics::new(176.0, 72.0)).unwrap();
    let scaled_whr = record.whr() * 100.0;
    let scaled_whtr = record.whtr() * 100.0;
    assert!((scaled_whr - scaled_whr.round()).abs() < 1e-9);
    assert!((scaled_whtr - scaled_whtr.round()).abs() < 1e-9);

    let classes = record.classify();
    assert_eq!(classes.whr, WhrRisk::from_whr(record.whr()));
    assert_eq!(classes.whtr, WhtrRisk::from_whtr(record.whtr()));
}

#[test]
fn test_whr_boundary_classification() {
    assert_eq!(WhrRisk::from_whr(0.85), WhrRisk::Low);
    assert_eq!(WhrRisk::from_whr(0.86), WhrRisk::Medium);
}

// =============================================================================
// Age-dependent depth
// =============================================================================

#[test]
fn test_older_torso_is_deeper() {
    let raw = typical_estimate();
    let younger = measure(&raw, &UserBiometrics::new(170.0, 70.0).with_age(40.0)).unwrap();
    let older = measure(&raw, &UserBiometrics::new(170.0, 70.0).with_age(60.0)).unwrap();

    assert_eq!(younger.depth_factor(), 0.75);
    assert_eq!(older.depth_factor(), 0.78);
    assert!(older.waist_circumference_cm() > younger.waist_circumference_cm());
    assert!(older.hip_circumference_cm() > younger.hip_circumference_cm());
    // Widths do not depend on age.
    assert_eq!(older.waist_width_m(), younger.waist_width_m());
}

#[test]
fn test_custom_age_step() {
    let params = MeasureParams {
        depth_model: DepthModel::AgeStepped {
            threshold_years: 30.0,
            younger: 0.72,
            older: 0.80,
        },
        ..Default::default()
    };
    let record = measure_with_params(
        &typical_estimate(),
        &UserBiometrics::new(170.0, 70.0).with_age(31.0),
        &params,
    )
    .unwrap();
    assert_eq!(record.depth_factor(), 0.80);
}

// =============================================================================
// Failures never yield a record
// =============================================================================

#[test]
fn test_validation_and_arithmetic_errors_are_distinct() {
    let bio = UserBiometrics::new(170.0, 70.0);

    let err = measure(
        &RawRatioEstimate {
            hip_ratio: 0.0,
            ..typical_estimate()
        },
        &bio,
    )
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::DivisionByZero);

    let err = measure(&typical_estimate(), &UserBiometrics::new(0.0, 70.0)).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidBiometric);
    assert!(err.is_input_error());
}

#[test]
fn test_record_serializes_for_presentation() {
    let record = measure(&typical_estimate(), &UserBiometrics::new(170.0, 70.0)).unwrap();
    let json = serde_json::to_value(&record).unwrap();
    assert!(json.get("waistCircumferenceCm").is_some());
    assert!(json.get("whtr").is_some());
    assert!(json.get("ageYears").is_none());
}
