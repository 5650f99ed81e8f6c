//! Measurement engine: ratio estimates plus biometrics to a measurement record.
//!
//! The engine is a pure function. It validates everything it is given, then
//! derives widths, elliptical circumferences and health indices in one pass.
//! It never returns a partially filled record.

use tracing::debug;

use crate::ellipse::checked_circumference_cm;
use crate::error::{MeasureError, MeasureResult};
use crate::params::MeasureParams;
use crate::types::{MeasurementRecord, RawRatioEstimate, UserBiometrics};

/// Tallest accepted height in centimeters.
pub const MAX_HEIGHT_CM: f64 = 300.0;

/// Build a measurement record with default parameters (age-stepped depth).
pub fn measure(
    raw: &RawRatioEstimate,
    biometrics: &UserBiometrics,
) -> MeasureResult<MeasurementRecord> {
    measure_with_params(raw, biometrics, &MeasureParams::default())
}

/// Build a measurement record.
///
/// # Errors
///
/// - [`MeasureError::InvalidParams`] if `params` are inconsistent
/// - [`MeasureError::InvalidBiometric`] for non-positive height or weight, a
///   height above [`MAX_HEIGHT_CM`], or a negative age
/// - [`MeasureError::InvalidRatio`] for negative, non-finite or absurd ratios,
///   confidences outside [0, 1], and circumferences too large to represent
/// - [`MeasureError::LowConfidence`] when a minimum confidence is configured
///   and not met
/// - [`MeasureError::DivisionByZero`] when the hip circumference is zero
pub fn measure_with_params(
    raw: &RawRatioEstimate,
    biometrics: &UserBiometrics,
    params: &MeasureParams,
) -> MeasureResult<MeasurementRecord> {
    params.validate()?;
    validate_biometrics(biometrics)?;
    validate_ratios(raw, params)?;

    if let Some(minimum) = params.min_confidence {
        if raw.confidence < minimum {
            return Err(MeasureError::LowConfidence {
                confidence: raw.confidence,
                minimum,
            });
        }
    }

    let height_cm = biometrics.height_cm;
    let depth_factor = params.depth_model.factor_for(biometrics.age_years);

    let waist_cm = raw.waist_ratio * height_cm;
    let hip_cm = raw.hip_ratio * height_cm;
    let shoulder_cm = raw.shoulder_ratio * height_cm;
    let chest_cm = raw.chest_ratio * height_cm;
    let torso_cm = raw.torso_height_ratio * height_cm;

    let waist_circumference_cm = checked_circumference_cm(waist_cm, depth_factor)
        .ok_or(MeasureError::InvalidRatio {
            field: "waist_ratio",
            value: raw.waist_ratio,
            max: params.max_ratio,
        })?;
    let hip_circumference_cm = checked_circumference_cm(hip_cm, depth_factor).ok_or(
        MeasureError::InvalidRatio {
            field: "hip_ratio",
            value: raw.hip_ratio,
            max: params.max_ratio,
        },
    )?;

    if hip_circumference_cm == 0 {
        return Err(MeasureError::DivisionByZero {
            index: "waist-to-hip ratio",
            denominator: "hip circumference",
        });
    }

    let bmi = round_to(body_mass_index(biometrics.weight_kg, height_cm), 1);
    let whr = round_to(
        waist_circumference_cm as f64 / hip_circumference_cm as f64,
        2,
    );
    let whtr = round_to(waist_circumference_cm as f64 / height_cm, 2);

    debug!(
        target: "body_measure::engine",
        depth_factor,
        waist_cm = format!("{:.1}", waist_cm),
        hip_cm = format!("{:.1}", hip_cm),
        waist_circumference_cm,
        hip_circumference_cm,
        bmi,
        whr,
        whtr,
        "Derived measurements"
    );

    Ok(MeasurementRecord {
        height_cm,
        weight_kg: biometrics.weight_kg,
        age_years: biometrics.age_years,
        waist_width_m: cm_to_m(waist_cm),
        hip_width_m: cm_to_m(hip_cm),
        shoulder_width_m: cm_to_m(shoulder_cm),
        chest_width_m: cm_to_m(chest_cm),
        torso_height_m: cm_to_m(torso_cm),
        waist_circumference_cm,
        hip_circumference_cm,
        bmi,
        whr,
        whtr,
        depth_factor,
        confidence: raw.confidence,
    })
}

/// Body-mass index: weight in kilograms over height in meters squared.
pub fn body_mass_index(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Round to a fixed number of decimal places (half away from zero).
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

#[inline]
fn cm_to_m(cm: f64) -> f64 {
    cm / 100.0
}

fn validate_biometrics(biometrics: &UserBiometrics) -> MeasureResult<()> {
    if !biometrics.height_cm.is_finite()
        || biometrics.height_cm <= 0.0
        || biometrics.height_cm > MAX_HEIGHT_CM
    {
        return Err(MeasureError::invalid_biometric(
            "height_cm",
            biometrics.height_cm,
        ));
    }
    if !biometrics.weight_kg.is_finite() || biometrics.weight_kg <= 0.0 {
        return Err(MeasureError::invalid_biometric(
            "weight_kg",
            biometrics.weight_kg,
        ));
    }
    if let Some(age) = biometrics.age_years {
        if !age.is_finite() || age < 0.0 {
            return Err(MeasureError::invalid_biometric("age_years", age));
        }
    }
    Ok(())
}

fn validate_ratios(raw: &RawRatioEstimate, params: &MeasureParams) -> MeasureResult<()> {
    for (field, value) in raw.fields() {
        if !value.is_finite() || value < 0.0 || value > params.max_ratio {
            return Err(MeasureError::InvalidRatio {
                field,
                value,
                max: params.max_ratio,
            });
        }
    }
    if !raw.confidence.is_finite() || !(0.0..=1.0).contains(&raw.confidence) {
        return Err(MeasureError::invalid_ratio("confidence", raw.confidence));
    }
    Ok(())
}
