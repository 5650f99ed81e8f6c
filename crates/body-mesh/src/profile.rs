//! Anthropometric profile: radius as a function of normalized height.
//!
//! The profile is a piecewise-linear curve through nine landmarks, bottom to
//! top. Torso radii come from the measurement record; the remaining radii are
//! fixed proportions of the scale factor (`height_cm / 100`). Each sample
//! interpolates only between its two bracketing landmarks.
//!
//! Above the mid-neck the interpolated radius is replaced by a round head
//! profile, `r = head_r * sqrt(max(0, 1 - (2 * head_t - 1)^2))`.

use body_measure::MeasurementRecord;
use serde::{Deserialize, Serialize};

use crate::error::{SilhouetteError, SilhouetteResult};

/// Smallest profile radius, in meters. Also the fallback for a head radius
/// that would otherwise be zero or NaN.
pub const MIN_PROFILE_RADIUS: f64 = 0.001;

/// Fewest samples a profile may have.
pub const MIN_PROFILE_SAMPLES: usize = 20;

/// Anatomical landmark along the body axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandmarkKind {
    Ankle,
    Knee,
    Hip,
    Waist,
    Chest,
    Shoulder,
    NeckBase,
    MidNeck,
    HeadCap,
}

impl LandmarkKind {
    /// All landmarks, bottom to top.
    pub const ALL: [LandmarkKind; 9] = [
        LandmarkKind::Ankle,
        LandmarkKind::Knee,
        LandmarkKind::Hip,
        LandmarkKind::Waist,
        LandmarkKind::Chest,
        LandmarkKind::Shoulder,
        LandmarkKind::NeckBase,
        LandmarkKind::MidNeck,
        LandmarkKind::HeadCap,
    ];

    /// Height as a fraction of total body height.
    pub fn height_fraction(&self) -> f64 {
        match self {
            LandmarkKind::Ankle => 0.0,
            LandmarkKind::Knee => 0.27,
            LandmarkKind::Hip => 0.50,
            LandmarkKind::Waist => 0.61,
            LandmarkKind::Chest => 0.72,
            LandmarkKind::Shoulder => 0.81,
            LandmarkKind::NeckBase => 0.84,
            LandmarkKind::MidNeck => 0.87,
            LandmarkKind::HeadCap => 1.0,
        }
    }
}

// Fixed radii as fractions of the scale factor.
const ANKLE_RADIUS: f64 = 0.045;
const NECK_BASE_RADIUS: f64 = 0.055;
const MID_NECK_RADIUS: f64 = 0.05;
const HEAD_RADIUS: f64 = 0.06;

// Knee radius as a fraction of hip radius.
const KNEE_TO_HIP: f64 = 0.62;

/// One control point of the profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub kind: LandmarkKind,
    /// Normalized height in [0, 1].
    pub t: f64,
    /// Distance from the body axis in meters. For [`LandmarkKind::HeadCap`]
    /// this is the radius of the head.
    pub radius: f64,
}

/// Landmarks for a measurement record, bottom to top.
pub fn landmarks(record: &MeasurementRecord) -> SilhouetteResult<[Landmark; 9]> {
    let scale = record.height_m();
    check_positive("height_cm", record.height_cm())?;
    check_positive("hip_width_m", record.hip_width_m())?;
    check_positive("waist_width_m", record.waist_width_m())?;
    check_positive("chest_width_m", record.chest_width_m())?;
    check_positive("shoulder_width_m", record.shoulder_width_m())?;

    let hip_r = record.hip_width_m() / 2.0;
    let radius = |kind: LandmarkKind| match kind {
        LandmarkKind::Ankle => ANKLE_RADIUS * scale,
        LandmarkKind::Knee => KNEE_TO_HIP * hip_r,
        LandmarkKind::Hip => hip_r,
        LandmarkKind::Waist => record.waist_width_m() / 2.0,
        LandmarkKind::Chest => record.chest_width_m() / 2.0,
        LandmarkKind::Shoulder => record.shoulder_width_m() / 2.0,
        LandmarkKind::NeckBase => NECK_BASE_RADIUS * scale,
        LandmarkKind::MidNeck => MID_NECK_RADIUS * scale,
        LandmarkKind::HeadCap => HEAD_RADIUS * scale,
    };

    Ok(LandmarkKind::ALL.map(|kind| Landmark {
        kind,
        t: kind.height_fraction(),
        radius: radius(kind),
    }))
}

fn check_positive(field: &'static str, value: f64) -> SilhouetteResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SilhouetteError::invalid_record(field, value))
    }
}

/// Radius of the round head profile at local fraction `head_t` in [0, 1].
///
/// Never NaN: the square root argument is clamped at zero, and a result that
/// is still not a usable radius falls back to [`MIN_PROFILE_RADIUS`].
pub fn head_radius(head_t: f64, head_r: f64) -> f64 {
    let u = 2.0 * head_t - 1.0;
    let r = head_r * (1.0 - u * u).max(0.0).sqrt();
    if r.is_finite() {
        r.max(MIN_PROFILE_RADIUS)
    } else {
        MIN_PROFILE_RADIUS
    }
}

/// One sample of the profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfilePoint {
    /// Normalized height in [0, 1].
    pub t: f64,
    /// Distance from the body axis in meters.
    pub radius: f64,
    /// Height above the ground in meters.
    pub height: f64,
}

/// Sampled body profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyProfile {
    landmarks: [Landmark; 9],
    points: Vec<ProfilePoint>,
    scale: f64,
}

impl BodyProfile {
    /// Sample the profile of `record` at `samples` evenly spaced heights.
    ///
    /// Heights run from exactly `0` to exactly the scale factor.
    pub fn from_record(record: &MeasurementRecord, samples: usize) -> SilhouetteResult<Self> {
        if samples < MIN_PROFILE_SAMPLES {
            return Err(SilhouetteError::invalid_param(
                "profile_samples",
                format!(
                    "need at least {} samples, got {}",
                    MIN_PROFILE_SAMPLES, samples
                ),
            ));
        }

        let landmarks = landmarks(record)?;
        let scale = record.height_m();
        let last = (samples - 1) as f64;

        let points = (0..samples)
            .map(|i| {
                let t = i as f64 / last;
                ProfilePoint {
                    t,
                    radius: radius_at(&landmarks, t),
                    height: t * scale,
                }
            })
            .collect();

        Ok(Self {
            landmarks,
            points,
            scale,
        })
    }

    pub fn landmarks(&self) -> &[Landmark; 9] {
        &self.landmarks
    }

    pub fn landmark(&self, kind: LandmarkKind) -> &Landmark {
        // ALL is ordered identically to the array.
        &self.landmarks[kind as usize]
    }

    pub fn points(&self) -> &[ProfilePoint] {
        &self.points
    }

    /// Profile as `(radius, height)` pairs, the input of [`lathe`](crate::lathe::lathe).
    pub fn radius_height_pairs(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.radius, p.height)).collect()
    }

    /// Scale factor: body height in meters.
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

/// Profile radius at normalized height `t`.
///
/// The round head takes over above the mid-neck landmark rather than the neck
/// base, so the neck-base to mid-neck span stays a linear taper and both neck
/// landmarks keep their radii. Everything below interpolates between the two
/// bracketing landmarks only.
fn radius_at(landmarks: &[Landmark; 9], t: f64) -> f64 {
    let mid_neck = &landmarks[LandmarkKind::MidNeck as usize];
    let head_cap = &landmarks[LandmarkKind::HeadCap as usize];

    if t > mid_neck.t {
        let head_t = (t - mid_neck.t) / (head_cap.t - mid_neck.t);
        return head_radius(head_t, head_cap.radius);
    }

    let upper = landmarks
        .iter()
        .position(|lm| lm.t >= t)
        .unwrap_or(landmarks.len() - 1);
    if upper == 0 || landmarks[upper].t == t {
        return landmarks[upper].radius.max(MIN_PROFILE_RADIUS);
    }
    let (lo, hi) = (&landmarks[upper - 1], &landmarks[upper]);
    let local = (t - lo.t) / (hi.t - lo.t);
    (lo.radius + (hi.radius - lo.radius) * local).max(MIN_PROFILE_RADIUS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use body_measure::{MeasureParams, RawRatioEstimate, UserBiometrics, measure_with_params};

    fn record() -> MeasurementRecord {
        let raw = RawRatioEstimate {
            waist_ratio: 0.165,
            hip_ratio: 0.195,
            shoulder_ratio: 0.245,
            chest_ratio: 0.18,
            torso_height_ratio: 0.3,
            confidence: 0.9,
        };
        measure_with_params(
            &raw,
            &UserBiometrics::new(170.0, 65.0),
            &MeasureParams::simple(),
        )
        .unwrap()
    }

    #[test]
    fn test_landmarks_are_ordered() {
        let lms = landmarks(&record()).unwrap();
        for pair in lms.windows(2) {
            assert!(pair[0].t < pair[1].t);
        }
        for (lm, kind) in lms.iter().zip(LandmarkKind::ALL) {
            assert_eq!(lm.kind, kind);
            assert!(lm.radius > 0.0);
        }
    }

    #[test]
    fn test_torso_radii_are_half_widths() {
        let rec = record();
        let profile = BodyProfile::from_record(&rec, 48).unwrap();
        assert_eq!(
            profile.landmark(LandmarkKind::Hip).radius,
            rec.hip_width_m() / 2.0
        );
        assert_eq!(
            profile.landmark(LandmarkKind::Shoulder).radius,
            rec.shoulder_width_m() / 2.0
        );
        assert_eq!(profile.landmark(LandmarkKind::HeadCap).t, 1.0);
    }

    #[test]
    fn test_head_radius_domain_boundaries() {
        for head_t in [0.0, 1.0] {
            let r = head_radius(head_t, 0.1);
            assert!(!r.is_nan());
            assert!(r > 0.0 && r <= MIN_PROFILE_RADIUS);
        }
        // Slightly outside the domain would be a negative square root.
        assert_eq!(head_radius(-1e-12, 0.1), MIN_PROFILE_RADIUS);
        assert_eq!(head_radius(1.0 + 1e-12, 0.1), MIN_PROFILE_RADIUS);
        assert_eq!(head_radius(f64::NAN, 0.1), MIN_PROFILE_RADIUS);
        assert!((head_radius(0.5, 0.1) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_heights_span_exactly() {
        let profile = BodyProfile::from_record(&record(), 48).unwrap();
        let pts = profile.points();
        assert_eq!(pts.len(), 48);
        assert_eq!(pts[0].height, 0.0);
        assert_eq!(pts[47].height, 1.7);
        for pair in pts.windows(2) {
            assert!(pair[1].height >= pair[0].height);
        }
    }

    #[test]
    fn test_interpolation_is_local() {
        let rec = record();
        let profile = BodyProfile::from_record(&rec, 20).unwrap();
        let lms = profile.landmarks();
        let hip = &lms[LandmarkKind::Hip as usize];
        let waist = &lms[LandmarkKind::Waist as usize];

        let t = (hip.t + waist.t) / 2.0;
        let expected = (hip.radius + waist.radius) / 2.0;
        assert!((radius_at(lms, t) - expected).abs() < 1e-12);
        assert_eq!(radius_at(lms, hip.t), hip.radius);
    }

    #[test]
    fn test_neck_tapers_before_head_takes_over() {
        let profile = BodyProfile::from_record(&record(), 48).unwrap();
        let lms = profile.landmarks();
        let neck_base = &lms[LandmarkKind::NeckBase as usize];
        let mid_neck = &lms[LandmarkKind::MidNeck as usize];

        assert_eq!(radius_at(lms, neck_base.t), neck_base.radius);
        assert_eq!(radius_at(lms, mid_neck.t), mid_neck.radius);
        let between = (neck_base.t + mid_neck.t) / 2.0;
        let expected = (neck_base.radius + mid_neck.radius) / 2.0;
        assert!((radius_at(lms, between) - expected).abs() < 1e-12);

        // Just past mid-neck the head starts from its narrow bottom.
        assert!(radius_at(lms, mid_neck.t + 1e-6) < mid_neck.radius);
    }

    #[test]
    fn test_rejects_too_few_samples() {
        let err = BodyProfile::from_record(&record(), 19).unwrap_err();
        assert_eq!(
            err.code(),
            crate::error::SilhouetteErrorCode::InvalidParams
        );
    }
}
