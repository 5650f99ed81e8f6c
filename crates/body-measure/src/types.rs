//! Core measurement data types.

use serde::{Deserialize, Serialize};

use crate::classify::HealthClassification;

/// Body-width ratios estimated from a single front-facing photograph.
///
/// Each ratio is a width (or the torso height) expressed as a fraction of the
/// total body height visible in the photo. Values come from an untrusted
/// oracle and are validated by the engine before use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRatioEstimate {
    pub waist_ratio: f64,
    pub hip_ratio: f64,
    pub shoulder_ratio: f64,
    pub chest_ratio: f64,
    pub torso_height_ratio: f64,
    /// Oracle's self-reported confidence in [0, 1]. Advisory only unless a
    /// minimum is configured in [`MeasureParams`](crate::MeasureParams).
    pub confidence: f64,
}

impl RawRatioEstimate {
    /// Ratio associated with a tracked body part.
    pub fn ratio(&self, part: BodyPart) -> f64 {
        match part {
            BodyPart::Waist => self.waist_ratio,
            BodyPart::Hip => self.hip_ratio,
            BodyPart::Chest => self.chest_ratio,
            BodyPart::Shoulder => self.shoulder_ratio,
        }
    }

    /// All ratio fields with their wire names, in a stable order.
    pub fn fields(&self) -> [(&'static str, f64); 5] {
        [
            ("waistRatio", self.waist_ratio),
            ("hipRatio", self.hip_ratio),
            ("shoulderRatio", self.shoulder_ratio),
            ("chestRatio", self.chest_ratio),
            ("torsoHeightRatio", self.torso_height_ratio),
        ]
    }
}

/// Biometrics entered by the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBiometrics {
    pub height_cm: f64,
    pub weight_kg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_years: Option<f64>,
}

impl UserBiometrics {
    /// Biometrics without an age.
    pub fn new(height_cm: f64, weight_kg: f64) -> Self {
        Self {
            height_cm,
            weight_kg,
            age_years: None,
        }
    }

    /// Attach an age in years.
    pub fn with_age(mut self, age_years: f64) -> Self {
        self.age_years = Some(age_years);
        self
    }

    /// Height in meters.
    #[inline]
    pub fn height_m(&self) -> f64 {
        self.height_cm / 100.0
    }
}

/// Body parts whose widths are tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyPart {
    Waist,
    Hip,
    Chest,
    Shoulder,
}

impl BodyPart {
    /// Wire name of the ratio field for this part.
    pub fn field_name(&self) -> &'static str {
        match self {
            BodyPart::Waist => "waistRatio",
            BodyPart::Hip => "hipRatio",
            BodyPart::Chest => "chestRatio",
            BodyPart::Shoulder => "shoulderRatio",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            BodyPart::Waist => "Waist",
            BodyPart::Hip => "Hip",
            BodyPart::Chest => "Chest",
            BodyPart::Shoulder => "Shoulder",
        }
    }
}

impl std::fmt::Display for BodyPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Complete, internally consistent measurement set for one analysis.
///
/// Widths are carried in meters; circumferences are whole centimeters.
/// Records are only built by the engine and are never mutated: a new
/// analysis produces a new record. They serialize for presentation but do
/// not deserialize, so every record in hand has passed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementRecord {
    pub(crate) height_cm: f64,
    pub(crate) weight_kg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) age_years: Option<f64>,
    pub(crate) waist_width_m: f64,
    pub(crate) hip_width_m: f64,
    pub(crate) shoulder_width_m: f64,
    pub(crate) chest_width_m: f64,
    pub(crate) torso_height_m: f64,
    pub(crate) waist_circumference_cm: u32,
    pub(crate) hip_circumference_cm: u32,
    pub(crate) bmi: f64,
    pub(crate) whr: f64,
    pub(crate) whtr: f64,
    pub(crate) depth_factor: f64,
    pub(crate) confidence: f64,
}

impl MeasurementRecord {
    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn age_years(&self) -> Option<f64> {
        self.age_years
    }

    /// Height in meters, also the scale factor of the silhouette.
    pub fn height_m(&self) -> f64 {
        self.height_cm / 100.0
    }

    pub fn waist_width_m(&self) -> f64 {
        self.waist_width_m
    }

    pub fn hip_width_m(&self) -> f64 {
        self.hip_width_m
    }

    pub fn shoulder_width_m(&self) -> f64 {
        self.shoulder_width_m
    }

    pub fn chest_width_m(&self) -> f64 {
        self.chest_width_m
    }

    /// Torso height (shoulder line to crotch) in meters.
    pub fn torso_height_m(&self) -> f64 {
        self.torso_height_m
    }

    /// Width of a tracked part in meters.
    pub fn width_m(&self, part: BodyPart) -> f64 {
        match part {
            BodyPart::Waist => self.waist_width_m,
            BodyPart::Hip => self.hip_width_m,
            BodyPart::Chest => self.chest_width_m,
            BodyPart::Shoulder => self.shoulder_width_m,
        }
    }

    pub fn waist_circumference_cm(&self) -> u32 {
        self.waist_circumference_cm
    }

    pub fn hip_circumference_cm(&self) -> u32 {
        self.hip_circumference_cm
    }

    /// Body-mass index, one decimal place.
    ///
    /// The BMI category is taken from [`bmi_exact`](Self::bmi_exact), so a
    /// value just under 18.5 displays as `18.5` yet classifies as
    /// underweight.
    pub fn bmi(&self) -> f64 {
        self.bmi
    }

    /// Body-mass index before rounding.
    pub fn bmi_exact(&self) -> f64 {
        crate::engine::body_mass_index(self.weight_kg, self.height_cm)
    }

    /// Waist-to-hip ratio, two decimal places.
    pub fn whr(&self) -> f64 {
        self.whr
    }

    /// Waist-to-height ratio, two decimal places.
    pub fn whtr(&self) -> f64 {
        self.whtr
    }

    /// Torso depth factor applied to the elliptical cross-sections.
    pub fn depth_factor(&self) -> f64 {
        self.depth_factor
    }

    /// Oracle confidence carried through from the estimate.
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Apply the classification rule table to this record.
    ///
    /// BMI is classified on the unrounded value; WHR and WHtR on their
    /// stored two-decimal values.
    pub fn classify(&self) -> HealthClassification {
        HealthClassification::for_record(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_lookup() {
        let raw = RawRatioEstimate {
            waist_ratio: 0.16,
            hip_ratio: 0.19,
            shoulder_ratio: 0.24,
            chest_ratio: 0.18,
            torso_height_ratio: 0.3,
            confidence: 0.9,
        };
        assert_eq!(raw.ratio(BodyPart::Hip), 0.19);
        assert_eq!(raw.ratio(BodyPart::Shoulder), 0.24);
        assert_eq!(raw.fields()[4], ("torsoHeightRatio", 0.3));
    }

    #[test]
    fn test_biometrics_wire_names() {
        let json = r#"{"heightCm": 172.0, "weightKg": 68.5}"#;
        let bio: UserBiometrics = serde_json::from_str(json).unwrap();
        assert_eq!(bio, UserBiometrics::new(172.0, 68.5));
        assert!((bio.height_m() - 1.72).abs() < 1e-12);

        let aged = bio.with_age(44.0);
        let out = serde_json::to_string(&aged).unwrap();
        assert!(out.contains("\"ageYears\":44.0"));
    }

    #[test]
    fn test_body_part_names() {
        for part in [
            BodyPart::Hip,
            BodyPart::Waist,
            BodyPart::Chest,
            BodyPart::Shoulder,
        ] {
            assert!(part.field_name().ends_with("Ratio"));
            assert_eq!(part.to_string(), part.label());
        }
    }
}
