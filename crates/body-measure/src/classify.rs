//! Health-index classification rule table.
//!
//! | Index | Band | Category |
//! |-------|------|----------|
//! | BMI   | `< 18.5` | underweight |
//! | BMI   | `[18.5, 25)` | normal |
//! | BMI   | `[25, 30)` | overweight |
//! | BMI   | `>= 30` | obese |
//! | WHR   | `<= 0.85` | low risk |
//! | WHR   | `(0.85, 0.95]` | medium risk |
//! | WHR   | `> 0.95` | high risk |
//! | WHtR  | `<= 0.50` | healthy |
//! | WHtR  | `> 0.50` | elevated |
//!
//! Classification is consumed by presentation and is not stored in the
//! [`MeasurementRecord`].

use serde::{Deserialize, Serialize};

use crate::MeasurementRecord;

/// Body-mass index category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "underweight",
            BmiCategory::Normal => "normal",
            BmiCategory::Overweight => "overweight",
            BmiCategory::Obese => "obese",
        }
    }
}

/// Waist-to-hip ratio risk band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WhrRisk {
    Low,
    Medium,
    High,
}

impl WhrRisk {
    pub fn from_whr(whr: f64) -> Self {
        if whr <= 0.85 {
            WhrRisk::Low
        } else if whr <= 0.95 {
            WhrRisk::Medium
        } else {
            WhrRisk::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WhrRisk::Low => "low",
            WhrRisk::Medium => "medium",
            WhrRisk::High => "high",
        }
    }
}

/// Waist-to-height ratio risk band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WhtrRisk {
    Healthy,
    Elevated,
}

impl WhtrRisk {
    pub fn from_whtr(whtr: f64) -> Self {
        if whtr <= 0.50 {
            WhtrRisk::Healthy
        } else {
            WhtrRisk::Elevated
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WhtrRisk::Healthy => "healthy",
            WhtrRisk::Elevated => "elevated",
        }
    }
}

macro_rules! display_via_label {
    ($($ty:ty),*) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.label())
                }
            }
        )*
    };
}

display_via_label!(BmiCategory, WhrRisk, WhtrRisk);

/// All classifications for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthClassification {
    pub bmi: BmiCategory,
    pub whr: WhrRisk,
    pub whtr: WhtrRisk,
}

impl HealthClassification {
    /// Classify a record. BMI uses the unrounded value so that a weight just
    /// under the 18.5 boundary is not promoted by display rounding.
    pub fn for_record(record: &MeasurementRecord) -> Self {
        Self {
            bmi: BmiCategory::from_bmi(record.bmi_exact()),
            whr: WhrRisk::from_whr(record.whr()),
            whtr: WhtrRisk::from_whtr(record.whtr()),
        }
    }
}
