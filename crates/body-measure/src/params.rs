//! Measurement configuration.

use serde::{Deserialize, Serialize};

use crate::error::{MeasureError, MeasureResult};

/// How torso depth is derived from width for the elliptical cross-section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum DepthModel {
    /// One depth factor for everyone.
    Fixed { factor: f64 },
    /// Torso depth increases with age: `older` applies strictly above
    /// `threshold_years`, `younger` otherwise (including unknown age).
    AgeStepped {
        threshold_years: f64,
        younger: f64,
        older: f64,
    },
}

impl DepthModel {
    /// Depth factor of the simple variant.
    pub const SIMPLE_FACTOR: f64 = 0.70;

    /// Depth factor for a person of the given age.
    pub fn factor_for(&self, age_years: Option<f64>) -> f64 {
        match *self {
            DepthModel::Fixed { factor } => factor,
            DepthModel::AgeStepped {
                threshold_years,
                younger,
                older,
            } => match age_years {
                Some(age) if age > threshold_years => older,
                _ => younger,
            },
        }
    }

    fn factors(&self) -> Vec<f64> {
        match *self {
            DepthModel::Fixed { factor } => vec![factor],
            DepthModel::AgeStepped { younger, older, .. } => vec![younger, older],
        }
    }
}

impl Default for DepthModel {
    fn default() -> Self {
        DepthModel::AgeStepped {
            threshold_years: 50.0,
            younger: 0.75,
            older: 0.78,
        }
    }
}

/// Parameters for [`measure_with_params`](crate::measure_with_params).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasureParams {
    /// Torso depth model.
    pub depth_model: DepthModel,

    /// Largest ratio accepted from the oracle (default: 1.0). A width wider
    /// than the person is tall has no plausible correction.
    pub max_ratio: f64,

    /// Reject estimates whose confidence is below this value.
    /// `None` (default) keeps confidence advisory.
    pub min_confidence: Option<f64>,
}

impl Default for MeasureParams {
    fn default() -> Self {
        Self {
            depth_model: DepthModel::default(),
            max_ratio: 1.0,
            min_confidence: None,
        }
    }
}

impl MeasureParams {
    /// Fixed 0.70 depth factor, no age correction.
    pub fn simple() -> Self {
        Self {
            depth_model: DepthModel::Fixed {
                factor: DepthModel::SIMPLE_FACTOR,
            },
            ..Default::default()
        }
    }

    /// Use a fixed depth factor.
    pub fn with_depth_factor(mut self, factor: f64) -> Self {
        self.depth_model = DepthModel::Fixed { factor };
        self
    }

    /// Reject estimates below `minimum` confidence.
    pub fn with_min_confidence(mut self, minimum: f64) -> Self {
        self.min_confidence = Some(minimum);
        self
    }

    /// Check parameter consistency.
    pub fn validate(&self) -> MeasureResult<()> {
        for factor in self.depth_model.factors() {
            if !factor.is_finite() || factor <= 0.0 {
                return Err(MeasureError::invalid_params(format!(
                    "depth factor must be positive, got {}",
                    factor
                )));
            }
        }
        if let DepthModel::AgeStepped {
            threshold_years, ..
        } = self.depth_model
        {
            if !threshold_years.is_finite() || threshold_years < 0.0 {
                return Err(MeasureError::invalid_params(format!(
                    "age threshold must be a non-negative number of years, got {}",
                    threshold_years
                )));
            }
        }
        if !self.max_ratio.is_finite() || self.max_ratio <= 0.0 {
            return Err(MeasureError::invalid_params(format!(
                "max_ratio must be positive, got {}",
                self.max_ratio
            )));
        }
        if let Some(min) = self.min_confidence {
            if !(0.0..=1.0).contains(&min) {
                return Err(MeasureError::invalid_params(format!(
                    "min_confidence must lie in [0, 1], got {}",
                    min
                )));
            }
        }
        Ok(())
    }
}
