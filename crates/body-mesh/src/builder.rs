//! Fluent configuration for silhouette generation.
//!
//! ```
//! use body_measure::{RawRatioEstimate, UserBiometrics, measure};
//! use body_mesh::SilhouetteBuilder;
//!
//! let raw = RawRatioEstimate {
//!     waist_ratio: 0.16,
//!     hip_ratio: 0.19,
//!     shoulder_ratio: 0.24,
//!     chest_ratio: 0.18,
//!     torso_height_ratio: 0.3,
//!     confidence: 0.9,
//! };
//! let record = measure(&raw, &UserBiometrics::new(172.0, 68.0)).unwrap();
//!
//! let silhouette = SilhouetteBuilder::new(&record)
//!     .radial_segments(64)
//!     .flatten(0.72)
//!     .without_shoulder_indicator()
//!     .build()
//!     .unwrap();
//! assert_eq!(silhouette.indicators().len(), 3);
//! ```

use body_measure::MeasurementRecord;

use crate::error::SilhouetteResult;
use crate::silhouette::{Silhouette, SilhouetteParams, generate_silhouette_with_params};

/// Chainable configuration of [`SilhouetteParams`] for one record.
#[derive(Debug, Clone)]
pub struct SilhouetteBuilder<'a> {
    record: &'a MeasurementRecord,
    params: SilhouetteParams,
}

impl<'a> SilhouetteBuilder<'a> {
    /// Start from [`SilhouetteParams::default`].
    pub fn new(record: &'a MeasurementRecord) -> Self {
        Self {
            record,
            params: SilhouetteParams::default(),
        }
    }

    /// Profile samples along the body axis (at least 20).
    pub fn profile_samples(mut self, samples: usize) -> Self {
        self.params.profile_samples = samples;
        self
    }

    /// Vertices per ring (at least 32).
    pub fn radial_segments(mut self, segments: usize) -> Self {
        self.params.radial_segments = segments;
        self
    }

    /// Depth-to-width flattening of the body and the indicator curves.
    pub fn flatten(mut self, factor: f64) -> Self {
        self.params.flatten_factor = factor;
        self
    }

    /// Gap between the body and the indicator curves, meters.
    pub fn indicator_margin(mut self, margin: f64) -> Self {
        self.params.indicator_margin = margin;
        self
    }

    pub fn indicator_points(mut self, points: usize) -> Self {
        self.params.indicator_points = points;
        self
    }

    pub fn without_shoulder_indicator(mut self) -> Self {
        self.params.include_shoulder_indicator = false;
        self
    }

    /// Keep the feet at `z = 0` instead of centering the body on the origin.
    pub fn grounded(mut self) -> Self {
        self.params.center_vertically = false;
        self
    }

    /// Switch to [`SilhouetteParams::preview`] densities.
    pub fn preview(mut self) -> Self {
        let preview = SilhouetteParams::preview();
        self.params.profile_samples = preview.profile_samples;
        self.params.radial_segments = preview.radial_segments;
        self.params.indicator_points = preview.indicator_points;
        self
    }

    /// Switch to [`SilhouetteParams::high_detail`] densities.
    pub fn high_detail(mut self) -> Self {
        let detail = SilhouetteParams::high_detail();
        self.params.profile_samples = detail.profile_samples;
        self.params.radial_segments = detail.radial_segments;
        self.params.indicator_points = detail.indicator_points;
        self
    }

    pub fn params(&self) -> &SilhouetteParams {
        &self.params
    }

    /// Validate the parameters and generate.
    pub fn build(self) -> SilhouetteResult<Silhouette> {
        generate_silhouette_with_params(self.record, &self.params)
    }
}
