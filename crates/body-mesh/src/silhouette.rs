//! Silhouette generation: measurement record to body mesh plus indicator curves.
//!
//! Pipeline: profile → lathe → flatten Y → vertex normals → vertical
//! centering → finite check → indicator curves. Every call builds a fresh
//! [`Silhouette`]; nothing is reused from a previous record.

use std::path::Path;

use body_measure::MeasurementRecord;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{SilhouetteError, SilhouetteResult};
use crate::indicator::{IndicatorCurve, IndicatorKind};
use crate::io::save_obj;
use crate::lathe::lathe;
use crate::measure::SilhouetteMeasurements;
use crate::profile::{BodyProfile, MIN_PROFILE_SAMPLES};
use crate::tracing_ext::{OperationTimer, log_indicators, log_mesh_stats};
use crate::types::Mesh;

/// Fewest radial segments accepted by the generator.
pub const MIN_RADIAL_SEGMENTS: usize = 32;

/// Parameters for [`generate_silhouette_with_params`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SilhouetteParams {
    /// Profile samples along the body axis (default: 48, minimum 20).
    pub profile_samples: usize,

    /// Vertices per ring (default: 48, minimum 32).
    pub radial_segments: usize,

    /// Y scale applied to the whole mesh (default: 0.70). Also the minor to
    /// major ratio of the indicator curves.
    pub flatten_factor: f64,

    /// Added to half the width for indicator major radii, in meters
    /// (default: 0.01).
    pub indicator_margin: f64,

    /// Points per indicator curve (default: 64).
    pub indicator_points: usize,

    /// Draw a shoulder curve in addition to hip, waist and chest (default: true).
    pub include_shoulder_indicator: bool,

    /// Translate everything down by half the height so the body is centered
    /// on the origin (default: true).
    pub center_vertically: bool,
}

impl Default for SilhouetteParams {
    fn default() -> Self {
        Self {
            profile_samples: 48,
            radial_segments: 48,
            flatten_factor: 0.70,
            indicator_margin: 0.01,
            indicator_points: 64,
            include_shoulder_indicator: true,
            center_vertically: true,
        }
    }
}

impl SilhouetteParams {
    /// Lowest densities the generator accepts, for quick previews.
    pub fn preview() -> Self {
        Self {
            profile_samples: MIN_PROFILE_SAMPLES,
            radial_segments: MIN_RADIAL_SEGMENTS,
            indicator_points: 32,
            ..Default::default()
        }
    }

    /// Dense sampling for export.
    pub fn high_detail() -> Self {
        Self {
            profile_samples: 160,
            radial_segments: 128,
            indicator_points: 128,
            ..Default::default()
        }
    }

    /// Check parameter consistency.
    pub fn validate(&self) -> SilhouetteResult<()> {
        if self.profile_samples < MIN_PROFILE_SAMPLES {
            return Err(SilhouetteError::invalid_param(
                "profile_samples",
                format!(
                    "must be at least {}, got {}",
                    MIN_PROFILE_SAMPLES, self.profile_samples
                ),
            ));
        }
        if self.radial_segments < MIN_RADIAL_SEGMENTS {
            return Err(SilhouetteError::invalid_param(
                "radial_segments",
                format!(
                    "must be at least {}, got {}",
                    MIN_RADIAL_SEGMENTS, self.radial_segments
                ),
            ));
        }
        if !(self.flatten_factor > 0.0 && self.flatten_factor <= 1.0) {
            return Err(SilhouetteError::invalid_param(
                "flatten_factor",
                format!("must lie in (0, 1], got {}", self.flatten_factor),
            ));
        }
        if !self.indicator_margin.is_finite() || self.indicator_margin < 0.0 {
            return Err(SilhouetteError::invalid_param(
                "indicator_margin",
                format!("must be non-negative, got {}", self.indicator_margin),
            ));
        }
        if self.indicator_points < 3 {
            return Err(SilhouetteError::invalid_param(
                "indicator_points",
                format!("must be at least 3, got {}", self.indicator_points),
            ));
        }
        Ok(())
    }

    /// Indicator kinds drawn with these parameters, bottom to top.
    pub fn indicator_kinds(&self) -> Vec<IndicatorKind> {
        let mut kinds = IndicatorKind::REQUIRED.to_vec();
        if self.include_shoulder_indicator {
            kinds.push(IndicatorKind::Shoulder);
        }
        kinds
    }
}

/// Generated body geometry for one measurement record.
///
/// Immutable: a new record means a new `Silhouette`.
#[derive(Debug, Clone, PartialEq)]
pub struct Silhouette {
    mesh: Mesh,
    indicators: Vec<IndicatorCurve>,
    profile: BodyProfile,
    scale: f64,
    z_offset: f64,
}

impl Silhouette {
    /// The solid body surface.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Indicator curves, bottom to top.
    pub fn indicators(&self) -> &[IndicatorCurve] {
        &self.indicators
    }

    pub fn indicator(&self, kind: IndicatorKind) -> Option<&IndicatorCurve> {
        self.indicators.iter().find(|c| c.kind == kind)
    }

    /// Profile before lathing, with heights measured from the ground.
    pub fn profile(&self) -> &BodyProfile {
        &self.profile
    }

    /// Scale factor: body height in meters.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Vertical translation applied to the mesh and curves (`-scale / 2`
    /// when centered, otherwise `0`).
    pub fn z_offset(&self) -> f64 {
        self.z_offset
    }

    /// Circumferences of the surface at each indicator height.
    pub fn measurements(&self) -> SilhouetteMeasurements {
        SilhouetteMeasurements::of(self)
    }

    /// Write the solid (no indicator curves) as OBJ.
    pub fn export_obj<P: AsRef<Path>>(&self, path: P) -> SilhouetteResult<()> {
        save_obj(&self.mesh, path)
    }
}

/// Generate a silhouette with default parameters.
pub fn generate_silhouette(record: &MeasurementRecord) -> SilhouetteResult<Silhouette> {
    generate_silhouette_with_params(record, &SilhouetteParams::default())
}

/// Generate a silhouette.
///
/// # Errors
///
/// - [`SilhouetteError::InvalidParams`] if `params` fail validation
/// - [`SilhouetteError::InvalidRecord`] if a width or the height is not a
///   positive finite number
/// - [`SilhouetteError::NonFiniteGeometry`] if any coordinate is NaN or
///   infinite after construction
pub fn generate_silhouette_with_params(
    record: &MeasurementRecord,
    params: &SilhouetteParams,
) -> SilhouetteResult<Silhouette> {
    params.validate()?;
    let timer = OperationTimer::with_density(
        "generate_silhouette",
        params.profile_samples,
        params.radial_segments,
    );
    timer.in_scope(|| build_silhouette(record, params))
}

fn build_silhouette(
    record: &MeasurementRecord,
    params: &SilhouetteParams,
) -> SilhouetteResult<Silhouette> {
    let profile = BodyProfile::from_record(record, params.profile_samples)?;
    let scale = profile.scale();

    let mut mesh = OperationTimer::new("lathe")
        .in_scope(|| lathe(&profile.radius_height_pairs(), params.radial_segments))?;
    log_mesh_stats(&mesh, "after lathe");

    mesh.scale_axes(Vector3::new(1.0, params.flatten_factor, 1.0));
    mesh.compute_vertex_normals();

    let z_offset = if params.center_vertically {
        -scale / 2.0
    } else {
        0.0
    };
    mesh.translate(Vector3::new(0.0, 0.0, z_offset));
    mesh.validate_finite()?;
    log_mesh_stats(&mesh, "silhouette");

    let indicators: Vec<IndicatorCurve> = params
        .indicator_kinds()
        .into_iter()
        .map(|kind| {
            let center_z = profile.landmark(kind.landmark()).t * scale + z_offset;
            IndicatorCurve::for_record(
                kind,
                record,
                center_z,
                params.indicator_margin,
                params.flatten_factor,
                params.indicator_points,
            )
        })
        .collect();
    log_indicators(&indicators);

    info!(
        target: "body_mesh::silhouette",
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        indicators = indicators.len(),
        height_m = scale,
        "Generated silhouette"
    );

    Ok(Silhouette {
        mesh,
        indicators,
        profile,
        scale,
        z_offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SilhouetteErrorCode;
    use body_measure::{RawRatioEstimate, UserBiometrics, measure};

    fn record() -> MeasurementRecord {
        let raw = RawRatioEstimate {
            waist_ratio: 0.16,
            hip_ratio: 0.2,
            shoulder_ratio: 0.25,
            chest_ratio: 0.18,
            torso_height_ratio: 0.3,
            confidence: 0.9,
        };
        measure(&raw, &UserBiometrics::new(180.0, 78.0)).unwrap()
    }

    #[test]
    fn test_default_params_valid() {
        assert!(SilhouetteParams::default().validate().is_ok());
        assert!(SilhouetteParams::preview().validate().is_ok());
        assert!(SilhouetteParams::high_detail().validate().is_ok());
    }

    #[test]
    fn test_invalid_params_rejected() {
        let cases = [
            SilhouetteParams {
                profile_samples: 19,
                ..Default::default()
            },
            SilhouetteParams {
                radial_segments: 31,
                ..Default::default()
            },
            SilhouetteParams {
                flatten_factor: 0.0,
                ..Default::default()
            },
            SilhouetteParams {
                flatten_factor: f64::NAN,
                ..Default::default()
            },
            SilhouetteParams {
                indicator_margin: -0.01,
                ..Default::default()
            },
        ];
        for params in cases {
            let err = generate_silhouette_with_params(&record(), &params).unwrap_err();
            assert_eq!(err.code(), SilhouetteErrorCode::InvalidParams);
        }
    }

    #[test]
    fn test_mesh_counts() {
        let params = SilhouetteParams::default();
        let silhouette = generate_silhouette(&record()).unwrap();
        let mesh = silhouette.mesh();
        assert_eq!(
            mesh.vertex_count(),
            params.profile_samples * params.radial_segments + 2
        );
        assert_eq!(
            mesh.face_count(),
            2 * params.radial_segments * (params.profile_samples - 1) + 2 * params.radial_segments
        );
        assert!(mesh.vertices.iter().all(|v| v.normal.is_some()));
    }

    #[test]
    fn test_centered_vertically() {
        let silhouette = generate_silhouette(&record()).unwrap();
        let (min, max) = silhouette.mesh().bounds().unwrap();
        assert!((min.z + 0.9).abs() < 1e-12);
        assert!((max.z - 0.9).abs() < 1e-12);
        assert_eq!(silhouette.z_offset(), -0.9);

        let params = SilhouetteParams {
            center_vertically: false,
            ..Default::default()
        };
        let grounded = generate_silhouette_with_params(&record(), &params).unwrap();
        let (min, max) = grounded.mesh().bounds().unwrap();
        assert_eq!(min.z, 0.0);
        assert_eq!(max.z, 1.8);
    }

    #[test]
    fn test_flattened_depth() {
        let silhouette = generate_silhouette(&record()).unwrap();
        let (min, max) = silhouette.mesh().bounds().unwrap();
        let width = max.x - min.x;
        let depth = max.y - min.y;
        // The widest ring is flattened by 0.70; ring sampling only shrinks Y further.
        assert!(depth <= width * 0.70 + 1e-12);
        assert!(depth > width * 0.65);
    }

    #[test]
    fn test_indicator_selection() {
        let silhouette = generate_silhouette(&record()).unwrap();
        assert_eq!(silhouette.indicators().len(), 4);
        assert!(silhouette.indicator(IndicatorKind::Shoulder).is_some());

        let params = SilhouetteParams {
            include_shoulder_indicator: false,
            ..Default::default()
        };
        let silhouette = generate_silhouette_with_params(&record(), &params).unwrap();
        let kinds: Vec<_> = silhouette.indicators().iter().map(|c| c.kind).collect();
        assert_eq!(kinds, IndicatorKind::REQUIRED.to_vec());
    }

    #[test]
    fn test_indicator_heights_follow_landmarks() {
        let silhouette = generate_silhouette(&record()).unwrap();
        let waist = silhouette.indicator(IndicatorKind::Waist).unwrap();
        let expected = 0.61 * 1.8 - 0.9;
        assert!((waist.center_z - expected).abs() < 1e-12);

        let heights: Vec<f64> = silhouette.indicators().iter().map(|c| c.center_z).collect();
        for pair in heights.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }
}
