//! Measurement indicator curves: closed ellipses that hug the silhouette at
//! the heights where a measurement was taken.

use std::f64::consts::TAU;

use body_measure::{BodyPart, MeasurementRecord, ellipse::ramanujan_perimeter};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::profile::LandmarkKind;

/// Which measurement a curve marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorKind {
    Waist,
    Hip,
    Chest,
    Shoulder,
}

impl IndicatorKind {
    /// Curves drawn for every silhouette, bottom to top.
    pub const REQUIRED: [IndicatorKind; 3] =
        [IndicatorKind::Hip, IndicatorKind::Waist, IndicatorKind::Chest];

    /// Display color as `0xRRGGBB`.
    pub fn color(&self) -> u32 {
        match self {
            IndicatorKind::Waist => 0xE7_4C_3C,
            IndicatorKind::Hip => 0x34_98_DB,
            IndicatorKind::Chest => 0x2E_CC_71,
            IndicatorKind::Shoulder => 0xF3_9C_12,
        }
    }

    pub fn label(&self) -> &'static str {
        self.body_part().label()
    }

    /// Body part whose width sizes the curve.
    pub fn body_part(&self) -> BodyPart {
        match self {
            IndicatorKind::Waist => BodyPart::Waist,
            IndicatorKind::Hip => BodyPart::Hip,
            IndicatorKind::Chest => BodyPart::Chest,
            IndicatorKind::Shoulder => BodyPart::Shoulder,
        }
    }

    /// Landmark whose height the curve sits at.
    pub fn landmark(&self) -> LandmarkKind {
        match self {
            IndicatorKind::Waist => LandmarkKind::Waist,
            IndicatorKind::Hip => LandmarkKind::Hip,
            IndicatorKind::Chest => LandmarkKind::Chest,
            IndicatorKind::Shoulder => LandmarkKind::Shoulder,
        }
    }
}

impl std::fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A closed horizontal ellipse centered on the body axis.
///
/// `points` holds the polyline without repeating the first point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorCurve {
    pub kind: IndicatorKind,
    pub center_z: f64,
    /// Semi-axis along X (body width).
    pub major_radius: f64,
    /// Semi-axis along Y (body depth).
    pub minor_radius: f64,
    pub points: Vec<Point3<f64>>,
}

impl IndicatorCurve {
    /// Curve for `kind` at height `center_z`.
    ///
    /// `major = width / 2 + margin`, `minor = major * flatten`.
    pub fn for_record(
        kind: IndicatorKind,
        record: &MeasurementRecord,
        center_z: f64,
        margin: f64,
        flatten: f64,
        point_count: usize,
    ) -> Self {
        let major_radius = record.width_m(kind.body_part()) / 2.0 + margin;
        let minor_radius = major_radius * flatten;
        let points = (0..point_count)
            .map(|i| {
                let theta = TAU * i as f64 / point_count as f64;
                Point3::new(
                    major_radius * theta.cos(),
                    minor_radius * theta.sin(),
                    center_z,
                )
            })
            .collect();

        Self {
            kind,
            center_z,
            major_radius,
            minor_radius,
            points,
        }
    }

    /// Color of the curve as `0xRRGGBB`.
    pub fn color(&self) -> u32 {
        self.kind.color()
    }

    /// Length of the closed polyline.
    pub fn polyline_length(&self) -> f64 {
        let n = self.points.len();
        (0..n)
            .map(|i| (self.points[(i + 1) % n] - self.points[i]).norm())
            .sum()
    }

    /// Analytic perimeter of the ellipse.
    pub fn perimeter(&self) -> f64 {
        ramanujan_perimeter(self.major_radius, self.minor_radius)
    }
}
