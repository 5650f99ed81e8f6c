//! Horizontal cross-sections of a generated silhouette.
//!
//! Used to check that the surface, the indicator curves and the measurement
//! record agree: at every indicator height the mesh circumference should sit
//! just inside the curve and close to the record's ellipse.

use body_measure::ellipse::ramanujan_perimeter;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::indicator::IndicatorKind;
use crate::silhouette::Silhouette;
use crate::types::Mesh;

/// Slice of a mesh by a plane.
#[derive(Debug, Clone)]
pub struct CrossSection {
    /// Intersection segments, unordered.
    pub segments: Vec<(Point3<f64>, Point3<f64>)>,
    /// Total length of all segments.
    pub perimeter: f64,
    /// Closed loops the segments chain into.
    pub contour_count: usize,
    pub plane_origin: Point3<f64>,
    pub plane_normal: Vector3<f64>,
}

/// Slice `mesh` by the plane through `plane_point` with normal `plane_normal`.
///
/// A vertex lying exactly on the plane counts as above it, so each triangle
/// yields at most one segment and no edge is counted twice. Zero-length
/// segments are dropped.
pub fn cross_section(
    mesh: &Mesh,
    plane_point: Point3<f64>,
    plane_normal: Vector3<f64>,
) -> CrossSection {
    let normal = plane_normal.normalize();
    let mut segments = Vec::new();

    for tri in mesh.triangles() {
        let crossings: Vec<Point3<f64>> = tri
            .edges()
            .into_iter()
            .filter_map(|(a, b)| plane_edge_intersection(plane_point, normal, a, b))
            .collect();
        if let [p, q] = crossings[..] {
            if p != q {
                segments.push((p, q));
            }
        }
    }

    let perimeter = segments.iter().map(|(a, b)| (b - a).norm()).sum();
    let contour_count = count_contours(&segments);

    CrossSection {
        segments,
        perimeter,
        contour_count,
        plane_origin: plane_point,
        plane_normal: normal,
    }
}

/// Perimeter of the horizontal slice at height `z`.
pub fn circumference_at_height(mesh: &Mesh, z: f64) -> f64 {
    cross_section(mesh, Point3::new(0.0, 0.0, z), Vector3::z()).perimeter
}

fn plane_edge_intersection(
    plane_point: Point3<f64>,
    plane_normal: Vector3<f64>,
    a: Point3<f64>,
    b: Point3<f64>,
) -> Option<Point3<f64>> {
    let d_a = (a - plane_point).dot(&plane_normal);
    let d_b = (b - plane_point).dot(&plane_normal);

    if (d_a >= 0.0) == (d_b >= 0.0) {
        return None;
    }

    let t = d_a / (d_a - d_b);
    Some(a + (b - a) * t)
}

fn count_contours(segments: &[(Point3<f64>, Point3<f64>)]) -> usize {
    const EPS: f64 = 1e-9;
    let mut remaining: Vec<_> = segments.to_vec();
    let mut contours = 0;

    while let Some((start, mut end)) = remaining.pop() {
        contours += 1;
        while (end - start).norm() > EPS {
            let next = remaining
                .iter()
                .position(|&(a, b)| (a - end).norm() < EPS || (b - end).norm() < EPS);
            let Some(i) = next else { break };
            let (a, b) = remaining.swap_remove(i);
            end = if (a - end).norm() < EPS { b } else { a };
        }
    }

    contours
}

/// Circumference comparison at one indicator height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorMeasurement {
    pub kind: IndicatorKind,
    /// Height of the slice in mesh coordinates.
    pub z: f64,
    /// Perimeter of the mesh slice, meters.
    pub mesh_circumference_m: f64,
    /// Analytic perimeter of the indicator ellipse, meters.
    pub indicator_circumference_m: f64,
    /// Ellipse perimeter of the record width with the mesh's flattening,
    /// meters.
    pub expected_circumference_m: f64,
}

impl IndicatorMeasurement {
    /// `mesh / expected - 1`.
    pub fn relative_error(&self) -> f64 {
        self.mesh_circumference_m / self.expected_circumference_m - 1.0
    }
}

/// Mesh circumferences at each indicator height of a silhouette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SilhouetteMeasurements {
    pub entries: Vec<IndicatorMeasurement>,
}

impl SilhouetteMeasurements {
    pub fn of(silhouette: &Silhouette) -> Self {
        let mesh = silhouette.mesh();
        let entries = silhouette
            .indicators()
            .iter()
            .map(|curve| {
                // The curve's minor/major ratio is the mesh's flattening factor.
                let flatten = curve.minor_radius / curve.major_radius;
                let half_width = silhouette
                    .profile()
                    .landmark(curve.kind.landmark())
                    .radius;
                IndicatorMeasurement {
                    kind: curve.kind,
                    z: curve.center_z,
                    mesh_circumference_m: circumference_at_height(mesh, curve.center_z),
                    indicator_circumference_m: curve.perimeter(),
                    expected_circumference_m: ramanujan_perimeter(
                        half_width,
                        half_width * flatten,
                    ),
                }
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, kind: IndicatorKind) -> Option<&IndicatorMeasurement> {
        self.entries.iter().find(|e| e.kind == kind)
    }

    /// Largest absolute relative error across all indicators.
    pub fn max_relative_error(&self) -> f64 {
        self.entries
            .iter()
            .map(|e| e.relative_error().abs())
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lathe::lathe;
    use std::f64::consts::PI;

    #[test]
    fn test_cylinder_circumference() {
        let mesh = lathe(&[(1.0, 0.0), (1.0, 2.0)], 256).unwrap();
        let c = circumference_at_height(&mesh, 1.0);
        assert!((c - 2.0 * PI).abs() < 1e-3);

        let section = cross_section(&mesh, Point3::new(0.0, 0.0, 1.0), Vector3::z());
        assert_eq!(section.contour_count, 1);
        assert_eq!(section.segments.len(), 512);
    }

    #[test]
    fn test_slice_through_ring_is_not_double_counted() {
        let mesh = lathe(&[(1.0, 0.0), (1.0, 1.0), (1.0, 2.0)], 64).unwrap();
        let at_ring = circumference_at_height(&mesh, 1.0);
        let between = circumference_at_height(&mesh, 0.5);
        assert!((at_ring - between).abs() < 1e-9);
    }

    #[test]
    fn test_slice_outside_mesh_is_empty() {
        let mesh = lathe(&[(1.0, 0.0), (1.0, 2.0)], 32).unwrap();
        let section = cross_section(&mesh, Point3::new(0.0, 0.0, 5.0), Vector3::z());
        assert_eq!(section.perimeter, 0.0);
        assert_eq!(section.contour_count, 0);
    }
}
