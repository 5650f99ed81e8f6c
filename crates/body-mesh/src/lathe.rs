//! Surface of revolution about the Z axis.
//!
//! Each profile point becomes a ring of `segments` vertices. The seam is
//! welded (the last column connects back to the first), and fan caps close
//! the bottom and top rings, so the result is watertight with outward-facing
//! faces.

use std::f64::consts::TAU;

use nalgebra::Point3;

use crate::error::{SilhouetteError, SilhouetteResult};
use crate::types::{Mesh, Vertex};

/// Fewest radial segments that still close a ring.
pub const MIN_LATHE_SEGMENTS: usize = 3;

/// Revolve `(radius, height)` points about the Z axis.
///
/// Heights must be non-decreasing and radii finite and non-negative.
///
/// Vertex layout: `points.len() * segments` ring vertices (ring-major), then
/// the bottom cap center, then the top cap center.
pub fn lathe(points: &[(f64, f64)], segments: usize) -> SilhouetteResult<Mesh> {
    if segments < MIN_LATHE_SEGMENTS {
        return Err(SilhouetteError::invalid_param(
            "radial_segments",
            format!(
                "need at least {} segments, got {}",
                MIN_LATHE_SEGMENTS, segments
            ),
        ));
    }
    if points.len() < 2 {
        return Err(SilhouetteError::empty_mesh(format!(
            "profile has {} points, a lathe needs two",
            points.len()
        )));
    }
    for (i, &(r, z)) in points.iter().enumerate() {
        if !r.is_finite() || r < 0.0 || !z.is_finite() {
            return Err(SilhouetteError::non_finite(format!(
                "profile point {} is ({}, {})",
                i, r, z
            )));
        }
    }
    if let Some(i) = points.windows(2).position(|w| w[1].1 < w[0].1) {
        return Err(SilhouetteError::invalid_params(format!(
            "profile heights decrease after point {}",
            i
        )));
    }

    let rings = points.len();
    let vertex_count = rings * segments + 2;
    let face_count = 2 * segments * (rings - 1) + 2 * segments;
    let mut mesh = Mesh::with_capacity(vertex_count, face_count);

    let directions: Vec<(f64, f64)> = (0..segments)
        .map(|j| {
            let theta = TAU * j as f64 / segments as f64;
            (theta.cos(), theta.sin())
        })
        .collect();

    for &(r, z) in points {
        for &(c, s) in &directions {
            mesh.vertices.push(Vertex::new(Point3::new(r * c, r * s, z)));
        }
    }

    let idx = |ring: usize, j: usize| (ring * segments + j % segments) as u32;

    for ring in 0..rings - 1 {
        for j in 0..segments {
            let a = idx(ring, j);
            let b = idx(ring, j + 1);
            let c = idx(ring + 1, j + 1);
            let d = idx(ring + 1, j);
            mesh.faces.push([a, b, c]);
            mesh.faces.push([a, c, d]);
        }
    }

    let bottom = mesh.vertices.len() as u32;
    mesh.vertices.push(Vertex::from_coords(0.0, 0.0, points[0].1));
    let top = mesh.vertices.len() as u32;
    mesh.vertices
        .push(Vertex::from_coords(0.0, 0.0, points[rings - 1].1));

    for j in 0..segments {
        mesh.faces.push([bottom, idx(0, j + 1), idx(0, j)]);
        mesh.faces.push([top, idx(rings - 1, j), idx(rings - 1, j + 1)]);
    }

    Ok(mesh)
}
