//! Core mesh data types.
//!
//! Coordinate system: right-handed, Z is height, X is body width, Y is body
//! depth. Units are meters.

use nalgebra::{Point3, Vector3};
use tracing::debug;

use crate::error::{SilhouetteError, SilhouetteResult};

/// A vertex with an optional computed normal.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    /// 3D position.
    pub position: Point3<f64>,

    /// Unit normal vector, computed from adjacent faces.
    pub normal: Option<Vector3<f64>>,
}

impl Vertex {
    /// Create a new vertex with only position set.
    #[inline]
    pub fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            normal: None,
        }
    }

    /// Create a vertex from raw coordinates.
    #[inline]
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }
}

/// A triangle mesh with indexed vertices and faces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex data.
    pub vertices: Vec<Vertex>,

    /// Triangle faces as indices into the vertex array.
    /// Each face is [v0, v1, v2] with counter-clockwise winding seen from outside.
    pub faces: Vec<[u32; 3]>,
}

impl Mesh {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if mesh is empty (no vertices or faces).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Axis-aligned bounding box as (min, max), or None if empty.
    pub fn bounds(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = self.vertices.first()?.position;
        let (mut min, mut max) = (first, first);
        for vertex in &self.vertices[1..] {
            let p = &vertex.position;
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }
        Some((min, max))
    }

    /// Iterate over triangles with concrete vertex positions.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.faces.iter().map(|&[i0, i1, i2]| Triangle {
            v0: self.vertices[i0 as usize].position,
            v1: self.vertices[i1 as usize].position,
            v2: self.vertices[i2 as usize].position,
        })
    }

    /// Translate mesh by the given vector.
    pub fn translate(&mut self, offset: Vector3<f64>) {
        for vertex in &mut self.vertices {
            vertex.position += offset;
        }
    }

    /// Scale each axis independently around the origin.
    ///
    /// Normals are invalidated when the scale is non-uniform; call
    /// [`compute_vertex_normals`](Self::compute_vertex_normals) afterwards.
    pub fn scale_axes(&mut self, factors: Vector3<f64>) {
        for vertex in &mut self.vertices {
            vertex.position.coords.component_mul_assign(&factors);
            vertex.normal = None;
        }
    }

    /// Signed volume via the divergence theorem.
    ///
    /// Positive for a closed mesh with outward-facing (CCW) faces.
    pub fn signed_volume(&self) -> f64 {
        let mut volume = 0.0;
        for tri in self.triangles() {
            volume += tri.v0.coords.dot(&tri.v1.coords.cross(&tri.v2.coords));
        }
        volume / 6.0
    }

    /// Enclosed volume regardless of orientation.
    #[inline]
    pub fn volume(&self) -> f64 {
        self.signed_volume().abs()
    }

    /// Total surface area.
    pub fn surface_area(&self) -> f64 {
        self.triangles().map(|tri| tri.area()).sum()
    }

    /// Compute area-weighted vertex normals from adjacent faces.
    pub fn compute_vertex_normals(&mut self) {
        let mut accum = vec![Vector3::zeros(); self.vertices.len()];

        for face in &self.faces {
            let tri = Triangle::new(
                self.vertices[face[0] as usize].position,
                self.vertices[face[1] as usize].position,
                self.vertices[face[2] as usize].position,
            );
            // Length is twice the area, which gives the weighting.
            let weighted = tri.normal_unnormalized();
            for &idx in face {
                accum[idx as usize] += weighted;
            }
        }

        for (vertex, n) in self.vertices.iter_mut().zip(accum) {
            let len_sq = n.norm_squared();
            vertex.normal = (len_sq > f64::EPSILON).then(|| n / len_sq.sqrt());
        }

        debug!("Computed vertex normals for {} vertices", self.vertices.len());
    }

    /// Reject meshes with NaN or infinite coordinates, or face indices that
    /// point past the vertex array.
    pub fn validate_finite(&self) -> SilhouetteResult<()> {
        for (idx, vertex) in self.vertices.iter().enumerate() {
            let p = &vertex.position;
            for (axis, value) in [("x", p.x), ("y", p.y), ("z", p.z)] {
                if !value.is_finite() {
                    return Err(SilhouetteError::non_finite(format!(
                        "vertex {} has {} = {}",
                        idx, axis, value
                    )));
                }
            }
        }

        let count = self.vertices.len();
        for (face_idx, face) in self.faces.iter().enumerate() {
            if let Some(&bad) = face.iter().find(|&&i| i as usize >= count) {
                return Err(SilhouetteError::non_finite(format!(
                    "face {} references vertex {} but mesh has {} vertices",
                    face_idx, bad, count
                )));
            }
        }
        Ok(())
    }
}

/// A triangle with concrete vertex positions.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    pub v0: Point3<f64>,
    pub v1: Point3<f64>,
    pub v2: Point3<f64>,
}

impl Triangle {
    #[inline]
    pub fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// Face normal scaled by twice the area (right-hand rule, CCW winding).
    #[inline]
    pub fn normal_unnormalized(&self) -> Vector3<f64> {
        (self.v1 - self.v0).cross(&(self.v2 - self.v0))
    }

    /// Unit face normal, or None for degenerate triangles.
    pub fn normal(&self) -> Option<Vector3<f64>> {
        let n = self.normal_unnormalized();
        let len_sq = n.norm_squared();
        (len_sq > f64::EPSILON).then(|| n / len_sq.sqrt())
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.normal_unnormalized().norm() * 0.5
    }

    /// The three edges as (start, end) pairs.
    pub fn edges(&self) -> [(Point3<f64>, Point3<f64>); 3] {
        [(self.v0, self.v1), (self.v1, self.v2), (self.v2, self.v0)]
    }
}
