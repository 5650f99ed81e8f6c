//! Tracing helpers for silhouette generation.
//!
//! The library never installs a subscriber. Applications opt in:
//!
//! ```rust,ignore
//! use tracing_subscriber::{fmt, prelude::*, EnvFilter};
//!
//! tracing_subscriber::registry()
//!     .with(fmt::layer())
//!     .with(EnvFilter::from_default_env())
//!     .init();
//!
//! // RUST_LOG=body_mesh=debug,body_measure=debug for per-stage output
//! ```
//!
//! Targets:
//! - `body_mesh::timing`: stage durations (INFO on completion)
//! - `body_mesh::mesh_state`: vertex/face counts and extents (DEBUG)

use std::time::Instant;

use tracing::{Span, debug, info};

use crate::indicator::IndicatorCurve;
use crate::types::Mesh;

/// A `silhouette_stage` span that logs its duration when dropped.
///
/// Work only belongs to the stage when it runs through [`in_scope`]:
///
/// ```rust,ignore
/// let timer = OperationTimer::new("lathe");
/// let mesh = timer.in_scope(|| build_rings(points, segments));
/// ```
///
/// [`in_scope`]: OperationTimer::in_scope
pub struct OperationTimer {
    name: &'static str,
    start: Instant,
    span: Span,
}

impl OperationTimer {
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!("silhouette_stage", stage = name);
        span.in_scope(|| debug!(target: "body_mesh::timing", stage = name, "Starting stage"));
        Self {
            name,
            start: Instant::now(),
            span,
        }
    }

    /// Timer carrying the sampling densities of the stage.
    pub fn with_density(name: &'static str, profile_samples: usize, radial_segments: usize) -> Self {
        let span = tracing::info_span!(
            "silhouette_stage",
            stage = name,
            samples = profile_samples,
            segments = radial_segments
        );
        span.in_scope(|| debug!(target: "body_mesh::timing", stage = name, "Starting stage"));
        Self {
            name,
            start: Instant::now(),
            span,
        }
    }

    /// Run `f` inside this stage's span.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        self.span.in_scope(f)
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for OperationTimer {
    fn drop(&mut self) {
        let elapsed_ms = format!("{:.2}", self.elapsed_ms());
        self.span.in_scope(|| {
            info!(
                target: "body_mesh::timing",
                stage = self.name,
                elapsed_ms = elapsed_ms.as_str(),
                "Stage completed"
            )
        });
    }
}

/// Log mesh counts and extents at debug level.
pub fn log_mesh_stats(mesh: &Mesh, context: &str) {
    let (min, max) = mesh.bounds().unwrap_or_default();
    let dims = max - min;

    debug!(
        target: "body_mesh::mesh_state",
        context = context,
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        dimensions = format!("{:.3} x {:.3} x {:.3} m", dims.x, dims.y, dims.z),
        z_range = format!("[{:.3}, {:.3}]", min.z, max.z),
        "Mesh state"
    );
}

/// Log each indicator curve at debug level.
pub fn log_indicators(indicators: &[IndicatorCurve]) {
    for curve in indicators {
        debug!(
            target: "body_mesh::mesh_state",
            kind = %curve.kind,
            center_z = format!("{:.3}", curve.center_z),
            major = format!("{:.3}", curve.major_radius),
            minor = format!("{:.3}", curve.minor_radius),
            "Indicator curve"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vertex;

    #[test]
    fn test_timer_measures_elapsed() {
        let timer = OperationTimer::with_density("test", 20, 32);
        let value = timer.in_scope(|| {
            std::thread::sleep(std::time::Duration::from_millis(2));
            7
        });
        assert_eq!(value, 7);
        assert!(timer.elapsed_ms() >= 1.0);
    }

    #[test]
    fn test_log_empty_mesh_does_not_panic() {
        log_mesh_stats(&Mesh::new(), "empty");

        let mut mesh = Mesh::new();
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 1.0));
        mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.5));
        mesh.faces.push([0, 1, 2]);
        log_mesh_stats(&mesh, "triangle");
    }
}
