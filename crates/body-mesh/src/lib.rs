//! Parametric body silhouettes.
//!
//! Builds a closed surface-of-revolution body mesh from a
//! [`MeasurementRecord`](body_measure::MeasurementRecord), together with
//! elliptical indicator curves at the waist, hip, chest and shoulder heights,
//! and exports the solid as OBJ.
//!
//! # Features
//!
//! - **Profile**: nine anatomical landmarks, strictly local linear
//!   interpolation, NaN-safe round head
//! - **Lathe**: welded seam, capped ends, outward-facing CCW faces
//! - **Indicators**: closed ellipses hugging the surface at measurement heights
//! - **Measure**: horizontal cross-sections to cross-check surface and record
//! - **I/O**: `<ProductName>_Scan.obj` export (vertices and faces only) and
//!   re-parsing via `tobj`
//!
//! # Coordinate System
//!
//! Right-handed, Z up, meters. X is body width, Y is body depth (flattened).
//! By default the body is centered vertically on the origin.
//!
//! # Quick Start
//!
//! ```no_run
//! use body_measure::{RawRatioEstimate, UserBiometrics, measure};
//! use body_mesh::{export_file_name, generate_silhouette};
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
//! let silhouette = generate_silhouette(&record).unwrap();
//! for curve in silhouette.indicators() {
//!     println!("{} at z = {:.2} m", curve.kind, curve.center_z);
//! }
//! silhouette.export_obj(export_file_name("Acme")).unwrap();
//! ```
//!
//! # Regeneration
//!
//! A [`Silhouette`] is never updated in place. When a new record arrives,
//! generate a new one and replace the old value wholesale.

mod builder;
mod error;
mod silhouette;
mod types;

pub mod indicator;
pub mod io;
pub mod lathe;
pub mod measure;
pub mod profile;
pub mod tracing_ext;

pub use builder::SilhouetteBuilder;
pub use error::{SilhouetteError, SilhouetteErrorCode, SilhouetteResult};
pub use indicator::{IndicatorCurve, IndicatorKind};
pub use io::{
    DEFAULT_PRODUCT_NAME, export_file_name, load_obj, parse_obj_str, save_obj, to_obj_string,
    write_obj,
};
pub use measure::{SilhouetteMeasurements, circumference_at_height};
pub use profile::{BodyProfile, Landmark, LandmarkKind, head_radius};
pub use silhouette::{
    MIN_RADIAL_SEGMENTS, Silhouette, SilhouetteParams, generate_silhouette,
    generate_silhouette_with_params,
};
pub use types::{Mesh, Triangle, Vertex};
