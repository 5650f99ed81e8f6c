// Allow unused_assignments lint for error struct fields that are used in thiserror Display macros
// but appear as "never read" to the compiler.
#![allow(unused_assignments)]

//! Error types for silhouette generation and export.
//!
//! Codes follow the pattern `SILH-XXXX`:
//! - 1xxx = Input validation errors (parameters, measurement record)
//! - 2xxx = Geometry errors
//! - 3xxx = Export and re-parse errors

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for silhouette operations.
pub type SilhouetteResult<T> = Result<T, SilhouetteError>;

/// Machine-readable error codes for silhouette operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SilhouetteErrorCode {
    /// SILH-1001: Invalid generator parameters
    InvalidParams = 1001,
    /// SILH-1002: Measurement record cannot be turned into a profile
    InvalidRecord = 1002,

    /// SILH-2001: Geometry contains NaN or infinite values
    NonFiniteGeometry = 2001,
    /// SILH-2002: Mesh has no vertices or faces
    EmptyMesh = 2002,

    /// SILH-3001: Failed to write export file
    IoWrite = 3001,
    /// SILH-3002: Failed to read exported file
    IoRead = 3002,
    /// SILH-3003: Exported file could not be parsed
    ParseError = 3003,
}

impl SilhouetteErrorCode {
    /// Returns the error code as a string in the format `SILH-XXXX`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SilhouetteErrorCode::InvalidParams => "SILH-1001",
            SilhouetteErrorCode::InvalidRecord => "SILH-1002",
            SilhouetteErrorCode::NonFiniteGeometry => "SILH-2001",
            SilhouetteErrorCode::EmptyMesh => "SILH-2002",
            SilhouetteErrorCode::IoWrite => "SILH-3001",
            SilhouetteErrorCode::IoRead => "SILH-3002",
            SilhouetteErrorCode::ParseError => "SILH-3003",
        }
    }
}

impl std::fmt::Display for SilhouetteErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors that can occur while generating or exporting a silhouette.
#[derive(Debug, Error, Diagnostic)]
pub enum SilhouetteError {
    /// Invalid generator parameters.
    #[error("invalid silhouette parameters: {details}")]
    #[diagnostic(
        code(silhouette::params::invalid),
        help("Check parameter values: profile_samples >= 20, radial_segments >= 32, 0 < flatten_factor <= 1.")
    )]
    InvalidParams {
        details: String,
        param_name: Option<String>,
    },

    /// The measurement record has a width or height that cannot shape a body.
    #[error("measurement record unusable for geometry: {field} = {value}")]
    #[diagnostic(
        code(silhouette::input::record),
        help("Regenerate the measurement record from a fresh analysis.")
    )]
    InvalidRecord { field: &'static str, value: f64 },

    /// Geometry contains NaN or infinite coordinates.
    #[error("non-finite geometry: {details}")]
    #[diagnostic(code(silhouette::geometry::non_finite))]
    NonFiniteGeometry { details: String },

    /// Mesh is empty.
    #[error("mesh is empty: {details}")]
    #[diagnostic(code(silhouette::geometry::empty))]
    EmptyMesh { details: String },

    /// Failed to write export file.
    #[error("failed to write {path}")]
    #[diagnostic(
        code(silhouette::io::write),
        help("Check that the directory exists and is writable.")
    )]
    IoWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read a previously exported file.
    #[error("failed to read {path}")]
    #[diagnostic(code(silhouette::io::read))]
    IoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Exported file could not be parsed back.
    #[error("failed to parse {path}: {details}")]
    #[diagnostic(code(silhouette::io::parse))]
    ParseError { path: PathBuf, details: String },
}

impl SilhouetteError {
    /// Returns the machine-readable error code.
    pub fn code(&self) -> SilhouetteErrorCode {
        match self {
            SilhouetteError::InvalidParams { .. } => SilhouetteErrorCode::InvalidParams,
            SilhouetteError::InvalidRecord { .. } => SilhouetteErrorCode::InvalidRecord,
            SilhouetteError::NonFiniteGeometry { .. } => SilhouetteErrorCode::NonFiniteGeometry,
            SilhouetteError::EmptyMesh { .. } => SilhouetteErrorCode::EmptyMesh,
            SilhouetteError::IoWrite { .. } => SilhouetteErrorCode::IoWrite,
            SilhouetteError::IoRead { .. } => SilhouetteErrorCode::IoRead,
            SilhouetteError::ParseError { .. } => SilhouetteErrorCode::ParseError,
        }
    }

    // Constructor helpers

    /// Create an invalid params error.
    pub fn invalid_params(details: impl Into<String>) -> Self {
        SilhouetteError::InvalidParams {
            details: details.into(),
            param_name: None,
        }
    }

    /// Create an invalid params error naming the offending parameter.
    pub fn invalid_param(param_name: impl Into<String>, details: impl Into<String>) -> Self {
        SilhouetteError::InvalidParams {
            details: details.into(),
            param_name: Some(param_name.into()),
        }
    }

    /// Create an invalid record error.
    pub fn invalid_record(field: &'static str, value: f64) -> Self {
        SilhouetteError::InvalidRecord { field, value }
    }

    /// Create a non-finite geometry error.
    pub fn non_finite(details: impl Into<String>) -> Self {
        SilhouetteError::NonFiniteGeometry {
            details: details.into(),
        }
    }

    /// Create an empty mesh error.
    pub fn empty_mesh(details: impl Into<String>) -> Self {
        SilhouetteError::EmptyMesh {
            details: details.into(),
        }
    }

    /// Create an I/O write error.
    pub fn io_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SilhouetteError::IoWrite {
            path: path.into(),
            source,
        }
    }

    /// Create an I/O read error.
    pub fn io_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SilhouetteError::IoRead {
            path: path.into(),
            source,
        }
    }

    /// Create a parse error.
    pub fn parse_error(path: impl Into<PathBuf>, details: impl Into<String>) -> Self {
        SilhouetteError::ParseError {
            path: path.into(),
            details: details.into(),
        }
    }
}
