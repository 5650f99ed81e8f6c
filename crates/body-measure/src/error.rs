//! Error types for measurement operations with rich diagnostics.
//!
//! Every failure is fatal to the current analysis attempt: no partial
//! [`MeasurementRecord`](crate::MeasurementRecord) is ever produced.
//!
//! # Error Codes
//!
//! Each error has a unique code in the format `BODY-XXXX`:
//! - `BODY-1xxx`: Input validation errors (biometrics, ratios, parameters)
//! - `BODY-2xxx`: Arithmetic errors (division by zero in index computation)
//! - `BODY-3xxx`: Oracle errors (transport, unparseable response, confidence)
//!
//! # Example
//!
//! ```
//! use body_measure::{ErrorCode, MeasureError};
//!
//! let err = MeasureError::invalid_ratio("waistRatio", -0.2);
//! assert_eq!(err.code(), ErrorCode::InvalidRatio);
//! assert_eq!(err.code().as_str(), "BODY-1002");
//! assert!(err.is_input_error());
//! ```

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for measurement operations.
pub type MeasureResult<T> = Result<T, MeasureError>;

/// The single message shown to users when the oracle's answer cannot be used.
pub const UNREADABLE_RESPONSE_MESSAGE: &str = "could not analyze body proportions";

/// Machine-readable error codes for measurement operations.
///
/// Codes follow the pattern `BODY-XXXX` where:
/// - 1xxx = Input validation errors
/// - 2xxx = Arithmetic errors
/// - 3xxx = Oracle errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Input validation errors (1xxx)
    /// BODY-1001: Height, weight or age is out of range
    InvalidBiometric = 1001,
    /// BODY-1002: Ratio or confidence is negative, non-finite or absurd
    InvalidRatio = 1002,
    /// BODY-1003: Measurement parameters are inconsistent
    InvalidParams = 1003,

    // Arithmetic errors (2xxx)
    /// BODY-2001: Index computation would divide by zero
    DivisionByZero = 2001,

    // Oracle errors (3xxx)
    /// BODY-3001: Oracle response is not JSON or does not match the schema
    OracleResponse = 3001,
    /// BODY-3002: Oracle could not be reached or reported a failure
    OracleUnavailable = 3002,
    /// BODY-3003: Oracle confidence is below the configured minimum
    LowConfidence = 3003,
}

impl ErrorCode {
    /// Returns the error code as a string in the format `BODY-XXXX`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidBiometric => "BODY-1001",
            ErrorCode::InvalidRatio => "BODY-1002",
            ErrorCode::InvalidParams => "BODY-1003",
            ErrorCode::DivisionByZero => "BODY-2001",
            ErrorCode::OracleResponse => "BODY-3001",
            ErrorCode::OracleUnavailable => "BODY-3002",
            ErrorCode::LowConfidence => "BODY-3003",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors that can occur while turning ratio estimates into measurements.
#[derive(Debug, Error, Diagnostic)]
pub enum MeasureError {
    /// User-provided height, weight or age is unusable.
    #[error("invalid {field}: {value}")]
    #[diagnostic(
        code(body::input::biometric),
        help("Height must be positive and at most 300 cm, weight positive; age, when given, must not be negative.")
    )]
    InvalidBiometric { field: &'static str, value: f64 },

    /// A ratio (or the confidence) reported by the oracle is unusable.
    #[error("invalid {field}: {value} is outside [0, {max}]")]
    #[diagnostic(
        code(body::input::ratio),
        help("Ratios are fractions of total body height and must lie in the documented range.")
    )]
    InvalidRatio {
        field: &'static str,
        value: f64,
        max: f64,
    },

    /// Measurement parameters are inconsistent.
    #[error("invalid measurement parameters: {details}")]
    #[diagnostic(code(body::input::params))]
    InvalidParams { details: String },

    /// An index denominator evaluated to zero.
    #[error("cannot compute {index}: {denominator} is zero")]
    #[diagnostic(
        code(body::arithmetic::division_by_zero),
        help("The oracle reported a width too small to produce a usable circumference.")
    )]
    DivisionByZero {
        index: &'static str,
        denominator: &'static str,
    },

    /// Oracle answered, but not with the expected JSON.
    ///
    /// Display is the user-facing message; `details` holds the parser's
    /// explanation for logs.
    #[error("{}", UNREADABLE_RESPONSE_MESSAGE)]
    #[diagnostic(
        code(body::oracle::response),
        help("Retake the photo with the whole body visible, front-facing, and try again.")
    )]
    OracleResponse { details: String },

    /// Oracle could not be reached or reported a failure of its own.
    #[error("body analysis service unavailable: {details}")]
    #[diagnostic(code(body::oracle::unavailable))]
    OracleUnavailable { details: String },

    /// Oracle confidence is below the caller's threshold.
    #[error("analysis confidence {confidence:.2} is below the required {minimum:.2}")]
    #[diagnostic(
        code(body::oracle::low_confidence),
        help("Retake the photo in better lighting with the whole body in frame.")
    )]
    LowConfidence { confidence: f64, minimum: f64 },
}

impl MeasureError {
    /// Returns the machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            MeasureError::InvalidBiometric { .. } => ErrorCode::InvalidBiometric,
            MeasureError::InvalidRatio { .. } => ErrorCode::InvalidRatio,
            MeasureError::InvalidParams { .. } => ErrorCode::InvalidParams,
            MeasureError::DivisionByZero { .. } => ErrorCode::DivisionByZero,
            MeasureError::OracleResponse { .. } => ErrorCode::OracleResponse,
            MeasureError::OracleUnavailable { .. } => ErrorCode::OracleUnavailable,
            MeasureError::LowConfidence { .. } => ErrorCode::LowConfidence,
        }
    }

    /// True for input validation failures (the `BODY-1xxx` family).
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            MeasureError::InvalidBiometric { .. }
                | MeasureError::InvalidRatio { .. }
                | MeasureError::InvalidParams { .. }
        )
    }

    /// True for failures at the oracle boundary (the `BODY-3xxx` family).
    pub fn is_oracle_error(&self) -> bool {
        matches!(
            self,
            MeasureError::OracleResponse { .. }
                | MeasureError::OracleUnavailable { .. }
                | MeasureError::LowConfidence { .. }
        )
    }

    /// Create an InvalidBiometric error.
    pub fn invalid_biometric(field: &'static str, value: f64) -> Self {
        MeasureError::InvalidBiometric { field, value }
    }

    /// Create an InvalidRatio error against the default `[0, 1]` range.
    pub fn invalid_ratio(field: &'static str, value: f64) -> Self {
        MeasureError::InvalidRatio {
            field,
            value,
            max: 1.0,
        }
    }

    /// Create an InvalidParams error.
    pub fn invalid_params(details: impl Into<String>) -> Self {
        MeasureError::InvalidParams {
            details: details.into(),
        }
    }

    /// Create an OracleResponse error.
    pub fn oracle_response(details: impl Into<String>) -> Self {
        MeasureError::OracleResponse {
            details: details.into(),
        }
    }

    /// Create an OracleUnavailable error.
    pub fn oracle_unavailable(details: impl Into<String>) -> Self {
        MeasureError::OracleUnavailable {
            details: details.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = MeasureError::invalid_biometric("height_cm", 0.0);
        assert_eq!(err.code(), ErrorCode::InvalidBiometric);
        assert_eq!(err.code().as_str(), "BODY-1001");

        let err = MeasureError::DivisionByZero {
            index: "whr",
            denominator: "hip circumference",
        };
        assert_eq!(err.code().to_string(), "BODY-2001");
    }

    #[test]
    fn test_error_families_are_disjoint() {
        let validation = MeasureError::invalid_ratio("hipRatio", 1.7);
        let parse = MeasureError::oracle_response("expected value at line 1 column 1");
        let network = MeasureError::oracle_unavailable("connection reset");

        assert!(validation.is_input_error());
        assert!(!validation.is_oracle_error());
        assert!(parse.is_oracle_error());
        assert!(!parse.is_input_error());
        assert!(network.is_oracle_error());
        assert_ne!(parse.code(), network.code());
    }

    #[test]
    fn test_oracle_response_hides_details() {
        let err = MeasureError::oracle_response("missing field `hipRatio`");
        let display = format!("{}", err);
        assert_eq!(display, UNREADABLE_RESPONSE_MESSAGE);
        assert!(!display.contains("hipRatio"));
    }

    #[test]
    fn test_error_display() {
        let err = MeasureError::invalid_ratio("chestRatio", 1.5);
        let display = format!("{}", err);
        assert!(display.contains("chestRatio"));
        assert!(display.contains("1.5"));
    }
}
