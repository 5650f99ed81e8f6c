//! Anthropometric measurement engine.
//!
//! Turns a sparse set of body-width ratios (estimated from one front-facing
//! photograph by an external service) plus user biometrics into a complete,
//! internally consistent [`MeasurementRecord`]: widths, elliptical
//! circumferences, BMI, waist-to-hip and waist-to-height ratios.
//!
//! # Features
//!
//! - **Engine**: pure, deterministic `(RawRatioEstimate, UserBiometrics) -> MeasurementRecord`
//! - **Ellipse perimeters**: Ramanujan's second approximation with an
//!   age-dependent torso depth factor
//! - **Classification**: BMI category, WHR and WHtR risk bands
//! - **Oracle boundary**: async [`RatioOracle`] trait, strict response
//!   parsing and deterministic test doubles
//!
//! # Units
//!
//! Heights are entered in centimeters and weights in kilograms. Widths in the
//! record are carried in **meters**; circumferences are whole **centimeters**.
//!
//! # Quick Start
//!
//! ```
//! use body_measure::{RawRatioEstimate, UserBiometrics, measure};
//!
//! let raw = RawRatioEstimate {
//!     waist_ratio: 0.16,
//!     hip_ratio: 0.19,
//!     shoulder_ratio: 0.24,
//!     chest_ratio: 0.18,
//!     torso_height_ratio: 0.30,
//!     confidence: 0.9,
//! };
//! let bio = UserBiometrics::new(172.0, 68.0).with_age(41.0);
//!
//! let record = measure(&raw, &bio).unwrap();
//! println!(
//!     "waist {} cm, hip {} cm, BMI {} ({})",
//!     record.waist_circumference_cm(),
//!     record.hip_circumference_cm(),
//!     record.bmi(),
//!     record.classify().bmi,
//! );
//! ```
//!
//! # Analysis With an Oracle
//!
//! ```
//! use body_measure::{MeasureParams, ScanImage, ScriptedOracle, UserBiometrics, analyze};
//!
//! # tokio_test_shim::block_on(async {
//! let oracle = ScriptedOracle::replying(
//!     r#"{"measurements": {"waistRatio": 0.16, "hipRatio": 0.19, "shoulderRatio": 0.24,
//!         "chestRatio": 0.18, "torsoHeightRatio": 0.3}, "confidence": 0.9}"#,
//! );
//! let image = ScanImage::jpeg(std::fs::read("photo.jpg").unwrap_or_default());
//! let bio = UserBiometrics::new(172.0, 68.0);
//!
//! let record = analyze(&oracle, &image, &bio, &MeasureParams::default()).await.unwrap();
//! assert!(record.hip_circumference_cm() > record.waist_circumference_cm());
//! # });
//! # mod tokio_test_shim {
//! #     pub fn block_on<F: std::future::Future>(f: F) -> F::Output {
//! #         tokio::runtime::Runtime::new().unwrap().block_on(f)
//! #     }
//! # }
//! ```
//!
//! # Error Handling
//!
//! Every operation returns [`MeasureResult<T>`]. Input validation failures,
//! arithmetic failures and oracle failures carry distinct [`ErrorCode`]s:
//!
//! ```
//! use body_measure::{MeasureError, RawRatioEstimate, UserBiometrics, measure};
//!
//! let raw = RawRatioEstimate {
//!     waist_ratio: 0.16,
//!     hip_ratio: 1.9,
//!     shoulder_ratio: 0.24,
//!     chest_ratio: 0.18,
//!     torso_height_ratio: 0.30,
//!     confidence: 0.9,
//! };
//! match measure(&raw, &UserBiometrics::new(172.0, 68.0)) {
//!     Err(MeasureError::InvalidRatio { field, .. }) => assert_eq!(field, "hipRatio"),
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```

mod analysis;
mod classify;
mod engine;
mod error;
mod params;
mod types;

pub mod ellipse;
pub mod oracle;

pub use analysis::analyze;
pub use classify::{BmiCategory, HealthClassification, WhrRisk, WhtrRisk};
pub use engine::{MAX_HEIGHT_CM, body_mass_index, measure, measure_with_params, round_to};
pub use error::{ErrorCode, MeasureError, MeasureResult, UNREADABLE_RESPONSE_MESSAGE};
pub use oracle::{
    RatioOracle, ScanImage, ScriptedOracle, StaticOracle, instruction_for, parse_oracle_response,
};
pub use params::{DepthModel, MeasureParams};
pub use types::{BodyPart, MeasurementRecord, RawRatioEstimate, UserBiometrics};
