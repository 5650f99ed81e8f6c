//! Boundary to the external image-understanding service.
//!
//! The service looks at one photograph and answers with body-width ratios.
//! It is untrusted: it is instructed, not guaranteed, to return only JSON in
//! the documented shape, so every answer goes through
//! [`parse_oracle_response`] before the engine sees it. Business logic only
//! talks to the [`RatioOracle`] trait, which lets tests substitute the
//! deterministic doubles defined here.
//!
//! Wire shape:
//!
//! ```json
//! {
//!   "measurements": {
//!     "waistRatio": 0.16, "hipRatio": 0.19, "shoulderRatio": 0.24,
//!     "chestRatio": 0.18, "torsoHeightRatio": 0.3
//!   },
//!   "confidence": 0.9
//! }
//! ```

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{MeasureError, MeasureResult};
use crate::types::{RawRatioEstimate, UserBiometrics};

/// An encoded photograph (JPEG, PNG, …) handed to the oracle untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ScanImage {
    pub fn new(bytes: impl Into<Vec<u8>>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            mime_type: mime_type.into(),
        }
    }

    /// A JPEG-encoded image.
    pub fn jpeg(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(bytes, "image/jpeg")
    }
}

/// Produces ratio estimates from a photograph.
///
/// Implementations make exactly one request per call and do not retry;
/// callers that want retry or cancellation wrap the call themselves.
/// Transport failures should be reported as
/// [`MeasureError::OracleUnavailable`], unusable answers as
/// [`MeasureError::OracleResponse`] (see [`parse_oracle_response`]).
#[async_trait]
pub trait RatioOracle: Send + Sync {
    /// Oracle name, used in logs.
    fn name(&self) -> &str;

    /// Estimate body-width ratios for the person in `image`.
    async fn estimate_ratios(
        &self,
        image: &ScanImage,
        biometrics: &UserBiometrics,
    ) -> MeasureResult<RawRatioEstimate>;
}

/// Instruction text sent alongside the image.
pub fn instruction_for(biometrics: &UserBiometrics) -> String {
    let mut text = format!(
        "Analyze this front-facing full-body photo of a person who is {:.0} cm tall",
        biometrics.height_cm
    );
    if let Some(age) = biometrics.age_years {
        text.push_str(&format!(" and {:.0} years old", age));
    }
    text.push_str(
        ". Estimate the width of the waist, hips, shoulders and chest, and the torso height, \
         each as a fraction of the person's total height in the image. \
         Respond with JSON only, exactly in this shape: \
         {\"measurements\": {\"waistRatio\": number, \"hipRatio\": number, \
         \"shoulderRatio\": number, \"chestRatio\": number, \"torsoHeightRatio\": number}, \
         \"confidence\": number between 0 and 1}",
    );
    text
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireMeasurements {
    waist_ratio: f64,
    hip_ratio: f64,
    shoulder_ratio: f64,
    chest_ratio: f64,
    torso_height_ratio: f64,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    measurements: WireMeasurements,
    confidence: f64,
}

/// Parse an oracle answer into a ratio estimate.
///
/// Tolerates Markdown code fences and prose around the JSON object by
/// parsing the outermost `{ … }` span. Any failure becomes
/// [`MeasureError::OracleResponse`]; the parser's message is logged and kept
/// in the error's `details`, never shown as the error's display text.
///
/// Ranges are not checked here; that is the engine's job.
pub fn parse_oracle_response(text: &str) -> MeasureResult<RawRatioEstimate> {
    let json = extract_json_object(text).ok_or_else(|| {
        let details = "response contains no JSON object".to_string();
        warn!(target: "body_measure::oracle", details = %details, "Rejected oracle response");
        MeasureError::oracle_response(details)
    })?;

    let wire: WireResponse = serde_json::from_str(json).map_err(|e| {
        warn!(target: "body_measure::oracle", error = %e, "Rejected oracle response");
        MeasureError::oracle_response(e.to_string())
    })?;

    debug!(target: "body_measure::oracle", confidence = wire.confidence, "Parsed oracle response");

    Ok(RawRatioEstimate {
        waist_ratio: wire.measurements.waist_ratio,
        hip_ratio: wire.measurements.hip_ratio,
        shoulder_ratio: wire.measurements.shoulder_ratio,
        chest_ratio: wire.measurements.chest_ratio,
        torso_height_ratio: wire.measurements.torso_height_ratio,
        confidence: wire.confidence,
    })
}

fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Oracle double that always returns the same estimate.
#[derive(Debug, Clone)]
pub struct StaticOracle {
    estimate: RawRatioEstimate,
}

impl StaticOracle {
    pub fn new(estimate: RawRatioEstimate) -> Self {
        Self { estimate }
    }
}

#[async_trait]
impl RatioOracle for StaticOracle {
    fn name(&self) -> &str {
        "static"
    }

    async fn estimate_ratios(
        &self,
        _image: &ScanImage,
        _biometrics: &UserBiometrics,
    ) -> MeasureResult<RawRatioEstimate> {
        Ok(self.estimate)
    }
}

/// Oracle double that replays a fixed raw answer (or transport failure).
///
/// Answers go through [`parse_oracle_response`], so this exercises the same
/// path as a real network-backed oracle.
#[derive(Debug, Clone)]
pub struct ScriptedOracle {
    reply: Result<String, String>,
}

impl ScriptedOracle {
    /// Replay `text` as the oracle's answer.
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            reply: Ok(text.into()),
        }
    }

    /// Fail every request as if the service were unreachable.
    pub fn failing(details: impl Into<String>) -> Self {
        Self {
            reply: Err(details.into()),
        }
    }
}

#[async_trait]
impl RatioOracle for ScriptedOracle {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn estimate_ratios(
        &self,
        _image: &ScanImage,
        _biometrics: &UserBiometrics,
    ) -> MeasureResult<RawRatioEstimate> {
        match &self.reply {
            Ok(text) => parse_oracle_response(text),
            Err(details) => Err(MeasureError::oracle_unavailable(details.clone())),
        }
    }
}
