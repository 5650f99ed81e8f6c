//! One analysis cycle: photograph in, measurement record out.

use tracing::{Instrument, info, info_span, warn};

use crate::engine::measure_with_params;
use crate::error::MeasureResult;
use crate::oracle::{RatioOracle, ScanImage};
use crate::params::MeasureParams;
use crate::types::{MeasurementRecord, UserBiometrics};

/// Ask the oracle for ratios once, then run the engine.
///
/// There is no retry: a failed attempt returns its error and the caller
/// decides whether to try again. Oracle transport failures, unreadable
/// answers and input validation failures keep their distinct error codes so
/// the caller can tell them apart.
pub async fn analyze(
    oracle: &dyn RatioOracle,
    image: &ScanImage,
    biometrics: &UserBiometrics,
    params: &MeasureParams,
) -> MeasureResult<MeasurementRecord> {
    let span = info_span!(
        "body_analysis",
        oracle = oracle.name(),
        image_bytes = image.bytes.len()
    );

    async move {
        let raw = match oracle.estimate_ratios(image, biometrics).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(target: "body_measure::analysis", code = %e.code(), "Oracle request failed");
                return Err(e);
            }
        };

        let record = measure_with_params(&raw, biometrics, params).map_err(|e| {
            warn!(target: "body_measure::analysis", code = %e.code(), error = %e, "Estimate rejected");
            e
        })?;

        info!(
            target: "body_measure::analysis",
            waist_cm = record.waist_circumference_cm(),
            hip_cm = record.hip_circumference_cm(),
            bmi = record.bmi(),
            confidence = record.confidence(),
            "Analysis completed"
        );
        Ok(record)
    }
    .instrument(span)
    .await
}
