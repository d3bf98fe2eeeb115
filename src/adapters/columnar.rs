//! Columnar export adapter
//!
//! Parses the columnar trial export: one JSON object with parallel arrays,
//! stimulus absence encoded as `null` in the contrast columns.

use serde::Deserialize;

use super::{choice_from_export, feedback_from_export, TrialPayloadAdapter};
use crate::error::AnalysisError;
use crate::types::SessionTrials;

/// Adapter for the columnar export format
pub struct ColumnarAdapter;

#[derive(Deserialize)]
struct ColumnarPayload {
    choice: Vec<f64>,
    #[serde(rename = "contrastLeft")]
    contrast_left: Vec<Option<f64>>,
    #[serde(rename = "contrastRight")]
    contrast_right: Vec<Option<f64>>,
    #[serde(rename = "feedbackType")]
    feedback_type: Vec<f64>,
}

impl TrialPayloadAdapter for ColumnarAdapter {
    fn parse(&self, raw_json: &str) -> Result<SessionTrials, AnalysisError> {
        let payload: ColumnarPayload = serde_json::from_str(raw_json)?;

        let choice = payload
            .choice
            .into_iter()
            .map(choice_from_export)
            .collect::<Result<Vec<_>, _>>()?;
        let feedback_type = payload
            .feedback_type
            .into_iter()
            .map(feedback_from_export)
            .collect::<Result<Vec<_>, _>>()?;

        SessionTrials::new(
            choice,
            payload.contrast_left,
            payload.contrast_right,
            feedback_type,
        )
    }
}
