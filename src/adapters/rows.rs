//! Row-oriented export adapter
//!
//! Parses the row-oriented trial export: a JSON array of per-trial objects
//! carrying the same field names as the columnar format.

use serde::Deserialize;

use super::{choice_from_export, feedback_from_export, TrialPayloadAdapter};
use crate::error::AnalysisError;
use crate::types::SessionTrials;

/// Adapter for the row-oriented export format
pub struct RowsAdapter;

#[derive(Deserialize)]
struct TrialRow {
    choice: f64,
    #[serde(rename = "contrastLeft")]
    contrast_left: Option<f64>,
    #[serde(rename = "contrastRight")]
    contrast_right: Option<f64>,
    #[serde(rename = "feedbackType")]
    feedback_type: f64,
}

impl TrialPayloadAdapter for RowsAdapter {
    fn parse(&self, raw_json: &str) -> Result<SessionTrials, AnalysisError> {
        let rows: Vec<TrialRow> = serde_json::from_str(raw_json)?;

        let mut choice = Vec::with_capacity(rows.len());
        let mut contrast_left = Vec::with_capacity(rows.len());
        let mut contrast_right = Vec::with_capacity(rows.len());
        let mut feedback_type = Vec::with_capacity(rows.len());

        for row in rows {
            choice.push(choice_from_export(row.choice)?);
            contrast_left.push(row.contrast_left);
            contrast_right.push(row.contrast_right);
            feedback_type.push(feedback_from_export(row.feedback_type)?);
        }

        SessionTrials::new(choice, contrast_left, contrast_right, feedback_type)
    }
}
