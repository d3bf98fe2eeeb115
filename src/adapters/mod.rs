//! Trial payload adapters
//!
//! This module parses serialized trial exports into the typed session model,
//! validating at load time instead of carrying loosely-typed attribute bags
//! through the analysis. Two export shapes exist: a columnar object of
//! parallel arrays, and a row-oriented array of per-trial objects.

mod columnar;
mod rows;

pub use columnar::ColumnarAdapter;
pub use rows::RowsAdapter;

use crate::error::AnalysisError;
use crate::types::{Choice, QualityFlag, SessionTrials};

/// Trait for trial payload adapters
pub trait TrialPayloadAdapter {
    /// Parse raw JSON into a validated trial table
    fn parse(&self, raw_json: &str) -> Result<SessionTrials, AnalysisError>;
}

/// Convert an export-encoded choice value to the typed form.
///
/// Exports store choice as a float column; only integral -1/0/+1 are valid.
pub(crate) fn choice_from_export(value: f64) -> Result<Choice, AnalysisError> {
    if value.fract() != 0.0 || !(-1.0..=1.0).contains(&value) {
        return Err(AnalysisError::ParseError(format!(
            "unknown choice code: {value}"
        )));
    }
    Choice::try_from(value as i8)
}

/// Convert an export-encoded feedback value, preserving out-of-range codes.
///
/// Feedback stays raw: unexpected integral codes are a quality flag, not a
/// parse failure. Non-integral values are malformed data.
pub(crate) fn feedback_from_export(value: f64) -> Result<i8, AnalysisError> {
    if value.fract() != 0.0 || !(f64::from(i8::MIN)..=f64::from(i8::MAX)).contains(&value) {
        return Err(AnalysisError::ParseError(format!(
            "malformed feedback value: {value}"
        )));
    }
    Ok(value as i8)
}

/// Scan a loaded session for data-quality warnings.
///
/// Warnings never fail the analysis; the aggregation treats the flagged
/// values conservatively.
pub fn validate_quality(trials: &SessionTrials) -> Vec<QualityFlag> {
    let mut flags = Vec::new();

    if trials
        .feedback_type()
        .iter()
        .any(|f| *f != 1 && *f != -1)
    {
        flags.push(QualityFlag::UnexpectedFeedback);
    }

    let out_of_range = |c: &Option<f64>| matches!(c, Some(v) if !(0.0..=1.0).contains(v));
    if trials.contrast_left().iter().any(out_of_range)
        || trials.contrast_right().iter().any(out_of_range)
    {
        flags.push(QualityFlag::ContrastOutOfRange);
    }

    if trials.choices().iter().any(|c| *c == Choice::NoGo) {
        flags.push(QualityFlag::NoGoPresent);
    }

    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_choice_from_export_rejects_fractional() {
        assert!(choice_from_export(0.5).is_err());
        assert!(choice_from_export(2.0).is_err());
        assert_eq!(choice_from_export(-1.0).unwrap(), Choice::Leftward);
    }

    #[test]
    fn test_feedback_from_export_keeps_out_of_range_codes() {
        assert_eq!(feedback_from_export(3.0).unwrap(), 3);
        assert!(feedback_from_export(0.5).is_err());
    }

    #[test]
    fn test_quality_flags() {
        let trials = SessionTrials::new(
            vec![Choice::NoGo, Choice::Rightward],
            vec![Some(1.5), None],
            vec![None, Some(0.5)],
            vec![0, 1],
        )
        .unwrap();
        let flags = validate_quality(&trials);
        assert_eq!(
            flags,
            vec![
                QualityFlag::UnexpectedFeedback,
                QualityFlag::ContrastOutOfRange,
                QualityFlag::NoGoPresent,
            ]
        );
    }

    #[test]
    fn test_clean_session_has_no_flags() {
        let trials = SessionTrials::new(
            vec![Choice::Leftward],
            vec![Some(1.0)],
            vec![None],
            vec![1],
        )
        .unwrap();
        assert!(validate_quality(&trials).is_empty());
    }

    #[test]
    fn test_adapter_parity_on_same_session() {
        let columnar = r#"{
            "choice": [-1.0, 1.0, 0.0],
            "contrastLeft": [1.0, null, null],
            "contrastRight": [null, 0.25, 0.0],
            "feedbackType": [1.0, -1.0, -1.0]
        }"#;
        let rows = r#"[
            {"choice": -1.0, "contrastLeft": 1.0, "contrastRight": null, "feedbackType": 1.0},
            {"choice": 1.0, "contrastLeft": null, "contrastRight": 0.25, "feedbackType": -1.0},
            {"choice": 0.0, "contrastLeft": null, "contrastRight": 0.0, "feedbackType": -1.0}
        ]"#;

        let from_columnar = ColumnarAdapter.parse(columnar).unwrap();
        let from_rows = RowsAdapter.parse(rows).unwrap();
        assert_eq!(from_columnar, from_rows);
    }
}
