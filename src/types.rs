//! Core types for psycurve
//!
//! This module defines the data model for one behavioral session: the
//! columnar trial table, the per-trial row view, and the session metadata
//! returned by a data-access provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AnalysisError;

/// Categorical response indicator for one trial.
///
/// Source encoding: -1 leftward, 0 no-go, +1 rightward. The psychometric
/// aggregation infers rightward choice from feedback and stimulus side
/// rather than from this field, but the session data carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Choice {
    Leftward,
    NoGo,
    Rightward,
}

impl Choice {
    pub fn as_code(&self) -> i8 {
        match self {
            Choice::Leftward => -1,
            Choice::NoGo => 0,
            Choice::Rightward => 1,
        }
    }
}

impl TryFrom<i8> for Choice {
    type Error = AnalysisError;

    fn try_from(code: i8) -> Result<Self, Self::Error> {
        match code {
            -1 => Ok(Choice::Leftward),
            0 => Ok(Choice::NoGo),
            1 => Ok(Choice::Rightward),
            other => Err(AnalysisError::ParseError(format!(
                "unknown choice code: {other}"
            ))),
        }
    }
}

/// Columnar, read-only trial data for one session.
///
/// One entry per trial in every column. Stimulus absence is encoded as
/// `None` in the contrast columns; exactly one side is expected to be
/// present per trial (enforced by the signed-contrast derivation, not at
/// construction).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionTrials {
    choice: Vec<Choice>,
    contrast_left: Vec<Option<f64>>,
    contrast_right: Vec<Option<f64>>,
    /// +1 correct, -1 incorrect. Kept raw: out-of-range values are a
    /// data-quality signal, not a parse failure.
    feedback_type: Vec<i8>,
}

impl SessionTrials {
    /// Build a trial table, checking that all columns have equal length.
    pub fn new(
        choice: Vec<Choice>,
        contrast_left: Vec<Option<f64>>,
        contrast_right: Vec<Option<f64>>,
        feedback_type: Vec<i8>,
    ) -> Result<Self, AnalysisError> {
        let n = choice.len();
        if contrast_left.len() != n || contrast_right.len() != n || feedback_type.len() != n {
            return Err(AnalysisError::LengthMismatch(format!(
                "choice={}, contrast_left={}, contrast_right={}, feedback_type={}",
                n,
                contrast_left.len(),
                contrast_right.len(),
                feedback_type.len()
            )));
        }
        Ok(Self {
            choice,
            contrast_left,
            contrast_right,
            feedback_type,
        })
    }

    pub fn len(&self) -> usize {
        self.choice.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choice.is_empty()
    }

    /// Per-trial row view. Panics if `index` is out of bounds, like slice
    /// indexing; use [`SessionTrials::iter`] for bounds-checked traversal.
    pub fn trial(&self, index: usize) -> TrialRecord {
        TrialRecord {
            choice: self.choice[index],
            contrast_left: self.contrast_left[index],
            contrast_right: self.contrast_right[index],
            feedback_type: self.feedback_type[index],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = TrialRecord> + '_ {
        (0..self.len()).map(|i| self.trial(i))
    }

    pub fn choices(&self) -> &[Choice] {
        &self.choice
    }

    pub fn contrast_left(&self) -> &[Option<f64>] {
        &self.contrast_left
    }

    pub fn contrast_right(&self) -> &[Option<f64>] {
        &self.contrast_right
    }

    pub fn feedback_type(&self) -> &[i8] {
        &self.feedback_type
    }
}

/// One trial's fields, viewed by row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialRecord {
    pub choice: Choice,
    pub contrast_left: Option<f64>,
    pub contrast_right: Option<f64>,
    pub feedback_type: i8,
}

/// Session identity and metadata from the search collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    /// Unique session identifier
    pub id: Uuid,
    /// Subject (animal) name
    pub subject: String,
    /// Session start time (UTC)
    pub start_time: DateTime<Utc>,
    /// Task protocol name
    pub task_protocol: String,
    /// Session number within the day
    pub number: u32,
}

/// Data-quality warning attached to a loaded session.
///
/// Warnings never fail an analysis; they flag values the aggregation will
/// treat conservatively (unexpected feedback counts in no numerator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityFlag {
    /// Feedback value outside {+1, -1} observed
    UnexpectedFeedback,
    /// Contrast value outside [0, 1] observed
    ContrastOutOfRange,
    /// At least one no-go response in the session
    NoGoPresent,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_choice_codes_round_trip() {
        for code in [-1i8, 0, 1] {
            let choice = Choice::try_from(code).unwrap();
            assert_eq!(choice.as_code(), code);
        }
    }

    #[test]
    fn test_choice_rejects_unknown_code() {
        assert!(Choice::try_from(2).is_err());
        assert!(Choice::try_from(-2).is_err());
    }

    #[test]
    fn test_session_trials_rejects_ragged_columns() {
        let result = SessionTrials::new(
            vec![Choice::Leftward, Choice::Rightward],
            vec![Some(0.5), None],
            vec![None],
            vec![1, -1],
        );
        assert!(matches!(result, Err(AnalysisError::LengthMismatch(_))));
    }

    #[test]
    fn test_trial_row_view() {
        let trials = SessionTrials::new(
            vec![Choice::Leftward, Choice::Rightward],
            vec![Some(0.5), None],
            vec![None, Some(0.25)],
            vec![1, -1],
        )
        .unwrap();

        assert_eq!(trials.len(), 2);
        let row = trials.trial(1);
        assert_eq!(row.choice, Choice::Rightward);
        assert_eq!(row.contrast_right, Some(0.25));
        assert_eq!(row.feedback_type, -1);

        let rows: Vec<TrialRecord> = trials.iter().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].contrast_left, Some(0.5));
    }
}
