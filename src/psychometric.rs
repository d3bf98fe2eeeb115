//! Psychometric aggregation
//!
//! This module derives a signed contrast per trial and computes, per unique
//! contrast level, the fraction of trials where the subject's response was
//! rightward. Left-side stimulus strength is negated, right-side is
//! positive, so two measurement columns collapse into one comparable axis.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::types::SessionTrials;

/// One point of a psychometric curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PsychometricPoint {
    /// Signed contrast level (negative = left-side stimulus)
    pub contrast: f64,
    /// Fraction of trials at this level with a rightward choice (0-1)
    pub rightward_fraction: f64,
    /// Number of trials at this level
    pub n_trials: usize,
}

/// Rightward-choice fraction per signed contrast level, sorted ascending
/// by contrast.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PsychometricCurve {
    pub points: Vec<PsychometricPoint>,
}

impl PsychometricCurve {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Rightward fraction at an exact contrast level, if observed.
    pub fn fraction_at(&self, contrast: f64) -> Option<f64> {
        self.points
            .iter()
            .find(|p| p.contrast == contrast)
            .map(|p| p.rightward_fraction)
    }

    /// (contrast %, rightward-choice %) pairs for an external plotter.
    pub fn percent_series(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .map(|p| (p.contrast * 100.0, p.rightward_fraction * 100.0))
            .collect()
    }
}

/// Derive the signed contrast for each trial.
///
/// Outputs `-contrast_left` when the left side is present, `+contrast_right`
/// otherwise. A left-side contrast of 0.0 maps to plain 0.0 so zero-contrast
/// trials from either side fall into a single group.
///
/// Fails with [`AnalysisError::InvariantViolation`] when a trial has both or
/// neither side present; ambiguous trials are never silently resolved.
pub fn derive_signed_contrast(trials: &SessionTrials) -> Result<Vec<f64>, AnalysisError> {
    let mut signed = Vec::with_capacity(trials.len());

    for (i, (left, right)) in trials
        .contrast_left()
        .iter()
        .zip(trials.contrast_right())
        .enumerate()
    {
        let value = match (left, right) {
            (Some(l), None) => {
                if *l == 0.0 {
                    0.0
                } else {
                    -l
                }
            }
            (None, Some(r)) => *r,
            (Some(_), Some(_)) => {
                return Err(AnalysisError::InvariantViolation {
                    trial: i,
                    detail: "stimulus present on both sides".to_string(),
                })
            }
            (None, None) => {
                return Err(AnalysisError::InvariantViolation {
                    trial: i,
                    detail: "stimulus absent on both sides".to_string(),
                })
            }
        };
        signed.push(value);
    }

    Ok(signed)
}

/// Aggregate rightward-choice fractions per signed contrast level.
///
/// For negative contrasts (left-side stimulus) the rightward rate is the
/// incorrect-feedback fraction: a correct response to a left stimulus is a
/// leftward choice. For non-negative contrasts the correct-feedback fraction
/// is the rightward rate directly. Feedback values outside {+1, -1} count in
/// the denominator but never the numerator.
///
/// Grouping uses exact floating-point equality. This is safe only because
/// signed contrasts originate from a small fixed set of nominal levels
/// (e.g. {0, ±0.0625, ±0.125, ±0.25, ±0.5, ±1.0}); callers feeding free-form
/// values must bin them first.
pub fn aggregate_performance(
    trials: &SessionTrials,
    signed_contrasts: &[f64],
) -> Result<PsychometricCurve, AnalysisError> {
    if signed_contrasts.len() != trials.len() {
        return Err(AnalysisError::LengthMismatch(format!(
            "trials={}, signed_contrasts={}",
            trials.len(),
            signed_contrasts.len()
        )));
    }

    // Keyed by bit pattern; exact because inputs come from the nominal set.
    let mut groups: HashMap<u64, (usize, usize)> = HashMap::new();

    for (contrast, feedback) in signed_contrasts.iter().zip(trials.feedback_type()) {
        let wanted: i8 = if *contrast < 0.0 { -1 } else { 1 };
        let entry = groups.entry(contrast.to_bits()).or_insert((0, 0));
        if *feedback == wanted {
            entry.0 += 1;
        }
        entry.1 += 1;
    }

    let mut points: Vec<PsychometricPoint> = groups
        .into_iter()
        .map(|(bits, (matched, total))| PsychometricPoint {
            contrast: f64::from_bits(bits),
            rightward_fraction: matched as f64 / total as f64,
            n_trials: total,
        })
        .collect();
    points.sort_by(|a, b| a.contrast.total_cmp(&b.contrast));

    Ok(PsychometricCurve { points })
}

/// Derive signed contrasts and aggregate in one call.
pub fn psychometric_curve(trials: &SessionTrials) -> Result<PsychometricCurve, AnalysisError> {
    let signed = derive_signed_contrast(trials)?;
    aggregate_performance(trials, &signed)
}
