//! Descriptive session statistics
//!
//! Trial counts, signed-contrast distribution, and overall performance for
//! one session. These share the signed-contrast derivation with the
//! psychometric module, so malformed trials surface the same error.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::psychometric::derive_signed_contrast;
use crate::types::{Choice, SessionTrials};

/// Descriptive statistics for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Total trial count
    pub n_trials: usize,
    /// Trials per signed contrast level, sorted ascending by contrast
    pub contrast_counts: Vec<(f64, usize)>,
    /// Trials with a left-side stimulus
    pub n_left: usize,
    /// Trials with a right-side stimulus
    pub n_right: usize,
    /// Trials with a no-go response
    pub n_nogo: usize,
    /// Overall fraction of correct feedback; `None` for an empty session
    pub correct_fraction: Option<f64>,
}

/// Compute descriptive statistics for a session.
pub fn summarize(trials: &SessionTrials) -> Result<SessionSummary, AnalysisError> {
    let signed = derive_signed_contrast(trials)?;

    let mut counts: HashMap<u64, usize> = HashMap::new();
    for contrast in &signed {
        *counts.entry(contrast.to_bits()).or_insert(0) += 1;
    }
    let mut contrast_counts: Vec<(f64, usize)> = counts
        .into_iter()
        .map(|(bits, n)| (f64::from_bits(bits), n))
        .collect();
    contrast_counts.sort_by(|a, b| a.0.total_cmp(&b.0));

    let n_left = trials.contrast_left().iter().filter(|c| c.is_some()).count();
    let n_nogo = trials
        .choices()
        .iter()
        .filter(|c| **c == Choice::NoGo)
        .count();

    let correct_fraction = if trials.is_empty() {
        None
    } else {
        let correct = trials.feedback_type().iter().filter(|f| **f == 1).count();
        Some(correct as f64 / trials.len() as f64)
    };

    Ok(SessionSummary {
        n_trials: trials.len(),
        contrast_counts,
        n_left,
        n_right: trials.len() - n_left,
        n_nogo,
        correct_fraction,
    })
}
