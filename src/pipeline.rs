//! Analysis orchestration
//!
//! This module provides the public entry points for analyzing one session:
//! derive signed contrasts once, then compute the summary and psychometric
//! curve from the shared derivation. Providers are passed in explicitly.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::adapters::validate_quality;
use crate::error::AnalysisError;
use crate::provider::{SessionFilter, TrialProvider};
use crate::psychometric::{aggregate_performance, derive_signed_contrast, PsychometricCurve};
use crate::stats::{summarize, SessionSummary};
use crate::types::{QualityFlag, SessionInfo, SessionTrials};

/// One session's materialized analysis.
///
/// Computed once per session and held for the lifetime of the analysis;
/// nothing here mutates after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionAnalysis {
    /// Session metadata, when the trials came from a provider
    pub info: Option<SessionInfo>,
    /// The trial data the analysis was computed from
    pub trials: SessionTrials,
    /// Signed contrast per trial, parallel to the trial table
    pub signed_contrast: Vec<f64>,
    /// Descriptive statistics
    pub summary: SessionSummary,
    /// Rightward-choice fraction per contrast level
    pub curve: PsychometricCurve,
    /// Data-quality warnings observed at load
    pub quality: Vec<QualityFlag>,
}

/// Stateless orchestrator for session analyses
#[derive(Debug, Default)]
pub struct SessionAnalyzer;

impl SessionAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Analyze an already-loaded trial table.
    pub fn analyze_trials(
        &self,
        trials: SessionTrials,
    ) -> Result<SessionAnalysis, AnalysisError> {
        let signed_contrast = derive_signed_contrast(&trials)?;
        let summary = summarize(&trials)?;
        let curve = aggregate_performance(&trials, &signed_contrast)?;
        let quality = validate_quality(&trials);

        Ok(SessionAnalysis {
            info: None,
            trials,
            signed_contrast,
            summary,
            curve,
            quality,
        })
    }

    /// Fetch one session's trials from a provider and analyze them.
    pub fn analyze_session(
        &self,
        provider: &dyn TrialProvider,
        session: Uuid,
    ) -> Result<SessionAnalysis, AnalysisError> {
        let trials = provider.fetch_trials(session)?;
        self.analyze_trials(trials)
    }

    /// Analyze the most recent session for a subject matching the filter.
    pub fn analyze_latest(
        &self,
        provider: &dyn TrialProvider,
        subject: &str,
        filter: &SessionFilter,
    ) -> Result<SessionAnalysis, AnalysisError> {
        let sessions = provider.search_sessions(subject, filter)?;
        let latest = sessions
            .into_iter()
            .next()
            .ok_or_else(|| AnalysisError::NoSessions(subject.to_string()))?;

        let trials = provider.fetch_trials(latest.id)?;
        let mut analysis = self.analyze_trials(trials)?;
        analysis.info = Some(latest);
        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::StaticProvider;
    use crate::types::Choice;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn sample_trials() -> SessionTrials {
        SessionTrials::new(
            vec![
                Choice::Leftward,
                Choice::Rightward,
                Choice::Rightward,
                Choice::Leftward,
            ],
            vec![Some(1.0), None, None, Some(0.5)],
            vec![None, Some(1.0), Some(1.0), None],
            vec![1, 1, -1, -1],
        )
        .unwrap()
    }

    fn session(subject: &str, day: u32) -> SessionInfo {
        SessionInfo {
            id: Uuid::new_v4(),
            subject: subject.to_string(),
            start_time: Utc.with_ymd_and_hms(2021, 3, day, 12, 0, 0).unwrap(),
            task_protocol: "ephysChoiceWorld".to_string(),
            number: 1,
        }
    }

    #[test]
    fn test_analyze_trials() {
        let analysis = SessionAnalyzer::new().analyze_trials(sample_trials()).unwrap();

        assert_eq!(analysis.info, None);
        assert_eq!(analysis.signed_contrast, vec![-1.0, 1.0, 1.0, -0.5]);
        assert_eq!(analysis.summary.n_trials, 4);
        assert_eq!(analysis.curve.fraction_at(-1.0), Some(0.0));
        assert_eq!(analysis.curve.fraction_at(-0.5), Some(1.0));
        assert_eq!(analysis.curve.fraction_at(1.0), Some(0.5));
        assert!(analysis.quality.is_empty());
    }

    #[test]
    fn test_analyze_session_by_id() {
        let mut provider = StaticProvider::new();
        let info = session("KS023", 19);
        let id = info.id;
        provider.insert(info, sample_trials());

        let analysis = SessionAnalyzer::new()
            .analyze_session(&provider, id)
            .unwrap();
        assert_eq!(analysis.summary.n_trials, 4);
    }

    #[test]
    fn test_analyze_latest_picks_newest() {
        let mut provider = StaticProvider::new();
        provider.insert(
            session("KS023", 19),
            SessionTrials::new(vec![], vec![], vec![], vec![]).unwrap(),
        );
        let newest = session("KS023", 21);
        let newest_id = newest.id;
        provider.insert(newest, sample_trials());

        let analysis = SessionAnalyzer::new()
            .analyze_latest(&provider, "KS023", &SessionFilter::new())
            .unwrap();
        assert_eq!(analysis.info.as_ref().map(|i| i.id), Some(newest_id));
        assert_eq!(analysis.summary.n_trials, 4);
    }

    #[test]
    fn test_analyze_latest_no_sessions() {
        let provider = StaticProvider::new();
        let result = SessionAnalyzer::new().analyze_latest(
            &provider,
            "KS023",
            &SessionFilter::new(),
        );
        assert!(matches!(result, Err(AnalysisError::NoSessions(_))));
    }

    #[test]
    fn test_analysis_serializes() {
        let analysis = SessionAnalyzer::new().analyze_trials(sample_trials()).unwrap();
        let json = serde_json::to_string(&analysis).unwrap();
        let back: SessionAnalysis = serde_json::from_str(&json).unwrap();
        assert_eq!(back, analysis);
    }
}
