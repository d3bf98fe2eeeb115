//! Data-access collaborator
//!
//! The remote repository (search, authentication, download) stays outside
//! this crate. Analysis code receives a [`TrialProvider`] explicitly; there
//! is no shared client singleton. [`StaticProvider`] is the in-memory
//! implementation used for tests and locally cached exports.

use std::collections::HashMap;

use uuid::Uuid;

use crate::error::AnalysisError;
use crate::types::{SessionInfo, SessionTrials};

/// Search filter for sessions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionFilter {
    protocol: Option<String>,
}

impl SessionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match only sessions whose task protocol contains `protocol`.
    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    pub fn matches(&self, info: &SessionInfo) -> bool {
        match &self.protocol {
            Some(p) => info.task_protocol.contains(p.as_str()),
            None => true,
        }
    }
}

/// Source of sessions and trial data for analysis
pub trait TrialProvider {
    /// Sessions for a subject matching the filter, newest first.
    fn search_sessions(
        &self,
        subject: &str,
        filter: &SessionFilter,
    ) -> Result<Vec<SessionInfo>, AnalysisError>;

    /// Trial data for one session.
    fn fetch_trials(&self, session: Uuid) -> Result<SessionTrials, AnalysisError>;
}

/// In-memory provider backed by registered sessions
#[derive(Debug, Default)]
pub struct StaticProvider {
    sessions: Vec<SessionInfo>,
    trials: HashMap<Uuid, SessionTrials>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session and its trial data.
    pub fn insert(&mut self, info: SessionInfo, trials: SessionTrials) {
        self.trials.insert(info.id, trials);
        self.sessions.push(info);
    }
}

impl TrialProvider for StaticProvider {
    fn search_sessions(
        &self,
        subject: &str,
        filter: &SessionFilter,
    ) -> Result<Vec<SessionInfo>, AnalysisError> {
        let mut found: Vec<SessionInfo> = self
            .sessions
            .iter()
            .filter(|s| s.subject == subject && filter.matches(s))
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            b.start_time
                .cmp(&a.start_time)
                .then(b.number.cmp(&a.number))
        });
        Ok(found)
    }

    fn fetch_trials(&self, session: Uuid) -> Result<SessionTrials, AnalysisError> {
        self.trials
            .get(&session)
            .cloned()
            .ok_or(AnalysisError::SessionNotFound(session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Choice;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn session(subject: &str, day: u32, number: u32, protocol: &str) -> SessionInfo {
        SessionInfo {
            id: Uuid::new_v4(),
            subject: subject.to_string(),
            start_time: Utc.with_ymd_and_hms(2021, 3, day, 12, 0, 0).unwrap(),
            task_protocol: protocol.to_string(),
            number,
        }
    }

    fn one_trial() -> SessionTrials {
        SessionTrials::new(
            vec![Choice::Rightward],
            vec![None],
            vec![Some(1.0)],
            vec![1],
        )
        .unwrap()
    }

    #[test]
    fn test_search_orders_newest_first() {
        let mut provider = StaticProvider::new();
        provider.insert(session("KS023", 19, 1, "ephys"), one_trial());
        provider.insert(session("KS023", 21, 1, "ephys"), one_trial());
        provider.insert(session("KS023", 21, 2, "ephys"), one_trial());

        let found = provider
            .search_sessions("KS023", &SessionFilter::new())
            .unwrap();
        let order: Vec<(u32, u32)> = found
            .iter()
            .map(|s| (s.start_time.format("%d").to_string().parse().unwrap(), s.number))
            .collect();
        assert_eq!(order, vec![(21, 2), (21, 1), (19, 1)]);
    }

    #[test]
    fn test_search_filters_by_subject_and_protocol() {
        let mut provider = StaticProvider::new();
        provider.insert(session("KS023", 19, 1, "ephysChoiceWorld"), one_trial());
        provider.insert(session("KS023", 20, 1, "trainingChoiceWorld"), one_trial());
        provider.insert(session("ZM_2240", 20, 1, "ephysChoiceWorld"), one_trial());

        let filter = SessionFilter::new().with_protocol("ephys");
        let found = provider.search_sessions("KS023", &filter).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].task_protocol, "ephysChoiceWorld");
    }

    #[test]
    fn test_fetch_unknown_session() {
        let provider = StaticProvider::new();
        let id = Uuid::new_v4();
        assert!(matches!(
            provider.fetch_trials(id),
            Err(AnalysisError::SessionNotFound(e)) if e == id
        ));
    }
}
