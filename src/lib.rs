//! psycurve - Psychometric analysis for two-alternative contrast
//! discrimination sessions
//!
//! Given one session's trial records (choice, left contrast, right contrast,
//! feedback outcome), psycurve derives a signed contrast per trial and
//! computes the rightward-choice fraction per contrast level, plus
//! descriptive session statistics.
//!
//! ## Modules
//!
//! - **Psychometric**: signed-contrast derivation and performance aggregation
//! - **Stats**: trial counts, contrast distribution, correct rate
//! - **Provider**: the data-access seam (search sessions, fetch trials)
//! - **Adapters**: typed parsing of serialized trial exports

pub mod adapters;
pub mod error;
pub mod pipeline;
pub mod provider;
pub mod psychometric;
pub mod stats;
pub mod types;

pub use adapters::{ColumnarAdapter, RowsAdapter, TrialPayloadAdapter};
pub use error::AnalysisError;
pub use pipeline::{SessionAnalysis, SessionAnalyzer};
pub use provider::{SessionFilter, StaticProvider, TrialProvider};
pub use psychometric::{
    aggregate_performance, derive_signed_contrast, psychometric_curve, PsychometricCurve,
    PsychometricPoint,
};
pub use stats::{summarize, SessionSummary};
pub use types::{Choice, QualityFlag, SessionInfo, SessionTrials, TrialRecord};

/// Crate version embedded in CLI output
pub const PSYCURVE_VERSION: &str = env!("CARGO_PKG_VERSION");
