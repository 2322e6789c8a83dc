use serde::{Deserialize, Serialize};
use std::fmt;

/// A step of the detection workflow, in canonical order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "typescript", derive(ts_rs::TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Canonicalizing,
    Fingerprinting,
    PrefixExtracted,
    PrivacyDeletion,
    ReputationCheck,
    FeatureExtraction,
    MlClassification,
    FinalDecision,
    /// Terminal failure state, reachable from any non-terminal phase.
    Error,
}

impl Phase {
    /// Every non-error phase in the order a full run visits them.
    pub const SEQUENCE: [Phase; 8] = [
        Phase::Canonicalizing,
        Phase::Fingerprinting,
        Phase::PrefixExtracted,
        Phase::PrivacyDeletion,
        Phase::ReputationCheck,
        Phase::FeatureExtraction,
        Phase::MlClassification,
        Phase::FinalDecision,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Canonicalizing => "canonicalizing",
            Self::Fingerprinting => "fingerprinting",
            Self::PrefixExtracted => "prefix_extracted",
            Self::PrivacyDeletion => "privacy_deletion",
            Self::ReputationCheck => "reputation_check",
            Self::FeatureExtraction => "feature_extraction",
            Self::MlClassification => "ml_classification",
            Self::FinalDecision => "final_decision",
            Self::Error => "error",
        }
    }

    /// Progress text announced when the phase starts.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Canonicalizing => "Canonicalizing URL...",
            Self::Fingerprinting => "Generating fingerprint...",
            Self::PrefixExtracted => "Extracting prefix...",
            Self::PrivacyDeletion => "Deleting original URL (privacy)...",
            Self::ReputationCheck => "Checking reputation database...",
            Self::FeatureExtraction => "Extracting URL features...",
            Self::MlClassification => "Running ML classification...",
            Self::FinalDecision => "Final decision generated",
            Self::Error => "Check failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::FinalDecision | Self::Error)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The phase at which a phishing verdict was confirmed.
///
/// Selects the user-facing explanation independently of the method label the
/// detection backend attaches to its verdict.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "typescript", derive(ts_rs::TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum DetectionPhase {
    Reputation,
    Ml,
}

impl DetectionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reputation => "reputation",
            Self::Ml => "ml",
        }
    }

    pub fn phase(&self) -> Phase {
        match self {
            Self::Reputation => Phase::ReputationCheck,
            Self::Ml => Phase::MlClassification,
        }
    }
}
