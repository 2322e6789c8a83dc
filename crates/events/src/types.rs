//! Event types published while a phishing check runs

use chrono::{DateTime, Utc};
use phishscope_core::{FeatureVector, Phase, VerdictReport};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Envelope wrapping all events with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(ts_rs::TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct EventEnvelope {
    /// Unique event ID
    pub id: Uuid,
    /// Run that produced the event
    pub run_id: Uuid,
    /// Position of the event within its run, starting at 0
    pub sequence: u64,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// The actual event
    pub event: Event,
}

impl EventEnvelope {
    /// Create a new event envelope with auto-generated ID and timestamp
    pub fn new(run_id: Uuid, sequence: u64, event: Event) -> Self {
        Self {
            id: Uuid::new_v4(),
            run_id,
            sequence,
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Everything a presentation adapter is told about a run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(ts_rs::TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(tag = "type")]
pub enum Event {
    /// A run accepted its input
    #[serde(rename = "run.started")]
    RunStarted,

    /// A phase began its entry action
    #[serde(rename = "phase.started")]
    PhaseStarted { phase: Phase, description: String },

    /// A phase committed its transition
    #[serde(rename = "phase.completed")]
    PhaseCompleted {
        phase: Phase,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        detail: Option<String>,
    },

    /// A phase was bypassed by a short-circuit
    #[serde(rename = "phase.skipped")]
    PhaseSkipped { phase: Phase },

    /// Fingerprint and lookup prefix are available for display
    #[serde(rename = "fingerprint.generated")]
    FingerprintGenerated { fingerprint: String, prefix: String },

    /// The run no longer references the raw URL
    #[serde(rename = "url.discarded")]
    UrlDiscarded,

    /// Feature vector handed to the classifier
    #[serde(rename = "features.extracted")]
    FeaturesExtracted { features: FeatureVector },

    /// Terminal: the final decision payload
    #[serde(rename = "verdict.ready")]
    VerdictReady { report: VerdictReport },

    /// Terminal: the run stopped at `phase`
    #[serde(rename = "run.failed")]
    RunFailed {
        phase: Phase,
        kind: String,
        message: String,
        hint: String,
    },
}

impl Event {
    /// Get the phase this event reports on, if any
    pub fn phase(&self) -> Option<Phase> {
        match self {
            Event::PhaseStarted { phase, .. }
            | Event::PhaseCompleted { phase, .. }
            | Event::PhaseSkipped { phase }
            | Event::RunFailed { phase, .. } => Some(*phase),
            Event::FingerprintGenerated { .. } => Some(Phase::Fingerprinting),
            Event::UrlDiscarded => Some(Phase::PrivacyDeletion),
            Event::FeaturesExtracted { .. } => Some(Phase::FeatureExtraction),
            Event::VerdictReady { .. } => Some(Phase::FinalDecision),
            Event::RunStarted => None,
        }
    }

    /// Whether no further events follow for the run
    pub fn is_terminal(&self) -> bool {
        matches!(self, Event::VerdictReady { .. } | Event::RunFailed { .. })
    }
}
