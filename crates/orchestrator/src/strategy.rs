//! How the reputation check relates to the classifier.
//!
//! The state machine is the same for every strategy; a strategy only decides
//! what the first detect call carries and whether its answer ends the run.

use phishscope_core::{DetectionPhase, DetectionVerdict, FeatureVector, Fingerprint};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReputationDecision {
    /// Run feature extraction and ML classification next.
    Continue,
    /// Skip to the final decision.
    Finish {
        detection_phase: Option<DetectionPhase>,
    },
}

pub trait DetectionStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Features sent along with the prefix in the reputation-phase call.
    fn reputation_features(&self, fingerprint: &Fingerprint) -> FeatureVector;

    fn after_reputation(&self, verdict: &DetectionVerdict) -> ReputationDecision;
}

/// Prefix-only reputation lookup, then a separate ML call unless the
/// reputation database already confirmed phishing.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhasedStrategy;

impl DetectionStrategy for PhasedStrategy {
    fn name(&self) -> &'static str {
        "phased"
    }

    fn reputation_features(&self, _fingerprint: &Fingerprint) -> FeatureVector {
        FeatureVector::default()
    }

    fn after_reputation(&self, verdict: &DetectionVerdict) -> ReputationDecision {
        if verdict.is_reputation_hit() {
            ReputationDecision::Finish {
                detection_phase: Some(DetectionPhase::Reputation),
            }
        } else {
            ReputationDecision::Continue
        }
    }
}

/// One detect call carrying the full feature vector; the backend evaluates
/// reputation and ML in the same round trip.
#[derive(Debug, Clone, Copy, Default)]
pub struct CombinedStrategy;

impl DetectionStrategy for CombinedStrategy {
    fn name(&self) -> &'static str {
        "combined"
    }

    fn reputation_features(&self, fingerprint: &Fingerprint) -> FeatureVector {
        fingerprint.features.clone()
    }

    fn after_reputation(&self, verdict: &DetectionVerdict) -> ReputationDecision {
        let detection_phase = if verdict.is_reputation_hit() {
            Some(DetectionPhase::Reputation)
        } else if verdict.result.is_phishing() {
            Some(DetectionPhase::Ml)
        } else {
            None
        };
        ReputationDecision::Finish { detection_phase }
    }
}
