use phishscope_core::Phase;

use crate::error::{OrchestratorError, Result};

/// Legal moves between workflow phases.
pub struct PhaseStateMachine;

impl PhaseStateMachine {
    pub fn validate_transition(from: Phase, to: Phase) -> Result<()> {
        if Self::allowed_transitions(from).contains(&to) {
            Ok(())
        } else {
            Err(OrchestratorError::InvalidTransition { from, to })
        }
    }

    fn allowed_transitions(from: Phase) -> Vec<Phase> {
        match from {
            Phase::Canonicalizing => vec![Phase::Fingerprinting, Phase::Error],
            Phase::Fingerprinting => vec![Phase::PrefixExtracted, Phase::Error],
            Phase::PrefixExtracted => vec![Phase::PrivacyDeletion, Phase::Error],
            Phase::PrivacyDeletion => vec![Phase::ReputationCheck, Phase::Error],
            // FinalDecision directly is the short-circuit
            Phase::ReputationCheck => vec![
                Phase::FeatureExtraction,
                Phase::FinalDecision,
                Phase::Error,
            ],
            Phase::FeatureExtraction => vec![Phase::MlClassification, Phase::Error],
            Phase::MlClassification => vec![Phase::FinalDecision, Phase::Error],
            Phase::FinalDecision | Phase::Error => vec![],
        }
    }

    pub fn can_transition(from: Phase, to: Phase) -> bool {
        Self::validate_transition(from, to).is_ok()
    }

    /// Phases bypassed when the reputation check settles the run.
    pub fn short_circuited() -> [Phase; 2] {
        [Phase::FeatureExtraction, Phase::MlClassification]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        assert!(PhaseStateMachine::can_transition(
            Phase::Canonicalizing,
            Phase::Fingerprinting
        ));
        assert!(PhaseStateMachine::can_transition(
            Phase::ReputationCheck,
            Phase::FinalDecision
        ));
        assert!(PhaseStateMachine::can_transition(
            Phase::MlClassification,
            Phase::FinalDecision
        ));
    }

    #[test]
    fn test_invalid_transitions() {
        assert!(!PhaseStateMachine::can_transition(
            Phase::Fingerprinting,
            Phase::ReputationCheck
        ));
        assert!(!PhaseStateMachine::can_transition(
            Phase::FeatureExtraction,
            Phase::FinalDecision
        ));
        assert!(!PhaseStateMachine::can_transition(
            Phase::FinalDecision,
            Phase::Error
        ));
        assert!(!PhaseStateMachine::can_transition(
            Phase::Error,
            Phase::Canonicalizing
        ));
    }

    #[test]
    fn test_every_non_terminal_phase_can_fail() {
        for phase in Phase::SEQUENCE.iter().filter(|p| !p.is_terminal()) {
            assert!(PhaseStateMachine::can_transition(*phase, Phase::Error));
        }
    }
}
