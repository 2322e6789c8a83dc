//! Phase orchestration for phishing checks.
//!
//! A run moves a URL through canonicalization, fingerprinting, prefix
//! extraction, privacy deletion, reputation lookup, feature extraction and ML
//! classification to a final decision, publishing progress on the event bus.

pub mod emitter;
pub mod error;
pub mod executor;
pub mod report;
pub mod run_state;
pub mod state_machine;
pub mod strategy;

pub use emitter::OrderedEventEmitter;
pub use error::{ErrorKind, OrchestratorError, Result};
pub use executor::PhaseOrchestrator;
pub use run_state::RunState;
pub use state_machine::PhaseStateMachine;
pub use strategy::{CombinedStrategy, DetectionStrategy, PhasedStrategy, ReputationDecision};
