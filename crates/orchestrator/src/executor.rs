use detection_client::{
    ClientConfig, DetectionClient, DetectionService, FingerprintClient, FingerprintService,
};
use events::{Event, EventBus};
use phishscope_core::{
    canonical_preview, require_url, DetectionPhase, Fingerprint, Phase, VerdictReport,
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::emitter::OrderedEventEmitter;
use crate::error::{OrchestratorError, Result};
use crate::report;
use crate::run_state::RunState;
use crate::state_machine::PhaseStateMachine;
use crate::strategy::{DetectionStrategy, PhasedStrategy, ReputationDecision};

/// Drives one phishing check per call through the phase sequence.
///
/// The orchestrator holds no per-run data; every run owns its `RunState`
/// and event sequence, so runs may execute concurrently.
pub struct PhaseOrchestrator {
    fingerprinter: Arc<dyn FingerprintService>,
    detector: Arc<dyn DetectionService>,
    strategy: Arc<dyn DetectionStrategy>,
    bus: EventBus,
    backend_url: Option<String>,
}

impl PhaseOrchestrator {
    pub fn new(
        fingerprinter: Arc<dyn FingerprintService>,
        detector: Arc<dyn DetectionService>,
    ) -> Self {
        Self {
            fingerprinter,
            detector,
            strategy: Arc::new(PhasedStrategy),
            bus: EventBus::new(),
            backend_url: None,
        }
    }

    /// HTTP-backed orchestrator for the endpoints in `config`.
    pub fn from_config(config: &ClientConfig) -> detection_client::Result<Self> {
        let fingerprinter = FingerprintClient::from_config(config)?;
        let detector = DetectionClient::from_config(config)?;
        Ok(Self::new(Arc::new(fingerprinter), Arc::new(detector))
            .with_backend_url(config.base_url.clone()))
    }

    pub fn with_strategy(mut self, strategy: impl DetectionStrategy + 'static) -> Self {
        self.strategy = Arc::new(strategy);
        self
    }

    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.bus = bus;
        self
    }

    /// Backend address named in failure hints.
    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = Some(url.into());
        self
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Run a check on `url` with a fresh `RunState`.
    pub async fn run(&self, url: &str) -> Result<VerdictReport> {
        let mut state = RunState::new(url);
        self.execute(&mut state).await
    }

    /// Run a check on a caller-supplied, not yet started `RunState`.
    ///
    /// Exactly one terminal event is emitted: `verdict.ready` or `run.failed`.
    ///
    /// A state that was already started is rejected before anything is
    /// published, so its run keeps the single terminal event it had.
    pub async fn execute(&self, state: &mut RunState) -> Result<VerdictReport> {
        if state.is_started() {
            warn!(
                run_id = %state.run_id(),
                phase = %state.phase(),
                "Refusing to rerun a started check"
            );
            return Err(OrchestratorError::InvalidTransition {
                from: state.phase(),
                to: Phase::Canonicalizing,
            });
        }

        let emitter = OrderedEventEmitter::new(self.bus.clone(), state.run_id());

        info!(
            run_id = %state.run_id(),
            strategy = self.strategy.name(),
            "Starting phishing check"
        );
        emitter.emit(Event::RunStarted);

        match self.drive(state, &emitter).await {
            Ok(report) => {
                info!(
                    run_id = %state.run_id(),
                    result = report.result.as_str(),
                    detection_phase = ?report.detection_phase,
                    confidence = report.confidence,
                    "Phishing check completed"
                );
                emitter.emit(Event::VerdictReady {
                    report: report.clone(),
                });
                Ok(report)
            }
            Err(err) => {
                let failed_at = state.fail();
                error!(
                    run_id = %state.run_id(),
                    phase = %failed_at,
                    kind = err.kind().as_str(),
                    error = %err,
                    "Phishing check failed"
                );
                emitter.emit(Event::RunFailed {
                    phase: failed_at,
                    kind: err.kind().as_str().to_string(),
                    message: err.to_string(),
                    hint: err.user_hint(self.backend_url.as_deref()),
                });
                Err(err)
            }
        }
    }

    async fn drive(
        &self,
        state: &mut RunState,
        emitter: &OrderedEventEmitter,
    ) -> Result<VerdictReport> {
        state.begin()?;
        announce(emitter, Phase::Canonicalizing);
        let url = state
            .url()
            .ok_or_else(|| OrchestratorError::unexpected(Phase::Canonicalizing, "URL missing"))?;
        let url = require_url(url)
            .map_err(|e| OrchestratorError::Input(e.to_string()))?
            .to_string();
        let canonical = canonical_preview(&url);
        state.accept_url(url);
        complete(emitter, Phase::Canonicalizing, canonical);

        let fingerprint = self.fingerprint(state, emitter).await?;

        enter(state, emitter, Phase::PrefixExtracted)?;
        let prefix = fingerprint
            .ensure_prefix()
            .map_err(|e| OrchestratorError::FingerprintService {
                phase: Phase::PrefixExtracted,
                message: e.to_string(),
            })?
            .to_string();
        complete(emitter, Phase::PrefixExtracted, Some(prefix.clone()));

        enter(state, emitter, Phase::PrivacyDeletion)?;
        state.discard_url();
        emitter.emit(Event::UrlDiscarded);
        complete(emitter, Phase::PrivacyDeletion, None);

        enter(state, emitter, Phase::ReputationCheck)?;
        let lookup = self.strategy.reputation_features(&fingerprint);
        let verdict = self
            .detector
            .detect(&prefix, &lookup)
            .await
            .map_err(|e| OrchestratorError::detection(Phase::ReputationCheck, e))?;
        let decision = self.strategy.after_reputation(&verdict);
        complete(
            emitter,
            Phase::ReputationCheck,
            Some(format!("{} via {}", verdict.result.as_str(), verdict.method.as_str())),
        );

        match decision {
            ReputationDecision::Finish { detection_phase } => {
                info!(
                    run_id = %state.run_id(),
                    prefix = %prefix,
                    detection_phase = ?detection_phase,
                    "Reputation phase settled the run, skipping classification"
                );
                state.record_verdict(verdict, detection_phase);
                for skipped in PhaseStateMachine::short_circuited() {
                    emitter.emit(Event::PhaseSkipped { phase: skipped });
                }
                return self.decide(state, emitter);
            }
            ReputationDecision::Continue => state.record_verdict(verdict, None),
        }

        // The raw URL is gone by now, so the features come from the fingerprint response.
        enter(state, emitter, Phase::FeatureExtraction)?;
        let features = fingerprint.features.clone();
        emitter.emit(Event::FeaturesExtracted {
            features: features.clone(),
        });
        complete(emitter, Phase::FeatureExtraction, None);

        enter(state, emitter, Phase::MlClassification)?;
        let verdict = self
            .detector
            .detect(&prefix, &features)
            .await
            .map_err(|e| OrchestratorError::detection(Phase::MlClassification, e))?;
        let detected = verdict.result.is_phishing().then_some(DetectionPhase::Ml);
        state.record_verdict(verdict, detected);
        complete(emitter, Phase::MlClassification, None);

        self.decide(state, emitter)
    }

    async fn fingerprint(
        &self,
        state: &mut RunState,
        emitter: &OrderedEventEmitter,
    ) -> Result<Fingerprint> {
        enter(state, emitter, Phase::Fingerprinting)?;

        let url = state
            .url()
            .ok_or_else(|| OrchestratorError::unexpected(Phase::Fingerprinting, "URL missing"))?;
        let fingerprint = self
            .fingerprinter
            .fingerprint(url)
            .await
            .map_err(|e| OrchestratorError::fingerprint(Phase::Fingerprinting, e))?;

        state.set_fingerprint(fingerprint.clone());
        emitter.emit(Event::FingerprintGenerated {
            fingerprint: fingerprint.fingerprint.clone(),
            prefix: fingerprint.prefix.clone(),
        });
        complete(emitter, Phase::Fingerprinting, None);

        Ok(fingerprint)
    }

    fn decide(&self, state: &mut RunState, emitter: &OrderedEventEmitter) -> Result<VerdictReport> {
        enter(state, emitter, Phase::FinalDecision)?;

        let verdict = state
            .verdict()
            .ok_or_else(|| OrchestratorError::unexpected(Phase::FinalDecision, "no verdict recorded"))?;
        let report = report::assemble(state.run_id(), verdict, state.detection_phase());
        complete(emitter, Phase::FinalDecision, None);

        Ok(report)
    }
}

fn enter(state: &mut RunState, emitter: &OrderedEventEmitter, phase: Phase) -> Result<()> {
    state.advance(phase)?;
    debug!(run_id = %state.run_id(), phase = %phase, "Entering phase");
    announce(emitter, phase);
    Ok(())
}

fn announce(emitter: &OrderedEventEmitter, phase: Phase) {
    emitter.emit(Event::PhaseStarted {
        phase,
        description: phase.description().to_string(),
    });
}

fn complete(emitter: &OrderedEventEmitter, phase: Phase, detail: Option<String>) {
    emitter.emit(Event::PhaseCompleted { phase, detail });
}
