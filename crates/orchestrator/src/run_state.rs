use phishscope_core::{DetectionPhase, DetectionVerdict, Fingerprint, Phase};
use std::fmt;
use uuid::Uuid;

use crate::error::{OrchestratorError, Result};
use crate::state_machine::PhaseStateMachine;

/// Working record of a single run.
///
/// Each run builds its own value; nothing here is shared between runs, so
/// restarting a check means constructing a fresh `RunState`.
pub struct RunState {
    run_id: Uuid,
    phase: Phase,
    started: bool,
    url: Option<String>,
    fingerprint: Option<Fingerprint>,
    verdict: Option<DetectionVerdict>,
    detection_phase: Option<DetectionPhase>,
    visited: Vec<Phase>,
}

impl RunState {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            phase: Phase::Canonicalizing,
            started: false,
            url: Some(url.into()),
            fingerprint: None,
            verdict: None,
            detection_phase: None,
            visited: Vec::new(),
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Raw input, until the privacy-deletion phase drops it.
    /// Whether a run has already been driven on this state.
    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn fingerprint(&self) -> Option<&Fingerprint> {
        self.fingerprint.as_ref()
    }

    pub fn verdict(&self) -> Option<&DetectionVerdict> {
        self.verdict.as_ref()
    }

    pub fn detection_phase(&self) -> Option<DetectionPhase> {
        self.detection_phase
    }

    /// Phases entered so far, in order.
    pub fn visited(&self) -> &[Phase] {
        &self.visited
    }

    /// Enter the first phase. A state can be started once.
    pub fn begin(&mut self) -> Result<()> {
        if self.started {
            return Err(OrchestratorError::InvalidTransition {
                from: self.phase,
                to: Phase::Canonicalizing,
            });
        }
        self.started = true;
        self.visited.push(Phase::Canonicalizing);
        Ok(())
    }

    pub fn advance(&mut self, to: Phase) -> Result<()> {
        PhaseStateMachine::validate_transition(self.phase, to)?;
        self.phase = to;
        self.visited.push(to);
        Ok(())
    }

    /// Move to `Error`, returning the phase that failed.
    pub fn fail(&mut self) -> Phase {
        let failed = self.phase;
        if !self.is_terminal() {
            self.phase = Phase::Error;
            self.visited.push(Phase::Error);
        }
        failed
    }

    /// Replace the held URL with its validated form.
    pub(crate) fn accept_url(&mut self, url: String) {
        self.url = Some(url);
    }

    pub fn set_fingerprint(&mut self, fingerprint: Fingerprint) {
        self.fingerprint = Some(fingerprint);
    }

    /// Drop the raw URL. Returns whether it was still held.
    pub fn discard_url(&mut self) -> bool {
        self.url.take().is_some()
    }

    /// Store `verdict` as the run's only verdict.
    ///
    /// A later verdict replaces an earlier one, but a recorded detection
    /// phase is never overwritten.
    pub fn record_verdict(&mut self, verdict: DetectionVerdict, detected_at: Option<DetectionPhase>) {
        self.verdict = Some(verdict);
        if self.detection_phase.is_none() {
            self.detection_phase = detected_at;
        }
    }
}

impl fmt::Debug for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunState")
            .field("run_id", &self.run_id)
            .field("phase", &self.phase)
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("prefix", &self.fingerprint.as_ref().map(|fp| &fp.prefix))
            .field("verdict", &self.verdict.as_ref().map(|v| v.result))
            .field("detection_phase", &self.detection_phase)
            .finish()
    }
}
