use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::domain::{DetectionPhase, Verdict};

/// One entry of the top-contributing-features list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(ts_rs::TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct RankedFeature {
    pub name: String,
    pub score: f64,
    /// Score as a percentage with one decimal, e.g. `"42.0%"`.
    pub percent: String,
}

/// Display payload emitted when a run reaches its final decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(ts_rs::TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct VerdictReport {
    pub run_id: Uuid,
    pub result: Verdict,
    /// Phase that confirmed phishing; `None` for legitimate results.
    pub detection_phase: Option<DetectionPhase>,
    pub method_label: String,
    pub explanation: String,
    pub reasons: Vec<String>,
    pub top_features: Vec<RankedFeature>,
    pub confidence: f64,
    pub confidence_percent: String,
}

impl VerdictReport {
    pub fn headline(&self) -> &'static str {
        match self.result {
            Verdict::Phishing => "PHISHING DETECTED",
            Verdict::Legitimate => "WEBSITE IS LEGITIMATE",
        }
    }
}

impl fmt::Display for VerdictReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.headline())?;
        writeln!(f)?;
        writeln!(f, "Detection Method: {}", self.method_label)?;
        writeln!(f, "{}", self.explanation)?;

        if !self.reasons.is_empty() {
            writeln!(f)?;
            writeln!(f, "Reasons:")?;
            for reason in &self.reasons {
                writeln!(f, "• {}", reason)?;
            }
        }

        if !self.top_features.is_empty() {
            writeln!(f)?;
            writeln!(f, "Top contributing features:")?;
            for feature in &self.top_features {
                writeln!(f, "• {} – {}", feature.name, feature.percent)?;
            }
        }

        writeln!(f)?;
        write!(f, "Confidence: {}", self.confidence_percent)
    }
}
