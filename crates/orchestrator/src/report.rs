//! Final-decision payload assembly.

use std::cmp::Ordering;

use phishscope_core::{
    DetectionPhase, DetectionVerdict, FeatureContributions, RankedFeature, Verdict, VerdictReport,
};
use uuid::Uuid;

/// Number of contributing features shown with a verdict.
pub const TOP_FEATURE_LIMIT: usize = 5;

/// `0.873` -> `"87.3%"`.
///
/// Halves round away from zero, and a result of zero never carries a sign.
pub fn format_percent(value: f64) -> String {
    let percent = (value * 1000.0).round() / 10.0;
    let percent = if percent == 0.0 { 0.0 } else { percent };
    format!("{:.1}%", percent)
}

/// Highest-scoring contributions first, at most `limit` of them.
///
/// The sort is stable, so equal scores keep the order the backend sent.
pub fn rank_contributions(contributions: &FeatureContributions, limit: usize) -> Vec<RankedFeature> {
    let mut entries: Vec<_> = contributions.iter().collect();
    // Scores are validated finite; -0.0 and 0.0 compare equal.
    entries.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    entries
        .into_iter()
        .take(limit)
        .map(|c| RankedFeature {
            name: c.name.clone(),
            score: c.score,
            percent: format_percent(c.score),
        })
        .collect()
}

/// Build the display payload from the stored verdict.
///
/// The method label and explanation follow `detection_phase` when one was
/// recorded, whatever method the backend attached to the verdict.
pub fn assemble(
    run_id: Uuid,
    verdict: &DetectionVerdict,
    detection_phase: Option<DetectionPhase>,
) -> VerdictReport {
    VerdictReport {
        run_id,
        result: verdict.result,
        detection_phase,
        method_label: method_label(verdict, detection_phase),
        explanation: explanation(verdict.result, detection_phase).to_string(),
        reasons: verdict.reasons.clone(),
        top_features: rank_contributions(&verdict.feature_contributions, TOP_FEATURE_LIMIT),
        confidence: verdict.confidence,
        confidence_percent: format_percent(verdict.confidence),
    }
}

fn method_label(verdict: &DetectionVerdict, detection_phase: Option<DetectionPhase>) -> String {
    match detection_phase {
        Some(DetectionPhase::Reputation) => "REPUTATION".to_string(),
        Some(DetectionPhase::Ml) => "ML".to_string(),
        None => verdict.method.as_str().to_uppercase(),
    }
}

fn explanation(result: Verdict, detection_phase: Option<DetectionPhase>) -> &'static str {
    match (detection_phase, result) {
        (Some(DetectionPhase::Reputation), _) => {
            "The URL prefix matches a known phishing entry in the reputation database."
        }
        (Some(DetectionPhase::Ml), _) => {
            "No reputation match; the machine-learning classifier flagged the URL's features as phishing."
        }
        (None, Verdict::Legitimate) => {
            "No reputation match, and the classifier found no phishing indicators."
        }
        (None, Verdict::Phishing) => "Reported as phishing by the detection service.",
    }
}
