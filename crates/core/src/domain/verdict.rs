use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::{CoreError, Result};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "typescript", derive(ts_rs::TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Phishing,
    Legitimate,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Phishing => "phishing",
            Self::Legitimate => "legitimate",
        }
    }

    pub fn is_phishing(&self) -> bool {
        matches!(self, Self::Phishing)
    }
}

/// Method label attached by the detection backend.
///
/// Unknown labels are kept verbatim rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DetectionMethod {
    Reputation,
    Ml,
    Hybrid,
    Other(String),
}

impl DetectionMethod {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Reputation => "reputation",
            Self::Ml => "ml",
            Self::Hybrid => "hybrid",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for DetectionMethod {
    fn from(label: String) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "reputation" => Self::Reputation,
            "ml" | "machine_learning" => Self::Ml,
            "hybrid" => Self::Hybrid,
            _ => Self::Other(label),
        }
    }
}

impl From<DetectionMethod> for String {
    fn from(method: DetectionMethod) -> Self {
        match method {
            DetectionMethod::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureContribution {
    pub name: String,
    pub score: f64,
}

/// Per-feature contribution scores in the order the backend listed them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureContributions(Vec<FeatureContribution>);

impl FeatureContributions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry, replacing the score of an existing name in place.
    pub fn insert(&mut self, name: impl Into<String>, score: f64) {
        let name = name.into();
        match self.0.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.score = score,
            None => self.0.push(FeatureContribution { name, score }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeatureContribution> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<N: Into<String>> FromIterator<(N, f64)> for FeatureContributions {
    fn from_iter<I: IntoIterator<Item = (N, f64)>>(iter: I) -> Self {
        let mut contributions = Self::new();
        for (name, score) in iter {
            contributions.insert(name, score);
        }
        contributions
    }
}

impl Serialize for FeatureContributions {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for c in &self.0 {
            map.serialize_entry(&c.name, &c.score)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FeatureContributions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(ContributionsVisitor)
    }
}

struct ContributionsVisitor;

impl<'de> Visitor<'de> for ContributionsVisitor {
    type Value = FeatureContributions;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of feature name to score")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
        let mut contributions = FeatureContributions::new();
        while let Some((name, score)) = access.next_entry::<String, f64>()? {
            contributions.insert(name, score);
        }
        Ok(contributions)
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(FeatureContributions::new())
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(FeatureContributions::new())
    }
}

/// Classification returned by `/detect`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionVerdict {
    pub result: Verdict,
    pub method: DetectionMethod,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub reasons: Vec<String>,
    #[serde(default)]
    pub feature_contributions: FeatureContributions,
    pub confidence: f64,
}

fn null_as_empty<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl DetectionVerdict {
    /// Phishing confirmed by a reputation-database hit.
    pub fn is_reputation_hit(&self) -> bool {
        self.result.is_phishing() && self.method == DetectionMethod::Reputation
    }

    /// Checks the numeric ranges the detection contract promises.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(CoreError::Contract(format!(
                "confidence {} outside [0, 1]",
                self.confidence
            )));
        }
        if let Some(bad) = self
            .feature_contributions
            .iter()
            .find(|c| !(-1.0..=1.0).contains(&c.score))
        {
            return Err(CoreError::Contract(format!(
                "contribution for {} is {} (outside [-1, 1])",
                bad.name, bad.score
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_contributions_keep_document_order() {
        let verdict: DetectionVerdict = serde_json::from_str(
            r#"{"result":"phishing","method":"ml","confidence":0.9,
                "feature_contributions":{"zeta":0.1,"alpha":0.5,"mid":0.3}}"#,
        )
        .unwrap();

        let names: Vec<&str> = verdict
            .feature_contributions
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_optional_fields_default() {
        let verdict: DetectionVerdict = serde_json::from_value(json!({
            "result": "legitimate",
            "method": "hybrid",
            "reasons": null,
            "confidence": 0.4
        }))
        .unwrap();

        assert!(verdict.reasons.is_empty());
        assert!(verdict.feature_contributions.is_empty());
        assert_eq!(verdict.method, DetectionMethod::Hybrid);
    }

    #[test]
    fn test_method_labels() {
        assert_eq!(
            DetectionMethod::from("machine_learning".to_string()),
            DetectionMethod::Ml
        );
        assert_eq!(
            DetectionMethod::from("Reputation".to_string()),
            DetectionMethod::Reputation
        );
        let other = DetectionMethod::from("heuristic".to_string());
        assert_eq!(other, DetectionMethod::Other("heuristic".to_string()));
        assert_eq!(serde_json::to_value(&other).unwrap(), json!("heuristic"));
    }

    #[test]
    fn test_reputation_hit() {
        let verdict = DetectionVerdict {
            result: Verdict::Phishing,
            method: DetectionMethod::Reputation,
            reasons: vec![],
            feature_contributions: FeatureContributions::new(),
            confidence: 1.0,
        };
        assert!(verdict.is_reputation_hit());

        let ml = DetectionVerdict {
            method: DetectionMethod::Ml,
            ..verdict
        };
        assert!(!ml.is_reputation_hit());
    }

    #[test]
    fn test_validate_ranges() {
        let mut verdict = DetectionVerdict {
            result: Verdict::Legitimate,
            method: DetectionMethod::Ml,
            reasons: vec![],
            feature_contributions: [("tls_valid", -0.4)].into_iter().collect(),
            confidence: 0.7,
        };
        assert!(verdict.validate().is_ok());

        verdict.confidence = 1.2;
        assert!(verdict.validate().is_err());

        verdict.confidence = 0.5;
        verdict.feature_contributions.insert("entropy", 1.5);
        assert!(verdict.validate().is_err());
    }
}
