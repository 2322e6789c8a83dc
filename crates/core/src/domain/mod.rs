mod features;
mod fingerprint;
mod phase;
mod report;
mod verdict;

pub use features::FeatureVector;
pub use fingerprint::Fingerprint;
pub use phase::{DetectionPhase, Phase};
pub use report::{RankedFeature, VerdictReport};
pub use verdict::{
    DetectionMethod, DetectionVerdict, FeatureContribution, FeatureContributions, Verdict,
};
