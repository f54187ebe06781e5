use serde::{Deserialize, Serialize};

/// How well a piece of evidence matches a suspect
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Match,
    PartialMatch,
    PossibleMatch,
    NoMatch,
    Inconclusive,
}

impl MatchStatus {
    /// Signed evidential weight before reliability and confidence
    pub fn weight(&self) -> f64 {
        match self {
            Self::Match => 0.8,
            Self::PartialMatch => 0.4,
            Self::PossibleMatch => 0.2,
            Self::NoMatch => -0.6,
            Self::Inconclusive => 0.0,
        }
    }

    pub fn is_supporting(&self) -> bool {
        matches!(self, Self::Match | Self::PartialMatch)
    }

    pub fn is_conflicting(&self) -> bool {
        matches!(self, Self::NoMatch | Self::Inconclusive)
    }
}

/// Reliability of the evidence item itself
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceReliability {
    High,
    Medium,
    Low,
    #[default]
    Unknown,
}

impl EvidenceReliability {
    pub fn factor(&self) -> f64 {
        match self {
            Self::High => 1.0,
            Self::Medium => 0.7,
            Self::Low => 0.4,
            Self::Unknown => 0.2,
        }
    }
}

/// Link between a suspect and one evidence item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceLink {
    pub evidence_id: String,
    /// physical, digital, biological, ...
    #[serde(default)]
    pub evidence_type: Option<String>,
    pub match_status: MatchStatus,
    #[serde(default)]
    pub reliability: EvidenceReliability,
    /// Examiner confidence in the match, 0-100
    #[serde(default)]
    pub confidence_pct: Option<u8>,
}

impl EvidenceLink {
    /// Signed weight after reliability and confidence; zero means no effect
    pub fn weight(&self) -> f64 {
        let mut weight = self.match_status.weight() * self.reliability.factor();
        if let Some(pct) = self.confidence_pct {
            weight *= f64::from(pct.min(100)) / 100.0;
        }
        weight
    }
}
