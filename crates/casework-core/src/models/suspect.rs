use serde::{Deserialize, Serialize};

use super::evidence_link::EvidenceLink;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuspectStatus {
    #[serde(rename = "Person of Interest")]
    PersonOfInterest,
    Witness,
    Suspect,
    Cleared,
    Arrested,
    Convicted,
    Unknown,
}

impl SuspectStatus {
    pub const ALL: [SuspectStatus; 7] = [
        Self::PersonOfInterest,
        Self::Witness,
        Self::Suspect,
        Self::Cleared,
        Self::Arrested,
        Self::Convicted,
        Self::Unknown,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::PersonOfInterest => "Person of Interest",
            Self::Witness => "Witness",
            Self::Suspect => "Suspect",
            Self::Cleared => "Cleared",
            Self::Arrested => "Arrested",
            Self::Convicted => "Convicted",
            Self::Unknown => "Unknown",
        }
    }

    /// Accepts the label or its snake_case form ("person_of_interest")
    pub fn parse(s: &str) -> Option<Self> {
        let wanted = s.trim().replace('_', " ");
        Self::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(&wanted))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [Self::High, Self::Medium, Self::Low];

    /// High=1, Medium=2, Low=3
    pub fn rank(&self) -> u8 {
        match self {
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.label().eq_ignore_ascii_case(s.trim()))
    }
}

/// Physical description and background. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demographics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hair_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eye_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifying_features: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub known_associates: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criminal_history: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suspect {
    pub id: String,
    pub case_id: String,
    #[serde(default)]
    pub case_name: Option<String>,
    pub name: String,
    pub status: SuspectStatus,
    #[serde(flatten)]
    pub demographics: Demographics,
    #[serde(default)]
    pub last_known_location: Option<String>,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub risk_level: Option<RiskLevel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evidence_links: Vec<EvidenceLink>,
    pub created_at: u64,
    pub updated_at: u64,
}

impl Suspect {
    /// Risk used for ranking; an unassessed suspect counts as Low
    pub fn effective_risk(&self) -> RiskLevel {
        self.risk_level.unwrap_or(RiskLevel::Low)
    }
}
