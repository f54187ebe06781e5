use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WitnessStatus {
    Cooperative,
    Reluctant,
    Uncooperative,
}

impl WitnessStatus {
    pub const ALL: [WitnessStatus; 3] = [Self::Cooperative, Self::Reluctant, Self::Uncooperative];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Cooperative => "Cooperative",
            Self::Reluctant => "Reluctant",
            Self::Uncooperative => "Uncooperative",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(s.trim()))
    }
}

/// Trust rating of a witness. Ordered High first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reliability {
    High,
    Medium,
    Low,
}

impl Reliability {
    pub const ALL: [Reliability; 3] = [Self::High, Self::Medium, Self::Low];

    /// Sort rank, 1 = most reliable
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

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Witness {
    pub id: String,
    pub name: String,
    /// Phone number or e-mail, matched verbatim by search
    pub contact: String,
    /// Relationship to the incident, e.g. "Bystander"
    pub relationship: String,
    pub status: WitnessStatus,
    pub reliability: Reliability,
    /// ISO date (YYYY-MM-DD), so lexical order is chronological
    pub last_contact: String,
    pub case_id: String,
    pub case_name: String,
    pub statements_count: u32,
    #[serde(default)]
    pub upcoming_interview: Option<String>,
}

impl Witness {
    pub fn has_upcoming_interview(&self) -> bool {
        self.upcoming_interview.is_some()
    }
}
