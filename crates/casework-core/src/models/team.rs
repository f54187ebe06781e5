use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamRole {
    LeadInvestigator,
    Investigator,
    ForensicAnalyst,
    Supervisor,
    Consultant,
}

impl TeamRole {
    pub const ALL: [TeamRole; 5] = [
        Self::LeadInvestigator,
        Self::Investigator,
        Self::ForensicAnalyst,
        Self::Supervisor,
        Self::Consultant,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LeadInvestigator => "lead_investigator",
            Self::Investigator => "investigator",
            Self::ForensicAnalyst => "forensic_analyst",
            Self::Supervisor => "supervisor",
            Self::Consultant => "consultant",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::LeadInvestigator => "Lead Investigator",
            Self::Investigator => "Investigator",
            Self::ForensicAnalyst => "Forensic Analyst",
            Self::Supervisor => "Supervisor",
            Self::Consultant => "Consultant",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    Online,
    Away,
    #[default]
    Offline,
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub role: TeamRole,
    #[serde(default)]
    pub avatar: String,
    pub department: String,
    pub badge: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub presence: Presence,
    pub last_active: u64,
    #[serde(default)]
    pub assigned_tasks: u32,
    #[serde(default)]
    pub completed_tasks: u32,
}

impl TeamMember {
    /// Completed share of assigned tasks, 0..=100
    pub fn completion_percent(&self) -> u32 {
        if self.assigned_tasks == 0 {
            return 0;
        }
        (self.completed_tasks.min(self.assigned_tasks) * 100) / self.assigned_tasks
    }
}
