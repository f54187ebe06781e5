use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    EvidenceAdded,
    SuspectAdded,
    WitnessAdded,
    NoteAdded,
    EvidenceModified,
    TaskCreated,
    TaskCompleted,
    FileUploaded,
    CommentAdded,
    TeamMemberAdded,
    ReportGenerated,
    TimelineEventAdded,
}

impl ActivityType {
    pub const ALL: [ActivityType; 12] = [
        Self::EvidenceAdded,
        Self::SuspectAdded,
        Self::WitnessAdded,
        Self::NoteAdded,
        Self::EvidenceModified,
        Self::TaskCreated,
        Self::TaskCompleted,
        Self::FileUploaded,
        Self::CommentAdded,
        Self::TeamMemberAdded,
        Self::ReportGenerated,
        Self::TimelineEventAdded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EvidenceAdded => "evidence_added",
            Self::SuspectAdded => "suspect_added",
            Self::WitnessAdded => "witness_added",
            Self::NoteAdded => "note_added",
            Self::EvidenceModified => "evidence_modified",
            Self::TaskCreated => "task_created",
            Self::TaskCompleted => "task_completed",
            Self::FileUploaded => "file_uploaded",
            Self::CommentAdded => "comment_added",
            Self::TeamMemberAdded => "team_member_added",
            Self::ReportGenerated => "report_generated",
            Self::TimelineEventAdded => "timeline_event_added",
        }
    }

    /// "evidence_added" -> "Evidence Added"
    pub fn label(&self) -> String {
        self.as_str()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityItem {
    pub id: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub user_id: String,
    pub user_name: String,
    #[serde(default)]
    pub user_avatar: String,
    pub timestamp: u64,
    pub content: String,
    #[serde(default)]
    pub item_id: Option<String>,
    #[serde(default)]
    pub item_name: Option<String>,
    #[serde(default)]
    pub parent_item_id: Option<String>,
    #[serde(default)]
    pub parent_item_type: Option<String>,
}
