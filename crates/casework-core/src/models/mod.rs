pub mod activity;
pub mod comment;
pub mod evidence_link;
pub mod mention;
pub mod suspect;
pub mod task;
pub mod team;
pub mod thread;
pub mod time_filter;
pub mod user;
pub mod witness;

pub use activity::{ActivityItem, ActivityType};
pub use comment::{Attachment, Comment};
pub use evidence_link::{EvidenceLink, EvidenceReliability, MatchStatus};
pub use mention::{Mention, MentionInsertion, Segment};
pub use suspect::{Demographics, RiskLevel, Suspect, SuspectStatus};
pub use task::{Priority, Task, TaskStatus};
pub use team::{Presence, TeamMember, TeamRole};
pub use thread::{ReplyPlacement, Thread, ThreadCategory};
pub use time_filter::Timeframe;
pub use user::User;
pub use witness::{Reliability, Witness, WitnessStatus};
