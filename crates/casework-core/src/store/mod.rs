pub mod memory;
pub mod snapshot;
pub mod views;

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::models::{
    ActivityItem, Comment, ReplyPlacement, Suspect, Task, TaskStatus, TeamMember, Thread, User,
    Witness,
};

pub use memory::MemoryRepository;
pub use snapshot::SnapshotStore;
pub use views::{
    filter_activities, filter_suspects, filter_tasks, filter_team, filter_threads,
    filter_witnesses, ActivityFilter, ActivityOrder, CategoryFilter, SavedSearch, SuspectFilter,
    SuspectSort, TaskFilter, TeamFilter, ThreadFilter, WitnessFilter, WitnessSort,
};

/// Everything a repository holds. Also the on-disk snapshot format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseData {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub threads: Vec<Thread>,
    #[serde(default)]
    pub witnesses: Vec<Witness>,
    #[serde(default)]
    pub suspects: Vec<Suspect>,
    #[serde(default)]
    pub activities: Vec<ActivityItem>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub team_members: Vec<TeamMember>,
    #[serde(default)]
    pub saved_searches: Vec<SavedSearch>,
}

/// Data access for the case views.
///
/// Implementations use interior mutability so one repository can be
/// shared between a view and the refresh task.
pub trait CaseRepository: Send + Sync {
    // ===== Discussions =====

    /// Threads of a case in stored order
    fn list_threads(&self, case_id: &str) -> CoreResult<Vec<Thread>>;

    fn get_thread(&self, thread_id: &str) -> CoreResult<Thread>;

    fn create_thread(&self, thread: Thread) -> CoreResult<Thread>;

    /// Append a comment. `reply_to` of `None` adds a top-level comment,
    /// otherwise the comment is attached as a reply bounded by `max_depth`.
    fn add_comment(
        &self,
        thread_id: &str,
        reply_to: Option<&str>,
        comment: Comment,
        max_depth: usize,
    ) -> CoreResult<ReplyPlacement>;

    /// Bump the view count, returning the new value
    fn record_view(&self, thread_id: &str) -> CoreResult<u64>;

    /// Mention directory
    fn list_users(&self) -> CoreResult<Vec<User>>;

    // ===== Case records =====

    fn list_witnesses(&self) -> CoreResult<Vec<Witness>>;

    fn list_suspects(&self) -> CoreResult<Vec<Suspect>>;

    fn list_activities(&self) -> CoreResult<Vec<ActivityItem>>;

    fn record_activity(&self, item: ActivityItem) -> CoreResult<()>;

    fn list_tasks(&self) -> CoreResult<Vec<Task>>;

    fn update_task_status(&self, task_id: &str, status: TaskStatus, now: u64) -> CoreResult<Task>;

    fn list_team_members(&self) -> CoreResult<Vec<TeamMember>>;

    // ===== Saved searches =====

    fn list_saved_searches(&self) -> CoreResult<Vec<SavedSearch>>;

    fn save_search(&self, search: SavedSearch) -> CoreResult<()>;

    /// Copy of everything, for persistence
    fn snapshot(&self) -> CoreResult<CaseData>;
}
