use std::sync::Arc;

use parking_lot::RwLock;

use super::{CaseData, CaseRepository, SavedSearch};
use crate::error::{CoreError, CoreResult};
use crate::models::mention::validate_mentions;
use crate::models::{
    ActivityItem, Comment, ReplyPlacement, Suspect, Task, TaskStatus, TeamMember, Thread, User,
    Witness,
};

/// In-memory repository. Clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryRepository {
    data: Arc<RwLock<CaseData>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_data(data: CaseData) -> Self {
        Self {
            data: Arc::new(RwLock::new(data)),
        }
    }

    /// Repository filled with the built-in demo case
    pub fn seeded() -> CoreResult<Self> {
        Ok(Self::from_data(crate::seed::case_data()?))
    }

    fn with_thread_mut<R>(
        &self,
        thread_id: &str,
        f: impl FnOnce(&mut Thread) -> CoreResult<R>,
    ) -> CoreResult<R> {
        let mut data = self.data.write();
        let thread = data
            .threads
            .iter_mut()
            .find(|t| t.id == thread_id)
            .ok_or_else(|| CoreError::not_found("thread", thread_id))?;
        f(thread)
    }
}

fn validate_comment(comment: &Comment) -> CoreResult<()> {
    if comment.content.trim().is_empty() {
        return Err(CoreError::validation("Comment cannot be empty"));
    }
    validate_mentions(&comment.content, &comment.mentions)
}

impl CaseRepository for MemoryRepository {
    fn list_threads(&self, case_id: &str) -> CoreResult<Vec<Thread>> {
        let data = self.data.read();
        Ok(data
            .threads
            .iter()
            .filter(|t| t.case_id == case_id)
            .cloned()
            .collect())
    }

    fn get_thread(&self, thread_id: &str) -> CoreResult<Thread> {
        let data = self.data.read();
        data.threads
            .iter()
            .find(|t| t.id == thread_id)
            .cloned()
            .ok_or_else(|| CoreError::not_found("thread", thread_id))
    }

    fn create_thread(&self, thread: Thread) -> CoreResult<Thread> {
        if thread.content.trim().is_empty() {
            return Err(CoreError::validation("Thread body cannot be empty"));
        }
        let mut data = self.data.write();
        if data.threads.iter().any(|t| t.id == thread.id) {
            return Err(CoreError::validation(format!(
                "Thread {} already exists",
                thread.id
            )));
        }
        tracing::info!(thread_id = %thread.id, category = thread.category.as_str(), "created thread");
        data.threads.push(thread.clone());
        Ok(thread)
    }

    fn add_comment(
        &self,
        thread_id: &str,
        reply_to: Option<&str>,
        comment: Comment,
        max_depth: usize,
    ) -> CoreResult<ReplyPlacement> {
        if let Err(e) = validate_comment(&comment) {
            tracing::warn!(thread_id, error = %e, "rejected comment");
            return Err(e);
        }

        let placement = self.with_thread_mut(thread_id, |thread| match reply_to {
            None => Ok(thread.add_comment(comment)),
            Some(target) => thread.attach_reply(target, comment, max_depth),
        })?;

        tracing::info!(
            thread_id,
            comment_id = %placement.comment_id,
            depth = placement.depth,
            flattened = placement.flattened,
            "added comment"
        );
        Ok(placement)
    }

    fn record_view(&self, thread_id: &str) -> CoreResult<u64> {
        self.with_thread_mut(thread_id, |thread| {
            thread.view_count += 1;
            Ok(thread.view_count)
        })
    }

    fn list_users(&self) -> CoreResult<Vec<User>> {
        Ok(self.data.read().users.clone())
    }

    fn list_witnesses(&self) -> CoreResult<Vec<Witness>> {
        Ok(self.data.read().witnesses.clone())
    }

    fn list_suspects(&self) -> CoreResult<Vec<Suspect>> {
        Ok(self.data.read().suspects.clone())
    }

    fn list_activities(&self) -> CoreResult<Vec<ActivityItem>> {
        Ok(self.data.read().activities.clone())
    }

    fn record_activity(&self, item: ActivityItem) -> CoreResult<()> {
        let mut data = self.data.write();
        if !data.activities.iter().any(|a| a.id == item.id) {
            // Newest first
            let pos = data
                .activities
                .partition_point(|a| a.timestamp > item.timestamp);
            data.activities.insert(pos, item);
        }
        Ok(())
    }

    fn list_tasks(&self) -> CoreResult<Vec<Task>> {
        Ok(self.data.read().tasks.clone())
    }

    fn update_task_status(&self, task_id: &str, status: TaskStatus, now: u64) -> CoreResult<Task> {
        let mut data = self.data.write();
        let task = data
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| CoreError::not_found("task", task_id))?;
        task.set_status(status, now);
        tracing::info!(task_id, status = status.as_str(), "updated task status");
        Ok(task.clone())
    }

    fn list_team_members(&self) -> CoreResult<Vec<TeamMember>> {
        Ok(self.data.read().team_members.clone())
    }

    fn list_saved_searches(&self) -> CoreResult<Vec<SavedSearch>> {
        Ok(self.data.read().saved_searches.clone())
    }

    fn save_search(&self, search: SavedSearch) -> CoreResult<()> {
        let mut data = self.data.write();
        if data
            .saved_searches
            .iter()
            .any(|s| s.name.eq_ignore_ascii_case(&search.name))
        {
            return Err(CoreError::validation(format!(
                "A saved search named \"{}\" already exists",
                search.name
            )));
        }
        data.saved_searches.push(search);
        Ok(())
    }

    fn snapshot(&self) -> CoreResult<CaseData> {
        Ok(self.data.read().clone())
    }
}
