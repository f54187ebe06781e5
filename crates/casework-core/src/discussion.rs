//! Discussion board session for one case.
//!
//! Owns the thread list filter, the selected thread, the per-comment reply
//! forms and the deep-reply notice. All mutations go through the injected
//! [`CaseRepository`] synchronously.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult};
use crate::events::CoreEvent;
use crate::models::mention::parse_mentions;
use crate::models::{
    ActivityItem, ActivityType, Comment, ReplyPlacement, Thread, ThreadCategory, User,
};
use crate::render::{render_thread, RenderedThread, ThreadSummary};
use crate::store::views::{filter_threads, CategoryFilter, ThreadFilter};
use crate::store::CaseRepository;

/// State of the inline reply form under one comment
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplyForm {
    Collapsed,
    Open { draft: String },
}

/// Result of pressing Reply on a comment
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReplyToggle {
    FormOpened,
    FormClosed,
    /// The comment is at the maximum depth; no form, a notice instead
    DeepReply { notice: String },
}

/// Notice raised by a deep reply. Answering it posts a reply that is
/// attached beside the target comment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DeepReplyNotice {
    pub comment_id: String,
    pub message: String,
}

pub struct DiscussionBoard {
    repo: Arc<dyn CaseRepository>,
    case_id: String,
    author: User,
    max_reply_depth: usize,
    filter: ThreadFilter,
    selected_thread: Option<String>,
    /// Open forms only; a missing entry is a collapsed form
    reply_drafts: HashMap<String, String>,
    notice: Option<DeepReplyNotice>,
    events: Vec<CoreEvent>,
}

impl DiscussionBoard {
    pub fn new(
        repo: Arc<dyn CaseRepository>,
        case_id: impl Into<String>,
        author: User,
        config: &CoreConfig,
    ) -> Self {
        Self {
            repo,
            case_id: case_id.into(),
            author,
            max_reply_depth: config.max_reply_depth,
            filter: ThreadFilter::default(),
            selected_thread: None,
            reply_drafts: HashMap::new(),
            notice: None,
            events: Vec::new(),
        }
    }

    pub fn case_id(&self) -> &str {
        &self.case_id
    }

    pub fn author(&self) -> &User {
        &self.author
    }

    pub fn max_reply_depth(&self) -> usize {
        self.max_reply_depth
    }

    // ===== Thread list =====

    pub fn filter(&self) -> &ThreadFilter {
        &self.filter
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.filter.category = category;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
    }

    pub fn clear_filter(&mut self) {
        self.filter = ThreadFilter::default();
    }

    /// Filtered thread list for the case
    pub fn thread_list(&self, now: u64) -> CoreResult<Vec<ThreadSummary>> {
        let threads = self.repo.list_threads(&self.case_id)?;
        Ok(filter_threads(&threads, &self.filter)
            .into_iter()
            .map(|t| ThreadSummary::from_thread(t, now))
            .collect())
    }

    /// Number of threads in the case before filtering
    pub fn thread_count(&self) -> CoreResult<usize> {
        Ok(self.repo.list_threads(&self.case_id)?.len())
    }

    pub fn create_thread(
        &mut self,
        title: &str,
        content: &str,
        category: ThreadCategory,
        now: u64,
    ) -> CoreResult<Thread> {
        let thread = Thread::new(
            self.case_id.clone(),
            title,
            content.trim(),
            self.author.clone(),
            category,
            now,
        );
        self.repo.create_thread(thread)
    }

    // ===== Selected thread =====

    /// Select a thread of this case without counting a view
    pub fn select_thread(&mut self, thread_id: &str) -> CoreResult<Thread> {
        let thread = self.repo.get_thread(thread_id)?;
        if thread.case_id != self.case_id {
            return Err(CoreError::not_found("thread", thread_id));
        }

        self.selected_thread = Some(thread.id.clone());
        self.reply_drafts.clear();
        self.notice = None;
        Ok(thread)
    }

    /// Select a thread and count the view
    pub fn open_thread(&mut self, thread_id: &str) -> CoreResult<Thread> {
        let mut thread = self.select_thread(thread_id)?;
        let view_count = self.repo.record_view(thread_id)?;
        thread.view_count = view_count;

        self.events.push(CoreEvent::ThreadViewed {
            thread_id: thread.id.clone(),
            view_count,
        });
        Ok(thread)
    }

    pub fn close_thread(&mut self) {
        self.selected_thread = None;
        self.reply_drafts.clear();
        self.notice = None;
    }

    pub fn selected_thread(&self) -> Option<&str> {
        self.selected_thread.as_deref()
    }

    pub fn render_selected(&self, now: u64) -> CoreResult<Option<RenderedThread>> {
        match &self.selected_thread {
            Some(id) => {
                let thread = self.repo.get_thread(id)?;
                Ok(Some(render_thread(&thread, self.max_reply_depth, now)))
            }
            None => Ok(None),
        }
    }

    fn selected_id(&self) -> CoreResult<String> {
        self.selected_thread
            .clone()
            .ok_or_else(|| CoreError::validation("No thread is open"))
    }

    // ===== Comments =====

    /// Add a top-level comment to the open thread
    pub fn add_comment(&mut self, text: &str, now: u64) -> CoreResult<ReplyPlacement> {
        let thread_id = self.selected_id()?;
        self.post(&thread_id, None, text, now)
    }

    /// Press Reply on a comment of the open thread
    pub fn toggle_reply(&mut self, comment_id: &str) -> CoreResult<ReplyToggle> {
        let thread_id = self.selected_id()?;
        let thread = self.repo.get_thread(&thread_id)?;
        let depth = thread
            .comment_depth(comment_id)
            .ok_or_else(|| CoreError::not_found("comment", comment_id))?;

        if depth >= self.max_reply_depth {
            let message = format!(
                "Replies are limited to {} levels. Your reply will be added alongside this comment.",
                self.max_reply_depth
            );
            self.notice = Some(DeepReplyNotice {
                comment_id: comment_id.to_string(),
                message: message.clone(),
            });
            self.events.push(CoreEvent::DeepReplyRequested {
                thread_id,
                comment_id: comment_id.to_string(),
            });
            return Ok(ReplyToggle::DeepReply { notice: message });
        }

        if self.reply_drafts.remove(comment_id).is_some() {
            Ok(ReplyToggle::FormClosed)
        } else {
            self.reply_drafts.insert(comment_id.to_string(), String::new());
            Ok(ReplyToggle::FormOpened)
        }
    }

    pub fn reply_form(&self, comment_id: &str) -> ReplyForm {
        match self.reply_drafts.get(comment_id) {
            Some(draft) => ReplyForm::Open {
                draft: draft.clone(),
            },
            None => ReplyForm::Collapsed,
        }
    }

    pub fn update_draft(&mut self, comment_id: &str, text: impl Into<String>) -> CoreResult<()> {
        match self.reply_drafts.get_mut(comment_id) {
            Some(draft) => {
                *draft = text.into();
                Ok(())
            }
            None => Err(CoreError::validation("Reply form is not open")),
        }
    }

    /// Submit the open reply form. On failure the form stays open with its
    /// draft; on success it collapses.
    pub fn submit_reply(&mut self, comment_id: &str, now: u64) -> CoreResult<ReplyPlacement> {
        let thread_id = self.selected_id()?;
        let draft = self
            .reply_drafts
            .get(comment_id)
            .cloned()
            .ok_or_else(|| CoreError::validation("Reply form is not open"))?;

        let placement = self.post(&thread_id, Some(comment_id), &draft, now)?;
        self.reply_drafts.remove(comment_id);
        Ok(placement)
    }

    pub fn notice(&self) -> Option<&DeepReplyNotice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Answer the pending deep-reply notice
    pub fn submit_deep_reply(&mut self, text: &str, now: u64) -> CoreResult<ReplyPlacement> {
        let thread_id = self.selected_id()?;
        let target = self
            .notice
            .as_ref()
            .map(|n| n.comment_id.clone())
            .ok_or_else(|| CoreError::validation("No deep reply is pending"))?;

        let placement = self.post(&thread_id, Some(&target), text, now)?;
        self.notice = None;
        Ok(placement)
    }

    fn post(
        &mut self,
        thread_id: &str,
        reply_to: Option<&str>,
        text: &str,
        now: u64,
    ) -> CoreResult<ReplyPlacement> {
        let content = text.trim();
        if content.is_empty() {
            tracing::warn!(thread_id, "rejected empty comment");
            return Err(CoreError::validation("Comment cannot be empty"));
        }

        let directory = self.repo.list_users()?;
        let comment = Comment::new(self.author.clone(), content, now)
            .with_mentions(parse_mentions(content, &directory));
        let placement = self
            .repo
            .add_comment(thread_id, reply_to, comment, self.max_reply_depth)?;

        self.repo.record_activity(ActivityItem {
            id: format!("act-{}", placement.comment_id),
            activity_type: ActivityType::CommentAdded,
            user_id: self.author.id.clone(),
            user_name: self.author.name.clone(),
            user_avatar: self.author.avatar.clone(),
            timestamp: now,
            content: "Added comment on discussion".to_string(),
            item_id: Some(placement.comment_id.clone()),
            item_name: Some(content.chars().take(60).collect()),
            parent_item_id: Some(thread_id.to_string()),
            parent_item_type: Some("thread".to_string()),
        })?;

        self.events.push(CoreEvent::CommentAdded {
            thread_id: thread_id.to_string(),
            placement: placement.clone(),
        });
        Ok(placement)
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<CoreEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SEED_CASE_ID;
    use crate::render::ReplyAction;
    use crate::seed;
    use crate::store::MemoryRepository;

    const NOW: u64 = 1_743_865_067;

    fn board_with_depth(depth: usize) -> (DiscussionBoard, Arc<MemoryRepository>) {
        let repo = Arc::new(MemoryRepository::seeded().unwrap());
        let author = seed::users().remove(0);
        let config = CoreConfig::new("/tmp/unused").with_max_reply_depth(depth);
        let board = DiscussionBoard::new(repo.clone(), SEED_CASE_ID, author, &config);
        (board, repo)
    }

    fn board() -> (DiscussionBoard, Arc<MemoryRepository>) {
        board_with_depth(3)
    }

    #[test]
    fn test_thread_list_applies_filter() {
        let (mut board, _) = board();
        assert_eq!(board.thread_list(NOW).unwrap().len(), 3);

        board.set_category(CategoryFilter::Only(ThreadCategory::Evidence));
        let list = board.thread_list(NOW).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, "thread-001");

        board.set_search("nothing matches this");
        assert!(board.thread_list(NOW).unwrap().is_empty());

        board.clear_filter();
        assert_eq!(board.thread_list(NOW).unwrap().len(), 3);
        assert_eq!(board.thread_count().unwrap(), 3);
    }

    #[test]
    fn test_open_thread_bumps_view_count() {
        let (mut board, _) = board();
        let thread = board.open_thread("thread-001").unwrap();
        assert_eq!(thread.view_count, 16);
        assert_eq!(board.selected_thread(), Some("thread-001"));
        let events = board.drain_events();
        assert!(matches!(
            events.as_slice(),
            [CoreEvent::ThreadViewed { view_count: 16, .. }]
        ));
        assert!(board.drain_events().is_empty());
    }

    #[test]
    fn test_open_thread_of_other_case_counts_no_view() {
        let repo = Arc::new(MemoryRepository::seeded().unwrap());
        let author = seed::users().remove(0);
        let config = CoreConfig::new("/tmp/unused");
        let mut board = DiscussionBoard::new(repo.clone(), "case-other", author, &config);

        assert!(matches!(
            board.open_thread("thread-001"),
            Err(CoreError::NotFound { .. })
        ));
        assert_eq!(repo.get_thread("thread-001").unwrap().view_count, 15);
        assert!(board.selected_thread().is_none());
        assert!(board.drain_events().is_empty());
    }

    #[test]
    fn test_select_thread_counts_no_view() {
        let (mut board, repo) = board();
        let thread = board.select_thread("thread-002").unwrap();
        assert_eq!(thread.view_count, 8);
        assert_eq!(board.selected_thread(), Some("thread-002"));
        assert_eq!(repo.get_thread("thread-002").unwrap().view_count, 8);
        assert!(board.drain_events().is_empty());

        board.add_comment("Re-interviews confirmed", NOW).unwrap();
        assert_eq!(repo.get_thread("thread-002").unwrap().view_count, 8);
    }

    #[test]
    fn test_reply_form_state_machine() {
        let (mut board, _) = board();
        board.open_thread("thread-001").unwrap();

        assert_eq!(board.reply_form("comment-001"), ReplyForm::Collapsed);
        assert_eq!(board.toggle_reply("comment-001").unwrap(), ReplyToggle::FormOpened);
        assert_eq!(
            board.reply_form("comment-001"),
            ReplyForm::Open {
                draft: String::new()
            }
        );
        assert_eq!(board.toggle_reply("comment-001").unwrap(), ReplyToggle::FormClosed);
        assert_eq!(board.reply_form("comment-001"), ReplyForm::Collapsed);
        assert!(board.update_draft("comment-001", "late").is_err());
    }

    #[test]
    fn test_whitespace_reply_keeps_form_open() {
        let (mut board, _) = board();
        board.open_thread("thread-001").unwrap();
        board.toggle_reply("comment-001").unwrap();
        board.update_draft("comment-001", "   \t").unwrap();

        let err = board.submit_reply("comment-001", NOW).unwrap_err();
        assert!(matches!(err, CoreError::ValidationFailed(_)));
        assert_eq!(
            board.reply_form("comment-001"),
            ReplyForm::Open {
                draft: "   \t".to_string()
            }
        );
    }

    #[test]
    fn test_submit_reply_appends_child_and_collapses() {
        let (mut board, repo) = board();
        board.open_thread("thread-001").unwrap();
        board.toggle_reply("comment-002").unwrap();
        board
            .update_draft("comment-002", "Thanks @Emily Rodriguez, send them over")
            .unwrap();

        let placement = board.submit_reply("comment-002", NOW).unwrap();
        assert_eq!(placement.depth, 2);
        assert_eq!(board.reply_form("comment-002"), ReplyForm::Collapsed);

        let thread = repo.get_thread("thread-001").unwrap();
        let reply = thread.find_comment(&placement.comment_id).unwrap();
        assert_eq!(reply.parent_comment_id.as_deref(), Some("comment-002"));
        assert_eq!(reply.mentions.len(), 1);
        assert_eq!(reply.mentions[0].user_id, "user-003");

        let activities = repo.list_activities().unwrap();
        assert_eq!(activities[0].activity_type, ActivityType::CommentAdded);
        assert!(board
            .drain_events()
            .iter()
            .any(|e| matches!(e, CoreEvent::CommentAdded { .. })));
    }

    #[test]
    fn test_reply_at_max_depth_raises_notice_and_stays_flat() {
        let (mut board, repo) = board_with_depth(1);
        board.open_thread("thread-001").unwrap();

        // comment-002 sits at depth 1 == max
        match board.toggle_reply("comment-002").unwrap() {
            ReplyToggle::DeepReply { notice } => assert!(notice.contains("1 levels")),
            other => panic!("unexpected toggle: {:?}", other),
        }
        assert_eq!(board.reply_form("comment-002"), ReplyForm::Collapsed);
        assert_eq!(board.notice().map(|n| n.comment_id.as_str()), Some("comment-002"));
        assert!(board
            .drain_events()
            .iter()
            .any(|e| matches!(e, CoreEvent::DeepReplyRequested { .. })));

        let placement = board.submit_deep_reply("Agreed", NOW).unwrap();
        assert_eq!(placement.depth, 1);
        assert!(placement.flattened);
        assert!(board.notice().is_none());

        let thread = repo.get_thread("thread-001").unwrap();
        assert_eq!(thread.comment_depth(&placement.comment_id), Some(1));

        let rendered = board.render_selected(NOW).unwrap().unwrap();
        assert!(rendered.comments.iter().all(|c| c.depth <= 1));
        let flat = rendered
            .comments
            .iter()
            .find(|c| c.comment_id == placement.comment_id)
            .unwrap();
        assert_eq!(flat.reply_action, ReplyAction::DeepReply);
        assert_eq!(flat.in_reply_to_author.as_deref(), Some("Emily Rodriguez"));
    }

    #[test]
    fn test_top_level_comment_requires_open_thread() {
        let (mut board, _) = board();
        assert!(board.add_comment("hello", NOW).is_err());
        board.open_thread("thread-003").unwrap();
        let placement = board.add_comment("  Reviewed the sequence  ", NOW).unwrap();
        assert_eq!(placement.depth, 0);

        let rendered = board.render_selected(NOW).unwrap().unwrap();
        let added = rendered
            .comments
            .iter()
            .find(|c| c.comment_id == placement.comment_id)
            .unwrap();
        assert_eq!(added.segments[0].text(), "Reviewed the sequence");
        assert_eq!(added.time_ago, "just now");
    }

    #[test]
    fn test_toggle_unknown_comment() {
        let (mut board, _) = board();
        board.open_thread("thread-002").unwrap();
        assert!(matches!(
            board.toggle_reply("comment-999"),
            Err(CoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_create_thread_uses_board_case() {
        let (mut board, _) = board();
        let thread = board
            .create_thread("", "Canvass results are in", ThreadCategory::Task, NOW)
            .unwrap();
        assert_eq!(thread.title, "Untitled");
        assert_eq!(thread.case_id, SEED_CASE_ID);
        assert_eq!(board.thread_count().unwrap(), 4);
    }
}
