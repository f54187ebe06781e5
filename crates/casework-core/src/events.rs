use crate::models::{ActivityItem, ReplyPlacement};

#[derive(Debug, Clone)]
pub enum CoreEvent {
    /// Fresh copy of the activity feed from the refresh task
    ActivitiesRefreshed(Vec<ActivityItem>),
    /// The refresh task could not load the feed
    RefreshFailed { message: String, retryable: bool },
    CommentAdded {
        thread_id: String,
        placement: ReplyPlacement,
    },
    /// Reply pressed on a comment at the maximum depth
    DeepReplyRequested { thread_id: String, comment_id: String },
    ThreadViewed { thread_id: String, view_count: u64 },
}
