use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::mention::Mention;
use super::user::User;

/// File metadata attached to a comment. Never fetched or validated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    pub name: String,
    pub url: String,
    /// Media type, e.g. "application/pdf"
    pub media_type: String,
    /// Size in bytes
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub content: String,
    pub author: User,
    pub created_at: u64,
    pub updated_at: u64,
    #[serde(default)]
    pub is_edited: bool,
    /// Tree parent. None for top-level comments.
    #[serde(default)]
    pub parent_comment_id: Option<String>,
    /// Comment this one answers when it had to be attached next to its
    /// target instead of below it (target was at the maximum depth)
    #[serde(default)]
    pub in_reply_to: Option<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub mentions: Vec<Mention>,
    #[serde(default)]
    pub replies: Vec<Comment>,
}

impl Comment {
    pub fn new(author: User, content: impl Into<String>, now: u64) -> Self {
        Self {
            id: format!("comment-{}", Uuid::new_v4()),
            content: content.into(),
            author,
            created_at: now,
            updated_at: now,
            is_edited: false,
            parent_comment_id: None,
            in_reply_to: None,
            attachments: Vec::new(),
            mentions: Vec::new(),
            replies: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_mentions(mut self, mentions: Vec<Mention>) -> Self {
        self.mentions = mentions;
        self
    }

    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }

    /// Set the direct replies, pointing each one's parent id at this comment
    pub fn with_replies(mut self, mut replies: Vec<Comment>) -> Self {
        for reply in &mut replies {
            reply.parent_comment_id = Some(self.id.clone());
        }
        self.replies = replies;
        self
    }

    /// Number of comments below this one, at any depth
    pub fn descendant_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&Comment> = self.replies.iter().collect();
        while let Some(comment) = stack.pop() {
            count += 1;
            stack.extend(comment.replies.iter());
        }
        count
    }
}
