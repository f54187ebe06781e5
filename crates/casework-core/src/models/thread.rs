use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::comment::Comment;
use super::user::User;
use crate::constants::DEFAULT_THREAD_TITLE;
use crate::error::{CoreError, CoreResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadCategory {
    General,
    Evidence,
    Witness,
    Suspect,
    Timeline,
    Task,
}

impl ThreadCategory {
    pub const ALL: [ThreadCategory; 6] = [
        Self::General,
        Self::Evidence,
        Self::Witness,
        Self::Suspect,
        Self::Timeline,
        Self::Task,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Evidence => "evidence",
            Self::Witness => "witness",
            Self::Suspect => "suspect",
            Self::Timeline => "timeline",
            Self::Task => "task",
        }
    }

    /// Label used in the category picker
    pub fn label(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Evidence => "Evidence",
            Self::Witness => "Witnesses",
            Self::Suspect => "Suspects",
            Self::Timeline => "Timeline",
            Self::Task => "Tasks",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    pub id: String,
    pub case_id: String,
    pub title: String,
    pub content: String,
    pub author: User,
    pub created_at: u64,
    pub updated_at: u64,
    pub category: ThreadCategory,
    /// Id of the evidence, witness, timeline entry... this thread is about
    #[serde(default)]
    pub reference_id: Option<String>,
    #[serde(default)]
    pub is_sticky: bool,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Where a reply ended up in the comment tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyPlacement {
    pub comment_id: String,
    pub depth: usize,
    /// True when the reply was attached beside its target rather than below it
    pub flattened: bool,
}

impl Thread {
    pub fn new(
        case_id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        author: User,
        category: ThreadCategory,
        now: u64,
    ) -> Self {
        let title = title.into();
        let title = if title.trim().is_empty() {
            DEFAULT_THREAD_TITLE.to_string()
        } else {
            title.trim().to_string()
        };

        Self {
            id: format!("thread-{}", Uuid::new_v4()),
            case_id: case_id.into(),
            title,
            content: content.into(),
            author,
            created_at: now,
            updated_at: now,
            category,
            reference_id: None,
            is_sticky: false,
            is_pinned: false,
            view_count: 0,
            comments: Vec::new(),
        }
    }

    /// First `max_chars` characters of the body, with "..." when cut
    pub fn preview(&self, max_chars: usize) -> String {
        if self.content.chars().count() > max_chars {
            let cut: String = self.content.chars().take(max_chars).collect();
            format!("{}...", cut)
        } else {
            self.content.clone()
        }
    }

    /// Comments in the whole tree
    pub fn total_comment_count(&self) -> usize {
        self.comments
            .iter()
            .map(|c| 1 + c.descendant_count())
            .sum()
    }

    /// Index path from the top-level list down to the comment.
    /// The depth of the comment is `path.len() - 1`.
    pub fn locate_comment(&self, comment_id: &str) -> Option<Vec<usize>> {
        let mut stack: Vec<(Vec<usize>, &Comment)> = self
            .comments
            .iter()
            .enumerate()
            .map(|(i, c)| (vec![i], c))
            .collect();

        while let Some((path, comment)) = stack.pop() {
            if comment.id == comment_id {
                return Some(path);
            }
            for (i, reply) in comment.replies.iter().enumerate() {
                let mut child_path = path.clone();
                child_path.push(i);
                stack.push((child_path, reply));
            }
        }
        None
    }

    pub fn comment_at(&self, path: &[usize]) -> Option<&Comment> {
        let (first, rest) = path.split_first()?;
        let mut current = self.comments.get(*first)?;
        for &i in rest {
            current = current.replies.get(i)?;
        }
        Some(current)
    }

    pub fn comment_at_mut(&mut self, path: &[usize]) -> Option<&mut Comment> {
        let (first, rest) = path.split_first()?;
        let mut current = self.comments.get_mut(*first)?;
        for &i in rest {
            current = current.replies.get_mut(i)?;
        }
        Some(current)
    }

    pub fn find_comment(&self, comment_id: &str) -> Option<&Comment> {
        let path = self.locate_comment(comment_id)?;
        self.comment_at(&path)
    }

    pub fn comment_depth(&self, comment_id: &str) -> Option<usize> {
        self.locate_comment(comment_id).map(|path| path.len() - 1)
    }

    pub fn add_comment(&mut self, mut comment: Comment) -> ReplyPlacement {
        comment.parent_comment_id = None;
        let placement = ReplyPlacement {
            comment_id: comment.id.clone(),
            depth: 0,
            flattened: false,
        };
        self.updated_at = self.updated_at.max(comment.created_at);
        self.comments.push(comment);
        placement
    }

    /// Attach `comment` as a reply to `target_id`.
    ///
    /// A target shallower than `max_depth` gets the reply as a child. A
    /// target at (or, for legacy data, below) `max_depth` gets it as a
    /// sibling at the boundary level, with `in_reply_to` pointing back at
    /// the target, so the tree never grows past the bound.
    pub fn attach_reply(
        &mut self,
        target_id: &str,
        mut comment: Comment,
        max_depth: usize,
    ) -> CoreResult<ReplyPlacement> {
        let path = self
            .locate_comment(target_id)
            .ok_or_else(|| CoreError::not_found("comment", target_id))?;
        let target_depth = path.len() - 1;
        self.updated_at = self.updated_at.max(comment.created_at);

        if target_depth < max_depth {
            comment.parent_comment_id = Some(target_id.to_string());
            let placement = ReplyPlacement {
                comment_id: comment.id.clone(),
                depth: target_depth + 1,
                flattened: false,
            };
            let target = self
                .comment_at_mut(&path)
                .ok_or_else(|| CoreError::not_found("comment", target_id))?;
            target.replies.push(comment);
            return Ok(placement);
        }

        comment.in_reply_to = Some(target_id.to_string());
        let placement = ReplyPlacement {
            comment_id: comment.id.clone(),
            depth: max_depth,
            flattened: true,
        };

        // Parent of the boundary-level ancestor on the target's path
        let parent_path = &path[..max_depth];
        if parent_path.is_empty() {
            comment.parent_comment_id = None;
            self.comments.push(comment);
        } else {
            let parent = self
                .comment_at_mut(parent_path)
                .ok_or_else(|| CoreError::not_found("comment", target_id))?;
            comment.parent_comment_id = Some(parent.id.clone());
            parent.replies.push(comment);
        }
        Ok(placement)
    }
}
