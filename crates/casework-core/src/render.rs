//! View models for the thread list and the comment tree.
//!
//! The comment tree is walked iteratively with an explicit depth, so
//! rendering cost and output depth stay bounded by `max_depth` whatever
//! shape the stored tree has.

use std::collections::HashMap;

use serde::Serialize;

use crate::constants::{INDENT_PER_DEPTH_PX, THREAD_PREVIEW_CHARS};
use crate::models::mention::segment_text;
use crate::models::{Attachment, Comment, Segment, Thread, ThreadCategory};
use crate::time_format::format_time_ago;

/// What the reply button of a rendered comment does
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyAction {
    /// Opens an inline reply form below the comment
    InlineForm,
    /// The comment sits at the maximum depth; the board shows a notice
    DeepReply,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderedComment {
    pub comment_id: String,
    pub depth: usize,
    pub indent_px: u32,
    pub author_name: String,
    pub author_role: String,
    pub time_ago: String,
    pub is_edited: bool,
    /// Author of the comment this one answers when it was attached beside
    /// its target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_reply_to_author: Option<String>,
    pub segments: Vec<Segment>,
    pub attachments: Vec<Attachment>,
    pub reply_action: ReplyAction,
    pub reply_count: usize,
}

pub fn indent_for_depth(depth: usize) -> u32 {
    u32::try_from(depth)
        .unwrap_or(u32::MAX)
        .saturating_mul(INDENT_PER_DEPTH_PX)
}

pub fn reply_action_for_depth(depth: usize, max_depth: usize) -> ReplyAction {
    if depth < max_depth {
        ReplyAction::InlineForm
    } else {
        ReplyAction::DeepReply
    }
}

/// Render `comments` depth-first in display order.
///
/// Comments at `max_depth` are rendered, their children are not.
pub fn render_comment_tree(comments: &[Comment], max_depth: usize, now: u64) -> Vec<RenderedComment> {
    let authors = author_index(comments);
    let mut rendered = Vec::new();

    let mut stack: Vec<(&Comment, usize)> = comments.iter().rev().map(|c| (c, 0)).collect();
    while let Some((comment, depth)) = stack.pop() {
        rendered.push(render_comment(comment, depth, max_depth, now, &authors));
        if depth < max_depth {
            stack.extend(comment.replies.iter().rev().map(|r| (r, depth + 1)));
        }
    }

    rendered
}

fn render_comment(
    comment: &Comment,
    depth: usize,
    max_depth: usize,
    now: u64,
    authors: &HashMap<&str, &str>,
) -> RenderedComment {
    RenderedComment {
        comment_id: comment.id.clone(),
        depth,
        indent_px: indent_for_depth(depth),
        author_name: comment.author.name.clone(),
        author_role: comment.author.role.clone(),
        time_ago: format_time_ago(comment.created_at, now),
        is_edited: comment.is_edited,
        in_reply_to_author: comment
            .in_reply_to
            .as_deref()
            .and_then(|id| authors.get(id))
            .map(|name| name.to_string()),
        segments: segment_text(&comment.content, &comment.mentions),
        attachments: comment.attachments.clone(),
        reply_action: reply_action_for_depth(depth, max_depth),
        reply_count: comment.replies.len(),
    }
}

/// comment id -> author name over the whole tree
fn author_index(comments: &[Comment]) -> HashMap<&str, &str> {
    let mut index = HashMap::new();
    let mut stack: Vec<&Comment> = comments.iter().collect();
    while let Some(comment) = stack.pop() {
        index.insert(comment.id.as_str(), comment.author.name.as_str());
        stack.extend(comment.replies.iter());
    }
    index
}

/// One row of the thread list
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ThreadSummary {
    pub id: String,
    pub title: String,
    pub category: ThreadCategory,
    pub category_label: String,
    pub author_name: String,
    pub preview: String,
    pub time_ago: String,
    /// Top-level comments only
    pub comment_count: usize,
    pub view_count: u64,
    pub is_sticky: bool,
    pub is_pinned: bool,
}

impl ThreadSummary {
    pub fn from_thread(thread: &Thread, now: u64) -> Self {
        Self {
            id: thread.id.clone(),
            title: thread.title.clone(),
            category: thread.category,
            category_label: thread.category.label().to_string(),
            author_name: thread.author.name.clone(),
            preview: thread.preview(THREAD_PREVIEW_CHARS),
            time_ago: format_time_ago(thread.created_at, now),
            comment_count: thread.comments.len(),
            view_count: thread.view_count,
            is_sticky: thread.is_sticky,
            is_pinned: thread.is_pinned,
        }
    }
}

/// The opened thread: header, full body and the bounded comment tree
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderedThread {
    pub id: String,
    pub title: String,
    pub category: ThreadCategory,
    pub author_name: String,
    pub author_role: String,
    pub time_ago: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    pub view_count: u64,
    pub total_comments: usize,
    pub comments: Vec<RenderedComment>,
}

pub fn render_thread(thread: &Thread, max_depth: usize, now: u64) -> RenderedThread {
    RenderedThread {
        id: thread.id.clone(),
        title: thread.title.clone(),
        category: thread.category,
        author_name: thread.author.name.clone(),
        author_role: thread.author.role.clone(),
        time_ago: format_time_ago(thread.created_at, now),
        content: thread.content.clone(),
        reference_id: thread.reference_id.clone(),
        view_count: thread.view_count,
        total_comments: thread.total_comment_count(),
        comments: render_comment_tree(&thread.comments, max_depth, now),
    }
}
