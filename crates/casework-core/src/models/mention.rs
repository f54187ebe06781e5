//! Mentions inside comment text.
//!
//! A mention addresses a half-open byte range `[start, end)` of the owning
//! comment's text. Ranges are checked when a comment is written
//! ([`validate_mentions`]); rendering ([`segment_text`]) never fails and
//! always reproduces the text exactly when its segments are concatenated.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::User;
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mention {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    /// Byte offset of the first mentioned byte (the `@`)
    pub start: usize,
    /// Byte offset one past the last mentioned byte
    pub end: usize,
}

impl Mention {
    pub fn new(user: &User, start: usize, end: usize) -> Self {
        Self {
            id: format!("mention-{}", Uuid::new_v4()),
            user_id: user.id.clone(),
            user_name: user.name.clone(),
            start,
            end,
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A renderable piece of comment text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    Text {
        text: String,
    },
    Mention {
        text: String,
        user_id: String,
        user_name: String,
    },
}

impl Segment {
    /// The slice of the original text this segment covers
    pub fn text(&self) -> &str {
        match self {
            Segment::Text { text } => text,
            Segment::Mention { text, .. } => text,
        }
    }

    pub fn is_mention(&self) -> bool {
        matches!(self, Segment::Mention { .. })
    }
}

/// Split `text` into plain and mention segments.
///
/// Mentions are applied in ascending `start` order. A mention that starts
/// inside an already emitted mention, lies outside the text, or does not
/// fall on character boundaries is left as plain text; an end past the
/// text is clamped.
pub fn segment_text(text: &str, mentions: &[Mention]) -> Vec<Segment> {
    if text.is_empty() {
        return Vec::new();
    }
    if mentions.is_empty() {
        return vec![Segment::Text {
            text: text.to_string(),
        }];
    }

    let mut sorted: Vec<&Mention> = mentions.iter().collect();
    sorted.sort_by_key(|m| m.start);

    let mut segments = Vec::with_capacity(sorted.len() * 2 + 1);
    let mut cursor = 0;

    for mention in sorted {
        let start = mention.start;
        let end = mention.end.min(text.len());
        if start < cursor || start >= end {
            continue;
        }
        if !text.is_char_boundary(start) || !text.is_char_boundary(end) {
            continue;
        }

        if start > cursor {
            segments.push(Segment::Text {
                text: text[cursor..start].to_string(),
            });
        }
        segments.push(Segment::Mention {
            text: text[start..end].to_string(),
            user_id: mention.user_id.clone(),
            user_name: mention.user_name.clone(),
        });
        cursor = end;
    }

    if cursor < text.len() {
        segments.push(Segment::Text {
            text: text[cursor..].to_string(),
        });
    }

    segments
}

/// Reject mention ranges that are reversed, out of bounds, split a
/// character, or overlap each other.
pub fn validate_mentions(text: &str, mentions: &[Mention]) -> CoreResult<()> {
    for mention in mentions {
        if mention.start > mention.end {
            return Err(CoreError::validation(format!(
                "mention of {} has start {} after end {}",
                mention.user_name, mention.start, mention.end
            )));
        }
        if mention.end > text.len() {
            return Err(CoreError::validation(format!(
                "mention of {} ends at {} past text length {}",
                mention.user_name,
                mention.end,
                text.len()
            )));
        }
        if !text.is_char_boundary(mention.start) || !text.is_char_boundary(mention.end) {
            return Err(CoreError::validation(format!(
                "mention of {} does not fall on character boundaries",
                mention.user_name
            )));
        }
    }

    let mut sorted: Vec<&Mention> = mentions.iter().collect();
    sorted.sort_by_key(|m| (m.start, m.end));
    for pair in sorted.windows(2) {
        if pair[0].end > pair[1].start {
            return Err(CoreError::validation(format!(
                "mentions of {} and {} overlap",
                pair[0].user_name, pair[1].user_name
            )));
        }
    }

    Ok(())
}

/// Find `@Name` tokens for users in `directory`.
///
/// A token must start the text or follow whitespace. When several names
/// match at the same position the longest one wins, so "@Det. Sarah
/// Johnson" is not cut short by a user called "Det. Sarah".
pub fn parse_mentions(text: &str, directory: &[User]) -> Vec<Mention> {
    let mut mentions = Vec::new();
    let mut resume_at = 0;

    for (idx, ch) in text.char_indices() {
        if ch != '@' || idx < resume_at {
            continue;
        }
        let starts_token = text[..idx]
            .chars()
            .next_back()
            .map_or(true, char::is_whitespace);
        if !starts_token {
            continue;
        }

        let rest = &text[idx + 1..];
        let best = directory
            .iter()
            .filter(|user| !user.name.is_empty() && rest.starts_with(user.name.as_str()))
            .max_by_key(|user| user.name.len());

        if let Some(user) = best {
            let end = idx + 1 + user.name.len();
            mentions.push(Mention::new(user, idx, end));
            resume_at = end;
        }
    }

    mentions
}

/// The partial name typed after an `@` that starts a token before `cursor`.
///
/// Returns `None` when the cursor is not inside a mention token, which is
/// when the picker should be hidden.
pub fn mention_query(text: &str, cursor: usize) -> Option<&str> {
    let cursor = floor_char_boundary(text, cursor);
    let before = &text[..cursor];
    let at = before.rfind('@')?;
    let starts_token = before[..at]
        .chars()
        .next_back()
        .map_or(true, char::is_whitespace);
    if !starts_token {
        return None;
    }
    Some(&before[at + 1..])
}

/// Users whose name contains `query`, ignoring case
pub fn suggest_mentions<'a>(query: &str, directory: &'a [User]) -> Vec<&'a User> {
    let query = query.to_lowercase();
    directory
        .iter()
        .filter(|user| user.name.to_lowercase().contains(&query))
        .collect()
}

/// Result of accepting a suggestion from the mention picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionInsertion {
    pub text: String,
    /// Cursor position after the inserted name and trailing space
    pub cursor: usize,
    pub mention: Mention,
}

/// Replace the partial `@token` before `cursor` with `@Name ` and return
/// the new text with the mention covering `@Name`.
pub fn insert_mention(text: &str, cursor: usize, user: &User) -> MentionInsertion {
    let cursor = floor_char_boundary(text, cursor);
    let at = text[..cursor].rfind('@').unwrap_or(cursor);

    let mut out = String::with_capacity(text.len() + user.name.len() + 2);
    out.push_str(&text[..at]);
    out.push('@');
    out.push_str(&user.name);
    let end = out.len();
    out.push(' ');
    let new_cursor = out.len();
    out.push_str(&text[cursor..]);

    MentionInsertion {
        text: out,
        cursor: new_cursor,
        mention: Mention::new(user, at, end),
    }
}

fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}
