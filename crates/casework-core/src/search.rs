//! Free-text search shared by every list pipeline.
//!
//! Semantics:
//! - A query is a single substring, not split into terms
//! - Matching is case-insensitive (full Unicode lowercase)
//! - Only an empty query matches everything; whitespace is part of the needle

/// A normalized search needle.
///
/// Built once per pipeline run so each record only pays for lowercasing
/// its own fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    raw: String,
    needle: String,
}

impl SearchQuery {
    /// # Examples
    /// - "Knife" -> needle "knife"
    /// - "" -> empty, matches all
    /// - "  " -> needle "  ", matches only text containing two spaces
    pub fn new(query: &str) -> Self {
        Self {
            raw: query.to_string(),
            needle: query.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Query text as typed
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Case-insensitive substring test
    pub fn matches(&self, text: &str) -> bool {
        self.is_empty() || text_contains(text, &self.needle)
    }

    /// True if any of the fields matches. `None` fields never match.
    pub fn matches_any<'a, I>(&self, fields: I) -> bool
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        if self.is_empty() {
            return true;
        }
        fields
            .into_iter()
            .flatten()
            .any(|field| text_contains(field, &self.needle))
    }

    /// Case-sensitive test, for fields such as phone numbers that are
    /// compared as typed
    pub fn matches_verbatim(&self, text: &str) -> bool {
        self.raw.is_empty() || text.contains(&self.raw)
    }
}

/// Check if `text` contains an already-lowercased `needle`
pub fn text_contains(text: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    text.to_lowercase().contains(needle)
}
