//! Application-wide constants
//!
//! Centralized location for limits and defaults that are used across
//! multiple modules.

/// Deepest comment level that still opens an inline reply form.
/// Top-level comments sit at depth 0, so three levels of nesting are shown.
pub const DEFAULT_MAX_REPLY_DEPTH: usize = 3;

/// Horizontal indentation per comment depth level, in pixels
pub const INDENT_PER_DEPTH_PX: u32 = 20;

/// Activity feed auto-refresh period
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 30;

/// Length of the body preview on the thread list
pub const THREAD_PREVIEW_CHARS: usize = 150;

/// File name of the persisted repository snapshot inside the data dir
pub const SNAPSHOT_FILE: &str = "casework.json";

/// Prior probability of involvement before any evidence is weighed
pub const DEFAULT_PRIOR_PROBABILITY: f64 = 0.5;

/// Case the seed discussion threads belong to
pub const SEED_CASE_ID: &str = "case-2025-001";

// Timeframe bucket thresholds, in whole elapsed hours
pub const TODAY_HOURS: i64 = 24;
pub const YESTERDAY_HOURS: i64 = 48;
pub const WEEK_HOURS: i64 = 24 * 7;

// Thread defaults
pub const DEFAULT_THREAD_TITLE: &str = "Untitled";
