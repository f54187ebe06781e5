//! Filter and sort pipelines over the repository collections.
//!
//! Every pipeline applies its filters conjunctively over the full input,
//! keeps input order for records that tie, and returns borrowed records
//! so callers decide what to clone.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::models::{
    ActivityItem, ActivityType, Priority, Reliability, RiskLevel, Suspect, SuspectStatus, Task,
    TaskStatus, TeamMember, TeamRole, Thread, ThreadCategory, Timeframe, Witness, WitnessStatus,
};
use crate::search::SearchQuery;

/// Case-insensitive name order, falling back to the raw strings so the
/// order stays total
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

// ===== Threads =====

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(ThreadCategory),
}

impl CategoryFilter {
    /// "all" or one of the category names
    pub fn parse(s: &str) -> Option<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Some(Self::All);
        }
        ThreadCategory::parse(s).map(Self::Only)
    }

    pub fn matches(&self, category: ThreadCategory) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == category,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadFilter {
    pub category: CategoryFilter,
    /// Matched against title and body
    pub search: String,
}

impl ThreadFilter {
    pub fn new(category: CategoryFilter, search: impl Into<String>) -> Self {
        Self {
            category,
            search: search.into(),
        }
    }
}

pub fn filter_threads<'a>(threads: &'a [Thread], filter: &ThreadFilter) -> Vec<&'a Thread> {
    let query = SearchQuery::new(&filter.search);
    let result: Vec<&Thread> = threads
        .iter()
        .filter(|t| filter.category.matches(t.category))
        .filter(|t| query.matches_any([Some(t.title.as_str()), Some(t.content.as_str())]))
        .collect();

    tracing::debug!(
        total = threads.len(),
        matched = result.len(),
        "filtered thread list"
    );
    result
}

// ===== Witnesses =====

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitnessFilter {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub status: Option<WitnessStatus>,
    #[serde(default)]
    pub reliability: Option<Reliability>,
    #[serde(default)]
    pub case_id: Option<String>,
    #[serde(default)]
    pub has_upcoming_interview: bool,
}

impl WitnessFilter {
    pub fn matches(&self, witness: &Witness, query: &SearchQuery) -> bool {
        let search_ok = query.is_empty()
            || query.matches(&witness.name)
            || query.matches_verbatim(&witness.contact)
            || query.matches(&witness.case_name);

        search_ok
            && self.status.map_or(true, |s| witness.status == s)
            && self.reliability.map_or(true, |r| witness.reliability == r)
            && self
                .case_id
                .as_deref()
                .map_or(true, |id| witness.case_id == id)
            && (!self.has_upcoming_interview || witness.has_upcoming_interview())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WitnessSort {
    #[default]
    AsLoaded,
    NameAsc,
    NameDesc,
    Status,
    Reliability,
    LastContact,
}

impl WitnessSort {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "as_loaded" | "none" => Some(Self::AsLoaded),
            "name_asc" | "name" => Some(Self::NameAsc),
            "name_desc" => Some(Self::NameDesc),
            "status" => Some(Self::Status),
            "reliability" => Some(Self::Reliability),
            "last_contact" => Some(Self::LastContact),
            _ => None,
        }
    }
}

pub fn filter_witnesses<'a>(
    witnesses: &'a [Witness],
    filter: &WitnessFilter,
    sort: WitnessSort,
) -> Vec<&'a Witness> {
    let query = SearchQuery::new(&filter.search);
    let mut result: Vec<&Witness> = witnesses
        .iter()
        .filter(|w| filter.matches(w, &query))
        .collect();

    match sort {
        WitnessSort::AsLoaded => {}
        WitnessSort::NameAsc => result.sort_by(|a, b| compare_names(&a.name, &b.name)),
        WitnessSort::NameDesc => result.sort_by(|a, b| compare_names(&b.name, &a.name)),
        WitnessSort::Status => result.sort_by(|a, b| a.status.label().cmp(b.status.label())),
        WitnessSort::Reliability => result.sort_by_key(|w| w.reliability.rank()),
        WitnessSort::LastContact => result.sort_by(|a, b| b.last_contact.cmp(&a.last_contact)),
    }

    tracing::debug!(matched = result.len(), ?sort, "filtered witness list");
    result
}

/// Filtered witnesses as a pretty JSON array, the export file body
pub fn export_witnesses(witnesses: &[&Witness]) -> CoreResult<String> {
    Ok(serde_json::to_string_pretty(witnesses)?)
}

/// A named witness filter the user can load again later
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSearch {
    pub id: String,
    pub name: String,
    pub filter: WitnessFilter,
}

impl SavedSearch {
    pub fn new(name: &str, filter: WitnessFilter) -> CoreResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::validation("Saved search name cannot be empty"));
        }
        Ok(Self {
            id: format!("search-{}", Uuid::new_v4()),
            name: name.to_string(),
            filter,
        })
    }
}

// ===== Suspects =====

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspectFilter {
    pub search: String,
    pub case_id: Option<String>,
    pub status: Option<SuspectStatus>,
    /// Exact match on the recorded risk; unassessed suspects never match
    pub risk_level: Option<RiskLevel>,
}

impl SuspectFilter {
    pub fn matches(&self, suspect: &Suspect, query: &SearchQuery) -> bool {
        query.matches_any([
            Some(suspect.name.as_str()),
            suspect.notes.as_deref(),
            suspect.last_known_location.as_deref(),
            suspect.occupation.as_deref(),
        ]) && self
            .case_id
            .as_deref()
            .map_or(true, |id| suspect.case_id == id)
            && self.status.map_or(true, |s| suspect.status == s)
            && self
                .risk_level
                .map_or(true, |r| suspect.risk_level == Some(r))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuspectSort {
    #[default]
    NameAsc,
    NameDesc,
    Status,
    RiskHighToLow,
    CreatedDesc,
}

impl SuspectSort {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name_asc" | "name" => Some(Self::NameAsc),
            "name_desc" => Some(Self::NameDesc),
            "status" => Some(Self::Status),
            "risk_high_to_low" | "risk" => Some(Self::RiskHighToLow),
            "created_desc" | "recent" => Some(Self::CreatedDesc),
            _ => None,
        }
    }
}

pub fn sort_suspects(suspects: &mut [&Suspect], sort: SuspectSort) {
    match sort {
        SuspectSort::NameAsc => suspects.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SuspectSort::NameDesc => suspects.sort_by(|a, b| compare_names(&b.name, &a.name)),
        SuspectSort::Status => suspects.sort_by(|a, b| a.status.label().cmp(b.status.label())),
        SuspectSort::RiskHighToLow => suspects.sort_by_key(|s| s.effective_risk().rank()),
        SuspectSort::CreatedDesc => suspects.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
}

pub fn filter_suspects<'a>(
    suspects: &'a [Suspect],
    filter: &SuspectFilter,
    sort: SuspectSort,
) -> Vec<&'a Suspect> {
    let query = SearchQuery::new(&filter.search);
    let mut result: Vec<&Suspect> = suspects
        .iter()
        .filter(|s| filter.matches(s, &query))
        .collect();
    sort_suspects(&mut result, sort);

    tracing::debug!(matched = result.len(), ?sort, "filtered suspect list");
    result
}

// ===== Activity feed =====

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityFilter {
    pub activity_type: Option<ActivityType>,
    pub user_id: Option<String>,
    pub timeframe: Timeframe,
    /// Matched against content, user name and item name
    pub search: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityOrder {
    #[default]
    Newest,
    Oldest,
}

impl ActivityOrder {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" => Some(Self::Newest),
            "oldest" => Some(Self::Oldest),
            _ => None,
        }
    }
}

/// Filter the feed relative to the reference instant `now`
pub fn filter_activities<'a>(
    items: &'a [ActivityItem],
    filter: &ActivityFilter,
    order: ActivityOrder,
    now: u64,
) -> Vec<&'a ActivityItem> {
    let query = SearchQuery::new(&filter.search);
    let mut result: Vec<&ActivityItem> = items
        .iter()
        .filter(|a| filter.activity_type.map_or(true, |t| a.activity_type == t))
        .filter(|a| {
            filter
                .user_id
                .as_deref()
                .map_or(true, |id| a.user_id == id)
        })
        .filter(|a| filter.timeframe.matches(a.timestamp, now))
        .filter(|a| {
            query.matches_any([
                Some(a.content.as_str()),
                Some(a.user_name.as_str()),
                a.item_name.as_deref(),
            ])
        })
        .collect();

    match order {
        ActivityOrder::Newest => result.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
        ActivityOrder::Oldest => result.sort_by(|a, b| a.timestamp.cmp(&b.timestamp)),
    }

    tracing::debug!(matched = result.len(), ?order, "filtered activity feed");
    result
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserOption {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeOption {
    pub value: ActivityType,
    pub label: String,
}

/// Distinct users of the feed in first-seen order
pub fn activity_user_options(items: &[ActivityItem]) -> Vec<UserOption> {
    let mut options: Vec<UserOption> = Vec::new();
    for item in items {
        if !options.iter().any(|o| o.id == item.user_id) {
            options.push(UserOption {
                id: item.user_id.clone(),
                name: item.user_name.clone(),
            });
        }
    }
    options
}

/// Distinct activity types of the feed in first-seen order
pub fn activity_type_options(items: &[ActivityItem]) -> Vec<TypeOption> {
    let mut options: Vec<TypeOption> = Vec::new();
    for item in items {
        if !options.iter().any(|o| o.value == item.activity_type) {
            options.push(TypeOption {
                value: item.activity_type,
                label: item.activity_type.label(),
            });
        }
    }
    options
}

// ===== Tasks =====

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    /// Matched against title, description and tags
    pub search: String,
}

pub fn filter_tasks<'a>(tasks: &'a [Task], filter: &TaskFilter) -> Vec<&'a Task> {
    let query = SearchQuery::new(&filter.search);
    tasks
        .iter()
        .filter(|t| filter.status.map_or(true, |s| t.status == s))
        .filter(|t| filter.priority.map_or(true, |p| t.priority == p))
        .filter(|t| {
            query.is_empty()
                || query.matches(&t.title)
                || query.matches(&t.description)
                || t.tags.iter().any(|tag| query.matches(tag))
        })
        .collect()
}

// ===== Team =====

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamFilter {
    /// Matched against name, department and badge
    pub search: String,
    pub role: Option<TeamRole>,
}

pub fn filter_team<'a>(members: &'a [TeamMember], filter: &TeamFilter) -> Vec<&'a TeamMember> {
    let query = SearchQuery::new(&filter.search);
    members
        .iter()
        .filter(|m| {
            query.matches_any([
                Some(m.name.as_str()),
                Some(m.department.as_str()),
                Some(m.badge.as_str()),
            ])
        })
        .filter(|m| filter.role.map_or(true, |r| m.role == r))
        .collect()
}
