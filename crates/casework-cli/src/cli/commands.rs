use std::sync::Arc;

use casework_core::analysis::suspect_probabilities;
use casework_core::auth::{AccessRole, RouteGuard, Session};
use casework_core::constants::{DEFAULT_PRIOR_PROBABILITY, SEED_CASE_ID};
use casework_core::discussion::{ReplyForm, ReplyToggle};
use casework_core::models::{
    ActivityItem, ActivityType, Priority, Reliability, RiskLevel, SuspectStatus, Task, TaskStatus,
    TeamMember, TeamRole, Timeframe, User, WitnessStatus,
};
use casework_core::store::views::{
    activity_type_options, activity_user_options, export_witnesses,
};
use casework_core::store::{
    filter_activities, filter_suspects, filter_tasks, filter_team, filter_witnesses,
    ActivityFilter, ActivityOrder, CategoryFilter, SavedSearch, SuspectFilter, SuspectSort,
    TaskFilter, TeamFilter, WitnessFilter, WitnessSort,
};
use casework_core::{
    CaseRepository, CoreConfig, CoreError, CoreResult, DiscussionBoard, MemoryRepository,
    SnapshotStore,
};
use serde::Serialize;
use serde_json::{json, Value};

use super::protocol::{CliCommand, Response};

/// Repository, snapshot file and signed-in user for one CLI invocation
pub struct Workspace {
    config: CoreConfig,
    store: SnapshotStore,
    repo: Arc<MemoryRepository>,
    session: Session,
    author: User,
}

#[derive(Serialize)]
struct TaskRow<'a> {
    #[serde(flatten)]
    task: &'a Task,
    overdue: bool,
}

#[derive(Serialize)]
struct TeamRow<'a> {
    #[serde(flatten)]
    member: &'a TeamMember,
    completion_percent: u32,
}

impl Workspace {
    /// Load the snapshot under `config.data_dir` (seed data when absent)
    /// and sign in as the configured user, or the first user in the
    /// directory.
    pub fn open(config: CoreConfig, role: AccessRole) -> CoreResult<Self> {
        let store = SnapshotStore::new(&config.data_dir);
        let repo = Arc::new(store.open_repository()?);

        let users = repo.list_users()?;
        let author = match config.current_user_id.as_deref() {
            Some(id) => users
                .into_iter()
                .find(|u| u.id == id)
                .ok_or_else(|| CoreError::not_found("user", id))?,
            None => users
                .into_iter()
                .next()
                .ok_or_else(|| CoreError::validation("The user directory is empty"))?,
        };
        let session = Session::signed_in(author.id.clone(), author.name.clone(), role);

        Ok(Self {
            config,
            store,
            repo,
            session,
            author,
        })
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn author(&self) -> &User {
        &self.author
    }

    pub fn repository(&self) -> Arc<dyn CaseRepository> {
        self.repo.clone()
    }

    /// Check access, run the command and write the snapshot back when it
    /// changed anything
    pub fn execute(&mut self, command: &CliCommand, now: u64) -> Response {
        match self.run(command, now) {
            Ok(value) => Response::success(value),
            Err(e) => {
                tracing::warn!(error = %e, ?command, "command failed");
                Response::from(e)
            }
        }
    }

    /// Route guard plus the command's own permission
    pub fn authorize(&self, command: &CliCommand) -> CoreResult<()> {
        RouteGuard::check(&self.session, &command.route(SEED_CASE_ID))?;
        let permission = command.required_permission();
        if !self.session.has_permission(permission) {
            return Err(CoreError::Unauthorized(format!(
                "missing permission {}",
                permission
            )));
        }
        Ok(())
    }

    fn run(&mut self, command: &CliCommand, now: u64) -> CoreResult<Value> {
        self.authorize(command)?;

        let value = match command {
            CliCommand::Seed => self.seed()?,
            CliCommand::ListThreads {
                case_id,
                category,
                search,
            } => self.list_threads(case_id, category.as_deref(), search.as_deref(), now)?,
            CliCommand::ShowThread { thread_id } => self.show_thread(thread_id, now)?,
            CliCommand::AddComment {
                thread_id,
                reply_to,
                content,
            } => self.add_comment(thread_id, reply_to.as_deref(), content, now)?,
            CliCommand::ReplyForm {
                thread_id,
                comment_id,
            } => self.reply_form(thread_id, comment_id)?,
            CliCommand::ListWitnesses { .. } => self.list_witnesses(command)?,
            CliCommand::ListSuspects {
                search,
                status,
                risk,
                case_id,
                sort,
            } => {
                let filter = SuspectFilter {
                    search: search.clone().unwrap_or_default(),
                    case_id: case_id.clone(),
                    status: parse_opt(status, "suspect status", SuspectStatus::parse)?,
                    risk_level: parse_opt(risk, "risk level", RiskLevel::parse)?,
                };
                let sort = parse_opt(sort, "suspect sort", SuspectSort::parse)?.unwrap_or_default();
                let suspects = self.repo.list_suspects()?;
                to_value(&filter_suspects(&suspects, &filter, sort))?
            }
            CliCommand::SuspectProbabilities { case_id, prior } => {
                self.suspect_probabilities(case_id, prior)?
            }
            CliCommand::ListActivity { .. } => {
                let (filter, order) = activity_query(command)?;
                activity_view(&self.repo.list_activities()?, &filter, order, now)?
            }
            CliCommand::ListTasks {
                status,
                priority,
                search,
            } => {
                let filter = TaskFilter {
                    status: parse_opt(status, "task status", TaskStatus::parse)?,
                    priority: parse_opt(priority, "priority", Priority::parse)?,
                    search: search.clone().unwrap_or_default(),
                };
                let tasks = self.repo.list_tasks()?;
                let rows: Vec<TaskRow> = filter_tasks(&tasks, &filter)
                    .into_iter()
                    .map(|task| TaskRow {
                        task,
                        overdue: task.is_overdue(now),
                    })
                    .collect();
                to_value(&rows)?
            }
            CliCommand::SetTaskStatus { task_id, status } => {
                self.set_task_status(task_id, status, now)?
            }
            CliCommand::ListTeam { search, role } => {
                let filter = TeamFilter {
                    search: search.clone().unwrap_or_default(),
                    role: parse_opt(role, "team role", TeamRole::parse)?,
                };
                let members = self.repo.list_team_members()?;
                let rows: Vec<TeamRow> = filter_team(&members, &filter)
                    .into_iter()
                    .map(|member| TeamRow {
                        member,
                        completion_percent: member.completion_percent(),
                    })
                    .collect();
                to_value(&rows)?
            }
        };

        if command.mutates() {
            self.store.persist(self.repo.as_ref())?;
        }
        Ok(value)
    }

    fn suspect_probabilities(&self, case_id: &str, prior: &Option<String>) -> CoreResult<Value> {
        let prior = parse_opt(prior, "prior probability", |raw| raw.trim().parse::<f64>().ok())?
            .unwrap_or(DEFAULT_PRIOR_PROBABILITY);
        let suspects: Vec<_> = self
            .repo
            .list_suspects()?
            .into_iter()
            .filter(|suspect| suspect.case_id == case_id)
            .collect();
        if suspects.is_empty() {
            return Err(CoreError::not_found("case suspects", case_id));
        }

        let probabilities = suspect_probabilities(&suspects, prior)?;
        Ok(json!({
            "case_id": case_id,
            "prior": prior,
            "probabilities": probabilities,
        }))
    }

    fn seed(&mut self) -> CoreResult<Value> {
        self.repo = Arc::new(MemoryRepository::seeded()?);
        let data = self.repo.snapshot()?;
        tracing::info!(path = %self.store.path().display(), "reset snapshot to seed data");
        Ok(json!({
            "path": self.store.path().display().to_string(),
            "threads": data.threads.len(),
            "witnesses": data.witnesses.len(),
            "suspects": data.suspects.len(),
            "activities": data.activities.len(),
            "tasks": data.tasks.len(),
            "team_members": data.team_members.len(),
        }))
    }

    fn board(&self, case_id: &str) -> DiscussionBoard {
        DiscussionBoard::new(self.repository(), case_id, self.author.clone(), &self.config)
    }

    /// Board with `thread_id` selected; `count_view` is set only when the
    /// thread is actually shown
    fn board_for_thread(&self, thread_id: &str, count_view: bool) -> CoreResult<DiscussionBoard> {
        let thread = self.repo.get_thread(thread_id)?;
        let mut board = self.board(&thread.case_id);
        if count_view {
            board.open_thread(thread_id)?;
        } else {
            board.select_thread(thread_id)?;
        }
        Ok(board)
    }

    fn list_threads(
        &self,
        case_id: &str,
        category: Option<&str>,
        search: Option<&str>,
        now: u64,
    ) -> CoreResult<Value> {
        let mut board = self.board(case_id);
        if let Some(category) = category {
            let filter = CategoryFilter::parse(category).ok_or_else(|| {
                CoreError::validation(format!("Unknown thread category: {}", category))
            })?;
            board.set_category(filter);
        }
        if let Some(search) = search {
            board.set_search(search);
        }
        to_value(&board.thread_list(now)?)
    }

    fn show_thread(&self, thread_id: &str, now: u64) -> CoreResult<Value> {
        let board = self.board_for_thread(thread_id, true)?;
        to_value(&board.render_selected(now)?)
    }

    fn add_comment(
        &self,
        thread_id: &str,
        reply_to: Option<&str>,
        content: &str,
        now: u64,
    ) -> CoreResult<Value> {
        let mut board = self.board_for_thread(thread_id, false)?;

        let placement = match reply_to {
            None => board.add_comment(content, now)?,
            Some(target) => match board.toggle_reply(target)? {
                ReplyToggle::DeepReply { .. } => board.submit_deep_reply(content, now)?,
                _ => {
                    if board.reply_form(target) == ReplyForm::Collapsed {
                        board.toggle_reply(target)?;
                    }
                    board.update_draft(target, content)?;
                    board.submit_reply(target, now)?
                }
            },
        };

        Ok(json!({
            "thread_id": thread_id,
            "comment_id": placement.comment_id,
            "depth": placement.depth,
            "flattened": placement.flattened,
        }))
    }

    fn reply_form(&self, thread_id: &str, comment_id: &str) -> CoreResult<Value> {
        let mut board = self.board_for_thread(thread_id, false)?;
        let toggle = board.toggle_reply(comment_id)?;
        to_value(&toggle)
    }

    fn list_witnesses(&self, command: &CliCommand) -> CoreResult<Value> {
        let CliCommand::ListWitnesses {
            search,
            status,
            reliability,
            case_id,
            upcoming_interview,
            sort,
            saved,
            save_as,
            export,
        } = command
        else {
            return Err(CoreError::validation("Not a witness listing"));
        };

        let filter = match saved {
            Some(name) => self
                .repo
                .list_saved_searches()?
                .into_iter()
                .find(|s| s.name.eq_ignore_ascii_case(name.trim()))
                .map(|s| s.filter)
                .ok_or_else(|| CoreError::not_found("saved search", name.clone()))?,
            None => WitnessFilter {
                search: search.clone().unwrap_or_default(),
                status: parse_opt(status, "witness status", WitnessStatus::parse)?,
                reliability: parse_opt(reliability, "reliability", Reliability::parse)?,
                case_id: case_id.clone(),
                has_upcoming_interview: *upcoming_interview,
            },
        };
        let sort = parse_opt(sort, "witness sort", WitnessSort::parse)?.unwrap_or_default();

        if let Some(name) = save_as {
            self.repo.save_search(SavedSearch::new(name, filter.clone())?)?;
        }

        let witnesses = self.repo.list_witnesses()?;
        let matched = filter_witnesses(&witnesses, &filter, sort);

        match export {
            Some(path) => {
                std::fs::write(path, export_witnesses(&matched)?)?;
                Ok(json!({
                    "exported": path.display().to_string(),
                    "count": matched.len(),
                }))
            }
            None => to_value(&matched),
        }
    }

    fn set_task_status(&self, task_id: &str, status: &str, now: u64) -> CoreResult<Value> {
        let status = TaskStatus::parse(status)
            .ok_or_else(|| CoreError::validation(format!("Unknown task status: {}", status)))?;
        let task = self.repo.update_task_status(task_id, status, now)?;

        if status == TaskStatus::Completed {
            self.repo.record_activity(ActivityItem {
                id: format!("act-{}-{}", task.id, now),
                activity_type: ActivityType::TaskCompleted,
                user_id: self.author.id.clone(),
                user_name: self.author.name.clone(),
                user_avatar: self.author.avatar.clone(),
                timestamp: now,
                content: "Completed task".to_string(),
                item_id: Some(task.id.clone()),
                item_name: Some(task.title.clone()),
                parent_item_id: None,
                parent_item_type: None,
            })?;
        }
        to_value(&task)
    }
}

/// Feed filter and order from an `activity` command
pub fn activity_query(command: &CliCommand) -> CoreResult<(ActivityFilter, ActivityOrder)> {
    let CliCommand::ListActivity {
        activity_type,
        user_id,
        timeframe,
        search,
        order,
    } = command
    else {
        return Err(CoreError::validation("Not an activity listing"));
    };

    let filter = ActivityFilter {
        activity_type: parse_opt(activity_type, "activity type", ActivityType::parse)?,
        user_id: user_id.clone(),
        timeframe: parse_opt(timeframe, "timeframe", Timeframe::parse)?.unwrap_or_default(),
        search: search.clone().unwrap_or_default(),
    };
    let order = parse_opt(order, "order", ActivityOrder::parse)?.unwrap_or_default();
    Ok((filter, order))
}

/// Filtered feed plus the user and type choices for the filter menus
pub fn activity_view(
    items: &[ActivityItem],
    filter: &ActivityFilter,
    order: ActivityOrder,
    now: u64,
) -> CoreResult<Value> {
    Ok(json!({
        "items": to_value(&filter_activities(items, filter, order, now))?,
        "users": to_value(&activity_user_options(items))?,
        "types": to_value(&activity_type_options(items))?,
    }))
}

fn parse_opt<T>(
    value: &Option<String>,
    what: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> CoreResult<Option<T>> {
    match value.as_deref() {
        None => Ok(None),
        Some(raw) => parse(raw)
            .map(Some)
            .ok_or_else(|| CoreError::validation(format!("Unknown {}: {}", what, raw))),
    }
}

fn to_value<T: Serialize + ?Sized>(value: &T) -> CoreResult<Value> {
    Ok(serde_json::to_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use casework_core::time_format::parse_iso;

    fn now() -> u64 {
        parse_iso("2025-04-05T14:57:47").unwrap()
    }

    fn workspace(dir: &tempfile::TempDir, role: AccessRole) -> Workspace {
        Workspace::open(CoreConfig::new(dir.path()), role).unwrap()
    }

    fn threads_command(category: Option<&str>, search: Option<&str>) -> CliCommand {
        CliCommand::ListThreads {
            case_id: SEED_CASE_ID.to_string(),
            category: category.map(String::from),
            search: search.map(String::from),
        }
    }

    #[test]
    fn test_defaults_to_first_user() {
        let dir = tempfile::tempdir().unwrap();
        let ws = workspace(&dir, AccessRole::Investigator);
        assert_eq!(ws.author().id, "user-001");
        assert!(ws.session().is_authenticated());
    }

    #[test]
    fn test_unknown_current_user() {
        let dir = tempfile::tempdir().unwrap();
        let config = CoreConfig::new(dir.path()).with_current_user("user-999");
        assert!(matches!(
            Workspace::open(config, AccessRole::Viewer),
            Err(CoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_list_threads_by_category() {
        let dir = tempfile::tempdir().unwrap();
        let mut ws = workspace(&dir, AccessRole::Viewer);

        let response = ws.execute(&threads_command(Some("witness"), None), now());
        let threads = response.result.unwrap();
        assert_eq!(threads.as_array().unwrap().len(), 1);
        assert_eq!(threads[0]["id"], "thread-002");

        let response = ws.execute(&threads_command(Some("gossip"), None), now());
        assert_eq!(response.error.unwrap().code, "validation_failed");
    }

    #[test]
    fn test_comment_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let mut ws = workspace(&dir, AccessRole::Investigator);
        let response = ws.execute(
            &CliCommand::AddComment {
                thread_id: "thread-001".into(),
                reply_to: Some("comment-002".into()),
                content: "Lab confirmed the partials".into(),
            },
            now(),
        );
        let result = response.result.unwrap();
        assert_eq!(result["depth"], 2);
        assert_eq!(result["flattened"], false);

        // A fresh workspace reads the snapshot back
        let ws = workspace(&dir, AccessRole::Viewer);
        let thread = ws.repository().get_thread("thread-001").unwrap();
        assert_eq!(thread.total_comment_count(), 3);
        assert_eq!(thread.view_count, 15);
    }

    #[test]
    fn test_only_showing_a_thread_counts_a_view() {
        let dir = tempfile::tempdir().unwrap();
        let mut ws = workspace(&dir, AccessRole::Investigator);
        let views = |ws: &Workspace| ws.repository().get_thread("thread-001").unwrap().view_count;

        ws.execute(
            &CliCommand::AddComment {
                thread_id: "thread-001".into(),
                reply_to: None,
                content: "hello".into(),
            },
            now(),
        );
        assert_eq!(views(&ws), 15);

        ws.execute(
            &CliCommand::ReplyForm {
                thread_id: "thread-001".into(),
                comment_id: "comment-001".into(),
            },
            now(),
        );
        assert_eq!(views(&ws), 15);

        let response = ws.execute(
            &CliCommand::ShowThread {
                thread_id: "thread-001".into(),
            },
            now(),
        );
        assert_eq!(response.result.unwrap()["view_count"], 16);
        assert_eq!(views(&workspace(&dir, AccessRole::Viewer)), 16);
    }

    #[test]
    fn test_viewer_cannot_comment() {
        let dir = tempfile::tempdir().unwrap();
        let mut ws = workspace(&dir, AccessRole::Viewer);
        let response = ws.execute(
            &CliCommand::AddComment {
                thread_id: "thread-001".into(),
                reply_to: None,
                content: "hello".into(),
            },
            now(),
        );
        assert_eq!(response.error.unwrap().code, "unauthorized");
        assert!(!SnapshotStore::new(dir.path()).exists());
    }

    fn probabilities(case_id: &str, prior: Option<&str>) -> CliCommand {
        CliCommand::SuspectProbabilities {
            case_id: case_id.to_string(),
            prior: prior.map(String::from),
        }
    }

    #[test]
    fn test_suspect_probabilities_for_analysts() {
        let dir = tempfile::tempdir().unwrap();
        let mut ws = workspace(&dir, AccessRole::Analyst);

        let result = ws.execute(&probabilities("case-002", None), now()).result.unwrap();
        assert_eq!(result["prior"], 0.5);
        let rows = result["probabilities"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["suspect_id"], "suspect-003");
        assert_eq!(rows[0]["probability_score"], 0.799);
        assert_eq!(rows[1]["suspect_id"], "suspect-004");
        assert_eq!(rows[1]["conflicting_evidence_ids"][0], "ev-2025-043");

        let response = ws.execute(&probabilities("case-404", None), now());
        assert_eq!(response.error.unwrap().code, "not_found");
        let response = ws.execute(&probabilities("case-002", Some("high")), now());
        assert_eq!(response.error.unwrap().code, "validation_failed");
        let response = ws.execute(&probabilities("case-002", Some("2")), now());
        assert_eq!(response.error.unwrap().code, "validation_failed");
        assert!(!SnapshotStore::new(dir.path()).exists());
    }

    #[test]
    fn test_investigator_cannot_run_analysis() {
        let dir = tempfile::tempdir().unwrap();
        let mut ws = workspace(&dir, AccessRole::Investigator);
        let response = ws.execute(&probabilities("case-002", None), now());
        assert_eq!(response.error.unwrap().code, "unauthorized");
    }

    #[test]
    fn test_authorize_checks_permission_without_running() {
        let dir = tempfile::tempdir().unwrap();
        let ws = workspace(&dir, AccessRole::Viewer);
        let activity = CliCommand::ListActivity {
            activity_type: None,
            user_id: None,
            timeframe: None,
            search: None,
            order: None,
        };
        assert!(ws.authorize(&activity).is_ok());
        assert!(matches!(
            ws.authorize(&CliCommand::Seed),
            Err(CoreError::Unauthorized(_))
        ));
        assert!(!SnapshotStore::new(dir.path()).exists());
    }

    #[test]
    fn test_reply_form_reports_deep_reply() {
        let dir = tempfile::tempdir().unwrap();
        let config = CoreConfig::new(dir.path()).with_max_reply_depth(1);
        let mut ws = Workspace::open(config, AccessRole::Investigator).unwrap();

        let response = ws.execute(
            &CliCommand::ReplyForm {
                thread_id: "thread-001".into(),
                comment_id: "comment-002".into(),
            },
            now(),
        );
        assert_eq!(response.result.unwrap()["outcome"], "deep_reply");

        let response = ws.execute(
            &CliCommand::ReplyForm {
                thread_id: "thread-001".into(),
                comment_id: "comment-001".into(),
            },
            now(),
        );
        assert_eq!(response.result.unwrap()["outcome"], "form_opened");
    }

    #[test]
    fn test_task_completion_records_activity() {
        let dir = tempfile::tempdir().unwrap();
        let mut ws = workspace(&dir, AccessRole::Investigator);
        let response = ws.execute(
            &CliCommand::SetTaskStatus {
                task_id: "task-001".into(),
                status: "completed".into(),
            },
            now(),
        );
        let task = response.result.unwrap();
        assert_eq!(task["status"], "completed");
        assert_eq!(task["completed_at"], now());

        let feed = ws.repository().list_activities().unwrap();
        assert_eq!(feed[0].activity_type, ActivityType::TaskCompleted);
        assert_eq!(feed[0].item_id.as_deref(), Some("task-001"));
    }

    #[test]
    fn test_witness_export_and_saved_search() {
        let dir = tempfile::tempdir().unwrap();
        let mut ws = workspace(&dir, AccessRole::Investigator);
        let export = dir.path().join("witnesses.json");

        let response = ws.execute(
            &CliCommand::ListWitnesses {
                search: None,
                status: Some("cooperative".into()),
                reliability: None,
                case_id: None,
                upcoming_interview: false,
                sort: Some("name".into()),
                saved: None,
                save_as: Some("Cooperative only".into()),
                export: Some(export.clone()),
            },
            now(),
        );
        let result = response.result.unwrap();
        let count = result["count"].as_u64().unwrap() as usize;
        let written: Vec<Value> =
            serde_json::from_str(&std::fs::read_to_string(&export).unwrap()).unwrap();
        assert_eq!(written.len(), count);

        let response = ws.execute(
            &CliCommand::ListWitnesses {
                search: None,
                status: None,
                reliability: None,
                case_id: None,
                upcoming_interview: false,
                sort: None,
                saved: Some("cooperative ONLY".into()),
                save_as: None,
                export: None,
            },
            now(),
        );
        assert_eq!(response.result.unwrap().as_array().unwrap().len(), count);
    }

    #[test]
    fn test_seed_resets_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let mut ws = workspace(&dir, AccessRole::Investigator);
        ws.execute(
            &CliCommand::AddComment {
                thread_id: "thread-003".into(),
                reply_to: None,
                content: "Reviewed".into(),
            },
            now(),
        );

        let response = ws.execute(&CliCommand::Seed, now());
        assert_eq!(response.result.unwrap()["threads"], 3);

        let ws = workspace(&dir, AccessRole::Viewer);
        let thread = ws.repository().get_thread("thread-003").unwrap();
        assert!(thread.comments.is_empty());
    }

    #[test]
    fn test_activity_view_lists_filter_options() {
        let dir = tempfile::tempdir().unwrap();
        let mut ws = workspace(&dir, AccessRole::Analyst);
        let response = ws.execute(
            &CliCommand::ListActivity {
                activity_type: None,
                user_id: None,
                timeframe: Some("today".into()),
                search: None,
                order: Some("oldest".into()),
            },
            parse_iso("2025-04-05T14:45:50").unwrap(),
        );
        let result = response.result.unwrap();
        assert!(!result["items"].as_array().unwrap().is_empty());
        assert!(!result["users"].as_array().unwrap().is_empty());
        assert!(!result["types"].as_array().unwrap().is_empty());
    }
}
