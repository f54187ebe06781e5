use std::path::PathBuf;

use casework_core::auth::{Action, Permission, Resource, Route};
use casework_core::CoreError;
use serde::{Deserialize, Serialize};

/// Outcome of one command, printed as JSON
#[derive(Debug, Serialize, Deserialize)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub retryable: bool,
}

impl Response {
    pub fn success(result: serde_json::Value) -> Self {
        Self {
            result: Some(result),
            error: None,
        }
    }

    pub fn error(code: &str, message: &str) -> Self {
        Self {
            result: None,
            error: Some(ErrorInfo {
                code: code.to_string(),
                message: message.to_string(),
                retryable: false,
            }),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

impl From<CoreError> for Response {
    fn from(e: CoreError) -> Self {
        let code = match &e {
            CoreError::NotFound { .. } => "not_found",
            CoreError::ValidationFailed(_) => "validation_failed",
            CoreError::Unauthorized(_) => "unauthorized",
            CoreError::TransientIo(_) => "transient_io",
            CoreError::Corrupt(_) => "corrupt",
        };
        Self {
            result: None,
            error: Some(ErrorInfo {
                code: code.to_string(),
                message: e.user_message(),
                retryable: e.is_retryable(),
            }),
        }
    }
}

/// Write `value` as one JSON document
pub fn write_json<W: std::io::Write>(
    out: &mut W,
    value: &impl Serialize,
    pretty: bool,
) -> anyhow::Result<()> {
    if pretty {
        writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    } else {
        writeln!(out, "{}", serde_json::to_string(value)?)?;
    }
    Ok(())
}

/// CLI command parsed from arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Reset the snapshot to the seed case
    Seed,
    ListThreads {
        case_id: String,
        category: Option<String>,
        search: Option<String>,
    },
    /// Open a thread (counts a view) and render its comment tree
    ShowThread { thread_id: String },
    /// Post a comment, or a reply when `reply_to` is set
    AddComment {
        thread_id: String,
        reply_to: Option<String>,
        content: String,
    },
    /// Press Reply on a comment and report what the board shows
    ReplyForm {
        thread_id: String,
        comment_id: String,
    },
    ListWitnesses {
        search: Option<String>,
        status: Option<String>,
        reliability: Option<String>,
        case_id: Option<String>,
        upcoming_interview: bool,
        sort: Option<String>,
        saved: Option<String>,
        save_as: Option<String>,
        export: Option<PathBuf>,
    },
    ListSuspects {
        search: Option<String>,
        status: Option<String>,
        risk: Option<String>,
        case_id: Option<String>,
        sort: Option<String>,
    },
    /// Rank the suspects of a case by evidence-based probability
    SuspectProbabilities {
        case_id: String,
        /// Prior probability of involvement, 0-1
        prior: Option<String>,
    },
    ListActivity {
        activity_type: Option<String>,
        user_id: Option<String>,
        timeframe: Option<String>,
        search: Option<String>,
        order: Option<String>,
    },
    ListTasks {
        status: Option<String>,
        priority: Option<String>,
        search: Option<String>,
    },
    SetTaskStatus { task_id: String, status: String },
    ListTeam {
        search: Option<String>,
        role: Option<String>,
    },
}

impl CliCommand {
    /// Page of the application the command stands in for
    pub fn route(&self, case_id: &str) -> Route {
        let case_id = case_id.to_string();
        match self {
            CliCommand::Seed => Route::Cases,
            CliCommand::ListThreads { case_id, .. } => Route::Discussions {
                case_id: case_id.clone(),
            },
            CliCommand::ShowThread { .. }
            | CliCommand::AddComment { .. }
            | CliCommand::ReplyForm { .. } => Route::Discussions { case_id },
            CliCommand::ListWitnesses { .. } => Route::Witnesses,
            CliCommand::ListSuspects { .. } | CliCommand::SuspectProbabilities { .. } => {
                Route::Suspects
            }
            CliCommand::ListActivity { .. } => Route::Collaboration { case_id },
            CliCommand::ListTasks { .. } | CliCommand::SetTaskStatus { .. } => {
                Route::Tasks { case_id }
            }
            CliCommand::ListTeam { .. } => Route::Team { case_id },
        }
    }

    /// Permission needed beyond reaching the route
    pub fn required_permission(&self) -> Permission {
        match self {
            CliCommand::Seed => Permission::new(Resource::Case, Action::Create),
            CliCommand::AddComment { .. } | CliCommand::SetTaskStatus { .. } => {
                Permission::new(Resource::Case, Action::Update)
            }
            CliCommand::ListWitnesses {
                save_as: Some(_), ..
            } => Permission::new(Resource::Case, Action::Update),
            CliCommand::ListSuspects { .. } => Permission::new(Resource::Suspect, Action::View),
            CliCommand::SuspectProbabilities { .. } => {
                Permission::new(Resource::Analysis, Action::Run)
            }
            _ => Permission::new(Resource::Case, Action::View),
        }
    }

    /// Whether the snapshot has to be written back afterwards
    pub fn mutates(&self) -> bool {
        matches!(
            self,
            CliCommand::Seed
                | CliCommand::ShowThread { .. }
                | CliCommand::AddComment { .. }
                | CliCommand::SetTaskStatus { .. }
                | CliCommand::ListWitnesses {
                    save_as: Some(_),
                    ..
                }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_codes() {
        let response = Response::from(CoreError::not_found("thread", "thread-404"));
        let error = response.error.unwrap();
        assert_eq!(error.code, "not_found");
        assert_eq!(error.message, "The requested thread could not be found.");
        assert!(!error.retryable);

        let response = Response::from(CoreError::TransientIo("disk".into()));
        let error = response.error.unwrap();
        assert_eq!(error.code, "transient_io");
        assert!(error.retryable);
    }

    #[test]
    fn test_success_serializes_without_error() {
        let response = Response::success(serde_json::json!({ "ok": true }));
        assert!(!response.is_error());
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"result":{"ok":true}}"#);
    }

    #[test]
    fn test_mutating_commands() {
        assert!(CliCommand::Seed.mutates());
        assert!(CliCommand::SetTaskStatus {
            task_id: "task-001".into(),
            status: "completed".into()
        }
        .mutates());
        assert!(!CliCommand::ListTeam {
            search: None,
            role: None
        }
        .mutates());
    }

    #[test]
    fn test_routes_follow_case() {
        let command = CliCommand::ListThreads {
            case_id: "case-9".into(),
            category: None,
            search: None,
        };
        assert_eq!(
            command.route("ignored"),
            Route::Discussions {
                case_id: "case-9".into()
            }
        );
        assert_eq!(
            CliCommand::ListTasks {
                status: None,
                priority: None,
                search: None
            }
            .route("case-2025-001"),
            Route::Tasks {
                case_id: "case-2025-001".into()
            }
        );
    }
}
