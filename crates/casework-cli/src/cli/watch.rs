use std::io::Write;

use anyhow::Result;
use casework_core::events::CoreEvent;
use casework_core::runtime::RefreshTask;
use casework_core::time_format::now_unix;
use tokio::sync::mpsc::unbounded_channel;

use super::commands::{activity_query, activity_view, Workspace};
use super::protocol::{write_json, CliCommand};

/// Print the filtered activity feed on each of the next `ticks` refreshes
#[tokio::main]
pub async fn watch_activity(
    workspace: &Workspace,
    command: &CliCommand,
    now: Option<u64>,
    ticks: usize,
    pretty: bool,
) -> Result<()> {
    let mut stdout = std::io::stdout();
    watch_into(workspace, command, now, ticks, pretty, &mut stdout).await
}

async fn watch_into<W: Write>(
    workspace: &Workspace,
    command: &CliCommand,
    now: Option<u64>,
    ticks: usize,
    pretty: bool,
    out: &mut W,
) -> Result<()> {
    let (filter, order) = activity_query(command)?;
    let (tx, mut rx) = unbounded_channel();
    let mut task = RefreshTask::spawn(
        workspace.repository(),
        workspace.config().refresh_interval,
        tx,
    );

    let mut seen = 0;
    while seen < ticks {
        match rx.recv().await {
            Some(CoreEvent::ActivitiesRefreshed(items)) => {
                let at = now.unwrap_or_else(now_unix);
                write_json(out, &activity_view(&items, &filter, order, at)?, pretty)?;
                seen += 1;
            }
            Some(CoreEvent::RefreshFailed { message, retryable }) => {
                eprintln!(
                    "Refresh failed: {}{}",
                    message,
                    if retryable { " (retrying)" } else { "" }
                );
                seen += 1;
            }
            Some(_) => {}
            None => break,
        }
    }

    task.cancel();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use casework_core::auth::AccessRole;
    use casework_core::CoreConfig;
    use std::time::Duration;

    fn activity_command(timeframe: Option<&str>) -> CliCommand {
        CliCommand::ListActivity {
            activity_type: None,
            user_id: None,
            timeframe: timeframe.map(String::from),
            search: None,
            order: None,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_prints_one_document_per_tick() {
        let dir = tempfile::tempdir().unwrap();
        let config = CoreConfig::new(dir.path()).with_refresh_interval(Duration::from_secs(5));
        let workspace = Workspace::open(config, AccessRole::Viewer).unwrap();

        let mut out = Vec::new();
        watch_into(&workspace, &activity_command(None), Some(0), 3, false, &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["items"].as_array().unwrap().len(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejects_bad_timeframe_before_spawning() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = Workspace::open(CoreConfig::new(dir.path()), AccessRole::Viewer).unwrap();
        let mut out = Vec::new();
        let result = watch_into(
            &workspace,
            &activity_command(Some("fortnight")),
            None,
            1,
            false,
            &mut out,
        )
        .await;
        assert!(result.is_err());
        assert!(out.is_empty());
    }
}
