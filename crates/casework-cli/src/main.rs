use std::path::PathBuf;

use anyhow::{Context, Result};
use casework_cli::cli::protocol::write_json;
use casework_cli::cli::{watch_activity, CliCommand, CliConfig, Response, Workspace};
use casework_core::constants::SEED_CASE_ID;
use casework_core::time_format::{now_unix, parse_iso};
use casework_core::tracing_setup::init_tracing;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "casework-cli")]
#[command(about = "Case discussions, witnesses, suspects and activity from the command line")]
struct Cli {
    /// Pretty-print JSON output
    #[arg(long, short, global = true)]
    pretty: bool,

    /// Path to JSON config file (dataDir, currentUserId, role, maxReplyDepth, refreshIntervalSecs)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Directory holding the case snapshot
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Reference instant for relative times and timeframe filters (ISO 8601, UTC)
    #[arg(long, global = true)]
    now: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Reset the snapshot to the seed case
    Seed,

    /// List discussion threads of a case
    Threads {
        /// Case ID
        #[arg(long, default_value = SEED_CASE_ID)]
        case: String,
        /// all, evidence, witness, suspect, timeline, task or general
        #[arg(long)]
        category: Option<String>,
        /// Match against title and body
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Open a thread and render its comment tree
    Thread {
        thread_id: String,
    },

    /// Post a comment on a thread
    Comment {
        thread_id: String,
        /// Comment text; @Name mentions are resolved against the user directory
        content: String,
        /// Reply to this comment instead of posting at the top level
        #[arg(long)]
        reply_to: Option<String>,
    },

    /// Press Reply on a comment and show whether an inline form or a notice appears
    ReplyForm {
        thread_id: String,
        comment_id: String,
    },

    /// List witnesses
    Witnesses {
        #[arg(long, short = 's')]
        search: Option<String>,
        /// Cooperative, Reluctant or Uncooperative
        #[arg(long)]
        status: Option<String>,
        /// High, Medium or Low
        #[arg(long)]
        reliability: Option<String>,
        #[arg(long)]
        case: Option<String>,
        /// Only witnesses with an interview scheduled
        #[arg(long)]
        upcoming: bool,
        /// as_loaded, name_asc, name_desc, status, reliability or last_contact
        #[arg(long)]
        sort: Option<String>,
        /// Use the filter of a saved search
        #[arg(long, conflicts_with_all = ["search", "status", "reliability", "case", "upcoming"])]
        saved: Option<String>,
        /// Save the filter under this name
        #[arg(long)]
        save_as: Option<String>,
        /// Write the matching witnesses to a JSON file
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// List suspects
    Suspects {
        #[arg(long, short = 's')]
        search: Option<String>,
        #[arg(long)]
        status: Option<String>,
        /// High, Medium or Low
        #[arg(long)]
        risk: Option<String>,
        #[arg(long)]
        case: Option<String>,
        /// name_asc, name_desc, status, risk or recent
        #[arg(long)]
        sort: Option<String>,
    },

    /// Rank the suspects of a case by how strongly linked evidence implicates them
    Probabilities {
        /// Case ID
        #[arg(long)]
        case: String,
        /// Prior probability of involvement, between 0 and 1 (default 0.5)
        #[arg(long)]
        prior: Option<String>,
    },

    /// Show the activity feed
    Activity {
        #[arg(long = "type")]
        activity_type: Option<String>,
        #[arg(long)]
        user: Option<String>,
        /// all, today, yesterday or week
        #[arg(long)]
        timeframe: Option<String>,
        #[arg(long, short = 's')]
        search: Option<String>,
        /// newest or oldest
        #[arg(long)]
        order: Option<String>,
        /// Keep refreshing and print the feed on each of the next N refreshes
        #[arg(long, value_name = "N")]
        watch: Option<usize>,
    },

    /// List case tasks
    Tasks {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Change the status of a task
    TaskStatus {
        task_id: String,
        /// pending, in_progress, completed or blocked
        status: String,
    },

    /// List the case team
    Team {
        #[arg(long, short = 's')]
        search: Option<String>,
        #[arg(long)]
        role: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_tracing() {
        eprintln!("Warning: {}", e);
    }

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Returns false when the command reported an error
fn run(cli: Cli) -> Result<bool> {
    let config = load_config(cli.config.as_ref())?;
    let now = cli
        .now
        .as_deref()
        .map(|raw| parse_iso(raw).with_context(|| format!("Invalid --now value: {}", raw)))
        .transpose()?;

    let Some(command) = cli.command else {
        let response = Response::error("no_command", "No command specified. Use --help for usage.");
        write_json(&mut std::io::stderr(), &response, cli.pretty)?;
        return Ok(false);
    };

    let mut watch = None;
    let command = match command {
        Commands::Seed => CliCommand::Seed,
        Commands::Threads {
            case,
            category,
            search,
        } => CliCommand::ListThreads {
            case_id: case,
            category,
            search,
        },
        Commands::Thread { thread_id } => CliCommand::ShowThread { thread_id },
        Commands::Comment {
            thread_id,
            content,
            reply_to,
        } => CliCommand::AddComment {
            thread_id,
            reply_to,
            content,
        },
        Commands::ReplyForm {
            thread_id,
            comment_id,
        } => CliCommand::ReplyForm {
            thread_id,
            comment_id,
        },
        Commands::Witnesses {
            search,
            status,
            reliability,
            case,
            upcoming,
            sort,
            saved,
            save_as,
            export,
        } => CliCommand::ListWitnesses {
            search,
            status,
            reliability,
            case_id: case,
            upcoming_interview: upcoming,
            sort,
            saved,
            save_as,
            export,
        },
        Commands::Suspects {
            search,
            status,
            risk,
            case,
            sort,
        } => CliCommand::ListSuspects {
            search,
            status,
            risk,
            case_id: case,
            sort,
        },
        Commands::Probabilities { case, prior } => CliCommand::SuspectProbabilities {
            case_id: case,
            prior,
        },
        Commands::Activity {
            activity_type,
            user,
            timeframe,
            search,
            order,
            watch: ticks,
        } => {
            watch = ticks;
            CliCommand::ListActivity {
                activity_type,
                user_id: user,
                timeframe,
                search,
                order,
            }
        }
        Commands::Tasks {
            status,
            priority,
            search,
        } => CliCommand::ListTasks {
            status,
            priority,
            search,
        },
        Commands::TaskStatus { task_id, status } => CliCommand::SetTaskStatus { task_id, status },
        Commands::Team { search, role } => CliCommand::ListTeam { search, role },
    };

    let mut workspace = Workspace::open(config.core_config(cli.data_dir), config.role())
        .context("Failed to open case data")?;

    if let Some(ticks) = watch {
        if let Err(e) = workspace.authorize(&command) {
            let response = Response::from(e);
            if let Some(error) = response.error {
                eprintln!("Error [{}]: {}", error.code, error.message);
            }
            return Ok(false);
        }
        watch_activity(&workspace, &command, now, ticks, cli.pretty)?;
        return Ok(true);
    }

    let response = workspace.execute(&command, now.unwrap_or_else(now_unix));
    match (&response.result, &response.error) {
        (Some(result), _) => {
            write_json(&mut std::io::stdout(), result, cli.pretty)?;
            Ok(true)
        }
        (None, Some(error)) => {
            eprintln!("Error [{}]: {}", error.code, error.message);
            Ok(false)
        }
        (None, None) => Ok(true),
    }
}

/// Config from `--config`, else `~/.casework/config.json` when present
fn load_config(path: Option<&PathBuf>) -> Result<CliConfig> {
    match path {
        Some(path) => CliConfig::load(path),
        None => Ok(CliConfig::load_default()?.unwrap_or_default()),
    }
}
