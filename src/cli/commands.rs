use std::path::PathBuf;

use clap::{Parser, Subcommand};

const VERSION: &str = env!("TASKFLOW_VERSION");

#[derive(Parser)]
#[command(
    name = "taskflow",
    version = VERSION,
    about = "Personal task list and calendar",
    after_help = "\
NOTE:
  Data lives in $TASKFLOW_HOME (default: the platform data dir + /taskflow).
  The task collection is stored as one JSON document in taskflow.db;
  the calendar position is kept in config.json.

EXIT CODES:
  0  Success
  1  Error (validation, unknown task, storage)

VALUES:
  status:   todo | inProgress | completed
  priority: low | medium | high
  dates:    YYYY-MM-DD (local time), months: YYYY-MM

LOGGING:
  TASKFLOW_LOG=taskflow=debug      tracing filter (stderr)
  TASKFLOW_LOG_FORMAT=json         structured log lines"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Data directory (overrides TASKFLOW_HOME)
    #[arg(long, global = true)]
    pub home: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the data directory and database
    Init,

    /// Create a task
    #[command(after_help = "\
NOTE:
  Defaults: status todo, priority medium, due today.
  The title must not be blank.")]
    Add {
        /// Task title
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },

    /// Edit a task; only the given fields change
    Edit {
        /// Task ID or unique prefix
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
        /// Category; pass an empty string to clear it
        #[arg(long)]
        category: Option<String>,
    },

    /// Flip a task between todo and completed
    Toggle {
        id: String,
    },

    /// Delete a task
    Delete {
        id: String,
    },

    /// Show task details
    Show {
        id: String,
        /// Due date rendering: full, short, month, monthYear, time, iso, yearMonthDay.
        /// Anything else uses the generic locale form
        #[arg(long, default_value = "full")]
        date_format: String,
    },

    /// List tasks, optionally filtered
    #[command(after_help = "\
NOTE:
  All given filters must match. --search looks at title and description,
  case-insensitively. --category is an exact match.")]
    List {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },

    /// List the categories in use
    Categories,

    /// Month calendar with tasks bucketed by due day
    #[command(after_help = "\
NOTE:
  Without a navigation flag, shows the month displayed last time.
  Navigation always lands on the 1st of the month.")]
    Calendar {
        /// Jump to a month (YYYY-MM)
        #[arg(long, conflicts_with_all = ["next", "prev", "today"])]
        month: Option<String>,
        /// Move forward one month
        #[arg(long, conflicts_with_all = ["prev", "today"])]
        next: bool,
        /// Move back one month
        #[arg(long, conflicts_with = "today")]
        prev: bool,
        /// Jump to the current month
        #[arg(long)]
        today: bool,
        /// Select a day (YYYY-MM-DD) and list its tasks
        #[arg(long, conflicts_with = "clear")]
        select: Option<String>,
        /// Clear the selected day
        #[arg(long)]
        clear: bool,
    },
}
