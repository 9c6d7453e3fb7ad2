pub mod commands;
pub mod init;
pub mod task;
pub mod list;
pub mod calendar;

pub use commands::*;

use crate::config::Config;
use crate::dates::DateFormat;
use crate::db::{connection, SqliteKv, TaskRepo};
use crate::error::TaskflowError;
use crate::models::{TaskPriority, TaskStatus};
use crate::output;
use crate::store::TaskStore;

pub type CliStore = TaskStore<SqliteKv>;

/// Dispatch a parsed command line. Returns the process exit code.
pub fn run(cli: Cli) -> i32 {
    let json_output = cli.json;
    let result = Config::resolve(cli.home.as_deref()).and_then(|config| match cli.command {
        Commands::Init => init::run(&config, json_output),
        Commands::Add { title, description, status, priority, due, category } => task::run_add(
            &config,
            task::FormArgs { title: Some(title), description, status, priority, due, category },
            json_output,
        ),
        Commands::Edit { id, title, description, status, priority, due, category } => task::run_edit(
            &config,
            &id,
            task::FormArgs { title, description, status, priority, due, category },
            json_output,
        ),
        Commands::Toggle { id } => task::run_toggle(&config, &id, json_output),
        Commands::Delete { id } => task::run_delete(&config, &id, json_output),
        Commands::Show { id, date_format } => {
            task::run_show(&config, &id, DateFormat::parse(&date_format), json_output)
        }
        Commands::List { status, priority, category, search } => {
            list::run_list(&config, status, priority, category, search, json_output)
        }
        Commands::Categories => list::run_categories(&config, json_output),
        Commands::Calendar { month, next, prev, today, select, clear } => calendar::run(
            &config,
            calendar::Navigation { month, next, prev, today, select, clear },
            json_output,
        ),
    });
    finish(result, json_output)
}

fn finish(result: Result<i32, TaskflowError>, json_output: bool) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            if json_output {
                output::json::print(&output::json::error(&e));
            } else {
                eprintln!("Error: {}", e.message);
            }
            1
        }
    }
}

pub(crate) fn open_store(config: &Config) -> Result<CliStore, TaskflowError> {
    let conn = connection::open_db(&config.home)?;
    Ok(TaskStore::open(TaskRepo::new(SqliteKv::new(conn))))
}

pub(crate) fn parse_status(value: &str) -> Result<TaskStatus, TaskflowError> {
    TaskStatus::from_str(value).ok_or_else(|| {
        TaskflowError::validation(format!(
            "Invalid status '{value}'. Expected todo, inProgress or completed"
        ))
    })
}

pub(crate) fn parse_priority(value: &str) -> Result<TaskPriority, TaskflowError> {
    TaskPriority::from_str(value).ok_or_else(|| {
        TaskflowError::validation(format!(
            "Invalid priority '{value}'. Expected low, medium or high"
        ))
    })
}
