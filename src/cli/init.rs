use serde_json::json;
use tracing::info;

use crate::config::Config;
use crate::db::connection;
use crate::error::TaskflowError;
use crate::output;

pub fn run(config: &Config, json_output: bool) -> Result<i32, TaskflowError> {
    connection::open_db(&config.home)?;
    let path = config.db_path();
    info!(path = %path.display(), "initialized");
    if json_output {
        output::json::print(&output::json::success(json!({
            "path": path.to_string_lossy(),
            "home": config.home.to_string_lossy()
        })));
    } else {
        println!("Initialized taskflow at {}", path.display());
    }
    Ok(0)
}
