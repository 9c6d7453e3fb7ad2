use serde_json::json;

use crate::cli::{open_store, parse_priority, parse_status};
use crate::config::Config;
use crate::error::TaskflowError;
use crate::output;
use crate::store::TaskFilter;
use crate::view::ListView;

pub fn run_list(
    config: &Config,
    status: Option<String>,
    priority: Option<String>,
    category: Option<String>,
    search: Option<String>,
    json_output: bool,
) -> Result<i32, TaskflowError> {
    let filter = TaskFilter {
        status: status.as_deref().map(parse_status).transpose()?,
        priority: priority.as_deref().map(parse_priority).transpose()?,
        category,
        search,
    };

    let store = open_store(config)?;
    let view = ListView::build(&store, filter);

    if json_output {
        output::json::print(&output::json::success(output::json::task_list_json(&view)));
    } else {
        output::text::print_list_view(&view);
    }
    Ok(0)
}

pub fn run_categories(config: &Config, json_output: bool) -> Result<i32, TaskflowError> {
    let store = open_store(config)?;
    let categories = store.categories();

    if json_output {
        output::json::print(&output::json::success(json!({
            "categories": categories
        })));
    } else if categories.is_empty() {
        println!("No categories.");
    } else {
        for c in categories {
            println!("  {c}");
        }
    }
    Ok(0)
}
