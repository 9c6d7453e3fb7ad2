use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::db::connection;
use crate::error::TaskflowError;
use crate::view::CalendarState;

pub const HOME_ENV: &str = "TASKFLOW_HOME";
pub const CONFIG_FILE: &str = "config.json";

/// Where taskflow keeps its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub home: PathBuf,
}

impl Config {
    /// `--home` flag, then `$TASKFLOW_HOME`, then the platform data dir.
    pub fn resolve(home_flag: Option<&Path>) -> Result<Self, TaskflowError> {
        if let Some(home) = home_flag {
            return Ok(Self::at(home));
        }
        if let Some(home) = env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::at(PathBuf::from(home)));
        }
        let base = dirs::data_local_dir().ok_or_else(|| {
            TaskflowError::config(format!(
                "Cannot determine a data directory. Set {HOME_ENV} or pass --home."
            ))
        })?;
        Ok(Self::at(base.join("taskflow")))
    }

    pub fn at(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    pub fn db_path(&self) -> PathBuf {
        connection::db_path(&self.home)
    }

    pub fn config_path(&self) -> PathBuf {
        self.home.join(CONFIG_FILE)
    }

    /// Saved calendar position; missing or unreadable files give the default.
    pub fn load_view_state(&self) -> CalendarState {
        let path = self.config_path();
        let Ok(content) = fs::read_to_string(&path) else {
            return CalendarState::default();
        };
        match serde_json::from_str(&content) {
            Ok(state) => state,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable view state");
                CalendarState::default()
            }
        }
    }

    pub fn save_view_state(&self, state: &CalendarState) -> Result<(), TaskflowError> {
        let path = self.config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| TaskflowError::config(e.to_string()))?;
        }
        let content = serde_json::to_string_pretty(state)?;
        fs::write(&path, content)
            .map_err(|e| TaskflowError::config(format!("cannot write {}: {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn flag_wins() {
        let config = Config::resolve(Some(Path::new("/tmp/tf-flag"))).unwrap();
        assert_eq!(config.home, PathBuf::from("/tmp/tf-flag"));
        assert_eq!(config.db_path(), PathBuf::from("/tmp/tf-flag/taskflow.db"));
        assert_eq!(config.config_path(), PathBuf::from("/tmp/tf-flag/config.json"));
    }

    #[test]
    fn view_state_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config::at(dir.path().join("home"));
        assert_eq!(config.load_view_state(), CalendarState::default());

        let mut state = CalendarState::starting_at(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        state.select(NaiveDate::from_ymd_opt(2024, 5, 10).unwrap());
        config.save_view_state(&state).unwrap();
        assert_eq!(config.load_view_state(), state);
    }

    #[test]
    fn garbage_view_state_is_ignored() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config::at(dir.path());
        fs::write(config.config_path(), "{\"calendar_month\": \"2024-99\"}").unwrap();
        let state = config.load_view_state();
        assert_eq!(state, CalendarState::default());
    }
}
