use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_ACTOR: &str = "local-user";
const CONFIG_ENV: &str = "KANBAN_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Identity recorded as the mover in activity entries.
    #[serde(default)]
    pub actor: Option<String>,

    /// Restore a task's previous column and position when persisting a move fails.
    #[serde(default)]
    pub rollback_on_failure: bool,
}

impl AppConfig {
    /// `$KANBAN_CONFIG` if set, else `<config dir>/kanban/config.toml`.
    pub fn config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("kanban").join("config.toml"))
    }

    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Defaults when the file is missing or malformed.
    pub fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|content| toml::from_str(&content).ok())
            .unwrap_or_default()
    }

    pub fn effective_actor(&self) -> &str {
        self.actor.as_deref().unwrap_or(DEFAULT_ACTOR)
    }
}
