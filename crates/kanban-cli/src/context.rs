use kanban_core::AppConfig;
use kanban_domain::{DragController, FailurePolicy, UserId};
use kanban_persistence::JsonFileStore;
use std::path::Path;

pub struct CliContext {
    pub store: JsonFileStore,
    pub config: AppConfig,
}

impl CliContext {
    pub fn new(file_path: &str, config_path: Option<&Path>) -> Self {
        let config = match config_path {
            Some(path) => AppConfig::load_from(path),
            None => AppConfig::load(),
        };
        tracing::debug!(file = file_path, "Opening board file");
        Self {
            store: JsonFileStore::new(file_path),
            config,
        }
    }

    pub fn drag_controller(&self) -> DragController {
        DragController::new(FailurePolicy::from_config(&self.config))
    }

    pub fn actor(&self, explicit: Option<String>) -> UserId {
        explicit.unwrap_or_else(|| self.config.effective_actor().to_string())
    }
}
