#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Configuration not found. Run 'wl setup' first")]
    ConfigMissing,

    #[error("Tasks not found in tracker: {0}")]
    TasksNotFound(String),

    #[error("Cancelled")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_config_missing() {
        assert_eq!(
            AppError::ConfigMissing.to_string(),
            "Configuration not found. Run 'wl setup' first"
        );
    }

    #[test]
    fn test_display_tasks_not_found() {
        let err = AppError::TasksNotFound("PROJ-1, PROJ-2".into());
        assert_eq!(
            err.to_string(),
            "Tasks not found in tracker: PROJ-1, PROJ-2"
        );
    }
}
