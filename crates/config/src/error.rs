use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config at {}: {message}", path.display())]
    Invalid { path: PathBuf, message: String },

    #[error("Unsupported config format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Unknown project '{name}'{}", suggestion.as_ref().map(|s| format!(", did you mean '{s}'?")).unwrap_or_default())]
    UnknownProject {
        name: String,
        suggestion: Option<String>,
    },

    #[error("Config has multiple projects and none is named 'default': {}", .0.join(", "))]
    ProjectRequired(Vec<String>),

    #[error("Invalid schema pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },
}
