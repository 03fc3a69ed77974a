use crate::{ConfigError, GraphQLConfig, ProjectConfig, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File names looked for in every directory, most preferred first.
const CANDIDATES: &[&str] = &[
    ".graphqlrc.yml",
    ".graphqlrc.yaml",
    ".graphqlrc.json",
    ".graphqlrc",
    "graphql.config.yml",
    "graphql.config.yaml",
    "graphql.config.json",
];

/// How a config file's contents are decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Yaml,
    Json,
    /// A bare `.graphqlrc`: YAML, with JSON accepted when YAML fails.
    Rc,
}

impl Format {
    fn of(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yml" | "yaml") => Some(Self::Yaml),
            Some("json") => Some(Self::Json),
            None if path.file_name().is_some_and(|name| name == ".graphqlrc") => Some(Self::Rc),
            _ => None,
        }
    }

    fn parse(self, contents: &str, path: &Path) -> Result<GraphQLConfig> {
        let invalid = |message: String| ConfigError::Invalid {
            path: path.to_path_buf(),
            message,
        };
        let yaml = || -> Result<GraphQLConfig> {
            serde_saphyr::from_str(contents).map_err(|e| invalid(format!("YAML parse error: {e}")))
        };
        let json = || -> Result<GraphQLConfig> {
            serde_json::from_str(contents).map_err(|e| invalid(format!("JSON parse error: {e}")))
        };

        match self {
            Self::Yaml => yaml(),
            Self::Json => json(),
            Self::Rc => yaml().or_else(|_| json()),
        }
    }
}

/// Returns the nearest config file in `start_dir` or one of its ancestors.
#[must_use]
#[tracing::instrument(fields(start = %start_dir.display()))]
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    let found = start_dir.ancestors().find_map(|dir| {
        CANDIDATES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    });
    match &found {
        Some(path) => tracing::debug!(path = %path.display(), "Using config file"),
        None => tracing::debug!("No config file in any ancestor directory"),
    }
    found
}

/// Reads and validates the config at `path`. The format follows the file name.
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Result<GraphQLConfig> {
    let contents = fs::read_to_string(path)?;
    let config = load_config_from_str(&contents, path)?;
    tracing::debug!(projects = config.project_count(), "Config loaded");
    Ok(config)
}

/// Parses and validates config text. `path` only selects the format and
/// labels errors; nothing is read from disk.
pub fn load_config_from_str(contents: &str, path: &Path) -> Result<GraphQLConfig> {
    let format =
        Format::of(path).ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;
    let config = format.parse(contents, path)?;
    validate_config(&config, path)?;
    Ok(config)
}

fn validate_config(config: &GraphQLConfig, path: &Path) -> Result<()> {
    for (name, project) in config.projects() {
        if let Some(problem) = schema_problem(project) {
            return Err(ConfigError::Invalid {
                path: path.to_path_buf(),
                message: format!("Project '{name}' {problem}"),
            });
        }
    }
    Ok(())
}

/// Describes what is wrong with a project's `schema` entry, if anything.
fn schema_problem(project: &ProjectConfig) -> Option<&'static str> {
    if let Some(introspection) = project.schema.introspection_config() {
        return introspection
            .url
            .trim()
            .is_empty()
            .then_some("has an empty introspection url");
    }

    let paths = project.schema.paths();
    if paths.is_empty() {
        Some("has empty schema configuration")
    } else if paths.iter().any(|schema_path| schema_path.trim().is_empty()) {
        Some("has empty schema path")
    } else {
        None
    }
}
