use crate::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Project name used for single-project configs, and the fallback when no
/// project is requested.
pub const DEFAULT_PROJECT: &str = "default";

/// Top-level GraphQL configuration.
/// Either a single project or multiple named projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GraphQLConfig {
    /// Multi-project configuration
    Multi {
        projects: BTreeMap<String, ProjectConfig>,
    },
    /// Single project configuration (boxed to reduce enum size)
    Single(Box<ProjectConfig>),
}

impl GraphQLConfig {
    /// Get all projects as an iterator, in name order.
    /// For single project configs, yields a single item with name "default".
    #[must_use]
    pub fn projects(&self) -> Box<dyn Iterator<Item = (&str, &ProjectConfig)> + '_> {
        match self {
            Self::Single(config) => Box::new(std::iter::once((DEFAULT_PROJECT, config.as_ref()))),
            Self::Multi { projects } => Box::new(
                projects
                    .iter()
                    .map(|(name, config)| (name.as_str(), config)),
            ),
        }
    }

    /// Get a specific project by name.
    /// For single project configs, returns the project if name is "default".
    #[must_use]
    pub fn get_project(&self, name: &str) -> Option<&ProjectConfig> {
        match self {
            Self::Single(config) if name == DEFAULT_PROJECT => Some(config.as_ref()),
            Self::Single(_) => None,
            Self::Multi { projects } => projects.get(name),
        }
    }

    /// The project named `name`, or the default one when no name is given.
    ///
    /// Without a name, a single-project config yields its only project and a
    /// multi-project config yields the project named `default` if it has one.
    pub fn select_project(&self, name: Option<&str>) -> Result<&ProjectConfig> {
        if let Some(name) = name {
            return self.get_project(name).ok_or_else(|| ConfigError::UnknownProject {
                name: name.to_string(),
                suggestion: self.closest_project_name(name),
            });
        }

        match self {
            Self::Single(config) => Ok(config.as_ref()),
            Self::Multi { projects } => projects
                .get(DEFAULT_PROJECT)
                .ok_or_else(|| ConfigError::ProjectRequired(projects.keys().cloned().collect())),
        }
    }

    fn closest_project_name(&self, name: &str) -> Option<String> {
        self.projects()
            .map(|(candidate, _)| (strsim::levenshtein(name, candidate), candidate))
            .filter(|(distance, _)| *distance <= 3)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, candidate)| candidate.to_string())
    }

    /// Check if this is a multi-project configuration
    #[must_use]
    pub const fn is_multi_project(&self) -> bool {
        matches!(self, Self::Multi { .. })
    }

    /// Get the number of projects
    #[must_use]
    pub fn project_count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Multi { projects } => projects.len(),
        }
    }
}

/// Configuration for a single GraphQL project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Schema source(s)
    pub schema: SchemaConfig,

    /// Tool-specific extensions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<HashMap<String, serde_json::Value>>,
}

impl ProjectConfig {
    /// Defaults for graph commands from `extensions.graph`.
    ///
    /// ```yaml
    /// extensions:
    ///   graph:
    ///     interfacesAsUnions: true
    ///     includeBuiltins: false
    ///     depth: 2
    /// ```
    ///
    /// A malformed value is logged and ignored.
    #[must_use]
    pub fn graph(&self) -> GraphExtension {
        let Some(value) = self.extensions.as_ref().and_then(|ext| ext.get("graph")) else {
            return GraphExtension::default();
        };

        serde_json::from_value(value.clone()).unwrap_or_else(|e| {
            tracing::warn!(
                "Ignoring malformed extensions.graph value {}: {}",
                value,
                e
            );
            GraphExtension::default()
        })
    }

    /// Schema files named by path patterns, relative to `base_dir`.
    ///
    /// Glob patterns are expanded and sorted; plain paths are returned as
    /// given. A pattern that matches nothing is an error. Introspection
    /// configs have no files.
    pub fn schema_files(&self, base_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for pattern in self.schema.paths() {
            let full = base_dir.join(pattern);
            if !is_glob(pattern) {
                files.push(full);
                continue;
            }

            let pattern_error = |message: String| ConfigError::Pattern {
                pattern: pattern.to_string(),
                message,
            };
            let mut matched: Vec<PathBuf> = glob::glob(&full.to_string_lossy())
                .map_err(|e| pattern_error(e.to_string()))?
                .collect::<std::result::Result<_, _>>()
                .map_err(|e| pattern_error(e.to_string()))?;
            if matched.is_empty() {
                return Err(pattern_error("matched no files".to_string()));
            }
            matched.sort();
            tracing::debug!(pattern, matches = matched.len(), "Expanded schema pattern");
            files.extend(matched);
        }
        Ok(files)
    }
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '[', '{'])
}

/// Defaults for graph commands, read from `extensions.graph`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphExtension {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interfaces_as_unions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_builtins: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<usize>,
}

/// Schema source configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaConfig {
    /// Single file path or glob pattern
    Path(String),
    /// Multiple file paths or glob patterns
    Paths(Vec<String>),
    /// Introspection configuration for remote schemas
    Introspection(IntrospectionSchemaConfig),
}

/// Configuration for introspecting a remote GraphQL endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionSchemaConfig {
    /// The GraphQL endpoint URL to introspect
    pub url: String,

    /// HTTP headers to include in the introspection request (e.g., for authentication)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,

    /// Request timeout in seconds (default: 30)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Number of retry attempts on failure (default: 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry: Option<u32>,
}

impl SchemaConfig {
    /// Get all schema paths/patterns.
    /// For introspection configs, returns an empty vec (use `introspection_config()` instead)
    #[must_use]
    pub fn paths(&self) -> Vec<&str> {
        match self {
            Self::Path(path) => vec![path.as_str()],
            Self::Paths(paths) => paths.iter().map(String::as_str).collect(),
            Self::Introspection(_) => vec![],
        }
    }

    /// Get the introspection configuration if this is an introspection schema config
    #[must_use]
    pub fn introspection_config(&self) -> Option<&IntrospectionSchemaConfig> {
        match self {
            Self::Introspection(config) => Some(config),
            _ => None,
        }
    }

    /// Check if this is an introspection configuration
    #[must_use]
    pub const fn is_introspection(&self) -> bool {
        matches!(self, Self::Introspection(_))
    }
}
