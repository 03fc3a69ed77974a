//! Schema loading shared by every command that reads a schema.

use crate::GlobalOptions;
use anyhow::{bail, Context, Result};
use apollo_compiler::validation::Valid;
use graphql_config::{find_config, load_config, GraphExtension, IntrospectionSchemaConfig, ProjectConfig};
use graphql_introspect::{introspection_to_sdl, parse_introspection, IntrospectionClient};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default timeout in seconds for introspection requests.
pub const DEFAULT_TIMEOUT: u64 = 30;

/// One schema document, already converted to SDL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub name: String,
    pub sdl: String,
}

/// A parsed and validated schema plus the project's graph defaults.
#[derive(Debug)]
pub struct LoadedSchema {
    pub schema: Valid<apollo_compiler::Schema>,
    pub defaults: GraphExtension,
}

struct Project {
    config: ProjectConfig,
    base_dir: PathBuf,
}

/// Loads the schema named on the command line, or the configured one.
///
/// Explicit schema arguments win over the config's `schema` entry. The
/// config is still consulted for `extensions.graph` defaults; a discovered
/// config that cannot be used is then only logged.
pub async fn load(global: &GlobalOptions, schemas: &[String]) -> Result<LoadedSchema> {
    let explicit_config = global.config.is_some() || global.project.is_some();
    let project = if schemas.is_empty() || explicit_config {
        load_project(global)?
    } else {
        load_project(global).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Ignoring unusable config");
            None
        })
    };

    let sources = if schemas.is_empty() {
        let Some(project) = &project else {
            bail!(
                "No schema given. Pass schema files as arguments or add a .graphqlrc.yml \
                with a 'schema' entry."
            );
        };
        project_sources(project).await?
    } else {
        schemas
            .iter()
            .map(|arg| read_source(arg))
            .collect::<Result<Vec<_>>>()?
    };

    Ok(LoadedSchema {
        schema: compile(&sources)?,
        defaults: project
            .map(|project| project.config.graph())
            .unwrap_or_default(),
    })
}

fn load_project(global: &GlobalOptions) -> Result<Option<Project>> {
    let path = if let Some(path) = &global.config {
        path.clone()
    } else {
        let current_dir = std::env::current_dir().context("Failed to read current directory")?;
        match find_config(&current_dir) {
            Some(path) => path,
            None if global.project.is_some() => {
                bail!("--project was given but no GraphQL config file was found")
            }
            None => return Ok(None),
        }
    };

    let config = load_config(&path)
        .with_context(|| format!("Failed to load config {}", path.display()))?;
    let project = config.select_project(global.project.as_deref())?.clone();
    Ok(Some(Project {
        config: project,
        base_dir: path.parent().map(Path::to_path_buf).unwrap_or_default(),
    }))
}

async fn project_sources(project: &Project) -> Result<Vec<Source>> {
    if let Some(introspection) = project.config.schema.introspection_config() {
        let client = client_for(introspection);
        let schema = client
            .execute(&introspection.url)
            .await
            .with_context(|| format!("Failed to fetch schema from {}", introspection.url))?;
        return Ok(vec![Source {
            name: introspection.url.clone(),
            sdl: introspection_to_sdl(&schema),
        }]);
    }

    project
        .config
        .schema_files(&project.base_dir)?
        .iter()
        .map(|path| read_source(&path.to_string_lossy()))
        .collect()
}

fn client_for(config: &IntrospectionSchemaConfig) -> IntrospectionClient {
    IntrospectionClient::new()
        .with_headers(config.headers.clone().unwrap_or_default())
        .with_timeout(Duration::from_secs(config.timeout.unwrap_or(DEFAULT_TIMEOUT)))
        .with_retries(config.retry.unwrap_or(0))
}

/// Reads one schema argument: a path, `-` for stdin, or an introspection
/// result in JSON.
pub fn read_source(arg: &str) -> Result<Source> {
    let (name, raw) = if arg == "-" {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("Could not read schema from stdin")?;
        ("stdin".to_string(), raw)
    } else {
        let raw = std::fs::read_to_string(arg)
            .with_context(|| format!("Could not read schema from {arg}"))?;
        (arg.to_string(), raw)
    };

    let is_json = Path::new(arg)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        || (arg == "-" && raw.trim_start().starts_with('{'));
    if !is_json {
        return Ok(Source { name, sdl: raw });
    }

    let introspection = parse_introspection(&raw)
        .with_context(|| format!("Could not read introspection result from {name}"))?;
    tracing::debug!(source = %name, "Converted introspection result to SDL");
    Ok(Source {
        name,
        sdl: introspection_to_sdl(&introspection),
    })
}

/// Parses every source into one schema and validates it.
#[tracing::instrument(skip_all, fields(sources = sources.len()))]
pub fn compile(sources: &[Source]) -> Result<Valid<apollo_compiler::Schema>> {
    let builder = sources
        .iter()
        .fold(apollo_compiler::Schema::builder(), |builder, source| {
            builder.parse(source.sdl.as_str(), source.name.as_str())
        });

    let schema = builder
        .build()
        .map_err(|with_errors| anyhow::anyhow!("{}", with_errors.errors))
        .context("Failed to parse schema")?;
    schema
        .validate()
        .map_err(|with_errors| anyhow::anyhow!("{}", with_errors.errors))
        .context("Schema is invalid")
}
