//! `introspection generate-sdl` and `introspection query`.

use super::print_json;
use crate::input::{self, Source, DEFAULT_TIMEOUT};
use crate::GlobalOptions;
use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use graphql_config::{find_config, load_config, IntrospectionSchemaConfig};
use graphql_introspect::{
    introspection_query, introspection_to_sdl, request_body, IntrospectionClient, SpecVersion,
    TraceSink,
};
use graphql_model::Schema;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Subcommand)]
pub enum IntrospectionCommands {
    /// Generate SDL from a GraphQL endpoint's introspection response
    ///
    /// The endpoint is the URL argument, or the introspection `schema` entry
    /// of the configured project. Introspection does not expose applied
    /// directives, so the generated SDL only carries `@deprecated`.
    GenerateSdl {
        /// GraphQL endpoint URL to introspect (optional if the config has one)
        #[arg(value_name = "URL")]
        url: Option<String>,

        /// HTTP header as "Name: Value", or @FILE to read one header per line.
        /// May be given multiple times; these win over headers from the config.
        #[arg(long = "header", short = 'H', value_name = "HEADER")]
        headers: Vec<String>,

        /// Request timeout in seconds (overrides config file)
        #[arg(long)]
        timeout: Option<u64>,

        /// Number of retry attempts on failure (overrides config file)
        #[arg(long)]
        retry: Option<u32>,

        /// GraphQL spec edition the server implements
        #[arg(long, default_value_t = SpecVersion::default(), value_parser = parse_spec_version)]
        spec_version: SpecVersion,

        /// Print the schema model as JSON instead of SDL
        #[arg(long)]
        json: bool,

        /// With --json, include built-in types and directives
        #[arg(long)]
        include_builtins: bool,

        /// Output file path (writes to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Dump the HTTP request and raw response to stderr
        #[arg(long)]
        trace: bool,
    },

    /// Print the introspection query
    Query {
        /// Print a JSON request body ({"query", "operationName"}) for curl and friends
        #[arg(long)]
        json: bool,

        /// GraphQL spec edition the server implements
        #[arg(long, default_value_t = SpecVersion::default(), value_parser = parse_spec_version)]
        spec_version: SpecVersion,
    },
}

fn parse_spec_version(raw: &str) -> Result<SpecVersion, String> {
    raw.parse().map_err(|e: graphql_introspect::IntrospectionError| e.to_string())
}

pub async fn run(global: &GlobalOptions, command: IntrospectionCommands) -> Result<()> {
    match command {
        IntrospectionCommands::GenerateSdl {
            url,
            headers,
            timeout,
            retry,
            spec_version,
            json,
            include_builtins,
            output,
            trace,
        } => {
            let mut settings = resolve_settings(url, global, &headers, timeout, retry)?;
            settings.trace = trace;
            let options = OutputOptions {
                json,
                include_builtins,
                output,
            };
            run_generate_sdl(settings, spec_version, options).await
        }
        IntrospectionCommands::Query { json, spec_version } => {
            if json {
                print_json(&request_body(spec_version))
            } else {
                println!("{}", introspection_query(spec_version).trim());
                Ok(())
            }
        }
    }
}

/// Resolved introspection settings from config file and CLI arguments.
#[derive(Debug)]
struct IntrospectionSettings {
    url: String,
    headers: Vec<(String, String)>,
    timeout: u64,
    retry: u32,
    trace: bool,
}

#[derive(Debug)]
struct OutputOptions {
    json: bool,
    include_builtins: bool,
    output: Option<PathBuf>,
}

/// Load introspection settings from the configured project.
fn load_from_config(global: &GlobalOptions) -> Result<IntrospectionSchemaConfig> {
    let config_path = if let Some(path) = &global.config {
        path.clone()
    } else {
        let current_dir = std::env::current_dir()?;
        find_config(&current_dir).context(
            "No GraphQL config file found. Use --config to specify one or provide a URL.",
        )?
    };

    let config = load_config(&config_path).context("Failed to load config")?;
    let project = config.select_project(global.project.as_deref())?;
    project.schema.introspection_config().cloned().context(
        "The project does not have an introspection schema config. \
        Expected schema to be an object with a 'url' field.",
    )
}

/// Parses a header string in "Name: Value" format.
fn parse_header(header: &str) -> Result<(String, String)> {
    let Some((name, value)) = header.split_once(':') else {
        anyhow::bail!("Invalid header format: '{header}'. Expected 'Header-Name: Header-Value'");
    };
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("Header name cannot be empty");
    }
    Ok((name.to_string(), value.trim().to_string()))
}

/// Parses `-H` values; `@path` reads one header per non-empty line of a file.
fn parse_headers(raw: &[String]) -> Result<Vec<(String, String)>> {
    let mut headers = Vec::new();
    for header in raw {
        if let Some(path) = header.strip_prefix('@') {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read headers from {path}"))?;
            for line in contents.lines().filter(|line| !line.trim().is_empty()) {
                headers.push(parse_header(line)?);
            }
        } else {
            headers.push(parse_header(header)?);
        }
    }
    Ok(headers)
}

/// Resolve introspection settings from URL/config and CLI overrides.
fn resolve_settings(
    url: Option<String>,
    global: &GlobalOptions,
    cli_headers: &[String],
    cli_timeout: Option<u64>,
    cli_retry: Option<u32>,
) -> Result<IntrospectionSettings> {
    let cli_parsed = parse_headers(cli_headers).context("Failed to parse headers")?;

    if let Some(url) = url {
        return Ok(IntrospectionSettings {
            url,
            headers: cli_parsed,
            timeout: cli_timeout.unwrap_or(DEFAULT_TIMEOUT),
            retry: cli_retry.unwrap_or(0),
            trace: false,
        });
    }

    let introspection_config = load_from_config(global).context(
        "Either a URL argument or a config with an introspection schema is required",
    )?;

    let mut headers: Vec<(String, String)> = introspection_config
        .headers
        .unwrap_or_default()
        .into_iter()
        .collect();
    for (name, value) in cli_parsed {
        headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
        headers.push((name, value));
    }

    Ok(IntrospectionSettings {
        url: introspection_config.url,
        headers,
        timeout: cli_timeout.unwrap_or(introspection_config.timeout.unwrap_or(DEFAULT_TIMEOUT)),
        retry: cli_retry.unwrap_or(introspection_config.retry.unwrap_or(0)),
        trace: false,
    })
}

#[tracing::instrument(skip(settings, options), fields(url = %settings.url))]
async fn run_generate_sdl(
    settings: IntrospectionSettings,
    spec_version: SpecVersion,
    options: OutputOptions,
) -> Result<()> {
    let start_time = std::time::Instant::now();

    let client = introspection_client(&settings, spec_version);

    let spinner = crate::progress::fetch_spinner(&settings.url, options.output.is_some());

    let fetched = client
        .execute(&settings.url)
        .await
        .with_context(|| format!("Failed to fetch schema from {}", settings.url));
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let sdl = introspection_to_sdl(&fetched?);

    let content = if options.json {
        model_json(&settings.url, sdl, options.include_builtins)?
    } else {
        sdl
    };

    if let Some(path) = options.output {
        write_output(&path, &content)?;
        println!(
            "{} Schema downloaded to {} ({})",
            "✓".green(),
            path.display().to_string().cyan(),
            if options.json { "JSON" } else { "SDL" }
        );
        println!("  {} {:.2}s", "⏱".dimmed(), start_time.elapsed().as_secs_f64());
    } else {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(content.as_bytes())
            .context("Failed to write to stdout")?;
        if !content.ends_with('\n') {
            handle.write_all(b"\n").context("Failed to write to stdout")?;
        }
    }
    Ok(())
}

fn introspection_client(
    settings: &IntrospectionSettings,
    spec_version: SpecVersion,
) -> IntrospectionClient {
    let client = IntrospectionClient::new()
        .with_headers(settings.headers.iter().cloned())
        .with_timeout(Duration::from_secs(settings.timeout))
        .with_retries(settings.retry)
        .with_spec_version(spec_version);
    if settings.trace {
        client.with_trace(TraceSink::stderr())
    } else {
        client
    }
}

fn model_json(url: &str, sdl: String, include_builtins: bool) -> Result<String> {
    let compiled = input::compile(&[Source {
        name: url.to_string(),
        sdl,
    }])?;
    let mut schema = Schema::build(&compiled).context("Failed to build schema model")?;
    if !include_builtins {
        schema.filter_builtins();
    }
    serde_json::to_string(&schema).context("Failed to serialize schema")
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("Failed to write to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header_valid() {
        let (name, value) = parse_header("Authorization: Bearer token").unwrap();
        assert_eq!(name, "Authorization");
        assert_eq!(value, "Bearer token");
    }

    #[test]
    fn test_parse_header_with_colons_in_value() {
        let (name, value) = parse_header("X-Custom: value:with:colons").unwrap();
        assert_eq!(name, "X-Custom");
        assert_eq!(value, "value:with:colons");
    }

    #[test]
    fn test_parse_header_invalid() {
        assert!(parse_header("InvalidHeader").is_err());
        assert!(parse_header(": value").is_err());
    }

    #[test]
    fn test_parse_headers_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("headers.txt");
        std::fs::write(&path, "Authorization: Bearer token\n\nX-Team: core\n").unwrap();

        let headers = parse_headers(&[
            format!("@{}", path.display()),
            "Accept: application/json".to_string(),
        ])
        .unwrap();
        assert_eq!(
            headers,
            vec![
                ("Authorization".to_string(), "Bearer token".to_string()),
                ("X-Team".to_string(), "core".to_string()),
                ("Accept".to_string(), "application/json".to_string()),
            ]
        );
    }

    #[test]
    fn test_resolve_settings_with_url() {
        let headers = vec!["Authorization: Bearer token".to_string()];
        let settings = resolve_settings(
            Some("https://example.com/graphql".to_string()),
            &GlobalOptions::default(),
            &headers,
            Some(60),
            Some(3),
        )
        .unwrap();

        assert_eq!(settings.url, "https://example.com/graphql");
        assert_eq!(settings.headers.len(), 1);
        assert_eq!(settings.timeout, 60);
        assert_eq!(settings.retry, 3);
    }

    #[test]
    fn test_resolve_settings_from_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join(".graphqlrc.yml");
        std::fs::write(
            &config_path,
            "schema:\n  url: https://api.example.com/graphql\n  headers:\n    authorization: from-config\n    X-Team: core\n  retry: 2\n",
        )
        .unwrap();
        let global = GlobalOptions {
            config: Some(config_path),
            project: None,
        };

        let settings = resolve_settings(
            None,
            &global,
            &["Authorization: from-cli".to_string()],
            None,
            None,
        )
        .unwrap();
        assert_eq!(settings.url, "https://api.example.com/graphql");
        assert_eq!(settings.timeout, DEFAULT_TIMEOUT);
        assert_eq!(settings.retry, 2);
        assert_eq!(
            settings.headers,
            vec![
                ("X-Team".to_string(), "core".to_string()),
                ("Authorization".to_string(), "from-cli".to_string()),
            ]
        );
    }

    #[test]
    fn test_model_json_from_sdl() {
        let json = model_json(
            "https://example.com/graphql",
            "type Query { hello: String }".to_string(),
            false,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["types"][0]["name"], "Query");
        assert_eq!(value["types"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_parse_spec_version_flag() {
        assert_eq!(parse_spec_version("june2018"), Ok(SpecVersion::June2018));
        assert!(parse_spec_version("2018").is_err());
    }
}
