mod commands;
mod input;
mod progress;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gqlscope")]
#[command(about = "Inspect, filter and visualize GraphQL schemas", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to GraphQL config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Project name (for multi-project configs)
    #[arg(short, long, global = true)]
    project: Option<String>,

    /// Force colored output even when not a TTY
    #[arg(long, global = true, conflicts_with = "no_color")]
    color: bool,

    /// Disable colored output
    #[arg(long, global = true, conflicts_with = "color")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Options every command shares for locating the schema.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub config: Option<PathBuf>,
    pub project: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List types, fields or directives
    #[command(alias = "list")]
    Ls {
        #[command(subcommand)]
        command: commands::ls::LsCommands,
    },

    /// Print a flattened JSON representation of the schema
    ///
    /// The format is inspired by the introspection type system, but named
    /// type references are flattened into strings (`typeName`,
    /// `underlyingTypeName`) and applied directives are included.
    Json(commands::json::JsonArgs),

    /// Render the schema as a Graphviz DOT digraph
    Viz(commands::viz::VizArgs),

    /// Merge schema files into a single SDL document
    Merge(commands::merge::MergeArgs),

    /// Fetch schemas over HTTP or print the introspection query
    Introspection {
        #[command(subcommand)]
        command: commands::introspection::IntrospectionCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing();
    configure_colors(cli.color, cli.no_color);

    let global = GlobalOptions {
        config: cli.config,
        project: cli.project,
    };

    match cli.command {
        Commands::Ls { command } => commands::ls::run(&global, command).await,
        Commands::Json(args) => commands::json::run(&global, args).await,
        Commands::Viz(args) => commands::viz::run(&global, args).await,
        Commands::Merge(args) => commands::merge::run(&global, args).await,
        Commands::Introspection { command } => {
            commands::introspection::run(&global, command).await
        }
    }
}

/// Logs go to stderr so DOT, JSON and SDL on stdout can be piped.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Only the success summary of `introspection generate-sdl -o` is colored.
fn configure_colors(force_color: bool, no_color: bool) {
    let env = |name: &str| std::env::var_os(name).map(|value| value.to_string_lossy().into_owned());
    if let Some(enabled) = color_override(force_color, no_color, env) {
        colored::control::set_override(enabled);
    }
}

/// Flags win over `NO_COLOR`, which wins over `CLICOLOR_FORCE` and `CLICOLOR`
/// (<https://no-color.org/>, <https://bixense.com/clicolors/>). `None` leaves
/// the TTY check of `colored` in charge.
fn color_override(
    force_color: bool,
    no_color: bool,
    env: impl Fn(&str) -> Option<String>,
) -> Option<bool> {
    if force_color || no_color {
        return Some(force_color);
    }
    if env("NO_COLOR").is_some() {
        return Some(false);
    }
    match (env("CLICOLOR_FORCE").as_deref(), env("CLICOLOR").as_deref()) {
        (Some(force), _) if !force.is_empty() && force != "0" => Some(true),
        (_, Some("0")) => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::color_override;

    fn decide(force: bool, off: bool, vars: &[(&str, &str)]) -> Option<bool> {
        color_override(force, off, |name| {
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_string())
        })
    }

    #[test]
    fn test_color_override() {
        let cases: &[(bool, bool, &[(&str, &str)], Option<bool>)] = &[
            (false, false, &[], None),
            (true, false, &[("NO_COLOR", "1")], Some(true)),
            (false, true, &[("CLICOLOR_FORCE", "1")], Some(false)),
            (false, false, &[("NO_COLOR", ""), ("CLICOLOR_FORCE", "1")], Some(false)),
            (false, false, &[("CLICOLOR_FORCE", "1")], Some(true)),
            (false, false, &[("CLICOLOR_FORCE", "0"), ("CLICOLOR", "0")], Some(false)),
            (false, false, &[("CLICOLOR", "1")], None),
        ];
        for (force, off, vars, expected) in cases {
            assert_eq!(decide(*force, *off, vars), *expected, "{vars:?}");
        }
    }
}
