pub mod introspection;
pub mod json;
pub mod ls;
pub mod merge;
pub mod viz;

use crate::input::LoadedSchema;
use anyhow::{Context, Result};
use clap::Args;
use graphql_config::GraphExtension;
use graphql_graph::{Graph, GraphOptions};
use graphql_model::Schema;
use serde::Serialize;

#[derive(Debug, Clone, Default, Args)]
pub struct SchemaArgs {
    /// Schema files (SDL, or introspection results ending in .json); `-` reads stdin.
    /// Defaults to the schema of the configured project.
    #[arg(value_name = "SCHEMAS")]
    pub schemas: Vec<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ReachabilityArgs {
    /// Only include types reachable from the given type or field, e.g. `Query`
    /// or `Query.user`. May be given multiple times.
    #[arg(long = "from", value_name = "TYPE[.FIELD]")]
    pub from: Vec<String>,

    /// With --from, limit the traversal depth (0 means unlimited)
    #[arg(long, value_name = "N")]
    pub depth: Option<usize>,
}

impl ReachabilityArgs {
    /// The depth flag, falling back to the config default.
    pub fn depth(&self, defaults: GraphExtension) -> usize {
        self.depth.or(defaults.depth).unwrap_or(0)
    }
}

/// Builds the model, narrows it to the reachable types, then drops builtins.
#[tracing::instrument(skip(loaded, reach), fields(roots = reach.from.len()))]
pub fn schema_model(
    loaded: &LoadedSchema,
    reach: &ReachabilityArgs,
    include_builtins: bool,
) -> Result<Schema> {
    let mut schema = Schema::build(&loaded.schema).context("Failed to build schema model")?;

    if !reach.from.is_empty() {
        let pruned = {
            let roots = schema.resolve_names(&reach.from)?;
            Graph::from_schema(&schema, GraphOptions::new())
                .reachable_from(&roots, reach.depth(loaded.defaults))
                .into_definitions()
        };
        schema.replace_types(pruned);
    }

    if !include_builtins {
        schema.filter_builtins();
    }
    Ok(schema)
}

/// Prints `value` as compact JSON on its own line.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value).context("Failed to serialize JSON output")?;
    println!("{json}");
    Ok(())
}
