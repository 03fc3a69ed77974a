use super::{ReachabilityArgs, SchemaArgs};
use crate::input::{self, LoadedSchema};
use crate::GlobalOptions;
use anyhow::{Context, Result};
use clap::Args;
use graphql_graph::{Graph, GraphOptions};
use graphql_model::Schema;

#[derive(Debug, Clone, Args)]
pub struct VizArgs {
    #[command(flatten)]
    pub input: SchemaArgs,

    #[command(flatten)]
    pub reach: ReachabilityArgs,

    /// Draw interfaces like unions, with one edge per implementing type
    #[arg(long)]
    pub interfaces_as_unions: bool,

    /// Draw built-in types and introspection fields
    #[arg(long)]
    pub include_builtins: bool,
}

pub async fn run(global: &GlobalOptions, args: VizArgs) -> Result<()> {
    let loaded = input::load(global, &args.input.schemas).await?;
    print!("{}", render(&loaded, &args)?);
    Ok(())
}

fn render(loaded: &LoadedSchema, args: &VizArgs) -> Result<String> {
    let schema = Schema::build(&loaded.schema).context("Failed to build schema model")?;
    let options = GraphOptions::new()
        .with_interfaces_as_unions(
            args.interfaces_as_unions || loaded.defaults.interfaces_as_unions.unwrap_or(false),
        )
        .with_builtins(args.include_builtins || loaded.defaults.include_builtins.unwrap_or(false));

    let mut graph = Graph::from_schema(&schema, options);
    if !args.reach.from.is_empty() {
        let roots = schema.resolve_names(&args.reach.from)?;
        graph = graph.reachable_from(&roots, args.reach.depth(loaded.defaults));
    }
    Ok(graph.to_dot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{compile, Source};
    use graphql_config::GraphExtension;

    const SDL: &str = r"
        type Query { persons(filter: PersonFilter): [Person] }
        type Person { name: String, favoriteFoods: [Food] }
        type Food { name: String }
        input PersonFilter { nameLike: String }
    ";

    fn loaded(defaults: GraphExtension) -> LoadedSchema {
        LoadedSchema {
            schema: compile(&[Source {
                name: "schema.graphql".to_string(),
                sdl: SDL.to_string(),
            }])
            .unwrap(),
            defaults,
        }
    }

    fn args(from: &[&str], depth: Option<usize>) -> VizArgs {
        VizArgs {
            input: SchemaArgs::default(),
            reach: ReachabilityArgs {
                from: from.iter().map(ToString::to_string).collect(),
                depth,
            },
            interfaces_as_unions: false,
            include_builtins: false,
        }
    }

    #[test]
    fn test_viz_whole_schema() {
        let dot = render(&loaded(GraphExtension::default()), &args(&[], None)).unwrap();
        assert!(dot.starts_with("digraph {"), "{dot}");
        for node in ["n_Query", "n_Person", "n_Food", "n_PersonFilter"] {
            assert!(dot.contains(&format!("  {node} [")), "missing {node}:\n{dot}");
        }
        assert!(!dot.contains("n___Schema"));
    }

    #[test]
    fn test_viz_depth_from_flag_and_config() {
        let dot = render(&loaded(GraphExtension::default()), &args(&["Query.persons"], Some(2))).unwrap();
        assert!(dot.contains("n_Person ["));
        assert!(!dot.contains("n_Food ["), "{dot}");

        let defaults = GraphExtension {
            depth: Some(2),
            ..GraphExtension::default()
        };
        let dot = render(&loaded(defaults), &args(&["Query.persons"], None)).unwrap();
        assert!(!dot.contains("n_Food ["), "{dot}");

        let dot = render(&loaded(defaults), &args(&["Query.persons"], Some(0))).unwrap();
        assert!(dot.contains("n_Food ["), "{dot}");
    }
}
