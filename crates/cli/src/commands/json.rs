use super::{print_json, schema_model, ReachabilityArgs, SchemaArgs};
use crate::{input, GlobalOptions};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct JsonArgs {
    #[command(flatten)]
    pub input: SchemaArgs,

    /// Include built-in types and directives (omitted by default)
    #[arg(long)]
    pub include_builtins: bool,

    #[command(flatten)]
    pub reach: ReachabilityArgs,
}

pub async fn run(global: &GlobalOptions, args: JsonArgs) -> Result<()> {
    let loaded = input::load(global, &args.input.schemas).await?;
    let include_builtins =
        args.include_builtins || loaded.defaults.include_builtins.unwrap_or(false);
    let schema = schema_model(&loaded, &args.reach, include_builtins)?;
    print_json(&schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{compile, LoadedSchema, Source};
    use serde_json::json;

    fn loaded(sdl: &str) -> LoadedSchema {
        LoadedSchema {
            schema: compile(&[Source {
                name: "schema.graphql".to_string(),
                sdl: sdl.to_string(),
            }])
            .unwrap(),
            defaults: graphql_config::GraphExtension::default(),
        }
    }

    #[test]
    fn test_reachable_json() {
        let loaded = loaded(
            r"
            type Query { alpha: Alpha, beta: Beta }
            type Alpha { name: String }
            type Beta { name: String }
            ",
        );
        let reach = ReachabilityArgs {
            from: vec!["Query.alpha".to_string()],
            depth: None,
        };
        let schema = schema_model(&loaded, &reach, false).unwrap();
        let value = serde_json::to_value(&schema).unwrap();

        let names: Vec<&str> = value["types"]
            .as_array()
            .unwrap()
            .iter()
            .map(|ty| ty["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Alpha", "Query"]);
        assert_eq!(
            value["types"][1]["fields"],
            json!([{
                "name": "alpha",
                "type": {"kind": "OBJECT", "name": "Alpha"},
                "typeName": "Alpha",
                "underlyingTypeName": "Alpha"
            }])
        );
        assert_eq!(value["queryTypeName"], "Query");
    }

    #[test]
    fn test_unknown_root_lists_every_name() {
        let loaded = loaded("type Query { alpha: Int }");
        let reach = ReachabilityArgs {
            from: vec!["Nope".to_string(), "Query.beta".to_string()],
            depth: None,
        };
        let error = schema_model(&loaded, &reach, false).unwrap_err();
        let message = error.to_string();
        assert!(message.contains("Nope") && message.contains("Query.beta"), "{message}");
    }
}
