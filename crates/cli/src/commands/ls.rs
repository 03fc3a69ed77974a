//! `ls types`, `ls fields` and `ls directives`.

use super::{print_json, schema_model, ReachabilityArgs, SchemaArgs};
use crate::{input, GlobalOptions};
use anyhow::Result;
use clap::{Args, Subcommand};
use graphql_model::{
    Definition, DefinitionKind, Directive, DirectiveDefinition, FieldDefinition,
    InputValueDefinition, Schema,
};
use serde::Serialize;

#[derive(Subcommand)]
pub enum LsCommands {
    /// List the types of the schema, one per line
    Types(LsTypesArgs),
    /// List fields as `Type.field: Type`, one per line
    Fields(LsFieldsArgs),
    /// List directive definitions
    Directives(LsDirectivesArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct OutputArgs {
    /// Include built-in types and directives (omitted by default)
    #[arg(long)]
    pub include_builtins: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct LsTypesArgs {
    #[command(flatten)]
    pub input: SchemaArgs,

    /// Only list types of the given kind (object, interface, union, input_object, enum, scalar)
    #[arg(long, value_parser = parse_kind)]
    pub kind: Option<DefinitionKind>,

    /// Only list types which are members of the given union
    #[arg(long, value_name = "UNION")]
    pub member_of: Option<String>,

    /// Only list types which implement the given interface
    #[arg(long, value_name = "INTERFACE")]
    pub implements: Option<String>,

    /// Append applied directives to each line (ignored with --json)
    #[arg(long)]
    pub include_directives: bool,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub reach: ReachabilityArgs,
}

#[derive(Debug, Clone, Args)]
pub struct LsFieldsArgs {
    #[command(flatten)]
    pub input: SchemaArgs,

    /// Only include fields which appear on the given type
    #[arg(long, value_name = "TYPE")]
    pub on_type: Option<String>,

    /// Only include fields of the given type, ignoring list and non-null wrappers
    #[arg(long, value_name = "TYPE")]
    pub of_type: Option<String>,

    /// Include argument definitions (ignored with --json)
    #[arg(long)]
    pub include_args: bool,

    /// Append applied directives to each line (ignored with --json)
    #[arg(long)]
    pub include_directives: bool,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub reach: ReachabilityArgs,
}

#[derive(Debug, Clone, Args)]
pub struct LsDirectivesArgs {
    #[command(flatten)]
    pub input: SchemaArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

fn parse_kind(raw: &str) -> Result<DefinitionKind, String> {
    DefinitionKind::from_name(raw).ok_or_else(|| {
        format!("unknown kind '{raw}', expected one of object, interface, union, input_object, enum, scalar")
    })
}

pub async fn run(global: &GlobalOptions, command: LsCommands) -> Result<()> {
    match command {
        LsCommands::Types(args) => {
            let loaded = input::load(global, &args.input.schemas).await?;
            let include_builtins = args.output.include_builtins
                || loaded.defaults.include_builtins.unwrap_or(false);
            let schema = schema_model(&loaded, &args.reach, include_builtins)?;
            let types = select_types(&schema, &args);
            if args.output.json {
                print_json(&types)
            } else {
                for definition in types {
                    println!("{}", format_type(definition, &args));
                }
                Ok(())
            }
        }
        LsCommands::Fields(args) => {
            let loaded = input::load(global, &args.input.schemas).await?;
            let include_builtins = args.output.include_builtins
                || loaded.defaults.include_builtins.unwrap_or(false);
            let schema = schema_model(&loaded, &args.reach, include_builtins)?;
            let members = select_members(&schema, &args);
            if args.output.json {
                print_json(&members)
            } else {
                for member in &members {
                    println!("{}", member.format(&args));
                }
                Ok(())
            }
        }
        LsCommands::Directives(args) => {
            let loaded = input::load(global, &args.input.schemas).await?;
            let include_builtins = args.output.include_builtins
                || loaded.defaults.include_builtins.unwrap_or(false);
            let schema = schema_model(&loaded, &ReachabilityArgs::default(), include_builtins)?;
            if args.output.json {
                print_json(&schema.directives)
            } else {
                for directive in &schema.directives {
                    println!("{}", format_directive_definition(directive));
                }
                Ok(())
            }
        }
    }
}

fn select_types<'s>(schema: &'s Schema, args: &LsTypesArgs) -> Vec<&'s Definition> {
    let members: Option<&[String]> = args.member_of.as_deref().map(|union_name| {
        schema
            .get_type(union_name)
            .map_or(&[][..], |union_| union_.possible_types.as_slice())
    });

    schema
        .definitions()
        .filter(|definition| args.kind.is_none_or(|kind| kind == definition.kind))
        .filter(|definition| members.is_none_or(|members| members.contains(&definition.name)))
        .filter(|definition| {
            args.implements
                .as_ref()
                .is_none_or(|interface| definition.interfaces.contains(interface))
        })
        .collect()
}

fn format_type(definition: &Definition, args: &LsTypesArgs) -> String {
    let directives = if args.include_directives {
        format_directives(&definition.directives)
    } else {
        String::new()
    };
    if args.kind.is_some() {
        format!("{}{directives}", definition.name)
    } else {
        format!("{}\t{}{directives}", definition.kind, definition.name)
    }
}

/// A field or input field, named `Type.field`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Member {
    Field(FieldDefinition),
    InputField(InputValueDefinition),
}

impl Member {
    fn name(&self) -> &str {
        match self {
            Self::Field(field) => &field.name,
            Self::InputField(field) => &field.name,
        }
    }

    fn format(&self, args: &LsFieldsArgs) -> String {
        let (ty, arguments, directives) = match self {
            Self::Field(field) => (&field.ty, field.arguments.as_slice(), &field.directives),
            Self::InputField(field) => (&field.ty, &[][..], &field.directives),
        };
        let arguments = if args.include_args {
            format_argument_definitions(arguments)
        } else {
            String::new()
        };
        let directives = if args.include_directives {
            format_directives(directives)
        } else {
            String::new()
        };
        format!("{}{arguments}: {ty}{directives}", self.name())
    }
}

fn select_members(schema: &Schema, args: &LsFieldsArgs) -> Vec<Member> {
    let of_type = |ty: &graphql_model::Type| {
        args.of_type
            .as_deref()
            .is_none_or(|name| ty.underlying_name() == name)
    };

    let mut members: Vec<Member> = schema
        .definitions()
        .filter(|definition| {
            args.on_type
                .as_ref()
                .is_none_or(|name| *name == definition.name)
        })
        .flat_map(|definition| {
            let qualified = move |name: &str| format!("{}.{name}", definition.name);
            let fields = definition
                .fields
                .iter()
                .filter(|field| of_type(&field.ty))
                .map(move |field| {
                    Member::Field(FieldDefinition {
                        name: qualified(&field.name),
                        ..field.clone()
                    })
                });
            let input_fields = definition
                .input_fields
                .iter()
                .filter(|field| of_type(&field.ty))
                .map(move |field| {
                    Member::InputField(InputValueDefinition {
                        name: qualified(&field.name),
                        ..field.clone()
                    })
                });
            fields.chain(input_fields)
        })
        .collect();
    members.sort_by(|a, b| a.name().cmp(b.name()));
    members
}

fn format_argument_definitions(arguments: &[InputValueDefinition]) -> String {
    if arguments.is_empty() {
        return String::new();
    }
    let formatted: Vec<String> = arguments
        .iter()
        .map(|argument| format!("{}: {}", argument.name, argument.ty))
        .collect();
    format!("({})", formatted.join(", "))
}

/// Applied directives as ` @name(arg: <json>)`, or an empty string.
fn format_directives(directives: &[Directive]) -> String {
    directives
        .iter()
        .map(|directive| {
            let arguments = if directive.arguments.is_empty() {
                String::new()
            } else {
                let formatted: Vec<String> = directive
                    .arguments
                    .iter()
                    .map(|argument| format!("{}: {}", argument.name, argument.value))
                    .collect();
                format!("({})", formatted.join(", "))
            };
            format!(" @{}{arguments}", directive.name)
        })
        .collect()
}

fn format_directive_definition(directive: &DirectiveDefinition) -> String {
    format!(
        "@{}{} on {}",
        directive.name,
        format_argument_definitions(&directive.arguments),
        directive.locations.join(" | ")
    )
}
