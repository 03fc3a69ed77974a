//! SDL (Schema Definition Language) conversion from introspection responses.

use crate::types::{
    IntrospectionField, IntrospectionInputValue, IntrospectionSchema, IntrospectionType,
    IntrospectionTypeRef,
};
use std::fmt::{self, Write};

/// Built-in GraphQL scalar types that should not be included in generated SDL.
const BUILTIN_SCALARS: &[&str] = &["Int", "Float", "String", "Boolean", "ID"];

/// Directives every SDL parser already knows. Redefining them is an error.
const BUILTIN_DIRECTIVES: &[&str] = &["skip", "include", "deprecated", "specifiedBy", "oneOf"];

/// Converts an introspected schema to SDL.
///
/// Introspection types (`__` prefix), built-in scalars and built-in directives
/// are left out. Descriptions, deprecations, `@specifiedBy` URLs, repeatable
/// directives and default values are kept.
///
/// ```
/// let schema = graphql_introspect::parse_introspection(r#"{"__schema": {
///     "queryType": {"name": "Query"},
///     "types": [{"kind": "OBJECT", "name": "Query", "fields": [{
///         "name": "hello", "args": [],
///         "type": {"kind": "SCALAR", "name": "String"}
///     }], "interfaces": []}],
///     "directives": []
/// }}"#)
/// .unwrap();
/// assert_eq!(
///     graphql_introspect::introspection_to_sdl(&schema),
///     "type Query {\n  hello: String\n}"
/// );
/// ```
#[must_use]
#[tracing::instrument(skip(schema), fields(
    types = schema.types.len(),
    directives = schema.directives.len()
))]
pub fn introspection_to_sdl(schema: &IntrospectionSchema) -> String {
    let sdl = Sdl(schema).to_string();
    tracing::debug!(sdl_length = sdl.len(), "SDL generation complete");
    sdl
}

/// Displays an introspected schema as SDL text.
#[derive(Debug, Clone, Copy)]
pub struct Sdl<'a>(pub &'a IntrospectionSchema);

impl fmt::Display for Sdl<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut blocks = Vec::new();
        let schema = self.0;

        // Parsers pick up `Query`, `Mutation` and `Subscription` as roots by
        // name when no schema block is present.
        let root_is_default = |root: Option<&IntrospectionTypeRef>, default: &str| match root {
            Some(root) => root.name == default,
            None => !schema.types.iter().any(|t| t.name() == default),
        };
        let needs_schema_def = schema.description.is_some()
            || !root_is_default(schema.query_type.as_ref(), "Query")
            || !root_is_default(schema.mutation_type.as_ref(), "Mutation")
            || !root_is_default(schema.subscription_type.as_ref(), "Subscription");

        if needs_schema_def {
            let mut block = String::new();
            write_description(&mut block, schema.description.as_deref(), 0)?;
            block.push_str("schema {\n");
            let roots = [
                ("query", &schema.query_type),
                ("mutation", &schema.mutation_type),
                ("subscription", &schema.subscription_type),
            ];
            for (operation, root) in roots {
                if let Some(root) = root {
                    writeln!(block, "  {operation}: {}", root.name)?;
                }
            }
            block.push('}');
            blocks.push(block);
        }

        for directive in &schema.directives {
            if BUILTIN_DIRECTIVES.contains(&directive.name.as_str()) {
                continue;
            }

            let mut block = String::new();
            write_description(&mut block, directive.description.as_deref(), 0)?;
            write!(block, "directive @{}", directive.name)?;
            write_arguments(&mut block, &directive.args)?;
            if directive.is_repeatable {
                block.push_str(" repeatable");
            }
            write!(block, " on {}", directive.locations.join(" | "))?;
            blocks.push(block);
        }

        for type_def in &schema.types {
            let name = type_def.name();
            if name.starts_with("__") || BUILTIN_SCALARS.contains(&name) {
                continue;
            }
            let mut block = String::new();
            write_type(&mut block, type_def)?;
            blocks.push(block);
        }

        f.write_str(&blocks.join("\n\n"))
    }
}

fn write_type(sdl: &mut String, type_def: &IntrospectionType) -> fmt::Result {
    match type_def {
        IntrospectionType::Scalar(t) => {
            write_description(sdl, t.description.as_deref(), 0)?;
            write!(sdl, "scalar {}", t.name)?;
            if let Some(url) = &t.specified_by_url {
                write!(sdl, " @specifiedBy(url: \"{}\")", escape_string(url))?;
            }
        }
        IntrospectionType::Object(t) => {
            write_description(sdl, t.description.as_deref(), 0)?;
            write!(sdl, "type {}", t.name)?;
            write_implements(sdl, &t.interfaces);
            write_fields(sdl, &t.fields)?;
        }
        IntrospectionType::Interface(t) => {
            write_description(sdl, t.description.as_deref(), 0)?;
            write!(sdl, "interface {}", t.name)?;
            write_implements(sdl, &t.interfaces);
            write_fields(sdl, &t.fields)?;
        }
        IntrospectionType::Union(t) => {
            write_description(sdl, t.description.as_deref(), 0)?;
            write!(sdl, "union {}", t.name)?;
            if !t.possible_types.is_empty() {
                let members: Vec<&str> =
                    t.possible_types.iter().map(|member| member.name.as_str()).collect();
                write!(sdl, " = {}", members.join(" | "))?;
            }
        }
        IntrospectionType::Enum(t) => {
            write_description(sdl, t.description.as_deref(), 0)?;
            writeln!(sdl, "enum {} {{", t.name)?;
            for value in &t.enum_values {
                write_description(sdl, value.description.as_deref(), 1)?;
                write!(sdl, "  {}", value.name)?;
                if value.is_deprecated {
                    write_deprecated(sdl, value.deprecation_reason.as_deref())?;
                }
                sdl.push('\n');
            }
            sdl.push('}');
        }
        IntrospectionType::InputObject(t) => {
            write_description(sdl, t.description.as_deref(), 0)?;
            writeln!(sdl, "input {} {{", t.name)?;
            for field in &t.input_fields {
                write_description(sdl, field.description.as_deref(), 1)?;
                sdl.push_str("  ");
                write_input_value(sdl, field)?;
                sdl.push('\n');
            }
            sdl.push('}');
        }
    }
    Ok(())
}

fn write_implements(sdl: &mut String, interfaces: &[IntrospectionTypeRef]) {
    if !interfaces.is_empty() {
        let names: Vec<&str> = interfaces.iter().map(|i| i.name.as_str()).collect();
        sdl.push_str(" implements ");
        sdl.push_str(&names.join(" & "));
    }
}

fn write_fields(sdl: &mut String, fields: &[IntrospectionField]) -> fmt::Result {
    sdl.push_str(" {\n");
    for field in fields {
        write_field(sdl, field, 1)?;
    }
    sdl.push('}');
    Ok(())
}

fn write_field(sdl: &mut String, field: &IntrospectionField, indent: usize) -> fmt::Result {
    let indent_str = "  ".repeat(indent);

    write_description(sdl, field.description.as_deref(), indent)?;
    write!(sdl, "{indent_str}{}", field.name)?;
    write_arguments(sdl, &field.args)?;
    write!(sdl, ": {}", field.type_ref)?;

    if field.is_deprecated {
        write_deprecated(sdl, field.deprecation_reason.as_deref())?;
    }

    sdl.push('\n');
    Ok(())
}

fn write_arguments(sdl: &mut String, args: &[IntrospectionInputValue]) -> fmt::Result {
    if args.is_empty() {
        return Ok(());
    }
    sdl.push('(');
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            sdl.push_str(", ");
        }
        if let Some(description) = &arg.description {
            write!(sdl, "\"{}\" ", escape_string(description))?;
        }
        write_input_value(sdl, arg)?;
    }
    sdl.push(')');
    Ok(())
}

fn write_input_value(sdl: &mut String, value: &IntrospectionInputValue) -> fmt::Result {
    write!(sdl, "{}: {}", value.name, value.type_ref)?;
    if let Some(default) = &value.default_value {
        write!(sdl, " = {default}")?;
    }
    Ok(())
}

fn write_deprecated(sdl: &mut String, reason: Option<&str>) -> fmt::Result {
    match reason {
        Some(reason) => write!(sdl, " @deprecated(reason: \"{}\")", escape_string(reason)),
        None => {
            sdl.push_str(" @deprecated");
            Ok(())
        }
    }
}

fn write_description(sdl: &mut String, description: Option<&str>, indent: usize) -> fmt::Result {
    let Some(desc) = description else {
        return Ok(());
    };
    let indent_str = "  ".repeat(indent);
    if desc.contains('\n') {
        writeln!(
            sdl,
            "{indent_str}\"\"\"\n{}\n{indent_str}\"\"\"",
            desc.replace("\"\"\"", "\\\"\"\"")
        )
    } else {
        writeln!(sdl, "{indent_str}\"{}\"", escape_string(desc))
    }
}

fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
