use crate::types::{DefinitionKind, Type};
use crate::value::{self, Value};
use crate::Result;
use apollo_compiler::{ast, schema, Node};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// One named type of the schema.
///
/// Which member lists are populated depends on `kind`: objects and interfaces
/// carry `fields`, input objects carry `input_fields`, enums carry
/// `enum_values`, unions and interfaces carry `possible_types`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Definition {
    pub kind: DefinitionKind,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub directives: Vec<Directive>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDefinition>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub input_fields: Vec<InputValueDefinition>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<String>,
    #[serde(rename = "possibleTypeNames", skip_serializing_if = "Vec::is_empty")]
    pub possible_types: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<EnumValueDefinition>,
}

impl Definition {
    #[must_use]
    pub fn new(kind: DefinitionKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            description: None,
            directives: Vec::new(),
            fields: Vec::new(),
            input_fields: Vec::new(),
            interfaces: Vec::new(),
            possible_types: Vec::new(),
            enum_values: Vec::new(),
        }
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.name == name)
    }

    #[must_use]
    pub fn input_field(&self, name: &str) -> Option<&InputValueDefinition> {
        self.input_fields.iter().find(|field| field.name == name)
    }

    /// Keeps only the fields and input fields accepted by `keep`.
    #[must_use]
    pub fn with_members_filtered(&self, mut keep: impl FnMut(&str) -> bool) -> Self {
        let mut pruned = self.clone();
        pruned.fields.retain(|field| keep(&field.name));
        pruned.input_fields.retain(|field| keep(&field.name));
        pruned
    }

    pub(crate) fn from_extended(ty: &schema::ExtendedType) -> Result<Self> {
        let definition = match ty {
            schema::ExtendedType::Scalar(scalar) => Self {
                description: description(scalar.description.as_ref()),
                directives: directives(scalar.directives.iter().map(|d| &***d))?,
                ..Self::new(DefinitionKind::Scalar, scalar.name.as_str())
            },
            schema::ExtendedType::Object(object) => Self {
                description: description(object.description.as_ref()),
                directives: directives(object.directives.iter().map(|d| &***d))?,
                fields: object
                    .fields
                    .values()
                    .map(|field| FieldDefinition::from_ast(field))
                    .collect::<Result<_>>()?,
                interfaces: object
                    .implements_interfaces
                    .iter()
                    .map(|name| name.to_string())
                    .collect(),
                ..Self::new(DefinitionKind::Object, object.name.as_str())
            },
            schema::ExtendedType::Interface(interface) => Self {
                description: description(interface.description.as_ref()),
                directives: directives(interface.directives.iter().map(|d| &***d))?,
                fields: interface
                    .fields
                    .values()
                    .map(|field| FieldDefinition::from_ast(field))
                    .collect::<Result<_>>()?,
                interfaces: interface
                    .implements_interfaces
                    .iter()
                    .map(|name| name.to_string())
                    .collect(),
                ..Self::new(DefinitionKind::Interface, interface.name.as_str())
            },
            schema::ExtendedType::Union(union_) => Self {
                description: description(union_.description.as_ref()),
                directives: directives(union_.directives.iter().map(|d| &***d))?,
                possible_types: union_.members.iter().map(|name| name.to_string()).collect(),
                ..Self::new(DefinitionKind::Union, union_.name.as_str())
            },
            schema::ExtendedType::Enum(enum_) => Self {
                description: description(enum_.description.as_ref()),
                directives: directives(enum_.directives.iter().map(|d| &***d))?,
                enum_values: enum_
                    .values
                    .values()
                    .map(|value| EnumValueDefinition::from_ast(value))
                    .collect::<Result<_>>()?,
                ..Self::new(DefinitionKind::Enum, enum_.name.as_str())
            },
            schema::ExtendedType::InputObject(input) => Self {
                description: description(input.description.as_ref()),
                directives: directives(input.directives.iter().map(|d| &***d))?,
                input_fields: input
                    .fields
                    .values()
                    .map(|field| InputValueDefinition::from_ast(field))
                    .collect::<Result<_>>()?,
                ..Self::new(DefinitionKind::InputObject, input.name.as_str())
            },
        };
        Ok(definition)
    }

    /// Every type reference held by this definition, for kind resolution.
    pub(crate) fn type_refs_mut(&mut self) -> impl Iterator<Item = &mut Type> + '_ {
        let field_refs = self.fields.iter_mut().flat_map(|field| {
            std::iter::once(&mut field.ty).chain(field.arguments.iter_mut().map(|arg| &mut arg.ty))
        });
        let input_refs = self.input_fields.iter_mut().map(|field| &mut field.ty);
        field_refs.chain(input_refs)
    }
}

/// A field of an object or interface type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub name: String,
    pub description: Option<String>,
    pub ty: Type,
    pub arguments: Vec<InputValueDefinition>,
    pub directives: Vec<Directive>,
}

impl FieldDefinition {
    fn from_ast(field: &ast::FieldDefinition) -> Result<Self> {
        Ok(Self {
            name: field.name.to_string(),
            description: description(field.description.as_ref()),
            ty: Type::from_ast(&field.ty),
            arguments: field
                .arguments
                .iter()
                .map(|arg| InputValueDefinition::from_ast(arg))
                .collect::<Result<_>>()?,
            directives: directives(field.directives.iter().map(|d| &**d))?,
        })
    }

    #[must_use]
    pub fn argument(&self, name: &str) -> Option<&InputValueDefinition> {
        self.arguments.iter().find(|arg| arg.name == name)
    }
}

impl Serialize for FieldDefinition {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("type", &self.ty)?;
        map.serialize_entry("typeName", &self.ty.to_string())?;
        map.serialize_entry("underlyingTypeName", self.ty.underlying_name())?;
        if let Some(description) = &self.description {
            map.serialize_entry("description", description)?;
        }
        if !self.arguments.is_empty() {
            map.serialize_entry("arguments", &self.arguments)?;
        }
        if !self.directives.is_empty() {
            map.serialize_entry("directives", &self.directives)?;
        }
        map.end()
    }
}

/// An argument, input-object field, or directive argument.
#[derive(Debug, Clone, PartialEq)]
pub struct InputValueDefinition {
    pub name: String,
    pub description: Option<String>,
    pub ty: Type,
    /// `Some(Value::Null)` for an explicit `= null` default.
    pub default_value: Option<Value>,
    pub directives: Vec<Directive>,
}

impl InputValueDefinition {
    fn from_ast(input: &ast::InputValueDefinition) -> Result<Self> {
        Ok(Self {
            name: input.name.to_string(),
            description: description(input.description.as_ref()),
            ty: Type::from_ast(&input.ty),
            default_value: input
                .default_value
                .as_ref()
                .map(|default| value::from_ast(default))
                .transpose()?,
            directives: directives(input.directives.iter().map(|d| &**d))?,
        })
    }
}

impl Serialize for InputValueDefinition {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("type", &self.ty)?;
        map.serialize_entry("typeName", &self.ty.to_string())?;
        map.serialize_entry("underlyingTypeName", self.ty.underlying_name())?;
        if let Some(description) = &self.description {
            map.serialize_entry("description", description)?;
        }
        if let Some(default_value) = &self.default_value {
            map.serialize_entry("defaultValue", default_value)?;
        }
        if !self.directives.is_empty() {
            map.serialize_entry("directives", &self.directives)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumValueDefinition {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub directives: Vec<Directive>,
}

impl EnumValueDefinition {
    fn from_ast(value: &ast::EnumValueDefinition) -> Result<Self> {
        Ok(Self {
            name: value.value.to_string(),
            description: description(value.description.as_ref()),
            directives: directives(value.directives.iter().map(|d| &**d))?,
        })
    }
}

/// A directive applied to a type, field, argument, or enum value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Directive {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<Argument>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Argument {
    pub name: String,
    pub value: Value,
}

impl Directive {
    fn from_ast(directive: &ast::Directive) -> Result<Self> {
        Ok(Self {
            name: directive.name.to_string(),
            arguments: directive
                .arguments
                .iter()
                .map(|arg| {
                    Ok(Argument {
                        name: arg.name.to_string(),
                        value: value::from_ast(&arg.value)?,
                    })
                })
                .collect::<Result<_>>()?,
        })
    }
}

/// A `directive @name(...) on ...` declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectiveDefinition {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<InputValueDefinition>,
    pub locations: Vec<String>,
    #[serde(rename = "repeatable")]
    pub is_repeatable: bool,
}

impl DirectiveDefinition {
    pub(crate) fn from_ast(definition: &ast::DirectiveDefinition) -> Result<Self> {
        Ok(Self {
            name: definition.name.to_string(),
            description: description(definition.description.as_ref()),
            arguments: definition
                .arguments
                .iter()
                .map(|arg| InputValueDefinition::from_ast(arg))
                .collect::<Result<_>>()?,
            locations: definition
                .locations
                .iter()
                .map(ToString::to_string)
                .collect(),
            is_repeatable: definition.repeatable,
        })
    }
}

fn description(description: Option<&Node<str>>) -> Option<String> {
    description.map(|d| d.to_string())
}

fn directives<'a>(list: impl Iterator<Item = &'a ast::Directive>) -> Result<Vec<Directive>> {
    list.map(Directive::from_ast).collect()
}
