//! Type definitions for GraphQL introspection responses.
//!
//! These types mirror the `__schema` shape returned by the introspection query
//! and deserialize from either a full response body (`{"data": {"__schema": ..}}`)
//! or a bare `{"__schema": ..}` document.

use crate::{IntrospectionError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A GraphQL response body carrying introspection data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntrospectionResponse {
    pub data: Option<IntrospectionData>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub errors: Vec<GraphQLError>,
}

impl IntrospectionResponse {
    /// The schema, or every error the server reported.
    pub fn into_schema(self) -> Result<IntrospectionSchema> {
        if !self.errors.is_empty() {
            return Err(IntrospectionError::GraphQL(
                self.errors.iter().map(ToString::to_string).collect(),
            ));
        }
        self.data
            .map(|data| data.schema)
            .ok_or_else(|| IntrospectionError::Invalid("response has no data".to_string()))
    }
}

/// Data field of the introspection response containing the schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntrospectionData {
    #[serde(rename = "__schema")]
    pub schema: IntrospectionSchema,
}

/// One entry of a response's `errors` list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQLError {
    pub message: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub path: Vec<serde_json::Value>,
}

impl fmt::Display for GraphQLError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("error executing introspection query")?;
        if !self.path.is_empty() {
            let path: Vec<String> = self
                .path
                .iter()
                .map(|segment| match segment {
                    serde_json::Value::String(name) => name.clone(),
                    other => other.to_string(),
                })
                .collect();
            write!(f, " at path {}", path.join("."))?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Parses an introspection result from JSON text.
///
/// Accepts a full response body, surfacing its `errors` if present, or a bare
/// `{"__schema": ..}` document.
///
/// ```
/// let schema = graphql_introspect::parse_introspection(
///     r#"{"__schema": {"queryType": {"name": "Query"}, "types": [], "directives": []}}"#,
/// )
/// .unwrap();
/// assert_eq!(schema.query_type.unwrap().name, "Query");
/// ```
pub fn parse_introspection(json: &str) -> Result<IntrospectionSchema> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| IntrospectionError::Parse(e.to_string()))?;

    if value.get("__schema").is_some() {
        let data: IntrospectionData = serde_json::from_value(value)
            .map_err(|e| IntrospectionError::Parse(e.to_string()))?;
        return Ok(data.schema);
    }
    if value.get("data").is_none() && value.get("errors").is_none() {
        return Err(IntrospectionError::Invalid(
            "expected a `__schema` or `data` key".to_string(),
        ));
    }

    let response: IntrospectionResponse =
        serde_json::from_value(value).map_err(|e| IntrospectionError::Parse(e.to_string()))?;
    response.into_schema()
}

/// Complete GraphQL schema information from introspection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionSchema {
    pub description: Option<String>,
    pub query_type: Option<IntrospectionTypeRef>,
    pub mutation_type: Option<IntrospectionTypeRef>,
    pub subscription_type: Option<IntrospectionTypeRef>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub types: Vec<IntrospectionType>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub directives: Vec<IntrospectionDirective>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntrospectionTypeRef {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum IntrospectionType {
    #[serde(rename = "SCALAR")]
    Scalar(IntrospectionScalarType),
    #[serde(rename = "OBJECT")]
    Object(IntrospectionObjectType),
    #[serde(rename = "INTERFACE")]
    Interface(IntrospectionInterfaceType),
    #[serde(rename = "UNION")]
    Union(IntrospectionUnionType),
    #[serde(rename = "ENUM")]
    Enum(IntrospectionEnumType),
    #[serde(rename = "INPUT_OBJECT")]
    InputObject(IntrospectionInputObjectType),
}

impl IntrospectionType {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Scalar(t) => &t.name,
            Self::Object(t) => &t.name,
            Self::Interface(t) => &t.name,
            Self::Union(t) => &t.name,
            Self::Enum(t) => &t.name,
            Self::InputObject(t) => &t.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionScalarType {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "specifiedByURL")]
    pub specified_by_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionObjectType {
    pub name: String,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub fields: Vec<IntrospectionField>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub interfaces: Vec<IntrospectionTypeRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionInterfaceType {
    pub name: String,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub fields: Vec<IntrospectionField>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub interfaces: Vec<IntrospectionTypeRef>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub possible_types: Vec<IntrospectionTypeRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionUnionType {
    pub name: String,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub possible_types: Vec<IntrospectionTypeRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionEnumType {
    pub name: String,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub enum_values: Vec<IntrospectionEnumValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionInputObjectType {
    pub name: String,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub input_fields: Vec<IntrospectionInputValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionField {
    pub name: String,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub args: Vec<IntrospectionInputValue>,
    #[serde(rename = "type")]
    pub type_ref: IntrospectionTypeRefFull,
    #[serde(default)]
    pub is_deprecated: bool,
    pub deprecation_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionInputValue {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub type_ref: IntrospectionTypeRefFull,
    /// The default as GraphQL literal text, e.g. `{direction: ASC}`.
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionEnumValue {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub is_deprecated: bool,
    pub deprecation_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionDirective {
    pub name: String,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub locations: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub args: Vec<IntrospectionInputValue>,
    #[serde(default)]
    pub is_repeatable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionTypeRefFull {
    pub kind: TypeKind,
    pub name: Option<String>,
    pub of_type: Option<Box<IntrospectionTypeRefFull>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

impl IntrospectionTypeRefFull {
    /// Converts the type reference to a GraphQL type string.
    ///
    /// Handles type wrappers like `NonNull` and `List` to generate strings like:
    /// - `String` for a simple scalar
    /// - `String!` for a non-null scalar
    /// - `[String]` for a list
    /// - `[String!]!` for a non-null list of non-null strings
    ///
    /// # Examples
    ///
    /// ```
    /// # use graphql_introspect::{IntrospectionTypeRefFull, TypeKind};
    /// let type_ref = IntrospectionTypeRefFull {
    ///     kind: TypeKind::NonNull,
    ///     name: None,
    ///     of_type: Some(Box::new(IntrospectionTypeRefFull {
    ///         kind: TypeKind::Scalar,
    ///         name: Some("String".to_string()),
    ///         of_type: None,
    ///     })),
    /// };
    /// assert_eq!(type_ref.to_type_string(), "String!");
    /// ```
    #[must_use]
    pub fn to_type_string(&self) -> String {
        match self.kind {
            TypeKind::NonNull => self.of_type.as_ref().map_or_else(
                || "!".to_string(),
                |of_type| format!("{}!", of_type.to_type_string()),
            ),
            TypeKind::List => self.of_type.as_ref().map_or_else(
                || "[]".to_string(),
                |of_type| format!("[{}]", of_type.to_type_string()),
            ),
            _ => self.name.as_deref().unwrap_or_default().to_string(),
        }
    }
}

impl fmt::Display for IntrospectionTypeRefFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_type_string())
    }
}

/// Servers that predate a field sometimes send `null` for lists; treat it as empty.
fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}
