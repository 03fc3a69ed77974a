//! Introspection query text.

use crate::{IntrospectionError, Result};
use std::fmt;
use std::str::FromStr;

/// Operation name used for the introspection request.
pub const INTROSPECTION_OPERATION: &str = "IntrospectionQuery";

/// Edition of the GraphQL specification the target server implements.
///
/// Later editions expose more introspection fields; asking an older server
/// for them fails validation, so the query is tailored to the edition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpecVersion {
    June2018,
    #[default]
    October2021,
}

impl SpecVersion {
    pub const ALL: [Self; 2] = [Self::June2018, Self::October2021];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::June2018 => "june2018",
            Self::October2021 => "october2021",
        }
    }

    const fn has_schema_description(self) -> bool {
        matches!(self, Self::October2021)
    }

    const fn has_is_repeatable(self) -> bool {
        matches!(self, Self::October2021)
    }

    const fn has_specified_by_url(self) -> bool {
        matches!(self, Self::October2021)
    }
}

impl fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpecVersion {
    type Err = IntrospectionError;

    fn from_str(raw: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|version| version.as_str() == raw)
            .ok_or_else(|| IntrospectionError::UnknownSpecVersion(raw.to_string()))
    }
}

const QUERY_TEMPLATE: &str = r"
query IntrospectionQuery {
  __schema {
    {{schema_description}}
    queryType { name }
    mutationType { name }
    subscriptionType { name }
    types {
      ...FullType
    }
    directives {
      name
      description
      locations
      args {
        ...InputValue
      }
      {{is_repeatable}}
    }
  }
}

fragment FullType on __Type {
  kind
  name
  description
  fields(includeDeprecated: true) {
    name
    description
    args {
      ...InputValue
    }
    type {
      ...TypeRef
    }
    isDeprecated
    deprecationReason
  }
  inputFields {
    ...InputValue
  }
  interfaces {
    ...TypeRef
  }
  enumValues(includeDeprecated: true) {
    name
    description
    isDeprecated
    deprecationReason
  }
  possibleTypes {
    ...TypeRef
  }
  {{specified_by_url}}
}

fragment InputValue on __InputValue {
  name
  description
  type {
    ...TypeRef
  }
  defaultValue
}

fragment TypeRef on __Type {
  kind
  name
  ofType {
    kind
    name
    ofType {
      kind
      name
      ofType {
        kind
        name
        ofType {
          kind
          name
          ofType {
            kind
            name
            ofType {
              kind
              name
              ofType {
                kind
                name
              }
            }
          }
        }
      }
    }
  }
}
";

/// The introspection query for `version`.
///
/// Type references are unwrapped seven levels deep, enough for wrappers
/// like `[[[String!]!]!]`.
#[must_use]
pub fn introspection_query(version: SpecVersion) -> String {
    let include = |enabled: bool, field: &'static str| if enabled { field } else { "" };
    QUERY_TEMPLATE
        .replace(
            "{{schema_description}}",
            include(version.has_schema_description(), "description"),
        )
        .replace(
            "{{is_repeatable}}",
            include(version.has_is_repeatable(), "isRepeatable"),
        )
        .replace(
            "{{specified_by_url}}",
            include(version.has_specified_by_url(), "specifiedByURL"),
        )
}

/// The JSON request body for the introspection query.
#[must_use]
pub fn request_body(version: SpecVersion) -> serde_json::Value {
    serde_json::json!({
        "query": introspection_query(version),
        "operationName": INTROSPECTION_OPERATION,
    })
}
