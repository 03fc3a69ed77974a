//! Flattened model of a GraphQL type system.
//!
//! A [`Schema`] is built from an already parsed and validated
//! [`apollo_compiler::Schema`]. Every named type reference in the model has its
//! [`DefinitionKind`] resolved up front, so downstream consumers can tell a
//! terminal scalar from a composite type without consulting the source schema.
//!
//! ```
//! use graphql_model::Schema;
//!
//! let compiled = apollo_compiler::Schema::parse_and_validate(
//!     "type Query { hello: String }",
//!     "schema.graphql",
//! )
//! .unwrap();
//! let mut schema = Schema::build(&compiled).unwrap();
//! schema.filter_builtins();
//!
//! assert_eq!(schema.query_type_name.as_deref(), Some("Query"));
//! assert!(schema.types.contains_key("Query"));
//! assert!(!schema.types.contains_key("String"));
//! ```

mod builtins;
mod definition;
mod error;
mod name_reference;
mod schema;
mod types;
mod value;

pub use builtins::{is_builtin_directive, is_builtin_field, is_builtin_type};
pub use definition::{
    Argument, Definition, Directive, DirectiveDefinition, EnumValueDefinition, FieldDefinition,
    InputValueDefinition,
};
pub use error::{ModelError, Result};
pub use name_reference::NameReference;
pub use schema::Schema;
pub use types::{DefinitionKind, NamedType, Type};
pub use value::Value;
