//! `.graphqlrc` discovery and loading.
//!
//! A config names where a project's schema lives (files, globs, or an
//! introspection endpoint) and may carry defaults for graph commands under
//! `extensions.graph`:
//!
//! ```yaml
//! schema: "schema/*.graphql"
//! extensions:
//!   graph:
//!     interfacesAsUnions: true
//!     depth: 3
//! ```

mod config;
mod error;
mod loader;

pub use config::{
    GraphExtension, GraphQLConfig, IntrospectionSchemaConfig, ProjectConfig, SchemaConfig,
    DEFAULT_PROJECT,
};
pub use error::{ConfigError, Result};
pub use loader::{find_config, load_config, load_config_from_str};
