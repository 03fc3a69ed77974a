//! Type reference graph over a [`graphql_model::Schema`].
//!
//! Nodes are named types. Edges connect a field, argument, input field, or
//! union member to the composite type it refers to; scalars are terminal and
//! never produce edges. A graph can be pruned to the closure of a set of root
//! names with [`Graph::reachable_from`] and rendered as Graphviz DOT with
//! [`Graph::to_dot`].
//!
//! ```
//! use graphql_graph::{Graph, GraphOptions};
//! use graphql_model::Schema;
//!
//! let compiled = apollo_compiler::Schema::parse_and_validate(
//!     "type Query { user: User } type User { name: String, best: User }",
//!     "schema.graphql",
//! )
//! .unwrap();
//! let schema = Schema::build(&compiled).unwrap();
//! let graph = Graph::from_schema(&schema, GraphOptions::default());
//!
//! let roots = schema.resolve_names(&["Query.user"]).unwrap();
//! let pruned = graph.reachable_from(&roots, 0);
//! assert_eq!(pruned.node_names().collect::<Vec<_>>(), vec!["Query", "User"]);
//! ```

mod edge;
mod filter;
mod graph;
mod reachability;
mod render;

pub use edge::{Edge, EdgeKind};
pub use filter::{apply_field_filters, field_filters, FieldSelection};
pub use graph::{Graph, GraphOptions};
pub use render::Dot;
