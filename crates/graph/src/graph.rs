use crate::edge::{Edge, EdgeKind};
use crate::render::Dot;
use graphql_model::{Definition, DefinitionKind, FieldDefinition, NamedType, Schema};
use std::collections::BTreeMap;

/// Options controlling edge shape and rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphOptions {
    /// Draw interfaces like unions: one edge per implementor instead of one per field.
    pub interfaces_as_unions: bool,
    /// Keep built-in types, fields, and the edges touching them when rendering.
    pub render_builtins: bool,
}

impl GraphOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_interfaces_as_unions(mut self, enabled: bool) -> Self {
        self.interfaces_as_unions = enabled;
        self
    }

    #[must_use]
    pub fn with_builtins(mut self, enabled: bool) -> Self {
        self.render_builtins = enabled;
        self
    }

    /// Collapses `Interface` into `Object` or `Union` depending on the options.
    #[must_use]
    pub const fn normalize_kind(self, kind: DefinitionKind) -> DefinitionKind {
        match kind {
            DefinitionKind::Interface if self.interfaces_as_unions => DefinitionKind::Union,
            DefinitionKind::Interface => DefinitionKind::Object,
            other => other,
        }
    }
}

/// Named types and the typed edges between them.
#[derive(Debug, Clone)]
pub struct Graph {
    pub(crate) nodes: BTreeMap<String, Definition>,
    pub(crate) edges: BTreeMap<String, Vec<Edge>>,
    pub(crate) options: GraphOptions,
}

impl Graph {
    /// Builds a graph over `definitions`.
    ///
    /// Edges whose target is not among `definitions` are dropped, so a graph
    /// can be built over an already pruned subset.
    #[must_use]
    #[tracing::instrument(skip_all)]
    pub fn new(definitions: impl IntoIterator<Item = Definition>, options: GraphOptions) -> Self {
        let nodes: BTreeMap<String, Definition> = definitions
            .into_iter()
            .map(|definition| (definition.name.clone(), definition))
            .collect();

        let mut graph = Self {
            nodes,
            edges: BTreeMap::new(),
            options,
        };

        let edges: BTreeMap<String, Vec<Edge>> = graph
            .nodes
            .values()
            .map(|definition| (definition.name.clone(), graph.edges_for(definition)))
            .collect();
        graph.edges = edges;

        tracing::debug!(
            nodes = graph.nodes.len(),
            edges = graph.edge_count(),
            "Built type graph"
        );
        graph
    }

    #[must_use]
    pub fn from_schema(schema: &Schema, options: GraphOptions) -> Self {
        Self::new(schema.types.values().cloned(), options)
    }

    fn edges_for(&self, definition: &Definition) -> Vec<Edge> {
        match self.options.normalize_kind(definition.kind) {
            DefinitionKind::Object => definition
                .fields
                .iter()
                .flat_map(|field| self.field_edges(definition, field))
                .collect(),
            DefinitionKind::InputObject => definition
                .input_fields
                .iter()
                .filter_map(|field| {
                    self.edge_to(
                        definition,
                        field.ty.named_type(),
                        EdgeKind::InputField {
                            field: field.name.clone(),
                        },
                    )
                })
                .collect(),
            DefinitionKind::Union => definition
                .possible_types
                .iter()
                .filter_map(|member| {
                    let target = self.nodes.get(member)?;
                    Some(Edge {
                        source: definition.name.clone(),
                        target: target.name.clone(),
                        kind: EdgeKind::PossibleType {
                            member: member.clone(),
                        },
                    })
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// The field's own edge followed by one edge per composite argument.
    fn field_edges(&self, definition: &Definition, field: &FieldDefinition) -> Vec<Edge> {
        let own = self.edge_to(
            definition,
            field.ty.named_type(),
            EdgeKind::Field {
                field: field.name.clone(),
            },
        );
        let arguments = field.arguments.iter().filter_map(|argument| {
            self.edge_to(
                definition,
                argument.ty.named_type(),
                EdgeKind::Argument {
                    field: field.name.clone(),
                    argument: argument.name.clone(),
                },
            )
        });
        own.into_iter().chain(arguments).collect()
    }

    fn edge_to(
        &self,
        source: &Definition,
        target: &NamedType,
        kind: EdgeKind,
    ) -> Option<Edge> {
        if target.is_scalar() {
            return None;
        }
        let target = self.nodes.get(&target.name)?;
        if target.kind == DefinitionKind::Scalar {
            return None;
        }
        Some(Edge {
            source: source.name.clone(),
            target: target.name.clone(),
            kind,
        })
    }

    #[must_use]
    pub const fn options(&self) -> GraphOptions {
        self.options
    }

    #[must_use]
    pub fn node(&self, name: &str) -> Option<&Definition> {
        self.nodes.get(name)
    }

    /// Node definitions in name order.
    pub fn nodes(&self) -> impl Iterator<Item = &Definition> {
        self.nodes.values()
    }

    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Outgoing edges of `name`, in field order.
    #[must_use]
    pub fn edges_from(&self, name: &str) -> &[Edge] {
        self.edges.get(name).map_or(&[], Vec::as_slice)
    }

    /// Every edge, grouped by source name in name order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values().flatten()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    /// Clones of the node definitions in name order, for substituting back into a schema.
    #[must_use]
    pub fn definitions(&self) -> Vec<Definition> {
        self.nodes.values().cloned().collect()
    }

    #[must_use]
    pub fn into_definitions(self) -> Vec<Definition> {
        self.nodes.into_values().collect()
    }

    /// Renders the graph as Graphviz DOT text.
    #[must_use]
    #[tracing::instrument(skip(self), fields(nodes = self.nodes.len()))]
    pub fn to_dot(&self) -> String {
        Dot::new(self).to_string()
    }
}
