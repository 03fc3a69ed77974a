use crate::filter::{field_filters, FieldSelection};
use crate::graph::Graph;
use graphql_model::{Definition, DefinitionKind, NameReference};
use std::collections::{BTreeMap, BTreeSet};

/// A visited whole type (`member == None`) or a visited field of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Visit<'g> {
    type_name: &'g str,
    member: Option<&'g str>,
}

struct Traversal<'g> {
    graph: &'g Graph,
    max_depth: usize,
    seen: BTreeSet<Visit<'g>>,
}

impl<'g> Traversal<'g> {
    fn beyond_limit(&self, depth: usize) -> bool {
        self.max_depth > 0 && depth > self.max_depth
    }

    fn visit_type(&mut self, name: &str, depth: usize) {
        let graph = self.graph;
        let Some(definition) = graph.nodes.get(name) else {
            return;
        };
        if definition.kind == DefinitionKind::Scalar {
            return;
        }
        let visit = Visit {
            type_name: &definition.name,
            member: None,
        };
        if !self.seen.insert(visit) || self.beyond_limit(depth) {
            return;
        }

        match graph.options.normalize_kind(definition.kind) {
            DefinitionKind::Object => {
                for field in &definition.fields {
                    self.visit_member(definition, &field.name, depth + 1);
                }
            }
            DefinitionKind::InputObject => {
                for field in &definition.input_fields {
                    self.visit_member(definition, &field.name, depth + 1);
                }
            }
            DefinitionKind::Union => {
                for member in &definition.possible_types {
                    self.visit_type(member, depth + 1);
                }
            }
            _ => {}
        }
    }

    fn visit_member(&mut self, definition: &'g Definition, member: &'g str, depth: usize) {
        let visit = Visit {
            type_name: &definition.name,
            member: Some(member),
        };
        if !self.seen.insert(visit) || self.beyond_limit(depth) {
            return;
        }

        if let Some(field) = definition.field(member) {
            for argument in &field.arguments {
                self.visit_type(argument.ty.underlying_name(), depth + 1);
            }
            self.visit_type(field.ty.underlying_name(), depth + 1);
        } else if let Some(input_field) = definition.input_field(member) {
            self.visit_type(input_field.ty.underlying_name(), depth + 1);
        }
    }

    /// Seen types, each pruned to its seen members unless it was visited whole.
    fn into_definitions(self) -> Vec<Definition> {
        let mut selections: BTreeMap<&str, FieldSelection> = BTreeMap::new();
        for visit in self.seen {
            let selection = match visit.member {
                None => FieldSelection::All,
                Some(member) => FieldSelection::Fields(BTreeSet::from([member.to_string()])),
            };
            match selections.get_mut(visit.type_name) {
                Some(existing) => existing.merge(selection),
                None => {
                    selections.insert(visit.type_name, selection);
                }
            }
        }

        selections
            .into_iter()
            .filter_map(|(name, selection)| {
                self.graph
                    .nodes
                    .get(name)
                    .map(|definition| selection.apply(definition))
            })
            .collect()
    }
}

impl Graph {
    /// The subgraph reachable from `roots`.
    ///
    /// A whole-type root starts at depth 1 and a field root is visited as a
    /// field at depth 1; each hop to a member, argument type, field type, or
    /// union member adds one. With `max_depth > 0`, anything deeper than
    /// `max_depth` is still recorded but not expanded. Types reached only
    /// through individual fields keep just those fields; types visited as a
    /// whole keep all of them. Scalars never become nodes.
    #[must_use]
    #[tracing::instrument(skip(self, roots), fields(roots = roots.len()))]
    pub fn reachable_from(&self, roots: &[NameReference<'_>], max_depth: usize) -> Self {
        let mut traversal = Traversal {
            graph: self,
            max_depth,
            seen: BTreeSet::new(),
        };

        for (type_name, selection) in field_filters(roots) {
            let Some(definition) = self.nodes.get(&type_name) else {
                continue;
            };
            match selection {
                FieldSelection::All => traversal.visit_type(&definition.name, 1),
                FieldSelection::Fields(_) => {
                    let members = definition
                        .fields
                        .iter()
                        .map(|field| &field.name)
                        .chain(definition.input_fields.iter().map(|field| &field.name))
                        .filter(|name| selection.includes(name));
                    for member in members {
                        traversal.visit_member(definition, member, 1);
                    }
                }
            }
        }

        tracing::debug!(visits = traversal.seen.len(), "Reachability traversal complete");
        Self::new(traversal.into_definitions(), self.options)
    }
}
