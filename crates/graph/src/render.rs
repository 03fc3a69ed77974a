use crate::edge::{argument_port_name, port_name, Edge};
use crate::graph::Graph;
use graphql_model::{is_builtin_field, is_builtin_type, Definition, DefinitionKind};
use std::fmt::{self, Display, Write};

const HEADER: &str = "digraph {\n  rankdir=LR\n  ranksep=2\n  node [shape=box fontname=Courier]\n";

/// Graphviz DOT view of a [`Graph`].
///
/// Nodes and edges are written in name order. Scalars are never drawn, and
/// built-in types, fields, and the edges touching them are left out unless
/// the graph was built with [`GraphOptions::render_builtins`](crate::GraphOptions).
#[derive(Debug, Clone, Copy)]
pub struct Dot<'a> {
    graph: &'a Graph,
}

impl<'a> Dot<'a> {
    #[must_use]
    pub const fn new(graph: &'a Graph) -> Self {
        Self { graph }
    }

    fn builtins(&self) -> bool {
        self.graph.options.render_builtins
    }

    fn renders_node(&self, definition: &Definition) -> bool {
        definition.kind != DefinitionKind::Scalar
            && (self.builtins() || !is_builtin_type(&definition.name))
    }

    fn renders_edge(&self, edge: &Edge) -> bool {
        let endpoints = [&edge.source, &edge.target];
        if endpoints.iter().any(|name| {
            self.graph
                .nodes
                .get(name.as_str())
                .is_none_or(|definition| !self.renders_node(definition))
        }) {
            return false;
        }
        self.builtins() || !edge.field_name().is_some_and(is_builtin_field)
    }

    fn node_line(&self, definition: &Definition) -> Result<String, fmt::Error> {
        let kind = self.graph.options.normalize_kind(definition.kind);
        let color = color(definition.kind);
        let word = kind_word(definition.kind);
        let name = &definition.name;

        let mut label = String::from("<TABLE BORDER=\"0\" CELLBORDER=\"1\" CELLSPACING=\"0\">\n");
        match kind {
            DefinitionKind::Object => {
                writeln!(
                    label,
                    "    <TR><TD COLSPAN=\"3\" PORT=\"main\" BGCOLOR=\"{color}\">{word} {name}</TD></TR>"
                )?;
                for field in &definition.fields {
                    if !self.builtins() && is_builtin_field(&field.name) {
                        continue;
                    }
                    writeln!(
                        label,
                        "    <TR><TD ROWSPAN=\"{}\">{}</TD><TD COLSPAN=\"2\" PORT=\"{}\">{}</TD></TR>",
                        field.arguments.len() + 1,
                        field.name,
                        port_name(&field.name),
                        field.ty,
                    )?;
                    for argument in &field.arguments {
                        writeln!(
                            label,
                            "    <TR><TD>{}</TD><TD PORT=\"{}\">{}</TD></TR>",
                            argument.name,
                            argument_port_name(&field.name, &argument.name),
                            argument.ty,
                        )?;
                    }
                }
            }
            DefinitionKind::InputObject => {
                writeln!(
                    label,
                    "    <TR><TD COLSPAN=\"2\" PORT=\"main\" BGCOLOR=\"{color}\">{word} {name}</TD></TR>"
                )?;
                for field in &definition.input_fields {
                    writeln!(
                        label,
                        "    <TR><TD>{}</TD><TD PORT=\"{}\">{}</TD></TR>",
                        field.name,
                        port_name(&field.name),
                        field.ty,
                    )?;
                }
            }
            DefinitionKind::Enum => {
                writeln!(
                    label,
                    "    <TR><TD PORT=\"main\" BGCOLOR=\"{color}\">{word} {name}</TD></TR>"
                )?;
                for value in &definition.enum_values {
                    writeln!(label, "    <TR><TD>{}</TD></TR>", value.name)?;
                }
            }
            DefinitionKind::Union => {
                writeln!(
                    label,
                    "    <TR><TD PORT=\"main\" BGCOLOR=\"{color}\">{word} {name}</TD></TR>"
                )?;
                for member in &definition.possible_types {
                    writeln!(
                        label,
                        "    <TR><TD PORT=\"{}\">{member}</TD></TR>",
                        port_name(member)
                    )?;
                }
            }
            _ => {
                writeln!(
                    label,
                    "    <TR><TD PORT=\"main\" BGCOLOR=\"{color}\">{word} {name}</TD></TR>"
                )?;
            }
        }
        label.push_str("  </TABLE>");

        Ok(format!(
            "  {} [shape=plain, label=<{label}>]",
            node_id(name)
        ))
    }
}

impl Display for Dot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nodes = self
            .graph
            .nodes
            .values()
            .filter(|definition| self.renders_node(definition))
            .map(|definition| self.node_line(definition))
            .collect::<Result<Vec<_>, _>>()?;

        let edges: Vec<String> = self
            .graph
            .edges()
            .filter(|edge| self.renders_edge(edge))
            .map(|edge| {
                format!(
                    "  {}:{} -> {}:main",
                    node_id(&edge.source),
                    edge.source_port(),
                    node_id(&edge.target)
                )
            })
            .collect();

        tracing::trace!(nodes = nodes.len(), edges = edges.len(), "Rendering DOT");

        f.write_str(HEADER)?;
        f.write_str(&nodes.join("\n"))?;
        f.write_str("\n")?;
        f.write_str(&edges.join("\n"))?;
        f.write_str("\n}\n")
    }
}

fn node_id(name: &str) -> String {
    format!("n_{name}")
}

const fn kind_word(kind: DefinitionKind) -> &'static str {
    match kind {
        DefinitionKind::Object => "object",
        DefinitionKind::Interface => "interface",
        DefinitionKind::InputObject => "input",
        DefinitionKind::Enum => "enum",
        DefinitionKind::Union => "union",
        DefinitionKind::Scalar => "scalar",
    }
}

const fn color(kind: DefinitionKind) -> &'static str {
    match kind {
        DefinitionKind::Object => "#fbb4ae",
        DefinitionKind::Interface => "#b3cde3",
        DefinitionKind::InputObject => "#ccebc5",
        DefinitionKind::Enum => "#decbe4",
        DefinitionKind::Union => "#fed9a6",
        DefinitionKind::Scalar => "#ffffff",
    }
}

#[cfg(test)]
mod tests {
    use crate::{Graph, GraphOptions};
    use graphql_model::Schema;

    fn graph(sdl: &str, options: GraphOptions) -> Graph {
        let compiled = apollo_compiler::Schema::parse_and_validate(sdl, "schema.graphql").unwrap();
        let mut schema = Schema::build(&compiled).unwrap();
        schema.filter_builtins();
        Graph::from_schema(&schema, options)
    }

    #[test]
    fn test_render_small_graph() {
        let graph = graph(
            r"
            type Query { pets(kind: Kind, where: PetFilter): [Pet!]! }
            union Pet = Cat | Dog
            type Cat { name: String }
            type Dog { name: String }
            enum Kind { CAT, DOG }
            input PetFilter { name: String }
            ",
            GraphOptions::default(),
        );

        insta::assert_snapshot!(graph.to_dot(), @r##"
        digraph {
          rankdir=LR
          ranksep=2
          node [shape=box fontname=Courier]
          n_Cat [shape=plain, label=<<TABLE BORDER="0" CELLBORDER="1" CELLSPACING="0">
            <TR><TD COLSPAN="3" PORT="main" BGCOLOR="#fbb4ae">object Cat</TD></TR>
            <TR><TD ROWSPAN="1">name</TD><TD COLSPAN="2" PORT="p_name">String</TD></TR>
          </TABLE>>]
          n_Dog [shape=plain, label=<<TABLE BORDER="0" CELLBORDER="1" CELLSPACING="0">
            <TR><TD COLSPAN="3" PORT="main" BGCOLOR="#fbb4ae">object Dog</TD></TR>
            <TR><TD ROWSPAN="1">name</TD><TD COLSPAN="2" PORT="p_name">String</TD></TR>
          </TABLE>>]
          n_Kind [shape=plain, label=<<TABLE BORDER="0" CELLBORDER="1" CELLSPACING="0">
            <TR><TD PORT="main" BGCOLOR="#decbe4">enum Kind</TD></TR>
            <TR><TD>CAT</TD></TR>
            <TR><TD>DOG</TD></TR>
          </TABLE>>]
          n_Pet [shape=plain, label=<<TABLE BORDER="0" CELLBORDER="1" CELLSPACING="0">
            <TR><TD PORT="main" BGCOLOR="#fed9a6">union Pet</TD></TR>
            <TR><TD PORT="p_Cat">Cat</TD></TR>
            <TR><TD PORT="p_Dog">Dog</TD></TR>
          </TABLE>>]
          n_PetFilter [shape=plain, label=<<TABLE BORDER="0" CELLBORDER="1" CELLSPACING="0">
            <TR><TD COLSPAN="2" PORT="main" BGCOLOR="#ccebc5">input PetFilter</TD></TR>
            <TR><TD>name</TD><TD PORT="p_name">String</TD></TR>
          </TABLE>>]
          n_Query [shape=plain, label=<<TABLE BORDER="0" CELLBORDER="1" CELLSPACING="0">
            <TR><TD COLSPAN="3" PORT="main" BGCOLOR="#fbb4ae">object Query</TD></TR>
            <TR><TD ROWSPAN="3">pets</TD><TD COLSPAN="2" PORT="p_pets">[Pet!]!</TD></TR>
            <TR><TD>kind</TD><TD PORT="p_pets_kind">Kind</TD></TR>
            <TR><TD>where</TD><TD PORT="p_pets_where">PetFilter</TD></TR>
          </TABLE>>]
          n_Pet:p_Cat -> n_Cat:main
          n_Pet:p_Dog -> n_Dog:main
          n_Query:p_pets -> n_Pet:main
          n_Query:p_pets_kind -> n_Kind:main
          n_Query:p_pets_where -> n_PetFilter:main
        }
        "##);
    }

    #[test]
    fn test_builtins_hidden_at_render_time() {
        let compiled = apollo_compiler::Schema::parse_and_validate(
            "type Query { me: User } type User { id: ID }",
            "schema.graphql",
        )
        .unwrap();
        let schema = Schema::build(&compiled).unwrap();

        let hidden = Graph::from_schema(&schema, GraphOptions::default()).to_dot();
        assert!(!hidden.contains("n___Schema"));
        assert!(!hidden.contains("p___schema"));
        assert!(hidden.contains("n_Query:p_me -> n_User:main"));

        let shown = Graph::from_schema(&schema, GraphOptions::new().with_builtins(true)).to_dot();
        assert!(shown.contains("n___Schema [shape=plain"));
        assert!(shown.contains("n___Type:p_fields -> n___Field:main"));
    }

    #[test]
    fn test_interface_drawn_as_union() {
        let graph = graph(
            "type Query { node: Node } interface Node { id: ID } type A implements Node { id: ID }",
            GraphOptions::new().with_interfaces_as_unions(true),
        );
        let dot = graph.to_dot();
        assert!(dot.contains(r##"<TR><TD PORT="main" BGCOLOR="#b3cde3">interface Node</TD></TR>"##));
        assert!(dot.contains(r#"<TR><TD PORT="p_A">A</TD></TR>"#));
        assert!(dot.contains("n_Node:p_A -> n_A:main"));
    }
}
