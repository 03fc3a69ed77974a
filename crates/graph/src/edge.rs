/// What a graph edge was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// An object or interface field whose type is composite.
    Field { field: String },
    /// A field argument whose type is composite.
    Argument { field: String, argument: String },
    /// An input object field whose type is composite.
    InputField { field: String },
    /// A union member, or an interface implementor when interfaces are drawn as unions.
    PossibleType { member: String },
}

/// A directed edge between two named types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
}

impl Edge {
    /// The field on `source` this edge hangs off, if any.
    #[must_use]
    pub fn field_name(&self) -> Option<&str> {
        match &self.kind {
            EdgeKind::Field { field }
            | EdgeKind::Argument { field, .. }
            | EdgeKind::InputField { field } => Some(field),
            EdgeKind::PossibleType { .. } => None,
        }
    }

    #[must_use]
    pub fn argument_name(&self) -> Option<&str> {
        match &self.kind {
            EdgeKind::Argument { argument, .. } => Some(argument),
            _ => None,
        }
    }

    /// Port on the source node's table that this edge starts from.
    #[must_use]
    pub fn source_port(&self) -> String {
        match &self.kind {
            EdgeKind::Field { field } | EdgeKind::InputField { field } => port_name(field),
            EdgeKind::Argument { field, argument } => argument_port_name(field, argument),
            EdgeKind::PossibleType { member } => port_name(member),
        }
    }
}

pub(crate) fn port_name(member: &str) -> String {
    format!("p_{member}")
}

pub(crate) fn argument_port_name(field: &str, argument: &str) -> String {
    format!("p_{field}_{argument}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(kind: EdgeKind) -> Edge {
        Edge {
            source: "Query".to_string(),
            target: "User".to_string(),
            kind,
        }
    }

    #[test]
    fn test_ports() {
        let field = edge(EdgeKind::Field {
            field: "user".to_string(),
        });
        assert_eq!(field.source_port(), "p_user");
        assert_eq!(field.field_name(), Some("user"));
        assert_eq!(field.argument_name(), None);

        let argument = edge(EdgeKind::Argument {
            field: "users".to_string(),
            argument: "filter".to_string(),
        });
        assert_eq!(argument.source_port(), "p_users_filter");
        assert_eq!(argument.field_name(), Some("users"));
        assert_eq!(argument.argument_name(), Some("filter"));

        let member = edge(EdgeKind::PossibleType {
            member: "User".to_string(),
        });
        assert_eq!(member.source_port(), "p_User");
        assert_eq!(member.field_name(), None);
    }
}
