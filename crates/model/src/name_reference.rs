use crate::definition::{Definition, FieldDefinition, InputValueDefinition};
use std::fmt;

/// A resolved `Type` or `Type.field` name, borrowing from its [`Schema`](crate::Schema).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NameReference<'a> {
    Type {
        definition: &'a Definition,
    },
    Field {
        definition: &'a Definition,
        field: &'a FieldDefinition,
    },
    InputField {
        definition: &'a Definition,
        input_field: &'a InputValueDefinition,
    },
}

impl<'a> NameReference<'a> {
    #[must_use]
    pub const fn definition(&self) -> &'a Definition {
        match *self {
            Self::Type { definition }
            | Self::Field { definition, .. }
            | Self::InputField { definition, .. } => definition,
        }
    }

    #[must_use]
    pub fn type_name(&self) -> &'a str {
        &self.definition().name
    }

    /// The referenced member, or `None` for a whole-type reference.
    #[must_use]
    pub fn field_name(&self) -> Option<&'a str> {
        match *self {
            Self::Type { .. } => None,
            Self::Field { field, .. } => Some(&field.name),
            Self::InputField { input_field, .. } => Some(&input_field.name),
        }
    }
}

impl fmt::Display for NameReference<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field_name() {
            Some(field) => write!(f, "{}.{field}", self.type_name()),
            None => f.write_str(self.type_name()),
        }
    }
}
