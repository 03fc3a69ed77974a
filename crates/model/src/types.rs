use apollo_compiler::ast;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// The kind of a named schema type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DefinitionKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
}

impl DefinitionKind {
    pub const ALL: [Self; 6] = [
        Self::Scalar,
        Self::Object,
        Self::Interface,
        Self::Union,
        Self::Enum,
        Self::InputObject,
    ];

    /// The introspection spelling, e.g. `INPUT_OBJECT`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scalar => "SCALAR",
            Self::Object => "OBJECT",
            Self::Interface => "INTERFACE",
            Self::Union => "UNION",
            Self::Enum => "ENUM",
            Self::InputObject => "INPUT_OBJECT",
        }
    }

    /// Parses a kind name case-insensitively (`object`, `INPUT_OBJECT`, ...).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The innermost named type of a type reference.
///
/// `kind` is `None` until the owning [`Schema`](crate::Schema) resolves it
/// against its definitions; a fully built schema never leaves it unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedType {
    pub name: String,
    pub kind: Option<DefinitionKind>,
}

impl NamedType {
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        self.kind == Some(DefinitionKind::Scalar)
    }
}

/// A possibly wrapped type reference, as written in a field or argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Named(NamedType),
    List(Box<Type>),
    NonNull(Box<Type>),
}

impl Type {
    /// A named reference with an unresolved kind.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(NamedType {
            name: name.into(),
            kind: None,
        })
    }

    #[must_use]
    pub fn list(inner: Self) -> Self {
        Self::List(Box::new(inner))
    }

    #[must_use]
    pub fn non_null(inner: Self) -> Self {
        Self::NonNull(Box::new(inner))
    }

    pub(crate) fn from_ast(ty: &ast::Type) -> Self {
        match ty {
            ast::Type::Named(name) => Self::named(name.as_str()),
            ast::Type::NonNullNamed(name) => Self::non_null(Self::named(name.as_str())),
            ast::Type::List(inner) => Self::list(Self::from_ast(inner)),
            ast::Type::NonNullList(inner) => Self::non_null(Self::list(Self::from_ast(inner))),
        }
    }

    /// Strips every list and non-null wrapper.
    #[must_use]
    pub fn named_type(&self) -> &NamedType {
        match self {
            Self::Named(named) => named,
            Self::List(inner) | Self::NonNull(inner) => inner.named_type(),
        }
    }

    pub fn named_type_mut(&mut self) -> &mut NamedType {
        match self {
            Self::Named(named) => named,
            Self::List(inner) | Self::NonNull(inner) => inner.named_type_mut(),
        }
    }

    /// Name of the innermost named type.
    #[must_use]
    pub fn underlying_name(&self) -> &str {
        &self.named_type().name
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(named) => f.write_str(&named.name),
            Self::List(inner) => write!(f, "[{inner}]"),
            Self::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

// Introspection-style nesting: `{"kind": "NON_NULL", "ofType": {"kind": "OBJECT", "name": "User"}}`
impl Serialize for Type {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match self {
            Self::Named(named) => {
                if let Some(kind) = named.kind {
                    map.serialize_entry("kind", &kind)?;
                }
                map.serialize_entry("name", &named.name)?;
            }
            Self::List(inner) => {
                map.serialize_entry("kind", "LIST")?;
                map.serialize_entry("ofType", inner)?;
            }
            Self::NonNull(inner) => {
                map.serialize_entry("kind", "NON_NULL")?;
                map.serialize_entry("ofType", inner)?;
            }
        }
        map.end()
    }
}
