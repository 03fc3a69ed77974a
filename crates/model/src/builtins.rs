//! Reserved names that belong to the GraphQL language rather than to a user schema.

/// Scalars defined by the GraphQL specification. `Enum` is included because the
/// reserved-name check has always treated it as part of the language vocabulary.
const BUILTIN_TYPES: &[&str] = &["String", "ID", "Boolean", "Int", "Float", "Enum"];

/// Directives that parsers predefine. `defer` is not in the October 2021
/// specification but ships in common parser preludes.
const BUILTIN_DIRECTIVES: &[&str] = &["skip", "include", "deprecated", "specifiedBy", "defer"];

/// Returns true for reserved type names (`__` prefix) and the built-in scalars.
#[must_use]
pub fn is_builtin_type(name: &str) -> bool {
    name.starts_with("__") || BUILTIN_TYPES.contains(&name)
}

/// Returns true for directives that are part of the language prelude.
#[must_use]
pub fn is_builtin_directive(name: &str) -> bool {
    BUILTIN_DIRECTIVES.contains(&name)
}

/// Returns true for reserved introspection fields such as `__typename`.
#[must_use]
pub fn is_builtin_field(name: &str) -> bool {
    name.starts_with("__")
}
