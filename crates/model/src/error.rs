use thiserror::Error;

pub type Result<T> = std::result::Result<T, ModelError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("could not resolve type named '{name}'")]
    UnresolvedType { name: String },

    #[error("unknown name(s): {}", .0.join(", "))]
    UnknownNames(Vec<String>),

    #[error("unsupported {kind} value: {raw}")]
    UnsupportedValue { kind: &'static str, raw: String },
}
