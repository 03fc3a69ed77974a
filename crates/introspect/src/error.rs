use thiserror::Error;

pub type Result<T> = std::result::Result<T, IntrospectionError>;

#[derive(Debug, Error)]
pub enum IntrospectionError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error {0}: {1}")]
    Http(u16, String),

    #[error("Failed to parse introspection response: {0}")]
    Parse(String),

    #[error("Invalid introspection response: {0}")]
    Invalid(String),

    #[error("invalid spec version '{0}', known versions are june2018, october2021")]
    UnknownSpecVersion(String),

    /// Errors listed in the response body's `errors` array.
    #[error("{}", .0.join("\n"))]
    GraphQL(Vec<String>),
}

impl IntrospectionError {
    /// Whether the same request may succeed when sent again: connection
    /// failures and 5xx responses.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Http(status, _) => *status >= 500,
            Self::Parse(_) | Self::Invalid(_) | Self::UnknownSpecVersion(_) | Self::GraphQL(_) => {
                false
            }
        }
    }
}
