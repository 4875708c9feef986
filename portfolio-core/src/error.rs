use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("rotating text needs at least one phrase")]
    NoPhrases,
    #[error("glitch pattern needs at least one interval")]
    EmptyPattern,
}

/// Failure modes of the two proxy fetches. The `Display` output is what the
/// panels show next to their retry button.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("http {0}")]
    Status(u16),
    #[error("{0}")]
    Upstream(String),
    #[error("decode failed: {0}")]
    Malformed(String),
    #[error("Invalid response format")]
    UnexpectedShape,
}
