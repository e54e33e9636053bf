use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, QueryGenError>;

/// Failures raised while declaring or generating a query.
///
/// Everything here is fatal for the query it concerns: generation either
/// produces the full ordered URL sequence or nothing at all.
#[derive(Debug, Error)]
pub enum QueryGenError {
    /// Required query fields are missing, or the query is always filtered
    /// without declaring any parameter. Raised before generation starts.
    #[error("querygen error: {0}")]
    Configuration(String),

    /// Raised at declaration time for empty names, unknown parameter kinds,
    /// or mixed parameters whose power set would be too large.
    #[error("querygen error: {0}")]
    InvalidParameter(String),

    #[error("querygen error: the `host` method expects a valid host, got '{0}'")]
    InvalidHost(String),

    #[error("querygen error: the `url` method expects a valid URL of the form `(/.+)+`, got '{0}'")]
    InvalidUrl(String),

    #[error("querygen error: failed to emit generated query: {0}")]
    Sink(#[from] io::Error),
}

impl QueryGenError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub(crate) fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }
}
