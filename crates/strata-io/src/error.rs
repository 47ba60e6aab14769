use thiserror::Error;

/// Canonical result for io.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed event on line {line}: {source}")]
    MalformedEvent {
        line: usize,
        source: serde_json::Error,
    },

    #[error("malformed constraints document: {0}")]
    MalformedConstraints(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] strata_core::Error),
}
