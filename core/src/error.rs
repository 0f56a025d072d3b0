use thiserror::Error;

/// Errors surfaced by the ranking core.
///
/// Ranking itself is total over well-formed strings; these only come from
/// the edges (raw byte input, configuration, PDF decoding).
#[derive(Debug, Error)]
pub enum RankError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("pdf extraction failed: {0}")]
    Pdf(String),
}

pub type Result<T> = std::result::Result<T, RankError>;
