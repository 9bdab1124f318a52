use thiserror::Error;

/// Errors from line classification, hexagram accumulation and record I/O.
#[derive(Error, Debug)]
pub enum HexagramError {
    #[error("frequency distribution has no positive count")]
    EmptyDistribution,

    #[error("unknown outcome key: {0:?} (expected three characters of '0'/'1')")]
    UnknownOutcomeKey(String),

    #[error("malformed cast record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("counts source exhausted after {drawn} distributions")]
    ExhaustedSource { drawn: usize },

    #[error("record I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HexagramError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        HexagramError::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, HexagramError>;
