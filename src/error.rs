use thiserror::Error;

#[derive(Error, Debug)]
pub enum SetPieceError {
    #[error("cannot read event data: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed event CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Parameters that can never produce a clustering (k out of range, zero restarts, ...).
    #[error("invalid analysis configuration: {0}")]
    Config(String),

    /// Structurally incomplete or non-numeric event input.
    #[error("invalid event data: {0}")]
    Validation(String),
}

impl SetPieceError {
    /// Prefixes a validation message with where the bad input was found.
    pub fn at(self, location: impl std::fmt::Display) -> Self {
        match self {
            SetPieceError::Validation(msg) => {
                SetPieceError::Validation(format!("{}: {}", location, msg))
            }
            other => other,
        }
    }
}

pub type SpResult<T> = Result<T, SetPieceError>;
