use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScreenError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Column '{column}' not found in watch-list (available: {available:?})")]
    MissingColumn { column: String, available: Vec<String> },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Invalid table identifier '{name}'")]
    InvalidIdentifier { name: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type ScreenResult<T> = Result<T, ScreenError>;
