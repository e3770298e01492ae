use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodeGraphError {
    #[error("path not found: {0}")]
    PathNotFound(String),

    #[error("cannot enumerate directory: {0}")]
    CannotEnumerate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("parse error in {file}: {reason}")]
    Parse { file: String, reason: String },

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("export error: {0}")]
    Export(String),
}

pub type Result<T> = std::result::Result<T, CodeGraphError>;
