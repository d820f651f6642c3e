use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PydepsError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Failed to read {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(
        "Duplicate module name '{name}': {} and {}",
        .first.display(),
        .second.display()
    )]
    DuplicateModuleName {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PydepsError>;

impl PydepsError {
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PydepsError::FileRead {
            path: path.into(),
            source,
        }
    }
}
