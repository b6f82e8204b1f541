use std::path::PathBuf;
use thiserror::Error;

use super::model::TaskId;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Task ID not found: {0}")]
    NotFound(TaskId),

    #[error("Invalid status '{0}'. Expected one of: New, In Progress, Complete")]
    InvalidStatus(String),

    #[error("Invalid priority '{0}'. Expected one of: Low, Medium, High")]
    InvalidPriority(String),

    #[error("No task ID is available after {0}")]
    IdExhausted(TaskId),
}

/// Failure to encode or decode a whole document
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a JSON object mapping task IDs to tasks")]
    NotAnObject,

    #[error("Output is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("The file {} does not exist.", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to convert {}: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: FormatError,
    },
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn format(path: impl Into<PathBuf>, source: FormatError) -> Self {
        Self::Format {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, TaskError>;
