use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("storage I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed storage file {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: models::errors::ModelError,
    },
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io { path: path.display().to_string(), source }
    }

    pub fn malformed(path: &Path, source: models::errors::ModelError) -> Self {
        Self::Malformed { path: path.display().to_string(), source }
    }
}
