use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClickBenchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cannot read annotations directory {}: {source}", path.display())]
    AnnotationDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read annotation file {}: {source}", path.display())]
    AnnotationRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed annotation file {}: {source}", path.display())]
    AnnotationParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Screenshot error: {0}")]
    Screenshot(String),

    #[error("Invalid target: {0}")]
    Target(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialize error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type ClickBenchResult<T> = Result<T, ClickBenchError>;
