use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid grading result in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("edge {child} -> {parent} references a missing node")]
    MissingEndpoint { child: String, parent: String },
}

pub type Result<T> = std::result::Result<T, Error>;
