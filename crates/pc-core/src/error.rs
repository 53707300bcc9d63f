use crate::format::Format;
use std::path::PathBuf;
use thiserror::Error;

/// Why a discovery walk could not enumerate the tree.
#[derive(Error, Debug)]
pub enum DiscoveryErrorKind {
    #[error("directory does not exist")]
    NotFound,
    #[error("not a directory")]
    NotADirectory,
    #[error("cannot read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Discovery failed for the given root. Fatal: no job is scheduled.
#[derive(Error, Debug)]
#[error("discovery failed for {}: {kind}", root.display())]
pub struct DiscoveryError {
    pub root: PathBuf,
    #[source]
    pub kind: DiscoveryErrorKind,
}

impl DiscoveryError {
    pub fn new(root: impl Into<PathBuf>, kind: DiscoveryErrorKind) -> Self {
        Self {
            root: root.into(),
            kind,
        }
    }

    pub fn unreadable(root: impl Into<PathBuf>, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::new(
            root,
            DiscoveryErrorKind::Unreadable {
                path: path.into(),
                source,
            },
        )
    }
}

#[derive(Error, Debug)]
pub enum CompressionErrorKind {
    /// Open, metadata, read, encode, write or sync failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The job task panicked or was cancelled before reporting.
    #[error("task failed: {0}")]
    TaskFailed(String),
}

/// A single (file, format) job failed.
#[derive(Error, Debug)]
#[error("{format} compression failed for {}: {kind}", source_path.display())]
pub struct CompressionError {
    pub source_path: PathBuf,
    pub format: Format,
    #[source]
    pub kind: CompressionErrorKind,
}

impl CompressionError {
    pub fn new(source_path: impl Into<PathBuf>, format: Format, kind: impl Into<CompressionErrorKind>) -> Self {
        Self {
            source_path: source_path.into(),
            format,
            kind: kind.into(),
        }
    }

    pub fn task_failed(source_path: impl Into<PathBuf>, format: Format, reason: impl Into<String>) -> Self {
        Self::new(source_path, format, CompressionErrorKind::TaskFailed(reason.into()))
    }
}

#[derive(Error, Debug)]
pub enum PrecompressError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    #[error(transparent)]
    Compression(#[from] CompressionError),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, PrecompressError>;
