//! Error types for package resolution.
//!
//! Every per-package failure names the package and the repository it was looked up in,
//! and its `Display` says which kind of failure it was (not found, transport, malformed).

use thiserror::Error;

/// Failure reported by a fetch collaborator.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The server answered with a non-success status.
    #[error("HTTP {status}: {reason}")]
    Status { status: u16, reason: String },

    /// The request never produced a usable response.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Failure while reading a downloaded source archive.
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("unreadable source archive: {0}")]
    Io(#[from] std::io::Error),

    #[error("archive has no entry {0}")]
    MissingEntry(String),

    #[error("archive entry {0} is not valid UTF-8")]
    NotUtf8(String),
}

/// Failure resolving a package descriptor or loading the registry indices.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("{package} not found in {repository}")]
    NotFound { package: String, repository: String },

    #[error("failed to fetch {package} from {repository}: {source}")]
    Transport {
        package: String,
        repository: String,
        #[source]
        source: TransportError,
    },

    #[error("failed to fetch the {repository} index: {source}")]
    IndexUnavailable {
        repository: String,
        #[source]
        source: TransportError,
    },

    #[error("failed to fetch any Bioconductor index")]
    AllIndicesUnavailable,

    #[error("malformed metadata for {package} from {repository}: {reason}")]
    MalformedRecord {
        package: String,
        repository: String,
        reason: String,
    },

    #[error("invalid package name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },
}

impl ResolveError {
    /// Name of the package this error is about, when there is one.
    pub fn package(&self) -> Option<&str> {
        match self {
            ResolveError::NotFound { package, .. }
            | ResolveError::Transport { package, .. }
            | ResolveError::MalformedRecord { package, .. } => Some(package),
            ResolveError::InvalidName { name, .. } => Some(name),
            ResolveError::IndexUnavailable { .. } | ResolveError::AllIndicesUnavailable => None,
        }
    }
}
