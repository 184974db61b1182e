//! Run summaries.
//!
//! - [`terminal`]: colored table of every package handled in the run.
//!
//! `--report json` bypasses this and prints the resolved descriptors directly.

pub mod terminal;

use serde::Serialize;

use crate::models::PackageDescriptor;

/// What happened to one package during the run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Written,
    Skipped,
    Failed,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Written => write!(f, "written"),
            Status::Skipped => write!(f, "skipped"),
            Status::Failed => write!(f, "failed"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub package: String,
    pub version: Option<String>,
    pub repository: Option<String>,
    pub license: Option<String>,
    pub native: bool,
    pub status: Status,
    /// Failure cause for [`Status::Failed`].
    pub detail: Option<String>,
}

impl Outcome {
    pub fn resolved(descriptor: &PackageDescriptor, status: Status) -> Self {
        Outcome {
            package: descriptor.name.clone(),
            version: Some(descriptor.version.clone()),
            repository: Some(descriptor.repository.to_string()),
            license: Some(descriptor.license.canonical_id.clone()),
            native: descriptor.needs_native_build,
            status,
            detail: None,
        }
    }

    pub fn failed(package: &str, detail: String) -> Self {
        Outcome {
            package: package.to_string(),
            version: None,
            repository: None,
            license: None,
            native: false,
            status: Status::Failed,
            detail: Some(detail),
        }
    }
}
