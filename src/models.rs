use serde::{Deserialize, Serialize};

/// The registry family a package is looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryFamily {
    Cran,
    Bioconductor,
    GitHub,
}

impl std::fmt::Display for RepositoryFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepositoryFamily::Cran => write!(f, "CRAN"),
            RepositoryFamily::Bioconductor => write!(f, "Bioconductor"),
            RepositoryFamily::GitHub => write!(f, "GitHub"),
        }
    }
}

/// One of the three Bioconductor release indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiocIndex {
    Software,
    Annotation,
    Experiment,
}

impl BiocIndex {
    /// All sub-indices, in lookup order.
    pub const ALL: [BiocIndex; 3] = [
        BiocIndex::Software,
        BiocIndex::Annotation,
        BiocIndex::Experiment,
    ];

    /// Path of this sub-index below the mirror root.
    pub fn path(self) -> &'static str {
        match self {
            BiocIndex::Software => "packages/release/bioc",
            BiocIndex::Annotation => "packages/release/data/annotation",
            BiocIndex::Experiment => "packages/release/data/experiment",
        }
    }
}

impl std::fmt::Display for BiocIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BiocIndex::Software => write!(f, "software"),
            BiocIndex::Annotation => write!(f, "annotation"),
            BiocIndex::Experiment => write!(f, "experiment"),
        }
    }
}

/// Where a package's metadata was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RepositoryKind {
    Cran,
    Bioconductor { index: BiocIndex },
    #[serde(rename = "github")]
    GitHub { owner: String, repo: String },
}

impl std::fmt::Display for RepositoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepositoryKind::Cran => write!(f, "CRAN"),
            RepositoryKind::Bioconductor { index } => write!(f, "Bioconductor ({})", index),
            RepositoryKind::GitHub { owner, repo } => write!(f, "GitHub ({}/{})", owner, repo),
        }
    }
}

/// Canonical license plus the bundled license file the package must install, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseClassification {
    pub canonical_id: String,
    pub required_license_file: Option<String>,
}

/// Where the source archive comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Concrete URL the archive is downloaded from during resolution.
    pub download_url: String,
    /// PKGBUILD `source=` entry, written in terms of PKGBUILD variables.
    pub template: String,
}

/// Normalized metadata of one resolved package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageDescriptor {
    pub name: String,
    pub version: String,
    pub repository: RepositoryKind,
    /// Literal release tag for GitHub packages; `version` is this with any leading `v` removed.
    pub release_tag: Option<String>,
    pub title: String,
    /// Runtime dependencies in registry spelling, sorted and deduplicated.
    pub runtime_dependencies: Vec<String>,
    pub optional_dependencies: Vec<String>,
    pub needs_native_build: bool,
    pub fortran_sources: bool,
    pub license: LicenseClassification,
    pub system_requirements: Option<String>,
    pub source_location: SourceLocation,
    pub project_url: String,
}

impl PackageDescriptor {
    /// Arch package name, which is also the output directory name.
    pub fn arch_package_name(&self) -> String {
        arch_name(&self.name)
    }

    /// Installable runtime dependencies, always including the R runtime itself.
    pub fn installable_dependencies(&self) -> Vec<String> {
        let mut deps: Vec<String> = std::iter::once("r".to_string())
            .chain(self.runtime_dependencies.iter().map(|d| arch_name(d)))
            .collect();
        deps.sort();
        deps.dedup();
        deps
    }

    pub fn installable_optional_dependencies(&self) -> Vec<String> {
        let mut deps: Vec<String> = self
            .optional_dependencies
            .iter()
            .map(|d| arch_name(d))
            .collect();
        deps.sort();
        deps.dedup();
        deps
    }
}

/// `r-` followed by the lowercased R package name.
pub fn arch_name(rpkgname: &str) -> String {
    format!("r-{}", rpkgname.to_lowercase())
}
