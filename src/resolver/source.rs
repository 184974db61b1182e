//! Download URLs and PKGBUILD source templates per repository.
//!
//! Templates are written against the canonical upstream hosts with PKGBUILD variables
//! (`${_pkgname}`, `${_pkgver}`, `${pkgver}`); download URLs use the configured mirrors.

use crate::config::Mirrors;
use crate::models::{BiocIndex, SourceLocation};

pub fn cran(mirrors: &Mirrors, name: &str, version: &str) -> SourceLocation {
    SourceLocation {
        download_url: format!(
            "{}/src/contrib/{}_{}.tar.gz",
            mirrors.cran_root(),
            name,
            version
        ),
        template: "https://cran.r-project.org/src/contrib/${_pkgname}_${_pkgver}.tar.gz"
            .to_string(),
    }
}

pub fn cran_project_url() -> String {
    "https://cran.r-project.org/package=${_pkgname}".to_string()
}

pub fn bioconductor(
    mirrors: &Mirrors,
    index: BiocIndex,
    name: &str,
    version: &str,
) -> SourceLocation {
    SourceLocation {
        download_url: format!(
            "{}/{}/src/contrib/{}_{}.tar.gz",
            mirrors.bioconductor_root(),
            index.path(),
            name,
            version
        ),
        template: format!(
            "https://bioconductor.org/{}/src/contrib/${{_pkgname}}_${{_pkgver}}.tar.gz",
            index.path()
        ),
    }
}

pub fn bioconductor_project_url() -> String {
    "https://bioconductor.org/packages/${_pkgname}".to_string()
}

/// Release asset of a GitHub package.
///
/// The template keeps the `v` prefix when the release tag has one, since `pkgver`
/// itself never carries it.
pub fn github(owner: &str, repo: &str, tag: &str, version: &str) -> SourceLocation {
    let tag_prefix = if tag.starts_with('v') { "v" } else { "" };
    SourceLocation {
        download_url: format!(
            "https://github.com/{}/{}/releases/download/{}/{}_{}.tar.gz",
            owner, repo, tag, repo, version
        ),
        template: format!(
            "https://github.com/{}/{}/releases/download/{}${{pkgver}}/${{_pkgname}}_${{pkgver}}.tar.gz",
            owner, repo, tag_prefix
        ),
    }
}

pub fn github_project_url(owner: &str, repo: &str) -> String {
    format!("https://github.com/{}/{}", owner, repo)
}

/// Installable version for a release tag: the tag without its leading `v`.
pub fn version_from_tag(tag: &str) -> &str {
    tag.trim_start_matches('v')
}
