//! Writers for the per-package build files.
//!
//! - [`pkgbuild`]: the Arch `PKGBUILD`.
//! - [`lilac`]: `lilac.yaml` for the lilac build bot.
//!
//! Each package gets its own directory `<destdir>/r-<name>/`.

pub mod lilac;
pub mod pkgbuild;

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};

use crate::config::Maintainer;
use crate::models::{arch_name, PackageDescriptor};

/// Directory holding the build files of the R package `rpkgname`.
pub fn package_dir(destdir: &Path, rpkgname: &str) -> PathBuf {
    destdir.join(arch_name(rpkgname))
}

pub fn pkgbuild_path(destdir: &Path, rpkgname: &str) -> PathBuf {
    package_dir(destdir, rpkgname).join("PKGBUILD")
}

/// Write `PKGBUILD` and `lilac.yaml` for `descriptor`, returning the package directory.
pub fn write_package(
    descriptor: &PackageDescriptor,
    maintainer: &Maintainer,
    destdir: &Path,
) -> Result<PathBuf> {
    let dir = destdir.join(descriptor.arch_package_name());
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("creating {}", dir.display()))?;

    let pkgbuild_file = dir.join("PKGBUILD");
    std::fs::write(&pkgbuild_file, pkgbuild::render(descriptor, maintainer))
        .with_context(|| format!("writing {}", pkgbuild_file.display()))?;

    let lilac_file = dir.join("lilac.yaml");
    std::fs::write(&lilac_file, lilac::render(descriptor, maintainer)?)
        .with_context(|| format!("writing {}", lilac_file.display()))?;

    tracing::debug!(package = %descriptor.name, dir = %dir.display(), "wrote build files");
    Ok(dir)
}

/// Run `updpkgsums` in `dir` to replace the placeholder checksum.
pub fn update_checksums(dir: &Path) -> Result<()> {
    let status = Command::new("updpkgsums")
        .current_dir(dir)
        .status()
        .context("running updpkgsums")?;
    if !status.success() {
        bail!("updpkgsums failed in {} ({})", dir.display(), status);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LicenseClassification, RepositoryKind, SourceLocation};

    fn descriptor() -> PackageDescriptor {
        PackageDescriptor {
            name: "BiocGenerics".into(),
            version: "0.48.1".into(),
            repository: RepositoryKind::Cran,
            release_tag: None,
            title: "S4 generic functions used in Bioconductor".into(),
            runtime_dependencies: vec![],
            optional_dependencies: vec![],
            needs_native_build: false,
            fortran_sources: false,
            license: LicenseClassification {
                canonical_id: "Artistic2.0".into(),
                required_license_file: None,
            },
            system_requirements: None,
            source_location: SourceLocation {
                download_url: String::new(),
                template: String::new(),
            },
            project_url: String::new(),
        }
    }

    #[test]
    fn test_write_package_layout() {
        let dest = tempfile::tempdir().unwrap();
        let dir = write_package(&descriptor(), &Maintainer::default(), dest.path()).unwrap();

        assert_eq!(dir, dest.path().join("r-biocgenerics"));
        assert!(pkgbuild_path(dest.path(), "BiocGenerics").exists());
        let pkgbuild = std::fs::read_to_string(dir.join("PKGBUILD")).unwrap();
        assert!(pkgbuild.contains("_pkgname=BiocGenerics"));
        assert!(dir.join("lilac.yaml").exists());
    }

    #[test]
    fn test_rewrite_overwrites_existing_files() {
        let dest = tempfile::tempdir().unwrap();
        let mut d = descriptor();
        write_package(&d, &Maintainer::default(), dest.path()).unwrap();
        d.version = "0.50.0".into();
        let dir = write_package(&d, &Maintainer::default(), dest.path()).unwrap();

        let pkgbuild = std::fs::read_to_string(dir.join("PKGBUILD")).unwrap();
        assert!(pkgbuild.contains("_pkgver=0.50.0"));
    }
}
