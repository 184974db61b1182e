use std::io::Read;

use flate2::read::GzDecoder;
use tar::Archive;

use crate::error::ArtifactError;

/// Extensions of Fortran sources, which require a Fortran compiler at build time.
const FORTRAN_EXTENSIONS: &[&str] = &[".f", ".f90", ".for"];

/// Reads entries out of a downloaded source artifact.
pub trait ArtifactInspector {
    fn list_entries(&self, artifact: &[u8]) -> Result<Vec<String>, ArtifactError>;

    fn extract_metadata_record(&self, artifact: &[u8], path: &str)
        -> Result<String, ArtifactError>;
}

/// [`ArtifactInspector`] for gzip-compressed tarballs, read fully in memory.
pub struct TarballInspector;

impl TarballInspector {
    pub fn new() -> Self {
        Self
    }
}

impl ArtifactInspector for TarballInspector {
    fn list_entries(&self, artifact: &[u8]) -> Result<Vec<String>, ArtifactError> {
        let mut archive = Archive::new(GzDecoder::new(artifact));
        let mut names = Vec::new();
        for entry in archive.entries()? {
            let entry = entry?;
            names.push(entry.path()?.to_string_lossy().into_owned());
        }
        Ok(names)
    }

    fn extract_metadata_record(
        &self,
        artifact: &[u8],
        path: &str,
    ) -> Result<String, ArtifactError> {
        let mut archive = Archive::new(GzDecoder::new(artifact));
        for entry in archive.entries()? {
            let mut entry = entry?;
            if entry.path()?.to_string_lossy() != path {
                continue;
            }
            let mut raw = Vec::new();
            entry.read_to_end(&mut raw)?;
            return String::from_utf8(raw).map_err(|_| ArtifactError::NotUtf8(path.to_string()));
        }
        Err(ArtifactError::MissingEntry(path.to_string()))
    }
}

/// Whether any entry is a Fortran source file.
pub fn has_fortran_sources(entries: &[String]) -> bool {
    entries
        .iter()
        .any(|name| FORTRAN_EXTENSIONS.iter().any(|ext| name.ends_with(ext)))
}
