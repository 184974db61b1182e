//! In-memory collaborators for tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::TransportError;
use crate::registry::RemoteSource;

/// [`RemoteSource`] answering from fixed maps. Unknown URLs answer 404.
#[derive(Default)]
pub struct FakeSource {
    texts: HashMap<String, String>,
    blobs: HashMap<String, Vec<u8>>,
    releases: HashMap<(String, String), String>,
    requests: RefCell<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, url: &str, body: &str) -> Self {
        self.texts.insert(url.to_string(), body.to_string());
        self
    }

    pub fn with_blob(mut self, url: &str, body: Vec<u8>) -> Self {
        self.blobs.insert(url.to_string(), body);
        self
    }

    pub fn with_release(mut self, owner: &str, repo: &str, tag: &str) -> Self {
        self.releases
            .insert((owner.to_string(), repo.to_string()), tag.to_string());
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    fn not_found() -> TransportError {
        TransportError::Status {
            status: 404,
            reason: "Not Found".to_string(),
        }
    }
}

impl RemoteSource for FakeSource {
    async fn fetch_text(&self, url: &str) -> Result<String, TransportError> {
        self.requests.borrow_mut().push(url.to_string());
        self.texts.get(url).cloned().ok_or_else(Self::not_found)
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        self.requests.borrow_mut().push(url.to_string());
        self.blobs.get(url).cloned().ok_or_else(Self::not_found)
    }

    async fn latest_release(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Option<String>, TransportError> {
        self.requests
            .borrow_mut()
            .push(format!("releases:{}/{}", owner, repo));
        Ok(self
            .releases
            .get(&(owner.to_string(), repo.to_string()))
            .cloned())
    }
}

/// Build a `.tar.gz` holding `files` (path, contents).
pub fn tarball(files: &[(&str, &str)]) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (path, contents) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(contents.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, path, contents.as_bytes())
            .unwrap();
    }
    let mut encoder = builder.into_inner().unwrap();
    encoder.flush().unwrap();
    encoder.finish().unwrap()
}

/// Source tarball of an R package containing only its `DESCRIPTION`.
pub fn package_tarball(name: &str, description: &str) -> Vec<u8> {
    tarball(&[(&format!("{}/DESCRIPTION", name), description)])
}
