use std::collections::{BTreeMap, HashMap};

use crate::config::Mirrors;
use crate::error::ResolveError;
use crate::models::{BiocIndex, RepositoryFamily};
use crate::registry::RemoteSource;

/// One record of a `PACKAGES` index or a `DESCRIPTION` file.
///
/// Keys are kept exactly as written. Continuation lines are joined to the
/// previous value with `\n`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawMetadataBlock {
    fields: BTreeMap<String, String>,
}

impl RawMetadataBlock {
    pub fn parse(text: &str) -> Self {
        let mut fields: BTreeMap<String, String> = BTreeMap::new();
        let mut current: Option<String> = None;

        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }
            if line.starts_with(' ') || line.starts_with('\t') {
                if let Some(value) = current.as_ref().and_then(|k| fields.get_mut(k)) {
                    if !value.is_empty() {
                        value.push('\n');
                    }
                    value.push_str(line.trim());
                }
                continue;
            }
            match line.split_once(':') {
                Some((key, value)) => {
                    let key = key.trim().to_string();
                    fields.insert(key.clone(), value.trim().to_string());
                    current = Some(key);
                }
                None => current = None,
            }
        }

        RawMetadataBlock { fields }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn package(&self) -> Option<&str> {
        self.get("Package")
    }

    pub fn version(&self) -> Option<&str> {
        self.get("Version")
    }
}

/// Split an index document into records on blank lines.
pub fn split_records(text: &str) -> Vec<RawMetadataBlock> {
    let mut records = Vec::new();
    let mut chunk = String::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !chunk.is_empty() {
                records.push(RawMetadataBlock::parse(&chunk));
                chunk.clear();
            }
        } else {
            chunk.push_str(line);
            chunk.push('\n');
        }
    }
    if !chunk.is_empty() {
        records.push(RawMetadataBlock::parse(&chunk));
    }

    records
}

/// Parsed records of one index document with a by-name lookup table.
#[derive(Debug, Default)]
struct IndexDocument {
    records: Vec<RawMetadataBlock>,
    by_name: HashMap<String, usize>,
}

impl IndexDocument {
    fn parse(text: &str) -> Self {
        let records = split_records(text);
        let mut by_name = HashMap::new();
        for (pos, record) in records.iter().enumerate() {
            if let Some(name) = record.package() {
                // first occurrence wins
                by_name.entry(name.to_string()).or_insert(pos);
            }
        }
        IndexDocument { records, by_name }
    }

    fn find(&self, name: &str) -> Option<&RawMetadataBlock> {
        self.by_name.get(name).map(|&pos| &self.records[pos])
    }

    fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Index documents supplied up front instead of being downloaded.
#[derive(Debug, Default)]
pub struct PreloadedIndices {
    pub cran: Option<String>,
    /// Bioconductor documents in sub-index order; missing entries are treated as empty.
    pub bioconductor: Option<Vec<String>>,
}

/// Read-only cache of the registry indices, loaded once per run.
#[derive(Debug, Default)]
pub struct RegistryIndex {
    cran: IndexDocument,
    bioconductor: [IndexDocument; 3],
}

pub fn cran_index_url(mirrors: &Mirrors) -> String {
    format!("{}/src/contrib/PACKAGES", mirrors.cran_root())
}

pub fn bioconductor_index_url(mirrors: &Mirrors, index: BiocIndex) -> String {
    format!(
        "{}/{}/src/contrib/PACKAGES",
        mirrors.bioconductor_root(),
        index.path()
    )
}

impl RegistryIndex {
    /// Build the cache from index documents already in memory.
    pub fn from_documents(cran: &str, bioconductor: &[&str]) -> Self {
        let mut bioc: [IndexDocument; 3] = Default::default();
        for (slot, text) in bioc.iter_mut().zip(bioconductor) {
            *slot = IndexDocument::parse(text);
        }
        RegistryIndex {
            cran: IndexDocument::parse(cran),
            bioconductor: bioc,
        }
    }

    /// Load the CRAN index and the three Bioconductor sub-indices.
    ///
    /// A CRAN fetch failure is fatal. Individual Bioconductor sub-indices may fail and then
    /// simply match nothing, but if none of them yields any record the load fails with
    /// [`ResolveError::AllIndicesUnavailable`].
    pub async fn load<S: RemoteSource>(
        source: &S,
        mirrors: &Mirrors,
        preloaded: PreloadedIndices,
    ) -> Result<Self, ResolveError> {
        let cran_text = match preloaded.cran {
            Some(text) => text,
            None => {
                let url = cran_index_url(mirrors);
                source
                    .fetch_text(&url)
                    .await
                    .map_err(|source| ResolveError::IndexUnavailable {
                        repository: RepositoryFamily::Cran.to_string(),
                        source,
                    })?
            }
        };
        let cran = IndexDocument::parse(&cran_text);
        tracing::debug!(records = cran.records.len(), "loaded CRAN index");

        let mut bioconductor: [IndexDocument; 3] = Default::default();
        match preloaded.bioconductor {
            Some(texts) => {
                for (slot, text) in bioconductor.iter_mut().zip(&texts) {
                    *slot = IndexDocument::parse(text);
                }
            }
            None => {
                for (slot, index) in bioconductor.iter_mut().zip(BiocIndex::ALL) {
                    let url = bioconductor_index_url(mirrors, index);
                    match source.fetch_text(&url).await {
                        Ok(text) => *slot = IndexDocument::parse(&text),
                        Err(e) => {
                            tracing::warn!(%index, error = %e, "Bioconductor index unavailable")
                        }
                    }
                }
            }
        }
        if bioconductor.iter().all(IndexDocument::is_empty) {
            return Err(ResolveError::AllIndicesUnavailable);
        }
        for (doc, index) in bioconductor.iter().zip(BiocIndex::ALL) {
            tracing::debug!(%index, records = doc.records.len(), "loaded Bioconductor index");
        }

        Ok(RegistryIndex { cran, bioconductor })
    }

    pub fn find_cran(&self, name: &str) -> Option<&RawMetadataBlock> {
        self.cran.find(name)
    }

    /// First Bioconductor record named `name`, searching the sub-indices in order.
    pub fn find_bioconductor(&self, name: &str) -> Option<(BiocIndex, &RawMetadataBlock)> {
        BiocIndex::ALL
            .iter()
            .zip(&self.bioconductor)
            .find_map(|(&index, doc)| doc.find(name).map(|block| (index, block)))
    }

    pub fn contains_cran(&self, name: &str) -> bool {
        self.cran.find(name).is_some()
    }
}
