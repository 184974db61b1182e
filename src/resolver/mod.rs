//! Descriptor resolution and dependency closure.
//!
//! A [`Resolver`] borrows the run's immutable state (configuration, loaded registry
//! indices) and its collaborators (network source, archive inspector).
//!
//! - [`normalizer`]: [`Resolver::resolve_descriptor`]: one package to one
//!   [`PackageDescriptor`](crate::models::PackageDescriptor).
//! - [`closure`]: [`Resolver::expand_closure`]: walks runtime dependencies.
//! - [`dependencies`]: parsing of `Imports`/`Depends`/`LinkingTo`/`Suggests`/`Enhances`.
//! - [`source`]: per-repository download URLs and PKGBUILD source templates.

pub mod closure;
pub mod dependencies;
pub mod normalizer;
pub mod source;

use crate::artifact::ArtifactInspector;
use crate::config::Config;
use crate::models::RepositoryFamily;
use crate::registry::index::RegistryIndex;
use crate::registry::RemoteSource;

pub struct Resolver<'a, S, A> {
    config: &'a Config,
    index: &'a RegistryIndex,
    source: &'a S,
    inspector: &'a A,
}

impl<'a, S: RemoteSource, A: ArtifactInspector> Resolver<'a, S, A> {
    pub fn new(
        config: &'a Config,
        index: &'a RegistryIndex,
        source: &'a S,
        inspector: &'a A,
    ) -> Self {
        Resolver {
            config,
            index,
            source,
            inspector,
        }
    }

    /// Repository to resolve a transitive dependency from.
    ///
    /// Heuristic: a name present in the CRAN index is taken from CRAN, anything else from
    /// Bioconductor. GitHub is never chosen, because GitHub packages are not listed in any
    /// index a dependency could be looked up in.
    pub fn classify_repository(&self, name: &str) -> RepositoryFamily {
        if self.index.contains_cran(name) {
            RepositoryFamily::Cran
        } else {
            RepositoryFamily::Bioconductor
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::TarballInspector;
    use crate::testutil::FakeSource;

    #[test]
    fn test_classify_repository() {
        let config = Config::default();
        let index = RegistryIndex::from_documents(
            "Package: rlang\nVersion: 1.1.0\n",
            &["Package: limma\nVersion: 3.58.1\n"],
        );
        let source = FakeSource::new();
        let inspector = TarballInspector::new();
        let resolver = Resolver::new(&config, &index, &source, &inspector);

        assert_eq!(resolver.classify_repository("rlang"), RepositoryFamily::Cran);
        assert_eq!(
            resolver.classify_repository("limma"),
            RepositoryFamily::Bioconductor
        );
        // unknown names go to Bioconductor and fail there
        assert_eq!(
            resolver.classify_repository("nowhere"),
            RepositoryFamily::Bioconductor
        );
    }
}
