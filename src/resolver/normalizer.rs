use crate::artifact::{has_fortran_sources, ArtifactInspector};
use crate::error::ResolveError;
use crate::license::classifier::classify;
use crate::models::{PackageDescriptor, RepositoryFamily, RepositoryKind, SourceLocation};
use crate::registry::github;
use crate::registry::index::RawMetadataBlock;
use crate::registry::RemoteSource;
use crate::resolver::dependencies::{optional_dependencies, runtime_dependencies};
use crate::resolver::{source, Resolver};

/// Name, version and source of a package, before its archive is read.
struct Located {
    name: String,
    version: String,
    repository: RepositoryKind,
    release_tag: Option<String>,
    source_location: SourceLocation,
    project_url: String,
}

fn not_found(package: &str, repository: impl ToString) -> ResolveError {
    ResolveError::NotFound {
        package: package.to_string(),
        repository: repository.to_string(),
    }
}

fn malformed(package: &str, repository: &RepositoryKind, reason: impl ToString) -> ResolveError {
    ResolveError::MalformedRecord {
        package: package.to_string(),
        repository: repository.to_string(),
        reason: reason.to_string(),
    }
}

/// Join continuation lines with single spaces.
fn collapse_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

impl<'a, S: RemoteSource, A: ArtifactInspector> Resolver<'a, S, A> {
    /// Resolve `name` in `family` into a descriptor.
    ///
    /// The index only decides version and location; title, dependencies, license and
    /// system requirements come from the `DESCRIPTION` file inside the source archive.
    /// For GitHub, `name` is `owner/repo` and the descriptor is named after `repo`.
    pub async fn resolve_descriptor(
        &self,
        name: &str,
        family: RepositoryFamily,
    ) -> Result<PackageDescriptor, ResolveError> {
        let located = self.locate(name, family).await?;
        let package = located.name.as_str();
        let repository = &located.repository;
        tracing::debug!(
            package,
            version = %located.version,
            %repository,
            url = %located.source_location.download_url,
            "located package"
        );

        let artifact = self
            .source
            .fetch_bytes(&located.source_location.download_url)
            .await
            .map_err(|source| ResolveError::Transport {
                package: package.to_string(),
                repository: repository.to_string(),
                source,
            })?;

        let entries = self
            .inspector
            .list_entries(&artifact)
            .map_err(|e| malformed(package, repository, e))?;
        let record_path = format!("{}/DESCRIPTION", package);
        let text = self
            .inspector
            .extract_metadata_record(&artifact, &record_path)
            .map_err(|e| malformed(package, repository, e))?;
        let record = RawMetadataBlock::parse(&text);

        let license_text = record
            .get("License")
            .ok_or_else(|| malformed(package, repository, "DESCRIPTION has no License field"))?;
        let fortran_sources = has_fortran_sources(&entries);
        let needs_compilation = record
            .get("NeedsCompilation")
            .is_some_and(|v| v.trim() == "yes");

        let descriptor = PackageDescriptor {
            title: record.get("Title").map(collapse_lines).unwrap_or_default(),
            runtime_dependencies: runtime_dependencies(&record, self.config),
            optional_dependencies: optional_dependencies(&record),
            needs_native_build: needs_compilation || fortran_sources,
            fortran_sources,
            license: classify(license_text),
            system_requirements: record
                .get("SystemRequirements")
                .map(collapse_lines)
                .filter(|s| !s.is_empty()),
            name: located.name,
            version: located.version,
            repository: located.repository,
            release_tag: located.release_tag,
            source_location: located.source_location,
            project_url: located.project_url,
        };
        tracing::info!(
            package = %descriptor.name,
            version = %descriptor.version,
            repository = %descriptor.repository,
            license = %descriptor.license.canonical_id,
            "resolved"
        );
        Ok(descriptor)
    }

    async fn locate(&self, name: &str, family: RepositoryFamily) -> Result<Located, ResolveError> {
        let mirrors = &self.config.mirrors;
        match family {
            RepositoryFamily::Cran => {
                let repository = RepositoryKind::Cran;
                let block = self
                    .index
                    .find_cran(name)
                    .ok_or_else(|| not_found(name, family))?;
                let version = block
                    .version()
                    .ok_or_else(|| malformed(name, &repository, "index entry has no Version"))?;
                Ok(Located {
                    name: name.to_string(),
                    version: version.to_string(),
                    source_location: source::cran(mirrors, name, version),
                    project_url: source::cran_project_url(),
                    repository,
                    release_tag: None,
                })
            }
            RepositoryFamily::Bioconductor => {
                let (index, block) = self
                    .index
                    .find_bioconductor(name)
                    .ok_or_else(|| not_found(name, family))?;
                let repository = RepositoryKind::Bioconductor { index };
                let version = block
                    .version()
                    .ok_or_else(|| malformed(name, &repository, "index entry has no Version"))?;
                Ok(Located {
                    name: name.to_string(),
                    version: version.to_string(),
                    source_location: source::bioconductor(mirrors, index, name, version),
                    project_url: source::bioconductor_project_url(),
                    repository,
                    release_tag: None,
                })
            }
            RepositoryFamily::GitHub => {
                let (owner, repo) =
                    github::split_spec(name).ok_or_else(|| ResolveError::InvalidName {
                        name: name.to_string(),
                        reason: "GitHub packages are given as owner/repo".to_string(),
                    })?;
                let repository = RepositoryKind::GitHub {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                };
                let tag = self
                    .source
                    .latest_release(owner, repo)
                    .await
                    .map_err(|source| ResolveError::Transport {
                        package: repo.to_string(),
                        repository: repository.to_string(),
                        source,
                    })?
                    .ok_or_else(|| not_found(repo, &repository))?;
                let version = source::version_from_tag(&tag).to_string();
                Ok(Located {
                    name: repo.to_string(),
                    source_location: source::github(owner, repo, &tag, &version),
                    project_url: source::github_project_url(owner, repo),
                    version,
                    repository,
                    release_tag: Some(tag),
                })
            }
        }
    }
}
