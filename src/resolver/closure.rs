use std::collections::HashSet;

use crate::artifact::ArtifactInspector;
use crate::error::ResolveError;
use crate::models::{PackageDescriptor, RepositoryFamily};
use crate::registry::RemoteSource;
use crate::resolver::Resolver;

/// What to do when one package of a closure fails to resolve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failure.
    #[default]
    FailFast,
    /// Record the failure, skip that branch and keep going.
    BestEffort,
}

/// Predicate telling whether a package's output already exists.
pub type ExistsCheck<'p> = &'p dyn Fn(&PackageDescriptor) -> bool;

#[derive(Clone, Copy, Default)]
pub struct ExpandOptions<'p> {
    /// Follow runtime dependencies.
    pub recursive: bool,
    pub failure_policy: FailurePolicy,
    /// Packages for which this returns `true` are still resolved and walked through,
    /// but marked as skipped so they are not emitted again.
    pub skip_if_exists: Option<ExistsCheck<'p>>,
}

#[derive(Debug, Clone)]
pub struct ClosureEntry {
    pub descriptor: PackageDescriptor,
    pub skipped: bool,
}

/// Descriptors reachable from one or more root packages, in depth-first pre-order.
#[derive(Debug, Default)]
pub struct DependencyClosure {
    pub entries: Vec<ClosureEntry>,
    /// Failures recorded under [`FailurePolicy::BestEffort`].
    pub failures: Vec<ResolveError>,
    visited: HashSet<(RepositoryFamily, String)>,
}

impl DependencyClosure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &PackageDescriptor> {
        self.entries.iter().map(|e| &e.descriptor)
    }
}

impl<'a, S: RemoteSource, A: ArtifactInspector> Resolver<'a, S, A> {
    /// Resolve `name` and, when `options.recursive` is set, everything it depends on.
    pub async fn expand_closure(
        &self,
        name: &str,
        family: RepositoryFamily,
        options: ExpandOptions<'_>,
    ) -> Result<DependencyClosure, ResolveError> {
        let mut closure = DependencyClosure::new();
        self.expand_into(&mut closure, name, family, options).await?;
        Ok(closure)
    }

    /// Like [`expand_closure`](Self::expand_closure), adding to an existing closure.
    ///
    /// Packages already in `closure` (by repository and name) are not resolved again,
    /// which also ends the walk on dependency cycles. On a fail-fast error `closure`
    /// keeps everything resolved before the failure.
    pub async fn expand_into(
        &self,
        closure: &mut DependencyClosure,
        name: &str,
        family: RepositoryFamily,
        options: ExpandOptions<'_>,
    ) -> Result<(), ResolveError> {
        let mut pending = vec![(family, name.to_string())];

        while let Some((family, name)) = pending.pop() {
            if !closure.visited.insert((family, name.clone())) {
                tracing::debug!(package = %name, %family, "already resolved");
                continue;
            }

            let descriptor = match self.resolve_descriptor(&name, family).await {
                Ok(descriptor) => descriptor,
                Err(e) => match options.failure_policy {
                    FailurePolicy::FailFast => return Err(e),
                    FailurePolicy::BestEffort => {
                        tracing::warn!(package = %name, %family, error = %e, "skipping package");
                        closure.failures.push(e);
                        continue;
                    }
                },
            };

            if options.recursive {
                // reversed so the first dependency is resolved next
                for dep in descriptor.runtime_dependencies.iter().rev() {
                    let dep_family = self.classify_repository(dep);
                    tracing::debug!(package = %dep, family = %dep_family, parent = %descriptor.name, "queued dependency");
                    pending.push((dep_family, dep.clone()));
                }
            }

            let skipped = options
                .skip_if_exists
                .is_some_and(|exists| exists(&descriptor));
            if skipped {
                tracing::info!(package = %descriptor.name, "output exists, skipping");
            }
            closure.entries.push(ClosureEntry {
                descriptor,
                skipped,
            });
        }

        Ok(())
    }
}
