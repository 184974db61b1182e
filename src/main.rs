//! `rpkgbuild`: generate Arch Linux `PKGBUILD`s for R packages.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load config and apply CLI overrides ([`config::load_config`]).
//! 3. Load the CRAN and Bioconductor indices once ([`registry::index`]).
//! 4. Resolve each requested package and, with `--recursive`, its runtime dependencies
//!    ([`resolver`]).
//! 5. Write `PKGBUILD` + `lilac.yaml` per package ([`emit`]).
//! 6. Print the run summary ([`report`]).
//! 7. Exit `0`, or `1` if any package failed.

mod artifact;
mod cli;
mod config;
mod emit;
mod error;
mod license;
mod models;
mod registry;
mod report;
mod resolver;
#[cfg(test)]
mod testutil;

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use artifact::TarballInspector;
use cli::{Cli, ReportFormat};
use config::{load_config, Config};
use models::{PackageDescriptor, RepositoryFamily};
use registry::index::{PreloadedIndices, RegistryIndex};
use registry::HttpSource;
use report::{Outcome, Status};
use resolver::closure::{DependencyClosure, ExistsCheck, ExpandOptions, FailurePolicy};
use resolver::Resolver;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let working_dir = std::env::current_dir()?;
    let config = apply_overrides(load_config(&working_dir, cli.config.as_deref())?, &cli);
    let preloaded = preloaded_indices(&cli)?;

    let source = HttpSource::new()?;
    let inspector = TarballInspector::new();

    let pb = spinner(cli.quiet)?;
    pb.set_message("loading registry indices");
    let index = RegistryIndex::load(&source, &config.mirrors, preloaded).await?;

    let resolver = Resolver::new(&config, &index, &source, &inspector);
    let family: RepositoryFamily = cli.repo.into();
    let destdir = cli.destdir.as_path();

    let output_exists = |d: &PackageDescriptor| emit::pkgbuild_path(destdir, &d.name).exists();
    let options = ExpandOptions {
        recursive: cli.recursive,
        failure_policy: if cli.best_effort {
            FailurePolicy::BestEffort
        } else {
            FailurePolicy::FailFast
        },
        skip_if_exists: cli.skip.then_some(&output_exists as ExistsCheck),
    };

    let mut closure = DependencyClosure::new();
    let mut outcomes = Vec::new();
    for package in &cli.packages {
        pb.set_message(format!("resolving {}", package));
        if let Err(e) = resolver
            .expand_into(&mut closure, package, family, options)
            .await
        {
            tracing::error!(package = %package, error = %e, "resolution failed");
            outcomes.push(Outcome::failed(e.package().unwrap_or(package.as_str()), e.to_string()));
            break;
        }
    }
    pb.finish_and_clear();

    for entry in &closure.entries {
        let descriptor = &entry.descriptor;
        if entry.skipped {
            outcomes.push(Outcome::resolved(descriptor, Status::Skipped));
            continue;
        }
        let dir = emit::write_package(descriptor, &config.maintainer, destdir)?;
        if cli.updpkgsums {
            if let Err(e) = emit::update_checksums(&dir) {
                tracing::warn!(package = %descriptor.name, error = %e, "checksum update failed");
            }
        }
        outcomes.push(Outcome::resolved(descriptor, Status::Written));
    }
    for failure in &closure.failures {
        outcomes.push(Outcome::failed(
            failure.package().unwrap_or("-"),
            failure.to_string(),
        ));
    }

    match cli.report {
        ReportFormat::Terminal => report::terminal::render(&outcomes, destdir, cli.quiet),
        ReportFormat::Json => {
            let descriptors: Vec<&PackageDescriptor> = closure.descriptors().collect();
            println!("{}", serde_json::to_string_pretty(&descriptors)?);
        }
    }

    let has_errors = outcomes.iter().any(|o| o.status == Status::Failed);
    if has_errors {
        if !cli.quiet {
            eprintln!("{}", "Some packages could not be generated".red());
        }
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string()),
        ))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// CLI flags win over config file values.
fn apply_overrides(mut config: Config, cli: &Cli) -> Config {
    if let Some(mirror) = &cli.cran_mirror {
        config.mirrors.cran = mirror.clone();
    }
    if let Some(mirror) = &cli.bioconductor_mirror {
        config.mirrors.bioconductor = mirror.clone();
    }
    if let Some(name) = &cli.maintainer {
        config.maintainer.name = Some(name.clone());
    }
    if let Some(email) = &cli.email {
        config.maintainer.email = Some(email.clone());
    }
    if let Some(github) = &cli.maintainer_github {
        config.maintainer.github = Some(github.clone());
    }
    config
}

fn preloaded_indices(cli: &Cli) -> Result<PreloadedIndices> {
    let read = |path: &Path| {
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    };

    let cran = cli.cran_index.as_deref().map(|p| read(p)).transpose()?;
    let bioconductor = if cli.bioc_index.is_empty() {
        None
    } else {
        Some(
            cli.bioc_index
                .iter()
                .map(|p| read(p))
                .collect::<Result<Vec<_>>>()?,
        )
    };

    Ok(PreloadedIndices { cran, bioconductor })
}

fn spinner(quiet: bool) -> Result<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(120));
    Ok(pb)
}
