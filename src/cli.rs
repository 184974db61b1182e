use std::path::PathBuf;

use clap::Parser;

use crate::models::RepositoryFamily;

#[derive(Parser, Debug)]
#[command(
    name = "rpkgbuild",
    about = "Generate Arch Linux PKGBUILDs for R packages",
    version
)]
pub struct Cli {
    /// R package names; GitHub packages as owner/repo
    #[arg(required = true, value_name = "PACKAGE")]
    pub packages: Vec<String>,

    /// Repository the packages are taken from
    #[arg(long, default_value = "cran", value_name = "REPO")]
    pub repo: RepoArg,

    /// Directory the package directories are written to
    #[arg(long, default_value = ".")]
    pub destdir: PathBuf,

    /// Also generate build files for all runtime dependencies
    #[arg(long)]
    pub recursive: bool,

    /// Do not rewrite packages whose PKGBUILD already exists
    #[arg(long)]
    pub skip: bool,

    /// Keep going when a dependency cannot be resolved
    #[arg(long)]
    pub best_effort: bool,

    /// Run updpkgsums on every written PKGBUILD
    #[arg(long)]
    pub updpkgsums: bool,

    /// CRAN mirror [default: https://cran.r-project.org]
    #[arg(long, value_name = "URL")]
    pub cran_mirror: Option<String>,

    /// Bioconductor mirror [default: https://bioconductor.org]
    #[arg(long, value_name = "URL")]
    pub bioconductor_mirror: Option<String>,

    /// Pre-downloaded CRAN PACKAGES file
    #[arg(long, value_name = "FILE")]
    pub cran_index: Option<PathBuf>,

    /// Pre-downloaded Bioconductor PACKAGES file (repeatable: software, annotation, experiment)
    #[arg(long, value_name = "FILE")]
    pub bioc_index: Vec<PathBuf>,

    /// Maintainer name in the PKGBUILD
    #[arg(long)]
    pub maintainer: Option<String>,

    /// Maintainer email in the PKGBUILD
    #[arg(long)]
    pub email: Option<String>,

    /// Maintainer GitHub user in lilac.yaml
    #[arg(long, value_name = "USER")]
    pub maintainer_github: Option<String>,

    /// Config file [default: ./.rpkgbuild/config.toml, fallback ~/.config/rpkgbuild/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum RepoArg {
    Cran,
    Bioconductor,
    Github,
}

impl From<RepoArg> for RepositoryFamily {
    fn from(arg: RepoArg) -> Self {
        match arg {
            RepoArg::Cran => RepositoryFamily::Cran,
            RepoArg::Bioconductor => RepositoryFamily::Bioconductor,
            RepoArg::Github => RepositoryFamily::GitHub,
        }
    }
}
