use serde::Serialize;

use crate::config::Maintainer;
use crate::models::{PackageDescriptor, RepositoryKind};

const PRE_BUILD_SCRIPT: &str = "for line in edit_file('PKGBUILD'):
  if line.startswith('_pkgver='):
    line = f'_pkgver={_G.newver}'
  print(line)
update_pkgver_and_pkgrel(_G.newver.replace(':', '.').replace('-', '.'))
";

const POST_BUILD_SCRIPT: &str = "git_pkgbuild_commit()\n";

#[derive(Debug, Serialize)]
struct LilacConfig {
    maintainers: Vec<LilacMaintainer>,
    build_prefix: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    repo_depends: Vec<String>,
    pre_build_script: &'static str,
    post_build_script: &'static str,
    update_on: Vec<UpdateSource>,
}

#[derive(Debug, Serialize)]
struct LilacMaintainer {
    github: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum UpdateSource {
    Rpkgs {
        source: &'static str,
        pkgname: String,
        repo: &'static str,
    },
    Alias {
        alias: &'static str,
    },
    GitHub {
        source: &'static str,
        github: String,
        use_latest_release: bool,
    },
}

/// Render the `lilac.yaml` build-bot configuration for a resolved package.
pub fn render(descriptor: &PackageDescriptor, maintainer: &Maintainer) -> serde_yaml::Result<String> {
    let update_on = match &descriptor.repository {
        RepositoryKind::GitHub { owner, repo } => vec![UpdateSource::GitHub {
            source: "github",
            github: format!("{}/{}", owner, repo),
            use_latest_release: true,
        }],
        RepositoryKind::Cran | RepositoryKind::Bioconductor { .. } => vec![
            UpdateSource::Rpkgs {
                source: "rpkgs",
                pkgname: descriptor.name.clone(),
                repo: if matches!(descriptor.repository, RepositoryKind::Cran) {
                    "cran"
                } else {
                    "bioconductor"
                },
            },
            UpdateSource::Alias { alias: "r" },
        ],
    };

    let config = LilacConfig {
        maintainers: vec![LilacMaintainer {
            github: maintainer.github.clone(),
        }],
        build_prefix: "extra-x86_64",
        repo_depends: descriptor
            .installable_dependencies()
            .into_iter()
            .filter(|d| d != "r")
            .collect(),
        pre_build_script: PRE_BUILD_SCRIPT,
        post_build_script: POST_BUILD_SCRIPT,
        update_on,
    };

    serde_yaml::to_string(&config)
}
