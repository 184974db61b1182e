use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

/// R packages that ship with R itself and are never packaged separately.
pub const BASE_PACKAGES: &[&str] = &[
    "base",
    "boot",
    "class",
    "cluster",
    "codetools",
    "compiler",
    "datasets",
    "foreign",
    "graphics",
    "grDevices",
    "grid",
    "KernSmooth",
    "lattice",
    "MASS",
    "Matrix",
    "methods",
    "mgcv",
    "nlme",
    "nnet",
    "parallel",
    "rpart",
    "spatial",
    "splines",
    "stats",
    "stats4",
    "survival",
    "tcltk",
    "tools",
    "utils",
    "R",
];

/// Root configuration structure, deserialized from `.rpkgbuild/config.toml`.
///
/// Built once at startup and passed by reference into every resolution.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub mirrors: Mirrors,
    #[serde(default)]
    pub maintainer: Maintainer,
    /// Packages never treated as external dependencies. Matched case-insensitively.
    #[serde(default = "default_excluded")]
    pub excluded: BTreeSet<String>,
}

/// Registry mirrors used for index and archive downloads.
#[derive(Debug, Clone, Deserialize)]
pub struct Mirrors {
    #[serde(default = "default_cran_mirror")]
    pub cran: String,
    #[serde(default = "default_bioconductor_mirror")]
    pub bioconductor: String,
}

/// Maintainer identity written into the generated files.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Maintainer {
    pub name: Option<String>,
    pub email: Option<String>,
    /// GitHub user listed in `lilac.yaml`.
    pub github: Option<String>,
}

fn default_cran_mirror() -> String {
    "https://cran.r-project.org".to_string()
}

fn default_bioconductor_mirror() -> String {
    "https://bioconductor.org".to_string()
}

fn default_excluded() -> BTreeSet<String> {
    BASE_PACKAGES.iter().map(|p| p.to_string()).collect()
}

impl Default for Mirrors {
    fn default() -> Self {
        Mirrors {
            cran: default_cran_mirror(),
            bioconductor: default_bioconductor_mirror(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            mirrors: Mirrors::default(),
            maintainer: Maintainer::default(),
            excluded: default_excluded(),
        }
    }
}

impl Mirrors {
    pub fn cran_root(&self) -> &str {
        self.cran.trim_end_matches('/')
    }

    pub fn bioconductor_root(&self) -> &str {
        self.bioconductor.trim_end_matches('/')
    }
}

impl Config {
    /// Whether `name` belongs to the exclusion set, ignoring case.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded.iter().any(|e| e.eq_ignore_ascii_case(name))
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override`: path passed via `--config`
/// 2. `<working_dir>/.rpkgbuild/config.toml`
/// 3. `~/.config/rpkgbuild/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(working_dir: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        let content = std::fs::read_to_string(path)?;
        return Ok(toml::from_str(&content)?);
    }

    let local_config = working_dir.join(".rpkgbuild").join("config.toml");
    if local_config.exists() {
        let content = std::fs::read_to_string(&local_config)?;
        return Ok(toml::from_str(&content)?);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("rpkgbuild").join("config.toml");
        if home_config.exists() {
            let content = std::fs::read_to_string(&home_config)?;
            return Ok(toml::from_str(&content)?);
        }
    }

    Ok(Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_excludes_base_packages() {
        let cfg = Config::default();
        assert_eq!(cfg.excluded.len(), 30);
        assert!(cfg.is_excluded("stats"));
        assert!(cfg.is_excluded("Stats"));
        assert!(cfg.is_excluded("matrix"));
        assert!(!cfg.is_excluded("ggplot2"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let cfg: Config = toml::from_str(
            r#"
[mirrors]
cran = "https://mirrors.ustc.edu.cn/CRAN/"

[maintainer]
name = "Jane Doe"
"#,
        )
        .unwrap();
        assert_eq!(cfg.mirrors.cran_root(), "https://mirrors.ustc.edu.cn/CRAN");
        assert_eq!(cfg.mirrors.bioconductor_root(), "https://bioconductor.org");
        assert_eq!(cfg.maintainer.name.as_deref(), Some("Jane Doe"));
        assert!(cfg.maintainer.email.is_none());
        assert!(cfg.is_excluded("utils"));
    }

    #[test]
    fn test_excluded_override() {
        let cfg: Config = toml::from_str(r#"excluded = ["base", "Rcpp"]"#).unwrap();
        assert!(cfg.is_excluded("rcpp"));
        assert!(!cfg.is_excluded("stats"));
    }

    #[test]
    fn test_load_config_from_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".rpkgbuild")).unwrap();
        std::fs::write(
            dir.path().join(".rpkgbuild").join("config.toml"),
            "[mirrors]\nbioconductor = \"https://mirrors.ustc.edu.cn/bioc/\"\n",
        )
        .unwrap();

        let cfg = load_config(dir.path(), None).unwrap();
        assert_eq!(
            cfg.mirrors.bioconductor_root(),
            "https://mirrors.ustc.edu.cn/bioc"
        );
    }

    #[test]
    fn test_load_config_override_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[maintainer]\ngithub = \"octocat\"\n").unwrap();

        let cfg = load_config(dir.path(), Some(&path)).unwrap();
        assert_eq!(cfg.maintainer.github.as_deref(), Some("octocat"));
    }
}
