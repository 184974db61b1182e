use std::collections::BTreeSet;

use crate::config::Config;
use crate::registry::index::RawMetadataBlock;

/// Fields listing packages needed at run or build time.
pub const RUNTIME_FIELDS: &[&str] = &["Imports", "Depends", "LinkingTo"];

/// Fields listing packages that are only suggested.
pub const OPTIONAL_FIELDS: &[&str] = &["Suggests", "Enhances"];

/// Package names listed in a dependency field, with version constraints dropped.
///
/// `"foo (>= 1.0), bar"` yields `foo` and `bar`. Empty entries (such as a trailing
/// comma) are skipped.
pub fn parse_dependency_field(field: &str) -> impl Iterator<Item = &str> {
    field
        .split(',')
        .map(|entry| entry.split('(').next().unwrap_or_default().trim())
        .filter(|name| !name.is_empty())
}

/// Sorted, deduplicated runtime dependencies with the exclusion set removed.
pub fn runtime_dependencies(record: &RawMetadataBlock, config: &Config) -> Vec<String> {
    collect(record, RUNTIME_FIELDS)
        .into_iter()
        .filter(|name| !config.is_excluded(name))
        .collect()
}

/// Sorted, deduplicated suggested/enhancing packages.
pub fn optional_dependencies(record: &RawMetadataBlock) -> Vec<String> {
    collect(record, OPTIONAL_FIELDS).into_iter().collect()
}

fn collect(record: &RawMetadataBlock, fields: &[&str]) -> BTreeSet<String> {
    fields
        .iter()
        .filter_map(|field| record.get(field))
        .flat_map(|field| parse_dependency_field(field))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_version_constraints() {
        let names: Vec<_> = parse_dependency_field("foo (>= 1.0), bar").collect();
        assert_eq!(names, vec!["foo", "bar"]);
    }

    #[test]
    fn test_multiline_and_trailing_comma() {
        let names: Vec<_> =
            parse_dependency_field("R (>= 3.5.0),\nRcpp(>= 1.0.7),\ndata.table,").collect();
        assert_eq!(names, vec!["R", "Rcpp", "data.table"]);
    }

    #[test]
    fn test_runtime_dependencies_merge_fields() {
        let record = RawMetadataBlock::parse(
            "Package: x\nDepends: R (>= 4.0), methods, zoo\nImports: stats, Rcpp (>= 1.0), zoo\nLinkingTo: Rcpp, RcppArmadillo\n",
        );
        let deps = runtime_dependencies(&record, &Config::default());
        assert_eq!(deps, vec!["Rcpp", "RcppArmadillo", "zoo"]);
    }

    #[test]
    fn test_exclusion_ignores_case() {
        let record = RawMetadataBlock::parse("Package: x\nImports: Stats, UTILS, matrix, glue\n");
        let deps = runtime_dependencies(&record, &Config::default());
        assert_eq!(deps, vec!["glue"]);
    }

    #[test]
    fn test_optional_dependencies_keep_base_packages() {
        let record = RawMetadataBlock::parse(
            "Package: x\nSuggests: testthat (>= 3.0.0), knitr,\n    survival\nEnhances: knitr\n",
        );
        assert_eq!(
            optional_dependencies(&record),
            vec!["knitr", "survival", "testthat"]
        );
    }

    #[test]
    fn test_no_dependency_fields() {
        let record = RawMetadataBlock::parse("Package: x\nVersion: 1.0\n");
        assert!(runtime_dependencies(&record, &Config::default()).is_empty());
        assert!(optional_dependencies(&record).is_empty());
    }
}
