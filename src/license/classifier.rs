use crate::license::rules::{CUSTOM, RULES};
use crate::models::LicenseClassification;

/// Classify the `License:` field of a package.
///
/// Walks [`RULES`] in order and takes the first match; unmatched text is `custom`.
/// For licenses that usually bundle a license file (and for `custom`), the text is
/// scanned for `file LICENSE` / `file LICENCE`. When both appear, `LICENCE` wins.
pub fn classify(license: &str) -> LicenseClassification {
    let text = license.trim();

    let (canonical_id, bundles_file) = RULES
        .iter()
        .find(|rule| rule.matcher.matches(text))
        .map(|rule| (rule.canonical_id, rule.bundles_file))
        .unwrap_or((CUSTOM, true));

    let required_license_file = if bundles_file {
        bundled_license_file(text)
    } else {
        None
    };

    LicenseClassification {
        canonical_id: canonical_id.to_string(),
        required_license_file,
    }
}

fn bundled_license_file(text: &str) -> Option<String> {
    if text.contains("file LICENCE") {
        Some("LICENCE".to_string())
    } else if text.contains("file LICENSE") {
        Some("LICENSE".to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(text: &str) -> String {
        classify(text).canonical_id
    }

    #[test]
    fn test_mit_with_license_file() {
        let c = classify("MIT + file LICENSE");
        assert_eq!(c.canonical_id, "MIT");
        assert_eq!(c.required_license_file.as_deref(), Some("LICENSE"));
    }

    #[test]
    fn test_british_spelling() {
        let c = classify("BSD_3_clause + file LICENCE");
        assert_eq!(c.canonical_id, "BSD");
        assert_eq!(c.required_license_file.as_deref(), Some("LICENCE"));
    }

    #[test]
    fn test_lgpl_beats_gpl() {
        assert_eq!(id("LGPL-2.1 | GPL-3"), "LGPL");
        assert_eq!(id("GPL (>= 2) | LGPL-3"), "LGPL");
        assert_eq!(id("GNU Lesser General Public License"), "LGPL");
    }

    #[test]
    fn test_agpl_beats_gpl() {
        assert_eq!(id("AGPL-3"), "AGPL");
        assert_eq!(id("GNU Affero General Public License"), "AGPL");
    }

    #[test]
    fn test_gpl_beats_mit_and_bsd() {
        assert_eq!(id("MIT + file LICENSE | GPL-2"), "GPL");
        assert_eq!(id("GPL-2 | BSD_3_clause + file LICENSE"), "GPL");
    }

    #[test]
    fn test_gpl_never_records_license_file() {
        let c = classify("GPL-3 | file LICENSE");
        assert_eq!(c.canonical_id, "GPL");
        assert_eq!(c.required_license_file, None);
    }

    #[test]
    fn test_mpl_versions() {
        assert_eq!(id("MPL"), "MPL");
        assert_eq!(id("Mozilla Public License 1.1"), "MPL");
        assert_eq!(id("MPL-2.0"), "MPL2");
        assert_eq!(id("MPL (>= 2) | file LICENSE"), "MPL2");
        // unlisted spellings fall through to the generic rules
        assert_eq!(id("MPL-2.0 + file LICENSE"), "custom");
    }

    #[test]
    fn test_creative_commons() {
        assert_eq!(id("CC BY 4.0"), "CCPL:by-nc-sa");
        assert_eq!(
            id("Creative Commons Attribution 4.0 International License"),
            "CCPL:by-nc-sa"
        );
        let c = classify("CC0");
        assert_eq!(c.canonical_id, "CC0");
        assert_eq!(c.required_license_file, None);
    }

    #[test]
    fn test_typical_spellings_round_trip() {
        assert_eq!(id("Apache License 2.0"), "Apache");
        assert_eq!(id("Apache License (== 2.0) | file LICENSE"), "Apache");
        assert_eq!(id("Artistic-2.0"), "Artistic2.0");
        assert_eq!(id("Common Public License Version 1.0"), "CPL");
        assert_eq!(id("EPL"), "EPL");
        assert_eq!(id("CeCILL-2"), "CeCILL");
        assert_eq!(id("EUPL-1.2"), "EUPL");
        assert_eq!(id("ACM | file LICENSE"), "ACM");
        assert_eq!(id("BSL-1.0"), "BSL");
        assert_eq!(id("Lucent Public License"), "Lucent Public License");
        assert_eq!(id("Unlimited"), "Unlimited");
    }

    #[test]
    fn test_custom_still_scans_for_file() {
        let c = classify("file LICENSE");
        assert_eq!(c.canonical_id, "custom");
        assert_eq!(c.required_license_file.as_deref(), Some("LICENSE"));

        let c = classify("Part of R 4.3.1");
        assert_eq!(c.canonical_id, "custom");
        assert_eq!(c.required_license_file, None);
    }

    #[test]
    fn test_surrounding_whitespace_ignored() {
        assert_eq!(id("  MPL \n"), "MPL");
    }
}
