/// How a rule tests the license text.
#[derive(Debug)]
pub enum Matcher {
    /// Text contains any of the substrings, or equals any of the full phrases.
    Mentions {
        substrings: &'static [&'static str],
        phrases: &'static [&'static str],
    },
    /// Text equals one of the spellings exactly.
    OneOf(&'static [&'static str]),
}

impl Matcher {
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Matcher::Mentions { substrings, phrases } => {
                substrings.iter().any(|s| text.contains(s)) || phrases.contains(&text)
            }
            Matcher::OneOf(spellings) => spellings.contains(&text),
        }
    }
}

/// One entry of the license rule chain.
#[derive(Debug)]
pub struct LicenseRule {
    pub canonical_id: &'static str,
    pub matcher: Matcher,
    /// Whether texts of this license usually point at a bundled `file LICENSE`.
    pub bundles_file: bool,
}

/// Identifier for license texts no rule recognises.
pub const CUSTOM: &str = "custom";

const fn mentions(
    canonical_id: &'static str,
    substrings: &'static [&'static str],
    phrases: &'static [&'static str],
    bundles_file: bool,
) -> LicenseRule {
    LicenseRule {
        canonical_id,
        matcher: Matcher::Mentions { substrings, phrases },
        bundles_file,
    }
}

const fn one_of(canonical_id: &'static str, spellings: &'static [&'static str]) -> LicenseRule {
    LicenseRule {
        canonical_id,
        matcher: Matcher::OneOf(spellings),
        bundles_file: false,
    }
}

/// The rule chain in priority order.
///
/// Order is significant: LGPL and AGPL texts also contain "GPL", so both come before
/// the generic GPL rule, and any text mentioning GPL is GPL even if it also mentions
/// MIT or BSD. Exact MPL spellings come before the CPL/EPL substring rules.
pub static RULES: &[LicenseRule] = &[
    mentions("LGPL", &["LGPL"], &["GNU Lesser General Public License"], false),
    mentions("AGPL", &["AGPL"], &["GNU Affero General Public License"], false),
    mentions("GPL", &["GNU General Public License", "GPL"], &[], false),
    mentions("Apache", &["Apache"], &[], false),
    mentions("BSD", &["BSD"], &[], true),
    mentions("Artistic2.0", &["Artistic"], &[], false),
    mentions(
        "CCPL:by-nc-sa",
        &["CC BY"],
        &["Creative Commons Attribution 4.0 International License"],
        false,
    ),
    one_of("MPL", &["Mozilla Public License 1.1", "MPL", "MPL-1.1"]),
    one_of(
        "MPL2",
        &[
            "Mozilla Public License 2.0",
            "Mozilla Public License Version 2.0",
            "MPL (>= 2)",
            "MPL (== 2.0)",
            "MPL (>= 2.0)",
            "MPL-2.0",
            "MPL-2.0 | file LICENSE",
            "MPL (>= 2) | file LICENSE",
        ],
    ),
    mentions("CPL", &["CPL"], &["Common Public License Version 1.0"], false),
    mentions("MIT", &["MIT"], &[], true),
    mentions("EPL", &["EPL"], &[], false),
    mentions("CeCILL", &["CeCILL"], &[], true),
    mentions("EUPL", &["EUPL"], &[], true),
    mentions("ACM", &["ACM"], &[], true),
    mentions("BSL", &["BSL"], &[], true),
    mentions("CC0", &["CC0"], &[], true),
    mentions("Lucent Public License", &["Lucent Public License"], &[], true),
    mentions("Unlimited", &["Unlimited"], &[], true),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiers_are_unique() {
        let mut ids: Vec<_> = RULES.iter().map(|r| r.canonical_id).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
        assert!(!ids.contains(&CUSTOM));
    }

    #[test]
    fn test_lgpl_and_agpl_precede_gpl() {
        let pos = |id: &str| RULES.iter().position(|r| r.canonical_id == id).unwrap();
        assert!(pos("LGPL") < pos("GPL"));
        assert!(pos("AGPL") < pos("GPL"));
        assert!(pos("GPL") < pos("MIT"));
        assert!(pos("MPL2") < pos("CPL"));
    }

    #[test]
    fn test_matcher_modes() {
        let gpl = &RULES[2].matcher;
        assert!(gpl.matches("GPL-3"));
        assert!(gpl.matches("GNU General Public License version 2"));

        let mpl = RULES.iter().find(|r| r.canonical_id == "MPL").unwrap();
        assert!(mpl.matcher.matches("MPL"));
        assert!(!mpl.matcher.matches("MPL + file LICENSE"));
    }
}
