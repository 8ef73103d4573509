/// Synonym table, matched against the hyphenated, lower-cased input.
/// Order is fixed; the first matching row wins.
const SYNONYMS: &[(&str, &[&str])] = &[
    ("MIT", &["mit"]),
    ("Apache-2.0", &["apache-2.0", "apache2", "apache-v2"]),
    ("GPL-3.0", &["gpl-3.0", "gplv3", "gpl3"]),
    ("GPL-2.0", &["gpl-2.0", "gplv2", "gpl2"]),
    ("BSD-3-Clause", &["bsd-3-clause", "bsd3"]),
    ("BSD-2-Clause", &["bsd-2-clause", "bsd2"]),
    ("ISC", &["isc"]),
];

/// Normalize a declared license string to its canonical id.
///
/// Trims, replaces spaces with hyphens, then looks the lower-cased form up in
/// the synonym table. Unknown strings come back hyphenated but otherwise
/// untouched; blank input yields an empty string.
pub fn normalize_declared(raw: &str) -> String {
    let hyphenated = raw.trim().replace(' ', "-");
    if hyphenated.is_empty() {
        return hyphenated;
    }

    let lower = hyphenated.to_lowercase();
    SYNONYMS
        .iter()
        .find(|(_, aliases)| aliases.contains(&lower.as_str()))
        .map(|(canonical, _)| canonical.to_string())
        .unwrap_or(hyphenated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_declared() {
        let cases = [
            ("MIT", "MIT"),
            ("mit", "MIT"),
            ("Apache-2.0", "Apache-2.0"),
            ("apache2", "Apache-2.0"),
            ("Apache 2.0", "Apache-2.0"),
            ("GPL-3.0", "GPL-3.0"),
            ("gplv3", "GPL-3.0"),
            ("gpl2", "GPL-2.0"),
            ("BSD-3-Clause", "BSD-3-Clause"),
            ("bsd3", "BSD-3-Clause"),
            ("bsd2", "BSD-2-Clause"),
            ("ISC", "ISC"),
            ("isc", "ISC"),
            ("  MIT  ", "MIT"),
            ("Custom License", "Custom-License"),
            ("", ""),
            ("   ", ""),
        ];
        for (input, expected) in cases {
            assert_eq!(normalize_declared(input), expected, "input {input:?}");
        }
    }

    #[test]
    fn test_normalize_declared_is_idempotent() {
        for input in ["mit", "Apache 2.0", "gplv2", "Custom License", "  ISC ", "MPL-2.0"] {
            let once = normalize_declared(input);
            assert_eq!(normalize_declared(&once), once, "input {input:?}");
        }
    }
}
