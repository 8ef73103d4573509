//! License category table and the normalizer the analyzer counts with.

use crate::models::{LicenseCategory, RiskLevel, UNKNOWN_LICENSE};

/// A row of the static category table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownLicense {
    pub id: &'static str,
    pub category: LicenseCategory,
    pub risk: RiskLevel,
}

const fn known(id: &'static str, category: LicenseCategory, risk: RiskLevel) -> KnownLicense {
    KnownLicense { id, category, risk }
}

/// Canonical license ids the analyzer knows how to classify.
pub const KNOWN_LICENSES: &[KnownLicense] = &[
    known("MIT", LicenseCategory::Permissive, RiskLevel::Low),
    known("ISC", LicenseCategory::Permissive, RiskLevel::Low),
    known("BSD-2-Clause", LicenseCategory::Permissive, RiskLevel::Low),
    known("BSD-3-Clause", LicenseCategory::Permissive, RiskLevel::Low),
    known("Apache-2.0", LicenseCategory::Permissive, RiskLevel::Low),
    known("MPL-2.0", LicenseCategory::WeakCopyleft, RiskLevel::Medium),
    known("LGPL-2.1", LicenseCategory::WeakCopyleft, RiskLevel::Medium),
    known("LGPL-3.0", LicenseCategory::WeakCopyleft, RiskLevel::Medium),
    known("GPL-2.0", LicenseCategory::StrongCopyleft, RiskLevel::High),
    known("GPL-3.0", LicenseCategory::StrongCopyleft, RiskLevel::High),
    known("AGPL-3.0", LicenseCategory::StrongCopyleft, RiskLevel::High),
    known("UNLICENSED", LicenseCategory::Proprietary, RiskLevel::High),
];

/// Look up a canonical id in [`KNOWN_LICENSES`].
pub fn lookup(id: &str) -> Option<&'static KnownLicense> {
    KNOWN_LICENSES.iter().find(|l| l.id == id)
}

/// Category of a canonical id; anything outside the table is `Unknown`.
pub fn classify(id: &str) -> LicenseCategory {
    lookup(id)
        .map(|l| l.category)
        .unwrap_or(LicenseCategory::Unknown)
}

/// Collapse a license string onto a canonical id by substring matching.
///
/// "apache" anywhere wins; otherwise AGPL is checked before LGPL before GPL,
/// since each later name is a substring of the earlier one. GPL-family
/// versions are told apart by a `3` or `2` digit. Blank input is "Unknown";
/// anything else unmatched comes back trimmed.
pub fn normalize(license: &str) -> String {
    let trimmed = license.trim();
    if trimmed.is_empty() {
        return UNKNOWN_LICENSE.to_string();
    }

    let lower = trimmed.to_lowercase();
    let has_3 = lower.contains('3');
    let has_2 = lower.contains('2');

    let canonical = if lower.contains("apache") {
        Some("Apache-2.0")
    } else if lower.contains("agpl") {
        Some("AGPL-3.0")
    } else if lower.contains("lgpl") && has_3 {
        Some("LGPL-3.0")
    } else if lower.contains("lgpl") && has_2 {
        Some("LGPL-2.1")
    } else if lower.contains("gpl") && has_3 {
        Some("GPL-3.0")
    } else if lower.contains("gpl") && has_2 {
        Some("GPL-2.0")
    } else {
        None
    };

    canonical.map(str::to_string).unwrap_or_else(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        let cases = [
            ("Apache-2.0", "Apache-2.0"),
            ("Apache 2.0", "Apache-2.0"),
            ("apache-2.0", "Apache-2.0"),
            ("Apache License, Version 2.0", "Apache-2.0"),
            ("GPL-3.0", "GPL-3.0"),
            ("GPL-2.0", "GPL-2.0"),
            ("gpl-3.0", "GPL-3.0"),
            ("GPL-3.0-or-later", "GPL-3.0"),
            ("GPLv2", "GPL-2.0"),
            ("AGPL-3.0-only", "AGPL-3.0"),
            ("LGPL-2.1", "LGPL-2.1"),
            ("LGPL-3.0-or-later", "LGPL-3.0"),
            ("MIT", "MIT"),
            ("  MIT  ", "MIT"),
            ("MPL-2.0", "MPL-2.0"),
            ("GPL", "GPL"),
            ("", "Unknown"),
        ];
        for (input, expected) in cases {
            assert_eq!(normalize(input), expected, "input {input:?}");
        }
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for input in [
            "apache 2", "agpl", "lgpl-2.1", "LGPL v3", "gpl 3", "gpl2", "MIT", " BSD ", "",
        ] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input {input:?}");
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("MIT"), LicenseCategory::Permissive);
        assert_eq!(classify("Apache-2.0"), LicenseCategory::Permissive);
        assert_eq!(classify("LGPL-2.1"), LicenseCategory::WeakCopyleft);
        assert_eq!(classify("MPL-2.0"), LicenseCategory::WeakCopyleft);
        assert_eq!(classify("GPL-3.0"), LicenseCategory::StrongCopyleft);
        assert_eq!(classify("AGPL-3.0"), LicenseCategory::StrongCopyleft);
        assert_eq!(classify("UNLICENSED"), LicenseCategory::Proprietary);
        assert_eq!(classify("Unknown"), LicenseCategory::Unknown);
        assert_eq!(classify("WTFPL"), LicenseCategory::Unknown);
    }

    #[test]
    fn test_table_ids_are_unique_and_normalized() {
        for (i, row) in KNOWN_LICENSES.iter().enumerate() {
            assert_eq!(normalize(row.id), row.id);
            assert!(KNOWN_LICENSES[i + 1..].iter().all(|other| other.id != row.id));
        }
    }
}
