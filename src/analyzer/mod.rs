//! Aggregate license-risk analysis.
//!
//! [`analyze`] is a pure function of its input: normalize every license,
//! tally categories, derive a [`RiskLevel`], then list conflicts and
//! recommendations in a fixed order.

use std::collections::BTreeMap;

use crate::license::classifier::{self, normalize};
use crate::models::{AnalysisResult, EnrichedDependency, LicenseCategory, RiskLevel, UNKNOWN_LICENSE};

pub mod advice;

pub use advice::Tally;

/// Detections below this confidence are flagged for manual review.
pub const LOW_CONFIDENCE_THRESHOLD: f64 = 0.5;

/// More unknown licenses than this is high risk on its own.
const UNKNOWN_HIGH_RISK_LIMIT: usize = 5;
/// More low-confidence detections than this is at least medium risk.
const LOW_CONFIDENCE_MEDIUM_RISK_LIMIT: usize = 3;

pub fn analyze(deps: &[EnrichedDependency]) -> AnalysisResult {
    let mut license_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut tally = Tally::default();

    for dep in deps {
        let license = normalize(&dep.license);
        *license_counts.entry(license.clone()).or_insert(0) += 1;

        let Some(known) = classifier::lookup(&license) else {
            if license != UNKNOWN_LICENSE {
                tally.unknown += 1;
            }
            continue;
        };

        if dep.confidence < LOW_CONFIDENCE_THRESHOLD {
            tally.low_confidence += 1;
        }

        match known.category {
            LicenseCategory::Permissive => tally.permissive += 1,
            LicenseCategory::WeakCopyleft => {
                tally.weak_copyleft += 1;
                tally.has_lgpl |= known.id.starts_with("LGPL");
                tally.has_mpl |= known.id.starts_with("MPL");
            }
            LicenseCategory::StrongCopyleft => tally.strong_copyleft += 1,
            LicenseCategory::Proprietary | LicenseCategory::Unknown => {}
        }
    }

    // Unresolved packages count alongside unrecognised licenses
    if let Some(&unresolved) = license_counts.get(UNKNOWN_LICENSE) {
        tally.unknown += unresolved;
    }

    let risk_level = risk_level(&tally);
    let conflicts = advice::detect_conflicts(&license_counts);
    let recommendations = advice::recommendations(&tally, !conflicts.is_empty());

    AnalysisResult {
        risk_level,
        conflicts,
        recommendations,
        license_counts,
    }
}

pub fn risk_level(tally: &Tally) -> RiskLevel {
    if tally.strong_copyleft > 0 || tally.unknown > UNKNOWN_HIGH_RISK_LIMIT {
        RiskLevel::High
    } else if tally.weak_copyleft > 0
        || tally.unknown > 0
        || tally.low_confidence > LOW_CONFIDENCE_MEDIUM_RISK_LIMIT
    {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LicenseSource;

    fn dep(name: &str, license: &str, confidence: f64) -> EnrichedDependency {
        EnrichedDependency {
            name: name.to_string(),
            version: "1.0.0".to_string(),
            license: license.to_string(),
            declared_license: None,
            confidence,
            source: LicenseSource::PackageJson,
        }
    }

    fn has_line(lines: &[String], needle: &str) -> bool {
        lines.iter().any(|l| l.contains(needle))
    }

    #[test]
    fn test_all_permissive() {
        let result = analyze(&[
            dep("react", "MIT", 1.0),
            dep("lodash", "MIT", 1.0),
            dep("express", "MIT", 1.0),
            dep("left-pad", "ISC", 1.0),
        ]);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert!(result.conflicts.is_empty());
        assert_eq!(result.recommendations, vec![advice::ALL_CLEAR]);
    }

    #[test]
    fn test_gpl_is_high_risk() {
        let result = analyze(&[dep("react", "MIT", 1.0), dep("gpl-package", "GPL-3.0", 1.0)]);
        assert_eq!(result.risk_level, RiskLevel::High);
        assert!(has_line(&result.recommendations, "GPL/AGPL dependencies"));
    }

    #[test]
    fn test_gpl2_apache_conflict() {
        let result = analyze(&[
            dep("gpl-package", "GPL-2.0", 1.0),
            dep("apache-package", "Apache 2.0", 1.0),
        ]);
        assert_eq!(result.risk_level, RiskLevel::High);
        assert!(has_line(&result.conflicts, "GPL-2.0 and Apache-2.0"));
        assert!(result.recommendations[0].contains("License conflicts detected"));
    }

    #[test]
    fn test_gpl2_and_gpl3_conflict() {
        let result = analyze(&[dep("a", "GPL-2.0", 1.0), dep("b", "GPL-3.0", 1.0)]);
        assert!(has_line(&result.conflicts, "GPL-2.0 and GPL-3.0"));
        assert!(has_line(&result.conflicts, "or later"));
    }

    #[test]
    fn test_agpl_only() {
        let result = analyze(&[dep("agpl-package", "AGPL-3.0", 1.0)]);
        assert_eq!(result.risk_level, RiskLevel::High);
        assert_eq!(result.conflicts.len(), 1);
        assert!(result.conflicts[0].contains("AGPL-3.0"));
        assert!(result.conflicts[0].contains("network use"));
    }

    #[test]
    fn test_unknown_bucket_elevates_risk() {
        let result = analyze(&[
            dep("react", "MIT", 1.0),
            dep("unknown1", UNKNOWN_LICENSE, 0.0),
            dep("unknown2", UNKNOWN_LICENSE, 0.0),
        ]);
        assert_eq!(result.risk_level, RiskLevel::Medium);
        assert!(has_line(&result.recommendations, "2 dependencies have unknown licenses"));
        assert!(!has_line(&result.recommendations, "low-confidence"));
        assert_eq!(result.license_counts.get(UNKNOWN_LICENSE), Some(&2));
    }

    #[test]
    fn test_unrecognised_licenses_count_as_unknown() {
        let result = analyze(&[dep("a", "WTFPL", 1.0), dep("b", "Custom-License", 1.0)]);
        assert_eq!(result.risk_level, RiskLevel::Medium);
        assert!(has_line(&result.recommendations, "2 dependencies have unknown licenses"));
        assert_eq!(result.license_counts.get("WTFPL"), Some(&1));
    }

    #[test]
    fn test_more_than_five_unknown_is_high() {
        let five: Vec<_> = (0..5).map(|i| dep(&format!("p{i}"), UNKNOWN_LICENSE, 0.0)).collect();
        assert_eq!(analyze(&five).risk_level, RiskLevel::Medium);

        let six: Vec<_> = (0..6).map(|i| dep(&format!("p{i}"), &format!("Custom-{i}"), 1.0)).collect();
        assert_eq!(analyze(&six).risk_level, RiskLevel::High);
    }

    #[test]
    fn test_unresolved_adds_to_unrecognised() {
        let mut deps: Vec<_> = (0..6).map(|i| dep(&format!("p{i}"), &format!("Custom-{i}"), 1.0)).collect();
        assert_eq!(analyze(&deps).risk_level, RiskLevel::High);

        deps.push(dep("missing", UNKNOWN_LICENSE, 0.0));
        let result = analyze(&deps);
        assert_eq!(result.risk_level, RiskLevel::High);
        assert!(has_line(&result.recommendations, "7 dependencies have unknown licenses"));
    }

    #[test]
    fn test_adding_a_dependency_never_lowers_risk() {
        let base = vec![
            dep("a", "WTFPL", 1.0),
            dep("b", "Custom", 1.0),
            dep("c", "MIT", 0.3),
            dep("d", "MIT", 0.3),
            dep("e", "MIT", 0.3),
            dep("f", "Proprietary-EULA", 1.0),
            dep("g", "Other", 1.0),
            dep("h", "Mine", 1.0),
        ];
        let extras = [
            dep("x", UNKNOWN_LICENSE, 0.0),
            dep("y", "", 0.0),
            dep("z", "MIT", 1.0),
            dep("w", "MIT", 0.1),
        ];

        let before = analyze(&base).risk_level;
        for extra in extras {
            let mut grown = base.clone();
            grown.push(extra);
            assert!(analyze(&grown).risk_level >= before);
        }
    }

    #[test]
    fn test_low_confidence() {
        let three: Vec<_> = (0..3).map(|i| dep(&format!("p{i}"), "MIT", 0.2)).collect();
        let result = analyze(&three);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert!(has_line(&result.recommendations, "3 dependencies have low-confidence"));

        let four: Vec<_> = [0.3, 0.2, 0.4, 0.1]
            .iter()
            .enumerate()
            .map(|(i, &c)| dep(&format!("p{i}"), "MIT", c))
            .collect();
        let result = analyze(&four);
        assert_eq!(result.risk_level, RiskLevel::Medium);
        assert!(has_line(&result.recommendations, "low-confidence"));
    }

    #[test]
    fn test_weak_copyleft() {
        let result = analyze(&[dep("react", "MIT", 1.0), dep("lgpl-lib", "LGPL-2.1", 1.0)]);
        assert_eq!(result.risk_level, RiskLevel::Medium);
        assert!(has_line(&result.recommendations, "LGPL/MPL"));

        let result = analyze(&[dep("mpl-lib", "MPL-2.0", 1.0)]);
        assert_eq!(result.risk_level, RiskLevel::Medium);
        assert!(has_line(&result.recommendations, "Found 1 LGPL/MPL dependencies"));
    }

    #[test]
    fn test_license_counts_use_normalized_ids() {
        let result = analyze(&[
            dep("p1", "MIT", 1.0),
            dep("p2", " MIT ", 1.0),
            dep("p3", "Apache 2.0", 1.0),
            dep("p4", "apache-2.0", 1.0),
            dep("p5", "ISC", 1.0),
            dep("p6", "", 0.0),
        ]);
        let expected: BTreeMap<String, usize> = [
            ("MIT".to_string(), 2),
            ("Apache-2.0".to_string(), 2),
            ("ISC".to_string(), 1),
            (UNKNOWN_LICENSE.to_string(), 1),
        ]
        .into_iter()
        .collect();
        assert_eq!(result.license_counts, expected);
    }

    #[test]
    fn test_duplicates_are_counted_each_time() {
        let result = analyze(&[dep("debug", "MIT", 1.0), dep("debug", "MIT", 1.0)]);
        assert_eq!(result.license_counts.get("MIT"), Some(&2));
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let deps = [
            dep("a", "GPL-2.0", 1.0),
            dep("b", "Apache-2.0", 0.9),
            dep("c", "Unknown", 0.0),
            dep("d", "LGPL-3.0", 0.2),
        ];
        assert_eq!(analyze(&deps), analyze(&deps));
    }

    #[test]
    fn test_empty_input() {
        let result = analyze(&[]);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert!(result.license_counts.is_empty());
        assert_eq!(result.recommendations, vec![advice::ALL_CLEAR]);
    }
}
