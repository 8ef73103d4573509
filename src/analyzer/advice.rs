//! Conflict detection and recommendation text.

use std::collections::BTreeMap;

pub const AGPL_NETWORK_CONFLICT: &str =
    "AGPL-3.0 requires source disclosure for network use - ensure compliance";
pub const GPL2_APACHE_CONFLICT: &str = "GPL-2.0 and Apache-2.0 licenses are incompatible";
pub const GPL_VERSION_CONFLICT: &str =
    "GPL-2.0 and GPL-3.0 detected - verify 'or later' clauses for compatibility";

pub const ALL_CLEAR: &str =
    "✓ All licenses are permissive and compatible - no compliance issues detected";

/// Category tallies feeding [`recommendations`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub permissive: usize,
    pub weak_copyleft: usize,
    pub strong_copyleft: usize,
    pub unknown: usize,
    pub low_confidence: usize,
    pub has_lgpl: bool,
    pub has_mpl: bool,
}

/// Incompatible combinations, always evaluated in the same order.
pub fn detect_conflicts(counts: &BTreeMap<String, usize>) -> Vec<String> {
    let present = |id: &str| counts.get(id).is_some_and(|&n| n > 0);
    let mut conflicts = Vec::new();

    if present("AGPL-3.0") {
        conflicts.push(AGPL_NETWORK_CONFLICT.to_string());
    }
    if present("GPL-2.0") && present("Apache-2.0") {
        conflicts.push(GPL2_APACHE_CONFLICT.to_string());
    }
    if present("GPL-2.0") && present("GPL-3.0") {
        conflicts.push(GPL_VERSION_CONFLICT.to_string());
    }

    conflicts
}

pub fn recommendations(tally: &Tally, has_conflicts: bool) -> Vec<String> {
    let mut recs = Vec::new();

    if has_conflicts {
        recs.push(
            "⚠️  License conflicts detected - review dependencies for compatibility issues"
                .to_string(),
        );
    }

    if tally.strong_copyleft > 0 {
        recs.push(format!(
            "⚠️  Found {} GPL/AGPL dependencies - ensure compliance with copyleft requirements",
            tally.strong_copyleft
        ));
        recs.push("📋 Consider legal review if distributing proprietary software".to_string());
    }

    if tally.weak_copyleft > 0 && (tally.has_lgpl || tally.has_mpl) {
        recs.push(format!(
            "ℹ️  Found {} LGPL/MPL dependencies - these allow proprietary use with conditions",
            tally.weak_copyleft
        ));
    }

    if tally.unknown > 0 {
        recs.push(format!(
            "⚠️  {} dependencies have unknown licenses - manual review required",
            tally.unknown
        ));
        recs.push(
            "🔍 Check package repositories or contact maintainers for license clarification"
                .to_string(),
        );
    }

    if tally.low_confidence > 0 {
        recs.push(format!(
            "⚠️  {} dependencies have low-confidence license detection - verify manually",
            tally.low_confidence
        ));
    }

    if recs.is_empty() {
        recs.push(ALL_CLEAR.to_string());
    }

    recs
}
