use serde::Serialize;

use crate::models::{AnalysisResult, EnrichedDependency, LicenseSource, RiskLevel, UNKNOWN_LICENSE};

/// Machine-readable scan report.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub summary: Summary<'a>,
    pub dependencies: Vec<JsonDependency<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary<'a> {
    pub total_dependencies: usize,
    /// Sorted; "Unknown" is left out.
    pub unique_licenses: Vec<&'a str>,
    pub risk_level: RiskLevel,
    pub conflicts: &'a [String],
    pub recommendations: &'a [String],
    pub license_counts: &'a std::collections::BTreeMap<String, usize>,
}

#[derive(Debug, Serialize)]
pub struct JsonDependency<'a> {
    pub name: &'a str,
    pub version: &'a str,
    pub license: &'a str,
    pub confidence: f64,
    pub source: LicenseSource,
}

impl<'a> JsonReport<'a> {
    pub fn new(deps: &'a [EnrichedDependency], analysis: &'a AnalysisResult) -> Self {
        let unique_licenses = analysis
            .license_counts
            .keys()
            .map(String::as_str)
            .filter(|l| *l != UNKNOWN_LICENSE)
            .collect();

        let dependencies = deps
            .iter()
            .map(|d| JsonDependency {
                name: &d.name,
                version: &d.version,
                license: if d.license.trim().is_empty() {
                    UNKNOWN_LICENSE
                } else {
                    &d.license
                },
                confidence: d.confidence,
                source: d.source,
            })
            .collect();

        Self {
            summary: Summary {
                total_dependencies: deps.len(),
                unique_licenses,
                risk_level: analysis.risk_level,
                conflicts: &analysis.conflicts,
                recommendations: &analysis.recommendations,
                license_counts: &analysis.license_counts,
            },
            dependencies,
        }
    }
}

pub fn render(deps: &[EnrichedDependency], analysis: &AnalysisResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport::new(deps, analysis))
}
