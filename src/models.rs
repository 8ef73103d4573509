use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// License id used whenever nothing better could be determined.
pub const UNKNOWN_LICENSE: &str = "Unknown";

/// One entry from a lock file. The same name may appear more than once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

impl Dependency {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            license: None,
        }
    }

    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.license = Some(license.into());
        self
    }
}

/// A dependency after license detection ran against its install directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedDependency {
    pub name: String,
    pub version: String,
    pub license: String,
    /// License declared in the lock file itself, if the format carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declared_license: Option<String>,
    pub confidence: f64,
    pub source: LicenseSource,
}

impl EnrichedDependency {
    pub fn from_detection(dep: Dependency, info: LicenseInfo) -> Self {
        Self {
            name: dep.name,
            version: dep.version,
            license: info.license,
            declared_license: dep.license,
            confidence: info.confidence,
            source: info.source,
        }
    }
}

/// Outcome of license detection for a single package directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicenseInfo {
    pub license: String,
    pub confidence: f64,
    pub source: LicenseSource,
}

impl LicenseInfo {
    pub fn not_found() -> Self {
        Self {
            license: UNKNOWN_LICENSE.to_string(),
            confidence: 0.0,
            source: LicenseSource::NotFound,
        }
    }

    pub fn detection_failed() -> Self {
        Self {
            license: UNKNOWN_LICENSE.to_string(),
            confidence: 0.0,
            source: LicenseSource::DetectionFailed,
        }
    }
}

/// Where a license determination came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LicenseSource {
    #[serde(rename = "package.json")]
    PackageJson,
    #[serde(rename = "LICENSE file")]
    LicenseFile,
    #[serde(rename = "not found")]
    NotFound,
    #[serde(rename = "detection failed")]
    DetectionFailed,
}

impl std::fmt::Display for LicenseSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LicenseSource::PackageJson => write!(f, "package.json"),
            LicenseSource::LicenseFile => write!(f, "LICENSE file"),
            LicenseSource::NotFound => write!(f, "not found"),
            LicenseSource::DetectionFailed => write!(f, "detection failed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    /// Lock file name written by this package manager.
    pub fn lock_file_name(&self) -> &'static str {
        match self {
            PackageManager::Npm => "package-lock.json",
            PackageManager::Yarn => "yarn.lock",
            PackageManager::Pnpm => "pnpm-lock.yaml",
        }
    }
}

impl std::fmt::Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PackageManager::Npm => write!(f, "npm"),
            PackageManager::Yarn => write!(f, "yarn"),
            PackageManager::Pnpm => write!(f, "pnpm"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LicenseCategory {
    Permissive,
    WeakCopyleft,
    StrongCopyleft,
    Proprietary,
    Unknown,
}

impl std::fmt::Display for LicenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LicenseCategory::Permissive => write!(f, "Permissive"),
            LicenseCategory::WeakCopyleft => write!(f, "Weak Copyleft"),
            LicenseCategory::StrongCopyleft => write!(f, "Strong Copyleft"),
            LicenseCategory::Proprietary => write!(f, "Proprietary"),
            LicenseCategory::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Ordered so that `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

/// Aggregate result of [`crate::analyzer::analyze`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub risk_level: RiskLevel,
    pub conflicts: Vec<String>,
    pub recommendations: Vec<String>,
    pub license_counts: BTreeMap<String, usize>,
}
