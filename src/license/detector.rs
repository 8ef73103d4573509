//! Per-package license detection.
//!
//! Two tiers, first hit wins: the `license` field of the package's
//! `package.json` (confidence 1.0), then the first LICENSE/LICENCE file
//! matched against a fixed pattern table (0.9 or 0.8). A license file that
//! matches nothing still counts as evidence (Unknown, 0.2).

use std::path::Path;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::error::Result;
use crate::fs::FileSystem;
use crate::license::normalize::normalize_declared;
use crate::models::{LicenseInfo, LicenseSource, UNKNOWN_LICENSE};

/// Probed in this order; the first existing regular file is used.
pub const LICENSE_FILE_VARIANTS: [&str; 6] = [
    "LICENSE",
    "LICENSE.txt",
    "LICENSE.md",
    "LICENCE",
    "LICENCE.txt",
    "LICENCE.md",
];

const PACKAGE_JSON: &str = "package.json";
const UNMATCHED_FILE_CONFIDENCE: f64 = 0.2;

struct LicensePattern {
    license: &'static str,
    pattern: Regex,
    confidence: f64,
}

/// Matched against lower-cased license text, in order.
static LICENSE_PATTERNS: Lazy<Vec<LicensePattern>> = Lazy::new(|| {
    [
        (
            "MIT",
            r"mit\s+license|permission\s+is\s+hereby\s+granted.*free\s+of\s+charge",
            0.9,
        ),
        (
            "Apache-2.0",
            r"apache\s+license.*version\s+2\.0|licensed\s+under\s+the\s+apache\s+license|apache\s+license.*version\s+2.*january.*2004",
            0.9,
        ),
        (
            "GPL-3.0",
            r"gnu\s+general\s+public\s+license.*version\s+3|gplv3|version\s+3.*june\s+2007",
            0.9,
        ),
        (
            "GPL-2.0",
            r"gnu\s+general\s+public\s+license.*version\s+2|gplv2",
            0.9,
        ),
        (
            "BSD-3-Clause",
            r"bsd.*3.*clause|redistribution\s+and\s+use.*binary\s+forms.*conditions",
            0.8,
        ),
        ("BSD-2-Clause", r"bsd.*2.*clause", 0.8),
        (
            "ISC",
            r"isc\s+license|permission\s+to\s+use.*copy.*modify.*distribute",
            0.8,
        ),
    ]
    .into_iter()
    .map(|(license, pattern, confidence)| LicensePattern {
        license,
        pattern: Regex::new(pattern).expect("valid license pattern"),
        confidence,
    })
    .collect()
});

/// Anything that can produce a [`LicenseInfo`] for a package directory.
pub trait DetectLicense {
    fn detect(&self, package_dir: &Path) -> Result<LicenseInfo>;
}

/// Filesystem-backed detector. Never returns `Err`: missing or unreadable
/// sources fall through and end in Unknown/0.0/"not found".
pub struct LicenseDetector<'a, F: FileSystem> {
    fs: &'a F,
}

impl<'a, F: FileSystem> LicenseDetector<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self { fs }
    }

    pub fn detect_license(&self, package_dir: &Path) -> LicenseInfo {
        self.from_package_json(package_dir)
            .or_else(|| self.from_license_file(package_dir))
            .unwrap_or_else(LicenseInfo::not_found)
    }

    fn from_package_json(&self, package_dir: &Path) -> Option<LicenseInfo> {
        let path = self.fs.join(package_dir, PACKAGE_JSON);
        let content = self.fs.read_to_string(&path).ok()?;

        let json: Value = match serde_json::from_str(&content) {
            Ok(json) => json,
            Err(e) => {
                debug!("ignoring unparsable {}: {e}", path.display());
                return None;
            }
        };

        let license = json.get("license").and_then(extract_license_field)?;
        Some(LicenseInfo {
            license,
            confidence: 1.0,
            source: LicenseSource::PackageJson,
        })
    }

    fn from_license_file(&self, package_dir: &Path) -> Option<LicenseInfo> {
        let path = LICENSE_FILE_VARIANTS
            .iter()
            .map(|name| self.fs.join(package_dir, name))
            .find(|path| matches!(self.fs.stat(path), Ok(stat) if !stat.is_dir))?;

        let (license, confidence) = match self.fs.read_to_string(&path) {
            Ok(text) => match_license_text(&text),
            Err(e) => {
                debug!("could not read {}: {e}", path.display());
                (UNKNOWN_LICENSE, UNMATCHED_FILE_CONFIDENCE)
            }
        };

        Some(LicenseInfo {
            license: license.to_string(),
            confidence,
            source: LicenseSource::LicenseFile,
        })
    }
}

impl<F: FileSystem> DetectLicense for LicenseDetector<'_, F> {
    fn detect(&self, package_dir: &Path) -> Result<LicenseInfo> {
        Ok(self.detect_license(package_dir))
    }
}

/// Extract a license id from a `package.json` `license` value.
///
/// Accepts a string, an object with a `type` string, or an array (first
/// element, recursively). Returns `None` when nothing non-empty is found.
pub fn extract_license_field(value: &Value) -> Option<String> {
    let license = match value {
        Value::String(s) => normalize_declared(s),
        Value::Object(obj) => normalize_declared(obj.get("type")?.as_str()?),
        Value::Array(items) => return items.first().and_then(extract_license_field),
        _ => return None,
    };
    (!license.is_empty()).then_some(license)
}

/// First pattern matching the lower-cased text, or Unknown/0.2.
pub fn match_license_text(text: &str) -> (&'static str, f64) {
    let lower = text.to_lowercase();
    LICENSE_PATTERNS
        .iter()
        .find(|p| p.pattern.is_match(&lower))
        .map(|p| (p.license, p.confidence))
        .unwrap_or((UNKNOWN_LICENSE, UNMATCHED_FILE_CONFIDENCE))
}
