use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::{EnrichedDependency, RiskLevel};

const CONFIG_DIR: &str = ".license-scanner";
const CONFIG_FILE: &str = "config.toml";

/// Root configuration structure, deserialized from `.license-scanner/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScanConfig {
    /// Dependency names excluded from analysis (exact match).
    #[serde(default)]
    pub ignore: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct PolicyConfig {
    /// The scan fails when the analysed risk is at or above this level.
    #[serde(default = "default_fail_on")]
    pub fail_on: RiskLevel,
}

fn default_fail_on() -> RiskLevel {
    RiskLevel::High
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            fail_on: default_fail_on(),
        }
    }
}

impl Config {
    /// Drop ignored dependencies, keeping the order of the rest.
    pub fn filter_ignored(&self, deps: Vec<EnrichedDependency>) -> Vec<EnrichedDependency> {
        if self.scan.ignore.is_empty() {
            return deps;
        }
        deps.into_iter()
            .filter(|d| !self.scan.ignore.iter().any(|name| name == &d.name))
            .collect()
    }

    pub fn fails(&self, risk: RiskLevel) -> bool {
        risk >= self.policy.fail_on
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override`: path passed via `--config`
/// 2. `<project_path>/.license-scanner/config.toml`
/// 3. `~/.config/license-scanner/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = project_path.join(CONFIG_DIR).join(CONFIG_FILE);
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home_config) = home_config_path() {
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn home_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| {
        home.join(".config")
            .join("license-scanner")
            .join(CONFIG_FILE)
    })
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    toml::from_str(&content).map_err(|source| Error::Config {
        path: path.to_path_buf(),
        source,
    })
}
