use std::path::Path;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::fs::FileSystem;
use crate::models::Dependency;

static SCOPED_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(@[^/]+/[^@]+)@(.+)$").expect("valid scoped key regex"));
static PLAIN_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^@]+)@(.+)$").expect("valid key regex"));

/// Only the `packages` mapping matters; its order is preserved.
#[derive(Debug, Deserialize)]
struct PnpmLock {
    #[serde(default)]
    packages: Option<serde_yaml::Mapping>,
}

/// Parser for `pnpm-lock.yaml`.
pub struct PnpmParser<'a, F: FileSystem> {
    fs: &'a F,
}

impl<'a, F: FileSystem> PnpmParser<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self { fs }
    }
}

impl<F: FileSystem> super::LockFileParser for PnpmParser<'_, F> {
    fn parse(&self, lock_file: &Path) -> Result<Vec<Dependency>> {
        let content = self
            .fs
            .read_to_string(lock_file)
            .map_err(|e| Error::io(lock_file, e))?;

        parse_pnpm_lock(&content).map_err(|source| Error::Yaml {
            path: lock_file.to_path_buf(),
            source,
        })
    }
}

/// Parse `pnpm-lock.yaml` content. Licenses are never present in this format.
pub fn parse_pnpm_lock(content: &str) -> serde_yaml::Result<Vec<Dependency>> {
    let lock: PnpmLock = serde_yaml::from_str(content)?;
    let mut deps = Vec::new();

    for (key, _) in lock.packages.iter().flat_map(|m| m.iter()) {
        let Some(key) = key.as_str() else {
            continue;
        };
        match split_package_key(key) {
            Some((name, version)) => deps.push(Dependency::new(name, version)),
            None => debug!("skipping unrecognised pnpm package key {key:?}"),
        }
    }

    Ok(deps)
}

/// Split `/name@version` or `/@scope/name@version` into its parts.
pub fn split_package_key(key: &str) -> Option<(String, String)> {
    let key = key.strip_prefix('/').unwrap_or(key);

    let re: &Regex = if key.starts_with('@') {
        &SCOPED_KEY_RE
    } else {
        &PLAIN_KEY_RE
    };

    re.captures(key)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
}

/// Like [`split_package_key`], returning empty strings for unrecognised keys.
pub fn extract_package_info(key: &str) -> (String, String) {
    split_package_key(key).unwrap_or_default()
}
