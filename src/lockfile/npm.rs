use std::path::Path;

use log::debug;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::fs::FileSystem;
use crate::models::Dependency;

const NODE_MODULES_PREFIX: &str = "node_modules/";

/// Parser for `package-lock.json`.
pub struct NpmParser<'a, F: FileSystem> {
    fs: &'a F,
}

impl<'a, F: FileSystem> NpmParser<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self { fs }
    }
}

impl<F: FileSystem> super::LockFileParser for NpmParser<'_, F> {
    fn parse(&self, lock_file: &Path) -> Result<Vec<Dependency>> {
        let content = self
            .fs
            .read_to_string(lock_file)
            .map_err(|e| Error::io(lock_file, e))?;

        parse_package_lock(&content).map_err(|source| Error::Json {
            path: lock_file.to_path_buf(),
            source,
        })
    }
}

/// Parse `package-lock.json` content.
///
/// The v2/v3 `packages` map is preferred. If it yields nothing, the legacy v1
/// `dependencies` tree is flattened instead; nested duplicates are kept.
pub fn parse_package_lock(content: &str) -> serde_json::Result<Vec<Dependency>> {
    let json: Value = serde_json::from_str(content)?;
    let mut deps = Vec::new();

    if let Some(packages) = json.get("packages").and_then(|v| v.as_object()) {
        for (pkg_path, info) in packages {
            // Skip the root entry (empty string key)
            if pkg_path.is_empty() {
                continue;
            }

            let name = extract_package_name(pkg_path);
            if name.is_empty() {
                debug!("skipping non node_modules entry {pkg_path:?}");
                continue;
            }

            let mut dep = Dependency::new(name, str_field(info, "version").unwrap_or_default());
            dep.license = str_field(info, "license");
            deps.push(dep);
        }
    }

    if deps.is_empty() {
        if let Some(legacy) = json.get("dependencies").and_then(|v| v.as_object()) {
            flatten_legacy(legacy, &mut deps);
        }
    }

    Ok(deps)
}

/// Derive a package name from a `packages` key.
///
/// `"node_modules/foo/lib/x.js"` → `"foo"`, `"node_modules/@scope/foo"` →
/// `"@scope/foo"`. Keys outside `node_modules/` yield an empty string.
pub fn extract_package_name(pkg_path: &str) -> String {
    let Some(rest) = pkg_path.strip_prefix(NODE_MODULES_PREFIX) else {
        return String::new();
    };

    let mut parts = rest.split('/');
    let first = parts.next().unwrap_or_default();

    if first.starts_with('@') {
        if let Some(second) = parts.next() {
            return format!("{first}/{second}");
        }
    }

    first.to_string()
}

/// Depth-first flattening of the v1 tree: every node, parent before children.
fn flatten_legacy(tree: &Map<String, Value>, out: &mut Vec<Dependency>) {
    for (name, node) in tree {
        out.push(Dependency::new(
            name.clone(),
            str_field(node, "version").unwrap_or_default(),
        ));

        if let Some(nested) = node.get("dependencies").and_then(|v| v.as_object()) {
            flatten_legacy(nested, out);
        }
    }
}

fn str_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(|v| v.as_str()).map(str::to_string)
}
