//! Scan orchestration: lock-file detection → parsing → per-package license
//! detection.
//!
//! Install paths are resolved per package manager. npm and yarn install flat
//! under `node_modules/<name>`; pnpm keeps packages in its virtual store at
//! `node_modules/.pnpm/<name>@<version>/node_modules/<name>`.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::detector::detect_lock_file;
use crate::error::Result;
use crate::fs::FileSystem;
use crate::license::detector::{DetectLicense, LicenseDetector};
use crate::lockfile::parser_for;
use crate::models::{Dependency, EnrichedDependency, LicenseInfo, PackageManager};

const NODE_MODULES: &str = "node_modules";
const PNPM_STORE: &str = ".pnpm";

/// Everything produced by a single scan.
#[derive(Debug, Clone)]
pub struct ScanResult {
    pub package_manager: PackageManager,
    pub lock_file: PathBuf,
    pub dependencies: Vec<EnrichedDependency>,
}

pub struct Scanner<'a, F: FileSystem, D = LicenseDetector<'a, F>> {
    root: PathBuf,
    fs: &'a F,
    detector: D,
}

impl<'a, F: FileSystem> Scanner<'a, F> {
    pub fn new(root: impl Into<PathBuf>, fs: &'a F) -> Self {
        Self {
            root: root.into(),
            fs,
            detector: LicenseDetector::new(fs),
        }
    }
}

impl<'a, F: FileSystem, D: DetectLicense> Scanner<'a, F, D> {
    pub fn with_detector(root: impl Into<PathBuf>, fs: &'a F, detector: D) -> Self {
        Self {
            root: root.into(),
            fs,
            detector,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Detect, parse and enrich in one go.
    pub fn scan(&self) -> Result<ScanResult> {
        let (lock_file, package_manager) = self.detect_lock_file()?;
        let deps = self.parse(&lock_file, package_manager)?;
        let dependencies = self.enrich(package_manager, deps);

        Ok(ScanResult {
            package_manager,
            lock_file,
            dependencies,
        })
    }

    pub fn detect_lock_file(&self) -> Result<(PathBuf, PackageManager)> {
        let (path, pm) = detect_lock_file(self.fs, &self.root)?;
        info!("found {pm} lock file: {}", path.display());
        Ok((path, pm))
    }

    pub fn parse(&self, lock_file: &Path, pm: PackageManager) -> Result<Vec<Dependency>> {
        let deps = parser_for(pm, self.fs).parse(lock_file)?;
        info!("parsed {} dependencies from {}", deps.len(), lock_file.display());
        Ok(deps)
    }

    pub fn enrich(&self, pm: PackageManager, deps: Vec<Dependency>) -> Vec<EnrichedDependency> {
        self.enrich_with(pm, deps, |_| {})
    }

    /// Run license detection over every dependency, in input order.
    /// `on_each` is called after each package, e.g. to drive a progress bar.
    pub fn enrich_with<C>(
        &self,
        pm: PackageManager,
        deps: Vec<Dependency>,
        mut on_each: C,
    ) -> Vec<EnrichedDependency>
    where
        C: FnMut(&EnrichedDependency),
    {
        deps.into_iter()
            .map(|dep| {
                let package_dir = self.resolve_package_path(pm, &dep);
                let info = match self.detector.detect(&package_dir) {
                    Ok(info) => info,
                    Err(e) => {
                        warn!("license detection failed for {}@{}: {e}", dep.name, dep.version);
                        LicenseInfo::detection_failed()
                    }
                };
                let enriched = EnrichedDependency::from_detection(dep, info);
                on_each(&enriched);
                enriched
            })
            .collect()
    }

    /// Directory a dependency is installed in.
    ///
    /// For pnpm the returned path may not exist when nothing could be found;
    /// detection then reports "not found" against the expected store path.
    pub fn resolve_package_path(&self, pm: PackageManager, dep: &Dependency) -> PathBuf {
        let node_modules = self.fs.join(&self.root, NODE_MODULES);
        match pm {
            PackageManager::Npm | PackageManager::Yarn => self.fs.join(&node_modules, &dep.name),
            PackageManager::Pnpm => self.resolve_pnpm_path(&node_modules, dep),
        }
    }

    fn resolve_pnpm_path(&self, node_modules: &Path, dep: &Dependency) -> PathBuf {
        let store = self.fs.join(node_modules, PNPM_STORE);

        let encoded = dep.name.replace('@', "%40");
        let flattened = dep.name.replace('/', "+");
        let name_forms = [dep.name.as_str(), encoded.as_str(), flattened.as_str()];

        // Exact version match
        for form in name_forms {
            let entry = format!("{form}@{}", dep.version);
            let candidate = self.store_package_path(&store, &entry, &dep.name);
            if self.fs.exists(&candidate) {
                return candidate;
            }
        }

        // Any store entry for this name; pnpm appends peer/patch qualifiers
        if let Ok(entries) = self.fs.read_dir(&store) {
            let prefixes: Vec<String> = name_forms.iter().map(|f| format!("{f}@")).collect();
            for entry in entries.iter().filter(|e| e.is_dir) {
                if prefixes.iter().any(|p| entry.name.starts_with(p.as_str())) {
                    let candidate = self.store_package_path(&store, &entry.name, &dep.name);
                    if self.fs.exists(&candidate) {
                        debug!("resolved {} via store entry {}", dep.name, entry.name);
                        return candidate;
                    }
                }
            }
        }

        // Hoisted
        let hoisted = self.fs.join(node_modules, &dep.name);
        if self.fs.exists(&hoisted) {
            debug!("resolved {} via hoisted node_modules", dep.name);
            return hoisted;
        }

        debug!("no install directory found for {}@{}", dep.name, dep.version);
        let expected = format!("{}@{}", dep.name, dep.version);
        self.store_package_path(&store, &expected, &dep.name)
    }

    /// `<store>/<entry>/node_modules/<name>`
    fn store_package_path(&self, store: &Path, entry: &str, name: &str) -> PathBuf {
        let entry_modules = self.fs.join(&self.fs.join(store, entry), NODE_MODULES);
        self.fs.join(&entry_modules, name)
    }
}
