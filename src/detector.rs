use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::fs::FileSystem;
use crate::models::PackageManager;

/// Lock files in precedence order: when several coexist, the first one wins.
pub const LOCK_FILE_PRECEDENCE: [PackageManager; 3] = [
    PackageManager::Npm,
    PackageManager::Yarn,
    PackageManager::Pnpm,
];

/// Every lock file present under `root`, in precedence order.
pub fn detect_all<F: FileSystem>(fs: &F, root: &Path) -> Vec<(PathBuf, PackageManager)> {
    LOCK_FILE_PRECEDENCE
        .iter()
        .filter_map(|pm| {
            let path = fs.join(root, pm.lock_file_name());
            fs.exists(&path).then_some((path, *pm))
        })
        .collect()
}

/// Find the lock file to scan under `root`.
pub fn detect_lock_file<F: FileSystem>(fs: &F, root: &Path) -> Result<(PathBuf, PackageManager)> {
    let found = detect_all(fs, root);

    if found.len() > 1 {
        let names: Vec<&str> = found.iter().map(|(_, pm)| pm.lock_file_name()).collect();
        warn!(
            "multiple lock files found in {} ({}); using {}",
            root.display(),
            names.join(", "),
            names[0]
        );
    }

    found.into_iter().next().ok_or_else(|| {
        debug!("no lock file in {}", root.display());
        Error::LockFileNotFound(root.to_path_buf())
    })
}
