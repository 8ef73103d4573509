//! Lock-file parsers. Each turns one lock file into an ordered list of
//! [`Dependency`] records; none of them resolve the dependency graph.
//!
//! - [`npm`]: `package-lock.json` (`packages` map, legacy `dependencies` tree fallback)
//! - [`yarn`]: `yarn.lock` (line-oriented grammar, v1 and Berry)
//! - [`pnpm`]: `pnpm-lock.yaml` (`packages` mapping keys)

use std::path::Path;

use crate::error::Result;
use crate::fs::FileSystem;
use crate::models::{Dependency, PackageManager};

pub mod npm;
pub mod pnpm;
pub mod yarn;

pub trait LockFileParser {
    fn parse(&self, lock_file: &Path) -> Result<Vec<Dependency>>;
}

/// Parser for the given package manager's lock file format.
pub fn parser_for<'a, F: FileSystem>(
    pm: PackageManager,
    fs: &'a F,
) -> Box<dyn LockFileParser + 'a> {
    match pm {
        PackageManager::Npm => Box::new(npm::NpmParser::new(fs)),
        PackageManager::Yarn => Box::new(yarn::YarnParser::new(fs)),
        PackageManager::Pnpm => Box::new(pnpm::PnpmParser::new(fs)),
    }
}
