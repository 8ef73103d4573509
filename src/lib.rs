//! Inventory the third-party dependencies of a JavaScript project and assess
//! their license risk.
//!
//! The pipeline is: find the lock file ([`detector`]), parse it
//! ([`lockfile`]), detect each installed package's license ([`license`],
//! driven by [`scanner`]), then aggregate risk ([`analyzer`]). All disk
//! access goes through [`fs::FileSystem`].

pub mod analyzer;
pub mod config;
pub mod detector;
pub mod error;
pub mod fs;
pub mod license;
pub mod lockfile;
pub mod models;
pub mod report;
pub mod scanner;

pub use error::{Error, Result};
