//! Report renderers for scan results.
//!
//! - [`terminal`]: colored summary box and dependency table; respects `--verbose` / `--quiet`.
//! - [`json`]: pretty-printed JSON summary plus the full dependency list.

pub mod json;
pub mod terminal;
