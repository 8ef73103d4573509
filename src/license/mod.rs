//! License detection, normalization and classification.
//!
//! - [`detector`]: determines a package's license from its install directory
//!   (`package.json`, then LICENSE/LICENCE files) with a confidence score.
//! - [`normalize`]: synonym table applied to declared `package.json` licenses.
//! - [`classifier`]: static category table and the substring normalizer the
//!   analyzer uses before counting.

pub mod classifier;
pub mod detector;
pub mod normalize;
