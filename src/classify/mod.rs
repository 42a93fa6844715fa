//! Raw tag classification into license and language subsets.
//!
//! - [`keywords`]: built-in keyword tables (license families, language and
//!   platform names), overridable from config.
//! - [`classifier`]: compiles the tables and splits a tag list.

pub mod classifier;
pub mod keywords;
