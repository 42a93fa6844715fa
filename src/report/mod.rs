//! Report renderers for query results.
//!
//! - [`terminal`]: colored tables grouped by section, with a summary box; respects `--verbose` / `--quiet`.
//! - [`json`]: the matched items and the active query as pretty-printed JSON.

pub mod json;
pub mod terminal;
