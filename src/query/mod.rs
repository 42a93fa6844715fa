//! Filter, search and sort over a flat index.
//!
//! [`run_query`] is a pure function: it borrows the index, never mutates it,
//! and returns a permutation of the entries that pass every filter.
//!
//! - [`filter`]: [`FilterCriteria`](filter::FilterCriteria) predicates and query tokenization.
//! - [`sort`]: the three [`SortMode`](sort::SortMode)s.
//! - [`group`]: regrouping results by category and subcategory.

pub mod filter;
pub mod group;
pub mod sort;

use std::time::SystemTime;

use crate::models::FlatIndexEntry;
use filter::{matches_tokens, query_tokens, FilterCriteria};
use sort::{sort_entries, SortMode};

/// Filter `entries` by `criteria` and `query`, then order by `sort`.
///
/// `now` only matters for [`SortMode::Discovery`]; any two instants in the
/// same minute give the same order.
pub fn run_query<'a>(
    entries: &'a [FlatIndexEntry],
    criteria: &FilterCriteria,
    sort: SortMode,
    query: &str,
    now: SystemTime,
) -> Vec<&'a FlatIndexEntry> {
    let tokens = query_tokens(query);

    let mut results: Vec<&FlatIndexEntry> = entries
        .iter()
        .filter(|e| criteria.matches(&e.item))
        .filter(|e| matches_tokens(e, &tokens))
        .collect();

    sort_entries(&mut results, sort, now);

    tracing::debug!(
        total = entries.len(),
        matched = results.len(),
        tokens = tokens.len(),
        %sort,
        "query evaluated"
    );

    results
}
