use anyhow::Result;
use serde::Serialize;

use crate::models::{Facets, FlatIndexEntry, IndexSummary, Item};
use crate::query::filter::FilterCriteria;
use crate::query::sort::SortMode;
use crate::snapshot::Snapshot;

/// Machine-readable query result printed by `--report json`.
#[derive(Debug, Serialize)]
pub struct QueryReport<'a> {
    pub title: &'a str,
    pub source: &'a str,
    pub summary: IndexSummary,
    pub query: &'a str,
    pub criteria: &'a FilterCriteria,
    pub sort: SortMode,
    pub matched: usize,
    pub results: Vec<&'a Item>,
}

#[derive(Debug, Serialize)]
pub struct FacetsReport<'a> {
    pub title: &'a str,
    pub source: &'a str,
    #[serde(flatten)]
    pub facets: &'a Facets,
}

pub fn query_report<'a>(
    snapshot: &'a Snapshot,
    results: &[&'a FlatIndexEntry],
    criteria: &'a FilterCriteria,
    sort: SortMode,
    query: &'a str,
) -> QueryReport<'a> {
    QueryReport {
        title: &snapshot.catalog.title,
        source: &snapshot.origin,
        summary: snapshot.index.summary,
        query,
        criteria,
        sort,
        matched: results.len(),
        results: results.iter().map(|e| &e.item).collect(),
    }
}

pub fn render(
    snapshot: &Snapshot,
    results: &[&FlatIndexEntry],
    criteria: &FilterCriteria,
    sort: SortMode,
    query: &str,
) -> Result<()> {
    let report = query_report(snapshot, results, criteria, sort, query);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub fn render_facets(snapshot: &Snapshot) -> Result<()> {
    let report = FacetsReport {
        title: &snapshot.catalog.title,
        source: &snapshot.origin,
        facets: &snapshot.facets,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
