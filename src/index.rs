//! Flat, search-ready projection of a [`Catalog`].
//!
//! # Invariants
//! - Entries follow document order (category, subcategory, item).
//! - Building twice from the same catalog yields identical output.

use std::collections::HashSet;

use serde::Serialize;

use crate::models::{Catalog, Facets, FlatIndexEntry, IndexSummary, Item};
use crate::query::sort::compare_names;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatIndex {
    pub entries: Vec<FlatIndexEntry>,
    pub summary: IndexSummary,
}

/// Flatten `catalog` into index entries plus summary counts.
pub fn build_index(catalog: &Catalog) -> FlatIndex {
    let mut entries = Vec::new();
    let mut tags: HashSet<&str> = HashSet::new();

    for category in &catalog.categories {
        for subcategory in &category.subcategories {
            for item in &subcategory.items {
                tags.extend(item.tags.iter().map(String::as_str));
                entries.push(FlatIndexEntry {
                    item: item.clone(),
                    category_id: category.id.clone(),
                    subcategory_id: subcategory.id.clone(),
                    search: search_text(item),
                });
            }
        }
    }

    let summary = IndexSummary {
        categories: catalog.categories.len(),
        items: entries.len(),
        distinct_tags: tags.len(),
    };

    FlatIndex { entries, summary }
}

/// Lowercased `name description category subcategory tags… labels…`.
pub fn search_text(item: &Item) -> String {
    let mut parts: Vec<&str> = vec![
        item.name.as_str(),
        item.description.as_str(),
        item.category.as_str(),
        item.subcategory.as_str(),
    ];
    parts.extend(item.tags.iter().map(String::as_str));
    parts.extend(item.links.iter().map(|l| l.label.as_str()));
    parts.join(" ").to_lowercase()
}

impl FlatIndex {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Filter options: categories in document order with counts, licenses and
    /// languages distinct and sorted by name.
    pub fn facets(&self, catalog: &Catalog) -> Facets {
        let categories = catalog
            .categories
            .iter()
            .map(|c| (c.title.clone(), c.item_count()))
            .collect();

        let mut licenses: Vec<String> = distinct(self.entries.iter().flat_map(|e| &e.item.licenses));
        let mut languages: Vec<String> = distinct(self.entries.iter().flat_map(|e| &e.item.languages));
        licenses.sort_by(|a, b| compare_names(a, b));
        languages.sort_by(|a, b| compare_names(a, b));

        Facets {
            categories,
            licenses,
            languages,
        }
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut seen: HashSet<&'a str> = HashSet::new();
    let mut out = Vec::new();
    for value in values {
        if seen.insert(value.as_str()) {
            out.push(value.clone());
        }
    }
    out
}
