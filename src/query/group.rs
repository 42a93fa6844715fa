use serde::Serialize;

use crate::models::{Catalog, FlatIndexEntry};

/// Results of one category, in catalog order.
#[derive(Debug, Clone, Serialize)]
pub struct Section<'a> {
    pub category_id: &'a str,
    pub category: &'a str,
    pub subsections: Vec<Subsection<'a>>,
}

impl Section<'_> {
    pub fn len(&self) -> usize {
        self.subsections.iter().map(|s| s.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.subsections.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Subsection<'a> {
    pub subcategory_id: &'a str,
    pub subcategory: &'a str,
    pub entries: Vec<&'a FlatIndexEntry>,
}

/// Regroup `results` under the catalog's categories and subcategories.
///
/// Sections follow catalog order; entries keep their order from `results`.
/// Empty sections are omitted.
pub fn group_by_section<'a>(
    catalog: &'a Catalog,
    results: &[&'a FlatIndexEntry],
) -> Vec<Section<'a>> {
    catalog
        .categories
        .iter()
        .map(|category| {
            let subsections: Vec<Subsection<'a>> = category
                .subcategories
                .iter()
                .filter_map(|sub| {
                    let entries: Vec<&'a FlatIndexEntry> = results
                        .iter()
                        .copied()
                        .filter(|e| e.category_id == category.id && e.subcategory_id == sub.id)
                        .collect();
                    (!entries.is_empty()).then(|| Subsection {
                        subcategory_id: &sub.id,
                        subcategory: &sub.title,
                        entries,
                    })
                })
                .collect();

            Section {
                category_id: &category.id,
                category: &category.title,
                subsections,
            }
        })
        .filter(|section| !section.is_empty())
        .collect()
}
