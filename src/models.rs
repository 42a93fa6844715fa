use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Description shown when a source supplies no usable text.
pub const PLACEHOLDER_DESCRIPTION: &str = "—";

/// Label of the implicit first link pointing at an item's own site.
pub const SITE_LINK_LABEL: &str = "Site";

/// Root of the normalized model. Rebuilt wholesale on every load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub title: String,
    pub description: String,
    pub categories: Vec<Category>,
    pub about_links: Vec<AboutLink>,
}

impl Catalog {
    /// Catalog substituted by the caller when no document could be obtained.
    pub fn empty(title: &str) -> Self {
        Catalog {
            title: title.to_string(),
            description: String::new(),
            categories: Vec::new(),
            about_links: Vec::new(),
        }
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.categories
            .iter()
            .flat_map(|c| c.subcategories.iter())
            .flat_map(|s| s.items.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub title: String,
    pub subcategories: Vec<Subcategory>,
}

impl Category {
    pub fn item_count(&self) -> usize {
        self.subcategories.iter().map(|s| s.items.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: String,
    pub title: String,
    pub items: Vec<Item>,
}

/// One catalogued tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub url: String,
    /// Primary description; never empty.
    pub description: String,
    /// Every description variant the source supplied, keyed by language code.
    pub descriptions: BTreeMap<String, String>,
    /// First entry is always the item's own site.
    pub links: Vec<Link>,
    /// Raw tags, deduplicated in first-seen order.
    pub tags: Vec<String>,
    pub licenses: Vec<String>,
    pub languages: Vec<String>,
    pub category: String,
    pub subcategory: String,
    pub category_id: String,
    pub subcategory_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutLink {
    pub text: String,
    pub url: String,
}

/// Search-ready projection of one [`Item`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatIndexEntry {
    pub item: Item,
    pub category_id: String,
    pub subcategory_id: String,
    /// Lowercased name, description, section titles, tags and link labels.
    #[serde(skip)]
    pub search: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSummary {
    pub categories: usize,
    pub items: usize,
    pub distinct_tags: usize,
}

impl std::fmt::Display for IndexSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} categories, {} tools, {} tags",
            self.categories, self.items, self.distinct_tags
        )
    }
}

/// Filter options derived from a catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facets {
    /// Category titles in document order with their item counts.
    pub categories: Vec<(String, usize)>,
    pub licenses: Vec<String>,
    pub languages: Vec<String>,
}

/// Deduplicate strings preserving first occurrence and dropping blanks.
pub fn dedupe(values: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for value in values {
        if value.is_empty() {
            continue;
        }
        if seen.insert(value.clone()) {
            out.push(value);
        }
    }
    out
}
