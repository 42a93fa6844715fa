use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::{FlatIndexEntry, Item};

/// Only the first tokens of a query take part in matching.
pub const MAX_QUERY_TOKENS: usize = 6;

static SOURCE_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)source\s*code").expect("valid source code regex"));

/// Kind of secondary link an item must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// A link labelled "Source Code".
    Source,
    /// A link labelled with "Demo".
    Demo,
}

impl LinkKind {
    pub fn matches(&self, label: &str) -> bool {
        match self {
            LinkKind::Source => SOURCE_CODE_RE.is_match(label),
            LinkKind::Demo => label.to_lowercase().contains("demo"),
        }
    }
}

impl std::fmt::Display for LinkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkKind::Source => write!(f, "source"),
            LinkKind::Demo => write!(f, "demo"),
        }
    }
}

/// Independent predicates, AND-combined. `None` disables a predicate.
///
/// Owned by the caller and passed into every query; the engine keeps no
/// filter state of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Exact category title.
    pub category: Option<String>,
    pub license: Option<String>,
    pub language: Option<String>,
    pub has: Option<LinkKind>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.license.is_none()
            && self.language.is_none()
            && self.has.is_none()
    }

    pub fn matches(&self, item: &Item) -> bool {
        if let Some(category) = &self.category {
            if &item.category != category {
                return false;
            }
        }
        if let Some(license) = &self.license {
            if !item.licenses.contains(license) {
                return false;
            }
        }
        if let Some(language) = &self.language {
            if !item.languages.contains(language) {
                return false;
            }
        }
        if let Some(kind) = self.has {
            if !item.links.iter().any(|l| kind.matches(&l.label)) {
                return false;
            }
        }
        true
    }
}

/// Lowercased whitespace tokens of `query`, at most [`MAX_QUERY_TOKENS`].
pub fn query_tokens(query: &str) -> Vec<String> {
    query
        .trim()
        .to_lowercase()
        .split_whitespace()
        .take(MAX_QUERY_TOKENS)
        .map(str::to_string)
        .collect()
}

/// True when every token is a substring of the entry's search text.
pub fn matches_tokens(entry: &FlatIndexEntry, tokens: &[String]) -> bool {
    tokens.iter().all(|t| entry.search.contains(t.as_str()))
}
