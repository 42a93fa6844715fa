//! Normalization of either input shape into one canonical [`Catalog`].
//!
//! The input shape is decided once, by the loader, and carried as a
//! [`Document`]. [`normalize`] dispatches on it:
//!
//! - [`Document::Structured`]: pre-built JSON with explicit ids, description
//!   variants, a link map and (optionally) classified licenses/languages
//!   ([`structured`]).
//! - [`Document::FreeForm`]: Markdown text, run through
//!   [`crate::parser::markdown`] and then normalized from the draft ([`draft`]).

pub mod draft;
pub mod structured;

use crate::classify::classifier::TagClassifier;
use crate::models::{Catalog, Link, SITE_LINK_LABEL};

pub use structured::StructuredCatalog;

/// Title used when the source does not provide one.
pub const DEFAULT_TITLE: &str = "Awesome Sysadmin";

/// A loaded document in one of the two accepted shapes.
#[derive(Debug, Clone)]
pub enum Document {
    Structured(StructuredCatalog),
    FreeForm(String),
}

impl Document {
    pub fn kind(&self) -> &'static str {
        match self {
            Document::Structured(_) => "structured",
            Document::FreeForm(_) => "markdown",
        }
    }
}

/// Knobs the normalization layer takes from configuration.
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Fallback catalog title.
    pub default_title: String,
    /// Description language precedence, e.g. `["fr", "en"]`.
    pub description_languages: Vec<String>,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        NormalizeOptions {
            default_title: DEFAULT_TITLE.to_string(),
            description_languages: vec!["fr".to_string(), "en".to_string()],
        }
    }
}

/// Produce the canonical catalog for `document`.
pub fn normalize(
    document: &Document,
    classifier: &TagClassifier,
    options: &NormalizeOptions,
) -> Catalog {
    let mut catalog = match document {
        Document::Structured(doc) => structured::normalize_structured(doc, classifier, options),
        Document::FreeForm(text) => {
            let draft = crate::parser::markdown::parse_markdown(text);
            draft::normalize_draft(draft, classifier)
        }
    };

    if catalog.title.trim().is_empty() {
        catalog.title = options.default_title.clone();
    }

    tracing::debug!(
        kind = document.kind(),
        categories = catalog.categories.len(),
        items = catalog.items().count(),
        "normalized catalog"
    );

    catalog
}

/// Build an item's link list: the site link first, then every extra link
/// whose url is non-empty and differs from `primary_url`.
pub(crate) fn site_links<I>(primary_url: &str, extra: I) -> Vec<Link>
where
    I: IntoIterator<Item = Link>,
{
    let mut links = vec![Link {
        label: SITE_LINK_LABEL.to_string(),
        url: primary_url.to_string(),
    }];
    links.extend(
        extra
            .into_iter()
            .filter(|l| !l.url.is_empty() && l.url != primary_url),
    );
    links
}

/// Remove from `languages` anything already listed as a license.
pub(crate) fn disjoint(licenses: &[String], languages: Vec<String>) -> Vec<String> {
    languages
        .into_iter()
        .filter(|l| !licenses.contains(l))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::keywords::{default_language_patterns, default_license_patterns};
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn classifier() -> TagClassifier {
        TagClassifier::new(&default_license_patterns(), &default_language_patterns()).unwrap()
    }

    #[test]
    fn test_free_form_scenario() {
        let doc = Document::FreeForm(
            "# Awesome Sysadmin\nA list...\n## Monitoring\n### Metrics\n- [Prometheus](https://prometheus.io) - `Apache-2.0` `Go` Metrics collection".to_string(),
        );
        let catalog = normalize(&doc, &classifier(), &NormalizeOptions::default());

        assert_eq!(catalog.title, "Awesome Sysadmin");
        assert_eq!(catalog.categories.len(), 1);
        let item = catalog.items().next().unwrap();
        assert_eq!(item.name, "Prometheus");
        assert_eq!(item.url, "https://prometheus.io");
        assert_eq!(item.description, "Metrics collection");
        assert_eq!(item.tags, vec!["Apache-2.0", "Go"]);
        assert_eq!(item.licenses, vec!["Apache-2.0"]);
        assert_eq!(item.languages, vec!["Go"]);
        assert_eq!(item.category, "Monitoring");
        assert_eq!(item.subcategory, "Metrics");
    }

    #[test]
    fn test_missing_title_uses_default() {
        let doc = Document::FreeForm("## Cat\n- [A](https://a.io) a\n".to_string());
        let catalog = normalize(&doc, &classifier(), &NormalizeOptions::default());
        assert_eq!(catalog.title, DEFAULT_TITLE);
    }

    #[test]
    fn test_site_links_filters_primary_and_empty() {
        let links = site_links(
            "https://a.io",
            vec![
                Link { label: "Home".into(), url: "https://a.io".into() },
                Link { label: "Empty".into(), url: String::new() },
                Link { label: "Demo".into(), url: "https://demo.a.io".into() },
            ],
        );
        let labels: Vec<&str> = links.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec![SITE_LINK_LABEL, "Demo"]);
    }

    fn line() -> impl Strategy<Value = String> {
        prop_oneof![
            "[A-Za-z ]{1,12}".prop_map(|t| format!("## {}", t)),
            "[A-Za-z ]{1,12}".prop_map(|t| format!("### {}", t)),
            ("[A-Za-zé]{1,8}", "[a-z]{1,6}", "[a-z .]{0,20}", 0usize..4).prop_map(
                |(name, host, desc, tag)| {
                    let tags = ["`MIT`", "`Go`", "`MIT` `Go`", "`Self-hosted`"];
                    format!("- [{}](https://{}.io) - {} {}", name, host, desc, tags[tag])
                }
            ),
            Just("- [Skip](#top)".to_string()),
            "[a-z ]{0,20}",
        ]
    }

    fn document() -> impl Strategy<Value = String> {
        proptest::collection::vec(line(), 0..30)
            .prop_map(|lines| format!("# Title\n{}\n", lines.join("\n")))
    }

    proptest! {
        #[test]
        fn prop_free_form_is_deterministic(md in document()) {
            let doc = Document::FreeForm(md);
            let a = normalize(&doc, &classifier(), &NormalizeOptions::default());
            let b = normalize(&doc, &classifier(), &NormalizeOptions::default());
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_ids_unique_and_items_well_formed(md in document()) {
            let catalog = normalize(&Document::FreeForm(md), &classifier(), &NormalizeOptions::default());

            let mut seen = HashSet::new();
            for cat in &catalog.categories {
                prop_assert!(seen.insert(cat.id.clone()));
                for sub in &cat.subcategories {
                    prop_assert!(seen.insert(sub.id.clone()));
                }
            }
            let mut item_ids = HashSet::new();
            for item in catalog.items() {
                prop_assert!(item_ids.insert(item.id.clone()));
                prop_assert!(!item.description.is_empty());
                prop_assert!(item.licenses.iter().all(|l| !item.languages.contains(l)));
                prop_assert_eq!(item.links[0].label.as_str(), SITE_LINK_LABEL);
                prop_assert!(item.links[1..].iter().all(|l| l.url != item.url));
            }
        }
    }

    #[test]
    fn test_disjoint() {
        let licenses = vec!["MIT".to_string()];
        let langs = disjoint(&licenses, vec!["MIT".to_string(), "Go".to_string()]);
        assert_eq!(langs, vec!["Go"]);
    }
}
