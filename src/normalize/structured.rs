use std::collections::BTreeMap;

use serde_json::Value;
use tracing::warn;

use super::{disjoint, site_links, NormalizeOptions};
use crate::classify::classifier::TagClassifier;
use crate::models::{
    dedupe, AboutLink, Catalog, Category, Item, Link, Subcategory, PLACEHOLDER_DESCRIPTION,
};
use crate::parser::ids::{slugify, stable_id, IdRegistry};

const DESCRIPTION_PREFIX: &str = "description_";

/// A pre-structured catalog document, decoded leniently: any missing or
/// wrong-typed field becomes an empty default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuredCatalog {
    pub title: String,
    pub description: String,
    pub categories: Vec<StructuredCategory>,
    pub about_links: Vec<AboutLink>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuredCategory {
    pub id: Option<String>,
    pub title: String,
    pub subcategories: Vec<StructuredSubcategory>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuredSubcategory {
    pub id: Option<String>,
    pub title: String,
    pub items: Vec<StructuredItem>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuredItem {
    pub id: Option<String>,
    pub name: String,
    pub url: String,
    /// `description_<lang>` values keyed by `<lang>`.
    pub descriptions: BTreeMap<String, String>,
    /// Named links in document order.
    pub links: Vec<Link>,
    pub licenses: Option<Vec<String>>,
    pub langs: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
}

impl StructuredCatalog {
    /// Decode `text` if it is a JSON object; anything else is not a
    /// structured document.
    pub fn from_json_str(text: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(text).ok()?;
        value.is_object().then(|| Self::from_value(&value))
    }

    pub fn from_value(value: &Value) -> Self {
        StructuredCatalog {
            title: text_field(value, "title"),
            description: text_field(value, "description"),
            categories: array_field(value, "categories")
                .iter()
                .map(StructuredCategory::from_value)
                .collect(),
            about_links: about_links(array_field(value, "aboutLinks")),
        }
    }
}

impl StructuredCategory {
    fn from_value(value: &Value) -> Self {
        StructuredCategory {
            id: optional_text(value, "id"),
            title: text_field(value, "title"),
            subcategories: array_field(value, "subcategories")
                .iter()
                .map(StructuredSubcategory::from_value)
                .collect(),
        }
    }
}

impl StructuredSubcategory {
    fn from_value(value: &Value) -> Self {
        StructuredSubcategory {
            id: optional_text(value, "id"),
            title: text_field(value, "title"),
            items: array_field(value, "items")
                .iter()
                .map(StructuredItem::from_value)
                .collect(),
        }
    }
}

impl StructuredItem {
    fn from_value(value: &Value) -> Self {
        let descriptions = value
            .as_object()
            .map(|obj| {
                obj.iter()
                    .filter_map(|(key, v)| {
                        let lang = key.strip_prefix(DESCRIPTION_PREFIX)?;
                        let text = scalar_text(v).trim().to_string();
                        (!lang.is_empty() && !text.is_empty()).then(|| (lang.to_string(), text))
                    })
                    .collect()
            })
            .unwrap_or_default();

        let links = value
            .get("links")
            .and_then(|v| v.as_object())
            .map(|obj| {
                obj.iter()
                    .map(|(label, url)| Link {
                        label: label.trim().to_string(),
                        url: scalar_text(url).trim().to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        StructuredItem {
            id: optional_text(value, "id"),
            name: text_field(value, "name").trim().to_string(),
            url: text_field(value, "url").trim().to_string(),
            descriptions,
            links,
            licenses: optional_list(value, "licenses"),
            langs: optional_list(value, "langs"),
            tags: optional_list(value, "tags"),
        }
    }
}

/// Normalize a structured document.
///
/// Explicit ids are kept when unique; every id goes through one registry so
/// duplicated source ids still come out unique.
pub fn normalize_structured(
    doc: &StructuredCatalog,
    classifier: &TagClassifier,
    options: &NormalizeOptions,
) -> Catalog {
    let mut ids = IdRegistry::new();

    let categories = doc
        .categories
        .iter()
        .map(|cat| {
            let cat_base = cat.id.clone().unwrap_or_else(|| slugify(&cat.title));
            let cat_id = claim(&mut ids, &cat_base, "category");

            let subcategories = cat
                .subcategories
                .iter()
                .map(|sub| {
                    let sub_base = sub
                        .id
                        .clone()
                        .unwrap_or_else(|| slugify(&format!("{}-{}", cat.title, sub.title)));
                    let sub_id = claim(&mut ids, &sub_base, "subcategory");

                    let items = sub
                        .items
                        .iter()
                        .map(|it| {
                            let base = it.id.clone().unwrap_or_else(|| {
                                stable_id(&[
                                    cat.title.as_str(),
                                    sub.title.as_str(),
                                    it.name.as_str(),
                                    it.url.as_str(),
                                ])
                            });
                            let id = claim(&mut ids, &base, "item");
                            structured_item(
                                it,
                                id,
                                (cat, cat_id.as_str()),
                                (sub, sub_id.as_str()),
                                classifier,
                                options,
                            )
                        })
                        .collect();

                    Subcategory {
                        id: sub_id,
                        title: sub.title.clone(),
                        items,
                    }
                })
                .collect();

            Category {
                id: cat_id,
                title: cat.title.clone(),
                subcategories,
            }
        })
        .collect();

    Catalog {
        title: doc.title.clone(),
        description: doc.description.clone(),
        categories,
        about_links: doc.about_links.clone(),
    }
}

fn claim(ids: &mut IdRegistry, base: &str, scope: &str) -> String {
    let id = ids.claim(base);
    if id != base {
        warn!(scope, source_id = base, assigned = %id, "duplicate id in structured document");
    }
    id
}

fn structured_item(
    it: &StructuredItem,
    id: String,
    (cat, cat_id): (&StructuredCategory, &str),
    (sub, sub_id): (&StructuredSubcategory, &str),
    classifier: &TagClassifier,
    options: &NormalizeOptions,
) -> Item {
    let description = options
        .description_languages
        .iter()
        .find_map(|lang| it.descriptions.get(lang))
        .cloned()
        .unwrap_or_else(|| PLACEHOLDER_DESCRIPTION.to_string());

    let tags = match &it.tags {
        Some(tags) => dedupe(tags.iter().map(|t| t.trim().to_string())),
        None => dedupe(
            it.licenses
                .iter()
                .chain(it.langs.iter())
                .flatten()
                .map(|t| t.trim().to_string()),
        ),
    };

    let (derived_licenses, derived_languages) = if it.licenses.is_none() || it.langs.is_none() {
        classifier.split(&tags)
    } else {
        (Vec::new(), Vec::new())
    };

    let licenses = match &it.licenses {
        Some(given) => dedupe(given.iter().map(|t| t.trim().to_string())),
        None => derived_licenses,
    };
    let languages = match &it.langs {
        Some(given) => dedupe(given.iter().map(|t| t.trim().to_string())),
        None => derived_languages,
    };
    let languages = disjoint(&licenses, languages);

    Item {
        id,
        name: it.name.clone(),
        url: it.url.clone(),
        description,
        descriptions: it.descriptions.clone(),
        links: site_links(&it.url, it.links.iter().cloned()),
        tags,
        licenses,
        languages,
        category: cat.title.clone(),
        subcategory: sub.title.clone(),
        category_id: cat_id.to_string(),
        subcategory_id: sub_id.to_string(),
    }
}

fn about_links(values: &[Value]) -> Vec<AboutLink> {
    let mut out: Vec<AboutLink> = Vec::new();
    for v in values {
        let url = text_field(v, "url").trim().to_string();
        if url.is_empty() || out.iter().any(|l| l.url == url) {
            continue;
        }
        out.push(AboutLink {
            text: text_field(v, "text").trim().to_string(),
            url,
        });
    }
    out
}

/// Strings pass through, numbers and booleans are rendered, anything else is empty.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn text_field(value: &Value, key: &str) -> String {
    value.get(key).map(scalar_text).unwrap_or_default()
}

fn optional_text(value: &Value, key: &str) -> Option<String> {
    let text = text_field(value, key).trim().to_string();
    (!text.is_empty()).then_some(text)
}

fn array_field<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(|v| v.as_array())
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn optional_list(value: &Value, key: &str) -> Option<Vec<String>> {
    let list = value.get(key)?.as_array()?;
    Some(
        list.iter()
            .map(scalar_text)
            .filter(|s| !s.trim().is_empty())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::keywords::{default_language_patterns, default_license_patterns};
    use crate::models::SITE_LINK_LABEL;

    fn classifier() -> TagClassifier {
        TagClassifier::new(&default_license_patterns(), &default_language_patterns()).unwrap()
    }

    fn normalize_json(json: &str) -> Catalog {
        let doc = StructuredCatalog::from_json_str(json).unwrap();
        normalize_structured(&doc, &classifier(), &NormalizeOptions::default())
    }

    const SAMPLE: &str = r#"{
      "title": "Awesome Sysadmin",
      "description": "A curated list",
      "categories": [{
        "id": "monitoring",
        "title": "Monitoring",
        "subcategories": [{
          "title": "Metrics",
          "items": [{
            "id": "abc123",
            "name": "Prometheus",
            "url": "https://prometheus.io",
            "description_en": "Metrics collection",
            "description_fr": "Collecte de métriques",
            "links": {"Source Code": "https://github.com/prometheus/prometheus", "Home": "https://prometheus.io"},
            "licenses": ["Apache-2.0"],
            "langs": ["Go"]
          }]
        }]
      }],
      "aboutLinks": [{"text": "Contributing", "url": "https://x/c"}, {"text": "Again", "url": "https://x/c"}]
    }"#;

    #[test]
    fn test_structured_sample() {
        let catalog = normalize_json(SAMPLE);
        assert_eq!(catalog.title, "Awesome Sysadmin");
        assert_eq!(catalog.about_links.len(), 1);

        let cat = &catalog.categories[0];
        assert_eq!(cat.id, "monitoring");
        assert_eq!(cat.subcategories[0].id, "monitoring-metrics");

        let item = catalog.items().next().unwrap();
        assert_eq!(item.id, "abc123");
        // fr precedes en by default
        assert_eq!(item.description, "Collecte de métriques");
        assert_eq!(item.descriptions.len(), 2);
        assert_eq!(item.links.len(), 2);
        assert_eq!(item.links[0].label, SITE_LINK_LABEL);
        assert_eq!(item.links[1].label, "Source Code");
        assert_eq!(item.licenses, vec!["Apache-2.0"]);
        assert_eq!(item.languages, vec!["Go"]);
        assert_eq!(item.tags, vec!["Apache-2.0", "Go"]);
    }

    #[test]
    fn test_language_precedence_is_configurable() {
        let doc = StructuredCatalog::from_json_str(SAMPLE).unwrap();
        let options = NormalizeOptions {
            description_languages: vec!["en".into(), "fr".into()],
            ..NormalizeOptions::default()
        };
        let catalog = normalize_structured(&doc, &classifier(), &options);
        assert_eq!(catalog.items().next().unwrap().description, "Metrics collection");
    }

    #[test]
    fn test_second_language_used_when_first_missing() {
        let catalog = normalize_json(
            r#"{"categories":[{"title":"C","subcategories":[{"title":"S","items":[{"name":"A","url":"https://a.io","description_en":"English"}]}]}]}"#,
        );
        assert_eq!(catalog.items().next().unwrap().description, "English");
    }

    #[test]
    fn test_missing_fields_degrade_to_defaults() {
        let catalog = normalize_json(
            r#"{"categories":[{"subcategories":[{"items":[{}]}]}, {"title": 42, "subcategories": "nope"}]}"#,
        );
        assert_eq!(catalog.categories.len(), 2);
        assert_eq!(catalog.categories[0].id, "section");
        assert_eq!(catalog.categories[1].title, "42");
        assert!(catalog.categories[1].subcategories.is_empty());

        let item = catalog.items().next().unwrap();
        assert_eq!(item.description, PLACEHOLDER_DESCRIPTION);
        assert!(item.id.starts_with("id"));
        assert!(item.tags.is_empty());
    }

    #[test]
    fn test_classification_when_not_supplied() {
        let catalog = normalize_json(
            r#"{"categories":[{"title":"C","subcategories":[{"title":"S","items":[{"name":"A","url":"https://a.io","tags":["GPL-3.0","Python","Self-hosted"]}]}]}]}"#,
        );
        let item = catalog.items().next().unwrap();
        assert_eq!(item.tags, vec!["GPL-3.0", "Python", "Self-hosted"]);
        assert_eq!(item.licenses, vec!["GPL-3.0"]);
        assert_eq!(item.languages, vec!["Python"]);
    }

    #[test]
    fn test_duplicate_explicit_ids_become_unique() {
        let catalog = normalize_json(
            r#"{"categories":[
                {"id":"tools","title":"Tools","subcategories":[{"id":"s","title":"S","items":[{"id":"x","name":"A"},{"id":"x","name":"B"}]}]},
                {"id":"tools","title":"Tools again","subcategories":[{"id":"s","title":"S"}]}
            ]}"#,
        );
        assert_eq!(catalog.categories[0].id, "tools");
        assert_eq!(catalog.categories[1].id, "tools-2");
        assert_eq!(catalog.categories[1].subcategories[0].id, "s-2");
        let ids: Vec<&str> = catalog.items().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["x", "x-2"]);
    }

    #[test]
    fn test_non_object_is_not_structured() {
        assert!(StructuredCatalog::from_json_str("[1, 2]").is_none());
        assert!(StructuredCatalog::from_json_str("# Markdown").is_none());
        assert!(StructuredCatalog::from_json_str("{}").is_some());
    }
}
