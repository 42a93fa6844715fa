use std::collections::BTreeMap;

use super::{disjoint, site_links};
use crate::classify::classifier::TagClassifier;
use crate::models::{dedupe, Catalog, Category, Item, Subcategory, PLACEHOLDER_DESCRIPTION};
use crate::parser::ids::stable_id;
use crate::parser::{DraftCatalog, DraftItem};

/// Language code of the single description variant a Markdown list carries.
pub const DRAFT_LANGUAGE: &str = "en";

/// Normalize a parser draft. Licenses and languages are always derived.
pub fn normalize_draft(draft: DraftCatalog, classifier: &TagClassifier) -> Catalog {
    let categories = draft
        .categories
        .into_iter()
        .map(|cat| {
            let subcategories = cat
                .subcategories
                .into_iter()
                .map(|sub| {
                    let items = sub
                        .items
                        .into_iter()
                        .map(|it| {
                            let ctx = Parent {
                                category: &cat.title,
                                category_id: &cat.id,
                                subcategory: &sub.title,
                                subcategory_id: &sub.id,
                            };
                            draft_item(it, &ctx, classifier)
                        })
                        .collect();
                    Subcategory {
                        id: sub.id,
                        title: sub.title,
                        items,
                    }
                })
                .collect();
            Category {
                id: cat.id,
                title: cat.title,
                subcategories,
            }
        })
        .collect();

    Catalog {
        title: draft.title,
        description: draft.description,
        categories,
        about_links: draft.about_links,
    }
}

struct Parent<'a> {
    category: &'a str,
    category_id: &'a str,
    subcategory: &'a str,
    subcategory_id: &'a str,
}

fn draft_item(it: DraftItem, parent: &Parent<'_>, classifier: &TagClassifier) -> Item {
    let id = if it.id.is_empty() {
        stable_id(&[parent.category, parent.subcategory, it.name.as_str(), it.url.as_str()])
    } else {
        it.id
    };

    let description = it.description.trim().to_string();
    let mut descriptions = BTreeMap::new();
    if !description.is_empty() && description != PLACEHOLDER_DESCRIPTION {
        descriptions.insert(DRAFT_LANGUAGE.to_string(), description.clone());
    }

    // Rebuilt so the site link is first even for hand-built drafts.
    let links = site_links(&it.url, it.links);

    let tags = dedupe(it.tags.into_iter().map(|t| t.trim().to_string()));
    let (licenses, languages) = classifier.split(&tags);
    let languages = disjoint(&licenses, languages);

    Item {
        id,
        name: it.name,
        url: it.url,
        description: if description.is_empty() {
            PLACEHOLDER_DESCRIPTION.to_string()
        } else {
            description
        },
        descriptions,
        links,
        tags,
        licenses,
        languages,
        category: parent.category.to_string(),
        subcategory: parent.subcategory.to_string(),
        category_id: parent.category_id.to_string(),
        subcategory_id: parent.subcategory_id.to_string(),
    }
}
