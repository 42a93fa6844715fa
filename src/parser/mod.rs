//! Structural parser for free-form awesome-list Markdown.
//!
//! - [`markdown`]: single-pass line scanner producing a [`DraftCatalog`].
//! - [`ids`]: slugification, the document-wide id registry and the
//!   fallback hash id.
//!
//! Drafts carry raw tags only; license/language classification happens in
//! [`crate::normalize`].

pub mod ids;
pub mod markdown;

use crate::models::{AboutLink, Link};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftCatalog {
    pub title: String,
    pub description: String,
    pub categories: Vec<DraftCategory>,
    pub about_links: Vec<AboutLink>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DraftCategory {
    pub id: String,
    pub title: String,
    pub subcategories: Vec<DraftSubcategory>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DraftSubcategory {
    pub id: String,
    pub title: String,
    pub items: Vec<DraftItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DraftItem {
    pub id: String,
    pub name: String,
    pub url: String,
    pub description: String,
    pub links: Vec<Link>,
    pub tags: Vec<String>,
}
