use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};

use crate::models::dedupe;

/// Which subset a raw tag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    License,
    Language,
    Generic,
}

/// A list of regex fragments compiled into one case-insensitive alternation.
#[derive(Debug, Clone)]
pub struct KeywordTable {
    regex: Option<Regex>,
}

impl KeywordTable {
    /// Compile `patterns`. An empty table matches nothing.
    pub fn new(patterns: &[String]) -> Result<Self> {
        let fragments: Vec<String> = patterns
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(|p| format!("(?:{})", p))
            .collect();

        if fragments.is_empty() {
            return Ok(KeywordTable { regex: None });
        }

        let regex = RegexBuilder::new(&fragments.join("|"))
            .case_insensitive(true)
            .build()
            .with_context(|| format!("invalid keyword pattern in [{}]", patterns.join(", ")))?;

        Ok(KeywordTable { regex: Some(regex) })
    }

    pub fn matches(&self, tag: &str) -> bool {
        self.regex.as_ref().is_some_and(|re| re.is_match(tag))
    }
}

/// Splits raw tags into licenses and languages using two keyword tables.
///
/// The license table is tested first, so a tag matching both tables is a
/// license. Tags matching neither stay generic.
#[derive(Debug, Clone)]
pub struct TagClassifier {
    licenses: KeywordTable,
    languages: KeywordTable,
}

impl TagClassifier {
    pub fn new(license_patterns: &[String], language_patterns: &[String]) -> Result<Self> {
        Ok(TagClassifier {
            licenses: KeywordTable::new(license_patterns).context("license keyword table")?,
            languages: KeywordTable::new(language_patterns).context("language keyword table")?,
        })
    }

    pub fn kind(&self, tag: &str) -> TagKind {
        let tag = tag.trim();
        if tag.is_empty() {
            return TagKind::Generic;
        }
        if self.licenses.matches(tag) {
            TagKind::License
        } else if self.languages.matches(tag) {
            TagKind::Language
        } else {
            TagKind::Generic
        }
    }

    /// Return `(licenses, languages)`, each deduplicated in tag order.
    pub fn split(&self, tags: &[String]) -> (Vec<String>, Vec<String>) {
        let mut licenses = Vec::new();
        let mut languages = Vec::new();

        for tag in tags {
            match self.kind(tag) {
                TagKind::License => licenses.push(tag.trim().to_string()),
                TagKind::Language => languages.push(tag.trim().to_string()),
                TagKind::Generic => {}
            }
        }

        (dedupe(licenses), dedupe(languages))
    }
}
