use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::ids::IdRegistry;
use super::{DraftCatalog, DraftCategory, DraftItem, DraftSubcategory};
use crate::models::{dedupe, AboutLink, Link, PLACEHOLDER_DESCRIPTION, SITE_LINK_LABEL};

/// Title of the subcategory created for items listed directly under a category.
pub const GENERAL_SUBCATEGORY: &str = "General";

/// Substrings (lowercase) marking a link as being about the list itself.
const ABOUT_KEYWORDS: &[&str] = &["contribut", "issue", "pull", "donat", "template"];

static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#\s+(.+?)\s*$").expect("valid title regex"));
static CATEGORY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^##\s+(.+?)\s*$").expect("valid category regex"));
static SUBCATEGORY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^###\s+(.+?)\s*$").expect("valid subcategory regex"));
static BULLET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[-*+]\s+").expect("valid bullet regex"));
static ITEM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[-*+]\s+\[([^\]]+)\]\(([^)]+)\)\s*(?:[-–—:]\s*)?(.*)$")
        .expect("valid item regex")
});
static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link regex"));
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").expect("valid tag regex"));
/// A parenthesized group holding nothing but links, e.g. `([Source Code](..), [Demo](..))`.
static LINK_GROUP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(\s*\[[^\]]+\]\([^)]+\)(?:\s*[,;]?\s*\[[^\]]+\]\([^)]+\))*\s*\)")
        .expect("valid link group regex")
});
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Lines the scan could not turn into catalog content.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParseStats {
    pub items: usize,
    pub skipped_bullets: usize,
    pub local_links: usize,
}

/// Parse a Markdown awesome-list into a draft hierarchy.
///
/// Never fails: lines that are not headings or well-formed item bullets are
/// skipped, and whatever was recovered is returned.
pub fn parse_markdown(text: &str) -> DraftCatalog {
    let (draft, stats) = parse_with_stats(text);
    debug!(
        items = stats.items,
        skipped_bullets = stats.skipped_bullets,
        local_links = stats.local_links,
        categories = draft.categories.len(),
        "parsed markdown document"
    );
    draft
}

pub fn parse_with_stats(text: &str) -> (DraftCatalog, ParseStats) {
    let mut scanner = Scanner::default();
    for line in text.lines() {
        scanner.line(line);
    }
    scanner.finish()
}

#[derive(Default)]
struct Scanner {
    draft: DraftCatalog,
    ids: IdRegistry,
    stats: ParseStats,
    seen_title: bool,
    awaiting_description: bool,
    in_subcategory: bool,
}

impl Scanner {
    fn line(&mut self, line: &str) {
        self.harvest_about(line);

        if !self.seen_title {
            if let Some(caps) = TITLE_RE.captures(line) {
                self.draft.title = caps[1].trim().to_string();
                self.seen_title = true;
                self.awaiting_description = true;
                return;
            }
        } else if self.awaiting_description {
            self.description_candidate(line);
        }

        if let Some(caps) = CATEGORY_RE.captures(line) {
            self.start_category(caps[1].trim());
            return;
        }

        if let Some(caps) = SUBCATEGORY_RE.captures(line) {
            // Subcategory headings before the first category are ignored.
            if !self.draft.categories.is_empty() {
                self.start_subcategory(caps[1].trim());
                return;
            }
        }

        if self.draft.categories.is_empty() || !BULLET_RE.is_match(line) {
            return;
        }

        match self.parse_item(line) {
            Some(item) => {
                self.stats.items += 1;
                self.push_item(item);
            }
            None => self.stats.skipped_bullets += 1,
        }
    }

    fn description_candidate(&mut self, line: &str) {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("[![") {
            return;
        }
        self.draft.description = trimmed.to_string();
        self.awaiting_description = false;
    }

    fn start_category(&mut self, title: &str) {
        let id = self.ids.claim_slug(title);
        self.draft.categories.push(DraftCategory {
            id,
            title: title.to_string(),
            subcategories: Vec::new(),
        });
        self.in_subcategory = false;
    }

    fn start_subcategory(&mut self, title: &str) {
        let Some(category) = self.draft.categories.last_mut() else {
            return;
        };
        let id = self.ids.claim_slug(&format!("{}-{}", category.title, title));
        category.subcategories.push(DraftSubcategory {
            id,
            title: title.to_string(),
            items: Vec::new(),
        });
        self.in_subcategory = true;
    }

    fn parse_item(&mut self, line: &str) -> Option<ParsedBullet> {
        let caps = ITEM_RE.captures(line)?;
        let name = caps[1].trim().to_string();
        let url = caps[2].trim().to_string();

        if is_local_link(&url) {
            self.stats.local_links += 1;
            return None;
        }

        let rest = caps.get(3).map_or("", |m| m.as_str()).trim();

        let tags = dedupe(
            TAG_RE
                .captures_iter(rest)
                .map(|c| c[1].trim().to_string()),
        );

        let mut links = vec![Link {
            label: SITE_LINK_LABEL.to_string(),
            url: url.clone(),
        }];
        for c in LINK_RE.captures_iter(rest) {
            let link_url = c[2].trim();
            if !link_url.is_empty() && link_url != url {
                links.push(Link {
                    label: c[1].trim().to_string(),
                    url: link_url.to_string(),
                });
            }
        }

        let stripped = LINK_GROUP_RE.replace_all(rest, "");
        let stripped = LINK_RE.replace_all(&stripped, "");
        let stripped = TAG_RE.replace_all(&stripped, "");
        let description = WHITESPACE_RE.replace_all(&stripped, " ").trim().to_string();

        Some(ParsedBullet {
            name,
            url,
            description: if description.is_empty() {
                PLACEHOLDER_DESCRIPTION.to_string()
            } else {
                description
            },
            links,
            tags,
        })
    }

    fn push_item(&mut self, bullet: ParsedBullet) {
        let Some(category) = self.draft.categories.last() else {
            return;
        };
        let subcategory_title = match category.subcategories.last() {
            Some(sub) if self.in_subcategory => sub.title.as_str(),
            _ => GENERAL_SUBCATEGORY,
        };
        // The item id is claimed before a lazy "General" subcategory's id.
        let id = self.ids.claim_slug(&format!(
            "{}-{}-{}",
            category.title, subcategory_title, bullet.name
        ));

        if !self.in_subcategory {
            self.start_subcategory(GENERAL_SUBCATEGORY);
        }
        let Some(subcategory) = self
            .draft
            .categories
            .last_mut()
            .and_then(|c| c.subcategories.last_mut())
        else {
            return;
        };
        subcategory.items.push(DraftItem {
            id,
            name: bullet.name,
            url: bullet.url,
            description: bullet.description,
            links: bullet.links,
            tags: bullet.tags,
        });
    }

    fn harvest_about(&mut self, line: &str) {
        for caps in LINK_RE.captures_iter(line) {
            let text = caps[1].trim();
            let url = caps[2].trim();
            if url.is_empty() {
                continue;
            }
            let key = format!("{} {}", text, url).to_lowercase();
            if !ABOUT_KEYWORDS.iter().any(|k| key.contains(k)) {
                continue;
            }
            if self.draft.about_links.iter().any(|l| l.url == url) {
                continue;
            }
            self.draft.about_links.push(AboutLink {
                text: text.to_string(),
                url: url.to_string(),
            });
        }
    }

    fn finish(self) -> (DraftCatalog, ParseStats) {
        (self.draft, self.stats)
    }
}

struct ParsedBullet {
    name: String,
    url: String,
    description: String,
    links: Vec<Link>,
    tags: Vec<String>,
}

/// Table-of-contents anchors, relative paths and mail links are navigation,
/// not catalog entries.
fn is_local_link(url: &str) -> bool {
    url.starts_with('#') || url.starts_with("./") || url.starts_with('/') || url.starts_with("mailto:")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SYSADMIN: &str = "# Awesome Sysadmin\nA list...\n## Monitoring\n### Metrics\n- [Prometheus](https://prometheus.io) - `Apache-2.0` `Go` Metrics collection";

    #[test]
    fn test_minimal_document() {
        let draft = parse_markdown(SYSADMIN);
        assert_eq!(draft.title, "Awesome Sysadmin");
        assert_eq!(draft.description, "A list...");
        assert_eq!(draft.categories.len(), 1);

        let cat = &draft.categories[0];
        assert_eq!(cat.title, "Monitoring");
        assert_eq!(cat.id, "monitoring");
        assert_eq!(cat.subcategories.len(), 1);

        let sub = &cat.subcategories[0];
        assert_eq!(sub.title, "Metrics");
        assert_eq!(sub.id, "monitoring-metrics");
        assert_eq!(sub.items.len(), 1);

        let item = &sub.items[0];
        assert_eq!(item.name, "Prometheus");
        assert_eq!(item.url, "https://prometheus.io");
        assert_eq!(item.description, "Metrics collection");
        assert_eq!(item.tags, vec!["Apache-2.0", "Go"]);
        assert_eq!(item.id, "monitoring-metrics-prometheus");
        assert_eq!(item.links.len(), 1);
        assert_eq!(item.links[0].label, SITE_LINK_LABEL);
    }

    #[test]
    fn test_fragment_link_is_discarded() {
        let (draft, stats) = parse_with_stats("# T\n## Cat\n- [Internal](#top)\n");
        assert!(draft.categories[0].subcategories.is_empty());
        assert_eq!(stats.local_links, 1);
    }

    #[test]
    fn test_relative_and_mail_links_are_discarded() {
        let md = "## Cat\n- [Docs](./docs.md)\n- [Root](/x)\n- [Mail](mailto:a@b.c)\n";
        let draft = parse_markdown(md);
        assert!(draft.categories[0].subcategories.is_empty());
    }

    #[test]
    fn test_secondary_links_and_description_cleanup() {
        let md = "## Backups\n- [Borg](https://borgbackup.org) - Deduplicating archiver. ([Source Code](https://github.com/borgbackup/borg), [Demo](https://demo.example)) `BSD-3-Clause` `Python`\n";
        let draft = parse_markdown(md);
        let item = &draft.categories[0].subcategories[0].items[0];
        assert_eq!(item.description, "Deduplicating archiver.");
        let labels: Vec<&str> = item.links.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["Site", "Source Code", "Demo"]);
        assert_eq!(item.tags, vec!["BSD-3-Clause", "Python"]);
    }

    #[test]
    fn test_single_source_link_leaves_no_parens() {
        let md = "## Backups\n- [Borg](https://borgbackup.org) - Archiver. ([Source Code](https://github.com/borgbackup/borg)) `BSD-3-Clause`\n";
        let item = &parse_markdown(md).categories[0].subcategories[0].items[0];
        assert_eq!(item.description, "Archiver.");
    }

    #[test]
    fn test_link_equal_to_primary_is_not_repeated() {
        let md = "## C\n- [A](https://a.io) - thing [Home](https://a.io)\n";
        let item = &parse_markdown(md).categories[0].subcategories[0].items[0];
        assert_eq!(item.links.len(), 1);
    }

    #[test]
    fn test_empty_description_gets_placeholder() {
        let md = "## C\n- [A](https://a.io) `MIT`\n";
        let item = &parse_markdown(md).categories[0].subcategories[0].items[0];
        assert_eq!(item.description, PLACEHOLDER_DESCRIPTION);
    }

    #[test]
    fn test_general_subcategory_created_once() {
        let md = "## DNS\n- [A](https://a.io) one\n- [B](https://b.io) two\n### Servers\n- [C](https://c.io) three\n";
        let cat = &parse_markdown(md).categories[0];
        assert_eq!(cat.subcategories.len(), 2);
        assert_eq!(cat.subcategories[0].title, GENERAL_SUBCATEGORY);
        assert_eq!(cat.subcategories[0].items.len(), 2);
        assert_eq!(cat.subcategories[1].title, "Servers");
        assert_eq!(cat.subcategories[1].items.len(), 1);
    }

    #[test]
    fn test_category_resets_subcategory_cursor() {
        let md = "## A\n### Sub\n- [X](https://x.io) x\n## B\n- [Y](https://y.io) y\n";
        let draft = parse_markdown(md);
        assert_eq!(draft.categories[1].subcategories[0].title, GENERAL_SUBCATEGORY);
    }

    #[test]
    fn test_content_before_first_category_is_ignored() {
        let md = "# T\n### Orphan\n- [X](https://x.io) x\n## Real\n";
        let draft = parse_markdown(md);
        assert_eq!(draft.categories.len(), 1);
        assert!(draft.categories[0].subcategories.is_empty());
    }

    #[test]
    fn test_description_skips_badges() {
        let md = "# Title\n\n[![Badge](https://img.shields.io/x)](https://x)\n\nReal description.\n";
        assert_eq!(parse_markdown(md).description, "Real description.");
    }

    #[test]
    fn test_heading_after_title_is_the_description() {
        let md = "# Title\n\n## Monitoring\n- [A](https://a.io) a\n";
        let draft = parse_markdown(md);
        assert_eq!(draft.description, "## Monitoring");
        assert_eq!(draft.categories[0].title, "Monitoring");
        assert_eq!(draft.categories[0].subcategories[0].items.len(), 1);
    }

    #[test]
    fn test_literal_parentheses_survive_cleanup() {
        let md = "## C\n- [A](https://a.io) - Wraps fork() and exec() calls. ( see man pages )\n";
        let item = &parse_markdown(md).categories[0].subcategories[0].items[0];
        assert_eq!(item.description, "Wraps fork() and exec() calls. ( see man pages )");
    }

    #[test]
    fn test_item_id_claimed_before_general_subcategory() {
        let md = "## A\n- [!](https://x.io) bang\n";
        let sub = &parse_markdown(md).categories[0].subcategories[0];
        assert_eq!(sub.items[0].id, "a-general");
        assert_eq!(sub.id, "a-general-2");
    }

    #[test]
    fn test_only_first_top_heading_is_title() {
        let md = "# First\ndesc\n# Second\n";
        assert_eq!(parse_markdown(md).title, "First");
    }

    #[test]
    fn test_duplicate_titles_get_unique_ids() {
        let md = "## Tools\n### Misc\n- [A](https://a.io) a\n- [A](https://a2.io) a\n## Tools\n### Misc\n";
        let draft = parse_markdown(md);
        assert_eq!(draft.categories[0].id, "tools");
        assert_eq!(draft.categories[1].id, "tools-2");
        assert_eq!(draft.categories[1].subcategories[0].id, "tools-misc-2");
        let items = &draft.categories[0].subcategories[0].items;
        assert_eq!(items[0].id, "tools-misc-a");
        assert_eq!(items[1].id, "tools-misc-a-2");
    }

    #[test]
    fn test_about_links_harvested_once_per_url() {
        let md = "# T\nPlease read [contribution guidelines](https://x/CONTRIBUTING.md).\n## C\n- [Tool](https://t.io) see [issues](https://t.io/issues)\nAgain [Contributing](https://x/CONTRIBUTING.md)\n";
        let draft = parse_markdown(md);
        let urls: Vec<&str> = draft.about_links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(urls, vec!["https://x/CONTRIBUTING.md", "https://t.io/issues"]);
        assert_eq!(draft.about_links[0].text, "contribution guidelines");
    }

    #[test]
    fn test_garbage_input_never_panics() {
        let md = "## Cat\n- [broken(\n## \n###\n* [x](\n+ [y](https://y.io\n```\n";
        let draft = parse_markdown(md);
        assert!(draft.categories.iter().all(|c| c.subcategories.is_empty()));
    }

    #[test]
    fn test_alternate_bullets_and_separators() {
        let md = "## C\n* [A](https://a.io): colon sep\n+ [B](https://b.io) — dash sep\n";
        let items = &parse_markdown(md).categories[0].subcategories[0].items;
        assert_eq!(items[0].description, "colon sep");
        assert_eq!(items[1].description, "dash sep");
    }
}
