use std::collections::HashSet;

use unicode_normalization::UnicodeNormalization;

/// Slug used when a title has no ASCII letters or digits left.
pub const DEFAULT_SLUG: &str = "section";

const STABLE_ID_LEN: usize = 12;

/// Lowercase, strip diacritics, collapse every non-`[a-z0-9]` run to `-`.
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_separator = false;

    for c in strip_diacritics(&text.to_lowercase()).chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_separator && !out.is_empty() {
                out.push('-');
            }
            pending_separator = false;
            out.push(c);
        } else {
            pending_separator = true;
        }
    }

    if out.is_empty() {
        DEFAULT_SLUG.to_string()
    } else {
        out
    }
}

/// Canonical decomposition with the combining diacritical marks removed.
pub fn strip_diacritics(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

/// 32-bit rolling hash (`h * 31 + unit`) over UTF-16 code units.
pub fn rolling_hash(text: &str) -> i32 {
    text.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32))
}

/// Short deterministic id for an item lacking one.
///
/// Stable for identical inputs within a document; not collision resistant.
pub fn stable_id(parts: &[&str]) -> String {
    let mut id = format!("id{}", rolling_hash(&parts.join("||")).unsigned_abs());
    id.truncate(STABLE_ID_LEN);
    id
}

/// Document-wide set of assigned ids.
#[derive(Debug, Default)]
pub struct IdRegistry {
    used: HashSet<String>,
}

impl IdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `base`, appending `-2`, `-3`, ... until it is unused.
    pub fn claim(&mut self, base: &str) -> String {
        if self.used.insert(base.to_string()) {
            return base.to_string();
        }
        let mut n = 2;
        loop {
            let candidate = format!("{}-{}", base, n);
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Slugify `text`, then [`claim`](Self::claim) the slug.
    pub fn claim_slug(&mut self, text: &str) -> String {
        self.claim(&slugify(text))
    }
}
