use std::cmp::Ordering;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::models::FlatIndexEntry;
use crate::parser::ids::{rolling_hash, strip_diacritics};

/// Length of one discovery-rotation bucket.
pub const ROTATION_WINDOW_MS: u128 = 60_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortMode {
    /// Ascending by display name.
    #[default]
    #[serde(rename = "az", alias = "alphabetical")]
    Alphabetical,
    /// Most raw tags first, ties by name.
    #[serde(rename = "tags", alias = "tag-density")]
    TagDensity,
    /// Hash order rotated by one position per minute.
    #[serde(rename = "discovery", alias = "roulette")]
    Discovery,
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortMode::Alphabetical => write!(f, "az"),
            SortMode::TagDensity => write!(f, "tags"),
            SortMode::Discovery => write!(f, "discovery"),
        }
    }
}

/// Name ordering that ignores case and accents, falling back to a plain
/// comparison so the order is total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

fn collation_key(name: &str) -> String {
    strip_diacritics(&name.to_lowercase())
}

/// Per-name hash defining the discovery base order.
pub fn discovery_hash(name: &str) -> u32 {
    rolling_hash(name).unsigned_abs()
}

/// Number of whole rotation windows elapsed at `now`.
pub fn rotation_bucket(now: SystemTime) -> u128 {
    now.duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() / ROTATION_WINDOW_MS)
        .unwrap_or(0)
}

/// Sort `entries` in place.
pub fn sort_entries(entries: &mut [&FlatIndexEntry], mode: SortMode, now: SystemTime) {
    match mode {
        SortMode::Alphabetical => {
            entries.sort_by(|a, b| compare_names(&a.item.name, &b.item.name));
        }
        SortMode::TagDensity => {
            entries.sort_by(|a, b| {
                b.item
                    .tags
                    .len()
                    .cmp(&a.item.tags.len())
                    .then_with(|| compare_names(&a.item.name, &b.item.name))
            });
        }
        SortMode::Discovery => {
            entries.sort_by_key(|e| discovery_hash(&e.item.name));
            if !entries.is_empty() {
                let shift = (rotation_bucket(now) % entries.len() as u128) as usize;
                entries.rotate_left(shift);
            }
        }
    }
}
