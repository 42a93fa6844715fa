//! Immutable catalog snapshots and their atomic replacement.
//!
//! # Invariants
//! - A [`Snapshot`] is built completely before it is published.
//! - Readers hold an `Arc` and keep a consistent view across a reload.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::index::{build_index, FlatIndex};
use crate::models::{Catalog, Facets};

/// A catalog together with everything derived from it.
#[derive(Debug)]
pub struct Snapshot {
    pub catalog: Catalog,
    pub index: FlatIndex,
    pub facets: Facets,
    /// Where the document came from, for diagnostics.
    pub origin: String,
}

impl Snapshot {
    /// Derive the index and facets from `catalog`.
    pub fn build(catalog: Catalog, origin: impl Into<String>) -> Self {
        let index = build_index(&catalog);
        let facets = index.facets(&catalog);
        Snapshot {
            catalog,
            index,
            facets,
            origin: origin.into(),
        }
    }
}

/// Holder of the current snapshot.
#[derive(Debug)]
pub struct SnapshotStore {
    current: RwLock<Arc<Snapshot>>,
    generation: AtomicU64,
}

impl SnapshotStore {
    pub fn new(initial: Snapshot) -> Self {
        SnapshotStore {
            current: RwLock::new(Arc::new(initial)),
            generation: AtomicU64::new(0),
        }
    }

    /// The snapshot readers should query right now.
    pub fn current(&self) -> Arc<Snapshot> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replace the current snapshot; returns the new generation number.
    pub fn publish(&self, snapshot: Snapshot) -> u64 {
        let next = Arc::new(snapshot);
        let items = next.index.summary.items;
        let generation = {
            let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
            *guard = next;
            self.generation.fetch_add(1, Ordering::SeqCst) + 1
        };
        tracing::info!(generation, items, "published catalog snapshot");
        generation
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}
