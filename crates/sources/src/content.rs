//! Content-based scoring over the precomputed similarity matrix.
//!
//! Answers "top-k most similar items" for a seed item. The similarity
//! matrix is symmetric in practice but nothing here relies on that.

use crate::types::{ScoreSource, ScoredItem};
use data_loader::{ItemIndex, ModelBundle};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Ranks catalog items by their precomputed similarity to a seed item.
#[derive(Clone)]
pub struct ContentSource {
    /// Shared reference to the loaded artifacts (read-only)
    bundle: Arc<ModelBundle>,
}

impl ContentSource {
    pub fn new(bundle: Arc<ModelBundle>) -> Self {
        Self { bundle }
    }

    /// Top-k neighbours of `seed`, sorted by similarity descending.
    ///
    /// The seed's row scores the seed itself as well; it is dropped by
    /// identity, so the result length is always `min(k, n_items - 1)`.
    /// Ties keep original catalog order (stable sort).
    #[instrument(skip(self))]
    pub fn similar_to(&self, seed: ItemIndex, k: usize) -> Vec<ScoredItem> {
        let row = self.bundle.similarity().row(seed);

        let mut neighbours: Vec<ScoredItem> = row
            .iter()
            .enumerate()
            .filter(|(item, _)| *item != seed)
            .map(|(item, &score)| ScoredItem::new(item, ScoreSource::Content, score))
            .collect();

        neighbours.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        neighbours.truncate(k);

        debug!(
            "Selected {} content neighbours for item {}",
            neighbours.len(),
            seed
        );
        neighbours
    }
}
