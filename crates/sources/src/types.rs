//! Shared types for the score sources.
//!
//! `RatingProfile` is the per-session state: a dense rating vector over the
//! whole catalog (0.0 means unrated) plus the ordered list of entries as
//! they were added. The first entry seeds the content-based query, so
//! insertion order matters.

use crate::error::EngineError;
use data_loader::ItemIndex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Which scorer produced a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreSource {
    /// Similarity-matrix neighbour of the session's seed item
    Content,
    /// Predicted by the per-session preference fit
    Collab,
    /// Weighted combination of the two
    Hybrid,
}

/// An item with a score attached, still keyed by catalog index.
/// Titles are resolved at the edge, not here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    pub item: ItemIndex,
    pub source: ScoreSource,
    pub score: f64,
}

impl ScoredItem {
    pub fn new(item: ItemIndex, source: ScoreSource, score: f64) -> Self {
        Self {
            item,
            source,
            score,
        }
    }
}

/// One rating as the caller added it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingEntry {
    pub item: ItemIndex,
    pub title: String,
    pub rating: f64,
}

/// Accumulated ratings for one session.
///
/// Ephemeral by design: created empty, mutated by insert/reset, never
/// persisted. The entry list is the source of truth for what was added;
/// the dense vector is the fit's view of the same data.
#[derive(Debug, Clone)]
pub struct RatingProfile {
    ratings: Vec<f64>,
    entries: Vec<RatingEntry>,
    rated: HashSet<ItemIndex>,
}

impl RatingProfile {
    pub fn new(n_items: usize) -> Self {
        Self {
            ratings: vec![0.0; n_items],
            entries: Vec::new(),
            rated: HashSet::new(),
        }
    }

    pub fn n_items(&self) -> usize {
        self.ratings.len()
    }

    /// Record a rating for an item.
    ///
    /// `item` must be a valid catalog index (callers resolve titles through
    /// the catalog first). Rejects out-of-range values and duplicates; a
    /// duplicate leaves the stored rating untouched.
    pub fn insert(&mut self, item: ItemIndex, title: &str, rating: f64) -> Result<(), EngineError> {
        debug_assert!(item < self.ratings.len(), "item index out of catalog range");

        if !(0.0..=5.0).contains(&rating) {
            return Err(EngineError::RatingOutOfRange { value: rating });
        }
        if let Some(existing) = self.entries.iter().find(|e| e.item == item) {
            return Err(EngineError::AlreadyRated {
                title: existing.title.clone(),
            });
        }

        self.ratings[item] = rating;
        self.rated.insert(item);
        self.entries.push(RatingEntry {
            item,
            title: title.to_string(),
            rating,
        });
        Ok(())
    }

    /// Clear all ratings unconditionally.
    pub fn reset(&mut self) {
        self.ratings.fill(0.0);
        self.entries.clear();
        self.rated.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The first item ever added in this session, if any.
    pub fn seed(&self) -> Option<ItemIndex> {
        self.entries.first().map(|e| e.item)
    }

    pub fn is_rated(&self, item: ItemIndex) -> bool {
        self.rated.contains(&item)
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[RatingEntry] {
        &self.entries
    }

    /// Dense view: one slot per catalog item, 0.0 for unrated.
    pub fn ratings(&self) -> &[f64] {
        &self.ratings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_accepts_inclusive_bounds() {
        let mut profile = RatingProfile::new(10);
        profile.insert(0, "A", 0.0).unwrap();
        profile.insert(1, "B", 5.0).unwrap();
        assert_eq!(profile.len(), 2);
        assert_eq!(profile.ratings()[1], 5.0);
    }

    #[test]
    fn insert_rejects_out_of_range() {
        let mut profile = RatingProfile::new(10);
        assert!(matches!(
            profile.insert(0, "A", -0.1),
            Err(EngineError::RatingOutOfRange { .. })
        ));
        assert!(matches!(
            profile.insert(0, "A", 5.1),
            Err(EngineError::RatingOutOfRange { .. })
        ));
        assert!(profile.is_empty());
    }

    #[test]
    fn duplicate_insert_keeps_first_rating() {
        let mut profile = RatingProfile::new(10);
        profile.insert(3, "Heat (1995)", 4.0).unwrap();

        let result = profile.insert(3, "heat (1995)", 1.0);
        assert!(matches!(result, Err(EngineError::AlreadyRated { .. })));
        assert_eq!(profile.ratings()[3], 4.0);
        assert_eq!(profile.len(), 1);
    }

    #[test]
    fn seed_is_first_added_item() {
        let mut profile = RatingProfile::new(10);
        assert_eq!(profile.seed(), None);
        profile.insert(7, "A", 2.0).unwrap();
        profile.insert(2, "B", 5.0).unwrap();
        assert_eq!(profile.seed(), Some(7));
    }

    #[test]
    fn reset_clears_everything() {
        let mut profile = RatingProfile::new(4);
        profile.insert(1, "A", 3.0).unwrap();
        profile.reset();

        assert!(profile.is_empty());
        assert_eq!(profile.seed(), None);
        assert!(!profile.is_rated(1));
        assert_eq!(profile.ratings(), &[0.0; 4]);
    }

    #[test]
    fn zero_rating_still_counts_as_rated() {
        let mut profile = RatingProfile::new(4);
        profile.insert(2, "A", 0.0).unwrap();
        assert!(profile.is_rated(2));
        assert_eq!(profile.entries()[0].rating, 0.0);
    }
}
