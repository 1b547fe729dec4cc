//! Filter to remove items the session has already rated.
//!
//! The collaborative scorer excludes rated items itself, but content
//! neighbours of the seed can re-introduce them; this filter runs on the
//! blended list so nothing rated ever reaches the caller.

use crate::traits::Filter;
use anyhow::Result;
use sources::{RatingProfile, ScoredItem};

/// Removes scored items present in the profile's rated set.
pub struct AlreadyRatedFilter;

impl Filter for AlreadyRatedFilter {
    fn name(&self) -> &str {
        "AlreadyRatedFilter"
    }

    fn apply(&self, items: Vec<ScoredItem>, profile: &RatingProfile) -> Result<Vec<ScoredItem>> {
        let filtered: Vec<ScoredItem> = items
            .into_iter()
            .filter(|scored| !profile.is_rated(scored.item))
            .collect();
        Ok(filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sources::{ScoreSource, ScoredItem};

    #[test]
    fn drops_rated_items_only() {
        let mut profile = RatingProfile::new(10);
        profile.insert(1, "Movie 1", 5.0).unwrap();
        profile.insert(3, "Movie 3", 2.0).unwrap();

        let items = vec![
            ScoredItem::new(0, ScoreSource::Hybrid, 0.9),
            ScoredItem::new(1, ScoreSource::Hybrid, 0.8),
            ScoredItem::new(3, ScoreSource::Hybrid, 0.7),
            ScoredItem::new(4, ScoreSource::Hybrid, 0.6),
        ];

        let filter = AlreadyRatedFilter;
        let filtered = filter.apply(items, &profile).unwrap();

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].item, 0);
        assert_eq!(filtered[1].item, 4);
    }

    #[test]
    fn empty_profile_passes_everything_through() {
        let profile = RatingProfile::new(10);
        let items = vec![ScoredItem::new(0, ScoreSource::Hybrid, 0.9)];

        let filtered = AlreadyRatedFilter.apply(items.clone(), &profile).unwrap();
        assert_eq!(filtered, items);
    }
}
