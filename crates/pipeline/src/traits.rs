//! Core traits for the result-filtering pipeline.

use anyhow::Result;
use sources::{RatingProfile, ScoredItem};

/// A composable filter over scored items.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be used in concurrent contexts
/// - Filters take ownership of the Vec and return a filtered Vec, so
///   passthrough stages cost nothing
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of scored items.
    ///
    /// # Arguments
    /// * `items` - The scored items to filter (takes ownership)
    /// * `profile` - The session's rating state
    fn apply(&self, items: Vec<ScoredItem>, profile: &RatingProfile) -> Result<Vec<ScoredItem>>;
}
