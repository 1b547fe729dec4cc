//! The FilterPipeline chains multiple filters.

use crate::traits::Filter;
use anyhow::Result;
use sources::{RatingProfile, ScoredItem};

/// Chains filters into a processing pipeline, applied in insertion order.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new().add_filter(AlreadyRatedFilter);
/// let filtered = pipeline.apply(items, &profile)?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Apply all filters in sequence.
    pub fn apply(
        &self,
        items: Vec<ScoredItem>,
        profile: &RatingProfile,
    ) -> Result<Vec<ScoredItem>> {
        let mut current = items;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, profile)?;
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        Ok(current)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
