//! # Sources Crate
//!
//! Score sources for the hybrid movie recommender.
//!
//! ## Components
//!
//! ### Content Source
//! Precomputed item-item similarity lookup:
//! - "Movies like the one you rated first"
//! - Top-k neighbours of a seed item from the similarity matrix
//!
//! ### Collab Source
//! Per-session preference model:
//! - Fits a linear weight vector to the session's ratings against the
//!   shared item-feature matrix (batch gradient descent)
//! - Predicts a score for every unrated catalog item
//!
//! ### Cold-Start Source
//! Genre-preference sampling for sessions with no ratings yet.
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{CollabSource, ContentSource, RatingProfile};
//! use data_loader::ModelBundle;
//! use std::sync::Arc;
//!
//! let bundle = Arc::new(ModelBundle::load_from_files("data/model".as_ref())?);
//!
//! let mut profile = RatingProfile::new(bundle.n_items());
//! let idx = bundle.catalog().resolve("Toy Story (1995)").unwrap();
//! profile.insert(idx, "Toy Story (1995)", 5.0)?;
//!
//! let collab = CollabSource::new(bundle.clone());
//! let content = ContentSource::new(bundle.clone());
//!
//! let predicted = collab.fit_and_score(&profile)?;
//! let neighbours = content.similar_to(profile.seed().unwrap(), 10);
//! ```

// Public modules
pub mod coldstart;
pub mod collab;
pub mod content;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use coldstart::ColdStartSource;
pub use collab::{CollabSource, FIT_ITERATIONS, LEARNING_RATE};
pub use content::ContentSource;
pub use error::EngineError;
pub use types::{RatingEntry, RatingProfile, ScoreSource, ScoredItem};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scored_item_creation() {
        let scored = ScoredItem::new(3, ScoreSource::Content, 0.85);
        assert_eq!(scored.item, 3);
        assert_eq!(scored.source, ScoreSource::Content);
        assert_eq!(scored.score, 0.85);
    }

    #[test]
    fn fit_constants_are_pinned() {
        // Part of the observable model contract, not tunables.
        assert_eq!(LEARNING_RATE, 0.001);
        assert_eq!(FIT_ITERATIONS, 4000);
    }
}
