//! The recommendation error taxonomy.
//!
//! Every failure here is local, synchronous and non-retryable; the caller
//! (CLI, harness, or an HTTP layer) maps the variant to its own error
//! surface. The core carries no transport awareness.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// No catalog item matched the supplied title (after trim + lowercase)
    #[error("no catalog item matches title {title:?}")]
    UnknownTitle { title: String },

    /// Rating outside the inclusive [0, 5] range
    #[error("rating {value} is outside the allowed range [0, 5]")]
    RatingOutOfRange { value: f64 },

    /// The item was already rated in this session; the stored rating is kept
    #[error("{title:?} was already rated in this session")]
    AlreadyRated { title: String },

    /// Scoring was requested before any rating was added
    #[error("no ratings recorded in this session yet")]
    NoRatings,

    /// A scoring stage failed internally (e.g. a worker task died)
    #[error("scoring failed: {0}")]
    ScoringFailed(String),
}
