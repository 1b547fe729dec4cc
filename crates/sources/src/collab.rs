//! Collaborative scoring: an online least-squares fit of the session's
//! ratings against the pretrained item-feature matrix.
//!
//! ## Algorithm
//! 1. Select the feature rows of the session's rated items (X_sel) and
//!    their ratings (y)
//! 2. Fit a weight vector theta by batch gradient descent
//! 3. Score every catalog item as features x theta
//! 4. Drop already-rated items and sort by predicted score
//!
//! The fit is deliberately plain: zero-initialized theta, fixed iteration
//! count, no regularization, no convergence check. The hyperparameters
//! below are part of the model's observable behavior and must not drift
//! from the values the artifacts were validated against.

use crate::error::EngineError;
use crate::types::{RatingProfile, ScoreSource, ScoredItem};
use data_loader::ModelBundle;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Gradient-descent step size
pub const LEARNING_RATE: f64 = 0.001;

/// Fixed number of batch gradient-descent iterations
pub const FIT_ITERATIONS: usize = 4000;

/// Per-session preference model over the shared feature matrix.
#[derive(Clone)]
pub struct CollabSource {
    /// Shared reference to the loaded artifacts (read-only)
    bundle: Arc<ModelBundle>,
}

impl CollabSource {
    pub fn new(bundle: Arc<ModelBundle>) -> Self {
        Self { bundle }
    }

    /// Fit theta on the profile's entries.
    ///
    /// Requires at least one rating.
    fn fit(&self, profile: &RatingProfile) -> Result<Vec<f64>, EngineError> {
        let entries = profile.entries();
        if entries.is_empty() {
            return Err(EngineError::NoRatings);
        }

        let features = self.bundle.features();
        let x_sel: Vec<&[f64]> = entries.iter().map(|e| features.row(e.item)).collect();
        let y: Vec<f64> = entries.iter().map(|e| e.rating).collect();

        Ok(gradient_descent(&x_sel, &y, features.cols()))
    }

    /// Fit on the session's ratings, then score every unrated catalog item.
    ///
    /// Returns items sorted by predicted score descending; equal scores
    /// keep catalog order so repeated calls on the same profile produce
    /// identical output.
    #[instrument(skip(self, profile), fields(rated = profile.len()))]
    pub fn fit_and_score(&self, profile: &RatingProfile) -> Result<Vec<ScoredItem>, EngineError> {
        let theta = self.fit(profile)?;
        let features = self.bundle.features();

        let mut scored: Vec<ScoredItem> = (0..features.rows())
            .into_par_iter()
            .map(|item| {
                ScoredItem::new(item, ScoreSource::Collab, dot(features.row(item), &theta))
            })
            .collect();

        scored.retain(|s| !profile.is_rated(s.item));
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.item.cmp(&b.item))
        });

        debug!("Scored {} unrated items", scored.len());
        Ok(scored)
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Batch gradient descent for unregularized least squares:
/// theta <- theta - (alpha / m) * X^T (X theta - y)
fn gradient_descent(x: &[&[f64]], y: &[f64], n_features: usize) -> Vec<f64> {
    let m = y.len() as f64;
    let mut theta = vec![0.0; n_features];
    let mut residual = vec![0.0; y.len()];

    for _ in 0..FIT_ITERATIONS {
        for (i, row) in x.iter().enumerate() {
            residual[i] = dot(row, &theta) - y[i];
        }
        for (j, t) in theta.iter_mut().enumerate() {
            let grad: f64 = x.iter().zip(&residual).map(|(row, r)| row[j] * r).sum();
            *t -= LEARNING_RATE / m * grad;
        }
    }
    theta
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{Catalog, Item, Matrix, ModelBundle};

    fn test_bundle() -> Arc<ModelBundle> {
        let items = (0..4)
            .map(|i| Item {
                title: format!("Movie {i}"),
                genres: vec![],
            })
            .collect();

        // Two orthogonal "taste" axes.
        let features = Matrix::from_vec(
            4,
            2,
            vec![
                1.0, 0.0, //
                0.0, 1.0, //
                1.0, 0.0, //
                0.5, 0.5,
            ],
        )
        .unwrap();

        let mut sim = vec![0.0; 16];
        for i in 0..4 {
            sim[i * 4 + i] = 1.0;
        }
        let similarity = Matrix::from_vec(4, 4, sim).unwrap();

        Arc::new(ModelBundle::new(Catalog::new(items), features, similarity).unwrap())
    }

    #[test]
    fn gradient_descent_recovers_linear_weights() {
        // y = 2x, single feature
        let rows: Vec<&[f64]> = vec![&[1.0], &[2.0]];
        let theta = gradient_descent(&rows, &[2.0, 4.0], 1);
        assert!((theta[0] - 2.0).abs() < 1e-3);
    }

    #[test]
    fn empty_profile_is_rejected() {
        let collab = CollabSource::new(test_bundle());
        let profile = RatingProfile::new(4);
        assert!(matches!(
            collab.fit_and_score(&profile),
            Err(EngineError::NoRatings)
        ));
    }

    #[test]
    fn scores_follow_the_rated_taste_axis() {
        let collab = CollabSource::new(test_bundle());
        let mut profile = RatingProfile::new(4);
        profile.insert(0, "Movie 0", 5.0).unwrap();

        let scored = collab.fit_and_score(&profile).unwrap();

        // Item 2 shares item 0's feature vector and must rank first;
        // item 1 is orthogonal to the rated axis and lands near zero.
        assert_eq!(scored[0].item, 2);
        assert!(scored[0].score > 4.0);
        let item1 = scored.iter().find(|s| s.item == 1).unwrap();
        assert!(item1.score.abs() < 1e-6);
    }

    #[test]
    fn rated_items_are_excluded() {
        let collab = CollabSource::new(test_bundle());
        let mut profile = RatingProfile::new(4);
        profile.insert(0, "Movie 0", 5.0).unwrap();
        profile.insert(3, "Movie 3", 1.0).unwrap();

        let scored = collab.fit_and_score(&profile).unwrap();
        let items: Vec<_> = scored.iter().map(|s| s.item).collect();
        assert!(!items.contains(&0));
        assert!(!items.contains(&3));
        assert_eq!(scored.len(), 2);
    }

    #[test]
    fn fit_is_deterministic() {
        let collab = CollabSource::new(test_bundle());
        let mut profile = RatingProfile::new(4);
        profile.insert(0, "Movie 0", 5.0).unwrap();
        profile.insert(1, "Movie 1", 2.0).unwrap();

        let first = collab.fit_and_score(&profile).unwrap();
        let second = collab.fit_and_score(&profile).unwrap();

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.item, b.item);
            assert_eq!(a.score, b.score);
        }
    }
}
