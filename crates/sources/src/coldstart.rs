//! Cold-start discovery for sessions with no ratings yet.
//!
//! When there is nothing to fit, recommendations fall back to sampling the
//! catalog filtered by the caller's declared genre preferences. No scores
//! are involved; the point is variety, not ranking.

use data_loader::{ItemIndex, ModelBundle};
use rand::Rng;
use rand::seq::IndexedRandom;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Samples preference-matching items for callers without rating history.
#[derive(Clone)]
pub struct ColdStartSource {
    bundle: Arc<ModelBundle>,
}

impl ColdStartSource {
    pub fn new(bundle: Arc<ModelBundle>) -> Self {
        Self { bundle }
    }

    /// Sample up to `n` catalog items whose genre list intersects
    /// `preferred` (case-insensitive). With no preferences, the whole
    /// catalog is the candidate pool.
    pub fn sample(&self, preferred: &[String], n: usize) -> Vec<ItemIndex> {
        self.sample_with(preferred, n, &mut rand::rng())
    }

    /// Like [`sample`](Self::sample) but with a caller-supplied RNG.
    #[instrument(skip(self, rng))]
    pub fn sample_with<R: Rng + ?Sized>(
        &self,
        preferred: &[String],
        n: usize,
        rng: &mut R,
    ) -> Vec<ItemIndex> {
        let wanted: Vec<String> = preferred.iter().map(|g| g.trim().to_lowercase()).collect();

        let candidates: Vec<ItemIndex> = self
            .bundle
            .catalog()
            .items()
            .iter()
            .enumerate()
            .filter(|(_, item)| {
                wanted.is_empty()
                    || item
                        .genres
                        .iter()
                        .any(|g| wanted.contains(&g.trim().to_lowercase()))
            })
            .map(|(idx, _)| idx)
            .collect();

        let picked: Vec<ItemIndex> = candidates.choose_multiple(rng, n).copied().collect();
        debug!(
            "Sampled {} of {} genre-matching candidates",
            picked.len(),
            candidates.len()
        );
        picked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{Catalog, Item, Matrix, ModelBundle};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn test_bundle() -> Arc<ModelBundle> {
        let items = vec![
            Item {
                title: "Movie 0".to_string(),
                genres: vec!["Action".to_string()],
            },
            Item {
                title: "Movie 1".to_string(),
                genres: vec!["Drama".to_string()],
            },
            Item {
                title: "Movie 2".to_string(),
                genres: vec!["Action".to_string(), "Comedy".to_string()],
            },
            Item {
                title: "Movie 3".to_string(),
                genres: vec![],
            },
        ];

        let features = Matrix::from_vec(4, 1, vec![0.0; 4]).unwrap();
        let mut sim = vec![0.0; 16];
        for i in 0..4 {
            sim[i * 4 + i] = 1.0;
        }
        let similarity = Matrix::from_vec(4, 4, sim).unwrap();

        Arc::new(ModelBundle::new(Catalog::new(items), features, similarity).unwrap())
    }

    #[test]
    fn respects_genre_preferences() {
        let source = ColdStartSource::new(test_bundle());
        let mut rng = StdRng::seed_from_u64(7);

        let picked = source.sample_with(&["action".to_string()], 10, &mut rng);
        let mut sorted = picked.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 2]);
    }

    #[test]
    fn no_preferences_samples_whole_catalog() {
        let source = ColdStartSource::new(test_bundle());
        let mut rng = StdRng::seed_from_u64(7);

        let picked = source.sample_with(&[], 4, &mut rng);
        assert_eq!(picked.len(), 4);
    }

    #[test]
    fn unknown_genre_yields_nothing() {
        let source = ColdStartSource::new(test_bundle());
        let mut rng = StdRng::seed_from_u64(7);

        let picked = source.sample_with(&["Western".to_string()], 5, &mut rng);
        assert!(picked.is_empty());
    }

    #[test]
    fn sample_size_is_capped_by_candidates() {
        let source = ColdStartSource::new(test_bundle());
        let mut rng = StdRng::seed_from_u64(7);

        let picked = source.sample_with(&["Drama".to_string()], 5, &mut rng);
        assert_eq!(picked, vec![1]);
    }
}
