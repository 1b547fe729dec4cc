//! The loaded model bundle: catalog + feature matrix + similarity matrix.
//!
//! Loaded once at process start and shared read-only for the process
//! lifetime. Shape consistency between the three artifacts is validated
//! here; a mismatch is a fatal startup error.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::{Catalog, Matrix};
use std::path::Path;
use tracing::info;

/// Everything the scorers need, validated for dimensional consistency:
/// `features` is |items| x d with d >= 1 and `similarity` is
/// |items| x |items|.
#[derive(Debug)]
pub struct ModelBundle {
    catalog: Catalog,
    features: Matrix,
    similarity: Matrix,
}

impl ModelBundle {
    /// Assemble a bundle from already-parsed parts, validating shapes.
    pub fn new(catalog: Catalog, features: Matrix, similarity: Matrix) -> Result<Self> {
        let n = catalog.len();
        if n == 0 {
            return Err(DataLoadError::EmptyCatalog);
        }
        if features.rows() != n {
            return Err(DataLoadError::RowCountMismatch {
                artifact: "feature matrix",
                expected: n,
                found: features.rows(),
            });
        }
        if features.cols() == 0 {
            return Err(DataLoadError::EmptyFeatures);
        }
        if similarity.rows() != n || similarity.cols() != n {
            return Err(DataLoadError::NotSquare {
                expected: n,
                rows: similarity.rows(),
                cols: similarity.cols(),
            });
        }
        Ok(Self {
            catalog,
            features,
            similarity,
        })
    }

    /// Load all three artifacts from a directory.
    ///
    /// Expects `catalog.dat`, `features.dat` and `similarity.dat`. The two
    /// matrix files dominate load time, so they parse in parallel.
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        info!("Loading model artifacts from {}", data_dir.display());

        let catalog_path = data_dir.join("catalog.dat");
        let features_path = data_dir.join("features.dat");
        let similarity_path = data_dir.join("similarity.dat");

        let (items, (features, similarity)) = rayon::join(
            || parser::parse_catalog(&catalog_path),
            || {
                rayon::join(
                    || parser::parse_matrix(&features_path),
                    || parser::parse_matrix(&similarity_path),
                )
            },
        );

        let items = items?;
        let features = features?;
        let similarity = similarity?;

        info!(
            "Loaded {} items, {}-dim features, {}x{} similarity",
            items.len(),
            features.cols(),
            similarity.rows(),
            similarity.cols()
        );

        Self::new(Catalog::new(items), features, similarity)
    }

    pub fn n_items(&self) -> usize {
        self.catalog.len()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn features(&self) -> &Matrix {
        &self.features
    }

    pub fn similarity(&self) -> &Matrix {
        &self.similarity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Item;

    fn items(n: usize) -> Vec<Item> {
        (0..n)
            .map(|i| Item {
                title: format!("Movie {i}"),
                genres: vec![],
            })
            .collect()
    }

    fn square(n: usize) -> Matrix {
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            data[i * n + i] = 1.0;
        }
        Matrix::from_vec(n, n, data).unwrap()
    }

    #[test]
    fn accepts_consistent_shapes() {
        let bundle = ModelBundle::new(
            Catalog::new(items(3)),
            Matrix::from_vec(3, 2, vec![0.0; 6]).unwrap(),
            square(3),
        )
        .unwrap();
        assert_eq!(bundle.n_items(), 3);
    }

    #[test]
    fn rejects_feature_row_mismatch() {
        let result = ModelBundle::new(
            Catalog::new(items(3)),
            Matrix::from_vec(2, 2, vec![0.0; 4]).unwrap(),
            square(3),
        );
        assert!(matches!(
            result,
            Err(DataLoadError::RowCountMismatch {
                expected: 3,
                found: 2,
                ..
            })
        ));
    }

    #[test]
    fn rejects_non_square_similarity() {
        let result = ModelBundle::new(
            Catalog::new(items(3)),
            Matrix::from_vec(3, 2, vec![0.0; 6]).unwrap(),
            Matrix::from_vec(3, 2, vec![0.0; 6]).unwrap(),
        );
        assert!(matches!(result, Err(DataLoadError::NotSquare { .. })));
    }

    #[test]
    fn rejects_empty_catalog() {
        let result = ModelBundle::new(
            Catalog::new(vec![]),
            Matrix::from_vec(0, 0, vec![]).unwrap(),
            Matrix::from_vec(0, 0, vec![]).unwrap(),
        );
        assert!(matches!(result, Err(DataLoadError::EmptyCatalog)));
    }

    #[test]
    fn rejects_zero_width_features() {
        let result = ModelBundle::new(
            Catalog::new(items(2)),
            Matrix::from_vec(2, 0, vec![]).unwrap(),
            square(2),
        );
        assert!(matches!(result, Err(DataLoadError::EmptyFeatures)));
    }
}
