//! Core domain types for the recommendation artifacts.
//!
//! The item universe is fixed at load time: the catalog gives each item a
//! positional index, and that index is the key into both matrices. Titles
//! are only ever resolved to an index at the boundary; everything past the
//! catalog speaks `ItemIndex`.

use crate::error::{DataLoadError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Positional identifier of an item: its row in the catalog, the feature
/// matrix, and the similarity matrix.
pub type ItemIndex = usize;

/// A catalog entry. Immutable after load; there is no item CRUD.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub title: String,
    /// Free-form genre tags, as exported by the training pipeline
    pub genres: Vec<String>,
}

/// Canonical form used for title lookup: trimmed and lowercased.
pub fn normalize_title(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// The ordered item catalog plus a normalized-title lookup index.
#[derive(Debug)]
pub struct Catalog {
    items: Vec<Item>,
    title_index: HashMap<String, ItemIndex>,
}

impl Catalog {
    pub fn new(items: Vec<Item>) -> Self {
        let mut title_index = HashMap::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            // First occurrence wins when two items normalize to one title.
            title_index
                .entry(normalize_title(&item.title))
                .or_insert(idx);
        }
        Self { items, title_index }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, idx: ItemIndex) -> Option<&Item> {
        self.items.get(idx)
    }

    pub fn title(&self, idx: ItemIndex) -> Option<&str> {
        self.items.get(idx).map(|item| item.title.as_str())
    }

    /// Resolve a user-supplied title to its catalog index.
    ///
    /// Matching is exact after normalization (trim + lowercase).
    pub fn resolve(&self, title: &str) -> Option<ItemIndex> {
        self.title_index.get(&normalize_title(title)).copied()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.title.as_str())
    }
}

/// Dense row-major `f64` matrix.
///
/// Used for both the item-feature matrix (|items| x d) and the similarity
/// matrix (|items| x |items|). Read-only after load.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Build a matrix from a flat row-major buffer.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(DataLoadError::DimensionMismatch {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Borrow row `i` as a slice.
    ///
    /// # Panics
    /// Panics if `i >= rows`; callers index with catalog-validated indices.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.cols + j]
    }
}
