//! Parsers for the exported model artifacts.
//!
//! Three plain-text files, one record per line:
//! - catalog.dat: `title::genres` with pipe-separated genres (may be empty)
//! - features.dat: one row of whitespace-separated floats per item
//! - similarity.dat: |items| rows of |items| whitespace-separated floats
//!
//! Line number equals the item's catalog index, so file order is load-bearing.

use crate::error::{DataLoadError, Result};
use crate::types::{Item, Matrix};
use std::fs;
use std::path::Path;

/// Parse the catalog file.
pub fn parse_catalog(path: &Path) -> Result<Vec<Item>> {
    let content = fs::read_to_string(path)?;
    parse_catalog_str(&content, &path.display().to_string())
}

fn parse_catalog_str(content: &str, file: &str) -> Result<Vec<Item>> {
    let mut items = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (title, genres_str) =
            line.split_once("::")
                .ok_or_else(|| DataLoadError::ParseError {
                    file: file.to_string(),
                    line: line_no,
                    reason: "missing '::' separator between title and genres".to_string(),
                })?;

        let title = title.trim();
        if title.is_empty() {
            return Err(DataLoadError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: "empty title".to_string(),
            });
        }

        let genres = genres_str
            .split('|')
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(str::to_string)
            .collect();

        items.push(Item {
            title: title.to_string(),
            genres,
        });
    }

    Ok(items)
}

/// Parse a dense matrix file, one whitespace-separated row per line.
///
/// All rows must share the width of the first row.
pub fn parse_matrix(path: &Path) -> Result<Matrix> {
    let content = fs::read_to_string(path)?;
    parse_matrix_str(&content, &path.display().to_string())
}

fn parse_matrix_str(content: &str, file: &str) -> Result<Matrix> {
    let mut data: Vec<f64> = Vec::new();
    let mut rows = 0usize;
    let mut cols: Option<usize> = None;

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut width = 0usize;
        for token in line.split_whitespace() {
            let value: f64 = token.parse().map_err(|e| DataLoadError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: format!("invalid float {token:?}: {e}"),
            })?;
            data.push(value);
            width += 1;
        }

        match cols {
            None => cols = Some(width),
            Some(expected) if expected != width => {
                return Err(DataLoadError::RaggedRow {
                    file: file.to_string(),
                    line: line_no,
                    expected,
                    found: width,
                });
            }
            Some(_) => {}
        }
        rows += 1;
    }

    Matrix::from_vec(rows, cols.unwrap_or(0), data)
}
