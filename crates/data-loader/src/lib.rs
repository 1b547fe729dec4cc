//! # Data Loader Crate
//!
//! Loads the pretrained recommendation artifacts into memory and validates
//! them against each other.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Item, Catalog, Matrix, ItemIndex)
//! - **parser**: Parse the plain-text artifact files
//! - **bundle**: Assemble and shape-check the [`ModelBundle`]
//! - **error**: Error types for loading and validation
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::ModelBundle;
//! use std::path::Path;
//!
//! let bundle = ModelBundle::load_from_files(Path::new("data/model"))?;
//!
//! let idx = bundle.catalog().resolve("Toy Story (1995)").unwrap();
//! let neighbours = bundle.similarity().row(idx);
//! ```

// Public modules
pub mod bundle;
pub mod error;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use bundle::ModelBundle;
pub use error::{DataLoadError, Result};
pub use types::{Catalog, Item, ItemIndex, Matrix, normalize_title};
