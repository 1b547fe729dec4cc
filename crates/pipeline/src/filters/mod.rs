//! Built-in filters.

pub mod already_rated;

pub use already_rated::AlreadyRatedFilter;
