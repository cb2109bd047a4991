//! Module: schema
//! Responsibility: per-type index trees scanned from field annotations, and
//! the process-wide cache that builds each tree once.
//! Does not own: index-key derivation or mutation planning.
//!
//! Invariants:
//! - A tree is immutable once cached.
//! - Index order is the order each index name is first declared.

mod cache;
mod tree;


pub use cache::{SchemaCache, tree_for};
pub use tree::{INDEX_TAG, IndexTree, UNIQUE_TAG};
