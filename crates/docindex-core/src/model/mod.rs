//! Runtime schema descriptors consumed by the index engine.

pub mod field;
pub mod index;
