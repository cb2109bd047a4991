//! Shared helpers for docindex: field annotation parsing, stable hashing
//! primitives and identifier casing.

pub mod case;
pub mod hash;
pub mod tag;
