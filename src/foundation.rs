//! Shared primitives: geometry re-exports, canvas/frame types and the
//! crate error taxonomy.

pub mod core;
pub mod error;
