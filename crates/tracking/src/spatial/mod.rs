//! Spatial indexing and query helpers.

pub mod index;
pub mod queries;

pub use index::StopNode;
