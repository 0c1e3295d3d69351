//! `tr-graph` — the directed road-segment graph.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                    |
//! |-----------|-------------------------------------------------------------|
//! | [`graph`] | `SegmentGraph` (CSR + name index), `SegmentGraphBuilder`    |
//! | [`error`] | `GraphError`, `GraphResult<T>`                              |
//!
//! The graph is read-only after construction and shared by reference across
//! every search of an epoch.

pub mod error;
pub mod graph;

#[cfg(test)]
mod tests;

pub use error::{GraphError, GraphResult};
pub use graph::{SegmentGraph, SegmentGraphBuilder};
