//! The indexing engine: a single-writer, in-memory store (`core`) and the
//! read-only query surface over it (`query`).

mod core;
mod query;

pub use core::{IncrementalSummary, IndexCore, IndexStatus, IndexSummary};
pub use query::{
    DependencyGraphEntry, FileMatch, FileOutline, OutlineSymbol, ProjectStats, ReferenceHit, SymbolMatch,
};
