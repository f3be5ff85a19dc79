//! In-memory codebase indexing engine: classifies source files, extracts
//! symbols and imports with per-language regex extractors, and serves
//! ranked search, semantic grep, and structural queries over the result.

pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod facade;
pub mod file_tree;
pub mod indexing;
pub mod logging;
pub mod parsing;
pub mod regex_toolkit;
pub mod symbol;
pub mod types;
pub mod utils;

pub use config::Settings;
pub use error::{ErrorContext, IndexError, IndexResult};
pub use facade::{ToolEvent, ToolFacade, ToolStatus};
pub use file_tree::{FileNode, FileNodeKind};
pub use indexing::{IncrementalSummary, IndexCore, IndexStatus, IndexSummary};
pub use parsing::{ExtractorContext, IndexedFile};
pub use symbol::IndexedSymbol;
pub use types::{AccessLevel, Language, SymbolKind};
