//! Index and reindex commands.

use std::path::PathBuf;

use crate::config::Settings;
use crate::indexing::IndexCore;

pub fn run_index(settings: &Settings, paths: Vec<PathBuf>, excluded: Vec<String>) {
    let paths = if paths.is_empty() { vec![PathBuf::from(".")] } else { paths };
    let mut all_excluded = settings.indexing.excluded_dirs.clone();
    all_excluded.extend(excluded);

    let core = IndexCore::new(settings);
    let summary = core.index_workspace(&paths, &all_excluded);
    println!(
        "indexed {} file(s), {} symbol(s) in {} ms",
        summary.files_scanned, summary.symbols_extracted, summary.duration_ms
    );
}

/// A one-shot process has no prior in-memory index to update incrementally,
/// so `reindex` from the CLI is always a full index over the current
/// directory — incremental updates only apply to a long-lived facade.
pub fn run_reindex(settings: &Settings) {
    run_index(settings, Vec::new(), Vec::new());
}
