//! Command implementations, one module per CLI subcommand group.

mod index;
mod init;
mod query;
mod tool;

use std::path::PathBuf;

use crate::cli::args::{Cli, Commands};
use crate::config::Settings;
use crate::indexing::IndexCore;

/// Runs the parsed command against `settings`, exiting the process on
/// unrecoverable errors the way a one-shot CLI does.
pub fn dispatch(cli: Cli, settings: Settings) {
    match cli.command {
        Commands::Init { force } => init::run_init(force),
        Commands::Index { paths, excluded } => index::run_index(&settings, paths, excluded),
        Commands::Reindex => index::run_reindex(&settings),
        Commands::Find { query, kind } => query::run_find(&settings, &query, kind.as_deref()),
        Commands::Outline { path } => query::run_outline(&settings, &path),
        Commands::Tree { max_depth, max_files } => query::run_tree(&settings, max_depth, max_files),
        Commands::Stats => query::run_stats(&settings),
        Commands::Refs { name, limit } => query::run_refs(&settings, &name, limit),
        Commands::Deps { path } => query::run_deps(&settings, &path),
        Commands::Glob { pattern, limit } => query::run_glob(&settings, &pattern, limit),
        Commands::Tool { name, args } => tool::run_tool(&settings, &name, args),
    }
}

/// Builds a core and runs a full index over the current directory — the
/// shared starting point for every read-only query command, since this
/// engine keeps no index on disk between CLI invocations.
fn build_indexed_core(settings: &Settings) -> IndexCore {
    let core = IndexCore::new(settings);
    let root = PathBuf::from(".");
    core.index_workspace(&[root], &settings.indexing.excluded_dirs);
    core
}
