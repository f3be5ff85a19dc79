//! CLI argument parsing using clap.

use std::path::PathBuf;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Parser, Subcommand,
};

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

#[derive(Parser, Debug)]
#[command(name = "codescribe", version, about = "In-memory codebase indexing engine", styles = clap_cargo_style())]
pub struct Cli {
    /// Path to a codescribe.toml config file (overrides ./codescribe.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default codescribe.toml in the current directory.
    Init {
        /// Overwrite an existing config file.
        #[arg(long)]
        force: bool,
    },
    /// Build a full index over one or more paths.
    Index {
        /// Workspace root paths to index (defaults to the current directory).
        paths: Vec<PathBuf>,
        /// Extra directory basenames to exclude, beyond the built-in default set.
        #[arg(long = "exclude")]
        excluded: Vec<String>,
    },
    /// Re-index the current directory (always a full index — a one-shot
    /// process keeps no prior index to update incrementally).
    Reindex,
    /// Ranked symbol search.
    Find {
        query: String,
        #[arg(long)]
        kind: Option<String>,
    },
    /// Render one file's outline.
    Outline { path: String },
    /// Render the project's directory tree.
    Tree {
        #[arg(long, default_value_t = 6)]
        max_depth: u32,
        #[arg(long, default_value_t = 200)]
        max_files: usize,
    },
    /// Print index-wide statistics.
    Stats,
    /// Find references to a symbol by name.
    Refs {
        name: String,
        #[arg(long, default_value_t = 100)]
        limit: usize,
    },
    /// Show a file's import graph (imports and importers).
    Deps { path: String },
    /// List files matching a glob pattern.
    Glob {
        pattern: String,
        #[arg(long, default_value_t = 200)]
        limit: usize,
    },
    /// Invoke a named facade tool directly, printing its event pair as JSON.
    Tool {
        name: String,
        /// Repeatable `key=value` argument, e.g. `--arg query=greet`.
        #[arg(long = "arg")]
        args: Vec<String>,
    },
}
