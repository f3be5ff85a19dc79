//! `IndexCore`: the single authoritative in-memory store. Owns every lookup
//! map, enforces single-writer discipline via a `parking_lot::Mutex`, and
//! drives full and incremental indexing.
//!
//! `rayon` parallelizes per-file extraction; insertion into the maps stays
//! serialized under the lock, so parallelism is allowed in the read-only
//! extractor pass but never in the maps themselves.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;
use rayon::prelude::*;

use crate::config::{LimitsConfig, Settings};
use crate::file_tree::{self, FileNode};
use crate::parsing::{self, IndexedFile};
use crate::symbol::IndexedSymbol;
use crate::types::{Language, SymbolKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexStatus {
    Idle,
    Indexing,
    Ready,
}

#[derive(Debug, Clone)]
pub struct IndexSummary {
    pub files_scanned: usize,
    pub symbols_extracted: usize,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Default)]
pub struct IncrementalSummary {
    pub updated_files: usize,
}

pub(crate) struct CoreState {
    pub(crate) workspace_paths: Vec<PathBuf>,
    pub(crate) excluded_paths: Vec<String>,
    pub(crate) file_trees: HashMap<String, FileNode>,
    pub(crate) all_file_nodes: HashMap<String, FileNode>,
    pub(crate) indexed_files: HashMap<String, IndexedFile>,
    pub(crate) symbols_by_name: HashMap<String, Vec<IndexedSymbol>>,
    pub(crate) symbols_by_file: HashMap<String, Vec<IndexedSymbol>>,
    pub(crate) symbols_by_kind: HashMap<SymbolKind, Vec<IndexedSymbol>>,
    pub(crate) import_graph: HashMap<String, Vec<String>>,
    pub(crate) reverse_import_graph: HashMap<String, Vec<String>>,
    pub(crate) content_hashes: HashMap<String, u64>,
    pub(crate) total_files_scanned: usize,
    pub(crate) total_symbols_extracted: usize,
    pub(crate) index_duration_ms: u64,
    pub(crate) last_full_index_at: Option<u64>,
    pub(crate) status: IndexStatus,
}

impl CoreState {
    fn new() -> Self {
        Self {
            workspace_paths: Vec::new(),
            excluded_paths: Vec::new(),
            file_trees: HashMap::new(),
            all_file_nodes: HashMap::new(),
            indexed_files: HashMap::new(),
            symbols_by_name: HashMap::new(),
            symbols_by_file: HashMap::new(),
            symbols_by_kind: HashMap::new(),
            import_graph: HashMap::new(),
            reverse_import_graph: HashMap::new(),
            content_hashes: HashMap::new(),
            total_files_scanned: 0,
            total_symbols_extracted: 0,
            index_duration_ms: 0,
            last_full_index_at: None,
            status: IndexStatus::Idle,
        }
    }
}

/// The single authoritative index. `Settings`' limits are read-only after
/// construction; `CoreState` is the mutable part every operation serializes
/// through.
pub struct IndexCore {
    pub(crate) state: Mutex<CoreState>,
    limits: LimitsConfig,
    excluded_dirs: Vec<String>,
    index_threads: usize,
}

impl IndexCore {
    pub fn new(settings: &Settings) -> Self {
        Self {
            state: Mutex::new(CoreState::new()),
            limits: settings.limits.clone(),
            excluded_dirs: settings.indexing.excluded_dirs.clone(),
            index_threads: settings.indexing.index_threads,
        }
    }

    pub(crate) fn limits(&self) -> &LimitsConfig {
        &self.limits
    }

    pub fn status(&self) -> IndexStatus {
        self.state.lock().status
    }

    /// `indexWorkspace`: full rebuild over `paths`, pruning `excluded_paths`
    /// in addition to the engine's default excluded-directory set.
    pub fn index_workspace(&self, paths: &[PathBuf], excluded_paths: &[String]) -> IndexSummary {
        let start = now_ms();
        let mut state = self.state.lock();
        state.status = IndexStatus::Indexing;
        state.workspace_paths = paths.to_vec();
        state.excluded_paths = excluded_paths.to_vec();
        state.file_trees.clear();
        state.all_file_nodes.clear();
        state.indexed_files.clear();
        state.symbols_by_name.clear();
        state.symbols_by_file.clear();
        state.symbols_by_kind.clear();
        state.import_graph.clear();
        state.reverse_import_graph.clear();
        state.content_hashes.clear();
        state.total_files_scanned = 0;
        state.total_symbols_extracted = 0;

        let mut all_excluded = self.excluded_dirs.clone();
        all_excluded.extend(excluded_paths.iter().cloned());

        let mut source_paths: Vec<(String, String)> = Vec::new(); // (absolute, relative)
        for root in paths {
            let tree = file_tree::build_file_tree(root, "", 0, &all_excluded);
            for node in file_tree::flatten(&tree) {
                if !node.is_directory() && self.is_source_file(node) {
                    source_paths.push((node.absolute_path.clone(), node.relative_path.clone()));
                }
                state.all_file_nodes.insert(node.relative_path.clone(), node.clone());
            }
            state.file_trees.insert(root.to_string_lossy().into_owned(), tree);
        }

        if source_paths.len() > self.limits.max_indexed_files {
            source_paths.truncate(self.limits.max_indexed_files);
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.index_threads.max(1))
            .build();
        let indexed_at = now_secs();
        let extracted: Vec<IndexedFile> = match pool {
            Ok(pool) => pool.install(|| self.extract_all(&source_paths, indexed_at)),
            Err(_) => self.extract_all(&source_paths, indexed_at),
        };

        state.total_files_scanned = extracted.len();
        for file in extracted {
            add_indexed_file(&mut state, file);
        }

        rebuild_import_graph(&mut state);

        let duration_ms = now_ms().saturating_sub(start);
        state.index_duration_ms = duration_ms;
        state.last_full_index_at = Some(indexed_at);
        state.status = IndexStatus::Ready;

        IndexSummary {
            files_scanned: state.total_files_scanned,
            symbols_extracted: state.total_symbols_extracted,
            duration_ms,
        }
    }

    fn extract_all(&self, source_paths: &[(String, String)], indexed_at: u64) -> Vec<IndexedFile> {
        source_paths
            .par_iter()
            .filter_map(|(abs, rel)| self.read_and_extract(abs, rel, indexed_at))
            .collect()
    }

    fn read_and_extract(&self, abs: &str, rel: &str, indexed_at: u64) -> Option<IndexedFile> {
        let bytes = std::fs::read(abs).ok()?;
        let language = classify(rel);
        parsing::extract_file(rel, abs, language, &bytes, indexed_at)
    }

    fn is_source_file(&self, node: &FileNode) -> bool {
        let language = node.extension.as_deref().map(classify_ext).unwrap_or(Language::Unknown);
        language.is_extractor_eligible() && node.size <= self.limits.max_file_bytes
    }

    /// `incrementalUpdate`: re-extracts files whose mtime or content hash has
    /// changed since the last index, then re-walks roots for new files and
    /// rebuilds the import graph. Deletions are not reflected — a known,
    /// deliberately kept weakness.
    pub fn incremental_update(&self) -> IncrementalSummary {
        let mut state = self.state.lock();
        let mut updated = 0usize;
        let indexed_at = now_secs();

        let candidates: Vec<(String, String)> = state
            .all_file_nodes
            .values()
            .filter(|n| !n.is_directory() && self.is_source_file(n))
            .map(|n| (n.absolute_path.clone(), n.relative_path.clone()))
            .collect();

        for (abs, rel) in candidates {
            let Ok(meta) = std::fs::metadata(&abs) else { continue };
            let current_mtime = file_tree::modified_at_secs(&meta);
            let previous = state.indexed_files.get(&rel).map(|f| f.indexed_at);
            if let Some(prev_indexed_at) = previous {
                if prev_indexed_at >= current_mtime {
                    continue;
                }
            }
            let Ok(bytes) = std::fs::read(&abs) else { continue };
            let new_hash = crate::regex_toolkit::fnv1a64(&bytes);
            if state.content_hashes.get(&abs) == Some(&new_hash) {
                continue;
            }
            remove_indexed_file(&mut state, &rel);
            let language = classify(&rel);
            if let Some(file) = parsing::extract_file(&rel, &abs, language, &bytes, indexed_at) {
                add_indexed_file(&mut state, file);
                updated += 1;
            }
        }

        let roots: Vec<PathBuf> = state.workspace_paths.clone();
        let mut all_excluded = self.excluded_dirs.clone();
        all_excluded.extend(state.excluded_paths.iter().cloned());
        for root in &roots {
            let tree = file_tree::build_file_tree(root, "", 0, &all_excluded);
            for node in file_tree::flatten(&tree) {
                state.all_file_nodes.insert(node.relative_path.clone(), node.clone());
                if !node.is_directory() && self.is_source_file(node) && !state.indexed_files.contains_key(&node.relative_path) {
                    if let Ok(bytes) = std::fs::read(&node.absolute_path) {
                        let language = classify(&node.relative_path);
                        if let Some(file) = parsing::extract_file(&node.relative_path, &node.absolute_path, language, &bytes, indexed_at) {
                            add_indexed_file(&mut state, file);
                            updated += 1;
                        }
                    }
                }
            }
            state.file_trees.insert(root.to_string_lossy().into_owned(), tree);
        }

        rebuild_import_graph(&mut state);
        IncrementalSummary { updated_files: updated }
    }

    /// `indexSingleFile`: remove then re-add, no staleness checks.
    pub fn index_single_file(&self, abs: &Path, rel: &str) {
        let mut state = self.state.lock();
        remove_indexed_file(&mut state, rel);
        let Ok(bytes) = std::fs::read(abs) else { return };
        let language = classify(rel);
        if let Some(file) = parsing::extract_file(rel, &abs.to_string_lossy(), language, &bytes, now_secs()) {
            add_indexed_file(&mut state, file);
            rebuild_import_graph(&mut state);
        }
    }
}

fn classify(rel: &str) -> Language {
    let ext = Path::new(rel).extension().map(|e| e.to_string_lossy().into_owned());
    ext.as_deref().map(classify_ext).unwrap_or(Language::Unknown)
}

fn classify_ext(ext: &str) -> Language {
    crate::classifier::from_extension(ext)
}

/// Inserts `file`'s symbols into every lookup map; the only writer of the
/// symbol maps besides [`remove_indexed_file`].
fn add_indexed_file(state: &mut CoreState, file: IndexedFile) {
    state.content_hashes.insert(file.absolute_path.clone(), file.content_hash);
    state.total_symbols_extracted += file.symbols.len();
    for symbol in &file.symbols {
        state
            .symbols_by_name
            .entry(symbol.name.to_lowercase())
            .or_default()
            .push(symbol.clone());
        state
            .symbols_by_file
            .entry(file.relative_path.clone())
            .or_default()
            .push(symbol.clone());
        state.symbols_by_kind.entry(symbol.kind).or_default().push(symbol.clone());
    }
    state.indexed_files.insert(file.relative_path.clone(), file);
}

/// Reverses [`add_indexed_file`]: purges every symbol by identity, drops
/// empty buckets, and removes the file's own entries.
fn remove_indexed_file(state: &mut CoreState, rel: &str) {
    let Some(file) = state.indexed_files.remove(rel) else {
        return;
    };
    state.content_hashes.remove(&file.absolute_path);
    state.total_symbols_extracted = state.total_symbols_extracted.saturating_sub(file.symbols.len());

    for symbol in &file.symbols {
        let identity = symbol.identity();
        if let Some(bucket) = state.symbols_by_name.get_mut(&symbol.name.to_lowercase()) {
            bucket.retain(|s| s.identity() != identity);
            if bucket.is_empty() {
                state.symbols_by_name.remove(&symbol.name.to_lowercase());
            }
        }
        if let Some(bucket) = state.symbols_by_kind.get_mut(&symbol.kind) {
            bucket.retain(|s| s.identity() != identity);
            if bucket.is_empty() {
                state.symbols_by_kind.remove(&symbol.kind);
            }
        }
    }
    state.symbols_by_file.remove(rel);
}

/// Rebuilds both import graphs from `indexed_files` from scratch.
fn rebuild_import_graph(state: &mut CoreState) {
    state.import_graph.clear();
    state.reverse_import_graph.clear();
    for (rel, file) in &state.indexed_files {
        state.import_graph.insert(rel.clone(), file.imports.clone());
        for module in &file.imports {
            state.reverse_import_graph.entry(module.clone()).or_default().push(rel.clone());
        }
    }
}

fn now_secs() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0)
}

fn now_ms() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis() as u64).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn settings() -> Settings {
        Settings::default()
    }

    #[test]
    fn index_workspace_extracts_swift_scenario() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        fs::write(
            dir.path().join("a/Foo.swift"),
            "import Bar\npublic class Foo {\n    public func greet() { print(\"hi\") }\n    let x = 1\n}\n",
        )
        .unwrap();

        let core = IndexCore::new(&settings());
        let summary = core.index_workspace(&[dir.path().to_path_buf()], &[]);
        assert_eq!(summary.files_scanned, 1);

        let state = core.state.lock();
        let file = state.indexed_files.get("a/Foo.swift").unwrap();
        assert_eq!(file.imports, vec!["Bar".to_string()]);
        assert_eq!(file.symbols.len(), 3);
    }

    #[test]
    fn incremental_update_is_no_op_without_changes() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("main.rs"), "fn main() {}\n").unwrap();

        let core = IndexCore::new(&settings());
        core.index_workspace(&[dir.path().to_path_buf()], &[]);
        let before = core.state.lock().total_symbols_extracted;

        let summary = core.incremental_update();
        assert_eq!(summary.updated_files, 0);
        assert_eq!(core.state.lock().total_symbols_extracted, before);
    }

    #[test]
    fn remove_then_add_preserves_bucket_consistency() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("main.rs"), "pub fn one() {}\npub fn two() {}\n").unwrap();

        let core = IndexCore::new(&settings());
        core.index_workspace(&[dir.path().to_path_buf()], &[]);

        let rel = "main.rs".to_string();
        {
            let mut state = core.state.lock();
            remove_indexed_file(&mut state, &rel);
            assert!(state.symbols_by_file.get(&rel).is_none());
            assert!(!state.symbols_by_name.contains_key("one"));
        }
    }

    #[test]
    fn oversize_file_is_excluded_from_index() {
        let dir = tempdir().unwrap();
        let big = "x".repeat(2 * 1024 * 1024);
        fs::write(dir.path().join("big.rs"), big).unwrap();
        fs::write(dir.path().join("small.rs"), "fn f() {}\n").unwrap();

        let core = IndexCore::new(&settings());
        let summary = core.index_workspace(&[dir.path().to_path_buf()], &[]);
        assert_eq!(summary.files_scanned, 1);
    }
}
