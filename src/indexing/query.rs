//! The read-only half of the indexing engine: symbol search, semantic grep,
//! file search, glob, references, and the text renderers (`fileOutline`,
//! `projectTree`, `stats`). Every method serializes through the same lock
//! `core.rs` uses for writes — this engine never runs a read concurrently
//! with a write.

use std::collections::HashSet;

use regex::Regex;

use super::core::IndexCore;
use crate::file_tree::{natural_compare, FileNode};
use crate::regex_toolkit::{fuzzy_match, glob_match};
use crate::symbol::IndexedSymbol;
use crate::types::{AccessLevel, Language, SymbolKind};

#[derive(Debug, Clone)]
pub struct FileMatch {
    pub relative_path: String,
    pub absolute_path: String,
    pub score: i64,
}

#[derive(Debug, Clone)]
pub struct ReferenceHit {
    pub file_path: String,
    pub line: u32,
    pub context_line: String,
    pub is_definition: bool,
}

#[derive(Debug, Clone)]
pub struct DependencyGraphEntry {
    pub file_path: String,
    pub imports: Vec<String>,
    pub imported_by: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ProjectStats {
    pub file_count: usize,
    pub directory_count: usize,
    pub total_bytes: u64,
    pub language_histogram: Vec<(Language, usize)>,
    pub largest_files: Vec<(String, u64)>,
    pub deepest_file: Option<(String, u32)>,
}

/// Renderer-facing file outline: a flat textual block, not a data structure
/// a caller is expected to parse further.
pub type FileOutline = String;
pub type OutlineSymbol = IndexedSymbol;
pub type SymbolMatch = IndexedSymbol;

fn rank_key(symbol: &IndexedSymbol, query_lower: &str) -> (i32, i32, std::cmp::Reverse<AccessLevel>, i32, usize) {
    let name_lower = symbol.name.to_lowercase();
    let exact = if name_lower == query_lower { 0 } else { 1 };
    let prefix = if name_lower.starts_with(query_lower) { 0 } else { 1 };
    let typed = if symbol.kind.is_type() { 0 } else { 1 };
    (exact, prefix, std::cmp::Reverse(symbol.access_level), typed, symbol.name.len())
}

impl IndexCore {
    /// `findSymbols`: four-pass accumulation (exact, prefix, substring,
    /// fuzzy-subsequence), filters, dedup by identity, ranked, truncated.
    pub fn find_symbols(
        &self,
        query: &str,
        kind: Option<SymbolKind>,
        file_filter: Option<&str>,
        limit: usize,
    ) -> Vec<IndexedSymbol> {
        let state = self.state.lock();
        let query_lower = query.to_lowercase();
        let file_filter_lower = file_filter.map(|f| f.to_lowercase());
        let mut seen: HashSet<String> = HashSet::new();
        let mut results: Vec<IndexedSymbol> = Vec::new();

        let keep = |s: &IndexedSymbol| -> bool {
            if let Some(k) = kind {
                if s.kind != k {
                    return false;
                }
            }
            if let Some(ref f) = file_filter_lower {
                if !s.file_path.to_lowercase().contains(f.as_str()) {
                    return false;
                }
            }
            true
        };

        let mut push = |results: &mut Vec<IndexedSymbol>, s: &IndexedSymbol| {
            if !keep(s) {
                return;
            }
            if seen.insert(s.identity()) {
                results.push(s.clone());
            }
        };

        if let Some(bucket) = state.symbols_by_name.get(&query_lower) {
            for s in bucket {
                push(&mut results, s);
            }
        }

        for (name, bucket) in &state.symbols_by_name {
            if name != &query_lower && name.starts_with(&query_lower) {
                for s in bucket {
                    push(&mut results, s);
                }
            }
        }

        if results.len() < limit {
            for (name, bucket) in &state.symbols_by_name {
                if name.contains(&query_lower) && !name.starts_with(&query_lower) {
                    for s in bucket {
                        push(&mut results, s);
                    }
                }
            }
        }

        if results.len() < limit / 2 {
            for (name, bucket) in &state.symbols_by_name {
                if !name.contains(&query_lower) && fuzzy_match(&query_lower, name) {
                    for s in bucket {
                        push(&mut results, s);
                    }
                }
            }
        }

        results.sort_by_key(|s| rank_key(s, &query_lower));
        results.truncate(limit);
        results
    }

    /// `findExactSymbol`: unranked lookup by exact lowercased name.
    pub fn find_exact_symbol(&self, name: &str, kind: Option<SymbolKind>) -> Vec<IndexedSymbol> {
        let state = self.state.lock();
        state
            .symbols_by_name
            .get(&name.to_lowercase())
            .map(|bucket| {
                bucket
                    .iter()
                    .filter(|s| kind.is_none_or(|k| s.kind == k))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// `semanticGrep`: substring match across name/qualifiedName/signature/
    /// documentation, filtered by kind, access level, and file pattern.
    pub fn semantic_grep(
        &self,
        query: &str,
        file_pattern: Option<&str>,
        symbol_kinds: Option<&[SymbolKind]>,
        access_levels: Option<&[AccessLevel]>,
        limit: usize,
    ) -> Vec<IndexedSymbol> {
        let state = self.state.lock();
        let query_lower = query.to_lowercase();
        let pattern_lower = file_pattern.map(|p| p.to_lowercase());

        let candidates: Vec<&IndexedSymbol> = match symbol_kinds {
            Some(kinds) => kinds
                .iter()
                .filter_map(|k| state.symbols_by_kind.get(k))
                .flatten()
                .collect(),
            None => state.symbols_by_file.values().flatten().collect(),
        };

        let mut results = Vec::new();
        for symbol in candidates {
            if let Some(levels) = access_levels {
                if !levels.contains(&symbol.access_level) {
                    continue;
                }
            }
            if let Some(ref pattern) = pattern_lower {
                let path_lower = symbol.file_path.to_lowercase();
                if !path_lower.contains(pattern.as_str()) && !glob_match(pattern, &path_lower) {
                    continue;
                }
            }
            let haystacks = [
                symbol.name.to_lowercase(),
                symbol.qualified_name.to_lowercase(),
                symbol.signature.to_lowercase(),
                symbol.documentation.as_deref().unwrap_or("").to_lowercase(),
            ];
            if haystacks.iter().any(|h| h.contains(&query_lower)) {
                results.push(symbol.clone());
                if results.len() >= limit {
                    break;
                }
            }
        }

        results.sort_by(|a, b| {
            let a_name = a.name.to_lowercase();
            let b_name = b.name.to_lowercase();
            let a_exact = a_name == query_lower;
            let b_exact = b_name == query_lower;
            b_exact
                .cmp(&a_exact)
                .then_with(|| {
                    let a_prefix = a_name.starts_with(&query_lower);
                    let b_prefix = b_name.starts_with(&query_lower);
                    b_prefix.cmp(&a_prefix)
                })
                .then_with(|| a_name.cmp(&b_name))
        });
        results.truncate(limit);
        results
    }

    /// `findFiles`: scored fuzzy file search over every known file node.
    pub fn find_files(&self, query: &str, extension_filter: Option<&str>, limit: usize) -> Vec<FileMatch> {
        let state = self.state.lock();
        let query_lower = query.to_lowercase();
        let ext_filter = extension_filter.map(|e| e.trim_start_matches('.').to_lowercase());

        let mut scored: Vec<FileMatch> = Vec::new();
        for node in state.all_file_nodes.values() {
            if node.is_directory() {
                continue;
            }
            if let Some(ref ext) = ext_filter {
                if node.extension.as_deref() != Some(ext.as_str()) {
                    continue;
                }
            }
            let name_lower = node.name.to_lowercase();
            let path_lower = node.relative_path.to_lowercase();

            let mut score: i64 = if name_lower == query_lower {
                1000
            } else if name_lower.starts_with(&query_lower) {
                800
            } else if name_lower.contains(&query_lower) {
                600
            } else if path_lower.contains(&query_lower) {
                400
            } else if fuzzy_match(&query_lower, &name_lower) {
                200
            } else if fuzzy_match(&query_lower, &path_lower) {
                100
            } else {
                continue;
            };

            let is_source = crate::classifier::from_extension(node.extension.as_deref().unwrap_or(""))
                .is_extractor_eligible();
            if is_source {
                score += 10;
            }
            score += (20 - (node.depth as i64) * 2).max(0);

            scored.push(FileMatch {
                relative_path: node.relative_path.clone(),
                absolute_path: node.absolute_path.clone(),
                score,
            });
        }

        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(limit);
        scored
    }

    /// `glob`: every file node whose lowercased relative path matches
    /// `pattern` (also lowercased), sorted by path.
    pub fn glob(&self, pattern: &str, limit: usize) -> Vec<String> {
        let state = self.state.lock();
        let pattern_lower = pattern.to_lowercase();
        let mut matches: Vec<String> = state
            .all_file_nodes
            .values()
            .filter(|n| !n.is_directory())
            .map(|n| n.relative_path.clone())
            .filter(|p| glob_match(&pattern_lower, &p.to_lowercase()))
            .collect();
        matches.sort();
        matches.truncate(limit);
        matches
    }

    /// `findReferences`: definitions first, then a word-boundary regex scan
    /// of every indexed file's lines.
    pub fn find_references(&self, symbol_name: &str, limit: usize) -> Vec<ReferenceHit> {
        let state = self.state.lock();
        let name_lower = symbol_name.to_lowercase();
        let mut hits = Vec::new();
        let mut definition_lines: HashSet<(String, u32)> = HashSet::new();

        for bucket in state.symbols_by_name.values() {
            for symbol in bucket {
                if symbol.name.to_lowercase() == name_lower {
                    definition_lines.insert((symbol.file_path.clone(), symbol.line));
                    hits.push(ReferenceHit {
                        file_path: symbol.file_path.clone(),
                        line: symbol.line,
                        context_line: symbol.signature.clone(),
                        is_definition: true,
                    });
                    if hits.len() >= limit {
                        return hits;
                    }
                }
            }
        }

        let Ok(word_re) = Regex::new(&format!(r"\b{}\b", regex::escape(symbol_name))) else {
            return hits;
        };

        for (rel, file) in &state.indexed_files {
            let Ok(bytes) = std::fs::read(&file.absolute_path) else { continue };
            let Ok(content) = String::from_utf8(bytes) else { continue };
            for (idx, line) in content.lines().enumerate() {
                let line_no = idx as u32 + 1;
                if definition_lines.contains(&(rel.clone(), line_no)) {
                    continue;
                }
                if word_re.is_match(line) {
                    hits.push(ReferenceHit {
                        file_path: rel.clone(),
                        line: line_no,
                        context_line: line.trim().to_string(),
                        is_definition: false,
                    });
                    if hits.len() >= limit {
                        return hits;
                    }
                }
            }
        }

        hits
    }

    /// `symbolsInFile`: the raw `symbolsByFile` bucket for a relative path.
    pub fn symbols_in_file(&self, relative_path: &str) -> Vec<IndexedSymbol> {
        self.state
            .lock()
            .symbols_by_file
            .get(relative_path)
            .cloned()
            .unwrap_or_default()
    }

    /// `allTypes`: every symbol whose kind is type-kinded.
    pub fn all_types(&self) -> Vec<IndexedSymbol> {
        self.state
            .lock()
            .symbols_by_file
            .values()
            .flatten()
            .filter(|s| s.kind.is_type())
            .cloned()
            .collect()
    }

    /// `allTests`: every symbol of kind `Test`.
    pub fn all_tests(&self) -> Vec<IndexedSymbol> {
        self.state
            .lock()
            .symbols_by_kind
            .get(&SymbolKind::Test)
            .cloned()
            .unwrap_or_default()
    }

    /// `fileDependencies`: the import/reverse-import graph entries for one
    /// file. This is a symmetric overlap report, not true reverse-resolution
    /// — `reverseImportGraph` is keyed by raw module string, which rarely
    /// equals a file's relative path, so `imported_by` is usually sparse.
    pub fn file_dependencies(&self, relative_path: &str) -> DependencyGraphEntry {
        let state = self.state.lock();
        let imports = state.import_graph.get(relative_path).cloned().unwrap_or_default();
        let imported_by = state
            .reverse_import_graph
            .get(relative_path)
            .cloned()
            .unwrap_or_default();
        DependencyGraphEntry {
            file_path: relative_path.to_string(),
            imports,
            imported_by,
        }
    }

    /// `fileOutline`: text rendering of one file's symbols, top-level first
    /// then grouped by container.
    pub fn file_outline(&self, relative_path: &str) -> Option<FileOutline> {
        let state = self.state.lock();
        let file = state.indexed_files.get(relative_path)?;
        let mut out = format!("📄 {} ({}, {} lines)\n", file.relative_path, file.language, file.line_count);

        if !file.imports.is_empty() {
            out.push_str(&format!("  Imports: {}\n", file.imports.join(", ")));
        }
        out.push('\n');

        let mut top_level: Vec<&IndexedSymbol> = Vec::new();
        let mut by_container: std::collections::HashMap<&str, Vec<&IndexedSymbol>> = std::collections::HashMap::new();
        for symbol in &file.symbols {
            match symbol.container_name.as_deref() {
                Some(c) => by_container.entry(c).or_default().push(symbol),
                None => top_level.push(symbol),
            }
        }
        top_level.sort_by_key(|s| s.line);

        for symbol in &top_level {
            render_symbol_line(&mut out, symbol, 1);
            if let Some(members) = by_container.get(symbol.name.as_str()) {
                let mut members = members.clone();
                members.sort_by_key(|s| s.line);
                for member in members {
                    render_symbol_line(&mut out, member, 2);
                }
            }
        }

        Some(out)
    }

    /// `projectTree`: box-drawing rendering of every known workspace root.
    pub fn project_tree(&self, max_depth: u32, max_files: usize, include_hidden: bool) -> String {
        let state = self.state.lock();
        let mut out = String::new();
        for (root, tree) in &state.file_trees {
            let root_name = std::path::Path::new(root)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| root.clone());
            out.push_str(&format!("📁 {root_name}/\n"));
            render_tree(&mut out, tree, "", max_depth, max_files, include_hidden, 0);
        }
        out
    }

    /// `stats`: totals over `allFileNodes`.
    pub fn stats(&self) -> ProjectStats {
        let state = self.state.lock();
        let mut file_count = 0usize;
        let mut directory_count = 0usize;
        let mut total_bytes: u64 = 0;
        let mut histogram: std::collections::HashMap<Language, usize> = std::collections::HashMap::new();
        let mut largest: Vec<(String, u64)> = Vec::new();
        let mut deepest: Option<(String, u32)> = None;

        for node in state.all_file_nodes.values() {
            if node.is_directory() {
                directory_count += 1;
                continue;
            }
            file_count += 1;
            total_bytes += node.size;
            let language = crate::classifier::from_extension(node.extension.as_deref().unwrap_or(""));
            if language.is_extractor_eligible() {
                *histogram.entry(language).or_insert(0) += 1;
            }
            largest.push((node.relative_path.clone(), node.size));
            if deepest.as_ref().is_none_or(|(_, d)| node.depth > *d) {
                deepest = Some((node.relative_path.clone(), node.depth));
            }
        }

        largest.sort_by(|a, b| b.1.cmp(&a.1));
        largest.truncate(10);

        let mut language_histogram: Vec<(Language, usize)> = histogram.into_iter().collect();
        language_histogram.sort_by(|a, b| b.1.cmp(&a.1));

        ProjectStats {
            file_count,
            directory_count,
            total_bytes,
            language_histogram,
            largest_files: largest,
            deepest_file: deepest,
        }
    }
}

fn render_symbol_line(out: &mut String, symbol: &IndexedSymbol, depth: usize) {
    let indent = "  ".repeat(depth);
    let is_static = if symbol.is_static { "static " } else { "" };
    let end = if symbol.end_line > symbol.line {
        format!("-{}", symbol.end_line)
    } else {
        String::new()
    };
    out.push_str(&format!(
        "{indent}[{}] {is_static}{} {} (L{}{})\n",
        symbol.access_level, symbol.kind, symbol.name, symbol.line, end
    ));
    if !symbol.inherits.is_empty() {
        out.push_str(&format!("{indent}  : {}\n", symbol.inherits.join(", ")));
    }
    if let Some(doc) = &symbol.documentation {
        let clipped: String = doc.chars().take(100).collect();
        out.push_str(&format!("{indent}  /// {clipped}\n"));
    }
}

#[allow(clippy::too_many_arguments)]
fn render_tree(
    out: &mut String,
    node: &FileNode,
    prefix: &str,
    max_depth: u32,
    max_files: usize,
    include_hidden: bool,
    depth: u32,
) {
    if depth >= max_depth {
        return;
    }

    let mut children: Vec<&FileNode> = node
        .children
        .iter()
        .filter(|c| include_hidden || !c.name.starts_with('.'))
        .collect();
    children.sort_by(|a, b| {
        b.is_directory()
            .cmp(&a.is_directory())
            .then_with(|| natural_compare(&a.name, &b.name))
    });

    let truncated = children.len() > max_files;
    let shown = children.len().min(max_files);

    for (i, child) in children.iter().take(shown).enumerate() {
        let is_last = i == shown - 1 && !truncated;
        let connector = if is_last { "└── " } else { "├── " };
        let branch_prefix = if is_last { "    " } else { "│   " };

        if child.is_directory() {
            let total_files = count_files(child);
            out.push_str(&format!("{prefix}{connector}{}/ ({total_files} files)\n", child.name));
            render_tree(
                out,
                child,
                &format!("{prefix}{branch_prefix}"),
                max_depth,
                max_files,
                include_hidden,
                depth + 1,
            );
        } else {
            out.push_str(&format!(
                "{prefix}{connector}{} ({})\n",
                child.name,
                human_bytes(child.size)
            ));
        }
    }

    if truncated {
        out.push_str(&format!("{prefix}└── … ({} more)\n", children.len() - shown));
    }
}

fn count_files(node: &FileNode) -> usize {
    if !node.is_directory() {
        return 1;
    }
    node.children.iter().map(count_files).sum()
}

fn human_bytes(size: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = size as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{size} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use std::fs;
    use tempfile::tempdir;

    fn build(dir: &std::path::Path) -> IndexCore {
        let core = IndexCore::new(&Settings::default());
        core.index_workspace(&[dir.to_path_buf()], &[]);
        core
    }

    #[test]
    fn find_symbols_ranks_exact_match_first() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.rs"), "pub fn greet() {}\npub fn greeting() {}\n").unwrap();
        let core = build(dir.path());
        let results = core.find_symbols("greet", None, None, 50);
        assert_eq!(results[0].name, "greet");
    }

    #[test]
    fn find_exact_symbol_has_no_ranking_and_exact_case() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.rs"), "pub fn greet() {}\n").unwrap();
        let core = build(dir.path());
        let results = core.find_exact_symbol("GREET", None);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn glob_matches_extension_pattern() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.rs"), "fn a() {}\n").unwrap();
        fs::write(dir.path().join("b.py"), "def b(): pass\n").unwrap();
        let core = build(dir.path());
        let results = core.glob("**/*.rs", 200);
        assert_eq!(results, vec!["a.rs".to_string()]);
    }

    #[test]
    fn find_references_reports_definition_before_usages() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.rs"), "pub fn greet() {}\nfn main() { greet(); }\n").unwrap();
        let core = build(dir.path());
        let hits = core.find_references("greet", 100);
        assert!(hits[0].is_definition);
        assert!(hits.iter().any(|h| !h.is_definition && h.context_line.contains("greet()")));
    }

    #[test]
    fn file_outline_renders_header_and_symbol() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.rs"), "pub fn greet() {}\n").unwrap();
        let core = build(dir.path());
        let outline = core.file_outline("a.rs").unwrap();
        assert!(outline.starts_with("📄 a.rs (rust, 1 lines)"));
        assert!(outline.contains("greet"));
    }

    #[test]
    fn stats_counts_files_and_languages() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.rs"), "fn a() {}\n").unwrap();
        fs::write(dir.path().join("b.rs"), "fn b() {}\n").unwrap();
        let core = build(dir.path());
        let stats = core.stats();
        assert_eq!(stats.file_count, 2);
        assert_eq!(stats.language_histogram, vec![(Language::Rust, 2)]);
    }
}
