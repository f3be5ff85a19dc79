//! `ToolFacade`: the named, string-keyed surface an LLM-facing caller
//! drives instead of calling `IndexCore` methods directly. Owns one
//! `IndexCore`, ensures it is populated before the first real answer, and
//! renders every response as a two-event (`started` → `completed`/`failed`)
//! sequence with a title, a body clamped to ~8 000 characters, and an
//! optional detail counter. Called directly by the CLI and by embedders,
//! not served over a socket.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;

use serde::Serialize;

use crate::error::{IndexError, IndexResult};
use crate::indexing::{IndexCore, IndexStatus};
use crate::symbol::IndexedSymbol;
use crate::types::SymbolKind;

const MAX_BODY_CHARS: usize = 8_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolStatus {
    Started,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolEvent {
    pub tool_call_id: String,
    pub tool: String,
    pub status: ToolStatus,
    pub title: String,
    pub output: String,
    pub duration_ms: u64,
    pub detail: Option<String>,
}

pub struct ToolFacade {
    core: IndexCore,
    workspace_paths: Vec<PathBuf>,
    excluded_paths: Vec<String>,
}

impl ToolFacade {
    pub fn new(core: IndexCore, workspace_paths: Vec<PathBuf>, excluded_paths: Vec<String>) -> Self {
        Self {
            core,
            workspace_paths,
            excluded_paths,
        }
    }

    pub fn core(&self) -> &IndexCore {
        &self.core
    }

    /// Runs `tool` with `args`, returning the started event immediately
    /// followed by its terminal event. `tool_call_id` is caller-supplied and
    /// echoed back unchanged.
    pub fn call(&self, tool_call_id: &str, tool: &str, args: &HashMap<String, String>) -> Vec<ToolEvent> {
        let started = ToolEvent {
            tool_call_id: tool_call_id.to_string(),
            tool: tool.to_string(),
            status: ToolStatus::Started,
            title: format!("Running {tool}"),
            output: String::new(),
            duration_ms: 0,
            detail: None,
        };

        if tool != "reindex" && tool != "index_status" {
            self.ensure_indexed();
        }

        let start = Instant::now();
        let result = self.dispatch(tool, args);
        let duration_ms = start.elapsed().as_millis() as u64;

        let terminal = match result {
            Ok((title, output, detail)) => ToolEvent {
                tool_call_id: tool_call_id.to_string(),
                tool: tool.to_string(),
                status: ToolStatus::Completed,
                title,
                output: clamp_body(output),
                duration_ms,
                detail,
            },
            Err(err) => ToolEvent {
                tool_call_id: tool_call_id.to_string(),
                tool: tool.to_string(),
                status: ToolStatus::Failed,
                title: format!("{tool} failed"),
                output: err.to_string(),
                duration_ms,
                detail: None,
            },
        };

        vec![started, terminal]
    }

    fn ensure_indexed(&self) {
        if matches!(self.core.status(), IndexStatus::Idle) {
            self.core.index_workspace(&self.workspace_paths, &self.excluded_paths);
        }
    }

    fn dispatch(&self, tool: &str, args: &HashMap<String, String>) -> IndexResult<(String, String, Option<String>)> {
        match tool {
            "codebase_search" => self.codebase_search(args),
            "find_symbol" => self.find_symbol(args),
            "list_symbols" => self.list_symbols(args),
            "find_references" => self.find_references(args),
            "project_structure" => self.project_structure(args),
            "file_outline" => self.file_outline(args),
            "find_files" => self.find_files(args),
            "codebase_stats" => self.codebase_stats(),
            "dependency_graph" => self.dependency_graph(args),
            "list_types" => self.list_types(),
            "list_tests" => self.list_tests(),
            "index_status" => self.index_status(),
            "reindex" => self.reindex(),
            other => Err(IndexError::UnknownTool { name: other.to_string() }),
        }
    }

    fn codebase_search(&self, args: &HashMap<String, String>) -> IndexResult<(String, String, Option<String>)> {
        let query = required_arg(args, "codebase_search", "query")?;
        let kinds = args.get("kind").and_then(|k| parse_kind_alias(k));
        let file_pattern = args.get("filePattern").map(|s| s.as_str());
        let limit = self.core.limits().find_symbols_limit;

        let mut results = self.core.semantic_grep(&query, file_pattern, kinds.as_deref(), None, limit);
        if results.is_empty() {
            results = self.core.find_symbols(&query, None, file_pattern, limit);
        }
        Ok(render_symbol_results("Codebase search", &query, &results))
    }

    fn find_symbol(&self, args: &HashMap<String, String>) -> IndexResult<(String, String, Option<String>)> {
        let query = required_arg(args, "find_symbol", "query")?;
        let kinds = args.get("kind").and_then(|k| parse_kind_alias(k));
        let kind_single = kinds.as_ref().and_then(|k| k.first().copied());

        let mut results = self.core.find_exact_symbol(&query, kind_single);
        if results.is_empty() {
            results = self
                .core
                .find_symbols(&query, None, None, self.core.limits().find_symbols_limit);
        }
        if let Some(kinds) = &kinds {
            results.retain(|s| kinds.contains(&s.kind));
        }
        Ok(render_symbol_results("Find symbol", &query, &results))
    }

    fn list_symbols(&self, args: &HashMap<String, String>) -> IndexResult<(String, String, Option<String>)> {
        let path = required_arg(args, "list_symbols", "path")?;
        let mut results = self.core.symbols_in_file(&path);
        let mut resolved_path = path.clone();
        if results.is_empty() {
            if let Some(best) = self.core.find_files(&path, None, 1).into_iter().next() {
                resolved_path = best.relative_path.clone();
                results = self.core.symbols_in_file(&resolved_path);
            }
        }
        Ok(render_symbol_results("List symbols", &resolved_path, &results))
    }

    fn find_references(&self, args: &HashMap<String, String>) -> IndexResult<(String, String, Option<String>)> {
        let query = required_arg(args, "find_references", "query")?;
        let limit = self.core.limits().find_references_limit;
        let hits = self.core.find_references(&query, limit);
        let mut body = String::new();
        for hit in &hits {
            let marker = if hit.is_definition { "def" } else { "ref" };
            body.push_str(&format!("[{marker}] {}:{} {}\n", hit.file_path, hit.line, hit.context_line));
        }
        Ok((
            format!("References to '{query}'"),
            body,
            Some(format!("{} reference(s)", hits.len())),
        ))
    }

    fn project_structure(&self, args: &HashMap<String, String>) -> IndexResult<(String, String, Option<String>)> {
        let max_depth = args
            .get("maxDepth")
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(6)
            .min(6);
        let body = self.core.project_tree(max_depth, 200, false);
        Ok(("Project structure".to_string(), body, None))
    }

    fn file_outline(&self, args: &HashMap<String, String>) -> IndexResult<(String, String, Option<String>)> {
        let path = required_arg(args, "file_outline", "path")?;
        let mut outline = self.core.file_outline(&path);
        let mut resolved = path.clone();
        if outline.is_none() {
            if let Some(best) = self.core.find_files(&path, None, 1).into_iter().next() {
                resolved = best.relative_path.clone();
                outline = self.core.file_outline(&resolved);
            }
        }
        match outline {
            Some(text) => Ok((format!("Outline: {resolved}"), text, None)),
            None => Err(IndexError::InvalidToolArgument {
                tool: "file_outline".to_string(),
                reason: format!("no indexed file matches '{path}'"),
            }),
        }
    }

    fn find_files(&self, args: &HashMap<String, String>) -> IndexResult<(String, String, Option<String>)> {
        let query = required_arg(args, "find_files", "query")?;
        let extension = args.get("extension").map(|s| s.as_str());
        let limit = self.core.limits().find_files_limit;

        let mut matches = self.core.find_files(&query, extension, limit);
        if matches.is_empty() {
            let glob_limit = self.core.limits().glob_limit;
            let paths = self.core.glob(&query, glob_limit);
            let mut body = String::new();
            for path in &paths {
                body.push_str(path);
                body.push('\n');
            }
            return Ok((
                format!("Find files: {query}"),
                body,
                Some(format!("{} match(es) via glob fallback", paths.len())),
            ));
        }
        matches.truncate(limit);
        let mut body = String::new();
        for m in &matches {
            body.push_str(&format!("{} (score {})\n", m.relative_path, m.score));
        }
        Ok((format!("Find files: {query}"), body, Some(format!("{} match(es)", matches.len()))))
    }

    fn codebase_stats(&self) -> IndexResult<(String, String, Option<String>)> {
        let stats = self.core.stats();
        let mut body = format!(
            "files: {}\ndirectories: {}\ntotal bytes: {}\n",
            stats.file_count, stats.directory_count, stats.total_bytes
        );
        body.push_str("languages:\n");
        for (language, count) in &stats.language_histogram {
            body.push_str(&format!("  {language}: {count}\n"));
        }
        body.push_str("largest files:\n");
        for (path, size) in &stats.largest_files {
            body.push_str(&format!("  {path} ({size} bytes)\n"));
        }
        if let Some((path, depth)) = &stats.deepest_file {
            body.push_str(&format!("deepest file: {path} (depth {depth})\n"));
        }
        Ok(("Codebase stats".to_string(), body, Some(format!("status: {:?}", self.core.status()))))
    }

    fn dependency_graph(&self, args: &HashMap<String, String>) -> IndexResult<(String, String, Option<String>)> {
        let path = required_arg(args, "dependency_graph", "path")?;
        let entry = self.core.file_dependencies(&path);
        let mut body = format!("imports ({}):\n", entry.imports.len());
        for module in &entry.imports {
            body.push_str(&format!("  {module}\n"));
        }
        body.push_str(&format!("imported by ({}):\n", entry.imported_by.len()));
        for file in &entry.imported_by {
            body.push_str(&format!("  {file}\n"));
        }
        Ok((format!("Dependencies: {path}"), body, None))
    }

    fn list_types(&self) -> IndexResult<(String, String, Option<String>)> {
        let results = self.core.all_types();
        Ok(render_symbol_results("All types", "", &results))
    }

    fn list_tests(&self) -> IndexResult<(String, String, Option<String>)> {
        let results = self.core.all_tests();
        Ok(render_symbol_results("All tests", "", &results))
    }

    fn index_status(&self) -> IndexResult<(String, String, Option<String>)> {
        let status = self.core.status();
        Ok(("Index status".to_string(), format!("{status:?}"), None))
    }

    fn reindex(&self) -> IndexResult<(String, String, Option<String>)> {
        if matches!(self.core.status(), IndexStatus::Idle) {
            let summary = self.core.index_workspace(&self.workspace_paths, &self.excluded_paths);
            Ok((
                "Reindex (full)".to_string(),
                format!("indexed {} file(s), {} symbol(s) in {} ms", summary.files_scanned, summary.symbols_extracted, summary.duration_ms),
                None,
            ))
        } else {
            let summary = self.core.incremental_update();
            Ok((
                "Reindex (incremental)".to_string(),
                format!("{} file(s) updated", summary.updated_files),
                None,
            ))
        }
    }
}

fn required_arg(args: &HashMap<String, String>, tool: &str, key: &str) -> IndexResult<String> {
    args.get(key).cloned().ok_or_else(|| IndexError::InvalidToolArgument {
        tool: tool.to_string(),
        reason: format!("missing '{key}'"),
    })
}

fn clamp_body(body: String) -> String {
    if body.chars().count() <= MAX_BODY_CHARS {
        body
    } else {
        body.chars().take(MAX_BODY_CHARS).collect()
    }
}

fn render_symbol_results(title: &str, query: &str, results: &[IndexedSymbol]) -> (String, String, Option<String>) {
    let mut body = String::new();
    for symbol in results {
        body.push_str(&format!(
            "{} {} {} — {}:{}\n",
            symbol.access_level, symbol.kind, symbol.qualified_name, symbol.file_path, symbol.line
        ));
    }
    let title = if query.is_empty() {
        title.to_string()
    } else {
        format!("{title}: {query}")
    };
    (title, body, Some(format!("{} result(s)", results.len())))
}

/// `function|func` → {function, method}; `property|var|let` →
/// {property, constant, variable}; `type` → {class, struct, enum, protocol,
/// interface, trait}; otherwise a direct 1:1 lookup against a kind's label.
pub(crate) fn parse_kind_alias(token: &str) -> Option<Vec<SymbolKind>> {
    match token.to_lowercase().as_str() {
        "function" | "func" => Some(vec![SymbolKind::Function, SymbolKind::Method]),
        "property" | "var" | "let" => Some(vec![SymbolKind::Property, SymbolKind::Constant, SymbolKind::Variable]),
        "type" => Some(vec![
            SymbolKind::Class,
            SymbolKind::Struct,
            SymbolKind::Enum,
            SymbolKind::Protocol,
            SymbolKind::Interface,
            SymbolKind::Trait,
        ]),
        other => parse_single_kind(other).map(|k| vec![k]),
    }
}

fn parse_single_kind(word: &str) -> Option<SymbolKind> {
    let kind = match word {
        "class" => SymbolKind::Class,
        "struct" => SymbolKind::Struct,
        "enum" => SymbolKind::Enum,
        "protocol" => SymbolKind::Protocol,
        "extension" => SymbolKind::Extension,
        "method" => SymbolKind::Method,
        "constant" => SymbolKind::Constant,
        "variable" => SymbolKind::Variable,
        "type-alias" | "typealias" => SymbolKind::TypeAlias,
        "import" => SymbolKind::Import,
        "macro" => SymbolKind::Macro,
        "interface" => SymbolKind::Interface,
        "trait" => SymbolKind::Trait,
        "module" => SymbolKind::Module,
        "test" => SymbolKind::Test,
        _ => return None,
    };
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use std::fs;
    use tempfile::tempdir;

    fn facade(dir: &std::path::Path) -> ToolFacade {
        let core = IndexCore::new(&Settings::default());
        ToolFacade::new(core, vec![dir.to_path_buf()], Vec::new())
    }

    #[test]
    fn first_call_on_idle_index_triggers_full_index() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.rs"), "pub fn greet() {}\n").unwrap();
        let facade = facade(dir.path());

        let mut args = HashMap::new();
        args.insert("query".to_string(), "greet".to_string());
        let events = facade.call("call-1", "find_symbol", &args);

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].status, ToolStatus::Started);
        assert_eq!(events[1].status, ToolStatus::Completed);
        assert!(events[1].output.contains("greet"));
    }

    #[test]
    fn unknown_tool_name_produces_failed_event() {
        let dir = tempdir().unwrap();
        let facade = facade(dir.path());
        let events = facade.call("call-2", "not_a_tool", &HashMap::new());
        assert_eq!(events[1].status, ToolStatus::Failed);
    }

    #[test]
    fn missing_argument_produces_failed_event_without_mutating_state() {
        let dir = tempdir().unwrap();
        let facade = facade(dir.path());
        let events = facade.call("call-3", "find_symbol", &HashMap::new());
        assert_eq!(events[1].status, ToolStatus::Failed);
    }

    #[test]
    fn kind_alias_expands_function_to_function_and_method() {
        assert_eq!(
            parse_kind_alias("func"),
            Some(vec![SymbolKind::Function, SymbolKind::Method])
        );
    }
}
