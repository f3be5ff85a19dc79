//! Per-language symbol and import extraction, dispatched by [`Language`].
//!
//! Dispatch selects plain functions rather than trait objects, since every
//! extractor shares one context type and there is no need for dynamic
//! dispatch.

mod c_family;
mod csharp;
mod doc_comment;
mod go;
mod java;
mod javascript;
mod kotlin;
mod php;
mod python;
mod ruby;
mod rust_lang;
mod swift;

use crate::regex_toolkit::fnv1a64;
use crate::symbol::IndexedSymbol;
use crate::types::{AccessLevel, Language};
use serde::{Deserialize, Serialize};

/// Maps a bare modifier keyword (already matched by a per-language regex)
/// to an [`AccessLevel`]; unrecognized or absent modifiers default internal.
pub(crate) fn parse_keyword_access(token: &str) -> AccessLevel {
    match token {
        "private" => AccessLevel::Private,
        "fileprivate" => AccessLevel::FilePrivate,
        "protected" => AccessLevel::FilePrivate,
        "public" => AccessLevel::Public,
        "open" => AccessLevel::Open,
        _ => AccessLevel::Internal,
    }
}

/// Files above this size are never parsed or indexed.
pub const MAX_SOURCE_FILE_BYTES: u64 = 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedFile {
    pub relative_path: String,
    pub absolute_path: String,
    pub language: Language,
    pub symbols: Vec<IndexedSymbol>,
    pub imports: Vec<String>,
    pub line_count: u32,
    pub size: u64,
    pub indexed_at: u64,
    pub content_hash: u64,
}

/// Mutable scratch state threaded through one language extractor's pass over
/// a file's lines: tracks the one "current container" used by every
/// extractor's nesting heuristic plus the doc-comment lookback buffer.
pub struct ExtractorContext<'a> {
    pub relative_path: &'a str,
    pub lines: &'a [&'a str],
    pub language: Language,
    pub container_stack: Vec<ContainerFrame>,
}

#[derive(Debug, Clone)]
pub struct ContainerFrame {
    pub name: String,
    /// Indentation of the container header, used by indent-delimited
    /// languages (Python) to know when the container has closed.
    pub indent: usize,
}

impl<'a> ExtractorContext<'a> {
    pub fn new(relative_path: &'a str, lines: &'a [&'a str], language: Language) -> Self {
        Self {
            relative_path,
            lines,
            language,
            container_stack: Vec::new(),
        }
    }

    pub fn current_container(&self) -> Option<&str> {
        self.container_stack.last().map(|f| f.name.as_str())
    }

    pub fn push_container(&mut self, name: &str, indent: usize) {
        self.container_stack.push(ContainerFrame {
            name: name.to_string(),
            indent,
        });
    }

    /// Pops containers whose body has ended at or before `indent` (used by
    /// indent-delimited languages).
    pub fn pop_containers_above(&mut self, indent: usize) {
        while let Some(top) = self.container_stack.last() {
            if indent <= top.indent {
                self.container_stack.pop();
            } else {
                break;
            }
        }
    }
}

/// Parses one file's bytes into an [`IndexedFile`]. Returns `None` if `bytes`
/// is not valid UTF-8. `indexed_at` is the wall-clock seconds the caller
/// observed; passed in rather than read here so this function stays pure.
pub fn extract_file(
    relative_path: &str,
    absolute_path: &str,
    language: Language,
    bytes: &[u8],
    indexed_at: u64,
) -> Option<IndexedFile> {
    let content = std::str::from_utf8(bytes).ok()?;
    let content_hash = fnv1a64(bytes);
    let lines: Vec<&str> = content.lines().collect();
    let line_count = lines.len() as u32;
    let size = bytes.len() as u64;

    if !language.is_extractor_eligible() {
        return Some(IndexedFile {
            relative_path: relative_path.to_string(),
            absolute_path: absolute_path.to_string(),
            language,
            symbols: Vec::new(),
            imports: Vec::new(),
            line_count,
            size,
            indexed_at,
            content_hash,
        });
    }

    let mut ctx = ExtractorContext::new(relative_path, &lines, language);
    let symbols = dispatch_symbols(&mut ctx);
    let imports = dispatch_imports(language, &lines);

    Some(IndexedFile {
        relative_path: relative_path.to_string(),
        absolute_path: absolute_path.to_string(),
        language,
        symbols,
        imports,
        line_count,
        size,
        indexed_at,
        content_hash,
    })
}

fn dispatch_symbols(ctx: &mut ExtractorContext<'_>) -> Vec<IndexedSymbol> {
    use Language::*;
    match ctx.language {
        Swift => swift::extract(ctx),
        Python => python::extract(ctx),
        JavaScript | JavaScriptReact | TypeScript | TypeScriptReact => javascript::extract(ctx),
        Go => go::extract(ctx),
        Rust => rust_lang::extract(ctx),
        Java => java::extract(ctx),
        Kotlin => kotlin::extract(ctx),
        Ruby => ruby::extract(ctx),
        Php => php::extract(ctx),
        CSharp => csharp::extract(ctx),
        C | Cpp | ObjectiveC | ObjectiveCpp | CHeader => c_family::extract(ctx),
        _ => Vec::new(),
    }
}

fn dispatch_imports(language: Language, lines: &[&str]) -> Vec<String> {
    use Language::*;
    let raw = match language {
        Swift => swift::imports(lines),
        Python => python::imports(lines),
        JavaScript | JavaScriptReact | TypeScript | TypeScriptReact => javascript::imports(lines),
        Go => go::imports(lines),
        Rust => rust_lang::imports(lines),
        Java => java::imports(lines),
        Kotlin => kotlin::imports(lines),
        Ruby => ruby::imports(lines),
        Php => php::imports(lines),
        CSharp => csharp::imports(lines),
        C | Cpp | ObjectiveC | ObjectiveCpp | CHeader => c_family::imports(lines),
        _ => Vec::new(),
    };
    dedup_preserve_order(raw)
}

fn dedup_preserve_order(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        if seen.insert(item.clone()) {
            out.push(item);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_eligible_language_produces_empty_symbols_with_correct_metadata() {
        let file = extract_file("README.md", "/w/README.md", Language::Markdown, b"# Title\nbody\n", 100).unwrap();
        assert!(file.symbols.is_empty());
        assert!(file.imports.is_empty());
        assert_eq!(file.line_count, 2);
        assert_eq!(file.size, 13);
    }

    #[test]
    fn invalid_utf8_returns_none() {
        assert!(extract_file("x", "/w/x", Language::Rust, &[0xff, 0xfe, 0x00], 0).is_none());
    }

    #[test]
    fn content_hash_is_fnv1a64_of_raw_bytes() {
        let file = extract_file("a.rs", "/w/a.rs", Language::Rust, b"fn main() {}\n", 0).unwrap();
        assert_eq!(file.content_hash, fnv1a64(b"fn main() {}\n"));
    }
}
