//! Kotlin extractor: class/interface/object declarations, `fun`, and
//! `val`/`var` properties.
//!
//! `val` is always recorded as a constant regardless of enclosing class
//! context; this is a known approximation carried over rather than fixed,
//! since resolving it would require tracking scope more precisely than the
//! rest of this engine's container-stack heuristic does.

use std::sync::OnceLock;

use regex::Regex;

use super::{doc_comment, parse_keyword_access, ExtractorContext};
use crate::regex_toolkit::find_block_end;
use crate::symbol::IndexedSymbol;
use crate::types::SymbolKind;

const MOD: &str = r"(?:(private|internal|public)\s+)?(?:(?:open|final|abstract|data|sealed)\s+)*";

fn type_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"^\s*{MOD}(class|interface|object)\s+(\w+)(?:\s*:\s*([\w,\s()]+?))?\s*\{{")).unwrap()
    })
}

fn fun_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!(r"^\s*{MOD}fun\s+(\w+)\s*\(")).unwrap())
}

fn prop_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!(r"^\s*{MOD}(val|var)\s+(\w+)")).unwrap())
}

fn import_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*import\s+([\w.]+)").unwrap())
}

fn split_bases(s: &str) -> Vec<String> {
    s.split(',')
        .map(|p| p.trim().split('(').next().unwrap_or("").trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

pub fn extract(ctx: &mut ExtractorContext<'_>) -> Vec<IndexedSymbol> {
    let mut out = Vec::new();
    let lines = ctx.lines;

    for (idx, &line) in lines.iter().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }
        if trimmed.starts_with('}') && line.chars().take_while(|c| c.is_whitespace()).count() == 0 {
            ctx.container_stack.pop();
            continue;
        }

        if let Some(caps) = type_re().captures(line) {
            let kind_word = &caps[2];
            let name = caps[3].to_string();
            let inherits = caps.get(4).map(|m| split_bases(m.as_str())).unwrap_or_default();
            let kind = if kind_word == "interface" { SymbolKind::Interface } else { SymbolKind::Class };
            out.push(IndexedSymbol {
                name: name.clone(),
                kind,
                file_path: ctx.relative_path.to_string(),
                line: idx as u32 + 1,
                end_line: find_block_end(lines, idx) as u32,
                access_level: caps.get(1).map(|m| parse_keyword_access(m.as_str())).unwrap_or_default(),
                qualified_name: IndexedSymbol::compute_qualified_name(&name, ctx.current_container()),
                container_name: ctx.current_container().map(|s| s.to_string()),
                signature: IndexedSymbol::clamp_signature(trimmed),
                documentation: doc_comment::doc_above(lines, idx),
                inherits,
                generic_parameters: Vec::new(),
                is_static: false,
                annotations: Vec::new(),
                language: ctx.language,
            });
            ctx.push_container(&name, 0);
            continue;
        }

        if let Some(caps) = fun_re().captures(line) {
            let name = caps[2].to_string();
            let container = ctx.current_container().map(|s| s.to_string());
            let kind = match &container {
                Some(_) if name.starts_with("test") => SymbolKind::Test,
                Some(_) => SymbolKind::Method,
                None => SymbolKind::Function,
            };
            out.push(IndexedSymbol {
                name: name.clone(),
                kind,
                file_path: ctx.relative_path.to_string(),
                line: idx as u32 + 1,
                end_line: find_block_end(lines, idx) as u32,
                access_level: caps.get(1).map(|m| parse_keyword_access(m.as_str())).unwrap_or_default(),
                qualified_name: IndexedSymbol::compute_qualified_name(&name, container.as_deref()),
                container_name: container,
                signature: IndexedSymbol::clamp_signature(trimmed),
                documentation: doc_comment::doc_above(lines, idx),
                inherits: Vec::new(),
                generic_parameters: Vec::new(),
                is_static: false,
                annotations: Vec::new(),
                language: ctx.language,
            });
            continue;
        }

        if let Some(caps) = prop_re().captures(line) {
            let is_val = &caps[2] == "val";
            let name = caps[3].to_string();
            let container = ctx.current_container().map(|s| s.to_string());
            let kind = if is_val { SymbolKind::Constant } else { SymbolKind::Property };
            out.push(IndexedSymbol {
                name: name.clone(),
                kind,
                file_path: ctx.relative_path.to_string(),
                line: idx as u32 + 1,
                end_line: idx as u32,
                access_level: caps.get(1).map(|m| parse_keyword_access(m.as_str())).unwrap_or_default(),
                qualified_name: IndexedSymbol::compute_qualified_name(&name, container.as_deref()),
                container_name: container,
                signature: IndexedSymbol::clamp_signature(trimmed),
                documentation: doc_comment::doc_above(lines, idx),
                inherits: Vec::new(),
                generic_parameters: Vec::new(),
                is_static: false,
                annotations: Vec::new(),
                language: ctx.language,
            });
        }
    }

    out
}

pub fn imports(lines: &[&str]) -> Vec<String> {
    lines
        .iter()
        .filter_map(|l| import_re().captures(l).map(|c| c[1].to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Language;

    #[test]
    fn val_is_always_constant() {
        let src = "class Foo {\n    val bar = 1\n}\n";
        let lines: Vec<&str> = src.lines().collect();
        let mut ctx = ExtractorContext::new("a.kt", &lines, Language::Kotlin);
        let symbols = extract(&mut ctx);
        let bar = symbols.iter().find(|s| s.name == "bar").unwrap();
        assert_eq!(bar.kind, SymbolKind::Constant);
    }

    #[test]
    fn import_extraction() {
        let src = vec!["import kotlin.collections.List"];
        assert_eq!(imports(&src), vec!["kotlin.collections.List".to_string()]);
    }
}
