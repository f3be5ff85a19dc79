//! Shared extractor for C, C++, Objective-C, Objective-C++, and C headers:
//! struct/class/enum declarations, `@interface`/`@implementation` blocks,
//! free functions, and `#include` imports.
//!
//! One extractor serves all five because they share brace-delimited blocks
//! and a function-signature shape; the language only changes which
//! declaration keywords are recognized.

use std::sync::OnceLock;

use regex::Regex;

use super::{doc_comment, ExtractorContext};
use crate::regex_toolkit::find_block_end;
use crate::symbol::IndexedSymbol;
use crate::types::SymbolKind;

fn struct_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(?:typedef\s+)?(struct|class|union|enum)\s+(\w+)").unwrap())
}

fn objc_interface_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*@(interface|implementation)\s+(\w+)(?:\s*:\s*(\w+))?").unwrap())
}

fn objc_end_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*@end\b").unwrap())
}

fn function_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(?:static\s+|inline\s+|extern\s+)*[\w:<>,\*&\s]+?[\s\*&](\w+)\s*\(([^;{]*)\)\s*(?:const\s*)?\{").unwrap()
    })
}

fn objc_method_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*[+-]\s*\([\w\s\*]+\)\s*(\w+)").unwrap())
}

fn include_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"^\s*#\s*include\s*[<"]([^">]+)[">]"#).unwrap())
}

const CONTROL_KEYWORDS: &[&str] = &["if", "for", "while", "switch", "catch", "return"];

pub fn extract(ctx: &mut ExtractorContext<'_>) -> Vec<IndexedSymbol> {
    let mut out = Vec::new();
    let lines = ctx.lines;

    for (idx, &line) in lines.iter().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with("//") || trimmed.starts_with('*') {
            continue;
        }

        if objc_end_re().is_match(line) {
            ctx.container_stack.pop();
            continue;
        }
        if trimmed.starts_with('}') && line.chars().take_while(|c| c.is_whitespace()).count() == 0 {
            ctx.container_stack.pop();
            continue;
        }

        if let Some(caps) = objc_interface_re().captures(line) {
            let name = caps[2].to_string();
            let inherits = caps.get(3).map(|m| vec![m.as_str().to_string()]).unwrap_or_default();
            out.push(IndexedSymbol {
                name: name.clone(),
                kind: SymbolKind::Class,
                file_path: ctx.relative_path.to_string(),
                line: idx as u32 + 1,
                end_line: idx as u32,
                access_level: Default::default(),
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

        if let Some(caps) = struct_re().captures(line) {
            let kind_word = &caps[1];
            let name = caps[2].to_string();
            let kind = match kind_word.as_ref() {
                "enum" => SymbolKind::Enum,
                "class" => SymbolKind::Class,
                _ => SymbolKind::Struct,
            };
            out.push(IndexedSymbol {
                name: name.clone(),
                kind,
                file_path: ctx.relative_path.to_string(),
                line: idx as u32 + 1,
                end_line: find_block_end(lines, idx) as u32,
                access_level: Default::default(),
                qualified_name: IndexedSymbol::compute_qualified_name(&name, ctx.current_container()),
                container_name: ctx.current_container().map(|s| s.to_string()),
                signature: IndexedSymbol::clamp_signature(trimmed),
                documentation: doc_comment::doc_above(lines, idx),
                inherits: Vec::new(),
                generic_parameters: Vec::new(),
                is_static: false,
                annotations: Vec::new(),
                language: ctx.language,
            });
            if line.contains('{') {
                ctx.push_container(&name, 0);
            }
            continue;
        }

        if let Some(caps) = objc_method_re().captures(line) {
            let name = caps[1].to_string();
            let container = ctx.current_container().map(|s| s.to_string());
            out.push(IndexedSymbol {
                name: name.clone(),
                kind: SymbolKind::Method,
                file_path: ctx.relative_path.to_string(),
                line: idx as u32 + 1,
                end_line: find_block_end(lines, idx) as u32,
                access_level: Default::default(),
                qualified_name: IndexedSymbol::compute_qualified_name(&name, container.as_deref()),
                container_name: container,
                signature: IndexedSymbol::clamp_signature(trimmed),
                documentation: doc_comment::doc_above(lines, idx),
                inherits: Vec::new(),
                generic_parameters: Vec::new(),
                is_static: line.trim_start().starts_with('+'),
                annotations: Vec::new(),
                language: ctx.language,
            });
            continue;
        }

        if let Some(caps) = function_re().captures(line) {
            let name = caps[1].to_string();
            if CONTROL_KEYWORDS.contains(&name.as_str()) {
                continue;
            }
            let container = ctx.current_container().map(|s| s.to_string());
            let kind = if container.is_some() { SymbolKind::Method } else { SymbolKind::Function };
            out.push(IndexedSymbol {
                name: name.clone(),
                kind,
                file_path: ctx.relative_path.to_string(),
                line: idx as u32 + 1,
                end_line: find_block_end(lines, idx) as u32,
                access_level: Default::default(),
                qualified_name: IndexedSymbol::compute_qualified_name(&name, container.as_deref()),
                container_name: container,
                signature: IndexedSymbol::clamp_signature(trimmed),
                documentation: doc_comment::doc_above(lines, idx),
                inherits: Vec::new(),
                generic_parameters: Vec::new(),
                is_static: line.contains("static "),
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
        .filter_map(|l| include_re().captures(l).map(|c| c[1].to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Language;

    #[test]
    fn extracts_struct_and_free_function() {
        let src = "struct Point {\n    int x;\n};\n\nint add(int a, int b) {\n    return a + b;\n}\n";
        let lines: Vec<&str> = src.lines().collect();
        let mut ctx = ExtractorContext::new("a.c", &lines, Language::C);
        let symbols = extract(&mut ctx);
        assert!(symbols.iter().any(|s| s.name == "Point" && s.kind == SymbolKind::Struct));
        let add = symbols.iter().find(|s| s.name == "add").unwrap();
        assert_eq!(add.kind, SymbolKind::Function);
    }

    #[test]
    fn extracts_objc_interface_and_method() {
        let src = "@interface Animal : NSObject\n- (void)speak;\n@end\n";
        let lines: Vec<&str> = src.lines().collect();
        let mut ctx = ExtractorContext::new("a.m", &lines, Language::ObjectiveC);
        let symbols = extract(&mut ctx);
        let animal = symbols.iter().find(|s| s.name == "Animal").unwrap();
        assert_eq!(animal.inherits, vec!["NSObject".to_string()]);
    }

    #[test]
    fn include_extraction() {
        let src = vec!["#include <stdio.h>", "#include \"local.h\""];
        assert_eq!(imports(&src), vec!["stdio.h".to_string(), "local.h".to_string()]);
    }
}
