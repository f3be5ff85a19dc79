//! Go extractor: struct/interface type declarations, functions, methods
//! (receiver-qualified), and top-level const/var.

use std::sync::OnceLock;

use regex::Regex;

use super::{doc_comment, ExtractorContext};
use crate::regex_toolkit::find_block_end;
use crate::symbol::IndexedSymbol;
use crate::types::{AccessLevel, SymbolKind};

fn struct_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^type\s+(\w+)\s+struct\b").unwrap())
}

fn interface_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^type\s+(\w+)\s+interface\b").unwrap())
}

fn method_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^func\s*\(\s*\w+\s+\*?(\w+)\s*\)\s+(\w+)\s*\(").unwrap())
}

fn func_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^func\s+(\w+)\s*\(").unwrap())
}

fn const_var_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:const|var)\s+(\w+)").unwrap())
}

fn import_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"^\s*(?:import\s+)?"([^"]+)"\s*$"#).unwrap())
}

fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_uppercase())
}

fn access_of(name: &str) -> AccessLevel {
    if is_exported(name) {
        AccessLevel::Public
    } else {
        AccessLevel::Private
    }
}

fn is_test_name(name: &str) -> bool {
    name.starts_with("Test") || name.starts_with("Benchmark")
}

pub fn extract(ctx: &mut ExtractorContext<'_>) -> Vec<IndexedSymbol> {
    let mut out = Vec::new();
    let lines = ctx.lines;

    for (idx, &line) in lines.iter().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }

        if let Some(caps) = struct_re().captures(line) {
            push_type(&mut out, ctx, idx, &caps[1], SymbolKind::Struct);
            continue;
        }
        if let Some(caps) = interface_re().captures(line) {
            push_type(&mut out, ctx, idx, &caps[1], SymbolKind::Interface);
            continue;
        }
        if let Some(caps) = method_re().captures(line) {
            let container = caps[1].to_string();
            let name = caps[2].to_string();
            let kind = if is_test_name(&name) { SymbolKind::Test } else { SymbolKind::Method };
            out.push(IndexedSymbol {
                name: name.clone(),
                kind,
                file_path: ctx.relative_path.to_string(),
                line: idx as u32 + 1,
                end_line: find_block_end(lines, idx) as u32,
                access_level: access_of(&name),
                qualified_name: format!("{container}.{name}"),
                container_name: Some(container),
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
        if let Some(caps) = func_re().captures(line) {
            let name = caps[1].to_string();
            let kind = if is_test_name(&name) { SymbolKind::Test } else { SymbolKind::Function };
            out.push(IndexedSymbol {
                name: name.clone(),
                kind,
                file_path: ctx.relative_path.to_string(),
                line: idx as u32 + 1,
                end_line: find_block_end(lines, idx) as u32,
                access_level: access_of(&name),
                qualified_name: name.clone(),
                container_name: None,
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
        if let Some(caps) = const_var_re().captures(line) {
            let name = caps[1].to_string();
            out.push(IndexedSymbol {
                name: name.clone(),
                kind: if trimmed.starts_with("const") { SymbolKind::Constant } else { SymbolKind::Variable },
                file_path: ctx.relative_path.to_string(),
                line: idx as u32 + 1,
                end_line: idx as u32,
                access_level: access_of(&name),
                qualified_name: name.clone(),
                container_name: None,
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

fn push_type(out: &mut Vec<IndexedSymbol>, ctx: &ExtractorContext<'_>, idx: usize, name: &str, kind: SymbolKind) {
    let lines = ctx.lines;
    let trimmed = lines[idx].trim_start();
    out.push(IndexedSymbol {
        name: name.to_string(),
        kind,
        file_path: ctx.relative_path.to_string(),
        line: idx as u32 + 1,
        end_line: find_block_end(lines, idx) as u32,
        access_level: access_of(name),
        qualified_name: name.to_string(),
        container_name: None,
        signature: IndexedSymbol::clamp_signature(trimmed),
        documentation: doc_comment::doc_above(lines, idx),
        inherits: Vec::new(),
        generic_parameters: Vec::new(),
        is_static: false,
        annotations: Vec::new(),
        language: ctx.language,
    });
}

pub fn imports(lines: &[&str]) -> Vec<String> {
    lines
        .iter()
        .filter_map(|l| import_line_re().captures(l).map(|c| c[1].to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Language;

    #[test]
    fn exported_vs_unexported() {
        let src = "type Server struct{\n}\nfunc (s *Server) Serve() {\n}\nfunc helper() {\n}\n";
        let lines: Vec<&str> = src.lines().collect();
        let mut ctx = ExtractorContext::new("svc/handler.go", &lines, Language::Go);
        let symbols = extract(&mut ctx);
        let server = symbols.iter().find(|s| s.name == "Server").unwrap();
        assert_eq!(server.access_level, AccessLevel::Public);
        let serve = symbols.iter().find(|s| s.name == "Serve").unwrap();
        assert_eq!(serve.access_level, AccessLevel::Public);
        assert_eq!(serve.container_name.as_deref(), Some("Server"));
        let helper = symbols.iter().find(|s| s.name == "helper").unwrap();
        assert_eq!(helper.access_level, AccessLevel::Private);
    }

    #[test]
    fn test_and_benchmark_functions_detected() {
        let src = "func TestFoo(t *testing.T) {\n}\nfunc BenchmarkBar(b *testing.B) {\n}\n";
        let lines: Vec<&str> = src.lines().collect();
        let mut ctx = ExtractorContext::new("a_test.go", &lines, Language::Go);
        let symbols = extract(&mut ctx);
        assert!(symbols.iter().all(|s| s.kind == SymbolKind::Test));
    }

    #[test]
    fn import_extraction() {
        let src = vec!["import \"fmt\"", "\t\"os\""];
        assert_eq!(imports(&src), vec!["fmt".to_string(), "os".to_string()]);
    }
}
