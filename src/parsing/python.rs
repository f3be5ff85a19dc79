//! Python extractor: classes, functions/methods (`def`/`async def`), and
//! module-level constants, delimited by indentation rather than braces.

use std::sync::OnceLock;

use regex::Regex;

use super::{doc_comment, ExtractorContext};
use crate::regex_toolkit::find_python_block_end;
use crate::symbol::IndexedSymbol;
use crate::types::{AccessLevel, SymbolKind};

fn class_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\s*)class\s+(\w+)(?:\(([^)]*)\))?\s*:").unwrap())
}

fn def_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\s*)(?:async\s+)?def\s+(\w+)\s*\(").unwrap())
}

fn constant_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\s*(?::[^=]+)?=").unwrap())
}

fn import_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(?:import\s+([\w.]+)|from\s+([\w.]+)\s+import)").unwrap())
}

fn indent_of(line: &str) -> usize {
    line.chars().take_while(|c| *c == ' ' || *c == '\t').count()
}

fn python_access(name: &str) -> AccessLevel {
    if name.starts_with("__") && !name.ends_with("__") {
        AccessLevel::Private
    } else if name.starts_with('_') {
        AccessLevel::FilePrivate
    } else {
        AccessLevel::Public
    }
}

fn preceded_by_staticmethod(lines: &[&str], idx: usize) -> bool {
    let mut i = idx;
    while i > 0 {
        i -= 1;
        let t = lines[i].trim();
        if !t.is_empty() {
            return t == "@staticmethod";
        }
    }
    false
}

pub fn extract(ctx: &mut ExtractorContext<'_>) -> Vec<IndexedSymbol> {
    let mut out = Vec::new();
    let lines = ctx.lines;

    for (idx, &line) in lines.iter().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let indent = indent_of(line);
        ctx.pop_containers_above(indent);

        if let Some(caps) = class_re().captures(line) {
            let name = caps[2].to_string();
            let bases: Vec<String> = caps
                .get(3)
                .map(|m| {
                    m.as_str()
                        .split(',')
                        .map(|b| b.trim().to_string())
                        .filter(|b| !b.is_empty())
                        .collect()
                })
                .unwrap_or_default();
            out.push(IndexedSymbol {
                name: name.clone(),
                kind: SymbolKind::Class,
                file_path: ctx.relative_path.to_string(),
                line: idx as u32 + 1,
                end_line: find_python_block_end(lines, idx, indent) as u32,
                access_level: python_access(&name),
                qualified_name: IndexedSymbol::compute_qualified_name(&name, ctx.current_container()),
                container_name: ctx.current_container().map(|s| s.to_string()),
                signature: IndexedSymbol::clamp_signature(trimmed),
                documentation: doc_comment::python_docstring(lines, idx),
                inherits: bases,
                generic_parameters: Vec::new(),
                is_static: false,
                annotations: Vec::new(),
                language: ctx.language,
            });
            ctx.push_container(&name, indent);
            continue;
        }

        if let Some(caps) = def_re().captures(line) {
            let name = caps[2].to_string();
            let container = ctx.current_container().map(|s| s.to_string());
            let is_static = preceded_by_staticmethod(lines, idx);
            let kind = if container.is_some() { SymbolKind::Method } else { SymbolKind::Function };
            out.push(IndexedSymbol {
                name: name.clone(),
                kind,
                file_path: ctx.relative_path.to_string(),
                line: idx as u32 + 1,
                end_line: find_python_block_end(lines, idx, indent) as u32,
                access_level: python_access(&name),
                qualified_name: IndexedSymbol::compute_qualified_name(&name, container.as_deref()),
                container_name: container,
                signature: IndexedSymbol::clamp_signature(trimmed),
                documentation: doc_comment::python_docstring(lines, idx),
                inherits: Vec::new(),
                generic_parameters: Vec::new(),
                is_static,
                annotations: Vec::new(),
                language: ctx.language,
            });
            continue;
        }

        if indent == 0 {
            if let Some(caps) = constant_re().captures(line) {
                let name = caps[1].to_string();
                if name == name.to_uppercase() && name.len() > 1 {
                    out.push(IndexedSymbol {
                        name: name.clone(),
                        kind: SymbolKind::Constant,
                        file_path: ctx.relative_path.to_string(),
                        line: idx as u32 + 1,
                        end_line: idx as u32,
                        access_level: python_access(&name),
                        qualified_name: name.clone(),
                        container_name: None,
                        signature: IndexedSymbol::clamp_signature(trimmed),
                        documentation: None,
                        inherits: Vec::new(),
                        generic_parameters: Vec::new(),
                        is_static: false,
                        annotations: Vec::new(),
                        language: ctx.language,
                    });
                }
            }
        }
    }

    out
}

pub fn imports(lines: &[&str]) -> Vec<String> {
    lines
        .iter()
        .filter_map(|l| {
            import_re().captures(l).map(|c| {
                c.get(1).or_else(|| c.get(2)).map(|m| m.as_str().to_string()).unwrap_or_default()
            })
        })
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Language;

    #[test]
    fn extracts_nested_method_and_docstring() {
        let src = "class Greeter:\n    def greet(self):\n        \"\"\"Says hello.\"\"\"\n        return 1\n";
        let lines: Vec<&str> = src.lines().collect();
        let mut ctx = ExtractorContext::new("a.py", &lines, Language::Python);
        let symbols = extract(&mut ctx);
        let greet = symbols.iter().find(|s| s.name == "greet").unwrap();
        assert_eq!(greet.kind, SymbolKind::Method);
        assert_eq!(greet.container_name.as_deref(), Some("Greeter"));
        assert_eq!(greet.qualified_name, "Greeter.greet");
        assert_eq!(greet.documentation.as_deref(), Some("Says hello."));
    }

    #[test]
    fn container_closes_when_indent_returns() {
        let src = "class A:\n    def m(self):\n        pass\n\ndef top():\n    pass\n";
        let lines: Vec<&str> = src.lines().collect();
        let mut ctx = ExtractorContext::new("a.py", &lines, Language::Python);
        let symbols = extract(&mut ctx);
        let top = symbols.iter().find(|s| s.name == "top").unwrap();
        assert_eq!(top.kind, SymbolKind::Function);
        assert!(top.container_name.is_none());
    }

    #[test]
    fn access_from_underscore_prefix() {
        assert_eq!(python_access("__private"), AccessLevel::Private);
        assert_eq!(python_access("__dunder__"), AccessLevel::Public);
        assert_eq!(python_access("_protected"), AccessLevel::FilePrivate);
        assert_eq!(python_access("public"), AccessLevel::Public);
    }

    #[test]
    fn module_level_uppercase_is_constant() {
        let src = "MAX_SIZE = 10\nx = 1\n";
        let lines: Vec<&str> = src.lines().collect();
        let mut ctx = ExtractorContext::new("a.py", &lines, Language::Python);
        let symbols = extract(&mut ctx);
        assert_eq!(symbols.len(), 1);
        assert_eq!(symbols[0].name, "MAX_SIZE");
    }

    #[test]
    fn static_method_sets_is_static() {
        let src = "class A:\n    @staticmethod\n    def helper():\n        pass\n";
        let lines: Vec<&str> = src.lines().collect();
        let mut ctx = ExtractorContext::new("a.py", &lines, Language::Python);
        let symbols = extract(&mut ctx);
        let helper = symbols.iter().find(|s| s.name == "helper").unwrap();
        assert!(helper.is_static);
    }

    #[test]
    fn import_extraction_handles_both_forms() {
        let src = vec!["import os", "from foo.bar import baz"];
        assert_eq!(imports(&src), vec!["os".to_string(), "foo.bar".to_string()]);
    }
}
