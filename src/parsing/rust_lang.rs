//! Rust extractor: struct/enum/trait declarations, `impl [Trait for] Type`
//! blocks (recorded as an extension and pushed as the current container for
//! subsequent `fn`s), functions, const/static, type aliases, and modules.

use std::sync::OnceLock;

use regex::Regex;

use super::{doc_comment, ExtractorContext};
use crate::regex_toolkit::find_block_end;
use crate::symbol::IndexedSymbol;
use crate::types::{AccessLevel, SymbolKind};

const VIS: &str = r"(?:pub(?:\([^)]*\))?\s+)?";

fn struct_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!(r"^\s*{VIS}struct\s+(\w+)")).unwrap())
}

fn enum_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!(r"^\s*{VIS}enum\s+(\w+)")).unwrap())
}

fn trait_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!(r"^\s*{VIS}trait\s+(\w+)")).unwrap())
}

fn impl_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*impl(?:<[^>]*>)?\s+(?:(\w+)(?:<[^>]*>)?\s+for\s+)?(\w+)").unwrap())
}

fn fn_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!(r"^\s*{VIS}(?:async\s+)?fn\s+(\w+)")).unwrap())
}

fn const_static_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!(r"^\s*{VIS}(const|static)\s+(?:mut\s+)?(\w+)")).unwrap())
}

fn type_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!(r"^\s*{VIS}type\s+(\w+)")).unwrap())
}

fn mod_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!(r"^\s*{VIS}mod\s+(\w+)")).unwrap())
}

fn use_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(?:pub\s+)?use\s+([^;]+);").unwrap())
}

fn is_pub(line: &str) -> bool {
    line.trim_start().starts_with("pub")
}

fn access_of(line: &str) -> AccessLevel {
    if is_pub(line) {
        AccessLevel::Public
    } else {
        AccessLevel::Private
    }
}

fn preceded_by_test_attr(lines: &[&str], idx: usize) -> bool {
    if idx == 0 {
        return false;
    }
    lines[idx - 1].trim() == "#[test]"
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

        if let Some(caps) = struct_re().captures(line) {
            push_simple(&mut out, ctx, idx, &caps[1], SymbolKind::Struct, Vec::new());
            continue;
        }
        if let Some(caps) = enum_re().captures(line) {
            push_simple(&mut out, ctx, idx, &caps[1], SymbolKind::Enum, Vec::new());
            continue;
        }
        if let Some(caps) = trait_re().captures(line) {
            push_simple(&mut out, ctx, idx, &caps[1], SymbolKind::Trait, Vec::new());
            continue;
        }
        if let Some(caps) = impl_re().captures(line) {
            let trait_name = caps.get(1).map(|m| m.as_str().to_string());
            let type_name = caps[2].to_string();
            let inherits: Vec<String> = trait_name.into_iter().collect();
            push_simple(&mut out, ctx, idx, &type_name, SymbolKind::Extension, inherits);
            ctx.push_container(&type_name, 0);
            continue;
        }
        if let Some(caps) = fn_re().captures(line) {
            let name = caps[1].to_string();
            let container = ctx.current_container().map(|s| s.to_string());
            let kind = if preceded_by_test_attr(lines, idx) || name.starts_with("test_") {
                SymbolKind::Test
            } else if container.is_some() {
                SymbolKind::Method
            } else {
                SymbolKind::Function
            };
            out.push(IndexedSymbol {
                name: name.clone(),
                kind,
                file_path: ctx.relative_path.to_string(),
                line: idx as u32 + 1,
                end_line: find_block_end(lines, idx) as u32,
                access_level: access_of(line),
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
        if let Some(caps) = const_static_re().captures(line) {
            let kind = if &caps[1] == "const" { SymbolKind::Constant } else { SymbolKind::Variable };
            push_simple(&mut out, ctx, idx, &caps[2], kind, Vec::new());
            continue;
        }
        if let Some(caps) = type_re().captures(line) {
            push_simple(&mut out, ctx, idx, &caps[1], SymbolKind::TypeAlias, Vec::new());
            continue;
        }
        if let Some(caps) = mod_re().captures(line) {
            push_simple(&mut out, ctx, idx, &caps[1], SymbolKind::Module, Vec::new());
        }
    }

    out
}

fn push_simple(
    out: &mut Vec<IndexedSymbol>,
    ctx: &ExtractorContext<'_>,
    idx: usize,
    name: &str,
    kind: SymbolKind,
    inherits: Vec<String>,
) {
    let lines = ctx.lines;
    let line = lines[idx];
    let trimmed = line.trim_start();
    let container = ctx.current_container().map(|s| s.to_string());
    out.push(IndexedSymbol {
        name: name.to_string(),
        kind,
        file_path: ctx.relative_path.to_string(),
        line: idx as u32 + 1,
        end_line: find_block_end(lines, idx) as u32,
        access_level: access_of(line),
        qualified_name: IndexedSymbol::compute_qualified_name(name, container.as_deref()),
        container_name: container,
        signature: IndexedSymbol::clamp_signature(trimmed),
        documentation: doc_comment::doc_above(lines, idx),
        inherits,
        generic_parameters: Vec::new(),
        is_static: false,
        annotations: Vec::new(),
        language: ctx.language,
    });
}

pub fn imports(lines: &[&str]) -> Vec<String> {
    lines
        .iter()
        .filter_map(|l| use_re().captures(l).map(|c| c[1].trim().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Language;

    #[test]
    fn test_attribute_promotes_function() {
        let src = "#[test]\nfn checks_something() {\n}\n";
        let lines: Vec<&str> = src.lines().collect();
        let mut ctx = ExtractorContext::new("a.rs", &lines, Language::Rust);
        let symbols = extract(&mut ctx);
        assert_eq!(symbols[0].kind, SymbolKind::Test);
    }

    #[test]
    fn impl_for_sets_inherits_and_container() {
        let src = "impl Display for Foo {\n    fn fmt(&self) {\n    }\n}\n";
        let lines: Vec<&str> = src.lines().collect();
        let mut ctx = ExtractorContext::new("a.rs", &lines, Language::Rust);
        let symbols = extract(&mut ctx);
        let ext = symbols.iter().find(|s| s.kind == SymbolKind::Extension).unwrap();
        assert_eq!(ext.inherits, vec!["Display".to_string()]);
        let fmt = symbols.iter().find(|s| s.name == "fmt").unwrap();
        assert_eq!(fmt.container_name.as_deref(), Some("Foo"));
    }

    #[test]
    fn pub_visibility_is_public() {
        let src = "pub struct Widget;\nstruct Internal;\n";
        let lines: Vec<&str> = src.lines().collect();
        let mut ctx = ExtractorContext::new("a.rs", &lines, Language::Rust);
        let symbols = extract(&mut ctx);
        assert_eq!(symbols[0].access_level, AccessLevel::Public);
        assert_eq!(symbols[1].access_level, AccessLevel::Private);
    }

    #[test]
    fn use_path_captured_verbatim() {
        let src = vec!["use std::collections::HashMap;"];
        assert_eq!(imports(&src), vec!["std::collections::HashMap".to_string()]);
    }
}
