//! C# extractor, by analogy with the Java rule set: class/interface/struct/
//! enum declarations, methods (with `[Test]`/`[Fact]` attribute-based test
//! detection), and `using` imports.

use std::sync::OnceLock;

use regex::Regex;

use super::{doc_comment, parse_keyword_access, ExtractorContext};
use crate::regex_toolkit::find_block_end;
use crate::symbol::IndexedSymbol;
use crate::types::SymbolKind;

const MOD: &str = r"(?:(public|private|protected|internal)\s+)?(?:(?:static|sealed|abstract|partial|virtual|override)\s+)*";

fn type_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"^\s*{MOD}(class|interface|struct|enum)\s+(\w+)(?:\s*:\s*([\w,\s<>]+?))?\s*\{{")).unwrap()
    })
}

fn method_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"^\s*{MOD}[\w<>\[\],?]+\s+(\w+)\s*\(([^)]*)\)\s*\{{")).unwrap()
    })
}

fn using_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*using\s+(?:static\s+)?([\w.]+)\s*;").unwrap())
}

fn is_test_annotated(lines: &[&str], idx: usize) -> bool {
    idx > 0 && {
        let prev = lines[idx - 1].trim();
        prev.starts_with("[Test") || prev.starts_with("[Fact") || prev.starts_with("[TestMethod")
    }
}

fn split_list(s: &str) -> Vec<String> {
    s.split(',').map(|p| p.trim().to_string()).filter(|p| !p.is_empty()).collect()
}

pub fn extract(ctx: &mut ExtractorContext<'_>) -> Vec<IndexedSymbol> {
    let mut out = Vec::new();
    let lines = ctx.lines;

    for (idx, &line) in lines.iter().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with("//") || trimmed.starts_with('[') {
            continue;
        }
        if trimmed.starts_with('}') && line.chars().take_while(|c| c.is_whitespace()).count() == 0 {
            ctx.container_stack.pop();
            continue;
        }

        if let Some(caps) = type_re().captures(line) {
            let kind_word = &caps[2];
            let name = caps[3].to_string();
            let inherits = caps.get(4).map(|m| split_list(m.as_str())).unwrap_or_default();
            let kind = match kind_word {
                "interface" => SymbolKind::Interface,
                "enum" => SymbolKind::Enum,
                "struct" => SymbolKind::Struct,
                _ => SymbolKind::Class,
            };
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

        if ctx.current_container().is_some() {
            if let Some(caps) = method_re().captures(line) {
                let name = caps[1].to_string();
                if matches!(name.as_str(), "if" | "for" | "foreach" | "while" | "switch" | "catch" | "using" | "lock") {
                    continue;
                }
                let container = ctx.current_container().map(|s| s.to_string());
                let kind = if is_test_annotated(lines, idx) { SymbolKind::Test } else { SymbolKind::Method };
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
                    is_static: line.contains(" static "),
                    annotations: Vec::new(),
                    language: ctx.language,
                });
            }
        }
    }

    out
}

pub fn imports(lines: &[&str]) -> Vec<String> {
    lines
        .iter()
        .filter_map(|l| using_re().captures(l).map(|c| c[1].to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Language;

    #[test]
    fn test_attribute_promotes_method() {
        let src = "public class FooTests {\n    [Test]\n    public void ChecksGreeting() {\n    }\n}\n";
        let lines: Vec<&str> = src.lines().collect();
        let mut ctx = ExtractorContext::new("a.cs", &lines, Language::CSharp);
        let symbols = extract(&mut ctx);
        let m = symbols.iter().find(|s| s.name == "ChecksGreeting").unwrap();
        assert_eq!(m.kind, SymbolKind::Test);
    }

    #[test]
    fn using_import_extraction() {
        let src = vec!["using System.Collections.Generic;"];
        assert_eq!(imports(&src), vec!["System.Collections.Generic".to_string()]);
    }
}
