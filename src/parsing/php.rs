//! PHP extractor: class/interface/trait declarations, visibility-qualified
//! methods, and namespace `use` imports.

use std::sync::OnceLock;

use regex::Regex;

use super::{doc_comment, parse_keyword_access, ExtractorContext};
use crate::regex_toolkit::find_block_end;
use crate::symbol::IndexedSymbol;
use crate::types::SymbolKind;

const MOD: &str = r"(?:(public|private|protected)\s+)?(?:(?:static|abstract|final)\s+)*";

fn type_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(?:abstract\s+|final\s+)?(class|interface|trait)\s+(\w+)(?:\s+extends\s+(\w+))?(?:\s+implements\s+([\w,\s]+?))?\s*\{").unwrap()
    })
}

fn func_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!(r"^\s*{MOD}function\s+&?(\w+)\s*\(")).unwrap())
}

fn access_group() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(?:(public|private|protected)\s+)?(?:(?:static|abstract|final)\s+)*function").unwrap())
}

fn use_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*use\s+([\w\\]+)").unwrap())
}

fn split_list(s: &str) -> Vec<String> {
    s.split(',').map(|p| p.trim().to_string()).filter(|p| !p.is_empty()).collect()
}

pub fn extract(ctx: &mut ExtractorContext<'_>) -> Vec<IndexedSymbol> {
    let mut out = Vec::new();
    let lines = ctx.lines;

    for (idx, &line) in lines.iter().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with("//") || trimmed.starts_with('#') {
            continue;
        }
        if trimmed.starts_with('}') && line.chars().take_while(|c| c.is_whitespace()).count() == 0 {
            ctx.container_stack.pop();
            continue;
        }

        if let Some(caps) = type_re().captures(line) {
            let kind_word = &caps[1];
            let name = caps[2].to_string();
            let mut inherits = Vec::new();
            if let Some(e) = caps.get(3) {
                inherits.push(e.as_str().to_string());
            }
            if let Some(i) = caps.get(4) {
                inherits.extend(split_list(i.as_str()));
            }
            let kind = match kind_word.as_ref() {
                "interface" => SymbolKind::Interface,
                _ => SymbolKind::Class,
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
                inherits,
                generic_parameters: Vec::new(),
                is_static: false,
                annotations: Vec::new(),
                language: ctx.language,
            });
            ctx.push_container(&name, 0);
            continue;
        }

        if let Some(caps) = func_re().captures(line) {
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
                access_level: access_group()
                    .captures(line)
                    .and_then(|c| c.get(1))
                    .map(|m| parse_keyword_access(m.as_str()))
                    .unwrap_or_default(),
                qualified_name: IndexedSymbol::compute_qualified_name(&name, container.as_deref()),
                container_name: container,
                signature: IndexedSymbol::clamp_signature(trimmed),
                documentation: doc_comment::doc_above(lines, idx),
                inherits: Vec::new(),
                generic_parameters: Vec::new(),
                is_static: line.contains("static"),
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
        .filter_map(|l| use_re().captures(l).map(|c| c[1].to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Language;

    #[test]
    fn extracts_class_with_implements_and_method() {
        let src = "class Foo implements Bar, Baz {\n    public function greet() {\n    }\n}\n";
        let lines: Vec<&str> = src.lines().collect();
        let mut ctx = ExtractorContext::new("a.php", &lines, Language::Php);
        let symbols = extract(&mut ctx);
        let foo = symbols.iter().find(|s| s.name == "Foo").unwrap();
        assert_eq!(foo.inherits, vec!["Bar".to_string(), "Baz".to_string()]);
        let greet = symbols.iter().find(|s| s.name == "greet").unwrap();
        assert_eq!(greet.kind, SymbolKind::Method);
    }

    #[test]
    fn use_import_extraction() {
        let src = vec!["use App\\Models\\User;"];
        assert_eq!(imports(&src), vec!["App\\Models\\User".to_string()]);
    }
}
