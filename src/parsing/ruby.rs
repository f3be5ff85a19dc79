//! Ruby extractor: `class`/`module` declarations and `def`s. Ruby blocks
//! close with a bare `end` rather than a brace, so this extractor counts
//! `class|module|def|do` openers against `end` closers instead of reusing
//! the brace-balance finder.

use std::sync::OnceLock;

use regex::Regex;

use super::{doc_comment, ExtractorContext};
use crate::symbol::IndexedSymbol;
use crate::types::{AccessLevel, SymbolKind};

fn class_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*class\s+(\w+)(?:\s*<\s*([\w:]+))?").unwrap())
}

fn module_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*module\s+(\w+)").unwrap())
}

fn def_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*def\s+(?:self\.)?(\w+[?!=]?)").unwrap())
}

fn access_marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(private|protected|public)\s*$").unwrap())
}

fn require_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"^\s*require(?:_relative)?\s+['"]([^'"]+)['"]"#).unwrap())
}

const OPENERS: &[&str] = &["class ", "module ", "def ", "do", "do |"];

fn opens_block(trimmed: &str) -> bool {
    OPENERS.iter().any(|o| trimmed.starts_with(o)) || trimmed == "do"
}

fn find_ruby_end(lines: &[&str], start: usize) -> usize {
    let mut depth = 0i64;
    for (offset, line) in lines[start..].iter().enumerate() {
        let trimmed = line.trim();
        if opens_block(trimmed) {
            depth += 1;
        }
        if trimmed == "end" || trimmed.starts_with("end ") || trimmed.starts_with("end.") {
            depth -= 1;
            if depth <= 0 {
                return start + offset;
            }
        }
    }
    start
}

pub fn extract(ctx: &mut ExtractorContext<'_>) -> Vec<IndexedSymbol> {
    let mut out = Vec::new();
    let lines = ctx.lines;
    let mut visibility = AccessLevel::Public;

    for (idx, &line) in lines.iter().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if access_marker_re().is_match(line) {
            visibility = match trimmed.trim() {
                "private" => AccessLevel::Private,
                "protected" => AccessLevel::FilePrivate,
                _ => AccessLevel::Public,
            };
            continue;
        }

        if trimmed.trim() == "end" {
            ctx.container_stack.pop();
            continue;
        }

        if let Some(caps) = class_re().captures(line) {
            let name = caps[1].to_string();
            let inherits = caps.get(2).map(|m| vec![m.as_str().to_string()]).unwrap_or_default();
            out.push(IndexedSymbol {
                name: name.clone(),
                kind: SymbolKind::Class,
                file_path: ctx.relative_path.to_string(),
                line: idx as u32 + 1,
                end_line: find_ruby_end(lines, idx) as u32,
                access_level: AccessLevel::Public,
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
            visibility = AccessLevel::Public;
            continue;
        }

        if let Some(caps) = module_re().captures(line) {
            let name = caps[1].to_string();
            out.push(IndexedSymbol {
                name: name.clone(),
                kind: SymbolKind::Module,
                file_path: ctx.relative_path.to_string(),
                line: idx as u32 + 1,
                end_line: find_ruby_end(lines, idx) as u32,
                access_level: AccessLevel::Public,
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
            ctx.push_container(&name, 0);
            continue;
        }

        if let Some(caps) = def_re().captures(line) {
            let name = caps[1].to_string();
            let is_static = line.contains("def self.");
            let container = ctx.current_container().map(|s| s.to_string());
            let kind = match &container {
                Some(_) if name.starts_with("test_") => SymbolKind::Test,
                Some(_) => SymbolKind::Method,
                None => SymbolKind::Function,
            };
            out.push(IndexedSymbol {
                name: name.clone(),
                kind,
                file_path: ctx.relative_path.to_string(),
                line: idx as u32 + 1,
                end_line: find_ruby_end(lines, idx) as u32,
                access_level: visibility,
                qualified_name: IndexedSymbol::compute_qualified_name(&name, container.as_deref()),
                container_name: container,
                signature: IndexedSymbol::clamp_signature(trimmed),
                documentation: doc_comment::doc_above(lines, idx),
                inherits: Vec::new(),
                generic_parameters: Vec::new(),
                is_static,
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
        .filter_map(|l| require_re().captures(l).map(|c| c[1].to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Language;

    #[test]
    fn extracts_class_with_superclass_and_method() {
        let src = "class Dog < Animal\n  def bark\n    puts 'woof'\n  end\nend\n";
        let lines: Vec<&str> = src.lines().collect();
        let mut ctx = ExtractorContext::new("a.rb", &lines, Language::Ruby);
        let symbols = extract(&mut ctx);
        let dog = symbols.iter().find(|s| s.name == "Dog").unwrap();
        assert_eq!(dog.inherits, vec!["Animal".to_string()]);
        let bark = symbols.iter().find(|s| s.name == "bark").unwrap();
        assert_eq!(bark.kind, SymbolKind::Method);
    }

    #[test]
    fn private_marker_affects_subsequent_methods() {
        let src = "class Foo\n  private\n  def secret\n  end\nend\n";
        let lines: Vec<&str> = src.lines().collect();
        let mut ctx = ExtractorContext::new("a.rb", &lines, Language::Ruby);
        let symbols = extract(&mut ctx);
        let secret = symbols.iter().find(|s| s.name == "secret").unwrap();
        assert_eq!(secret.access_level, AccessLevel::Private);
    }

    #[test]
    fn require_extraction() {
        let src = vec!["require 'json'", "require_relative './foo'"];
        assert_eq!(imports(&src), vec!["json".to_string(), "./foo".to_string()]);
    }
}
