//! Swift extractor: types (`class|struct|enum|protocol|actor`), extensions,
//! functions, initializers, top/type-level properties, and type aliases.

use std::sync::OnceLock;

use regex::Regex;

use super::{doc_comment, parse_keyword_access, ExtractorContext};
use crate::regex_toolkit::find_block_end;
use crate::symbol::IndexedSymbol;
use crate::types::{AccessLevel, SymbolKind};

fn access_kw() -> &'static str {
    r"(?:(private|fileprivate|internal|public|open)\s+)?"
}

fn type_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(
            r"^\s*{}(?:final\s+)?(class|struct|enum|protocol|actor)\s+(\w+)",
            access_kw()
        ))
        .unwrap()
    })
}

fn extension_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!(r"^\s*{}extension\s+(\w+)", access_kw())).unwrap())
}

fn func_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"^\s*{}(?:static\s+|class\s+)?func\s+(\w+)", access_kw())).unwrap()
    })
}

fn init_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!(r"^\s*{}init[?!]?\s*\(", access_kw())).unwrap())
}

fn prop_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"^\s*{}(static\s+)?(let|var)\s+(\w+)", access_kw())).unwrap()
    })
}

fn typealias_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!(r"^\s*{}typealias\s+(\w+)", access_kw())).unwrap())
}

fn annotation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"@(\w+)(?:\([^)]*\))?").unwrap())
}

fn import_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*import\s+(\w+)").unwrap())
}

fn indent_of(line: &str) -> usize {
    line.chars().take_while(|c| *c == ' ' || *c == '\t').count()
}

fn access_of(caps: &regex::Captures<'_>, group: usize) -> AccessLevel {
    caps.get(group)
        .map(|m| parse_keyword_access(m.as_str()))
        .unwrap_or(AccessLevel::Internal)
}

/// Parses `< T, U: Comparable >` generic parameters after `name`, honoring
/// nested angle-bracket depth so commas inside `Dictionary<K, V>` bounds
/// don't split a single parameter.
fn parse_generics(rest: &str) -> Vec<String> {
    let Some(open) = rest.find('<') else {
        return Vec::new();
    };
    let bytes = rest[open + 1..].as_bytes();
    let mut depth = 1i32;
    let mut end = bytes.len();
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'<' => depth += 1,
            b'>' => {
                depth -= 1;
                if depth == 0 {
                    end = i;
                    break;
                }
            }
            _ => {}
        }
    }
    split_top_level_commas(&rest[open + 1..open + 1 + end])
}

/// Parses `: A, B` inheritance after the declaration name, stopping at `{`
/// or `where`, honoring nested angle-bracket depth in commas.
fn parse_inheritance(rest: &str) -> Vec<String> {
    let Some(colon) = rest.find(':') else {
        return Vec::new();
    };
    let after = &rest[colon + 1..];
    let stop = [after.find('{'), after.find("where")]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(after.len());
    split_top_level_commas(&after[..stop])
}

fn split_top_level_commas(s: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut current = String::new();
    for ch in s.chars() {
        match ch {
            '<' | '(' | '[' => {
                depth += 1;
                current.push(ch);
            }
            '>' | ')' | ']' => {
                depth -= 1;
                current.push(ch);
            }
            ',' if depth == 0 => parts.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    parts.push(current);
    parts
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

fn annotations_on(line: &str) -> Vec<String> {
    annotation_re().captures_iter(line).map(|c| c[1].to_string()).collect()
}

pub fn extract(ctx: &mut ExtractorContext<'_>) -> Vec<IndexedSymbol> {
    let mut out = Vec::new();
    let lines = ctx.lines;

    for (idx, &line) in lines.iter().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }

        if indent_of(line) == 0 && trimmed.starts_with('}') {
            ctx.container_stack.pop();
            continue;
        }

        if let Some(caps) = type_re().captures(line) {
            let kind_word = caps[2].to_string();
            let name = caps[3].to_string();
            let rest_after_name = &line[caps.get(3).unwrap().end()..];
            out.push(IndexedSymbol {
                name: name.clone(),
                kind: kind_from_swift_type(&kind_word),
                file_path: ctx.relative_path.to_string(),
                line: idx as u32 + 1,
                end_line: find_block_end(lines, idx) as u32,
                access_level: access_of(&caps, 1),
                qualified_name: IndexedSymbol::compute_qualified_name(&name, ctx.current_container()),
                container_name: ctx.current_container().map(|s| s.to_string()),
                signature: IndexedSymbol::clamp_signature(trimmed),
                documentation: doc_comment::doc_above(lines, idx),
                inherits: parse_inheritance(rest_after_name),
                generic_parameters: parse_generics(rest_after_name),
                is_static: false,
                annotations: annotations_on(line),
                language: ctx.language,
            });
            ctx.push_container(&name, indent_of(line));
            continue;
        }

        if let Some(caps) = extension_re().captures(line) {
            let name = caps[2].to_string();
            let rest_after_name = &line[caps.get(2).unwrap().end()..];
            out.push(IndexedSymbol {
                name: name.clone(),
                kind: SymbolKind::Extension,
                file_path: ctx.relative_path.to_string(),
                line: idx as u32 + 1,
                end_line: find_block_end(lines, idx) as u32,
                access_level: access_of(&caps, 1),
                qualified_name: name.clone(),
                container_name: None,
                signature: IndexedSymbol::clamp_signature(trimmed),
                documentation: doc_comment::doc_above(lines, idx),
                inherits: parse_inheritance(rest_after_name),
                generic_parameters: Vec::new(),
                is_static: false,
                annotations: annotations_on(line),
                language: ctx.language,
            });
            ctx.push_container(&name, indent_of(line));
            continue;
        }

        if let Some(caps) = func_re().captures(line) {
            let name = caps[2].to_string();
            let container = ctx.current_container().map(|s| s.to_string());
            let is_static = line.contains("static func") || line.contains("class func");
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
                access_level: access_of(&caps, 1),
                qualified_name: IndexedSymbol::compute_qualified_name(&name, container.as_deref()),
                container_name: container,
                signature: IndexedSymbol::clamp_signature(trimmed),
                documentation: doc_comment::doc_above(lines, idx),
                inherits: Vec::new(),
                generic_parameters: parse_generics(&line[caps.get(2).unwrap().end()..]),
                is_static,
                annotations: annotations_on(line),
                language: ctx.language,
            });
            continue;
        }

        if let Some(caps) = init_re().captures(line) {
            let container = ctx.current_container().map(|s| s.to_string());
            out.push(IndexedSymbol {
                name: "init".to_string(),
                kind: SymbolKind::Method,
                file_path: ctx.relative_path.to_string(),
                line: idx as u32 + 1,
                end_line: find_block_end(lines, idx) as u32,
                access_level: access_of(&caps, 1),
                qualified_name: IndexedSymbol::compute_qualified_name("init", container.as_deref()),
                container_name: container,
                signature: IndexedSymbol::clamp_signature(trimmed),
                documentation: doc_comment::doc_above(lines, idx),
                inherits: Vec::new(),
                generic_parameters: Vec::new(),
                is_static: false,
                annotations: annotations_on(line),
                language: ctx.language,
            });
            continue;
        }

        if let Some(caps) = typealias_re().captures(line) {
            let name = caps[2].to_string();
            let container = ctx.current_container().map(|s| s.to_string());
            out.push(IndexedSymbol {
                name: name.clone(),
                kind: SymbolKind::TypeAlias,
                file_path: ctx.relative_path.to_string(),
                line: idx as u32 + 1,
                end_line: idx as u32,
                access_level: access_of(&caps, 1),
                qualified_name: IndexedSymbol::compute_qualified_name(&name, container.as_deref()),
                container_name: container,
                signature: IndexedSymbol::clamp_signature(trimmed),
                documentation: doc_comment::doc_above(lines, idx),
                inherits: Vec::new(),
                generic_parameters: Vec::new(),
                is_static: false,
                annotations: annotations_on(line),
                language: ctx.language,
            });
            continue;
        }

        // Top/type-level let|var only; this heuristic does not track
        // function-body depth, so a let/var inside a function is still
        // attributed to the enclosing type if one is open.
        if let Some(caps) = prop_re().captures(line) {
            let is_static = caps.get(2).is_some();
            let is_let = caps.get(3).map(|m| m.as_str()) == Some("let");
            let name = caps[4].to_string();
            let container = ctx.current_container().map(|s| s.to_string());
            let kind = if is_let { SymbolKind::Constant } else { SymbolKind::Property };
            out.push(IndexedSymbol {
                name: name.clone(),
                kind,
                file_path: ctx.relative_path.to_string(),
                line: idx as u32 + 1,
                end_line: idx as u32,
                access_level: access_of(&caps, 1),
                qualified_name: IndexedSymbol::compute_qualified_name(&name, container.as_deref()),
                container_name: container,
                signature: IndexedSymbol::clamp_signature(trimmed),
                documentation: doc_comment::doc_above(lines, idx),
                inherits: Vec::new(),
                generic_parameters: Vec::new(),
                is_static,
                annotations: annotations_on(line),
                language: ctx.language,
            });
        }
    }

    out
}

fn kind_from_swift_type(word: &str) -> SymbolKind {
    match word {
        "struct" => SymbolKind::Struct,
        "enum" => SymbolKind::Enum,
        "protocol" => SymbolKind::Protocol,
        _ => SymbolKind::Class,
    }
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
    fn extracts_class_method_and_property() {
        let src = "public class Foo {\n    let x = 1\n    func greet() {}\n}\n";
        let lines: Vec<&str> = src.lines().collect();
        let mut ctx = ExtractorContext::new("a/Foo.swift", &lines, Language::Swift);
        let symbols = extract(&mut ctx);
        let names: Vec<&str> = symbols.iter().map(|s| s.name.as_str()).collect();
        assert!(names.contains(&"Foo"));
        assert!(names.contains(&"x"));
        assert!(names.contains(&"greet"));
        let foo = symbols.iter().find(|s| s.name == "Foo").unwrap();
        assert_eq!(foo.access_level, AccessLevel::Public);
        assert_eq!(foo.kind, SymbolKind::Class);
        let greet = symbols.iter().find(|s| s.name == "greet").unwrap();
        assert_eq!(greet.kind, SymbolKind::Method);
        assert_eq!(greet.container_name.as_deref(), Some("Foo"));
    }

    #[test]
    fn extracts_inheritance_list() {
        let src = "class Foo: Bar, Bazable {\n}\n";
        let lines: Vec<&str> = src.lines().collect();
        let mut ctx = ExtractorContext::new("a.swift", &lines, Language::Swift);
        let symbols = extract(&mut ctx);
        assert_eq!(symbols[0].inherits, vec!["Bar".to_string(), "Bazable".to_string()]);
    }

    #[test]
    fn import_extraction() {
        let src = vec!["import Foundation", "import Bar"];
        assert_eq!(imports(&src), vec!["Foundation".to_string(), "Bar".to_string()]);
    }

    #[test]
    fn test_function_inside_container_is_kind_test() {
        let src = "class FooTests {\n    func testGreets() {}\n}\n";
        let lines: Vec<&str> = src.lines().collect();
        let mut ctx = ExtractorContext::new("a.swift", &lines, Language::Swift);
        let symbols = extract(&mut ctx);
        let t = symbols.iter().find(|s| s.name == "testGreets").unwrap();
        assert_eq!(t.kind, SymbolKind::Test);
    }
}
