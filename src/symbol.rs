//! `IndexedSymbol` and the small reference/edge records derived from it.
//!
//! Identity and equality use a stable `file:line:name` string rather than
//! interned numeric ids, since this engine keeps no persistent storage to
//! intern into.

use crate::types::{AccessLevel, Language, SymbolKind};
use serde::{Deserialize, Serialize};

const MAX_SIGNATURE_LEN: usize = 300;
const MAX_DOC_LEN: usize = 500;

/// A single declared symbol extracted from a source file.
///
/// Equality and hashing are by [`IndexedSymbol::identity`] alone: two
/// symbols with the same file, line, and name are considered the same
/// symbol even if other fields differ transiently between re-index passes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedSymbol {
    pub name: String,
    pub kind: SymbolKind,
    pub file_path: String,
    pub line: u32,
    pub end_line: u32,
    pub access_level: AccessLevel,
    pub qualified_name: String,
    pub container_name: Option<String>,
    pub signature: String,
    pub documentation: Option<String>,
    pub inherits: Vec<String>,
    pub generic_parameters: Vec<String>,
    pub is_static: bool,
    pub annotations: Vec<String>,
    pub language: Language,
}

impl IndexedSymbol {
    /// Stable identity: `filePath:line:name`.
    pub fn identity(&self) -> String {
        format!("{}:{}:{}", self.file_path, self.line, self.name)
    }

    /// Truncates `raw` to [`MAX_SIGNATURE_LEN`] characters (by char count,
    /// to stay UTF-8 safe), after trimming surrounding whitespace.
    pub fn clamp_signature(raw: &str) -> String {
        clamp_chars(raw.trim(), MAX_SIGNATURE_LEN)
    }

    /// Truncates `raw` to [`MAX_DOC_LEN`] characters.
    pub fn clamp_documentation(raw: &str) -> String {
        clamp_chars(raw.trim(), MAX_DOC_LEN)
    }

    /// `Container.name` when `container_name` is set, else the bare name.
    pub fn compute_qualified_name(name: &str, container_name: Option<&str>) -> String {
        match container_name {
            Some(c) if !c.is_empty() => format!("{c}.{name}"),
            _ => name.to_string(),
        }
    }
}

impl PartialEq for IndexedSymbol {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for IndexedSymbol {}

impl std::hash::Hash for IndexedSymbol {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

fn clamp_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max).collect()
    }
}

/// A single occurrence of a symbol name found while scanning for references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolReference {
    pub symbol_name: String,
    pub file_path: String,
    pub line: u32,
    pub context_line: String,
    pub is_definition: bool,
}

/// A directed edge in the import graph. Only `Import` edges are
/// produced by this engine; the other kinds are reserved for future
/// cross-file resolution this engine deliberately does not perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencyKind {
    Import,
    Inheritance,
    Conformance,
    Usage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub from_file: String,
    pub to_file: String,
    pub kind: DependencyKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(name: &str, line: u32) -> IndexedSymbol {
        IndexedSymbol {
            name: name.to_string(),
            kind: SymbolKind::Function,
            file_path: "a/Foo.swift".to_string(),
            line,
            end_line: 0,
            access_level: AccessLevel::Internal,
            qualified_name: name.to_string(),
            container_name: None,
            signature: String::new(),
            documentation: None,
            inherits: Vec::new(),
            generic_parameters: Vec::new(),
            is_static: false,
            annotations: Vec::new(),
            language: Language::Swift,
        }
    }

    #[test]
    fn identity_combines_path_line_and_name() {
        let s = sample("greet", 3);
        assert_eq!(s.identity(), "a/Foo.swift:3:greet");
    }

    #[test]
    fn equality_is_identity_only() {
        let mut a = sample("greet", 3);
        let b = sample("greet", 3);
        a.documentation = Some("different doc".to_string());
        assert_eq!(a, b);
    }

    #[test]
    fn qualified_name_uses_container_when_present() {
        assert_eq!(
            IndexedSymbol::compute_qualified_name("greet", Some("Foo")),
            "Foo.greet"
        );
        assert_eq!(IndexedSymbol::compute_qualified_name("greet", None), "greet");
    }

    #[test]
    fn signature_is_clamped() {
        let long = "x".repeat(400);
        assert_eq!(IndexedSymbol::clamp_signature(&long).chars().count(), 300);
    }

    #[test]
    fn documentation_is_clamped() {
        let long = "y".repeat(600);
        assert_eq!(IndexedSymbol::clamp_documentation(&long).chars().count(), 500);
    }
}
