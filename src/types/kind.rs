//! Symbol kind enumeration and derived predicates.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    Class,
    Struct,
    Enum,
    Protocol,
    Extension,
    Function,
    Method,
    Property,
    Constant,
    Variable,
    TypeAlias,
    Import,
    Macro,
    Interface,
    Trait,
    Module,
    Test,
    Unknown,
}

impl SymbolKind {
    pub fn is_type(&self) -> bool {
        matches!(
            self,
            SymbolKind::Class
                | SymbolKind::Struct
                | SymbolKind::Enum
                | SymbolKind::Protocol
                | SymbolKind::Interface
                | SymbolKind::Trait
                | SymbolKind::TypeAlias
        )
    }

    pub fn is_callable(&self) -> bool {
        matches!(
            self,
            SymbolKind::Function | SymbolKind::Method | SymbolKind::Test
        )
    }

    pub fn is_data_declaration(&self) -> bool {
        matches!(
            self,
            SymbolKind::Property | SymbolKind::Variable | SymbolKind::Constant
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            SymbolKind::Class => "class",
            SymbolKind::Struct => "struct",
            SymbolKind::Enum => "enum",
            SymbolKind::Protocol => "protocol",
            SymbolKind::Extension => "extension",
            SymbolKind::Function => "function",
            SymbolKind::Method => "method",
            SymbolKind::Property => "property",
            SymbolKind::Constant => "constant",
            SymbolKind::Variable => "variable",
            SymbolKind::TypeAlias => "type-alias",
            SymbolKind::Import => "import",
            SymbolKind::Macro => "macro",
            SymbolKind::Interface => "interface",
            SymbolKind::Trait => "trait",
            SymbolKind::Module => "module",
            SymbolKind::Test => "test",
            SymbolKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_type_matches_spec_set() {
        assert!(SymbolKind::Class.is_type());
        assert!(SymbolKind::Trait.is_type());
        assert!(!SymbolKind::Function.is_type());
    }

    #[test]
    fn is_callable_matches_spec_set() {
        assert!(SymbolKind::Function.is_callable());
        assert!(SymbolKind::Method.is_callable());
        assert!(SymbolKind::Test.is_callable());
        assert!(!SymbolKind::Property.is_callable());
    }

    #[test]
    fn is_data_declaration_matches_spec_set() {
        assert!(SymbolKind::Property.is_data_declaration());
        assert!(SymbolKind::Variable.is_data_declaration());
        assert!(SymbolKind::Constant.is_data_declaration());
        assert!(!SymbolKind::Class.is_data_declaration());
    }
}
