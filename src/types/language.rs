//! Language tag enumeration and extension lookup.
//!
//! Covers the full closed set the indexing engine must classify, including
//! languages with no symbol extractor.

use serde::{Deserialize, Serialize};

/// The closed set of languages the classifier recognizes.
///
/// Not every variant has a [`crate::parsing`] extractor — see
/// [`Language::is_extractor_eligible`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    Swift,
    ObjectiveC,
    ObjectiveCpp,
    C,
    Cpp,
    CHeader,
    Python,
    JavaScript,
    JavaScriptReact,
    TypeScript,
    TypeScriptReact,
    Go,
    Rust,
    Java,
    Kotlin,
    Ruby,
    Php,
    CSharp,
    Html,
    Css,
    Json,
    Yaml,
    Toml,
    Xml,
    Markdown,
    Shell,
    Sql,
    GraphQl,
    Proto,
    Dart,
    Elixir,
    Lua,
    R,
    Scala,
    Haskell,
    Zig,
    Unknown,
}

impl Language {
    /// Lowercases `ext` and looks it up in the extension table.
    ///
    /// Always returns a variant; unrecognized extensions map to `Unknown`.
    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.to_lowercase();
        match ext.as_str() {
            "swift" => Language::Swift,
            "m" => Language::ObjectiveC,
            "mm" => Language::ObjectiveCpp,
            "c" => Language::C,
            "cc" | "cpp" | "cxx" | "c++" => Language::Cpp,
            "h" => Language::CHeader,
            "hh" | "hpp" | "hxx" => Language::CHeader,
            "py" | "pyi" | "pyw" => Language::Python,
            "js" | "mjs" | "cjs" => Language::JavaScript,
            "jsx" => Language::JavaScriptReact,
            "ts" | "mts" | "cts" => Language::TypeScript,
            "tsx" => Language::TypeScriptReact,
            "go" => Language::Go,
            "rs" => Language::Rust,
            "java" => Language::Java,
            "kt" | "kts" => Language::Kotlin,
            "rb" => Language::Ruby,
            "php" | "php3" | "php4" | "php5" | "php7" | "php8" | "phtml" => Language::Php,
            "cs" => Language::CSharp,
            "html" | "htm" => Language::Html,
            "css" | "scss" | "sass" | "less" => Language::Css,
            "json" | "jsonc" => Language::Json,
            "yaml" | "yml" => Language::Yaml,
            "toml" => Language::Toml,
            "xml" => Language::Xml,
            "md" | "markdown" => Language::Markdown,
            "sh" | "bash" | "zsh" => Language::Shell,
            "sql" => Language::Sql,
            "graphql" | "gql" => Language::GraphQl,
            "proto" => Language::Proto,
            "dart" => Language::Dart,
            "ex" | "exs" => Language::Elixir,
            "lua" => Language::Lua,
            "r" => Language::R,
            "scala" => Language::Scala,
            "hs" => Language::Haskell,
            "zig" => Language::Zig,
            _ => Language::Unknown,
        }
    }

    /// Canonical extensions for this language, in preference order.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::Swift => &["swift"],
            Language::ObjectiveC => &["m"],
            Language::ObjectiveCpp => &["mm"],
            Language::C => &["c"],
            Language::Cpp => &["cc", "cpp", "cxx", "c++"],
            Language::CHeader => &["h", "hh", "hpp", "hxx"],
            Language::Python => &["py", "pyi", "pyw"],
            Language::JavaScript => &["js", "mjs", "cjs"],
            Language::JavaScriptReact => &["jsx"],
            Language::TypeScript => &["ts", "mts", "cts"],
            Language::TypeScriptReact => &["tsx"],
            Language::Go => &["go"],
            Language::Rust => &["rs"],
            Language::Java => &["java"],
            Language::Kotlin => &["kt", "kts"],
            Language::Ruby => &["rb"],
            Language::Php => &["php", "php3", "php4", "php5", "php7", "php8", "phtml"],
            Language::CSharp => &["cs"],
            Language::Html => &["html", "htm"],
            Language::Css => &["css", "scss", "sass", "less"],
            Language::Json => &["json", "jsonc"],
            Language::Yaml => &["yaml", "yml"],
            Language::Toml => &["toml"],
            Language::Xml => &["xml"],
            Language::Markdown => &["md", "markdown"],
            Language::Shell => &["sh", "bash", "zsh"],
            Language::Sql => &["sql"],
            Language::GraphQl => &["graphql", "gql"],
            Language::Proto => &["proto"],
            Language::Dart => &["dart"],
            Language::Elixir => &["ex", "exs"],
            Language::Lua => &["lua"],
            Language::R => &["r"],
            Language::Scala => &["scala"],
            Language::Haskell => &["hs"],
            Language::Zig => &["zig"],
            Language::Unknown => &[],
        }
    }

    /// Line-comment prefix for this language, if it has one.
    pub fn line_comment(&self) -> Option<&'static str> {
        match self {
            Language::Swift
            | Language::ObjectiveC
            | Language::ObjectiveCpp
            | Language::C
            | Language::Cpp
            | Language::CHeader
            | Language::JavaScript
            | Language::JavaScriptReact
            | Language::TypeScript
            | Language::TypeScriptReact
            | Language::Go
            | Language::Rust
            | Language::Java
            | Language::Kotlin
            | Language::CSharp
            | Language::Dart
            | Language::Scala
            | Language::Zig
            | Language::GraphQl
            | Language::Proto => Some("//"),
            Language::Python | Language::Ruby | Language::Shell | Language::Yaml => Some("#"),
            Language::Php => Some("//"),
            Language::Lua | Language::Haskell => Some("--"),
            Language::Sql => Some("--"),
            Language::R => Some("#"),
            Language::Elixir => Some("#"),
            _ => None,
        }
    }

    /// Whether [`crate::parsing`] has an extractor for this language.
    pub fn is_extractor_eligible(&self) -> bool {
        matches!(
            self,
            Language::Swift
                | Language::Python
                | Language::JavaScript
                | Language::JavaScriptReact
                | Language::TypeScript
                | Language::TypeScriptReact
                | Language::Go
                | Language::Rust
                | Language::Java
                | Language::Kotlin
                | Language::Ruby
                | Language::Php
                | Language::CSharp
                | Language::C
                | Language::Cpp
                | Language::ObjectiveC
                | Language::ObjectiveCpp
                | Language::CHeader
        )
    }

    /// Stable lowercase tag, used for JSON/text rendering and facade filters.
    pub fn tag(&self) -> &'static str {
        match self {
            Language::Swift => "swift",
            Language::ObjectiveC => "objective-c",
            Language::ObjectiveCpp => "objective-c++",
            Language::C => "c",
            Language::Cpp => "c++",
            Language::CHeader => "c-header",
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::JavaScriptReact => "javascript-react",
            Language::TypeScript => "typescript",
            Language::TypeScriptReact => "typescript-react",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::Java => "java",
            Language::Kotlin => "kotlin",
            Language::Ruby => "ruby",
            Language::Php => "php",
            Language::CSharp => "c#",
            Language::Html => "html",
            Language::Css => "css",
            Language::Json => "json",
            Language::Yaml => "yaml",
            Language::Toml => "toml",
            Language::Xml => "xml",
            Language::Markdown => "markdown",
            Language::Shell => "shell",
            Language::Sql => "sql",
            Language::GraphQl => "graphql",
            Language::Proto => "proto",
            Language::Dart => "dart",
            Language::Elixir => "elixir",
            Language::Lua => "lua",
            Language::R => "r",
            Language::Scala => "scala",
            Language::Haskell => "haskell",
            Language::Zig => "zig",
            Language::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_extension_is_case_insensitive() {
        assert_eq!(Language::from_extension("RS"), Language::Rust);
        assert_eq!(Language::from_extension("Py"), Language::Python);
    }

    #[test]
    fn unknown_extension_maps_to_unknown() {
        assert_eq!(Language::from_extension("xyz123"), Language::Unknown);
    }

    #[test]
    fn extractor_eligibility_matches_spec_list() {
        assert!(Language::Rust.is_extractor_eligible());
        assert!(Language::Swift.is_extractor_eligible());
        assert!(!Language::Html.is_extractor_eligible());
        assert!(!Language::Unknown.is_extractor_eligible());
    }

    #[test]
    fn line_comment_present_for_brace_languages() {
        assert_eq!(Language::Rust.line_comment(), Some("//"));
        assert_eq!(Language::Python.line_comment(), Some("#"));
        assert_eq!(Language::Json.line_comment(), None);
    }
}
