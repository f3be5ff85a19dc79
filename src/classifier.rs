//! File classifier: maps a file extension to a [`Language`] tag and exposes
//! per-language metadata. Pure functions, no state.

use crate::types::Language;

/// Lowercases `ext` and returns the associated language tag.
pub fn from_extension(ext: &str) -> Language {
    Language::from_extension(ext)
}

/// The line-comment prefix for `language`, or `None` if it has none.
pub fn line_comment(language: Language) -> Option<&'static str> {
    language.line_comment()
}

/// Canonical extensions recognized for `language`.
pub fn canonical_extensions(language: Language) -> &'static [&'static str] {
    language.extensions()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_extensions() {
        assert_eq!(from_extension("rs"), Language::Rust);
        assert_eq!(from_extension("PY"), Language::Python);
    }

    #[test]
    fn line_comment_delegates_to_language() {
        assert_eq!(line_comment(Language::Rust), Some("//"));
        assert_eq!(line_comment(Language::Json), None);
    }
}
