//! Shared doc-comment and docstring scanners used by every per-language
//! extractor, so each extractor only needs to say *where* documentation
//! lives, not *how* to read it.

use crate::symbol::IndexedSymbol;

/// Scans contiguous comment lines immediately above `header_idx`, stopping
/// at the first blank line or non-comment line. Handles `///`, `//!`, plain
/// `//`, `/** ... */` openers, and `* ...` continuation lines. Lines are
/// joined with a single space and capped at 500 chars.
pub fn doc_above(lines: &[&str], header_idx: usize) -> Option<String> {
    if header_idx == 0 {
        return None;
    }
    let mut collected = Vec::new();
    let mut i = header_idx;
    while i > 0 {
        i -= 1;
        let trimmed = lines[i].trim();
        if trimmed.is_empty() {
            break;
        }
        if let Some(rest) = trimmed.strip_prefix("///") {
            collected.push(rest.trim().to_string());
        } else if let Some(rest) = trimmed.strip_prefix("//!") {
            collected.push(rest.trim().to_string());
        } else if let Some(rest) = trimmed.strip_prefix("//") {
            collected.push(rest.trim().to_string());
        } else if let Some(rest) = trimmed.strip_prefix("/**") {
            collected.push(rest.trim_end_matches("*/").trim().to_string());
        } else if let Some(rest) = trimmed.strip_prefix("/*") {
            collected.push(rest.trim_end_matches("*/").trim().to_string());
        } else if let Some(rest) = trimmed.strip_prefix('*') {
            collected.push(rest.trim_end_matches("*/").trim().to_string());
        } else {
            break;
        }
    }
    if collected.is_empty() {
        return None;
    }
    collected.reverse();
    Some(IndexedSymbol::clamp_documentation(&collected.join(" ")))
}

/// Reads a triple-quoted docstring beginning on the line following
/// `header_idx` (single- or multi-line, scanning up to 20 lines).
pub fn python_docstring(lines: &[&str], header_idx: usize) -> Option<String> {
    let next = header_idx + 1;
    let first = lines.get(next)?.trim();
    let quote = if first.starts_with("\"\"\"") {
        "\"\"\""
    } else if first.starts_with("'''") {
        "'''"
    } else {
        return None;
    };
    let after_open = &first[quote.len()..];

    if let Some(end) = after_open.find(quote) {
        let text = after_open[..end].trim();
        return Some(IndexedSymbol::clamp_documentation(text));
    }

    let mut collected = vec![after_open.trim().to_string()];
    let scan_end = (next + 20).min(lines.len());
    for line in &lines[(next + 1)..scan_end] {
        if let Some(end) = line.find(quote) {
            collected.push(line[..end].trim().to_string());
            break;
        }
        collected.push(line.trim().to_string());
    }
    Some(IndexedSymbol::clamp_documentation(
        collected.join(" ").trim(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doc_above_collects_triple_slash_block() {
        let lines = vec!["/// Greets the caller.", "/// Returns nothing.", "fn greet() {}"];
        assert_eq!(
            doc_above(&lines, 2).as_deref(),
            Some("Greets the caller. Returns nothing.")
        );
    }

    #[test]
    fn doc_above_handles_block_comment_continuation() {
        let lines = vec!["/**", " * Does the thing.", " */", "void doThing() {}"];
        assert_eq!(doc_above(&lines, 3).as_deref(), Some("Does the thing."));
    }

    #[test]
    fn doc_above_stops_at_blank_line() {
        let lines = vec!["/// stale doc", "", "fn f() {}"];
        assert_eq!(doc_above(&lines, 2), None);
    }

    #[test]
    fn python_docstring_single_line() {
        let lines = vec!["def f():", "    \"\"\"Does a thing.\"\"\"", "    pass"];
        assert_eq!(python_docstring(&lines, 0).as_deref(), Some("Does a thing."));
    }

    #[test]
    fn python_docstring_multi_line() {
        let lines = vec!["def f():", "    \"\"\"", "    Line one.", "    Line two.", "    \"\"\"", "    pass"];
        assert_eq!(
            python_docstring(&lines, 0).as_deref(),
            Some("Line one. Line two.")
        );
    }
}
