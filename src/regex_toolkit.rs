//! Line-anchored regex helpers, block-end finders, content hashing, and the
//! fuzzy/glob matchers shared by every per-language extractor and by the
//! query engine.

use regex::Regex;

/// First match of `pattern` against `s` in multi-line mode, or `None`.
///
/// A malformed `pattern` is treated as a non-match rather than propagated
/// as an error.
pub fn first_match<'a>(pattern: &str, s: &'a str) -> Option<&'a str> {
    let re = compile(pattern)?;
    re.find(s).map(|m| m.as_str())
}

/// Capture groups of the first match, as owned strings (empty string for an
/// unmatched optional group). Empty vector when there is no match at all.
pub fn match_groups(pattern: &str, s: &str) -> Vec<String> {
    let Some(re) = compile(pattern) else {
        return Vec::new();
    };
    match re.captures(s) {
        Some(caps) => (1..caps.len())
            .map(|i| caps.get(i).map(|m| m.as_str().to_string()).unwrap_or_default())
            .collect(),
        None => Vec::new(),
    }
}

/// The `group`-th capture (1-based, 0 = whole match) across every match of
/// `pattern` in `s`, in source order.
pub fn match_all(pattern: &str, s: &str, group: usize) -> Vec<String> {
    let Some(re) = compile(pattern) else {
        return Vec::new();
    };
    re.captures_iter(s)
        .filter_map(|caps| caps.get(group).map(|m| m.as_str().to_string()))
        .collect()
}

fn compile(pattern: &str) -> Option<Regex> {
    Regex::new(&format!("(?m){pattern}")).ok()
}

/// Maximum lines scanned by [`find_block_end`] before giving up.
const MAX_BLOCK_SCAN_LINES: usize = 2000;

/// Scans forward from `start`, counting `{`/`}` literally (no string/comment
/// awareness — a deliberate heuristic), returning the line index where
/// the brace balance first returns to zero after an opening brace was seen.
///
/// Returns `start` if no brace is seen within [`MAX_BLOCK_SCAN_LINES`] lines,
/// or if the scan runs out of lines without the balance returning to zero.
pub fn find_block_end(lines: &[&str], start: usize) -> usize {
    let mut depth: i64 = 0;
    let mut seen_open = false;
    let limit = (start + MAX_BLOCK_SCAN_LINES).min(lines.len());

    for (offset, line) in lines[start..limit].iter().enumerate() {
        for ch in line.chars() {
            match ch {
                '{' => {
                    depth += 1;
                    seen_open = true;
                }
                '}' => depth -= 1,
                _ => {}
            }
        }
        if seen_open && depth <= 0 {
            return start + offset;
        }
    }
    start
}

/// Indentation (count of leading spaces, tabs counted as one column) of a line.
fn indent_of(line: &str) -> usize {
    line.chars().take_while(|c| *c == ' ' || *c == '\t').count()
}

/// Returns the greatest line index such that every intermediate non-empty,
/// non-comment line has indent strictly greater than `start_indent` —
/// i.e. the last line of a Python suite opened at `start`.
pub fn find_python_block_end(lines: &[&str], start: usize, start_indent: usize) -> usize {
    let mut end = start;
    for (i, line) in lines.iter().enumerate().skip(start + 1) {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if indent_of(line) > start_indent {
            end = i;
        } else {
            break;
        }
    }
    end
}

/// Classic case-sensitive subsequence test: every character of `query`
/// appears in `target` in order. Callers lowercase both sides for
/// case-insensitive fuzzy matching.
pub fn fuzzy_match(query: &str, target: &str) -> bool {
    let mut target_chars = target.chars();
    query
        .chars()
        .all(|qc| target_chars.any(|tc| tc == qc))
}

/// Glob matcher supporting `*` (within-segment wildcard), a `**/` prefix
/// (any depth), a `/**` suffix (prefix match), `**/*.ext`/`*.ext` (extension
/// match), falling back to plain substring containment.
pub fn glob_match(pattern: &str, path: &str) -> bool {
    if let Some(rest) = pattern.strip_prefix("**/") {
        if let Some(ext) = rest.strip_prefix("*.") {
            return path.ends_with(&format!(".{ext}"));
        }
        return path.ends_with(rest) || path.contains(&format!("/{rest}")) || glob_match(rest, path);
    }

    if let Some(prefix) = pattern.strip_suffix("/**") {
        return path == prefix || path.starts_with(&format!("{prefix}/"));
    }

    if let Some(ext) = pattern.strip_prefix("*.") {
        if !pattern[1..].contains('*') {
            return path.ends_with(&format!(".{ext}"));
        }
    }

    if pattern.contains('*') {
        let escaped = regex::escape(pattern).replace(r"\*", "[^/]*");
        if let Ok(re) = Regex::new(&format!("^{escaped}$")) {
            if re.is_match(path) {
                return true;
            }
            // Also allow matching the final path segment (no directory part
            // in the pattern implies "anywhere").
            if !pattern.contains('/') {
                if let Some(name) = path.rsplit('/').next() {
                    if re.is_match(name) {
                        return true;
                    }
                }
            }
        }
    }

    path.contains(pattern)
}

/// FNV-1a 64-bit hash: offset `14695981039346656037`, prime
/// `1099511628211`, wrapping multiplication, one byte at a time.
pub fn fnv1a64(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 14695981039346656037;
    const PRIME: u64 = 1099511628211;

    let mut hash = OFFSET;
    for &byte in bytes {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_match_basic() {
        assert_eq!(first_match(r"^fn \w+", "fn foo() {}"), Some("fn foo"));
        assert_eq!(first_match(r"^class \w+", "no match here"), None);
    }

    #[test]
    fn match_groups_fills_empty_for_unmatched_optional() {
        let groups = match_groups(r"^(\w+)(?: : (\w+))?", "Foo");
        assert_eq!(groups, vec!["Foo".to_string(), String::new()]);
    }

    #[test]
    fn match_groups_empty_on_no_match() {
        assert!(match_groups(r"^zzz(\w+)", "abc").is_empty());
    }

    #[test]
    fn match_all_collects_nth_capture() {
        let text = "import Foo\nimport Bar\n";
        let names = match_all(r"^import (\w+)", text, 1);
        assert_eq!(names, vec!["Foo".to_string(), "Bar".to_string()]);
    }

    #[test]
    fn find_block_end_balances_braces() {
        let src = vec!["func f() {", "  if true {", "    g()", "  }", "}", "next"];
        assert_eq!(find_block_end(&src, 0), 4);
    }

    #[test]
    fn find_block_end_bails_without_brace() {
        let src = vec!["let x = 1", "let y = 2"];
        assert_eq!(find_block_end(&src, 0), 0);
    }

    #[test]
    fn find_python_block_end_respects_indent() {
        let src = vec!["def f():", "    a = 1", "    b = 2", "c = 3"];
        assert_eq!(find_python_block_end(&src, 0, 0), 2);
    }

    #[test]
    fn find_python_block_end_skips_blank_and_comment_lines() {
        let src = vec!["def f():", "    a = 1", "", "    # comment", "    b = 2", "c = 3"];
        assert_eq!(find_python_block_end(&src, 0, 0), 4);
    }

    #[test]
    fn fuzzy_match_is_subsequence() {
        assert!(fuzzy_match("fb", "fooBar"));
        assert!(fuzzy_match("", "anything"));
        assert!(!fuzzy_match("fz", "fooBar"));
    }

    #[test]
    fn fuzzy_match_monotone_property() {
        // Removing a character from the query cannot turn true into false.
        assert!(fuzzy_match("fob", "fooBar"));
        assert!(fuzzy_match("fo", "fooBar"));
        assert!(fuzzy_match("f", "fooBar"));
    }

    #[test]
    fn glob_match_extension_suffix() {
        assert!(glob_match("**/*.ext", "a/b/c.ext"));
        assert!(glob_match("*.rs", "main.rs"));
        assert!(!glob_match("*.rs", "main.py"));
    }

    #[test]
    fn glob_match_extension_suffix_property() {
        for p in ["a/b/c.ext", "c.ext", "deeply/nested/path/file.ext"] {
            assert!(glob_match("**/*.ext", p) == p.ends_with(".ext"));
        }
    }

    #[test]
    fn glob_match_prefix_suffix() {
        assert!(glob_match("src/**", "src/lib.rs"));
        assert!(glob_match("src/**", "src"));
        assert!(!glob_match("src/**", "lib/src.rs"));
    }

    #[test]
    fn glob_match_falls_back_to_substring() {
        assert!(glob_match("handler", "src/http/handler.rs"));
    }

    #[test]
    fn fnv1a64_matches_reference_vectors() {
        // Reference FNV-1a 64 vectors (empty string and "a").
        assert_eq!(fnv1a64(b""), 0xcbf29ce484222325);
        assert_eq!(fnv1a64(b"a"), 0xaf63dc4c8601ec8c);
    }

    #[test]
    fn fnv1a64_deterministic() {
        assert_eq!(fnv1a64(b"hello world"), fnv1a64(b"hello world"));
        assert_ne!(fnv1a64(b"hello world"), fnv1a64(b"hello worlD"));
    }
}
