//! Builds an in-memory file tree of a workspace root, using a hardcoded
//! exclusion list rather than gitignore parsing: this engine has no on-disk
//! index to keep consistent with VCS-ignored files, so a fixed denylist is
//! simpler and does not depend on `.gitignore` contents.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use serde::{Deserialize, Serialize};

/// Directory names never descended into, regardless of `.gitignore`.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    ".svn",
    ".hg",
    ".build",
    "build",
    "Build",
    "DerivedData",
    "dist",
    "out",
    ".output",
    ".next",
    ".nuxt",
    ".cache",
    ".swiftpm",
    ".gradle",
    "__pycache__",
    ".pytest_cache",
    ".mypy_cache",
    "venv",
    ".venv",
    "env",
    ".env",
    "Pods",
    "Carthage",
    ".idea",
    ".vscode",
    ".vs",
    "vendor",
    "target",
    "coverage",
    ".nyc_output",
    ".terraform",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileNodeKind {
    File,
    Directory,
    Symlink,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileNode {
    pub kind: FileNodeKind,
    pub name: String,
    pub extension: Option<String>,
    pub relative_path: String,
    pub absolute_path: String,
    pub depth: u32,
    pub size: u64,
    pub modified_at: u64,
    pub children: Vec<FileNode>,
}

impl FileNode {
    pub fn is_directory(&self) -> bool {
        matches!(self.kind, FileNodeKind::Directory)
    }
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.') && name != "." && name != ".."
}

pub(crate) fn modified_at_secs(meta: &fs::Metadata) -> u64 {
    meta.modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Recursively builds a [`FileNode`] tree rooted at `root`, skipping hidden
/// entries and descending no further than [`DEFAULT_EXCLUDED_DIRS`].
/// `relative` is the path of `root` itself relative to the original
/// workspace root (empty string at the top). A `root` that does not exist
/// produces a bare file node with zeroed metadata rather than an error.
pub fn build_file_tree(root: &Path, relative: &str, depth: u32, extra_excluded: &[String]) -> FileNode {
    let name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.to_string_lossy().into_owned());

    let Ok(meta) = fs::symlink_metadata(root) else {
        return FileNode {
            kind: FileNodeKind::File,
            name,
            extension: None,
            relative_path: relative.to_string(),
            absolute_path: root.to_string_lossy().into_owned(),
            depth,
            size: 0,
            modified_at: 0,
            children: Vec::new(),
        };
    };

    if meta.file_type().is_symlink() {
        return FileNode {
            kind: FileNodeKind::Symlink,
            name,
            extension: None,
            relative_path: relative.to_string(),
            absolute_path: root.to_string_lossy().into_owned(),
            depth,
            size: 0,
            modified_at: modified_at_secs(&meta),
            children: Vec::new(),
        };
    }

    if meta.is_dir() {
        let mut children = Vec::new();
        let mut entries: Vec<PathBuf> = fs::read_dir(root)
            .map(|rd| rd.filter_map(|e| e.ok()).map(|e| e.path()).collect())
            .unwrap_or_default();
        entries.sort_by(|a, b| natural_compare(&entry_name(a), &entry_name(b)));

        for entry in entries {
            let entry_name = entry_name(&entry);
            if is_hidden(&entry_name) {
                continue;
            }
            let child_relative = if relative.is_empty() {
                entry_name.clone()
            } else {
                format!("{relative}/{entry_name}")
            };

            if entry.is_dir()
                && (DEFAULT_EXCLUDED_DIRS.contains(&entry_name.as_str())
                    || extra_excluded.iter().any(|e| e == &entry_name))
            {
                // Pruned: the directory itself is recorded but never descended into.
                if let Ok(meta) = fs::symlink_metadata(&entry) {
                    children.push(FileNode {
                        kind: FileNodeKind::Directory,
                        name: entry_name,
                        extension: None,
                        relative_path: child_relative,
                        absolute_path: entry.to_string_lossy().into_owned(),
                        depth: depth + 1,
                        size: 0,
                        modified_at: modified_at_secs(&meta),
                        children: Vec::new(),
                    });
                }
                continue;
            }

            children.push(build_file_tree(&entry, &child_relative, depth + 1, extra_excluded));
        }

        return FileNode {
            kind: FileNodeKind::Directory,
            name,
            extension: None,
            relative_path: relative.to_string(),
            absolute_path: root.to_string_lossy().into_owned(),
            depth,
            size: 0,
            modified_at: modified_at_secs(&meta),
            children,
        };
    }

    let extension = root
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase());

    FileNode {
        kind: FileNodeKind::File,
        name,
        extension,
        relative_path: relative.to_string(),
        absolute_path: root.to_string_lossy().into_owned(),
        depth,
        size: meta.len(),
        modified_at: modified_at_secs(&meta),
        children: Vec::new(),
    }
}

fn entry_name(p: &Path) -> String {
    p.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Case-insensitive, digit-run-aware comparison so `file2` sorts before
/// `file10`.
pub(crate) fn natural_compare(a: &str, b: &str) -> std::cmp::Ordering {
    let mut ai = a.chars().peekable();
    let mut bi = b.chars().peekable();

    loop {
        match (ai.peek(), bi.peek()) {
            (None, None) => return std::cmp::Ordering::Equal,
            (None, Some(_)) => return std::cmp::Ordering::Less,
            (Some(_), None) => return std::cmp::Ordering::Greater,
            (Some(ac), Some(bc)) => {
                if ac.is_ascii_digit() && bc.is_ascii_digit() {
                    let anum: String = std::iter::from_fn(|| ai.next_if(|c| c.is_ascii_digit())).collect();
                    let bnum: String = std::iter::from_fn(|| bi.next_if(|c| c.is_ascii_digit())).collect();
                    let an: u64 = anum.parse().unwrap_or(0);
                    let bn: u64 = bnum.parse().unwrap_or(0);
                    match an.cmp(&bn) {
                        std::cmp::Ordering::Equal => continue,
                        other => return other,
                    }
                } else {
                    let al = ac.to_ascii_lowercase();
                    let bl = bc.to_ascii_lowercase();
                    match al.cmp(&bl) {
                        std::cmp::Ordering::Equal => {
                            ai.next();
                            bi.next();
                            continue;
                        }
                        other => return other,
                    }
                }
            }
        }
    }
}

/// Depth-first pre-order flattening of a tree into a flat vector, directories
/// before their children, matching source-tree traversal order.
pub fn flatten(tree: &FileNode) -> Vec<&FileNode> {
    let mut out = vec![tree];
    for child in &tree.children {
        out.extend(flatten(child));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self as stdfs, File};
    use tempfile::tempdir;

    #[test]
    fn excludes_default_dirs_and_hidden_entries() {
        let dir = tempdir().unwrap();
        stdfs::create_dir(dir.path().join("node_modules")).unwrap();
        File::create(dir.path().join("node_modules/pkg.js")).unwrap();
        stdfs::create_dir(dir.path().join(".git")).unwrap();
        File::create(dir.path().join(".hidden")).unwrap();
        File::create(dir.path().join("main.rs")).unwrap();

        let tree = build_file_tree(dir.path(), "", 0, &[]);
        let names: Vec<&str> = tree.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["main.rs"]);
    }

    #[test]
    fn natural_sort_orders_numeric_suffixes() {
        let dir = tempdir().unwrap();
        for n in ["file10.txt", "file2.txt", "file1.txt"] {
            File::create(dir.path().join(n)).unwrap();
        }
        let tree = build_file_tree(dir.path(), "", 0, &[]);
        let names: Vec<&str> = tree.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["file1.txt", "file2.txt", "file10.txt"]);
    }

    #[test]
    fn flatten_visits_directories_before_children() {
        let dir = tempdir().unwrap();
        stdfs::create_dir(dir.path().join("sub")).unwrap();
        File::create(dir.path().join("sub/a.rs")).unwrap();

        let tree = build_file_tree(dir.path(), "", 0, &[]);
        let flat = flatten(&tree);
        assert_eq!(flat[0].relative_path, "");
        assert_eq!(flat[1].name, "sub");
        assert_eq!(flat[2].name, "a.rs");
    }

    #[test]
    fn file_extension_is_lowercased() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("Main.RS")).unwrap();
        let tree = build_file_tree(dir.path(), "", 0, &[]);
        assert_eq!(tree.children[0].extension.as_deref(), Some("rs"));
    }
}
