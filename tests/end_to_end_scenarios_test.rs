//! End-to-end scenarios exercising `IndexCore` across indexing and query.

use std::fs;

use codescribe::config::Settings;
use codescribe::indexing::IndexCore;
use codescribe::types::{AccessLevel, SymbolKind};

fn indexed(dir: &std::path::Path) -> IndexCore {
    let core = IndexCore::new(&Settings::default());
    core.index_workspace(&[dir.to_path_buf()], &[]);
    core
}

#[test]
fn swift_class_with_method_and_property() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("a")).unwrap();
    fs::write(
        dir.path().join("a/Foo.swift"),
        "import Bar\npublic class Foo {\n    public func greet() { print(\"hi\") }\n    let x = 1\n}\n",
    )
    .unwrap();

    let core = indexed(dir.path());
    let symbols = core.symbols_in_file("a/Foo.swift");
    assert_eq!(symbols.len(), 3);

    let foo = symbols.iter().find(|s| s.qualified_name == "Foo").unwrap();
    assert_eq!(foo.kind, SymbolKind::Class);
    assert_eq!(foo.access_level, AccessLevel::Public);

    let greet = symbols.iter().find(|s| s.qualified_name == "Foo.greet").unwrap();
    assert_eq!(greet.kind, SymbolKind::Method);

    let x = symbols.iter().find(|s| s.qualified_name == "Foo.x").unwrap();
    assert_eq!(x.kind, SymbolKind::Constant);

    let exact = core.find_exact_symbol("greet", None);
    assert_eq!(exact.len(), 1);
    assert_eq!(exact[0].qualified_name, "Foo.greet");
}

#[test]
fn incremental_update_after_no_change_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("main.rs"), "fn main() {}\n").unwrap();

    let core = indexed(dir.path());
    let before = core.stats().file_count;
    let summary = core.incremental_update();

    assert_eq!(summary.updated_files, 0);
    assert_eq!(core.stats().file_count, before);
}

#[test]
fn find_references_reports_cross_file_definition_and_usage() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("a")).unwrap();
    fs::write(
        dir.path().join("a/Foo.swift"),
        "public class Foo {\n    public func greet() { print(\"hi\") }\n}\n",
    )
    .unwrap();
    fs::write(dir.path().join("a/Use.swift"), "let f = Foo(); f.greet()\n").unwrap();

    let core = indexed(dir.path());
    let hits = core.find_references("greet", 100);

    assert!(hits
        .iter()
        .any(|h| h.is_definition && h.file_path == "a/Foo.swift" && h.line == 2));
    assert!(hits
        .iter()
        .any(|h| !h.is_definition && h.file_path == "a/Use.swift" && h.line == 1));
}
