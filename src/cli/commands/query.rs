//! Read-only query commands: find, outline, tree, stats, refs, deps, glob.

use crate::cli::commands::build_indexed_core;
use crate::config::Settings;
use crate::facade::parse_kind_alias;

pub fn run_find(settings: &Settings, query: &str, kind: Option<&str>) {
    let core = build_indexed_core(settings);
    let kind = kind.and_then(parse_kind_alias).and_then(|kinds| kinds.into_iter().next());
    let results = core.find_symbols(query, kind, None, settings.limits.find_symbols_limit);
    if results.is_empty() {
        println!("no matches for '{query}'");
        return;
    }
    for symbol in results {
        println!(
            "{} {} {} — {}:{}",
            symbol.access_level, symbol.kind, symbol.qualified_name, symbol.file_path, symbol.line
        );
    }
}

pub fn run_outline(settings: &Settings, path: &str) {
    let core = build_indexed_core(settings);
    match core.file_outline(path) {
        Some(text) => print!("{text}"),
        None => {
            eprintln!("no indexed file matches '{path}'");
            std::process::exit(1);
        }
    }
}

pub fn run_tree(settings: &Settings, max_depth: u32, max_files: usize) {
    let core = build_indexed_core(settings);
    print!("{}", core.project_tree(max_depth, max_files, false));
}

pub fn run_stats(settings: &Settings) {
    let core = build_indexed_core(settings);
    let stats = core.stats();
    println!("files: {}", stats.file_count);
    println!("directories: {}", stats.directory_count);
    println!("total bytes: {}", stats.total_bytes);
    println!("languages:");
    for (language, count) in &stats.language_histogram {
        println!("  {language}: {count}");
    }
    println!("largest files:");
    for (path, size) in &stats.largest_files {
        println!("  {path} ({size} bytes)");
    }
    if let Some((path, depth)) = &stats.deepest_file {
        println!("deepest file: {path} (depth {depth})");
    }
}

pub fn run_refs(settings: &Settings, name: &str, limit: usize) {
    let core = build_indexed_core(settings);
    let hits = core.find_references(name, limit);
    if hits.is_empty() {
        println!("no references to '{name}'");
        return;
    }
    for hit in hits {
        let marker = if hit.is_definition { "def" } else { "ref" };
        println!("[{marker}] {}:{} {}", hit.file_path, hit.line, hit.context_line);
    }
}

pub fn run_deps(settings: &Settings, path: &str) {
    let core = build_indexed_core(settings);
    let entry = core.file_dependencies(path);
    println!("imports ({}):", entry.imports.len());
    for module in &entry.imports {
        println!("  {module}");
    }
    println!("imported by ({}):", entry.imported_by.len());
    for file in &entry.imported_by {
        println!("  {file}");
    }
}

pub fn run_glob(settings: &Settings, pattern: &str, limit: usize) {
    let core = build_indexed_core(settings);
    for path in core.glob(pattern, limit) {
        println!("{path}");
    }
}
