//! Discovery and loading against real directory trees.

use projectionist::{paths, query_file, query_file_rec, query_scalar};
use projectionist_directory::{DirectoryError, ProjectionLoader, ProjectionsConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

fn clean(path: &Path) -> String {
    paths::clean(&path.to_string_lossy())
}

/// Loads only the registries inside the fixture.
fn load_within(root: &Path, start: &Path) -> projectionist::Projections {
    let loader = ProjectionLoader::<ProjectionsConfig>::new();
    let files: Vec<PathBuf> = loader
        .detect(start)
        .unwrap()
        .into_iter()
        .filter(|p| p.starts_with(root))
        .collect();
    loader.load_all(&files).unwrap()
}

#[test]
fn test_alternate_across_nested_registries() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(
        root,
        ".projections.json",
        r#"{"*": {"type": "file"}, "*.md": {"type": "doc"}}"#,
    );
    write(
        root,
        "lib/.projections.json",
        r#"{
            "src/*.c": {"alternate": "include/{}.h", "type": "source"},
            "include/*.h": {"alternate": "src/{}.c", "type": "header"}
        }"#,
    );
    let source = write(root, "lib/src/net/socket.c", "");

    let projections = load_within(root, &source);
    assert_eq!(projections.len(), 2);

    let file = clean(&source);
    assert_eq!(
        query_file("alternate", &file, &projections).unwrap(),
        vec![clean(&root.join("lib/include/net/socket.h"))]
    );
    assert_eq!(
        query_scalar("type", &file, &projections).unwrap(),
        vec!["source", "file"]
    );
}

#[test]
fn test_closure_over_loaded_registry() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(
        root,
        ".projections.json",
        r#"{
            "*.c": {"related": "{}.h"},
            "*.h": {"related": "{}.c"}
        }"#,
    );
    let source = write(root, "codec.c", "");

    let projections = load_within(root, &source);
    let related = query_file_rec("related", &clean(&source), 10, &projections).unwrap();
    assert_eq!(related, vec![clean(&root.join("codec.h")), clean(&source)]);
}

#[test]
fn test_invalid_registry_reports_the_file() {
    let temp = TempDir::new().unwrap();
    let registry = write(temp.path(), ".projections.json", "{ not json");
    let err = ProjectionLoader::<ProjectionsConfig>::new()
        .load_file(&registry)
        .unwrap_err();
    assert!(matches!(err, DirectoryError::Parse { .. }));
    assert!(err.to_string().contains(&registry.display().to_string()));
}
