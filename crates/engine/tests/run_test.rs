use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use dirloc_engine::config::{Config, ConfigBuilder};
use dirloc_engine::error::{EngineError, Result};
use dirloc_engine::filter::ExtensionFilter;
use dirloc_engine::hierarchy::HierarchyOptions;
use dirloc_engine::reader::SourceReader;
use dirloc_engine::{run, run_with};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, contents: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, contents).unwrap();
    path
}

fn config_for(root: &Path, suffix: &str) -> Config {
    ConfigBuilder::default()
        .root(root)
        .filter(ExtensionFilter::new(suffix))
        .jobs(2usize)
        .build()
        .unwrap()
}

#[test]
fn end_to_end_dir_tree() {
    let tmp = TempDir::new().unwrap();
    let dir1 = tmp.path().join("dir1");
    let one = write(&dir1, "1.txt", "code1\n/* a\n b */\ncode2\n");
    let two = write(&dir1, "dir1.1/2.txt", "// only a comment\nx = 1;\n\ny = 2; // tail\n");
    write(&dir1, "dir1.2/notes.md", "nothing to see\n");
    let dir11 = dir1.join("dir1.1");
    let dir12 = dir1.join("dir1.2");

    let result = run(&config_for(&dir1, ".txt")).unwrap();
    assert!(result.errors.is_empty());

    let top: HashSet<_> = result.hierarchy.get(&dir1).unwrap().iter().cloned().collect();
    assert_eq!(top, HashSet::from([dir11.clone(), one.clone()]));
    assert!(result.hierarchy.contains_key(&dir11));
    assert!(!result.hierarchy.contains_path(&dir12));

    let f1 = result.file(&one).unwrap();
    assert_eq!(f1.counts.lines, 4);
    assert_eq!(f1.counts.code, 2);
    assert_eq!(f1.counts.comment, 2);

    let f2 = result.file(&two).unwrap();
    assert_eq!(f2.counts.code, 2);
    assert_eq!(f2.counts.comment, 1);
    assert_eq!(f2.counts.blank, 1);

    let d1 = result.directory(&dir1).unwrap();
    assert_eq!(d1.files, 1);
    assert_eq!(d1.total_files, 2);
    assert_eq!(d1.direct.code, 2);
    assert_eq!(d1.total.code, 4);

    let parent = result.directory(tmp.path()).unwrap();
    assert_eq!(parent.files, 0);
    assert_eq!(parent.total, d1.total);
    assert_eq!(result.total().code, 4);
}

#[test]
fn single_file_root_is_attributed_to_its_directory() {
    let tmp = TempDir::new().unwrap();
    let file = write(tmp.path(), "main.c", "int main() { return 0; } // entry\n");

    let result = run(&config_for(&file, ".c")).unwrap();
    assert_eq!(result.hierarchy.len(), 1);
    assert_eq!(result.files.len(), 1);
    assert_eq!(result.files[0].counts.code, 1);
    assert_eq!(result.directories.len(), 1);
    assert_eq!(result.directories[0].path, tmp.path());
}

#[test]
fn missing_root_surfaces_path_access_error() {
    let tmp = TempDir::new().unwrap();
    let err = run(&config_for(&tmp.path().join("missing"), ".rs")).unwrap_err();
    assert!(matches!(err, EngineError::PathAccess { .. }));
}

#[test]
fn binary_files_count_as_zero() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "blob.dat", "ab\0cd\n");
    let result = run(&config_for(tmp.path(), ".dat")).unwrap();
    assert_eq!(result.files.len(), 1);
    assert!(result.files[0].is_binary);
    assert_eq!(result.total().lines, 0);
}

struct FailingReader {
    bad: PathBuf,
}

impl SourceReader for FailingReader {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        if path == self.bad {
            return Err(EngineError::FileRead {
                path: path.to_path_buf(),
                source: std::io::Error::other("denied"),
            });
        }
        Ok(fs::read(path).unwrap())
    }
}

#[test]
fn unreadable_files_are_collected_unless_strict() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "ok.rs", "fn ok() {}\n");
    let bad = write(tmp.path(), "bad.rs", "fn bad() {}\n");
    let reader = FailingReader { bad: bad.clone() };

    let mut config = config_for(tmp.path(), ".rs");
    config.hierarchy = HierarchyOptions {
        include_parent: false,
        ..HierarchyOptions::default()
    };

    let lenient = run_with(&config, &reader).unwrap();
    assert_eq!(lenient.files.len(), 1);
    assert_eq!(lenient.errors.len(), 1);
    assert_eq!(lenient.errors[0].0, bad);
    assert_eq!(lenient.directory(tmp.path()).unwrap().total_files, 1);

    config.strict = true;
    let err = run_with(&config, &reader).unwrap_err();
    assert!(matches!(err, EngineError::FileRead { .. }));
}

#[test]
fn case_insensitive_filter_picks_up_upper_case_names() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "A.RS", "fn a() {}\n");
    write(tmp.path(), "b.rs", "fn b() {}\n");

    let mut config = config_for(tmp.path(), ".rs");
    let sensitive = run(&config).unwrap();
    assert_eq!(sensitive.files.len(), 1);

    config.filter = ExtensionFilter::new(".rs").case_sensitive(false);
    let insensitive = run(&config).unwrap();
    assert_eq!(insensitive.files.len(), 2);
}

#[test]
fn file_stats_serialize_flat() {
    let tmp = TempDir::new().unwrap();
    let file = write(tmp.path(), "x.rs", "let a = 1;\n");
    let result = run(&config_for(&file, ".rs")).unwrap();
    let json = serde_json::to_value(&result.files[0]).unwrap();
    assert_eq!(json["code"], 1);
    assert_eq!(json["is_binary"], false);
}
