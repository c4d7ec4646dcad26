// crates/engine/src/stats.rs
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use dirloc_core::LineCounts;
use serde::Serialize;

use crate::error::EngineError;
use crate::hierarchy::HierarchyMap;

/// Counts for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileStats {
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
    #[serde(flatten)]
    pub counts: LineCounts,
    pub is_binary: bool,
}

/// Counts attributed to one directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirStats {
    pub path: PathBuf,
    /// Files directly inside the directory.
    pub files: usize,
    /// Files anywhere below the directory.
    pub total_files: usize,
    /// Sum over files directly inside the directory.
    pub direct: LineCounts,
    /// Sum over the whole relevant subtree.
    pub total: LineCounts,
}

/// Outcome of one counting run.
#[derive(Debug)]
pub struct RunResult {
    pub hierarchy: HierarchyMap,
    /// Per-file counts, in discovery order.
    pub files: Vec<FileStats>,
    /// Per-directory counts, in path order.
    pub directories: Vec<DirStats>,
    /// Files that could not be read (non-strict mode only).
    pub errors: Vec<(PathBuf, EngineError)>,
}

impl RunResult {
    /// Sum over every counted file.
    #[must_use]
    pub fn total(&self) -> LineCounts {
        self.files.iter().map(|f| f.counts).sum()
    }

    #[must_use]
    pub fn directory(&self, path: &Path) -> Option<&DirStats> {
        self.directories.iter().find(|d| d.path == path)
    }

    #[must_use]
    pub fn file(&self, path: &Path) -> Option<&FileStats> {
        self.files.iter().find(|f| f.path == path)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Subtree {
    files: usize,
    counts: LineCounts,
}

/// ディレクトリごとの集計を計算する
///
/// Files missing from `files` (unreadable ones) contribute nothing.
#[must_use]
pub fn summarize_directories(hierarchy: &HierarchyMap, files: &[FileStats]) -> Vec<DirStats> {
    let by_path: HashMap<&Path, &FileStats> =
        files.iter().map(|f| (f.path.as_path(), f)).collect();

    if hierarchy.root_is_file() {
        return summarize_single_file(hierarchy, &by_path);
    }

    let mut memo: HashMap<PathBuf, Subtree> = HashMap::new();
    hierarchy
        .directories()
        .map(|dir| {
            let mut direct = Subtree::default();
            for child in hierarchy.get(dir).unwrap_or_default() {
                if !hierarchy.is_directory(child)
                    && let Some(stats) = by_path.get(child.as_path())
                {
                    direct.files += 1;
                    direct.counts += stats.counts;
                }
            }
            let total = subtree(hierarchy, dir, &by_path, &mut memo);
            DirStats {
                path: dir.to_path_buf(),
                files: direct.files,
                total_files: total.files,
                direct: direct.counts,
                total: total.counts,
            }
        })
        .collect()
}

fn subtree(
    hierarchy: &HierarchyMap,
    dir: &Path,
    by_path: &HashMap<&Path, &FileStats>,
    memo: &mut HashMap<PathBuf, Subtree>,
) -> Subtree {
    if let Some(done) = memo.get(dir) {
        return *done;
    }
    let mut acc = Subtree::default();
    for child in hierarchy.get(dir).unwrap_or_default() {
        if hierarchy.is_directory(child) {
            let sub = subtree(hierarchy, child, by_path, memo);
            acc.files += sub.files;
            acc.counts += sub.counts;
        } else if let Some(stats) = by_path.get(child.as_path()) {
            acc.files += 1;
            acc.counts += stats.counts;
        }
    }
    memo.insert(dir.to_path_buf(), acc);
    acc
}

/// A file root is attributed to the directory containing it.
fn summarize_single_file(
    hierarchy: &HierarchyMap,
    by_path: &HashMap<&Path, &FileStats>,
) -> Vec<DirStats> {
    let Some(root) = hierarchy.root() else {
        return Vec::new();
    };
    let Some(stats) = by_path.get(root) else {
        return Vec::new();
    };
    let dir = match root.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    vec![DirStats {
        path: dir,
        files: 1,
        total_files: 1,
        direct: stats.counts,
        total: stats.counts,
    }]
}
