// crates/engine/src/hierarchy.rs
//! # Directory hierarchy aggregation
//!
//! Builds a map from every relevant directory to the relevant entries
//! directly beneath it. A file is relevant when it matches the
//! [`ExtensionFilter`]; a directory is relevant when some file below it is.
//! Directories without relevant content are pruned: they appear neither as
//! keys nor inside another directory's child list.
//!
//! ```text
//! dir1/                      dir1     -> [dir1/dir1.1, dir1/1.txt]
//! ├── 1.txt                  dir1/dir1.1 -> [dir1/dir1.1/2.txt]
//! ├── dir1.1/2.txt           .        -> [dir1]          (parent entry)
//! └── dir1.2/readme.md       (dir1.2 pruned)
//! ```
//!
//! Child lists keep the order in which the directory was listed; nothing is
//! sorted.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::filter::ExtensionFilter;

/// Options for [`build_hierarchy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyOptions {
    /// Record the scan root's parent directory, mapped to `[root]`.
    pub include_parent: bool,
    /// Descend into symlinked directories and count symlinked files.
    pub follow_links: bool,
    /// Descend at most this many levels below the root. `Some(1)` lists the
    /// root's own entries without entering any subdirectory; `Some(0)`
    /// lists nothing.
    pub max_depth: Option<usize>,
}

impl Default for HierarchyOptions {
    fn default() -> Self {
        Self {
            include_parent: true,
            follow_links: false,
            max_depth: None,
        }
    }
}

/// Directory -> relevant children, built by [`build_hierarchy`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HierarchyMap {
    root: Option<PathBuf>,
    root_is_file: bool,
    parent: Option<PathBuf>,
    entries: BTreeMap<PathBuf, Vec<PathBuf>>,
}

impl HierarchyMap {
    /// The path the map was built from.
    #[must_use]
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    #[must_use]
    pub const fn root_is_file(&self) -> bool {
        self.root_is_file
    }

    /// The recorded parent of the scan root, if any.
    #[must_use]
    pub fn parent(&self) -> Option<&Path> {
        self.parent.as_deref()
    }

    #[must_use]
    pub fn get(&self, dir: &Path) -> Option<&[PathBuf]> {
        self.entries.get(dir).map(Vec::as_slice)
    }

    #[must_use]
    pub fn contains_key(&self, dir: &Path) -> bool {
        self.entries.contains_key(dir)
    }

    /// Whether `path` appears anywhere in the map, as a key or as a child.
    #[must_use]
    pub fn contains_path(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
            || self
                .entries
                .values()
                .any(|children| children.iter().any(|c| c == path))
    }

    /// Keys of the map, in path order.
    pub fn directories(&self) -> impl Iterator<Item = &Path> {
        self.entries.keys().map(PathBuf::as_path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `path` is a directory node of this map.
    #[must_use]
    pub fn is_directory(&self, path: &Path) -> bool {
        !self.root_is_file && self.entries.contains_key(path)
    }

    /// Every matching file reachable from the scan root, depth first in
    /// listing order.
    #[must_use]
    pub fn files(&self) -> Vec<PathBuf> {
        let mut out = Vec::new();
        match &self.root {
            Some(root) if self.root_is_file => {
                if self.entries.contains_key(root) {
                    out.push(root.clone());
                }
            }
            Some(root) => self.collect_files(root, &mut out),
            None => {}
        }
        out
    }

    fn collect_files(&self, dir: &Path, out: &mut Vec<PathBuf>) {
        let Some(children) = self.entries.get(dir) else {
            return;
        };
        for child in children {
            if self.entries.contains_key(child) {
                self.collect_files(child, out);
            } else {
                out.push(child.clone());
            }
        }
    }
}

/// Build the hierarchy map for `root`.
///
/// # Errors
///
/// - [`EngineError::PathAccess`] when `root` or any directory below it cannot
///   be inspected or listed. No partial map is returned.
/// - [`EngineError::UnmatchedRoot`] when `root` is a file that does not match
///   `filter`.
pub fn build_hierarchy(
    root: &Path,
    filter: &ExtensionFilter,
    options: &HierarchyOptions,
) -> Result<HierarchyMap> {
    let meta = fs::metadata(root).map_err(|e| EngineError::path_access(root, e))?;

    let mut map = HierarchyMap {
        root: Some(root.to_path_buf()),
        ..HierarchyMap::default()
    };

    if !meta.is_dir() {
        if !filter.matches(root) {
            return Err(EngineError::UnmatchedRoot {
                path: root.to_path_buf(),
                suffix: filter.suffix().to_string(),
            });
        }
        map.root_is_file = true;
        map.entries
            .insert(root.to_path_buf(), vec![root.to_path_buf()]);
        return Ok(map);
    }

    let listing = list_tree(root, options)?;
    let relevant = prune(root, &listing, filter, &mut map.entries);

    if relevant
        && options.include_parent
        && let Some(parent) = parent_of(root)
    {
        map.entries
            .entry(parent.clone())
            .or_default()
            .push(root.to_path_buf());
        map.parent = Some(parent);
    }

    Ok(map)
}

/// Directory -> `(entry, is_dir)` in listing order.
type Listing = HashMap<PathBuf, Vec<(PathBuf, bool)>>;

/// Walk everything below `root` without any ignore-file filtering.
fn list_tree(root: &Path, options: &HierarchyOptions) -> Result<Listing> {
    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .follow_links(options.follow_links)
        .max_depth(options.max_depth);

    let mut listing = Listing::new();
    for result in builder.build() {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                skip_or_fail(root, err)?;
                continue;
            }
        };
        if entry.depth() == 0 {
            continue;
        }
        let Some(file_type) = entry.file_type() else {
            continue;
        };
        let is_dir = if file_type.is_symlink() {
            // only reported unresolved when links are not followed
            warn!("skipping symlink {}", entry.path().display());
            continue;
        } else if file_type.is_dir() {
            true
        } else if file_type.is_file() {
            false
        } else {
            continue;
        };
        let Some(parent) = entry.path().parent().map(Path::to_path_buf) else {
            continue;
        };
        listing
            .entry(parent)
            .or_default()
            .push((entry.into_path(), is_dir));
    }
    Ok(listing)
}

/// Symlink loops and dangling links are skipped; anything else aborts the build.
fn skip_or_fail(root: &Path, err: ignore::Error) -> Result<()> {
    if is_loop(&err) {
        warn!("skipping symlink loop: {err}");
        return Ok(());
    }

    let path = error_path(&err).unwrap_or(root).to_path_buf();
    if is_dangling_link(&path) {
        warn!("skipping broken symlink {}: {err}", path.display());
        return Ok(());
    }

    let message = err.to_string();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::other(message));
    Err(EngineError::path_access(path, source))
}

fn is_loop(err: &ignore::Error) -> bool {
    match err {
        ignore::Error::Loop { .. } => true,
        ignore::Error::WithPath { err, .. }
        | ignore::Error::WithDepth { err, .. }
        | ignore::Error::WithLineNumber { err, .. } => is_loop(err),
        _ => false,
    }
}

fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        _ => None,
    }
}

fn is_dangling_link(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink())
        && fs::metadata(path).is_err()
}

/// Record `dir` if anything relevant lies below it. Returns whether it was recorded.
fn prune(
    dir: &Path,
    listing: &Listing,
    filter: &ExtensionFilter,
    entries: &mut BTreeMap<PathBuf, Vec<PathBuf>>,
) -> bool {
    let mut children = Vec::new();
    for (path, is_dir) in listing.get(dir).map(Vec::as_slice).unwrap_or_default() {
        let relevant = if *is_dir {
            prune(path, listing, filter, entries)
        } else {
            filter.matches(path)
        };
        if relevant {
            children.push(path.clone());
        }
    }

    if children.is_empty() {
        debug!("pruned {}", dir.display());
        return false;
    }

    debug!("{}: {} relevant entries", dir.display(), children.len());
    entries.insert(dir.to_path_buf(), children);
    true
}

/// Directory one level above `root`, expressed relative to how `root` was given.
fn parent_of(root: &Path) -> Option<PathBuf> {
    let parent = root.parent()?;
    if root.file_name().is_none() {
        // `.`, `..`, `a/..`
        return Some(root.join(".."));
    }
    if parent.as_os_str().is_empty() {
        return Some(PathBuf::from("."));
    }
    Some(parent.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "x\n").unwrap();
        path
    }

    fn as_set(paths: &[PathBuf]) -> HashSet<PathBuf> {
        paths.iter().cloned().collect()
    }

    #[test]
    fn single_matching_file_maps_to_itself() {
        let tmp = TempDir::new().unwrap();
        let file = touch(tmp.path(), "a.txt");

        let map = build_hierarchy(&file, &ExtensionFilter::new(".txt"), &HierarchyOptions::default())
            .unwrap();

        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&file), Some(&[file.clone()][..]));
        assert!(map.root_is_file());
        assert_eq!(map.files(), vec![file]);
    }

    #[test]
    fn single_unmatched_file_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let file = touch(tmp.path(), "a.md");

        let err = build_hierarchy(&file, &ExtensionFilter::new(".txt"), &HierarchyOptions::default())
            .unwrap_err();
        assert!(matches!(err, EngineError::UnmatchedRoot { .. }));
    }

    #[test]
    fn missing_root_is_a_path_access_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope");

        let err = build_hierarchy(&missing, &ExtensionFilter::new(".txt"), &HierarchyOptions::default())
            .unwrap_err();
        match err {
            EngineError::PathAccess { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn nested_tree_is_aggregated_and_pruned() {
        let tmp = TempDir::new().unwrap();
        let dir1 = tmp.path().join("dir1");
        let one = touch(&dir1, "1.txt");
        let nested = touch(&dir1, "dir1.1/2.txt");
        touch(&dir1, "dir1.2/readme.md");
        let dir11 = dir1.join("dir1.1");
        let dir12 = dir1.join("dir1.2");

        let map = build_hierarchy(&dir1, &ExtensionFilter::new(".txt"), &HierarchyOptions::default())
            .unwrap();

        let top = map.get(&dir1).unwrap();
        assert_eq!(as_set(top), as_set(&[dir11.clone(), one.clone()]));
        assert_eq!(map.get(&dir11), Some(&[nested.clone()][..]));
        assert!(!map.contains_path(&dir12));
        assert_eq!(map.get(tmp.path()), Some(&[dir1.clone()][..]));
        assert_eq!(map.parent(), Some(tmp.path()));
        assert_eq!(map.len(), 3);
        assert_eq!(as_set(&map.files()), as_set(&[one, nested]));
    }

    #[test]
    fn parent_entry_can_be_disabled() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "src/main.c");
        let root = tmp.path().join("src");
        let options = HierarchyOptions {
            include_parent: false,
            ..HierarchyOptions::default()
        };

        let map = build_hierarchy(&root, &ExtensionFilter::new(".c"), &options).unwrap();
        assert_eq!(map.len(), 1);
        assert!(map.parent().is_none());
        assert!(!map.contains_key(tmp.path()));
    }

    #[test]
    fn directory_without_matches_yields_empty_map() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "docs/a.md");
        touch(tmp.path(), "b.md");

        let map = build_hierarchy(tmp.path(), &ExtensionFilter::new(".rs"), &HierarchyOptions::default())
            .unwrap();
        assert!(map.is_empty());
        assert!(map.files().is_empty());
    }

    #[test]
    fn max_depth_limits_listing() {
        let tmp = TempDir::new().unwrap();
        let top = touch(tmp.path(), "a.rs");
        touch(tmp.path(), "deep/b.rs");
        let options = HierarchyOptions {
            max_depth: Some(1),
            include_parent: false,
            ..HierarchyOptions::default()
        };

        let map = build_hierarchy(tmp.path(), &ExtensionFilter::new(".rs"), &options).unwrap();
        assert_eq!(map.files(), vec![top]);
        assert!(!map.contains_key(&tmp.path().join("deep")));
    }

    #[test]
    fn parent_of_relative_paths() {
        assert_eq!(parent_of(Path::new("dir1")), Some(PathBuf::from(".")));
        assert_eq!(parent_of(Path::new("a/b")), Some(PathBuf::from("a")));
        assert_eq!(parent_of(Path::new(".")), Some(PathBuf::from("./..")));
        assert_eq!(parent_of(Path::new("/")), None);
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_skipped_unless_followed() {
        let tmp = TempDir::new().unwrap();
        let real = touch(tmp.path(), "real/a.rs");
        let root = tmp.path().join("root");
        fs::create_dir_all(&root).unwrap();
        std::os::unix::fs::symlink(tmp.path().join("real"), root.join("link")).unwrap();
        // loop back to the root
        std::os::unix::fs::symlink(&root, root.join("again")).unwrap();

        let filter = ExtensionFilter::new(".rs");
        let skipped = build_hierarchy(&root, &filter, &HierarchyOptions::default()).unwrap();
        assert!(skipped.is_empty());

        let options = HierarchyOptions {
            follow_links: true,
            ..HierarchyOptions::default()
        };
        let followed = build_hierarchy(&root, &filter, &options).unwrap();
        assert_eq!(followed.files(), vec![root.join("link").join("a.rs")]);
        assert!(real.exists());
    }

    #[test]
    fn child_lists_follow_listing_order() {
        let tmp = TempDir::new().unwrap();
        for name in ["m.txt", "b.txt", "z.md", "y.txt", "a.txt"] {
            touch(tmp.path(), name);
        }
        touch(tmp.path(), "k/inner.txt");
        touch(tmp.path(), "empty/skip.md");
        let relevant = |path: &Path| {
            (path.is_dir() && path.file_name().is_some_and(|n| n == "k"))
                || path.extension().is_some_and(|e| e == "txt")
        };
        let expected: Vec<PathBuf> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|path| relevant(path))
            .collect();

        let map = build_hierarchy(tmp.path(), &ExtensionFilter::new(".txt"), &HierarchyOptions::default())
            .unwrap();
        assert_eq!(map.get(tmp.path()), Some(expected.as_slice()));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_subdirectory_aborts_the_build() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "ok/a.rs");
        touch(tmp.path(), "locked/b.rs");
        let locked = tmp.path().join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        if fs::read_dir(&locked).is_ok() {
            // privileged user: permissions are not enforced
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = build_hierarchy(tmp.path(), &ExtensionFilter::new(".rs"), &HierarchyOptions::default());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        match result {
            Err(EngineError::PathAccess { path, .. }) => assert_eq!(path, locked),
            other => panic!("expected PathAccess, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_is_skipped_when_following() {
        let tmp = TempDir::new().unwrap();
        let kept = touch(tmp.path(), "a.rs");
        std::os::unix::fs::symlink(tmp.path().join("gone"), tmp.path().join("dangling")).unwrap();
        let options = HierarchyOptions {
            follow_links: true,
            include_parent: false,
            ..HierarchyOptions::default()
        };

        let map = build_hierarchy(tmp.path(), &ExtensionFilter::new(".rs"), &options).unwrap();
        assert_eq!(map.files(), vec![kept]);
    }
}
