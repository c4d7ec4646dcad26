// crates/engine/src/lib.rs
//! # dirloc engine
//!
//! Builds the directory hierarchy for a path, counts every relevant file
//! with the comment stripper from `dirloc_core`, and attributes the counts
//! to files and directories.

#![allow(clippy::multiple_crate_versions)]

use log::{debug, warn};
use rayon::prelude::*;

pub mod config;
pub mod error;
pub mod filter;
pub mod hierarchy;
pub mod processor;
pub mod reader;
pub mod stats;

use crate::config::Config;
use crate::error::Result;
use crate::hierarchy::build_hierarchy;
use crate::reader::{FsReader, SourceReader};
use crate::stats::{RunResult, summarize_directories};

pub use dirloc_core::{CommentSyntax, LineCounts};

/// Run the counting engine against the filesystem.
///
/// # Errors
///
/// Fails when the hierarchy cannot be built (the error is passed through
/// unchanged), when the configuration is invalid, or, in strict mode, when a
/// file cannot be read. Otherwise unreadable files are collected in
/// [`RunResult::errors`].
pub fn run(config: &Config) -> Result<RunResult> {
    run_with(config, &FsReader)
}

/// Same as [`run`], reading file contents through `reader`.
///
/// # Errors
///
/// See [`run`].
pub fn run_with(config: &Config, reader: &dyn SourceReader) -> Result<RunResult> {
    config.validate()?;

    let hierarchy = build_hierarchy(&config.root, &config.filter, &config.hierarchy)?;
    let paths = hierarchy.files();
    debug!(
        "{}: {} directories, {} files to count",
        config.root.display(),
        hierarchy.len(),
        paths.len()
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.jobs)
        .build()?;
    let outcomes: Vec<_> = pool.install(|| {
        paths
            .into_par_iter()
            .map(|path| {
                let outcome = processor::process_file(&path, reader, &config.syntax);
                (path, outcome)
            })
            .collect()
    });

    let mut files = Vec::with_capacity(outcomes.len());
    let mut errors = Vec::new();
    for (path, outcome) in outcomes {
        match outcome {
            Ok(stats) => files.push(stats),
            Err(e) if config.strict => return Err(e),
            Err(e) => {
                warn!("skipping {}: {e}", path.display());
                errors.push((path, e));
            }
        }
    }

    let directories = summarize_directories(&hierarchy, &files);
    Ok(RunResult {
        hierarchy,
        files,
        directories,
        errors,
    })
}
