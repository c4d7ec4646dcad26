use std::path::Path;

use dirloc_core::{CommentSyntax, count_bytes};
use log::trace;

use crate::error::Result;
use crate::reader::SourceReader;
use crate::stats::FileStats;

/// Read one file and count its lines.
pub fn process_file(
    path: &Path,
    reader: &dyn SourceReader,
    syntax: &CommentSyntax,
) -> Result<FileStats> {
    let bytes = reader.read(path)?;
    let analysis = count_bytes(&bytes, syntax);
    trace!(
        "{}: {} lines, {} code{}",
        path.display(),
        analysis.counts.lines,
        analysis.counts.code,
        if analysis.is_binary { " (binary)" } else { "" }
    );

    Ok(FileStats {
        path: path.to_path_buf(),
        size: bytes.len() as u64,
        counts: analysis.counts,
        is_binary: analysis.is_binary,
    })
}
