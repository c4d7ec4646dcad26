// crates/engine/src/reader.rs
use std::path::Path;

use crate::error::{EngineError, Result};

/// Port for reading the raw bytes of a source file.
pub trait SourceReader: Send + Sync {
    fn read(&self, path: &Path) -> Result<Vec<u8>>;
}

/// Reads files straight from disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsReader;

impl SourceReader for FsReader {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        std::fs::read(path).map_err(|source| EngineError::FileRead {
            path: path.to_path_buf(),
            source,
        })
    }
}
