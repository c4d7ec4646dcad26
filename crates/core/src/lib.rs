//! # dirloc core
//!
//! Filesystem-free building blocks of the `dirloc` line counter:
//!
//! - [`language`]: comment syntax table, the literal-aware scanner and the comment stripper
//! - [`parser`]: byte-slice entry point (binary detection, lossy decoding)
//! - [`stats`]: per-file line statistics

#![no_std]
#![allow(clippy::multiple_crate_versions)]

extern crate alloc;

pub mod language;
pub mod parser;
pub mod stats;

pub use language::{BlockDelimiters, CommentStripper, CommentSyntax, ScanState, strip};
pub use parser::{count_bytes, count_lines};
pub use stats::{AnalysisResult, LineCounts};
