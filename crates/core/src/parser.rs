use alloc::string::String;
use alloc::vec::Vec;

use crate::language::{CommentStripper, CommentSyntax};
use crate::stats::{AnalysisResult, LineCounts};

/// Bytes inspected for NUL when deciding whether input is binary.
const BINARY_SNIFF_LEN: usize = 8 * 1024;

/// Count code/comment/blank lines of decoded source text.
#[must_use]
pub fn count_lines(text: &str, syntax: &CommentSyntax) -> LineCounts {
    let lines: Vec<&str> = text.lines().collect();
    let stripped = CommentStripper::new(syntax.clone()).strip_detailed(&lines);

    let code = stripped
        .lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .count();
    let comment = stripped.comment_lines;

    LineCounts {
        lines: lines.len(),
        code,
        comment,
        blank: lines.len() - code - comment,
    }
}

/// Count lines in a byte slice.
///
/// Content with a NUL byte near the start is reported as binary with zero
/// counts. Invalid UTF-8 is replaced rather than rejected.
#[must_use]
pub fn count_bytes(input: &[u8], syntax: &CommentSyntax) -> AnalysisResult {
    if is_binary(input) {
        return AnalysisResult {
            counts: LineCounts::default(),
            is_binary: true,
        };
    }

    let text = String::from_utf8_lossy(input);
    AnalysisResult {
        counts: count_lines(&text, syntax),
        is_binary: false,
    }
}

fn is_binary(input: &[u8]) -> bool {
    let len = input.len().min(BINARY_SNIFF_LEN);
    input[..len].contains(&0)
}
