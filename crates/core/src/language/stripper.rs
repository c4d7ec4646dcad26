// crates/core/src/language/stripper.rs
//! Comment stripper.
//!
//! Runs the [`Scanner`] over every line of one file, drops lines that held
//! only comment text, and trims blank lines from both ends of the result.
//! Blank lines that were already blank in the source are kept.

use alloc::string::String;
use alloc::vec::Vec;

use super::comment_syntax::CommentSyntax;
use super::scanner::Scanner;

/// Result of stripping one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StripOutput {
    /// Surviving lines.
    pub lines: Vec<String>,
    /// Lines dropped because they contained only comment text.
    pub comment_lines: usize,
}

/// ソースからコメントを取り除く
#[derive(Debug, Clone, Default)]
pub struct CommentStripper {
    syntax: CommentSyntax,
}

impl CommentStripper {
    #[must_use]
    pub const fn new(syntax: CommentSyntax) -> Self {
        Self { syntax }
    }

    /// Strip comments from the lines of one file.
    ///
    /// Total over any input: an unterminated literal or block comment simply
    /// runs to the end of the file.
    #[must_use]
    pub fn strip<S: AsRef<str>>(&self, lines: &[S]) -> Vec<String> {
        self.strip_detailed(lines).lines
    }

    /// Split `text` into lines (`\n` or `\r\n`) and strip them.
    #[must_use]
    pub fn strip_text(&self, text: &str) -> Vec<String> {
        let lines: Vec<&str> = text.lines().collect();
        self.strip(&lines)
    }

    /// Like [`CommentStripper::strip`], also reporting how many lines were comment-only.
    #[must_use]
    pub fn strip_detailed<S: AsRef<str>>(&self, lines: &[S]) -> StripOutput {
        let mut kept = Vec::with_capacity(lines.len());
        let mut comment_lines = 0;

        if self.syntax.is_comment_free() {
            kept.extend(lines.iter().map(|l| String::from(l.as_ref())));
            trim_blank_edges(&mut kept);
            return StripOutput {
                lines: kept,
                comment_lines,
            };
        }

        let mut scanner = Scanner::new(&self.syntax);
        for line in lines {
            let scanned = scanner.scan_line(line.as_ref());
            if scanned.is_comment_only() {
                comment_lines += 1;
            } else {
                kept.push(scanned.text);
            }
        }

        trim_blank_edges(&mut kept);
        StripOutput {
            lines: kept,
            comment_lines,
        }
    }
}

/// Strip C-style comments from `lines`.
#[must_use]
pub fn strip<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    CommentStripper::default().strip(lines)
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn trim_blank_edges(lines: &mut Vec<String>) {
    let trailing = lines.iter().rev().take_while(|l| is_blank(l)).count();
    lines.truncate(lines.len() - trailing);
    let leading = lines.iter().take_while(|l| is_blank(l)).count();
    lines.drain(..leading);
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn block_comment_between_code_leaves_no_gap() {
        let src = ["code1", "/* first", " * second", " */", "code2"];
        assert_eq!(strip(&src), vec!["code1", "code2"]);
    }

    #[test]
    fn intentional_blank_line_is_kept() {
        let src = ["code1", "", "code2"];
        assert_eq!(strip(&src), vec!["code1", "", "code2"]);
    }

    #[test]
    fn blank_line_inside_block_comment_is_dropped() {
        let src = ["a", "/*", "", "*/", "", "b"];
        assert_eq!(strip(&src), vec!["a", "", "b"]);
    }

    #[test]
    fn leading_and_trailing_blanks_are_trimmed() {
        let src = ["// header", "", "fn main() {}", "", "   ", "// footer"];
        assert_eq!(strip(&src), vec!["fn main() {}"]);
    }

    #[test]
    fn literal_content_is_preserved() {
        let src = [r#"let u = "http://example.com";"#, r#"let g = "/* no */";"#];
        assert_eq!(strip(&src), vec![src[0], src[1]]);
    }

    #[test]
    fn unterminated_block_comment_consumes_rest() {
        let src = ["x = 1;", "/* never closed", "y = 2;"];
        assert_eq!(strip(&src), vec!["x = 1;"]);
    }

    #[test]
    fn strip_text_handles_crlf() {
        let stripper = CommentStripper::default();
        let out = stripper.strip_text("a // c\r\n// only\r\nb\r\n");
        assert_eq!(out, vec!["a", "b"]);
    }

    #[test]
    fn strip_detailed_counts_comment_lines() {
        let stripper = CommentStripper::default();
        let out = stripper.strip_detailed(&["// one", "x", "/* two", "three */", "y // not counted"]);
        assert_eq!(out.lines, vec!["x", "y"]);
        assert_eq!(out.comment_lines, 3);
    }

    #[test]
    fn custom_syntax_is_honoured() {
        let syntax = CommentSyntax {
            line_comment: Some(String::from("--")),
            block_comment: None,
            ..CommentSyntax::c_style()
        };
        let stripper = CommentStripper::new(syntax);
        let out = stripper.strip(&["select 1; -- one", "/* kept */", "-- gone"]);
        assert_eq!(out, vec!["select 1;", "/* kept */"]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let src: [&str; 0] = [];
        assert!(strip(&src).is_empty());
        assert!(strip(&["", "  "]).is_empty());
    }
}
