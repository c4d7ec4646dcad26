// crates/core/src/language/scanner.rs
//! # Literal-aware comment scanner
//!
//! Character-level state machine that walks source text line by line and
//! separates code from comment text.
//!
//! | State | Trigger | Next state |
//! |-------|---------|------------|
//! | `Code` | string quote | `StringLiteral` |
//! | `Code` | char quote | `CharLiteral` |
//! | `Code` | line comment marker | `LineComment` (until end of line) |
//! | `Code` | block start marker | `BlockComment` |
//! | literal | escape + any char | same literal |
//! | literal | its closing quote | `Code` |
//! | `BlockComment` | block end marker | `Code` |
//!
//! Comment markers and quotes are only recognised in `Code`, so `//` inside
//! `"http://example.com"` stays part of the literal and a quote inside a
//! comment never opens one.

use alloc::string::String;

use super::comment_syntax::CommentSyntax;

/// Scanner position state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanState {
    #[default]
    Code,
    LineComment,
    BlockComment,
    StringLiteral,
    CharLiteral,
}

/// One line after comment removal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannedLine {
    /// Surviving (non-comment) text.
    pub text: String,
    /// Whether any part of the line was comment text.
    pub had_comment: bool,
}

impl ScannedLine {
    /// The line held nothing but comment text and whitespace.
    #[must_use]
    pub fn is_comment_only(&self) -> bool {
        self.had_comment && self.text.trim().is_empty()
    }
}

/// 行単位でコメントを取り除くスキャナ
///
/// Block comments and literals stay open across [`Scanner::scan_line`]
/// calls; line comments end with the line.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    syntax: &'a CommentSyntax,
    state: ScanState,
}

impl<'a> Scanner<'a> {
    #[must_use]
    pub const fn new(syntax: &'a CommentSyntax) -> Self {
        Self {
            syntax,
            state: ScanState::Code,
        }
    }

    /// State carried into the next line.
    #[must_use]
    pub const fn state(&self) -> ScanState {
        self.state
    }

    /// Scan one line (without its line terminator).
    pub fn scan_line(&mut self, line: &str) -> ScannedLine {
        let mut text = String::with_capacity(line.len());
        let mut had_comment = self.state == ScanState::BlockComment;
        let mut i = 0;

        while i < line.len() {
            let rest = &line[i..];
            let Some(c) = rest.chars().next() else {
                break;
            };

            match self.state {
                ScanState::Code => {
                    if self
                        .syntax
                        .line_comment_marker()
                        .is_some_and(|marker| rest.starts_with(marker))
                    {
                        had_comment = true;
                        self.state = ScanState::LineComment;
                        break;
                    }
                    if let Some((start, _)) = self.syntax.block_markers()
                        && rest.starts_with(start)
                    {
                        had_comment = true;
                        self.state = ScanState::BlockComment;
                        i += start.len();
                        continue;
                    }

                    text.push(c);
                    i += c.len_utf8();
                    if Some(c) == self.syntax.string_quote {
                        self.state = ScanState::StringLiteral;
                    } else if Some(c) == self.syntax.char_quote {
                        self.state = ScanState::CharLiteral;
                    }
                }
                ScanState::StringLiteral | ScanState::CharLiteral => {
                    text.push(c);
                    i += c.len_utf8();
                    if c == self.syntax.escape {
                        // escaped char is never a delimiter
                        if let Some(escaped) = line[i..].chars().next() {
                            text.push(escaped);
                            i += escaped.len_utf8();
                        }
                    } else if Some(c) == self.closing_quote() {
                        self.state = ScanState::Code;
                    }
                }
                ScanState::BlockComment => match self.syntax.block_markers() {
                    Some((_, end)) if rest.starts_with(end) => {
                        i += end.len();
                        self.state = ScanState::Code;
                    }
                    Some(_) => i += c.len_utf8(),
                    None => {
                        self.state = ScanState::Code;
                    }
                },
                ScanState::LineComment => break,
            }
        }

        let ends_in_literal = matches!(
            self.state,
            ScanState::StringLiteral | ScanState::CharLiteral
        );
        if self.state == ScanState::LineComment {
            self.state = ScanState::Code;
        }
        if had_comment && !ends_in_literal {
            let len = text.trim_end().len();
            text.truncate(len);
        }

        ScannedLine { text, had_comment }
    }

    const fn closing_quote(&self) -> Option<char> {
        match self.state {
            ScanState::StringLiteral => self.syntax.string_quote,
            ScanState::CharLiteral => self.syntax.char_quote,
            _ => None,
        }
    }
}
