// crates/core/src/language/comment_syntax.rs
//! コメント・リテラル区切りの定義

use alloc::string::String;
use serde::{Deserialize, Serialize};

/// Start/end markers of a block comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDelimiters {
    pub start: String,
    pub end: String,
}

impl BlockDelimiters {
    #[must_use]
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Comment and literal delimiters the scanner recognises.
///
/// Markers are only meaningful in code; inside a literal or a comment they
/// are plain text. An empty marker string never matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentSyntax {
    /// Line comment opener, e.g. `//`.
    pub line_comment: Option<String>,
    /// Block comment delimiters, e.g. `/*` and `*/`.
    pub block_comment: Option<BlockDelimiters>,
    /// Quote that opens and closes a string literal.
    pub string_quote: Option<char>,
    /// Quote that opens and closes a character literal.
    pub char_quote: Option<char>,
    /// Escape character inside literals.
    pub escape: char,
}

impl Default for CommentSyntax {
    fn default() -> Self {
        Self::c_style()
    }
}

impl CommentSyntax {
    /// `//`, `/* */`, `"..."`, `'...'` with `\` escapes.
    #[must_use]
    pub fn c_style() -> Self {
        Self {
            line_comment: Some(String::from("//")),
            block_comment: Some(BlockDelimiters::new("/*", "*/")),
            string_quote: Some('"'),
            char_quote: Some('\''),
            escape: '\\',
        }
    }

    pub(crate) fn line_comment_marker(&self) -> Option<&str> {
        self.line_comment.as_deref().filter(|m| !m.is_empty())
    }

    pub(crate) fn block_markers(&self) -> Option<(&str, &str)> {
        self.block_comment
            .as_ref()
            .filter(|b| !b.start.is_empty() && !b.end.is_empty())
            .map(|b| (b.start.as_str(), b.end.as_str()))
    }

    /// Returns `true` when the syntax has no comment markers at all.
    #[must_use]
    pub fn is_comment_free(&self) -> bool {
        self.line_comment_marker().is_none() && self.block_markers().is_none()
    }
}
