// crates/cli/src/syntax.rs
//! Comment syntax selection: YAML file or command-line overrides on top of
//! the C-style default.
//!
//! ```yaml
//! line_comment: "--"
//! block_comment:
//!   start: "/*"
//!   end: "*/"
//! string_quote: "'"
//! char_quote: null
//! ```
//!
//! Keys left out of the file keep their C-style values.

use std::path::Path;

use dirloc_core::{BlockDelimiters, CommentSyntax};

use crate::args::SyntaxArgs;
use crate::error::{AppError, Result};

/// Load a [`CommentSyntax`] from a YAML file.
///
/// # Errors
/// Returns [`AppError::Read`] if the file cannot be read and
/// [`AppError::Syntax`] if it is not a valid syntax description.
pub fn load_syntax(path: &Path) -> Result<CommentSyntax> {
    let text = std::fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&text).map_err(|source| AppError::Syntax {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve the syntax table from the syntax-related flags.
///
/// # Errors
/// See [`load_syntax`].
pub fn resolve_syntax(args: &SyntaxArgs) -> Result<CommentSyntax> {
    let mut syntax = match &args.syntax {
        Some(path) => load_syntax(path)?,
        None => CommentSyntax::c_style(),
    };

    if let Some(marker) = &args.line_comment {
        syntax.line_comment = Some(marker.clone());
    }
    if let Some([start, end]) = args.block_comment.as_deref() {
        syntax.block_comment = Some(BlockDelimiters::new(start.clone(), end.clone()));
    }
    if args.no_line_comment {
        syntax.line_comment = None;
    }
    if args.no_block_comment {
        syntax.block_comment = None;
    }

    Ok(syntax)
}
