//! コメント除去処理
//!
//! C 系のコメント (`//`, `/* */`) と文字列/文字リテラルを区別しながら
//! ソース行からコメントを取り除く。

pub mod comment_syntax;
pub mod scanner;
pub mod stripper;

pub use comment_syntax::{BlockDelimiters, CommentSyntax};
pub use scanner::{ScanState, ScannedLine, Scanner};
pub use stripper::{CommentStripper, strip};
