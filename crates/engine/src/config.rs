use std::path::PathBuf;

use derive_builder::Builder;
use dirloc_core::CommentSyntax;

use crate::error::{EngineError, Result};
use crate::filter::ExtensionFilter;
use crate::hierarchy::HierarchyOptions;

#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct Config {
    /// File or directory to count.
    #[builder(default = "PathBuf::from(\".\")")]
    pub root: PathBuf,
    #[builder(default)]
    pub filter: ExtensionFilter,
    #[builder(default)]
    pub syntax: CommentSyntax,
    #[builder(default)]
    pub hierarchy: HierarchyOptions,
    /// Worker threads used for counting files.
    #[builder(default = "1")]
    pub jobs: usize,
    /// Fail on the first unreadable file instead of collecting the error.
    #[builder(default)]
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            filter: ExtensionFilter::default(),
            syntax: CommentSyntax::default(),
            hierarchy: HierarchyOptions::default(),
            jobs: 1,
            strict: false,
        }
    }
}

impl Config {
    /// # Errors
    /// Returns [`EngineError::Config`] for settings the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.jobs == 0 {
            return Err(EngineError::Config("jobs must be at least 1".to_string()));
        }
        if self.hierarchy.max_depth == Some(0) {
            return Err(EngineError::Config("max depth must be at least 1".to_string()));
        }
        let escape = Some(self.syntax.escape);
        if escape == self.syntax.string_quote || escape == self.syntax.char_quote {
            return Err(EngineError::Config(format!(
                "escape character '{}' must differ from the quote characters",
                self.syntax.escape
            )));
        }
        if let Some(block) = &self.syntax.block_comment
            && block.start.is_empty() != block.end.is_empty()
        {
            return Err(EngineError::Config(
                "block comment needs both a start and an end marker".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dirloc_core::BlockDelimiters;

    #[test]
    fn builder_applies_defaults() {
        let config = ConfigBuilder::default()
            .root("src")
            .filter(ExtensionFilter::new(".rs"))
            .build()
            .unwrap();
        assert_eq!(config.root, PathBuf::from("src"));
        assert_eq!(config.jobs, 1);
        assert!(!config.strict);
        assert!(config.hierarchy.include_parent);
        assert_eq!(config.syntax, CommentSyntax::c_style());
    }

    #[test]
    fn zero_jobs_is_rejected() {
        let config = Config {
            jobs: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(EngineError::Config(_))));
    }

    #[test]
    fn half_block_comment_is_rejected() {
        let mut config = Config::default();
        config.syntax.block_comment = Some(BlockDelimiters::new("/*", ""));
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_max_depth_is_rejected() {
        let mut config = Config::default();
        config.hierarchy.max_depth = Some(0);
        assert!(matches!(config.validate(), Err(EngineError::Config(_))));

        config.hierarchy.max_depth = Some(1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn escape_equal_to_quote_is_rejected() {
        let mut config = Config::default();
        config.syntax.escape = '\'';
        assert!(matches!(config.validate(), Err(EngineError::Config(_))));

        config.syntax.char_quote = None;
        assert!(config.validate().is_ok());

        config.syntax.escape = '"';
        assert!(config.validate().is_err());
    }
}
