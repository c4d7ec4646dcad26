// crates/engine/src/filter.rs
use std::path::Path;

use serde::{Deserialize, Serialize};

/// File-name suffix filter, e.g. `.rs`.
///
/// An empty suffix matches every file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionFilter {
    suffix: String,
    case_sensitive: bool,
}

impl Default for ExtensionFilter {
    fn default() -> Self {
        Self::new("")
    }
}

impl ExtensionFilter {
    #[must_use]
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            case_sensitive: true,
        }
    }

    #[must_use]
    pub const fn case_sensitive(mut self, yes: bool) -> Self {
        self.case_sensitive = yes;
        self
    }

    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    #[must_use]
    pub const fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// 拡張子（接尾辞）が一致するか判定する
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        if self.suffix.is_empty() {
            return true;
        }
        let Some(name) = path.file_name() else {
            return false;
        };
        let name = name.to_string_lossy();
        if self.case_sensitive {
            name.ends_with(self.suffix.as_str())
        } else {
            name.to_lowercase().ends_with(&self.suffix.to_lowercase())
        }
    }
}
