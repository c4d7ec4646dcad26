use core::iter::Sum;
use core::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Line statistics of one file or an aggregate of files.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineCounts {
    /// Physical lines.
    pub lines: usize,
    /// Non-blank lines left after comment removal.
    pub code: usize,
    /// Lines that held only comment text.
    pub comment: usize,
    /// Everything else (blank lines, including ones trimmed from the file edges).
    pub blank: usize,
}

impl LineCounts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.lines == 0
    }
}

impl Add for LineCounts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            lines: self.lines.saturating_add(rhs.lines),
            code: self.code.saturating_add(rhs.code),
            comment: self.comment.saturating_add(rhs.comment),
            blank: self.blank.saturating_add(rhs.blank),
        }
    }
}

impl AddAssign for LineCounts {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for LineCounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl<'a> Sum<&'a Self> for LineCounts {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Pure analysis result, independent of file system metadata.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub counts: LineCounts,
    /// Whether the content was detected as binary.
    pub is_binary: bool,
}
