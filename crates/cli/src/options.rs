use std::cmp::Ordering;
use std::path::Path;
use std::str::FromStr;

use clap::ValueEnum;
use dirloc_core::LineCounts;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Tsv,
    Json,
    Yaml,
    Md,
}

/// 出力モード
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[value(rename_all = "kebab-case")]
pub enum OutputMode {
    /// Directories and files
    #[default]
    Full,
    /// Directories only
    Summary,
    /// Grand total only
    TotalOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    Path,
    Lines,
    Code,
    Comment,
    Blank,
}

impl SortKey {
    fn compare(self, a: (&Path, &LineCounts), b: (&Path, &LineCounts)) -> Ordering {
        match self {
            Self::Path => a.0.cmp(b.0),
            Self::Lines => a.1.lines.cmp(&b.1.lines),
            Self::Code => a.1.code.cmp(&b.1.code),
            Self::Comment => a.1.comment.cmp(&b.1.comment),
            Self::Blank => a.1.blank.cmp(&b.1.blank),
        }
    }
}

/// Multi-key sort specification, e.g. `code:desc,path`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortSpec(pub Vec<(SortKey, bool)>);

impl SortSpec {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Compare two rows; keys are applied in order, `true` means descending.
    #[must_use]
    pub fn compare(&self, a: (&Path, &LineCounts), b: (&Path, &LineCounts)) -> Ordering {
        for (key, desc) in &self.0 {
            let order = key.compare(a, b);
            if order != Ordering::Equal {
                return if *desc { order.reverse() } else { order };
            }
        }
        Ordering::Equal
    }
}

impl FromStr for SortSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let specs = s
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(parse_single_spec)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self(specs))
    }
}

fn parse_single_spec(part: &str) -> Result<(SortKey, bool), String> {
    let (key_str, desc) = part.split_once(':').map_or((part, false), |(k, d)| {
        (k.trim(), matches!(d.trim(), "desc" | "DESC"))
    });

    let key = parse_sort_key(key_str)?;
    Ok((key, desc))
}

fn parse_sort_key(key_str: &str) -> Result<SortKey, String> {
    match key_str.to_ascii_lowercase().as_str() {
        "path" | "name" => Ok(SortKey::Path),
        "lines" => Ok(SortKey::Lines),
        "code" | "sloc" => Ok(SortKey::Code),
        "comment" => Ok(SortKey::Comment),
        "blank" => Ok(SortKey::Blank),
        other => Err(format!("Unknown sort key: {other}")),
    }
}
