// crates/cli/src/presentation.rs
use std::borrow::Cow;
use std::io::Write;
use std::path::{Path, PathBuf};

use dirloc_core::LineCounts;
use dirloc_engine::hierarchy::HierarchyMap;
use dirloc_engine::stats::{DirStats, FileStats, RunResult};
use serde::Serialize;

use crate::config::AppConfig;
use crate::error::Result;
use crate::options::{OutputFormat, OutputMode, SortSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowKind {
    Dir,
    File,
    Total,
}

impl RowKind {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Dir => "dir",
            Self::File => "file",
            Self::Total => "total",
        }
    }
}

/// One printable line of the report.
#[derive(Debug, Clone)]
struct Row<'a> {
    kind: RowKind,
    path: Cow<'a, Path>,
    files: usize,
    counts: LineCounts,
    /// Files and counts directly inside a directory row.
    direct: Option<(usize, LineCounts)>,
}

#[derive(Debug, Serialize)]
struct ErrorEntry<'a> {
    path: &'a Path,
    message: String,
}

/// Shape of the JSON/YAML report.
#[derive(Debug, Serialize)]
struct Report<'a> {
    version: &'static str,
    root: &'a Path,
    suffix: &'a str,
    files_counted: usize,
    total: LineCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    hierarchy: Option<&'a HierarchyMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    directories: Option<Vec<&'a DirStats>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    files: Option<Vec<&'a FileStats>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<ErrorEntry<'a>>,
}

/// Write the report for `result` in the configured format.
///
/// # Errors
/// Returns an error if writing or serialization fails.
pub fn render(result: &RunResult, config: &AppConfig, out: &mut dyn Write) -> Result<()> {
    match config.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &report(result, config))?;
            writeln!(out)?;
            Ok(())
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&report(result, config))?;
            write!(out, "{yaml}")?;
            Ok(())
        }
        OutputFormat::Csv => print_sv(&rows(result, config), out, ","),
        OutputFormat::Tsv => print_sv(&rows(result, config), out, "\t"),
        OutputFormat::Md => print_markdown(&rows(result, config), out),
        OutputFormat::Table => print_table(&rows(result, config), result, config, out),
    }
}

fn report<'a>(result: &'a RunResult, config: &'a AppConfig) -> Report<'a> {
    let with_dirs = config.mode != OutputMode::TotalOnly;
    let with_files = config.mode == OutputMode::Full;

    Report {
        version: crate::VERSION,
        root: &config.engine.root,
        suffix: config.engine.filter.suffix(),
        files_counted: result.files.len(),
        total: result.total(),
        hierarchy: with_dirs.then_some(&result.hierarchy),
        directories: with_dirs.then(|| sorted_dirs(result, &config.sort)),
        files: with_files.then(|| sorted_files(result, &config.sort)),
        errors: result
            .errors
            .iter()
            .map(|(path, e)| ErrorEntry {
                path,
                message: e.to_string(),
            })
            .collect(),
    }
}

fn sorted_dirs<'a>(result: &'a RunResult, sort: &SortSpec) -> Vec<&'a DirStats> {
    let mut dirs: Vec<_> = result.directories.iter().collect();
    if !sort.is_empty() {
        dirs.sort_by(|a, b| sort.compare((&a.path, &a.total), (&b.path, &b.total)));
    }
    dirs
}

fn sorted_files<'a>(result: &'a RunResult, sort: &SortSpec) -> Vec<&'a FileStats> {
    let mut files: Vec<_> = result.files.iter().filter(|f| !f.is_binary).collect();
    if !sort.is_empty() {
        files.sort_by(|a, b| sort.compare((&a.path, &a.counts), (&b.path, &b.counts)));
    }
    files
}

fn rows<'a>(result: &'a RunResult, config: &AppConfig) -> Vec<Row<'a>> {
    let mut rows = Vec::new();

    if config.mode != OutputMode::TotalOnly {
        rows.extend(sorted_dirs(result, &config.sort).into_iter().map(|d| Row {
            kind: RowKind::Dir,
            path: Cow::Borrowed(d.path.as_path()),
            files: d.total_files,
            counts: d.total,
            direct: Some((d.files, d.direct)),
        }));
    }
    if config.mode == OutputMode::Full {
        rows.extend(sorted_files(result, &config.sort).into_iter().map(|f| Row {
            kind: RowKind::File,
            path: Cow::Borrowed(f.path.as_path()),
            files: 1,
            counts: f.counts,
            direct: None,
        }));
    }

    rows.push(Row {
        kind: RowKind::Total,
        path: Cow::Owned(PathBuf::from("TOTAL")),
        files: result.files.len(),
        counts: result.total(),
        direct: None,
    });
    rows
}

fn print_table(
    rows: &[Row<'_>],
    result: &RunResult,
    config: &AppConfig,
    out: &mut dyn Write,
) -> Result<()> {
    writeln!(
        out,
        "dirloc v{} · root={} · ext={} · parallel={}",
        crate::VERSION,
        config.engine.root.display(),
        config.engine.filter.suffix(),
        config.engine.jobs
    )?;
    writeln!(out)?;

    let header = format!(
        "{:>10}{:>10}{:>10}{:>10}{:>8}",
        "CODE", "COMMENT", "BLANK", "LINES", "FILES"
    );
    let mut current: Option<RowKind> = None;

    for row in rows {
        if current != Some(row.kind) {
            let title = match row.kind {
                RowKind::Dir => Some(format!(
                    "{header}{:>10}{:>10}   DIRECTORY",
                    "DIR.CODE", "DIR.FILES"
                )),
                RowKind::File => Some(format!("{header}   FILE")),
                RowKind::Total => None,
            };
            match title {
                Some(title) => {
                    if current.is_some() {
                        writeln!(out)?;
                    }
                    writeln!(out, "{title}")?;
                    writeln!(out, "{}", "-".repeat(title.len()))?;
                }
                None => writeln!(out, "---")?,
            }
            current = Some(row.kind);
        }

        let label = match row.kind {
            RowKind::Total => format!("TOTAL ({} files)", row.files),
            _ => row.path.display().to_string(),
        };
        let direct = row
            .direct
            .map(|(files, counts)| format!("{:>10}{:>10}", counts.code, files))
            .unwrap_or_default();
        writeln!(
            out,
            "{:>10}{:>10}{:>10}{:>10}{:>8}{direct}   {label}",
            row.counts.code, row.counts.comment, row.counts.blank, row.counts.lines, row.files
        )?;
    }

    writeln!(out)?;
    if result.errors.is_empty() {
        writeln!(out, "[dirloc] Completed: {} files counted.", result.files.len())?;
    } else {
        writeln!(
            out,
            "[dirloc] Completed: {} files counted, {} skipped.",
            result.files.len(),
            result.errors.len()
        )?;
    }
    Ok(())
}

fn print_markdown(rows: &[Row<'_>], out: &mut dyn Write) -> Result<()> {
    let dirs: Vec<_> = rows.iter().filter(|r| r.kind == RowKind::Dir).collect();
    let files: Vec<_> = rows.iter().filter(|r| r.kind == RowKind::File).collect();

    if !dirs.is_empty() {
        writeln!(out, "### Directories")?;
        writeln!(out)?;
        writeln!(
            out,
            "| Code | Comment | Blank | Lines | Files | Direct code | Direct comment | Direct blank | Direct lines | Direct files | Path |"
        )?;
        writeln!(out, "|---:|---:|---:|---:|---:|---:|---:|---:|---:|---:|:---|")?;
        for row in &dirs {
            let (direct_files, direct) = row.direct.unwrap_or_default();
            writeln!(
                out,
                "| {} | {} | {} | {} | {} | {} | {} | {} | {} | {direct_files} | {} |",
                row.counts.code,
                row.counts.comment,
                row.counts.blank,
                row.counts.lines,
                row.files,
                direct.code,
                direct.comment,
                direct.blank,
                direct.lines,
                md_escape(&row.path)
            )?;
        }
        writeln!(out)?;
    }

    if !files.is_empty() {
        writeln!(out, "### Files")?;
        writeln!(out)?;
        writeln!(out, "| Code | Comment | Blank | Lines | Path |")?;
        writeln!(out, "|---:|---:|---:|---:|:---|")?;
        for row in &files {
            writeln!(
                out,
                "| {} | {} | {} | {} | {} |",
                row.counts.code,
                row.counts.comment,
                row.counts.blank,
                row.counts.lines,
                md_escape(&row.path)
            )?;
        }
        writeln!(out)?;
    }

    if let Some(total) = rows.iter().find(|r| r.kind == RowKind::Total) {
        writeln!(
            out,
            "**Total**: {} code, {} comment, {} blank, {} lines in {} files",
            total.counts.code, total.counts.comment, total.counts.blank, total.counts.lines, total.files
        )?;
    }
    Ok(())
}

fn md_escape(path: &Path) -> String {
    path.display().to_string().replace('|', "\\|")
}

fn print_sv(rows: &[Row<'_>], out: &mut dyn Write, delimiter: &str) -> Result<()> {
    writeln!(
        out,
        "{}",
        [
            "kind",
            "path",
            "files",
            "code",
            "comment",
            "blank",
            "lines",
            "direct_files",
            "direct_code",
            "direct_comment",
            "direct_blank",
            "direct_lines",
        ]
        .join(delimiter)
    )?;

    for row in rows {
        let path = row.path.display().to_string();
        let path = if delimiter == "," && (path.contains(',') || path.contains('"') || path.contains('\n'))
        {
            format!("\"{}\"", path.replace('"', "\"\""))
        } else {
            path
        };
        let mut fields = vec![
            row.kind.as_str().to_string(),
            path,
            row.files.to_string(),
            row.counts.code.to_string(),
            row.counts.comment.to_string(),
            row.counts.blank.to_string(),
            row.counts.lines.to_string(),
        ];
        match row.direct {
            Some((files, counts)) => fields.extend([
                files.to_string(),
                counts.code.to_string(),
                counts.comment.to_string(),
                counts.blank.to_string(),
                counts.lines.to_string(),
            ]),
            None => fields.extend(std::iter::repeat_n(String::new(), 5)),
        }
        writeln!(out, "{}", fields.join(delimiter))?;
    }
    Ok(())
}
