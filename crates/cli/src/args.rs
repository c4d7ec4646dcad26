// crates/cli/src/args.rs
use std::path::PathBuf;

use clap::{ArgAction, Args as ClapArgs, Parser, ValueHint};

use crate::options::{OutputFormat, OutputMode, SortSpec};

/// Top-level CLI arguments parsed via clap.
#[derive(Parser, Debug)]
#[command(
    name = "dirloc",
    version = crate::VERSION,
    about = "Count lines of code per directory and file, ignoring comments"
)]
pub struct Args {
    /// File or directory to count
    #[arg(value_hint = ValueHint::AnyPath, default_value = ".")]
    pub path: PathBuf,

    #[command(flatten)]
    pub filter: FilterArgs,

    #[command(flatten)]
    pub scan: ScanArgs,

    #[command(flatten)]
    pub syntax: SyntaxArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub behavior: BehaviorArgs,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct FilterArgs {
    /// File-name suffix to count, compared exactly (e.g. `.rs`, `_test.go`)
    #[arg(short = 'e', long, help_heading = "Filter")]
    pub ext: String,

    /// Compare the suffix case-insensitively
    #[arg(short = 'i', long, help_heading = "Filter")]
    pub ignore_case: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ScanArgs {
    /// Do not record the parent directory of PATH
    #[arg(long, help_heading = "Scan")]
    pub no_parent: bool,

    /// Follow symbolic links
    #[arg(short = 'L', long, help_heading = "Scan")]
    pub follow: bool,

    /// Maximum directory depth below PATH
    #[arg(long, help_heading = "Scan")]
    pub max_depth: Option<usize>,

    /// Worker threads for counting (default: number of CPUs)
    #[arg(short = 'j', long, help_heading = "Scan")]
    pub jobs: Option<usize>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct SyntaxArgs {
    /// YAML file describing comment and literal delimiters
    #[arg(long, value_hint = ValueHint::FilePath, help_heading = "Syntax")]
    pub syntax: Option<PathBuf>,

    /// Line comment marker (default: //)
    #[arg(
        long,
        value_name = "MARKER",
        allow_hyphen_values = true,
        conflicts_with = "no_line_comment",
        help_heading = "Syntax"
    )]
    pub line_comment: Option<String>,

    /// Block comment markers (default: /* */)
    #[arg(
        long,
        num_args = 2,
        value_names = ["START", "END"],
        allow_hyphen_values = true,
        conflicts_with = "no_block_comment",
        help_heading = "Syntax"
    )]
    pub block_comment: Option<Vec<String>>,

    /// Disable line comments
    #[arg(long, help_heading = "Syntax")]
    pub no_line_comment: bool,

    /// Disable block comments
    #[arg(long, help_heading = "Syntax")]
    pub no_block_comment: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct OutputArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "table", help_heading = "Output")]
    pub format: OutputFormat,

    /// What to report
    #[arg(long, value_enum, default_value = "full", help_heading = "Output")]
    pub mode: OutputMode,

    /// Sort keys for listed rows (e.g. code:desc,path). Default: discovery order
    #[arg(long, help_heading = "Output")]
    pub sort: Option<SortSpec>,

    /// Write the report to FILE instead of stdout
    #[arg(short = 'o', long, value_hint = ValueHint::FilePath, help_heading = "Output")]
    pub output: Option<PathBuf>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct BehaviorArgs {
    /// Fail on the first unreadable file
    #[arg(long, help_heading = "Behavior")]
    pub strict: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, help_heading = "Behavior")]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose", help_heading = "Behavior")]
    pub quiet: bool,
}
