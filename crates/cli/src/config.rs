// crates/cli/src/config.rs
use std::path::PathBuf;

use dirloc_engine::config::{Config, ConfigBuilder};
use dirloc_engine::error::EngineError;
use dirloc_engine::filter::ExtensionFilter;
use dirloc_engine::hierarchy::HierarchyOptions;

use crate::args::Args;
use crate::error::{AppError, Result};
use crate::options::{OutputFormat, OutputMode, SortSpec};
use crate::syntax::resolve_syntax;

/// Everything one invocation needs: the engine configuration plus
/// presentation settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub engine: Config,
    pub format: OutputFormat,
    pub mode: OutputMode,
    pub sort: SortSpec,
    pub output_path: Option<PathBuf>,
    pub verbose: u8,
    pub quiet: bool,
}

impl TryFrom<Args> for AppConfig {
    type Error = AppError;

    fn try_from(args: Args) -> Result<Self> {
        let syntax = resolve_syntax(&args.syntax)?;

        let filter = ExtensionFilter::new(args.filter.ext).case_sensitive(!args.filter.ignore_case);
        let hierarchy = HierarchyOptions {
            include_parent: !args.scan.no_parent,
            follow_links: args.scan.follow,
            max_depth: args.scan.max_depth,
        };
        let jobs = args.scan.jobs.unwrap_or_else(num_cpus::get);

        let engine = ConfigBuilder::default()
            .root(args.path)
            .filter(filter)
            .syntax(syntax)
            .hierarchy(hierarchy)
            .jobs(jobs)
            .strict(args.behavior.strict)
            .build()
            .map_err(|e| EngineError::Config(e.to_string()))?;
        engine.validate()?;

        Ok(Self {
            engine,
            format: args.output.format,
            mode: args.output.mode,
            sort: args.output.sort.unwrap_or_default(),
            output_path: args.output.output,
            verbose: args.behavior.verbose,
            quiet: args.behavior.quiet,
        })
    }
}
