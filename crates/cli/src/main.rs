use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use clap::Parser;
use dirloc_cli::args::Args;
use dirloc_cli::config::AppConfig;
use dirloc_cli::error::Result;
use dirloc_cli::{logging, presentation};
use dirloc_engine::stats::RunResult;

const EXIT_PARTIAL: u8 = 2;

fn main() -> ExitCode {
    let config = match AppConfig::try_from(Args::parse()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    logging::init(config.verbose, config.quiet);
    log::debug!("configuration: {config:?}");

    let result = match dirloc_engine::run(&config.engine) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    for (path, e) in &result.errors {
        eprintln!("[dirloc] skipped {}: {e}", path.display());
    }

    if let Err(e) = emit(&result, &config) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    if result.errors.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_PARTIAL)
    }
}

fn emit(result: &RunResult, config: &AppConfig) -> Result<()> {
    let mut out: Box<dyn Write> = match &config.output_path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    presentation::render(result, config, &mut *out)?;
    out.flush()?;
    Ok(())
}
