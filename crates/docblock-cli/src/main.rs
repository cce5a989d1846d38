//! Docblock CLI - inserts DocBlock comments above undocumented PHP classes
//! and functions

use anyhow::{bail, Context, Result};
use clap::Parser;
use docblock_core::config::CONFIG_FILE_NAME;
use docblock_core::generator::{is_readable, is_writable};
use docblock_core::{ExitStatus, GenerationCounters, Generator, GeneratorConfig};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing::{debug, info};

mod logger;
mod report;
mod walk;

#[derive(Parser)]
#[command(name = "docblock")]
#[command(version = docblock_core::VERSION)]
#[command(about = "Insert DocBlock comments into PHP code", long_about = None)]
#[command(after_help = "Exit status:
  0  no errors, every declaration documented
  1  some declarations carry non-DocBlock comments, or a fatal error
  2  read/write errors occurred
  3  read/write errors would occur (dry run)")]
struct Cli {
    /// PHP file or directory to process
    #[arg(short, long, value_name = "PATH")]
    source: PathBuf,

    /// Recursively process files in subdirectories
    #[arg(short, long)]
    recursive: bool,

    /// Space-delimited path fragments to exclude
    #[arg(short = 'x', long, value_name = "PATTERNS")]
    exclude: Option<String>,

    /// Space-delimited names of the functions and classes to document
    #[arg(short, long, value_name = "NAMES")]
    functions: Option<String>,

    /// Document anonymous functions under a nearby name
    #[arg(long)]
    anonymous: bool,

    /// Use the complete DocBlock format with empty tag lines
    #[arg(long)]
    full: bool,

    /// Report what would change without writing files
    #[arg(long, visible_alias = "dryrun")]
    dry_run: bool,

    /// Print per-file and per-declaration details
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print errors and the summary
    #[arg(short, long)]
    quiet: bool,

    /// Disable colored log output
    #[arg(long)]
    no_color: bool,

    /// Config file (defaults to ./docblock.toml when present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_logger(cli.verbose, cli.quiet, cli.no_color);

    match run(&cli) {
        Ok(status) => ExitCode::from(status.code()),
        Err(e) => {
            eprintln!("FATAL: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> Result<ExitStatus> {
    let config = load_config(cli)?;
    preflight(&cli.source, &config)?;

    let started = Instant::now();
    if !cli.quiet {
        print!("{}", report::preface(&cli.source, &config));
    }

    let files = walk::collect_php_files(&cli.source, &config);
    info!(count = files.len(), "collected candidate files");

    let dry_run = config.dry_run;
    let generator = Generator::new(config);
    let mut counters = GenerationCounters::default();
    generator.process_batch(&files, &mut counters);

    print!(
        "{}",
        report::summary(&counters, started.elapsed(), dry_run)
    );
    Ok(counters.exit_status(dry_run))
}

/// Config file values with command-line flags applied on top
fn load_config(cli: &Cli) -> Result<GeneratorConfig> {
    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::from_path(path)
            .with_context(|| format!("could not load config {}", path.display()))?,
        None if Path::new(CONFIG_FILE_NAME).is_file() => {
            debug!("using {CONFIG_FILE_NAME} from the working directory");
            GeneratorConfig::from_path(CONFIG_FILE_NAME)
                .with_context(|| format!("could not load config {CONFIG_FILE_NAME}"))?
        }
        None => GeneratorConfig::default(),
    };

    config.recursive |= cli.recursive;
    config.anonymous |= cli.anonymous;
    config.full |= cli.full;
    config.dry_run |= cli.dry_run;
    if let Some(exclude) = &cli.exclude {
        config
            .exclude
            .extend(exclude.split_whitespace().map(ToString::to_string));
    }
    if let Some(functions) = &cli.functions {
        config.functions = functions.split_whitespace().map(ToString::to_string).collect();
    }

    Ok(config)
}

/// Checks on the top-level target; failure aborts before any file is touched
fn preflight(source: &Path, config: &GeneratorConfig) -> Result<()> {
    if !source.exists() {
        bail!("{} does not exist", source.display());
    }
    if !source.is_file() && !source.is_dir() {
        bail!("{} is not a file or directory", source.display());
    }
    if source.is_file() && !config.accepts_extension(source) {
        bail!("{} is not a PHP file", source.display());
    }
    if !is_readable(source) {
        bail!("{} is not readable", source.display());
    }
    if !is_writable(source) {
        bail!("{} is not writable, check permissions", source.display());
    }
    Ok(())
}
