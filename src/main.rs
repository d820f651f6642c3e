use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use pydeps::config::{AnalysisConfig, DuplicatePolicy, ReadErrorPolicy, DEFAULT_SOURCE_SUFFIX};
use pydeps::core::{CodebaseAnalyzer, DebugDump};
use pydeps::formatters::{DotFormatter, GraphFormatter, JsonCompactFormatter};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "pydeps",
    version,
    author = "pydeps developers",
    about = "Draws the module dependency graph of a Python source tree"
)]
struct Cli {
    /// Directory of source files to analyze
    #[arg(value_name = "SOURCE_DIR")]
    input: PathBuf,

    /// Output file path; stdout when omitted
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Comma-separated list of module names to leave out of the graph
    #[arg(short, long, value_name = "MODULES", value_delimiter = ',')]
    ignore: Vec<String>,

    /// Output format: dot, json-compact
    #[arg(short, long, value_name = "FORMAT", value_enum, default_value_t = OutputFormat::Dot)]
    format: OutputFormat,

    /// Print progress and dump the module catalog to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Warn about unreadable source files instead of aborting
    #[arg(long)]
    skip_unreadable: bool,

    /// How to handle two files that map to the same module name
    #[arg(long, value_name = "POLICY", value_enum, default_value_t = DuplicateMode::Overwrite)]
    duplicates: DuplicateMode,

    /// Source file suffix
    #[arg(long, value_name = "EXT", default_value = DEFAULT_SOURCE_SUFFIX)]
    suffix: String,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum OutputFormat {
    Dot,
    JsonCompact,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum DuplicateMode {
    Overwrite,
    Warn,
    Error,
}

impl From<DuplicateMode> for DuplicatePolicy {
    fn from(mode: DuplicateMode) -> Self {
        match mode {
            DuplicateMode::Overwrite => DuplicatePolicy::Overwrite,
            DuplicateMode::Warn => DuplicatePolicy::Warn,
            DuplicateMode::Error => DuplicatePolicy::Error,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        input,
        output,
        ignore,
        format,
        verbose,
        skip_unreadable,
        duplicates,
        suffix,
    } = cli;

    let start_time = Instant::now();

    let config = AnalysisConfig::new()
        .with_source_suffix(&suffix)
        .with_ignored(ignore)
        .with_verbose(verbose)
        .with_read_errors(if skip_unreadable {
            ReadErrorPolicy::Skip
        } else {
            ReadErrorPolicy::Fail
        })
        .with_duplicates(duplicates.into());

    if verbose {
        eprintln!("Input: {}", input.display());
        eprintln!("Ignored: {:?}", config.ignored);
    }

    let mut analyzer = CodebaseAnalyzer::new(config)?;
    if verbose {
        analyzer = analyzer.with_observer(Box::new(DebugDump));
    }

    let analysis = analyzer
        .analyze(&input)
        .with_context(|| format!("Failed to analyze {}", input.display()))?;

    let formatter: Box<dyn GraphFormatter> = match format {
        OutputFormat::Dot => Box::new(DotFormatter::new()),
        OutputFormat::JsonCompact => Box::new(JsonCompactFormatter::new()),
    };

    match &output {
        Some(path) => {
            formatter
                .format_to_file(&analysis.graph, path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            if verbose {
                eprintln!("Wrote {}", path.display());
            }
        }
        None => {
            let stdout = std::io::stdout();
            formatter.format_to_writer(&analysis.graph, &mut stdout.lock())?;
        }
    }

    if verbose {
        eprintln!(
            "Total execution time: {:.2}s",
            start_time.elapsed().as_secs_f64()
        );
    }

    Ok(())
}
