//! `cmerge`: merge C-family sources into one minified file.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use cm_compactor::{MergePipeline, MergeReport};
use cm_core::{MinifyConfig, SourceUnit};

const DEFAULT_LINE_WIDTH: usize = 100;

/// cmerge - merge and minify C-family source files
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Soft wrap column, 0 for unlimited [default: 100]
    #[arg(short = 'w', long)]
    line_width: Option<usize>,

    /// JSON config file. Flags given here override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write to this file instead of standard output.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Keyword that introduces import directives.
    #[arg(long)]
    import_keyword: Option<String>,

    /// Drop `///` documentation comments too.
    #[arg(long)]
    strip_doc_comments: bool,

    /// Source files, merged in the order given.
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn resolve_config(args: &Args) -> Result<MinifyConfig> {
    let mut config = match &args.config {
        Some(path) => MinifyConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => MinifyConfig::default().with_line_width(DEFAULT_LINE_WIDTH),
    };
    if let Some(width) = args.line_width {
        config.line_width = width;
    }
    if let Some(keyword) = &args.import_keyword {
        config.import_keyword = keyword.clone();
    }
    if args.strip_doc_comments {
        config.keep_doc_comments = false;
    }
    config.validate()?;
    Ok(config)
}

fn run(args: &Args) -> Result<MergeReport> {
    let config = resolve_config(args)?;
    tracing::debug!(?config, files = args.files.len(), "starting merge");
    let sources: Vec<SourceUnit> = args.files.iter().map(SourceUnit::file).collect();
    let pipeline = MergePipeline::new(config);

    let report = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            pipeline.merge(&sources, &mut BufWriter::new(file))?
        }
        None => pipeline.merge(&sources, &mut BufWriter::new(io::stdout().lock()))?,
    };
    Ok(report)
}

fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging();

    match run(&args) {
        Ok(report) => {
            tracing::info!(
                reduction_pct = report.reduction_pct,
                ratio = report.ratio(),
                "done"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("cmerge: {err:#}");
            ExitCode::FAILURE
        }
    }
}
