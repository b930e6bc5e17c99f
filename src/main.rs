//! chronik - CLI entry point.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use chronik::changelog::store::DEFAULT_DOCUMENT_PATH;
use chronik::config::{Config, DEFAULT_FORMATS, DEFAULT_TYPES};
use chronik::release::{RunOutcome, generate_summary, run, today};
use chronik::select::{AutoSelector, CommitSelector, PromptSelector};
use chronik::GitSource;

/// Curate conventional commits into a versioned changelog.
#[derive(Parser, Debug)]
#[command(name = "chronik")]
#[command(about = "Curate conventional commits into a versioned changelog")]
#[command(version)]
struct Cli {
    /// Export formats, comma-separated (json, md, html)
    #[arg(short = 'f', long = "format", default_value = DEFAULT_FORMATS)]
    formats: String,

    /// Directory to write exported files into
    #[arg(short = 'o', long, default_value = ".")]
    output_dir: PathBuf,

    /// Explicit version label (defaults to the latest tag, or v0.1.0)
    #[arg(long = "set-version")]
    version: Option<String>,

    /// Commit types to offer, comma-separated
    #[arg(short = 't', long, default_value = DEFAULT_TYPES)]
    types: String,

    /// Include every matching commit without prompting
    #[arg(short = 'y', long)]
    yes: bool,

    /// Existing changelog document to merge into
    #[arg(short = 'i', long, default_value = DEFAULT_DOCUMENT_PATH)]
    input: PathBuf,

    /// Escape HTML special characters in the HTML export
    #[arg(long)]
    escape_html: bool,

    /// Dry run - print the new version as Markdown without writing
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Step 1: Validate configuration before touching git
    let mut config =
        Config::from_flags(&cli.formats, &cli.types).context("Invalid --format value")?;
    config.output_dir = cli.output_dir;
    config.version = cli.version;
    config.input = cli.input;
    config.render.escape_html = cli.escape_html;
    config.dry_run = cli.dry_run;

    // Step 2: Open git repository
    let source = GitSource::discover(".")
        .context("Not a git repository. Run chronik from within a git repository.")?;

    // Step 3: Harvest, select, merge and export
    let selector: &dyn CommitSelector = if cli.yes {
        &AutoSelector
    } else {
        &PromptSelector
    };
    let outcome = run(&config, &source, selector, &today())
        .context("Failed to update changelog")?;

    match outcome {
        RunOutcome::NoMatchingCommits => {
            println!("No commits matching the allowed types. Nothing to add.");
        }
        RunOutcome::NothingSelected => {
            println!("No commits selected. Changelog left unchanged.");
        }
        RunOutcome::Preview { markdown, .. } => {
            println!("\n--- Dry Run Output ---\n");
            print!("{}", markdown);
        }
        RunOutcome::Exported {
            version, reports, ..
        } => {
            for report in &reports {
                println!("✓ Exported {} to {}", report.format, report.path.display());
            }
            println!("✓ {}", generate_summary(&version));
        }
    }

    Ok(())
}

/// Log to stderr, filtered by RUST_LOG (default: warn, or debug with --verbose).
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
