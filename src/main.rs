//! Wikidown main entry point
//!
//! This is the command-line interface for converting Confluence pages to
//! Markdown.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use wikidown::config::{load_config, resolve_config_dir};
use wikidown::output::write_page_file;
use wikidown::traversal::DEFAULT_MAX_DEPTH;
use wikidown::{
    extract_id_from_url, sanitize_filename, ConfluenceClient, Converter, ErrorPolicy,
    Html2MdConverter, MultiFileSink, PageStore, SingleFileSink, TraversalReport, Traverser,
};

/// Wikidown: convert Confluence pages to Markdown
///
/// Wikidown fetches a page, optionally follows its child pages and the
/// links to other pages inside it, and writes everything it finds as
/// Markdown, either one directory per page or one concatenated file.
#[derive(Parser, Debug)]
#[command(name = "wikidown")]
#[command(version)]
#[command(about = "A CLI tool to convert Confluence pages to Markdown", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Converts a Confluence page to Markdown
    Convert(ConvertArgs),
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// The URL of the Confluence page to convert
    #[arg(long)]
    url: String,

    /// The directory to save Markdown output in (created if absent)
    #[arg(long, value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Recursively convert child pages and linked pages
    #[arg(long)]
    recursive: bool,

    /// Maximum depth for child/embedded pages; the root page is depth 1
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH, value_parser = clap::value_parser!(u32).range(1..))]
    max_depth: u32,

    /// Concatenate all discovered pages into one Markdown file named after the page title
    #[arg(long)]
    single_file: bool,

    /// Stop at the first page that cannot be fetched instead of skipping it
    #[arg(long)]
    strict: bool,

    /// Overwrite an existing single-file output without asking
    #[arg(short = 'y', long)]
    yes: bool,

    /// Directory holding config.toml and .secrets.toml [env: WIKIDOWN_CONFIG_DIR]
    #[arg(long, value_name = "DIR")]
    config_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Convert(args) => handle_convert(args).await,
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// All log output, including per-page failures, goes to stderr.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wikidown=info,warn"),
            1 => EnvFilter::new("wikidown=debug,info"),
            2 => EnvFilter::new("wikidown=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the `convert` subcommand
async fn handle_convert(args: ConvertArgs) -> anyhow::Result<()> {
    let page_id = extract_id_from_url(&args.url)?;

    std::fs::create_dir_all(&args.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            args.output_dir.display()
        )
    })?;

    let config_dir = resolve_config_dir(args.config_dir.as_deref());
    tracing::debug!("Loading configuration from: {}", config_dir.display());
    let config = load_config(&config_dir).with_context(|| {
        format!(
            "Failed to load configuration from {}",
            config_dir.display()
        )
    })?;

    let client = ConfluenceClient::new(&config)?;
    let root = client
        .fetch_page(&page_id)
        .await
        .with_context(|| format!("Could not fetch page {}", page_id))?;
    let output_path = args.output_dir.join(sanitize_filename(&root.title));

    let policy = if args.strict {
        ErrorPolicy::Strict
    } else {
        ErrorPolicy::Lenient
    };
    let traverser = Traverser::new(&client, client.base_url())
        .with_max_depth(args.max_depth)
        .with_policy(policy);

    if args.single_file {
        if output_path.exists() && !args.yes {
            eprintln!("Warning: {} already exists.", output_path.display());
            let stdin = std::io::stdin();
            let confirmed = confirm_overwrite(&output_path, &mut stdin.lock(), &mut std::io::stderr())?;
            if !confirmed {
                eprintln!("Aborted by user.");
                return Ok(());
            }
        }

        let mut sink = SingleFileSink::create(&output_path)?;
        let report = traverser.run_from_page(root, &args.url, &mut sink).await?;
        sink.finish()?;

        log_report(&report);
        println!("Saved: {}", output_path.display());
    } else if args.recursive {
        let mut sink = MultiFileSink::new(&args.output_dir);
        let report = traverser.run_from_page(root, &args.url, &mut sink).await?;
        log_report(&report);
    } else {
        let markdown = Html2MdConverter.to_markdown(&root.body_html);
        let path = write_page_file(&args.output_dir, &root.title, &markdown)?;
        println!("Saved: {}", path.display());
    }

    print_summary(&args);
    Ok(())
}

/// Asks whether an existing output file may be overwritten
///
/// Anything other than `y`/`yes` (case-insensitive) declines, including an
/// empty answer or end of input.
fn confirm_overwrite(
    path: &Path,
    input: &mut impl BufRead,
    prompt: &mut impl Write,
) -> std::io::Result<bool> {
    write!(prompt, "Overwrite {}? [y/N] ", path.display())?;
    prompt.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

fn log_report(report: &TraversalReport) {
    tracing::info!(
        "Wrote {} page(s), deepest level {}, {} page(s) could not be accessed",
        report.pages_written,
        report.deepest_level,
        report.failures.len()
    );
}

/// Prints the run parameters
fn print_summary(args: &ConvertArgs) {
    println!("URL: {}", args.url);
    println!("Output Directory: {}", args.output_dir.display());
    println!("Recursive: {}", args.recursive);
    if args.recursive || args.single_file {
        println!("Max Depth: {}", args.max_depth);
    }
}
