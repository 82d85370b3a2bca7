use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use owo_colors::OwoColorize;
use seo_audit_core::{
    AnalysisRecord, AuditConfig, Auditor, BulkOutcome, HeadingOrder, JsonConfig, LinkMatch, TextConfig, fetch_stdin,
    render_json, render_text,
};
use tracing_subscriber::EnvFilter;

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: text, json", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum HeadingOrderArg {
    /// All h1, then all h2, ... (compatible with older records)
    Level,
    /// Document order
    Document,
}

impl From<HeadingOrderArg> for HeadingOrder {
    fn from(value: HeadingOrderArg) -> Self {
        match value {
            HeadingOrderArg::Level => HeadingOrder::ByLevel,
            HeadingOrderArg::Document => HeadingOrder::Document,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LinkMatchArg {
    /// href contains the page domain
    Substring,
    /// href resolves to the page host
    Host,
}

impl From<LinkMatchArg> for LinkMatch {
    fn from(value: LinkMatchArg) -> Self {
        match value {
            LinkMatchArg::Substring => LinkMatch::Substring,
            LinkMatchArg::Host => LinkMatch::Host,
        }
    }
}

/// Fetch web pages, score their on-page SEO and suggest improvements
#[derive(Parser, Debug)]
#[command(name = "seo-audit")]
#[command(version)]
#[command(about = "Audit the on-page SEO of web pages", long_about = None)]
struct Args {
    /// URLs to analyze
    #[arg(value_name = "URL")]
    urls: Vec<String>,

    /// File with one URL per line, or "-" for stdin
    #[arg(long, value_name = "FILE")]
    bulk: Option<String>,

    /// Analyze a local HTML file instead of fetching
    #[arg(long, value_name = "PATH", conflicts_with_all = ["urls", "bulk"])]
    file: Option<String>,

    /// URL the local file is served from (used to classify links)
    #[arg(long, value_name = "URL", requires = "file")]
    base_url: Option<String>,

    /// Save each successful analysis as pending
    #[arg(long)]
    save: bool,

    /// Approve and save each successful analysis
    #[arg(long)]
    approve: bool,

    /// Directory for saved analyses
    #[arg(long, default_value = "results", value_name = "DIR")]
    results_dir: PathBuf,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: OutputFormat,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Heading ordering in reports and records
    #[arg(long, value_enum, default_value = "level")]
    heading_order: HeadingOrderArg,

    /// Rule for internal vs external links
    #[arg(long, value_enum, default_value = "substring")]
    link_match: LinkMatchArg,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Collect URLs from positional arguments and the bulk list, in that order
fn collect_urls(args: &Args) -> anyhow::Result<String> {
    let mut urls = args.urls.join("\n");

    if let Some(bulk) = &args.bulk {
        let list = if bulk == "-" {
            fetch_stdin().context("Failed to read URL list from stdin")?
        } else {
            fs::read_to_string(bulk).with_context(|| format!("Failed to read URL list: {}", bulk))?
        };
        urls.push('\n');
        urls.push_str(&list);
    }

    Ok(urls)
}

fn render(record: &AnalysisRecord, auditor: &Auditor, format: OutputFormat) -> anyhow::Result<String> {
    let suggestions = auditor.suggest(record);
    match format {
        OutputFormat::Text => Ok(render_text(record, &suggestions, &TextConfig::default())),
        OutputFormat::Json => render_json(record, &suggestions, &JsonConfig::default()).context("Failed to render JSON"),
    }
}

/// Print one analysis and save it if asked; returns false if the analysis failed
fn report(outcome: BulkOutcome, auditor: &Auditor, args: &Args, first: bool) -> anyhow::Result<bool> {
    let record = match outcome.result {
        Ok(record) => record,
        Err(e) => {
            echo::print_error(&format!("Error analyzing {}: {}", outcome.url, e));
            return Ok(false);
        }
    };

    if args.verbose {
        echo::print_summary(&record, auditor.suggest(&record).len());
    }

    if !first && args.format == OutputFormat::Text {
        println!("\n---\n");
    }
    println!("{}", render(&record, auditor, args.format)?);

    if args.save || args.approve {
        let path = auditor
            .save(&record, args.approve)
            .with_context(|| format!("Failed to save analysis for {}", record.url))?;
        let message = if args.approve { "Analysis approved and saved to" } else { "Analysis saved to" };
        echo::print_success(&format!("{} {}", message, path.display().bright_white()));
    }

    Ok(true)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.verbose {
        echo::print_banner();
        echo::print_info("Debug logging enabled");
        eprintln!();
    }

    if args.save && args.approve {
        echo::print_warning("--save and --approve both given; saving as approved");
    }

    let mut config = AuditConfig::builder()
        .timeout(args.timeout)
        .heading_order(args.heading_order.into())
        .link_match(args.link_match.into())
        .results_dir(&args.results_dir);
    if let Some(ua) = &args.user_agent {
        config = config.user_agent(ua.clone());
    }
    let auditor = Auditor::open(config.build())
        .with_context(|| format!("Failed to create results directory {}", args.results_dir.display()))?;

    let mut total = 0;
    let mut failures = 0;
    let mut first = true;
    let mut handle = |outcome: BulkOutcome| -> anyhow::Result<()> {
        total += 1;
        if report(outcome, &auditor, &args, first)? {
            first = false;
        } else {
            failures += 1;
        }
        Ok(())
    };

    if let Some(path) = &args.file {
        if args.verbose {
            echo::print_step(1, 1, &format!("Reading local file {}", path.bright_white()));
        }
        let result = auditor.analyze_file(path, args.base_url.as_deref());
        handle(BulkOutcome { url: path.clone(), result })?;
    } else {
        let urls = collect_urls(&args)?;
        if urls.trim().is_empty() {
            bail!("Nothing to analyze: pass one or more URLs, --bulk <FILE> or --file <PATH>");
        }
        if args.verbose {
            let count = urls.lines().filter(|l| !l.trim().is_empty()).count();
            echo::print_step(1, 1, &format!("Analyzing {} URL(s)", count));
        }
        auditor.analyze_bulk_with(&urls, &mut handle).await?;
    }

    if failures > 0 {
        bail!("{} of {} analyses failed", failures, total);
    }

    Ok(())
}
