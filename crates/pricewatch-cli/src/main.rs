mod display;
mod pipeline;

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};
use pricewatch_core::{PipelineConfig, RawListing, tables};
use tracing::Level;

#[derive(Parser)]
#[command(name = "pricewatch", version)]
#[command(about = "Classify secondhand Apple listings and summarise their prices")]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ingest listings and write the report tables
    Run(SourceArgs),

    /// Classify a single title and print its attributes
    Classify {
        title: String,

        /// Displayed price, e.g. "NT$32,000"
        #[arg(long, default_value = "")]
        price: String,

        /// Print the listing as JSON instead of a card
        #[arg(long)]
        json: bool,
    },

    /// Print per-processor mean prices for each MacBook line and size
    Report(SourceArgs),
}

#[derive(Args)]
struct SourceArgs {
    /// JSON config file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory of scraped listing containers
    #[arg(long, env = "PRICEWATCH_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Directory the report tables are written to
    #[arg(long, env = "PRICEWATCH_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Also write Parquet next to each CSV
    #[arg(long)]
    parquet: bool,

    /// Normalise on the calling thread only
    #[arg(long)]
    sequential: bool,
}

impl SourceArgs {
    fn load(&self) -> anyhow::Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                PipelineConfig::from_json(&json)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => PipelineConfig::default(),
        };
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if self.parquet {
            config.write_parquet = true;
        }
        if self.sequential {
            config.parallel = false;
        }
        Ok(config)
    }
}

fn log_level(verbose: u8, quiet: bool) -> Level {
    match (quiet, verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::INFO,
        (false, 1) => Level::DEBUG,
        (false, _) => Level::TRACE,
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(log_level(cli.verbose, cli.quiet))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Run(args) => run(&args.load()?),
        Command::Classify { title, price, json } => classify(&title, &price, json),
        Command::Report(args) => report(&args.load()?),
    }
}

fn run(config: &PipelineConfig) -> anyhow::Result<()> {
    tracing::info!("pricewatch v{}", env!("CARGO_PKG_VERSION"));
    let stats = pipeline::run_pipeline(config)?;

    eprintln!(
        "  Read {} listings from {} files ({} skipped)",
        stats.ingested, stats.sources, stats.skipped
    );
    eprintln!(
        "  {} unique, {} eligible, {} summary rows",
        stats.unique, stats.eligible, stats.summary_rows
    );
    for path in &stats.written {
        eprintln!("  Wrote {}", path.display());
    }
    eprintln!("  Done in {:.2}s", stats.elapsed_secs);
    Ok(())
}

fn classify(title: &str, price: &str, json: bool) -> anyhow::Result<()> {
    let (listing, trace) = pricewatch_rules::normalize_traced(&RawListing::new(title, price));
    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }
    let batch = pricewatch_store::listings_to_batch(&[&listing], tables::ALL_COLUMNS)?;
    display::print_listing_card(&batch, &trace)
}

fn report(config: &PipelineConfig) -> anyhow::Result<()> {
    let prepared = pipeline::prepare(config)?;
    let breakdowns = pipeline::breakdowns(&prepared.listings);
    if breakdowns.is_empty() {
        eprintln!("  No eligible MacBook Air or Pro listings");
        return Ok(());
    }
    for (model, screen, rows) in breakdowns {
        let batch = pricewatch_store::breakdown_to_batch(&rows)?;
        display::print_table(&format!("{model} {screen}\""), &[batch])?;
    }
    Ok(())
}
