// ABOUTME: fundscrape CLI: turns saved fund listing and detail pages into JSON lists and a CSV file.
// ABOUTME: Subcommands list, reset, scrape and detail drive fundscrape-extract over files on disk.

mod listing;
mod load;
mod output;
mod progress;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use fundscrape_extract::options::{
    DEFAULT_BASE_URL, DEFAULT_CURRENCY, DEFAULT_TARGET_OFFSET_SECS,
};
use fundscrape_extract::Options;
use tracing_subscriber::EnvFilter;

/// Extract fund metadata from saved Bloomberg fund pages.
#[derive(Parser, Debug)]
#[command(name = "fundscrape")]
#[command(
    about = "Extract fund listings and fund detail records from saved pages",
    long_about = None
)]
struct Cli {
    /// Log debug events (RUST_LOG overrides).
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(flatten)]
    extract: ExtractArgs,

    #[command(subcommand)]
    command: Command,
}

/// Extraction settings shared by every subcommand.
#[derive(ClapArgs, Debug)]
struct ExtractArgs {
    /// Currency assumed for prices without one.
    #[arg(long, global = true, default_value = DEFAULT_CURRENCY)]
    currency: String,

    /// Site root that relative fund links resolve against.
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Hours east of UTC for output timestamps, -23 to 23.
    #[arg(
        long,
        global = true,
        default_value_t = DEFAULT_TARGET_OFFSET_SECS / 3600,
        value_parser = clap::value_parser!(i32).range(-23..=23),
        allow_negative_numbers = true
    )]
    utc_offset: i32,
}

impl ExtractArgs {
    fn options(&self) -> Options {
        Options::builder()
            .default_currency(&self.currency)
            .base_url(&self.base_url)
            .target_offset_secs(self.utc_offset * 3600)
            .build()
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse saved listing pages into the funds list file.
    List {
        /// Listing page files, in page order.
        #[arg(required = true)]
        pages: Vec<PathBuf>,

        #[arg(long, default_value = "data/funds-list.json")]
        output: PathBuf,
    },

    /// Rebuild the progress list with every saved detail page pending.
    Reset {
        #[arg(long, default_value = "data/funds-list.json")]
        list: PathBuf,

        /// Directory holding the saved detail pages 1.html, 2.html, ...
        #[arg(long, default_value = "samples/funds-detail")]
        pages_dir: PathBuf,

        #[arg(long, default_value = "data/funds-list-scraped.json")]
        progress: PathBuf,
    },

    /// Extract every pending detail page and append its row to the CSV file.
    Scrape {
        #[arg(long, default_value = "data/funds-list-scraped.json")]
        progress: PathBuf,

        #[arg(long, default_value = "data/funds-detail.csv")]
        output: PathBuf,

        /// Stop after this many pending pages.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Extract one detail page and print it.
    Detail {
        page: PathBuf,

        /// Print the record as JSON instead of CSV.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let opts = cli.extract.options();
    match cli.command {
        Command::List { pages, output } => listing::run(&pages, &output, &opts),
        Command::Reset {
            list,
            pages_dir,
            progress,
        } => progress::reset(&list, &pages_dir, &progress),
        Command::Scrape {
            progress,
            output,
            limit,
        } => output::scrape(&progress, &output, limit, &opts),
        Command::Detail { page, json } => output::detail(&page, json, &opts),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
