//! Command-line interface definitions for the archive pipeline.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The binary is a four-step offline pipeline; each step is a subcommand,
//! meant to be run in order:
//!
//! ```sh
//! onion-history fetch            # crawl listing pages into data/headlines.json
//! onion-history dates            # backfill missing publication dates
//! onion-history clean            # drop excluded tags and recurring formats
//! onion-history build            # write the day index to data/by-day.json
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Top-level arguments for the `onion-history` pipeline binary.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// The pipeline steps, in the order a full rebuild runs them.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Crawl the site's listing pages into the flat headline corpus
    Fetch(FetchArgs),
    /// Backfill missing publication dates from article pages
    Dates(DatesArgs),
    /// Drop excluded tags and recurring formats from the corpus
    Clean(CleanArgs),
    /// Build the day-keyed index artifact from the corpus
    Build(BuildArgs),
}

/// Arguments for the `fetch` subcommand.
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Ignore an existing corpus and start over from the first page
    #[arg(long)]
    pub fresh: bool,

    /// Listing page to start from
    #[arg(long, default_value_t = 1)]
    pub start_page: u32,

    /// Stop after crawling this many listing pages
    #[arg(long)]
    pub max_pages: Option<u32>,

    /// Seconds to wait between listing fetches
    #[arg(long, default_value_t = 1.0)]
    pub delay: f64,

    /// Save the corpus after this many pages that produced new records
    #[arg(long, default_value_t = 10)]
    pub save_interval: u32,

    /// Corpus file to create or resume
    #[arg(short, long, default_value = "data/headlines.json")]
    pub output: PathBuf,
}

/// Arguments for the `dates` subcommand.
#[derive(Args, Debug)]
pub struct DatesArgs {
    /// Corpus file to backfill
    #[arg(short, long, default_value = "data/headlines.json")]
    pub input: PathBuf,

    /// Write here instead of updating the corpus in place
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Concurrent article fetches
    #[arg(long, default_value_t = 12)]
    pub concurrency: usize,

    /// Save after this many records have been checked
    #[arg(long, default_value_t = 100)]
    pub save_interval: usize,

    /// Only check this many undated records, then stop
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Arguments for the `clean` subcommand.
#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Corpus file to clean
    #[arg(short, long, default_value = "data/headlines.json")]
    pub input: PathBuf,

    /// YAML file overriding the stock exclusion lists
    #[arg(short, long)]
    pub filters: Option<PathBuf>,

    /// Report what would be removed without rewriting the corpus
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `build` subcommand.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Corpus file to index
    #[arg(short, long, default_value = "data/headlines.json")]
    pub input: PathBuf,

    /// Day-index artifact to write
    #[arg(short, long, default_value = "data/by-day.json")]
    pub output: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_defaults() {
        let cli = Cli::parse_from(["onion-history", "fetch"]);
        let Command::Fetch(args) = cli.command else {
            panic!("expected fetch");
        };
        assert!(!args.fresh);
        assert_eq!(args.start_page, 1);
        assert_eq!(args.max_pages, None);
        assert_eq!(args.delay, 1.0);
        assert_eq!(args.save_interval, 10);
        assert_eq!(args.output, PathBuf::from("data/headlines.json"));
    }

    #[test]
    fn test_fetch_flags() {
        let cli = Cli::parse_from([
            "onion-history",
            "fetch",
            "--fresh",
            "--max-pages",
            "5",
            "--delay",
            "0.5",
            "-o",
            "/tmp/corpus.json",
        ]);
        let Command::Fetch(args) = cli.command else {
            panic!("expected fetch");
        };
        assert!(args.fresh);
        assert_eq!(args.max_pages, Some(5));
        assert_eq!(args.delay, 0.5);
        assert_eq!(args.output, PathBuf::from("/tmp/corpus.json"));
    }

    #[test]
    fn test_dates_defaults() {
        let cli = Cli::parse_from(["onion-history", "dates"]);
        let Command::Dates(args) = cli.command else {
            panic!("expected dates");
        };
        assert_eq!(args.input, PathBuf::from("data/headlines.json"));
        assert_eq!(args.output, None);
        assert_eq!(args.concurrency, 12);
        assert_eq!(args.save_interval, 100);
        assert_eq!(args.limit, None);
    }

    #[test]
    fn test_clean_dry_run() {
        let cli = Cli::parse_from(["onion-history", "clean", "--dry-run", "-f", "rules.yaml"]);
        let Command::Clean(args) = cli.command else {
            panic!("expected clean");
        };
        assert!(args.dry_run);
        assert_eq!(args.filters, Some(PathBuf::from("rules.yaml")));
    }

    #[test]
    fn test_build_paths() {
        let cli = Cli::parse_from([
            "onion-history",
            "build",
            "-i",
            "corpus.json",
            "-o",
            "index.json",
        ]);
        let Command::Build(args) = cli.command else {
            panic!("expected build");
        };
        assert_eq!(args.input, PathBuf::from("corpus.json"));
        assert_eq!(args.output, PathBuf::from("index.json"));
    }
}
