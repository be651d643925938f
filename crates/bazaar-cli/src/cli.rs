//! Command-line surface and dispatch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::commands::{self, Board};
use crate::config::BazaarConfig;
use crate::output::{render, OutputMode};
use crate::params::{parse_pair, parse_query_pairs_with};

#[derive(Debug, Parser)]
#[command(
    name = "bazaar",
    version,
    about = "Search classifieds listings and wanted requests, and list their facets"
)]
pub struct Cli {
    /// Configuration file (default: $BAZAAR_CONFIG, then ./bazaar.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputMode>,

    /// Write output to a file instead of stdout
    #[arg(long, global = true, value_name = "FILE")]
    pub out_file: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `bazaar_facets=trace`
    #[arg(long, global = true, value_name = "FILTER")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search published listings
    Search(SearchArgs),
    /// Browse buyers' wanted requests
    Wanted(SearchArgs),
    /// List attribute facets and their observed values
    Facets(FacetArgs),
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// JSON array of records
    pub corpus: PathBuf,

    /// Search parameter, repeatable (e.g. `category=Vehicle`, `tag.model_name=Aqua,Vitz`)
    #[arg(short = 'f', long = "filter", value_name = "KEY=VALUE", value_parser = parse_pair)]
    pub filters: Vec<(String, String)>,

    /// Keyword query
    #[arg(short, long)]
    pub query: Option<String>,

    /// How keywords combine: `and` or `or`
    #[arg(long)]
    pub mode: Option<String>,

    /// Sort order, e.g. `price-asc`, `newest`, `price:desc,title`
    #[arg(long)]
    pub sort: Option<String>,

    /// Maximum number of results
    #[arg(long)]
    pub limit: Option<usize>,

    /// Number of results to skip
    #[arg(long)]
    pub offset: Option<usize>,
}

impl SearchArgs {
    /// Flattens the arguments into query pairs; dedicated flags win over `-f`.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.filters.clone();
        let flags = [
            ("q", self.query.clone()),
            ("mode", self.mode.clone()),
            ("sort", self.sort.clone()),
            ("limit", self.limit.map(|n| n.to_string())),
            ("offset", self.offset.map(|n| n.to_string())),
        ];
        for (key, value) in flags {
            if let Some(value) = value {
                pairs.push((key.to_string(), value));
            }
        }
        pairs
    }
}

#[derive(Debug, Args)]
pub struct FacetArgs {
    /// JSON array of records
    pub corpus: PathBuf,

    /// Read wanted requests instead of listings
    #[arg(long)]
    pub wanted: bool,

    /// Only this category
    #[arg(short, long)]
    pub category: Option<String>,

    /// Values shown per facet in text output
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Runs the parsed command and returns the rendered output.
pub fn run(cli: &Cli, config: &BazaarConfig) -> Result<String> {
    let mode = cli.output.unwrap_or_default();

    match &cli.command {
        Command::Search(args) => run_search(args, Board::Listings, config, mode),
        Command::Wanted(args) => run_search(args, Board::Wanted, config, mode),
        Command::Facets(args) => {
            let board = if args.wanted {
                Board::Wanted
            } else {
                Board::Listings
            };
            let corpus = board.load(&args.corpus)?;
            let limit = args.limit.unwrap_or(config.facets.display_limit);
            let report = commands::facets(&corpus, args.category.as_deref(), board, limit);
            render(&report, mode).context("failed to render facets")
        }
    }
}

fn run_search(
    args: &SearchArgs,
    board: Board,
    config: &BazaarConfig,
    mode: OutputMode,
) -> Result<String> {
    let defaults = config.search_defaults()?;
    let request =
        parse_query_pairs_with(&args.to_pairs(), &defaults).context("invalid search parameters")?;
    let corpus = board.load(&args.corpus)?;
    let report = commands::search(&corpus, &request, board);
    render(&report, mode).context("failed to render search results")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_search_flags() {
        let cli = Cli::try_parse_from([
            "bazaar",
            "search",
            "listings.json",
            "-f",
            "category=Vehicle",
            "--filter",
            "tag.model_name=Aqua,Vitz",
            "-q",
            "toyota",
            "--sort",
            "newest",
            "-o",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.output, Some(OutputMode::Json));
        let Command::Search(args) = cli.command else {
            panic!("expected search");
        };
        assert_eq!(
            args.to_pairs(),
            vec![
                ("category".to_string(), "Vehicle".to_string()),
                ("tag.model_name".to_string(), "Aqua,Vitz".to_string()),
                ("q".to_string(), "toyota".to_string()),
                ("sort".to_string(), "newest".to_string()),
            ]
        );
    }

    #[test]
    fn rejects_filter_without_equals() {
        assert!(Cli::try_parse_from(["bazaar", "search", "x.json", "-f", "category"]).is_err());
    }

    #[test]
    fn parses_facets_flags() {
        let cli =
            Cli::try_parse_from(["bazaar", "facets", "w.json", "--wanted", "-c", "Vehicle"])
                .unwrap();
        let Command::Facets(args) = cli.command else {
            panic!("expected facets");
        };
        assert!(args.wanted);
        assert_eq!(args.category.as_deref(), Some("Vehicle"));
    }

    #[test]
    fn command_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
