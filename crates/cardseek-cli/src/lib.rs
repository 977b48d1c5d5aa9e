//! Command-line front end for cardseek.
//!
//! Loads a JSON array of cards, runs one query against it, and prints either
//! the matching titles or the query's validity report as JSON.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cardseek::{Card, FilterQuerySet, Record};
use clap::Parser;
use tracing::{debug, warn};

/// Filter a card collection with a natural-language-like query.
///
/// Examples:
///   cardseek -c cards.json lore c isb and side=dark and type=character
///   cardseek -c cards.json --report power = abc
#[derive(Debug, Parser)]
#[command(name = "cardseek", version)]
pub struct Cli {
    /// Path to a JSON array of cards.
    #[arg(short, long)]
    pub cards: PathBuf,

    /// The query; multiple words are joined with spaces.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub query: Vec<String>,

    /// Print the validity report as JSON instead of titles.
    #[arg(long)]
    pub report: bool,

    /// Print at most this many titles.
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// The query text as typed.
    pub fn query_text(&self) -> String {
        self.query.join(" ")
    }
}

/// Log filter directive for a verbosity level.
pub fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

/// Reads a card collection from a JSON file.
pub fn load_cards(path: &Path) -> Result<Vec<Card>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read cards from {}", path.display()))?;
    let cards: Vec<Card> = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse cards in {}", path.display()))?;
    debug!(count = cards.len(), path = %path.display(), "loaded cards");
    Ok(cards)
}

/// Runs the query described by `cli`, writing output to `out`.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let cards = load_cards(&cli.cards)?;
    let query = FilterQuerySet::parse(&cli.query_text());

    for clause in query.filter_queries().iter().filter(|q| !q.valid()) {
        warn!(
            clause = clause.query(),
            valid_field = clause.valid_field(),
            valid_comparator = clause.valid_comparator(),
            valid_value = clause.valid_value(),
            "clause not applied"
        );
    }

    if cli.report {
        let report = query.report(&cards, Card::accessor);
        serde_json::to_writer_pretty(&mut *out, &report).context("failed to write report")?;
        writeln!(out)?;
        return Ok(());
    }

    let results = query.execute(&cards, Card::accessor);
    let shown = cli.limit.unwrap_or(results.len());
    for card in results.iter().take(shown) {
        writeln!(out, "{}", card.title)?;
    }
    writeln!(out, "({} results)", results.len())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_query_words() {
        let cli = Cli::parse_from(["cardseek", "-c", "cards.json", "power", ">=", "-1"]);
        assert_eq!(cli.query_text(), "power >= -1");
        assert!(!cli.report);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn parses_flags() {
        let cli = Cli::parse_from([
            "cardseek", "-vv", "--report", "--limit", "3", "-c", "cards.json", "side=dark",
        ]);
        assert!(cli.report);
        assert_eq!(cli.limit, Some(3));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.query_text(), "side=dark");
    }

    #[test]
    fn empty_query_is_allowed() {
        let cli = Cli::parse_from(["cardseek", "-c", "cards.json"]);
        assert_eq!(cli.query_text(), "");
    }

    #[test]
    fn log_levels() {
        assert_eq!(log_filter(0), "warn");
        assert_eq!(log_filter(1), "debug");
        assert_eq!(log_filter(5), "trace");
    }
}
