//! Clap argument definitions for the `docrecall` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "docrecall")]
#[command(about = "Documentation retrieval and ranking for AI agents")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v for debug, -vv for trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Supported `docrecall` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Search doc-sets and output matching pages and headings
    Search(SearchCommand),

    /// List the doc-sets under the base directory
    Sets(SetsCommand),
}

/// Shared base-directory and output flags.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Knowledge-base directory [default: current directory]
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Scoring parameter overrides for `docrecall search`.
#[derive(Args, Debug, Clone, Default)]
pub struct ScoringArgs {
    /// BM25 term-frequency saturation (0-5) [default: 1.5]
    #[arg(long)]
    pub k1: Option<f64>,

    /// BM25 length normalization (0-1) [default: 0.75]
    #[arg(long)]
    pub b: Option<f64>,

    /// Minimum page-title score for heading scoring (0-1) [default: 0.15]
    #[arg(long)]
    pub threshold_page_title: Option<f64>,

    /// Minimum heading score for a basic match (0-1) [default: 0.25]
    #[arg(long)]
    pub threshold_headings: Option<f64>,

    /// Minimum heading score for a precision match (0-1) [default: 0.45]
    #[arg(long)]
    pub threshold_precision: Option<f64>,

    /// Run fallback strategies when fewer pages recall [default: 1]
    #[arg(long)]
    pub min_page_titles: Option<usize>,

    /// Drop pages with fewer qualifying headings [default: 1]
    #[arg(long)]
    pub min_headings: Option<usize>,
}

/// Parameters passed through to the downstream re-ranking phase.
#[derive(Args, Debug, Clone, Default)]
pub struct RerankArgs {
    /// Similarity threshold for the re-ranking phase (0-1) [default: 0.5]
    #[arg(long)]
    pub rerank_threshold: Option<f64>,

    /// Cap on headings sent to the re-ranking phase
    #[arg(long)]
    pub rerank_top_k: Option<usize>,

    /// CJK-ratio threshold for language detection (0-1) [default: 0.6]
    #[arg(long)]
    pub lang_threshold: Option<f64>,
}

/// Arguments for `docrecall search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Search queries
    #[arg(required = true)]
    pub queries: Vec<String>,

    /// Comma-separated doc-sets to search
    #[arg(long, required = true, value_delimiter = ',')]
    pub doc_sets: Vec<String>,

    #[command(flatten)]
    /// Scoring parameter overrides.
    pub scoring: ScoringArgs,

    #[command(flatten)]
    /// Re-ranking passthrough parameters.
    pub rerank: RerankArgs,

    /// Disable the fallback strategies
    #[arg(long)]
    pub no_fallback: bool,

    /// Run the fallback strategies on separate threads
    #[arg(long)]
    pub parallel_fallback: bool,

    /// Domain noun anchoring a topic (can be specified multiple times)
    #[arg(long = "domain-noun")]
    pub domain_nouns: Vec<String>,

    /// Generic predicate verb to strip before re-ranking (can be specified
    /// multiple times)
    #[arg(long = "predicate-verb")]
    pub predicate_verbs: Vec<String>,

    #[command(flatten)]
    /// Base-directory and output flags.
    pub common: CommonArgs,
}

/// Arguments for `docrecall sets`.
#[derive(Args, Debug, Clone, Default)]
pub struct SetsCommand {
    #[command(flatten)]
    /// Base-directory and output flags.
    pub common: CommonArgs,
}
