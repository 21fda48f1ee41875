//! Command-line interface for the `docrecall` retrieval engine.

use std::{env, path::PathBuf, process::ExitCode};

use clap::Parser;
use docrecall_config::{RerankParams, SearchConfig};
use docrecall_document::discover_doc_sets;
use docrecall_search::{SearchEngine, SearchQuery};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::args::{Cli, Commands, SearchCommand, SetsCommand};
use cli::output::{output_search, output_sets};

fn init_tracing(verbose: u8) {
    let filter = if let Ok(env) = env::var("DOCRECALL_LOG") {
        EnvFilter::new(env)
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Search(cmd) => cmd_search(cmd),
        Commands::Sets(cmd) => cmd_sets(&cmd),
    }
}

/// Implements `docrecall search`.
fn cmd_search(cmd: SearchCommand) -> ExitCode {
    let config = match build_config(&cmd) {
        Ok(config) => config,
        Err(code) => return code,
    };

    let rerank_given = cmd.rerank.rerank_threshold.is_some()
        || cmd.rerank.rerank_top_k.is_some()
        || cmd.rerank.lang_threshold.is_some();
    let rerank_echo: Option<RerankParams> = rerank_given.then(|| config.rerank.clone());

    let engine = match SearchEngine::new(config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let query = SearchQuery {
        queries: cmd.queries,
        doc_sets: cmd.doc_sets,
        domain_nouns: cmd.domain_nouns,
        predicate_verbs: cmd.predicate_verbs,
    };
    let outcome = engine.search(&query);

    output_search(&outcome, cmd.common.json, rerank_echo.as_ref())
}

/// Implements `docrecall sets`.
fn cmd_sets(cmd: &SetsCommand) -> ExitCode {
    let base_dir = match resolve_base_dir(cmd.common.base_dir.clone()) {
        Ok(dir) => dir,
        Err(code) => return code,
    };
    if !base_dir.is_dir() {
        eprintln!("error: base directory not found: {}", base_dir.display());
        return ExitCode::FAILURE;
    }

    let names: Vec<String> = discover_doc_sets(&base_dir)
        .into_iter()
        .map(|set| set.name)
        .collect();
    output_sets(&names, cmd.common.json)
}

/// Resolves the base directory, defaulting to the current directory.
fn resolve_base_dir(base_dir: Option<PathBuf>) -> Result<PathBuf, ExitCode> {
    match base_dir {
        Some(dir) => Ok(dir),
        None => env::current_dir().map_err(|e| {
            eprintln!("error: could not determine current directory: {e}");
            ExitCode::FAILURE
        }),
    }
}

/// Builds the engine configuration: file values first, CLI flags on top.
fn build_config(cmd: &SearchCommand) -> Result<SearchConfig, ExitCode> {
    let base_dir = resolve_base_dir(cmd.common.base_dir.clone())?;

    let mut config = SearchConfig::new(base_dir);
    if let Err(e) = config.apply_base_dir_file() {
        eprintln!("error: {e}");
        return Err(ExitCode::FAILURE);
    }

    if let Some(k1) = cmd.scoring.k1 {
        config.bm25.k1 = k1;
    }
    if let Some(b) = cmd.scoring.b {
        config.bm25.b = b;
    }
    if let Some(threshold) = cmd.scoring.threshold_page_title {
        config.threshold_page_title = threshold;
    }
    if let Some(threshold) = cmd.scoring.threshold_headings {
        config.threshold_headings = threshold;
    }
    if let Some(threshold) = cmd.scoring.threshold_precision {
        config.threshold_precision = threshold;
    }
    if let Some(min) = cmd.scoring.min_page_titles {
        config.min_page_titles = min;
    }
    if let Some(min) = cmd.scoring.min_headings {
        config.min_headings = min;
    }
    config.disable_fallback = cmd.no_fallback;
    config.parallel_fallback = cmd.parallel_fallback;

    if let Some(threshold) = cmd.rerank.rerank_threshold {
        config.rerank.threshold = threshold;
    }
    if let Some(top_k) = cmd.rerank.rerank_top_k {
        config.rerank.top_k = Some(top_k);
    }
    if let Some(threshold) = cmd.rerank.lang_threshold {
        config.rerank.lang_threshold = threshold;
    }

    Ok(config)
}
