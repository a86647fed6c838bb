use anyhow::Context;
use clap::Parser;
use etym_core::render::{write_chart, write_colored_text, write_legend};
use etym_core::{BatchOutcome, EngineConfig, EtymologyEngine};
use serde_json::json;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Colours English text by the source language of each word")]
struct Cli {
    /// Text to analyze. Read from stdin when omitted.
    text: Vec<String>,

    /// Cache file location (overrides ETYM_CACHE_PATH).
    #[arg(long, value_name = "FILE")]
    cache: Option<PathBuf>,

    /// Keep the origin cache in memory only.
    #[arg(long, conflicts_with = "cache")]
    no_cache: bool,

    /// Wipe the origin cache before doing anything else.
    #[arg(long)]
    clear_cache: bool,

    /// Print cache statistics and exit.
    #[arg(long)]
    cache_stats: bool,

    /// Emit results, stats and active languages as JSON.
    #[arg(long)]
    json: bool,

    /// How many times to re-run a batch that hit a network error.
    #[arg(long, default_value_t = 2)]
    retries: u32,
}

/// `RUST_LOG` when it parses, otherwise warnings only.
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| "warn".into())
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok()))
        .init();

    let cli = Cli::parse();

    let mut config = EngineConfig::from_env().context("invalid environment configuration")?;
    if cli.no_cache {
        config.cache_path = None;
    } else if let Some(path) = cli.cache.clone() {
        config.cache_path = Some(path);
    }

    let engine = EtymologyEngine::from_config(&config).context("could not start the engine")?;

    if cli.clear_cache {
        engine.clear_cache().context("could not clear the origin cache")?;
        eprintln!("Origin cache cleared.");
    }

    if cli.cache_stats {
        let stats = engine.cache().stats();
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(ExitCode::SUCCESS);
    }

    let text = if cli.text.is_empty() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("could not read text from stdin")?;
        buffer
    } else {
        cli.text.join(" ")
    };

    if text.trim().is_empty() {
        if cli.clear_cache {
            return Ok(ExitCode::SUCCESS);
        }
        eprintln!("Nothing to analyze.");
        return Ok(ExitCode::FAILURE);
    }

    let mut outcome: BatchOutcome = engine.process_text(&text).await;
    let mut attempt = 0;
    while outcome.has_network_error && attempt < cli.retries {
        attempt += 1;
        eprintln!(
            "Network issues reaching Wiktionary; retrying ({}/{})...",
            attempt, cli.retries
        );
        outcome = engine.process_text(&text).await;
    }

    if outcome.has_network_error {
        eprintln!("Could not reach Wiktionary. Check your connection and try again.");
        return Ok(ExitCode::FAILURE);
    }

    let stats = engine.calculate_origin_stats(&outcome.results);
    let languages = engine.get_active_languages(&outcome.results);

    if cli.json {
        let report = json!({
            "results": outcome.results,
            "stats": stats,
            "active_languages": languages,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(ExitCode::SUCCESS);
    }

    let mut stdout = io::stdout();
    println!("Analyzed text");
    println!("-------------");
    write_colored_text(&mut stdout, &outcome.results)?;
    println!("\nLanguages");
    println!("---------");
    write_legend(&mut stdout, &languages)?;
    println!("\nDistribution");
    println!("------------");
    write_chart(&mut stdout, &stats)?;

    Ok(ExitCode::SUCCESS)
}
