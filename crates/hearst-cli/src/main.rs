//! Hearst CLI - Command-line interface
//!
//! Usage:
//!   hearst extract <path> [--extended]
//!   hearst patterns [--extended]
//!
//! `extract` reads a stream of JSON documents (pre-annotated tokens, one or
//! more documents, e.g. JSON Lines; "-" reads stdin) and writes one JSON line
//! of relations per document.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::io::AsyncReadExt;

use hearst_core::{AppConfig, Document, LoggingConfig, Span};
use hearst_extractor::{HyponymDetector, PatternTable, RelationExtractor};

#[derive(Parser)]
#[command(name = "hearst")]
#[command(about = "Hearst pattern hypernym extraction CLI")]
#[command(version)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract hypernym relations from annotated documents
    Extract {
        /// Path to JSON documents, or "-" for stdin
        path: String,
        /// Also use the secondary rule set
        #[arg(long)]
        extended: bool,
    },
    /// List the pattern table
    Patterns {
        /// Also list the secondary rule set
        #[arg(long)]
        extended: bool,
    },
}

/// One output line per input document
#[derive(Debug, Serialize)]
struct DocumentOutput<'d> {
    document: usize,
    relations: Vec<RelationOutput<'d>>,
}

#[derive(Debug, Serialize)]
struct RelationOutput<'d> {
    predicate: &'d str,
    hypernym: String,
    hyponym: String,
    hypernym_span: Span,
    hyponym_span: Span,
}

impl<'d> DocumentOutput<'d> {
    fn new(index: usize, document: &'d Document) -> Self {
        let relations = document
            .relations
            .iter()
            .map(|r| RelationOutput {
                predicate: &r.predicate,
                hypernym: document.span_text(r.hypernym),
                hyponym: document.span_text(r.hyponym),
                hypernym_span: r.hypernym,
                hyponym_span: r.hyponym,
            })
            .collect();

        Self {
            document: index,
            relations,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?.with_env_override()?,
        None => AppConfig::from_env()?,
    };
    init_tracing(&config.logging);

    match cli.command {
        Commands::Extract { path, extended } => {
            config.extractor.extended |= extended;
            run_extract(&path, &config).await?;
        }
        Commands::Patterns { extended } => {
            config.extractor.extended |= extended;
            let table = PatternTable::load(config.extractor.extended)?;
            print_patterns(&table, &mut std::io::stdout().lock())?;
        }
    }

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(logging.include_location)
        .with_line_number(logging.include_location);

    if logging.json_format {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn read_input(path: &str) -> anyhow::Result<String> {
    if path == "-" {
        let mut content = String::new();
        tokio::io::stdin()
            .read_to_string(&mut content)
            .await
            .context("Failed to read stdin")?;
        return Ok(content);
    }

    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path))
}

fn parse_documents(content: &str) -> anyhow::Result<Vec<Document>> {
    let documents = serde_json::Deserializer::from_str(content)
        .into_iter::<Document>()
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to parse documents")?;

    for (index, document) in documents.iter().enumerate() {
        document
            .validate()
            .with_context(|| format!("Document {} is malformed", index))?;
    }

    Ok(documents)
}

async fn run_extract(path: &str, config: &AppConfig) -> anyhow::Result<()> {
    let documents = parse_documents(&read_input(path).await?)?;
    let detector = Arc::new(HyponymDetector::from_config(&config.extractor)?);

    tracing::info!(
        "Extracting from {} documents ({} patterns)",
        documents.len(),
        detector.table().len()
    );

    // Documents are independent; the detector is shared read-only.
    let tasks = documents.into_iter().map(|document| {
        let detector = Arc::clone(&detector);
        tokio::task::spawn_blocking(move || detector.process(document))
    });
    let processed = futures::future::try_join_all(tasks).await?;

    let mut out = std::io::stdout().lock();
    let mut total = 0;
    for (index, document) in processed.iter().enumerate() {
        total += document.relations.len();
        serde_json::to_writer(&mut out, &DocumentOutput::new(index, document))?;
        writeln!(out)?;
    }

    tracing::info!("Extracted {} relations", total);
    Ok(())
}

fn print_patterns(table: &PatternTable, out: &mut impl Write) -> std::io::Result<()> {
    for rule in table.rules() {
        writeln!(
            out,
            "{:<22} {:<6} {} constraints",
            rule.label,
            rule.position,
            rule.constraints.len()
        )?;
    }
    Ok(())
}
