//! Ingest Chunker - Command Line Entry Point
//!
//! Chunks files for knowledge-base ingestion and prints one JSON payload
//! per chunk (JSON Lines) on stdout.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ingest_chunker::batch::{BatchConfig, BatchProcessor};
use ingest_chunker::ingest::load_document;
use ingest_chunker::router::{ChunkStrategy, DocumentRouter};
use ingest_chunker::types::ChunkingConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    /// Pick by file extension
    Auto,
    /// Force boundary-aware code chunking
    Code,
    /// Force plain sliding-window chunking
    Text,
}

#[derive(Debug, Parser)]
#[command(name = "ingest-chunker", version, about = "Chunk files for knowledge-base ingestion")]
struct Cli {
    /// Project name stored in every payload
    #[arg(long, default_value = "")]
    project: String,

    /// Chunking strategy
    #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
    strategy: StrategyArg,

    /// Stop at the first file that fails
    #[arg(long)]
    fail_fast: bool,

    /// Files to chunk
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON Lines
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "ingest_chunker=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = ChunkingConfig::from_env();
    config.validate().context("invalid chunking configuration")?;

    info!("Starting Ingest Chunker v{}", env!("CARGO_PKG_VERSION"));
    info!(
        chunk_size = config.text.chunk_size,
        code_target_size = config.code.target_size,
        files = cli.files.len(),
        "Loaded configuration"
    );

    let mut documents = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        match load_document(path, &cli.project).await {
            Ok(document) => documents.push(document),
            Err(e) if !cli.fail_fast => warn!(error = %e, "Skipping unreadable file"),
            Err(e) => return Err(e.into()),
        }
    }

    let strategy = match cli.strategy {
        StrategyArg::Auto => None,
        StrategyArg::Code => Some(ChunkStrategy::Code),
        StrategyArg::Text => Some(ChunkStrategy::Text),
    };
    let batch_config = BatchConfig {
        continue_on_error: !cli.fail_fast,
        strategy,
        ..BatchConfig::from(&config)
    };

    let router = Arc::new(DocumentRouter::new(&config));
    let processor = BatchProcessor::new(router, batch_config);
    let (prepared, result) = processor.process_batch(documents).await?;

    info!(
        processed = result.processed_documents,
        failed = result.failed_documents,
        chunks = result.total_chunks,
        "Chunked files"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for document in &prepared {
        for chunk in &document.chunks {
            serde_json::to_writer(&mut out, &chunk.payload())?;
            writeln!(out)?;
        }
    }
    out.flush()?;

    Ok(())
}
