//! Local drain runner: seeds the in-memory work queue from a JSON fixture
//! and chains invocations until the queue is exhausted.
//!
//! Useful for exercising the orchestration end to end without the
//! spreadsheet backend or the generative APIs.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pipeline_core::config::Config;
use pipeline_core::generation::RunController;
use pipeline_core::kernel::PipelineDeps;
use pipeline_core::queue::{MemoryStatusLedger, MemoryWorkQueue};
use pipeline_core::testing::{
    NoopScheduler, RecordingAssetRepository, StubContentSynthesizer, StubImageSynthesizer,
};

#[derive(Parser)]
#[command(about = "Drain a keyword fixture through the generation pipeline")]
struct Args {
    /// JSON fixture: an array of rows, each an array of keyword cells.
    #[arg(long, default_value = "dev/fixtures/keywords.json")]
    fixture: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,pipeline_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = Config::from_env().context("loading configuration")?;

    let rows: Vec<Vec<String>> = {
        let raw = std::fs::read_to_string(&args.fixture)
            .with_context(|| format!("reading fixture {}", args.fixture.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing fixture {}", args.fixture.display()))?
    };

    let work_queue = Arc::new(MemoryWorkQueue::new());
    for (offset, cells) in rows.iter().enumerate() {
        let cells: Vec<&str> = cells.iter().map(String::as_str).collect();
        work_queue.insert_row(config.layout.start_row + offset as u32, &cells);
    }
    info!(rows = rows.len(), fixture = %args.fixture.display(), "seeded work queue");

    let ledger = Arc::new(MemoryStatusLedger::new());
    let assets = Arc::new(RecordingAssetRepository::new());
    let deps = PipelineDeps::builder()
        .work_queue(work_queue)
        .ledger(ledger.clone())
        .content(Arc::new(StubContentSynthesizer::new()))
        .images(Arc::new(StubImageSynthesizer::new()))
        .assets(assets.clone())
        .scheduler(Arc::new(NoopScheduler))
        .build();

    let controller = RunController::new(deps, config);
    let summary = controller.drain().await?;

    info!(
        rows = summary.rows,
        succeeded = summary.succeeded,
        failed = summary.failed,
        assets = assets.created().len(),
        "drain finished"
    );

    for record in ledger.records() {
        println!(
            "{}\t{}{}\t{}\t{}",
            record.status.as_str(),
            record.column,
            record.row,
            record.keyword,
            record.timestamp.to_rfc3339()
        );
    }

    Ok(())
}
