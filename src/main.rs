mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::error::AppError;
use crate::features::log_entry::{run_console, LogEntrySession};
use crate::features::log_form::{EmployeeDirectory, LogFormModel};
use crate::features::submission::SubmissionPipeline;
use crate::modules::photo_library::LibraryPhotoPicker;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Form edits and the one in-flight submission share a single thread
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let config = Config::from_env().map_err(AppError::Config)?;
    tracing::info!("Configuration loaded successfully");

    let directory = EmployeeDirectory::from_config(&config.directory);
    tracing::info!("Employee directory loaded with {} names", directory.len());

    let pipeline = SubmissionPipeline::new(&config.submission)?;
    tracing::info!(
        "Submission pipeline initialized for endpoint: {}",
        pipeline.endpoint_url()
    );

    let picker = LibraryPhotoPicker::new(&config.photos);
    tracing::info!("Photo library rooted at {}", picker.root().display());

    let mut session = LogEntrySession::new(LogFormModel::new(directory), picker, pipeline);

    run_console(
        &mut session,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await?;

    Ok(())
}
