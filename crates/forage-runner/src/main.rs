//! Command session entry point for the Forage route planner.
//!
//! The runner loads the reference catalog (from the disk cache when it is
//! fresh, from the upstream API otherwise), then answers chat commands read
//! line by line from stdin.
//!
//! # Architecture
//!
//! ```text
//! stdin --> Command::parse --> execute (forage-core) --> stdout
//!                                  ^
//!                    CatalogHandle (Arc swap on refresh)
//!                                  ^
//!              ReferenceDataProvider (cache file / HTTP API)
//! ```
//!
//! Upstream outages never crash the runner: the initial load is retried
//! after `runner.retry_delay_secs`, and a failed refresh keeps serving the
//! previous catalog.

mod catalog_handle;
mod config;
mod error;
mod session;

use forage_source::{ReferenceDataProvider, ReferenceSource};
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::catalog_handle::CatalogHandle;
use crate::config::ForageConfig;
use crate::error::RunnerError;
use crate::session::Session;

/// Application entry point.
///
/// Initializes logging, then runs the session until stdin closes.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the reference data is
/// unusable, or terminal I/O fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("forage-runner starting");
    run().await?;
    Ok(())
}

async fn run() -> Result<(), RunnerError> {
    let config = ForageConfig::load()?;
    config.engine.validate()?;
    info!(
        base_url = config.source.base_url,
        cache_path = %config.source.cache_path.display(),
        cache_ttl_secs = config.source.cache_ttl_secs,
        result_count = config.engine.result_count,
        "configuration loaded"
    );

    let handle = load_catalog(&config).await?;

    let session = Session::new(&handle, &config.engine);
    info!("ready, reading commands from stdin");
    let handled = session
        .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await?;

    info!(commands = handled, "input closed, shutting down");
    Ok(())
}

/// Load the initial catalog, retrying while upstream is unreachable.
async fn load_catalog(config: &ForageConfig) -> Result<CatalogHandle, RunnerError> {
    let mut attempt: u32 = 1;
    loop {
        let source = ReferenceSource::http(&config.source)?;
        let provider = ReferenceDataProvider::new(source, config.source.clone());

        let err = match CatalogHandle::load(provider, &config.runner).await {
            Ok(handle) => return Ok(handle),
            Err(e) => RunnerError::from(e),
        };
        if !err.is_retryable() {
            return Err(err);
        }

        warn!(
            error = %err,
            attempt,
            retry_in_secs = config.runner.retry_delay_secs,
            "reference data unavailable, retrying"
        );
        tokio::time::sleep(config.runner.retry_delay()).await;
        attempt = attempt.saturating_add(1);
    }
}
