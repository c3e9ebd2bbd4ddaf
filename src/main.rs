//! nolite binary entry point.
//!
//! Opens (creating if needed) the configured document store, reports what
//! it holds and closes it again. Logs go to stderr.

// Enable the coverage attribute when running with nightly for llvm-cov exclusions
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use nolite::config::Config;
use nolite::error::AppError;
use nolite::store::DocumentStore;
use tracing_subscriber::filter::EnvFilter;

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() {
    // Config is loaded first so LOG_LEVEL from .env is honored
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_logging(EnvFilter::new("info"));
            tracing::error!("Configuration error: {e}");
            std::process::exit(1);
        }
    };
    init_logging(config.log_filter());

    if let Err(e) = run(&config).await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
fn init_logging(filter: EnvFilter) {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

#[cfg_attr(coverage_nightly, coverage(off))]
async fn run(config: &Config) -> Result<(), AppError> {
    tracing::info!(
        database = %config.database_path,
        max_connections = config.max_connections,
        "configuration loaded"
    );

    let store = DocumentStore::open(config).await?;
    tracing::info!(
        database = %store.database_path(),
        documents = store.paths().len(),
        "document store ready"
    );

    store.close().await?;
    Ok(())
}
