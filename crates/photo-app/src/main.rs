//! Photo reactions entry point
//!
//! Run with:
//! ```bash
//! cargo run -p photo-app
//! ```
//!
//! Configuration is loaded from environment variables (and `.env`).

use photo_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = %e, "Application failed");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    if let Err(e) = try_init_tracing_with_config(TracingConfig::from_settings(&config.app)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        name = %config.app.name,
        env = ?config.app.env,
        store_configured = config.store.is_configured(),
        "Configuration loaded"
    );

    photo_app::run(config).await?;
    Ok(())
}
