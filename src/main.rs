mod config;
mod error;
mod extract;
mod fetch;
mod models;
mod monitor;
mod notify;
mod store;
mod text;

use config::Config;
use fetch::ChromeFetcher;
use monitor::Monitor;
use notify::LineNotifier;
use tracing::{info, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Credentials come from .env in local runs, plain env vars otherwise
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("🛒 Nojima Watch - new listing check");

    let config = Config::from_env();
    let fetcher = ChromeFetcher::new()?;
    let notifier = LineNotifier::new(&config);

    Monitor::new(config, fetcher, notifier).run().await?;

    info!("✅ Run finished");
    Ok(())
}
