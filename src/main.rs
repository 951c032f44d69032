use anyhow::Result;
use infohub::{InfoHubConfig, logging, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = InfoHubConfig::load()?;
    logging::init(&config.logging)?;

    tracing::info!("Starting InfoHub {}", infohub::VERSION);
    web::run(config).await
}
