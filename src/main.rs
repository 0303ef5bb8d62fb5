use order_relay::utils::{logger, validation::Validate};
use order_relay::{api, AppConfig, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init();

    let config = AppConfig::from_env();
    config.validate()?;

    tracing::info!("Starting {}", api::SERVICE_NAME);
    if !config.telegram_configured() {
        tracing::warn!(
            "TELEGRAM_BOT_TOKEN / TELEGRAM_CHAT_ID not set, relay endpoints will answer 500"
        );
    } else {
        tracing::info!(chats = config.chat_ids.len(), "telegram delivery configured");
    }
    if config.dry_run {
        tracing::warn!("dry run enabled, outbound delivery is skipped");
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = Arc::new(AppState::new(config));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Server started on {addr}");

    api::serve(listener, state).await?;
    Ok(())
}
