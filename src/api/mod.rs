pub mod handlers;
pub mod response;

use crate::adapters::telegram::TelegramClient;
use crate::config::AppConfig;
use crate::core::dispatch::Dispatcher;
use crate::utils::error::Result;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::sync::Arc;
use tokio::net::TcpListener;

pub const SERVICE_NAME: &str = "telegram-order";

/// Read-only per-process state shared by every request.
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub dispatcher: Dispatcher<TelegramClient>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let config = Arc::new(config);
        let client = TelegramClient::new(&config.api_base, &config.bot_token);
        Self {
            dispatcher: Dispatcher::new(Arc::clone(&config), client),
            config,
        }
    }
}

/// Accept loop: one spawned task per connection, so a failing request
/// never takes the listener down.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> Result<()> {
    loop {
        let (stream, peer) = listener.accept().await?;
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            let io = TokioIo::new(stream);
            let service = service_fn(move |req| handlers::handle_request(req, Arc::clone(&state)));
            if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                tracing::debug!("connection error from {peer}: {e}");
            }
        });
    }
}
