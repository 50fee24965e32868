//! Vitrine storefront auth server binary.

use std::sync::Arc;

use clap::Parser;
use tracing::info;
use vitrine_api::config::ApiConfig;
use vitrine_core::backend::HttpCommerceBackend;
use vitrine_core::ratelimit::{MemoryStore, RateLimiter};

/// CLI arguments for the auth server.
#[derive(Parser, Debug)]
#[command(name = "vitrine_server", about = "Vitrine storefront auth server")]
struct Args {
    /// Bind address override (otherwise `BIND_ADDR`, default 127.0.0.1:3000).
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,vitrine_api=debug,vitrine_core=debug".parse().unwrap()),
        )
        .init();

    let args = Args::parse();

    // Refuses to start on a missing or short SESSION_SECRET.
    let mut config = ApiConfig::from_env()?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }

    info!(backend_url = %config.backend_url, "starting vitrine_server");

    let state = vitrine_api::AppState {
        backend: Arc::new(HttpCommerceBackend::new(config.backend_url.clone())),
        limiter: Arc::new(RateLimiter::new(Arc::new(MemoryStore::new()))),
        config,
    };

    let bind_addr = state.config.bind_addr.clone();
    let app = vitrine_api::router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(addr = %listener.local_addr()?, "storefront auth API listening");

    axum::serve(listener, app).await?;

    Ok(())
}
