use anyhow::Context;
use clap::Parser;

use makeapi_gateway::{app, AppState};

/// MakeAPI gateway server.
#[derive(Debug, Parser)]
#[command(name = "makeapi-gateway", version)]
struct Args {
    /// Address to bind (defaults to 0.0.0.0)
    #[arg(long, default_value = "0.0.0.0")]
    listen: String,

    /// Port to bind; falls back to $PORT, then 3000
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up MAKEAPI_BASE_URL etc.
    let _ = dotenvy::dotenv();

    let config = makeapi_gateway::config::config();

    tracing_subscriber::fmt::init();
    tracing::info!("Starting MakeAPI gateway in {:?} mode", config.environment);
    tracing::info!("Upstream data service: {}", config.upstream.base_url);

    let args = Args::parse();
    let port = args
        .port
        .or_else(|| std::env::var("PORT").ok().and_then(|s| s.parse().ok()))
        .unwrap_or(3000);

    let state = AppState::upstream();
    let router = app(state);

    let bind_addr = format!("{}:{}", args.listen, port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!("MakeAPI gateway listening on http://{bind_addr}");

    axum::serve(listener, router).await.context("server")?;
    Ok(())
}
