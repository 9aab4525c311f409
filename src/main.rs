use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coindash_gateway::config::Args;
use coindash_gateway::handlers::router;
use coindash_gateway::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coindash_gateway=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // parse cli/env arguments
    let args = Args::parse();

    // shared state: cache + upstream client, one instance for the process
    let state = Arc::new(AppState::from_args(&args));

    let app = router(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    info!("Gateway running on http://localhost:{}", args.port);
    info!("Forwarding to market-data API at {}", args.upstream_url);
    info!("Cache TTL: {} seconds", args.cache_ttl);

    axum::serve(listener, app).await.unwrap();
}
