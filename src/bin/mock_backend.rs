//! Serves the transactions backend contract from memory for manual testing.

use std::net::SocketAddr;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use budget_tracker::{InMemoryTransactionApi, logging_middleware, mock_backend_router};

/// A stand-in for the PHP transactions backend.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The port to serve the backend from.
    #[arg(short, long, env = "MOCK_BACKEND_PORT", default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().pretty())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let router = mock_backend_router(InMemoryTransactionApi::default())
        .layer(axum::middleware::from_fn(logging_middleware));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        "Mock backend listening on http://{addr}, start the server with --api-base-url http://{addr}"
    );

    axum::serve(listener, router).await
}
