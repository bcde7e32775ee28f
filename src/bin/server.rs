use std::{fs::OpenOptions, net::SocketAddr, process::ExitCode, sync::Arc, time::Duration};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use axum_server::Handle;
use clap::Parser;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use budget_tracker::{
    AppState, Config, DEFAULT_API_BASE_URL, HttpTransactionApi, InMemoryTransactionApi,
    TransactionApi, TransactionStore, build_router, graceful_shutdown, spawn_poller,
};

/// The web server for the budget tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The port to serve the app from.
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// The base URL of the transactions backend.
    #[arg(long, env = "API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    api_base_url: String,

    /// How often the server fetches the transactions from the backend, in milliseconds.
    #[arg(long, env = "POLL_INTERVAL_MS", default_value_t = 2000)]
    poll_interval_ms: u64,

    /// How often the browser re-requests each view, in milliseconds.
    #[arg(long, env = "REFRESH_INTERVAL_MS", default_value_t = 2000)]
    refresh_interval_ms: u64,

    /// How long a backend request may take before it fails, in seconds.
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 10)]
    request_timeout_secs: u64,

    /// The user new transactions are recorded for.
    #[arg(long, env = "USER_ID", default_value_t = 1)]
    user_id: i64,

    /// The canonical name of the local timezone, e.g. "Asia/Manila".
    #[arg(long, env = "TIMEZONE", default_value = "Etc/UTC")]
    timezone: String,

    /// Keep transactions in memory instead of using the backend.
    #[arg(long, env = "IN_MEMORY")]
    in_memory: bool,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            port: args.port,
            api_base_url: args.api_base_url,
            poll_interval: Duration::from_millis(args.poll_interval_ms),
            refresh_interval: Duration::from_millis(args.refresh_interval_ms),
            request_timeout: Duration::from_secs(args.request_timeout_secs),
            user_id: args.user_id,
            timezone: args.timezone,
            in_memory: args.in_memory,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();

    let config = Config::from(Args::parse());
    if let Err(error) = config.validate() {
        tracing::error!("Invalid configuration: {error}");
        return ExitCode::FAILURE;
    }

    let api: Arc<dyn TransactionApi> = if config.in_memory {
        tracing::info!("Keeping transactions in memory");
        Arc::new(InMemoryTransactionApi::default())
    } else {
        match HttpTransactionApi::new(&config.api_base_url, config.request_timeout) {
            Ok(api) => {
                tracing::info!("Using the transactions API at {}", api.base_url());
                Arc::new(api)
            }
            Err(error) => {
                tracing::error!("Could not create the API client: {error}");
                return ExitCode::FAILURE;
            }
        }
    };

    let store = TransactionStore::new(api, config.user_id);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let poller = spawn_poller(store.clone(), config.poll_interval, shutdown_rx);
    tokio::spawn(log_snapshot_changes(store.clone()));

    let state = AppState::new(store, &config.timezone, config.refresh_interval);
    let router = add_tracing_layer(build_router(state));

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone(), shutdown_tx));

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::info!("HTTP server listening on {}", addr);
    let result = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await;

    match result {
        Ok(()) => {
            if let Err(error) = poller.await {
                tracing::error!("The poller stopped unexpectedly: {error}");
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            tracing::error!("Server error: {error}");
            poller.abort();
            ExitCode::FAILURE
        }
    }
}

async fn log_snapshot_changes(store: TransactionStore) {
    let mut snapshots = store.subscribe();

    while snapshots.changed().await.is_ok() {
        let snapshot = snapshots.borrow_and_update();
        tracing::debug!(
            revision = snapshot.revision,
            transactions = snapshot.transactions.len(),
            pending = snapshot.pending.len(),
            "snapshot changed"
        );
    }
}

fn setup_logging() {
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    let debug_log = match OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")
    {
        Ok(log_file) => Some(
            tracing_subscriber::fmt::layer()
                .pretty()
                .with_writer(Arc::new(log_file))
                .with_filter(filter::LevelFilter::DEBUG),
        ),
        Err(error) => {
            eprintln!("Could not create log file, logging to stdout only: {error}");
            None
        }
    };

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(debug_log)
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // Errors are logged by the handlers.
        .on_failure(());

    router.layer(tracing_layer)
}
