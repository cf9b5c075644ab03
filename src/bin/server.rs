use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use salescope::{
    AppState, PaginationConfig, build_router, graceful_shutdown, initialize_db,
    transaction::SqliteTransactionStore,
};

/// The default seed data source, a public S3 object with product sale
/// transactions.
const DEFAULT_SOURCE_URL: &str = "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

/// The REST API server for salescope.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: String,

    /// The port to serve the API from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// The URL to fetch seed transactions from on /api/initialize.
    #[arg(long, default_value = DEFAULT_SOURCE_URL)]
    source_url: String,

    /// How many seconds a single store query may run before it is abandoned.
    #[arg(long, default_value_t = 30)]
    query_timeout_secs: u64,

    /// The number of transactions per page when a request does not specify
    /// one.
    #[arg(long, default_value_t = 10)]
    page_size: u64,
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let connection = Connection::open(&args.db_path).expect("Could not open the database");
    initialize_db(&connection).expect("Could not initialize the database schema");

    let store = SqliteTransactionStore::new(Arc::new(Mutex::new(connection)));
    let state = AppState::new(
        store,
        PaginationConfig {
            default_page: 1,
            default_page_size: args.page_size,
        },
        Duration::from_secs(args.query_timeout_secs),
        args.source_url,
    );

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(state));

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .unwrap();
}

fn setup_logging() {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    tracing_subscriber::registry()
        .with(stdout_log.with_filter(filter::LevelFilter::INFO))
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
        // Errors already log themselves when converted to responses, so the
        // default 5xx logging would duplicate them.
        .on_failure(());

    router.layer(tracing_layer)
}
