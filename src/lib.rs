//! Salescope serves analytical queries over a collection of product sale
//! transactions: a searchable, paginated listing, aggregate sales statistics,
//! a fixed-bucket price histogram and a per-category breakdown, each
//! optionally restricted to one calendar month independent of year.
//!
//! The collection itself is read-only; it is only ever replaced wholesale
//! from an external seed source via the initialize route.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod db;
mod endpoints;
mod error;
mod pagination;
mod routing;
mod state;

pub mod transaction;

pub use db::initialize as initialize_db;
pub use error::Error;
pub use pagination::{PageParams, PaginationConfig};
pub use routing::build_router;
pub use state::AppState;

/// An async task that waits for either the ctrl+c or terminate signal,
/// whichever comes first, and then signals the server to shut down
/// gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
