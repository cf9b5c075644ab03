//! Implements a struct that holds the state of the REST server.

use std::time::Duration;

use tokio::{task, time::timeout};

use crate::{Error, pagination::PaginationConfig, transaction::TransactionStore};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState<T>
where
    T: TransactionStore,
{
    /// The store for the sale [transactions](crate::transaction::Transaction).
    pub store: T,
    /// The config that controls how to page query results.
    pub pagination_config: PaginationConfig,
    /// How long a single store query may run before it is abandoned.
    pub query_timeout: Duration,
    /// The URL of the external seed data source used for bulk reloads.
    pub source_url: String,
}

impl<T> AppState<T>
where
    T: TransactionStore,
{
    /// Create a new [AppState].
    pub fn new(
        store: T,
        pagination_config: PaginationConfig,
        query_timeout: Duration,
        source_url: String,
    ) -> Self {
        Self {
            store,
            pagination_config,
            query_timeout,
            source_url,
        }
    }
}

impl<T> AppState<T>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    /// Run a store query on the blocking thread pool, bounded by the state's
    /// query timeout.
    ///
    /// The store is synchronous (SQLite), so queries must not run directly on
    /// the async runtime. Independent queries started this way run
    /// concurrently; dropping the returned future abandons the result.
    ///
    /// # Errors
    /// Returns [Error::StoreUnavailable] if the query does not finish within
    /// the timeout or its task fails, otherwise whatever the query returns.
    pub(crate) async fn run_query<R, F>(&self, query: F) -> Result<R, Error>
    where
        F: FnOnce(T) -> Result<R, Error> + Send + 'static,
        R: Send + 'static,
    {
        let store = self.store.clone();
        let task = task::spawn_blocking(move || query(store));

        match timeout(self.query_timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => Err(Error::StoreUnavailable(join_error.to_string())),
            Err(_) => Err(Error::StoreUnavailable(format!(
                "query did not finish within {:?}",
                self.query_timeout
            ))),
        }
    }
}
