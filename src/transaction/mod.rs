//! Sale-transaction querying and aggregation.
//!
//! This module contains everything related to sale transactions:
//! - The `Transaction` model and the `NewTransaction` seed record
//! - The `TransactionFilter` predicate shared by all queries
//! - The store trait and its SQLite implementation
//! - The route handlers for listing, statistics, histograms, the combined
//!   query and the bulk reload

mod combined;
mod filter;
mod histogram;
mod list_endpoint;
mod model;
mod reload;
mod sqlite_store;
mod statistics;
mod store;

#[cfg(test)]
pub(crate) mod test_utils;

pub use combined::{CombinedResponse, combined_endpoint, combined_query};
pub use filter::TransactionFilter;
pub use histogram::{
    CategoryCount, MonthQuery, PRICE_RANGES, PriceRange, PriceRangeCount, bar_chart_endpoint,
    category_histogram, pie_chart_endpoint, price_histogram,
};
pub use list_endpoint::{ListQuery, TransactionPage, list_transactions, list_transactions_endpoint};
pub use model::{NewTransaction, Transaction};
pub use reload::{
    ReloadSummary, fetch_seed_transactions, initialize_endpoint, parse_seed_transactions,
};
pub use sqlite_store::SqliteTransactionStore;
pub use statistics::{Statistics, sale_statistics, statistics_endpoint};
pub use store::TransactionStore;
