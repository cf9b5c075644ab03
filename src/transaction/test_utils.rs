//! Shared helpers for transaction tests.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{db::initialize, pagination::PaginationConfig, state::AppState};

use super::{
    model::NewTransaction, sqlite_store::SqliteTransactionStore, store::TransactionStore,
};

pub(crate) fn record(
    title: &str,
    description: &str,
    price: f64,
    date_of_sale: OffsetDateTime,
    category: &str,
    sold: bool,
) -> NewTransaction {
    NewTransaction {
        title: title.to_owned(),
        description: description.to_owned(),
        price,
        date_of_sale,
        category: category.to_owned(),
        sold,
    }
}

/// An in-memory store seeded with `records`.
pub(crate) fn seeded_store(records: Vec<NewTransaction>) -> SqliteTransactionStore {
    let connection = Connection::open_in_memory().unwrap();
    initialize(&connection).unwrap();

    let store = SqliteTransactionStore::new(Arc::new(Mutex::new(connection)));
    store.replace_all(records).unwrap();

    store
}

/// The three-record scenario: two January sales (one sold, one not) and one
/// February sale.
pub(crate) fn example_records() -> Vec<NewTransaction> {
    use time::macros::datetime;

    vec![
        record("Shirt", "A shirt", 50.0, datetime!(2022-01-05 10:00 UTC), "A", true),
        record("Mug", "A mug", 150.0, datetime!(2021-01-20 10:00 UTC), "B", false),
        record("Lamp", "A lamp", 950.0, datetime!(2022-02-10 10:00 UTC), "A", true),
    ]
}

pub(crate) fn test_state(store: SqliteTransactionStore) -> AppState<SqliteTransactionStore> {
    AppState::new(
        store,
        PaginationConfig::default(),
        Duration::from_secs(5),
        "http://127.0.0.1:1/unused".to_owned(),
    )
}
