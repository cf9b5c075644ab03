//! Implements a SQLite backed transaction store.
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row, params_from_iter, types::Value};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::Error;

use super::{
    filter::TransactionFilter,
    histogram::CategoryCount,
    model::{NewTransaction, Transaction},
    store::TransactionStore,
};

/// Stores sale transactions in a SQLite database.
///
/// The connection is shared behind a mutex, so the bulk replace in
/// [TransactionStore::replace_all] is a critical section: read queries run
/// either entirely before or entirely after it.
#[derive(Debug, Clone)]
pub struct SqliteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn map_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
        let date_text: String = row.get(4)?;
        let date_of_sale = OffsetDateTime::parse(&date_text, &Rfc3339).map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(
                4,
                rusqlite::types::Type::Text,
                Box::new(error),
            )
        })?;

        Ok(Transaction {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            price: row.get(3)?,
            date_of_sale,
            category: row.get(5)?,
            sold: row.get(6)?,
        })
    }

    fn query_count(&self, conditions: Vec<String>, params: Vec<Value>) -> Result<u64, Error> {
        let connection = self.connection.lock().unwrap();

        let query = format!(
            "SELECT COUNT(*) FROM \"transaction\"{}",
            where_clause(&conditions)
        );

        let count =
            connection.query_one(&query, params_from_iter(params), |row| row.get::<_, u64>(0))?;

        Ok(count)
    }
}

impl TransactionStore for SqliteTransactionStore {
    /// Count the transactions matching `filter`.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an unexpected SQL error.
    fn count(&self, filter: &TransactionFilter) -> Result<u64, Error> {
        let (conditions, params) = filter.sql_conditions();

        self.query_count(conditions, params)
    }

    /// Retrieve one page of matching transactions, ordered by ID so the page
    /// boundaries stay stable between calls.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an unexpected SQL error.
    fn get_page(
        &self,
        filter: &TransactionFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Transaction>, Error> {
        let (conditions, mut params) = filter.sql_conditions();

        params.push(Value::Integer(limit as i64));
        let limit_index = params.len();
        params.push(Value::Integer(offset as i64));
        let offset_index = params.len();

        let query = format!(
            "SELECT id, title, description, price, date_of_sale, category, sold \
             FROM \"transaction\"{} \
             ORDER BY id ASC LIMIT ?{limit_index} OFFSET ?{offset_index}",
            where_clause(&conditions)
        );

        let connection = self.connection.lock().unwrap();

        connection
            .prepare(&query)?
            .query_map(params_from_iter(params), Self::map_row)?
            .map(|row_result| row_result.map_err(Error::SqlError))
            .collect()
    }

    /// Sum the price over all matching transactions.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an unexpected SQL error.
    fn sum_price(&self, filter: &TransactionFilter) -> Result<f64, Error> {
        let (conditions, params) = filter.sql_conditions();

        let query = format!(
            "SELECT COALESCE(SUM(price), 0.0) FROM \"transaction\"{}",
            where_clause(&conditions)
        );

        let connection = self.connection.lock().unwrap();

        let total =
            connection.query_one(&query, params_from_iter(params), |row| row.get::<_, f64>(0))?;

        Ok(total)
    }

    /// Count the matching transactions with the given sold flag.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an unexpected SQL error.
    fn count_sold(&self, filter: &TransactionFilter, sold: bool) -> Result<u64, Error> {
        let (mut conditions, mut params) = filter.sql_conditions();

        params.push(Value::Integer(sold as i64));
        conditions.push(format!("sold = ?{}", params.len()));

        self.query_count(conditions, params)
    }

    /// Count the matching transactions with a price in `[min, max]`.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an unexpected SQL error.
    fn count_in_price_range(
        &self,
        filter: &TransactionFilter,
        min: f64,
        max: Option<f64>,
    ) -> Result<u64, Error> {
        let (mut conditions, mut params) = filter.sql_conditions();

        params.push(Value::Real(min));
        conditions.push(format!("price >= ?{}", params.len()));

        if let Some(max) = max {
            params.push(Value::Real(max));
            conditions.push(format!("price <= ?{}", params.len()));
        }

        self.query_count(conditions, params)
    }

    /// Count the matching transactions per distinct category.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an unexpected SQL error.
    fn count_by_category(&self, filter: &TransactionFilter) -> Result<Vec<CategoryCount>, Error> {
        let (conditions, params) = filter.sql_conditions();

        let query = format!(
            "SELECT category, COUNT(*) FROM \"transaction\"{} GROUP BY category",
            where_clause(&conditions)
        );

        let connection = self.connection.lock().unwrap();

        connection
            .prepare(&query)?
            .query_map(params_from_iter(params), |row| {
                Ok(CategoryCount {
                    category: row.get(0)?,
                    count: row.get(1)?,
                })
            })?
            .map(|row_result| row_result.map_err(Error::SqlError))
            .collect()
    }

    /// Replace the entire collection inside a single SQL transaction.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an unexpected SQL error; the
    /// transaction rolls back and the previous collection stays in place.
    fn replace_all(&self, transactions: Vec<NewTransaction>) -> Result<usize, Error> {
        let connection = self.connection.lock().unwrap();

        let tx = connection.unchecked_transaction()?;
        tx.execute("DELETE FROM \"transaction\"", [])?;

        let stored = {
            let mut statement = tx.prepare(
                "INSERT INTO \"transaction\" \
                 (title, description, price, date_of_sale, category, sold) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;

            let mut stored = 0;
            for record in transactions {
                let date_text = record.date_of_sale.format(&Rfc3339).map_err(|error| {
                    Error::SourceFormatInvalid(format!(
                        "could not format date of sale: {error}"
                    ))
                })?;

                statement.execute((
                    record.title,
                    record.description,
                    record.price,
                    date_text,
                    record.category,
                    record.sold,
                ))?;
                stored += 1;
            }

            stored
        };

        tx.commit()?;
        Ok(stored)
    }
}

fn where_clause(conditions: &[String]) -> String {
    if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    }
}
