/*! This module defines the SQLite schema for the application's database. */

use rusqlite::Connection;

use crate::Error;

/// Create the tables for the application's domain models if they do not
/// already exist.
///
/// `date_of_sale` is stored as RFC 3339 text so that the month component can
/// be extracted from the date part without SQLite normalising the UTC offset.
///
/// # Errors
/// Returns an [Error::SqlError] if the schema could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            price REAL NOT NULL CHECK (price >= 0),
            date_of_sale TEXT NOT NULL,
            category TEXT NOT NULL,
            sold INTEGER NOT NULL
        )",
        [],
    )?;

    Ok(())
}
