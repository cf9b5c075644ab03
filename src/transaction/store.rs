//! Defines the transaction store trait.

use crate::Error;

use super::{
    filter::TransactionFilter,
    histogram::CategoryCount,
    model::{NewTransaction, Transaction},
};

/// The filter/scan capability the query engine depends on.
///
/// All read methods take the same [TransactionFilter] so that the composed
/// queries (pagination, statistics, histograms) are guaranteed to run against
/// one shared predicate. Implementers must apply a stable order to
/// [TransactionStore::get_page] so that concatenating consecutive pages
/// reproduces the full match set.
pub trait TransactionStore {
    /// Count the records matching `filter`.
    fn count(&self, filter: &TransactionFilter) -> Result<u64, Error>;

    /// Retrieve up to `limit` matching records starting at `offset`, in the
    /// store's stable natural order.
    ///
    /// An offset beyond the last match yields an empty list, not an error.
    fn get_page(
        &self,
        filter: &TransactionFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Transaction>, Error>;

    /// Sum the price over all matching records. Zero when nothing matches.
    fn sum_price(&self, filter: &TransactionFilter) -> Result<f64, Error>;

    /// Count the matching records whose sold flag equals `sold`.
    fn count_sold(&self, filter: &TransactionFilter, sold: bool) -> Result<u64, Error>;

    /// Count the matching records whose price lies in `[min, max]`, both ends
    /// inclusive. `max = None` means unbounded above.
    fn count_in_price_range(
        &self,
        filter: &TransactionFilter,
        min: f64,
        max: Option<f64>,
    ) -> Result<u64, Error>;

    /// Count the matching records per distinct category. Order is
    /// unspecified; the counts partition the match set.
    fn count_by_category(&self, filter: &TransactionFilter) -> Result<Vec<CategoryCount>, Error>;

    /// Replace the entire collection with `transactions` in one atomic step.
    ///
    /// Readers never observe a partially loaded collection: either the old
    /// collection or the complete new one. Returns the number of records
    /// stored.
    fn replace_all(&self, transactions: Vec<NewTransaction>) -> Result<usize, Error>;
}
