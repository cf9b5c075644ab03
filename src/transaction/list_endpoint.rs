//! Defines the route handler that lists transactions with search and
//! pagination.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::{Error, pagination::PageParams, state::AppState};

use super::{filter::TransactionFilter, model::Transaction, store::TransactionStore};

/// The query parameters accepted by the transaction list and combined
/// endpoints.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// Free text matched against titles, descriptions and prices.
    pub search: Option<String>,
    /// Restrict results to one calendar month (1-12), independent of year.
    pub month: Option<u8>,
    /// The page number, starting at 1.
    pub page: Option<u64>,
    /// The number of transactions per page.
    pub per_page: Option<u64>,
}

/// One page of matching transactions plus the total match count.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    /// The transactions on the requested page, in the store's stable order.
    pub transactions: Vec<Transaction>,
    /// The number of transactions matching the filter across all pages.
    pub total_count: u64,
}

/// Retrieve one page of the transactions matching `filter`.
///
/// The total count is independent of the page selection, so a page beyond
/// the last match yields an empty list with the correct total.
///
/// # Errors
/// Propagates any store error.
pub fn list_transactions<T: TransactionStore>(
    store: &T,
    filter: &TransactionFilter,
    params: PageParams,
) -> Result<TransactionPage, Error> {
    Ok(TransactionPage {
        transactions: store.get_page(filter, params.offset(), params.limit())?,
        total_count: store.count(filter)?,
    })
}

/// Handles requests for a searchable, paginated transaction listing.
pub async fn list_transactions_endpoint<T>(
    State(state): State<AppState<T>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<TransactionPage>, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    let filter = TransactionFilter::new(query.search, query.month)?;
    let params = PageParams::new(query.page, query.per_page, &state.pagination_config)?;

    let page = state
        .run_query(move |store| list_transactions(&store, &filter, params))
        .await?;

    Ok(Json(page))
}
