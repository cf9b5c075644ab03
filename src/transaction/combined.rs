//! The combined query: pagination, statistics and both histograms over one
//! shared filter.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Serialize;

use crate::{Error, pagination::PageParams, state::AppState};

use super::{
    filter::TransactionFilter,
    histogram::{CategoryCount, PriceRangeCount, category_histogram, price_histogram},
    list_endpoint::{ListQuery, TransactionPage, list_transactions},
    statistics::{Statistics, sale_statistics},
    store::TransactionStore,
};

/// The assembled result of one combined query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedResponse {
    /// The requested page of matching transactions.
    pub transactions: TransactionPage,
    /// The aggregate sales statistics for the same filter.
    pub statistics: Statistics,
    /// The price histogram for the same filter.
    pub bar_chart: Vec<PriceRangeCount>,
    /// The category histogram for the same filter.
    pub pie_chart: Vec<CategoryCount>,
}

/// Run the four sub-queries concurrently against one filter and assemble the
/// results.
///
/// The filter is built once by the caller and shared, so the sub-results
/// cannot drift apart. Any sub-query failure fails the whole combined query;
/// a mix of real and defaulted values would be misleading. Dropping the
/// returned future abandons all in-flight sub-queries.
///
/// # Errors
/// Returns the first sub-query error, or [Error::StoreUnavailable] if a
/// sub-query exceeds the state's query timeout.
pub async fn combined_query<T>(
    state: &AppState<T>,
    filter: TransactionFilter,
    params: PageParams,
) -> Result<CombinedResponse, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    let (transactions, statistics, bar_chart, pie_chart) = tokio::try_join!(
        state.run_query({
            let filter = filter.clone();
            move |store| list_transactions(&store, &filter, params)
        }),
        state.run_query({
            let filter = filter.clone();
            move |store| sale_statistics(&store, &filter)
        }),
        state.run_query({
            let filter = filter.clone();
            move |store| price_histogram(&store, &filter)
        }),
        state.run_query(move |store| category_histogram(&store, &filter)),
    )?;

    Ok(CombinedResponse {
        transactions,
        statistics,
        bar_chart,
        pie_chart,
    })
}

/// Handles requests for the combined dashboard data.
pub async fn combined_endpoint<T>(
    State(state): State<AppState<T>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<CombinedResponse>, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    let filter = TransactionFilter::new(query.search, query.month)?;
    let params = PageParams::new(query.page, query.per_page, &state.pagination_config)?;

    let response = combined_query(&state, filter, params).await?;

    Ok(Json(response))
}
