//! The price-bucket and category histogram aggregators.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::{Error, state::AppState};

use super::{filter::TransactionFilter, store::TransactionStore};

/// One of the fixed price buckets used by the price histogram.
#[derive(Debug, Clone, Copy)]
pub struct PriceRange {
    /// The label reported to clients, e.g. "101-200".
    pub label: &'static str,
    /// The lower bound, inclusive.
    pub min: f64,
    /// The upper bound, inclusive. `None` means unbounded above.
    pub max: Option<f64>,
}

/// The ten fixed price buckets, in report order.
///
/// The buckets are mutually exclusive and cover every price `>= 0` at the
/// whole-number boundaries the upstream data uses.
pub const PRICE_RANGES: [PriceRange; 10] = [
    PriceRange { label: "0-100", min: 0.0, max: Some(100.0) },
    PriceRange { label: "101-200", min: 101.0, max: Some(200.0) },
    PriceRange { label: "201-300", min: 201.0, max: Some(300.0) },
    PriceRange { label: "301-400", min: 301.0, max: Some(400.0) },
    PriceRange { label: "401-500", min: 401.0, max: Some(500.0) },
    PriceRange { label: "501-600", min: 501.0, max: Some(600.0) },
    PriceRange { label: "601-700", min: 601.0, max: Some(700.0) },
    PriceRange { label: "701-800", min: 701.0, max: Some(800.0) },
    PriceRange { label: "801-900", min: 801.0, max: Some(900.0) },
    PriceRange { label: "901-above", min: 901.0, max: None },
];

/// The number of matching sales in one price bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRangeCount {
    /// The bucket label, e.g. "101-200".
    pub range: &'static str,
    /// The number of matching sales with a price in the bucket.
    pub count: u64,
}

/// The number of matching sales in one product category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    /// The product category.
    pub category: String,
    /// The number of matching sales in the category.
    pub count: u64,
}

/// Count the matching sales per fixed price bucket, in bucket order.
///
/// The ten bucket counts are independent of each other; each one is a
/// separate count against the store.
///
/// # Errors
/// Propagates the first store error; no partial histogram is returned.
pub fn price_histogram<T: TransactionStore>(
    store: &T,
    filter: &TransactionFilter,
) -> Result<Vec<PriceRangeCount>, Error> {
    PRICE_RANGES
        .iter()
        .map(|range| {
            let count = store.count_in_price_range(filter, range.min, range.max)?;

            Ok(PriceRangeCount {
                range: range.label,
                count,
            })
        })
        .collect()
}

/// Count the matching sales per distinct category.
///
/// The categories come from the data; the counts partition the match set.
/// Order is unspecified.
///
/// # Errors
/// Propagates any store error.
pub fn category_histogram<T: TransactionStore>(
    store: &T,
    filter: &TransactionFilter,
) -> Result<Vec<CategoryCount>, Error> {
    store.count_by_category(filter)
}

/// The query parameters accepted by the aggregation endpoints.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct MonthQuery {
    /// Restrict the aggregation to one calendar month (1-12), independent of
    /// year.
    pub month: Option<u8>,
}

/// Handles requests for the price histogram ("bar chart") data.
pub async fn bar_chart_endpoint<T>(
    State(state): State<AppState<T>>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<PriceRangeCount>>, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    let filter = TransactionFilter::new(None, query.month)?;

    let histogram = state
        .run_query(move |store| price_histogram(&store, &filter))
        .await?;

    Ok(Json(histogram))
}

/// Handles requests for the category histogram ("pie chart") data.
pub async fn pie_chart_endpoint<T>(
    State(state): State<AppState<T>>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<CategoryCount>>, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    let filter = TransactionFilter::new(None, query.month)?;

    let histogram = state
        .run_query(move |store| category_histogram(&store, &filter))
        .await?;

    Ok(Json(histogram))
}
