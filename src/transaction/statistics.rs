//! The aggregate sales statistics for a filter.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Serialize;

use crate::{Error, state::AppState};

use super::{filter::TransactionFilter, histogram::MonthQuery, store::TransactionStore};

/// Aggregate sales figures over the transactions matching a filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// The sum of the sale price over all matching transactions. Zero when
    /// nothing matches, never absent.
    pub total_sale_amount: f64,
    /// The number of matching transactions that were sold.
    pub total_sold_items: u64,
    /// The number of matching transactions that were not sold.
    pub total_not_sold_items: u64,
}

/// Compute the sales statistics for the transactions matching `filter`.
///
/// Since every record carries a sold flag, the sold and not-sold counts
/// always sum to the match count.
///
/// # Errors
/// Propagates the first store error; partial statistics are never returned.
pub fn sale_statistics<T: TransactionStore>(
    store: &T,
    filter: &TransactionFilter,
) -> Result<Statistics, Error> {
    Ok(Statistics {
        total_sale_amount: store.sum_price(filter)?,
        total_sold_items: store.count_sold(filter, true)?,
        total_not_sold_items: store.count_sold(filter, false)?,
    })
}

/// Handles requests for the sales statistics of a month.
pub async fn statistics_endpoint<T>(
    State(state): State<AppState<T>>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Statistics>, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    let filter = TransactionFilter::new(None, query.month)?;

    let statistics = state
        .run_query(move |store| sale_statistics(&store, &filter))
        .await?;

    Ok(Json(statistics))
}

#[cfg(test)]
mod tests {
    use crate::transaction::{
        TransactionFilter, TransactionStore,
        test_utils::{example_records, seeded_store},
    };

    use super::{Statistics, sale_statistics};

    #[test]
    fn example_scenario_for_january() {
        let store = seeded_store(example_records());
        let filter = TransactionFilter::new(None, Some(1)).unwrap();

        let statistics = sale_statistics(&store, &filter).unwrap();

        assert_eq!(
            statistics,
            Statistics {
                total_sale_amount: 200.0,
                total_sold_items: 1,
                total_not_sold_items: 1,
            }
        );
    }

    #[test]
    fn sold_and_not_sold_sum_to_match_count() {
        let store = seeded_store(example_records());

        for month in [None, Some(1), Some(2), Some(3)] {
            let filter = TransactionFilter::new(None, month).unwrap();

            let statistics = sale_statistics(&store, &filter).unwrap();
            let match_count = store.count(&filter).unwrap();

            assert_eq!(
                statistics.total_sold_items + statistics.total_not_sold_items,
                match_count,
                "want sold + not sold == match count for month {month:?}"
            );
        }
    }

    #[test]
    fn statistics_are_zero_when_nothing_matches() {
        let store = seeded_store(example_records());
        let filter = TransactionFilter::new(None, Some(12)).unwrap();

        let statistics = sale_statistics(&store, &filter).unwrap();

        assert_eq!(
            statistics,
            Statistics {
                total_sale_amount: 0.0,
                total_sold_items: 0,
                total_not_sold_items: 0,
            }
        );
    }

    #[test]
    fn statistics_serialize_with_camel_case_keys() {
        let statistics = Statistics {
            total_sale_amount: 200.0,
            total_sold_items: 1,
            total_not_sold_items: 1,
        };

        let json = serde_json::to_value(&statistics).unwrap();

        assert_eq!(json["totalSaleAmount"], 200.0);
        assert_eq!(json["totalSoldItems"], 1);
        assert_eq!(json["totalNotSoldItems"], 1);
    }
}
