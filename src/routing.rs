//! Application router configuration.

use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    AppState, endpoints,
    transaction::{
        TransactionStore, bar_chart_endpoint, combined_endpoint, initialize_endpoint,
        list_transactions_endpoint, pie_chart_endpoint, statistics_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router<T>(state: AppState<T>) -> Router
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(endpoints::INITIALIZE, post(initialize_endpoint::<T>))
        .route(endpoints::TRANSACTIONS, get(list_transactions_endpoint::<T>))
        .route(endpoints::STATISTICS, get(statistics_endpoint::<T>))
        .route(endpoints::BAR_CHART, get(bar_chart_endpoint::<T>))
        .route(endpoints::PIE_CHART, get(pie_chart_endpoint::<T>))
        .route(endpoints::COMBINED, get(combined_endpoint::<T>))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;

    use crate::{
        build_router,
        transaction::test_utils::{seeded_store, test_state},
    };

    #[tokio::test]
    async fn unknown_routes_are_not_found() {
        let server = TestServer::new(build_router(test_state(seeded_store(Vec::new())))).unwrap();

        let response = server.get("/api/nope").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn chart_routes_answer_with_json() {
        let server = TestServer::new(build_router(test_state(seeded_store(Vec::new())))).unwrap();

        for path in ["/api/bar-chart", "/api/pie-chart", "/api/statistics"] {
            let response = server.get(path).await;

            response.assert_status_ok();
        }
    }
}
