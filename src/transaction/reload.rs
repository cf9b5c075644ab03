//! Bulk loading of the transaction collection from the external seed source.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::{Error, state::AppState};

use super::{model::NewTransaction, store::TransactionStore};

/// The result of a successful bulk reload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReloadSummary {
    /// The number of transactions now in the collection.
    pub loaded: usize,
}

/// Fetch and parse the seed transactions from `source_url`.
///
/// The payload must be a JSON array of transaction records; unknown fields
/// are ignored.
///
/// # Errors
/// Returns [Error::SourceUnavailable] if the source cannot be reached or
/// answers with a non-success status, and [Error::SourceFormatInvalid] if
/// the payload cannot be parsed. Neither touches the store.
pub async fn fetch_seed_transactions(source_url: &str) -> Result<Vec<NewTransaction>, Error> {
    let response = reqwest::get(source_url)
        .await
        .map_err(|error| Error::SourceUnavailable(error.to_string()))?
        .error_for_status()
        .map_err(|error| Error::SourceUnavailable(error.to_string()))?;

    let body = response
        .text()
        .await
        .map_err(|error| Error::SourceUnavailable(error.to_string()))?;

    parse_seed_transactions(&body)
}

/// Parse a seed payload into transaction records.
///
/// # Errors
/// Returns [Error::SourceFormatInvalid] if `body` is not a JSON array of
/// transaction records.
pub fn parse_seed_transactions(body: &str) -> Result<Vec<NewTransaction>, Error> {
    serde_json::from_str(body).map_err(|error| Error::SourceFormatInvalid(error.to_string()))
}

/// Handles requests to replace the transaction collection with fresh seed
/// data.
///
/// The fetch and parse happen before any write, so a failing source leaves
/// the existing collection untouched. The swap itself is atomic.
pub async fn initialize_endpoint<T>(
    State(state): State<AppState<T>>,
) -> Result<Json<ReloadSummary>, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    let records = fetch_seed_transactions(&state.source_url).await?;

    let loaded = state
        .run_query(move |store| store.replace_all(records))
        .await?;

    tracing::info!("replaced the transaction collection with {loaded} seed records");

    Ok(Json(ReloadSummary { loaded }))
}
