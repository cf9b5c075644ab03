//! Defines the app level error type and its conversion to JSON error responses.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A month outside 1-12 was used in a query.
    ///
    /// Months are calendar month numbers (1 = January), independent of year.
    #[error("month must be between 1 and 12, got {0}")]
    InvalidMonth(u8),

    /// A page number below 1 was used in a query.
    ///
    /// Page numbers start at 1. This is rejected rather than clamped so that
    /// client bugs are not silently masked.
    #[error("page number must be at least 1, got {0}")]
    InvalidPageNumber(u64),

    /// A page size below 1 was used in a query.
    #[error("page size must be at least 1, got {0}")]
    InvalidPageSize(u64),

    /// The external seed data source could not be reached or returned a
    /// non-success status during a reload.
    ///
    /// The existing transaction collection is left untouched.
    #[error("could not fetch seed data: {0}")]
    SourceUnavailable(String),

    /// The external seed data source returned a payload that could not be
    /// parsed as a list of transactions.
    ///
    /// The existing transaction collection is left untouched.
    #[error("could not parse seed data: {0}")]
    SourceFormatInvalid(String),

    /// The transaction store did not answer a query within the configured
    /// timeout, or the query task failed to complete.
    #[error("the transaction store is unavailable: {0}")]
    StoreUnavailable(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(#[from] rusqlite::Error),
}

impl Error {
    /// The machine-readable error kind reported to clients.
    ///
    /// The three argument validation errors share one kind since clients
    /// handle them the same way (fix the request parameters).
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InvalidMonth(_) | Error::InvalidPageNumber(_) | Error::InvalidPageSize(_) => {
                "InvalidArgument"
            }
            Error::SourceUnavailable(_) => "SourceUnavailable",
            Error::SourceFormatInvalid(_) => "SourceFormatInvalid",
            Error::StoreUnavailable(_) => "StoreUnavailable",
            Error::SqlError(_) => "StoreError",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidMonth(_) | Error::InvalidPageNumber(_) | Error::InvalidPageSize(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Error::SourceUnavailable(_) | Error::SourceFormatInvalid(_) => StatusCode::BAD_GATEWAY,
            Error::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::SqlError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            tracing::error!("request failed: {self}");
        }

        let body = Json(json!({
            "error": self.kind(),
            "message": self.to_string(),
        }));

        (status_code, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use super::Error;

    #[test]
    fn argument_errors_are_unprocessable_entity() {
        for error in [
            Error::InvalidMonth(13),
            Error::InvalidPageNumber(0),
            Error::InvalidPageSize(0),
        ] {
            let kind = error.kind();
            let response = error.into_response();

            assert_eq!(
                response.status(),
                StatusCode::UNPROCESSABLE_ENTITY,
                "want 422 for {kind}, got {}",
                response.status()
            );
        }
    }

    #[test]
    fn source_errors_are_bad_gateway() {
        for error in [
            Error::SourceUnavailable("connection refused".to_owned()),
            Error::SourceFormatInvalid("expected an array".to_owned()),
        ] {
            let kind = error.kind();
            let response = error.into_response();

            assert_eq!(
                response.status(),
                StatusCode::BAD_GATEWAY,
                "want 502 for {kind}, got {}",
                response.status()
            );
        }
    }

    #[test]
    fn store_timeout_is_service_unavailable() {
        let response = Error::StoreUnavailable("query timed out".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
