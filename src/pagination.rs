//! This module defines the common functionality for paging query results.

use crate::Error;

/// The config for pagination.
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The number of transactions per page when not specified in a request.
    pub default_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
        }
    }
}

/// A validated page selection.
///
/// Both the page number and page size start at 1. Values below 1 are rejected
/// with an error rather than clamped so that client bugs are not masked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    page: u64,
    per_page: u64,
}

impl PageParams {
    /// Validate a page selection, falling back to the defaults in `config`
    /// for absent values.
    ///
    /// # Errors
    /// Returns [Error::InvalidPageNumber] or [Error::InvalidPageSize] if the
    /// given value is below 1.
    pub fn new(
        page: Option<u64>,
        per_page: Option<u64>,
        config: &PaginationConfig,
    ) -> Result<Self, Error> {
        let page = page.unwrap_or(config.default_page);
        let per_page = per_page.unwrap_or(config.default_page_size);

        if page < 1 {
            return Err(Error::InvalidPageNumber(page));
        }

        if per_page < 1 {
            return Err(Error::InvalidPageSize(per_page));
        }

        Ok(Self { page, per_page })
    }

    /// The number of rows to skip to reach this page.
    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.per_page
    }

    /// The maximum number of rows on this page.
    pub fn limit(&self) -> u64 {
        self.per_page
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, pagination::PaginationConfig};

    use super::PageParams;

    #[test]
    fn uses_defaults_when_absent() {
        let config = PaginationConfig::default();

        let params = PageParams::new(None, None, &config).unwrap();

        assert_eq!(params.offset(), 0);
        assert_eq!(params.limit(), 10);
    }

    #[test]
    fn computes_offset_from_page_number() {
        let config = PaginationConfig::default();

        let params = PageParams::new(Some(3), Some(25), &config).unwrap();

        assert_eq!(params.offset(), 50, "want offset 50, got {}", params.offset());
        assert_eq!(params.limit(), 25);
    }

    #[test]
    fn rejects_page_number_below_one() {
        let config = PaginationConfig::default();

        let result = PageParams::new(Some(0), Some(10), &config);

        assert!(
            matches!(result, Err(Error::InvalidPageNumber(0))),
            "want InvalidPageNumber(0), got {result:?}"
        );
    }

    #[test]
    fn rejects_page_size_below_one() {
        let config = PaginationConfig::default();

        let result = PageParams::new(Some(1), Some(0), &config);

        assert!(
            matches!(result, Err(Error::InvalidPageSize(0))),
            "want InvalidPageSize(0), got {result:?}"
        );
    }
}
