//! Builds the search/month predicate that all transaction queries share.

use rusqlite::types::Value;
use time::Month;

use crate::Error;

use super::model::Transaction;

/// A predicate over sale transactions, built once per request from the
/// optional search text and month parameters.
///
/// The same filter drives both the SQL rendering used by the SQLite store
/// ([TransactionFilter::sql_conditions]) and the in-memory evaluation used in
/// tests ([TransactionFilter::matches]), so the two cannot drift apart
/// silently.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFilter {
    search: Option<String>,
    month: Option<Month>,
}

impl TransactionFilter {
    /// Build a filter from request parameters.
    ///
    /// An empty search string is treated the same as an absent one. A filter
    /// with neither search text nor month matches every record.
    ///
    /// # Errors
    /// Returns [Error::InvalidMonth] if `month` is outside 1-12. Validation
    /// happens here, before any store access.
    pub fn new(search: Option<String>, month: Option<u8>) -> Result<Self, Error> {
        let month = match month {
            Some(number) => {
                Some(Month::try_from(number).map_err(|_| Error::InvalidMonth(number))?)
            }
            None => None,
        };

        Ok(Self {
            search: search.filter(|text| !text.is_empty()),
            month,
        })
    }

    /// A filter that matches every record.
    pub fn match_all() -> Self {
        Self {
            search: None,
            month: None,
        }
    }

    /// Whether `transaction` satisfies this filter.
    ///
    /// Search text matches when the title or description contains it
    /// case-insensitively, or when the decimal text form of the price
    /// contains it. The price clause is an intentional fuzzy match: a user
    /// typing "100" matches prices 100, 1005 and 2100 alike.
    ///
    /// The month comparison uses the month component of the sale date only,
    /// independent of year.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        let matches_search = match &self.search {
            Some(search) => {
                let needle = search.to_lowercase();

                transaction.title.to_lowercase().contains(&needle)
                    || transaction.description.to_lowercase().contains(&needle)
                    || transaction.price.to_string().contains(search.as_str())
            }
            None => true,
        };

        let matches_month = match self.month {
            Some(month) => transaction.date_of_sale.month() == month,
            None => true,
        };

        matches_search && matches_month
    }

    /// Render this filter as SQL conditions over the `transaction` table.
    ///
    /// Returns the condition strings and their positional parameters. The
    /// placeholders are numbered from `?1`; store queries that add their own
    /// conditions must continue the numbering from the returned parameters.
    ///
    /// The search uses `instr` rather than `LIKE` so that user text
    /// containing `%` or `_` needs no escaping. The price is trimmed of its
    /// trailing `.0` so the text form matches how the price renders to users.
    /// The month is extracted from the date part of the stored RFC 3339 text;
    /// feeding the full timestamp to `strftime` would let SQLite normalise
    /// the UTC offset and shift dates near month boundaries.
    pub(crate) fn sql_conditions(&self) -> (Vec<String>, Vec<Value>) {
        let mut conditions = Vec::new();
        let mut params = Vec::new();

        if let Some(search) = &self.search {
            params.push(Value::Text(search.to_lowercase()));
            let index = params.len();

            conditions.push(format!(
                "(instr(lower(title), ?{index}) > 0 \
                 OR instr(lower(description), ?{index}) > 0 \
                 OR instr(rtrim(rtrim(CAST(price AS TEXT), '0'), '.'), ?{index}) > 0)"
            ));
        }

        if let Some(month) = self.month {
            params.push(Value::Integer(u8::from(month) as i64));
            let index = params.len();

            conditions.push(format!(
                "CAST(strftime('%m', substr(date_of_sale, 1, 10)) AS INTEGER) = ?{index}"
            ));
        }

        (conditions, params)
    }
}

#[cfg(test)]
mod tests {
    use time::{Month, macros::datetime};

    use crate::Error;

    use super::{Transaction, TransactionFilter};

    fn sample_transaction() -> Transaction {
        Transaction {
            id: 1,
            title: "Mechanical Keyboard".to_owned(),
            description: "Clacky keys for late nights".to_owned(),
            price: 1050.0,
            date_of_sale: datetime!(2021-06-15 12:00:00 UTC),
            category: "electronics".to_owned(),
            sold: true,
        }
    }

    #[test]
    fn rejects_month_outside_range() {
        for month in [0, 13, 255] {
            let result = TransactionFilter::new(None, Some(month));

            assert!(
                matches!(result, Err(Error::InvalidMonth(m)) if m == month),
                "want InvalidMonth({month}), got {result:?}"
            );
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = TransactionFilter::new(Some(String::new()), None).unwrap();

        assert_eq!(filter, TransactionFilter::match_all());
        assert!(filter.matches(&sample_transaction()));
    }

    #[test]
    fn search_matches_title_case_insensitively() {
        let filter = TransactionFilter::new(Some("KEYBOARD".to_owned()), None).unwrap();

        assert!(filter.matches(&sample_transaction()));
    }

    #[test]
    fn search_matches_description_substring() {
        let filter = TransactionFilter::new(Some("late night".to_owned()), None).unwrap();

        assert!(filter.matches(&sample_transaction()));
    }

    #[test]
    fn search_matches_price_as_text_substring() {
        // 1050 contains "105", so the fuzzy price match applies.
        let filter = TransactionFilter::new(Some("105".to_owned()), None).unwrap();

        assert!(filter.matches(&sample_transaction()));
    }

    #[test]
    fn search_rejects_unrelated_text() {
        let filter = TransactionFilter::new(Some("toaster".to_owned()), None).unwrap();

        assert!(!filter.matches(&sample_transaction()));
    }

    #[test]
    fn month_filter_is_independent_of_year() {
        let filter = TransactionFilter::new(None, Some(6)).unwrap();

        let mut transaction = sample_transaction();
        assert!(filter.matches(&transaction));

        transaction.date_of_sale = datetime!(1997-06-15 12:00:00 UTC);
        assert!(
            filter.matches(&transaction),
            "want June of any year to match month=6"
        );
    }

    #[test]
    fn month_filter_rejects_other_months() {
        let transaction = sample_transaction();

        for month in 1..=12u8 {
            let filter = TransactionFilter::new(None, Some(month)).unwrap();
            let want = month == 6;

            assert_eq!(
                filter.matches(&transaction),
                want,
                "want matches == {want} for month {month}"
            );
        }
    }

    #[test]
    fn search_and_month_must_both_hold() {
        let filter = TransactionFilter::new(Some("keyboard".to_owned()), Some(7)).unwrap();

        assert!(
            !filter.matches(&sample_transaction()),
            "want no match when the month differs even though the search matches"
        );
    }

    #[test]
    fn sql_conditions_numbers_placeholders_in_order() {
        let filter = TransactionFilter::new(Some("mouse".to_owned()), Some(2)).unwrap();

        let (conditions, params) = filter.sql_conditions();

        assert_eq!(conditions.len(), 2);
        assert_eq!(params.len(), 2);
        assert!(conditions[0].contains("?1"), "got {:?}", conditions[0]);
        assert!(conditions[1].contains("?2"), "got {:?}", conditions[1]);
    }

    #[test]
    fn month_parses_to_calendar_month() {
        let filter = TransactionFilter::new(None, Some(1)).unwrap();

        assert_eq!(filter.month, Some(Month::January));
    }
}
