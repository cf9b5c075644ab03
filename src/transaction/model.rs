//! Defines the core data models for sale transactions.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A single product sale record.
///
/// Records are immutable once stored; the collection is only ever changed by
/// replacing it wholesale from the external seed source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction, assigned by the store.
    pub id: i64,
    /// The name of the product that was sold.
    pub title: String,
    /// A text description of the product.
    pub description: String,
    /// The sale price. Never negative.
    pub price: f64,
    /// When the sale happened.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
    /// The product category, e.g. "electronics". Low cardinality.
    pub category: String,
    /// Whether the product was actually sold.
    pub sold: bool,
}

/// A sale record as received from the external seed source, before the store
/// has assigned it an ID.
///
/// Unknown fields in the source payload (e.g. image URLs) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    /// The name of the product that was sold.
    pub title: String,
    /// A text description of the product.
    pub description: String,
    /// The sale price.
    pub price: f64,
    /// When the sale happened.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
    /// The product category.
    pub category: String,
    /// Whether the product was actually sold.
    pub sold: bool,
}
