//! The API endpoint URIs.

/// The route that replaces the transaction collection with fresh seed data.
pub const INITIALIZE: &str = "/api/initialize";
/// The route for the searchable, paginated transaction listing.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route for the aggregate sales statistics.
pub const STATISTICS: &str = "/api/statistics";
/// The route for the price histogram data.
pub const BAR_CHART: &str = "/api/bar-chart";
/// The route for the category histogram data.
pub const PIE_CHART: &str = "/api/pie-chart";
/// The route for the combined dashboard data.
pub const COMBINED: &str = "/api/combined";
