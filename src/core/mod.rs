pub mod analytics;
pub mod format;
pub mod geo;
pub mod range;

// Flat public surface for domain types and functions.
pub use analytics::{AnalyticsPayload, ApiResponse, Series, StatusBreakdown, Summary};
pub use format::{
    format_count, format_currency, format_date, format_percentage, parse_amount, percentage_of,
};
pub use geo::{haversine_km, nearest_city, City, SRI_LANKA_CITIES};
pub use range::{DateRange, QuickFilter};
