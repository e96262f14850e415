//! Printable analytics reports for the HireMe service marketplace.
//!
//! Analytics payloads are rendered into standalone HTML documents and handed to a browser window
//! for printing. The pieces are layered leaf to root: [`core`] formatting and data model,
//! [`report`] templates and the orchestrating [`report::ReportGenerator`], and [`page`] which owns
//! filter state and backend fetches.

pub mod api;
pub mod core;
pub mod error;
pub mod page;
pub mod report;

pub use error::{ReportError, Result};
