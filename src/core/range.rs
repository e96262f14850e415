use super::format::format_long_date;
use crate::error::{ReportError, Result};
use chrono::{Duration, NaiveDate};
use std::fmt;

/// Inclusive calendar date range. `start_date <= end_date` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl DateRange {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self> {
        if start_date > end_date {
            return Err(ReportError::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// The `days` days leading up to and including `today`.
    pub fn last_days(days: u32, today: NaiveDate) -> Self {
        let start_date = today
            .checked_sub_signed(Duration::days(i64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        Self {
            start_date,
            end_date: today,
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn with_start(&self, start_date: NaiveDate) -> Result<Self> {
        Self::new(start_date, self.end_date)
    }

    pub fn with_end(&self, end_date: NaiveDate) -> Result<Self> {
        Self::new(self.start_date, end_date)
    }

    /// ISO formatted `(start_date, end_date)` for query strings.
    pub fn query_params(&self) -> (String, String) {
        (
            self.start_date.format("%Y-%m-%d").to_string(),
            self.end_date.format("%Y-%m-%d").to_string(),
        )
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            format_long_date(self.start_date),
            format_long_date(self.end_date)
        )
    }
}

/// Fixed "last N days" filter presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickFilter {
    Last7Days,
    Last30Days,
    Last90Days,
    LastYear,
}

impl QuickFilter {
    pub const ALL: [QuickFilter; 4] = [
        QuickFilter::Last7Days,
        QuickFilter::Last30Days,
        QuickFilter::Last90Days,
        QuickFilter::LastYear,
    ];

    pub fn days(self) -> u32 {
        match self {
            QuickFilter::Last7Days => 7,
            QuickFilter::Last30Days => 30,
            QuickFilter::Last90Days => 90,
            QuickFilter::LastYear => 365,
        }
    }

    pub fn range(self, today: NaiveDate) -> DateRange {
        DateRange::last_days(self.days(), today)
    }
}
