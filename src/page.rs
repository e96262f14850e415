//! Report page state: the active date filter, loaded analytics and the report actions.

use crate::api::{AnalyticsSource, FetchError};
use crate::core::{AnalyticsPayload, DateRange, QuickFilter};
use crate::report::{
    Browser, GeneratedDocument, Notifier, ReportGenerator, ReportOverrides,
    DATA_NOT_READY_MESSAGE,
};
use chrono::NaiveDate;

/// Days covered by the filter when the page first loads.
pub const DEFAULT_FILTER_DAYS: u32 = 30;

pub const DATA_LOADING_MESSAGE: &str =
    "Analytics data is still loading. Please wait for the data to load.";

/// Identifies one fetch. Only the most recently issued ticket may update the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    range: DateRange,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn range(&self) -> &DateRange {
        &self.range
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    Failed,
    /// A newer fetch was issued after this one; the response was dropped.
    Stale,
}

pub struct ReportPage<B, N> {
    generator: ReportGenerator<B, N>,
    filter: DateRange,
    /// Last applied payload with the range it was fetched for.
    loaded: Option<(DateRange, AnalyticsPayload)>,
    loading: bool,
    latest_seq: u64,
}

impl<B: Browser, N: Notifier> ReportPage<B, N> {
    pub fn new(generator: ReportGenerator<B, N>, today: NaiveDate) -> Self {
        Self {
            generator,
            filter: DateRange::last_days(DEFAULT_FILTER_DAYS, today),
            loaded: None,
            loading: false,
            latest_seq: 0,
        }
    }

    pub fn filter(&self) -> &DateRange {
        &self.filter
    }

    pub fn data(&self) -> Option<&AnalyticsPayload> {
        self.loaded.as_ref().map(|(_, payload)| payload)
    }

    /// Range the loaded data covers. Differs from `filter()` until the next fetch completes.
    pub fn loaded_range(&self) -> Option<&DateRange> {
        self.loaded.as_ref().map(|(range, _)| range)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn generator(&self) -> &ReportGenerator<B, N> {
        &self.generator
    }

    /// Report buttons are usable only once data is loaded and no fetch is running.
    pub fn actions_enabled(&self) -> bool {
        !self.loading && self.loaded.is_some()
    }

    /// Mark a fetch for the current filter as in flight.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest_seq += 1;
        self.loading = true;
        FetchTicket {
            seq: self.latest_seq,
            range: self.filter,
        }
    }

    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<AnalyticsPayload, FetchError>,
    ) -> FetchOutcome {
        if ticket.seq != self.latest_seq {
            log::warn!(
                "Discarding stale analytics response #{} for {} (latest is #{})",
                ticket.seq,
                ticket.range,
                self.latest_seq
            );
            return FetchOutcome::Stale;
        }
        self.loading = false;
        match result {
            Ok(payload) => {
                log::info!("Loaded analytics for {}", ticket.range);
                self.loaded = Some((ticket.range, payload));
                FetchOutcome::Applied
            }
            Err(err) => {
                log::error!("Error fetching analytics for {}: {}", ticket.range, err);
                self.generator
                    .notifier()
                    .alert(&format!("Failed to load analytics: {}", err));
                FetchOutcome::Failed
            }
        }
    }

    /// Fetch analytics for the current filter and apply the result.
    pub fn refresh<S: AnalyticsSource>(&mut self, source: &S) -> FetchOutcome {
        let ticket = self.begin_fetch();
        let result = source.fetch(ticket.range());
        self.complete_fetch(ticket, result)
    }

    pub fn apply_quick_filter(&mut self, filter: QuickFilter, today: NaiveDate) {
        self.filter = filter.range(today);
        log::debug!("Filter set to {}", self.filter);
    }

    /// Move the start boundary. Returns false, alerting the user, if it would pass the end date.
    pub fn set_start_date(&mut self, start_date: NaiveDate) -> bool {
        let result = self.filter.with_start(start_date);
        self.apply_range(result)
    }

    /// Move the end boundary. Returns false, alerting the user, if it would precede the start.
    pub fn set_end_date(&mut self, end_date: NaiveDate) -> bool {
        let result = self.filter.with_end(end_date);
        self.apply_range(result)
    }

    pub fn set_range(&mut self, range: DateRange) {
        self.filter = range;
    }

    fn apply_range(&mut self, result: crate::Result<DateRange>) -> bool {
        match result {
            Ok(range) => {
                self.filter = range;
                true
            }
            Err(err) => {
                log::warn!("Rejected filter change: {}", err);
                self.generator.notifier().alert(&err.to_string());
                false
            }
        }
    }

    pub fn generate_full(
        &mut self,
        overrides: Option<&ReportOverrides>,
    ) -> Option<GeneratedDocument<B::Window>> {
        self.with_data(|generator, data, range| {
            generator.generate_full_report(Some(data), range, overrides)
        })
    }

    pub fn generate_quick(
        &mut self,
        report_type: &str,
        overrides: Option<&ReportOverrides>,
    ) -> Option<GeneratedDocument<B::Window>> {
        self.with_data(|generator, data, range| {
            generator.generate_quick_report(Some(data), range, report_type, overrides)
        })
    }

    pub fn generate_charts(
        &mut self,
        overrides: Option<&ReportOverrides>,
    ) -> Option<GeneratedDocument<B::Window>> {
        self.with_data(|generator, data, range| {
            generator.generate_charts_report(Some(data), range, overrides)
        })
    }

    fn with_data<F>(&mut self, render: F) -> Option<GeneratedDocument<B::Window>>
    where
        F: FnOnce(
            &mut ReportGenerator<B, N>,
            &AnalyticsPayload,
            &DateRange,
        ) -> Option<GeneratedDocument<B::Window>>,
    {
        if self.loading {
            log::warn!("Report requested while analytics for {} are loading", self.filter);
            self.generator.notifier().alert(DATA_LOADING_MESSAGE);
            return None;
        }
        let Some((range, data)) = self.loaded.as_ref() else {
            log::error!("Report requested before analytics were loaded");
            self.generator.notifier().alert(DATA_NOT_READY_MESSAGE);
            return None;
        };
        render(&mut self.generator, data, range)
    }
}
