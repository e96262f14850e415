//! Report orchestration: render a document and show it in a new window.

use super::config::{QuickReportKind, ReportConfig, ReportOverrides};
use super::document::{self, ReportKind};
use super::window::{Browser, Notifier, ReportWindow};
use crate::core::{AnalyticsPayload, DateRange};
use crate::error::Result;
use chrono::{Local, NaiveDateTime};
use std::thread;
use std::time::Duration;

/// Delay between the two focus calls made after a document is written.
///
/// The host page can steal focus back right after the popup opens; the second, delayed focus
/// puts the report in front again.
pub const FOCUS_RETRY_DELAY: Duration = Duration::from_millis(100);

pub const DATA_NOT_READY_MESSAGE: &str =
    "Analytics data is not loaded yet. Please wait for the data to load.";
pub const POPUP_BLOCKED_MESSAGE: &str =
    "Unable to open the report window. Please check your popup blocker settings.";

/// A rendered report and the window it was written into.
#[derive(Debug)]
pub struct GeneratedDocument<W> {
    pub kind: ReportKind,
    pub html: String,
    pub window: W,
}

pub struct ReportGenerator<B, N> {
    browser: B,
    notifier: N,
    defaults: ReportConfig,
    generated_at: Option<NaiveDateTime>,
}

impl<B: Browser, N: Notifier> ReportGenerator<B, N> {
    pub fn new(browser: B, notifier: N) -> Self {
        Self {
            browser,
            notifier,
            defaults: ReportConfig::default(),
            generated_at: None,
        }
    }

    /// Stamp every report with `at` instead of the current time.
    pub fn with_timestamp(mut self, at: NaiveDateTime) -> Self {
        self.generated_at = Some(at);
        self
    }

    pub fn browser(&self) -> &B {
        &self.browser
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Render every section enabled after applying `overrides` to the default config.
    ///
    /// Failures are logged and shown to the user; `None` is returned and nothing escapes to the
    /// caller.
    pub fn generate_full_report(
        &mut self,
        data: Option<&AnalyticsPayload>,
        range: &DateRange,
        overrides: Option<&ReportOverrides>,
    ) -> Option<GeneratedDocument<B::Window>> {
        self.generate(ReportKind::Full, data, range, overrides)
    }

    /// A shorter report using a named preset; unknown names use the summary preset.
    ///
    /// Styling overrides are honoured, but the preset decides the sections.
    pub fn generate_quick_report(
        &mut self,
        data: Option<&AnalyticsPayload>,
        range: &DateRange,
        report_type: &str,
        overrides: Option<&ReportOverrides>,
    ) -> Option<GeneratedDocument<B::Window>> {
        let kind = QuickReportKind::from_name(report_type);
        let overrides = overrides
            .cloned()
            .unwrap_or_default()
            .with_sections(kind.sections());
        self.generate(ReportKind::Quick(kind), data, range, Some(&overrides))
    }

    /// The four chart placeholders in a fixed grid.
    pub fn generate_charts_report(
        &mut self,
        data: Option<&AnalyticsPayload>,
        range: &DateRange,
        overrides: Option<&ReportOverrides>,
    ) -> Option<GeneratedDocument<B::Window>> {
        self.generate(ReportKind::Charts, data, range, overrides)
    }

    fn generate(
        &mut self,
        kind: ReportKind,
        data: Option<&AnalyticsPayload>,
        range: &DateRange,
        overrides: Option<&ReportOverrides>,
    ) -> Option<GeneratedDocument<B::Window>> {
        let Some(data) = data else {
            log::error!("Cannot generate {}: no analytics data", kind);
            self.notifier.alert(DATA_NOT_READY_MESSAGE);
            return None;
        };

        let config = match overrides {
            Some(overrides) => self.defaults.merged(overrides),
            None => self.defaults.clone(),
        };

        let Some(mut window) = self.browser.open_window(kind.slug()) else {
            log::error!("Cannot generate {}: report window was blocked", kind);
            self.notifier.alert(POPUP_BLOCKED_MESSAGE);
            return None;
        };

        match self.write_document(&mut window, kind, data, range, &config) {
            Ok(html) => {
                log::info!("Generated {} for {} ({} bytes)", kind, range, html.len());
                Some(GeneratedDocument { kind, html, window })
            }
            Err(err) => {
                log::error!("Failed to generate {}: {}", kind, err);
                self.notifier
                    .alert(&format!("Failed to generate the report: {}", err));
                None
            }
        }
    }

    fn write_document(
        &self,
        window: &mut B::Window,
        kind: ReportKind,
        data: &AnalyticsPayload,
        range: &DateRange,
        config: &ReportConfig,
    ) -> Result<String> {
        let generated_at = self
            .generated_at
            .unwrap_or_else(|| Local::now().naive_local());
        let document = match kind {
            ReportKind::Charts => document::charts_document(data, range, config, generated_at),
            ReportKind::Full | ReportKind::Quick(_) => {
                document::tabular_document(kind, data, range, config, generated_at)
            }
        };
        let html = document.render();

        window.write(&html)?;
        window.close_document()?;
        window.focus()?;
        thread::sleep(FOCUS_RETRY_DELAY);
        window.focus()?;
        Ok(html)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::core::Series;
    use crate::report::config::{SectionFlags, SectionOverrides};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
        )
        .unwrap()
    }

    fn payload() -> AnalyticsPayload {
        AnalyticsPayload {
            income_chart: Some(Series::new(["Jan", "Feb"], vec![dec!(1000), dec!(1500)])),
            appointment_trend: Some(Series::new(["Jan", "Feb"], vec![dec!(10), dec!(12)])),
            success_rate: Some(Series::new(
                ["Completed", "Cancelled", "In Progress", "Pending"],
                vec![dec!(15), dec!(3), dec!(2), dec!(2)],
            )),
            ..Default::default()
        }
    }

    fn generator() -> ReportGenerator<RecordingBrowser, RecordingNotifier> {
        let at = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        ReportGenerator::new(RecordingBrowser::default(), RecordingNotifier::default())
            .with_timestamp(at)
    }

    #[test]
    fn missing_data_is_a_no_op() {
        let mut gen = generator();
        assert!(gen.generate_full_report(None, &range(), None).is_none());
        assert!(gen.browser().opened.is_empty());
        assert_eq!(
            *gen.notifier().alerts.borrow(),
            vec![DATA_NOT_READY_MESSAGE.to_string()]
        );
    }

    #[test]
    fn blocked_popup_alerts_user() {
        let mut gen = generator();
        gen.browser.blocked = true;
        let data = payload();
        assert!(gen.generate_full_report(Some(&data), &range(), None).is_none());
        assert_eq!(
            *gen.notifier().alerts.borrow(),
            vec![POPUP_BLOCKED_MESSAGE.to_string()]
        );
    }

    #[test]
    fn full_report_written_closed_and_focused_twice() {
        let mut gen = generator();
        let data = payload();
        let doc = gen.generate_full_report(Some(&data), &range(), None).unwrap();

        let log = gen.browser().windows[0].borrow();
        assert_eq!(log.written, doc.html);
        assert!(log.closed);
        assert_eq!(log.focus_calls.len(), 2);
        assert!(log.focus_calls[1] - log.focus_calls[0] >= FOCUS_RETRY_DELAY);
        assert!(doc.html.contains("LKR 2,500.00"));
        assert!(gen.notifier().alerts.borrow().is_empty());
    }

    #[test]
    fn write_failure_is_caught_and_alerted() {
        let mut gen = generator();
        gen.browser.fail_writes = true;
        let data = payload();
        assert!(gen.generate_full_report(Some(&data), &range(), None).is_none());
        let alerts = gen.notifier().alerts.borrow();
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].starts_with("Failed to generate the report"));
    }

    #[test]
    fn overrides_toggle_sections() {
        let mut gen = generator();
        let data = payload();
        let overrides = ReportOverrides {
            sections: Some(SectionOverrides {
                income_analysis: Some(false),
                ..Default::default()
            }),
            ..Default::default()
        };
        let doc = gen
            .generate_full_report(Some(&data), &range(), Some(&overrides))
            .unwrap();
        assert!(!doc.html.contains("Income Analysis"));
        assert!(doc.html.contains("Appointment Analysis"));
    }

    #[test]
    fn bogus_quick_type_matches_summary() {
        let data = payload();
        let mut gen = generator();
        let bogus = gen
            .generate_quick_report(Some(&data), &range(), "bogus-type", None)
            .unwrap();
        let summary = gen
            .generate_quick_report(Some(&data), &range(), "summary", None)
            .unwrap();
        assert_eq!(bogus.html, summary.html);
        assert_eq!(bogus.kind, summary.kind);
        assert_eq!(gen.browser().opened, vec!["summary", "summary"]);
    }

    #[test]
    fn quick_income_report_has_one_analysis_section() {
        let data = payload();
        let mut gen = generator();
        let doc = gen
            .generate_quick_report(Some(&data), &range(), "income", None)
            .unwrap();
        assert!(doc.html.contains("Income Analysis"));
        assert!(!doc.html.contains("Appointment Analysis"));
        assert!(!doc.html.contains("Service Performance"));
        assert!(doc.html.contains("Income Report"));
    }

    #[test]
    fn charts_report_ignores_sections() {
        let data = payload();
        let mut gen = generator();
        let overrides = ReportOverrides::default().with_sections(SectionFlags::NONE);
        let doc = gen
            .generate_charts_report(Some(&data), &range(), Some(&overrides))
            .unwrap();
        assert!(doc.html.contains(r#"class="charts-grid""#));
        assert_eq!(doc.html.matches(r#"class="chart-card""#).count(), 4);
        assert!(doc.html.contains("window.print()"));
        assert!(!doc.html.contains("<table>"));
        assert_eq!(gen.browser().opened, vec!["charts"]);
    }

    #[test]
    fn zero_status_total_omits_breakdown() {
        let mut data = payload();
        data.success_rate = Some(Series::new(
            ["Completed", "Cancelled", "In Progress", "Pending"],
            vec![dec!(0); 4],
        ));
        let mut gen = generator();
        let doc = gen.generate_full_report(Some(&data), &range(), None).unwrap();
        assert!(!doc.html.contains("status-breakdown"));
        assert!(!doc.html.contains("NaN"));
    }
}
