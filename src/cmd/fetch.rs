//! Fetch command - load analytics from the backend and render a report

use super::finish;
use super::report::{KindArg, OutputArgs};
use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Args, ValueEnum};
use hireme_reports::api::HttpAnalyticsClient;
use hireme_reports::core::{DateRange, QuickFilter};
use hireme_reports::page::{FetchOutcome, ReportPage};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PresetArg {
    /// Last 7 days
    Week,
    /// Last 30 days
    Month,
    /// Last 90 days
    Quarter,
    /// Last 365 days
    Year,
}

impl From<PresetArg> for QuickFilter {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Week => QuickFilter::Last7Days,
            PresetArg::Month => QuickFilter::Last30Days,
            PresetArg::Quarter => QuickFilter::Last90Days,
            PresetArg::Year => QuickFilter::LastYear,
        }
    }
}

#[derive(Args, Debug)]
pub struct FetchCommand {
    /// Base URL of the HireMe API (e.g. https://api.hireme.lk/api)
    #[arg(long)]
    api_url: String,

    /// Bearer token of the provider account
    #[arg(long)]
    token: String,

    /// Reporting period counted back from today
    #[arg(short, long, value_enum, conflicts_with_all = ["start", "end"])]
    preset: Option<PresetArg>,

    /// First day of the reporting period (YYYY-MM-DD)
    #[arg(short, long)]
    start: Option<NaiveDate>,

    /// Last day of the reporting period (YYYY-MM-DD, default: today)
    #[arg(short, long)]
    end: Option<NaiveDate>,

    #[command(flatten)]
    output: OutputArgs,
}

impl FetchCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let today = Local::now().date_naive();
        let overrides = self.output.style.overrides()?;
        let mut page = ReportPage::new(self.output.generator(), today);

        if let Some(preset) = self.preset {
            page.apply_quick_filter(preset.into(), today);
        } else if self.start.is_some() || self.end.is_some() {
            let start = self.start.unwrap_or(page.filter().start_date());
            let end = self.end.unwrap_or(today);
            let range = DateRange::new(start, end).context("Invalid reporting period")?;
            page.set_range(range);
        }

        let client = HttpAnalyticsClient::new(&self.api_url, &self.token);
        if page.refresh(&client) != FetchOutcome::Applied {
            anyhow::bail!("Could not load analytics from {}", client.endpoint());
        }

        let document = match self.output.kind {
            KindArg::Full => page.generate_full(Some(&overrides)),
            KindArg::Quick => page.generate_quick(&self.output.quick_type, Some(&overrides)),
            KindArg::Charts => page.generate_charts(Some(&overrides)),
        };
        finish(document, self.output.output.as_deref())
    }
}
