//! Report command - render a printable report from an analytics file

use super::{finish, read_payload, StyleArgs};
use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use hireme_reports::core::{AnalyticsPayload, DateRange};
use hireme_reports::report::{
    FileWindow, GeneratedDocument, ReportGenerator, ReportOverrides, SystemBrowser,
    TerminalNotifier,
};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Every enabled section
    #[default]
    Full,
    /// A named preset (see --quick-type)
    Quick,
    /// The four charts in a grid
    Charts,
}

/// Which report to render and where to put it.
#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Type of report to generate
    #[arg(short, long, value_enum, default_value_t = KindArg::Full)]
    pub kind: KindArg,

    /// Preset for quick reports: summary, income, appointments or services
    #[arg(short, long, default_value = "summary")]
    pub quick_type: String,

    /// Output file path (default: opens in browser)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub style: StyleArgs,
}

impl OutputArgs {
    pub fn generator(&self) -> ReportGenerator<SystemBrowser, TerminalNotifier> {
        let browser = match &self.output {
            Some(path) => SystemBrowser::to_file(path),
            None => SystemBrowser::new(),
        };
        ReportGenerator::new(browser, TerminalNotifier)
    }
}

#[derive(Args, Debug)]
pub struct ReportCommand {
    /// JSON file containing the analytics payload (or "-" for stdin)
    #[arg(short, long)]
    data: PathBuf,

    /// First day of the reporting period (YYYY-MM-DD)
    #[arg(short, long)]
    start: NaiveDate,

    /// Last day of the reporting period (YYYY-MM-DD)
    #[arg(short, long)]
    end: NaiveDate,

    #[command(flatten)]
    output: OutputArgs,
}

impl ReportCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let range = DateRange::new(self.start, self.end).context("Invalid reporting period")?;
        let payload = read_payload(&self.data)?;
        let overrides = self.output.style.overrides()?;

        let mut generator = self.output.generator();
        let document = render(&mut generator, &self.output, &payload, &range, &overrides);
        finish(document, self.output.output.as_deref())
    }
}

fn render(
    generator: &mut ReportGenerator<SystemBrowser, TerminalNotifier>,
    args: &OutputArgs,
    payload: &AnalyticsPayload,
    range: &DateRange,
    overrides: &ReportOverrides,
) -> Option<GeneratedDocument<FileWindow>> {
    match args.kind {
        KindArg::Full => generator.generate_full_report(Some(payload), range, Some(overrides)),
        KindArg::Quick => generator.generate_quick_report(
            Some(payload),
            range,
            &args.quick_type,
            Some(overrides),
        ),
        KindArg::Charts => generator.generate_charts_report(Some(payload), range, Some(overrides)),
    }
}
