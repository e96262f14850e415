//! Dashboard command - on-screen view of an analytics payload

use super::read_payload;
use clap::Args;
use hireme_reports::core::{
    format_count, format_currency, format_percentage, percentage_of, AnalyticsPayload, Series,
    StatusBreakdown,
};
use rust_decimal::Decimal;
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct DashboardCommand {
    /// JSON file containing the analytics payload (or "-" for stdin)
    #[arg(short, long)]
    data: PathBuf,

    /// Output the series as CSV instead of formatted tables
    #[arg(long)]
    csv: bool,
}

impl DashboardCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let payload = read_payload(&self.data)?;
        if self.csv {
            write_csv(&payload, io::stdout())
        } else {
            print_dashboard(&payload);
            Ok(())
        }
    }
}

#[derive(Debug, Clone, Tabled)]
struct KpiRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Debug, Clone, Tabled)]
struct SeriesRow {
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Share")]
    share: String,
}

/// One CSV record per series point.
#[derive(Debug, Serialize)]
struct CsvRecord<'a> {
    series: &'a str,
    label: &'a str,
    value: Decimal,
}

type ValueFormatter = fn(Decimal) -> String;

/// Series shown on the dashboard, with the formatter for their values.
fn dashboard_series(
    payload: &AnalyticsPayload,
) -> Vec<(&'static str, Option<Series>, ValueFormatter)> {
    let currency: ValueFormatter = |v| format_currency(Some(v));
    let count: ValueFormatter = format_count;
    let status = payload
        .success_rate
        .as_ref()
        .map(|s| StatusBreakdown::from_series(s).to_series());
    vec![
        ("Income", payload.income_chart.clone(), currency),
        ("Appointments", payload.appointment_trend.clone(), count),
        ("Appointment Status", status, count),
        ("Services", payload.service_performance.clone(), count),
    ]
}

fn kpi_rows(payload: &AnalyticsPayload) -> Vec<KpiRow> {
    let summary = payload.summary.clone().unwrap_or_default();
    vec![
        KpiRow {
            metric: "Total Income",
            value: format_currency(summary.total_income),
        },
        KpiRow {
            metric: "Total Appointments",
            value: format_count(Decimal::from(summary.total_appointments)),
        },
        KpiRow {
            metric: "Completion Rate",
            value: format_percentage(summary.completion_rate.unwrap_or_default()),
        },
        KpiRow {
            metric: "Active Services",
            value: format_count(Decimal::from(summary.active_services)),
        },
    ]
}

fn series_rows(series: &Series, format_value: ValueFormatter) -> Vec<SeriesRow> {
    let total = series.total();
    series
        .points()
        .map(|(label, value)| SeriesRow {
            label: label.to_string(),
            value: format_value(value),
            share: format_percentage(percentage_of(value, total)),
        })
        .collect()
}

fn print_dashboard(payload: &AnalyticsPayload) {
    let table = Table::new(kpi_rows(payload))
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);

    for (title, series, format_value) in dashboard_series(payload) {
        println!();
        println!("{}", title);
        match series.filter(|s| !s.is_empty()) {
            None => println!("No data available for this period"),
            Some(series) => {
                let table = Table::new(series_rows(&series, format_value))
                    .with(Style::rounded())
                    .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
                    .to_string();
                println!("{}", table);
            }
        }
    }
}

fn write_csv<W: io::Write>(payload: &AnalyticsPayload, writer: W) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for (title, series, _) in dashboard_series(payload) {
        let Some(series) = series else { continue };
        for (label, value) in series.points() {
            wtr.serialize(CsvRecord {
                series: title,
                label,
                value,
            })?;
        }
    }
    wtr.flush()?;
    Ok(())
}
