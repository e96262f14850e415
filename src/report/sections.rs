//! Template generators, one per report section.
//!
//! Each generator takes the slice of analytics it renders and returns a [`Node`]. A series with
//! no labels always renders the [`no_data`] notice in place of a table.

use super::charts;
use super::config::ReportConfig;
use super::html::{el, Element, Node};
use crate::core::{
    format_count, format_currency, format_percentage, percentage_of, AnalyticsPayload, DateRange,
    Series, StatusBreakdown, Summary,
};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

pub const NO_DATA_MESSAGE: &str = "No data available for this period";

pub fn no_data() -> Node {
    el("div")
        .class("no-data")
        .child(el("p").text(NO_DATA_MESSAGE))
        .into()
}

fn section(class: &str, title: &str) -> Element {
    el("section")
        .class(format!("section {class}"))
        .child(el("h2").class("section-title").text(title))
}

pub fn header(
    config: &ReportConfig,
    range: &DateRange,
    title: &str,
    generated_at: NaiveDateTime,
) -> Node {
    el("header")
        .class("section report-header")
        .child(el("div").class("company-name").text(&config.company_name))
        .child(el("div").class("report-title").text(title))
        .child(
            el("div")
                .class("report-meta")
                .child(el("span").class("report-period").text(format!("Period: {range}")))
                .child(el("br"))
                .child(el("span").class("report-generated").text(format!(
                    "Generated: {}",
                    generated_at.format("%B %-d, %Y %H:%M")
                ))),
        )
        .into()
}

pub fn summary(summary: Option<&Summary>) -> Node {
    let body = match summary {
        None => no_data(),
        Some(s) => el("div")
            .class("summary-cards")
            .child(card("Total Income", format_currency(s.total_income)))
            .child(card(
                "Total Appointments",
                format_count(Decimal::from(s.total_appointments)),
            ))
            .child(card(
                "Completion Rate",
                format_percentage(s.completion_rate.unwrap_or_default()),
            ))
            .child(card(
                "Active Services",
                format_count(Decimal::from(s.active_services)),
            ))
            .into(),
    };
    section("summary", "Summary").child(body).into()
}

fn card(title: &str, value: String) -> Element {
    el("div")
        .class("card")
        .child(el("h3").text(title))
        .child(el("p").class("value").text(value))
}

pub fn income_analysis(income: Option<&Series>) -> Node {
    let body = match income.filter(|s| !s.is_empty()) {
        None => no_data(),
        Some(series) => series_table(series, "Period", "Amount", |v| format_currency(Some(v))),
    };
    section("income-analysis", "Income Analysis")
        .child(body)
        .into()
}

pub fn appointment_analysis(trend: Option<&Series>, success_rate: Option<&Series>) -> Node {
    let body = match trend.filter(|s| !s.is_empty()) {
        None => no_data(),
        Some(series) => series_table(series, "Period", "Appointments", format_count),
    };
    let mut section = section("appointment-analysis", "Appointment Analysis").child(body);
    if let Some(breakdown) = success_rate.map(StatusBreakdown::from_series) {
        if let Some(node) = status_breakdown(&breakdown) {
            section = section.child(node);
        }
    }
    section.into()
}

/// Count and share of each status. Returns `None` when there are no appointments at all,
/// which omits the subsection entirely.
pub fn status_breakdown(breakdown: &StatusBreakdown) -> Option<Node> {
    let total = breakdown.total();
    if total <= Decimal::ZERO {
        return None;
    }
    let rows = breakdown.categories().into_iter().map(|(label, value)| {
        let share = percentage_of(value, total);
        el("div")
            .class("status-row")
            .child(el("span").class("status-label").text(label))
            .child(
                el("div").class("status-bar").child(
                    el("div")
                        .class("status-bar-fill")
                        .style(format!("width: {share}%")),
                ),
            )
            .child(el("span").class("status-count").text(format_count(value)))
            .child(
                el("span")
                    .class("status-percentage")
                    .text(format_percentage(share)),
            )
    });
    Some(
        el("div")
            .class("status-breakdown")
            .child(el("h3").text("Appointment Status"))
            .children(rows)
            .into(),
    )
}

pub fn service_performance(services: Option<&Series>) -> Node {
    let body = match services.filter(|s| !s.is_empty()) {
        None => no_data(),
        Some(series) => {
            let total = series.total();
            let rows = series.points().map(|(name, bookings)| {
                el("tr")
                    .class("data-row")
                    .child(el("td").text(name))
                    .child(el("td").class("number").text(format_count(bookings)))
                    .child(
                        el("td")
                            .class("number")
                            .text(format_percentage(percentage_of(bookings, total))),
                    )
            });
            el("table")
                .child(el("thead").child(
                    el("tr")
                        .child(el("th").text("Service"))
                        .child(el("th").class("number").text("Bookings"))
                        .child(el("th").class("number").text("Share")),
                ))
                .child(el("tbody").children(rows))
                .child(el("tfoot").child(
                    el("tr")
                        .class("totals-row")
                        .child(el("td").text("Total"))
                        .child(el("td").class("number").text(format_count(total)))
                        .child(el("td").class("number").text(format_percentage(
                            if total.is_zero() {
                                Decimal::ZERO
                            } else {
                                Decimal::ONE_HUNDRED
                            },
                        ))),
                ))
                .into()
        }
    };
    section("service-performance", "Service Performance")
        .child(body)
        .into()
}

/// Two column label/value table with a totals row summing the whole data array.
fn series_table(
    series: &Series,
    label_heading: &str,
    value_heading: &str,
    format_value: impl Fn(Decimal) -> String,
) -> Node {
    let rows = series.points().map(|(label, value)| {
        el("tr")
            .class("data-row")
            .child(el("td").text(label))
            .child(el("td").class("number").text(format_value(value)))
    });
    el("table")
        .child(el("thead").child(
            el("tr")
                .child(el("th").text(label_heading))
                .child(el("th").class("number").text(value_heading)),
        ))
        .child(el("tbody").children(rows))
        .child(el("tfoot").child(
            el("tr")
                .class("totals-row")
                .child(el("td").text("Total"))
                .child(el("td").class("number").text(format_value(series.total()))),
        ))
        .into()
}

/// Chart placeholders embedded in the tabular report.
pub fn charts_section(data: &AnalyticsPayload) -> Node {
    section("charts", "Charts")
        .child(charts::chart_grid(data))
        .into()
}

pub fn print_controls() -> Node {
    el("div")
        .class("print-controls")
        .child(
            el("button")
                .class("btn btn-print")
                .attr("onclick", "window.print()")
                .text("Print Report"),
        )
        .child(
            el("button")
                .class("btn btn-close")
                .attr("onclick", "window.close()")
                .text("Close"),
        )
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn cell_texts(row: &Element) -> Vec<String> {
        row.children
            .iter()
            .map(|c| c.text_content())
            .collect()
    }

    #[test]
    fn income_rows_and_total() {
        let series = Series::new(["Jan", "Feb"], vec![dec!(1000), dec!(1500)]);
        let node = income_analysis(Some(&series));

        let rows = node.find_by_class("data-row");
        assert_eq!(rows.len(), 2);
        assert_eq!(cell_texts(rows[0]), vec!["Jan", "LKR 1,000.00"]);

        let totals = node.find_by_class("totals-row");
        assert_eq!(totals.len(), 1);
        assert_eq!(cell_texts(totals[0]), vec!["Total", "LKR 2,500.00"]);
    }

    #[test]
    fn income_table_size_follows_labels() {
        for n in [1usize, 3, 12] {
            let labels: Vec<String> = (0..n).map(|i| format!("P{i}")).collect();
            let data: Vec<Decimal> = (0..n).map(|i| Decimal::from(i as u64 * 100)).collect();
            let expected: Decimal = data.iter().copied().sum();
            let node = income_analysis(Some(&Series::new(labels, data)));
            assert_eq!(node.find_by_class("data-row").len(), n);
            let totals = node.find_by_class("totals-row");
            assert_eq!(
                cell_texts(totals[0])[1],
                format_currency(Some(expected))
            );
        }
    }

    #[test]
    fn missing_values_render_zero() {
        let series = Series::new(["Jan", "Feb"], vec![dec!(10)]);
        let node = appointment_analysis(Some(&series), None);
        let rows = node.find_by_class("data-row");
        assert_eq!(cell_texts(rows[1]), vec!["Feb", "0"]);
    }

    #[test]
    fn empty_labels_render_no_data() {
        let empty = Series::default();
        for node in [
            income_analysis(None),
            income_analysis(Some(&empty)),
            appointment_analysis(Some(&empty), None),
            service_performance(Some(&empty)),
            summary(None),
        ] {
            let notices = node.find_by_class("no-data");
            assert_eq!(notices.len(), 1);
            assert_eq!(notices[0].text_content(), NO_DATA_MESSAGE);
            assert!(node.find_by_tag("table").is_empty());
        }
    }

    #[test]
    fn status_percentages_are_rounded() {
        let breakdown = StatusBreakdown {
            completed: dec!(5),
            cancelled: dec!(1),
            in_progress: dec!(1),
            pending: dec!(1),
        };
        let node = status_breakdown(&breakdown).unwrap();
        let shares: Vec<String> = node
            .find_by_class("status-percentage")
            .iter()
            .map(|e| e.text_content())
            .collect();
        // 5/8 = 62.5 -> 63, 1/8 = 12.5 -> 13
        assert_eq!(shares, vec!["63%", "13%", "13%", "13%"]);
        assert!(!node.render().contains("NaN"));
    }

    #[test]
    fn zero_total_breakdown_is_omitted() {
        assert!(status_breakdown(&StatusBreakdown::default()).is_none());

        let trend = Series::new(["Jan"], vec![dec!(0)]);
        let success = Series::new(["a", "b", "c", "d"], vec![dec!(0); 4]);
        let node = appointment_analysis(Some(&trend), Some(&success));
        assert!(node.find_by_class("status-breakdown").is_empty());
        let html = node.render();
        assert!(!html.contains("NaN"));
        assert!(!html.contains("Infinity"));
    }

    #[test]
    fn service_shares() {
        let series = Series::new(["Plumbing", "Cleaning"], vec![dec!(3), dec!(1)]);
        let node = service_performance(Some(&series));
        let rows = node.find_by_class("data-row");
        assert_eq!(cell_texts(rows[0]), vec!["Plumbing", "3", "75%"]);
        assert_eq!(cell_texts(rows[1]), vec!["Cleaning", "1", "25%"]);
    }

    #[test]
    fn summary_cards() {
        let s = Summary {
            total_income: Some(dec!(45000)),
            total_appointments: 1200,
            completion_rate: Some(dec!(85.5)),
            active_services: 6,
        };
        let node = summary(Some(&s));
        let values: Vec<String> = node
            .find_by_class("value")
            .iter()
            .map(|e| e.text_content())
            .collect();
        assert_eq!(values, vec!["LKR 45,000.00", "1,200", "85.5%", "6"]);
    }

    #[test]
    fn print_controls_invoke_browser_actions() {
        let node = print_controls();
        let buttons = node.find_by_tag("button");
        assert_eq!(buttons[0].get_attr("onclick"), Some("window.print()"));
        assert_eq!(buttons[1].get_attr("onclick"), Some("window.close()"));
    }
}
