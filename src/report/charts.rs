//! Print-mode chart placeholders.
//!
//! These are plain markup approximations of the dashboard charts: bar heights, pie angles and
//! line points are computed here from the same series the tables use, so the reported values
//! match even if the pixels do not.

use super::html::{el, Element, Node};
use super::sections::no_data;
use crate::core::{
    format_count, format_currency, format_percentage, percentage_of, AnalyticsPayload, Series,
    StatusBreakdown,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Write as _;

const LINE_WIDTH: f64 = 400.0;
const LINE_HEIGHT: f64 = 160.0;

const PALETTE: [&str; 6] = [
    "#16a34a", "#dc2626", "#2563eb", "#d97706", "#7c3aed", "#0891b2",
];

/// `value / max * 100`, two decimals, zero when `max` is zero.
pub fn proportion(value: Decimal, max: Decimal) -> Decimal {
    if max <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (value / max * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .max(Decimal::ZERO)
        .normalize()
}

/// Start and end angle in degrees of each pie segment, `value / total * 360` wide.
pub fn pie_segments(values: &[Decimal]) -> Vec<(f64, f64)> {
    let total: Decimal = values.iter().copied().sum();
    let total = total.to_f64().unwrap_or_default();
    let mut start = 0.0;
    values
        .iter()
        .map(|v| {
            let sweep = if total > 0.0 {
                v.to_f64().unwrap_or_default() / total * 360.0
            } else {
                0.0
            };
            let segment = (start, start + sweep);
            start += sweep;
            segment
        })
        .collect()
}

/// Points evenly spaced along x, y scaled so the largest value touches the top.
pub fn line_points(values: &[Decimal], width: f64, height: f64) -> Vec<(f64, f64)> {
    let max = values
        .iter()
        .filter_map(|v| v.to_f64())
        .fold(0.0_f64, f64::max);
    let n = values.len();
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let x = if n > 1 {
                i as f64 * width / (n - 1) as f64
            } else {
                width / 2.0
            };
            let y = if max > 0.0 {
                height - v.to_f64().unwrap_or_default() / max * height
            } else {
                height
            };
            (x, y)
        })
        .collect()
}

fn chart_card(title: &str) -> Element {
    el("div")
        .class("chart-card")
        .child(el("h3").text(title))
}

fn plotted(series: Option<&Series>) -> Option<&Series> {
    series.filter(|s| !s.is_empty())
}

pub fn bar_chart(series: Option<&Series>, title: &str, format_value: fn(Decimal) -> String) -> Node {
    let Some(series) = plotted(series) else {
        return chart_card(title).child(no_data()).into();
    };
    let max = series.max();
    let columns = series.points().map(|(label, value)| {
        el("div")
            .class("bar-column")
            .child(el("div").class("bar-value").text(format_value(value)))
            .child(
                el("div")
                    .class("bar")
                    .style(format!("height: {}%", proportion(value, max))),
            )
            .child(el("div").class("bar-label").text(label))
    });
    chart_card(title)
        .child(el("div").class("bar-chart").children(columns))
        .into()
}

pub fn horizontal_bar_chart(
    series: Option<&Series>,
    title: &str,
    format_value: fn(Decimal) -> String,
) -> Node {
    let Some(series) = plotted(series) else {
        return chart_card(title).child(no_data()).into();
    };
    let max = series.max();
    let rows = series.points().map(|(label, value)| {
        el("div")
            .class("hbar-row")
            .child(el("span").class("bar-label").text(label))
            .child(
                el("div").class("hbar-track").child(
                    el("div")
                        .class("hbar")
                        .style(format!("width: {}%", proportion(value, max))),
                ),
            )
            .child(el("span").class("bar-value").text(format_value(value)))
    });
    chart_card(title)
        .child(el("div").class("hbar-chart").children(rows))
        .into()
}

pub fn pie_chart(series: Option<&Series>, title: &str) -> Node {
    let Some(series) = plotted(series) else {
        return chart_card(title).child(no_data()).into();
    };
    let points: Vec<(&str, Decimal)> = series.points().collect();
    let total: Decimal = points.iter().map(|(_, v)| *v).sum();
    if total <= Decimal::ZERO {
        return chart_card(title).child(no_data()).into();
    }

    let values: Vec<Decimal> = points.iter().map(|(_, v)| *v).collect();
    let segments = pie_segments(&values);
    let mut gradient = String::from("background: conic-gradient(");
    for (i, (start, end)) in segments.iter().enumerate() {
        if i > 0 {
            gradient.push_str(", ");
        }
        let _ = write!(
            gradient,
            "{} {:.2}deg {:.2}deg",
            PALETTE[i % PALETTE.len()],
            start,
            end
        );
    }
    gradient.push(')');

    let legend = points.iter().enumerate().map(|(i, (label, value))| {
        el("div")
            .class("legend-item")
            .child(
                el("span")
                    .class("legend-swatch")
                    .style(format!("background: {}", PALETTE[i % PALETTE.len()])),
            )
            .child(el("span").class("legend-label").text(*label))
            .child(el("span").class("legend-value").text(format!(
                "{} ({})",
                format_count(*value),
                format_percentage(percentage_of(*value, total))
            )))
    });

    chart_card(title)
        .child(el("div").class("pie").style(gradient))
        .child(el("div").class("legend").children(legend))
        .into()
}

pub fn line_chart(series: Option<&Series>, title: &str, format_value: fn(Decimal) -> String) -> Node {
    let Some(series) = plotted(series) else {
        return chart_card(title).child(no_data()).into();
    };
    let points: Vec<(&str, Decimal)> = series.points().collect();
    let values: Vec<Decimal> = points.iter().map(|(_, v)| *v).collect();
    let coords = line_points(&values, LINE_WIDTH, LINE_HEIGHT);

    let polyline = coords
        .iter()
        .map(|(x, y)| format!("{x:.1},{y:.1}"))
        .collect::<Vec<_>>()
        .join(" ");
    let markers = coords.iter().zip(&points).map(|((x, y), (label, value))| {
        el("circle")
            .attr("cx", format!("{x:.1}"))
            .attr("cy", format!("{y:.1}"))
            .attr("r", "3")
            .child(el("title").text(format!("{label}: {}", format_value(*value))))
    });
    let svg = el("svg")
        .attr("xmlns", "http://www.w3.org/2000/svg")
        .attr(
            "viewBox",
            format!("-10 -10 {} {}", LINE_WIDTH + 20.0, LINE_HEIGHT + 20.0),
        )
        .child(el("polyline").attr("points", polyline))
        .children(markers);
    let labels = points.iter().map(|(label, value)| {
        el("span")
            .class("line-label")
            .text(format!("{label}: {}", format_value(*value)))
    });

    chart_card(title)
        .child(el("div").class("line-chart").child(svg))
        .child(el("div").class("legend").children(labels))
        .into()
}

/// The four standard charts in a two column grid.
pub fn chart_grid(data: &AnalyticsPayload) -> Node {
    let status = data
        .success_rate
        .as_ref()
        .map(|s| StatusBreakdown::from_series(s).to_series());
    el("div")
        .class("charts-grid")
        .child(bar_chart(
            data.income_chart.as_ref(),
            "Income Overview",
            |v| format_currency(Some(v)),
        ))
        .child(line_chart(
            data.appointment_trend.as_ref(),
            "Appointment Trend",
            format_count,
        ))
        .child(pie_chart(status.as_ref(), "Appointment Status"))
        .child(horizontal_bar_chart(
            data.service_performance.as_ref(),
            "Service Performance",
            format_count,
        ))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn bar_heights_relative_to_max() {
        let series = Series::new(["a", "b", "c"], vec![dec!(50), dec!(100), dec!(0)]);
        let node = bar_chart(Some(&series), "Income", format_count);
        let heights: Vec<&str> = node
            .find_by_class("bar")
            .iter()
            .filter_map(|e| e.get_attr("style"))
            .collect();
        assert_eq!(heights, vec!["height: 50%", "height: 100%", "height: 0%"]);
    }

    #[test]
    fn hbar_widths_relative_to_max() {
        let series = Series::new(["a", "b", "c"], vec![dec!(25), dec!(100), dec!(1)]);
        let node = horizontal_bar_chart(Some(&series), "Services", format_count);
        let widths: Vec<&str> = node
            .find_by_class("hbar")
            .iter()
            .filter_map(|e| e.get_attr("style"))
            .collect();
        assert_eq!(widths, vec!["width: 25%", "width: 100%", "width: 1%"]);
    }

    #[test]
    fn line_chart_polyline_points() {
        let series = Series::new(["Jan", "Feb", "Mar"], vec![dec!(0), dec!(5), dec!(10)]);
        let node = line_chart(Some(&series), "Appointments", format_count);
        let polyline = node.find_by_tag("polyline");
        assert_eq!(polyline.len(), 1);
        assert_eq!(
            polyline[0].get_attr("points"),
            Some("0.0,160.0 200.0,80.0 400.0,0.0")
        );
        assert_eq!(node.find_by_tag("circle").len(), 3);
    }

    #[test]
    fn all_zero_bars_have_no_height() {
        assert_eq!(proportion(dec!(0), dec!(0)), dec!(0));
        assert_eq!(proportion(dec!(1), dec!(3)), dec!(33.33));
    }

    #[test]
    fn pie_segments_cover_circle() {
        let segments = pie_segments(&[dec!(1), dec!(1), dec!(2)]);
        assert_eq!(segments[0], (0.0, 90.0));
        assert_eq!(segments[1], (90.0, 180.0));
        assert_eq!(segments[2], (180.0, 360.0));
    }

    #[test]
    fn zero_total_pie_is_no_data() {
        let series = Series::new(["a", "b"], vec![dec!(0), dec!(0)]);
        let node = pie_chart(Some(&series), "Status");
        assert_eq!(node.find_by_class("no-data").len(), 1);
        assert!(node.find_by_class("pie").is_empty());
    }

    #[test]
    fn line_points_evenly_spaced() {
        let points = line_points(&[dec!(0), dec!(5), dec!(10)], 400.0, 100.0);
        assert_eq!(points, vec![(0.0, 100.0), (200.0, 50.0), (400.0, 0.0)]);

        let single = line_points(&[dec!(3)], 400.0, 100.0);
        assert_eq!(single, vec![(200.0, 0.0)]);
    }

    #[test]
    fn chart_values_match_tables() {
        let data = AnalyticsPayload {
            income_chart: Some(Series::new(["Jan", "Feb"], vec![dec!(1000), dec!(1500)])),
            ..Default::default()
        };
        let grid = chart_grid(&data);
        let values: Vec<String> = grid
            .find_by_class("bar-value")
            .iter()
            .map(|e| e.text_content())
            .collect();
        assert_eq!(values, vec!["LKR 1,000.00", "LKR 1,500.00"]);
        assert_eq!(grid.find_by_class("chart-card").len(), 4);
        // three of the four charts have nothing to plot
        assert_eq!(grid.find_by_class("no-data").len(), 3);
    }
}
