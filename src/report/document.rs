//! Whole-document assembly.

use super::charts;
use super::config::{QuickReportKind, ReportConfig, Section};
use super::html::{el, Node};
use super::sections;
use super::style::generate_styles;
use crate::core::{AnalyticsPayload, DateRange};
use chrono::NaiveDateTime;
use std::fmt;

/// Which template a document was rendered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Full,
    Quick(QuickReportKind),
    Charts,
}

impl ReportKind {
    pub fn title(self) -> &'static str {
        match self {
            ReportKind::Full => "Business Report",
            ReportKind::Quick(kind) => kind.title(),
            ReportKind::Charts => "Charts Report",
        }
    }

    /// Short identifier used for window names and file names.
    pub fn slug(self) -> &'static str {
        match self {
            ReportKind::Full => "full",
            ReportKind::Quick(kind) => kind.name(),
            ReportKind::Charts => "charts",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Document with the sections enabled in `config`, in their fixed order.
pub fn tabular_document(
    kind: ReportKind,
    data: &AnalyticsPayload,
    range: &DateRange,
    config: &ReportConfig,
    generated_at: NaiveDateTime,
) -> Node {
    let mut content = Vec::new();
    for section in config.sections.enabled() {
        log::debug!("Rendering section {}", section);
        let node = match section {
            Section::Header => sections::header(config, range, kind.title(), generated_at),
            Section::Summary => sections::summary(data.summary.as_ref()),
            Section::IncomeAnalysis => sections::income_analysis(data.income_chart.as_ref()),
            Section::AppointmentAnalysis => sections::appointment_analysis(
                data.appointment_trend.as_ref(),
                data.success_rate.as_ref(),
            ),
            Section::ServicePerformance => {
                sections::service_performance(data.service_performance.as_ref())
            }
            Section::Charts => sections::charts_section(data),
            // rendered after the main content
            Section::PrintButtons => continue,
        };
        content.push(node);
    }

    let controls = config
        .sections
        .print_buttons
        .then(sections::print_controls);
    shell(kind, range, config, content, controls, generated_at)
}

/// Fixed charts-only template. Section flags are not consulted.
pub fn charts_document(
    data: &AnalyticsPayload,
    range: &DateRange,
    config: &ReportConfig,
    generated_at: NaiveDateTime,
) -> Node {
    let kind = ReportKind::Charts;
    let content = vec![
        sections::header(config, range, kind.title(), generated_at),
        charts::chart_grid(data),
    ];
    shell(
        kind,
        range,
        config,
        content,
        Some(sections::print_controls()),
        generated_at,
    )
}

fn shell(
    kind: ReportKind,
    range: &DateRange,
    config: &ReportConfig,
    content: Vec<Node>,
    controls: Option<Node>,
    generated_at: NaiveDateTime,
) -> Node {
    let head = el("head")
        .child(el("meta").attr("charset", "UTF-8"))
        .child(
            el("meta")
                .attr("name", "viewport")
                .attr("content", "width=device-width, initial-scale=1.0"),
        )
        .child(el("title").text(format!(
            "{} {} - {}",
            config.company_name,
            kind.title(),
            range
        )))
        .child(el("style").child(Node::raw(generate_styles(config))));

    let footer = el("footer").class("report-footer").text(format!(
        "{} · {} · generated {}",
        config.company_name,
        kind.title(),
        generated_at.format("%Y-%m-%d %H:%M")
    ));

    let container = el("div")
        .class("pdf-container")
        .child(el("div").class("main-content").children(content))
        .children(controls)
        .child(footer);

    Node::Fragment(vec![
        Node::raw("<!DOCTYPE html>\n"),
        el("html")
            .attr("lang", "en")
            .child(head)
            .child(el("body").child(container))
            .into(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Series;
    use crate::report::config::SectionFlags;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn fixture() -> (AnalyticsPayload, DateRange, NaiveDateTime) {
        let data = AnalyticsPayload {
            income_chart: Some(Series::new(["Jan", "Feb"], vec![dec!(1000), dec!(1500)])),
            ..Default::default()
        };
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
        )
        .unwrap();
        let at = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        (data, range, at)
    }

    fn section_classes(doc: &Node) -> Vec<String> {
        doc.find_by_class("main-content")[0]
            .children
            .iter()
            .filter_map(|n| match n {
                Node::Element(e) => e.get_attr("class").map(str::to_string),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn default_sections_in_order() {
        let (data, range, at) = fixture();
        let doc = tabular_document(ReportKind::Full, &data, &range, &ReportConfig::default(), at);
        assert_eq!(
            section_classes(&doc),
            vec![
                "section report-header",
                "section summary",
                "section income-analysis",
                "section appointment-analysis",
                "section service-performance",
            ]
        );
        assert_eq!(doc.find_by_class("print-controls").len(), 1);
    }

    #[test]
    fn sections_toggle_independently() {
        let (data, range, at) = fixture();
        let config = ReportConfig {
            sections: SectionFlags::NONE
                .with(Section::IncomeAnalysis, true)
                .with(Section::Charts, true),
            ..Default::default()
        };
        let doc = tabular_document(ReportKind::Full, &data, &range, &config, at);
        assert_eq!(
            section_classes(&doc),
            vec!["section income-analysis", "section charts"]
        );
        assert!(doc.find_by_class("print-controls").is_empty());
    }

    #[test]
    fn document_shell() {
        let (data, range, at) = fixture();
        let html = tabular_document(ReportKind::Full, &data, &range, &ReportConfig::default(), at)
            .render();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(
            "<title>HireMe Business Report - January 1, 2024 - February 29, 2024</title>"
        ));
        assert!(html.contains("<style>"));
        assert!(html.contains(r#"<div class="pdf-container">"#));
        assert!(html.contains("LKR 2,500.00"));
    }

    #[test]
    fn charts_document_ignores_section_flags() {
        let (data, range, at) = fixture();
        let config = ReportConfig {
            sections: SectionFlags::NONE,
            ..Default::default()
        };
        let doc = charts_document(&data, &range, &config, at);
        assert_eq!(doc.find_by_class("charts-grid").len(), 1);
        assert_eq!(doc.find_by_class("chart-card").len(), 4);
        assert!(doc.find_by_tag("table").is_empty());
        assert_eq!(doc.find_by_class("print-controls").len(), 1);
        assert!(doc.render().contains("Charts Report"));
    }
}
