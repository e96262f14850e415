//! Report configuration: an immutable default merged with per-call overrides.

use schemars::JsonSchema;
use serde::Deserialize;
use std::fmt;

pub const DEFAULT_PRIMARY_COLOR: &str = "#2563eb";
pub const DEFAULT_COMPANY_NAME: &str = "HireMe";
pub const DEFAULT_PAGE_SIZE: &str = "A4";
pub const DEFAULT_MARGINS: &str = "15mm";

/// A toggleable block of the tabular report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Header,
    Summary,
    IncomeAnalysis,
    AppointmentAnalysis,
    ServicePerformance,
    PrintButtons,
    Charts,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Header,
        Section::Summary,
        Section::IncomeAnalysis,
        Section::AppointmentAnalysis,
        Section::ServicePerformance,
        Section::PrintButtons,
        Section::Charts,
    ];

    /// Key used for this section in JSON configuration.
    pub fn key(self) -> &'static str {
        match self {
            Section::Header => "header",
            Section::Summary => "summary",
            Section::IncomeAnalysis => "incomeAnalysis",
            Section::AppointmentAnalysis => "appointmentAnalysis",
            Section::ServicePerformance => "servicePerformance",
            Section::PrintButtons => "printButtons",
            Section::Charts => "charts",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Fully resolved on/off state of every section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionFlags {
    pub header: bool,
    pub summary: bool,
    pub income_analysis: bool,
    pub appointment_analysis: bool,
    pub service_performance: bool,
    pub print_buttons: bool,
    pub charts: bool,
}

impl SectionFlags {
    pub const DEFAULT: SectionFlags = SectionFlags {
        header: true,
        summary: true,
        income_analysis: true,
        appointment_analysis: true,
        service_performance: true,
        print_buttons: true,
        charts: false,
    };

    pub const NONE: SectionFlags = SectionFlags {
        header: false,
        summary: false,
        income_analysis: false,
        appointment_analysis: false,
        service_performance: false,
        print_buttons: false,
        charts: false,
    };

    pub fn is_enabled(&self, section: Section) -> bool {
        match section {
            Section::Header => self.header,
            Section::Summary => self.summary,
            Section::IncomeAnalysis => self.income_analysis,
            Section::AppointmentAnalysis => self.appointment_analysis,
            Section::ServicePerformance => self.service_performance,
            Section::PrintButtons => self.print_buttons,
            Section::Charts => self.charts,
        }
    }

    pub fn with(mut self, section: Section, enabled: bool) -> Self {
        let flag = match section {
            Section::Header => &mut self.header,
            Section::Summary => &mut self.summary,
            Section::IncomeAnalysis => &mut self.income_analysis,
            Section::AppointmentAnalysis => &mut self.appointment_analysis,
            Section::ServicePerformance => &mut self.service_performance,
            Section::PrintButtons => &mut self.print_buttons,
            Section::Charts => &mut self.charts,
        };
        *flag = enabled;
        self
    }

    pub fn enabled(&self) -> impl Iterator<Item = Section> + '_ {
        Section::ALL.into_iter().filter(|s| self.is_enabled(*s))
    }

    /// Apply overrides key by key; unset keys keep the current value.
    pub fn merged(self, overrides: &SectionOverrides) -> Self {
        Section::ALL.into_iter().fold(self, |flags, section| {
            match overrides.get(section) {
                Some(enabled) => flags.with(section, enabled),
                None => flags,
            }
        })
    }
}

impl Default for SectionFlags {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Partial section flags as supplied by a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SectionOverrides {
    pub header: Option<bool>,
    pub summary: Option<bool>,
    pub income_analysis: Option<bool>,
    pub appointment_analysis: Option<bool>,
    pub service_performance: Option<bool>,
    pub print_buttons: Option<bool>,
    pub charts: Option<bool>,
}

impl SectionOverrides {
    pub fn get(&self, section: Section) -> Option<bool> {
        match section {
            Section::Header => self.header,
            Section::Summary => self.summary,
            Section::IncomeAnalysis => self.income_analysis,
            Section::AppointmentAnalysis => self.appointment_analysis,
            Section::ServicePerformance => self.service_performance,
            Section::PrintButtons => self.print_buttons,
            Section::Charts => self.charts,
        }
    }

    pub fn set(&mut self, section: Section, enabled: bool) {
        let flag = match section {
            Section::Header => &mut self.header,
            Section::Summary => &mut self.summary,
            Section::IncomeAnalysis => &mut self.income_analysis,
            Section::AppointmentAnalysis => &mut self.appointment_analysis,
            Section::ServicePerformance => &mut self.service_performance,
            Section::PrintButtons => &mut self.print_buttons,
            Section::Charts => &mut self.charts,
        };
        *flag = Some(enabled);
    }
}

impl From<SectionFlags> for SectionOverrides {
    fn from(flags: SectionFlags) -> Self {
        Self {
            header: Some(flags.header),
            summary: Some(flags.summary),
            income_analysis: Some(flags.income_analysis),
            appointment_analysis: Some(flags.appointment_analysis),
            service_performance: Some(flags.service_performance),
            print_buttons: Some(flags.print_buttons),
            charts: Some(flags.charts),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub primary_color: String,
    pub company_name: String,
    pub page_size: String,
    pub margins: String,
    pub sections: SectionFlags,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            company_name: DEFAULT_COMPANY_NAME.to_string(),
            page_size: DEFAULT_PAGE_SIZE.to_string(),
            margins: DEFAULT_MARGINS.to_string(),
            sections: SectionFlags::DEFAULT,
        }
    }
}

impl ReportConfig {
    /// A new config with `overrides` applied on top of `self`.
    pub fn merged(&self, overrides: &ReportOverrides) -> ReportConfig {
        let pick = |value: &Option<String>, current: &String| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map_or_else(|| current.clone(), str::to_string)
        };
        ReportConfig {
            primary_color: pick(&overrides.primary_color, &self.primary_color),
            company_name: pick(&overrides.company_name, &self.company_name),
            page_size: pick(&overrides.page_size, &self.page_size),
            margins: pick(&overrides.margins, &self.margins),
            sections: match &overrides.sections {
                Some(sections) => self.sections.merged(sections),
                None => self.sections,
            },
        }
    }
}

/// Caller-supplied configuration. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportOverrides {
    pub primary_color: Option<String>,
    pub company_name: Option<String>,
    pub page_size: Option<String>,
    pub margins: Option<String>,
    pub sections: Option<SectionOverrides>,
}

impl ReportOverrides {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Replace the section overrides with a complete set of flags.
    pub fn with_sections(mut self, flags: SectionFlags) -> Self {
        self.sections = Some(flags.into());
        self
    }

    /// Layer `other` on top of `self`, field by field.
    pub fn overlay(self, other: ReportOverrides) -> Self {
        let sections = match (self.sections, other.sections) {
            (Some(base), Some(top)) => Some(SectionOverrides {
                header: top.header.or(base.header),
                summary: top.summary.or(base.summary),
                income_analysis: top.income_analysis.or(base.income_analysis),
                appointment_analysis: top.appointment_analysis.or(base.appointment_analysis),
                service_performance: top.service_performance.or(base.service_performance),
                print_buttons: top.print_buttons.or(base.print_buttons),
                charts: top.charts.or(base.charts),
            }),
            (base, top) => top.or(base),
        };
        Self {
            primary_color: other.primary_color.or(self.primary_color),
            company_name: other.company_name.or(self.company_name),
            page_size: other.page_size.or(self.page_size),
            margins: other.margins.or(self.margins),
            sections,
        }
    }
}

/// Named section presets for shorter reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickReportKind {
    Summary,
    Income,
    Appointments,
    Services,
}

impl QuickReportKind {
    /// Resolve a preset by name, falling back to [`QuickReportKind::Summary`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "summary" => QuickReportKind::Summary,
            "income" => QuickReportKind::Income,
            "appointments" => QuickReportKind::Appointments,
            "services" => QuickReportKind::Services,
            other => {
                log::warn!("Unknown quick report type '{}', using summary", other);
                QuickReportKind::Summary
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            QuickReportKind::Summary => "summary",
            QuickReportKind::Income => "income",
            QuickReportKind::Appointments => "appointments",
            QuickReportKind::Services => "services",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            QuickReportKind::Summary => "Summary Report",
            QuickReportKind::Income => "Income Report",
            QuickReportKind::Appointments => "Appointments Report",
            QuickReportKind::Services => "Services Report",
        }
    }

    /// Header, summary and print controls, plus the preset's analysis section.
    pub fn sections(self) -> SectionFlags {
        let base = SectionFlags::NONE
            .with(Section::Header, true)
            .with(Section::Summary, true)
            .with(Section::PrintButtons, true);
        match self {
            QuickReportKind::Summary => base,
            QuickReportKind::Income => base.with(Section::IncomeAnalysis, true),
            QuickReportKind::Appointments => base.with(Section::AppointmentAnalysis, true),
            QuickReportKind::Services => base.with(Section::ServicePerformance, true),
        }
    }
}
