pub mod dashboard;
pub mod fetch;
pub mod locate;
pub mod report;
pub mod schema;

use anyhow::Context;
use clap::{Args, ValueEnum};
use hireme_reports::core::{AnalyticsPayload, ApiResponse};
use hireme_reports::report::{
    FileWindow, GeneratedDocument, ReportOverrides, Section, SectionOverrides,
};
use serde_json::Value;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

/// Read an analytics payload (JSON) from a file, or stdin with "-".
///
/// Both the bare payload and the backend's `{ "data": ... }` envelope are accepted.
pub fn read_payload(path: &Path) -> anyhow::Result<AnalyticsPayload> {
    let buffer = if path.as_os_str() == "-" {
        read_from_stdin()?
    } else {
        let file = File::open(path)
            .with_context(|| format!("Failed to open analytics file {}", path.display()))?;
        let mut reader = BufReader::new(file);
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer)?;
        buffer
    };
    parse_payload(&buffer)
}

fn read_from_stdin() -> anyhow::Result<Vec<u8>> {
    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());

    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    if buffer.is_empty() {
        anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
    }
    Ok(buffer)
}

fn parse_payload(bytes: &[u8]) -> anyhow::Result<AnalyticsPayload> {
    let value: Value =
        serde_json::from_slice(bytes).context("Analytics input is not valid JSON")?;
    let payload = if value.get("data").is_some_and(Value::is_object) {
        serde_json::from_value::<ApiResponse<AnalyticsPayload>>(value)?.data
    } else {
        serde_json::from_value(value)?
    };
    Ok(payload)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SectionArg {
    Header,
    Summary,
    IncomeAnalysis,
    AppointmentAnalysis,
    ServicePerformance,
    PrintButtons,
    Charts,
}

impl From<SectionArg> for Section {
    fn from(arg: SectionArg) -> Self {
        match arg {
            SectionArg::Header => Section::Header,
            SectionArg::Summary => Section::Summary,
            SectionArg::IncomeAnalysis => Section::IncomeAnalysis,
            SectionArg::AppointmentAnalysis => Section::AppointmentAnalysis,
            SectionArg::ServicePerformance => Section::ServicePerformance,
            SectionArg::PrintButtons => Section::PrintButtons,
            SectionArg::Charts => Section::Charts,
        }
    }
}

/// Report styling and section options shared by the rendering commands.
#[derive(Args, Debug, Default)]
pub struct StyleArgs {
    /// JSON file with report configuration (camelCase keys)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Accent colour used for headings and charts
    #[arg(long)]
    primary_color: Option<String>,

    /// Company name shown in the header and footer
    #[arg(long)]
    company_name: Option<String>,

    /// Printed page size (e.g. A4, Letter)
    #[arg(long)]
    page_size: Option<String>,

    /// Printed page margins (e.g. 15mm)
    #[arg(long)]
    margins: Option<String>,

    /// Sections to include in addition to the defaults
    #[arg(long, value_enum, value_delimiter = ',')]
    show: Vec<SectionArg>,

    /// Sections to leave out
    #[arg(long, value_enum, value_delimiter = ',')]
    hide: Vec<SectionArg>,
}

impl StyleArgs {
    /// Overrides from the config file, with flags layered on top.
    pub fn overrides(&self) -> anyhow::Result<ReportOverrides> {
        let file = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                ReportOverrides::from_json(&json)
                    .with_context(|| format!("Invalid config {}", path.display()))?
            }
            None => ReportOverrides::default(),
        };
        Ok(file.overlay(self.flag_overrides()))
    }

    fn flag_overrides(&self) -> ReportOverrides {
        let mut sections = SectionOverrides::default();
        let mut toggled = false;
        for (args, enabled) in [(&self.show, true), (&self.hide, false)] {
            for arg in args {
                toggled = true;
                sections.set((*arg).into(), enabled);
            }
        }
        ReportOverrides {
            primary_color: self.primary_color.clone(),
            company_name: self.company_name.clone(),
            page_size: self.page_size.clone(),
            margins: self.margins.clone(),
            sections: toggled.then_some(sections),
        }
    }
}

/// Report a generated document to the user, or fail if nothing was produced.
///
/// The reason has already been shown by the notifier when `document` is `None`.
pub fn finish(
    document: Option<GeneratedDocument<FileWindow>>,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let Some(document) = document else {
        anyhow::bail!("No report was generated");
    };
    match output {
        Some(_) => println!(
            "{} written to: {}",
            document.kind,
            document.window.path().display()
        ),
        None => println!(
            "Opened {} in browser: {}",
            document.kind,
            document.window.path().display()
        ),
    }
    Ok(())
}
