pub mod charts;
pub mod config;
pub mod document;
pub mod generator;
pub mod html;
pub mod sections;
pub mod style;
pub mod window;

pub use config::{
    QuickReportKind, ReportConfig, ReportOverrides, Section, SectionFlags, SectionOverrides,
};
pub use document::ReportKind;
pub use generator::{
    GeneratedDocument, ReportGenerator, DATA_NOT_READY_MESSAGE, FOCUS_RETRY_DELAY,
    POPUP_BLOCKED_MESSAGE,
};
pub use window::{Browser, FileWindow, Notifier, ReportWindow, SystemBrowser, TerminalNotifier};
