//! Where generated documents are shown, and how the user is told about failures.
//!
//! [`Browser`] stands in for the popup window API: opening may be refused, in which case no
//! document is written. [`SystemBrowser`] writes the document to an HTML file and hands it to the
//! operating system's default browser.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

pub trait ReportWindow {
    /// Append markup to the window's document.
    fn write(&mut self, html: &str) -> io::Result<()>;

    /// Finish the document stream. Further writes fail.
    fn close_document(&mut self) -> io::Result<()>;

    /// Bring the window to the front.
    fn focus(&mut self) -> io::Result<()>;
}

pub trait Browser {
    type Window: ReportWindow;

    /// Open a new window, or `None` if the environment refuses (e.g. a popup blocker).
    fn open_window(&mut self, name: &str) -> Option<Self::Window>;
}

/// Blocking user-visible messages.
pub trait Notifier {
    fn alert(&self, message: &str);
}

/// Prints alerts to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn alert(&self, message: &str) {
        eprintln!("{}", message);
    }
}

/// Opens reports as HTML files in the default browser.
#[derive(Debug, Clone, Default)]
pub struct SystemBrowser {
    output: Option<PathBuf>,
}

impl SystemBrowser {
    /// Write to a temporary file and open it in the browser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write to `path` and leave it there; nothing is launched.
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self {
            output: Some(path.into()),
        }
    }
}

impl Browser for SystemBrowser {
    type Window = FileWindow;

    fn open_window(&mut self, name: &str) -> Option<FileWindow> {
        let (path, launch) = match &self.output {
            Some(path) => (path.clone(), false),
            None => (
                std::env::temp_dir().join(format!("hireme-{}-report.html", name)),
                true,
            ),
        };
        match File::create(&path) {
            Ok(file) => Some(FileWindow {
                path,
                writer: Some(BufWriter::new(file)),
                launch,
                launched: false,
            }),
            Err(err) => {
                log::error!("Cannot open report window at {}: {}", path.display(), err);
                None
            }
        }
    }
}

#[derive(Debug)]
pub struct FileWindow {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    launch: bool,
    launched: bool,
}

impl FileWindow {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportWindow for FileWindow {
    fn write(&mut self, html: &str) -> io::Result<()> {
        match self.writer.as_mut() {
            Some(writer) => writer.write_all(html.as_bytes()),
            None => Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "report document already closed",
            )),
        }
    }

    fn close_document(&mut self) -> io::Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }
        Ok(())
    }

    fn focus(&mut self) -> io::Result<()> {
        if !self.launch {
            return Ok(());
        }
        if self.launched {
            // the browser already owns the tab; nothing to raise from here
            log::debug!("Report {} already open", self.path.display());
            return Ok(());
        }
        opener::open(&self.path)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
        self.launched = true;
        log::info!("Opened report in browser: {}", self.path.display());
        Ok(())
    }
}
