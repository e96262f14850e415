use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser, Debug)]
#[command(
    name = "hireme-report",
    version,
    about = "Printable analytics reports for HireMe providers"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a report from an analytics file
    Report(cmd::report::ReportCommand),
    /// Fetch analytics from the backend and render a report
    Fetch(cmd::fetch::FetchCommand),
    /// Show analytics as terminal tables
    Dashboard(cmd::dashboard::DashboardCommand),
    /// Find the nearest city to a coordinate
    Locate(cmd::locate::LocateCommand),
    /// Print the JSON schema of an accepted input
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Report(report) => report.exec(),
        Command::Fetch(fetch) => fetch.exec(),
        Command::Dashboard(dashboard) => dashboard.exec(),
        Command::Locate(locate) => locate.exec(),
        Command::Schema(schema) => schema.exec(),
    }
}
