//! Schema command - print expected input formats

use clap::{Args, ValueEnum};
use hireme_reports::core::AnalyticsPayload;
use hireme_reports::report::ReportOverrides;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Which input to describe
    #[arg(value_enum, default_value = "analytics")]
    target: SchemaTarget,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SchemaTarget {
    /// Analytics payload accepted by `report --data` and returned by the backend
    Analytics,
    /// Report configuration accepted by `--config`
    Config,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let schema = match self.target {
            SchemaTarget::Analytics => schema_for!(AnalyticsPayload),
            SchemaTarget::Config => schema_for!(ReportOverrides),
        };
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }
}
