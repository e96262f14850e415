//! Locate command - nearest service city for a coordinate

use clap::Args;
use hireme_reports::core::{nearest_city, SRI_LANKA_CITIES};

#[derive(Args, Debug)]
pub struct LocateCommand {
    /// Latitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// Longitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    lng: f64,
}

impl LocateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) || !(-180.0..=180.0).contains(&self.lng) {
            anyhow::bail!("Coordinate ({}, {}) is out of range", self.lat, self.lng);
        }
        let Some((city, distance)) = nearest_city(self.lat, self.lng, SRI_LANKA_CITIES) else {
            anyhow::bail!("No reference cities configured");
        };
        log::debug!("Nearest city to ({}, {}) is {}", self.lat, self.lng, city.name);
        println!("{} ({:.2} km)", city.name, distance);
        Ok(())
    }
}
