use crate::core::car::TeamPars;
use crate::core::constructor::ConstructorPars;
use crate::core::driver::DriverPars;
use crate::core::season::SeasonPars;
use crate::core::track::TrackPars;
use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::OpenOptions;
use std::path::Path;

/// SimPars is used to store all other parameter structs.
/// * `season_pars` - Year, calendar and season switches
/// * `track_pars_all` - Track profiles by race name
/// * `constructor_pars_all` - Constructor table of the paddock
/// * `driver_pars_all` - Driver roster
/// * `team_pars` - The human-controlled team
#[derive(Debug, Deserialize, Clone)]
pub struct SimPars {
    pub season_pars: SeasonPars,
    #[serde(default)]
    pub track_pars_all: HashMap<String, TrackPars>,
    #[serde(default)]
    pub constructor_pars_all: Vec<ConstructorPars>,
    pub driver_pars_all: Vec<DriverPars>,
    pub team_pars: TeamPars,
}

/// read_sim_pars reads the JSON file and decodes the JSON string into the simulation parameters
/// struct.
pub fn read_sim_pars(filepath: &Path) -> anyhow::Result<SimPars> {
    let fh = OpenOptions::new()
        .read(true)
        .open(filepath)
        .context(format!(
            "Failed to open parameter file {}!",
            filepath.display()
        ))?;
    let pars = serde_json::from_reader(&fh).context(format!(
        "Failed to parse parameter file {}!",
        filepath.display()
    ))?;
    Ok(pars)
}
