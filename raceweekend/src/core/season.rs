use crate::core::constructor::Paddock;
use crate::core::era::Era;
use crate::core::finale::FinaleScript;
use crate::core::track::TrackTable;
use serde::Deserialize;

/// * `year` - Season year
/// * `test_drivers_enabled` - Let debug-only test drivers enter events
/// * `championship_active` - Award championship points in the season records
/// * `finale` - Scripted season finale (if any)
/// * `calendar` - Races of the season in the order they are held
#[derive(Debug, Deserialize, Clone)]
pub struct SeasonPars {
    pub year: u32,
    #[serde(default)]
    pub test_drivers_enabled: bool,
    #[serde(default)]
    pub championship_active: bool,
    #[serde(default)]
    pub finale: Option<FinaleScript>,
    #[serde(default)]
    pub calendar: Vec<String>,
}

/// Season bundles everything about the current season that the resolvers read but never change.
#[derive(Debug, Clone)]
pub struct Season {
    pub year: u32,
    pub era: Era,
    pub test_drivers_enabled: bool,
    pub championship_active: bool,
    pub finale: Option<FinaleScript>,
    pub calendar: Vec<String>,
    pub paddock: Paddock,
    pub tracks: TrackTable,
}

impl Season {
    pub fn new(season_pars: &SeasonPars, paddock: Paddock, tracks: TrackTable) -> Season {
        Season {
            year: season_pars.year,
            era: Era::for_year(season_pars.year),
            test_drivers_enabled: season_pars.test_drivers_enabled,
            championship_active: season_pars.championship_active,
            finale: season_pars.finale.to_owned(),
            calendar: season_pars.calendar.to_owned(),
            paddock,
            tracks,
        }
    }
}
