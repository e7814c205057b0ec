use crate::core::driver::MAX_FAME;
use serde::Deserialize;
use std::collections::HashMap;

/// Race distance (km) that corresponds to a race-length factor of 1.0.
pub const REFERENCE_RACE_DISTANCE: f64 = 250.0;

/// * `country` - Host country
/// * `engine_danger` - Multiplier on the engine failure probability
/// * `crash_danger` - Multiplier on the crash probability
/// * `pace_weight` - Weight of driver pace in performance rolls
/// * `consistency_weight` - Weight of driver consistency in performance rolls
/// * `suspension_importance` - Scales how much suspension quality matters (0 = not at all)
/// * `heat_intensity` - Multiplier on the engine failure probability in hot races
/// * `weight_pace_importance` - Scales the pace effect of chassis weight
/// * `weight_crash_importance` - Scales the crash effect of chassis weight
/// * `race_distance_km` - (km) Race distance
/// * `grid_size` - Maximum number of entrants
/// * `grid_risk_baseline` - Number of cars above which a crowded grid raises crash risk
/// * `wet_chance` - Probability of a wet race and of a wet qualifying session
/// * `hot_chance` - Probability of a hot race (only rolled if the race is dry)
/// * `fame_mult` - Scales fame gains
/// * `xp_mult` - Scales XP gains of finishers
/// * `fame_cap` - Fame above which this event grants no more fame
/// * `allowed_nationalities` - Only drivers of these countries may enter (all if missing)
/// * `prize_top3` - Prize money for the first three positions
/// * `finisher_bonus` - Prize money for every other classified finisher
/// * `appearance_base` - Base appearance money paid to the human team
/// * `appearance_prestige_mult` - Appearance money per point of team prestige
/// * `appearance_cap` - Upper limit of the appearance money
#[derive(Debug, Deserialize, Clone)]
pub struct TrackPars {
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default = "default_one")]
    pub engine_danger: f64,
    #[serde(default = "default_one")]
    pub crash_danger: f64,
    #[serde(default = "default_one")]
    pub pace_weight: f64,
    #[serde(default = "default_one")]
    pub consistency_weight: f64,
    #[serde(default = "default_one")]
    pub suspension_importance: f64,
    #[serde(default = "default_one")]
    pub heat_intensity: f64,
    #[serde(default = "default_one")]
    pub weight_pace_importance: f64,
    #[serde(default = "default_one")]
    pub weight_crash_importance: f64,
    #[serde(default = "default_race_distance_km")]
    pub race_distance_km: f64,
    #[serde(default = "default_grid_size")]
    pub grid_size: usize,
    #[serde(default = "default_grid_size")]
    pub grid_risk_baseline: usize,
    #[serde(default = "default_wet_chance")]
    pub wet_chance: f64,
    #[serde(default = "default_hot_chance")]
    pub hot_chance: f64,
    #[serde(default = "default_one")]
    pub fame_mult: f64,
    #[serde(default = "default_one")]
    pub xp_mult: f64,
    #[serde(default)]
    pub fame_cap: Option<f64>,
    #[serde(default)]
    pub allowed_nationalities: Option<Vec<String>>,
    #[serde(default = "default_prize_top3")]
    pub prize_top3: [u32; 3],
    #[serde(default)]
    pub finisher_bonus: u32,
    #[serde(default)]
    pub appearance_base: u32,
    #[serde(default)]
    pub appearance_prestige_mult: f64,
    #[serde(default = "default_appearance_cap")]
    pub appearance_cap: u32,
}

fn default_country() -> String {
    "Unknown".to_owned()
}

fn default_one() -> f64 {
    1.0
}

fn default_race_distance_km() -> f64 {
    REFERENCE_RACE_DISTANCE
}

fn default_grid_size() -> usize {
    12
}

fn default_wet_chance() -> f64 {
    0.35
}

fn default_hot_chance() -> f64 {
    0.2
}

fn default_prize_top3() -> [u32; 3] {
    [300, 200, 100]
}

fn default_appearance_cap() -> u32 {
    100
}

impl Default for TrackPars {
    fn default() -> Self {
        TrackPars {
            country: default_country(),
            engine_danger: 1.0,
            crash_danger: 1.0,
            pace_weight: 1.0,
            consistency_weight: 1.0,
            suspension_importance: 1.0,
            heat_intensity: 1.0,
            weight_pace_importance: 1.0,
            weight_crash_importance: 1.0,
            race_distance_km: default_race_distance_km(),
            grid_size: default_grid_size(),
            grid_risk_baseline: default_grid_size(),
            wet_chance: default_wet_chance(),
            hot_chance: default_hot_chance(),
            fame_mult: 1.0,
            xp_mult: 1.0,
            fame_cap: None,
            allowed_nationalities: None,
            prize_top3: default_prize_top3(),
            finisher_bonus: 0,
            appearance_base: 0,
            appearance_prestige_mult: 0.0,
            appearance_cap: default_appearance_cap(),
        }
    }
}

/// Track is the immutable profile of one event. It is never mutated during a race.
#[derive(Debug, Clone)]
pub struct Track {
    pub name: String,
    pub country: String,
    pub engine_danger: f64,
    pub crash_danger: f64,
    pub pace_weight: f64,
    pub consistency_weight: f64,
    pub suspension_importance: f64,
    pub heat_intensity: f64,
    pub weight_pace_importance: f64,
    pub weight_crash_importance: f64,
    pub race_distance_km: f64,
    pub race_length_factor: f64,
    pub grid_size: usize,
    pub grid_risk_baseline: usize,
    pub wet_chance: f64,
    pub hot_chance: f64,
    pub fame_mult: f64,
    pub xp_mult: f64,
    pub fame_cap: f64,
    pub allowed_nationalities: Option<Vec<String>>,
    pub prize_top3: [u32; 3],
    pub finisher_bonus: u32,
    pub appearance_base: u32,
    pub appearance_prestige_mult: f64,
    pub appearance_cap: u32,
}

impl Track {
    pub fn new(name: &str, track_pars: &TrackPars) -> Track {
        let race_distance_km = if track_pars.race_distance_km > 0.0 {
            track_pars.race_distance_km
        } else {
            REFERENCE_RACE_DISTANCE
        };

        Track {
            name: name.to_owned(),
            country: track_pars.country.to_owned(),
            engine_danger: track_pars.engine_danger.max(0.0),
            crash_danger: track_pars.crash_danger.max(0.0),
            pace_weight: track_pars.pace_weight.max(0.0),
            consistency_weight: track_pars.consistency_weight.max(0.0),
            suspension_importance: track_pars.suspension_importance.max(0.0),
            heat_intensity: track_pars.heat_intensity.max(0.0),
            weight_pace_importance: track_pars.weight_pace_importance.max(0.0),
            weight_crash_importance: track_pars.weight_crash_importance.max(0.0),
            race_distance_km,
            race_length_factor: race_distance_km / REFERENCE_RACE_DISTANCE,
            grid_size: track_pars.grid_size,
            grid_risk_baseline: track_pars.grid_risk_baseline,
            wet_chance: track_pars.wet_chance.clamp(0.0, 1.0),
            hot_chance: track_pars.hot_chance.clamp(0.0, 1.0),
            fame_mult: track_pars.fame_mult.max(0.0),
            xp_mult: track_pars.xp_mult.max(0.0),
            fame_cap: track_pars
                .fame_cap
                .map_or(MAX_FAME, |cap| cap.clamp(0.0, MAX_FAME)),
            allowed_nationalities: track_pars.allowed_nationalities.to_owned(),
            prize_top3: track_pars.prize_top3,
            finisher_bonus: track_pars.finisher_bonus,
            appearance_base: track_pars.appearance_base,
            appearance_prestige_mult: track_pars.appearance_prestige_mult,
            appearance_cap: track_pars.appearance_cap,
        }
    }

    /// Profile with all coefficients neutral. Used whenever no profile is known for a race.
    pub fn neutral(name: &str) -> Track {
        Track::new(name, &TrackPars::default())
    }

    /// grid_risk_mult returns the crash multiplier for a crowded grid: +1% per car above the
    /// baseline.
    pub fn grid_risk_mult(&self, no_entrants: usize) -> f64 {
        1.0 + 0.01 * no_entrants.saturating_sub(self.grid_risk_baseline) as f64
    }

    /// Whether a driver of the given nationality may enter this event.
    pub fn admits_nationality(&self, country: &str) -> bool {
        match &self.allowed_nationalities {
            Some(countries) => countries.iter().any(|c| c == country),
            None => true,
        }
    }

    /// Engine top-speed vs. acceleration weights. Tracks that reward pace favour top speed, tracks
    /// that reward consistency favour acceleration.
    pub fn speed_blend(&self) -> (f64, f64) {
        if self.pace_weight >= self.consistency_weight * 1.15 {
            (0.8, 0.2)
        } else if self.consistency_weight >= self.pace_weight * 1.15 {
            (0.55, 0.45)
        } else {
            (0.7, 0.3)
        }
    }
}

/// TrackTable maps race names to track profiles.
#[derive(Debug, Default, Clone)]
pub struct TrackTable {
    track_pars_all: HashMap<String, TrackPars>,
}

impl TrackTable {
    pub fn new(track_pars_all: HashMap<String, TrackPars>) -> TrackTable {
        TrackTable { track_pars_all }
    }

    /// track_for returns the profile of the given race, falling back to the neutral profile.
    pub fn track_for(&self, race_name: &str) -> Track {
        match self.track_pars_all.get(race_name) {
            Some(track_pars) => Track::new(race_name, track_pars),
            None => {
                log::warn!(
                    "No track profile for {}, using neutral coefficients",
                    race_name
                );
                Track::neutral(race_name)
            }
        }
    }
}
