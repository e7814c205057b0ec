use crate::core::driver::INDEPENDENT;
use crate::core::track::Track;
use serde::Deserialize;

/// * `from_year` - First season with the expanded seat cap
/// * `seat_cap` - Number of cars from that season on
#[derive(Debug, Deserialize, Clone)]
pub struct SeatExpansion {
    pub from_year: u32,
    pub seat_cap: usize,
}

/// * `name` - Constructor name, e.g. Enzoni
/// * `country` - Home country, works teams enter every event held there
/// * `works` - Works teams have a seat cap and a fixed race schedule, other constructors are part of
/// the open entry pool
/// * `seat_cap` - Maximum number of cars per event
/// * `seat_expansion` - Optional larger seat cap from a given season on
/// * `allowed_races` - Events a works team enters outside its home country
/// * `speed` - Car speed of AI entries
/// * `reliability` - Car reliability of AI entries (1 - 10)
/// * `suspension` - Suspension quality of AI entries (1 - 10)
/// * `attack_bias` - Added to the attack probability of the constructor's AI drivers
#[derive(Debug, Deserialize, Clone)]
pub struct ConstructorPars {
    pub name: String,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default)]
    pub works: bool,
    #[serde(default = "default_seat_cap")]
    pub seat_cap: usize,
    #[serde(default)]
    pub seat_expansion: Option<SeatExpansion>,
    #[serde(default)]
    pub allowed_races: Vec<String>,
    #[serde(default = "default_rating")]
    pub speed: f64,
    #[serde(default = "default_rating")]
    pub reliability: f64,
    #[serde(default = "default_rating")]
    pub suspension: f64,
    #[serde(default)]
    pub attack_bias: f64,
}

fn default_country() -> String {
    "Unknown".to_owned()
}

fn default_seat_cap() -> usize {
    2
}

fn default_rating() -> f64 {
    5.0
}

impl ConstructorPars {
    /// seat_cap_for returns the maximum number of cars the constructor may field in the given season.
    pub fn seat_cap_for(&self, year: u32) -> usize {
        match &self.seat_expansion {
            Some(expansion) if year >= expansion.from_year => expansion.seat_cap,
            _ => self.seat_cap,
        }
    }

    /// Whether the team travels to the given event: named races, or any event in its home country.
    pub fn attends(&self, track: &Track) -> bool {
        self.allowed_races.iter().any(|race| race == &track.name) || self.country == track.country
    }
}

/// Car figures of an AI entry as seen by the resolvers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarStats {
    pub speed: f64,
    pub reliability: f64,
    pub suspension: f64,
}

const INDEPENDENT_CAR: CarStats = CarStats {
    speed: 5.0,
    reliability: 4.0,
    suspension: 5.0,
};

const UNKNOWN_CAR: CarStats = CarStats {
    speed: 5.0,
    reliability: 5.0,
    suspension: 5.0,
};

/// Paddock holds all constructors known to the season.
#[derive(Debug, Default, Clone)]
pub struct Paddock {
    constructors: Vec<ConstructorPars>,
}

impl Paddock {
    pub fn new(constructors: Vec<ConstructorPars>) -> Paddock {
        Paddock { constructors }
    }

    pub fn get(&self, name: &str) -> Option<&ConstructorPars> {
        self.constructors.iter().find(|c| c.name == name)
    }

    pub fn works_teams(&self) -> impl Iterator<Item = &ConstructorPars> {
        self.constructors.iter().filter(|c| c.works)
    }

    pub fn is_works_team(&self, name: &str) -> bool {
        self.get(name).map_or(false, |c| c.works)
    }

    /// car_stats looks up the car figures of an AI entry by its constructor.
    pub fn car_stats(&self, constructor: &str) -> CarStats {
        match self.get(constructor) {
            Some(c) => CarStats {
                speed: c.speed,
                reliability: c.reliability,
                suspension: c.suspension,
            },
            None if constructor == INDEPENDENT => INDEPENDENT_CAR,
            None => UNKNOWN_CAR,
        }
    }

    pub fn attack_bias(&self, constructor: &str) -> f64 {
        self.get(constructor).map_or(0.0, |c| c.attack_bias)
    }
}
