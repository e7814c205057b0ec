use helpers::general::InputValueError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Affiliation of drivers that do not belong to any team. It is an open entry pool, not a team.
pub const INDEPENDENT: &str = "Independent";

pub const MIN_STAT: u8 = 1;
pub const MAX_STAT: u8 = 10;
pub const MAX_FAME: f64 = 5.0;
pub const MAX_CAR_FAMILIARITY: f64 = 10.0;

/// * `name` - Driver name, unique within the roster
/// * `constructor` - Team the driver races for, or "Independent"
/// * `country` - Nationality, used by track nationality allow-lists
/// * `pace`, `consistency`, `aggression`, `mechanical_sympathy`, `wet_skill` - Skills on a 1-10
/// scale
/// * `fame` - Reputation (0.0 - 5.0)
/// * `age` - Age in years, rolled if missing
/// * `peak_age` - Age from which banked XP no longer converts into stat growth, rolled if missing
/// * `decline_age` - Age from which skills start to fade, rolled if missing
/// * `xp` - Banked experience
/// * `car_xp` - Familiarity with the current car (0.0 - 10.0)
/// * `development_rate` - Scales all XP gains
/// * `test_driver` - Debug-only archetype that only enters races if test drivers are enabled
#[derive(Debug, Deserialize, Clone)]
pub struct DriverPars {
    pub name: String,
    #[serde(default = "default_constructor")]
    pub constructor: String,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default = "default_stat")]
    pub pace: u8,
    #[serde(default = "default_stat")]
    pub consistency: u8,
    #[serde(default = "default_stat")]
    pub aggression: u8,
    #[serde(default = "default_stat")]
    pub mechanical_sympathy: u8,
    #[serde(default = "default_stat")]
    pub wet_skill: u8,
    #[serde(default)]
    pub fame: f64,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub peak_age: Option<u32>,
    #[serde(default)]
    pub decline_age: Option<u32>,
    #[serde(default)]
    pub xp: f64,
    #[serde(default)]
    pub car_xp: f64,
    #[serde(default = "default_development_rate")]
    pub development_rate: f64,
    #[serde(default)]
    pub test_driver: bool,
}

fn default_constructor() -> String {
    INDEPENDENT.to_owned()
}

fn default_country() -> String {
    "UK".to_owned()
}

fn default_stat() -> u8 {
    5
}

fn default_development_rate() -> f64 {
    1.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stat {
    Pace,
    Consistency,
    Aggression,
    WetSkill,
    MechanicalSympathy,
}

/// Skills that can grow when banked XP is converted.

pub const TRAINABLE_STATS: [Stat; 4] = [
    Stat::Pace,
    Stat::Consistency,
    Stat::WetSkill,
    Stat::MechanicalSympathy,
];

/// Skills that can fade over the winter once a driver is past their peak.
pub const AGEING_STATS: [Stat; 5] = [
    Stat::Pace,
    Stat::Consistency,
    Stat::Aggression,
    Stat::MechanicalSympathy,
    Stat::WetSkill,
];

#[derive(Debug, Clone, PartialEq)]
pub struct Driver {
    pub name: String,
    pub constructor: String,
    pub country: String,
    pub pace: u8,
    pub consistency: u8,
    pub aggression: u8,
    pub mechanical_sympathy: u8,
    pub wet_skill: u8,
    pub fame: f64,
    pub age: u32,
    pub peak_age: u32,
    pub decline_age: u32,
    pub xp: f64,
    pub car_xp: f64,
    pub development_rate: f64,
    pub test_driver: bool,
    pub retired: bool,
}

impl Driver {
    /// Creates an average driver (all skills 5, no fame) of the given affiliation.
    pub fn new(name: &str, constructor: &str) -> Driver {
        Driver {
            name: name.to_owned(),
            constructor: constructor.to_owned(),
            country: default_country(),
            pace: 5,
            consistency: 5,
            aggression: 5,
            mechanical_sympathy: 5,
            wet_skill: 5,
            fame: 0.0,
            age: 30,
            peak_age: 34,
            decline_age: 38,
            xp: 0.0,
            car_xp: 0.0,
            development_rate: 1.0,
            test_driver: false,
            retired: false,
        }
    }

    /// Builds a driver from its parameters. Skills and fame are clamped to their valid ranges and
    /// missing career-curve ages are rolled.
    pub fn from_pars<R: Rng>(pars: &DriverPars, rng: &mut R) -> Driver {
        let age = pars.age.unwrap_or_else(|| rng.gen_range(34..=42));
        let peak_age = pars.peak_age.unwrap_or_else(|| roll_peak_age(age, rng));
        let decline_age = pars
            .decline_age
            .unwrap_or_else(|| peak_age + rng.gen_range(3..=7))
            .max(peak_age);

        Driver {
            name: pars.name.to_owned(),
            constructor: pars.constructor.to_owned(),
            country: pars.country.to_owned(),
            pace: clamp_stat(pars.pace),
            consistency: clamp_stat(pars.consistency),
            aggression: clamp_stat(pars.aggression),
            mechanical_sympathy: clamp_stat(pars.mechanical_sympathy),
            wet_skill: clamp_stat(pars.wet_skill),
            fame: pars.fame.clamp(0.0, MAX_FAME),
            age,
            peak_age,
            decline_age,
            xp: pars.xp.max(0.0),
            car_xp: pars.car_xp.clamp(0.0, MAX_CAR_FAMILIARITY),
            development_rate: pars.development_rate.max(0.0),
            test_driver: pars.test_driver,
            retired: false,
        }
    }

    pub fn is_independent(&self) -> bool {
        self.constructor == INDEPENDENT
    }

    /// Past-peak drivers bank XP without converting it into stat growth.
    pub fn past_peak(&self) -> bool {
        self.age >= self.peak_age
    }

    /// consistency_factor returns consistency / 10, clamped to [0, 0.95]. It narrows the random
    /// variance of all performance rolls.
    pub fn consistency_factor(&self) -> f64 {
        (f64::from(self.consistency) / 10.0).clamp(0.0, 0.95)
    }

    /// Ability to keep pace in the heat, (mechanical sympathy + consistency) / 20.
    pub fn heat_handling(&self) -> f64 {
        f64::from(self.mechanical_sympathy + self.consistency) / 20.0
    }

    /// Car familiarity normalized to [0, 1].
    pub fn familiarity_frac(&self) -> f64 {
        (self.car_xp / MAX_CAR_FAMILIARITY).clamp(0.0, 1.0)
    }

    pub fn stat(&self, stat: Stat) -> u8 {
        match stat {
            Stat::Pace => self.pace,
            Stat::Consistency => self.consistency,
            Stat::Aggression => self.aggression,
            Stat::WetSkill => self.wet_skill,
            Stat::MechanicalSympathy => self.mechanical_sympathy,
        }
    }

    fn stat_mut(&mut self, stat: Stat) -> &mut u8 {
        match stat {
            Stat::Pace => &mut self.pace,
            Stat::Consistency => &mut self.consistency,
            Stat::Aggression => &mut self.aggression,
            Stat::WetSkill => &mut self.wet_skill,
            Stat::MechanicalSympathy => &mut self.mechanical_sympathy,
        }
    }

    /// raise_stat increases the given stat by one. Returns false if it is already at the maximum.
    pub fn raise_stat(&mut self, stat: Stat) -> bool {
        let value = self.stat_mut(stat);
        if *value >= MAX_STAT {
            return false;
        }
        *value += 1;
        true
    }

    /// lower_stat decreases the given stat by one. Returns false if it is already at the minimum.
    pub fn lower_stat(&mut self, stat: Stat) -> bool {
        let value = self.stat_mut(stat);
        if *value <= MIN_STAT {
            return false;
        }
        *value -= 1;
        true
    }

    pub fn gain_car_familiarity(&mut self, amount: f64) {
        self.car_xp = (self.car_xp + amount).clamp(0.0, MAX_CAR_FAMILIARITY);
    }
}

/// roll_peak_age picks the peak age from the current age: young drivers peak a few years later,
/// drivers in their thirties within the next two years, veterans now.
fn roll_peak_age<R: Rng>(age: u32, rng: &mut R) -> u32 {
    if age >= 40 {
        rng.gen_range((age - 1).max(32)..=age)
    } else if age <= 32 {
        rng.gen_range(age + 1..=age + 4)
    } else {
        rng.gen_range(age..=age + 2)
    }
}

fn clamp_stat(value: u8) -> u8 {
    value.clamp(MIN_STAT, MAX_STAT)
}

/// Stable identifier of a roster entry. It stays valid (and unique) even after other drivers have
/// been removed from the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DriverId(usize);

/// Roster owns all driver records. Drivers are stored in an arena and looked up by their stable id
/// or by name; removed drivers leave an empty slot behind.
#[derive(Debug, Default, Clone)]
pub struct Roster {
    slots: Vec<Option<Driver>>,
    index: HashMap<String, DriverId>,
}

impl Roster {
    pub fn new() -> Roster {
        Roster::default()
    }

    pub fn from_pars<R: Rng>(
        driver_pars_all: &[DriverPars],
        rng: &mut R,
    ) -> Result<Roster, InputValueError> {
        let mut roster = Roster::new();
        for driver_pars in driver_pars_all {
            roster.add(Driver::from_pars(driver_pars, rng))?;
        }
        Ok(roster)
    }

    /// add inserts a driver and returns its id. Names must be unique.
    pub fn add(&mut self, driver: Driver) -> Result<DriverId, InputValueError> {
        if self.index.contains_key(&driver.name) {
            return Err(InputValueError::new(format!(
                "driver {} is already part of the roster",
                driver.name
            )));
        }
        let id = DriverId(self.slots.len());
        self.index.insert(driver.name.to_owned(), id);
        self.slots.push(Some(driver));
        Ok(id)
    }

    /// remove takes a driver out of the roster for good, e.g. on retirement or death.
    pub fn remove(&mut self, id: DriverId) -> Option<Driver> {
        let driver = self.slots.get_mut(id.0)?.take()?;
        self.index.remove(&driver.name);
        Some(driver)
    }

    pub fn get(&self, id: DriverId) -> Option<&Driver> {
        self.slots.get(id.0).and_then(|slot| slot.as_ref())
    }

    pub fn get_mut(&mut self, id: DriverId) -> Option<&mut Driver> {
        self.slots.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    pub fn id_of(&self, name: &str) -> Option<DriverId> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, id: DriverId) -> bool {
        self.get(id).is_some()
    }

    /// Name of the driver, or a placeholder if the driver is no longer part of the roster.
    pub fn name_of(&self, id: DriverId) -> &str {
        self.get(id).map_or("an unknown driver", |driver| driver.name.as_str())
    }

    /// iter returns all drivers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (DriverId, &Driver)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|driver| (DriverId(i), driver)))
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_from_pars_defaults_and_clamps() {
        let pars: DriverPars =
            serde_json::from_str(r#"{"name": "Rex Harlow", "pace": 14, "fame": 7.5}"#).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let driver = Driver::from_pars(&pars, &mut rng);

        assert_eq!(driver.constructor, INDEPENDENT);
        assert_eq!(driver.pace, MAX_STAT);
        assert_eq!(driver.consistency, 5);
        assert_eq!(driver.fame, MAX_FAME);
        assert!((34..=42).contains(&driver.age));
        assert!(driver.peak_age >= driver.age.min(40) - 1);
        assert!(driver.peak_age <= driver.age + 2);
        assert!((driver.peak_age + 3..=driver.peak_age + 7).contains(&driver.decline_age));
    }

    #[test]
    fn test_peak_age_follows_age() {
        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..200 {
            let rookie = roll_peak_age(24, &mut rng);
            assert!((25..=28).contains(&rookie));
            let thirties = roll_peak_age(35, &mut rng);
            assert!((35..=37).contains(&thirties));
            let veteran = roll_peak_age(44, &mut rng);
            assert!((43..=44).contains(&veteran));
        }
    }

    #[test]
    fn test_roster_rejects_duplicate_names() {
        let mut roster = Roster::new();
        roster.add(Driver::new("Nino Ferraro", "Enzoni")).unwrap();
        assert!(roster.add(Driver::new("Nino Ferraro", INDEPENDENT)).is_err());
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_roster_ids_stay_stable_after_removal() {
        let mut roster = Roster::new();
        let a = roster.add(Driver::new("A", INDEPENDENT)).unwrap();
        let b = roster.add(Driver::new("B", INDEPENDENT)).unwrap();

        assert_eq!(roster.remove(a).map(|d| d.name), Some("A".to_owned()));
        assert!(roster.remove(a).is_none());
        assert_eq!(roster.id_of("B"), Some(b));
        assert_eq!(roster.id_of("A"), None);
        assert_eq!(roster.iter().count(), 1);

        let c = roster.add(Driver::new("A", INDEPENDENT)).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_stat_changes_stay_in_range() {
        let mut driver = Driver::new("A", INDEPENDENT);
        driver.pace = 9;
        assert!(driver.raise_stat(Stat::Pace));
        assert!(!driver.raise_stat(Stat::Pace));

        driver.aggression = MIN_STAT + 1;
        assert!(driver.lower_stat(Stat::Aggression));
        assert!(!driver.lower_stat(Stat::Aggression));
        assert_eq!(driver.aggression, MIN_STAT);
        assert_eq!(driver.pace, MAX_STAT);
    }
}
