use crate::core::driver::{DriverId, Roster};
use crate::core::finale::FinaleState;
use crate::core::track::Track;
use helpers::general::{round_to, InputValueError};
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Points a written-off or destroyed component permanently loses from its repair ceiling.
pub const CEILING_LOSS: f64 = 10.0;

/// Repair cost per restored wear point.
pub const ENGINE_REPAIR_COST: i64 = 4;
pub const CHASSIS_REPAIR_COST: i64 = 3;

/// Suspension rating assumed for cars without a known chassis.
pub const DEFAULT_SUSPENSION: f64 = 5.0;

/// Heat tolerance assumed for engines without a rating.
pub const DEFAULT_HEAT_TOLERANCE: f64 = 5.0;

/// * `name` - Engine name
/// * `speed` - Top speed rating (1 - 10)
/// * `acceleration` - Acceleration rating (1 - 10)
/// * `reliability` - Reliability rating (1 - 10)
/// * `heat_tolerance` - Resistance to hot conditions (1 - 10)
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct EnginePars {
    pub name: String,
    pub speed: f64,
    pub acceleration: f64,
    pub reliability: f64,
    #[serde(default = "default_heat_tolerance")]
    pub heat_tolerance: f64,
}

fn default_heat_tolerance() -> f64 {
    DEFAULT_HEAT_TOLERANCE
}

/// * `name` - Chassis name
/// * `weight` - Weight rating (1 = very light, 10 = very heavy)
/// * `aero` - Aerodynamics rating (1 - 10)
/// * `suspension` - Suspension rating (1 - 10)
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ChassisPars {
    pub name: String,
    pub weight: f64,
    pub aero: f64,
    #[serde(default = "default_suspension")]
    pub suspension: f64,
}

fn default_suspension() -> f64 {
    DEFAULT_SUSPENSION
}

/// Condition of one car component.
/// * `wear` - Short-term condition (0 - 100), restored by repairs up to the repair ceiling
/// * `health` - Long-term condition (0 - 100), only degrades
/// * `max_condition` - Highest wear a repair can restore, lowered by write-offs
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct Condition {
    pub wear: f64,
    pub health: f64,
    pub max_condition: f64,
}

impl Default for Condition {
    fn default() -> Self {
        Condition {
            wear: 100.0,
            health: 100.0,
            max_condition: 100.0,
        }
    }
}

impl Condition {
    pub fn new(wear: f64, health: f64, max_condition: f64) -> Condition {
        Condition {
            wear: clamp_pct(wear),
            health: clamp_pct(health),
            max_condition: clamp_pct(max_condition),
        }
    }

    pub fn wear_frac(&self) -> f64 {
        self.wear / 100.0
    }

    pub fn health_frac(&self) -> f64 {
        self.health / 100.0
    }

    pub fn lose_wear(&mut self, amount: f64) {
        self.wear = clamp_pct(self.wear - amount.max(0.0));
    }

    pub fn lose_health(&mut self, amount: f64) {
        self.health = clamp_pct(self.health - amount.max(0.0));
    }

    /// write_off zeroes the wear and permanently lowers the repair ceiling.
    pub fn write_off(&mut self) {
        self.wear = 0.0;
        self.max_condition = clamp_pct(self.max_condition - CEILING_LOSS);
    }

    /// Highest wear a repair can restore. Long-term fatigue caps it below the nominal ceiling.
    pub fn repair_ceiling(&self) -> f64 {
        self.max_condition.min(self.health)
    }

    /// repair restores the wear up to the repair ceiling and returns the number of restored points.
    pub fn repair(&mut self) -> f64 {
        let ceiling = self.repair_ceiling();
        if self.wear >= ceiling {
            return 0.0;
        }
        let restored = ceiling - self.wear;
        self.wear = ceiling;
        restored
    }
}

fn clamp_pct(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

/// Race strategy. Attacking is faster but wears the car and risks more crashes, nursing the car
/// does the opposite.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RiskMode {
    Attack,
    Neutral,
    Nurse,
}

impl Default for RiskMode {
    fn default() -> Self {
        RiskMode::Neutral
    }
}

impl RiskMode {
    pub fn performance_mult(self) -> f64 {
        match self {
            RiskMode::Attack => 1.03,
            RiskMode::Neutral => 1.0,
            RiskMode::Nurse => 0.97,
        }
    }

    pub fn crash_mult(self) -> f64 {
        match self {
            RiskMode::Attack => 1.3,
            RiskMode::Neutral => 1.0,
            RiskMode::Nurse => 0.7,
        }
    }

    /// Multiplier on post-race wear and health loss.
    pub fn wear_mult(self) -> f64 {
        match self {
            RiskMode::Attack => 1.4,
            RiskMode::Neutral => 1.0,
            RiskMode::Nurse => 0.7,
        }
    }
}

impl FromStr for RiskMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "attack" => Ok(RiskMode::Attack),
            "neutral" => Ok(RiskMode::Neutral),
            "nurse" => Ok(RiskMode::Nurse),
            _ => Err(format!(
                "unknown strategy {}, expected attack, neutral or nurse",
                s
            )),
        }
    }
}

impl fmt::Display for RiskMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            RiskMode::Attack => "attack",
            RiskMode::Neutral => "neutral",
            RiskMode::Nurse => "nurse",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjurySeverity {
    Minor,
    Serious,
    CareerEnding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Injury {
    pub severity: InjurySeverity,
    pub weeks_out: u32,
}

/// * `name` - Team name, drivers of this constructor only race in the team's single seat
/// * `country` - Home country
/// * `contracted_driver` - Name of the driver in the seat (if any)
/// * `engine`, `chassis` - Currently equipped components (if any)
/// * `engine_condition`, `chassis_condition` - Condition of the components
/// * `risk_mode` - Race strategy
/// * `prestige` - Team prestige (0 - 100)
/// * `money` - Team funds
/// * `transport_paid` - Races the team has purchased transport for
/// * `finale_fired` - True if the season finale script has already run for this save
#[derive(Debug, Deserialize, Clone)]
pub struct TeamPars {
    pub name: String,
    #[serde(default = "default_team_country")]
    pub country: String,
    #[serde(default)]
    pub contracted_driver: Option<String>,
    #[serde(default)]
    pub engine: Option<EnginePars>,
    #[serde(default)]
    pub chassis: Option<ChassisPars>,
    #[serde(default)]
    pub engine_condition: Condition,
    #[serde(default)]
    pub chassis_condition: Condition,
    #[serde(default)]
    pub risk_mode: RiskMode,
    #[serde(default)]
    pub prestige: f64,
    #[serde(default)]
    pub money: i64,
    #[serde(default)]
    pub transport_paid: Vec<String>,
    #[serde(default)]
    pub finale_fired: bool,
}

fn default_team_country() -> String {
    "UK".to_owned()
}

/// TeamState is the mutable record of the human-controlled team and its single car.
#[derive(Debug, Clone)]
pub struct TeamState {
    pub name: String,
    pub country: String,
    pub driver: Option<DriverId>,
    pub engine: Option<EnginePars>,
    pub chassis: Option<ChassisPars>,
    pub engine_condition: Condition,
    pub chassis_condition: Condition,
    pub risk_mode: RiskMode,
    pub prestige: f64,
    pub money: i64,
    pub transport_paid: HashSet<String>,
    pub finale: FinaleState,
    pub injury: Option<Injury>,
}

impl TeamState {
    pub fn new(team_pars: &TeamPars, roster: &Roster) -> Result<TeamState, InputValueError> {
        let driver = match &team_pars.contracted_driver {
            Some(name) => Some(roster.id_of(name).ok_or_else(|| {
                InputValueError::new(format!(
                    "contracted driver {} of team {} is not part of the roster",
                    name, team_pars.name
                ))
            })?),
            None => None,
        };
        let c = &team_pars.engine_condition;
        let engine_condition = Condition::new(c.wear, c.health, c.max_condition);
        let c = &team_pars.chassis_condition;
        let chassis_condition = Condition::new(c.wear, c.health, c.max_condition);

        Ok(TeamState {
            name: team_pars.name.to_owned(),
            country: team_pars.country.to_owned(),
            driver,
            engine: team_pars.engine.to_owned(),
            chassis: team_pars.chassis.to_owned(),
            engine_condition,
            chassis_condition,
            risk_mode: team_pars.risk_mode,
            prestige: team_pars.prestige.clamp(0.0, 100.0),
            money: team_pars.money,
            transport_paid: team_pars.transport_paid.iter().cloned().collect(),
            finale: if team_pars.finale_fired {
                FinaleState::Fired
            } else {
                FinaleState::Pending
            },
            injury: None,
        })
    }

    /// car_speed_for_track blends engine top speed and acceleration according to the track
    /// character and combines it with the chassis. A car without engine or chassis has no speed.
    pub fn car_speed_for_track(&self, track: &Track) -> f64 {
        match (&self.engine, &self.chassis) {
            (Some(engine), Some(chassis)) => {
                let (w_speed, w_accel) = track.speed_blend();
                let engine_score = engine.speed * w_speed + engine.acceleration * w_accel;
                let chassis_score = chassis.aero * 0.7 + (11.0 - chassis.weight) * 0.3;
                round_to(engine_score * 0.6 + chassis_score * 0.4, 1)
            }
            _ => 0.0,
        }
    }

    /// Engine reliability rating, zero without an engine.
    pub fn car_reliability(&self) -> f64 {
        self.engine.as_ref().map_or(0.0, |engine| engine.reliability)
    }

    pub fn suspension(&self) -> f64 {
        self.chassis
            .as_ref()
            .map_or(DEFAULT_SUSPENSION, |chassis| chassis.suspension)
    }

    pub fn heat_tolerance(&self) -> f64 {
        self.engine
            .as_ref()
            .map_or(DEFAULT_HEAT_TOLERANCE, |engine| engine.heat_tolerance)
    }

    /// Whether both an engine and a chassis are fitted. The team cannot race otherwise.
    pub fn has_complete_car(&self) -> bool {
        self.engine.is_some() && self.chassis.is_some()
    }

    pub fn has_transport_to(&self, race_name: &str) -> bool {
        self.transport_paid.contains(race_name)
    }

    /// add_prestige applies a prestige delta and keeps prestige within [0, 100].
    pub fn add_prestige(&mut self, delta: f64) {
        self.prestige = (self.prestige + delta).clamp(0.0, 100.0);
    }

    pub fn vacate_seat(&mut self) {
        self.driver = None;
    }

    /// Whether the contracted driver is fit to race.
    pub fn driver_fit(&self) -> bool {
        self.injury.map_or(true, |injury| injury.weeks_out == 0)
    }

    /// advance_week counts down the injury of the contracted driver by one race week.
    pub fn advance_week(&mut self) {
        let recovered = match self.injury.as_mut() {
            Some(injury) => {
                injury.weeks_out = injury.weeks_out.saturating_sub(1);
                injury.weeks_out == 0
            }
            None => false,
        };
        if recovered {
            self.injury = None;
        }
    }

    /// destroy_engine writes off the engine condition and removes the engine from the car.
    pub fn destroy_engine(&mut self) {
        self.engine_condition.write_off();
        self.engine = None;
    }

    /// write_off_chassis writes off the chassis condition and removes the chassis from the car.
    pub fn write_off_chassis(&mut self) {
        self.chassis_condition.write_off();
        self.chassis = None;
    }

    /// repair_engine restores the engine wear up to its repair ceiling and pays for it. Returns the
    /// cost, zero if no engine is fitted.
    pub fn repair_engine(&mut self) -> i64 {
        if self.engine.is_none() {
            return 0;
        }
        let cost = (self.engine_condition.repair() * ENGINE_REPAIR_COST as f64).round() as i64;
        self.money -= cost;
        cost
    }

    /// repair_chassis restores the chassis wear up to its repair ceiling and pays for it. Returns
    /// the cost, zero if no chassis is fitted.
    pub fn repair_chassis(&mut self) -> i64 {
        if self.chassis.is_none() {
            return 0;
        }
        let cost = (self.chassis_condition.repair() * CHASSIS_REPAIR_COST as f64).round() as i64;
        self.money -= cost;
        cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::driver::{Driver, INDEPENDENT};
    use crate::core::track::TrackPars;

    fn team_pars() -> TeamPars {
        serde_json::from_str(
            r#"{
                "name": "Harlow Racing",
                "contracted_driver": "Rex Harlow",
                "engine": {"name": "Old Straight Six", "speed": 4, "acceleration": 3, "reliability": 4},
                "chassis": {"name": "Ladder Frame", "weight": 6, "aero": 3, "suspension": 4},
                "engine_condition": {"wear": 80, "health": 90, "max_condition": 100},
                "money": 500
            }"#,
        )
        .unwrap()
    }

    fn roster() -> Roster {
        let mut roster = Roster::new();
        roster.add(Driver::new("Rex Harlow", INDEPENDENT)).unwrap();
        roster
    }

    #[test]
    fn test_new_resolves_contracted_driver() {
        let team = TeamState::new(&team_pars(), &roster()).unwrap();
        assert!(team.driver.is_some());
        assert_eq!(team.finale, FinaleState::Pending);

        let mut pars = team_pars();
        pars.contracted_driver = Some("Nobody".to_owned());
        assert!(TeamState::new(&pars, &roster()).is_err());
    }

    #[test]
    fn test_car_speed_blend() {
        let mut team_pars = team_pars();
        if let Some(engine) = team_pars.engine.as_mut() {
            engine.speed = 8.0;
            engine.acceleration = 2.0;
        }
        let team = TeamState::new(&team_pars, &roster()).unwrap();
        // chassis 3 * 0.7 + 5 * 0.3 = 3.6 throughout
        // engine 8 * 0.7 + 2 * 0.3 = 6.2 -> 6.2 * 0.6 + 3.6 * 0.4 = 5.16
        assert_eq!(team.car_speed_for_track(&Track::neutral("Test GP")), 5.2);

        let mut pars = TrackPars::default();
        pars.pace_weight = 1.3;
        // engine 8 * 0.8 + 2 * 0.2 = 6.8 -> 5.52
        assert_eq!(team.car_speed_for_track(&Track::new("Fast GP", &pars)), 5.5);

        let mut pars = TrackPars::default();
        pars.consistency_weight = 1.3;
        // engine 8 * 0.55 + 2 * 0.45 = 5.3 -> 4.62
        assert_eq!(team.car_speed_for_track(&Track::new("Twisty GP", &pars)), 4.6);
    }

    #[test]
    fn test_destroyed_engine_zeroes_speed_and_reliability() {
        let mut team = TeamState::new(&team_pars(), &roster()).unwrap();
        team.destroy_engine();
        assert_eq!(team.engine_condition.wear, 0.0);
        assert_eq!(team.engine_condition.max_condition, 90.0);
        assert_eq!(team.car_reliability(), 0.0);
        assert_eq!(team.car_speed_for_track(&Track::neutral("Test GP")), 0.0);
    }

    #[test]
    fn test_repair_is_capped_by_health() {
        let mut team = TeamState::new(&team_pars(), &roster()).unwrap();
        let cost = team.repair_engine();
        assert_eq!(team.engine_condition.wear, 90.0);
        assert_eq!(cost, 40);
        assert_eq!(team.money, 460);
        assert_eq!(team.repair_engine(), 0);
    }

    #[test]
    fn test_missing_parts_are_not_repaired() {
        let mut team = TeamState::new(&team_pars(), &roster()).unwrap();
        team.destroy_engine();
        team.write_off_chassis();
        assert!(!team.has_complete_car());

        assert_eq!(team.repair_engine(), 0);
        assert_eq!(team.repair_chassis(), 0);
        assert_eq!(team.money, 500);
        assert_eq!(team.engine_condition.wear, 0.0);
        assert_eq!(team.chassis_condition.wear, 0.0);
    }

    #[test]
    fn test_condition_clamps() {
        let mut c = Condition::new(150.0, -3.0, 100.0);
        assert_eq!(c.wear, 100.0);
        assert_eq!(c.health, 0.0);
        c.lose_wear(250.0);
        assert_eq!(c.wear, 0.0);
        c.write_off();
        c.write_off();
        assert_eq!(c.max_condition, 80.0);
    }

    #[test]
    fn test_injury_counts_down() {
        let mut team = TeamState::new(&team_pars(), &roster()).unwrap();
        team.injury = Some(Injury {
            severity: InjurySeverity::Serious,
            weeks_out: 2,
        });
        assert!(!team.driver_fit());
        team.advance_week();
        assert!(!team.driver_fit());
        team.advance_week();
        assert!(team.driver_fit());
        assert_eq!(team.injury, None);
    }

    #[test]
    fn test_risk_mode_from_str() {
        assert_eq!("Attack".parse::<RiskMode>(), Ok(RiskMode::Attack));
        assert!("flat out".parse::<RiskMode>().is_err());
    }
}
