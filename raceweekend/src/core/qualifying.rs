use crate::core::car::TeamState;
use crate::core::driver::{Driver, DriverId, Roster};
use crate::core::narrative::NarrativeLog;
use crate::core::season::Season;
use crate::core::track::Track;
use helpers::general::{argsort, SortOrder};
use rand::Rng;
use rand_distr::{Distribution, Uniform};
use std::collections::HashMap;

/// Share of the score that the random perturbation may reach for a driver without consistency.
const VARIANCE_SCALE: f64 = 0.3;

/// QualifyingResult contains the qualifying order and the derived starting-grid multipliers.
/// * `order` - Entrants with their final score, best first
/// * `grid_bonus` - Race performance multiplier per entrant
/// * `wet` - True if the session was wet
#[derive(Debug, Clone)]
pub struct QualifyingResult {
    pub order: Vec<(DriverId, f64)>,
    pub grid_bonus: HashMap<DriverId, f64>,
    pub wet: bool,
}

impl QualifyingResult {
    pub fn position_of(&self, id: DriverId) -> Option<usize> {
        self.order
            .iter()
            .position(|(entrant, _)| *entrant == id)
            .map(|idx| idx + 1)
    }
}

/// grid_bonus_for_position returns the race performance multiplier for a (1-based) qualifying
/// position.
pub fn grid_bonus_for_position(position: usize) -> f64 {
    match position {
        1 => 1.04,
        2 => 1.03,
        3 => 1.02,
        4..=6 => 1.01,
        7..=10 => 1.00,
        _ => 0.99,
    }
}

/// Car speed term of an entrant: track-blended speed for the human car, constructor figures for AI
/// entrants.
pub fn car_speed(
    id: DriverId,
    driver: &Driver,
    track: &Track,
    team: &TeamState,
    season: &Season,
) -> f64 {
    if team.driver == Some(id) {
        team.car_speed_for_track(track)
    } else {
        season.paddock.car_stats(&driver.constructor).speed
    }
}

/// resolve_qualifying scores every entrant once and derives the starting-grid multipliers from the
/// resulting order.
pub fn resolve_qualifying<R: Rng>(
    roster: &Roster,
    grid: &[DriverId],
    track: &Track,
    team: &TeamState,
    season: &Season,
    log: &mut NarrativeLog,
    rng: &mut R,
) -> QualifyingResult {
    let wet = rng.gen::<f64>() < track.wet_chance;
    let unit = Uniform::new_inclusive(-1.0, 1.0);

    let mut entrants: Vec<DriverId> = Vec::with_capacity(grid.len());
    let mut scores: Vec<f64> = Vec::with_capacity(grid.len());

    for &id in grid {
        let driver = match roster.get(id) {
            Some(driver) => driver,
            None => {
                log::warn!("Qualifying: entrant {:?} is not part of the roster", id);
                continue;
            }
        };

        let mut score = f64::from(driver.pace) * track.pace_weight
            + f64::from(driver.consistency) * 0.4 * track.consistency_weight;
        score *= 1.0 + (f64::from(driver.aggression) - 5.0) * 0.02;
        score += car_speed(id, driver, track, team, season);

        if wet {
            score *= 0.9 + f64::from(driver.wet_skill) / 10.0 * 0.4;
        }

        let spread = (1.0 - driver.consistency_factor()) * score * VARIANCE_SCALE;
        score += unit.sample(rng) * spread;

        entrants.push(id);
        scores.push(score);
    }

    let order: Vec<(DriverId, f64)> = argsort(&scores, SortOrder::Descending)
        .into_iter()
        .map(|idx| (entrants[idx], scores[idx]))
        .collect();
    let grid_bonus: HashMap<DriverId, f64> = order
        .iter()
        .enumerate()
        .map(|(idx, (id, _))| (*id, grid_bonus_for_position(idx + 1)))
        .collect();

    log_session(&order, roster, track, wet, log);

    QualifyingResult {
        order,
        grid_bonus,
        wet,
    }
}

fn constructor_of(roster: &Roster, id: DriverId) -> &str {
    roster
        .get(id)
        .map_or("an unknown team", |driver| driver.constructor.as_str())
}

fn log_session(
    order: &[(DriverId, f64)],
    roster: &Roster,
    track: &Track,
    wet: bool,
    log: &mut NarrativeLog,
) {
    let session = if wet { "wet" } else { "dry" };

    match order {
        [] => log.push(format!(
            "Qualifying for {} ({} session): no cars set a time.",
            track.name, session
        )),
        [(pole, _)] => log.push(format!(
            "Qualifying for {} ({} session): {} takes pole for {}.",
            track.name,
            session,
            roster.name_of(*pole),
            constructor_of(roster, *pole)
        )),
        [(pole, _), (second, _), ..] => log.push(format!(
            "Qualifying for {} ({} session): {} takes pole for {}, {} joins on the front row.",
            track.name,
            session,
            roster.name_of(*pole),
            constructor_of(roster, *pole),
            roster.name_of(*second)
        )),
    }

    for (idx, (id, score)) in order.iter().enumerate() {
        log.push(format!(
            "Q{}: {} ({}) {:.2}",
            idx + 1,
            roster.name_of(*id),
            constructor_of(roster, *id),
            score
        ));
    }
}
