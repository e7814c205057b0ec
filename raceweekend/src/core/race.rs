use crate::core::car::{Injury, InjurySeverity, RiskMode, TeamState, DEFAULT_HEAT_TOLERANCE};
use crate::core::constructor::Paddock;
use crate::core::driver::{Driver, DriverId, Roster};
use crate::core::explain::{explain_failure, FailureKind, Perspective, RaceContext};
use crate::core::finale::trigger_finale;
use crate::core::narrative::NarrativeLog;
use crate::core::risk::RiskPipeline;
use crate::core::season::Season;
use crate::core::track::Track;
use crate::core::weather::Weather;
use crate::post::race_result::{DnfCause, RaceResult};
use helpers::general::{argsort, SortOrder};
use rand::Rng;
use rand_distr::{Distribution, Uniform};
use std::collections::HashMap;

/// Share of the base performance that the random perturbation may reach for a driver without
/// consistency.
const VARIANCE_SCALE: f64 = 0.25;
/// Variance reduction at maximum car familiarity.
const FAMILIARITY_VARIANCE_DAMPING: f64 = 0.2;
/// Crash probability reduction at maximum car familiarity.
const FAMILIARITY_CRASH_REDUCTION: f64 = 0.15;
const CATASTROPHIC_ENGINE_CHANCE: f64 = 0.4;
const HEAVY_SHUNT_CHANCE: f64 = 0.35;
const CAREER_ENDING_INJURY: f64 = 0.05;
const SERIOUS_INJURY: f64 = 0.20;

// engine failure factors
pub const MECHANICAL_SYMPATHY: &str = "driver mechanical sympathy";
pub const TRACK_ENGINE_STRAIN: &str = "track engine strain";
pub const ENGINE_CONDITION: &str = "engine condition";
pub const ENGINE_FATIGUE: &str = "long-term engine fatigue";
pub const RACE_DISTANCE: &str = "race distance";
pub const HEAT_STRESS: &str = "heat stress";

// crash factors
pub const AGGRESSION: &str = "driver aggression";
pub const ERA_SAFETY: &str = "era safety standards";
pub const TRACK_DANGER: &str = "track danger";
pub const CROWDED_GRID: &str = "crowded grid";
pub const LIGHT_CHASSIS: &str = "light chassis";
pub const CHASSIS_CONDITION: &str = "chassis condition";
pub const WET_CONDITIONS: &str = "wet conditions";
pub const SUSPENSION: &str = "suspension";
pub const RACE_STRATEGY: &str = "race strategy";
pub const CAR_FAMILIARITY: &str = "car familiarity";

/// Terminal state of one entrant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntrantOutcome {
    Finished,
    DnfEngine,
    DnfCrash,
    DnfUnknown,
}

/// EntrantReport keeps everything the race decided about one entrant. Name and constructor are
/// copied because the driver may leave the roster during the race.
#[derive(Debug, Clone)]
pub struct EntrantReport {
    pub id: DriverId,
    pub name: String,
    pub constructor: String,
    pub human: bool,
    pub strategy: RiskMode,
    pub performance: f64,
    pub engine_risk: Option<RiskPipeline>,
    pub crash_risk: Option<RiskPipeline>,
    pub outcome: EntrantOutcome,
}

/// choose_ai_strategy lets an AI driver pick a race strategy. Aggressive drivers and constructors
/// attack more, independents nurse their cars more.
pub fn choose_ai_strategy<R: Rng>(driver: &Driver, paddock: &Paddock, rng: &mut R) -> RiskMode {
    let (mut attack, mut nurse) = match driver.aggression {
        a if a >= 7 => (0.6, 0.1),
        a if a <= 3 => (0.1, 0.6),
        _ => (0.3, 0.3),
    };
    attack += paddock.attack_bias(&driver.constructor);
    if driver.is_independent() {
        nurse += 0.1;
    }
    let neutral = (1.0 - attack - nurse).max(0.0);

    let roll = rng.gen::<f64>();
    if roll < attack {
        RiskMode::Attack
    } else if roll < attack + neutral {
        RiskMode::Neutral
    } else {
        RiskMode::Nurse
    }
}

/// Inputs shared by all entrants of one race.
struct RaceSetup<'a> {
    track: &'a Track,
    season: &'a Season,
    weather: Weather,
    grid_risk_mult: f64,
}

/// resolve_race runs every grid entrant through the race once. Each entrant ends in exactly one
/// terminal state, finishers are classified by performance. The human car's wear and health are
/// updated and the story of the race is appended to the log.
#[allow(clippy::too_many_arguments)]
pub fn resolve_race<R: Rng>(
    roster: &mut Roster,
    grid: &[DriverId],
    grid_bonus: &HashMap<DriverId, f64>,
    track: &Track,
    team: &mut TeamState,
    season: &Season,
    weather: Weather,
    log: &mut NarrativeLog,
    rng: &mut R,
) -> RaceResult {
    let setup = RaceSetup {
        track,
        season,
        weather,
        grid_risk_mult: track.grid_risk_mult(grid.len()),
    };
    let player = team.driver.filter(|id| grid.contains(id));

    let mut finishers: Vec<(DriverId, f64)> = Vec::with_capacity(grid.len());
    let mut dnfs: Vec<(DriverId, DnfCause)> = Vec::new();
    let mut entrants: Vec<EntrantReport> = Vec::with_capacity(grid.len());

    for &id in grid {
        let report = resolve_entrant(id, roster, team, &setup, grid_bonus, log, rng);
        match report.outcome {
            EntrantOutcome::Finished => finishers.push((id, report.performance)),
            EntrantOutcome::DnfEngine => dnfs.push((id, DnfCause::Engine)),
            EntrantOutcome::DnfCrash => dnfs.push((id, DnfCause::Crash)),
            EntrantOutcome::DnfUnknown => dnfs.push((id, DnfCause::Unknown)),
        }
        entrants.push(report);
    }

    // classification
    let performances: Vec<f64> = finishers.iter().map(|(_, perf)| *perf).collect();
    let mut finishers: Vec<(DriverId, f64)> = argsort(&performances, SortOrder::Descending)
        .into_iter()
        .map(|idx| finishers[idx])
        .collect();

    // scripted finale
    if let Some(victim) = trigger_finale(
        &mut team.finale,
        season.finale.as_ref(),
        season.year,
        &track.name,
        roster,
    ) {
        apply_finale(
            victim,
            roster,
            team,
            &mut finishers,
            &mut dnfs,
            &mut entrants,
            track,
            log,
        );
    }

    if let Some(player) = player {
        let finished = finishers.iter().any(|(id, _)| *id == player);
        apply_post_race_wear(team, track, weather, finished, log, rng);
    }

    log_headline(&finishers, &entrants, track, log);

    RaceResult {
        race_name: track.name.to_owned(),
        weather,
        finishers,
        dnfs,
        entrants,
        player,
    }
}

// -------------------------------------------------------------------------------------------------
// PER-ENTRANT STATE MACHINE ------------------------------------------------------------------------
// -------------------------------------------------------------------------------------------------

fn resolve_entrant<R: Rng>(
    id: DriverId,
    roster: &mut Roster,
    team: &mut TeamState,
    setup: &RaceSetup,
    grid_bonus: &HashMap<DriverId, f64>,
    log: &mut NarrativeLog,
    rng: &mut R,
) -> EntrantReport {
    let driver = match roster.get(id) {
        Some(driver) => driver.clone(),
        None => {
            log::warn!("Race: entrant {:?} is not part of the roster", id);
            return EntrantReport {
                id,
                name: roster.name_of(id).to_owned(),
                constructor: String::new(),
                human: false,
                strategy: RiskMode::Neutral,
                performance: 0.0,
                engine_risk: None,
                crash_risk: None,
                outcome: EntrantOutcome::DnfUnknown,
            };
        }
    };
    let human = team.driver == Some(id);
    let strategy = if human {
        team.risk_mode
    } else {
        choose_ai_strategy(&driver, &setup.season.paddock, rng)
    };
    let bonus = grid_bonus.get(&id).copied().unwrap_or(1.0);

    let mut report = EntrantReport {
        id,
        name: driver.name.to_owned(),
        constructor: driver.constructor.to_owned(),
        human,
        strategy,
        performance: performance(&driver, human, strategy, bonus, team, setup, rng),
        engine_risk: None,
        crash_risk: None,
        outcome: EntrantOutcome::Finished,
    };

    // engine failure
    let engine_risk = engine_failure_risk(&driver, human, team, setup);
    let engine_failed = engine_risk.roll(rng);
    log::debug!(
        "{}: performance {:.3}, engine failure chance {:.3} (base {:.3})",
        driver.name,
        report.performance,
        engine_risk.probability(),
        engine_risk.base()
    );
    if engine_failed {
        handle_engine_failure(&driver, human, &engine_risk, team, setup, log, rng);
        report.engine_risk = Some(engine_risk);
        report.outcome = EntrantOutcome::DnfEngine;
        return report;
    }
    report.engine_risk = Some(engine_risk);

    // crash
    let crash_risk = crash_risk(&driver, human, strategy, team, setup);
    let crashed = crash_risk.roll(rng);
    log::debug!(
        "{}: crash chance {:.3} (base {:.3})",
        driver.name,
        crash_risk.probability(),
        crash_risk.base()
    );
    if crashed {
        handle_crash(id, &driver, human, &crash_risk, roster, team, setup, log, rng);
        report.crash_risk = Some(crash_risk);
        report.outcome = EntrantOutcome::DnfCrash;
        return report;
    }
    report.crash_risk = Some(crash_risk);

    report
}

fn performance<R: Rng>(
    driver: &Driver,
    human: bool,
    strategy: RiskMode,
    grid_bonus: f64,
    team: &TeamState,
    setup: &RaceSetup,
    rng: &mut R,
) -> f64 {
    let track = setup.track;
    let base = f64::from(driver.pace) * track.pace_weight
        + f64::from(driver.consistency) * 0.4 * track.consistency_weight;

    let suspension = suspension_of(driver, human, team, &setup.season.paddock);
    let suspension_mult = scale_by_importance(
        (1.0 - (suspension - 5.0) * 0.04).clamp(0.8, 1.2),
        track.suspension_importance,
    );
    let familiarity_mult = 1.0 - FAMILIARITY_VARIANCE_DAMPING * driver.familiarity_frac();
    let spread = (1.0 - driver.consistency_factor())
        * base
        * VARIANCE_SCALE
        * suspension_mult
        * familiarity_mult;
    let unit = Uniform::new_inclusive(-1.0, 1.0);

    let car_speed = if human {
        team.car_speed_for_track(track) * (0.9 + 0.1 * team.engine_condition.health_frac())
    } else {
        setup.season.paddock.car_stats(&driver.constructor).speed
    };

    let mut perf = base + unit.sample(rng) * spread + car_speed;

    if setup.weather.is_wet() {
        perf *= 0.9 + f64::from(driver.wet_skill) / 10.0 * 0.3;
    } else if setup.weather.is_hot() {
        perf *= 0.97 + driver.heat_handling() * 0.06;
    }

    if human {
        if let Some(chassis) = &team.chassis {
            perf *= 1.0 + (5.0 - chassis.weight) * 0.01 * track.weight_pace_importance;
        }
    }

    perf * strategy.performance_mult() * grid_bonus
}

fn engine_failure_risk(
    driver: &Driver,
    human: bool,
    team: &TeamState,
    setup: &RaceSetup,
) -> RiskPipeline {
    let track = setup.track;
    let reliability = if human {
        team.car_reliability()
    } else {
        setup.season.paddock.car_stats(&driver.constructor).reliability
    };
    let heat_tolerance = if human {
        team.heat_tolerance()
    } else {
        DEFAULT_HEAT_TOLERANCE
    };

    let mut risk = RiskPipeline::new((11.0 - reliability) * 0.02 * setup.season.era.reliability_mult);
    risk.apply(
        MECHANICAL_SYMPATHY,
        1.0 + (5.0 - f64::from(driver.mechanical_sympathy)) * 0.05,
    )
    .apply(TRACK_ENGINE_STRAIN, track.engine_danger);

    if human {
        let condition = &team.engine_condition;
        risk.apply(
            ENGINE_CONDITION,
            1.0 + (1.0 - condition.wear_frac().clamp(0.2, 1.0)),
        )
        .apply_if(
            condition.health < 75.0,
            ENGINE_FATIGUE,
            1.0 / condition.health_frac().clamp(0.2, 1.0),
        );
    }

    risk.apply(RACE_DISTANCE, track.race_length_factor).apply_if(
        setup.weather.is_hot(),
        HEAT_STRESS,
        track.heat_intensity * (1.0 + (5.0 - heat_tolerance) * 0.06),
    );
    risk
}

fn crash_risk(
    driver: &Driver,
    human: bool,
    strategy: RiskMode,
    team: &TeamState,
    setup: &RaceSetup,
) -> RiskPipeline {
    let track = setup.track;
    let suspension = suspension_of(driver, human, team, &setup.season.paddock);
    let suspension_mult = scale_by_importance(
        (1.08 - (suspension - 5.0) * 0.02).clamp(0.88, 1.15),
        track.suspension_importance,
    );

    let mut risk = RiskPipeline::new((11.0 - f64::from(driver.consistency)) * 0.012);
    risk.apply(
        AGGRESSION,
        1.0 + (f64::from(driver.aggression) - 5.0) * 0.05,
    )
    .apply(
        MECHANICAL_SYMPATHY,
        1.0 + (5.0 - f64::from(driver.mechanical_sympathy)) * 0.03,
    )
    .apply(ERA_SAFETY, setup.season.era.crash_mult)
    .apply(TRACK_DANGER, track.crash_danger)
    .apply(CROWDED_GRID, setup.grid_risk_mult);

    if human {
        if let Some(chassis) = &team.chassis {
            risk.apply(
                LIGHT_CHASSIS,
                1.0 + (5.0 - chassis.weight) * 0.03 * track.weight_crash_importance,
            );
        }
        risk.apply(
            CHASSIS_CONDITION,
            1.0 + 0.1 * (1.0 - team.chassis_condition.wear_frac().clamp(0.0, 1.0)),
        );
    }

    risk.apply_if(
        setup.weather.is_wet(),
        WET_CONDITIONS,
        1.40 - f64::from(driver.wet_skill) / 10.0 * 0.30,
    )
    .apply(SUSPENSION, suspension_mult)
    .apply_if(human, RACE_STRATEGY, strategy.crash_mult())
    .apply(
        CAR_FAMILIARITY,
        1.0 - FAMILIARITY_CRASH_REDUCTION * driver.familiarity_frac(),
    );
    risk
}

fn suspension_of(driver: &Driver, human: bool, team: &TeamState, paddock: &Paddock) -> f64 {
    if human {
        team.suspension()
    } else {
        paddock.car_stats(&driver.constructor).suspension
    }
}

/// Moves a multiplier towards 1.0 when the track gives the underlying property less importance.
fn scale_by_importance(mult: f64, importance: f64) -> f64 {
    1.0 + (mult - 1.0) * importance
}

fn race_context(setup: &RaceSetup) -> RaceContext {
    RaceContext {
        hot: setup.weather.is_hot(),
        engine_danger: setup.track.engine_danger,
        race_length_factor: setup.track.race_length_factor,
    }
}

// -------------------------------------------------------------------------------------------------
// RETIREMENT CONSEQUENCES -------------------------------------------------------------------------
// -------------------------------------------------------------------------------------------------

fn handle_engine_failure<R: Rng>(
    driver: &Driver,
    human: bool,
    risk: &RiskPipeline,
    team: &mut TeamState,
    setup: &RaceSetup,
    log: &mut NarrativeLog,
    rng: &mut R,
) {
    let ctx = race_context(setup);
    let breakdown = risk.breakdown();

    if !human {
        log.push(format!(
            "{} ({}) retires with engine failure.",
            driver.name, driver.constructor
        ));
        log.push(explain_failure(
            &breakdown,
            FailureKind::Engine,
            Perspective::Paddock,
            &ctx,
        ));
        return;
    }

    if team.engine_condition.wear < 50.0 && rng.gen::<f64>() < CATASTROPHIC_ENGINE_CHANCE {
        let engine_name = team
            .engine
            .as_ref()
            .map_or_else(|| "engine".to_owned(), |engine| engine.name.to_owned());
        team.destroy_engine();
        log.push(format!(
            "Disaster for {}: the {} lets go in a cloud of smoke and is destroyed beyond repair.",
            driver.name, engine_name
        ));
    } else {
        log.push(format!("{} retires with engine failure.", driver.name));
    }
    log.push(explain_failure(
        &breakdown,
        FailureKind::Engine,
        Perspective::Team,
        &ctx,
    ));
}

#[allow(clippy::too_many_arguments)]
fn handle_crash<R: Rng>(
    id: DriverId,
    driver: &Driver,
    human: bool,
    risk: &RiskPipeline,
    roster: &mut Roster,
    team: &mut TeamState,
    setup: &RaceSetup,
    log: &mut NarrativeLog,
    rng: &mut R,
) {
    let ctx = race_context(setup);
    let breakdown = risk.breakdown();

    if !human {
        log.push(format!(
            "{} ({}) crashes out of the race.",
            driver.name, driver.constructor
        ));
        log.push(explain_failure(
            &breakdown,
            FailureKind::Crash,
            Perspective::Paddock,
            &ctx,
        ));
        return;
    }

    let heavy = rng.gen::<f64>() < HEAVY_SHUNT_CHANCE;
    if heavy {
        log.push(format!(
            "{} has a heavy shunt and the car is badly damaged.",
            driver.name
        ));
    } else {
        log.push(format!("{} crashes out of the race.", driver.name));
    }
    log.push(explain_failure(
        &breakdown,
        FailureKind::Crash,
        Perspective::Team,
        &ctx,
    ));

    apply_injury(id, driver, roster, team, log, rng);
    apply_crash_damage(heavy, team, log, rng);
}

fn apply_injury<R: Rng>(
    id: DriverId,
    driver: &Driver,
    roster: &mut Roster,
    team: &mut TeamState,
    log: &mut NarrativeLog,
    rng: &mut R,
) {
    let roll = rng.gen::<f64>();
    if roll < CAREER_ENDING_INJURY {
        if let Some(injured) = roster.get_mut(id) {
            injured.retired = true;
        }
        team.injury = Some(Injury {
            severity: InjurySeverity::CareerEnding,
            weeks_out: 0,
        });
        team.vacate_seat();
        log.push(format!(
            "{} suffers career-ending injuries. The seat is now vacant.",
            driver.name
        ));
    } else if roll < SERIOUS_INJURY {
        let weeks_out = rng.gen_range(2..=6);
        team.injury = Some(Injury {
            severity: InjurySeverity::Serious,
            weeks_out,
        });
        log.push(format!(
            "{} is seriously injured and will miss {} weeks.",
            driver.name, weeks_out
        ));
    } else {
        let weeks_out = rng.gen_range(1..=2);
        team.injury = Some(Injury {
            severity: InjurySeverity::Minor,
            weeks_out,
        });
        log.push(format!(
            "{} escapes with minor injuries and will miss {} week{}.",
            driver.name,
            weeks_out,
            if weeks_out == 1 { "" } else { "s" }
        ));
    }
}

fn apply_crash_damage<R: Rng>(
    heavy: bool,
    team: &mut TeamState,
    log: &mut NarrativeLog,
    rng: &mut R,
) {
    let (chassis_loss, engine_loss) = if heavy {
        (rng.gen_range(20.0..40.0), rng.gen_range(8.0..20.0))
    } else {
        (rng.gen_range(8.0..18.0), rng.gen_range(2.0..8.0))
    };
    let chassis_was_tired = team.chassis_condition.wear < 50.0;
    let engine_was_tired = team.engine_condition.wear < 50.0;

    team.chassis_condition.lose_wear(chassis_loss);
    team.chassis_condition.lose_health(chassis_loss * 0.5);
    team.engine_condition.lose_wear(engine_loss);
    team.engine_condition.lose_health(engine_loss * 0.5);

    let mut chassis_write_off = 0.15;
    if chassis_was_tired {
        chassis_write_off += 0.2;
    }
    if heavy {
        chassis_write_off += 0.2;
    }
    if team.chassis.is_some() && rng.gen::<f64>() < chassis_write_off {
        team.write_off_chassis();
        log.push("The chassis is written off and has to be replaced.");
    }

    let mut engine_write_off = 0.08;
    if engine_was_tired {
        engine_write_off += 0.15;
    }
    if heavy {
        engine_write_off += 0.15;
    }
    if team.engine.is_some() && rng.gen::<f64>() < engine_write_off {
        team.destroy_engine();
        log.push("The engine did not survive the impact and has to be replaced.");
    }
}

#[allow(clippy::too_many_arguments)]
fn apply_finale(
    victim: DriverId,
    roster: &mut Roster,
    team: &mut TeamState,
    finishers: &mut Vec<(DriverId, f64)>,
    dnfs: &mut Vec<(DriverId, DnfCause)>,
    entrants: &mut [EntrantReport],
    track: &Track,
    log: &mut NarrativeLog,
) {
    finishers.retain(|(id, _)| *id != victim);
    if let Some(report) = entrants.iter_mut().find(|report| report.id == victim) {
        report.outcome = EntrantOutcome::DnfCrash;
        match dnfs.iter_mut().find(|(id, _)| *id == victim) {
            Some(entry) => entry.1 = DnfCause::Crash,
            None => dnfs.push((victim, DnfCause::Crash)),
        }
    }

    if team.driver == Some(victim) {
        team.vacate_seat();
    }

    if let Some(driver) = roster.remove(victim) {
        log::info!("Scripted finale at {}: {} is killed", track.name, driver.name);
        log.push(format!(
            "Tragedy at the {}: {} ({}) is killed in a violent accident.",
            track.name, driver.name, driver.constructor
        ));
        log.push("The paddock falls silent. Racing will never quite be the same.");
    }
}

// -------------------------------------------------------------------------------------------------
// POST-RACE -----------------------------------------------------------------------------------------
// -------------------------------------------------------------------------------------------------

/// apply_post_race_wear degrades the human car after every race, on top of any damage from
/// retirements. Running the full distance wears the car more than an early retirement.
pub fn apply_post_race_wear<R: Rng>(
    team: &mut TeamState,
    track: &Track,
    weather: Weather,
    finished: bool,
    log: &mut NarrativeLog,
    rng: &mut R,
) {
    let risk_mult = team.risk_mode.wear_mult();
    let rlf = track.race_length_factor;
    let suspension_mult = scale_by_importance(
        (1.06 - (team.suspension() - 5.0) * 0.015).clamp(0.90, 1.12),
        track.suspension_importance,
    );
    let distance_mult = if finished { 1.2 } else { 0.8 };
    let noise = Uniform::new_inclusive(0.8, 1.2);

    if team.engine.is_some() {
        let mut wear = 8.0 * rlf * track.engine_danger * risk_mult;
        if weather.is_hot() {
            wear *= 1.25;
        }
        team.engine_condition.lose_wear(wear * noise.sample(rng));
        team.engine_condition
            .lose_health(4.0 * rlf * track.engine_danger * risk_mult * distance_mult);
    }

    if team.chassis.is_some() {
        let mut wear = 5.0 * rlf * track.crash_danger * risk_mult * suspension_mult;
        if weather.is_wet() {
            wear *= 0.9;
        }
        team.chassis_condition.lose_wear(wear * noise.sample(rng));
        team.chassis_condition
            .lose_health(3.0 * rlf * track.crash_danger * risk_mult * distance_mult);
    }

    log_condition("engine", team.engine.is_some(), team.engine_condition.wear, log);
    log_condition("chassis", team.chassis.is_some(), team.chassis_condition.wear, log);
}

fn log_condition(component: &str, equipped: bool, wear: f64, log: &mut NarrativeLog) {
    if !equipped {
        return;
    }
    if wear < 40.0 {
        log.push(format!(
            "Mechanics warn that the {} is close to its limit ({:.0}%).",
            component, wear
        ));
    } else if wear < 70.0 {
        log.push(format!(
            "The {} is showing signs of wear ({:.0}%).",
            component, wear
        ));
    }
}

fn report_of(entrants: &[EntrantReport], id: DriverId) -> Option<&EntrantReport> {
    entrants.iter().find(|report| report.id == id)
}

fn log_headline(
    finishers: &[(DriverId, f64)],
    entrants: &[EntrantReport],
    track: &Track,
    log: &mut NarrativeLog,
) {
    match finishers {
        [] => log.push(format!(
            "{}: chaotic scenes, no cars reach the finish.",
            track.name
        )),
        [(winner, _), rest @ ..] => {
            let (winner_name, constructor) = report_of(entrants, *winner)
                .map_or(("An unknown driver", ""), |r| {
                    (r.name.as_str(), r.constructor.as_str())
                });
            match rest.first().and_then(|(id, _)| report_of(entrants, *id)) {
                Some(runner_up) => log.push(format!(
                    "{}: {} wins for {}, ahead of {}.",
                    track.name, winner_name, constructor, runner_up.name
                )),
                None => log.push(format!(
                    "{}: {} wins for {}, the only car to reach the finish.",
                    track.name, winner_name, constructor
                )),
            }
        }
    }
}
