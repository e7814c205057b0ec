use crate::core::car::TeamState;
use crate::core::driver::{
    Driver, DriverId, Roster, Stat, AGEING_STATS, MAX_FAME, MAX_STAT, TRAINABLE_STATS,
};
use crate::core::era::{offseason_fame_decay, retirement_ages};
use crate::core::narrative::NarrativeLog;
use crate::core::season::Season;
use crate::core::track::Track;
use crate::post::race_result::{is_points_finish, DnfCause, RaceResult};
use helpers::general::round_to;
use rand::seq::SliceRandom;
use rand::Rng;

/// Banked XP consumed by one stat increase.
pub const XP_PER_STAT: f64 = 5.0;
/// XP of an entrant that did not finish, before the development rate.
pub const DNF_XP: f64 = 0.1;
pub const FINISH_FAMILIARITY: f64 = 1.0;
pub const DNF_FAMILIARITY: f64 = 0.35;
/// Fame above this value no longer raises the prestige factor.
const PRESTIGE_FAME_CAP: f64 = 8.0;

/// Outcome of the human team's driver, used for the prestige update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerOutcome {
    Finished(usize),
    Retired(DnfCause),
}

/// fame_after_finish returns the fame of a driver after finishing at the given (1-based)
/// position. Drivers at or above the track's fame cap gain nothing.
pub fn fame_after_finish(old_fame: f64, position: usize, track: &Track, fame_scale: f64) -> f64 {
    let cap = track.fame_cap.min(MAX_FAME);
    if old_fame >= cap {
        return old_fame.clamp(0.0, MAX_FAME);
    }

    let mut gain = 0.06 * track.fame_mult;
    match position {
        1 => gain += 1.0 * track.fame_mult,
        2 | 3 => gain += 0.6 * track.fame_mult,
        _ => {}
    }
    gain *= fame_scale;
    gain *= (1.0 - old_fame * 0.18).max(0.15);

    round_to((old_fame + gain).clamp(0.0, cap), 2)
}

/// finisher_xp returns the XP of a finisher at the given (1-based) position.
pub fn finisher_xp(position: usize, development_rate: f64, xp_mult: f64) -> f64 {
    let mut xp = 0.4 + ((11.0 - position as f64) * 0.05).max(0.0);
    match position {
        1 => xp += 0.25,
        2 | 3 => xp += 0.15,
        _ => {}
    }
    xp * development_rate * xp_mult
}

/// convert_xp turns banked XP into random stat increases, one per XP_PER_STAT. Drivers at or past
/// their peak age keep their XP banked. Returns the raised stats.
pub fn convert_xp<R: Rng>(driver: &mut Driver, rng: &mut R) -> Vec<Stat> {
    let mut raised = Vec::new();
    while driver.xp >= XP_PER_STAT {
        if driver.past_peak() {
            break;
        }
        let candidates: Vec<Stat> = TRAINABLE_STATS
            .iter()
            .copied()
            .filter(|stat| driver.stat(*stat) < MAX_STAT)
            .collect();
        let stat = match candidates.choose(rng) {
            Some(stat) => *stat,
            None => break,
        };
        driver.xp -= XP_PER_STAT;
        driver.raise_stat(stat);
        raised.push(stat);
    }
    raised
}

/// prestige_delta returns the base prestige change for the human team's result.
pub fn prestige_delta(outcome: PlayerOutcome) -> f64 {
    match outcome {
        PlayerOutcome::Finished(1) => 3.0,
        PlayerOutcome::Finished(2) => 2.0,
        PlayerOutcome::Finished(3) => 1.5,
        PlayerOutcome::Finished(position) if is_points_finish(position) => 1.0,
        PlayerOutcome::Finished(_) => 0.3,
        PlayerOutcome::Retired(DnfCause::Engine) => -0.2,
        PlayerOutcome::Retired(DnfCause::Crash) => -0.8,
        PlayerOutcome::Retired(DnfCause::Unknown) => -0.5,
    }
}

/// prestige_change scales the base delta by the fame of the team's driver. Famous drivers amplify
/// both good and bad results.
pub fn prestige_change(outcome: PlayerOutcome, driver_fame: f64) -> f64 {
    let delta = prestige_delta(outcome);
    let fame = driver_fame.clamp(0.0, PRESTIGE_FAME_CAP);
    if delta >= 0.0 {
        delta * (1.0 + fame * 0.07)
    } else {
        delta * (1.0 + fame * 0.05)
    }
}

fn stat_label(stat: Stat) -> &'static str {
    match stat {
        Stat::Pace => "pace",
        Stat::Consistency => "consistency",
        Stat::Aggression => "aggression",
        Stat::WetSkill => "wet-weather skill",
        Stat::MechanicalSympathy => "mechanical sympathy",
    }
}

fn log_growth(driver: &Driver, raised: &[Stat], log: &mut NarrativeLog) {
    for stat in raised {
        log.push(format!(
            "{} improves their {} to {}.",
            driver.name,
            stat_label(*stat),
            driver.stat(*stat)
        ));
    }
}

/// apply_post_race_progression updates fame, XP and stat growth of all entrants and the human
/// team's prestige and car familiarity. Returns the XP gained by the human team's driver.
pub fn apply_post_race_progression<R: Rng>(
    result: &RaceResult,
    roster: &mut Roster,
    team: &mut TeamState,
    track: &Track,
    season: &Season,
    log: &mut NarrativeLog,
    rng: &mut R,
) -> f64 {
    let mut player_xp = 0.0;

    for (idx, (id, _)) in result.finishers.iter().enumerate() {
        let position = idx + 1;
        let driver = match roster.get_mut(*id) {
            Some(driver) => driver,
            None => continue,
        };
        driver.fame = fame_after_finish(driver.fame, position, track, season.era.fame_scale);

        let xp = finisher_xp(position, driver.development_rate, track.xp_mult);
        driver.xp += xp;
        if result.player == Some(*id) {
            player_xp = xp;
        }
        let raised = convert_xp(driver, rng);
        log_growth(driver, &raised, log);
    }

    for (id, _) in &result.dnfs {
        let driver = match roster.get_mut(*id) {
            Some(driver) => driver,
            None => continue,
        };
        let xp = DNF_XP * driver.development_rate;
        driver.xp += xp;
        if result.player == Some(*id) {
            player_xp = xp;
        }
        let raised = convert_xp(driver, rng);
        log_growth(driver, &raised, log);
    }

    if let Some(player) = result.player {
        let outcome = match (result.position_of(player), result.dnf_cause_of(player)) {
            (Some(position), _) => PlayerOutcome::Finished(position),
            (None, Some(cause)) => PlayerOutcome::Retired(cause),
            (None, None) => PlayerOutcome::Retired(DnfCause::Unknown),
        };
        let fame = roster.get(player).map_or(0.0, |driver| driver.fame);
        let old_prestige = team.prestige;
        team.add_prestige(prestige_change(outcome, fame));
        log::info!(
            "Prestige of {}: {:.2} -> {:.2}",
            team.name,
            old_prestige,
            team.prestige
        );

        if let Some(driver) = roster.get_mut(player) {
            driver.gain_car_familiarity(match outcome {
                PlayerOutcome::Finished(_) => FINISH_FAMILIARITY,
                PlayerOutcome::Retired(_) => DNF_FAMILIARITY,
            });
        }
    }

    player_xp
}

// ----------------------------------------------------------------------------------------------
// OFFSEASON
// ----------------------------------------------------------------------------------------------

/// decline_chance returns the chance of every ageing stat to drop by one point over the winter.
/// `soft_retire` and `hard_retire` are the era's retirement ages.
pub fn decline_chance(driver: &Driver, soft_retire: u32, hard_retire: u32) -> f64 {
    let age = driver.age;
    if age >= driver.decline_age {
        if age < soft_retire {
            0.12
        } else if age < hard_retire {
            0.30
        } else {
            0.55
        }
    } else if age > driver.peak_age {
        0.08
    } else {
        0.0
    }
}

/// retirement_chance returns the chance of a driver to retire over the winter. Famous drivers
/// hang on a little longer.
pub fn retirement_chance(age: u32, fame: f64, soft_retire: u32, hard_retire: u32) -> f64 {
    let chance = if age >= hard_retire + 5 {
        0.60
    } else if age >= hard_retire {
        0.35
    } else if age >= soft_retire {
        0.12
    } else {
        0.0
    };

    if fame >= 4.0 && age < hard_retire + 3 {
        chance * 0.5
    } else {
        chance
    }
}

/// apply_offseason runs the winter between the season `year` and the next one: every active driver
/// ages by one year, past-peak skills may fade, the oldest drivers may retire and all fame decays.
/// Returns the drivers that retired.
pub fn apply_offseason<R: Rng>(
    roster: &mut Roster,
    team: &mut TeamState,
    year: u32,
    log: &mut NarrativeLog,
    rng: &mut R,
) -> Vec<DriverId> {
    let (soft_retire, hard_retire) = retirement_ages(year);
    let active: Vec<DriverId> = roster
        .iter()
        .filter(|(_, driver)| !driver.retired)
        .map(|(id, _)| id)
        .collect();
    let mut retired = Vec::new();

    for id in active {
        let driver = match roster.get_mut(id) {
            Some(driver) => driver,
            None => continue,
        };
        let human = team.driver == Some(id);
        driver.age += 1;

        // skills
        let chance = decline_chance(driver, soft_retire, hard_retire);
        if chance > 0.0 {
            for stat in AGEING_STATS {
                let old = driver.stat(stat);
                if rng.gen::<f64>() < chance && driver.lower_stat(stat) && human {
                    log.push(format!(
                        "Over the winter, {} loses a touch of {} ({} -> {}).",
                        driver.name,
                        stat_label(stat),
                        old,
                        driver.stat(stat)
                    ));
                }
            }
        }

        // retirement
        let chance = retirement_chance(driver.age, driver.fame, soft_retire, hard_retire);
        if chance > 0.0 && rng.gen::<f64>() < chance {
            driver.retired = true;
            if human {
                log.push(format!(
                    "After many seasons, {} retires from racing and leaves {}.",
                    driver.name, team.name
                ));
                team.vacate_seat();
                team.injury = None;
            } else {
                log.push(format!(
                    "{} hangs up their helmet at the age of {}.",
                    driver.name, driver.age
                ));
            }
            log::info!("{} retires at {}", driver.name, driver.age);
            retired.push(id);
        }
    }

    let decay = offseason_fame_decay(year);
    let ids: Vec<DriverId> = roster.iter().map(|(id, _)| id).collect();
    for id in ids {
        if let Some(driver) = roster.get_mut(id) {
            driver.fame = round_to((driver.fame - decay).max(0.0), 2);
        }
    }

    if !retired.is_empty() {
        log.push(format!("Offseason report: {} retirement(s).", retired.len()));
    }
    retired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::driver::{INDEPENDENT, MIN_STAT};
    use crate::core::test_fixtures::team;
    use crate::core::track::TrackPars;
    use approx::assert_relative_eq;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn capped_track(cap: f64) -> Track {
        let mut pars = TrackPars::default();
        pars.fame_cap = Some(cap);
        pars.fame_mult = 1.5;
        Track::new("Test GP", &pars)
    }

    #[test]
    fn test_fame_gain_for_winner() {
        let track = Track::neutral("Test GP");
        // (0.06 + 1.0) * 0.35 * (1 - 1.0 * 0.18)
        let fame = fame_after_finish(1.0, 1, &track, 0.35);
        assert_relative_eq!(fame, 1.3, epsilon = 1e-9);
    }

    #[test]
    fn test_fame_at_cap_gains_nothing() {
        let track = capped_track(3.0);
        assert_eq!(fame_after_finish(3.0, 1, &track, 1.0), 3.0);
        assert!(fame_after_finish(2.9, 1, &track, 1.0) <= 3.0);
    }

    #[test]
    fn test_fame_never_exceeds_max() {
        let track = Track::neutral("Test GP");
        let mut fame = 0.0;
        for _ in 0..200 {
            fame = fame_after_finish(fame, 1, &track, 1.0);
            assert!((0.0..=MAX_FAME).contains(&fame));
        }
    }

    #[test]
    fn test_finisher_xp() {
        assert_relative_eq!(finisher_xp(1, 1.0, 1.0), 0.4 + 0.5 + 0.25, epsilon = 1e-12);
        assert_relative_eq!(finisher_xp(12, 2.0, 1.5), 0.4 * 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_convert_xp_respects_peak_and_cap() {
        let mut rng = StdRng::seed_from_u64(8);

        let mut veteran = Driver::new("Veteran", INDEPENDENT);
        veteran.age = 40;
        veteran.peak_age = 33;
        veteran.xp = 12.0;
        assert!(convert_xp(&mut veteran, &mut rng).is_empty());
        assert_eq!(veteran.xp, 12.0);

        let mut prodigy = Driver::new("Prodigy", INDEPENDENT);
        prodigy.age = 22;
        prodigy.pace = MAX_STAT;
        prodigy.consistency = MAX_STAT;
        prodigy.wet_skill = MAX_STAT;
        prodigy.mechanical_sympathy = 9;
        prodigy.xp = 11.0;
        let raised = convert_xp(&mut prodigy, &mut rng);
        assert_eq!(raised, vec![Stat::MechanicalSympathy]);
        assert_eq!(prodigy.mechanical_sympathy, MAX_STAT);
        assert_relative_eq!(prodigy.xp, 6.0);
    }

    #[test]
    fn test_prestige_deltas() {
        assert_eq!(prestige_delta(PlayerOutcome::Finished(1)), 3.0);
        assert_eq!(prestige_delta(PlayerOutcome::Finished(5)), 1.0);
        assert_eq!(prestige_delta(PlayerOutcome::Finished(7)), 0.3);
        assert_eq!(prestige_delta(PlayerOutcome::Retired(DnfCause::Crash)), -0.8);
        assert_relative_eq!(
            prestige_change(PlayerOutcome::Finished(1), 5.0),
            3.0 * 1.35,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            prestige_change(PlayerOutcome::Retired(DnfCause::Engine), 2.0),
            -0.2 * 1.1,
            epsilon = 1e-12
        );
    }

    fn aged_driver(name: &str, age: u32) -> Driver {
        let mut driver = Driver::new(name, INDEPENDENT);
        driver.age = age;
        driver.peak_age = 33;
        driver.decline_age = 37;
        driver
    }

    #[test]
    fn test_offseason_ages_young_drivers_without_decline() {
        let mut roster = Roster::new();
        let mut young = Driver::new("Young", INDEPENDENT);
        young.age = 25;
        let id = roster.add(young.clone()).unwrap();
        let mut team = team(None);
        let mut log = NarrativeLog::new();

        // every roll hits, but nothing applies before the peak
        let mut rng = StepRng::new(0, 0);
        let retired = apply_offseason(&mut roster, &mut team, 1950, &mut log, &mut rng);

        let driver = roster.get(id).unwrap();
        assert!(retired.is_empty());
        assert_eq!(driver.age, 26);
        assert!(!driver.retired);
        for stat in AGEING_STATS {
            assert_eq!(driver.stat(stat), young.stat(stat));
        }
    }

    #[test]
    fn test_offseason_decline_stops_at_minimum() {
        let mut roster = Roster::new();
        let mut veteran = aged_driver("Veteran", 55);
        veteran.pace = MIN_STAT;
        veteran.consistency = MIN_STAT + 1;
        veteran.aggression = MIN_STAT + 1;
        veteran.mechanical_sympathy = MIN_STAT + 1;
        veteran.wet_skill = MIN_STAT + 1;
        let id = roster.add(veteran).unwrap();
        let mut team = team(None);
        let mut log = NarrativeLog::new();

        let mut rng = StepRng::new(0, 0);
        let retired = apply_offseason(&mut roster, &mut team, 1950, &mut log, &mut rng);

        let driver = roster.get(id).unwrap();
        for stat in AGEING_STATS {
            assert_eq!(driver.stat(stat), MIN_STAT);
        }
        assert_eq!(retired, vec![id]);
        assert!(driver.retired);
        assert!(log.entries().iter().any(|line| line.contains("hangs up their helmet")));
    }

    #[test]
    fn test_decline_and_retirement_chances() {
        let (soft, hard) = retirement_ages(1950);
        assert_eq!(decline_chance(&aged_driver("A", 33), soft, hard), 0.0);
        assert_relative_eq!(decline_chance(&aged_driver("A", 35), soft, hard), 0.08);
        assert_relative_eq!(decline_chance(&aged_driver("A", 37), soft, hard), 0.12);
        assert_relative_eq!(decline_chance(&aged_driver("A", 50), soft, hard), 0.30);
        assert_relative_eq!(decline_chance(&aged_driver("A", 52), soft, hard), 0.55);

        assert_eq!(retirement_chance(47, 0.0, soft, hard), 0.0);
        assert_relative_eq!(retirement_chance(48, 0.0, soft, hard), 0.12);
        assert_relative_eq!(retirement_chance(48, 4.5, soft, hard), 0.06);
        assert_relative_eq!(retirement_chance(53, 0.0, soft, hard), 0.35);
        assert_relative_eq!(retirement_chance(55, 4.5, soft, hard), 0.35);
        assert_relative_eq!(retirement_chance(57, 0.0, soft, hard), 0.60);
    }

    #[test]
    fn test_older_drivers_retire_more_often() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut team = team(None);
        let mut log = NarrativeLog::new();
        let trials = 2000;

        let mut count_retired = |age: u32| -> usize {
            let mut retired = 0;
            for _ in 0..trials {
                let mut roster = Roster::new();
                roster.add(aged_driver("Old Timer", age)).unwrap();
                retired += apply_offseason(&mut roster, &mut team, 1950, &mut log, &mut rng).len();
            }
            retired
        };

        // aged 49 -> 50 (soft band), 56 -> 57 (past hard + 5)
        let soft = count_retired(49) as f64 / trials as f64;
        let oldest = count_retired(56) as f64 / trials as f64;
        assert!((0.08..0.16).contains(&soft), "soft band rate {}", soft);
        assert!((0.55..0.65).contains(&oldest), "oldest rate {}", oldest);
        assert_eq!(count_retired(40), 0);
    }

    #[test]
    fn test_human_retirement_vacates_seat() {
        let mut roster = Roster::new();
        let id = roster.add(aged_driver("Veteran", 60)).unwrap();
        let mut team = team(Some(id));
        let mut log = NarrativeLog::new();

        let mut rng = StepRng::new(0, 0);
        apply_offseason(&mut roster, &mut team, 1950, &mut log, &mut rng);

        assert!(roster.get(id).unwrap().retired);
        assert_eq!(team.driver, None);
        assert!(log.entries().iter().any(|line| line.contains("leaves Harlow Racing")));
        assert!(log.entries().iter().any(|line| line.contains("loses a touch of pace (5 -> 4)")));
    }

    #[test]
    fn test_offseason_fame_decay() {
        let mut roster = Roster::new();
        let mut known = Driver::new("Known", INDEPENDENT);
        known.fame = 1.0;
        let known = roster.add(known).unwrap();
        let mut unknown = Driver::new("Unknown", INDEPENDENT);
        unknown.fame = 0.1;
        let unknown = roster.add(unknown).unwrap();
        let mut team = team(None);
        let mut log = NarrativeLog::new();
        let mut rng = StdRng::seed_from_u64(3);

        apply_offseason(&mut roster, &mut team, 1950, &mut log, &mut rng);
        assert_relative_eq!(roster.get(known).unwrap().fame, 0.75);
        assert_eq!(roster.get(unknown).unwrap().fame, 0.0);

        apply_offseason(&mut roster, &mut team, 1955, &mut log, &mut rng);
        assert_relative_eq!(roster.get(known).unwrap().fame, 0.6);
    }
}
