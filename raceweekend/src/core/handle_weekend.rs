use crate::core::car::{RiskMode, TeamState};
use crate::core::driver::Roster;
use crate::core::grid::build_event_grid;
use crate::core::narrative::NarrativeLog;
use crate::core::payout::{pay_race_money, RacePayout};
use crate::core::progression::apply_post_race_progression;
use crate::core::qualifying::{resolve_qualifying, QualifyingResult};
use crate::core::race::resolve_race;
use crate::core::season::Season;
use crate::core::weather::Weather;
use crate::post::race_result::{RaceRecord, RaceResult};

/// WeekendResult bundles everything one race weekend produced.
/// * `qualifying` - Qualifying order and grid bonuses
/// * `race` - Classification, retirements and per-entrant details
/// * `record` - Compact summary for the season records
/// * `payout` - Money paid to the human team
/// * `player_xp` - XP gained by the human team's driver
#[derive(Debug, Clone)]
pub struct WeekendResult {
    pub qualifying: QualifyingResult,
    pub race: RaceResult,
    pub record: RaceRecord,
    pub payout: RacePayout,
    pub player_xp: f64,
}

/// handle_weekend runs one complete race weekend: grid, qualifying, race, progression and payouts.
/// The human team races with the inserted strategy.
pub fn handle_weekend<R: rand::Rng>(
    race_name: &str,
    strategy: RiskMode,
    roster: &mut Roster,
    team: &mut TeamState,
    season: &Season,
    log: &mut NarrativeLog,
    rng: &mut R,
) -> WeekendResult {
    let track = season.tracks.track_for(race_name);
    let weather = Weather::roll(&track, rng);
    log::info!(
        "Race weekend {} {} ({})",
        track.name,
        season.year,
        weather.describe()
    );

    if team.driver.is_some() && !team.has_complete_car() {
        log.push(format!(
            "{} cannot take the start at the {} without a complete car.",
            team.name, track.name
        ));
    }
    let grid = build_event_grid(roster, &track, team, season, rng);
    team.advance_week();
    log::info!("{} entrants on the grid", grid.len());

    let qualifying = resolve_qualifying(roster, &grid, &track, team, season, log, rng);

    team.risk_mode = strategy;
    let race = resolve_race(
        roster,
        &grid,
        &qualifying.grid_bonus,
        &track,
        team,
        season,
        weather,
        log,
        rng,
    );
    log::info!(
        "{}: {} finishers, {} retirements",
        track.name,
        race.finishers.len(),
        race.dnfs.len()
    );

    let player_xp = apply_post_race_progression(&race, roster, team, &track, season, log, rng);
    let payout = pay_race_money(&race, &track, team, log);
    let record = RaceRecord::new(&race, &track, season);

    WeekendResult {
        qualifying,
        race,
        record,
        payout,
        player_xp,
    }
}
