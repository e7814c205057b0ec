use crate::core::car::TeamState;
use crate::core::driver::{Driver, DriverId, Roster};
use crate::core::season::Season;
use crate::core::track::Track;
use helpers::general::{argsort, SortOrder};
use rand::seq::SliceRandom;
use rand::Rng;

/// driver_enters_event decides whether a driver is allowed to enter the given event.
pub fn driver_enters_event(
    id: DriverId,
    driver: &Driver,
    track: &Track,
    team: &TeamState,
    season: &Season,
) -> bool {
    if driver.retired {
        return false;
    }
    if driver.test_driver && !season.test_drivers_enabled {
        return false;
    }

    // human team: only the contracted (and fit) driver in a complete car, transport overrides
    // nationality rules
    if team.driver == Some(id) {
        return team.driver_fit()
            && team.has_complete_car()
            && (team.has_transport_to(&track.name) || track.admits_nationality(&driver.country));
    }
    if driver.constructor == team.name {
        return false;
    }

    if !track.admits_nationality(&driver.country) {
        return false;
    }

    match season.paddock.get(&driver.constructor) {
        Some(constructor) if constructor.works => constructor.attends(track),
        _ => true,
    }
}

fn works_key(driver: &Driver) -> f64 {
    f64::from(driver.pace) + f64::from(driver.consistency) * 0.5
}

fn open_pool_key(driver: &Driver) -> f64 {
    f64::from(driver.pace) + f64::from(driver.consistency) * 0.4
}

/// build_event_grid selects the drivers entering the event held at the given track. Works teams
/// field their best eligible drivers up to their seat cap, the human team fields its contracted
/// driver, and the remaining slots up to the track's grid size are filled from the open pool. The
/// output order carries no meaning.
pub fn build_event_grid<R: Rng>(
    roster: &Roster,
    track: &Track,
    team: &TeamState,
    season: &Season,
    rng: &mut R,
) -> Vec<DriverId> {
    let eligible: Vec<(DriverId, &Driver)> = roster
        .iter()
        .filter(|(id, driver)| driver_enters_event(*id, driver, track, team, season))
        .collect();
    let mut grid: Vec<DriverId> = Vec::with_capacity(track.grid_size);

    // works teams
    for constructor in season.paddock.works_teams() {
        let team_drivers: Vec<(DriverId, &Driver)> = eligible
            .iter()
            .filter(|(_, driver)| driver.constructor == constructor.name)
            .copied()
            .collect();
        let keys: Vec<f64> = team_drivers.iter().map(|(_, d)| works_key(d)).collect();
        let seat_cap = constructor.seat_cap_for(season.year);

        grid.extend(
            argsort(&keys, SortOrder::Descending)
                .into_iter()
                .take(seat_cap)
                .map(|idx| team_drivers[idx].0),
        );
    }

    // human team
    if let Some(id) = team.driver {
        if eligible.iter().any(|(eligible_id, _)| *eligible_id == id) {
            grid.push(id);
        }
    }

    // open pool, shuffled first so that equally rated drivers take turns
    let mut open_pool: Vec<(DriverId, &Driver)> = eligible
        .iter()
        .filter(|(id, driver)| {
            team.driver != Some(*id) && !season.paddock.is_works_team(&driver.constructor)
        })
        .copied()
        .collect();
    open_pool.shuffle(rng);
    let keys: Vec<f64> = open_pool.iter().map(|(_, d)| open_pool_key(d)).collect();
    let free_slots = track.grid_size.saturating_sub(grid.len());

    grid.extend(
        argsort(&keys, SortOrder::Descending)
            .into_iter()
            .take(free_slots)
            .map(|idx| open_pool[idx].0),
    );

    log::debug!(
        "Grid for {}: {} entrants from {} eligible drivers",
        track.name,
        grid.len(),
        eligible.len()
    );
    grid
}
