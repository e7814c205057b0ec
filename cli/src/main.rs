use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use raceweekend::core::car::TeamState;
use raceweekend::core::constructor::Paddock;
use raceweekend::core::driver::Roster;
use raceweekend::core::handle_weekend::handle_weekend;
use raceweekend::core::narrative::NarrativeLog;
use raceweekend::core::progression::apply_offseason;
use raceweekend::core::season::Season;
use raceweekend::core::track::TrackTable;
use raceweekend::post::race_result::SeasonHistory;
use raceweekend::pre::read_sim_pars::read_sim_pars;
use raceweekend::pre::sim_opts::SimOpts;
use std::time::Instant;

fn print_narrative(log: &mut NarrativeLog) {
    for line in log.drain() {
        println!("  {}", line);
    }
}

fn main() -> anyhow::Result<()> {
    // PRE-PROCESSING ------------------------------------------------------------------------------
    // get simulation options from the command line arguments
    let sim_opts: SimOpts = SimOpts::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if sim_opts.debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    // get simulation parameters
    let sim_pars = if let Some(parfile_path) = &sim_opts.parfile_path {
        println!("INFO: Reading season parameters from {:?}", parfile_path);
        read_sim_pars(parfile_path)?
    } else {
        anyhow::bail!("No parameter file provided! Use -p <path_to_json> to run the simulation.");
    };

    let mut rng = match sim_opts.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut roster = Roster::from_pars(&sim_pars.driver_pars_all, &mut rng)?;
    let mut team = TeamState::new(&sim_pars.team_pars, &roster)?;
    let season = Season::new(
        &sim_pars.season_pars,
        Paddock::new(sim_pars.constructor_pars_all.to_owned()),
        TrackTable::new(sim_pars.track_pars_all.to_owned()),
    );

    let races: Vec<String> = match &sim_opts.race {
        Some(race) => vec![race.to_owned()],
        None => season.calendar.to_owned(),
    };
    if races.is_empty() {
        anyhow::bail!("No race to run! Set --race or add a calendar to the parameter file.");
    }

    println!(
        "INFO: Running {} race(s) of the {} season for {} ({} strategy)",
        races.len(),
        season.year,
        team.name,
        sim_opts.strategy
    );

    // EXECUTION -----------------------------------------------------------------------------------
    let t_start = Instant::now();
    let mut history = SeasonHistory::default();
    let mut log = NarrativeLog::new();

    for race in &races {
        if sim_opts.repair {
            let cost = team.repair_engine() + team.repair_chassis();
            if cost > 0 {
                println!("INFO: Repairs before {} cost £{}", race, cost);
            }
        }

        let weekend = handle_weekend(
            race,
            sim_opts.strategy,
            &mut roster,
            &mut team,
            &season,
            &mut log,
            &mut rng,
        );

        println!("\n=== {} ===", race);
        print_narrative(&mut log);
        weekend.race.print_classification();
        println!(
            "INFO: {} - prestige {:.2}, money £{}, engine {:.0}/{:.0}, chassis {:.0}/{:.0}, driver XP +{:.2}",
            team.name,
            team.prestige,
            team.money,
            team.engine_condition.wear,
            team.engine_condition.health,
            team.chassis_condition.wear,
            team.chassis_condition.health,
            weekend.player_xp
        );
        history.push(weekend.record);
    }

    println!(
        "INFO: Execution time: {}ms",
        t_start.elapsed().as_millis()
    );

    // POST-PROCESSING -----------------------------------------------------------------------------
    if season.championship_active {
        println!("\nSTANDINGS:");
        for (idx, (name, points)) in history.standings().iter().enumerate() {
            println!("{:3}. {:24} {:3}", idx + 1, name, points);
        }
    }

    // the winter only follows a complete calendar
    if sim_opts.race.is_none() {
        let retired = apply_offseason(
            &mut roster,
            &mut team,
            season.year,
            &mut log,
            &mut rng,
        );
        println!("\n=== Offseason {} ===", season.year);
        print_narrative(&mut log);
        println!("INFO: {} driver(s) retired", retired.len());
    }

    if let Some(history_path) = &sim_opts.history_path {
        history.write_csv(history_path)?;
        println!("INFO: Season records written to {:?}", history_path);
    }

    Ok(())
}
