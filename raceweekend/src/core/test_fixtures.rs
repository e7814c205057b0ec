use crate::core::car::{ChassisPars, Condition, EnginePars, RiskMode, TeamState};
use crate::core::constructor::{ConstructorPars, Paddock, SeatExpansion};
use crate::core::driver::{Driver, DriverId};
use crate::core::finale::FinaleState;
use crate::core::season::{Season, SeasonPars};
use crate::core::track::TrackTable;
use std::collections::HashSet;

pub(crate) fn driver(name: &str, constructor: &str, pace: u8, consistency: u8) -> Driver {
    let mut driver = Driver::new(name, constructor);
    driver.pace = pace;
    driver.consistency = consistency;
    driver
}

fn works_team(name: &str, seat_cap: usize, speed: f64, attack_bias: f64) -> ConstructorPars {
    ConstructorPars {
        name: name.to_owned(),
        country: "Italy".to_owned(),
        works: true,
        seat_cap,
        seat_expansion: None,
        allowed_races: vec!["Vallone GP".to_owned()],
        speed,
        reliability: 6.0,
        suspension: 6.0,
        attack_bias,
    }
}

pub(crate) fn paddock_1950() -> Paddock {
    let mut enzoni = works_team("Enzoni", 2, 7.5, 0.2);
    enzoni.seat_expansion = Some(SeatExpansion {
        from_year: 1950,
        seat_cap: 3,
    });
    Paddock::new(vec![enzoni, works_team("Scuderia Valdieri", 2, 6.5, 0.0)])
}

pub(crate) fn season(paddock: Paddock) -> Season {
    let season_pars = SeasonPars {
        year: 1950,
        test_drivers_enabled: false,
        championship_active: false,
        finale: None,
        calendar: Vec::new(),
    };
    Season::new(&season_pars, paddock, TrackTable::default())
}

pub(crate) fn team(driver: Option<DriverId>) -> TeamState {
    TeamState {
        name: "Harlow Racing".to_owned(),
        country: "UK".to_owned(),
        driver,
        engine: Some(EnginePars {
            name: "Old Straight Six".to_owned(),
            speed: 4.0,
            acceleration: 3.0,
            reliability: 4.0,
            heat_tolerance: 3.0,
        }),
        chassis: Some(ChassisPars {
            name: "Ladder Frame".to_owned(),
            weight: 6.0,
            aero: 3.0,
            suspension: 4.0,
        }),
        engine_condition: Condition::default(),
        chassis_condition: Condition::default(),
        risk_mode: RiskMode::Neutral,
        prestige: 10.0,
        money: 1000,
        transport_paid: HashSet::new(),
        finale: FinaleState::Pending,
        injury: None,
    }
}
