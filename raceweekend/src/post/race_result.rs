use crate::core::driver::DriverId;
use crate::core::payout::prize_for_position;
use crate::core::race::EntrantReport;
use crate::core::season::Season;
use crate::core::track::Track;
use crate::core::weather::Weather;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Championship points for positions 1 - 6.
pub const POINTS_TABLE: [u32; 6] = [8, 6, 4, 3, 2, 1];

/// points_for_position returns the championship points of a (1-based) finishing position.
pub fn points_for_position(position: usize) -> u32 {
    position
        .checked_sub(1)
        .and_then(|idx| POINTS_TABLE.get(idx))
        .copied()
        .unwrap_or(0)
}

/// Whether a (1-based) finishing position scores points.
pub fn is_points_finish(position: usize) -> bool {
    position >= 1 && position <= POINTS_TABLE.len()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DnfCause {
    Engine,
    Crash,
    Unknown,
}

impl fmt::Display for DnfCause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let cause = match self {
            DnfCause::Engine => "engine",
            DnfCause::Crash => "crash",
            DnfCause::Unknown => "unknown",
        };
        write!(f, "{}", cause)
    }
}

/// RaceResult is the outcome of one race.
/// * `finishers` - Classified entrants with their performance, winner first
/// * `dnfs` - Retired entrants with the cause of retirement
/// * `entrants` - Per-entrant details in grid order
/// * `player` - The human team's driver, if they took the start
#[derive(Debug, Clone)]
pub struct RaceResult {
    pub race_name: String,
    pub weather: Weather,
    pub finishers: Vec<(DriverId, f64)>,
    pub dnfs: Vec<(DriverId, DnfCause)>,
    pub entrants: Vec<EntrantReport>,
    pub player: Option<DriverId>,
}

impl RaceResult {
    /// 1-based finishing position of a driver, None if not classified.
    pub fn position_of(&self, id: DriverId) -> Option<usize> {
        self.finishers
            .iter()
            .position(|(finisher, _)| *finisher == id)
            .map(|idx| idx + 1)
    }

    pub fn dnf_cause_of(&self, id: DriverId) -> Option<DnfCause> {
        self.dnfs
            .iter()
            .find(|(retired, _)| *retired == id)
            .map(|(_, cause)| *cause)
    }

    pub fn entrant(&self, id: DriverId) -> Option<&EntrantReport> {
        self.entrants.iter().find(|report| report.id == id)
    }

    /// print_classification prints the classification and the retirements to the console output.
    pub fn print_classification(&self) {
        println!("RESULT: {} ({})", self.race_name, self.weather.describe());
        for (idx, (id, performance)) in self.finishers.iter().enumerate() {
            let (name, constructor) = self.names_of(*id);
            println!(
                "{:3}. {:24} {:20} {:7.3}",
                idx + 1,
                name,
                constructor,
                performance
            );
        }
        for (id, cause) in &self.dnfs {
            let (name, constructor) = self.names_of(*id);
            println!("DNF  {:24} {:20} {}", name, constructor, cause);
        }
    }

    fn names_of(&self, id: DriverId) -> (&str, &str) {
        self.entrant(id).map_or(("unknown", "unknown"), |report| {
            (report.name.as_str(), report.constructor.as_str())
        })
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FinisherRecord {
    pub pos: usize,
    pub name: String,
    pub constructor: String,
    pub points: u32,
    pub prize: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DnfRecord {
    pub name: String,
    pub constructor: String,
    pub cause: DnfCause,
}

/// RaceRecord is the compact summary of a race that is kept for the season records.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RaceRecord {
    pub year: u32,
    pub race: String,
    pub wet: bool,
    pub hot: bool,
    pub finishers: Vec<FinisherRecord>,
    pub dnfs: Vec<DnfRecord>,
}

impl RaceRecord {
    pub fn new(result: &RaceResult, track: &Track, season: &Season) -> RaceRecord {
        let finishers = result
            .finishers
            .iter()
            .enumerate()
            .map(|(idx, (id, _))| {
                let (name, constructor) = result.names_of(*id);
                FinisherRecord {
                    pos: idx + 1,
                    name: name.to_owned(),
                    constructor: constructor.to_owned(),
                    points: if season.championship_active {
                        points_for_position(idx + 1)
                    } else {
                        0
                    },
                    prize: prize_for_position(track, idx + 1),
                }
            })
            .collect();
        let dnfs = result
            .dnfs
            .iter()
            .map(|(id, cause)| {
                let (name, constructor) = result.names_of(*id);
                DnfRecord {
                    name: name.to_owned(),
                    constructor: constructor.to_owned(),
                    cause: *cause,
                }
            })
            .collect();

        RaceRecord {
            year: season.year,
            race: result.race_name.to_owned(),
            wet: result.weather.is_wet(),
            hot: result.weather.is_hot(),
            finishers,
            dnfs,
        }
    }
}

/// One CSV row per entrant of a recorded race.
#[derive(Debug, Serialize)]
struct HistoryRow<'a> {
    year: u32,
    race: &'a str,
    weather: &'a str,
    pos: Option<usize>,
    name: &'a str,
    constructor: &'a str,
    points: u32,
    prize: u32,
    dnf_cause: Option<DnfCause>,
}

/// SeasonHistory collects the records of all races held so far.
#[derive(Debug, Default, Clone)]
pub struct SeasonHistory {
    pub records: Vec<RaceRecord>,
}

impl SeasonHistory {
    pub fn push(&mut self, record: RaceRecord) {
        self.records.push(record);
    }

    /// Total championship points per driver, best first.
    pub fn standings(&self) -> Vec<(String, u32)> {
        let mut standings: Vec<(String, u32)> = Vec::new();
        for finisher in self.records.iter().flat_map(|record| &record.finishers) {
            match standings.iter_mut().find(|(name, _)| *name == finisher.name) {
                Some(entry) => entry.1 += finisher.points,
                None => standings.push((finisher.name.to_owned(), finisher.points)),
            }
        }
        standings.sort_by(|a, b| b.1.cmp(&a.1));
        standings
    }

    /// write_csv writes all records to a CSV file.
    pub fn write_csv(&self, path: &Path) -> anyhow::Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        for record in &self.records {
            let weather = if record.wet {
                "wet"
            } else if record.hot {
                "hot"
            } else {
                "dry"
            };
            for finisher in &record.finishers {
                writer.serialize(HistoryRow {
                    year: record.year,
                    race: &record.race,
                    weather,
                    pos: Some(finisher.pos),
                    name: &finisher.name,
                    constructor: &finisher.constructor,
                    points: finisher.points,
                    prize: finisher.prize,
                    dnf_cause: None,
                })?;
            }
            for dnf in &record.dnfs {
                writer.serialize(HistoryRow {
                    year: record.year,
                    race: &record.race,
                    weather,
                    pos: None,
                    name: &dnf.name,
                    constructor: &dnf.constructor,
                    points: 0,
                    prize: 0,
                    dnf_cause: Some(dnf.cause),
                })?;
            }
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_table() {
        assert_eq!(points_for_position(1), 8);
        assert_eq!(points_for_position(6), 1);
        assert_eq!(points_for_position(7), 0);
        assert_eq!(points_for_position(0), 0);
        assert!(is_points_finish(6));
        assert!(!is_points_finish(7));
    }

    #[test]
    fn test_standings_sum_points() {
        let finisher = |name: &str, points| FinisherRecord {
            pos: 1,
            name: name.to_owned(),
            constructor: "Independent".to_owned(),
            points,
            prize: 0,
        };
        let record = |finishers| RaceRecord {
            year: 1950,
            race: "Test GP".to_owned(),
            wet: false,
            hot: false,
            finishers,
            dnfs: Vec::new(),
        };
        let mut history = SeasonHistory::default();
        history.push(record(vec![finisher("A", 8), finisher("B", 6)]));
        history.push(record(vec![finisher("B", 8), finisher("A", 1)]));

        assert_eq!(
            history.standings(),
            vec![("B".to_owned(), 14), ("A".to_owned(), 9)]
        );
    }
}
