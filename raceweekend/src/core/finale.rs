use crate::core::driver::{DriverId, Roster};
use serde::Deserialize;

/// State of the scripted season finale. Once fired, it never fires again for the same save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinaleState {
    Pending,
    Fired,
}

/// * `year` - Season in which the finale takes place
/// * `race` - Race at which the finale takes place
/// * `constructor` - Constructor whose most famous driver is the preferred victim
#[derive(Debug, Deserialize, Clone)]
pub struct FinaleScript {
    pub year: u32,
    pub race: String,
    pub constructor: String,
}

impl FinaleScript {
    /// nominate picks the most famous active driver of the scripted constructor, falling back to
    /// the most famous active driver overall.
    pub fn nominate(&self, roster: &Roster) -> Option<DriverId> {
        most_famous(roster, |constructor| constructor == self.constructor)
            .or_else(|| most_famous(roster, |_| true))
    }
}

fn most_famous<F: Fn(&str) -> bool>(roster: &Roster, filter: F) -> Option<DriverId> {
    let mut best: Option<(DriverId, f64)> = None;
    for (id, driver) in roster.iter() {
        if driver.retired || !filter(&driver.constructor) {
            continue;
        }
        match best {
            Some((_, fame)) if driver.fame <= fame => {}
            _ => best = Some((id, driver.fame)),
        }
    }
    best.map(|(id, _)| id)
}

/// trigger_finale is the single guarded transition Pending -> Fired. It returns the nominated
/// driver if the script applies to this race and has not fired yet, and None otherwise.
pub fn trigger_finale(
    state: &mut FinaleState,
    script: Option<&FinaleScript>,
    year: u32,
    race_name: &str,
    roster: &Roster,
) -> Option<DriverId> {
    if *state == FinaleState::Fired {
        return None;
    }
    let script = script?;
    if script.year != year || script.race != race_name {
        return None;
    }
    let victim = script.nominate(roster)?;
    *state = FinaleState::Fired;
    Some(victim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::driver::{Driver, INDEPENDENT};

    fn script() -> FinaleScript {
        FinaleScript {
            year: 1950,
            race: "Ardennes Endurance GP".to_owned(),
            constructor: "Enzoni".to_owned(),
        }
    }

    fn roster() -> (Roster, DriverId, DriverId) {
        let mut roster = Roster::new();
        let mut star = Driver::new("Star", INDEPENDENT);
        star.fame = 4.0;
        let mut works = Driver::new("Works", "Enzoni");
        works.fame = 2.0;
        let star = roster.add(star).unwrap();
        let works = roster.add(works).unwrap();
        (roster, star, works)
    }

    #[test]
    fn test_prefers_scripted_constructor() {
        let (mut roster, star, works) = roster();
        assert_eq!(script().nominate(&roster), Some(works));
        roster.remove(works);
        assert_eq!(script().nominate(&roster), Some(star));
    }

    #[test]
    fn test_fires_once() {
        let (roster, _, works) = roster();
        let mut state = FinaleState::Pending;
        let s = script();

        assert_eq!(
            trigger_finale(&mut state, Some(&s), 1950, "Vallone GP", &roster),
            None
        );
        assert_eq!(state, FinaleState::Pending);
        assert_eq!(
            trigger_finale(&mut state, Some(&s), 1950, "Ardennes Endurance GP", &roster),
            Some(works)
        );
        assert_eq!(state, FinaleState::Fired);
        assert_eq!(
            trigger_finale(&mut state, Some(&s), 1950, "Ardennes Endurance GP", &roster),
            None
        );
    }
}
