use crate::core::car::TeamState;
use crate::core::narrative::NarrativeLog;
use crate::core::track::Track;
use crate::post::race_result::RaceResult;

/// Share of a driver's prize money that goes to the team.
pub const CONSTRUCTOR_SHARE: f64 = 0.3;

/// prize_for_position returns the prize money of a (1-based) finishing position.
pub fn prize_for_position(track: &Track, position: usize) -> u32 {
    match position {
        0 => 0,
        1..=3 => track.prize_top3[position - 1],
        _ => track.finisher_bonus,
    }
}

/// Appearance money paid by the organizers for the human team's start, scaled by prestige.
pub fn appearance_money(track: &Track, prestige: f64) -> u32 {
    let money = f64::from(track.appearance_base) + prestige * track.appearance_prestige_mult;
    (money.max(0.0).round() as u32).min(track.appearance_cap)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RacePayout {
    pub appearance: u32,
    pub prize_share: u32,
}

impl RacePayout {
    pub fn total(&self) -> i64 {
        i64::from(self.appearance) + i64::from(self.prize_share)
    }
}

/// pay_race_money credits the human team with appearance money for taking the start and its share
/// of the driver's prize money.
pub fn pay_race_money(
    result: &RaceResult,
    track: &Track,
    team: &mut TeamState,
    log: &mut NarrativeLog,
) -> RacePayout {
    let player = match result.player {
        Some(player) => player,
        None => return RacePayout::default(),
    };

    let mut payout = RacePayout {
        appearance: appearance_money(track, team.prestige),
        prize_share: 0,
    };
    if let Some(position) = result.position_of(player) {
        let prize = prize_for_position(track, position);
        payout.prize_share = (f64::from(prize) * CONSTRUCTOR_SHARE).round() as u32;
    }

    team.money += payout.total();
    if payout.total() > 0 {
        log.push(format!(
            "The team collects £{} ({} appearance money, {} prize money).",
            payout.total(),
            payout.appearance,
            payout.prize_share
        ));
    }
    payout
}
