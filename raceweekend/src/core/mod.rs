pub mod car;
pub mod constructor;
pub mod driver;
pub mod era;
pub mod explain;
pub mod finale;
pub mod grid;
pub mod handle_weekend;
pub mod narrative;
pub mod payout;
pub mod progression;
pub mod qualifying;
pub mod race;
pub mod risk;
pub mod season;
pub mod track;
pub mod weather;

#[cfg(test)]
mod test_fixtures;
