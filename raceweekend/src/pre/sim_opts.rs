use crate::core::car::RiskMode;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[clap(
    version = "0.1.0",
    name = "raceweekend",
    about = "Resolves race weekends of a 1940s/1950s motor racing season"
)]
pub struct SimOpts {
    // FLAGS ---------------------------------------------------------------------------------------
    /// Activate debug printing (factor chains and risk rolls)
    #[clap(short, long)]
    pub debug: bool,

    /// Repair engine and chassis before every race weekend
    #[clap(long)]
    pub repair: bool,

    // OPTIONS -------------------------------------------------------------------------------------
    /// Set path to the season parameter file
    #[clap(short, long)]
    pub parfile_path: Option<PathBuf>,

    /// Run only this race (OPTIONAL: if not set, the whole calendar is run)
    #[clap(short, long)]
    pub race: Option<String>,

    /// Set the race strategy of the human team: attack, neutral or nurse
    #[clap(short, long, default_value = "neutral")]
    pub strategy: RiskMode,

    /// Set the random seed (OPTIONAL: if not set, the seed is drawn from the OS)
    #[clap(long)]
    pub seed: Option<u64>,

    /// Write the season records to this CSV file
    #[clap(long)]
    pub history_path: Option<PathBuf>,
}
