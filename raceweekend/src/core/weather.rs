use crate::core::track::Track;
use rand::Rng;

/// Race-day weather. Wet and hot are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Weather {
    wet: bool,
    hot: bool,
}

impl Weather {
    pub fn dry() -> Weather {
        Weather::default()
    }

    pub fn wet() -> Weather {
        Weather {
            wet: true,
            hot: false,
        }
    }

    pub fn hot() -> Weather {
        Weather {
            wet: false,
            hot: true,
        }
    }

    /// roll determines the race weather once before the race. Heat is only rolled for dry races.
    pub fn roll<R: Rng>(track: &Track, rng: &mut R) -> Weather {
        if rng.gen::<f64>() < track.wet_chance {
            Weather::wet()
        } else if rng.gen::<f64>() < track.hot_chance {
            Weather::hot()
        } else {
            Weather::dry()
        }
    }

    pub fn is_wet(&self) -> bool {
        self.wet
    }

    pub fn is_hot(&self) -> bool {
        self.hot
    }

    pub fn describe(&self) -> &'static str {
        if self.wet {
            "wet"
        } else if self.hot {
            "hot"
        } else {
            "dry"
        }
    }
}
