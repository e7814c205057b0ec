/// Era bundles the year-dependent scalars applied to baseline probabilities and fame gains. Older
/// machinery breaks more often and circuits were less safe, while fame came slower before the sport
/// had a wide audience.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Era {
    pub reliability_mult: f64,
    pub crash_mult: f64,
    pub fame_scale: f64,
}

impl Era {
    pub fn for_year(year: u32) -> Era {
        Era {
            reliability_mult: reliability_mult(year),
            crash_mult: crash_mult(year),
            fame_scale: fame_scale(year),
        }
    }
}

pub fn reliability_mult(year: u32) -> f64 {
    match year {
        y if y < 1955 => 2.5,
        y if y < 1965 => 2.0,
        y if y < 1980 => 1.5,
        y if y < 2000 => 1.2,
        y if y < 2020 => 1.0,
        _ => 0.8,
    }
}

pub fn crash_mult(year: u32) -> f64 {
    match year {
        y if y < 1955 => 1.5,
        y if y < 1970 => 1.3,
        y if y < 1985 => 1.1,
        y if y < 2000 => 1.0,
        y if y < 2020 => 0.9,
        _ => 1.0,
    }
}

pub fn fame_scale(year: u32) -> f64 {
    match year {
        y if y <= 1951 => 0.35,
        y if y <= 1960 => 0.55,
        y if y <= 1975 => 0.75,
        _ => 1.0,
    }
}

/// Soft and hard retirement ages. Careers ran longer in the early decades.
pub fn retirement_ages(year: u32) -> (u32, u32) {
    match year {
        y if y < 1960 => (48, 52),
        y if y < 1980 => (45, 49),
        _ => (40, 45),
    }
}

/// Fame lost by every driver over the winter.
pub fn offseason_fame_decay(year: u32) -> f64 {
    if year <= 1951 {
        0.25
    } else {
        0.15
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_era_steps() {
        assert_eq!(reliability_mult(1950), 2.5);
        assert_eq!(reliability_mult(1955), 2.0);
        assert_eq!(crash_mult(1969), 1.3);
        assert_eq!(fame_scale(1951), 0.35);
        assert_eq!(fame_scale(1952), 0.55);
        assert_eq!(fame_scale(1990), 1.0);
    }

    #[test]
    fn test_retirement_bands() {
        assert_eq!(retirement_ages(1950), (48, 52));
        assert_eq!(retirement_ages(1960), (45, 49));
        assert_eq!(retirement_ages(1980), (40, 45));
        assert_eq!(offseason_fame_decay(1951), 0.25);
        assert_eq!(offseason_fame_decay(1952), 0.15);
    }
}
