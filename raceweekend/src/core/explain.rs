/// Kind of retirement that is being explained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Engine,
    Crash,
}

/// Point of view of the explanation: the human team's own inspection, or the paddock commenting
/// on someone else's retirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Perspective {
    Team,
    Paddock,
}

/// Race conditions used to pick a generic cause when no factor raised the risk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaceContext {
    pub hot: bool,
    pub engine_danger: f64,
    pub race_length_factor: f64,
}

const MAX_CITED_CAUSES: usize = 2;

/// cause_clause cites the top one or two contributors of a ranked breakdown. Without contributors
/// it falls back to a cause that matches the race conditions.
pub fn cause_clause(breakdown: &[(&str, f64)], ctx: &RaceContext) -> String {
    let cited: Vec<&str> = breakdown
        .iter()
        .filter(|(_, contribution)| *contribution > 0.0)
        .take(MAX_CITED_CAUSES)
        .map(|(label, _)| *label)
        .collect();

    match cited.as_slice() {
        [first] => (*first).to_owned(),
        [first, second] => format!("{} and {}", first, second),
        _ => generic_cause(ctx).to_owned(),
    }
}

fn generic_cause(ctx: &RaceContext) -> &'static str {
    if ctx.hot {
        "heat stress"
    } else if ctx.engine_danger > 1.0 {
        "track strain"
    } else if ctx.race_length_factor > 1.0 {
        "the race distance"
    } else {
        "a fault nobody could pin down"
    }
}

/// explain_failure turns a ranked breakdown into a narrative sentence.
pub fn explain_failure(
    breakdown: &[(&str, f64)],
    kind: FailureKind,
    perspective: Perspective,
    ctx: &RaceContext,
) -> String {
    let causes = cause_clause(breakdown, ctx);
    match (kind, perspective) {
        (FailureKind::Engine, Perspective::Team) => format!(
            "Post-race inspection suggests {} was the decisive factor in the failure.",
            causes
        ),
        (FailureKind::Engine, Perspective::Paddock) => {
            format!("Paddock analysis points to {} as the likely cause.", causes)
        }
        (FailureKind::Crash, Perspective::Team) => format!(
            "Race control cite {} as the key factor in the accident.",
            causes
        ),
        (FailureKind::Crash, Perspective::Paddock) => format!(
            "Observers suggest {} played a major role in the crash.",
            causes
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CALM: RaceContext = RaceContext {
        hot: false,
        engine_danger: 1.0,
        race_length_factor: 1.0,
    };

    #[test]
    fn test_cites_top_two() {
        let breakdown = [
            ("engine condition", 0.24),
            ("track engine strain", 0.06),
            ("driver mechanical sympathy", 0.03),
        ];
        assert_eq!(
            cause_clause(&breakdown, &CALM),
            "engine condition and track engine strain"
        );
        assert_eq!(cause_clause(&breakdown[..1], &CALM), "engine condition");
    }

    #[test]
    fn test_empty_breakdown_uses_context() {
        let hot = RaceContext { hot: true, ..CALM };
        assert_eq!(cause_clause(&[], &hot), "heat stress");

        let strained = RaceContext {
            engine_danger: 1.2,
            ..CALM
        };
        assert_eq!(cause_clause(&[], &strained), "track strain");

        let long = RaceContext {
            race_length_factor: 1.6,
            ..CALM
        };
        assert_eq!(cause_clause(&[], &long), "the race distance");
        assert_eq!(cause_clause(&[], &CALM), "a fault nobody could pin down");
    }

    #[test]
    fn test_sentence_per_perspective() {
        let breakdown = [("wet conditions", 0.02)];
        assert_eq!(
            explain_failure(&breakdown, FailureKind::Crash, Perspective::Paddock, &CALM),
            "Observers suggest wet conditions played a major role in the crash."
        );
        assert!(
            explain_failure(&breakdown, FailureKind::Engine, Perspective::Team, &CALM)
                .starts_with("Post-race inspection")
        );
    }
}
