//! Path scoring for hand-drawn maze routes.

use std::fmt;

/// Score of a route: one point per step plus one per hazard entered.
/// Lower is better.
#[inline]
pub fn score(steps: usize, hazard_hits: usize) -> usize {
    steps + hazard_hits
}

/// A drawn route compared with the reference shortest path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    /// Moves in the drawn route (cells minus the start cell).
    pub steps: usize,
    /// Moves in the reference route.
    pub optimal_steps: usize,
    pub hazard_hits: usize,
}

impl Evaluation {
    pub fn new(steps: usize, optimal_steps: usize, hazard_hits: usize) -> Self {
        Self {
            steps,
            optimal_steps,
            hazard_hits,
        }
    }

    pub fn score(&self) -> usize {
        score(self.steps, self.hazard_hits)
    }

    /// Same length as the reference and no hazards entered.
    pub fn is_perfect(&self) -> bool {
        self.steps == self.optimal_steps && self.hazard_hits == 0
    }

    /// Steps away from optimal: `steps - optimal_steps + hazard_hits`.
    pub fn deviation(&self) -> i64 {
        self.steps as i64 - self.optimal_steps as i64 + self.hazard_hits as i64
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Your path length: {}", self.steps)?;
        writeln!(f, "Optimal path length: {}", self.optimal_steps)?;
        writeln!(f, "Hazards hit: {}", self.hazard_hits)?;
        writeln!(f, "Your score: {}", self.score())?;
        if self.is_perfect() {
            write!(f, "Perfect! You found the optimal path!")
        } else {
            write!(f, "You were {} steps away from the optimal score.", self.deviation())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_adds_hazard_penalty() {
        assert_eq!(score(12, 0), 12);
        assert_eq!(score(12, 3), 15);
    }

    #[test]
    fn perfect_needs_length_and_no_hazards() {
        assert!(Evaluation::new(10, 10, 0).is_perfect());
        assert!(!Evaluation::new(10, 10, 1).is_perfect());
        assert!(!Evaluation::new(11, 10, 0).is_perfect());
    }

    #[test]
    fn deviation_counts_extra_steps_and_hazards() {
        let e = Evaluation::new(14, 10, 2);
        assert_eq!(e.score(), 16);
        assert_eq!(e.deviation(), 6);
        assert!(e.to_string().ends_with("You were 6 steps away from the optimal score."));
    }

    #[test]
    fn perfect_report() {
        let e = Evaluation::new(10, 10, 0);
        assert_eq!(e.deviation(), 0);
        assert!(e.to_string().ends_with("Perfect! You found the optimal path!"));
    }
}
