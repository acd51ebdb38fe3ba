use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::{Operator, Problem};

/// Smallest operand (and smallest division answer) the generator produces.
pub const MIN_OPERAND: u32 = 1;
/// Largest operand (and largest division answer) the generator produces.
pub const MAX_OPERAND: u32 = 12;

/// Anything that can hand out the next question of a session.
pub trait ProblemSource {
    fn next_problem(&mut self) -> Problem;
}

/// Draws one times-table problem from `rng`.
///
/// The operator is uniform over the four operations. Subtraction draws the
/// subtrahend from `[1, first]` so the difference is never negative. Division
/// is built backwards: the divisor and the answer are drawn, and the dividend
/// is their product, so every division is exact and the answer is uniform in
/// `[1, 12]`.
pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Problem {
    match rng.random_range(0..Operator::ALL.len()) {
        0 => {
            let (left, right) = (operand(rng), operand(rng));
            Problem::generated(left, right, Operator::Add, left + right)
        }
        1 => {
            let left = operand(rng);
            let right = rng.random_range(MIN_OPERAND..=left);
            Problem::generated(left, right, Operator::Sub, left - right)
        }
        2 => {
            let (left, right) = (operand(rng), operand(rng));
            Problem::generated(left, right, Operator::Mul, left * right)
        }
        _ => {
            let divisor = operand(rng);
            let answer = operand(rng);
            Problem::generated(divisor * answer, divisor, Operator::Div, answer)
        }
    }
}

fn operand<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.random_range(MIN_OPERAND..=MAX_OPERAND)
}

/// `ProblemSource` backed by a random number generator.
#[derive(Debug, Clone)]
pub struct RandomProblems<R = StdRng> {
    rng: R,
}

impl<R: Rng> RandomProblems<R> {
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomProblems<StdRng> {
    /// Deterministic sequence for replays and tests.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    #[must_use]
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> ProblemSource for RandomProblems<R> {
    fn next_problem(&mut self) -> Problem {
        generate(&mut self.rng)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const SAMPLES: usize = 20_000;

    fn samples(seed: u64) -> Vec<Problem> {
        let mut source = RandomProblems::seeded(seed);
        (0..SAMPLES).map(|_| source.next_problem()).collect()
    }

    #[test]
    fn subtraction_never_goes_negative() {
        for p in samples(1).iter().filter(|p| p.operator() == Operator::Sub) {
            assert!(p.left() >= p.right(), "{p}");
            assert_eq!(p.answer(), p.left() - p.right());
            assert!((MIN_OPERAND..=MAX_OPERAND).contains(&p.left()));
            assert!(p.right() >= MIN_OPERAND);
        }
    }

    #[test]
    fn division_is_exact_and_built_from_the_answer() {
        let divisions: Vec<_> = samples(2)
            .into_iter()
            .filter(|p| p.operator() == Operator::Div)
            .collect();
        assert!(!divisions.is_empty());

        for p in &divisions {
            assert_eq!(p.left(), p.right() * p.answer(), "{p}");
            assert!((MIN_OPERAND..=MAX_OPERAND).contains(&p.right()));
            assert!((MIN_OPERAND..=MAX_OPERAND).contains(&p.answer()));
        }

        let answers: HashSet<_> = divisions.iter().map(Problem::answer).collect();
        assert_eq!(answers.len(), MAX_OPERAND as usize);
    }

    #[test]
    fn addition_and_multiplication_stay_in_range() {
        for p in samples(3) {
            match p.operator() {
                Operator::Add => assert_eq!(p.answer(), p.left() + p.right()),
                Operator::Mul => assert_eq!(p.answer(), p.left() * p.right()),
                Operator::Sub | Operator::Div => continue,
            }
            assert!((MIN_OPERAND..=MAX_OPERAND).contains(&p.left()));
            assert!((MIN_OPERAND..=MAX_OPERAND).contains(&p.right()));
        }
    }

    #[test]
    fn every_operator_is_drawn_roughly_evenly() {
        let all = samples(4);
        for op in Operator::ALL {
            let count = all.iter().filter(|p| p.operator() == op).count();
            // Expected 5000 each; allow a generous band.
            assert!((4_500..=5_500).contains(&count), "{op:?}: {count}");
        }
    }

    #[test]
    fn seeded_sources_are_reproducible() {
        assert_eq!(samples(42)[..50], samples(42)[..50]);
    }
}
