use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ResultsError {
    #[error("quota must be > 0")]
    EmptyQuota,

    #[error("score ({score}) exceeds quota ({quota})")]
    ScoreAboveQuota { score: u32, quota: u32 },
}

/// Final tally of a session.
///
/// `percentage` is stored exactly as computed; rounding is left to whoever
/// displays it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Results {
    score: u32,
    quota: u32,
    percentage: f64,
}

impl Results {
    /// # Errors
    ///
    /// Returns `ResultsError` if `quota` is zero or `score` exceeds it.
    pub fn new(score: u32, quota: u32) -> Result<Self, ResultsError> {
        if quota == 0 {
            return Err(ResultsError::EmptyQuota);
        }
        if score > quota {
            return Err(ResultsError::ScoreAboveQuota { score, quota });
        }

        Ok(Self {
            score,
            quota,
            percentage: percentage(score, quota),
        })
    }

    /// Tally that cannot fail: `quota` is raised to at least one and `score`
    /// is capped at `quota`.
    #[must_use]
    pub fn clamped(score: u32, quota: u32) -> Self {
        let quota = quota.max(1);
        let score = score.min(quota);
        Self {
            score,
            quota,
            percentage: percentage(score, quota),
        }
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn quota(&self) -> u32 {
        self.quota
    }

    #[must_use]
    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    #[must_use]
    pub fn performance(&self) -> Performance {
        Performance::from_percentage(self.percentage)
    }
}

fn percentage(score: u32, quota: u32) -> f64 {
    100.0 * f64::from(score) / f64::from(quota)
}

/// Coarse verdict shown alongside the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Performance {
    Excellent,
    Great,
    GoodEffort,
    KeepPractising,
}

impl Performance {
    #[must_use]
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            Performance::Excellent
        } else if percentage >= 70.0 {
            Performance::Great
        } else if percentage >= 50.0 {
            Performance::GoodEffort
        } else {
            Performance::KeepPractising
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Performance::Excellent => "Excellent job! You're a maths wizard!",
            Performance::Great => "Great work! Keep practising!",
            Performance::GoodEffort => "Good effort! You're improving!",
            Performance::KeepPractising => "Keep practising, you'll get better!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_is_unrounded() {
        let perfect = Results::new(10, 10).unwrap();
        assert!((perfect.percentage() - 100.0).abs() < f64::EPSILON);

        let third = Results::new(1, 3).unwrap();
        assert!((third.percentage() - 100.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_impossible_tallies() {
        assert_eq!(Results::new(0, 0).unwrap_err(), ResultsError::EmptyQuota);
        assert_eq!(
            Results::new(11, 10).unwrap_err(),
            ResultsError::ScoreAboveQuota {
                score: 11,
                quota: 10
            }
        );
    }

    #[test]
    fn clamped_never_fails() {
        let results = Results::clamped(12, 10);
        assert_eq!(results.score(), 10);
        assert_eq!(Results::clamped(0, 0).quota(), 1);
    }

    #[test]
    fn performance_tiers_follow_thresholds() {
        let tier = |score| Results::new(score, 10).unwrap().performance();
        assert_eq!(tier(10), Performance::Excellent);
        assert_eq!(tier(9), Performance::Excellent);
        assert_eq!(tier(8), Performance::Great);
        assert_eq!(tier(7), Performance::Great);
        assert_eq!(tier(5), Performance::GoodEffort);
        assert_eq!(tier(4), Performance::KeepPractising);
        assert_eq!(tier(0), Performance::KeepPractising);
    }
}
