use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::model::{Difficulty, Results, SessionId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionSummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,
}

/// Record of a finished playthrough.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    session_id: SessionId,
    difficulty: Difficulty,
    results: Results,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
}

impl SessionSummary {
    /// # Errors
    ///
    /// Returns `SessionSummaryError::InvalidTimeRange` if `completed_at` is before `started_at`.
    pub fn new(
        session_id: SessionId,
        difficulty: Difficulty,
        results: Results,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, SessionSummaryError> {
        if completed_at < started_at {
            return Err(SessionSummaryError::InvalidTimeRange);
        }

        Ok(Self {
            session_id,
            difficulty,
            results,
            started_at,
            completed_at,
        })
    }

    /// Like [`SessionSummary::new`], but a `completed_at` earlier than
    /// `started_at` is pulled up to it, giving a zero elapsed time.
    #[must_use]
    pub fn clamped(
        session_id: SessionId,
        difficulty: Difficulty,
        results: Results,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            session_id,
            difficulty,
            results,
            started_at,
            completed_at: completed_at.max(started_at),
        }
    }

    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn results(&self) -> &Results {
        &self.results
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// Wall-clock time spent on the session.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.completed_at - self.started_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn summary_reports_elapsed_time() {
        let start = fixed_now();
        let end = start + Duration::seconds(95);
        let results = Results::new(7, 10).unwrap();

        let summary =
            SessionSummary::new(SessionId::new(3), Difficulty::Limit20, results, start, end)
                .unwrap();

        assert_eq!(summary.session_id(), SessionId::new(3));
        assert_eq!(summary.results().score(), 7);
        assert_eq!(summary.elapsed(), Duration::seconds(95));
    }

    #[test]
    fn summary_rejects_reversed_range() {
        let start = fixed_now();
        let results = Results::new(0, 10).unwrap();
        let err = SessionSummary::new(
            SessionId::new(1),
            Difficulty::NoLimit,
            results,
            start,
            start - Duration::seconds(1),
        )
        .unwrap_err();
        assert_eq!(err, SessionSummaryError::InvalidTimeRange);
    }

    #[test]
    fn clamped_summary_never_runs_backwards() {
        let start = fixed_now();
        let results = Results::new(4, 10).unwrap();

        let summary = SessionSummary::clamped(
            SessionId::new(1),
            Difficulty::Limit10,
            results,
            start,
            start - Duration::seconds(30),
        );
        assert_eq!(summary.completed_at(), start);
        assert_eq!(summary.elapsed(), Duration::zero());

        let later = start + Duration::seconds(12);
        let summary =
            SessionSummary::clamped(SessionId::new(1), Difficulty::Limit10, results, start, later);
        assert_eq!(summary.completed_at(), later);
    }
}
