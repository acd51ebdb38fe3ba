use std::fmt;
use std::sync::Arc;

use goon_core::model::{Difficulty, QuizSettings, SessionId};
use goon_core::{Clock, RandomProblems};

use super::service::QuizSession;
use crate::error::QuizServiceError;
use crate::feedback::{FeedbackSink, Silent};

/// Hands out quiz sessions sharing one clock, settings and feedback sink.
///
/// Each started session gets the next `SessionId`, so handles minted by a
/// session that has been replaced can never tick its successor.
#[derive(Clone)]
pub struct QuizService {
    clock: Clock,
    settings: QuizSettings,
    feedback: Arc<dyn FeedbackSink>,
    seed: Option<u64>,
    next_id: SessionId,
}

impl QuizService {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            settings: QuizSettings::classic(),
            feedback: Arc::new(Silent),
            seed: None,
            next_id: SessionId::new(1),
        }
    }

    /// Overrides the question quota of the current settings.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Settings` if `quota` is out of range.
    pub fn with_quota(mut self, quota: u32) -> Result<Self, QuizServiceError> {
        self.settings = self.settings.with_quota(quota)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_feedback(mut self, feedback: Arc<dyn FeedbackSink>) -> Self {
        self.feedback = feedback;
        self
    }

    /// Makes question sequences reproducible. Session `n` draws from
    /// `seed + n`, so replays of the same run see the same questions.
    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    /// Starts a new session at `difficulty`.
    pub fn start_session(&mut self, difficulty: Difficulty) -> QuizSession {
        let id = self.next_id;
        self.next_id = id.next();

        let problems = match self.seed {
            Some(seed) => RandomProblems::seeded(seed.wrapping_add(id.value())),
            None => RandomProblems::from_os_rng(),
        };

        QuizSession::start(
            id,
            difficulty,
            self.settings.clone(),
            Box::new(problems),
            Arc::clone(&self.feedback),
            self.clock,
        )
    }
}

impl fmt::Debug for QuizService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizService")
            .field("clock", &self.clock)
            .field("settings", &self.settings)
            .field("seed", &self.seed)
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use goon_core::time::fixed_clock;

    #[test]
    fn sessions_get_increasing_ids() {
        let mut service = QuizService::new(fixed_clock());
        let first = service.start_session(Difficulty::NoLimit);
        let second = service.start_session(Difficulty::Limit10);

        assert_eq!(first.id(), SessionId::new(1));
        assert_eq!(second.id(), SessionId::new(2));
        assert_eq!(second.difficulty(), Difficulty::Limit10);
    }

    #[test]
    fn seeded_service_replays_questions() {
        let mut a = QuizService::new(fixed_clock()).with_seed(Some(99));
        let mut b = QuizService::new(fixed_clock()).with_seed(Some(99));

        let first_a = a.start_session(Difficulty::NoLimit);
        let first_b = b.start_session(Difficulty::NoLimit);
        assert_eq!(first_a.current_problem(), first_b.current_problem());
    }

    #[test]
    fn quota_override_is_validated() {
        let service = QuizService::new(fixed_clock()).with_quota(3).unwrap();
        assert_eq!(service.settings().quota(), 3);

        let err = QuizService::new(fixed_clock()).with_quota(0).unwrap_err();
        assert!(matches!(err, QuizServiceError::Settings(_)));
    }

    #[test]
    fn stale_handle_from_replaced_session_is_ignored() {
        let mut service = QuizService::new(fixed_clock());
        let old = service.start_session(Difficulty::Limit10);
        let old_handle = old.timer_handle().unwrap();
        drop(old);

        let mut replacement = service.start_session(Difficulty::Limit10);
        assert_eq!(replacement.tick(old_handle).unwrap(), None);
        assert_eq!(replacement.time_remaining(), Some(10));
    }
}
