use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

use goon_core::model::{Difficulty, Problem, QuizSettings, Results, SessionId, SessionSummary};
use goon_core::{Clock, CountdownTimer, ProblemSource, TickState, TimerHandle};

use super::progress::SessionProgress;
use super::view::{Advance, SessionView, SubmitOutcome, TickResult};
use crate::error::SessionError;
use crate::feedback::{FeedbackEvent, FeedbackSink};

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One quiz playthrough.
///
/// The session is either awaiting an answer to `current` or completed. Both a
/// submission and a countdown expiry settle the current question and then go
/// through [`QuizSession::advance`], the only place the question index moves,
/// so a question can never be counted twice. The countdown is cancelled before
/// advancing, which turns any tick still in flight for it into a stale no-op.
pub struct QuizSession {
    id: SessionId,
    difficulty: Difficulty,
    settings: QuizSettings,
    problems: Box<dyn ProblemSource + Send>,
    feedback: Arc<dyn FeedbackSink>,
    clock: Clock,
    score: u32,
    index: u32,
    current: Option<Problem>,
    timer: CountdownTimer,
    started_at: DateTime<Utc>,
    summary: Option<SessionSummary>,
}

impl QuizSession {
    /// Starts a session: score and index at zero, first problem drawn, and the
    /// countdown armed when `difficulty` is timed.
    pub(crate) fn start(
        id: SessionId,
        difficulty: Difficulty,
        settings: QuizSettings,
        mut problems: Box<dyn ProblemSource + Send>,
        feedback: Arc<dyn FeedbackSink>,
        clock: Clock,
    ) -> Self {
        let first = problems.next_problem();
        let mut session = Self {
            id,
            difficulty,
            settings,
            problems,
            feedback,
            clock,
            score: 0,
            index: 0,
            current: Some(first),
            timer: CountdownTimer::new(),
            started_at: clock.now(),
            summary: None,
        };
        session.arm_countdown();

        tracing::info!(
            session = %id,
            difficulty = difficulty.code(),
            quota = session.settings.quota(),
            "quiz session started"
        );
        session
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Zero-based index of the current question; equals the quota once complete.
    #[must_use]
    pub fn question_index(&self) -> u32 {
        self.index
    }

    #[must_use]
    pub fn quota(&self) -> u32 {
        self.settings.quota()
    }

    #[must_use]
    pub fn current_problem(&self) -> Option<&Problem> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn time_remaining(&self) -> Option<u32> {
        self.timer.remaining()
    }

    /// Handle of the live countdown, if one is armed.
    #[must_use]
    pub fn timer_handle(&self) -> Option<TimerHandle> {
        self.timer.handle()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current.is_none()
    }

    /// Summary of the finished session, `None` while questions remain.
    #[must_use]
    pub fn summary(&self) -> Option<&SessionSummary> {
        self.summary.as_ref()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            quota: self.quota(),
            answered: self.index,
            remaining: self.quota().saturating_sub(self.index),
            is_complete: self.is_complete(),
        }
    }

    /// Score so far against the full quota.
    #[must_use]
    pub fn results(&self) -> Results {
        Results::clamped(self.score, self.quota())
    }

    #[must_use]
    pub fn current_view(&self) -> Option<SessionView> {
        self.current.map(|problem| self.view_of(problem))
    }

    /// Forwards a keypress cue to the feedback sink. Game state is untouched.
    pub fn keypress(&self) {
        self.feedback.notify(FeedbackEvent::Keypress);
    }

    /// Scores `raw` against the current problem and moves on.
    ///
    /// Text that is not an integer counts as a wrong answer.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` if the session is already finished.
    pub fn submit(&mut self, raw: &str) -> Result<SubmitOutcome, SessionError> {
        let Some(problem) = self.current else {
            return Err(SessionError::Completed);
        };

        let correct = problem.is_correct(raw);
        if correct {
            self.score += 1;
            self.feedback.notify(FeedbackEvent::Correct);
        } else {
            self.feedback.notify(FeedbackEvent::Wrong);
        }
        tracing::debug!(
            session = %self.id,
            index = self.index,
            correct,
            score = self.score,
            "answer scored"
        );

        self.timer.cancel();
        let advance = self.advance()?;

        Ok(SubmitOutcome {
            correct,
            expected: problem.answer(),
            score: self.score,
            advance,
        })
    }

    /// Applies one second of countdown delivered with `handle`.
    ///
    /// Returns `Ok(None)` when `handle` is no longer live: the countdown was
    /// cancelled, replaced by the next question's, or belongs to another
    /// session. That includes ticks left over once the session has finished.
    /// Reaching zero settles the question as wrong and advances.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` if the session is already finished
    /// while `handle` is somehow still live.
    pub fn tick(&mut self, handle: TimerHandle) -> Result<Option<TickResult>, SessionError> {
        if !self.timer.is_live(handle) {
            tracing::trace!(session = %self.id, ?handle, "stale tick ignored");
            return Ok(None);
        }
        let Some(problem) = self.current else {
            return Err(SessionError::Completed);
        };

        match self.timer.tick(handle) {
            TickState::Stale => {
                tracing::trace!(session = %self.id, ?handle, "stale tick ignored");
                Ok(None)
            }
            TickState::Counting { remaining } => {
                let low_time = self.settings.is_low_time(remaining);
                if low_time {
                    self.feedback.notify(FeedbackEvent::TickWarning);
                }
                Ok(Some(TickResult {
                    remaining,
                    expired: false,
                    low_time,
                    expected: None,
                    advance: None,
                }))
            }
            TickState::Expired => {
                tracing::debug!(session = %self.id, index = self.index, "question timed out");
                self.feedback.notify(FeedbackEvent::Wrong);
                let advance = self.advance()?;
                Ok(Some(TickResult {
                    remaining: 0,
                    expired: true,
                    low_time: false,
                    expected: Some(problem.answer()),
                    advance: Some(advance),
                }))
            }
        }
    }

    /// Leaves the current question and presents the next, or finishes.
    ///
    /// Submissions and expiries call this themselves. Calling it directly
    /// forfeits the current question unscored.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` if the session is already finished.
    pub fn advance(&mut self) -> Result<Advance, SessionError> {
        if self.current.is_none() {
            return Err(SessionError::Completed);
        }

        self.timer.cancel();
        self.index += 1;

        if self.index < self.quota() {
            let next = self.problems.next_problem();
            self.current = Some(next);
            self.arm_countdown();
            return Ok(Advance::Continuing(self.view_of(next)));
        }

        self.current = None;
        let results = self.results();
        self.summary = Some(self.finish(results));
        self.feedback.notify(FeedbackEvent::SessionComplete);
        tracing::info!(
            session = %self.id,
            score = results.score(),
            quota = results.quota(),
            "quiz session completed"
        );
        Ok(Advance::Finished(results))
    }

    fn arm_countdown(&mut self) {
        if let Some(seconds) = self.difficulty.time_limit_secs() {
            self.timer.arm(self.id, seconds);
        }
    }

    fn view_of(&self, problem: Problem) -> SessionView {
        SessionView {
            session_id: self.id,
            problem,
            question_text: problem.question_text(),
            index: self.index,
            quota: self.quota(),
            score: self.score,
            time_remaining: self.timer.remaining(),
            timer: self.timer.handle(),
        }
    }

    fn finish(&self, results: Results) -> SessionSummary {
        // A system clock may step backwards mid-session.
        SessionSummary::clamped(
            self.id,
            self.difficulty,
            results,
            self.started_at,
            self.clock.now(),
        )
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("id", &self.id)
            .field("difficulty", &self.difficulty)
            .field("score", &self.score)
            .field("index", &self.index)
            .field("current", &self.current)
            .field("timer", &self.timer)
            .field("started_at", &self.started_at)
            .field("is_complete", &self.is_complete())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
