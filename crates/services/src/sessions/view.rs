use goon_core::TimerHandle;
use goon_core::model::{Problem, Results, SessionId};

/// Snapshot of the question currently awaiting an answer.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub session_id: SessionId,
    pub problem: Problem,
    pub question_text: String,
    /// Zero-based position of this question.
    pub index: u32,
    pub quota: u32,
    pub score: u32,
    /// Seconds left, for timed difficulties only.
    pub time_remaining: Option<u32>,
    /// Handle the scheduler must tick with, for timed difficulties only.
    pub timer: Option<TimerHandle>,
}

impl SessionView {
    /// One-based question number for display.
    #[must_use]
    pub fn number(&self) -> u32 {
        self.index + 1
    }
}

/// Where the session went after a question was settled.
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    Continuing(SessionView),
    Finished(Results),
}

impl Advance {
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self, Advance::Finished(_))
    }
}

/// Verdict on a submitted answer.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub correct: bool,
    pub expected: u32,
    pub score: u32,
    pub advance: Advance,
}

/// Effect of one countdown tick that belonged to the live question.
#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    pub remaining: u32,
    pub expired: bool,
    pub low_time: bool,
    /// The answer that went unanswered, set on expiry.
    pub expected: Option<u32>,
    /// Set on expiry.
    pub advance: Option<Advance>,
}
