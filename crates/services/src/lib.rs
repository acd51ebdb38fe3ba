#![forbid(unsafe_code)]

pub mod error;
pub mod feedback;
pub mod scheduler;
pub mod sessions;

pub use goon_core::Clock;
pub use sessions as session;

pub use error::{QuizServiceError, SessionError};
pub use feedback::{FeedbackEvent, FeedbackSink, Silent};
pub use scheduler::TickScheduler;
pub use sessions::{
    Advance, QuizRenderer, QuizRunner, QuizService, QuizSession, SessionProgress, SessionView,
    SubmitOutcome, TickResult,
};
