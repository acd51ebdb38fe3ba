mod progress;
mod runner;
mod service;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use progress::SessionProgress;
pub use runner::{QuizRenderer, QuizRunner};
pub use service::QuizSession;
pub use view::{Advance, SessionView, SubmitOutcome, TickResult};
pub use workflow::QuizService;
