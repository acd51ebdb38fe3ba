mod difficulty;
mod ids;
mod problem;
mod results;
mod session;
mod settings;

pub use difficulty::{Difficulty, DifficultyError};
pub use ids::SessionId;
pub use problem::{Operator, Problem, ProblemError};
pub use results::{Performance, Results, ResultsError};
pub use session::{SessionSummary, SessionSummaryError};
pub use settings::{QuizSettings, SettingsError};
