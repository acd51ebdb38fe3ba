#![forbid(unsafe_code)]

pub mod generator;
pub mod model;
pub mod time;
pub mod timer;

pub use generator::{ProblemSource, RandomProblems};
pub use time::Clock;
pub use timer::{CountdownTimer, TickState, TimerHandle};
