//! Fire-and-forget notifications for optional audio cues.
//!
//! Sinks never report failure back to the session: a missing sound device or
//! a broken pipe must not change the game.

use std::fmt;

/// Something the player could hear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackEvent {
    Correct,
    Wrong,
    TickWarning,
    Keypress,
    SessionComplete,
}

pub trait FeedbackSink: Send + Sync {
    fn notify(&self, event: FeedbackEvent);
}

/// Sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl FeedbackSink for Silent {
    fn notify(&self, _event: FeedbackEvent) {}
}

impl fmt::Display for FeedbackEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FeedbackEvent::Correct => "correct",
            FeedbackEvent::Wrong => "wrong",
            FeedbackEvent::TickWarning => "tick-warning",
            FeedbackEvent::Keypress => "keypress",
            FeedbackEvent::SessionComplete => "session-complete",
        };
        f.write_str(name)
    }
}
