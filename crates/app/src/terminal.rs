use std::io::{self, Write};

use goon_core::model::{Results, SessionSummary};
use services::{FeedbackEvent, FeedbackSink, QuizRenderer, SessionView, SubmitOutcome, TickResult};

/// Plain line-oriented rendering on stdout.
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    timed: bool,
}

impl TerminalRenderer {
    fn flush() {
        // The prompt is cosmetic; a closed stdout must not end the game.
        let _ = io::stdout().flush();
    }
}

impl QuizRenderer for TerminalRenderer {
    fn question(&mut self, view: &SessionView) {
        self.timed = view.time_remaining.is_some();
        println!();
        println!(
            "Question {}/{}    Score: {}",
            view.number(),
            view.quota,
            view.score
        );
        match view.time_remaining {
            Some(secs) => println!("Time: {secs}"),
            None => println!("Time: --"),
        }
        print!("{}  ", view.question_text);
        Self::flush();
    }

    fn answered(&mut self, outcome: &SubmitOutcome) {
        if outcome.correct {
            println!("Correct!  Score: {}", outcome.score);
        } else {
            println!("Wrong, the answer was {}.  Score: {}", outcome.expected, outcome.score);
        }
        if outcome.advance.is_finished() {
            println!("That was the last question.");
        }
    }

    fn tick(&mut self, tick: &TickResult) {
        if tick.expired {
            match tick.expected {
                Some(answer) => println!("\nTime's up! The answer was {answer}."),
                None => println!("\nTime's up!"),
            }
            return;
        }
        if tick.low_time {
            print!("\n[{}s left!] ", tick.remaining);
            Self::flush();
        } else if self.timed && tick.remaining % 5 == 0 {
            print!("\n[{}s] ", tick.remaining);
            Self::flush();
        }
    }

    fn finished(&mut self, results: &Results, summary: Option<&SessionSummary>) {
        println!();
        println!("Game Results");
        println!("Score: {}/{}", results.score(), results.quota());
        println!("{}%", results.percentage());
        println!("{}", results.performance().message());
        if let Some(summary) = summary {
            println!("Finished in {}s", summary.elapsed().num_seconds());
        }
    }
}

/// Rings the terminal bell for the cues that matter during play.
#[derive(Debug, Clone, Copy)]
pub struct BellFeedback {
    enabled: bool,
}

impl BellFeedback {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl FeedbackSink for BellFeedback {
    fn notify(&self, event: FeedbackEvent) {
        tracing::trace!(%event, "feedback");
        if !self.enabled {
            return;
        }
        match event {
            FeedbackEvent::Wrong | FeedbackEvent::TickWarning | FeedbackEvent::SessionComplete => {
                let mut err = io::stderr();
                let _ = err.write_all(b"\x07");
                let _ = err.flush();
            }
            FeedbackEvent::Correct | FeedbackEvent::Keypress => {}
        }
    }
}
