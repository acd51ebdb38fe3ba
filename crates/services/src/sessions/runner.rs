use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};

use goon_core::TimerHandle;
use goon_core::model::{Results, SessionSummary};

use super::service::QuizSession;
use super::view::{Advance, SessionView, SubmitOutcome, TickResult};
use crate::error::SessionError;
use crate::scheduler::{TICK_PERIOD, TickScheduler};

/// Presentation seam for a running quiz.
pub trait QuizRenderer {
    fn question(&mut self, view: &SessionView);
    fn answered(&mut self, outcome: &SubmitOutcome);
    fn tick(&mut self, tick: &TickResult);
    fn finished(&mut self, results: &Results, summary: Option<&SessionSummary>);
}

/// Drives a session from input lines and countdown ticks on a single task.
///
/// Every engine call happens inside one `select!` loop, so the session is
/// never touched concurrently. Once a question is settled the runner shows
/// the verdict for the configured feedback delay, dropping any input typed
/// meanwhile, before the next question appears and its countdown starts.
#[derive(Debug)]
pub struct QuizRunner {
    scheduler: TickScheduler,
    ticks: mpsc::UnboundedReceiver<TimerHandle>,
}

impl QuizRunner {
    #[must_use]
    pub fn new() -> Self {
        let (scheduler, ticks) = TickScheduler::new();
        Self { scheduler, ticks }
    }

    /// Plays `session` to the end.
    ///
    /// Returns `Ok(None)` if `input` closes before the last question is
    /// settled.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` if `session` is already finished.
    pub async fn run<R: QuizRenderer>(
        &mut self,
        session: &mut QuizSession,
        input: &mut mpsc::Receiver<String>,
        renderer: &mut R,
    ) -> Result<Option<Results>, SessionError> {
        let delay = session.settings().feedback_delay();
        let first = session.current_view().ok_or(SessionError::Completed)?;
        let Self { scheduler, ticks } = self;

        present(scheduler, renderer, &first);
        let mut pending: Option<(Instant, Advance)> = None;

        loop {
            let resume_at = pending.as_ref().map(|(at, _)| *at);

            tokio::select! {
                biased;

                () = sleep_until(resume_at.unwrap_or_else(Instant::now)), if resume_at.is_some() => {
                    let Some((_, advance)) = pending.take() else {
                        continue;
                    };
                    match advance {
                        Advance::Continuing(view) => present(scheduler, renderer, &view),
                        Advance::Finished(results) => {
                            renderer.finished(&results, session.summary());
                            return Ok(Some(results));
                        }
                    }
                }

                Some(handle) = ticks.recv() => {
                    let Some(tick) = session.tick(handle)? else {
                        continue;
                    };
                    renderer.tick(&tick);
                    if let Some(advance) = tick.advance {
                        scheduler.cancel();
                        pending = Some((Instant::now() + delay, advance));
                    }
                }

                line = input.recv() => {
                    let Some(line) = line else {
                        scheduler.cancel();
                        tracing::info!(session = %session.id(), "input closed, session abandoned");
                        return Ok(None);
                    };
                    session.keypress();
                    if pending.is_some() {
                        tracing::debug!(session = %session.id(), "input ignored while showing feedback");
                        continue;
                    }

                    let outcome = session.submit(&line)?;
                    scheduler.cancel();
                    renderer.answered(&outcome);
                    pending = Some((Instant::now() + delay, outcome.advance));
                }
            }
        }
    }
}

impl Default for QuizRunner {
    fn default() -> Self {
        Self::new()
    }
}

fn present<R: QuizRenderer>(scheduler: &mut TickScheduler, renderer: &mut R, view: &SessionView) {
    renderer.question(view);
    if let Some(handle) = view.timer {
        scheduler.arm(handle, TICK_PERIOD);
    }
}
