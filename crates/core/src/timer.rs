//! Per-question countdown with single-owner handles.
//!
//! Every call to [`CountdownTimer::arm`] bumps a generation counter and hands
//! out a [`TimerHandle`] that captures it. Ticks are only honoured for the
//! handle of the live countdown; anything else is reported as
//! [`TickState::Stale`], which is how a tick that was already in flight when
//! its countdown was cancelled gets dropped.

use crate::model::SessionId;

/// Opaque ticket for delivering ticks to one armed countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    session: SessionId,
    generation: u64,
}

impl TimerHandle {
    #[must_use]
    pub fn session(&self) -> SessionId {
        self.session
    }
}

/// What a tick did to the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickState {
    /// The handle does not belong to the live countdown. Nothing changed.
    Stale,
    /// One second elapsed and time remains.
    Counting { remaining: u32 },
    /// The last second elapsed. The countdown is now disarmed.
    Expired,
}

#[derive(Debug, Clone, Copy)]
struct Armed {
    handle: TimerHandle,
    remaining: u32,
}

/// At most one live countdown, owned by a session.
#[derive(Debug, Default)]
pub struct CountdownTimer {
    generation: u64,
    armed: Option<Armed>,
}

impl CountdownTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fresh countdown of `seconds`.
    ///
    /// Any live countdown is cancelled first, so its handle goes stale.
    pub fn arm(&mut self, session: SessionId, seconds: u32) -> TimerHandle {
        self.cancel();
        self.generation = self.generation.wrapping_add(1);
        let handle = TimerHandle {
            session,
            generation: self.generation,
        };
        self.armed = Some(Armed {
            handle,
            remaining: seconds,
        });
        handle
    }

    /// Disarms the live countdown, if any. Calling it again is a no-op.
    pub fn cancel(&mut self) -> Option<TimerHandle> {
        self.armed.take().map(|armed| armed.handle)
    }

    #[must_use]
    pub fn is_live(&self, handle: TimerHandle) -> bool {
        self.armed.is_some_and(|armed| armed.handle == handle)
    }

    #[must_use]
    pub fn handle(&self) -> Option<TimerHandle> {
        self.armed.map(|armed| armed.handle)
    }

    #[must_use]
    pub fn remaining(&self) -> Option<u32> {
        self.armed.map(|armed| armed.remaining)
    }

    /// Counts one second down on the countdown `handle` refers to.
    pub fn tick(&mut self, handle: TimerHandle) -> TickState {
        let Some(armed) = self.armed.as_mut().filter(|armed| armed.handle == handle) else {
            return TickState::Stale;
        };

        armed.remaining = armed.remaining.saturating_sub(1);
        if armed.remaining == 0 {
            self.armed = None;
            TickState::Expired
        } else {
            TickState::Counting {
                remaining: armed.remaining,
            }
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
