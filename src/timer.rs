//! Tick-based countdown timer, the primitive every state machine of the simulation is built on.

use crate::constants::TICKS_PER_SECOND;

/// The length a timer runs for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickDuration {
    /// Expires once this many ticks have elapsed.
    Ticks(u32),
    /// Never expires on its own.
    Indefinite,
}

impl TickDuration {
    /// A finite duration expressed in seconds of game time.
    pub fn seconds(seconds: f32) -> Self {
        Self::Ticks(seconds_to_ticks(seconds))
    }

    pub fn is_indefinite(&self) -> bool {
        matches!(self, Self::Indefinite)
    }
}

/// The lifecycle state of a [`TickTimer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimerStatus {
    #[default]
    Stopped,
    Running,
    Expired,
}

/// Converts game seconds into ticks, rounding to the nearest tick.
pub fn seconds_to_ticks(seconds: f32) -> u32 {
    (seconds * TICKS_PER_SECOND as f32).round().max(0.0) as u32
}

/// A countdown and elapsed-tick counter.
///
/// Once expired it stays expired until [`TickTimer::restart`] is called again; ticking an expired
/// or stopped timer is a no-op. None of the operations can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickTimer {
    duration: TickDuration,
    elapsed: u32,
    status: TimerStatus,
}

impl Default for TickTimer {
    fn default() -> Self {
        Self {
            duration: TickDuration::Indefinite,
            elapsed: 0,
            status: TimerStatus::Stopped,
        }
    }
}

impl TickTimer {
    /// Creates a stopped timer with the given duration.
    pub fn new(duration: TickDuration) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    /// Resets the elapsed count and starts running with the given duration.
    ///
    /// A zero-tick duration expires immediately.
    pub fn restart(&mut self, duration: TickDuration) {
        self.duration = duration;
        self.elapsed = 0;
        self.status = match duration {
            TickDuration::Ticks(0) => TimerStatus::Expired,
            _ => TimerStatus::Running,
        };
    }

    /// Restarts the timer with a duration given in seconds.
    pub fn restart_seconds(&mut self, seconds: f32) {
        self.restart(TickDuration::seconds(seconds));
    }

    /// Restarts the timer without an expiry.
    pub fn restart_indefinitely(&mut self) {
        self.restart(TickDuration::Indefinite);
    }

    /// Stops the timer, keeping the elapsed count.
    pub fn stop(&mut self) {
        if self.status == TimerStatus::Running {
            self.status = TimerStatus::Stopped;
        }
    }

    /// Advances the timer by one tick if it is running.
    pub fn tick(&mut self) {
        if self.status != TimerStatus::Running {
            return;
        }

        match self.duration {
            TickDuration::Ticks(duration) => {
                if self.elapsed < duration {
                    self.elapsed += 1;
                }
                if self.elapsed >= duration {
                    self.status = TimerStatus::Expired;
                }
            }
            TickDuration::Indefinite => self.elapsed = self.elapsed.saturating_add(1),
        }
    }

    pub fn has_expired(&self) -> bool {
        self.status == TimerStatus::Expired
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    pub fn is_stopped(&self) -> bool {
        self.status == TimerStatus::Stopped
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn duration(&self) -> TickDuration {
        self.duration
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// Ticks left until expiry, or `None` for an indefinite timer.
    pub fn remaining(&self) -> Option<u32> {
        match self.duration {
            TickDuration::Ticks(duration) => Some(duration.saturating_sub(self.elapsed)),
            TickDuration::Indefinite => None,
        }
    }

    /// True exactly when the elapsed count equals `tick`.
    pub fn at_tick(&self, tick: u32) -> bool {
        self.elapsed == tick
    }

    /// True exactly when the elapsed count equals the given number of seconds.
    pub fn at_second(&self, seconds: f32) -> bool {
        self.elapsed == seconds_to_ticks(seconds)
    }
}
