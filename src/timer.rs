//! One-shot timers the host runs on our behalf.
//!
//! The view only hands out ids and remembers what each id should do when
//! it elapses. The host owns the real clock and reports back through
//! `TimerQueue::fire`.

use serde::{Deserialize, Serialize};

use crate::alert::AlertId;
use crate::error::ViewError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimerId(pub u32);

impl core::fmt::Display for TimerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    SelectAlert(AlertId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerState {
    Pending(TimerAction),
    Cancelled,
    Fired,
}

#[derive(Debug)]
struct Timer {
    delay_ms: u32,
    state: TimerState,
}

/// Ids are dense indices into `timers`; entries are never removed so a
/// late delivery of a cancelled id can still be recognised.
#[derive(Debug, Default)]
pub struct TimerQueue {
    timers: Vec<Timer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, delay_ms: u32, action: TimerAction) -> TimerId {
        let id = TimerId(self.timers.len() as u32);
        self.timers.push(Timer {
            delay_ms,
            state: TimerState::Pending(action),
        });
        id
    }

    /// Returns true when the timer was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.timers.get_mut(id.0 as usize) {
            Some(timer) if matches!(timer.state, TimerState::Pending(_)) => {
                timer.state = TimerState::Cancelled;
                true
            }
            _ => false,
        }
    }

    /// Consume an elapsed timer. Cancelled or already fired timers yield `None`.
    pub fn fire(&mut self, id: TimerId) -> Result<Option<TimerAction>, ViewError> {
        let timer = self
            .timers
            .get_mut(id.0 as usize)
            .ok_or(ViewError::UnknownTimer(id))?;
        match timer.state {
            TimerState::Pending(action) => {
                timer.state = TimerState::Fired;
                Ok(Some(action))
            }
            TimerState::Cancelled | TimerState::Fired => Ok(None),
        }
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers
            .get(id.0 as usize)
            .is_some_and(|timer| matches!(timer.state, TimerState::Pending(_)))
    }

    pub fn delay_ms(&self, id: TimerId) -> Option<u32> {
        self.timers.get(id.0 as usize).map(|timer| timer.delay_ms)
    }

    pub fn pending_count(&self) -> usize {
        self.timers
            .iter()
            .filter(|timer| matches!(timer.state, TimerState::Pending(_)))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_exactly_once() {
        let mut timers = TimerQueue::new();
        let id = timers.schedule(500, TimerAction::SelectAlert(AlertId(0)));
        assert_eq!(timers.delay_ms(id), Some(500));
        assert_eq!(timers.fire(id).unwrap(), Some(TimerAction::SelectAlert(AlertId(0))));
        assert_eq!(timers.fire(id).unwrap(), None);
        assert!(!timers.is_pending(id));
    }

    #[test]
    fn cancelled_timer_does_nothing_when_delivered() {
        let mut timers = TimerQueue::new();
        let id = timers.schedule(500, TimerAction::SelectAlert(AlertId(3)));
        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));
        assert_eq!(timers.fire(id).unwrap(), None);
        assert_eq!(timers.pending_count(), 0);
    }

    #[test]
    fn unknown_timer_is_an_error() {
        let mut timers = TimerQueue::new();
        assert!(matches!(timers.fire(TimerId(7)), Err(ViewError::UnknownTimer(TimerId(7)))));
        assert!(!timers.cancel(TimerId(7)));
    }
}
