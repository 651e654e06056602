//! Debounce scheduling for overlay refresh.
//!
//! Bursts of editor events collapse into at most one pending action. The two actions have
//! deliberately asymmetric delays: a full resync re-parses the whole document and is throttled
//! hard, while a reveal update is a pure filter over cached data and stays near-instant so
//! cursor movement feels responsive.
//!
//! The host owns the real timer. After every event it reads [`Pending::deadline`], sleeps
//! until then, and calls back; [`Pending::take_due`] decides whether that callback is current
//! or a leftover from a replaced deadline. Time is passed in as [`Instant`] values, so tests
//! drive a fake clock and never sleep.

use std::time::{Duration, Instant};

/// Delay before an expensive full resync after typing.
pub const RESYNC_DELAY: Duration = Duration::from_millis(200);

/// Delay before a cheap reveal update after a plain cursor move.
pub const REVEAL_DELAY: Duration = Duration::from_millis(50);

/// The at-most-one outstanding scheduled action.
///
/// Arming while something is pending replaces it (last write wins); a replaced action's
/// effects never occur. This is a replacement slot, not a queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pending {
    /// Nothing scheduled.
    #[default]
    Idle,
    /// A reveal update is due.
    Reveal {
        /// The instant the update becomes due.
        due: Instant,
    },
    /// A full resync is due.
    Resync {
        /// The instant the resync becomes due.
        due: Instant,
    },
}

/// What a fired timer should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueAction {
    /// Re-project the cached store onto the display.
    Reveal,
    /// Re-parse the document and rebuild the store.
    Resync,
}

impl Pending {
    /// Arm a new action based on whether typing occurred, replacing whatever was pending.
    pub fn arm(&mut self, was_editing: bool, now: Instant) {
        *self = if was_editing {
            Pending::Resync {
                due: now + RESYNC_DELAY,
            }
        } else {
            Pending::Reveal {
                due: now + REVEAL_DELAY,
            }
        };
    }

    /// Cancel without firing.
    pub fn cancel(&mut self) {
        *self = Pending::Idle;
    }

    /// The instant the host timer should next fire at, if anything is pending.
    pub fn deadline(&self) -> Option<Instant> {
        match *self {
            Pending::Idle => None,
            Pending::Reveal { due } | Pending::Resync { due } => Some(due),
        }
    }

    /// Take the pending action if its deadline has passed.
    ///
    /// A stale callback (`now` before the deadline, because the action was re-armed after the
    /// host armed its timer) takes nothing and leaves the newer action in place.
    pub fn take_due(&mut self, now: Instant) -> Option<DueAction> {
        match *self {
            Pending::Reveal { due } if now >= due => {
                *self = Pending::Idle;
                Some(DueAction::Reveal)
            }
            Pending::Resync { due } if now >= due => {
                *self = Pending::Idle;
                Some(DueAction::Resync)
            }
            _ => None,
        }
    }
}
