//! One-at-a-time gate for level-up announcements.
//!
//! ```text
//! Idle ──open──▶ Displaying ──dismiss──▶ ClosePending ──tick (foreground)──▶ Idle
//! ```
//!
//! Sessions are identified by a monotonically increasing [`SessionId`], so a
//! dismissal or close can only ever apply to the session it was issued for.

use std::fmt;

use prestige_core::LevelUpAnnouncement;
use serde::{Deserialize, Serialize};

/// Identity of one opened announcement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session#{}", self.0)
    }
}

/// An announcement handed to the host for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySession {
    pub id: SessionId,
    pub announcement: LevelUpAnnouncement,
}

/// Observable state of the gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateState {
    Idle,
    Displaying,
    ClosePending,
}

#[derive(Debug, Clone, Default)]
enum Slot {
    #[default]
    Idle,
    Displaying(DisplaySession),
    ClosePending(DisplaySession),
}

/// Tracks the single announcement the add-on may have open.
#[derive(Debug, Clone, Default)]
pub struct DisplayGate {
    slot: Slot,
    last_id: u64,
}

impl DisplayGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GateState {
        match self.slot {
            Slot::Idle => GateState::Idle,
            Slot::Displaying(_) => GateState::Displaying,
            Slot::ClosePending(_) => GateState::ClosePending,
        }
    }

    /// The session currently tracked, open or awaiting close.
    pub fn session(&self) -> Option<&DisplaySession> {
        match &self.slot {
            Slot::Idle => None,
            Slot::Displaying(session) | Slot::ClosePending(session) => Some(session),
        }
    }

    /// Starts a new session, replacing any previous one.
    ///
    /// Callers only open when the host container is hidden, so a replaced
    /// session is no longer on screen. Returns a copy for the host.
    pub fn open(&mut self, announcement: LevelUpAnnouncement) -> DisplaySession {
        self.last_id += 1;
        let session = DisplaySession {
            id: SessionId(self.last_id),
            announcement,
        };
        self.slot = Slot::Displaying(session.clone());
        session
    }

    /// Marks `id` for closing. Returns false if `id` is not the displayed session.
    pub fn request_close(&mut self, id: SessionId) -> bool {
        match std::mem::take(&mut self.slot) {
            Slot::Displaying(session) if session.id == id => {
                self.slot = Slot::ClosePending(session);
                true
            }
            other => {
                self.slot = other;
                false
            }
        }
    }

    /// Completes a pending close if the session is still the host's
    /// foreground panel, returning it.
    pub fn take_closable(&mut self, foreground: Option<SessionId>) -> Option<DisplaySession> {
        match std::mem::take(&mut self.slot) {
            Slot::ClosePending(session) if Some(session.id) == foreground => Some(session),
            other => {
                self.slot = other;
                None
            }
        }
    }

    /// Forgets the tracked session.
    pub fn reset(&mut self) -> Option<DisplaySession> {
        match std::mem::take(&mut self.slot) {
            Slot::Idle => None,
            Slot::Displaying(session) | Slot::ClosePending(session) => Some(session),
        }
    }
}
