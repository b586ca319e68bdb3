//! Fire-and-forget actions for the host's client thread.
//!
//! Some host operations (player graphics) may only run on the host's client
//! thread. The controller submits a [`DeferredAction`] through
//! [`crate::host::ClientThread::invoke`] and never observes the outcome;
//! hosts that run them later can buffer them in a [`DeferredQueue`].

use std::collections::VecDeque;

use prestige_core::Fireworks;
use serde::{Deserialize, Serialize};

/// Work to be performed on the host's client thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeferredAction {
    /// Play the level-up fireworks on the local player, if present.
    PlayFireworks(Fireworks),
}

/// FIFO buffer of deferred actions awaiting the client thread.
#[derive(Debug, Default, Clone)]
pub struct DeferredQueue {
    pending: VecDeque<DeferredAction>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: DeferredAction) {
        self.pending.push_back(action);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Removes and yields every pending action in submission order.
    pub fn drain(&mut self) -> impl Iterator<Item = DeferredAction> + '_ {
        self.pending.drain(..)
    }
}
