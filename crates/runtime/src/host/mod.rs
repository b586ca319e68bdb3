//! Host contract consumed by the controller.
//!
//! The add-on never owns game data: it reads and overwrites the host's
//! per-skill arrays, drives the host's chatbox panel, and submits work to
//! the host's client thread. Each concern is a separate trait so tests and
//! adapters can implement only what they exercise; [`Host`] bundles them
//! together with the configuration oracle.

mod memory;

pub use memory::{InMemoryHost, PlayerGraphic};

use prestige_core::{ConfigOracle, SkillLevels, Skill};

use crate::controller::{DisplaySession, SessionId};
use crate::deferred::DeferredAction;

/// Per-skill read/write access to the host's stat arrays.
pub trait SkillHost {
    /// Current XP as the host reports it.
    fn skill_experience(&self, skill: Skill) -> u32;

    /// Current real (unboosted) level.
    fn real_skill_level(&self, skill: Skill) -> u32;

    /// Current boosted level.
    fn boosted_skill_level(&self, skill: Skill) -> i32;

    /// Overwrites the level, XP, and boosted level shown for `skill`.
    fn write_skill(&mut self, skill: Skill, levels: SkillLevels);

    /// Marks `skill` for a UI refresh.
    fn queue_changed_skill(&mut self, skill: Skill);
}

/// Modal chatbox panel used for level-up announcements.
pub trait ChatboxHost {
    /// True when no panel occupies the chatbox container.
    fn is_container_hidden(&self) -> bool;

    /// Session id of the add-on panel in the foreground, if any.
    fn current_input(&self) -> Option<SessionId>;

    /// Opens `session` as the foreground panel.
    fn open_input(&mut self, session: &DisplaySession);

    /// Replaces the continue prompt of the open panel.
    ///
    /// Returns false when the prompt element is absent.
    fn set_continue_text(&mut self, text: &str) -> bool;

    /// Closes the foreground panel.
    fn close_input(&mut self);
}

/// Chat message delivery.
pub trait ChatHost {
    fn queue_message(&mut self, message: &str);
}

/// Text widgets the add-on rewrites.
pub trait WidgetHost {
    /// Sets the skill tab's total level text.
    ///
    /// Returns false when the widget (or its text element) is absent.
    fn set_total_level_text(&mut self, text: &str) -> bool;
}

/// Submission point for work that must run on the host's client thread.
pub trait ClientThread {
    /// Submits `action`; completion is never reported back.
    fn invoke(&mut self, action: DeferredAction);
}

/// Everything the controller needs from the host.
pub trait Host: SkillHost + ChatboxHost + ChatHost + WidgetHost + ClientThread + ConfigOracle {}

impl<T> Host for T where
    T: SkillHost + ChatboxHost + ChatHost + WidgetHost + ClientThread + ConfigOracle
{
}
