//! Event types crossing the host boundary.

use prestige_core::Skill;
use serde::{Deserialize, Serialize};

use crate::controller::SessionId;

/// Callbacks the host delivers, serially, to the add-on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostEvent {
    /// Add-on enabled; seed from the host's current values.
    Startup,

    /// Add-on disabled; restore true values.
    Shutdown,

    /// One game tick elapsed.
    Tick,

    /// The host reported new stats for a skill.
    StatChanged {
        skill: Skill,
        level: u32,
        boosted_level: i32,
    },

    /// A configuration value changed in `group`.
    ConfigChanged { group: String, key: String },

    /// A named script callback fired (e.g. the skill tab total level).
    ScriptCallback { name: String },

    /// The player dismissed a level-up announcement (click or space).
    Dismiss { session: SessionId },
}

/// Events emitted by the controller for observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrestigeEvent {
    /// The prestige range was derived from configuration.
    RangeRecomputed {
        goal_level: u32,
        xp_factor: u32,
        threshold_xp: u32,
        max_xp: u32,
    },

    /// True values were written back to the host.
    SkillsRestored { level_cap: u32, skills: usize },

    /// A skill crossed a prestige level boundary and awaits announcement.
    LevelUpQueued { skill: Skill, level: u32 },

    /// An announcement was opened on the host.
    AnnouncementOpened {
        session: SessionId,
        skill: Skill,
        level: u32,
    },

    /// The player asked to dismiss the open announcement.
    AnnouncementDismissed { session: SessionId },

    /// The host closed the announcement.
    AnnouncementClosed { session: SessionId },

    /// The total level text was rewritten.
    TotalLevelUpdated { total: u32 },
}
