//! Deterministic skill-progression rules for the prestige add-on.
//!
//! `prestige-core` defines the canonical arithmetic (XP curve, prestige range
//! transform) and the bookkeeping (skill ledger, level-up queue) that the
//! runtime drives from host events. Everything here is pure: the host's
//! XP curve and configuration arrive through the oracles in [`env`], and
//! nothing in this crate performs I/O or logs.
pub mod announcement;
pub mod config;
pub mod env;
pub mod error;
pub mod ledger;
pub mod queue;
pub mod skill;
pub mod transform;

pub use announcement::{Fireworks, LevelUpAnnouncement};
pub use config::{ConfigKey, PrestigeConfig};
pub use env::{ConfigOracle, ExperienceOracle, ExperienceTable};
pub use error::{ConfigError, ErrorSeverity, LedgerError, PrestigeError};
pub use ledger::{RestoredSkill, SkillLedger, SkillLevels, SkillRecord};
pub use queue::LevelUpQueue;
pub use skill::{SKILL_COUNT, Skill, SkillCategories, SkillCategory};
pub use transform::PrestigeRange;
