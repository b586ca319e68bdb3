//! Text and effects shown when a prestige level is gained.
//!
//! The host owns rendering; this module only decides what is said.

use crate::config::PrestigeConfig;
use crate::skill::Skill;

/// Prompt shown under the announcement until it is dismissed.
pub const CONTINUE_TEXT: &str = "Click here to continue";
/// Prompt shown after dismissal while the close is pending.
pub const CLOSING_TEXT: &str = "Please wait...";

/// Fireworks graphic played on the local player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Fireworks {
    Normal,
    NinetyNine,
}

impl Fireworks {
    /// Host graphic (spot animation) id.
    pub const fn graphic_id(self) -> i32 {
        match self {
            Fireworks::Normal => 199,
            Fireworks::NinetyNine => 1388,
        }
    }
}

/// Everything the host needs to render one level-up notification.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelUpAnnouncement {
    pub skill: Skill,
    pub level: u32,
    pub header: String,
    pub body: String,
    pub continue_text: String,
    pub chat_message: String,
    pub fireworks: Fireworks,
}

impl LevelUpAnnouncement {
    /// Composes the announcement for `skill` reaching `level`, where
    /// `true_xp` decides whether the skill is maxed.
    pub fn new(skill: Skill, level: u32, true_xp: u32) -> Self {
        let name = skill.name();
        let maxed = true_xp >= PrestigeConfig::MAX_SKILL_XP;

        let (header, body, chat_message, fireworks) = if maxed {
            (
                format!("Congratulations, you just maxed your {name} skill."),
                format!("You have reached maximum experience in {name}"),
                format!("Congratulations, you've just reached max experience in {name}!"),
                Fireworks::NinetyNine,
            )
        } else {
            let body = if skill == Skill::Hitpoints {
                format!("Your Hitpoints prestige is now {level}.")
            } else {
                format!("Your {name} prestige level is now {level}.")
            };
            (
                format!(
                    "Congratulations, you just advanced {} {name} prestige level.",
                    skill.article()
                ),
                body,
                format!(
                    "Congratulations, you've just advanced your {name} prestige level. \
                     You are now prestige level {level}."
                ),
                Fireworks::Normal,
            )
        };

        Self {
            skill,
            level,
            header,
            body,
            continue_text: CONTINUE_TEXT.to_owned(),
            chat_message,
            fireworks,
        }
    }
}
