//! Skill identity and the category gates applied to it.
use bitflags::bitflags;
use strum::EnumCount;

/// Trainable skills in host ordinal order.
///
/// The host's synthetic "Overall" aggregate is deliberately absent; every
/// member here has its own XP and level.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum Skill {
    Attack,
    Defence,
    Strength,
    Hitpoints,
    Ranged,
    Prayer,
    Magic,
    Cooking,
    Woodcutting,
    Fletching,
    Fishing,
    Firemaking,
    Crafting,
    Smithing,
    Mining,
    Herblore,
    Agility,
    Thieving,
    Slayer,
    Farming,
    Runecraft,
    Hunter,
    Construction,
}

/// Number of skills tracked per player.
pub const SKILL_COUNT: usize = <Skill as EnumCount>::COUNT;

impl Skill {
    /// Iterates every skill in ordinal order.
    pub fn all() -> impl Iterator<Item = Skill> {
        <Skill as strum::IntoEnumIterator>::iter()
    }

    /// Dense index used by fixed-size per-skill tables.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Display name as the host shows it.
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Indefinite article used in level-up text ("an Attack", "a Mining").
    pub const fn article(self) -> &'static str {
        match self {
            Skill::Attack | Skill::Agility => "an",
            _ => "a",
        }
    }

    /// Configuration category gating this skill.
    pub const fn category(self) -> SkillCategory {
        match self {
            Skill::Attack | Skill::Defence | Skill::Strength | Skill::Magic | Skill::Ranged => {
                SkillCategory::Combat
            }
            Skill::Hitpoints => SkillCategory::Hitpoints,
            Skill::Prayer => SkillCategory::Prayer,
            _ => SkillCategory::Other,
        }
    }
}

/// Skill group with its own enable toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SkillCategory {
    Combat,
    Hitpoints,
    Prayer,
    Other,
}

impl SkillCategory {
    /// Flag representing this category in a [`SkillCategories`] set.
    pub const fn flag(self) -> SkillCategories {
        match self {
            SkillCategory::Combat => SkillCategories::COMBAT,
            SkillCategory::Hitpoints => SkillCategories::HITPOINTS,
            SkillCategory::Prayer => SkillCategories::PRAYER,
            SkillCategory::Other => SkillCategories::OTHER,
        }
    }
}

bitflags! {
    /// Set of categories for which the prestige transform is enabled.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct SkillCategories: u8 {
        const COMBAT    = 1 << 0;
        const HITPOINTS = 1 << 1;
        const PRAYER    = 1 << 2;
        const OTHER     = 1 << 3;
    }
}

impl SkillCategories {
    /// Returns true if the transform applies to `skill`.
    #[inline]
    pub fn allows(self, skill: Skill) -> bool {
        self.contains(skill.category().flag())
    }
}

impl Default for SkillCategories {
    fn default() -> Self {
        Self::all()
    }
}
