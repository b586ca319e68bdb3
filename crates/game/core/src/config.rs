//! Prestige configuration values and tunable constants.
use crate::env::ConfigOracle;
use crate::error::ConfigError;
use crate::skill::SkillCategories;

/// Player-facing configuration of the prestige transform.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrestigeConfig {
    /// Acceleration multiplier applied inside the prestige range.
    pub xp_factor: u32,
    /// Level at which the accelerated range ends.
    pub goal_level: u32,
    /// Whether virtual levels (above 99) count when restoring and totalling.
    pub show_virtual_levels: bool,
    /// Prefer the real level unless the prestige level is closer to levelling.
    pub show_real_levels: bool,
    /// Categories the transform applies to.
    pub enabled: SkillCategories,
}

impl PrestigeConfig {
    /// Configuration group name used by the host's config store.
    pub const GROUP: &'static str = "prestige";

    // ===== experience curve limits =====
    pub const MIN_LEVEL: u32 = 1;
    pub const MAX_REAL_LEVEL: u32 = 99;
    /// Level cap applied when virtual levels are shown.
    pub const MAX_DISPLAY_VIRTUAL_LEVEL: u32 = 120;
    pub const MAX_VIRTUAL_LEVEL: u32 = 126;
    pub const MAX_SKILL_XP: u32 = 200_000_000;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_XP_FACTOR: u32 = 2;
    pub const DEFAULT_GOAL_LEVEL: u32 = 99;

    pub fn new() -> Self {
        Self {
            xp_factor: Self::DEFAULT_XP_FACTOR,
            goal_level: Self::DEFAULT_GOAL_LEVEL,
            show_virtual_levels: false,
            show_real_levels: false,
            enabled: SkillCategories::all(),
        }
    }

    /// Applies a raw value from the host's config store.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownKey` for keys outside the group and
    /// `ConfigError::InvalidValue` when the value does not parse.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<ConfigKey, ConfigError> {
        let key: ConfigKey = key
            .parse()
            .map_err(|_| ConfigError::UnknownKey(key.to_owned()))?;
        let invalid = || ConfigError::InvalidValue {
            key,
            value: value.to_owned(),
        };
        let value = value.trim();

        match key {
            ConfigKey::XpFactor => self.xp_factor = value.parse().map_err(|_| invalid())?,
            ConfigKey::GoalLevel => self.goal_level = value.parse().map_err(|_| invalid())?,
            ConfigKey::ShowVirtualLevels => {
                self.show_virtual_levels = value.parse().map_err(|_| invalid())?
            }
            ConfigKey::ShowRealLevels => {
                self.show_real_levels = value.parse().map_err(|_| invalid())?
            }
            ConfigKey::EnableCombat
            | ConfigKey::EnableHp
            | ConfigKey::EnablePrayer
            | ConfigKey::EnableNonCombat => {
                let enabled: bool = value.parse().map_err(|_| invalid())?;
                let flag = key.category_flag().unwrap_or(SkillCategories::empty());
                self.enabled.set(flag, enabled);
            }
        }

        Ok(key)
    }
}

impl Default for PrestigeConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigOracle for PrestigeConfig {
    fn xp_factor(&self) -> u32 {
        self.xp_factor
    }

    fn goal_level(&self) -> u32 {
        self.goal_level
    }

    fn show_virtual_levels(&self) -> bool {
        self.show_virtual_levels
    }

    fn show_real_levels(&self) -> bool {
        self.show_real_levels
    }

    fn enabled_categories(&self) -> SkillCategories {
        self.enabled
    }
}

/// Keys of the prestige configuration group, by their store names.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConfigKey {
    #[strum(serialize = "xpFactor")]
    XpFactor,
    #[strum(serialize = "goalLevel")]
    GoalLevel,
    #[strum(serialize = "showVirtualLevels")]
    ShowVirtualLevels,
    #[strum(serialize = "showRealLevels")]
    ShowRealLevels,
    #[strum(serialize = "enableCombat")]
    EnableCombat,
    #[strum(serialize = "enableHP")]
    EnableHp,
    #[strum(serialize = "enablePrayer")]
    EnablePrayer,
    #[strum(serialize = "enableNonCombat")]
    EnableNonCombat,
}

impl ConfigKey {
    /// Category flag toggled by this key, for the per-category gates.
    pub const fn category_flag(self) -> Option<SkillCategories> {
        match self {
            ConfigKey::EnableCombat => Some(SkillCategories::COMBAT),
            ConfigKey::EnableHp => Some(SkillCategories::HITPOINTS),
            ConfigKey::EnablePrayer => Some(SkillCategories::PRAYER),
            ConfigKey::EnableNonCombat => Some(SkillCategories::OTHER),
            _ => None,
        }
    }
}
