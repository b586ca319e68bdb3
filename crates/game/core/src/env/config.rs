//! Configuration oracle exposing the player's prestige settings.

use crate::config::PrestigeConfig;
use crate::skill::SkillCategories;

/// Provides read access to the prestige configuration group.
pub trait ConfigOracle {
    /// Acceleration multiplier inside the prestige range.
    fn xp_factor(&self) -> u32;

    /// Level at which the prestige range ends.
    fn goal_level(&self) -> u32;

    /// Whether levels above 99 are shown.
    fn show_virtual_levels(&self) -> bool;

    /// Whether to keep the real level unless the prestige level is closer.
    fn show_real_levels(&self) -> bool;

    /// Categories for which the transform is enabled.
    fn enabled_categories(&self) -> SkillCategories;

    /// Level cap used when restoring and totalling levels.
    ///
    /// Shutdown always restores to the real cap; otherwise the virtual
    /// toggle decides.
    fn level_cap(&self, shutdown: bool) -> u32 {
        if self.show_virtual_levels() && !shutdown {
            PrestigeConfig::MAX_DISPLAY_VIRTUAL_LEVEL
        } else {
            PrestigeConfig::MAX_REAL_LEVEL
        }
    }
}
