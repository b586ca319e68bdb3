//! Prestige range transform.
//!
//! Real XP between `threshold_xp` and `max_xp` (both exclusive) is mapped to
//! an accelerated display value starting again from zero:
//!
//! ```text
//! threshold_xp = max_xp - max_xp / xp_factor
//! display_xp   = (true_xp - threshold_xp) * xp_factor
//! ```
//!
//! The range is derived in one step from the configuration and never
//! partially updated.

use crate::config::PrestigeConfig;
use crate::env::{ConfigOracle, ExperienceOracle};

/// Accelerated XP range derived from configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrestigeRange {
    goal_level: u32,
    xp_factor: u32,
    max_xp: u32,
    threshold_xp: u32,
}

impl PrestigeRange {
    /// Derives the range for `goal_level` and `xp_factor`.
    ///
    /// `xp_factor` is clamped to at least 1 and `goal_level` to the curve's
    /// level range, so every derived range satisfies `threshold_xp <= max_xp`.
    pub fn new(goal_level: u32, xp_factor: u32, experience: &impl ExperienceOracle) -> Self {
        let xp_factor = xp_factor.max(1);
        let goal_level =
            goal_level.clamp(PrestigeConfig::MIN_LEVEL, PrestigeConfig::MAX_VIRTUAL_LEVEL);
        let max_xp = experience.xp_for_level(goal_level);
        let threshold_xp = max_xp - max_xp / xp_factor;

        Self {
            goal_level,
            xp_factor,
            max_xp,
            threshold_xp,
        }
    }

    /// Derives the range from the current configuration.
    pub fn from_config(
        config: &(impl ConfigOracle + ?Sized),
        experience: &impl ExperienceOracle,
    ) -> Self {
        Self::new(config.goal_level(), config.xp_factor(), experience)
    }

    pub const fn goal_level(&self) -> u32 {
        self.goal_level
    }

    pub const fn xp_factor(&self) -> u32 {
        self.xp_factor
    }

    pub const fn max_xp(&self) -> u32 {
        self.max_xp
    }

    pub const fn threshold_xp(&self) -> u32 {
        self.threshold_xp
    }

    /// Returns true iff `threshold_xp < true_xp < max_xp`.
    #[inline]
    pub const fn contains(&self, true_xp: u32) -> bool {
        true_xp > self.threshold_xp && true_xp < self.max_xp
    }

    /// Display XP for `true_xp`, or `None` outside the range.
    #[inline]
    pub const fn display_xp(&self, true_xp: u32) -> Option<u32> {
        if self.contains(true_xp) {
            // (true - threshold) < max / factor, so the product stays below max_xp.
            Some((true_xp - self.threshold_xp) * self.xp_factor)
        } else {
            None
        }
    }

    /// Level shown for `true_xp`: the prestige level inside the range, the
    /// real level outside it.
    pub fn display_level(&self, true_xp: u32, experience: &impl ExperienceOracle) -> u32 {
        let xp = self.display_xp(true_xp).unwrap_or(true_xp);
        experience.level_for_xp(xp)
    }

    /// Returns true when the prestige level is closer to its next level-up
    /// than the real level is, measured in real XP.
    ///
    /// Remaining display XP is divided by the factor with truncation before
    /// comparing. Outside the range this is always false.
    pub fn is_display_level_closer(
        &self,
        true_xp: u32,
        experience: &impl ExperienceOracle,
    ) -> bool {
        let Some(display_xp) = self.display_xp(true_xp) else {
            return false;
        };

        let remaining_true = remaining_to_next(true_xp, experience);
        let remaining_display = remaining_to_next(display_xp, experience);

        remaining_display / i64::from(self.xp_factor) < remaining_true
    }
}

fn remaining_to_next(xp: u32, experience: &impl ExperienceOracle) -> i64 {
    let next = experience.level_for_xp(xp) + 1;
    i64::from(experience.xp_for_level(next)) - i64::from(xp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ExperienceTable;

    fn default_range(table: &ExperienceTable) -> PrestigeRange {
        PrestigeRange::new(99, 2, table)
    }

    #[test]
    fn default_range_halves_level_99() {
        let table = ExperienceTable::new();
        let range = default_range(&table);

        assert_eq!(range.max_xp(), 13_034_431);
        assert_eq!(range.threshold_xp(), 13_034_431 - 13_034_431 / 2);
        assert_eq!(range.threshold_xp(), 6_517_216);
    }

    #[test]
    fn bounds_are_exclusive() {
        let table = ExperienceTable::new();
        let range = default_range(&table);

        assert!(!range.contains(range.threshold_xp()));
        assert!(range.contains(range.threshold_xp() + 1));
        assert!(range.contains(range.max_xp() - 1));
        assert!(!range.contains(range.max_xp()));
        assert_eq!(range.display_xp(range.threshold_xp()), None);
        assert_eq!(range.display_xp(range.max_xp()), None);
    }

    #[test]
    fn first_xp_above_threshold_displays_level_one() {
        let table = ExperienceTable::new();
        let range = default_range(&table);
        let xp = range.threshold_xp() + 1;

        assert_eq!(range.display_xp(xp), Some(2));
        assert_eq!(range.display_level(xp, &table), 1);
    }

    #[test]
    fn display_xp_strictly_increases_across_range() {
        let table = ExperienceTable::new();
        let range = PrestigeRange::new(99, 3, &table);

        let mut previous = None;
        for xp in (range.threshold_xp() + 1..range.max_xp()).step_by(9_973) {
            let display = range.display_xp(xp).unwrap();
            if let Some(previous) = previous {
                assert!(display > previous);
            }
            assert!(display < range.max_xp());
            previous = Some(display);
        }
    }

    #[test]
    fn factor_three_threshold_is_excluded() {
        let table = ExperienceTable::new();
        let range = PrestigeRange::new(99, 3, &table);

        assert_eq!(range.threshold_xp(), 8_689_621);
        assert_eq!(range.display_xp(8_689_621), None);
        assert_eq!(range.display_level(8_689_621, &table), 94);
    }

    #[test]
    fn degenerate_configuration_is_clamped() {
        let table = ExperienceTable::new();

        let zero_factor = PrestigeRange::new(99, 0, &table);
        assert_eq!(zero_factor.xp_factor(), 1);
        assert_eq!(zero_factor.threshold_xp(), 0);

        let level_zero = PrestigeRange::new(0, 2, &table);
        assert_eq!(level_zero.goal_level(), 1);
        assert_eq!(level_zero.max_xp(), 0);
        assert!(!level_zero.contains(0));
    }

    #[test]
    fn closer_uses_truncating_division() {
        let table = ExperienceTable::new();
        let range = default_range(&table);

        // Exactly level 92: the real level-up is 678_376 XP away, display
        // level 1 needs 9 display XP (4 real XP after truncation).
        let xp = table.xp_for_level(92);
        assert_eq!(range.display_xp(xp), Some(74));
        assert!(range.is_display_level_closer(xp, &table));

        // First XP in range: 36 real XP to level 92, 81 display XP (40 real).
        let xp = range.threshold_xp() + 1;
        assert!(!range.is_display_level_closer(xp, &table));

        // One XP short of level 98: real level-up is 1 XP away.
        let xp = table.xp_for_level(98) - 1;
        assert!(!range.is_display_level_closer(xp, &table));

        assert!(!range.is_display_level_closer(range.threshold_xp(), &table));
    }
}
