//! Experience curve oracle.
//!
//! The curve is owned by the host; the core only requires the pair of
//! functions to be mutually consistent (`level_for_xp(xp_for_level(l)) == l`)
//! and monotonic in XP.

use crate::config::PrestigeConfig;

/// Host-provided mapping between XP and levels.
pub trait ExperienceOracle {
    /// Minimum XP required for `level`.
    fn xp_for_level(&self, level: u32) -> u32;

    /// Highest level whose XP requirement is at most `xp`.
    fn level_for_xp(&self, xp: u32) -> u32;
}

const TABLE_LEN: usize = PrestigeConfig::MAX_VIRTUAL_LEVEL as usize;

/// The standard skill curve, levels 1 through 126.
///
/// Each level adds `floor(level + 300 * 2^(level / 7))` points and the XP
/// requirement is a quarter of the running total.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExperienceTable {
    xp_for_level: [u32; TABLE_LEN],
}

impl ExperienceTable {
    pub fn new() -> Self {
        let mut xp_for_level = [0u32; TABLE_LEN];
        let mut points: u64 = 0;

        for level in 1..=TABLE_LEN {
            xp_for_level[level - 1] = (points / 4) as u32;
            let difference = (level as f64 + 300.0 * 2f64.powf(level as f64 / 7.0)) as u64;
            points += difference;
        }

        Self { xp_for_level }
    }

    /// Clamps a level into the table's range.
    #[inline]
    fn clamp_level(level: u32) -> u32 {
        level.clamp(PrestigeConfig::MIN_LEVEL, PrestigeConfig::MAX_VIRTUAL_LEVEL)
    }
}

impl Default for ExperienceTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ExperienceOracle for ExperienceTable {
    fn xp_for_level(&self, level: u32) -> u32 {
        self.xp_for_level[Self::clamp_level(level) as usize - 1]
    }

    fn level_for_xp(&self, xp: u32) -> u32 {
        let xp = xp.min(PrestigeConfig::MAX_SKILL_XP);
        // Number of levels whose requirement is <= xp; level 1 always qualifies.
        self.xp_for_level.partition_point(|&required| required <= xp) as u32
    }
}
