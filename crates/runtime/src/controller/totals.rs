//! Skill tab total level, recomputed from whatever XP the host shows.

use prestige_core::{ExperienceOracle, Skill};

use crate::host::SkillHost;

/// Script callback that asks for the total level text.
pub const TOTAL_LEVEL_CALLBACK: &str = "skillTabTotalLevel";

const TOTAL_LEVEL_TEXT_PREFIX: &str = "Total level:<br>";

/// Sum of `min(level_for_xp(xp), level_cap)` over every skill.
pub fn total_level(
    host: &(impl SkillHost + ?Sized),
    experience: &impl ExperienceOracle,
    level_cap: u32,
) -> u32 {
    Skill::all()
        .map(|skill| {
            experience
                .level_for_xp(host.skill_experience(skill))
                .min(level_cap)
        })
        .sum()
}

pub fn total_level_text(total: u32) -> String {
    format!("{TOTAL_LEVEL_TEXT_PREFIX}{total}")
}
