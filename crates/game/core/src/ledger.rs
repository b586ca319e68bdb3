//! Per-skill memory of true XP, boosts, and the last level shown.
//!
//! The ledger is the single source of truth for what the host would report
//! without the prestige transform. It is seeded for every skill at startup,
//! updated on every stat change, and replayed back to the host on restore.

use arrayvec::ArrayVec;

use crate::env::ExperienceOracle;
use crate::error::LedgerError;
use crate::skill::{SKILL_COUNT, Skill};

/// Level/XP/boost triple as written to the host for one skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillLevels {
    pub level: u32,
    pub xp: u32,
    pub boosted_level: i32,
}

/// Ledger entry for one skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillRecord {
    /// Last real XP reported by the host.
    pub true_xp: u32,
    /// Last temporarily boosted level reported by the host.
    pub boosted_level: i32,
    /// Most recent prestige level shown; `None` until a transform applies.
    pub last_displayed_level: Option<u32>,
}

impl SkillRecord {
    pub const fn new(true_xp: u32, boosted_level: i32) -> Self {
        Self {
            true_xp,
            boosted_level,
            last_displayed_level: None,
        }
    }
}

/// True values to write back to the host for one skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RestoredSkill {
    pub skill: Skill,
    pub levels: SkillLevels,
}

/// Fixed arena of skill records indexed by [`Skill::index`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SkillLedger {
    records: [Option<SkillRecord>; SKILL_COUNT],
}

impl SkillLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initializes the record for `skill`, discarding any previous entry.
    pub fn seed(&mut self, skill: Skill, true_xp: u32, boosted_level: i32) {
        self.records[skill.index()] = Some(SkillRecord::new(true_xp, boosted_level));
    }

    /// Records the latest host values and returns the previous record.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NotSeeded` if `skill` was never seeded.
    pub fn observe(
        &mut self,
        skill: Skill,
        true_xp: u32,
        boosted_level: i32,
    ) -> Result<SkillRecord, LedgerError> {
        let record = self.record_mut(skill)?;
        let previous = *record;
        record.true_xp = true_xp;
        record.boosted_level = boosted_level;
        Ok(previous)
    }

    /// Returns the record for `skill`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NotSeeded` if `skill` was never seeded.
    pub fn record(&self, skill: Skill) -> Result<&SkillRecord, LedgerError> {
        self.records[skill.index()]
            .as_ref()
            .ok_or(LedgerError::NotSeeded(skill))
    }

    /// Stores the level most recently shown for `skill` and returns the
    /// previous one.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NotSeeded` if `skill` was never seeded.
    pub fn record_displayed_level(
        &mut self,
        skill: Skill,
        level: u32,
    ) -> Result<Option<u32>, LedgerError> {
        let record = self.record_mut(skill)?;
        Ok(record.last_displayed_level.replace(level))
    }

    /// Computes the true host values for every seeded skill, capping the
    /// real level at `level_cap`.
    pub fn restore_all(
        &self,
        level_cap: u32,
        experience: &impl ExperienceOracle,
    ) -> ArrayVec<RestoredSkill, SKILL_COUNT> {
        Skill::all()
            .filter_map(|skill| {
                let record = self.records[skill.index()]?;
                Some(RestoredSkill {
                    skill,
                    levels: SkillLevels {
                        level: experience.level_for_xp(record.true_xp).min(level_cap),
                        xp: record.true_xp,
                        boosted_level: record.boosted_level,
                    },
                })
            })
            .collect()
    }

    /// Iterates seeded records in skill order.
    pub fn iter(&self) -> impl Iterator<Item = (Skill, &SkillRecord)> {
        Skill::all().filter_map(|skill| {
            self.records[skill.index()]
                .as_ref()
                .map(|record| (skill, record))
        })
    }

    /// Discards every record.
    pub fn clear(&mut self) {
        self.records = [None; SKILL_COUNT];
    }

    fn record_mut(&mut self, skill: Skill) -> Result<&mut SkillRecord, LedgerError> {
        self.records[skill.index()]
            .as_mut()
            .ok_or(LedgerError::NotSeeded(skill))
    }
}
