//! Simulator configuration loaded from the environment.

use std::env;

use prestige_core::{ConfigKey, PrestigeConfig, Skill};
use prestige_runtime::RuntimeConfig;
use tracing::warn;

/// Environment variables mirrored into the prestige config group.
const PRESTIGE_ENV: [(&str, ConfigKey); 8] = [
    ("PRESTIGE_XP_FACTOR", ConfigKey::XpFactor),
    ("PRESTIGE_GOAL_LEVEL", ConfigKey::GoalLevel),
    ("PRESTIGE_SHOW_VIRTUAL_LEVELS", ConfigKey::ShowVirtualLevels),
    ("PRESTIGE_SHOW_REAL_LEVELS", ConfigKey::ShowRealLevels),
    ("PRESTIGE_ENABLE_COMBAT", ConfigKey::EnableCombat),
    ("PRESTIGE_ENABLE_HP", ConfigKey::EnableHp),
    ("PRESTIGE_ENABLE_PRAYER", ConfigKey::EnablePrayer),
    ("PRESTIGE_ENABLE_NON_COMBAT", ConfigKey::EnableNonCombat),
];

#[derive(Clone, Debug)]
pub struct SimConfig {
    pub prestige: PrestigeConfig,
    pub runtime: RuntimeConfig,
    /// Number of game ticks to simulate.
    pub ticks: u32,
    pub skill: Skill,
    pub start_xp: u32,
    pub xp_per_tick: u32,
    /// Print domain events as JSON lines on stdout.
    pub json_events: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            prestige: PrestigeConfig::default(),
            runtime: RuntimeConfig::default(),
            ticks: 50,
            skill: Skill::Attack,
            start_xp: 7_000_000,
            xp_per_tick: 50_000,
            json_events: true,
        }
    }
}

impl SimConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        for (var, key) in PRESTIGE_ENV {
            let Ok(value) = env::var(var) else {
                continue;
            };
            let name: &'static str = key.into();
            if let Err(err) = config.prestige.apply(name, &value) {
                warn!(target: "prestige::sim", var, %err, "ignoring invalid value");
            }
        }

        // Channel configuration
        if let Some(capacity) = read_env::<usize>("SIM_COMMAND_BUFFER") {
            config.runtime.command_buffer_size = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("SIM_EVENT_BUFFER") {
            config.runtime.event_buffer_size = capacity.max(1);
        }

        if let Some(ticks) = read_env::<u32>("SIM_TICKS") {
            config.ticks = ticks;
        }
        if let Some(skill) = read_env::<Skill>("SIM_SKILL") {
            config.skill = skill;
        }
        if let Some(xp) = read_env::<u32>("SIM_START_XP") {
            config.start_xp = xp.min(PrestigeConfig::MAX_SKILL_XP);
        }
        if let Some(xp) = read_env::<u32>("SIM_XP_PER_TICK") {
            config.xp_per_tick = xp;
        }
        if let Some(enable) = read_env::<bool>("SIM_JSON_EVENTS") {
            config.json_events = enable;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
