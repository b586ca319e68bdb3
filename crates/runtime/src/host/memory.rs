//! In-memory host used by tests and the simulator.
//!
//! Models the two layers a real client has: the server's authoritative
//! stats, and the client-side arrays the add-on overwrites. A server update
//! ([`InMemoryHost::gain_experience`]) resets the client arrays to true
//! values, exactly like a stat packet would, and yields the matching
//! [`HostEvent::StatChanged`].

use prestige_core::{
    ConfigError, ConfigOracle, ExperienceOracle, ExperienceTable, PrestigeConfig, SKILL_COUNT,
    Skill, SkillCategories, SkillLevels,
};

use super::{ChatHost, ChatboxHost, ClientThread, SkillHost, WidgetHost};
use crate::controller::{DisplaySession, SessionId};
use crate::deferred::{DeferredAction, DeferredQueue};
use crate::events::HostEvent;

/// Spot animation state of the local player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerGraphic {
    pub graphic: i32,
    pub spot_anim_frame: i32,
}

#[derive(Clone, Copy, Debug, Default)]
struct ServerStat {
    xp: u32,
    boost: i32,
}

/// Host implementation backed by plain arrays.
#[derive(Debug)]
pub struct InMemoryHost {
    experience: ExperienceTable,
    config: PrestigeConfig,

    server: [ServerStat; SKILL_COUNT],
    client: [SkillLevels; SKILL_COUNT],
    changed: Vec<Skill>,

    session: Option<DisplaySession>,
    continue_text: Option<String>,
    other_panel_open: bool,
    chat_messages: Vec<String>,

    total_level_widget: Option<String>,

    deferred: DeferredQueue,
    local_player: Option<PlayerGraphic>,
}

impl InMemoryHost {
    /// Creates a host with every skill at level 1 and default configuration.
    pub fn new() -> Self {
        Self::with_config(PrestigeConfig::default())
    }

    pub fn with_config(config: PrestigeConfig) -> Self {
        let mut host = Self {
            experience: ExperienceTable::new(),
            config,
            server: [ServerStat::default(); SKILL_COUNT],
            client: [SkillLevels {
                level: 1,
                xp: 0,
                boosted_level: 1,
            }; SKILL_COUNT],
            changed: Vec::new(),
            session: None,
            continue_text: None,
            other_panel_open: false,
            chat_messages: Vec::new(),
            total_level_widget: Some(String::new()),
            deferred: DeferredQueue::new(),
            local_player: Some(PlayerGraphic::default()),
        };
        for skill in Skill::all() {
            host.sync_from_server(skill);
        }
        host
    }

    /// Sets the server XP of `skill` (builder style, no event).
    pub fn with_skill_xp(mut self, skill: Skill, xp: u32) -> Self {
        self.server[skill.index()].xp = xp;
        self.sync_from_server(skill);
        self
    }

    /// Adds server XP and returns the stat change the host would deliver.
    pub fn gain_experience(&mut self, skill: Skill, amount: u32) -> HostEvent {
        let stat = &mut self.server[skill.index()];
        stat.xp = stat
            .xp
            .saturating_add(amount)
            .min(PrestigeConfig::MAX_SKILL_XP);
        self.stat_update(skill)
    }

    /// Sets a temporary boost (positive or negative) relative to the real level.
    pub fn set_boost(&mut self, skill: Skill, boost: i32) -> HostEvent {
        self.server[skill.index()].boost = boost;
        self.stat_update(skill)
    }

    /// Applies a raw configuration value and returns the change event.
    ///
    /// # Errors
    ///
    /// Propagates `ConfigError` from [`PrestigeConfig::apply`].
    pub fn set_config(&mut self, key: &str, value: &str) -> Result<HostEvent, ConfigError> {
        let key = self.config.apply(key, value)?;
        Ok(HostEvent::ConfigChanged {
            group: PrestigeConfig::GROUP.to_owned(),
            key: key.to_string(),
        })
    }

    /// Values currently shown by the client for `skill`.
    pub fn skill_levels(&self, skill: Skill) -> SkillLevels {
        self.client[skill.index()]
    }

    /// Skills marked changed since the last call.
    pub fn take_changed_skills(&mut self) -> Vec<Skill> {
        std::mem::take(&mut self.changed)
    }

    pub fn session(&self) -> Option<&DisplaySession> {
        self.session.as_ref()
    }

    pub fn continue_text(&self) -> Option<&str> {
        self.continue_text.as_deref()
    }

    pub fn chat_messages(&self) -> &[String] {
        &self.chat_messages
    }

    /// Opens or closes an unrelated chatbox panel (dialogue, bank pin, ...).
    pub fn set_other_panel_open(&mut self, open: bool) {
        self.other_panel_open = open;
    }

    /// Text of the total level widget, `None` when the widget is absent.
    pub fn total_level_text(&self) -> Option<&str> {
        self.total_level_widget.as_deref()
    }

    /// Removes the total level widget, as when the skill tab is not loaded.
    pub fn remove_total_level_widget(&mut self) {
        self.total_level_widget = None;
    }

    pub fn pending_deferred(&self) -> usize {
        self.deferred.len()
    }

    pub fn local_player(&self) -> Option<PlayerGraphic> {
        self.local_player
    }

    pub fn set_local_player(&mut self, player: Option<PlayerGraphic>) {
        self.local_player = player;
    }

    /// Runs queued client-thread actions and returns how many ran.
    pub fn run_deferred(&mut self) -> usize {
        let mut ran = 0;
        let actions: Vec<_> = self.deferred.drain().collect();
        for action in actions {
            match action {
                DeferredAction::PlayFireworks(fireworks) => {
                    if let Some(player) = self.local_player.as_mut() {
                        player.graphic = fireworks.graphic_id();
                        player.spot_anim_frame = 0;
                    }
                }
            }
            ran += 1;
        }
        ran
    }

    fn real_level(&self, xp: u32) -> u32 {
        self.experience
            .level_for_xp(xp)
            .min(PrestigeConfig::MAX_REAL_LEVEL)
    }

    fn sync_from_server(&mut self, skill: Skill) {
        let stat = self.server[skill.index()];
        let level = self.real_level(stat.xp);
        self.client[skill.index()] = SkillLevels {
            level,
            xp: stat.xp,
            boosted_level: level as i32 + stat.boost,
        };
    }

    fn stat_update(&mut self, skill: Skill) -> HostEvent {
        self.sync_from_server(skill);
        let levels = self.client[skill.index()];
        HostEvent::StatChanged {
            skill,
            level: levels.level,
            boosted_level: levels.boosted_level,
        }
    }
}

impl Default for InMemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillHost for InMemoryHost {
    fn skill_experience(&self, skill: Skill) -> u32 {
        self.client[skill.index()].xp
    }

    fn real_skill_level(&self, skill: Skill) -> u32 {
        self.client[skill.index()].level
    }

    fn boosted_skill_level(&self, skill: Skill) -> i32 {
        self.client[skill.index()].boosted_level
    }

    fn write_skill(&mut self, skill: Skill, levels: SkillLevels) {
        self.client[skill.index()] = levels;
    }

    fn queue_changed_skill(&mut self, skill: Skill) {
        self.changed.push(skill);
    }
}

impl ChatboxHost for InMemoryHost {
    fn is_container_hidden(&self) -> bool {
        self.session.is_none() && !self.other_panel_open
    }

    fn current_input(&self) -> Option<SessionId> {
        if self.other_panel_open {
            return None;
        }
        self.session.as_ref().map(|session| session.id)
    }

    fn open_input(&mut self, session: &DisplaySession) {
        self.continue_text = Some(session.announcement.continue_text.clone());
        self.session = Some(session.clone());
    }

    fn set_continue_text(&mut self, text: &str) -> bool {
        match self.continue_text.as_mut() {
            Some(current) => {
                text.clone_into(current);
                true
            }
            None => false,
        }
    }

    fn close_input(&mut self) {
        self.session = None;
        self.continue_text = None;
    }
}

impl ChatHost for InMemoryHost {
    fn queue_message(&mut self, message: &str) {
        self.chat_messages.push(message.to_owned());
    }
}

impl WidgetHost for InMemoryHost {
    fn set_total_level_text(&mut self, text: &str) -> bool {
        match self.total_level_widget.as_mut() {
            Some(widget) => {
                text.clone_into(widget);
                true
            }
            None => false,
        }
    }
}

impl ClientThread for InMemoryHost {
    fn invoke(&mut self, action: DeferredAction) {
        self.deferred.push(action);
    }
}

impl ConfigOracle for InMemoryHost {
    fn xp_factor(&self) -> u32 {
        self.config.xp_factor
    }

    fn goal_level(&self) -> u32 {
        self.config.goal_level
    }

    fn show_virtual_levels(&self) -> bool {
        self.config.show_virtual_levels
    }

    fn show_real_levels(&self) -> bool {
        self.config.show_real_levels
    }

    fn enabled_categories(&self) -> SkillCategories {
        self.config.enabled
    }
}
