//! Event-driven prestige state machine.
//!
//! The [`PrestigeController`] is the authoritative owner of the skill ledger,
//! the level-up queue, and the announcement gate. Every host callback flows
//! through [`PrestigeController::handle`]; the controller never locks and
//! must only be driven from one thread at a time (see [`crate::PluginRuntime`]
//! for the serialized executor).
//!
//! Per stat change:
//!
//! ```text
//! host XP ─▶ ledger ─▶ category gate ─▶ range / tie-break ─▶ write display values
//!                                                        └─▶ level crossed? ─▶ queue
//! ```
//!
//! Per tick the gate closes a dismissed announcement and opens the next
//! queued one when the host's chatbox is free.

mod gate;
mod totals;

pub use gate::{DisplayGate, DisplaySession, GateState, SessionId};
pub use totals::{TOTAL_LEVEL_CALLBACK, total_level, total_level_text};

use prestige_core::announcement::CLOSING_TEXT;
use prestige_core::{
    ExperienceOracle, ExperienceTable, LevelUpAnnouncement, LevelUpQueue, PrestigeConfig,
    PrestigeRange, Skill, SkillLedger, SkillLevels,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::api::Result;
use crate::deferred::DeferredAction;
use crate::events::{HostEvent, PrestigeEvent};
use crate::host::Host;

/// Add-on lifecycle as seen by the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lifecycle {
    /// Constructed, waiting for the startup hook.
    Created,
    /// Seeded and processing events.
    Running,
    /// Shut down; the host holds its true values again.
    Terminated,
}

/// Read-only view of the controller for status queries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerStatus {
    pub lifecycle: Lifecycle,
    pub gate: GateState,
    pub pending: Vec<Skill>,
    pub goal_level: u32,
    pub xp_factor: u32,
    pub threshold_xp: u32,
    pub max_xp: u32,
}

/// Orchestrates the prestige transform against a [`Host`].
pub struct PrestigeController<E = ExperienceTable> {
    experience: E,
    range: PrestigeRange,
    ledger: SkillLedger,
    queue: LevelUpQueue,
    gate: DisplayGate,
    lifecycle: Lifecycle,
    events: Vec<PrestigeEvent>,
}

impl PrestigeController<ExperienceTable> {
    /// Creates a controller using the standard XP curve.
    pub fn new() -> Self {
        Self::with_experience(ExperienceTable::new())
    }
}

impl Default for PrestigeController<ExperienceTable> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ExperienceOracle> PrestigeController<E> {
    /// Creates a controller using a host-supplied XP curve.
    pub fn with_experience(experience: E) -> Self {
        let range = PrestigeRange::new(
            PrestigeConfig::DEFAULT_GOAL_LEVEL,
            PrestigeConfig::DEFAULT_XP_FACTOR,
            &experience,
        );

        Self {
            experience,
            range,
            ledger: SkillLedger::new(),
            queue: LevelUpQueue::new(),
            gate: DisplayGate::new(),
            lifecycle: Lifecycle::Created,
            events: Vec::new(),
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn range(&self) -> &PrestigeRange {
        &self.range
    }

    pub fn ledger(&self) -> &SkillLedger {
        &self.ledger
    }

    pub fn queue(&self) -> &LevelUpQueue {
        &self.queue
    }

    pub fn gate(&self) -> &DisplayGate {
        &self.gate
    }

    pub fn status(&self) -> ControllerStatus {
        ControllerStatus {
            lifecycle: self.lifecycle,
            gate: self.gate.state(),
            pending: self.queue.iter().collect(),
            goal_level: self.range.goal_level(),
            xp_factor: self.range.xp_factor(),
            threshold_xp: self.range.threshold_xp(),
            max_xp: self.range.max_xp(),
        }
    }

    /// Removes and returns the domain events emitted since the last call.
    ///
    /// The buffer is only emptied here.
    pub fn take_events(&mut self) -> Vec<PrestigeEvent> {
        std::mem::take(&mut self.events)
    }

    /// Routes one host event to its handler.
    ///
    /// Events after shutdown are ignored. Domain events produced here are
    /// buffered until [`Self::take_events`] drains them; callers driving the
    /// controller directly must drain after each event or the buffer grows
    /// without bound. [`crate::PluginRuntime`] drains after every dispatch.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeError::Ledger` when a stat change arrives for a skill
    /// that was never seeded, i.e. before startup.
    pub fn handle<H: Host + ?Sized>(&mut self, host: &mut H, event: HostEvent) -> Result<()> {
        if self.lifecycle == Lifecycle::Terminated {
            debug!(target: "prestige::controller", ?event, "ignoring event after shutdown");
            return Ok(());
        }

        match event {
            HostEvent::Startup => self.start_up(host),
            HostEvent::Shutdown => {
                self.shut_down(host);
                Ok(())
            }
            HostEvent::Tick => self.on_tick(host),
            HostEvent::StatChanged {
                skill,
                level,
                boosted_level,
            } => self.on_stat_changed(host, skill, level, boosted_level),
            HostEvent::ConfigChanged { group, key } => self.on_config_changed(host, &group, &key),
            HostEvent::ScriptCallback { name } => {
                self.on_script_callback(host, &name);
                Ok(())
            }
            HostEvent::Dismiss { session } => {
                self.on_dismiss(host, session);
                Ok(())
            }
        }
    }

    /// Seeds the ledger from the host, derives the range, and applies the
    /// transform to every skill without queueing announcements.
    pub fn start_up<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        for skill in Skill::all() {
            self.ledger.seed(
                skill,
                host.skill_experience(skill),
                host.boosted_skill_level(skill),
            );
        }
        self.lifecycle = Lifecycle::Running;
        self.recompute_range(host);

        info!(
            target: "prestige::controller",
            threshold_xp = self.range.threshold_xp(),
            max_xp = self.range.max_xp(),
            "prestige started"
        );

        self.update_all_stats(host)
    }

    /// Restores every skill to its true values at the real level cap and
    /// discards session state. Terminal.
    pub fn shut_down<H: Host + ?Sized>(&mut self, host: &mut H) {
        let level_cap = host.level_cap(true);
        self.restore_skills(host, level_cap);

        if let Some(session) = self.gate.reset()
            && host.current_input() == Some(session.id)
        {
            host.close_input();
        }
        self.queue.clear();
        self.ledger.clear();
        self.lifecycle = Lifecycle::Terminated;

        info!(target: "prestige::controller", "prestige shut down");
    }

    /// Handles a host stat change for `skill`.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeError::Ledger` if `skill` was never seeded.
    pub fn on_stat_changed<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        skill: Skill,
        level: u32,
        boosted_level: i32,
    ) -> Result<()> {
        let true_xp = host.skill_experience(skill);
        self.change_stat(host, skill, true_xp, level, boosted_level, false)
    }

    /// Re-applies the transform to every skill from the ledger's true values.
    ///
    /// This is a bulk refresh, so it never queues announcements, and it is
    /// idempotent: the host's possibly transformed XP is never read back.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeError::Ledger` if the ledger was not seeded.
    pub fn update_all_stats<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        for skill in Skill::all() {
            let record = *self.ledger.record(skill)?;
            let level = host.real_skill_level(skill);
            self.change_stat(
                host,
                skill,
                record.true_xp,
                level,
                record.boosted_level,
                true,
            )?;
            host.queue_changed_skill(skill);
        }
        Ok(())
    }

    /// Re-derives the range and re-applies the transform after a change in
    /// the prestige configuration group.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeError::Ledger` if the ledger was not seeded.
    pub fn on_config_changed<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        group: &str,
        key: &str,
    ) -> Result<()> {
        if group != PrestigeConfig::GROUP {
            return Ok(());
        }
        debug!(target: "prestige::controller", key, "configuration changed");

        self.recompute_range(host);
        let level_cap = host.level_cap(false);
        self.restore_skills(host, level_cap);
        self.update_all_stats(host)
    }

    /// Drives the announcement gate.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeError::Ledger` if a queued skill has no ledger entry.
    pub fn on_tick<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        if let Some(session) = self.gate.take_closable(host.current_input()) {
            host.close_input();
            debug!(target: "prestige::controller", session = %session.id, "announcement closed");
            self.events
                .push(PrestigeEvent::AnnouncementClosed { session: session.id });
        }

        if self.queue.is_empty() || !host.is_container_hidden() {
            return Ok(());
        }

        let Some(skill) = self.queue.try_dequeue() else {
            return Ok(());
        };
        let true_xp = self.ledger.record(skill)?.true_xp;
        let level = self.range.display_level(true_xp, &self.experience);

        let session = self
            .gate
            .open(LevelUpAnnouncement::new(skill, level, true_xp));
        host.open_input(&session);
        host.queue_message(&session.announcement.chat_message);
        host.invoke(DeferredAction::PlayFireworks(
            session.announcement.fireworks,
        ));

        info!(
            target: "prestige::controller",
            session = %session.id,
            %skill,
            level,
            "announcing prestige level"
        );
        self.events.push(PrestigeEvent::AnnouncementOpened {
            session: session.id,
            skill,
            level,
        });
        Ok(())
    }

    /// Marks the announcement `session` for closing on the next tick.
    pub fn on_dismiss<H: Host + ?Sized>(&mut self, host: &mut H, session: SessionId) {
        if !self.gate.request_close(session) {
            debug!(target: "prestige::controller", %session, "ignoring stale dismissal");
            return;
        }

        if !host.set_continue_text(CLOSING_TEXT) {
            trace!(target: "prestige::controller", %session, "continue prompt absent");
        }
        self.events
            .push(PrestigeEvent::AnnouncementDismissed { session });
    }

    /// Rewrites the skill tab's total level when the host asks for it.
    pub fn on_script_callback<H: Host + ?Sized>(&mut self, host: &mut H, name: &str) {
        if name != TOTAL_LEVEL_CALLBACK {
            return;
        }

        let level_cap = host.level_cap(false);
        let total = total_level(&*host, &self.experience, level_cap);

        if host.set_total_level_text(&total_level_text(total)) {
            self.events.push(PrestigeEvent::TotalLevelUpdated { total });
        } else {
            trace!(target: "prestige::controller", total, "total level widget absent");
        }
    }

    fn change_stat<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        skill: Skill,
        true_xp: u32,
        level: u32,
        boosted_level: i32,
        ignore_levels: bool,
    ) -> Result<()> {
        self.ledger.observe(skill, true_xp, boosted_level)?;

        if !host.enabled_categories().allows(skill) {
            trace!(target: "prestige::controller", %skill, "category disabled");
            return Ok(());
        }

        let Some(display_xp) = self.range.display_xp(true_xp) else {
            return Ok(());
        };

        if host.show_real_levels() && !self.range.is_display_level_closer(true_xp, &self.experience)
        {
            return Ok(());
        }

        let new_level = self.experience.level_for_xp(display_xp);
        let boost_diff =
            i64::from(boosted_level) - i64::from(self.experience.level_for_xp(true_xp));
        let boosted = i64::from(new_level) + boost_diff;

        host.write_skill(
            skill,
            SkillLevels {
                level: new_level,
                xp: display_xp,
                boosted_level: boosted.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32,
            },
        );

        let previous = self.ledger.record_displayed_level(skill, new_level)?;
        let old_level = previous.unwrap_or(level);

        if !ignore_levels && old_level < new_level {
            debug!(
                target: "prestige::controller",
                %skill,
                old_level,
                new_level,
                "prestige level gained"
            );
            self.queue.enqueue(skill);
            self.events.push(PrestigeEvent::LevelUpQueued {
                skill,
                level: new_level,
            });
        }

        Ok(())
    }

    fn recompute_range<H: Host + ?Sized>(&mut self, host: &H) {
        self.range = PrestigeRange::from_config(host, &self.experience);
        self.events.push(PrestigeEvent::RangeRecomputed {
            goal_level: self.range.goal_level(),
            xp_factor: self.range.xp_factor(),
            threshold_xp: self.range.threshold_xp(),
            max_xp: self.range.max_xp(),
        });
    }

    fn restore_skills<H: Host + ?Sized>(&mut self, host: &mut H, level_cap: u32) {
        let restored = self.ledger.restore_all(level_cap, &self.experience);
        for entry in &restored {
            host.write_skill(entry.skill, entry.levels);
            host.queue_changed_skill(entry.skill);
        }

        debug!(
            target: "prestige::controller",
            level_cap,
            skills = restored.len(),
            "restored true skill values"
        );
        self.events.push(PrestigeEvent::SkillsRestored {
            level_cap,
            skills: restored.len(),
        });
    }
}
