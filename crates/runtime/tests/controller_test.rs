//! Controller scenarios driven against the in-memory host.

use prestige_core::announcement::{CLOSING_TEXT, CONTINUE_TEXT};
use prestige_core::{PrestigeConfig, Skill, SkillLevels};
use prestige_runtime::{
    GateState, HostEvent, InMemoryHost, Lifecycle, PrestigeController, PrestigeEvent,
    RuntimeError, SessionId,
};

const THRESHOLD: u32 = 6_517_216;

struct Harness {
    controller: PrestigeController,
    host: InMemoryHost,
}

impl Harness {
    fn start(host: InMemoryHost) -> Self {
        let mut harness = Self {
            controller: PrestigeController::new(),
            host,
        };
        harness.dispatch(HostEvent::Startup);
        harness.controller.take_events();
        harness
    }

    fn dispatch(&mut self, event: HostEvent) {
        self.controller
            .handle(&mut self.host, event)
            .expect("event should be handled");
    }

    fn gain(&mut self, skill: Skill, amount: u32) {
        let event = self.host.gain_experience(skill, amount);
        self.dispatch(event);
    }

    fn configure(&mut self, key: &str, value: &str) {
        let event = self.host.set_config(key, value).expect("valid config");
        self.dispatch(event);
    }

    fn tick(&mut self) {
        self.dispatch(HostEvent::Tick);
    }

    fn open_session(&self) -> SessionId {
        self.host.session().expect("announcement open").id
    }
}

fn levels(level: u32, xp: u32, boosted_level: i32) -> SkillLevels {
    SkillLevels {
        level,
        xp,
        boosted_level,
    }
}

#[test]
fn startup_transforms_skills_inside_the_range() {
    let host = InMemoryHost::new().with_skill_xp(Skill::Attack, 7_000_000);
    let mut harness = Harness::start(host);

    assert_eq!(harness.controller.lifecycle(), Lifecycle::Running);
    assert_eq!(harness.controller.range().threshold_xp(), THRESHOLD);
    assert_eq!(harness.controller.range().max_xp(), 13_034_431);

    assert_eq!(harness.host.skill_levels(Skill::Attack), levels(72, 965_568, 72));
    assert_eq!(harness.host.skill_levels(Skill::Cooking), levels(1, 0, 1));

    // Bulk refresh marks every skill but never announces.
    assert_eq!(harness.host.take_changed_skills().len(), 23);
    assert!(harness.controller.queue().is_empty());
}

#[test]
fn crossing_a_prestige_level_queues_and_announces_on_tick() {
    let host = InMemoryHost::new().with_skill_xp(Skill::Attack, 7_500_000);
    let mut harness = Harness::start(host);
    assert_eq!(harness.host.skill_levels(Skill::Attack).level, 79);

    harness.gain(Skill::Attack, 113_625);
    assert_eq!(harness.host.skill_levels(Skill::Attack), levels(81, 2_192_818, 81));
    assert_eq!(harness.controller.queue().len(), 1);
    assert_eq!(
        harness.controller.take_events(),
        vec![PrestigeEvent::LevelUpQueued {
            skill: Skill::Attack,
            level: 81
        }]
    );

    harness.tick();

    let session = harness.host.session().expect("announcement open");
    assert_eq!(session.announcement.level, 81);
    assert_eq!(
        session.announcement.header,
        "Congratulations, you just advanced an Attack prestige level."
    );
    assert_eq!(harness.host.continue_text(), Some(CONTINUE_TEXT));
    assert_eq!(
        harness.host.chat_messages(),
        ["Congratulations, you've just advanced your Attack prestige level. \
          You are now prestige level 81."]
    );
    assert_eq!(harness.controller.gate().state(), GateState::Displaying);
    assert!(harness.controller.queue().is_empty());
}

#[test]
fn gains_that_stay_on_the_same_level_do_not_queue() {
    let host = InMemoryHost::new().with_skill_xp(Skill::Attack, 7_000_000);
    let mut harness = Harness::start(host);

    harness.gain(Skill::Attack, 10);
    assert_eq!(harness.host.skill_levels(Skill::Attack).xp, 965_588);
    assert!(harness.controller.queue().is_empty());
}

#[test]
fn announcement_waits_for_a_free_chatbox() {
    let host = InMemoryHost::new().with_skill_xp(Skill::Attack, 7_500_000);
    let mut harness = Harness::start(host);
    harness.gain(Skill::Attack, 113_625);

    harness.host.set_other_panel_open(true);
    harness.tick();
    assert!(harness.host.session().is_none());
    assert_eq!(harness.controller.queue().len(), 1);

    harness.host.set_other_panel_open(false);
    harness.tick();
    assert!(harness.host.session().is_some());
}

#[test]
fn announcements_are_shown_one_at_a_time_in_order() {
    let host = InMemoryHost::new()
        .with_skill_xp(Skill::Attack, 7_500_000)
        .with_skill_xp(Skill::Cooking, 7_500_000);
    let mut harness = Harness::start(host);

    harness.gain(Skill::Attack, 113_625);
    harness.gain(Skill::Cooking, 113_625);
    assert_eq!(harness.controller.queue().len(), 2);

    harness.tick();
    let first = harness.open_session();
    assert_eq!(
        harness.host.session().map(|s| s.announcement.skill),
        Some(Skill::Attack)
    );

    // Still displaying: nothing else opens.
    harness.tick();
    assert_eq!(harness.open_session(), first);
    assert_eq!(harness.controller.queue().len(), 1);

    harness.dispatch(HostEvent::Dismiss { session: first });
    assert_eq!(harness.host.continue_text(), Some(CLOSING_TEXT));
    assert_eq!(harness.controller.gate().state(), GateState::ClosePending);

    harness.tick();
    let second = harness.open_session();
    assert_ne!(second, first);
    assert_eq!(
        harness.host.session().map(|s| s.announcement.skill),
        Some(Skill::Cooking)
    );

    harness.dispatch(HostEvent::Dismiss { session: second });
    harness.tick();
    assert!(harness.host.session().is_none());
    assert_eq!(harness.controller.gate().state(), GateState::Idle);
}

#[test]
fn stale_dismissal_is_ignored() {
    let host = InMemoryHost::new().with_skill_xp(Skill::Attack, 7_500_000);
    let mut harness = Harness::start(host);
    harness.gain(Skill::Attack, 113_625);
    harness.tick();
    let open = harness.open_session();

    harness.dispatch(HostEvent::Dismiss {
        session: SessionId(open.0 + 7),
    });
    assert_eq!(harness.controller.gate().state(), GateState::Displaying);
    assert_eq!(harness.host.continue_text(), Some(CONTINUE_TEXT));
}

#[test]
fn fireworks_are_deferred_to_the_client_thread() {
    let host = InMemoryHost::new().with_skill_xp(Skill::Attack, 7_500_000);
    let mut harness = Harness::start(host);
    harness.gain(Skill::Attack, 113_625);
    harness.tick();

    assert_eq!(harness.host.pending_deferred(), 1);
    assert_eq!(harness.host.local_player().map(|p| p.graphic), Some(0));

    assert_eq!(harness.host.run_deferred(), 1);
    let player = harness.host.local_player().expect("player present");
    assert_eq!(player.graphic, 199);
    assert_eq!(player.spot_anim_frame, 0);
}

#[test]
fn fireworks_without_a_local_player_are_skipped() {
    let mut host = InMemoryHost::new().with_skill_xp(Skill::Attack, 7_500_000);
    host.set_local_player(None);
    let mut harness = Harness::start(host);
    harness.gain(Skill::Attack, 113_625);
    harness.tick();

    assert_eq!(harness.host.run_deferred(), 1);
    assert!(harness.host.local_player().is_none());
}

#[test]
fn disabled_categories_keep_true_values() {
    let mut config = PrestigeConfig::default();
    config.apply("enableCombat", "false").expect("valid key");
    let host = InMemoryHost::with_config(config)
        .with_skill_xp(Skill::Attack, 7_000_000)
        .with_skill_xp(Skill::Cooking, 7_000_000);
    let harness = Harness::start(host);

    assert_eq!(harness.host.skill_levels(Skill::Attack), levels(92, 7_000_000, 92));
    assert_eq!(harness.host.skill_levels(Skill::Cooking), levels(72, 965_568, 72));
}

#[test]
fn disabled_categories_never_queue_level_ups() {
    let mut config = PrestigeConfig::default();
    config.apply("enableCombat", "false").expect("valid key");
    let host = InMemoryHost::with_config(config).with_skill_xp(Skill::Attack, 7_500_000);
    let mut harness = Harness::start(host);

    // Would cross prestige level 81 if combat were enabled.
    harness.gain(Skill::Attack, 113_625);

    assert_eq!(
        harness.host.skill_levels(Skill::Attack),
        levels(93, 7_613_625, 93)
    );
    assert!(harness.controller.queue().is_empty());
    assert!(harness.controller.take_events().is_empty());
}

#[test]
fn boosts_carry_over_to_the_prestige_level() {
    let host = InMemoryHost::new().with_skill_xp(Skill::Attack, 7_000_000);
    let mut harness = Harness::start(host);

    let event = harness.host.set_boost(Skill::Attack, -5);
    harness.dispatch(event);

    assert_eq!(harness.host.skill_levels(Skill::Attack), levels(72, 965_568, 67));
}

#[test]
fn update_all_is_idempotent_and_silent() {
    let host = InMemoryHost::new().with_skill_xp(Skill::Attack, 7_000_000);
    let mut harness = Harness::start(host);
    let before: Vec<_> = Skill::all()
        .map(|skill| harness.host.skill_levels(skill))
        .collect();

    harness
        .controller
        .update_all_stats(&mut harness.host)
        .expect("seeded");
    harness
        .controller
        .update_all_stats(&mut harness.host)
        .expect("seeded");

    let after: Vec<_> = Skill::all()
        .map(|skill| harness.host.skill_levels(skill))
        .collect();
    assert_eq!(after, before);
    assert!(harness.controller.queue().is_empty());
}

#[test]
fn config_change_matches_a_fresh_start() {
    let host = InMemoryHost::new()
        .with_skill_xp(Skill::Attack, 9_000_000)
        .with_skill_xp(Skill::Fishing, 7_000_000);
    let mut harness = Harness::start(host);
    assert_eq!(harness.host.skill_levels(Skill::Attack).xp, 4_965_568);

    harness.configure("xpFactor", "3");

    let mut config = PrestigeConfig::default();
    config.apply("xpFactor", "3").expect("valid key");
    let fresh = Harness::start(
        InMemoryHost::with_config(config)
            .with_skill_xp(Skill::Attack, 9_000_000)
            .with_skill_xp(Skill::Fishing, 7_000_000),
    );

    for skill in Skill::all() {
        assert_eq!(
            harness.host.skill_levels(skill),
            fresh.host.skill_levels(skill),
            "{skill}"
        );
    }
    assert_eq!(harness.host.skill_levels(Skill::Attack).xp, 931_137);
    assert_eq!(harness.controller.range().threshold_xp(), 8_689_621);
    assert!(harness.controller.queue().is_empty());
}

#[test]
fn exact_threshold_is_left_untouched() {
    let mut config = PrestigeConfig::default();
    config.apply("xpFactor", "3").expect("valid key");
    let host = InMemoryHost::with_config(config).with_skill_xp(Skill::Mining, 8_689_621);
    let harness = Harness::start(host);

    assert_eq!(harness.host.skill_levels(Skill::Mining), levels(94, 8_689_621, 94));
}

#[test]
fn config_changes_outside_the_group_are_ignored() {
    let host = InMemoryHost::new().with_skill_xp(Skill::Attack, 7_000_000);
    let mut harness = Harness::start(host);

    harness.dispatch(HostEvent::ConfigChanged {
        group: "other".to_owned(),
        key: "xpFactor".to_owned(),
    });
    assert!(harness.controller.take_events().is_empty());
}

#[test]
fn virtual_levels_raise_the_restore_cap() {
    let host = InMemoryHost::new().with_skill_xp(Skill::Attack, 200_000_000);
    let mut harness = Harness::start(host);
    assert_eq!(harness.host.skill_levels(Skill::Attack).level, 99);

    harness.configure("showVirtualLevels", "true");
    assert_eq!(harness.host.skill_levels(Skill::Attack).level, 120);

    harness.configure("showVirtualLevels", "false");
    assert_eq!(harness.host.skill_levels(Skill::Attack).level, 99);
}

#[test]
fn show_real_levels_keeps_the_closer_level() {
    let mut config = PrestigeConfig::default();
    config.apply("showRealLevels", "true").expect("valid key");
    let host = InMemoryHost::with_config(config)
        .with_skill_xp(Skill::Attack, 6_517_253)
        .with_skill_xp(Skill::Strength, THRESHOLD + 1);
    let harness = Harness::start(host);

    // Prestige level is closer to its next level-up: transformed.
    assert_eq!(harness.host.skill_levels(Skill::Attack).xp, 74);
    // Real level is closer: left alone.
    assert_eq!(
        harness.host.skill_levels(Skill::Strength),
        levels(91, THRESHOLD + 1, 91)
    );
}

#[test]
fn shutdown_restores_true_values_and_ignores_later_events() {
    let host = InMemoryHost::new()
        .with_skill_xp(Skill::Attack, 7_500_000)
        .with_skill_xp(Skill::Magic, 200_000_000);
    let mut harness = Harness::start(host);
    harness.gain(Skill::Attack, 113_625);
    harness.tick();

    harness.dispatch(HostEvent::Shutdown);

    assert_eq!(harness.controller.lifecycle(), Lifecycle::Terminated);
    assert_eq!(
        harness.host.skill_levels(Skill::Attack),
        levels(93, 7_613_625, 93)
    );
    assert_eq!(harness.host.skill_levels(Skill::Magic).level, 99);
    assert!(harness.host.session().is_none());
    assert!(harness.controller.queue().is_empty());

    harness.gain(Skill::Attack, 1_000_000);
    harness.tick();
    assert_eq!(harness.host.skill_levels(Skill::Attack).xp, 8_613_625);
    assert!(harness.host.session().is_none());
}

#[test]
fn total_level_callback_rewrites_the_widget() {
    let host = InMemoryHost::new().with_skill_xp(Skill::Attack, 7_000_000);
    let mut harness = Harness::start(host);

    harness.dispatch(HostEvent::ScriptCallback {
        name: "skillTabTotalLevel".to_owned(),
    });
    assert_eq!(harness.host.total_level_text(), Some("Total level:<br>94"));
    assert_eq!(
        harness.controller.take_events(),
        vec![PrestigeEvent::TotalLevelUpdated { total: 94 }]
    );
}

#[test]
fn total_level_uses_the_virtual_cap_when_enabled() {
    let mut config = PrestigeConfig::default();
    config.apply("showVirtualLevels", "true").expect("valid key");
    let host = InMemoryHost::with_config(config).with_skill_xp(Skill::Attack, 200_000_000);
    let mut harness = Harness::start(host);

    harness.dispatch(HostEvent::ScriptCallback {
        name: "skillTabTotalLevel".to_owned(),
    });
    // 120 for Attack plus 22 skills at level 1.
    assert_eq!(harness.host.total_level_text(), Some("Total level:<br>142"));
}

#[test]
fn shutdown_restores_at_the_real_cap_even_with_virtual_levels() {
    let host = InMemoryHost::new().with_skill_xp(Skill::Attack, 200_000_000);
    let mut harness = Harness::start(host);

    harness.configure("showVirtualLevels", "true");
    assert_eq!(harness.host.skill_levels(Skill::Attack).level, 120);

    harness.dispatch(HostEvent::Shutdown);
    assert_eq!(harness.host.skill_levels(Skill::Attack).level, 99);
    assert!(harness.controller.take_events().contains(&PrestigeEvent::SkillsRestored {
        level_cap: 99,
        skills: 23,
    }));
}

#[test]
fn total_level_callback_without_widget_is_a_no_op() {
    let host = InMemoryHost::new().with_skill_xp(Skill::Attack, 7_000_000);
    let mut harness = Harness::start(host);
    harness.host.remove_total_level_widget();

    harness.dispatch(HostEvent::ScriptCallback {
        name: "skillTabTotalLevel".to_owned(),
    });
    assert!(harness.host.total_level_text().is_none());
    assert!(harness.controller.take_events().is_empty());
}

#[test]
fn stat_change_before_startup_is_fatal() {
    let mut controller = PrestigeController::new();
    let mut host = InMemoryHost::new();
    let event = host.gain_experience(Skill::Attack, 100);

    let err = controller
        .handle(&mut host, event)
        .expect_err("ledger not seeded");
    assert!(matches!(err, RuntimeError::Ledger(_)));
    assert!(err.is_fatal());
}

#[test]
fn domain_events_are_buffered_until_drained() {
    let host = InMemoryHost::new().with_skill_xp(Skill::Attack, 7_500_000);
    let mut harness = Harness::start(host);

    harness.gain(Skill::Attack, 113_625);
    harness.tick();

    let events = harness.controller.take_events();
    assert_eq!(events.len(), 2);
    assert!(harness.controller.take_events().is_empty());
}
