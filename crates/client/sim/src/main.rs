//! Headless simulator that drives the prestige runtime against an
//! in-memory host.
mod config;

use anyhow::Result;
use prestige_core::Skill;
use prestige_runtime::{HostEvent, InMemoryHost, PluginHandle, PluginRuntime, PrestigeEvent};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use crate::config::SimConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let config = SimConfig::from_env();
    info!(
        target: "prestige::sim",
        skill = %config.skill,
        start_xp = config.start_xp,
        xp_per_tick = config.xp_per_tick,
        ticks = config.ticks,
        "starting simulation"
    );

    let host = InMemoryHost::with_config(config.prestige.clone())
        .with_skill_xp(config.skill, config.start_xp);
    let runtime = PluginRuntime::builder()
        .config(config.runtime.clone())
        .spawn(host);

    let printer = tokio::spawn(print_events(runtime.subscribe(), config.json_events));

    let handle = runtime.handle();
    handle.dispatch(HostEvent::Startup).await?;

    for _ in 0..config.ticks {
        step(&handle, config.skill, config.xp_per_tick).await?;
    }

    handle
        .dispatch(HostEvent::ScriptCallback {
            name: prestige_runtime::controller::TOTAL_LEVEL_CALLBACK.to_owned(),
        })
        .await?;

    let status = handle.status().await?;
    info!(
        target: "prestige::sim",
        pending = status.pending.len(),
        gate = ?status.gate,
        "simulation finished"
    );

    drop(handle);
    let host = runtime.shutdown().await?;
    let restored = host.skill_levels(config.skill);
    info!(
        target: "prestige::sim",
        skill = %config.skill,
        level = restored.level,
        xp = restored.xp,
        "host restored"
    );

    printer.await?;
    Ok(())
}

/// One game tick: a server XP drop, the tick itself, an automatic click on
/// any open announcement, then the client-thread drain.
async fn step(handle: &PluginHandle<InMemoryHost>, skill: Skill, xp: u32) -> Result<()> {
    let event = handle
        .with_host(move |host| host.gain_experience(skill, xp))
        .await?;
    handle.dispatch(event).await?;
    handle.dispatch(HostEvent::Tick).await?;

    let open = handle
        .with_host(|host| host.session().map(|session| session.id))
        .await?;
    if let Some(session) = open {
        handle.dispatch(HostEvent::Dismiss { session }).await?;
    }

    handle.with_host(|host| host.run_deferred()).await?;
    Ok(())
}

async fn print_events(mut events: broadcast::Receiver<PrestigeEvent>, json: bool) {
    loop {
        match events.recv().await {
            Ok(event) if json => match serde_json::to_string(&event) {
                Ok(line) => println!("{line}"),
                Err(err) => warn!(target: "prestige::sim", %err, "failed to encode event"),
            },
            Ok(event) => info!(target: "prestige::sim", ?event, "event"),
            Err(RecvError::Lagged(skipped)) => {
                warn!(target: "prestige::sim", skipped, "event printer lagged");
            }
            Err(RecvError::Closed) => break,
        }
    }
}

fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
