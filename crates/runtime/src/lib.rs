//! Runtime orchestration for the prestige add-on.
//!
//! This crate wires the pure rules of `prestige-core` to a host game client.
//! Host capabilities are described by the traits in [`host`], the
//! [`controller::PrestigeController`] state machine consumes host events, and
//! [`PluginRuntime`] funnels every event through one serialized worker task.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the worker orchestrator and builder
//! - [`api`] exposes the handle and error types clients interact with
//! - [`controller`] holds the event-driven state machine and display gate
//! - [`events`] defines inbound host events and outbound domain events
//! - [`host`] describes the host contract and ships an in-memory host
//! - [`deferred`] carries fire-and-forget actions for the host's client thread
pub mod api;
pub mod controller;
pub mod deferred;
pub mod events;
pub mod host;
pub mod runtime;

mod workers;

pub use api::{PluginHandle, Result, RuntimeError};
pub use controller::{
    ControllerStatus, DisplayGate, DisplaySession, GateState, Lifecycle, PrestigeController,
    SessionId,
};
pub use deferred::{DeferredAction, DeferredQueue};
pub use events::{HostEvent, PrestigeEvent};
pub use host::{
    ChatHost, ChatboxHost, ClientThread, Host, InMemoryHost, PlayerGraphic, SkillHost, WidgetHost,
};
pub use runtime::{PluginRuntime, PluginRuntimeBuilder, RuntimeConfig};
