//! Plugin worker that owns the [`PrestigeController`] and its host.
//!
//! Receives commands from [`crate::PluginHandle`], applies host events one at
//! a time, and broadcasts the domain events each one produced.

use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, error, info};

use prestige_core::PrestigeError;

use crate::api::Result;
use crate::controller::{ControllerStatus, Lifecycle, PrestigeController};
use crate::events::{HostEvent, PrestigeEvent};
use crate::host::Host;

/// Job run against the host inside the worker.
pub type HostJob<H> = Box<dyn FnOnce(&mut H) + Send>;

/// Commands that can be sent to the plugin worker
pub enum Command<H> {
    /// Apply one host event.
    Dispatch {
        event: HostEvent,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Query the controller state (read-only).
    QueryStatus {
        reply: oneshot::Sender<ControllerStatus>,
    },
    /// Mutate the host between events.
    WithHost(HostJob<H>),
    /// Run the shutdown hook and stop.
    Shutdown { reply: oneshot::Sender<()> },
}

/// Background task that serializes every controller entry point.
pub struct PluginWorker<H> {
    controller: PrestigeController,
    host: H,
    command_rx: mpsc::Receiver<Command<H>>,
    event_tx: broadcast::Sender<PrestigeEvent>,
}

impl<H: Host + Send + 'static> PluginWorker<H> {
    pub fn new(
        host: H,
        command_rx: mpsc::Receiver<Command<H>>,
        event_tx: broadcast::Sender<PrestigeEvent>,
    ) -> Self {
        Self {
            controller: PrestigeController::new(),
            host,
            command_rx,
            event_tx,
        }
    }

    /// Main worker loop. Returns the host once the worker stops.
    pub async fn run(mut self) -> H {
        while let Some(cmd) = self.command_rx.recv().await {
            if !self.handle_command(cmd) {
                break;
            }
        }

        // Channel closed without an explicit shutdown: leave the host clean.
        self.shut_down();
        debug!(target: "prestige::worker", "plugin worker stopped");
        self.host
    }

    /// Returns false when the worker must stop.
    fn handle_command(&mut self, cmd: Command<H>) -> bool {
        match cmd {
            Command::Dispatch { event, reply } => {
                let result = self.controller.handle(&mut self.host, event);
                self.publish();

                let keep_running = match &result {
                    Err(err) if err.is_fatal() => {
                        error!(
                            target: "prestige::worker",
                            severity = err.severity().as_str(),
                            code = err.error_code(),
                            error = %err,
                            "fatal error, restoring host and stopping"
                        );
                        self.shut_down();
                        self.command_rx.close();
                        false
                    }
                    _ => true,
                };

                if reply.send(result).is_err() {
                    debug!(target: "prestige::worker", "Dispatch reply channel closed (caller dropped)");
                }
                keep_running
            }
            Command::QueryStatus { reply } => {
                if reply.send(self.controller.status()).is_err() {
                    debug!(target: "prestige::worker", "QueryStatus reply channel closed (caller dropped)");
                }
                true
            }
            Command::WithHost(job) => {
                job(&mut self.host);
                true
            }
            Command::Shutdown { reply } => {
                self.shut_down();
                self.command_rx.close();
                if reply.send(()).is_err() {
                    debug!(target: "prestige::worker", "Shutdown reply channel closed (caller dropped)");
                }
                false
            }
        }
    }

    fn shut_down(&mut self) {
        if self.controller.lifecycle() == Lifecycle::Terminated {
            return;
        }
        info!(target: "prestige::worker", "shutting down plugin");
        self.controller.shut_down(&mut self.host);
        self.publish();
    }

    fn publish(&mut self) {
        for event in self.controller.take_events() {
            // No subscribers is fine.
            let _ = self.event_tx.send(event);
        }
    }
}
