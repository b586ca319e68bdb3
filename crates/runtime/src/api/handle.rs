//! Cloneable façade for issuing commands to the plugin worker.
//!
//! [`PluginHandle`] hides channel plumbing: every call becomes a command on
//! the worker's queue, so host callbacks issued from many tasks are still
//! applied one at a time.
use tokio::sync::{broadcast, mpsc, oneshot};

use super::errors::{Result, RuntimeError};
use crate::controller::ControllerStatus;
use crate::events::{HostEvent, PrestigeEvent};
use crate::workers::Command;

/// Client-facing handle to interact with the plugin worker.
pub struct PluginHandle<H> {
    command_tx: mpsc::Sender<Command<H>>,
    event_tx: broadcast::Sender<PrestigeEvent>,
}

impl<H> Clone for PluginHandle<H> {
    fn clone(&self) -> Self {
        Self {
            command_tx: self.command_tx.clone(),
            event_tx: self.event_tx.clone(),
        }
    }
}

impl<H: Send + 'static> PluginHandle<H> {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command<H>>,
        event_tx: broadcast::Sender<PrestigeEvent>,
    ) -> Self {
        Self {
            command_tx,
            event_tx,
        }
    }

    /// Delivers a host event and waits until the controller has applied it.
    pub async fn dispatch(&self, event: HostEvent) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Dispatch {
                event,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Query the controller state (read-only snapshot)
    pub async fn status(&self) -> Result<ControllerStatus> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::QueryStatus { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Runs `f` against the host on the worker, between two events.
    ///
    /// This is how a host feeds its own state changes (server stat packets,
    /// client-thread drains) through the same serialized queue.
    pub async fn with_host<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut H) -> R + Send + 'static,
        R: Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel();

        let job = Box::new(move |host: &mut H| {
            // Caller may have stopped waiting.
            let _ = reply_tx.send(f(host));
        });

        self.command_tx
            .send(Command::WithHost(job))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Subscribe to domain events emitted by the controller
    pub fn subscribe(&self) -> broadcast::Receiver<PrestigeEvent> {
        self.event_tx.subscribe()
    }

    pub(crate) async fn request_shutdown(&self) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Shutdown { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }
}
