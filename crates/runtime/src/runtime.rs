//! High-level runtime orchestrator.
//!
//! The runtime owns the plugin worker, wires up command/event channels, and
//! exposes a builder-based API for hosts to feed it callbacks.

use std::marker::PhantomData;

use tokio::sync::broadcast;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::api::{PluginHandle, Result, RuntimeError};
use crate::events::{HostEvent, PrestigeEvent};
use crate::host::Host;
use crate::workers::{Command, PluginWorker};

/// Runtime configuration shared across the orchestrator and worker.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub command_buffer_size: usize,
    pub event_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            command_buffer_size: 32,
            event_buffer_size: 100,
        }
    }
}

/// Serialized executor for one plugin instance.
///
/// [`PluginHandle`] provides a cloneable façade for host callbacks.
pub struct PluginRuntime<H> {
    handle: PluginHandle<H>,
    worker_handle: JoinHandle<H>,
}

impl<H: Host + Send + 'static> PluginRuntime<H> {
    /// Create a new runtime builder
    pub fn builder() -> PluginRuntimeBuilder<H> {
        PluginRuntimeBuilder::new()
    }

    /// Starts with the default configuration and runs the startup hook.
    pub async fn start(host: H) -> Result<Self> {
        Self::builder().start(host).await
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> PluginHandle<H> {
        self.handle.clone()
    }

    /// Subscribe to domain events
    pub fn subscribe(&self) -> broadcast::Receiver<PrestigeEvent> {
        self.handle.subscribe()
    }

    /// Runs the shutdown hook, stops the worker, and hands the host back.
    ///
    /// If the worker already stopped after a fatal error the host is
    /// returned as the worker left it.
    pub async fn shutdown(self) -> Result<H> {
        match self.handle.request_shutdown().await {
            Ok(()) | Err(RuntimeError::CommandChannelClosed) => {}
            Err(RuntimeError::ReplyChannelClosed(_)) => {}
            Err(err) => return Err(err),
        }
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`PluginRuntime`] with flexible configuration.
pub struct PluginRuntimeBuilder<H> {
    config: RuntimeConfig,
    host: PhantomData<fn() -> H>,
}

impl<H: Host + Send + 'static> PluginRuntimeBuilder<H> {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            host: PhantomData,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Spawns the worker without dispatching the startup hook.
    pub fn spawn(self, host: H) -> PluginRuntime<H> {
        let (command_tx, command_rx) = mpsc::channel::<Command<H>>(self.config.command_buffer_size);
        let (event_tx, _event_rx) =
            broadcast::channel::<PrestigeEvent>(self.config.event_buffer_size);

        let handle = PluginHandle::new(command_tx, event_tx.clone());
        let worker = PluginWorker::new(host, command_rx, event_tx);
        let worker_handle = tokio::spawn(worker.run());

        PluginRuntime {
            handle,
            worker_handle,
        }
    }

    /// Spawns the worker and dispatches [`HostEvent::Startup`].
    pub async fn start(self, host: H) -> Result<PluginRuntime<H>> {
        let runtime = self.spawn(host);
        runtime.handle.dispatch(HostEvent::Startup).await?;
        Ok(runtime)
    }
}
