//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination and the core ledger so clients
//! can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use prestige_core::{ErrorSeverity, LedgerError, PrestigeError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("plugin worker command channel closed")]
    CommandChannelClosed,

    #[error("plugin worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("plugin worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl RuntimeError {
    /// Returns true if the worker must restore the host and stop.
    pub fn is_fatal(&self) -> bool {
        self.severity().is_fatal()
    }
}

impl PrestigeError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Ledger(error) => error.severity(),
            RuntimeError::CommandChannelClosed
            | RuntimeError::ReplyChannelClosed(_)
            | RuntimeError::WorkerJoin(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::CommandChannelClosed => "RUNTIME_COMMAND_CHANNEL_CLOSED",
            RuntimeError::ReplyChannelClosed(_) => "RUNTIME_REPLY_CHANNEL_CLOSED",
            RuntimeError::WorkerJoin(_) => "RUNTIME_WORKER_JOIN",
            RuntimeError::Ledger(error) => error.error_code(),
        }
    }
}
