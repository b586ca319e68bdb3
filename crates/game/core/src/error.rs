//! Common error infrastructure for prestige-core.
//!
//! Domain errors (`LedgerError`, `ConfigError`) live here alongside the
//! severity classification the runtime uses to decide whether to keep
//! processing host events or stop and restore the host.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each failure source has its own error type
//! - **Severity Classification**: Errors are categorized for recovery strategies
//! - **Stable Codes**: Every variant maps to a static identifier for logs and tests

use crate::config::ConfigKey;
use crate::skill::Skill;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Fatal**: Programmer error; the session state can no longer be trusted
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown configuration key, unparsable value
    Validation,

    /// Fatal error - ledger invariant violated, cannot continue.
    ///
    /// Examples: stat change observed for a skill that was never seeded
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if processing must stop.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }
}

/// Common trait for all prestige-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait PrestigeError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str;
}

/// Errors raised by [`crate::ledger::SkillLedger`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LedgerError {
    /// The skill was observed before the ledger was seeded for it.
    #[error("skill {0} has not been seeded")]
    NotSeeded(Skill),
}

impl PrestigeError for LedgerError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            LedgerError::NotSeeded(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            LedgerError::NotSeeded(_) => "LEDGER_NOT_SEEDED",
        }
    }
}

/// Errors raised while applying raw configuration values.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConfigError {
    /// The key is not part of the prestige configuration group.
    #[error("unknown configuration key '{0}'")]
    UnknownKey(String),

    /// The value could not be parsed for the key's type.
    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: ConfigKey, value: String },
}

impl PrestigeError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::UnknownKey(_) => "CONFIG_UNKNOWN_KEY",
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE",
        }
    }
}
