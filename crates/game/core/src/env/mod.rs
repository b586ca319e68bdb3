//! Traits describing read-only host data.
//!
//! Oracles expose the host's XP curve and the player's configuration so the
//! transform and ledger can be computed without coupling to a concrete
//! client. [`ExperienceTable`] is the standard curve for hosts that do not
//! supply their own.
mod config;
mod experience;

pub use config::ConfigOracle;
pub use experience::{ExperienceOracle, ExperienceTable};
