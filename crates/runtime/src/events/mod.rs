//! Inbound host events and outbound domain events.
//!
//! [`HostEvent`] is everything the host delivers to the add-on; the
//! controller turns those into [`PrestigeEvent`]s that the worker broadcasts
//! to observers.

mod types;

pub use types::{HostEvent, PrestigeEvent};
