//! Realtime fan-out of request lifecycle events.

pub mod hub;

pub use hub::{EventHub, OutboundEvent};
