//! Protocol analyzers for payloads captured by the kindling probe.
//!
//! Each analyzer reads a [`PayloadMessage`] and records what it understood
//! as attributes keyed by the names in [`labels`].
pub mod dns;
pub mod dubbo;
pub mod labels;
mod message;

pub use message::{AttributeValue, PayloadMessage};
