#![deny(unsafe_op_in_unsafe_fn)]
//! Safe interface to the kindling probe library.
//!
//! The probe library collects system events and exposes three C entry points:
//! `init_probe`, `getEvent` and `sub_event`. This crate wraps them behind the
//! [`RawProbe`] trait and builds an owned [`Probe`] context on top, so that a
//! probe is initialized explicitly and events come back as a `Result` instead
//! of through an out-parameter.
//!
//! ```no_run
//! # #[cfg(feature = "native")]
//! # fn main() -> Result<(), kindling_sdk::ProbeError> {
//! use kindling_sdk::{Probe, Subscription};
//!
//! let mut probe = Probe::native()?;
//! probe.subscribe(&Subscription::new("syscall_exit-recvfrom", "net")?);
//! while let Some(event) = probe.next_event()? {
//!     println!("event at {:p}", event.as_ptr());
//! }
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "native"))]
//! # fn main() {}
//! ```
mod config;
mod error;
mod event;
#[cfg(feature = "native")]
mod native;
mod probe;
mod raw;
mod subscription;
#[cfg(feature = "native")]
pub mod sys;
mod watcher;

pub use config::{ProbeConfig, SubscriptionConfig};
pub use error::ProbeError;
pub use event::EventHandle;
#[cfg(feature = "native")]
pub use native::NativeProbe;
pub use probe::{Probe, ProbeStats};
pub use raw::RawProbe;
pub use subscription::Subscription;
pub use watcher::{EventWatcher, WatchOptions, WatcherExit};
