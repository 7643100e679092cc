#![deny(unsafe_op_in_unsafe_fn)]
//! C ABI boundary over the kindling probe library.
//!
//! With the `native` feature the crate exports three symbols with the
//! signatures declared in `include/kindling_shim.h`:
//!
//! - `runForGo()` calls `init_probe()`.
//! - `getKindlingEvent(slot)` calls `getEvent(slot)` and returns its status.
//! - `subEventForGo(name, category)` calls `sub_event(name, category)`.
//!
//! Every argument and result passes through untouched. There is no
//! initialization guard, so calling the reader or subscriber before
//! `runForGo` behaves exactly as the probe library does in that state.
#[cfg(feature = "native")]
mod c;
mod passthrough;

pub use passthrough::{get_kindling_event, run_for_go, sub_event_for_go};
