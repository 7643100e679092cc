//! Raw entry points exported by `libkindling`.
//!
//! Nothing here is checked. Prefer [`crate::NativeProbe`] or [`crate::Probe`].
use libc::{c_char, c_int, c_void};

unsafe extern "C" {
    /// Sets up the process-wide probe state.
    pub fn init_probe();

    /// Writes the next collected event into `kindling_event` and returns a
    /// status: `0` when nothing is available, negative on error.
    #[link_name = "getEvent"]
    pub fn get_event(kindling_event: *mut *mut c_void) -> c_int;

    /// Registers interest in `event_name` within `category`.
    pub fn sub_event(event_name: *mut c_char, category: *mut c_char);
}
