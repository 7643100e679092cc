#![allow(non_snake_case)]
use crate::passthrough;
use kindling_sdk::NativeProbe;
use libc::{c_char, c_int, c_void};

#[unsafe(no_mangle)]
pub extern "C" fn runForGo() {
    passthrough::run_for_go(&mut NativeProbe::new());
}

/// # Safety
/// `kindling_event` is handed to `getEvent` as is.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn getKindlingEvent(kindling_event: *mut *mut c_void) -> c_int {
    unsafe { passthrough::get_kindling_event(&mut NativeProbe::new(), kindling_event) }
}

/// # Safety
/// Both pointers are handed to `sub_event` as is.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn subEventForGo(event_name: *mut c_char, category: *mut c_char) {
    unsafe { passthrough::sub_event_for_go(&mut NativeProbe::new(), event_name, category) }
}
