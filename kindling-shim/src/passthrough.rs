use kindling_sdk::RawProbe;
use libc::{c_char, c_int, c_void};

pub fn run_for_go<R: RawProbe + ?Sized>(raw: &mut R) {
    raw.init_probe();
}

/// # Safety
/// See [`RawProbe::get_event`].
pub unsafe fn get_kindling_event<R: RawProbe + ?Sized>(
    raw: &mut R,
    kindling_event: *mut *mut c_void,
) -> c_int {
    unsafe { raw.get_event(kindling_event) }
}

/// # Safety
/// See [`RawProbe::sub_event`].
pub unsafe fn sub_event_for_go<R: RawProbe + ?Sized>(
    raw: &mut R,
    event_name: *mut c_char,
    category: *mut c_char,
) {
    unsafe { raw.sub_event(event_name, category) }
}
