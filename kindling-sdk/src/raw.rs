use libc::{c_char, c_int, c_void};

/// The three entry points of a probe library.
///
/// Implementations forward each call to the library untouched. Interpreting
/// statuses, owning identifiers and tracking initialization is left to
/// [`crate::Probe`].
pub trait RawProbe {
    /// Initializes the probe subsystem.
    fn init_probe(&mut self);

    /// Fetches the next event into `slot` and returns the library's status.
    ///
    /// # Safety
    /// `slot` must be null or valid for a write of one pointer, with whatever
    /// additional requirements the underlying library places on it.
    unsafe fn get_event(&mut self, slot: *mut *mut c_void) -> c_int;

    /// Subscribes to `name` within `category`.
    ///
    /// # Safety
    /// Both pointers must be null or point to NUL-terminated byte sequences
    /// that stay valid for the duration of the call.
    unsafe fn sub_event(&mut self, name: *mut c_char, category: *mut c_char);
}

impl<P: RawProbe + ?Sized> RawProbe for &mut P {
    fn init_probe(&mut self) {
        (**self).init_probe()
    }

    unsafe fn get_event(&mut self, slot: *mut *mut c_void) -> c_int {
        unsafe { (**self).get_event(slot) }
    }

    unsafe fn sub_event(&mut self, name: *mut c_char, category: *mut c_char) {
        unsafe { (**self).sub_event(name, category) }
    }
}

impl<P: RawProbe + ?Sized> RawProbe for Box<P> {
    fn init_probe(&mut self) {
        (**self).init_probe()
    }

    unsafe fn get_event(&mut self, slot: *mut *mut c_void) -> c_int {
        unsafe { (**self).get_event(slot) }
    }

    unsafe fn sub_event(&mut self, name: *mut c_char, category: *mut c_char) {
        unsafe { (**self).sub_event(name, category) }
    }
}
