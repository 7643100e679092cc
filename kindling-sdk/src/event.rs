use libc::{c_int, c_void};
use std::{fmt, marker::PhantomData, ptr::NonNull};

/// An event produced by the probe library.
///
/// The memory behind the handle belongs to the probe library; this crate
/// never allocates or frees it. The handle borrows the [`crate::Probe`] it
/// came from, so it cannot be kept past the next read. It is neither `Send`
/// nor `Sync`.
pub struct EventHandle<'p> {
    ptr: NonNull<c_void>,
    status: c_int,
    _probe: PhantomData<&'p mut ()>,
}

impl EventHandle<'_> {
    pub(crate) fn new(ptr: NonNull<c_void>, status: c_int) -> Self {
        Self {
            ptr,
            status,
            _probe: PhantomData,
        }
    }

    /// Raw pointer to the event, for callers that know its layout.
    pub fn as_ptr(&self) -> *mut c_void {
        self.ptr.as_ptr()
    }

    /// The positive status `getEvent` returned alongside this event.
    pub fn status(&self) -> c_int {
        self.status
    }
}

impl fmt::Debug for EventHandle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHandle")
            .field("ptr", &self.ptr)
            .field("status", &self.status)
            .finish()
    }
}
