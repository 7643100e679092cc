use crate::{RawProbe, sys};
use libc::{c_char, c_int, c_void};
use std::{cell::Cell, marker::PhantomData};

/// [`RawProbe`] backed by the linked `libkindling`.
///
/// Constructing one does not initialize anything and there is no guard
/// against repeated initialization here. [`crate::Probe::native`] is the
/// at-most-once entry point.
///
/// The library documents no thread-safety, so this type is `Send` but not
/// `Sync`.
#[derive(Debug, Default)]
pub struct NativeProbe {
    _not_sync: PhantomData<Cell<()>>,
}

impl NativeProbe {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RawProbe for NativeProbe {
    fn init_probe(&mut self) {
        // SAFETY: takes no arguments.
        unsafe { sys::init_probe() }
    }

    unsafe fn get_event(&mut self, slot: *mut *mut c_void) -> c_int {
        unsafe { sys::get_event(slot) }
    }

    unsafe fn sub_event(&mut self, name: *mut c_char, category: *mut c_char) {
        unsafe { sys::sub_event(name, category) }
    }
}
