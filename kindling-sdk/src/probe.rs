use crate::{EventHandle, ProbeError, RawProbe, Subscription};
use libc::{c_int, c_void};
use std::{
    ptr::{self, NonNull},
    sync::atomic::{AtomicBool, Ordering},
};
use tracing::{debug, info};

/// Counters kept by a [`Probe`] across reads.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProbeStats {
    /// Reads that produced an event.
    pub events: u64,
    /// Reads that found nothing available.
    pub empty_polls: u64,
    /// Reads that returned an error status or a null event.
    pub errors: u64,
}

/// An initialized probe.
///
/// The only way to obtain one is through [`Probe::init`] (or
/// [`Probe::native`]), so reads and subscriptions always follow
/// initialization. Reads take `&mut self`: sharing a probe between threads
/// requires external synchronization.
#[derive(Debug)]
pub struct Probe<R> {
    raw: R,
    stats: ProbeStats,
}

#[cfg(feature = "native")]
static NATIVE_INITIALIZED: AtomicBool = AtomicBool::new(false);

#[cfg(feature = "native")]
impl Probe<crate::NativeProbe> {
    /// Initializes the linked probe library.
    ///
    /// The library keeps process-wide state, so this succeeds at most once
    /// per process. Later calls return [`ProbeError::AlreadyInitialized`]
    /// without touching the library.
    pub fn native() -> Result<Self, ProbeError> {
        claim_once(&NATIVE_INITIALIZED)?;
        Ok(Self::init(crate::NativeProbe::new()))
    }
}

/// Sets `flag`, failing if it was already set.
#[cfg_attr(not(feature = "native"), allow(dead_code))]
pub(crate) fn claim_once(flag: &AtomicBool) -> Result<(), ProbeError> {
    if flag.swap(true, Ordering::SeqCst) {
        return Err(ProbeError::AlreadyInitialized);
    }
    Ok(())
}

impl<R: RawProbe> Probe<R> {
    /// Calls the backend's initialization entry point once and takes
    /// ownership of the backend.
    pub fn init(mut raw: R) -> Self {
        raw.init_probe();
        info!("kindling probe initialized");
        Self {
            raw,
            stats: ProbeStats::default(),
        }
    }

    /// Reads the next event exactly as the backend reports it.
    ///
    /// The slot starts out null, so the returned pointer is either null or
    /// whatever the backend wrote. Stats are not updated.
    pub fn poll_raw(&mut self) -> (c_int, *mut c_void) {
        let mut slot: *mut c_void = ptr::null_mut();
        // SAFETY: `slot` is a live local, valid for one pointer write.
        let status = unsafe { self.raw.get_event(&mut slot) };
        (status, slot)
    }

    /// Reads the next event.
    ///
    /// - positive status: `Ok(Some(handle))`
    /// - zero: `Ok(None)`, nothing available right now
    /// - negative status: `Err(ProbeError::Status(code))` with the code untouched
    pub fn next_event(&mut self) -> Result<Option<EventHandle<'_>>, ProbeError> {
        let (status, slot) = self.poll_raw();
        if status == 0 {
            self.stats.empty_polls += 1;
            return Ok(None);
        }
        if status < 0 {
            self.stats.errors += 1;
            return Err(ProbeError::Status(status));
        }
        match NonNull::new(slot) {
            Some(ptr) => {
                self.stats.events += 1;
                Ok(Some(EventHandle::new(ptr, status)))
            }
            None => {
                self.stats.errors += 1;
                Err(ProbeError::NullEvent { status })
            }
        }
    }

    /// Registers a subscription with the backend.
    ///
    /// Any rejection happens silently inside the probe library.
    pub fn subscribe(&mut self, subscription: &Subscription) {
        debug!(%subscription, "subscribing to probe event");
        let mut name = subscription.name().to_bytes_with_nul().to_vec();
        let mut category = subscription.category().to_bytes_with_nul().to_vec();
        // SAFETY: both buffers are NUL-terminated and outlive the call. They
        // are private copies, so a library writing through its `char *`
        // parameters cannot affect the subscription.
        unsafe {
            self.raw
                .sub_event(name.as_mut_ptr().cast(), category.as_mut_ptr().cast())
        }
    }

    pub fn subscribe_all<'s>(&mut self, subscriptions: impl IntoIterator<Item = &'s Subscription>) {
        for subscription in subscriptions {
            self.subscribe(subscription);
        }
    }

    pub fn stats(&self) -> ProbeStats {
        self.stats
    }

    pub fn backend(&self) -> &R {
        &self.raw
    }

    pub fn into_backend(self) -> R {
        self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libc::c_char;
    use std::{collections::VecDeque, ffi::CStr};

    #[derive(Default)]
    struct Scripted {
        inits: usize,
        reads: VecDeque<(c_int, usize)>,
        subs: Vec<(Vec<u8>, Vec<u8>)>,
    }

    impl RawProbe for Scripted {
        fn init_probe(&mut self) {
            self.inits += 1;
        }

        unsafe fn get_event(&mut self, slot: *mut *mut c_void) -> c_int {
            let (status, addr) = self.reads.pop_front().unwrap_or((0, 0));
            if addr != 0 {
                unsafe { *slot = addr as *mut c_void };
            }
            status
        }

        unsafe fn sub_event(&mut self, name: *mut c_char, category: *mut c_char) {
            let name = unsafe { CStr::from_ptr(name) }.to_bytes().to_vec();
            let category = unsafe { CStr::from_ptr(category) }.to_bytes().to_vec();
            self.subs.push((name, category));
        }
    }

    fn scripted(reads: &[(c_int, usize)]) -> Probe<Scripted> {
        Probe::init(Scripted {
            reads: reads.iter().copied().collect(),
            ..Default::default()
        })
    }

    #[test]
    fn second_claim_is_rejected() {
        static FLAG: AtomicBool = AtomicBool::new(false);
        assert!(claim_once(&FLAG).is_ok());
        assert!(matches!(
            claim_once(&FLAG),
            Err(ProbeError::AlreadyInitialized)
        ));
        assert!(matches!(
            claim_once(&FLAG),
            Err(ProbeError::AlreadyInitialized)
        ));
    }

    #[test]
    fn init_runs_backend_init_once() {
        let probe = scripted(&[]);
        assert_eq!(probe.backend().inits, 1);
    }

    #[test]
    fn next_event_maps_statuses() {
        let mut probe = scripted(&[(1, 0x1000), (0, 0), (-3, 0), (4, 0x2000), (2, 0)]);

        let event = probe.next_event().unwrap().unwrap();
        assert_eq!(event.as_ptr() as usize, 0x1000);
        assert_eq!(event.status(), 1);

        assert!(probe.next_event().unwrap().is_none());
        assert!(matches!(probe.next_event(), Err(ProbeError::Status(-3))));

        let event = probe.next_event().unwrap().unwrap();
        assert_eq!(event.as_ptr() as usize, 0x2000);
        assert_eq!(event.status(), 4);

        assert!(matches!(
            probe.next_event(),
            Err(ProbeError::NullEvent { status: 2 })
        ));

        assert_eq!(
            probe.stats(),
            ProbeStats {
                events: 2,
                empty_polls: 1,
                errors: 2,
            }
        );
    }

    #[test]
    fn poll_raw_passes_everything_through() {
        let mut probe = scripted(&[(i32::MIN, 0x10), (0, 0x20)]);
        assert_eq!(probe.poll_raw(), (i32::MIN, 0x10 as *mut c_void));
        // A zero status still surfaces whatever the backend wrote.
        assert_eq!(probe.poll_raw(), (0, 0x20 as *mut c_void));
        assert_eq!(probe.poll_raw(), (0, ptr::null_mut()));
        assert_eq!(probe.stats(), ProbeStats::default());
    }

    #[test]
    fn subscribe_forwards_identifiers() {
        let mut probe = scripted(&[]);
        let subs = [
            Subscription::new("syscall_exit-recvfrom", "net").unwrap(),
            Subscription::new("", "").unwrap(),
        ];
        probe.subscribe_all(&subs);
        assert_eq!(
            probe.into_backend().subs,
            vec![
                (b"syscall_exit-recvfrom".to_vec(), b"net".to_vec()),
                (vec![], vec![]),
            ]
        );
    }
}
