use crate::{EventHandle, Probe, ProbeError, ProbeStats, RawProbe};
use anyhow::{Context, Result, anyhow};
use crossbeam_channel::{Receiver, Sender, TryRecvError, bounded, select, unbounded};
use std::{
    thread::{self, JoinHandle},
    time::Duration,
};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchOptions {
    /// Sleep after a poll that found nothing. Zero spins.
    pub idle_backoff: Duration,
    /// Stop after this many error statuses in a row. `0` never stops.
    pub max_consecutive_errors: u32,
    /// `None` for an unbounded channel.
    pub channel_capacity: Option<usize>,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            idle_backoff: Duration::from_millis(10),
            max_consecutive_errors: 100,
            channel_capacity: Some(4096),
        }
    }
}

/// Why the polling thread stopped.
#[derive(Debug)]
pub enum WatcherExit {
    /// The watcher was stopped or dropped.
    Cancelled,
    /// Every receiver went away.
    ReceiverDropped,
    /// Too many consecutive errors; carries the last one.
    TooManyErrors(ProbeError),
}

/// Polls a [`Probe`] on a background thread and forwards decoded events.
///
/// Event handles never leave the polling thread: each one is turned into a
/// `T` by the decode closure right after it is read.
pub struct EventWatcher<T> {
    receiver: Receiver<T>,
    cancellation_token: Sender<()>,
    handle: JoinHandle<(WatcherExit, ProbeStats)>,
}

impl<T> std::ops::Deref for EventWatcher<T> {
    type Target = Receiver<T>;

    fn deref(&self) -> &Self::Target {
        &self.receiver
    }
}

impl<T: Send + 'static> EventWatcher<T> {
    pub fn spawn<R, F>(probe: Probe<R>, options: WatchOptions, decode: F) -> Result<Self>
    where
        R: RawProbe + Send + 'static,
        F: FnMut(EventHandle<'_>) -> T + Send + 'static,
    {
        let (sender, receiver) = match options.channel_capacity {
            Some(capacity) => bounded(capacity),
            None => unbounded(),
        };
        let (cancellation_token, cancellation_rx) = bounded::<()>(1);
        let handle = thread::Builder::new()
            .name("kindling-event-watcher".to_string())
            .spawn(move || poll_loop(probe, options, decode, sender, cancellation_rx))
            .context("spawn event watcher thread failed.")?;
        Ok(Self {
            receiver,
            cancellation_token,
            handle,
        })
    }

    /// Stops polling and waits for the thread, even while a send is blocked
    /// on a full channel. Undelivered events are discarded.
    pub fn stop(self) -> Result<(WatcherExit, ProbeStats)> {
        let Self {
            receiver,
            cancellation_token,
            handle,
        } = self;
        drop(cancellation_token);
        // Unblocks a sender waiting on a full channel.
        drop(receiver);
        handle
            .join()
            .map_err(|_| anyhow!("event watcher thread panicked."))
    }
}

fn poll_loop<R, T, F>(
    mut probe: Probe<R>,
    options: WatchOptions,
    mut decode: F,
    sender: Sender<T>,
    cancellation_rx: Receiver<()>,
) -> (WatcherExit, ProbeStats)
where
    R: RawProbe,
    F: FnMut(EventHandle<'_>) -> T,
{
    let mut consecutive_errors = 0;
    let exit = loop {
        match cancellation_rx.try_recv() {
            Ok(()) | Err(TryRecvError::Disconnected) => break WatcherExit::Cancelled,
            Err(TryRecvError::Empty) => {}
        }
        match probe.next_event() {
            Ok(Some(event)) => {
                consecutive_errors = 0;
                let item = decode(event);
                // A full channel must not keep cancellation out: receivers
                // cloned from the watcher can outlive it.
                let exit = select! {
                    send(sender, item) -> sent => sent.err().map(|_| WatcherExit::ReceiverDropped),
                    recv(cancellation_rx) -> _ => Some(WatcherExit::Cancelled),
                };
                if let Some(exit) = exit {
                    break exit;
                }
            }
            Ok(None) => {
                consecutive_errors = 0;
                if !options.idle_backoff.is_zero() {
                    thread::sleep(options.idle_backoff);
                }
            }
            Err(err) => {
                consecutive_errors += 1;
                warn!(%err, consecutive_errors, "probe read failed");
                if options.max_consecutive_errors != 0
                    && consecutive_errors >= options.max_consecutive_errors
                {
                    break WatcherExit::TooManyErrors(err);
                }
            }
        }
    };
    let stats = probe.stats();
    debug!(?exit, ?stats, "event watcher stopped");
    (exit, stats)
}
