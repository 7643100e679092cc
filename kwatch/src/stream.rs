#![cfg_attr(not(feature = "native"), allow(dead_code))]
use crossbeam_channel::{Receiver, RecvTimeoutError};
use std::{
    fmt::Debug,
    time::{Duration, Instant},
};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy)]
pub struct StreamOptions {
    pub limit: Option<u64>,
    pub stats_interval: Duration,
}

/// What kwatch keeps from an event handle. The event layout belongs to the
/// probe library, so only the address and status are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventSummary {
    pub addr: usize,
    pub status: i32,
}

/// Drains `receiver` until the limit is hit or the sender goes away,
/// reporting throughput every `stats_interval`. Returns the number of events
/// received.
pub fn stream_events<T: Debug>(receiver: &Receiver<T>, options: StreamOptions) -> u64 {
    let mut received = 0;
    let mut reported = 0;
    let mut last_time = Instant::now();
    loop {
        if options.limit.is_some_and(|limit| received >= limit) {
            break;
        }
        let wait = options.stats_interval.saturating_sub(last_time.elapsed());
        match receiver.recv_timeout(wait) {
            Ok(event) => {
                received += 1;
                debug!(?event, received, "probe event");
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
        if last_time.elapsed() >= options.stats_interval {
            info!(
                received,
                speed = (received - reported) as f32 / last_time.elapsed().as_secs_f32(),
                pending = receiver.len(),
                "event throughput (events/s)"
            );
            last_time = Instant::now();
            reported = received;
        }
    }
    received
}
