use crate::{ProbeError, Subscription, WatchOptions};
use serde::Deserialize;
use std::{fs, path::Path, time::Duration};

/// Probe settings, usually read from a TOML file.
///
/// ```toml
/// idle_backoff_ms = 10
/// max_consecutive_errors = 100
/// channel_capacity = 4096
///
/// [[subscriptions]]
/// name = "syscall_exit-recvfrom"
/// category = "net"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProbeConfig {
    /// How long the watcher sleeps after a poll that found nothing.
    pub idle_backoff_ms: u64,
    /// Consecutive error statuses tolerated before the watcher gives up.
    /// `0` never gives up.
    pub max_consecutive_errors: u32,
    /// Capacity of the watcher channel. `0` means unbounded.
    pub channel_capacity: usize,
    pub subscriptions: Vec<SubscriptionConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubscriptionConfig {
    pub name: String,
    pub category: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            idle_backoff_ms: 10,
            max_consecutive_errors: 100,
            channel_capacity: 4096,
            subscriptions: Vec::new(),
        }
    }
}

impl ProbeConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ProbeError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProbeError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn idle_backoff(&self) -> Duration {
        Duration::from_millis(self.idle_backoff_ms)
    }

    pub fn subscriptions(&self) -> Result<Vec<Subscription>, ProbeError> {
        self.subscriptions
            .iter()
            .map(|sub| Subscription::new(sub.name.as_str(), sub.category.as_str()))
            .collect()
    }

    pub fn watch_options(&self) -> WatchOptions {
        WatchOptions {
            idle_backoff: self.idle_backoff(),
            max_consecutive_errors: self.max_consecutive_errors,
            channel_capacity: (self.channel_capacity != 0).then_some(self.channel_capacity),
        }
    }
}
