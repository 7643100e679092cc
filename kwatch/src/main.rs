mod stream;

use anyhow::{Context, Result};
use clap::Parser;
use kindling_sdk::{ProbeConfig, Subscription};
use std::{path::PathBuf, time::Duration};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Stream events from the kindling probe.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// TOML probe config.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Extra subscription, repeatable.
    #[arg(long = "sub", value_name = "NAME:CATEGORY")]
    subs: Vec<Subscription>,
    /// Stop after this many events.
    #[arg(long)]
    limit: Option<u64>,
    /// Seconds between throughput reports.
    #[arg(long, default_value_t = 5)]
    stats_interval: u64,
}

fn main() -> Result<()> {
    let builder = tracing_subscriber::fmt();
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        builder.with_env_filter(filter).init();
    } else {
        builder.with_max_level(LevelFilter::INFO).init();
    }

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ProbeConfig::load(path)
            .with_context(|| format!("Load probe config `{}` failed.", path.display()))?,
        None => ProbeConfig::default(),
    };
    let mut subscriptions = config
        .subscriptions()
        .context("Invalid subscription in config.")?;
    subscriptions.extend(cli.subs);

    let options = stream::StreamOptions {
        limit: cli.limit,
        stats_interval: Duration::from_secs(cli.stats_interval.max(1)),
    };
    run(&config, &subscriptions, options)
}

#[cfg(feature = "native")]
fn run(
    config: &ProbeConfig,
    subscriptions: &[Subscription],
    options: stream::StreamOptions,
) -> Result<()> {
    use kindling_sdk::{EventWatcher, Probe};
    use tracing::info;

    let mut probe = Probe::native().context("Initialize kindling probe failed.")?;
    probe.subscribe_all(subscriptions);
    info!(subscriptions = subscriptions.len(), "probe subscriptions applied");

    let watcher = EventWatcher::spawn(probe, config.watch_options(), |event| {
        stream::EventSummary {
            addr: event.as_ptr() as usize,
            status: event.status(),
        }
    })?;
    let received = stream::stream_events(&watcher, options);
    let (exit, stats) = watcher.stop()?;
    info!(received, ?exit, ?stats, "kwatch finished");
    Ok(())
}

#[cfg(not(feature = "native"))]
fn run(
    _config: &ProbeConfig,
    _subscriptions: &[Subscription],
    _options: stream::StreamOptions,
) -> Result<()> {
    anyhow::bail!(
        "kwatch was built without the probe library; rebuild with `--features native` and KINDLING_LIB_DIR set."
    )
}
