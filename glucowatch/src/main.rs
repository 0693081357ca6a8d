use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use glucowatch::{LogSink, Poller, SettingsStore};
use glucowatch_feed::FeedClient;
use glucowatch_types::{Thresholds, Unit};

#[derive(Parser, Debug)]
#[command(name = "glucowatch")]
#[command(about = "Polls a Nightscout-style glucose feed and raises threshold alerts")]
struct Args {
    /// Path to a settings file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Feed base URL (overrides the settings file)
    #[arg(long)]
    url: Option<String>,

    /// Display unit: mg/dL or mmol/L (overrides the settings file)
    #[arg(long)]
    unit: Option<Unit>,

    /// Start with polling switched off
    #[arg(long)]
    inactive: bool,

    /// Poll interval in seconds (overrides the settings file)
    #[arg(long)]
    interval: Option<u64>,

    /// Low glucose threshold in mg/dL
    #[arg(long, default_value = "80")]
    low: f64,

    /// High glucose threshold in mg/dL
    #[arg(long, default_value = "180")]
    high: f64,

    /// Delta at or above which the rising-fast alert fires, in mg/dL
    #[arg(long, default_value = "20")]
    delta_up: f64,

    /// Delta at or below which the falling-fast alert fires, in mg/dL
    #[arg(long, default_value = "-20", allow_hyphen_values = true)]
    delta_down: f64,

    /// Seconds without a new reading before data counts as stale
    #[arg(long, default_value = "600")]
    stale_after: u64,

    /// Minimum seconds between repeated alerts of one condition
    #[arg(long, default_value = "600")]
    cooldown: u64,
}

impl Args {
    fn thresholds(&self) -> Thresholds {
        Thresholds {
            delta_up: self.delta_up,
            delta_down: self.delta_down,
            high: self.high,
            low: self.low,
            stale_after: Duration::from_secs(self.stale_after),
            alert_cooldown: Duration::from_secs(self.cooldown),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("glucowatch=info")),
        )
        .init();

    let args = Args::parse();
    let thresholds = args.thresholds();

    let url = args.url.clone();
    let unit = args.unit;
    let inactive = args.inactive;
    let store = SettingsStore::load_with(args.config.as_deref(), move |settings| {
        if let Some(url) = &url {
            settings.url = url.clone();
        }
        if let Some(unit) = unit {
            settings.unit = unit;
        }
        if inactive {
            settings.active = false;
        }
    })?;

    let settings = store.settings();
    if settings.active && settings.url.is_empty() {
        warn!("no feed URL configured; every poll will fail until one is set");
    }
    let interval = Duration::from_secs(args.interval.unwrap_or(settings.interval_secs));

    let client = FeedClient::builder().build();
    let handle = Poller::builder(Box::new(client), store.config())
        .thresholds(thresholds)
        .interval(interval)
        .sink(Box::new(LogSink))
        .build()
        .start();

    let mut display = handle.display();
    info!(interval_secs = interval.as_secs(), "glucowatch started");

    // The store must outlive the poller: dropping it closes the
    // configuration channel. On unix, SIGHUP re-reads the settings file.
    #[cfg(unix)]
    spawn_reload_task(store);
    #[cfg(not(unix))]
    let _store = store;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,

            changed = display.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = display.borrow_and_update().clone();
                info!(style = state.style.css_class(), "{}", state.text);
            }
        }
    }

    info!("shutting down");
    handle.stop().await;
    Ok(())
}

#[cfg(unix)]
fn spawn_reload_task(mut store: SettingsStore) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let mut hangup = match signal(SignalKind::hangup()) {
            Ok(hangup) => hangup,
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGHUP handler");
                // Keep the store alive; dropping it closes the configuration channel
                std::future::pending::<()>().await;
                unreachable!()
            }
        };

        while hangup.recv().await.is_some() {
            info!("reloading settings");
            if let Err(e) = store.reload() {
                tracing::error!(error = %e, "settings reload failed");
            }
        }
    });
}
