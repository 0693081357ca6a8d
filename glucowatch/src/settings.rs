//! Settings store - supplies [`PollConfig`] and change notifications.
//!
//! Settings come from an optional settings file layered under
//! `GLUCOWATCH_*` environment variables. The store re-emits the derived
//! [`PollConfig`] over a watch channel; the poller re-polls immediately
//! whenever the value changes.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use tokio::sync::watch;

use glucowatch_types::{PollConfig, Unit};

/// Raw settings as read from file and environment.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the glucose feed.
    pub url: String,
    /// Display unit: `"mg/dL"` or `"mmol/L"`.
    pub unit: Unit,
    /// Whether polling is switched on.
    pub active: bool,
    /// Poll interval in seconds.
    pub interval_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            url: String::new(),
            unit: Unit::MgPerDl,
            active: true,
            interval_secs: 60,
        }
    }
}

impl Settings {
    /// The poll configuration derived from these settings.
    pub fn poll_config(&self) -> PollConfig {
        PollConfig {
            url: self.url.clone(),
            unit: self.unit,
            active: self.active,
        }
    }
}

type Overrides = Box<dyn Fn(&mut Settings) + Send + Sync>;

/// Loads settings and publishes configuration changes.
pub struct SettingsStore {
    path: Option<PathBuf>,
    overrides: Overrides,
    settings: Settings,
    tx: watch::Sender<PollConfig>,
}

impl SettingsStore {
    /// Load settings from the given file (if any) and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, |_| {})
    }

    /// Load settings, applying `overrides` on top of every read.
    ///
    /// Overrides are retained and reapplied on [`SettingsStore::reload`],
    /// so command-line flags keep winning over the settings file.
    pub fn load_with(
        path: Option<&Path>,
        overrides: impl Fn(&mut Settings) + Send + Sync + 'static,
    ) -> Result<Self> {
        let mut settings = read_settings(path)?;
        overrides(&mut settings);
        let (tx, _) = watch::channel(settings.poll_config());
        Ok(Self {
            path: path.map(Path::to_path_buf),
            overrides: Box::new(overrides),
            settings,
            tx,
        })
    }

    /// The most recently loaded settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Subscribe to configuration changes.
    ///
    /// The receiver observes the current value immediately and every
    /// subsequent change.
    pub fn config(&self) -> watch::Receiver<PollConfig> {
        self.tx.subscribe()
    }

    /// Re-read the settings file and environment, notifying subscribers
    /// if the poll configuration changed.
    pub fn reload(&mut self) -> Result<()> {
        let mut settings = read_settings(self.path.as_deref())?;
        (self.overrides)(&mut settings);
        self.settings = settings;

        let fresh = self.settings.poll_config();
        self.tx.send_if_modified(|current| {
            if *current != fresh {
                *current = fresh;
                true
            } else {
                false
            }
        });
        Ok(())
    }

    /// Mutate the live poll configuration, notifying subscribers.
    pub fn update(&self, f: impl FnOnce(&mut PollConfig)) {
        self.tx.send_modify(f);
    }
}

impl std::fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsStore")
            .field("path", &self.path)
            .field("settings", &self.settings)
            .finish()
    }
}

fn read_settings(path: Option<&Path>) -> Result<Settings> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path));
    }
    let config = builder
        .add_source(Environment::with_prefix("GLUCOWATCH").try_parsing(true))
        .build()
        .context("failed to read settings")?;

    config.try_deserialize().context("invalid settings")
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn write_settings(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("glucowatch.toml");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn defaults_without_a_file() {
        let store = SettingsStore::load(None).unwrap();
        let settings = store.settings();
        assert_eq!(settings.unit, Unit::MgPerDl);
        assert!(settings.active);
        assert_eq!(settings.interval_secs, 60);
    }

    #[test]
    fn loads_from_toml_file() {
        let dir = TempDir::new().unwrap();
        let path = write_settings(
            &dir,
            r#"
url = "https://cgm.example.com/?token=abc"
unit = "mmol/L"
active = false
interval_secs = 30
"#,
        );

        let store = SettingsStore::load(Some(&path)).unwrap();
        let config = store.config().borrow().clone();
        assert_eq!(config.url, "https://cgm.example.com/?token=abc");
        assert_eq!(config.unit, Unit::MmolPerL);
        assert!(!config.active);
        assert_eq!(store.settings().interval_secs, 30);
    }

    #[test]
    fn overrides_win_over_the_file_and_survive_reload() {
        let dir = TempDir::new().unwrap();
        let path = write_settings(&dir, r#"url = "https://file.example.com""#);

        let mut store = SettingsStore::load_with(Some(&path), |s| {
            s.url = "https://flag.example.com".into();
        })
        .unwrap();
        assert_eq!(store.settings().url, "https://flag.example.com");

        store.reload().unwrap();
        assert_eq!(store.settings().url, "https://flag.example.com");
    }

    #[test]
    fn update_notifies_subscribers() {
        let store = SettingsStore::load(None).unwrap();
        let mut rx = store.config();
        rx.borrow_and_update();

        store.update(|c| c.active = false);

        assert!(rx.has_changed().unwrap());
        assert!(!rx.borrow_and_update().active);
    }

    #[test]
    fn reload_notifies_only_on_change() {
        let dir = TempDir::new().unwrap();
        let path = write_settings(&dir, r#"url = "https://one.example.com""#);

        let mut store = SettingsStore::load(Some(&path)).unwrap();
        let mut rx = store.config();
        rx.borrow_and_update();

        // Unchanged file: no notification
        store.reload().unwrap();
        assert!(!rx.has_changed().unwrap());

        write_settings(&dir, r#"url = "https://two.example.com""#);
        store.reload().unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().url, "https://two.example.com");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(SettingsStore::load(Some(&path)).is_err());
    }
}
