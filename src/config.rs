use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::snapshot::SharedStore;

const DEFAULT_REFRESH_MINUTES: u64 = 30;
const DEFAULT_LINK_SCHEME: &str = "upnext";

/// Runtime configuration, read from an optional `config.toml` under the
/// platform config dir. Every field has a hard default; a missing or broken
/// file never stops the widget from rendering.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the host app publishes the shared store.
    store_path: Option<PathBuf>,
    /// Snapshot reload cadence; the host's timeline refresh analog.
    refresh_minutes: Option<u64>,
    /// URI scheme of the host app's action links.
    link_scheme: Option<String>,
    /// Scope reads to one live-activity instance's prefixed keys.
    activity_id: Option<String>,
}

impl Config {
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        let Ok(content) = std::fs::read_to_string(&path) else {
            return Self::default();
        };
        toml::from_str(&content).unwrap_or_else(|err| {
            warn!(%err, path = %path.display(), "ignoring malformed config");
            Self::default()
        })
    }

    pub fn store_path(&self) -> PathBuf {
        self.store_path
            .clone()
            .or_else(SharedStore::default_path)
            .unwrap_or_else(|| PathBuf::from("widget.toml"))
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(60 * self.refresh_minutes.unwrap_or(DEFAULT_REFRESH_MINUTES))
    }

    pub fn link_scheme(&self) -> &str {
        self.link_scheme.as_deref().unwrap_or(DEFAULT_LINK_SCHEME)
    }

    pub fn activity_id(&self) -> Option<&str> {
        self.activity_id.as_deref()
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("upnext-tui").join("config.toml"))
}
