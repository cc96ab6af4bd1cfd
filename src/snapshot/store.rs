use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;

use color_eyre::eyre::{Result, WrapErr};
use toml::{Table, Value};
use tracing::warn;

use super::event::{EventSnapshot, UpcomingEvent};

/// Read-only view over the snapshot the host app publishes.
///
/// Injected rather than global so the app can run against a fake source in
/// tests. Writes are the host's business; synchronization of concurrent host
/// writes is too.
pub trait SnapshotSource {
    fn load(&self) -> Result<EventSnapshot>;

    /// Opaque change marker. A different value than last time means the host
    /// rewrote the store and a reload is worth doing before the next
    /// scheduled tick.
    fn version(&self) -> Option<StoreVersion>;
}

/// Modification time + length of the backing file; compared, never read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreVersion(pub SystemTime, pub u64);

/// The shared key-value store: a flat TOML file the host scheduling app
/// writes into its shared data directory.
///
/// Plain widget snapshots live under unprefixed keys (`hasEvent`,
/// `courseCode`, ...). A live-activity instance additionally publishes the
/// same fields under `<activityId>_`-prefixed keys, plus `eventId` and
/// `currentDate`.
pub struct SharedStore {
    path: PathBuf,
    activity_id: Option<String>,
}

impl SharedStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            activity_id: None,
        }
    }

    /// Scope reads to one live-activity instance's prefixed keys.
    pub fn with_activity(mut self, activity_id: Option<String>) -> Self {
        self.activity_id = activity_id;
        self
    }

    /// Where the host app publishes the store by default.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("upnext").join("widget.toml"))
    }

    fn widget_snapshot(table: &Table) -> EventSnapshot {
        if !get_bool(table, "hasEvent").unwrap_or(false) {
            return EventSnapshot::None;
        }
        match read_event(table, "") {
            Some(event) => EventSnapshot::Upcoming(event),
            None => {
                warn!("store claims an upcoming event but required keys are missing");
                EventSnapshot::None
            }
        }
    }

    fn activity_snapshot(table: &Table, activity_id: &str) -> EventSnapshot {
        // Activity instances have no hasEvent flag; a complete key set is
        // the signal that the instance is live.
        let prefix = format!("{activity_id}_");
        match read_event(table, &prefix) {
            Some(event) => EventSnapshot::Upcoming(event),
            None => {
                warn!(activity_id, "no complete snapshot for activity instance");
                EventSnapshot::None
            }
        }
    }
}

impl SnapshotSource for SharedStore {
    fn load(&self) -> Result<EventSnapshot> {
        let raw = fs::read_to_string(&self.path)
            .wrap_err_with(|| format!("reading shared store {}", self.path.display()))?;
        let table: Table = raw
            .parse()
            .wrap_err_with(|| format!("shared store {} is not valid TOML", self.path.display()))?;

        Ok(match self.activity_id.as_deref() {
            Some(id) => Self::activity_snapshot(&table, id),
            None => Self::widget_snapshot(&table),
        })
    }

    fn version(&self) -> Option<StoreVersion> {
        let meta = fs::metadata(&self.path).ok()?;
        Some(StoreVersion(meta.modified().ok()?, meta.len()))
    }
}

fn read_event(table: &Table, prefix: &str) -> Option<UpcomingEvent> {
    let key = |name: &str| format!("{prefix}{name}");
    Some(UpcomingEvent {
        id: get_str(table, &key("eventId")),
        course_code: get_str(table, &key("courseCode"))?,
        title: get_str(table, &key("eventTitle"))?,
        color_hex: get_str(table, &key("courseColorHex"))?,
        due_epoch: get_epoch(table, &key("eventDueDate"))?,
        anchor_epoch: get_epoch(table, &key("currentDate")),
    })
}

fn get_bool(table: &Table, key: &str) -> Option<bool> {
    match table.get(key) {
        Some(Value::Boolean(b)) => Some(*b),
        _ => None,
    }
}

fn get_str(table: &Table, key: &str) -> Option<String> {
    match table.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    }
}

/// Epoch seconds; the host writes a double but integers are accepted too.
fn get_epoch(table: &Table, key: &str) -> Option<i64> {
    match table.get(key) {
        Some(Value::Float(f)) => Some(*f as i64),
        Some(Value::Integer(i)) => Some(*i),
        _ => None,
    }
}
