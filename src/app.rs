use std::time::{Duration, Instant};

use chrono::Local;
use tracing::{debug, warn};

use crate::config::Config;
use crate::presenter::{self, PresentationState};
use crate::snapshot::{EventSnapshot, SnapshotSource, StoreVersion};

/// The closed set of widget surfaces, selected at runtime with `1`-`4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutFamily {
    Small,
    Medium,
    Rectangular,
    Inline,
}

impl LayoutFamily {
    pub fn label(self) -> &'static str {
        match self {
            LayoutFamily::Small => "[1]Small",
            LayoutFamily::Medium => "[2]Medium",
            LayoutFamily::Rectangular => "[3]Lock Screen",
            LayoutFamily::Inline => "[4]Inline",
        }
    }

    /// Fixed surface size the family renders into, centered on screen.
    pub fn viewport(self) -> (u16, u16) {
        match self {
            LayoutFamily::Small => (26, 12),
            LayoutFamily::Medium => (54, 10),
            LayoutFamily::Rectangular => (50, 9),
            LayoutFamily::Inline => (34, 3),
        }
    }
}

pub struct App {
    pub running: bool,
    pub layout: LayoutFamily,
    pub snapshot: EventSnapshot,
    pub status_message: Option<String>,
    pub show_help: bool,
    source: Box<dyn SnapshotSource>,
    link_scheme: String,
    refresh_interval: Duration,
    last_refresh: Instant,
    store_version: Option<StoreVersion>,
}

impl App {
    pub fn new(source: Box<dyn SnapshotSource>, config: &Config) -> Self {
        let mut app = Self {
            running: true,
            layout: LayoutFamily::Small,
            snapshot: EventSnapshot::None,
            status_message: None,
            show_help: false,
            source,
            link_scheme: config.link_scheme().to_string(),
            refresh_interval: config.refresh_interval(),
            last_refresh: Instant::now(),
            store_version: None,
        };
        app.refresh();
        app
    }

    /// Reload the snapshot from the shared store. An unreadable store
    /// degrades the surface to "no event"; it never brings the widget down.
    pub fn refresh(&mut self) {
        self.snapshot = match self.source.load() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!("shared store unreadable, rendering empty: {err:#}");
                EventSnapshot::None
            }
        };
        self.store_version = self.source.version();
        self.last_refresh = Instant::now();
        debug!(has_event = self.snapshot.has_event(), "snapshot refreshed");
    }

    /// The host-cadence analog: reload when the refresh interval elapses or
    /// when the store changed underneath us since the last load.
    pub fn maybe_refresh(&mut self) {
        if self.last_refresh.elapsed() >= self.refresh_interval
            || self.source.version() != self.store_version
        {
            self.refresh();
        }
    }

    /// Derive the presentation for this instant. Recomputed on every draw;
    /// nothing is cached between frames.
    pub fn presentation(&self) -> PresentationState {
        presenter::derive_presentation(&self.snapshot, Local::now())
    }

    /// The mark-complete deep link for the current event, if it carries an id.
    pub fn complete_link(&self) -> Option<String> {
        let event = self.snapshot.event()?;
        let id = event.id.as_deref()?;
        Some(presenter::complete_action_link(&self.link_scheme, id))
    }

    pub fn surface_complete_link(&mut self) {
        self.status_message = Some(match self.complete_link() {
            Some(link) => format!("Complete action: {link}"),
            None => "No completable event".to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::UpcomingEvent;
    use color_eyre::eyre::{eyre, Result};
    use pretty_assertions::assert_eq;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::SystemTime;

    #[derive(Default)]
    struct FakeSource {
        snapshot: RefCell<EventSnapshot>,
        version: Cell<u64>,
        fail: Cell<bool>,
        loads: Cell<u32>,
    }

    impl SnapshotSource for Rc<FakeSource> {
        fn load(&self) -> Result<EventSnapshot> {
            self.loads.set(self.loads.get() + 1);
            if self.fail.get() {
                return Err(eyre!("store offline"));
            }
            Ok(self.snapshot.borrow().clone())
        }

        fn version(&self) -> Option<StoreVersion> {
            Some(StoreVersion(SystemTime::UNIX_EPOCH, self.version.get()))
        }
    }

    fn upcoming() -> EventSnapshot {
        EventSnapshot::Upcoming(UpcomingEvent {
            id: Some("evt-42".into()),
            course_code: "COMP3121".into(),
            title: "Assignment 2".into(),
            color_hex: "#586CF5".into(),
            due_epoch: Local::now().timestamp() + 7_200,
            anchor_epoch: None,
        })
    }

    fn app_with(source: Rc<FakeSource>) -> App {
        App::new(Box::new(source), &Config::default())
    }

    #[test]
    fn loads_once_on_startup_then_waits_for_cadence() {
        let source = Rc::new(FakeSource::default());
        let mut app = app_with(source.clone());
        assert_eq!(source.loads.get(), 1);

        // Same version, interval not elapsed: quiet tick.
        app.maybe_refresh();
        assert_eq!(source.loads.get(), 1);
    }

    #[test]
    fn external_store_change_triggers_reload() {
        let source = Rc::new(FakeSource::default());
        let mut app = app_with(source.clone());

        *source.snapshot.borrow_mut() = upcoming();
        source.version.set(1);
        app.maybe_refresh();

        assert_eq!(source.loads.get(), 2);
        assert!(app.snapshot.has_event());
    }

    #[test]
    fn elapsed_interval_triggers_reload() {
        let source = Rc::new(FakeSource::default());
        let mut app = app_with(source.clone());

        app.refresh_interval = Duration::ZERO;
        app.maybe_refresh();
        assert_eq!(source.loads.get(), 2);
    }

    #[test]
    fn load_failure_degrades_to_no_event() {
        let source = Rc::new(FakeSource::default());
        *source.snapshot.borrow_mut() = upcoming();
        let mut app = app_with(source.clone());
        assert!(app.snapshot.has_event());

        source.fail.set(true);
        source.version.set(1);
        app.maybe_refresh();
        assert_eq!(app.snapshot, EventSnapshot::None);
        assert!(!app.presentation().has_event);
    }

    #[test]
    fn complete_link_needs_an_event_with_an_id() {
        let source = Rc::new(FakeSource::default());
        let mut app = app_with(source.clone());
        assert_eq!(app.complete_link(), None);

        *source.snapshot.borrow_mut() = upcoming();
        source.version.set(1);
        app.maybe_refresh();
        assert_eq!(
            app.complete_link().as_deref(),
            Some("upnext://action?name=complete&id=evt-42")
        );

        app.surface_complete_link();
        assert_eq!(
            app.status_message.as_deref(),
            Some("Complete action: upnext://action?name=complete&id=evt-42")
        );
    }
}
