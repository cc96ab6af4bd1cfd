/// One upcoming event as published by the host scheduling app.
///
/// `id` only ever feeds the mark-complete deep link; it is never parsed.
/// `anchor_epoch` is the live-activity start instant (`currentDate` in the
/// store), present only for activity-scoped snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct UpcomingEvent {
    pub id: Option<String>,
    /// Short label; empty means "uncategorized", which renders neutrally.
    pub course_code: String,
    pub title: String,
    /// Six hex digits, optionally `#`-prefixed. Validated at render time.
    pub color_hex: String,
    pub due_epoch: i64,
    pub anchor_epoch: Option<i64>,
}

/// What the shared store currently says. A store that claims an event but is
/// missing required fields is degraded to `None` instead of crashing.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EventSnapshot {
    #[default]
    None,
    Upcoming(UpcomingEvent),
}

impl EventSnapshot {
    pub fn has_event(&self) -> bool {
        matches!(self, Self::Upcoming(_))
    }

    pub fn event(&self) -> Option<&UpcomingEvent> {
        match self {
            Self::Upcoming(event) => Some(event),
            Self::None => None,
        }
    }
}
