use chrono::{DateTime, Local, TimeZone};
use ratatui::style::Color;

use crate::snapshot::EventSnapshot;

/// Neutral fallback used when the color hex fails to parse or the event has
/// no course code ("uncategorized").
pub const NEUTRAL_GRAY: Color = Color::Gray;

const SECS_PER_DAY: i64 = 86_400;
const SECS_PER_HOUR: i64 = 3_600;

/// A remaining duration split into whole days and leftover whole hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockParts {
    pub days: i64,
    pub hours: i64,
}

/// Split a remaining duration into days and hours, truncating.
///
/// Negative input (overdue) clamps to zero here so every caller agrees:
/// `days * 86400 + hours * 3600 <= max(secs, 0) < days * 86400 + (hours + 1) * 3600`.
pub fn seconds_to_clock_parts(secs: i64) -> ClockParts {
    let secs = secs.max(0);
    let days = secs / SECS_PER_DAY;
    let hours = (secs - days * SECS_PER_DAY) / SECS_PER_HOUR;
    ClockParts { days, hours }
}

/// Resolve a `RRGGBB` hex string (optional leading `#`) to an RGB color.
///
/// Anything that isn't exactly six hex digits after trimming resolves to
/// [`NEUTRAL_GRAY`] rather than an error.
pub fn parse_hex_color(hex: &str) -> Color {
    let hex = hex.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return NEUTRAL_GRAY;
    }

    let byte = |s: &str| u8::from_str_radix(s, 16).unwrap_or(0);
    Color::Rgb(byte(&hex[0..2]), byte(&hex[2..4]), byte(&hex[4..6]))
}

/// Build the host deep link for the "mark complete" affordance.
///
/// The id is opaque; it is never parsed or validated here.
pub fn complete_action_link(scheme: &str, event_id: &str) -> String {
    format!("{scheme}://action?name=complete&id={event_id}")
}

/// Everything the layout families need to draw, derived fresh per render.
#[derive(Debug, Clone, PartialEq)]
pub struct PresentationState {
    pub has_event: bool,
    pub course_code: String,
    pub event_title: String,
    pub event_id: Option<String>,
    /// Clamped seconds until due; zero once overdue.
    pub remaining_secs: i64,
    pub remaining_days: i64,
    pub remaining_hours: i64,
    /// `HH:mm MMM d` in the local timezone.
    pub due_date_label: String,
    pub display_color: Color,
    /// Empty course code: the event renders neutrally regardless of its hex.
    pub uncategorized: bool,
    /// Elapsed fraction of the live-activity window, when an anchor exists.
    pub progress: Option<f64>,
}

impl PresentationState {
    pub fn empty() -> Self {
        Self {
            has_event: false,
            course_code: String::new(),
            event_title: String::new(),
            event_id: None,
            remaining_secs: 0,
            remaining_days: 0,
            remaining_hours: 0,
            due_date_label: String::new(),
            display_color: NEUTRAL_GRAY,
            uncategorized: false,
            progress: None,
        }
    }
}

/// Derive the presentation for one snapshot at one instant.
///
/// Pure and deterministic: no I/O, no clock reads, no caching. The caller
/// passes `now` (normally the refresh tick) and re-derives on every render.
pub fn derive_presentation(snapshot: &EventSnapshot, now: DateTime<Local>) -> PresentationState {
    let EventSnapshot::Upcoming(event) = snapshot else {
        return PresentationState::empty();
    };

    // A due instant chrono can't place in local time degrades to "no event"
    // rather than rendering garbage.
    let Some(due) = Local.timestamp_opt(event.due_epoch, 0).single() else {
        return PresentationState::empty();
    };

    let remaining_secs = (event.due_epoch - now.timestamp()).max(0);
    let parts = seconds_to_clock_parts(remaining_secs);

    let uncategorized = event.course_code.is_empty();
    let display_color = if uncategorized {
        NEUTRAL_GRAY
    } else {
        parse_hex_color(&event.color_hex)
    };

    let progress = event.anchor_epoch.and_then(|anchor| {
        let span = event.due_epoch - anchor;
        (span > 0).then(|| ((now.timestamp() - anchor) as f64 / span as f64).clamp(0.0, 1.0))
    });

    PresentationState {
        has_event: true,
        course_code: event.course_code.clone(),
        event_title: event.title.clone(),
        event_id: event.id.clone(),
        remaining_secs,
        remaining_days: parts.days,
        remaining_hours: parts.hours,
        due_date_label: due.format("%H:%M %b %-d").to_string(),
        display_color,
        uncategorized,
        progress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::UpcomingEvent;
    use pretty_assertions::assert_eq;

    fn event(due_epoch: i64) -> UpcomingEvent {
        UpcomingEvent {
            id: Some("evt-42".into()),
            course_code: "COMP3121".into(),
            title: "Assignment 2".into(),
            color_hex: "#586CF5".into(),
            due_epoch,
            anchor_epoch: None,
        }
    }

    fn upcoming(due_epoch: i64) -> EventSnapshot {
        EventSnapshot::Upcoming(event(due_epoch))
    }

    fn at(epoch: i64) -> DateTime<Local> {
        Local.timestamp_opt(epoch, 0).unwrap()
    }

    #[test]
    fn no_event_short_circuits() {
        let state = derive_presentation(&EventSnapshot::None, at(1_700_000_000));
        assert_eq!(state, PresentationState::empty());
        assert!(!state.has_event);
    }

    #[test]
    fn splits_days_and_hours_by_truncation() {
        // 90061 = 1 day + 1 hour + 61 seconds
        let now = 1_700_000_000;
        let state = derive_presentation(&upcoming(now + 90_061), at(now));
        assert_eq!(state.remaining_days, 1);
        assert_eq!(state.remaining_hours, 1);
        assert_eq!(state.remaining_secs, 90_061);
    }

    #[test]
    fn overdue_clamps_to_zero() {
        let now = 1_700_000_000;
        let state = derive_presentation(&upcoming(now - 5_000), at(now));
        assert_eq!(state.remaining_secs, 0);
        assert_eq!(state.remaining_days, 0);
        assert_eq!(state.remaining_hours, 0);
        assert!(state.has_event);
    }

    #[test]
    fn hex_parses_with_and_without_hash() {
        assert_eq!(parse_hex_color("#586CF5"), Color::Rgb(88, 108, 245));
        assert_eq!(parse_hex_color("586CF5"), Color::Rgb(88, 108, 245));
        assert_eq!(parse_hex_color("  #586cf5 "), Color::Rgb(88, 108, 245));
    }

    #[test]
    fn malformed_hex_falls_back_to_gray() {
        assert_eq!(parse_hex_color("bad"), NEUTRAL_GRAY);
        assert_eq!(parse_hex_color(""), NEUTRAL_GRAY);
        assert_eq!(parse_hex_color("#586CF5AA"), NEUTRAL_GRAY);
        assert_eq!(parse_hex_color("#58GCF5"), NEUTRAL_GRAY);
        // six bytes but not six hex digits
        assert_eq!(parse_hex_color("a\u{20ac}bc"), NEUTRAL_GRAY);
    }

    #[test]
    fn empty_course_code_overrides_valid_hex() {
        let now = 1_700_000_000;
        let mut event = event(now + 3_600);
        event.course_code.clear();
        let state = derive_presentation(&EventSnapshot::Upcoming(event), at(now));
        assert_eq!(state.display_color, NEUTRAL_GRAY);
        assert!(state.uncategorized);
    }

    #[test]
    fn clock_parts_agree_with_derivation() {
        let now = 1_700_000_000;
        for offset in [-999, 0, 59, 3_599, 3_600, 86_399, 86_400, 90_061, 1_234_567] {
            let state = derive_presentation(&upcoming(now + offset), at(now));
            let parts = seconds_to_clock_parts(offset);
            assert_eq!(parts.days, state.remaining_days, "offset {offset}");
            assert_eq!(parts.hours, state.remaining_hours, "offset {offset}");
        }
    }

    #[test]
    fn due_label_uses_local_clock_format() {
        let due = Local.with_ymd_and_hms(2026, 8, 4, 23, 59, 0).unwrap();
        let state = derive_presentation(&upcoming(due.timestamp()), at(due.timestamp() - 60));
        assert_eq!(state.due_date_label, "23:59 Aug 4");
    }

    #[test]
    fn progress_spans_anchor_to_due() {
        let now = 1_700_000_000;
        let mut event = event(now + 600);
        event.anchor_epoch = Some(now - 600);

        let state = derive_presentation(&EventSnapshot::Upcoming(event.clone()), at(now));
        assert_eq!(state.progress, Some(0.5));

        // Past due: pinned at 1.0, never beyond.
        let state = derive_presentation(&EventSnapshot::Upcoming(event.clone()), at(now + 5_000));
        assert_eq!(state.progress, Some(1.0));

        // Degenerate window (due before anchor) yields no gauge.
        event.anchor_epoch = Some(now + 9_000);
        let state = derive_presentation(&EventSnapshot::Upcoming(event), at(now));
        assert_eq!(state.progress, None);
    }

    #[test]
    fn builds_complete_action_link() {
        assert_eq!(
            complete_action_link("upnext", "evt-42"),
            "upnext://action?name=complete&id=evt-42"
        );
    }
}
