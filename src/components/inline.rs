use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::presenter::{seconds_to_clock_parts, PresentationState};
use crate::theme;

/// Accessory glyph: a single compact line, accent-colored.
pub struct InlineGlyph;

impl InlineGlyph {
    pub fn render(frame: &mut Frame, area: Rect, state: &PresentationState) {
        let theme = theme::current();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let line = if state.has_event {
            Line::from(vec![
                Span::styled("◷ ", Style::default().fg(theme.accent)),
                Span::styled(
                    glyph_label(state),
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                ),
            ])
        } else {
            Line::from(Span::styled("No Events", theme::DIM_STYLE))
        };
        frame.render_widget(Paragraph::new(line), inner);
    }
}

/// Compact remaining-time tag; the day part is dropped when it is zero.
///
/// Re-split from the same seconds the presenter used, so the glyph can never
/// drift from the widget's own day/hour figures.
pub fn glyph_label(state: &PresentationState) -> String {
    let parts = seconds_to_clock_parts(state.remaining_secs);
    if parts.days > 0 {
        format!("{}d {}h", parts.days, parts.hours)
    } else {
        format!("{}h", parts.hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn state_with(secs: i64) -> PresentationState {
        let parts = seconds_to_clock_parts(secs);
        let mut state = PresentationState::empty();
        state.has_event = true;
        state.remaining_secs = secs.max(0);
        state.remaining_days = parts.days;
        state.remaining_hours = parts.hours;
        state
    }

    #[test]
    fn drops_day_part_when_zero() {
        assert_eq!(glyph_label(&state_with(3 * 3_600 + 59)), "3h");
        assert_eq!(glyph_label(&state_with(90_061)), "1d 1h");
        assert_eq!(glyph_label(&state_with(0)), "0h");
    }

    #[test]
    fn glyph_agrees_with_presenter_fields() {
        for secs in [0, 59, 3_600, 86_399, 86_400, 90_061, 400_000] {
            let state = state_with(secs);
            let label = glyph_label(&state);
            if state.remaining_days > 0 {
                assert_eq!(
                    label,
                    format!("{}d {}h", state.remaining_days, state.remaining_hours)
                );
            } else {
                assert_eq!(label, format!("{}h", state.remaining_hours));
            }
        }
    }
}
