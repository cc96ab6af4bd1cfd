use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::presenter::PresentationState;
use crate::theme;

/// The lock-screen / live-activity card: one-line event header, an absolute
/// countdown, the due label, an elapsed-window gauge, and the mark-complete
/// affordance with its deep link.
pub struct RectangularCard;

impl RectangularCard {
    pub fn render(frame: &mut Frame, area: Rect, state: &PresentationState, link: Option<&str>) {
        let theme = theme::current();

        let block = Block::default()
            .title(" Live Activity ")
            .title_style(theme.header)
            .borders(Borders::ALL)
            .border_style(theme.border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if !state.has_event {
            frame.render_widget(Paragraph::new("No Events").style(theme.dim), inner);
            return;
        }

        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

        let inner_w = inner.width as usize;

        let mut header = Vec::new();
        let mut title_budget = inner_w;
        if !state.uncategorized {
            header.push(Span::styled(
                state.course_code.clone(),
                Style::default()
                    .fg(state.display_color)
                    .add_modifier(Modifier::BOLD),
            ));
            header.push(Span::raw(" "));
            title_budget = title_budget.saturating_sub(state.course_code.len() + 1);
        }
        header.push(Span::raw(truncate(&state.event_title, title_budget)));
        frame.render_widget(Paragraph::new(Line::from(header)), rows[0]);

        frame.render_widget(
            Paragraph::new(Span::styled(
                format_hms(state.remaining_secs),
                theme.countdown,
            )),
            rows[1],
        );

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw("Til due at "),
                Span::styled(
                    state.due_date_label.clone(),
                    Style::default().fg(theme.accent),
                ),
            ])),
            rows[2],
        );

        if let Some(progress) = state.progress {
            let gauge = Gauge::default()
                .ratio(progress)
                .gauge_style(Style::default().fg(theme.accent))
                .use_unicode(true);
            frame.render_widget(gauge, rows[3]);
        }

        if let Some(link) = link {
            let line = Line::from(vec![
                Span::styled(
                    "[Complete] ",
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(truncate(link, inner_w.saturating_sub(11)), theme.dim),
            ]);
            frame.render_widget(Paragraph::new(line), rows[4]);
        }
    }
}

/// Absolute remaining time, hours unbounded: "25:04:01".
fn format_hms(secs: i64) -> String {
    let secs = secs.max(0);
    let hours = secs / 3_600;
    let minutes = (secs % 3_600) / 60;
    let seconds = secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let cut: String = s.chars().take(max - 3).collect();
        format!("{cut}...")
    } else {
        s.chars().take(max).collect()
    }
}
