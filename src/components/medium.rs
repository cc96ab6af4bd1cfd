use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::presenter::PresentationState;
use crate::theme;

use super::small::countdown_line;

/// Wide variant of the countdown widget: the clock block sits beside the
/// course/title column instead of above it.
pub struct MediumWidget;

impl MediumWidget {
    pub fn render(frame: &mut Frame, area: Rect, state: &PresentationState) {
        let theme = theme::current();

        let block = Block::default()
            .title(" Up Next ")
            .title_style(theme.header)
            .borders(Borders::ALL)
            .border_style(theme.border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if !state.has_event {
            frame.render_widget(Paragraph::new("No Events").style(theme.dim), inner);
            return;
        }

        let cols = Layout::horizontal([Constraint::Length(14), Constraint::Min(10)]).split(inner);

        let course_style = Style::default()
            .fg(state.display_color)
            .add_modifier(Modifier::BOLD);

        let clock = Paragraph::new(vec![
            Line::from(""),
            countdown_line(state, theme),
            Line::from(""),
            Line::from(Span::styled(state.due_date_label.clone(), course_style)),
        ]);
        frame.render_widget(clock, cols[0]);

        let mut detail = vec![Line::from("")];
        if !state.uncategorized {
            detail.push(Line::from(Span::styled(
                state.course_code.clone(),
                course_style,
            )));
        }
        detail.push(Line::from(state.event_title.clone()));
        frame.render_widget(Paragraph::new(detail).wrap(Wrap { trim: false }), cols[1]);
    }
}
