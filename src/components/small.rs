use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::presenter::PresentationState;
use crate::theme::{self, Theme};

pub struct SmallWidget;

impl SmallWidget {
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

        let course_style = Style::default()
            .fg(state.display_color)
            .add_modifier(Modifier::BOLD);

        let mut lines = vec![countdown_line(state, theme), Line::from("")];
        if !state.uncategorized {
            lines.push(Line::from(Span::styled(
                state.course_code.clone(),
                course_style,
            )));
        }
        lines.push(Line::from(state.event_title.clone()));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            state.due_date_label.clone(),
            course_style,
        )));

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}

/// "3d 4hr" with the digits emphasized.
pub(super) fn countdown_line(state: &PresentationState, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(state.remaining_days.to_string(), theme.countdown),
        Span::raw("d "),
        Span::styled(state.remaining_hours.to_string(), theme.countdown),
        Span::raw("hr"),
    ])
}
