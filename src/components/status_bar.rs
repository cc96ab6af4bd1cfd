use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::LayoutFamily;
use crate::theme;

pub struct StatusBar;

impl StatusBar {
    pub fn render(frame: &mut Frame, area: Rect, family: LayoutFamily, status_message: Option<&str>) {
        let w = area.width as usize;

        let left = format!(" {} ", family.label());

        // Show status message if present, otherwise width-aware key hints
        let right = if let Some(msg) = status_message {
            format!(" {} ", msg)
        } else if w >= 70 {
            " 1-4:Layout r:Refresh c:Complete ?:Help q:Quit".to_string()
        } else if w >= 40 {
            " 1-4:Layout r:Refresh q:Quit".to_string()
        } else {
            " q:Quit".to_string()
        };

        let padding = " ".repeat(w.saturating_sub(left.chars().count() + right.chars().count()));

        let line = Line::from(vec![
            Span::styled(left, theme::current().status),
            Span::styled(padding, theme::current().status),
            Span::styled(right, theme::current().status),
        ]);

        let bar = Paragraph::new(line).style(theme::current().status);
        frame.render_widget(bar, area);
    }
}
