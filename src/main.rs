mod app;
mod components;
mod config;
mod event;
mod presenter;
mod snapshot;
mod theme;
mod tui;

use std::sync::Arc;
use std::time::Duration;

use app::{App, LayoutFamily};
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use tracing_subscriber::EnvFilter;

use config::Config;
use presenter::PresentationState;
use snapshot::SharedStore;

/// Key-poll timeout; doubles as the idle tick the refresh policy runs on.
const TICK: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    color_eyre::install()?;
    init_logging();

    let config = Config::load();
    let store = SharedStore::new(config.store_path())
        .with_activity(config.activity_id().map(str::to_string));
    let mut app = App::new(Box::new(store), &config);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app);
    tui::restore()?;
    result
}

/// Structured logging; RUST_LOG controls verbosity (default: info).
/// Stderr belongs to the TUI, so logs go to a file under the state dir.
/// Without a usable dir the widget simply runs unlogged.
fn init_logging() {
    let Some(dir) = dirs::state_dir().or_else(dirs::cache_dir) else {
        return;
    };
    let dir = dir.join("upnext-tui");
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = std::fs::File::create(dir.join("upnext-tui.log")) else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();

    tracing::info!("upnext-tui v{} starting", env!("CARGO_PKG_VERSION"));
}

fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    while app.running {
        app.maybe_refresh();

        // Derived fresh each frame; the presenter owns all the arithmetic.
        let state = app.presentation();
        let link = app.complete_link();

        terminal.draw(|frame| {
            let area = frame.area();

            // Main layout: content + status bar
            let layout = Layout::vertical([
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

            render_surface(frame, layout[0], app.layout, &state, link.as_deref());
            components::StatusBar::render(frame, layout[1], app.layout, app.status_message.as_deref());

            if app.show_help {
                render_help(frame, area);
            }
        })?;

        if let Some(key) = event::poll_key(TICK)? {
            // Clear status message on any key
            app.status_message = None;

            // Help overlay takes priority
            if app.show_help {
                if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
                    app.show_help = false;
                }
                continue;
            }

            handle_key(app, key.code, key.modifiers);
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match (code, modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.running = false;
        }
        (KeyCode::Char('1'), _) => app.layout = LayoutFamily::Small,
        (KeyCode::Char('2'), _) => app.layout = LayoutFamily::Medium,
        (KeyCode::Char('3'), _) => app.layout = LayoutFamily::Rectangular,
        (KeyCode::Char('4'), _) => app.layout = LayoutFamily::Inline,
        (KeyCode::Char('r'), _) => {
            app.refresh();
            app.status_message = Some("Snapshot refreshed".to_string());
        }
        (KeyCode::Char('c'), _) => app.surface_complete_link(),
        (KeyCode::Char('?'), _) => app.show_help = true,
        _ => {}
    }
}

/// Render the selected layout family into its fixed, centered surface.
fn render_surface(
    frame: &mut ratatui::Frame,
    area: Rect,
    family: LayoutFamily,
    state: &PresentationState,
    link: Option<&str>,
) {
    let (w, h) = family.viewport();
    let surface = centered(area, w, h);

    match family {
        LayoutFamily::Small => components::SmallWidget::render(frame, surface, state),
        LayoutFamily::Medium => components::MediumWidget::render(frame, surface, state),
        LayoutFamily::Rectangular => {
            components::RectangularCard::render(frame, surface, state, link)
        }
        LayoutFamily::Inline => components::InlineGlyph::render(frame, surface, state),
    }
}

fn centered(area: Rect, w: u16, h: u16) -> Rect {
    let w = w.min(area.width);
    let h = h.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

fn render_help(frame: &mut ratatui::Frame, area: Rect) {
    use ratatui::style::{Color, Modifier, Style};
    use ratatui::text::{Line, Span};
    use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

    let popup_w = area.width.min(46).max(28);
    let popup_h = area.height.min(14).max(8);
    let popup_area = centered(area, popup_w, popup_h);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Keybindings ")
        .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let desc_style = Style::default();

    let lines = vec![
        Line::from(vec![
            Span::styled("  1/2/3/4   ", key_style),
            Span::styled("Small / Medium / Lock Screen / Inline", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  r         ", key_style),
            Span::styled("Reload the shared store now", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  c         ", key_style),
            Span::styled("Show the mark-complete link", desc_style),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  q", key_style),
            Span::styled(" / ", theme::DIM_STYLE),
            Span::styled("Esc     ", key_style),
            Span::styled("Quit / close popup", desc_style),
        ]),
    ];

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(para, inner);
}
