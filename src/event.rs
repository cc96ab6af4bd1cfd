use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};

/// Wait up to `timeout` for a key press. A `None` return is the idle tick
/// the refresh policy runs on; non-key terminal events are swallowed.
pub fn poll_key(timeout: Duration) -> color_eyre::Result<Option<KeyEvent>> {
    while event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            return Ok(Some(key));
        }
    }
    Ok(None)
}
