use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Terminal input the event loop cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiEvent {
    /// A printable keypress.
    Key(char),
    /// Ctrl+C. Raw mode delivers it as a key instead of SIGINT.
    Interrupt,
    Resize,
}

/// Poll for an event, blocking up to `timeout`. `Ok(None)` means the
/// timeout passed or the input was something the browser ignores.
pub fn poll_event(timeout: Duration) -> io::Result<Option<TuiEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    let event = event::read()?;
    log::debug!("Terminal event: {:?}", event);
    Ok(map_event(event))
}

pub fn map_event(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key) => map_key(key),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<TuiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::Interrupt),
        // Shift only changes the character; any other modifier makes it a
        // different key.
        (modifiers, KeyCode::Char(c)) if modifiers.difference(KeyModifiers::SHIFT).is_empty() => {
            Some(TuiEvent::Key(c))
        }
        _ => None,
    }
}
