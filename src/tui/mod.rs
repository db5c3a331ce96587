//! # TUI Adapter
//!
//! The terminal-specific layer. Owns raw mode, draws frames through the
//! VT100 canvas, and translates keypresses into `core::action::Action`s.
//!
//! This is the only module that knows about crossterm and escape sequences.
//!
//! ## Frame Loop
//!
//! Single-threaded and synchronous. Each iteration:
//!
//! 1. re-query the terminal size and recompute the layout,
//! 2. re-read the working directory and clamp page/cursor against it,
//! 3. draw the frame,
//! 4. block up to `poll_interval` for one key and dispatch it.
//!
//! A frame is drawn even when no key arrives, which keeps the status-bar
//! clock ticking.

mod canvas;
mod component;
mod components;
mod event;
mod layout;
mod session;
mod ui;

pub use canvas::{Canvas, Glyph};
pub use component::Component;
pub use components::{FileList, Logo, PreviewPane, StatusBar};
pub use event::{TuiEvent, map_event};
pub use layout::{LayoutError, ScreenLayout, TerminalGeometry};
pub use session::{RawModeSession, SignalWatch, restore_terminal};
pub use ui::{FrameContext, draw_borders, draw_frame};

use std::io::{self, BufWriter, Write, stdout};
use std::path::Path;

use chrono::Local;
use log::{debug, info, warn};
use thiserror::Error;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::directory::{self, DirectoryListing, ListingHealth};
use crate::core::preview::{self, PreviewBounds};
use crate::core::state::SessionState;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error("cannot enter raw mode: {0}")]
    RawMode(#[source] io::Error),
    #[error("raw mode is already held by this process")]
    AlreadyHeld,
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl SessionError {
    pub fn is_terminal_too_small(&self) -> bool {
        matches!(
            self,
            SessionError::Layout(LayoutError::TerminalTooSmall { .. })
        )
    }
}

/// How the session ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The user pressed `q` or Ctrl+C.
    Quit,
    /// A termination signal arrived.
    Signalled(i32),
}

impl Exit {
    /// Process exit status: 0 for a quit, 128 + the signal number otherwise.
    pub fn status(self) -> u8 {
        match self {
            Exit::Quit => 0,
            Exit::Signalled(signal) => u8::try_from(128 + signal).unwrap_or(u8::MAX),
        }
    }
}

pub fn run(config: &ResolvedConfig) -> Result<Exit, SessionError> {
    // Size is checked before raw mode so the diagnostic lands on a sane terminal.
    let geometry = TerminalGeometry::query()?.validated()?;
    info!("Terminal is {}x{}", geometry.columns, geometry.rows);

    let signals = SignalWatch::install()?;
    let session = RawModeSession::acquire()?;

    let mut canvas = Canvas::new(BufWriter::new(stdout()));
    let result = event_loop(&mut canvas, config, &signals);
    drop(canvas);

    finish(session, &mut stdout(), &result);
    result
}

/// Hands the terminal back. Quits and signals clear the screen; failures
/// leave it for inspection.
fn finish<W: Write>(session: RawModeSession, out: &mut W, result: &Result<Exit, SessionError>) {
    match result {
        Ok(exit) => info!("Session ended: {:?}", exit),
        Err(err) => warn!("Session failed: {err}"),
    }
    session.release(out, result.is_ok());
}

fn event_loop<W: Write>(
    canvas: &mut Canvas<W>,
    config: &ResolvedConfig,
    signals: &SignalWatch,
) -> Result<Exit, SessionError> {
    let mut state = SessionState::new();
    let mut last_geometry = None;
    let mut last_health = ListingHealth::default();
    let user = components::login_name();

    loop {
        if let Some(signal) = signals.pending() {
            return Ok(Exit::Signalled(signal));
        }

        let geometry = TerminalGeometry::query()?;
        let layout = ScreenLayout::compute(geometry, config.divider_row)?;
        let listing = refresh_listing(&mut state, config.max_entries);
        report_listing_health(&mut last_health, &listing);
        state.sync(layout.page_size, listing.len());

        let timestamp = components::timestamp(Local::now().naive_local());
        let ctx = FrameContext {
            user: &user,
            timestamp: &timestamp,
            full_redraw: last_geometry != Some(geometry),
        };
        draw_frame(canvas, &layout, &state, &listing, &ctx)?;
        state.mark_drawn();
        last_geometry = Some(geometry);

        let action = match event::poll_event(config.poll_interval)? {
            Some(TuiEvent::Key(key)) => Action::from_key(key),
            Some(TuiEvent::Interrupt) => Action::Quit,
            Some(TuiEvent::Resize) | None => continue,
        };
        debug!("Dispatching {:?}", action);

        match update(&mut state, action, &listing) {
            Effect::Quit => return Ok(Exit::Quit),
            Effect::OpenPreview(entry) => {
                let bounds = PreviewBounds {
                    rows: usize::from(layout.preview.height),
                    columns: usize::from(layout.preview.width),
                };
                let outcome = preview::load_preview(
                    Path::new(entry.as_str()),
                    entry.as_str(),
                    config.preview_bytes,
                    bounds,
                );
                state.show_preview(entry, outcome);
            }
            Effect::None => {}
        }
    }
}

/// This frame's listing of the working directory. An unreadable directory
/// yields an empty listing and a status notice instead of an error.
fn refresh_listing(state: &mut SessionState, max_entries: usize) -> DirectoryListing {
    match directory::read_listing(Path::new("."), max_entries) {
        Ok(listing) => {
            state.directory_error = None;
            listing
        }
        Err(err) => {
            if state.directory_error.is_none() {
                warn!("{err}");
            }
            state.directory_error = Some("cannot read directory".to_string());
            DirectoryListing::default()
        }
    }
}

/// Warns when the set of skipped or capped entries changes, not on every
/// frame. Returns whether anything was logged.
fn report_listing_health(last: &mut ListingHealth, listing: &DirectoryListing) -> bool {
    let health = listing.health();
    if health == *last {
        return false;
    }
    *last = health;
    if health.is_degraded() {
        warn!(
            "Listing skips {} unusable names{}",
            health.rejected,
            if health.truncated {
                " and is capped at the entry limit"
            } else {
                ""
            }
        );
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{captured, listing_from, session_lock, test_canvas};

    #[test]
    fn test_exit_status() {
        assert_eq!(Exit::Quit.status(), 0);
        assert_eq!(Exit::Signalled(15).status(), 143);
        assert_eq!(Exit::Signalled(1).status(), 129);
    }

    #[cfg(unix)]
    #[test]
    fn test_pending_signal_ends_loop_before_drawing() {
        use signal_hook::consts::signal::SIGHUP;

        let _guard = session_lock();
        let signals = SignalWatch::install().unwrap();
        signal_hook::low_level::raise(SIGHUP).unwrap();

        let mut canvas = test_canvas();
        let result = event_loop(&mut canvas, &ResolvedConfig::default(), &signals);
        assert_eq!(result.unwrap(), Exit::Signalled(SIGHUP));
        assert!(captured(canvas).is_empty());
    }

    #[test]
    fn test_signalled_exit_restores_and_clears() {
        let _guard = session_lock();
        let session = RawModeSession::held_for_test();
        let mut out = Vec::new();
        finish(session, &mut out, &Ok(Exit::Signalled(15)));

        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("\x1b[1;1H\x1b[J"), "{out:?}");
        assert!(out.contains("\x1b[?25h"));
        assert!(out.contains("\x1b[?1049l"));
    }

    #[test]
    fn test_failed_session_restores_without_clearing() {
        let _guard = session_lock();
        let session = RawModeSession::held_for_test();
        let mut out = Vec::new();
        let failure = Err(SessionError::Io(io::Error::other("gone")));
        finish(session, &mut out, &failure);

        let out = String::from_utf8(out).unwrap();
        assert!(!out.contains("\x1b[J"), "{out:?}");
        assert!(out.contains("\x1b[?1049l"));
    }

    #[test]
    fn test_listing_health_reported_once_per_change() {
        let long = "x".repeat(crate::core::directory::MAX_NAME_BYTES + 1);
        let degraded = listing_from(&[long.as_str(), "a.txt"]);
        let clean = listing_from(&["a.txt"]);
        let mut last = ListingHealth::default();

        assert!(!report_listing_health(&mut last, &clean));
        assert!(report_listing_health(&mut last, &degraded));
        assert!(!report_listing_health(&mut last, &degraded));
        assert!(!report_listing_health(&mut last, &clean));
        assert!(report_listing_health(&mut last, &degraded));
    }
}
