//! # Raw Mode Session
//!
//! Raw keyboard mode is process-wide, so it is modelled as a single
//! capability: [`RawModeSession::acquire`] hands out the only handle, and the
//! terminal is restored when that handle is released or dropped, on panic,
//! or when a termination signal ends the loop.
//!
//! Restoration runs at most once per acquisition. `RAW_MODE_HELD` is the
//! single source of truth; whichever path swaps it back to `false` first
//! does the work.

use std::io::{self, Write, stdout};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::{info, warn};

use crate::tui::SessionError;
use crate::tui::canvas::Canvas;

static RAW_MODE_HELD: AtomicBool = AtomicBool::new(false);

/// Exclusive ownership of raw keyboard mode.
#[derive(Debug)]
pub struct RawModeSession {
    _private: (),
}

impl RawModeSession {
    pub fn acquire() -> Result<Self, SessionError> {
        if RAW_MODE_HELD.swap(true, Ordering::SeqCst) {
            return Err(SessionError::AlreadyHeld);
        }
        install_panic_hook();

        if let Err(err) = enable_raw_mode() {
            RAW_MODE_HELD.store(false, Ordering::SeqCst);
            return Err(SessionError::RawMode(err));
        }
        // From here on the handle exists, so any failure is cleaned up by Drop.
        let session = Self { _private: () };
        execute!(stdout(), EnterAlternateScreen, Hide).map_err(SessionError::RawMode)?;
        info!("Raw mode acquired");
        Ok(session)
    }

    /// Restores the terminal, writing the restore sequence to `out`.
    /// `clear_screen` wipes the screen first, which is what a normal quit
    /// wants; error exits leave it for inspection.
    pub fn release<W: Write>(self, out: &mut W, clear_screen: bool) {
        restore_terminal(out, clear_screen);
    }

    /// A handle that believes raw mode is on, without touching the terminal.
    #[cfg(test)]
    pub(crate) fn held_for_test() -> Self {
        RAW_MODE_HELD.store(true, Ordering::SeqCst);
        Self { _private: () }
    }
}

impl Drop for RawModeSession {
    fn drop(&mut self) {
        restore_terminal(&mut stdout(), false);
    }
}

/// Puts the terminal back the way it was. Returns `false` when there was
/// nothing to restore, i.e. another exit path already did it.
pub fn restore_terminal<W: Write>(out: &mut W, clear_screen: bool) -> bool {
    if !RAW_MODE_HELD.swap(false, Ordering::SeqCst) {
        return false;
    }
    if clear_screen {
        let mut canvas = Canvas::new(&mut *out);
        let _ = canvas.clear_screen().and_then(|_| canvas.flush());
    }
    let _ = execute!(out, Show, LeaveAlternateScreen);
    if let Err(err) = disable_raw_mode() {
        warn!("Failed to leave raw mode: {err}");
    }
    let _ = out.flush();
    info!("Terminal restored");
    true
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            restore_terminal(&mut stdout(), false);
            previous(panic_info);
        }));
    });
}

/// Records termination signals so the event loop can exit through the
/// normal release path. Registered before raw mode is entered.
pub struct SignalWatch {
    #[cfg(unix)]
    pending: std::sync::Arc<std::sync::atomic::AtomicUsize>,
    #[cfg(unix)]
    ids: Vec<signal_hook::SigId>,
}

impl SignalWatch {
    #[cfg(unix)]
    pub fn install() -> io::Result<Self> {
        use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGTERM};
        use std::sync::Arc;
        use std::sync::atomic::AtomicUsize;

        let pending = Arc::new(AtomicUsize::new(0));
        let mut ids = Vec::new();
        for signal in [SIGINT, SIGTERM, SIGHUP] {
            let value = usize::try_from(signal).map_err(io::Error::other)?;
            ids.push(signal_hook::flag::register_usize(
                signal,
                Arc::clone(&pending),
                value,
            )?);
        }
        Ok(Self { pending, ids })
    }

    #[cfg(not(unix))]
    pub fn install() -> io::Result<Self> {
        Ok(Self {})
    }

    /// The signal received since installation, if any.
    pub fn pending(&self) -> Option<i32> {
        #[cfg(unix)]
        {
            match self.pending.load(Ordering::SeqCst) {
                0 => None,
                signal => i32::try_from(signal).ok(),
            }
        }
        #[cfg(not(unix))]
        {
            None
        }
    }
}

impl Drop for SignalWatch {
    fn drop(&mut self) {
        #[cfg(unix)]
        for id in self.ids.drain(..) {
            signal_hook::low_level::unregister(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::session_lock;

    #[test]
    fn test_restore_runs_once_per_acquisition() {
        let _guard = session_lock();
        let mut out = Vec::new();
        RAW_MODE_HELD.store(true, Ordering::SeqCst);
        assert!(restore_terminal(&mut out, true));
        let first = String::from_utf8(out.clone()).unwrap();
        assert!(first.starts_with("\x1b[1;1H\x1b[J"), "{first:?}");
        assert!(first.contains("\x1b[?25h"));
        assert!(first.contains("\x1b[?1049l"));

        out.clear();
        assert!(!restore_terminal(&mut out, true));
        assert!(out.is_empty());
    }

    #[test]
    fn test_no_signal_pending_after_install() {
        let _guard = session_lock();
        let watch = SignalWatch::install().unwrap();
        assert_eq!(watch.pending(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_raised_signal_is_recorded() {
        use signal_hook::consts::signal::SIGTERM;

        let _guard = session_lock();
        let watch = SignalWatch::install().unwrap();
        signal_hook::low_level::raise(SIGTERM).unwrap();
        assert_eq!(watch.pending(), Some(SIGTERM));
    }
}
