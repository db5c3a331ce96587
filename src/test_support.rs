//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::fs;
use std::sync::{Mutex, MutexGuard};

use tempfile::TempDir;

use crate::core::directory::DirectoryListing;
use crate::core::state::SessionState;
use crate::tui::Canvas;

/// A temporary directory holding the given files.
pub fn fixture_dir(files: &[(&str, &[u8])]) -> TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    for (name, content) in files {
        fs::write(dir.path().join(name), content).expect("write fixture file");
    }
    dir
}

/// A listing of `count` entries named `entry_000`, `entry_001`, ...
pub fn listing_of(count: usize) -> DirectoryListing {
    DirectoryListing::from_names((0..count).map(|i| format!("entry_{i:03}")), usize::MAX)
}

pub fn listing_from(names: &[&str]) -> DirectoryListing {
    DirectoryListing::from_names(names.iter().copied(), usize::MAX)
}

/// A fresh session synced to `page_size` and `entry_count`, as if one frame
/// had already been drawn.
pub fn state_with(page_size: usize, entry_count: usize) -> SessionState {
    let mut state = SessionState::new();
    state.sync(page_size, entry_count);
    state.mark_drawn();
    state
}

pub fn test_canvas() -> Canvas<Vec<u8>> {
    Canvas::new(Vec::new())
}

/// Everything written to a test canvas, as text.
pub fn captured(canvas: Canvas<Vec<u8>>) -> String {
    String::from_utf8(canvas.into_inner()).expect("canvas output is UTF-8")
}

/// Serialises tests that touch process-wide terminal state or raise signals.
pub fn session_lock() -> MutexGuard<'static, ()> {
    static LOCK: Mutex<()> = Mutex::new(());
    LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
