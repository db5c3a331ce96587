//! # Session State
//!
//! Everything the browser remembers between frames, in one owned value that
//! the event loop passes explicitly to the reducer and the renderer.
//!
//! ```text
//! SessionState
//! ├── mode: Mode                    // Listing or Previewing
//! ├── current_page: usize           // 1-indexed, clamped to page_count
//! ├── cursor: usize                 // 1-indexed row within the page
//! ├── page_size: usize              // derived from terminal rows
//! ├── page_count: usize             // derived from entry count
//! ├── preview: Option<PreviewState> // shown file or load error
//! ├── notice: Option<String>        // transient status-bar message
//! ├── directory_error: Option<String>
//! ├── list_dirty: bool              // list region must be blanked
//! └── preview_dirty: bool           // preview region must be blanked
//! ```
//!
//! State changes only happen through `update()` in action.rs and through
//! `sync()` once per frame.

use crate::core::directory::{self, EntryName};
use crate::core::preview::{PreviewError, RenderedPreview};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Listing,
    Previewing,
}

/// A preview the user asked for, successful or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewState {
    pub source: EntryName,
    pub outcome: Result<RenderedPreview, PreviewError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub mode: Mode,
    pub current_page: usize,
    pub cursor: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub preview: Option<PreviewState>,
    pub notice: Option<String>,
    pub directory_error: Option<String>,
    pub list_dirty: bool,
    pub preview_dirty: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            mode: Mode::Listing,
            current_page: 1,
            cursor: 1,
            page_size: 1,
            page_count: 1,
            preview: None,
            notice: None,
            directory_error: None,
            list_dirty: true,
            preview_dirty: true,
        }
    }

    /// Re-derives pagination from this frame's geometry and entry count,
    /// pulling the page and cursor back into range if either shrank.
    pub fn sync(&mut self, page_size: usize, entry_count: usize) {
        let page_size = page_size.max(1);
        if page_size != self.page_size {
            self.page_size = page_size;
            self.list_dirty = true;
        }
        self.page_count = directory::page_count(entry_count, page_size);
        if self.current_page > self.page_count {
            self.current_page = self.page_count;
            self.cursor = 1;
            self.list_dirty = true;
        }
        self.current_page = self.current_page.max(1);
        self.cursor = self.cursor.clamp(1, self.max_cursor());
    }

    /// Highest cursor position reachable before moving down wraps to 1.
    pub fn max_cursor(&self) -> usize {
        self.page_size + 1
    }

    /// Absolute listing index under the cursor. Not bounds-checked; callers
    /// check it against the live entry count.
    pub fn selected_index(&self) -> usize {
        if self.current_page == 1 {
            self.cursor - 1
        } else {
            self.current_page * self.page_size - self.page_size + self.cursor - 1
        }
    }

    pub fn show_preview(&mut self, source: EntryName, outcome: Result<RenderedPreview, PreviewError>) {
        self.preview = Some(PreviewState { source, outcome });
        self.mode = Mode::Previewing;
        self.preview_dirty = true;
    }

    pub fn clear_preview(&mut self) {
        if self.preview.take().is_some() {
            self.preview_dirty = true;
        }
        self.mode = Mode::Listing;
    }

    /// Called after a frame has been drawn.
    pub fn mark_drawn(&mut self) {
        self.list_dirty = false;
        self.preview_dirty = false;
    }

    /// Text for the status bar's notice slot, directory errors first.
    pub fn status_notice(&self) -> Option<&str> {
        self.directory_error.as_deref().or(self.notice.as_deref())
    }
}
