//! # Actions
//!
//! Every keypress becomes an `Action`. `s` is `Action::CursorDown`, `.` is
//! `Action::NextPage`, and so on.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state and returns an `Effect` describing the I/O the event loop still
//! has to perform (quitting, loading a preview). No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! | Key | Action | Effect on state |
//! |-----|--------|-----------------|
//! | `q` | Quit | none, loop exits |
//! | `s` | CursorDown | cursor + 1, wraps to 1 past `page_size + 1` |
//! | `w` | CursorUp | cursor - 1, stops at 1 |
//! | `o` | Open | preview the entry under the cursor |
//! | `.` | NextPage | page + 1 unless on the last page |
//! | `,` | PrevPage | page - 1 unless on the first page |

use log::{debug, warn};

use crate::core::directory::{DirectoryListing, EntryName};
use crate::core::state::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    CursorDown,
    CursorUp,
    Open,
    NextPage,
    PrevPage,
    Ignore,
}

impl Action {
    /// Maps a keypress to an action. Letters are case-insensitive.
    pub fn from_key(key: char) -> Self {
        match key.to_ascii_lowercase() {
            'q' => Action::Quit,
            's' => Action::CursorDown,
            'w' => Action::CursorUp,
            'o' => Action::Open,
            '.' => Action::NextPage,
            ',' => Action::PrevPage,
            _ => Action::Ignore,
        }
    }

    fn is_navigation(self) -> bool {
        matches!(
            self,
            Action::CursorDown | Action::CursorUp | Action::NextPage | Action::PrevPage
        )
    }
}

/// Work left for the event loop after `update()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    /// Load and show a preview of this entry.
    OpenPreview(EntryName),
}

pub fn update(state: &mut SessionState, action: Action, listing: &DirectoryListing) -> Effect {
    if action == Action::Ignore {
        return Effect::None;
    }
    state.notice = None;
    if action.is_navigation() {
        state.clear_preview();
    }

    match action {
        Action::Quit => Effect::Quit,
        Action::CursorDown => {
            state.cursor += 1;
            if state.cursor > state.max_cursor() {
                state.cursor = 1;
            }
            Effect::None
        }
        Action::CursorUp => {
            state.cursor = state.cursor.saturating_sub(1).max(1);
            Effect::None
        }
        Action::NextPage => {
            if state.current_page < state.page_count {
                state.current_page += 1;
                state.cursor = 1;
                state.list_dirty = true;
            }
            Effect::None
        }
        Action::PrevPage => {
            if state.current_page > 1 {
                state.current_page -= 1;
                state.cursor = 1;
                state.list_dirty = true;
            }
            Effect::None
        }
        Action::Open => {
            let index = state.selected_index();
            match listing.get(index) {
                Some(entry) => {
                    debug!("Opening entry {index}: {entry}");
                    Effect::OpenPreview(entry.clone())
                }
                None => {
                    warn!(
                        "Selection {index} out of range ({} entries), ignoring open",
                        listing.len()
                    );
                    state.notice = Some("nothing to open".into());
                    Effect::None
                }
            }
        }
        Action::Ignore => Effect::None,
    }
}
