//! # TUI Components
//!
//! The screen regions the browser draws every frame. All of them are
//! stateless: they receive their data as props and render into the `Rect`
//! the layout hands them.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── file_list.rs     (Entries of the current page, cursor row highlighted)
//! ├── logo.rs          (Name, version and hotkeys, upper right)
//! ├── preview_pane.rs  (Preview text or the reason there is none)
//! └── status_bar.rs    (User, clock, page indicator, notices)
//! ```
//!
//! Every component writes each row of its region padded to the full width,
//! so stale text from the previous frame never survives a redraw.

mod file_list;
mod logo;
mod preview_pane;
mod status_bar;

pub use file_list::FileList;
pub use logo::Logo;
pub use preview_pane::PreviewPane;
pub use status_bar::{StatusBar, login_name, timestamp};

use unicode_width::UnicodeWidthChar;

/// Cuts `text` to `width` display columns and pads it with spaces to exactly
/// that width. Control characters count as the `?` the canvas prints.
pub(crate) fn fit(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut used = 0;
    for ch in text.chars() {
        let ch = if ch.is_control() { '?' } else { ch };
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.extend(std::iter::repeat_n(' ', width - used));
    out
}
