use std::io::{self, Write};

use ratatui::layout::Rect;

use crate::core::directory::EntryName;
use crate::tui::canvas::Canvas;
use crate::tui::component::Component;
use crate::tui::components::fit;

/// Entries of the current page, one per row, with the cursor row in the
/// ACTIVE highlight. The cursor may sit on a row with no entry.
pub struct FileList<'a> {
    pub entries: &'a [EntryName],
    /// 1-indexed row within the page.
    pub cursor: usize,
}

impl Component for FileList<'_> {
    fn render<W: Write>(&self, canvas: &mut Canvas<W>, area: Rect) -> io::Result<()> {
        let width = usize::from(area.width);
        for (slot, row) in (area.top()..area.bottom()).enumerate() {
            let name = self.entries.get(slot).map(EntryName::as_str).unwrap_or("");
            let text = fit(name, width);
            if slot + 1 == self.cursor {
                canvas.print_highlighted(area.x, row, &text)?;
            } else {
                canvas.print_at(area.x, row, &text)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{captured, listing_from, test_canvas};

    #[test]
    fn test_cursor_row_is_highlighted() {
        let listing = listing_from(&["a.txt", "b.txt", "c.txt"]);
        let list = FileList {
            entries: listing.entries(),
            cursor: 2,
        };
        let mut canvas = test_canvas();
        list.render(&mut canvas, Rect::new(3, 2, 6, 4)).unwrap();
        assert_eq!(
            captured(canvas),
            "\x1b[2;3Ha.txt \
             \x1b[3;3H\x1b[7mb.txt \x1b[0m\
             \x1b[4;3Hc.txt \
             \x1b[5;3H      "
        );
    }

    #[test]
    fn test_cursor_on_empty_slot_still_highlighted() {
        let listing = listing_from(&["a.txt"]);
        let list = FileList {
            entries: listing.entries(),
            cursor: 3,
        };
        let mut canvas = test_canvas();
        list.render(&mut canvas, Rect::new(3, 2, 4, 3)).unwrap();
        assert!(captured(canvas).ends_with("\x1b[4;3H\x1b[7m    \x1b[0m"));
    }

    #[test]
    fn test_long_names_are_cut_to_region() {
        let listing = listing_from(&["a_very_long_file_name.txt"]);
        let list = FileList {
            entries: listing.entries(),
            cursor: 0,
        };
        let mut canvas = test_canvas();
        list.render(&mut canvas, Rect::new(3, 2, 8, 1)).unwrap();
        assert_eq!(captured(canvas), "\x1b[2;3Ha_very_l");
    }
}
