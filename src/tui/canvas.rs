//! # Terminal Canvas
//!
//! The only place that produces terminal control output. Everything above
//! this layer talks in (column, row) positions, glyphs and plain text.
//!
//! Coordinates are 1-indexed, matching `ESC[row;colH`.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{Clear, ClearType};
use ratatui::layout::Rect;

/// Switches G0 to the DEC special graphics (line drawing) set.
const LINE_DRAWING_ON: &str = "\x1b(0";
/// Switches G0 back to US ASCII.
const LINE_DRAWING_OFF: &str = "\x1b(B";

/// The eleven VT100 line-drawing glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    BottomRight,
    TopRight,
    TopLeft,
    BottomLeft,
    Cross,
    Horizontal,
    /// `├`, joins a horizontal line to a vertical one on its left.
    TeeRight,
    /// `┤`
    TeeLeft,
    /// `┴`
    TeeUp,
    /// `┬`
    TeeDown,
    Vertical,
}

impl Glyph {
    /// Byte that renders as this glyph in the line-drawing set.
    pub const fn byte(self) -> u8 {
        match self {
            Glyph::BottomRight => 0x6a,
            Glyph::TopRight => 0x6b,
            Glyph::TopLeft => 0x6c,
            Glyph::BottomLeft => 0x6d,
            Glyph::Cross => 0x6e,
            Glyph::Horizontal => 0x71,
            Glyph::TeeRight => 0x74,
            Glyph::TeeLeft => 0x75,
            Glyph::TeeUp => 0x76,
            Glyph::TeeDown => 0x77,
            Glyph::Vertical => 0x78,
        }
    }
}

pub struct Canvas<W: Write> {
    out: W,
    highlighted: bool,
}

impl<W: Write> Canvas<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            highlighted: false,
        }
    }

    /// Moves the write position to 1-indexed (`col`, `row`).
    pub fn locate(&mut self, col: u16, row: u16) -> io::Result<()> {
        queue!(self.out, MoveTo(col.saturating_sub(1), row.saturating_sub(1)))
    }

    /// Emits one glyph, wrapped in line-drawing on/off so later text is
    /// unaffected.
    pub fn draw_glyph(&mut self, glyph: Glyph) -> io::Result<()> {
        queue!(
            self.out,
            Print(LINE_DRAWING_ON),
            Print(char::from(glyph.byte())),
            Print(LINE_DRAWING_OFF)
        )
    }

    pub fn glyph_at(&mut self, col: u16, row: u16, glyph: Glyph) -> io::Result<()> {
        self.locate(col, row)?;
        self.draw_glyph(glyph)
    }

    /// Horizontal line on `row` covering `from..=to`.
    pub fn horizontal_line(&mut self, row: u16, from: u16, to: u16) -> io::Result<()> {
        for col in from..=to {
            self.glyph_at(col, row, Glyph::Horizontal)?;
        }
        Ok(())
    }

    /// Vertical line in `col` covering `from..=to`.
    pub fn vertical_line(&mut self, col: u16, from: u16, to: u16) -> io::Result<()> {
        for row in from..=to {
            self.glyph_at(col, row, Glyph::Vertical)?;
        }
        Ok(())
    }

    /// Cursor to the origin, then erase the whole visible area.
    pub fn clear_screen(&mut self) -> io::Result<()> {
        queue!(self.out, MoveTo(0, 0), Clear(ClearType::FromCursorDown))
    }

    /// Blanks every cell of `area`.
    pub fn clear_region(&mut self, area: Rect) -> io::Result<()> {
        let blank = " ".repeat(usize::from(area.width));
        for row in area.top()..area.bottom() {
            self.locate(area.x, row)?;
            queue!(self.out, Print(&blank))?;
        }
        Ok(())
    }

    /// Selects the ACTIVE (reverse video) or INACTIVE (plain) attribute state.
    pub fn set_highlight(&mut self, active: bool) -> io::Result<()> {
        self.highlighted = active;
        let attribute = if active {
            Attribute::Reverse
        } else {
            Attribute::Reset
        };
        queue!(self.out, SetAttribute(attribute))
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Writes text at the current position. Control characters are replaced
    /// so text can never smuggle in escape sequences.
    pub fn print(&mut self, text: &str) -> io::Result<()> {
        if text.chars().any(char::is_control) {
            let safe: String = text
                .chars()
                .map(|c| if c.is_control() { '?' } else { c })
                .collect();
            queue!(self.out, Print(safe))
        } else {
            queue!(self.out, Print(text))
        }
    }

    pub fn print_at(&mut self, col: u16, row: u16, text: &str) -> io::Result<()> {
        self.locate(col, row)?;
        self.print(text)
    }

    /// Writes highlighted text, then drops back to INACTIVE.
    pub fn print_highlighted(&mut self, col: u16, row: u16, text: &str) -> io::Result<()> {
        self.locate(col, row)?;
        self.set_highlight(true)?;
        let result = self.print(text);
        self.set_highlight(false)?;
        result
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
