use std::io::{self, Write};

use ratatui::layout::Rect;

use crate::tui::canvas::Canvas;

/// A piece of the screen that knows how to draw itself.
///
/// Components receive their data via props (struct fields) and render into
/// the region they are given. They own no terminal state; everything goes
/// through the [`Canvas`].
pub trait Component {
    /// Render the component into `area`.
    fn render<W: Write>(&self, canvas: &mut Canvas<W>, area: Rect) -> io::Result<()>;
}
