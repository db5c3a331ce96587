use std::io::{self, Write};

use crate::core::directory::DirectoryListing;
use crate::core::state::SessionState;
use crate::tui::canvas::{Canvas, Glyph};
use crate::tui::component::Component;
use crate::tui::components::{FileList, Logo, PreviewPane, StatusBar};
use crate::tui::layout::ScreenLayout;

/// Per-frame values that come from outside the session state.
pub struct FrameContext<'a> {
    pub user: &'a str,
    pub timestamp: &'a str,
    /// Wipe the whole screen first (first frame, or the terminal was resized).
    pub full_redraw: bool,
}

/// Draws one complete frame and flushes it.
pub fn draw_frame<W: Write>(
    canvas: &mut Canvas<W>,
    layout: &ScreenLayout,
    state: &SessionState,
    listing: &DirectoryListing,
    ctx: &FrameContext<'_>,
) -> io::Result<()> {
    if ctx.full_redraw {
        canvas.clear_screen()?;
    }
    draw_borders(canvas, layout)?;

    Logo {
        anchor: layout.logo_anchor(),
    }
    .render(canvas, layout.logo)?;

    if state.list_dirty {
        canvas.clear_region(layout.list)?;
    }
    FileList {
        entries: listing.page(state.current_page, state.page_size),
        cursor: state.cursor,
    }
    .render(canvas, layout.list)?;

    StatusBar {
        user: ctx.user,
        timestamp: ctx.timestamp,
        page: state.current_page,
        page_count: state.page_count,
        notice: state.status_notice(),
    }
    .render(canvas, layout.status)?;

    if state.preview_dirty {
        canvas.clear_region(layout.preview)?;
    }
    PreviewPane {
        preview: state.preview.as_ref(),
    }
    .render(canvas, layout.preview)?;

    canvas.flush()
}

/// Outer frame, the vertical split, the upper-right divider and the status
/// divider, with tees wherever two lines meet.
pub fn draw_borders<W: Write>(canvas: &mut Canvas<W>, layout: &ScreenLayout) -> io::Result<()> {
    let left = layout.outer.x;
    let top = layout.outer.y;
    let right = layout.right_column();
    let bottom = layout.bottom_row();
    let split = layout.split_column;

    canvas.glyph_at(left, top, Glyph::TopLeft)?;
    canvas.horizontal_line(top, left + 1, right - 1)?;
    canvas.glyph_at(right, top, Glyph::TopRight)?;
    canvas.vertical_line(left, top + 1, bottom - 1)?;
    canvas.vertical_line(right, top + 1, bottom - 1)?;
    canvas.glyph_at(left, bottom, Glyph::BottomLeft)?;
    canvas.horizontal_line(bottom, left + 1, right - 1)?;
    canvas.glyph_at(right, bottom, Glyph::BottomRight)?;

    canvas.glyph_at(split, top, Glyph::TeeDown)?;
    canvas.vertical_line(split, top + 1, bottom - 1)?;
    canvas.glyph_at(split, bottom, Glyph::TeeUp)?;

    let divider = layout.divider_row;
    canvas.glyph_at(split, divider, Glyph::TeeRight)?;
    canvas.horizontal_line(divider, split + 1, right - 1)?;
    canvas.glyph_at(right, divider, Glyph::TeeLeft)?;

    let status = layout.status_divider_row;
    canvas.glyph_at(left, status, Glyph::TeeRight)?;
    canvas.horizontal_line(status, left + 1, split - 1)?;
    canvas.glyph_at(split, status, Glyph::TeeLeft)?;
    Ok(())
}
