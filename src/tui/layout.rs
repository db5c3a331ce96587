//! # Screen Layout
//!
//! Pure function of the terminal size. Recomputed every frame.
//!
//! ```text
//! col 1        split                     columns
//!  ┌─────────────┬──────────────────────────┐ row 1
//!  │ list        │        logo / help       │
//!  │             ├──────────────────────────┤ divider_row
//!  │             │ preview                  │
//!  │             │                          │
//!  ├─────────────┤                          │ rows - 3
//!  │ status      │                          │ rows - 2
//!  └─────────────┴──────────────────────────┘ rows - 1
//! ```
//!
//! All `Rect`s use 1-indexed terminal coordinates and cover the writable
//! interior of a region, never its border cells.

use std::io;

use ratatui::layout::Rect;
use thiserror::Error;

use crate::core::config::{MIN_COLUMNS, MIN_ROWS};
use crate::core::directory;

/// Column where list and status text start.
const TEXT_INSET: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalGeometry {
    pub rows: u16,
    pub columns: u16,
}

impl TerminalGeometry {
    pub fn new(columns: u16, rows: u16) -> Self {
        Self { rows, columns }
    }

    /// Size of the controlling terminal.
    pub fn query() -> io::Result<Self> {
        let (columns, rows) = crossterm::terminal::size()?;
        Ok(Self::new(columns, rows))
    }

    pub fn validated(self) -> Result<Self, LayoutError> {
        if self.rows < MIN_ROWS || self.columns < MIN_COLUMNS {
            return Err(LayoutError::TerminalTooSmall {
                columns: self.columns,
                rows: self.rows,
            });
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error(
        "Terminal Height/Width must be at least {MIN_COLUMNS}x{MIN_ROWS}\nBut yours is only {columns}x{rows}"
    )]
    TerminalTooSmall { columns: u16, rows: u16 },
    #[error("{0} region has no room")]
    EmptyRegion(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub geometry: TerminalGeometry,
    /// Outer border, including its border cells.
    pub outer: Rect,
    /// Column of the vertical divider.
    pub split_column: u16,
    /// Row of the upper-right divider.
    pub divider_row: u16,
    /// Row of the divider above the status bar.
    pub status_divider_row: u16,
    pub logo: Rect,
    pub list: Rect,
    pub status: Rect,
    pub preview: Rect,
    pub page_size: usize,
}

impl ScreenLayout {
    pub fn compute(geometry: TerminalGeometry, divider_row: u16) -> Result<Self, LayoutError> {
        let TerminalGeometry { rows, columns } = geometry.validated()?;
        let split_column = columns / 2;
        let bottom_row = rows - 1;
        let status_divider_row = rows - 3;

        let outer = Rect::new(1, 1, columns, bottom_row);

        let logo = Rect::new(
            split_column + 1,
            2,
            columns - split_column - 1,
            divider_row.saturating_sub(2),
        );
        // One slot more than a page so the cursor can sit on page_size + 1.
        let list = Rect::new(
            TEXT_INSET,
            2,
            split_column - TEXT_INSET,
            status_divider_row - 2,
        );
        let status = Rect::new(TEXT_INSET, rows - 2, split_column - TEXT_INSET, 1);
        let preview = Rect::new(
            split_column + 2,
            divider_row + 1,
            columns - split_column - 2,
            bottom_row.saturating_sub(divider_row + 1),
        );

        for (name, area) in [
            ("logo", logo),
            ("list", list),
            ("status", status),
            ("preview", preview),
        ] {
            if area.is_empty() {
                return Err(LayoutError::EmptyRegion(name));
            }
        }

        Ok(Self {
            geometry,
            outer,
            split_column,
            divider_row,
            status_divider_row,
            logo,
            list,
            status,
            preview,
            page_size: directory::page_size(rows),
        })
    }

    /// Column the logo lines are right-aligned against.
    pub fn logo_anchor(&self) -> u16 {
        self.split_column + self.split_column / 2
    }

    pub fn bottom_row(&self) -> u16 {
        self.outer.bottom() - 1
    }

    pub fn right_column(&self) -> u16 {
        self.outer.right() - 1
    }
}
