use std::io::{self, Write};

use ratatui::layout::Rect;

use crate::tui::canvas::Canvas;
use crate::tui::component::Component;

/// Name and version, author, and hotkey summary, each line right-aligned
/// against `anchor` and clipped to the region.
pub struct Logo {
    pub anchor: u16,
}

impl Logo {
    pub fn lines() -> [String; 4] {
        [
            format!("Telecommander v{}", env!("CARGO_PKG_VERSION")),
            format!("by {}", env!("CARGO_PKG_AUTHORS").replace(':', ", ")),
            "Usage:".to_string(),
            "w/s o , . q".to_string(),
        ]
    }
}

impl Component for Logo {
    fn render<W: Write>(&self, canvas: &mut Canvas<W>, area: Rect) -> io::Result<()> {
        for (line, row) in Self::lines().iter().zip(area.top()..area.bottom()) {
            let len = u16::try_from(line.len()).unwrap_or(u16::MAX);
            let col = self.anchor.saturating_sub(len).max(area.x);
            let room = usize::from(area.right().saturating_sub(col));
            let visible: String = line.chars().take(room).collect();
            canvas.print_at(col, row, &visible)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{captured, test_canvas};

    #[test]
    fn test_lines_end_at_anchor() {
        let mut canvas = test_canvas();
        Logo { anchor: 75 }
            .render(&mut canvas, Rect::new(51, 2, 49, 4))
            .unwrap();
        let out = captured(canvas);
        assert!(out.contains("\x1b[3;66Hby archer"), "{out}");
        assert!(out.contains("\x1b[4;69HUsage:"), "{out}");
        assert!(out.contains("\x1b[5;64Hw/s o , . q"), "{out}");
    }

    #[test]
    fn test_short_region_drops_lines() {
        let mut canvas = test_canvas();
        Logo { anchor: 75 }
            .render(&mut canvas, Rect::new(51, 2, 49, 1))
            .unwrap();
        let out = captured(canvas);
        assert!(out.contains("Telecommander v"));
        assert!(!out.contains("by archer"));
    }
}
