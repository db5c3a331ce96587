use std::io::{self, Write};

use ratatui::layout::Rect;

use crate::core::preview::PreviewError;
use crate::core::state::PreviewState;
use crate::tui::canvas::Canvas;
use crate::tui::component::Component;
use crate::tui::components::fit;

/// Preview text, or an inline message saying why there is none. Blank when
/// nothing has been opened.
pub struct PreviewPane<'a> {
    pub preview: Option<&'a PreviewState>,
}

impl PreviewPane<'_> {
    pub fn lines(&self) -> Vec<String> {
        let Some(preview) = self.preview else {
            return Vec::new();
        };
        match &preview.outcome {
            Ok(rendered) if rendered.lines.is_empty() => vec!["(empty file)".to_string()],
            Ok(rendered) => rendered.lines.clone(),
            Err(PreviewError::NotFound { name, reason }) => {
                vec![format!("Cannot open {name}"), reason.clone()]
            }
            Err(PreviewError::NotRegular { name, kind }) => {
                vec![format!("Cannot preview {name}"), format!("Not a regular file: {kind}")]
            }
            Err(PreviewError::BinaryContent { name, kind, .. }) => {
                let mut lines = vec![
                    "Cannot preview binary file".to_string(),
                    name.clone(),
                ];
                if let Some(kind) = kind {
                    lines.push(format!("Type: {kind}"));
                }
                lines
            }
        }
    }
}

impl Component for PreviewPane<'_> {
    fn render<W: Write>(&self, canvas: &mut Canvas<W>, area: Rect) -> io::Result<()> {
        let lines = self.lines();
        let width = usize::from(area.width);
        for (slot, row) in (area.top()..area.bottom()).enumerate() {
            let text = lines.get(slot).map(String::as_str).unwrap_or("");
            canvas.print_at(area.x, row, &fit(text, width))?;
        }
        Ok(())
    }
}
