use std::io::{self, Write};

use chrono::NaiveDateTime;
use ratatui::layout::Rect;

use crate::tui::canvas::Canvas;
use crate::tui::component::Component;
use crate::tui::components::fit;

/// Bottom-left status line: `user YYYY-MM-DD HH:MM:SS page/pages  notice`.
pub struct StatusBar<'a> {
    pub user: &'a str,
    pub timestamp: &'a str,
    pub page: usize,
    pub page_count: usize,
    pub notice: Option<&'a str>,
}

impl StatusBar<'_> {
    pub fn text(&self) -> String {
        let mut text = format!(
            "{} {} {}/{}",
            self.user, self.timestamp, self.page, self.page_count
        );
        if let Some(notice) = self.notice {
            text.push_str("  ");
            text.push_str(notice);
        }
        text
    }
}

impl Component for StatusBar<'_> {
    fn render<W: Write>(&self, canvas: &mut Canvas<W>, area: Rect) -> io::Result<()> {
        canvas.print_at(area.x, area.y, &fit(&self.text(), usize::from(area.width)))
    }
}

/// Login name for display only.
pub fn login_name() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("LOGNAME"))
        .unwrap_or_else(|_| "?".to_string())
}

pub fn timestamp(now: NaiveDateTime) -> String {
    now.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_timestamp_is_zero_padded() {
        let now = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(7, 8, 9)
            .unwrap();
        assert_eq!(timestamp(now), "2024-03-05 07:08:09");
    }

    #[test]
    fn test_text_with_and_without_notice() {
        let mut bar = StatusBar {
            user: "archer",
            timestamp: "2024-03-05 07:08:09",
            page: 2,
            page_count: 3,
            notice: None,
        };
        assert_eq!(bar.text(), "archer 2024-03-05 07:08:09 2/3");
        bar.notice = Some("nothing to open");
        assert_eq!(bar.text(), "archer 2024-03-05 07:08:09 2/3  nothing to open");
    }
}
