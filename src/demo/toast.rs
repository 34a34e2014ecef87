//! Toast notification component
//!
//! A non-blocking overlay that auto-dismisses after a configurable duration.
//! Renders in the bottom-right corner on top of all other content.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, BorderType, Clear, Paragraph},
    Frame,
};
use selectkit::StyleSheet;
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

/// Style class looked up for the toast; yellow when the sheet has none
const TOAST_CLASS: &str = "toast";

/// A toast notification that auto-dismisses
pub struct Toast {
    /// Message to display
    pub message: String,
    /// When the toast was created
    created_at: Instant,
    /// How long to show the toast
    duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            message: message.into(),
            created_at: Instant::now(),
            duration,
        }
    }

    /// Check if the toast has expired and should be removed
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }

    /// Render the toast in the bottom-right corner
    ///
    /// Uses `Clear` widget to ensure toast is visible on top of other content.
    pub fn render(&self, f: &mut Frame, area: Rect, sheet: &StyleSheet) {
        // 2 cells of padding plus the border on each side
        let text_width = u16::try_from(self.message.width()).unwrap_or(u16::MAX);
        let width = text_width
            .saturating_add(4)
            .min(area.width.saturating_sub(4));
        let height = 3; // 1 line of text + 2 for borders

        // Position: bottom-right corner, offset by 2 cells from edge
        let x = area.right().saturating_sub(width + 2);
        let y = area.bottom().saturating_sub(height + 2);
        let toast_area = Rect::new(x, y, width, height).intersection(area);

        let style = sheet
            .get(TOAST_CLASS)
            .unwrap_or_else(|| Style::default().fg(Color::Yellow));

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(style);

        let text = Paragraph::new(self.message.as_str())
            .alignment(Alignment::Center)
            .style(style)
            .block(block);

        // Clear the area first so toast appears on top
        f.render_widget(Clear, toast_area);
        f.render_widget(text, toast_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_toast_expiry() {
        assert!(Toast::new("gone", Duration::ZERO).is_expired());
        assert!(!Toast::new("stays", Duration::from_secs(60)).is_expired());
    }

    #[test]
    fn test_toast_renders_bottom_right() {
        let mut terminal = Terminal::new(TestBackend::new(30, 10)).unwrap();
        let toast = Toast::new("Picked", Duration::from_secs(1));

        terminal
            .draw(|f| toast.render(f, f.area(), &StyleSheet::default()))
            .unwrap();

        let buf = terminal.backend().buffer();
        // width 10, x = 30 - 12, y = 10 - 5
        assert_eq!(buf[(18, 5)].symbol(), "╭");
        let row: String = (18..28).map(|x| buf[(x, 6)].symbol()).collect();
        assert!(row.contains("Picked"));
        assert_eq!(buf[(18, 5)].fg, Color::Yellow);
    }

    #[test]
    fn test_toast_fits_tiny_area() {
        let mut terminal = Terminal::new(TestBackend::new(3, 2)).unwrap();
        let toast = Toast::new("A long message", Duration::from_secs(1));
        terminal
            .draw(|f| toast.render(f, f.area(), &StyleSheet::default()))
            .unwrap();
    }
}
