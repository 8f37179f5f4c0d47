//! # TitleBar Component
//!
//! Top status bar: the current address and the latest status message.
//!
//! The address is the bookmarkable form of the quiz position, so it is
//! always on screen. Passing it to `--start` resumes at the same card.
//!
//! Conditional formatting, most specific first:
//!
//! 1. **Filtered + status**: `"Kanji Quiz [questions/2] filtered | Marked right"`
//! 2. **Status message**: `"Kanji Quiz [questions/2] | Marked right"`
//! 3. **Default**: `"Kanji Quiz [questions/2]"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Stateless: every field is a prop set by the parent each frame.
pub struct TitleBar {
    pub address: String,
    pub status_message: String,
    pub filtered: bool,
}

impl TitleBar {
    pub fn new(address: String, status_message: String, filtered: bool) -> Self {
        Self {
            address,
            status_message,
            filtered,
        }
    }

    fn text(&self) -> String {
        let mut text = format!("Kanji Quiz [{}]", self.address);
        if self.filtered {
            text.push_str(" filtered");
        }
        if !self.status_message.is_empty() {
            text.push_str(" | ");
            text.push_str(&self.status_message);
        }
        text
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(self.text(), Style::default().fg(Color::Cyan)));
        frame.render_widget(line, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(mut title_bar: TitleBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_title_bar_shows_address_and_status() {
        let text = rendered(TitleBar::new(
            "questions/3".to_string(),
            "Marked favorite".to_string(),
            false,
        ));
        assert!(text.contains("Kanji Quiz [questions/3]"));
        assert!(text.contains("Marked favorite"));
        assert!(!text.contains("filtered"));
    }

    #[test]
    fn test_title_bar_default_no_status() {
        let text = rendered(TitleBar::new("questions/1".to_string(), String::new(), false));
        assert!(text.contains("questions/1"));
        assert!(!text.contains('|'));
    }

    #[test]
    fn test_title_bar_flags_filtered_view() {
        let text = rendered(TitleBar::new("questions/1".to_string(), "x".to_string(), true));
        assert!(text.contains("[questions/1] filtered | x"));
    }
}
