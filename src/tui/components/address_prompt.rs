//! # Address Prompt Component
//!
//! One-line overlay for typing an address directly (`questions/12`,
//! `questions/last`, ...), the terminal stand-in for editing the URL bar.
//! Opened with `:`, pre-filled with the current address.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

pub struct AddressPromptState {
    pub buffer: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptEvent {
    Submit(String),
    Dismiss,
}

impl AddressPromptState {
    pub fn new(current_address: &str) -> Self {
        Self {
            buffer: current_address.to_string(),
        }
    }
}

impl EventHandler for AddressPromptState {
    type Event = PromptEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<PromptEvent> {
        match event {
            TuiEvent::Escape => Some(PromptEvent::Dismiss),
            TuiEvent::Submit => Some(PromptEvent::Submit(self.buffer.trim().to_string())),
            TuiEvent::Backspace => {
                self.buffer.pop();
                None
            }
            TuiEvent::InputChar(c) => {
                self.buffer.push(*c);
                None
            }
            _ => None,
        }
    }
}

/// Transient render wrapper, drawn over the bottom rows of `area`.
pub struct AddressPrompt<'a> {
    state: &'a AddressPromptState,
}

impl<'a> AddressPrompt<'a> {
    pub fn new(state: &'a AddressPromptState) -> Self {
        Self { state }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let height = 3.min(area.height);
        let prompt_area = Rect::new(area.x, area.bottom() - height, area.width, height);
        frame.render_widget(Clear, prompt_area);

        let block = Block::bordered()
            .title(" Go to ")
            .title_bottom(Line::from(" Enter go  Esc back ").right_aligned())
            .border_style(Style::default().fg(Color::Yellow));
        let prompt = Paragraph::new(format!("#{}", self.state.buffer)).block(block);
        frame.render_widget(prompt, prompt_area);

        // Cursor after the text, inside the border.
        let x = prompt_area.x + 2 + self.state.buffer.chars().count() as u16;
        if x < prompt_area.right().saturating_sub(1) && height == 3 {
            frame.set_cursor_position(Position::new(x, prompt_area.y + 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefilled_with_current_address() {
        let prompt = AddressPromptState::new("questions/4");
        assert_eq!(prompt.buffer, "questions/4");
    }

    #[test]
    fn test_editing_and_submit() {
        let mut prompt = AddressPromptState::new("questions/4");
        prompt.handle_event(&TuiEvent::Backspace);
        prompt.handle_event(&TuiEvent::InputChar('9'));
        assert_eq!(
            prompt.handle_event(&TuiEvent::Submit),
            Some(PromptEvent::Submit("questions/9".to_string()))
        );
    }

    #[test]
    fn test_escape_dismisses() {
        let mut prompt = AddressPromptState::new("");
        assert_eq!(prompt.handle_event(&TuiEvent::Escape), Some(PromptEvent::Dismiss));
        assert_eq!(prompt.handle_event(&TuiEvent::Left), None);
    }
}
