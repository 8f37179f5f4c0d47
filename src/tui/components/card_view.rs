//! # Card View Component
//!
//! Renders the current card from a `ViewModel`.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `CardViewState` lives in `TuiState` and is rebuilt on every
//!   navigation. It owns the `Subscription` on its item, so replacing it
//!   detaches the old observer.
//! - `CardView` is created each frame with borrowed state.
//!
//! The observer only refreshes one attribute, the state class, which
//! drives the colour of the front text and the state badge. Toggling a
//! state never rebuilds the view.

use std::cell::Cell;
use std::rc::Rc;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::core::item::{ItemId, Subscription};
use crate::core::navigator::ViewModel;
use crate::tui::component::Component;

const HELP: &str = " ←/→ move  f/r/w mark  x hide  ? hint  ␣ answer  s shuffle  o filter  : go  q quit ";

pub struct CardViewState {
    view: ViewModel,
    state_class: Rc<Cell<Option<&'static str>>>,
    pub show_hint: bool,
    pub show_answer: bool,
    _subscription: Subscription,
}

impl CardViewState {
    /// Attach a new presentation instance to `view.item`.
    pub fn attach(view: ViewModel) -> Self {
        let state_class = Rc::new(Cell::new(view.item.state_class()));
        let mirror = state_class.clone();
        let subscription = view
            .item
            .subscribe(move |state| mirror.set(state.state_class()));
        Self {
            view,
            state_class,
            show_hint: false,
            show_answer: false,
            _subscription: subscription,
        }
    }

    pub fn item_id(&self) -> ItemId {
        self.view.item.id
    }

    pub fn state_class(&self) -> Option<&'static str> {
        self.state_class.get()
    }

    pub fn toggle_hint(&mut self) {
        self.show_hint = !self.show_hint;
    }

    pub fn toggle_answer(&mut self) {
        self.show_answer = !self.show_answer;
    }
}

fn class_style(class: Option<&str>) -> Style {
    match class {
        Some("favorite") => Style::default().fg(Color::Yellow),
        Some("right") => Style::default().fg(Color::Green),
        Some("wrong") => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    }
}

/// Transient render wrapper for the card.
pub struct CardView<'a> {
    state: &'a CardViewState,
}

impl<'a> CardView<'a> {
    pub fn new(state: &'a CardViewState) -> Self {
        Self { state }
    }
}

impl Component for CardView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let view = &self.state.view;
        let class = self.state.state_class();
        let style = class_style(class);

        let block = Block::bordered()
            .title(format!(" {} / {} ", view.display_index, view.total_count))
            .title_bottom(Line::from(HELP).centered())
            .border_style(Style::default().fg(Color::DarkGray));

        if view.item.is_placeholder() {
            let empty = Paragraph::new("No cards in this view. Press o to change the filter or s to reshuffle everything.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let item = &view.item;
        let mut lines = vec![
            Line::from(Span::styled(
                item.front_text.clone(),
                style.add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(format!("level {}", item.level), Style::default().fg(Color::DarkGray)),
                Span::raw("  "),
                Span::styled(class.unwrap_or("-").to_string(), style),
            ]),
        ];
        if self.state.show_hint {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("hint: {}", item.hint),
                Style::default().fg(Color::Magenta),
            )));
        }
        if self.state.show_answer {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                item.back_text.clone(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )));
        }

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [content] = Layout::vertical([Constraint::Length(lines.len() as u16)])
            .flex(Flex::Center)
            .areas(inner);
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::item::ReviewState;
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(state: &CardViewState) -> String {
        let backend = TestBackend::new(100, 14);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| CardView::new(state).render(f, f.area()))
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
    fn test_attach_subscribes_and_drop_detaches() {
        let app = test_app(2);
        let view = app.view_model();
        let item = view.item.clone();

        let card = CardViewState::attach(view);
        assert_eq!(item.observer_count(), 1);

        drop(card);
        assert_eq!(item.observer_count(), 0);
    }

    #[test]
    fn test_state_class_follows_toggles() {
        let app = test_app(2);
        let card = CardViewState::attach(app.view_model());
        assert_eq!(card.state_class(), None);

        app.view_model().item.toggle_state(ReviewState::Wrong);
        assert_eq!(card.state_class(), Some("wrong"));
    }

    #[test]
    fn test_renders_front_and_position() {
        let app = test_app(3);
        let view = app.view_model();
        let front = view.item.front_text.clone();
        let text = rendered(&CardViewState::attach(view));
        assert!(text.contains(&front));
        assert!(text.contains("1 / 3"));
        assert!(!text.contains("hint:"));
    }

    #[test]
    fn test_reveals_hint_and_answer() {
        let app = test_app(1);
        let mut card = CardViewState::attach(app.view_model());
        card.toggle_hint();
        card.toggle_answer();
        let text = rendered(&card);
        assert!(text.contains("hint: hint 1"));
        assert!(text.contains("back 1"));
    }

    #[test]
    fn test_placeholder_renders_empty_notice() {
        let mut app = test_app(1);
        app.hide_current();
        let text = rendered(&CardViewState::attach(app.view_model()));
        assert!(text.contains("No cards in this view"));
    }
}
