//! # Filter Panel Component
//!
//! Overlay for choosing which levels and review states to browse.
//! Opened with `o`, applied with Enter, dismissed with Esc.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `FilterPanelState` lives in `TuiState`
//! - `FilterPanel` is created each frame with borrowed state
//!
//! Rows are the deck's levels followed by the four states. Space toggles
//! the row under the cursor, `a` toggles every row in the same group.

use std::collections::BTreeSet;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding};

use crate::core::deck::FilterCriteria;
use crate::core::item::ReviewState;
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Row {
    Level(String),
    State(ReviewState),
}

/// Persistent state for the filter overlay.
pub struct FilterPanelState {
    rows: Vec<(Row, bool)>,
    pub selected: usize,
    pub list_state: ListState,
}

/// Events emitted by the filter panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    Apply(FilterCriteria),
    Dismiss,
}

impl FilterPanelState {
    /// `levels` is every level of the root deck. Rows start checked
    /// according to `current`, or all checked when no filter is active.
    pub fn new(levels: Vec<String>, current: Option<&FilterCriteria>) -> Self {
        let level_rows = levels.into_iter().map(|level| {
            let checked = current.is_none_or(|c| c.levels.contains(&level));
            (Row::Level(level), checked)
        });
        let state_rows = ReviewState::ALL.into_iter().map(|state| {
            let checked = current.is_none_or(|c| c.states.contains(&state));
            (Row::State(state), checked)
        });
        let rows: Vec<(Row, bool)> = level_rows.chain(state_rows).collect();

        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            rows,
            selected: 0,
            list_state,
        }
    }

    pub fn criteria(&self) -> FilterCriteria {
        let mut levels = BTreeSet::new();
        let mut states = BTreeSet::new();
        for (row, checked) in &self.rows {
            if !checked {
                continue;
            }
            match row {
                Row::Level(level) => {
                    levels.insert(level.clone());
                }
                Row::State(state) => {
                    states.insert(*state);
                }
            }
        }
        FilterCriteria { levels, states }
    }

    fn toggle_selected(&mut self) {
        if let Some((_, checked)) = self.rows.get_mut(self.selected) {
            *checked = !*checked;
        }
    }

    /// Check every row in the selected row's group, or clear them all if
    /// they were already all checked.
    fn toggle_group(&mut self) {
        let Some((anchor, _)) = self.rows.get(self.selected) else {
            return;
        };
        let is_level = matches!(anchor, Row::Level(_));
        let same_group = |row: &Row| matches!(row, Row::Level(_)) == is_level;
        let all_checked = self
            .rows
            .iter()
            .filter(|(row, _)| same_group(row))
            .all(|(_, checked)| *checked);
        for (row, checked) in self.rows.iter_mut() {
            if same_group(row) {
                *checked = !all_checked;
            }
        }
    }

    fn select(&mut self, index: usize) {
        self.selected = index;
        self.list_state.select(Some(index));
    }
}

impl EventHandler for FilterPanelState {
    type Event = FilterEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<FilterEvent> {
        match event {
            TuiEvent::Escape => Some(FilterEvent::Dismiss),
            TuiEvent::Submit => Some(FilterEvent::Apply(self.criteria())),
            TuiEvent::Up | TuiEvent::InputChar('k') => {
                self.select(self.selected.saturating_sub(1));
                None
            }
            TuiEvent::Down | TuiEvent::InputChar('j') => {
                self.select((self.selected + 1).min(self.rows.len().saturating_sub(1)));
                None
            }
            TuiEvent::InputChar(' ') => {
                self.toggle_selected();
                None
            }
            TuiEvent::InputChar('a') => {
                self.toggle_group();
                None
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the filter overlay.
pub struct FilterPanel<'a> {
    state: &'a mut FilterPanelState,
}

impl<'a> FilterPanel<'a> {
    pub fn new(state: &'a mut FilterPanelState) -> Self {
        Self { state }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(50, 70, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Filter ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" ␣ toggle  a all  Enter apply  Esc back ").centered())
            .padding(Padding::horizontal(1));

        let items: Vec<ListItem> = self
            .state
            .rows
            .iter()
            .enumerate()
            .map(|(i, (row, checked))| {
                let mark = if *checked { "[x]" } else { "[ ]" };
                let label = match row {
                    Row::Level(level) => format!("level {level}"),
                    Row::State(state) => format!("state {state}"),
                };
                let style = if i == self.state.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(mark, style),
                    Span::styled(" ", style),
                    Span::styled(label, style),
                ]))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}

/// Compute a centered rect using percentage of the outer rect.
pub fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
