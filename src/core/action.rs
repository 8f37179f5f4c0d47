//! # Actions
//!
//! Everything that can happen in the quiz becomes an `Action`.
//! User presses →? That's `Action::Navigate("questions/next")`.
//! User marks a card? That's `Action::ToggleState(ReviewState::Favorite)`.
//!
//! The `update()` function applies an action to the `App` and returns an
//! `Effect` telling the adapter what to do next. No I/O here.
//!
//! ```text
//! State + Action  →  update()  →  Effect
//! ```
//!
//! `Effect::Render` means the position or deck changed: the adapter must
//! tear down its current card view and attach a fresh one to
//! `app.view_model()`. A state toggle only yields `Effect::None`; the card
//! view already observes its item and refreshes itself.

use log::{debug, info};

use crate::core::deck::FilterCriteria;
use crate::core::item::ReviewState;
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Dispatch an address (`questions/next`, `questions/7`, ...).
    Navigate(String),
    ToggleState(ReviewState),
    HideCurrent,
    ApplyFilter(FilterCriteria),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Render,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::Navigate(address) => match app.dispatch(&address) {
            Ok(view) => {
                app.status_message = format!("{} / {}", view.display_index, view.total_count);
                Effect::Render
            }
            Err(e) => {
                info!("Navigation rejected: {}", e);
                app.status_message = e.to_string();
                Effect::None
            }
        },
        Action::ToggleState(state) => {
            app.status_message = match app.toggle_current(state) {
                Some(ReviewState::Unset) => format!("Cleared {}", state),
                Some(now) => format!("Marked {}", now),
                None => "Nothing to mark".to_string(),
            };
            Effect::None
        }
        Action::HideCurrent => {
            app.status_message = match app.hide_current() {
                Some(item) => format!("Hid {}", item.front_text),
                None => "Nothing to hide".to_string(),
            };
            Effect::Render
        }
        Action::ApplyFilter(criteria) => {
            let view = app.apply_filter(criteria);
            app.status_message = format!("Filtered: {} of {}", view.total_count, app.root.len());
            Effect::Render
        }
        Action::Quit => Effect::Quit,
    }
}
