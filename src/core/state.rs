//! # Application State
//!
//! Core quiz state. Domain logic only: no TUI types. Presentation state
//! lives in the `tui` module.
//!
//! ```text
//! App
//! ├── root: Deck                  // every non-hidden item, in shuffled order
//! ├── navigator: Navigator        // active (possibly filtered) deck + position
//! ├── dispatcher: RouteDispatcher // current address, history, shuffle RNG
//! ├── filter: Option<FilterCriteria>
//! ├── source: String              // where the seed came from
//! └── status_message: String      // status bar text
//! ```
//!
//! The three components are built here and passed to each other
//! explicitly; nothing is global. State changes go through
//! `update(app, action)` in action.rs.

use log::{info, warn};

use crate::core::config::ResolvedConfig;
use crate::core::deck::{Deck, FilterCriteria};
use crate::core::item::{ItemRef, ReviewState};
use crate::core::navigator::{Navigator, ViewModel};
use crate::core::route::{Route, RouteDispatcher, RouteError};
use crate::seed::SeedRecord;

pub struct App {
    pub root: Deck,
    pub navigator: Navigator,
    pub dispatcher: RouteDispatcher,
    /// Criteria behind the active view. `None` means the full root deck.
    pub filter: Option<FilterCriteria>,
    pub source: String,
    pub status_message: String,
}

impl App {
    pub fn new(root: Deck, dispatcher: RouteDispatcher, source: String) -> Self {
        let navigator = Navigator::new(root.clone());
        Self {
            root,
            navigator,
            dispatcher,
            filter: None,
            source,
            status_message: String::from("Welcome!"),
        }
    }

    /// Build the whole session from loaded seed records: shuffle once,
    /// apply the configured filter, then land on the start address.
    pub fn from_config(records: Vec<SeedRecord>, config: &ResolvedConfig, source: String) -> Self {
        let mut dispatcher = RouteDispatcher::with_seed(config.shuffle_seed);
        let root = Deck::load(records, dispatcher.rng());
        let mut app = Self::new(root, dispatcher, source);

        if let Some(filter) = &config.initial_filter {
            let criteria = filter.to_criteria(&app.root);
            app.apply_filter(criteria);
        }

        if let Err(e) = app.dispatch(&config.start_address) {
            warn!("Start address rejected ({}), starting at the first card", e);
            app.dispatch_route(Route::Start);
        }
        app
    }

    pub fn view_model(&self) -> ViewModel {
        self.navigator.view_model()
    }

    pub fn address(&self) -> &str {
        self.dispatcher.address()
    }

    pub fn dispatch(&mut self, address: &str) -> Result<ViewModel, RouteError> {
        let route: Route = address.parse()?;
        Ok(self.dispatch_route(route))
    }

    pub fn dispatch_route(&mut self, route: Route) -> ViewModel {
        if route == Route::Shuffle {
            self.filter = None;
        }
        self.dispatcher
            .dispatch_route(route, &mut self.navigator, &mut self.root)
    }

    /// Swap in the root items matching `criteria`, then redraw.
    pub fn apply_filter(&mut self, criteria: FilterCriteria) -> ViewModel {
        let view = self.root.filter(|item| criteria.matches(item));
        info!(
            "Filter levels={:?} states={:?}: {} of {} items",
            criteria.levels,
            criteria.states,
            view.len(),
            self.root.len()
        );
        self.navigator.swap_deck(view);
        self.filter = Some(criteria);
        self.dispatch_route(Route::Redraw)
    }

    /// Remove the displayed item from the active view and the root deck for
    /// the rest of the session, then redraw. The next item slides into
    /// place, or the previous one if the last item was hidden.
    pub fn hide_current(&mut self) -> Option<ItemRef> {
        let item = self.navigator.remove_current()?;
        self.root.remove(&item);
        info!("Hid item {} ({} left)", item.id, self.navigator.len());
        self.dispatch_route(Route::Redraw);
        Some(item)
    }

    /// Toggle the displayed item's state. `None` when there is nothing to
    /// annotate (empty view).
    pub fn toggle_current(&mut self, state: ReviewState) -> Option<ReviewState> {
        let item = self.navigator.current_item();
        if item.is_placeholder() {
            return None;
        }
        Some(item.toggle_state(state))
    }
}
