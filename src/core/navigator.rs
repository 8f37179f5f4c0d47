//! # Navigator
//!
//! Tracks the browsing position within the active deck.
//!
//! Position is a bounded linear index: `next` and `previous` saturate at
//! the ends instead of wrapping. Positions here are always 0-based; the
//! 1-based form only exists in addresses (see `core::route`).

use std::rc::Rc;

use log::debug;

use crate::core::deck::Deck;
use crate::core::item::{Item, ItemRef};

/// What the presentation layer needs to draw one card.
#[derive(Debug, Clone)]
pub struct ViewModel {
    pub item: ItemRef,
    /// 1-based.
    pub display_index: usize,
    pub total_count: usize,
}

#[derive(Debug)]
pub struct Navigator {
    deck: Deck,
    position: usize,
    placeholder: ItemRef,
}

impl Navigator {
    pub fn new(deck: Deck) -> Self {
        Self {
            deck,
            position: 0,
            placeholder: Rc::new(Item::placeholder()),
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.deck.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    fn last_index(&self) -> usize {
        self.deck.len().saturating_sub(1)
    }

    pub fn first(&mut self) {
        self.position = 0;
    }

    pub fn last(&mut self) {
        self.position = self.last_index();
    }

    pub fn next(&mut self) {
        self.position = (self.position + 1).min(self.last_index());
    }

    pub fn previous(&mut self) {
        self.position = self.position.saturating_sub(1);
    }

    pub fn goto_index(&mut self, index: usize) {
        self.position = index.min(self.last_index());
    }

    /// Hold the current position, pulled back inside the deck if it shrank.
    pub fn redraw(&mut self) {
        self.position = self.position.min(self.last_index());
    }

    /// Replace the active deck. Position is left as-is; follow with
    /// `redraw`.
    pub fn swap_deck(&mut self, deck: Deck) -> Deck {
        debug!(
            "Swapping deck: {} -> {} items",
            self.deck.len(),
            deck.len()
        );
        std::mem::replace(&mut self.deck, deck)
    }

    /// Mutable access for in-place deck operations (shuffle).
    pub fn deck_mut(&mut self) -> &mut Deck {
        &mut self.deck
    }

    /// Remove the item under the cursor. Position is left as-is; follow
    /// with `redraw`.
    pub fn remove_current(&mut self) -> Option<ItemRef> {
        self.deck.remove_at(self.position).ok()
    }

    /// Never fails: an empty deck yields the placeholder item.
    pub fn current_item(&self) -> ItemRef {
        match self.deck.at(self.position) {
            Ok(item) => item.clone(),
            Err(_) => self.placeholder.clone(),
        }
    }

    pub fn view_model(&self) -> ViewModel {
        ViewModel {
            item: self.current_item(),
            display_index: self.position + 1,
            total_count: self.deck.len(),
        }
    }
}
