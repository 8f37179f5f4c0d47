//! # Decks
//!
//! An ordered, de-duplicated collection of shared items.
//!
//! The root deck is built once from the seed records. Filters derive new
//! decks from it; shuffle and remove act in place on whichever deck is
//! active. Items are `Rc`-shared, so derived decks see the same annotation
//! state as the root.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::rc::Rc;

use log::{debug, info, warn};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::core::item::{Item, ItemId, ItemRef, ReviewState};
use crate::seed::SeedRecord;

/// Out-of-bounds access on a deck. A programmer error: the navigator clamps
/// every position before reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexError {
    pub index: usize,
    pub len: usize,
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "index {} out of bounds for deck of length {}", self.index, self.len)
    }
}

impl std::error::Error for IndexError {}

#[derive(Debug, Clone, Default)]
pub struct Deck {
    items: Vec<ItemRef>,
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a deck from shared items. Later duplicates of an identity are
    /// dropped.
    pub fn from_items(items: impl IntoIterator<Item = ItemRef>) -> Self {
        let mut seen = HashSet::new();
        let items = items
            .into_iter()
            .filter(|item| {
                let fresh = seen.insert(item.id);
                if !fresh {
                    warn!("Dropping duplicate item {} from deck", item.id);
                }
                fresh
            })
            .collect();
        Self { items }
    }

    /// Convert seed records into items (ids assigned 1.. in seed order) and
    /// randomize their order once.
    pub fn load<R: Rng + ?Sized>(records: Vec<SeedRecord>, rng: &mut R) -> Self {
        let mut deck = Self::from_items(records.into_iter().enumerate().map(|(i, record)| {
            Rc::new(Item::new(
                ItemId(i as u32 + 1),
                record.level,
                record.front_text,
                record.back_text,
                record.hint,
            ))
        }));
        deck.shuffle(rng);
        info!("Loaded deck with {} items", deck.len());
        deck
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn at(&self, index: usize) -> Result<&ItemRef, IndexError> {
        self.items.get(index).ok_or(IndexError {
            index,
            len: self.items.len(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemRef> {
        self.items.iter()
    }

    pub fn contains(&self, item: &Item) -> bool {
        self.position_of(item).is_some()
    }

    pub fn position_of(&self, item: &Item) -> Option<usize> {
        self.items.iter().position(|candidate| candidate.id == item.id)
    }

    /// New deck holding every item matching `predicate`, in this deck's
    /// relative order. `self` is untouched.
    pub fn filter(&self, predicate: impl Fn(&Item) -> bool) -> Deck {
        Deck {
            items: self
                .items
                .iter()
                .filter(|item| predicate(item))
                .cloned()
                .collect(),
        }
    }

    /// Uniform in-place permutation.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.items.shuffle(rng);
        debug!("Shuffled deck of {} items", self.items.len());
    }

    /// Remove one item by identity. Returns it if it was present.
    pub fn remove(&mut self, item: &Item) -> Option<ItemRef> {
        let index = self.position_of(item)?;
        Some(self.items.remove(index))
    }

    pub(crate) fn remove_at(&mut self, index: usize) -> Result<ItemRef, IndexError> {
        if index >= self.items.len() {
            return Err(IndexError {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Distinct level tags, numeric tags first in numeric order, then the
    /// rest lexically.
    pub fn levels(&self) -> Vec<String> {
        let distinct: BTreeSet<&str> = self.items.iter().map(|item| item.level.as_str()).collect();
        let mut levels: Vec<String> = distinct.into_iter().map(str::to_string).collect();
        levels.sort_by(|a, b| compare_levels(a, b));
        levels
    }
}

fn compare_levels(a: &str, b: &str) -> Ordering {
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// The one filter contract: level ∈ `levels` AND state ∈ `states`.
/// An empty set matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub levels: BTreeSet<String>,
    pub states: BTreeSet<ReviewState>,
}

impl FilterCriteria {
    pub fn new(
        levels: impl IntoIterator<Item = String>,
        states: impl IntoIterator<Item = ReviewState>,
    ) -> Self {
        Self {
            levels: levels.into_iter().collect(),
            states: states.into_iter().collect(),
        }
    }

    /// Every level in `deck`, every state. Selects the whole deck.
    pub fn everything(deck: &Deck) -> Self {
        Self::new(deck.levels(), ReviewState::ALL)
    }

    /// Every level in `deck`, only the given states.
    pub fn states_only(deck: &Deck, states: impl IntoIterator<Item = ReviewState>) -> Self {
        Self::new(deck.levels(), states)
    }

    pub fn matches(&self, item: &Item) -> bool {
        self.levels.contains(&item.level) && self.states.contains(&item.state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{records, rng};

    fn ids(deck: &Deck) -> Vec<u32> {
        deck.iter().map(|item| item.id.0).collect()
    }

    fn sorted_ids(deck: &Deck) -> Vec<u32> {
        let mut ids = ids(deck);
        ids.sort();
        ids
    }

    #[test]
    fn test_load_assigns_sequential_ids_and_keeps_membership() {
        let deck = Deck::load(records(5), &mut rng());
        assert_eq!(deck.len(), 5);
        assert_eq!(sorted_ids(&deck), vec![1, 2, 3, 4, 5]);
        assert!(deck.iter().all(|item| item.state() == ReviewState::Unset));
    }

    #[test]
    fn test_load_carries_payload() {
        let deck = Deck::load(records(1), &mut rng());
        let item = deck.at(0).unwrap();
        assert_eq!(item.front_text, "front 1");
        assert_eq!(item.back_text, "back 1");
        assert_eq!(item.hint, "hint 1");
        assert_eq!(item.level, "1");
    }

    #[test]
    fn test_at_out_of_bounds_is_index_error() {
        let deck = Deck::load(records(2), &mut rng());
        assert_eq!(deck.at(2).unwrap_err(), IndexError { index: 2, len: 2 });
        assert!(Deck::new().at(0).is_err());
    }

    #[test]
    fn test_from_items_drops_duplicate_identities() {
        let a = Rc::new(Item::new(ItemId(1), "1", "a", "", ""));
        let b = Rc::new(Item::new(ItemId(2), "1", "b", "", ""));
        let deck = Deck::from_items(vec![a.clone(), b, a]);
        assert_eq!(ids(&deck), vec![1, 2]);
    }

    #[test]
    fn test_filter_keeps_relative_order_and_source() {
        let deck = Deck::load(records(6), &mut rng());
        let order = ids(&deck);
        let even = deck.filter(|item| item.id.0 % 2 == 0);

        let expected: Vec<u32> = order.iter().copied().filter(|id| id % 2 == 0).collect();
        assert_eq!(ids(&even), expected);
        assert_eq!(ids(&deck), order);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let deck = Deck::load(records(8), &mut rng());
        deck.at(1).unwrap().toggle_state(ReviewState::Favorite);
        deck.at(4).unwrap().toggle_state(ReviewState::Favorite);
        let criteria = FilterCriteria::states_only(&deck, [ReviewState::Favorite]);

        let once = deck.filter(|item| criteria.matches(item));
        let twice = once.filter(|item| criteria.matches(item));

        assert_eq!(once.len(), 2);
        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn test_filtered_deck_shares_item_state() {
        let deck = Deck::load(records(3), &mut rng());
        let view = deck.filter(|_| true);
        view.at(0).unwrap().toggle_state(ReviewState::Right);
        assert_eq!(deck.at(0).unwrap().state(), ReviewState::Right);
    }

    #[test]
    fn test_shuffle_preserves_membership() {
        let mut deck = Deck::load(records(20), &mut rng());
        let before = sorted_ids(&deck);
        deck.shuffle(&mut rng());
        assert_eq!(deck.len(), 20);
        assert_eq!(sorted_ids(&deck), before);
    }

    #[test]
    fn test_shuffle_small_decks_is_noop() {
        let mut empty = Deck::new();
        empty.shuffle(&mut rng());
        assert!(empty.is_empty());

        let mut single = Deck::load(records(1), &mut rng());
        single.shuffle(&mut rng());
        assert_eq!(ids(&single), vec![1]);
    }

    #[test]
    fn test_remove_shifts_and_keeps_identities() {
        let mut deck = Deck::load(records(4), &mut rng());
        let order = ids(&deck);
        let victim = deck.at(1).unwrap().clone();

        let removed = deck.remove(&victim).unwrap();

        assert_eq!(removed.id, victim.id);
        assert_eq!(deck.len(), 3);
        assert!(!deck.contains(&victim));
        let expected: Vec<u32> = order.iter().copied().filter(|id| *id != victim.id.0).collect();
        assert_eq!(ids(&deck), expected);
    }

    #[test]
    fn test_remove_missing_item_is_none() {
        let mut deck = Deck::load(records(2), &mut rng());
        let stranger = Item::new(ItemId(99), "1", "", "", "");
        assert!(deck.remove(&stranger).is_none());
        assert_eq!(deck.len(), 2);
    }

    #[test]
    fn test_levels_sorted_numeric_first() {
        let items = ["10", "2", "kana", "2", "1"]
            .iter()
            .enumerate()
            .map(|(i, level)| Rc::new(Item::new(ItemId(i as u32 + 1), *level, "", "", "")));
        let deck = Deck::from_items(items);
        assert_eq!(deck.levels(), vec!["1", "2", "10", "kana"]);
    }

    #[test]
    fn test_criteria_is_level_and_state() {
        let a = Item::new(ItemId(1), "1", "", "", "");
        let b = Item::new(ItemId(2), "2", "", "", "");
        b.toggle_state(ReviewState::Wrong);

        let criteria = FilterCriteria::new(["2".to_string()], [ReviewState::Wrong]);
        assert!(!criteria.matches(&a));
        assert!(criteria.matches(&b));

        let nothing = FilterCriteria::default();
        assert!(!nothing.matches(&a));
    }
}
