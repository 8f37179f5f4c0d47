//! # Items
//!
//! One flashcard record plus its review annotation.
//!
//! ```text
//! Item
//! ├── id: ItemId            // stable identity, survives filter/shuffle
//! ├── level: String         // "niveau" tag, used by filters
//! ├── front_text / back_text / hint
//! ├── state: Cell<ReviewState>
//! └── observers: RefCell<..> // change:state listeners
//! ```
//!
//! Items are shared between the root deck and any filtered view via
//! `Rc<Item>`, so a toggle made while browsing a filtered view is visible
//! everywhere. Everything here is single-threaded (`Rc`, `Cell`, `RefCell`).

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::str::FromStr;

use log::debug;

/// Shared handle to an item. Decks hold these, never owned `Item`s.
pub type ItemRef = Rc<Item>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Review annotation. Exactly one value at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReviewState {
    #[default]
    Unset,
    Favorite,
    Right,
    Wrong,
}

impl ReviewState {
    pub const ALL: [ReviewState; 4] = [
        ReviewState::Unset,
        ReviewState::Favorite,
        ReviewState::Right,
        ReviewState::Wrong,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewState::Unset => "unset",
            ReviewState::Favorite => "favorite",
            ReviewState::Right => "right",
            ReviewState::Wrong => "wrong",
        }
    }

    /// The visual attribute mirroring this state. Unset items carry none.
    pub fn state_class(&self) -> Option<&'static str> {
        match self {
            ReviewState::Unset => None,
            other => Some(other.as_str()),
        }
    }
}

impl fmt::Display for ReviewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownState(pub String);

impl fmt::Display for UnknownState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown review state: {:?}", self.0)
    }
}

impl std::error::Error for UnknownState {}

impl FromStr for ReviewState {
    type Err = UnknownState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unset" | "normal" | "" => Ok(ReviewState::Unset),
            "favorite" | "favourite" => Ok(ReviewState::Favorite),
            "right" => Ok(ReviewState::Right),
            "wrong" => Ok(ReviewState::Wrong),
            _ => Err(UnknownState(s.to_string())),
        }
    }
}

type Observer = Rc<dyn Fn(ReviewState)>;

#[derive(Default)]
struct Observers {
    next_key: u64,
    entries: Vec<(u64, Observer)>,
}

pub struct Item {
    pub id: ItemId,
    pub level: String,
    pub front_text: String,
    pub back_text: String,
    pub hint: String,
    state: Cell<ReviewState>,
    observers: RefCell<Observers>,
}

impl Item {
    pub fn new(
        id: ItemId,
        level: impl Into<String>,
        front_text: impl Into<String>,
        back_text: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self {
            id,
            level: level.into(),
            front_text: front_text.into(),
            back_text: back_text.into(),
            hint: hint.into(),
            state: Cell::new(ReviewState::Unset),
            observers: RefCell::new(Observers::default()),
        }
    }

    /// Blank stand-in shown when the active deck is empty.
    pub fn placeholder() -> Self {
        Self::new(ItemId(0), "", "", "", "")
    }

    pub fn is_placeholder(&self) -> bool {
        self.id == ItemId(0)
    }

    pub fn state(&self) -> ReviewState {
        self.state.get()
    }

    pub fn state_class(&self) -> Option<&'static str> {
        self.state.get().state_class()
    }

    /// Toggle semantics: re-applying the current state clears it,
    /// anything else replaces it. Observers always hear the result.
    pub fn toggle_state(&self, new_state: ReviewState) -> ReviewState {
        let next = if self.state.get() == new_state {
            ReviewState::Unset
        } else {
            new_state
        };
        self.state.set(next);
        debug!("Item {} state -> {}", self.id, next);
        self.notify(next);
        next
    }

    /// Register a `change:state` observer. Dropping the returned
    /// `Subscription` unregisters it.
    pub fn subscribe(self: &Rc<Self>, observer: impl Fn(ReviewState) + 'static) -> Subscription {
        let mut observers = self.observers.borrow_mut();
        let key = observers.next_key;
        observers.next_key += 1;
        observers.entries.push((key, Rc::new(observer)));
        Subscription {
            item: Rc::downgrade(self),
            key,
        }
    }

    pub fn observer_count(&self) -> usize {
        self.observers.borrow().entries.len()
    }

    /// Calls a snapshot of the observers taken before the first call, so a
    /// callback may subscribe or drop subscriptions on this same item.
    fn notify(&self, state: ReviewState) {
        let snapshot: Vec<Observer> = self
            .observers
            .borrow()
            .entries
            .iter()
            .map(|(_, observer)| Rc::clone(observer))
            .collect();
        for observer in snapshot {
            observer(state);
        }
    }

    fn unsubscribe(&self, key: u64) {
        self.observers
            .borrow_mut()
            .entries
            .retain(|(k, _)| *k != key);
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("id", &self.id)
            .field("level", &self.level)
            .field("front_text", &self.front_text)
            .field("state", &self.state.get())
            .field("observers", &self.observer_count())
            .finish()
    }
}

/// Identity comparison. Payload and state are irrelevant.
impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Item {}

/// Guard for one observer registration on one item.
#[must_use = "dropping a Subscription immediately unregisters the observer"]
pub struct Subscription {
    item: Weak<Item>,
    key: u64,
}

impl Subscription {
    pub fn item_id(&self) -> Option<ItemId> {
        self.item.upgrade().map(|item| item.id)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(item) = self.item.upgrade() {
            item.unsubscribe(self.key);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("item", &self.item_id())
            .field("key", &self.key)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> ItemRef {
        Rc::new(Item::new(ItemId(1), "1", "ichi", "一", "one"))
    }

    #[test]
    fn test_new_item_is_unset() {
        let item = item();
        assert_eq!(item.state(), ReviewState::Unset);
        assert_eq!(item.state_class(), None);
    }

    #[test]
    fn test_toggle_same_state_twice_clears() {
        let item = item();
        assert_eq!(item.toggle_state(ReviewState::Favorite), ReviewState::Favorite);
        assert_eq!(item.toggle_state(ReviewState::Favorite), ReviewState::Unset);
    }

    #[test]
    fn test_toggle_different_state_replaces() {
        let item = item();
        item.toggle_state(ReviewState::Favorite);
        item.toggle_state(ReviewState::Wrong);
        assert_eq!(item.state(), ReviewState::Wrong);
        assert_eq!(item.state_class(), Some("wrong"));
    }

    #[test]
    fn test_toggle_unset_is_a_clear() {
        let item = item();
        item.toggle_state(ReviewState::Unset);
        assert_eq!(item.state(), ReviewState::Unset);
        item.toggle_state(ReviewState::Right);
        item.toggle_state(ReviewState::Unset);
        assert_eq!(item.state(), ReviewState::Unset);
    }

    #[test]
    fn test_observer_sees_each_change() {
        let item = item();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _sub = item.subscribe(move |state| sink.borrow_mut().push(state));

        item.toggle_state(ReviewState::Right);
        item.toggle_state(ReviewState::Right);

        assert_eq!(*seen.borrow(), vec![ReviewState::Right, ReviewState::Unset]);
    }

    #[test]
    fn test_dropping_subscription_unregisters() {
        let item = item();
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let sub = item.subscribe(move |_| counter.set(counter.get() + 1));
        assert_eq!(item.observer_count(), 1);

        drop(sub);
        item.toggle_state(ReviewState::Wrong);

        assert_eq!(item.observer_count(), 0);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_observer_may_drop_its_own_subscription() {
        let item = item();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let hits = Rc::new(Cell::new(0));
        let own = slot.clone();
        let counter = hits.clone();
        let sub = item.subscribe(move |_| {
            counter.set(counter.get() + 1);
            own.borrow_mut().take();
        });
        *slot.borrow_mut() = Some(sub);

        item.toggle_state(ReviewState::Right);
        assert_eq!(item.observer_count(), 0);

        item.toggle_state(ReviewState::Wrong);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_observer_may_subscribe_during_notify() {
        let item = item();
        let added = Rc::new(RefCell::new(Vec::new()));
        let sink = added.clone();
        let target = Rc::downgrade(&item);
        let _sub = item.subscribe(move |_| {
            if let Some(item) = target.upgrade() {
                sink.borrow_mut().push(item.subscribe(|_| {}));
            }
        });

        item.toggle_state(ReviewState::Favorite);

        assert_eq!(item.observer_count(), 2);
        assert_eq!(added.borrow().len(), 1);
    }

    #[test]
    fn test_subscription_outliving_item_is_harmless() {
        let item = item();
        let sub = item.subscribe(|_| {});
        drop(item);
        assert_eq!(sub.item_id(), None);
        drop(sub);
    }

    #[test]
    fn test_only_matching_subscription_is_removed() {
        let item = item();
        let a = item.subscribe(|_| {});
        let _b = item.subscribe(|_| {});
        drop(a);
        assert_eq!(item.observer_count(), 1);
    }

    #[test]
    fn test_review_state_parses_tags() {
        assert_eq!("favorite".parse::<ReviewState>(), Ok(ReviewState::Favorite));
        assert_eq!("normal".parse::<ReviewState>(), Ok(ReviewState::Unset));
        assert_eq!(" Wrong ".parse::<ReviewState>(), Ok(ReviewState::Wrong));
        assert!("maybe".parse::<ReviewState>().is_err());
    }

    #[test]
    fn test_equality_is_identity() {
        let a = Item::new(ItemId(3), "1", "a", "b", "c");
        let b = Item::new(ItemId(3), "2", "x", "y", "z");
        assert_eq!(a, b);
        assert_ne!(a, Item::placeholder());
    }
}
