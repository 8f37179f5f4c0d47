//! # Core Quiz Logic
//!
//! This module contains the quiz's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Item / Deck          │
//!                    │  • Navigator            │
//!                    │  • RouteDispatcher      │
//!                    │  • update() (reducer)   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │    Web     │      │   Tests    │
//!     │  Adapter   │      │  Adapter   │      │            │
//!     │ (ratatui)  │      │  (future)  │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`item`]: `Item` and its review annotation, with change observers
//! - [`deck`]: `Deck`, the ordered item collection, and `FilterCriteria`
//! - [`navigator`]: bounded cursor over the active deck
//! - [`route`]: `questions/...` addresses and their dispatcher
//! - [`state`]: the `App` struct, all session state in one place
//! - [`action`]: the `Action` enum and `update()`
//! - [`config`]: config file + env + CLI resolution

pub mod action;
pub mod config;
pub mod deck;
pub mod item;
pub mod navigator;
pub mod route;
pub mod state;
