//! # TUI Components
//!
//! All UI components for the terminal quiz.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: current address and status message
//!
//! ### Stateful Components (Event-Driven)
//!
//! Persistent state lives in `TuiState`; a transient wrapper borrows it
//! each frame to render:
//! - `CardView` / `CardViewState`: the current card, observing its item
//! - `FilterPanel` / `FilterPanelState`: level + state selection overlay
//! - `AddressPrompt` / `AddressPromptState`: type an address to jump to
//!
//! Components receive external data as props, never by reaching into
//! `App`, so each one can be rendered against a `TestBackend` on its own.

pub mod address_prompt;
pub mod card_view;
pub mod filter_panel;
mod title_bar;

pub use address_prompt::{AddressPrompt, AddressPromptState, PromptEvent};
pub use card_view::{CardView, CardViewState};
pub use filter_panel::{FilterEvent, FilterPanel, FilterPanelState};
pub use title_bar::TitleBar;
